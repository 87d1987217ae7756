//! # verdict
//!
//! Explicit success-or-failure values for fallible code.
//!
//! ## Core Concepts
//! - **Outcome**: `Ok(value)` or `Err(StructuredError)`, never both, never neither
//! - **Factories**: Run a computation and capture every fault it raises
//! - **Intercept**: Classifier or error group deciding how faults are described
//! - **Combinators**: `fold`, `visit`, `recover`, `map`, `map_async` and friends
//!
//! ## Usage
//!
//! ```rust
//! use verdict_core::{Fault, FaultKind, Intercept, Outcome, StructuredError};
//!
//! fn load(id: u32) -> Result<String, Fault> {
//!     Err(Fault::not_found(format!("row {} not found", id)))
//! }
//!
//! let intercept = Intercept::classified(|fault, _| match fault.kind() {
//!     FaultKind::NotFound => Some(StructuredError::new("missing record").with_source("db")),
//!     _ => None,
//! });
//!
//! let name = Outcome::from_computation_with(|| load(7), &intercept)
//!     .fold(|name| name, |err| format!("<{}>", err));
//! assert_eq!(name, "<missing record>");
//! ```
//!
//! The library never logs to a sink of its own; interception emits `tracing`
//! events at debug level for whichever subscriber the application installs.

pub mod error;
pub mod intercept;
pub mod outcome;
mod deferred;

pub use error::{
    Details, Fault, FaultKind, OutcomeFailure, StructuredError, Trace, ABSENT_MESSAGE,
    UNKNOWN_MESSAGE,
};
pub use intercept::{Classifier, Intercept};
pub use outcome::Outcome;
