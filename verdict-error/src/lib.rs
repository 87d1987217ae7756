//! # verdict-error
//!
//! Structured failure descriptions for verdict.
//!
//! ## Design Philosophy
//!
//! - **FaultKind**: The closed set of expected fault categories a classifier can match on
//! - **Fault**: What an expected failure looks like before it is normalized
//! - **StructuredError**: The immutable, normalized record an `Outcome` carries
//! - **Trace**: Where the fault came from (call site plus optional backtrace)
//!
//! ## Usage
//!
//! ```rust
//! use verdict_error::{Fault, FaultKind, StructuredError, Trace};
//!
//! let fault = Fault::not_found("record 'user:7' not found");
//! assert_eq!(fault.kind(), FaultKind::NotFound);
//!
//! let err = StructuredError::from_fault(fault, Trace::here(), Some("db".to_string()), None);
//! assert_eq!(err.source(), Some("db"));
//! assert_eq!(err.message(), "record 'user:7' not found");
//! ```
//!
//! ## Principles
//!
//! - Every `StructuredError` has a non-empty message
//! - Equality is `source` + `message` + `details`; the trace is diagnostic only
//! - Underlying errors are wrapped with `Fault::with_source`, never leaked raw

mod details;
mod error;
mod fault;
mod kind;
mod trace;

pub use details::Details;
pub use error::{StructuredError, ABSENT_MESSAGE, UNKNOWN_MESSAGE};
pub use fault::Fault;
pub use kind::FaultKind;
pub use trace::Trace;
