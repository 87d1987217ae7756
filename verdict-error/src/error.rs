//! The normalized error record carried by a failed outcome

use crate::{Details, Fault, Trace};
use std::fmt;

/// Message used when a panic, or anything else outside the expected fault
/// categories, is captured.
pub const UNKNOWN_MESSAGE: &str = "Unknown error";

/// Message used when a successful outcome turns out to carry no value.
pub const ABSENT_MESSAGE: &str = "Outcome value was absent";

/// An immutable description of a failure.
///
/// This error type provides:
/// - `source`: Optional category tag (the error group or classifier's choice)
/// - `message`: Human-readable description, never empty
/// - `details`: The original fault, panic payload, or caller context
/// - `trace`: Where the fault was intercepted
///
/// Two errors are equal when `source`, `message` and `details` are equal.
/// The trace never takes part in equality.
///
/// # Example
///
/// ```rust
/// use verdict_error::StructuredError;
///
/// let err = StructuredError::new("missing record")
///     .with_source("db")
///     .with_context(serde_json::json!({"table": "users"}));
///
/// assert_eq!(err.source(), Some("db"));
/// assert_eq!(err.to_string(), "missing record");
/// ```
#[derive(Clone)]
pub struct StructuredError {
    source: Option<String>,
    message: String,
    details: Option<Details>,
    trace: Option<Trace>,
}

impl StructuredError {
    /// Create a new error with the given message.
    ///
    /// An empty message is replaced with [`UNKNOWN_MESSAGE`].
    pub fn new(message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = UNKNOWN_MESSAGE.to_string();
        }

        Self {
            source: None,
            message,
            details: None,
            trace: None,
        }
    }

    /// Default normalization of an expected fault.
    ///
    /// The message is the fault's rendered text. Details default to the
    /// fault itself unless the caller supplies their own.
    pub fn from_fault(
        fault: Fault,
        trace: Trace,
        source: Option<String>,
        details: Option<Details>,
    ) -> Self {
        let mut err = Self::new(fault.to_string());
        err.source = source;
        err.details = Some(details.unwrap_or(Details::Fault(fault)));
        err.trace = Some(trace);
        err
    }

    /// Normalization of a fault outside the expected categories
    pub fn unknown(payload: impl Into<String>, trace: Trace, source: Option<String>) -> Self {
        let mut err = Self::new(UNKNOWN_MESSAGE);
        err.source = source;
        err.details = Some(Details::Panic(payload.into()));
        err.trace = Some(trace);
        err
    }

    /// The error for a success whose value turned out to be absent
    pub fn absent() -> Self {
        Self::new(ABSENT_MESSAGE)
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the category tag
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the details payload
    pub fn details(&self) -> Option<&Details> {
        self.details.as_ref()
    }

    /// Get the origin context
    pub fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    /// The original fault, when this error was normalized from one
    pub fn fault(&self) -> Option<&Fault> {
        self.details.as_ref().and_then(Details::as_fault)
    }

    // =========================================================================
    // Builders (chainable)
    // =========================================================================

    /// Set the category tag
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the details payload
    pub fn with_details(mut self, details: Details) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach caller-supplied context as details
    pub fn with_context(self, context: serde_json::Value) -> Self {
        self.with_details(Details::Context(context))
    }

    /// Set the origin context
    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.trace = Some(trace);
        self
    }
}

impl PartialEq for StructuredError {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.message == other.message
            && self.details == other.details
    }
}

impl Eq for StructuredError {}

// =============================================================================
// Display - the message alone, ready for presentation
// =============================================================================

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

// =============================================================================
// Debug - verbose, multi-line format for debugging
// =============================================================================

impl fmt::Debug for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => writeln!(f, "[{}] {}", source, self.message)?,
            None => writeln!(f, "{}", self.message)?,
        }

        if let Some(details) = &self.details {
            writeln!(f)?;
            writeln!(f, "    Details: {}", details)?;
        }

        if let Some(trace) = &self.trace {
            writeln!(f)?;
            writeln!(f, "    At: {}", trace.location())?;
        }

        Ok(())
    }
}
