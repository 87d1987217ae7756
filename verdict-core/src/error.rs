//! Outcome error types
//!
//! Re-exports verdict-error and adds the failure raised by `value_or_throw`.

pub use verdict_error::{
    Details, Fault, FaultKind, StructuredError, Trace, ABSENT_MESSAGE, UNKNOWN_MESSAGE,
};

/// Raised when a caller deliberately unwraps a failed outcome.
///
/// Renders as the carried error's message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct OutcomeFailure(StructuredError);

impl OutcomeFailure {
    pub(crate) fn new(error: StructuredError) -> Self {
        Self(error)
    }

    /// Get the carried error
    pub fn error(&self) -> &StructuredError {
        &self.0
    }

    /// Take the carried error
    pub fn into_error(self) -> StructuredError {
        self.0
    }
}

impl From<OutcomeFailure> for StructuredError {
    fn from(failure: OutcomeFailure) -> Self {
        failure.0
    }
}
