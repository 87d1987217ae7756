//! The expected-fault value returned by intercepted computations

use crate::FaultKind;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::sync::Arc;

/// An expected fault raised by a computation.
///
/// A `Fault` is what a fallible computation hands back in its `Err` arm
/// before interception turns it into a `StructuredError`:
/// - `kind`: Which recognized category the fault belongs to
/// - `message`: Human-readable description
/// - `source`: The underlying error (if any)
/// - `backtrace`: Captured at construction when `RUST_BACKTRACE` enables it
///
/// # Example
///
/// ```rust
/// use verdict_error::{Fault, FaultKind};
///
/// let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
/// let fault = Fault::from(io);
///
/// assert_eq!(fault.kind(), FaultKind::NotFound);
/// assert_eq!(fault.message(), "no such file");
/// assert!(fault.downcast_ref::<std::io::Error>().is_some());
/// ```
#[derive(Clone)]
pub struct Fault {
    kind: FaultKind,
    message: String,
    source: Option<Arc<anyhow::Error>>,
    backtrace: Arc<Backtrace>,
}

impl Fault {
    /// Create a new fault with the given kind and message
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
            backtrace: Arc::new(Backtrace::capture()),
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the fault kind
    pub fn kind(&self) -> FaultKind {
        self.kind
    }

    /// Get the fault message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error (if any)
    pub fn source_ref(&self) -> Option<&anyhow::Error> {
        self.source.as_deref()
    }

    /// Get the wrapped source error as a concrete type
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.source.as_deref()?.downcast_ref::<E>()
    }

    /// Get the backtrace, if one was captured
    pub fn backtrace(&self) -> Option<&Backtrace> {
        match self.backtrace.status() {
            BacktraceStatus::Captured => Some(&self.backtrace),
            _ => None,
        }
    }

    pub(crate) fn shared_backtrace(&self) -> Option<Arc<Backtrace>> {
        self.backtrace().map(|_| Arc::clone(&self.backtrace))
    }

    // =========================================================================
    // Builders (chainable)
    // =========================================================================

    /// Set the source error.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if source was already set.
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(Arc::new(source.into()));
        self
    }
}

// =============================================================================
// Convenience constructors
// =============================================================================

impl Fault {
    /// Create a NotFound fault
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(FaultKind::NotFound, message)
    }

    /// Create an InvalidInput fault
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(FaultKind::InvalidInput, message)
    }

    /// Create a Parse fault
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Parse, message)
    }

    /// Create a Timeout fault
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Timeout, message)
    }

    /// Create an Unsupported fault
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Unsupported, message)
    }

    /// Wrap any error as an `Other` fault, keeping it as the source
    pub fn other<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::new(FaultKind::Other, err.to_string()).with_source(err)
    }
}

// =============================================================================
// Display / Debug
// =============================================================================

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fault({}: {:?}", self.kind, self.message)?;
        if let Some(source) = &self.source {
            write!(f, ", source: {:?}", source)?;
        }
        write!(f, ")")
    }
}

impl PartialEq for Fault {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.message == other.message
    }
}

impl Eq for Fault {}

impl std::error::Error for Fault {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        let source: &anyhow::Error = self.source.as_deref()?;
        Some(&**source)
    }
}

// =============================================================================
// Conversions from common error types
// =============================================================================

impl From<std::io::Error> for Fault {
    fn from(err: std::io::Error) -> Self {
        Fault::new(FaultKind::from_io(err.kind()), err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Fault {
    fn from(err: serde_json::Error) -> Self {
        let kind = if err.is_io() {
            FaultKind::Io
        } else {
            FaultKind::Parse
        };
        Fault::new(kind, err.to_string()).with_source(err)
    }
}

impl From<std::num::ParseIntError> for Fault {
    fn from(err: std::num::ParseIntError) -> Self {
        Fault::parse(err.to_string()).with_source(err)
    }
}

impl From<std::num::ParseFloatError> for Fault {
    fn from(err: std::num::ParseFloatError) -> Self {
        Fault::parse(err.to_string()).with_source(err)
    }
}

impl From<anyhow::Error> for Fault {
    fn from(err: anyhow::Error) -> Self {
        Fault::new(FaultKind::Other, err.to_string()).with_source(err)
    }
}
