//! Origin context for intercepted faults

use crate::Fault;
use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Where a fault was intercepted, and where it came from if known.
///
/// The location is the call site of the factory or combinator that ran the
/// computation. The backtrace is the one the fault captured when it was
/// built; panics carry none.
#[derive(Clone)]
pub struct Trace {
    location: &'static Location<'static>,
    backtrace: Option<Arc<Backtrace>>,
}

impl Trace {
    /// Trace pointing at the caller
    #[track_caller]
    pub fn here() -> Self {
        Self::at(Location::caller())
    }

    /// Trace pointing at an explicit location
    pub fn at(location: &'static Location<'static>) -> Self {
        Self {
            location,
            backtrace: None,
        }
    }

    /// Attach the backtrace captured by `fault`, if it has one
    pub fn with_backtrace_of(mut self, fault: &Fault) -> Self {
        self.backtrace = fault.shared_backtrace();
        self
    }

    /// Get the call site where the fault was intercepted
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Get the backtrace captured with the fault, if any
    pub fn backtrace(&self) -> Option<&Backtrace> {
        self.backtrace.as_deref()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.location)?;
        if let Some(backtrace) = &self.backtrace {
            write!(f, "\n{}", backtrace)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trace")
            .field("location", &format_args!("{}", self.location))
            .field("backtrace", &self.backtrace.is_some())
            .finish()
    }
}
