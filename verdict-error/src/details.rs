//! Opaque payload attached to a structured error

use crate::Fault;
use std::fmt;

/// What a `StructuredError` carries besides its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Details {
    /// The expected fault the error was normalized from
    Fault(Fault),
    /// Text of a captured panic payload
    Panic(String),
    /// Context supplied by the caller
    Context(serde_json::Value),
}

impl Details {
    /// The original fault, if these details carry one
    pub fn as_fault(&self) -> Option<&Fault> {
        match self {
            Details::Fault(fault) => Some(fault),
            _ => None,
        }
    }
}

impl fmt::Display for Details {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Details::Fault(fault) => write!(f, "{} ({})", fault, fault.kind()),
            Details::Panic(payload) => write!(f, "panic: {}", payload),
            Details::Context(value) => write!(f, "{}", value),
        }
    }
}
