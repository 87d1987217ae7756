//! Fault kinds recognized at the interception boundary

use std::fmt;

/// The category of an expected fault.
///
/// Classifiers match on this instead of on the concrete error type that
/// produced the fault. Anything that does not fit a named category is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FaultKind {
    /// The requested entity does not exist
    NotFound,

    /// The caller is not allowed to perform the operation
    PermissionDenied,

    /// The entity being created already exists
    AlreadyExists,

    /// Invalid argument or malformed input data
    InvalidInput,

    /// Failed to parse or deserialize input
    Parse,

    /// Any other IO failure
    Io,

    /// Connectivity failure (refused, reset, unreachable)
    Network,

    /// The operation did not finish in time
    Timeout,

    /// The requested feature or operation is not supported
    Unsupported,

    /// Recognized as an expected fault, but without a more specific category
    Other,
}

impl FaultKind {
    /// Returns the fault kind as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::NotFound => "NotFound",
            FaultKind::PermissionDenied => "PermissionDenied",
            FaultKind::AlreadyExists => "AlreadyExists",
            FaultKind::InvalidInput => "InvalidInput",
            FaultKind::Parse => "Parse",
            FaultKind::Io => "Io",
            FaultKind::Network => "Network",
            FaultKind::Timeout => "Timeout",
            FaultKind::Unsupported => "Unsupported",
            FaultKind::Other => "Other",
        }
    }

    pub(crate) fn from_io(kind: std::io::ErrorKind) -> Self {
        use std::io::ErrorKind as Io;
        match kind {
            Io::NotFound => FaultKind::NotFound,
            Io::PermissionDenied => FaultKind::PermissionDenied,
            Io::AlreadyExists => FaultKind::AlreadyExists,
            Io::InvalidInput | Io::InvalidData => FaultKind::InvalidInput,
            Io::TimedOut => FaultKind::Timeout,
            Io::ConnectionRefused
            | Io::ConnectionReset
            | Io::ConnectionAborted
            | Io::NotConnected
            | Io::AddrInUse
            | Io::AddrNotAvailable
            | Io::BrokenPipe => FaultKind::Network,
            Io::Unsupported => FaultKind::Unsupported,
            _ => FaultKind::Io,
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
