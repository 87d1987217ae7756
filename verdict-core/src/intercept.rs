//! # Fault interception
//!
//! Options shared by every factory and `map` variant, and the policy that
//! turns whatever a computation produced into an `Outcome`:
//!
//! 1. A value becomes `Ok`
//! 2. An expected fault goes to the classifier; if it declines, default
//!    normalization applies, tagged with the error group
//! 3. A panic becomes an `"Unknown error"` carrying the payload text

use crate::error::{Fault, StructuredError, Trace};
use crate::Outcome;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe, Location};
use std::sync::Arc;

/// Maps an expected fault to a structured error, or declines with `None`.
pub type Classifier = Arc<dyn Fn(&Fault, &Trace) -> Option<StructuredError> + Send + Sync>;

/// Interception options: a fault classifier or an error group, not both.
///
/// # Panics (debug only)
/// Setting both a classifier and a group panics in debug builds. Release
/// builds keep both: the classifier runs first and the group tags the
/// fallback.
///
/// # Example
///
/// ```rust
/// use verdict_core::{Fault, FaultKind, Intercept, Outcome, StructuredError};
///
/// let intercept = Intercept::classified(|fault, _trace| match fault.kind() {
///     FaultKind::NotFound => Some(StructuredError::new("missing record").with_source("db")),
///     _ => None,
/// });
///
/// let outcome: Outcome<u32> =
///     Outcome::from_computation_with(|| Err(Fault::not_found("row 7")), &intercept);
/// assert_eq!(outcome.error().map(|e| e.message()), Some("missing record"));
/// ```
#[derive(Clone, Default)]
pub struct Intercept {
    classifier: Option<Classifier>,
    group: Option<String>,
}

impl Intercept {
    /// No classifier, no group: plain default normalization
    pub fn new() -> Self {
        Self::default()
    }

    /// Intercept with a fault classifier
    pub fn classified<C>(classifier: C) -> Self
    where
        C: Fn(&Fault, &Trace) -> Option<StructuredError> + Send + Sync + 'static,
    {
        Self::new().classify_with(classifier)
    }

    /// Intercept with an error group tag
    pub fn grouped(group: impl Into<String>) -> Self {
        Self::new().group(group)
    }

    /// Set the fault classifier.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if a group was already set.
    pub fn classify_with<C>(mut self, classifier: C) -> Self
    where
        C: Fn(&Fault, &Trace) -> Option<StructuredError> + Send + Sync + 'static,
    {
        debug_assert!(
            self.group.is_none(),
            "fault classifier and error group are mutually exclusive"
        );
        self.classifier = Some(Arc::new(classifier));
        self
    }

    /// Set the error group.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if a classifier was already set.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        debug_assert!(
            self.classifier.is_none(),
            "fault classifier and error group are mutually exclusive"
        );
        self.group = Some(group.into());
        self
    }

    /// Get the error group
    pub fn group_tag(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Check if a classifier is set
    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    // =========================================================================
    // Normalization
    // =========================================================================

    /// Turn an expected fault into a structured error.
    ///
    /// A classifier that panics is treated like a panicking computation:
    /// the result is an `"Unknown error"` carrying the classifier's payload.
    pub fn normalize(&self, fault: Fault, location: &'static Location<'static>) -> StructuredError {
        let trace = Trace::at(location).with_backtrace_of(&fault);

        if let Some(classify) = &self.classifier {
            match panic::catch_unwind(AssertUnwindSafe(|| classify(&fault, &trace))) {
                Ok(Some(err)) => {
                    tracing::debug!(
                        kind = %fault.kind(),
                        tag = err.source(),
                        at = %location,
                        "fault classified"
                    );
                    if err.trace().is_some() {
                        return err;
                    }
                    return err.with_trace(trace);
                }
                Ok(None) => {}
                Err(payload) => {
                    let text = panic_message(payload.as_ref());
                    tracing::debug!(
                        kind = %fault.kind(),
                        payload = %text,
                        at = %location,
                        "classifier panicked"
                    );
                    return StructuredError::unknown(text, trace, self.group.clone());
                }
            }
        }

        tracing::debug!(
            kind = %fault.kind(),
            group = self.group_tag(),
            classifier = self.has_classifier(),
            at = %location,
            "fault normalized with defaults"
        );
        StructuredError::from_fault(fault, trace, self.group.clone(), None)
    }

    /// Turn a panic payload into an `"Unknown error"`
    pub fn capture_panic(
        &self,
        payload: Box<dyn Any + Send>,
        location: &'static Location<'static>,
    ) -> StructuredError {
        let text = panic_message(payload.as_ref());
        tracing::debug!(
            group = self.group_tag(),
            payload = %text,
            at = %location,
            "panic captured"
        );
        StructuredError::unknown(text, Trace::at(location), self.group.clone())
    }

    /// Settle a caught computation result into an outcome
    pub(crate) fn settle<T, E>(
        &self,
        result: std::thread::Result<Result<T, E>>,
        location: &'static Location<'static>,
    ) -> Outcome<T>
    where
        E: Into<Fault>,
    {
        match result {
            Ok(Ok(value)) => Outcome::Ok(value),
            Ok(Err(fault)) => match panic::catch_unwind(AssertUnwindSafe(|| fault.into())) {
                Ok(fault) => Outcome::Err(self.normalize(fault, location)),
                Err(payload) => Outcome::Err(self.capture_panic(payload, location)),
            },
            Err(payload) => Outcome::Err(self.capture_panic(payload, location)),
        }
    }
}

impl fmt::Debug for Intercept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intercept")
            .field("classifier", &self.has_classifier())
            .field("group", &self.group)
            .finish()
    }
}

/// Text of a panic payload. `panic!` produces `&str` or `String`; anything
/// else gets a fixed marker.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Details, FaultKind, UNKNOWN_MESSAGE};

    fn db_classifier(fault: &Fault, _trace: &Trace) -> Option<StructuredError> {
        match fault.kind() {
            FaultKind::NotFound => Some(StructuredError::new("missing record").with_source("db")),
            _ => None,
        }
    }

    #[test]
    fn test_normalize_default() {
        let err = Intercept::new().normalize(Fault::parse("bad digit"), Location::caller());
        assert_eq!(err.message(), "bad digit");
        assert_eq!(err.source(), None);
        assert_eq!(err.fault().map(|f| f.kind()), Some(FaultKind::Parse));
    }

    #[test]
    fn test_normalize_grouped() {
        let err = Intercept::grouped("store").normalize(Fault::parse("bad"), Location::caller());
        assert_eq!(err.source(), Some("store"));
    }

    #[test]
    fn test_normalize_classified() {
        let intercept = Intercept::classified(db_classifier);
        let err = intercept.normalize(Fault::not_found("row 7"), Location::caller());
        assert_eq!(err.message(), "missing record");
        assert_eq!(err.source(), Some("db"));
        assert!(err.trace().is_some());
    }

    #[test]
    fn test_classifier_declines() {
        let intercept = Intercept::classified(db_classifier);
        let err = intercept.normalize(Fault::timeout("slow"), Location::caller());
        assert_eq!(err.message(), "slow");
        assert_eq!(err.source(), None);
    }

    #[test]
    fn test_classifier_sees_trace() {
        let here = Location::caller();
        let intercept = Intercept::classified(move |_fault, trace| {
            assert_eq!(trace.location().line(), here.line());
            Some(StructuredError::new("seen"))
        });
        let err = intercept.normalize(Fault::not_found("x"), here);
        assert_eq!(err.message(), "seen");
    }

    #[test]
    fn test_classifier_panic_is_captured() {
        let intercept = Intercept::classified(|_fault, _trace| -> Option<StructuredError> {
            panic!("classifier bug")
        });
        let err = intercept.normalize(Fault::not_found("x"), Location::caller());

        assert_eq!(err.message(), UNKNOWN_MESSAGE);
        assert_eq!(err.source(), None);
        assert_eq!(err.details(), Some(&Details::Panic("classifier bug".into())));
        assert!(err.trace().is_some());
    }

    #[test]
    fn test_classifier_panic_through_settle() {
        let intercept = Intercept::classified(|_fault, _trace| -> Option<StructuredError> {
            panic!("classifier bug")
        });
        let result: std::thread::Result<Result<u8, Fault>> = Ok(Err(Fault::not_found("x")));
        let outcome = intercept.settle(result, Location::caller());

        assert_eq!(outcome.error().map(|e| e.message()), Some(UNKNOWN_MESSAGE));
    }

    #[test]
    fn test_capture_panic_payloads() {
        let intercept = Intercept::grouped("worker");

        let err = intercept.capture_panic(Box::new("static text"), Location::caller());
        assert_eq!(err.message(), UNKNOWN_MESSAGE);
        assert_eq!(err.source(), Some("worker"));
        assert_eq!(err.details(), Some(&Details::Panic("static text".into())));

        let err = intercept.capture_panic(Box::new(String::from("owned")), Location::caller());
        assert_eq!(err.details(), Some(&Details::Panic("owned".into())));

        let err = intercept.capture_panic(Box::new(7_u8), Location::caller());
        assert_eq!(err.details(), Some(&Details::Panic("non-string panic payload".into())));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "mutually exclusive")]
    fn test_classifier_and_group_fail_fast() {
        let _ = Intercept::grouped("db").classify_with(db_classifier);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "mutually exclusive")]
    fn test_group_after_classifier_fails_fast() {
        let _ = Intercept::classified(db_classifier).group("db");
    }

    #[test]
    fn test_debug() {
        let debug = format!("{:?}", Intercept::grouped("db"));
        assert!(debug.contains("classifier: false"));
        assert!(debug.contains("\"db\""));
    }
}
