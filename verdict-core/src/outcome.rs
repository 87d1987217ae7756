//! # Outcome
//!
//! A success value or a structured error. Outcomes are values: every
//! combinator consumes or borrows the receiver and yields a new outcome,
//! nothing is mutated in place.
//!
//! Transformation graph:
//! - `Ok  --map(f)-->  Ok | Err`
//! - `Err --map(f)-->  Err` (unchanged, `f` never runs)
//! - `Err --recover--> Ok`
//! - `Ok  --recover--> Ok` (unchanged)

use crate::error::{Fault, OutcomeFailure, StructuredError};
use crate::Intercept;
use std::fmt;
use std::panic::{self, AssertUnwindSafe, Location};

/// Either a success value or a structured error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    /// The computation produced a value
    Ok(T),
    /// The computation failed; the error is already normalized
    Err(StructuredError),
}

impl<T> Outcome<T> {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Wrap a value as a success
    pub fn success(value: T) -> Self {
        Self::Ok(value)
    }

    /// Wrap an error as a failure
    pub fn failure(error: StructuredError) -> Self {
        Self::Err(error)
    }

    /// Run a fallible computation and capture whatever it produces.
    ///
    /// `Err` faults get default normalization, panics become
    /// `"Unknown error"`. Never panics itself.
    ///
    /// Captured panics still pass through the process panic hook, so the
    /// default hook prints them to stderr. Install your own hook with
    /// [`std::panic::set_hook`] to keep them silent.
    ///
    /// ```rust
    /// use verdict_core::Outcome;
    ///
    /// let outcome = Outcome::from_computation(|| "42".parse::<u32>());
    /// assert_eq!(outcome, Outcome::success(42));
    ///
    /// let outcome = Outcome::from_computation(|| "forty".parse::<u32>());
    /// assert!(!outcome.is_success());
    /// ```
    #[track_caller]
    pub fn from_computation<F, E>(computation: F) -> Self
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<Fault>,
    {
        Self::from_computation_with(computation, &Intercept::new())
    }

    /// Run a fallible computation under the given interception options
    #[track_caller]
    pub fn from_computation_with<F, E>(computation: F, intercept: &Intercept) -> Self
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<Fault>,
    {
        let location = Location::caller();
        let result = panic::catch_unwind(AssertUnwindSafe(computation));
        intercept.settle(result, location)
    }

    /// Run an infallible computation, capturing only panics
    #[track_caller]
    pub fn catching<F>(computation: F) -> Self
    where
        F: FnOnce() -> T,
    {
        Self::from_computation(move || Ok::<T, Fault>(computation()))
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Check if this is a success
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Check if this is a failure
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The success value, or `None` on failure
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Err(_) => None,
        }
    }

    /// The error, or `None` on success
    pub fn error(&self) -> Option<&StructuredError> {
        match self {
            Self::Ok(_) => None,
            Self::Err(err) => Some(err),
        }
    }

    /// Take the success value, dropping any error
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Err(_) => None,
        }
    }

    /// Take the error, dropping any value
    pub fn into_error(self) -> Option<StructuredError> {
        match self {
            Self::Ok(_) => None,
            Self::Err(err) => Some(err),
        }
    }

    /// Borrow the value; a failure clones its error
    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Err(err) => Outcome::Err(err.clone()),
        }
    }

    /// Convert into a plain `Result`
    pub fn into_result(self) -> Result<T, StructuredError> {
        self.into()
    }

    /// Re-enter `?`-based flow: the value, or an [`OutcomeFailure`] carrying the error
    pub fn value_or_throw(self) -> Result<T, OutcomeFailure> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Err(err) => Err(OutcomeFailure::new(err)),
        }
    }

    // =========================================================================
    // Branching
    // =========================================================================

    /// Collapse into one value; exactly one branch runs
    pub fn fold<R>(
        self,
        on_ok: impl FnOnce(T) -> R,
        on_err: impl FnOnce(StructuredError) -> R,
    ) -> R {
        match self {
            Self::Ok(value) => on_ok(value),
            Self::Err(err) => on_err(err),
        }
    }

    /// Run `f` on the value of a success
    pub fn for_each_ok(&self, f: impl FnOnce(&T)) {
        if let Self::Ok(value) = self {
            f(value);
        }
    }

    /// Run `f` on the error of a failure
    pub fn for_each_err(&self, f: impl FnOnce(&StructuredError)) {
        if let Self::Err(err) = self {
            f(err);
        }
    }

    /// Dispatch to exactly one of the two handlers
    pub fn visit(&self, on_ok: impl FnOnce(&T), on_err: impl FnOnce(&StructuredError)) {
        match self {
            Self::Ok(value) => on_ok(value),
            Self::Err(err) => on_err(err),
        }
    }

    // =========================================================================
    // Transformation
    // =========================================================================

    /// Turn a failure into a success; a success passes through untouched
    pub fn recover(self, f: impl FnOnce(StructuredError) -> T) -> Self {
        match self {
            Self::Ok(value) => Self::Ok(value),
            Self::Err(err) => Self::Ok(f(err)),
        }
    }

    /// Chain a fallible step. Failures short-circuit and `f` never runs.
    #[track_caller]
    pub fn map<U, F, E>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Result<U, E>,
        E: Into<Fault>,
    {
        self.map_with(f, &Intercept::new())
    }

    /// [`map`](Self::map) under the given interception options
    #[track_caller]
    pub fn map_with<U, F, E>(self, f: F, intercept: &Intercept) -> Outcome<U>
    where
        F: FnOnce(T) -> Result<U, E>,
        E: Into<Fault>,
    {
        match self {
            Self::Ok(value) => Outcome::from_computation_with(move || f(value), intercept),
            Self::Err(err) => Outcome::Err(err),
        }
    }

    /// Chain an infallible step, capturing only panics
    #[track_caller]
    pub fn map_value<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Ok(value) => Outcome::catching(move || f(value)),
            Self::Err(err) => Outcome::Err(err),
        }
    }

    /// Chain a step that already yields an outcome
    #[track_caller]
    pub fn and_then<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Self::Ok(value) => Outcome::catching(move || f(value)).flatten(),
            Self::Err(err) => Outcome::Err(err),
        }
    }

    /// Rewrite the error of a failure
    pub fn map_err(self, f: impl FnOnce(StructuredError) -> StructuredError) -> Self {
        match self {
            Self::Ok(value) => Self::Ok(value),
            Self::Err(err) => Self::Err(f(err)),
        }
    }
}

impl<T> Outcome<Outcome<T>> {
    /// Collapse a nested outcome; an outer failure wins
    pub fn flatten(self) -> Outcome<T> {
        match self {
            Self::Ok(inner) => inner,
            Self::Err(err) => Outcome::Err(err),
        }
    }
}

impl<T> Outcome<Option<T>> {
    /// Like [`fold`](Outcome::fold), but a success without a value goes to
    /// `on_err` with [`StructuredError::absent`].
    pub fn branch_if_some<R>(
        self,
        on_ok: impl FnOnce(T) -> R,
        on_err: impl FnOnce(StructuredError) -> R,
    ) -> R {
        match self {
            Self::Ok(Some(value)) => on_ok(value),
            Self::Ok(None) => on_err(StructuredError::absent()),
            Self::Err(err) => on_err(err),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl<T> From<Result<T, StructuredError>> for Outcome<T> {
    fn from(result: Result<T, StructuredError>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(err) => Self::Err(err),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, StructuredError> {
    fn from(outcome: Outcome<T>) -> Self {
        match outcome {
            Outcome::Ok(value) => Ok(value),
            Outcome::Err(err) => Err(err),
        }
    }
}

// =============================================================================
// Display - the value, or the error's message
// =============================================================================

impl<T: fmt::Display> fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok(value) => write!(f, "{}", value),
            Self::Err(err) => write!(f, "{}", err.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Details, FaultKind, ABSENT_MESSAGE, UNKNOWN_MESSAGE};
    use std::cell::Cell;

    fn missing() -> StructuredError {
        StructuredError::new("missing record").with_source("db")
    }

    #[test]
    fn test_success_inspection() {
        let outcome = Outcome::success(7);
        assert!(outcome.is_success());
        assert!(!outcome.is_failure());
        assert_eq!(outcome.value(), Some(&7));
        assert_eq!(outcome.error(), None);
        assert_eq!(outcome.into_value(), Some(7));
    }

    #[test]
    fn test_failure_inspection() {
        let outcome: Outcome<i32> = Outcome::failure(missing());
        assert!(!outcome.is_success());
        assert_eq!(outcome.value(), None);
        assert_eq!(outcome.error(), Some(&missing()));
        assert_eq!(outcome.into_error(), Some(missing()));
    }

    #[test]
    fn test_value_or_throw() {
        assert_eq!(Outcome::success("v").value_or_throw().unwrap(), "v");

        let failure = Outcome::<()>::failure(missing()).value_or_throw().unwrap_err();
        assert_eq!(failure.to_string(), "missing record");
        assert_eq!(failure.into_error(), missing());
    }

    #[test]
    fn test_from_computation_value() {
        let outcome = Outcome::from_computation(|| Ok::<_, Fault>(5));
        assert_eq!(outcome, Outcome::success(5));
    }

    #[test]
    fn test_from_computation_fault() {
        let outcome: Outcome<u8> = Outcome::from_computation(|| Err(Fault::not_found("row 7")));
        let err = outcome.error().unwrap();
        assert_eq!(err.message(), "row 7");
        assert_eq!(err.source(), None);
        assert_eq!(err.fault().map(|f| f.kind()), Some(FaultKind::NotFound));
    }

    #[test]
    fn test_from_computation_records_call_site() {
        let line = line!() + 1;
        let outcome: Outcome<u8> = Outcome::from_computation(|| Err(Fault::parse("x")));
        let trace = outcome.error().and_then(|e| e.trace()).unwrap();
        assert_eq!(trace.location().file(), file!());
        assert_eq!(trace.location().line(), line);
    }

    #[test]
    fn test_from_computation_panic() {
        let outcome: Outcome<u8> = Outcome::from_computation_with(
            || -> Result<u8, Fault> { panic!("index 9 out of range") },
            &Intercept::grouped("db"),
        );
        let err = outcome.error().unwrap();
        assert_eq!(err.message(), UNKNOWN_MESSAGE);
        assert_eq!(err.source(), Some("db"));
        assert_eq!(err.details(), Some(&Details::Panic("index 9 out of range".into())));
    }

    #[test]
    fn test_catching() {
        assert_eq!(Outcome::catching(|| 3 * 4), Outcome::success(12));

        let outcome: Outcome<i32> = Outcome::catching(|| panic!("no"));
        assert_eq!(outcome.error().map(|e| e.message()), Some(UNKNOWN_MESSAGE));
    }

    #[test]
    fn test_fold() {
        assert_eq!(Outcome::success(2).fold(|v| v * 10, |_| -1), 20);
        assert_eq!(Outcome::<i32>::failure(missing()).fold(|v| v * 10, |_| -1), -1);
    }

    #[test]
    fn test_for_each() {
        let hits = Cell::new(0);
        let ok = Outcome::success(1);
        let err: Outcome<i32> = Outcome::failure(missing());

        ok.for_each_ok(|_| hits.set(hits.get() + 1));
        ok.for_each_err(|_| hits.set(hits.get() + 100));
        err.for_each_ok(|_| hits.set(hits.get() + 100));
        err.for_each_err(|_| hits.set(hits.get() + 1));

        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_visit() {
        let seen = Cell::new("");
        Outcome::success(1).visit(|_| seen.set("ok"), |_| seen.set("err"));
        assert_eq!(seen.get(), "ok");
        Outcome::<i32>::failure(missing()).visit(|_| seen.set("ok"), |_| seen.set("err"));
        assert_eq!(seen.get(), "err");
    }

    #[test]
    fn test_recover() {
        let recovered =
            Outcome::<String>::failure(missing()).recover(|e| e.message().to_uppercase());
        assert_eq!(recovered, Outcome::success("MISSING RECORD".to_string()));

        let calls = Cell::new(0);
        let kept = Outcome::success("v".to_string()).recover(|_| {
            calls.set(calls.get() + 1);
            String::new()
        });
        assert_eq!(kept, Outcome::success("v".to_string()));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_map() {
        let outcome = Outcome::success("12").map(|s| s.parse::<i32>());
        assert_eq!(outcome, Outcome::success(12));

        let outcome = Outcome::success("twelve").map(|s| s.parse::<i32>());
        let kind = outcome.error().and_then(|e| e.fault()).map(|f| f.kind());
        assert_eq!(kind, Some(FaultKind::Parse));
    }

    #[test]
    fn test_map_short_circuits() {
        let calls = Cell::new(0);
        let outcome = Outcome::<i32>::failure(missing()).map(|v| {
            calls.set(calls.get() + 1);
            Ok::<_, Fault>(v + 1)
        });
        assert_eq!(outcome, Outcome::failure(missing()));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_map_with_group_and_panic() {
        let outcome = Outcome::success(0).map_with(
            |v: i32| -> Result<i32, Fault> {
                if v == 0 {
                    panic!("zero");
                }
                Ok(v)
            },
            &Intercept::grouped("math"),
        );
        let err = outcome.error().unwrap();
        assert_eq!(err.message(), UNKNOWN_MESSAGE);
        assert_eq!(err.source(), Some("math"));
    }

    #[test]
    fn test_map_value_and_and_then() {
        assert_eq!(Outcome::success(2).map_value(|v| v + 1), Outcome::success(3));
        assert_eq!(
            Outcome::success(2)
                .and_then(|v: i32| Outcome::<i32>::failure(missing().with_context(v.into()))),
            Outcome::failure(missing().with_context(2_i32.into()))
        );
        assert_eq!(
            Outcome::<i32>::failure(missing()).and_then(|v| Outcome::success(v + 1)),
            Outcome::failure(missing())
        );
    }

    #[test]
    fn test_map_err() {
        let outcome = Outcome::<i32>::failure(missing()).map_err(|e| e.with_source("cache"));
        assert_eq!(outcome.error().and_then(|e| e.source()), Some("cache"));
    }

    #[test]
    fn test_branch_if_some() {
        assert_eq!(Outcome::success(Some(4)).branch_if_some(|v| v, |_| 0), 4);

        let message = Outcome::<Option<i32>>::success(None)
            .branch_if_some(|_| String::new(), |e| e.message().to_string());
        assert_eq!(message, ABSENT_MESSAGE);

        let message = Outcome::<Option<i32>>::failure(missing())
            .branch_if_some(|_| String::new(), |e| e.message().to_string());
        assert_eq!(message, "missing record");
    }

    #[test]
    fn test_equality() {
        assert_eq!(Outcome::success(1), Outcome::success(1));
        assert_ne!(Outcome::success(1), Outcome::success(2));
        assert_ne!(Outcome::success(1), Outcome::failure(missing()));
    }

    #[test]
    fn test_total_equality() {
        fn assert_eq_impl<T: Eq>() {}
        assert_eq_impl::<Outcome<i32>>();
        assert_eq_impl::<StructuredError>();
        assert_eq_impl::<Details>();

        let err = missing().with_details(Details::Fault(Fault::not_found("7")));
        let a = Outcome::<i32>::failure(err);
        let b = a.clone();
        assert!(a == b && b == a);
    }

    #[test]
    fn test_display() {
        assert_eq!(Outcome::success(42).to_string(), "42");
        assert_eq!(Outcome::<i32>::failure(missing()).to_string(), "missing record");
    }

    #[test]
    fn test_result_conversions() {
        let outcome: Outcome<i32> = Err(missing()).into();
        assert_eq!(outcome.clone().into_result(), Err(missing()));
        assert_eq!(Outcome::from(Ok::<_, StructuredError>(1)), Outcome::success(1));
        assert_eq!(outcome.as_ref().error(), Some(&missing()));
    }
}
