//! # Deferred outcomes
//!
//! Async counterparts of the factory and `map`. The returned futures resolve
//! only once the wrapped computation settles; panics raised while building
//! the inner future and while polling it are both captured.

use crate::error::Fault;
use crate::{Intercept, Outcome};
use futures_util::future::{self, Either};
use futures_util::FutureExt;
use std::future::Future;
use std::panic::{AssertUnwindSafe, Location};

impl<T> Outcome<T> {
    /// Await a fallible async computation and capture whatever it produces.
    ///
    /// ```rust
    /// use verdict_core::{Fault, Outcome};
    ///
    /// # tokio_test::block_on(async {
    /// let outcome = Outcome::from_async_computation(|| async { Ok::<_, Fault>(42) }).await;
    /// assert_eq!(outcome, Outcome::success(42));
    /// # });
    /// ```
    #[track_caller]
    pub fn from_async_computation<F, Fut, E>(computation: F) -> impl Future<Output = Outcome<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<Fault>,
    {
        Self::from_async_computation_with(computation, &Intercept::new())
    }

    /// Await a fallible async computation under the given interception options
    #[track_caller]
    pub fn from_async_computation_with<F, Fut, E>(
        computation: F,
        intercept: &Intercept,
    ) -> impl Future<Output = Outcome<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<Fault>,
    {
        let location = Location::caller();
        let intercept = intercept.clone();

        async move {
            let result = AssertUnwindSafe(async move { computation().await })
                .catch_unwind()
                .await;
            intercept.settle(result, location)
        }
    }

    /// Async [`map`](Outcome::map). A failure resolves immediately and `f`
    /// never runs.
    #[track_caller]
    pub fn map_async<U, F, Fut, E>(self, f: F) -> impl Future<Output = Outcome<U>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<U, E>>,
        E: Into<Fault>,
    {
        self.map_async_with(f, &Intercept::new())
    }

    /// [`map_async`](Outcome::map_async) under the given interception options
    #[track_caller]
    pub fn map_async_with<U, F, Fut, E>(
        self,
        f: F,
        intercept: &Intercept,
    ) -> impl Future<Output = Outcome<U>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<U, E>>,
        E: Into<Fault>,
    {
        match self {
            Self::Ok(value) => {
                Either::Left(Outcome::from_async_computation_with(move || f(value), intercept))
            }
            Self::Err(err) => Either::Right(future::ready(Outcome::Err(err))),
        }
    }
}
