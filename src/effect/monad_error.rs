//! `MonadError` type class - error handling capability.
//!
//! This module provides the `MonadError` trait which abstracts the ability
//! to throw and catch errors within a monadic context, the two derived
//! utilities [`lift_either`] and [`try_error`], and [`map_error`] for moving a
//! computation's outcome between two error-handling kinds.
//!
//! The error type is an associated type of the kind, so one computation type
//! can never carry two unrelated error types.
//!
//! # Laws
//!
//! All `MonadError` implementations must satisfy these laws:
//!
//! ## Throw Catch Law
//!
//! ```text
//! catch_error(throw_error(e), handler) == handler(e)
//! ```
//!
//! ## Catch Associativity Law
//!
//! ```text
//! catch_error(catch_error(m, k), h) == catch_error(m, |e| catch_error(k(e), h))
//! ```
//!
//! ## Catch Pure Law
//!
//! ```text
//! catch_error(pure(a), handler) == pure(a)
//! ```
//!
//! ## Rethrow Law
//!
//! ```text
//! catch_error(m, throw_error) == m
//! ```
//!
//! ## Throw Short-Circuit Law
//!
//! ```text
//! flat_map(throw_error(e), f) == throw_error(e)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use lambars_error::effect::MonadError;
//! use lambars_error::typeclass::ResultKind;
//!
//! type Checked = ResultKind<String>;
//!
//! let failing = Checked::throw_error::<i32>("boom".to_string());
//! let recovered = Checked::catch_error(failing, |error| Ok(error.len() as i32));
//! assert_eq!(recovered, Ok(4));
//! ```

use crate::typeclass::{Monad, OptionKind, ResultKind};

/// A type class for monads that can throw and catch errors.
///
/// # Laws
///
/// See the [module documentation](self). Every instance in this crate,
/// including every transformer layer, is property-tested against them.
///
/// # Examples
///
/// ```rust
/// use lambars_error::effect::MonadError;
/// use lambars_error::typeclass::{Monad, TypeConstructor};
///
/// fn safe_divide<M>(numerator: i32, denominator: i32) -> M::WithType<i32>
/// where
///     M: MonadError<Error = String>,
/// {
///     if denominator == 0 {
///         M::throw_error("division by zero".to_string())
///     } else {
///         M::pure(numerator / denominator)
///     }
/// }
///
/// use lambars_error::typeclass::ResultKind;
/// assert_eq!(safe_divide::<ResultKind<String>>(10, 2), Ok(5));
/// assert_eq!(
///     safe_divide::<ResultKind<String>>(1, 0),
///     Err("division by zero".to_string())
/// );
/// ```
pub trait MonadError: Monad {
    /// The error carried by failed computations of this kind.
    type Error: Clone + 'static;

    /// Throws an error, short-circuiting the computation.
    ///
    /// Any subsequent `flat_map` continuation is never invoked.
    fn throw_error<A>(error: Self::Error) -> Self::WithType<A>
    where
        A: Clone + 'static;

    /// Catches an error and applies a handler to recover.
    ///
    /// A successful computation is returned unchanged and the handler is
    /// not invoked. A failed computation is replaced by `handler(error)`.
    fn catch_error<A, F>(computation: Self::WithType<A>, handler: F) -> Self::WithType<A>
    where
        A: Clone + 'static,
        F: Fn(Self::Error) -> Self::WithType<A> + 'static;

    /// Converts an error into a success value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::MonadError;
    /// use lambars_error::typeclass::ResultKind;
    ///
    /// let failing: Result<i32, String> = Err("error".to_string());
    /// let handled = ResultKind::<String>::handle_error(failing, |_| 0);
    /// assert_eq!(handled, Ok(0));
    /// ```
    fn handle_error<A, F>(computation: Self::WithType<A>, handler: F) -> Self::WithType<A>
    where
        A: Clone + 'static,
        F: Fn(Self::Error) -> A + 'static,
    {
        Self::catch_error(computation, move |error| Self::pure(handler(error)))
    }

    /// Rewrites the error of a failed computation, keeping its type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::MonadError;
    /// use lambars_error::typeclass::ResultKind;
    ///
    /// let failing: Result<String, String> = Err("file not found".to_string());
    /// let result = ResultKind::<String>::adapt_error(failing, |error| {
    ///     format!("failed to read config: {error}")
    /// });
    /// assert_eq!(result, Err("failed to read config: file not found".to_string()));
    /// ```
    fn adapt_error<A, F>(computation: Self::WithType<A>, transform: F) -> Self::WithType<A>
    where
        A: Clone + 'static,
        F: Fn(Self::Error) -> Self::Error + 'static,
    {
        Self::catch_error(computation, move |error| {
            Self::throw_error(transform(error))
        })
    }

    /// Throws `error()` when the produced value fails `predicate`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::MonadError;
    /// use lambars_error::typeclass::ResultKind;
    ///
    /// fn validate_age(age: i32) -> Result<i32, String> {
    ///     ResultKind::<String>::ensure(
    ///         Ok(age),
    ///         || "age must be between 0 and 150".to_string(),
    ///         |&a| (0..=150).contains(&a),
    ///     )
    /// }
    ///
    /// assert_eq!(validate_age(25), Ok(25));
    /// assert_eq!(validate_age(-5), Err("age must be between 0 and 150".to_string()));
    /// ```
    fn ensure<A, F, P>(computation: Self::WithType<A>, error: F, predicate: P) -> Self::WithType<A>
    where
        A: Clone + 'static,
        F: Fn() -> Self::Error + 'static,
        P: Fn(&A) -> bool + 'static,
    {
        Self::flat_map(computation, move |value: A| {
            if predicate(&value) {
                Self::pure(value)
            } else {
                Self::throw_error(error())
            }
        })
    }

    /// Folds success and failure into a successful value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::MonadError;
    /// use lambars_error::typeclass::ResultKind;
    ///
    /// let message = ResultKind::<String>::redeem(
    ///     Err::<i32, _>("not found".to_string()),
    ///     |error| format!("error: {error}"),
    ///     |value| format!("value: {value}"),
    /// );
    /// assert_eq!(message, Ok("error: not found".to_string()));
    /// ```
    fn redeem<A, B, R, T>(
        computation: Self::WithType<A>,
        recover: R,
        transform: T,
    ) -> Self::WithType<B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        R: Fn(Self::Error) -> B + 'static,
        T: Fn(A) -> B + 'static,
    {
        Self::fmap(
            try_error::<Self, A>(computation),
            move |outcome: Result<A, Self::Error>| match outcome {
                Ok(value) => transform(value),
                Err(error) => recover(error),
            },
        )
    }
}

/// Lifts a `Result` into any error-handling kind.
///
/// `Err(e)` becomes `throw_error(e)` and `Ok(a)` becomes `pure(a)`.
///
/// # Examples
///
/// ```rust
/// use lambars_error::effect::lift_either;
/// use lambars_error::typeclass::OptionKind;
///
/// assert_eq!(lift_either::<OptionKind, i32>(Ok(3)), Some(3));
/// assert_eq!(lift_either::<OptionKind, i32>(Err(())), None);
/// ```
pub fn lift_either<M, A>(either: Result<A, M::Error>) -> M::WithType<A>
where
    M: MonadError,
    A: Clone + 'static,
{
    match either {
        Ok(value) => M::pure(value),
        Err(error) => M::throw_error(error),
    }
}

/// Turns a thrown error into a returned `Err`.
///
/// The resulting computation never fails through the error channel: it
/// produces `Ok(a)` when `computation` succeeds with `a`, and `Err(e)` when
/// `computation` throws `e`.
///
/// # Examples
///
/// ```rust
/// use lambars_error::effect::try_error;
/// use lambars_error::typeclass::ResultKind;
///
/// let ok = try_error::<ResultKind<String>, i32>(Ok(1));
/// let failed = try_error::<ResultKind<String>, i32>(Err("e".to_string()));
/// assert_eq!(ok, Ok(Ok(1)));
/// assert_eq!(failed, Ok(Err("e".to_string())));
/// ```
pub fn try_error<M, A>(computation: M::WithType<A>) -> M::WithType<Result<A, M::Error>>
where
    M: MonadError,
    A: Clone + 'static,
{
    M::catch_error(
        M::fmap::<A, Result<A, M::Error>, _>(computation, Ok),
        |error| M::pure(Err(error)),
    )
}

/// Moves a computation's outcome into another error-handling kind.
///
/// The outcome of `computation` is reified with [`try_error`], rewritten by
/// `transform`, and re-thrown in `N` with [`lift_either`].
///
/// # Examples
///
/// ```rust
/// use lambars_error::effect::map_error;
/// use lambars_error::typeclass::{OptionKind, ResultKind};
///
/// let described = map_error::<OptionKind, ResultKind<String>, i32, i32, _>(None, |outcome| {
///     Ok(outcome.unwrap_or(Err(())).map_err(|()| "missing".to_string()))
/// });
/// assert_eq!(described, Err("missing".to_string()));
/// ```
pub fn map_error<M, N, A, B, F>(computation: M::WithType<A>, transform: F) -> N::WithType<B>
where
    M: MonadError,
    N: MonadError,
    A: Clone + 'static,
    B: Clone + 'static,
    F: FnOnce(M::WithType<Result<A, M::Error>>) -> N::WithType<Result<B, N::Error>>,
{
    N::flat_map(transform(try_error::<M, A>(computation)), lift_either::<N, B>)
}

// =============================================================================
// Option Implementation
// =============================================================================

/// A computation that may fail without any diagnostic information.
impl MonadError for OptionKind {
    type Error = ();

    fn throw_error<A>((): ()) -> Option<A>
    where
        A: Clone + 'static,
    {
        None
    }

    fn catch_error<A, F>(computation: Option<A>, handler: F) -> Option<A>
    where
        A: Clone + 'static,
        F: Fn(()) -> Option<A> + 'static,
    {
        match computation {
            Some(value) => Some(value),
            None => handler(()),
        }
    }
}

// =============================================================================
// Result Implementation
// =============================================================================

impl<E: Clone + 'static> MonadError for ResultKind<E> {
    type Error = E;

    fn throw_error<A>(error: E) -> Result<A, E>
    where
        A: Clone + 'static,
    {
        Err(error)
    }

    fn catch_error<A, F>(computation: Result<A, E>, handler: F) -> Result<A, E>
    where
        A: Clone + 'static,
        F: Fn(E) -> Result<A, E> + 'static,
    {
        match computation {
            Ok(value) => Ok(value),
            Err(error) => handler(error),
        }
    }
}

static_assertions::assert_type_eq_all!(<OptionKind as MonadError>::Error, ());
static_assertions::assert_type_eq_all!(<ResultKind<String> as MonadError>::Error, String);
