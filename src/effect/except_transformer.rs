//! `ExceptT` - Except Monad Transformer.
//!
//! `ExceptT` adds error handling capability to any monad.
//! It transforms a monad M into a monad that can fail with error type E.
//!
//! # Overview
//!
//! `ExceptT<E, M, A>` encapsulates `M<Result<A, E>>` where `E` is the error
//! type and `M` is the inner kind. The inner kind only has to be a
//! [`Monad`]; it does not need an error channel of its own, so
//! `ExceptTKind<E, IdentityKind>` is a complete failable computation.
//!
//! Its [`MonadError`] instance asks for more than the other instances do:
//! the error type must be an [`ErrorValue`], which is what gives `zero`,
//! `fail`, and `plus` their meaning.
//!
//! # Examples
//!
//! ```rust
//! use lambars_error::effect::{ExceptT, ExceptTKind, MonadError};
//! use lambars_error::typeclass::{Identity, IdentityKind, Monad};
//!
//! type Validation = ExceptTKind<String, IdentityKind>;
//!
//! fn validate_positive(value: i32) -> ExceptT<String, IdentityKind, i32> {
//!     if value > 0 {
//!         Validation::pure(value)
//!     } else {
//!         Validation::throw_error("value must be positive".to_string())
//!     }
//! }
//!
//! assert_eq!(validate_positive(5).run(), Identity(Ok(5)));
//! assert_eq!(
//!     validate_positive(-1).run(),
//!     Identity(Err("value must be positive".to_string()))
//! );
//! ```

#![forbid(unsafe_code)]

use std::marker::PhantomData;

use super::{ErrorValue, MonadError, MonadTrans};
use crate::typeclass::{Functor, Monad, TypeConstructor};

/// A monad transformer that adds error handling capability.
///
/// # Type Parameters
///
/// - `E`: The error type
/// - `M`: The inner kind (e.g., `IdentityKind`, `OptionKind`, `IOKind<F>`)
/// - `A`: The value produced on success
pub struct ExceptT<E, M, A>
where
    E: 'static,
    M: TypeConstructor,
    A: 'static,
{
    /// The wrapped computation containing `Result<A, E>`.
    inner: M::WithType<Result<A, E>>,
}

impl<E, M, A> ExceptT<E, M, A>
where
    E: 'static,
    M: TypeConstructor,
    A: 'static,
{
    /// Creates a new `ExceptT` from an inner computation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::ExceptT;
    /// use lambars_error::typeclass::OptionKind;
    ///
    /// let except: ExceptT<String, OptionKind, i32> = ExceptT::new(Some(Ok(42)));
    /// assert_eq!(except.run(), Some(Ok(42)));
    /// ```
    pub const fn new(inner: M::WithType<Result<A, E>>) -> Self {
        Self { inner }
    }

    /// Runs the `ExceptT` computation, returning the inner computation.
    pub fn run(self) -> M::WithType<Result<A, E>> {
        self.inner
    }
}

impl<E, M, A> ExceptT<E, M, A>
where
    E: Clone + 'static,
    M: Monad,
    A: Clone + 'static,
{
    /// Lifts a plain `Result` into `ExceptT`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::ExceptT;
    /// use lambars_error::typeclass::OptionKind;
    ///
    /// let except = ExceptT::<String, OptionKind, i32>::from_result(Err("no".to_string()));
    /// assert_eq!(except.run(), Some(Err("no".to_string())));
    /// ```
    pub fn from_result(result: Result<A, E>) -> Self {
        Self::new(M::pure(result))
    }

    /// Discharges this layer by rethrowing its error in the inner kind.
    ///
    /// The error is converted with `transform` first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::{ExceptT, ExceptTKind, MonadError};
    /// use lambars_error::typeclass::ResultKind;
    ///
    /// let layered = ExceptTKind::<String, ResultKind<usize>>::throw_error::<i32>("four".to_string());
    /// assert_eq!(layered.modify_error(|error| error.len()), Err(4));
    /// ```
    pub fn modify_error<F>(self, transform: F) -> M::WithType<A>
    where
        M: MonadError,
        F: Fn(E) -> M::Error + 'static,
    {
        M::flat_map(self.inner, move |outcome: Result<A, E>| match outcome {
            Ok(value) => M::pure(value),
            Err(error) => M::throw_error(transform(error)),
        })
    }
}

impl<E, M, A> ExceptT<E, M, A>
where
    E: ErrorValue,
    M: Monad,
    A: Clone + 'static,
{
    /// A failure that carries no information.
    pub fn zero() -> Self {
        ExceptTKind::<E, M>::throw_error(E::no_message())
    }

    /// A failure built from a message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::ExceptT;
    /// use lambars_error::typeclass::{Identity, IdentityKind};
    ///
    /// let failed = ExceptT::<String, IdentityKind, i32>::fail("parse error");
    /// assert_eq!(failed.run(), Identity(Err("parse error".to_string())));
    /// ```
    pub fn fail(message: &str) -> Self {
        ExceptTKind::<E, M>::throw_error(E::from_message(message))
    }

    /// Tries `alternative` when this computation fails.
    ///
    /// When both fail, the error is this computation's error merged with
    /// the alternative's.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::ExceptT;
    /// use lambars_error::typeclass::{Identity, IdentityKind};
    ///
    /// type Parse = ExceptT<Vec<String>, IdentityKind, i32>;
    ///
    /// let both = Parse::fail("not hex").plus(|| Parse::fail("not decimal"));
    /// assert_eq!(
    ///     both.run(),
    ///     Identity(Err(vec!["not hex".to_string(), "not decimal".to_string()]))
    /// );
    /// ```
    #[must_use]
    pub fn plus<F>(self, alternative: F) -> Self
    where
        F: Fn() -> Self + 'static,
    {
        Self::new(M::flat_map(self.inner, move |outcome: Result<A, E>| match outcome {
            Ok(value) => M::pure(Ok(value)),
            Err(first) => M::fmap(alternative().inner, move |second: Result<A, E>| {
                second.map_err(|later| first.clone().merge(later))
            }),
        }))
    }
}

// =============================================================================
// Kind
// =============================================================================

/// The kind of [`ExceptT`] over the inner kind `M`.
pub struct ExceptTKind<E, M>(PhantomData<fn() -> (E, M)>);

impl<E, M> TypeConstructor for ExceptTKind<E, M>
where
    E: 'static,
    M: TypeConstructor,
{
    type WithType<A: 'static> = ExceptT<E, M, A>;
}

impl<E, M> Functor for ExceptTKind<E, M>
where
    E: Clone + 'static,
    M: Monad,
{
    fn fmap<A, B, F>(computation: ExceptT<E, M, A>, function: F) -> ExceptT<E, M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        ExceptT::new(M::fmap(computation.inner, move |outcome: Result<A, E>| {
            outcome.map(&function)
        }))
    }
}

impl<E, M> Monad for ExceptTKind<E, M>
where
    E: Clone + 'static,
    M: Monad,
{
    fn pure<A>(value: A) -> ExceptT<E, M, A>
    where
        A: Clone + 'static,
    {
        ExceptT::new(M::pure(Ok(value)))
    }

    fn flat_map<A, B, F>(computation: ExceptT<E, M, A>, function: F) -> ExceptT<E, M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> ExceptT<E, M, B> + 'static,
    {
        ExceptT::new(M::flat_map(
            computation.inner,
            move |outcome: Result<A, E>| match outcome {
                Ok(value) => function(value).inner,
                Err(error) => M::pure(Err(error)),
            },
        ))
    }
}

impl<E, M> MonadTrans for ExceptTKind<E, M>
where
    E: Clone + 'static,
    M: Monad,
{
    type Inner = M;

    fn lift<A>(inner: M::WithType<A>) -> ExceptT<E, M, A>
    where
        A: Clone + 'static,
    {
        ExceptT::new(M::fmap(inner, Ok))
    }
}

impl<E, M> MonadError for ExceptTKind<E, M>
where
    E: ErrorValue,
    M: Monad,
{
    type Error = E;

    fn throw_error<A>(error: E) -> ExceptT<E, M, A>
    where
        A: Clone + 'static,
    {
        ExceptT::new(M::pure(Err(error)))
    }

    fn catch_error<A, F>(computation: ExceptT<E, M, A>, handler: F) -> ExceptT<E, M, A>
    where
        A: Clone + 'static,
        F: Fn(E) -> ExceptT<E, M, A> + 'static,
    {
        ExceptT::new(M::flat_map(
            computation.inner,
            move |outcome: Result<A, E>| match outcome {
                Ok(value) => M::pure(Ok(value)),
                Err(error) => handler(error).inner,
            },
        ))
    }
}

static_assertions::assert_type_eq_all!(
    <ExceptTKind<String, crate::typeclass::IdentityKind> as MonadError>::Error,
    String
);
