//! `ReaderT` - Reader Monad Transformer.
//!
//! `ReaderT` adds environment reading capability to any monad.
//! It transforms a monad M into a monad that has access to an environment R.
//!
//! # Overview
//!
//! `ReaderT<R, M, A>` encapsulates a function `R -> M<A>` where `R` is the
//! environment type and `M` is the inner kind. A handler installed with
//! `catch_error` runs with the same environment as the computation it
//! guards.
//!
//! # Examples
//!
//! ```rust
//! use lambars_error::effect::{MonadError, ReaderT, ReaderTKind};
//! use lambars_error::typeclass::{Monad, ResultKind};
//!
//! type Configured = ReaderTKind<u16, ResultKind<String>>;
//!
//! let port = Configured::flat_map(ReaderT::ask(), |port: u16| {
//!     if port < 1024 {
//!         Configured::throw_error(format!("privileged port {port}"))
//!     } else {
//!         Configured::pure(port)
//!     }
//! });
//! let fallback = Configured::catch_error(port, |_| ReaderT::asks(|port: u16| port + 8000));
//! assert_eq!(fallback.run(80), Ok(8080));
//! ```

#![forbid(unsafe_code)]

use std::marker::PhantomData;

use super::{CatchHandler, InnerOf, LiftCatch, MonadError, MonadTrans};
use crate::typeclass::{Functor, Monad, TypeConstructor};

/// A monad transformer that adds environment reading capability.
///
/// # Type Parameters
///
/// - `R`: The environment type (read-only context)
/// - `M`: The inner kind (e.g., `OptionKind`, `ResultKind<E>`, `IOKind<E>`)
/// - `A`: The value produced
pub struct ReaderT<R, M, A>
where
    R: 'static,
    M: TypeConstructor,
    A: 'static,
{
    /// The wrapped function from environment to inner computation.
    run_function: Box<dyn FnOnce(R) -> M::WithType<A>>,
}

impl<R, M, A> ReaderT<R, M, A>
where
    R: 'static,
    M: TypeConstructor,
    A: 'static,
{
    /// Creates a new `ReaderT` from a function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::ReaderT;
    /// use lambars_error::typeclass::OptionKind;
    ///
    /// let reader: ReaderT<i32, OptionKind, i32> = ReaderT::new(|environment| Some(environment * 2));
    /// assert_eq!(reader.run(21), Some(42));
    /// ```
    pub fn new<F>(function: F) -> Self
    where
        F: FnOnce(R) -> M::WithType<A> + 'static,
    {
        Self {
            run_function: Box::new(function),
        }
    }

    /// Runs the `ReaderT` computation with the given environment.
    pub fn run(self, environment: R) -> M::WithType<A> {
        (self.run_function)(environment)
    }

    /// Runs `computation` with an environment rewritten by `modifier`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::ReaderT;
    /// use lambars_error::typeclass::OptionKind;
    ///
    /// let doubled = ReaderT::<i32, OptionKind, i32>::local(|x| x * 2, ReaderT::ask());
    /// assert_eq!(doubled.run(5), Some(10));
    /// ```
    pub fn local<F>(modifier: F, computation: Self) -> Self
    where
        F: FnOnce(R) -> R + 'static,
    {
        Self::new(move |environment| computation.run(modifier(environment)))
    }
}

impl<R, M, A> ReaderT<R, M, A>
where
    R: 'static,
    M: Monad,
    A: Clone + 'static,
{
    /// Reads a projection of the environment.
    pub fn asks<F>(projection: F) -> Self
    where
        F: FnOnce(R) -> A + 'static,
    {
        Self::new(move |environment| M::pure(projection(environment)))
    }
}

impl<R, M> ReaderT<R, M, R>
where
    R: Clone + 'static,
    M: Monad,
{
    /// Reads the whole environment.
    pub fn ask() -> Self {
        Self::new(|environment: R| M::pure(environment))
    }
}

/// The kind of [`ReaderT`] with environment `R` over the inner kind `M`.
pub struct ReaderTKind<R, M>(PhantomData<fn() -> (R, M)>);

impl<R, M> TypeConstructor for ReaderTKind<R, M>
where
    R: 'static,
    M: TypeConstructor,
{
    type WithType<A: 'static> = ReaderT<R, M, A>;
}

impl<R, M> Functor for ReaderTKind<R, M>
where
    R: Clone + 'static,
    M: Monad,
{
    fn fmap<A, B, F>(computation: ReaderT<R, M, A>, function: F) -> ReaderT<R, M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        ReaderT::new(move |environment| M::fmap(computation.run(environment), function))
    }
}

impl<R, M> Monad for ReaderTKind<R, M>
where
    R: Clone + 'static,
    M: Monad,
{
    fn pure<A>(value: A) -> ReaderT<R, M, A>
    where
        A: Clone + 'static,
    {
        ReaderT::new(move |_| M::pure(value))
    }

    fn flat_map<A, B, F>(computation: ReaderT<R, M, A>, function: F) -> ReaderT<R, M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> ReaderT<R, M, B> + 'static,
    {
        ReaderT::new(move |environment: R| {
            let first = computation.run(environment.clone());
            M::flat_map(first, move |value: A| function(value).run(environment.clone()))
        })
    }
}

impl<R, M> MonadTrans for ReaderTKind<R, M>
where
    R: Clone + 'static,
    M: Monad,
{
    type Inner = M;

    fn lift<A>(inner: M::WithType<A>) -> ReaderT<R, M, A>
    where
        A: Clone + 'static,
    {
        ReaderT::new(move |_| inner)
    }
}

impl<R, M> LiftCatch for ReaderTKind<R, M>
where
    R: Clone + 'static,
    M: Monad,
{
    type Layer<A: Clone + 'static> = A;

    fn lift_catch<E, A, C, H>(catch: C, computation: ReaderT<R, M, A>, handler: H) -> ReaderT<R, M, A>
    where
        E: 'static,
        A: Clone + 'static,
        C: FnOnce(
                InnerOf<Self, Self::Layer<A>>,
                CatchHandler<E, InnerOf<Self, Self::Layer<A>>>,
            ) -> InnerOf<Self, Self::Layer<A>>
            + 'static,
        H: Fn(E) -> ReaderT<R, M, A> + 'static,
    {
        ReaderT::new(move |environment: R| {
            let handler_environment = environment.clone();
            let recover: CatchHandler<E, M::WithType<A>> =
                Box::new(move |error| handler(error).run(handler_environment.clone()));
            catch(computation.run(environment), recover)
        })
    }
}

impl<R, M> MonadError for ReaderTKind<R, M>
where
    R: Clone + 'static,
    M: MonadError,
{
    type Error = M::Error;

    fn throw_error<A>(error: M::Error) -> ReaderT<R, M, A>
    where
        A: Clone + 'static,
    {
        Self::lift(M::throw_error(error))
    }

    fn catch_error<A, F>(computation: ReaderT<R, M, A>, handler: F) -> ReaderT<R, M, A>
    where
        A: Clone + 'static,
        F: Fn(M::Error) -> ReaderT<R, M, A> + 'static,
    {
        Self::lift_catch::<M::Error, A, _, _>(
            |inner, recover| M::catch_error(inner, recover),
            computation,
            handler,
        )
    }
}

static_assertions::assert_type_eq_all!(
    <ReaderTKind<i32, crate::typeclass::ResultKind<String>> as MonadError>::Error,
    String
);
