//! `MaybeT` - optional-value monad transformer.
//!
//! `MaybeT<M, A>` holds `M<Option<A>>`. An absent value ends the
//! computation like `None` does for `Option`, but it is not an error of the
//! inner kind: `catch_error` only sees errors thrown by `M`, and an absent
//! value passes through it untouched.
//!
//! # Examples
//!
//! ```rust
//! use lambars_error::effect::{MaybeT, MaybeTKind, MonadError};
//! use lambars_error::typeclass::ResultKind;
//!
//! type Lookup = MaybeTKind<ResultKind<String>>;
//!
//! let missing = MaybeT::<ResultKind<String>, i32>::nothing();
//! let guarded = Lookup::catch_error(missing, |_| MaybeT::from_option(Some(0)));
//! assert_eq!(guarded.run(), Ok(None));
//! ```

use std::marker::PhantomData;

use super::{CatchHandler, InnerOf, LiftCatch, MonadError, MonadTrans};
use crate::typeclass::{Functor, Monad, TypeConstructor};

/// A computation that may end without a value, running in `M`.
pub struct MaybeT<M, A>
where
    M: TypeConstructor,
    A: 'static,
{
    inner: M::WithType<Option<A>>,
}

impl<M, A> MaybeT<M, A>
where
    M: TypeConstructor,
    A: 'static,
{
    /// Wraps an inner computation producing an optional value.
    pub const fn new(inner: M::WithType<Option<A>>) -> Self {
        Self { inner }
    }

    /// Unwraps the inner computation.
    pub fn run(self) -> M::WithType<Option<A>> {
        self.inner
    }
}

impl<M, A> MaybeT<M, A>
where
    M: Monad,
    A: Clone + 'static,
{
    /// A computation that ends without a value.
    pub fn nothing() -> Self {
        Self::new(M::pure(None))
    }

    /// Lifts a plain `Option`.
    pub fn from_option(option: Option<A>) -> Self {
        Self::new(M::pure(option))
    }
}

/// The kind of [`MaybeT`] over the inner kind `M`.
pub struct MaybeTKind<M>(PhantomData<fn() -> M>);

impl<M: TypeConstructor> TypeConstructor for MaybeTKind<M> {
    type WithType<A: 'static> = MaybeT<M, A>;
}

impl<M: Monad> Functor for MaybeTKind<M> {
    fn fmap<A, B, F>(computation: MaybeT<M, A>, function: F) -> MaybeT<M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        MaybeT::new(M::fmap(computation.inner, move |option: Option<A>| {
            option.map(&function)
        }))
    }
}

impl<M: Monad> Monad for MaybeTKind<M> {
    fn pure<A>(value: A) -> MaybeT<M, A>
    where
        A: Clone + 'static,
    {
        MaybeT::new(M::pure(Some(value)))
    }

    fn flat_map<A, B, F>(computation: MaybeT<M, A>, function: F) -> MaybeT<M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> MaybeT<M, B> + 'static,
    {
        MaybeT::new(M::flat_map(
            computation.inner,
            move |option: Option<A>| match option {
                Some(value) => function(value).inner,
                None => M::pure(None),
            },
        ))
    }
}

impl<M: Monad> MonadTrans for MaybeTKind<M> {
    type Inner = M;

    fn lift<A>(inner: M::WithType<A>) -> MaybeT<M, A>
    where
        A: Clone + 'static,
    {
        MaybeT::new(M::fmap(inner, Some))
    }
}

impl<M: Monad> LiftCatch for MaybeTKind<M> {
    type Layer<A: Clone + 'static> = Option<A>;

    fn lift_catch<E, A, C, H>(catch: C, computation: MaybeT<M, A>, handler: H) -> MaybeT<M, A>
    where
        E: 'static,
        A: Clone + 'static,
        C: FnOnce(
                InnerOf<Self, Self::Layer<A>>,
                CatchHandler<E, InnerOf<Self, Self::Layer<A>>>,
            ) -> InnerOf<Self, Self::Layer<A>>
            + 'static,
        H: Fn(E) -> MaybeT<M, A> + 'static,
    {
        let recover: CatchHandler<E, M::WithType<Option<A>>> =
            Box::new(move |error| handler(error).inner);
        MaybeT::new(catch(computation.inner, recover))
    }
}

impl<M: MonadError> MonadError for MaybeTKind<M> {
    type Error = M::Error;

    fn throw_error<A>(error: M::Error) -> MaybeT<M, A>
    where
        A: Clone + 'static,
    {
        Self::lift(M::throw_error(error))
    }

    fn catch_error<A, F>(computation: MaybeT<M, A>, handler: F) -> MaybeT<M, A>
    where
        A: Clone + 'static,
        F: Fn(M::Error) -> MaybeT<M, A> + 'static,
    {
        Self::lift_catch::<M::Error, A, _, _>(
            |inner, recover| M::catch_error(inner, recover),
            computation,
            handler,
        )
    }
}

static_assertions::assert_type_eq_all!(
    <MaybeTKind<crate::typeclass::ResultKind<String>> as MonadError>::Error,
    String
);
