//! `IdentityT` - the transformer that adds nothing.
//!
//! `IdentityT<M, A>` holds an `M<A>` unchanged. It is the smallest possible
//! lifting instance and shows the delegation pattern with no context to
//! thread.
//!
//! # Examples
//!
//! ```rust
//! use lambars_error::effect::{IdentityT, IdentityTKind, MonadError};
//! use lambars_error::typeclass::ResultKind;
//!
//! type Lifted = IdentityTKind<ResultKind<String>>;
//!
//! let recovered = Lifted::catch_error(Lifted::throw_error::<i32>("e".to_string()), |_| {
//!     IdentityT::new(Ok(0))
//! });
//! assert_eq!(recovered.run(), Ok(0));
//! ```

use std::marker::PhantomData;

use super::{CatchHandler, InnerOf, LiftCatch, MonadError, MonadTrans};
use crate::typeclass::{Functor, Monad, TypeConstructor};

/// An inner computation wrapped without any additional effect.
pub struct IdentityT<M, A>
where
    M: TypeConstructor,
    A: 'static,
{
    inner: M::WithType<A>,
}

impl<M, A> IdentityT<M, A>
where
    M: TypeConstructor,
    A: 'static,
{
    /// Wraps an inner computation.
    pub const fn new(inner: M::WithType<A>) -> Self {
        Self { inner }
    }

    /// Unwraps the inner computation.
    pub fn run(self) -> M::WithType<A> {
        self.inner
    }
}

/// The kind of [`IdentityT`] over the inner kind `M`.
pub struct IdentityTKind<M>(PhantomData<fn() -> M>);

impl<M: TypeConstructor> TypeConstructor for IdentityTKind<M> {
    type WithType<A: 'static> = IdentityT<M, A>;
}

impl<M: Monad> Functor for IdentityTKind<M> {
    fn fmap<A, B, F>(computation: IdentityT<M, A>, function: F) -> IdentityT<M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        IdentityT::new(M::fmap(computation.inner, function))
    }
}

impl<M: Monad> Monad for IdentityTKind<M> {
    fn pure<A>(value: A) -> IdentityT<M, A>
    where
        A: Clone + 'static,
    {
        IdentityT::new(M::pure(value))
    }

    fn flat_map<A, B, F>(computation: IdentityT<M, A>, function: F) -> IdentityT<M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> IdentityT<M, B> + 'static,
    {
        IdentityT::new(M::flat_map(computation.inner, move |value: A| {
            function(value).inner
        }))
    }
}

impl<M: Monad> MonadTrans for IdentityTKind<M> {
    type Inner = M;

    fn lift<A>(inner: M::WithType<A>) -> IdentityT<M, A>
    where
        A: Clone + 'static,
    {
        IdentityT::new(inner)
    }
}

impl<M: Monad> LiftCatch for IdentityTKind<M> {
    type Layer<A: Clone + 'static> = A;

    fn lift_catch<E, A, C, H>(catch: C, computation: IdentityT<M, A>, handler: H) -> IdentityT<M, A>
    where
        E: 'static,
        A: Clone + 'static,
        C: FnOnce(
                InnerOf<Self, Self::Layer<A>>,
                CatchHandler<E, InnerOf<Self, Self::Layer<A>>>,
            ) -> InnerOf<Self, Self::Layer<A>>
            + 'static,
        H: Fn(E) -> IdentityT<M, A> + 'static,
    {
        let recover: CatchHandler<E, M::WithType<A>> = Box::new(move |error| handler(error).inner);
        IdentityT::new(catch(computation.inner, recover))
    }
}

impl<M: MonadError> MonadError for IdentityTKind<M> {
    type Error = M::Error;

    fn throw_error<A>(error: M::Error) -> IdentityT<M, A>
    where
        A: Clone + 'static,
    {
        Self::lift(M::throw_error(error))
    }

    fn catch_error<A, F>(computation: IdentityT<M, A>, handler: F) -> IdentityT<M, A>
    where
        A: Clone + 'static,
        F: Fn(M::Error) -> IdentityT<M, A> + 'static,
    {
        Self::lift_catch::<M::Error, A, _, _>(
            |inner, recover| M::catch_error(inner, recover),
            computation,
            handler,
        )
    }
}

static_assertions::assert_type_eq_all!(
    <IdentityTKind<crate::typeclass::OptionKind> as MonadError>::Error,
    ()
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeclass::{OptionKind, ResultKind};
    use rstest::rstest;

    type Lifted = IdentityTKind<ResultKind<String>>;

    #[rstest]
    fn lift_is_transparent() {
        assert_eq!(Lifted::lift(Ok::<i32, String>(3)).run(), Ok(3));
    }

    #[rstest]
    fn throw_error_reaches_inner() {
        assert_eq!(
            Lifted::throw_error::<i32>("e".to_string()).run(),
            Err("e".to_string())
        );
    }

    #[rstest]
    fn catch_error_passes_success_through() {
        let kept = Lifted::catch_error(Lifted::pure(9), |_| Lifted::pure(0));
        assert_eq!(kept.run(), Ok(9));
    }

    #[rstest]
    fn catch_error_over_option() {
        type OverOption = IdentityTKind<OptionKind>;
        let recovered = OverOption::catch_error(OverOption::throw_error::<i32>(()), |()| {
            OverOption::pure(42)
        });
        assert_eq!(recovered.run(), Some(42));
    }
}
