//! Lifting through monad transformers.
//!
//! A transformer kind wraps an inner kind and adds one effect to it. Two
//! operations are enough to carry [`MonadError`](super::MonadError) from the
//! inner kind to the wrapper:
//!
//! - [`MonadTrans::lift`] runs an inner action inside the wrapper. This is
//!   how a lifted `throw_error` is built.
//! - [`LiftCatch::lift_catch`] runs a catch-like operation of the inner kind
//!   under the wrapper's context. The handler runs inside the wrapper, so it
//!   needs the wrapper's environment, state, or output, and each wrapper
//!   decides which of those it sees.
//!
//! Every lifting instance in this crate is then written the same way:
//!
//! ```text
//! throw_error(e)    = lift(M::throw_error(e))
//! catch_error(m, h) = lift_catch(M::catch_error, m, h)
//! ```

use crate::typeclass::{Monad, TypeConstructor};

/// The inner computation of a transformer kind `T` producing `A`.
pub type InnerOf<T, A> = <<T as MonadTrans>::Inner as TypeConstructor>::WithType<A>;

/// A handler in the inner kind, as handed to a catch-like operation by
/// [`LiftCatch::lift_catch`].
pub type CatchHandler<E, T> = Box<dyn Fn(E) -> T>;

/// A transformer kind built around an inner monad.
///
/// # Laws
///
/// ```text
/// lift(Inner::pure(a))        == Self::pure(a)
/// lift(Inner::flat_map(m, f)) == Self::flat_map(lift(m), |a| lift(f(a)))
/// ```
pub trait MonadTrans: Monad {
    /// The wrapped kind.
    type Inner: Monad;

    /// Runs an inner action and re-wraps its result.
    fn lift<A>(inner: InnerOf<Self, A>) -> Self::WithType<A>
    where
        A: Clone + 'static;
}

/// A transformer that can thread a catch-like operation of its inner kind
/// through its own context.
pub trait LiftCatch: MonadTrans {
    /// What the inner kind produces when the wrapper produces `A`.
    ///
    /// `A` for context-free and reader wrappers, `(A, S)` for the lazy state
    /// wrapper, `Vec<A>` for the list wrapper, and so on.
    type Layer<A: Clone + 'static>: Clone + 'static;

    /// Runs `computation` under `catch`, re-entering the wrapper context for
    /// `handler`.
    ///
    /// `catch` receives the computation and the handler already lowered to
    /// the inner kind at shape `Layer<A>`.
    fn lift_catch<E, A, C, H>(catch: C, computation: Self::WithType<A>, handler: H) -> Self::WithType<A>
    where
        E: 'static,
        A: Clone + 'static,
        C: FnOnce(
                InnerOf<Self, Self::Layer<A>>,
                CatchHandler<E, InnerOf<Self, Self::Layer<A>>>,
            ) -> InnerOf<Self, Self::Layer<A>>
            + 'static,
        H: Fn(E) -> Self::WithType<A> + 'static;
}
