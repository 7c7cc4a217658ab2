//! `StateT` - State Monad Transformer.
//!
//! `StateT` adds state manipulation capability to any monad.
//! It transforms a monad M into a monad that can read and write state S.
//!
//! # Overview
//!
//! `StateT<S, M, A>` encapsulates a function `S -> M<(A, S)>` where `S` is
//! the state type and `M` is the inner kind. The state travels as a value
//! alongside the result, so a block that fails produces no state at all.
//!
//! # Failure and State
//!
//! `catch_error` rolls the state back: the handler starts from the state
//! in effect when `catch_error` was entered, and every update made by the
//! failed block is lost. [`StrictStateT`](super::StrictStateT) keeps those
//! updates instead.
//!
//! # Examples
//!
//! ```rust
//! use lambars_error::effect::{MonadError, StateT, StateTKind};
//! use lambars_error::typeclass::{Monad, ResultKind};
//!
//! type Counter = StateTKind<i32, ResultKind<String>>;
//!
//! let failing = Counter::then(StateT::put(5), || Counter::throw_error::<i32>("boom".to_string()));
//! let recovered = Counter::catch_error(failing, |_| StateT::get());
//! assert_eq!(recovered.run(1), Ok((1, 1)));
//! ```

#![forbid(unsafe_code)]

use std::marker::PhantomData;

use super::{CatchHandler, InnerOf, LiftCatch, MonadError, MonadTrans};
use crate::typeclass::{Functor, Monad, TypeConstructor};

/// A monad transformer that adds state manipulation capability.
///
/// # Type Parameters
///
/// - `S`: The state type
/// - `M`: The inner kind (e.g., `OptionKind`, `ResultKind<E>`, `IOKind<E>`)
/// - `A`: The value produced
///
/// # Examples
///
/// ```rust
/// use lambars_error::effect::{StateT, StateTKind};
/// use lambars_error::typeclass::{Monad, OptionKind};
///
/// type Counter = StateTKind<i32, OptionKind>;
///
/// let increment = || StateT::<i32, OptionKind, ()>::modify(|count| count + 1);
/// let computation = Counter::then(increment(), move || Counter::then(increment(), StateT::get));
///
/// assert_eq!(computation.run(0), Some((2, 2)));
/// ```
pub struct StateT<S, M, A>
where
    S: 'static,
    M: TypeConstructor,
    A: 'static,
{
    /// The wrapped state transition function.
    run_function: Box<dyn FnOnce(S) -> M::WithType<(A, S)>>,
}

impl<S, M, A> StateT<S, M, A>
where
    S: 'static,
    M: TypeConstructor,
    A: 'static,
{
    /// Creates a new `StateT` from a state transition function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::StateT;
    /// use lambars_error::typeclass::OptionKind;
    ///
    /// let state: StateT<i32, OptionKind, i32> = StateT::new(|s| Some((s * 2, s + 1)));
    /// assert_eq!(state.run(10), Some((20, 11)));
    /// ```
    pub fn new<F>(transition: F) -> Self
    where
        F: FnOnce(S) -> M::WithType<(A, S)> + 'static,
    {
        Self {
            run_function: Box::new(transition),
        }
    }

    /// Runs the `StateT` computation with the given initial state.
    pub fn run(self, initial_state: S) -> M::WithType<(A, S)> {
        (self.run_function)(initial_state)
    }
}

impl<S, M, A> StateT<S, M, A>
where
    S: Clone + 'static,
    M: Monad,
    A: Clone + 'static,
{
    /// Runs the computation and keeps only the result.
    pub fn eval(self, initial_state: S) -> M::WithType<A> {
        M::fmap(self.run(initial_state), |(value, _): (A, S)| value)
    }

    /// Runs the computation and keeps only the final state.
    pub fn exec(self, initial_state: S) -> M::WithType<S> {
        M::fmap(self.run(initial_state), |(_, state): (A, S)| state)
    }

    /// Reads a projection of the current state.
    pub fn gets<F>(projection: F) -> Self
    where
        F: FnOnce(&S) -> A + 'static,
    {
        Self::new(move |state: S| {
            let value = projection(&state);
            M::pure((value, state))
        })
    }

    /// Builds a computation from a pure state transition.
    pub fn state<F>(transition: F) -> Self
    where
        F: FnOnce(S) -> (A, S) + 'static,
    {
        Self::new(move |state: S| M::pure(transition(state)))
    }
}

impl<S, M> StateT<S, M, S>
where
    S: Clone + 'static,
    M: Monad,
{
    /// Reads the current state.
    pub fn get() -> Self {
        Self::new(|state: S| M::pure((state.clone(), state)))
    }
}

impl<S, M> StateT<S, M, ()>
where
    S: Clone + 'static,
    M: Monad,
{
    /// Replaces the current state.
    pub fn put(new_state: S) -> Self {
        Self::new(move |_| M::pure(((), new_state)))
    }

    /// Updates the current state.
    pub fn modify<F>(modifier: F) -> Self
    where
        F: FnOnce(S) -> S + 'static,
    {
        Self::new(move |state: S| M::pure(((), modifier(state))))
    }
}

/// The kind of [`StateT`] with state `S` over the inner kind `M`.
pub struct StateTKind<S, M>(PhantomData<fn() -> (S, M)>);

impl<S, M> TypeConstructor for StateTKind<S, M>
where
    S: 'static,
    M: TypeConstructor,
{
    type WithType<A: 'static> = StateT<S, M, A>;
}

impl<S, M> Functor for StateTKind<S, M>
where
    S: Clone + 'static,
    M: Monad,
{
    fn fmap<A, B, F>(computation: StateT<S, M, A>, function: F) -> StateT<S, M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        StateT::new(move |state: S| {
            M::fmap::<(A, S), (B, S), _>(computation.run(state), move |(value, next): (A, S)| {
                (function(value), next)
            })
        })
    }
}

impl<S, M> Monad for StateTKind<S, M>
where
    S: Clone + 'static,
    M: Monad,
{
    fn pure<A>(value: A) -> StateT<S, M, A>
    where
        A: Clone + 'static,
    {
        StateT::new(move |state: S| M::pure((value, state)))
    }

    fn flat_map<A, B, F>(computation: StateT<S, M, A>, function: F) -> StateT<S, M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> StateT<S, M, B> + 'static,
    {
        StateT::new(move |state: S| {
            M::flat_map::<(A, S), (B, S), _>(computation.run(state), move |(value, next): (A, S)| {
                function(value).run(next)
            })
        })
    }
}

impl<S, M> MonadTrans for StateTKind<S, M>
where
    S: Clone + 'static,
    M: Monad,
{
    type Inner = M;

    fn lift<A>(inner: M::WithType<A>) -> StateT<S, M, A>
    where
        A: Clone + 'static,
    {
        StateT::new(move |state: S| M::fmap(inner, move |value: A| (value, state.clone())))
    }
}

impl<S, M> LiftCatch for StateTKind<S, M>
where
    S: Clone + 'static,
    M: Monad,
{
    type Layer<A: Clone + 'static> = (A, S);

    fn lift_catch<E, A, C, H>(catch: C, computation: StateT<S, M, A>, handler: H) -> StateT<S, M, A>
    where
        E: 'static,
        A: Clone + 'static,
        C: FnOnce(
                InnerOf<Self, Self::Layer<A>>,
                CatchHandler<E, InnerOf<Self, Self::Layer<A>>>,
            ) -> InnerOf<Self, Self::Layer<A>>
            + 'static,
        H: Fn(E) -> StateT<S, M, A> + 'static,
    {
        StateT::new(move |state: S| {
            let entry_state = state.clone();
            let recover: CatchHandler<E, M::WithType<(A, S)>> =
                Box::new(move |error| handler(error).run(entry_state.clone()));
            catch(computation.run(state), recover)
        })
    }
}

impl<S, M> MonadError for StateTKind<S, M>
where
    S: Clone + 'static,
    M: MonadError,
{
    type Error = M::Error;

    fn throw_error<A>(error: M::Error) -> StateT<S, M, A>
    where
        A: Clone + 'static,
    {
        Self::lift(M::throw_error(error))
    }

    fn catch_error<A, F>(computation: StateT<S, M, A>, handler: F) -> StateT<S, M, A>
    where
        A: Clone + 'static,
        F: Fn(M::Error) -> StateT<S, M, A> + 'static,
    {
        Self::lift_catch::<M::Error, A, _, _>(
            |inner, recover| M::catch_error(inner, recover),
            computation,
            handler,
        )
    }
}

static_assertions::assert_type_eq_all!(
    <StateTKind<i32, crate::typeclass::ResultKind<String>> as MonadError>::Error,
    String
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeclass::{OptionKind, ResultKind};
    use rstest::rstest;

    type Counter = StateTKind<i32, ResultKind<String>>;

    // =========================================================================
    // Primitive Tests
    // =========================================================================

    #[rstest]
    fn get_reads_state() {
        assert_eq!(StateT::<i32, OptionKind, i32>::get().run(3), Some((3, 3)));
    }

    #[rstest]
    fn put_replaces_state() {
        assert_eq!(StateT::<i32, OptionKind, ()>::put(9).run(3), Some(((), 9)));
    }

    #[rstest]
    fn gets_projects_state() {
        let length = StateT::<String, OptionKind, usize>::gets(String::len);
        assert_eq!(length.run("four".to_string()), Some((4, "four".to_string())));
    }

    #[rstest]
    #[case(0, 1)]
    #[case(41, 42)]
    fn modify_then_exec(#[case] initial: i32, #[case] expected: i32) {
        let increment = StateT::<i32, ResultKind<String>, ()>::modify(|count| count + 1);
        assert_eq!(increment.exec(initial), Ok(expected));
    }

    #[rstest]
    fn state_runs_transition() {
        let swap = StateT::<i32, ResultKind<String>, i32>::state(|s| (s * 10, s + 1));
        assert_eq!(swap.eval(2), Ok(20));
    }

    // =========================================================================
    // Failure Tests
    // =========================================================================

    #[rstest]
    fn throw_error_discards_state() {
        let failing = Counter::then(StateT::put(5), || Counter::throw_error::<i32>("e".to_string()));
        assert_eq!(failing.run(0), Err("e".to_string()));
    }

    #[rstest]
    fn handler_sees_state_at_catch_entry() {
        let failing = Counter::then(StateT::put(5), || Counter::throw_error::<i32>("e".to_string()));
        let recovered = Counter::catch_error(failing, |_| StateT::get());
        assert_eq!(recovered.run(1), Ok((1, 1)));
    }

    #[rstest]
    fn updates_before_catch_survive() {
        let guarded = Counter::then(StateT::put(3), || {
            Counter::catch_error(
                Counter::then(StateT::put(5), || Counter::throw_error::<i32>("e".to_string())),
                |_| StateT::get(),
            )
        });
        assert_eq!(guarded.run(0), Ok((3, 3)));
    }

    #[rstest]
    fn handler_updates_are_final_state() {
        let recovered = Counter::catch_error(Counter::throw_error::<()>("e".to_string()), |_| {
            StateT::put(7)
        });
        assert_eq!(recovered.exec(0), Ok(7));
    }
}
