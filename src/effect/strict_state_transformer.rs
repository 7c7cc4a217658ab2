//! `StrictStateT` - state transformer with write-through updates.
//!
//! `StrictStateT<S, M, A>` runs against a single state cell that lives for
//! one `run`. Every `put` and `modify` is committed to the cell as soon as it
//! executes, so an update is never lost by a later failure.
//!
//! # Failure and State
//!
//! A handler installed with `catch_error` sees the state as it was when the
//! error was thrown, including updates made by the failed block. Whatever
//! the handler writes is what remains afterwards. This is the counterpart of
//! the rollback behaviour of [`StateT`](super::StateT).
//!
//! Under a branching inner kind such as `ListTKind`, every branch of one run
//! shares the same cell.
//!
//! # Examples
//!
//! ```rust
//! use lambars_error::effect::{MonadError, StrictStateT, StrictStateTKind};
//! use lambars_error::typeclass::{Monad, ResultKind};
//!
//! type Counter = StrictStateTKind<i32, ResultKind<String>>;
//!
//! let failing = Counter::then(StrictStateT::put(5), || {
//!     Counter::throw_error::<i32>("boom".to_string())
//! });
//! let recovered = Counter::catch_error(failing, |_| StrictStateT::get());
//! assert_eq!(recovered.run(1), Ok((5, 5)));
//! ```

#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use super::{CatchHandler, InnerOf, LiftCatch, MonadError, MonadTrans};
use crate::typeclass::{Functor, Monad, TypeConstructor};

type StateCell<S> = Rc<RefCell<S>>;

/// A state transformer whose updates survive failures.
pub struct StrictStateT<S, M, A>
where
    S: 'static,
    M: TypeConstructor,
    A: 'static,
{
    run_function: Box<dyn FnOnce(StateCell<S>) -> M::WithType<A>>,
}

impl<S, M, A> StrictStateT<S, M, A>
where
    S: 'static,
    M: TypeConstructor,
    A: 'static,
{
    fn from_cell<F>(function: F) -> Self
    where
        F: FnOnce(StateCell<S>) -> M::WithType<A> + 'static,
    {
        Self {
            run_function: Box::new(function),
        }
    }

    fn run_with(self, cell: StateCell<S>) -> M::WithType<A> {
        (self.run_function)(cell)
    }
}

impl<S, M, A> StrictStateT<S, M, A>
where
    S: Clone + 'static,
    M: Monad,
    A: Clone + 'static,
{
    /// Creates a computation from a transition on the current state.
    ///
    /// The transition runs when the computation runs, and its new state is
    /// committed immediately.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::StrictStateT;
    /// use lambars_error::typeclass::OptionKind;
    ///
    /// let state = StrictStateT::<i32, OptionKind, i32>::state(|s| (s * 2, s + 1));
    /// assert_eq!(state.run(10), Some((20, 11)));
    /// ```
    pub fn state<F>(transition: F) -> Self
    where
        F: FnOnce(S) -> (A, S) + 'static,
    {
        Self::from_cell(move |cell: StateCell<S>| {
            let current = cell.borrow().clone();
            let (value, next) = transition(current);
            *cell.borrow_mut() = next;
            M::pure(value)
        })
    }

    /// Reads a projection of the current state.
    pub fn gets<F>(projection: F) -> Self
    where
        F: FnOnce(&S) -> A + 'static,
    {
        Self::from_cell(move |cell: StateCell<S>| {
            let value = projection(&*cell.borrow());
            M::pure(value)
        })
    }

    /// Runs the computation from `initial_state`, returning the result and
    /// the state in effect when it finished.
    pub fn run(self, initial_state: S) -> M::WithType<(A, S)> {
        let cell = Rc::new(RefCell::new(initial_state));
        let final_cell = Rc::clone(&cell);
        M::fmap(self.run_with(cell), move |value: A| {
            (value, final_cell.borrow().clone())
        })
    }

    /// Runs the computation and keeps only the result.
    pub fn eval(self, initial_state: S) -> M::WithType<A> {
        M::fmap(self.run(initial_state), |(value, _): (A, S)| value)
    }

    /// Runs the computation and keeps only the final state.
    pub fn exec(self, initial_state: S) -> M::WithType<S> {
        M::fmap(self.run(initial_state), |(_, state): (A, S)| state)
    }
}

impl<S, M> StrictStateT<S, M, S>
where
    S: Clone + 'static,
    M: Monad,
{
    /// Reads the current state.
    pub fn get() -> Self {
        Self::from_cell(|cell: StateCell<S>| {
            let current = cell.borrow().clone();
            M::pure(current)
        })
    }
}

impl<S, M> StrictStateT<S, M, ()>
where
    S: Clone + 'static,
    M: Monad,
{
    /// Replaces the current state.
    pub fn put(new_state: S) -> Self {
        Self::from_cell(move |cell: StateCell<S>| {
            *cell.borrow_mut() = new_state;
            M::pure(())
        })
    }

    /// Updates the current state.
    pub fn modify<F>(modifier: F) -> Self
    where
        F: FnOnce(S) -> S + 'static,
    {
        Self::from_cell(move |cell: StateCell<S>| {
            let current = cell.borrow().clone();
            *cell.borrow_mut() = modifier(current);
            M::pure(())
        })
    }
}

/// The kind of [`StrictStateT`] with state `S` over the inner kind `M`.
pub struct StrictStateTKind<S, M>(PhantomData<fn() -> (S, M)>);

impl<S, M> TypeConstructor for StrictStateTKind<S, M>
where
    S: 'static,
    M: TypeConstructor,
{
    type WithType<A: 'static> = StrictStateT<S, M, A>;
}

impl<S, M> Functor for StrictStateTKind<S, M>
where
    S: Clone + 'static,
    M: Monad,
{
    fn fmap<A, B, F>(computation: StrictStateT<S, M, A>, function: F) -> StrictStateT<S, M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        StrictStateT::from_cell(move |cell| M::fmap(computation.run_with(cell), function))
    }
}

impl<S, M> Monad for StrictStateTKind<S, M>
where
    S: Clone + 'static,
    M: Monad,
{
    fn pure<A>(value: A) -> StrictStateT<S, M, A>
    where
        A: Clone + 'static,
    {
        StrictStateT::from_cell(move |_| M::pure(value))
    }

    fn flat_map<A, B, F>(computation: StrictStateT<S, M, A>, function: F) -> StrictStateT<S, M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> StrictStateT<S, M, B> + 'static,
    {
        StrictStateT::from_cell(move |cell: StateCell<S>| {
            let continuation_cell = Rc::clone(&cell);
            M::flat_map(computation.run_with(cell), move |value: A| {
                function(value).run_with(Rc::clone(&continuation_cell))
            })
        })
    }
}

impl<S, M> MonadTrans for StrictStateTKind<S, M>
where
    S: Clone + 'static,
    M: Monad,
{
    type Inner = M;

    fn lift<A>(inner: M::WithType<A>) -> StrictStateT<S, M, A>
    where
        A: Clone + 'static,
    {
        StrictStateT::from_cell(move |_| inner)
    }
}

impl<S, M> LiftCatch for StrictStateTKind<S, M>
where
    S: Clone + 'static,
    M: Monad,
{
    type Layer<A: Clone + 'static> = A;

    fn lift_catch<E, A, C, H>(
        catch: C,
        computation: StrictStateT<S, M, A>,
        handler: H,
    ) -> StrictStateT<S, M, A>
    where
        E: 'static,
        A: Clone + 'static,
        C: FnOnce(
                InnerOf<Self, Self::Layer<A>>,
                CatchHandler<E, InnerOf<Self, Self::Layer<A>>>,
            ) -> InnerOf<Self, Self::Layer<A>>
            + 'static,
        H: Fn(E) -> StrictStateT<S, M, A> + 'static,
    {
        StrictStateT::from_cell(move |cell: StateCell<S>| {
            let handler_cell = Rc::clone(&cell);
            let recover: CatchHandler<E, M::WithType<A>> =
                Box::new(move |error| handler(error).run_with(Rc::clone(&handler_cell)));
            catch(computation.run_with(cell), recover)
        })
    }
}

impl<S, M> MonadError for StrictStateTKind<S, M>
where
    S: Clone + 'static,
    M: MonadError,
{
    type Error = M::Error;

    fn throw_error<A>(error: M::Error) -> StrictStateT<S, M, A>
    where
        A: Clone + 'static,
    {
        Self::lift(M::throw_error(error))
    }

    fn catch_error<A, F>(computation: StrictStateT<S, M, A>, handler: F) -> StrictStateT<S, M, A>
    where
        A: Clone + 'static,
        F: Fn(M::Error) -> StrictStateT<S, M, A> + 'static,
    {
        Self::lift_catch::<M::Error, A, _, _>(
            |inner, recover| M::catch_error(inner, recover),
            computation,
            handler,
        )
    }
}

static_assertions::assert_type_eq_all!(
    <StrictStateTKind<i32, crate::typeclass::ResultKind<String>> as MonadError>::Error,
    String
);
