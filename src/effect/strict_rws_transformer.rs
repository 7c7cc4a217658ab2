//! `StrictRWST` - Reader + Writer + State transformer with write-through
//! state and output.
//!
//! `StrictRWST<R, W, S, M, A>` runs against one context per `run`: the
//! environment, a state cell, and an output log. State updates and output are
//! committed as soon as they execute.
//!
//! # Failure
//!
//! A handler installed with `catch_error` runs with the same environment,
//! sees the state as it was at the throw point, and keeps all output told
//! before the throw. [`RWST`](super::RWST) rolls both back instead.
//!
//! # Examples
//!
//! ```rust
//! use lambars_error::effect::{MonadError, StrictRWST, StrictRWSTKind};
//! use lambars_error::typeclass::{Monad, ResultKind};
//!
//! type Session = StrictRWSTKind<(), Vec<String>, i32, ResultKind<String>>;
//! type Step<A> = StrictRWST<(), Vec<String>, i32, ResultKind<String>, A>;
//!
//! let failing = Session::then(Step::put(5), || {
//!     Session::then(Step::tell(vec!["tried".to_string()]), || {
//!         Session::throw_error::<i32>("boom".to_string())
//!     })
//! });
//! let recovered = Session::catch_error(failing, |_| Step::get());
//! assert_eq!(recovered.run((), 0), Ok((5, 5, vec!["tried".to_string()])));
//! ```

#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use super::strict_writer_transformer::{OutputLog, told_since};
use super::{CatchHandler, InnerOf, LiftCatch, MonadError, MonadTrans};
use crate::typeclass::{Functor, Monad, Monoid, TypeConstructor};

/// What one run of a [`StrictRWST`] threads through every step.
#[derive(Clone)]
struct Context<R, W, S> {
    environment: R,
    state: Rc<RefCell<S>>,
    log: OutputLog<W>,
}

/// A reader/writer/state transformer whose state and output survive
/// failures.
pub struct StrictRWST<R, W, S, M, A>
where
    R: 'static,
    W: 'static,
    S: 'static,
    M: TypeConstructor,
    A: 'static,
{
    run_function: Box<dyn FnOnce(Context<R, W, S>) -> M::WithType<A>>,
}

impl<R, W, S, M, A> StrictRWST<R, W, S, M, A>
where
    R: 'static,
    W: 'static,
    S: 'static,
    M: TypeConstructor,
    A: 'static,
{
    fn from_context<F>(function: F) -> Self
    where
        F: FnOnce(Context<R, W, S>) -> M::WithType<A> + 'static,
    {
        Self {
            run_function: Box::new(function),
        }
    }

    fn run_with(self, context: Context<R, W, S>) -> M::WithType<A> {
        (self.run_function)(context)
    }

    /// Runs `computation` with an environment rewritten by `modifier`.
    ///
    /// State and output are shared with the enclosing computation.
    pub fn local<F>(modifier: F, computation: Self) -> Self
    where
        F: FnOnce(R) -> R + 'static,
    {
        Self::from_context(move |context: Context<R, W, S>| {
            let Context {
                environment,
                state,
                log,
            } = context;
            computation.run_with(Context {
                environment: modifier(environment),
                state,
                log,
            })
        })
    }
}

impl<R, W, S, M, A> StrictRWST<R, W, S, M, A>
where
    R: 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    M: Monad,
    A: Clone + 'static,
{
    /// Runs the computation, returning the result, the final state, and all
    /// output told.
    pub fn run(self, environment: R, initial_state: S) -> M::WithType<(A, S, W)> {
        let state = Rc::new(RefCell::new(initial_state));
        let log: OutputLog<W> = Rc::new(RefCell::new(Vec::new()));
        let final_state = Rc::clone(&state);
        let final_log = Rc::clone(&log);
        M::fmap(
            self.run_with(Context {
                environment,
                state,
                log,
            }),
            move |value: A| {
                let state = final_state.borrow().clone();
                (value, state, told_since(&final_log, 0))
            },
        )
    }

    /// Runs the computation and keeps the result and the output.
    pub fn eval(self, environment: R, initial_state: S) -> M::WithType<(A, W)> {
        M::fmap(
            self.run(environment, initial_state),
            |(value, _, output): (A, S, W)| (value, output),
        )
    }

    /// Runs the computation and keeps the final state and the output.
    pub fn exec(self, environment: R, initial_state: S) -> M::WithType<(S, W)> {
        M::fmap(
            self.run(environment, initial_state),
            |(_, state, output): (A, S, W)| (state, output),
        )
    }

    /// Reads a projection of the environment.
    pub fn asks<F>(projection: F) -> Self
    where
        F: FnOnce(R) -> A + 'static,
    {
        Self::from_context(move |context: Context<R, W, S>| M::pure(projection(context.environment)))
    }

    /// Reads a projection of the current state.
    pub fn gets<F>(projection: F) -> Self
    where
        F: FnOnce(&S) -> A + 'static,
    {
        Self::from_context(move |context: Context<R, W, S>| {
            let value = projection(&*context.state.borrow());
            M::pure(value)
        })
    }

    /// Builds a computation from a state transition, committed immediately.
    pub fn state<F>(transition: F) -> Self
    where
        F: FnOnce(S) -> (A, S) + 'static,
    {
        Self::from_context(move |context: Context<R, W, S>| {
            let current = context.state.borrow().clone();
            let (value, next) = transition(current);
            *context.state.borrow_mut() = next;
            M::pure(value)
        })
    }
}

impl<R, W, S, M> StrictRWST<R, W, S, M, R>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    M: Monad,
{
    /// Reads the whole environment.
    pub fn ask() -> Self {
        Self::asks(|environment| environment)
    }
}

impl<R, W, S, M> StrictRWST<R, W, S, M, S>
where
    R: 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    M: Monad,
{
    /// Reads the current state.
    pub fn get() -> Self {
        Self::gets(S::clone)
    }
}

impl<R, W, S, M> StrictRWST<R, W, S, M, ()>
where
    R: 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    M: Monad,
{
    /// Replaces the current state.
    pub fn put(new_state: S) -> Self {
        Self::state(move |_| ((), new_state))
    }

    /// Updates the current state.
    pub fn modify<F>(modifier: F) -> Self
    where
        F: FnOnce(S) -> S + 'static,
    {
        Self::state(move |state| ((), modifier(state)))
    }

    /// Appends to the output.
    pub fn tell(output: W) -> Self {
        Self::from_context(move |context: Context<R, W, S>| {
            context.log.borrow_mut().push(output);
            M::pure(())
        })
    }
}

/// The kind of [`StrictRWST`] over the inner kind `M`.
pub struct StrictRWSTKind<R, W, S, M>(PhantomData<fn() -> (R, W, S, M)>);

impl<R, W, S, M> TypeConstructor for StrictRWSTKind<R, W, S, M>
where
    R: 'static,
    W: 'static,
    S: 'static,
    M: TypeConstructor,
{
    type WithType<A: 'static> = StrictRWST<R, W, S, M, A>;
}

impl<R, W, S, M> Functor for StrictRWSTKind<R, W, S, M>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    M: Monad,
{
    fn fmap<A, B, F>(
        computation: StrictRWST<R, W, S, M, A>,
        function: F,
    ) -> StrictRWST<R, W, S, M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        StrictRWST::from_context(move |context| M::fmap(computation.run_with(context), function))
    }
}

impl<R, W, S, M> Monad for StrictRWSTKind<R, W, S, M>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    M: Monad,
{
    fn pure<A>(value: A) -> StrictRWST<R, W, S, M, A>
    where
        A: Clone + 'static,
    {
        StrictRWST::from_context(move |_| M::pure(value))
    }

    fn flat_map<A, B, F>(
        computation: StrictRWST<R, W, S, M, A>,
        function: F,
    ) -> StrictRWST<R, W, S, M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> StrictRWST<R, W, S, M, B> + 'static,
    {
        StrictRWST::from_context(move |context: Context<R, W, S>| {
            let continuation_context = context.clone();
            M::flat_map(computation.run_with(context), move |value: A| {
                function(value).run_with(continuation_context.clone())
            })
        })
    }
}

impl<R, W, S, M> MonadTrans for StrictRWSTKind<R, W, S, M>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    M: Monad,
{
    type Inner = M;

    fn lift<A>(inner: M::WithType<A>) -> StrictRWST<R, W, S, M, A>
    where
        A: Clone + 'static,
    {
        StrictRWST::from_context(move |_| inner)
    }
}

impl<R, W, S, M> LiftCatch for StrictRWSTKind<R, W, S, M>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    M: Monad,
{
    type Layer<A: Clone + 'static> = A;

    fn lift_catch<E, A, C, H>(
        catch: C,
        computation: StrictRWST<R, W, S, M, A>,
        handler: H,
    ) -> StrictRWST<R, W, S, M, A>
    where
        E: 'static,
        A: Clone + 'static,
        C: FnOnce(
                InnerOf<Self, Self::Layer<A>>,
                CatchHandler<E, InnerOf<Self, Self::Layer<A>>>,
            ) -> InnerOf<Self, Self::Layer<A>>
            + 'static,
        H: Fn(E) -> StrictRWST<R, W, S, M, A> + 'static,
    {
        StrictRWST::from_context(move |context: Context<R, W, S>| {
            let handler_context = context.clone();
            let recover: CatchHandler<E, M::WithType<A>> =
                Box::new(move |error| handler(error).run_with(handler_context.clone()));
            catch(computation.run_with(context), recover)
        })
    }
}

impl<R, W, S, M> MonadError for StrictRWSTKind<R, W, S, M>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    M: MonadError,
{
    type Error = M::Error;

    fn throw_error<A>(error: M::Error) -> StrictRWST<R, W, S, M, A>
    where
        A: Clone + 'static,
    {
        Self::lift(M::throw_error(error))
    }

    fn catch_error<A, F>(
        computation: StrictRWST<R, W, S, M, A>,
        handler: F,
    ) -> StrictRWST<R, W, S, M, A>
    where
        A: Clone + 'static,
        F: Fn(M::Error) -> StrictRWST<R, W, S, M, A> + 'static,
    {
        Self::lift_catch::<M::Error, A, _, _>(
            |inner, recover| M::catch_error(inner, recover),
            computation,
            handler,
        )
    }
}

static_assertions::assert_type_eq_all!(
    <StrictRWSTKind<i32, String, i32, crate::typeclass::OptionKind> as MonadError>::Error,
    ()
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeclass::ResultKind;
    use rstest::rstest;

    type Session = StrictRWSTKind<String, Vec<String>, i32, ResultKind<String>>;
    type Step<A> = StrictRWST<String, Vec<String>, i32, ResultKind<String>, A>;

    fn log(message: &str) -> Step<()> {
        StrictRWST::tell(vec![message.to_string()])
    }

    #[rstest]
    fn ask_under_local() {
        let localized = Step::<String>::local(|environment| environment + "-local", Step::ask());
        assert_eq!(
            localized.eval("root".to_string(), 0),
            Ok(("root-local".to_string(), Vec::new()))
        );
    }

    #[rstest]
    fn local_shares_state_with_outer_computation() {
        let inner = Step::<()>::local(|environment| environment, Step::put(9));
        let sequenced = Session::then(inner, Step::get);
        assert_eq!(sequenced.eval(String::new(), 0), Ok((9, Vec::new())));
    }

    #[rstest]
    fn handler_sees_throw_point_state_and_output() {
        let failing = Session::then(Step::put(5), || {
            Session::then(log("kept"), || Session::throw_error::<()>("e".to_string()))
        });
        let recovered = Session::catch_error(failing, |_| {
            Session::then(log("handler"), || Step::modify(|s| s + 1))
        });
        assert_eq!(
            recovered.exec(String::new(), 0),
            Ok((6, vec!["kept".to_string(), "handler".to_string()]))
        );
    }

    #[rstest]
    fn gets_projects_state() {
        let doubled = Step::<i32>::gets(|state| state * 2);
        assert_eq!(doubled.run(String::new(), 4), Ok((8, 4, Vec::new())));
    }
}
