//! `RWST` - Reader + Writer + State monad transformer.
//!
//! `RWST` combines three effects over an inner kind:
//! - **Reader**: Read-only access to an environment
//! - **Writer**: Accumulated output (logs, metrics, etc.)
//! - **State**: State threading
//!
//! # Overview
//!
//! An `RWST<R, W, S, M, A>` encapsulates a function `(R, S) -> M<(A, S, W)>`.
//! State and output travel with the result, so a failed block produces
//! neither.
//!
//! # Failure
//!
//! A handler installed with `catch_error` runs with the same environment,
//! starts from the state in effect when `catch_error` was entered, and
//! replaces the output of the failed block. [`StrictRWST`](super::StrictRWST)
//! keeps state updates and output instead.
//!
//! # Laws
//!
//! - Local Identity: `RWST::local(|r| r, m) == m`
//! - Tell Combine: `tell(w1).then(tell(w2)) == tell(w1.combine(w2))`
//! - Put Get Law: `put(s).then(get())` returns `s`
//! - Put Put Law: `put(s1).then(put(s2)) == put(s2)`
//!
//! # Examples
//!
//! ```rust
//! use lambars_error::effect::{MonadError, RWST, RWSTKind};
//! use lambars_error::typeclass::{Monad, ResultKind};
//!
//! type Session = RWSTKind<i32, Vec<String>, i32, ResultKind<String>>;
//!
//! let computation = Session::flat_map(RWST::ask(), |multiplier: i32| {
//!     Session::flat_map(RWST::get(), move |state: i32| {
//!         let result = state * multiplier;
//!         Session::then(RWST::put(state + 1), move || {
//!             Session::then(RWST::tell(vec![format!("result: {result}")]), move || {
//!                 Session::pure(result)
//!             })
//!         })
//!     })
//! });
//!
//! assert_eq!(
//!     computation.run(3, 10),
//!     Ok((30, 11, vec!["result: 30".to_string()]))
//! );
//! ```

#![forbid(unsafe_code)]

use std::marker::PhantomData;

use super::{CatchHandler, InnerOf, LiftCatch, MonadError, MonadTrans};
use crate::typeclass::{Functor, Monad, Monoid, TypeConstructor};

/// A monad transformer combining environment, output, and state.
///
/// # Type Parameters
///
/// - `R`: The environment type (read-only context)
/// - `W`: The output type (must implement `Monoid`)
/// - `S`: The state type
/// - `M`: The inner kind
/// - `A`: The value produced
pub struct RWST<R, W, S, M, A>
where
    R: 'static,
    W: 'static,
    S: 'static,
    M: TypeConstructor,
    A: 'static,
{
    run_function: Box<dyn FnOnce(R, S) -> M::WithType<(A, S, W)>>,
}

impl<R, W, S, M, A> RWST<R, W, S, M, A>
where
    R: 'static,
    W: 'static,
    S: 'static,
    M: TypeConstructor,
    A: 'static,
{
    /// Creates a new `RWST` from a function.
    pub fn new<F>(function: F) -> Self
    where
        F: FnOnce(R, S) -> M::WithType<(A, S, W)> + 'static,
    {
        Self {
            run_function: Box::new(function),
        }
    }

    /// Runs the computation with an environment and an initial state.
    pub fn run(self, environment: R, initial_state: S) -> M::WithType<(A, S, W)> {
        (self.run_function)(environment, initial_state)
    }

    /// Runs `computation` with an environment rewritten by `modifier`.
    pub fn local<F>(modifier: F, computation: Self) -> Self
    where
        F: FnOnce(R) -> R + 'static,
    {
        Self::new(move |environment, state| computation.run(modifier(environment), state))
    }
}

impl<R, W, S, M, A> RWST<R, W, S, M, A>
where
    R: 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    M: Monad,
    A: Clone + 'static,
{
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
        Self::new(move |environment, state| M::pure((projection(environment), state, W::empty())))
    }

    /// Reads a projection of the current state.
    pub fn gets<F>(projection: F) -> Self
    where
        F: FnOnce(&S) -> A + 'static,
    {
        Self::new(move |_, state: S| {
            let value = projection(&state);
            M::pure((value, state, W::empty()))
        })
    }

    /// Builds a computation from a pure state transition.
    pub fn state<F>(transition: F) -> Self
    where
        F: FnOnce(S) -> (A, S) + 'static,
    {
        Self::new(move |_, state: S| {
            let (value, next) = transition(state);
            M::pure((value, next, W::empty()))
        })
    }
}

impl<R, W, S, M> RWST<R, W, S, M, R>
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

impl<R, W, S, M> RWST<R, W, S, M, S>
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

impl<R, W, S, M> RWST<R, W, S, M, ()>
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
        Self::new(move |_, state| M::pure(((), state, output)))
    }
}

/// The kind of [`RWST`] over the inner kind `M`.
pub struct RWSTKind<R, W, S, M>(PhantomData<fn() -> (R, W, S, M)>);

impl<R, W, S, M> TypeConstructor for RWSTKind<R, W, S, M>
where
    R: 'static,
    W: 'static,
    S: 'static,
    M: TypeConstructor,
{
    type WithType<A: 'static> = RWST<R, W, S, M, A>;
}

impl<R, W, S, M> Functor for RWSTKind<R, W, S, M>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    M: Monad,
{
    fn fmap<A, B, F>(computation: RWST<R, W, S, M, A>, function: F) -> RWST<R, W, S, M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        RWST::new(move |environment, state| {
            M::fmap::<(A, S, W), (B, S, W), _>(
                computation.run(environment, state),
                move |(value, next, output): (A, S, W)| (function(value), next, output),
            )
        })
    }
}

impl<R, W, S, M> Monad for RWSTKind<R, W, S, M>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    M: Monad,
{
    fn pure<A>(value: A) -> RWST<R, W, S, M, A>
    where
        A: Clone + 'static,
    {
        RWST::new(move |_, state| M::pure((value, state, W::empty())))
    }

    fn flat_map<A, B, F>(computation: RWST<R, W, S, M, A>, function: F) -> RWST<R, W, S, M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> RWST<R, W, S, M, B> + 'static,
    {
        RWST::new(move |environment: R, state: S| {
            let first = computation.run(environment.clone(), state);
            M::flat_map::<(A, S, W), (B, S, W), _>(
                first,
                move |(value, next, earlier): (A, S, W)| {
                    M::fmap::<(B, S, W), (B, S, W), _>(
                        function(value).run(environment.clone(), next),
                        move |(result, last, later): (B, S, W)| {
                            (result, last, earlier.clone().combine(later))
                        },
                    )
                },
            )
        })
    }
}

impl<R, W, S, M> MonadTrans for RWSTKind<R, W, S, M>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    M: Monad,
{
    type Inner = M;

    fn lift<A>(inner: M::WithType<A>) -> RWST<R, W, S, M, A>
    where
        A: Clone + 'static,
    {
        RWST::new(move |_, state: S| {
            M::fmap(inner, move |value: A| (value, state.clone(), W::empty()))
        })
    }
}

impl<R, W, S, M> LiftCatch for RWSTKind<R, W, S, M>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    M: Monad,
{
    type Layer<A: Clone + 'static> = (A, S, W);

    fn lift_catch<E, A, C, H>(
        catch: C,
        computation: RWST<R, W, S, M, A>,
        handler: H,
    ) -> RWST<R, W, S, M, A>
    where
        E: 'static,
        A: Clone + 'static,
        C: FnOnce(
                InnerOf<Self, Self::Layer<A>>,
                CatchHandler<E, InnerOf<Self, Self::Layer<A>>>,
            ) -> InnerOf<Self, Self::Layer<A>>
            + 'static,
        H: Fn(E) -> RWST<R, W, S, M, A> + 'static,
    {
        RWST::new(move |environment: R, state: S| {
            let handler_environment = environment.clone();
            let entry_state = state.clone();
            let recover: CatchHandler<E, M::WithType<(A, S, W)>> = Box::new(move |error| {
                handler(error).run(handler_environment.clone(), entry_state.clone())
            });
            catch(computation.run(environment, state), recover)
        })
    }
}

impl<R, W, S, M> MonadError for RWSTKind<R, W, S, M>
where
    R: Clone + 'static,
    W: Monoid + Clone + 'static,
    S: Clone + 'static,
    M: MonadError,
{
    type Error = M::Error;

    fn throw_error<A>(error: M::Error) -> RWST<R, W, S, M, A>
    where
        A: Clone + 'static,
    {
        Self::lift(M::throw_error(error))
    }

    fn catch_error<A, F>(computation: RWST<R, W, S, M, A>, handler: F) -> RWST<R, W, S, M, A>
    where
        A: Clone + 'static,
        F: Fn(M::Error) -> RWST<R, W, S, M, A> + 'static,
    {
        Self::lift_catch::<M::Error, A, _, _>(
            |inner, recover| M::catch_error(inner, recover),
            computation,
            handler,
        )
    }
}

static_assertions::assert_type_eq_all!(
    <RWSTKind<i32, String, i32, crate::typeclass::OptionKind> as MonadError>::Error,
    ()
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeclass::ResultKind;
    use rstest::rstest;

    type Session = RWSTKind<String, Vec<String>, i32, ResultKind<String>>;
    type Step<A> = RWST<String, Vec<String>, i32, ResultKind<String>, A>;

    fn log(message: &str) -> Step<()> {
        RWST::tell(vec![message.to_string()])
    }

    #[rstest]
    fn asks_and_local() {
        let length = Step::<usize>::asks(|environment: String| environment.len());
        let localized = RWST::local(|environment: String| environment + "!!", length);
        assert_eq!(localized.eval("abc".to_string(), 0), Ok((5, Vec::new())));
    }

    #[rstest]
    fn modify_and_exec() {
        let bumped = Session::then(Step::modify(|s| s * 2), || log("doubled"));
        assert_eq!(
            bumped.exec(String::new(), 21),
            Ok((42, vec!["doubled".to_string()]))
        );
    }

    #[rstest]
    fn handler_sees_environment_and_entry_state() {
        let failing = Session::then(Step::put(5), || {
            Session::then(log("lost"), || Session::throw_error::<String>("e".to_string()))
        });
        let recovered = Session::catch_error(failing, |error| {
            Session::flat_map(RWST::ask(), move |environment: String| {
                let error = error.clone();
                Session::fmap(RWST::get(), move |state: i32| format!("{environment}:{state}:{error}"))
            })
        });
        assert_eq!(
            recovered.run("env".to_string(), 1),
            Ok(("env:1:e".to_string(), 1, Vec::new()))
        );
    }

    #[rstest]
    fn output_before_catch_survives() {
        let guarded = Session::then(log("kept"), || {
            Session::catch_error(
                Session::then(log("lost"), || Session::throw_error::<i32>("e".to_string())),
                |_| Session::pure(0),
            )
        });
        assert_eq!(
            guarded.run(String::new(), 0),
            Ok((0, 0, vec!["kept".to_string()]))
        );
    }
}
