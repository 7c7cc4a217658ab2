//! IO Monad - Deferred side effect handling.
//!
//! The `IO` type represents a computation that may perform side effects.
//! Side effects are not executed until `run_unsafe` is called, maintaining
//! referential transparency in pure code.
//!
//! # Native Failure
//!
//! `IOKind<E>` gives `IO` the [`MonadError`] capability on top of the
//! host's own fault mechanism: a thrown error unwinds the stack with the
//! error as the panic payload, and `catch_error` stops the unwinding only
//! when the payload is exactly an `E`. Every other payload keeps unwinding.
//!
//! Throwing goes through [`std::panic::resume_unwind`], so no panic hook
//! runs and nothing is printed. Use an error type dedicated to the
//! computation: a plain `panic!("...")` elsewhere produces a `&str` or
//! `String` payload and would be caught by an `IOKind<String>` handler.
//!
//! # Examples
//!
//! ```rust
//! use lambars_error::effect::{IO, IOKind, MonadError, try_error};
//! use lambars_error::typeclass::Monad;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Timeout(u32);
//!
//! type Task = IOKind<Timeout>;
//!
//! let slow = Task::flat_map(IO::pure(3), |attempts| {
//!     Task::throw_error::<i32>(Timeout(attempts))
//! });
//! let outcome = try_error::<Task, i32>(slow).run_unsafe();
//! assert_eq!(outcome, Err(Timeout(3)));
//! ```
//!
//! # Side Effect Deferral
//!
//! ```rust
//! use lambars_error::effect::IO;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let executed = Rc::new(Cell::new(false));
//! let executed_clone = executed.clone();
//!
//! let io = IO::new(move || {
//!     executed_clone.set(true);
//!     42
//! });
//!
//! // Not executed yet
//! assert!(!executed.get());
//!
//! assert_eq!(io.run_unsafe(), 42);
//! assert!(executed.get());
//! ```

use std::marker::PhantomData;
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};

use super::MonadError;
use crate::typeclass::{Functor, Monad, TypeConstructor};

/// A monad representing deferred side effects.
///
/// `IO<A>` wraps a computation that produces a value of type `A` and may
/// perform side effects. The computation is not executed until `run_unsafe`
/// is called, and can be executed only once.
///
/// # Monad Laws
///
/// 1. **Left Identity**: `IO::pure(a).flat_map(f) == f(a)`
/// 2. **Right Identity**: `m.flat_map(IO::pure) == m`
/// 3. **Associativity**: `m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))`
pub struct IO<A> {
    run_io: Box<dyn FnOnce() -> A>,
}

impl<A: 'static> IO<A> {
    /// Creates a new IO action from a closure.
    ///
    /// The closure will not be executed until `run_unsafe` is called.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::IO;
    ///
    /// let io = IO::new(|| 10 + 20);
    /// assert_eq!(io.run_unsafe(), 30);
    /// ```
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() -> A + 'static,
    {
        Self {
            run_io: Box::new(action),
        }
    }

    /// Wraps a pure value in an IO action.
    pub fn pure(value: A) -> Self {
        Self::new(move || value)
    }

    /// Executes the IO action and returns the result.
    ///
    /// An error thrown through [`IOKind`] and never caught keeps unwinding
    /// out of this call.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::IO;
    ///
    /// let io = IO::pure(42);
    /// assert_eq!(io.run_unsafe(), 42);
    /// ```
    pub fn run_unsafe(self) -> A {
        (self.run_io)()
    }

    /// Transforms the result of an IO action using a function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::IO;
    ///
    /// let io = IO::pure(21).fmap(|x| x * 2);
    /// assert_eq!(io.run_unsafe(), 42);
    /// ```
    pub fn fmap<B, F>(self, function: F) -> IO<B>
    where
        F: FnOnce(A) -> B + 'static,
        B: 'static,
    {
        IO::new(move || function(self.run_unsafe()))
    }

    /// Chains IO actions, passing the result of the first to a function
    /// that produces the second.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::IO;
    ///
    /// let io = IO::pure(10).flat_map(|x| IO::pure(x * 2));
    /// assert_eq!(io.run_unsafe(), 20);
    /// ```
    pub fn flat_map<B, F>(self, function: F) -> IO<B>
    where
        F: FnOnce(A) -> IO<B> + 'static,
        B: 'static,
    {
        IO::new(move || function(self.run_unsafe()).run_unsafe())
    }

    /// Alias for `flat_map`.
    pub fn and_then<B, F>(self, function: F) -> IO<B>
    where
        F: FnOnce(A) -> IO<B> + 'static,
        B: 'static,
    {
        self.flat_map(function)
    }

    /// Sequences two IO actions, discarding the result of the first.
    ///
    /// The first action is still executed for its side effects.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::IO;
    ///
    /// let io = IO::pure(10).then(IO::pure(20));
    /// assert_eq!(io.run_unsafe(), 20);
    /// ```
    pub fn then<B>(self, next: IO<B>) -> IO<B>
    where
        B: 'static,
    {
        self.flat_map(move |_| next)
    }

    /// Combines two IO actions using a function.
    pub fn map2<B, C, F>(self, other: IO<B>, function: F) -> IO<C>
    where
        F: FnOnce(A, B) -> C + 'static,
        B: 'static,
        C: 'static,
    {
        self.flat_map(move |a| other.fmap(move |b| function(a, b)))
    }
}

impl<A> std::fmt::Debug for IO<A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("IO(<deferred>)")
    }
}

// =============================================================================
// Kind
// =============================================================================

/// The kind of [`IO`] failing with errors of type `E`.
///
/// `E` must be `Send` because it travels as a panic payload.
pub struct IOKind<E>(PhantomData<fn() -> E>);

impl<E: 'static> TypeConstructor for IOKind<E> {
    type WithType<A: 'static> = IO<A>;
}

impl<E: 'static> Functor for IOKind<E> {
    fn fmap<A, B, F>(computation: IO<A>, function: F) -> IO<B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        computation.fmap(function)
    }
}

impl<E: 'static> Monad for IOKind<E> {
    fn pure<A>(value: A) -> IO<A>
    where
        A: Clone + 'static,
    {
        IO::pure(value)
    }

    fn flat_map<A, B, F>(computation: IO<A>, function: F) -> IO<B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> IO<B> + 'static,
    {
        computation.flat_map(function)
    }
}

impl<E> MonadError for IOKind<E>
where
    E: Clone + Send + 'static,
{
    type Error = E;

    fn throw_error<A>(error: E) -> IO<A>
    where
        A: Clone + 'static,
    {
        IO::new(move || resume_unwind(Box::new(error)))
    }

    fn catch_error<A, F>(computation: IO<A>, handler: F) -> IO<A>
    where
        A: Clone + 'static,
        F: Fn(E) -> IO<A> + 'static,
    {
        IO::new(move || {
            match catch_unwind(AssertUnwindSafe(move || computation.run_unsafe())) {
                Ok(value) => value,
                Err(payload) => match payload.downcast::<E>() {
                    Ok(error) => handler(*error).run_unsafe(),
                    Err(foreign) => resume_unwind(foreign),
                },
            }
        })
    }
}

static_assertions::assert_type_eq_all!(<IOKind<String> as MonadError>::Error, String);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::try_error;
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Fault(i32);

    type Task = IOKind<Fault>;

    #[rstest]
    fn io_pure_and_run() {
        assert_eq!(IO::pure(42).run_unsafe(), 42);
    }

    #[rstest]
    fn io_map2_combines() {
        let io = IO::pure(10).map2(IO::pure(20), |a, b| a + b);
        assert_eq!(io.run_unsafe(), 30);
    }

    #[rstest]
    fn io_and_then_chains() {
        assert_eq!(IO::pure(10).and_then(|x| IO::pure(x + 5)).run_unsafe(), 15);
    }

    #[rstest]
    fn throw_error_is_deferred() {
        let _never_run = Task::throw_error::<i32>(Fault(1));
    }

    #[rstest]
    fn catch_error_recovers_matching_payload() {
        let recovered = Task::catch_error(Task::throw_error::<i32>(Fault(7)), |Fault(code)| {
            IO::pure(code * 2)
        });
        assert_eq!(recovered.run_unsafe(), 14);
    }

    #[rstest]
    fn catch_error_skips_handler_on_success() {
        let called = Rc::new(Cell::new(false));
        let observed = called.clone();
        let result = Task::catch_error(IO::pure(1), move |_| {
            observed.set(true);
            IO::pure(0)
        });
        assert_eq!(result.run_unsafe(), 1);
        assert!(!called.get());
    }

    #[rstest]
    fn throw_error_short_circuits_flat_map() {
        let reached = Rc::new(Cell::new(false));
        let observed = reached.clone();
        let chained = Task::flat_map(Task::throw_error::<i32>(Fault(2)), move |x| {
            observed.set(true);
            IO::pure(x)
        });
        assert_eq!(try_error::<Task, i32>(chained).run_unsafe(), Err(Fault(2)));
        assert!(!reached.get());
    }

    #[rstest]
    fn foreign_payload_keeps_unwinding() {
        let foreign = IO::new(|| -> i32 { resume_unwind(Box::new("not a fault")) });
        let guarded = Task::catch_error(foreign, |_| IO::pure(0));
        let outcome = catch_unwind(AssertUnwindSafe(move || guarded.run_unsafe()));
        let payload = outcome.expect_err("foreign payload must not be caught");
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"not a fault"));
    }
}
