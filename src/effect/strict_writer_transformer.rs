//! `StrictWriterT` - writer transformer with write-through output.
//!
//! `StrictWriterT<W, M, A>` appends every `tell` to an output log that lives
//! for one `run`. Output is committed as soon as it is told, so a block that
//! later fails still contributes everything it wrote before the failure.
//! [`WriterT`](super::WriterT) discards that output instead.
//!
//! # Examples
//!
//! ```rust
//! use lambars_error::effect::{MonadError, StrictWriterT, StrictWriterTKind};
//! use lambars_error::typeclass::{Monad, ResultKind};
//!
//! type Logged = StrictWriterTKind<Vec<String>, ResultKind<String>>;
//!
//! let log = |message: &str| {
//!     StrictWriterT::<Vec<String>, ResultKind<String>, ()>::tell(vec![message.to_string()])
//! };
//!
//! let failing = Logged::then(log("attempt"), || Logged::throw_error::<i32>("boom".to_string()));
//! let recovered = Logged::catch_error(failing, move |_| Logged::then(log("fallback"), || Logged::pure(0)));
//! assert_eq!(
//!     recovered.run(),
//!     Ok((0, vec!["attempt".to_string(), "fallback".to_string()]))
//! );
//! ```

#![forbid(unsafe_code)]

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::rc::Rc;

use super::{CatchHandler, InnerOf, LiftCatch, MonadError, MonadTrans};
use crate::typeclass::{Functor, Monad, Monoid, TypeConstructor};

/// Output told so far during one run, one entry per `tell`.
pub(crate) type OutputLog<W> = Rc<RefCell<Vec<W>>>;

/// Combines the entries told since `mark`.
pub(crate) fn told_since<W: Monoid + Clone>(log: &OutputLog<W>, mark: usize) -> W {
    W::combine_all(log.borrow()[mark..].iter().cloned())
}

/// A writer transformer whose output survives failures.
pub struct StrictWriterT<W, M, A>
where
    W: 'static,
    M: TypeConstructor,
    A: 'static,
{
    run_function: Box<dyn FnOnce(OutputLog<W>) -> M::WithType<A>>,
}

impl<W, M, A> StrictWriterT<W, M, A>
where
    W: 'static,
    M: TypeConstructor,
    A: 'static,
{
    fn from_log<F>(function: F) -> Self
    where
        F: FnOnce(OutputLog<W>) -> M::WithType<A> + 'static,
    {
        Self {
            run_function: Box::new(function),
        }
    }

    fn run_with(self, log: OutputLog<W>) -> M::WithType<A> {
        (self.run_function)(log)
    }
}

impl<W, M, A> StrictWriterT<W, M, A>
where
    W: Monoid + Clone + 'static,
    M: Monad,
    A: Clone + 'static,
{
    /// Builds a computation from a value and its output.
    pub fn writer(value: A, output: W) -> Self {
        Self::from_log(move |log: OutputLog<W>| {
            log.borrow_mut().push(output);
            M::pure(value)
        })
    }

    /// Runs the computation, returning the result and all output told.
    pub fn run(self) -> M::WithType<(A, W)> {
        let log: OutputLog<W> = Rc::new(RefCell::new(Vec::new()));
        let final_log = Rc::clone(&log);
        M::fmap(self.run_with(log), move |value: A| {
            (value, told_since(&final_log, 0))
        })
    }

    /// Runs the computation and keeps only the output.
    pub fn exec(self) -> M::WithType<W> {
        M::fmap(self.run(), |(_, output): (A, W)| output)
    }

    /// Exposes the output told by `computation` alongside its value.
    ///
    /// The output still reaches the enclosing log.
    pub fn listen(computation: Self) -> StrictWriterT<W, M, (A, W)> {
        StrictWriterT::from_log(move |log: OutputLog<W>| {
            let mark = log.borrow().len();
            let heard_log = Rc::clone(&log);
            M::fmap(computation.run_with(log), move |value: A| {
                (value, told_since(&heard_log, mark))
            })
        })
    }

    /// Rewrites the output told by `computation`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::StrictWriterT;
    /// use lambars_error::typeclass::OptionKind;
    ///
    /// let loud = StrictWriterT::<String, OptionKind, ()>::censor(
    ///     |output| output.to_uppercase(),
    ///     StrictWriterT::tell("quiet".to_string()),
    /// );
    /// assert_eq!(loud.exec(), Some("QUIET".to_string()));
    /// ```
    pub fn censor<F>(modifier: F, computation: Self) -> Self
    where
        F: Fn(W) -> W + 'static,
    {
        Self::from_log(move |log: OutputLog<W>| {
            let mark = log.borrow().len();
            let censored_log = Rc::clone(&log);
            // Entries before this index are already rewritten; branches of the
            // inner kind that finish later only censor what they added since.
            let censored_until: Rc<Cell<Option<usize>>> = Rc::new(Cell::new(None));
            M::fmap(computation.run_with(log), move |value: A| {
                let start = censored_until.get().unwrap_or(mark);
                let pending =
                    censored_until.get().is_none() || censored_log.borrow().len() > start;
                if pending {
                    let rewritten = modifier(told_since(&censored_log, start));
                    let mut entries = censored_log.borrow_mut();
                    entries.truncate(start);
                    entries.push(rewritten);
                    censored_until.set(Some(start + 1));
                }
                value
            })
        })
    }
}

impl<W, M> StrictWriterT<W, M, ()>
where
    W: Monoid + Clone + 'static,
    M: Monad,
{
    /// Appends to the output.
    pub fn tell(output: W) -> Self {
        Self::writer((), output)
    }
}

/// The kind of [`StrictWriterT`] with output `W` over the inner kind `M`.
pub struct StrictWriterTKind<W, M>(PhantomData<fn() -> (W, M)>);

impl<W, M> TypeConstructor for StrictWriterTKind<W, M>
where
    W: 'static,
    M: TypeConstructor,
{
    type WithType<A: 'static> = StrictWriterT<W, M, A>;
}

impl<W, M> Functor for StrictWriterTKind<W, M>
where
    W: Monoid + Clone + 'static,
    M: Monad,
{
    fn fmap<A, B, F>(computation: StrictWriterT<W, M, A>, function: F) -> StrictWriterT<W, M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        StrictWriterT::from_log(move |log| M::fmap(computation.run_with(log), function))
    }
}

impl<W, M> Monad for StrictWriterTKind<W, M>
where
    W: Monoid + Clone + 'static,
    M: Monad,
{
    fn pure<A>(value: A) -> StrictWriterT<W, M, A>
    where
        A: Clone + 'static,
    {
        StrictWriterT::from_log(move |_| M::pure(value))
    }

    fn flat_map<A, B, F>(computation: StrictWriterT<W, M, A>, function: F) -> StrictWriterT<W, M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> StrictWriterT<W, M, B> + 'static,
    {
        StrictWriterT::from_log(move |log: OutputLog<W>| {
            let continuation_log = Rc::clone(&log);
            M::flat_map(computation.run_with(log), move |value: A| {
                function(value).run_with(Rc::clone(&continuation_log))
            })
        })
    }
}

impl<W, M> MonadTrans for StrictWriterTKind<W, M>
where
    W: Monoid + Clone + 'static,
    M: Monad,
{
    type Inner = M;

    fn lift<A>(inner: M::WithType<A>) -> StrictWriterT<W, M, A>
    where
        A: Clone + 'static,
    {
        StrictWriterT::from_log(move |_| inner)
    }
}

impl<W, M> LiftCatch for StrictWriterTKind<W, M>
where
    W: Monoid + Clone + 'static,
    M: Monad,
{
    type Layer<A: Clone + 'static> = A;

    fn lift_catch<E, A, C, H>(
        catch: C,
        computation: StrictWriterT<W, M, A>,
        handler: H,
    ) -> StrictWriterT<W, M, A>
    where
        E: 'static,
        A: Clone + 'static,
        C: FnOnce(
                InnerOf<Self, Self::Layer<A>>,
                CatchHandler<E, InnerOf<Self, Self::Layer<A>>>,
            ) -> InnerOf<Self, Self::Layer<A>>
            + 'static,
        H: Fn(E) -> StrictWriterT<W, M, A> + 'static,
    {
        StrictWriterT::from_log(move |log: OutputLog<W>| {
            let handler_log = Rc::clone(&log);
            let recover: CatchHandler<E, M::WithType<A>> =
                Box::new(move |error| handler(error).run_with(Rc::clone(&handler_log)));
            catch(computation.run_with(log), recover)
        })
    }
}

impl<W, M> MonadError for StrictWriterTKind<W, M>
where
    W: Monoid + Clone + 'static,
    M: MonadError,
{
    type Error = M::Error;

    fn throw_error<A>(error: M::Error) -> StrictWriterT<W, M, A>
    where
        A: Clone + 'static,
    {
        Self::lift(M::throw_error(error))
    }

    fn catch_error<A, F>(computation: StrictWriterT<W, M, A>, handler: F) -> StrictWriterT<W, M, A>
    where
        A: Clone + 'static,
        F: Fn(M::Error) -> StrictWriterT<W, M, A> + 'static,
    {
        Self::lift_catch::<M::Error, A, _, _>(
            |inner, recover| M::catch_error(inner, recover),
            computation,
            handler,
        )
    }
}

static_assertions::assert_type_eq_all!(
    <StrictWriterTKind<String, crate::typeclass::ResultKind<i32>> as MonadError>::Error,
    i32
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeclass::{OptionKind, ResultKind, Sum};
    use rstest::rstest;

    type Logged = StrictWriterTKind<Vec<String>, ResultKind<String>>;

    fn log(message: &str) -> StrictWriterT<Vec<String>, ResultKind<String>, ()> {
        StrictWriterT::tell(vec![message.to_string()])
    }

    fn entries(messages: &[&str]) -> Vec<String> {
        messages.iter().map(ToString::to_string).collect()
    }

    #[rstest]
    fn output_is_accumulated_in_order() {
        let logged = Logged::then(log("one"), || Logged::then(log("two"), || Logged::pure(2)));
        assert_eq!(logged.run(), Ok((2, entries(&["one", "two"]))));
    }

    #[rstest]
    fn output_of_failed_block_is_kept() {
        let failing = Logged::then(log("inside"), || Logged::throw_error::<i32>("e".to_string()));
        let recovered = Logged::catch_error(failing, |_| Logged::then(log("handler"), || Logged::pure(0)));
        assert_eq!(recovered.run(), Ok((0, entries(&["inside", "handler"]))));
    }

    #[rstest]
    fn listen_reports_only_inner_output() {
        let listened = Logged::then(log("outer"), || StrictWriterT::listen(log("inner")));
        assert_eq!(
            listened.run(),
            Ok((((), entries(&["inner"])), entries(&["outer", "inner"])))
        );
    }

    #[rstest]
    fn censor_rewrites_only_inner_output() {
        let censored = Logged::then(log("keep"), || {
            StrictWriterT::censor(|_: Vec<String>| entries(&["hidden"]), log("secret"))
        });
        assert_eq!(censored.exec(), Ok(entries(&["keep", "hidden"])));
    }

    #[rstest]
    fn censor_rewrites_shared_output_once_across_branches() {
        use crate::effect::{ListT, ListTKind};

        type Branching = StrictWriterTKind<String, ListTKind<ResultKind<String>>>;
        let branches = Branching::flat_map(Branching::lift(ListT::from_vec(vec![1, 2])), |x| {
            Branching::then(StrictWriterT::tell("a".to_string()), move || Branching::pure(x))
        });
        let censored = StrictWriterT::censor(|output: String| format!("[{output}]"), branches);
        assert_eq!(
            censored.run().run(),
            Ok(vec![(1, "[aa]".to_string()), (2, "[aa]".to_string())])
        );
    }

    #[rstest]
    fn sum_output() {
        type Counted = StrictWriterTKind<Sum<i32>, OptionKind>;
        let counted = Counted::then(StrictWriterT::tell(Sum(4)), || StrictWriterT::tell(Sum(5)));
        assert_eq!(counted.exec(), Some(Sum(9)));
    }
}
