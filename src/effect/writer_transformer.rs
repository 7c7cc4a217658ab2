//! `WriterT` - Writer Monad Transformer.
//!
//! `WriterT` adds output accumulation capability to any monad.
//! It transforms a monad M into a monad that can accumulate output W.
//!
//! # Overview
//!
//! `WriterT<W, M, A>` encapsulates `M<(A, W)>` where `W` is the output type
//! (must be a Monoid for combining outputs) and `M` is the inner kind. The
//! output travels with the result, so a block that fails produces no
//! output: when `catch_error` recovers, everything the failed block told is
//! discarded and only the handler's output remains.
//! [`StrictWriterT`](super::StrictWriterT) keeps it instead.
//!
//! # Examples
//!
//! ```rust
//! use lambars_error::effect::{MonadError, WriterT, WriterTKind};
//! use lambars_error::typeclass::{Monad, ResultKind};
//!
//! type Logged = WriterTKind<Vec<String>, ResultKind<String>>;
//!
//! let log = |message: &str| WriterT::<Vec<String>, ResultKind<String>, ()>::tell(vec![message.to_string()]);
//!
//! let failing = Logged::then(log("attempt"), || Logged::throw_error::<i32>("boom".to_string()));
//! let recovered = Logged::catch_error(failing, move |_| Logged::then(log("fallback"), || Logged::pure(0)));
//! assert_eq!(recovered.run(), Ok((0, vec!["fallback".to_string()])));
//! ```

#![forbid(unsafe_code)]

use std::marker::PhantomData;

use super::{CatchHandler, InnerOf, LiftCatch, MonadError, MonadTrans};
use crate::typeclass::{Functor, Monad, Monoid, TypeConstructor};

/// A monad transformer that adds output accumulation capability.
///
/// # Type Parameters
///
/// - `W`: The output type (must implement `Monoid`)
/// - `M`: The inner kind (e.g., `OptionKind`, `ResultKind<E>`, `IOKind<E>`)
/// - `A`: The value produced
pub struct WriterT<W, M, A>
where
    W: 'static,
    M: TypeConstructor,
    A: 'static,
{
    /// The wrapped computation containing (value, output).
    inner: M::WithType<(A, W)>,
}

impl<W, M, A> WriterT<W, M, A>
where
    W: 'static,
    M: TypeConstructor,
    A: 'static,
{
    /// Creates a new `WriterT` from an inner computation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::WriterT;
    /// use lambars_error::typeclass::OptionKind;
    ///
    /// let writer: WriterT<Vec<String>, OptionKind, i32> =
    ///     WriterT::new(Some((42, vec!["log".to_string()])));
    /// assert_eq!(writer.run(), Some((42, vec!["log".to_string()])));
    /// ```
    pub const fn new(inner: M::WithType<(A, W)>) -> Self {
        Self { inner }
    }

    /// Runs the `WriterT` computation, returning the inner computation.
    pub fn run(self) -> M::WithType<(A, W)> {
        self.inner
    }
}

impl<W, M, A> WriterT<W, M, A>
where
    W: Monoid + Clone + 'static,
    M: Monad,
    A: Clone + 'static,
{
    /// Builds a computation from a value and its output.
    pub fn writer(value: A, output: W) -> Self {
        Self::new(M::pure((value, output)))
    }

    /// Runs the computation and keeps only the output.
    pub fn exec(self) -> M::WithType<W> {
        M::fmap(self.inner, |(_, output): (A, W)| output)
    }

    /// Exposes the output of `computation` alongside its value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::effect::WriterT;
    /// use lambars_error::typeclass::OptionKind;
    ///
    /// let writer = WriterT::<String, OptionKind, i32>::writer(1, "one".to_string());
    /// let listened = WriterT::listen(writer);
    /// assert_eq!(listened.run(), Some(((1, "one".to_string()), "one".to_string())));
    /// ```
    pub fn listen(computation: Self) -> WriterT<W, M, (A, W)> {
        WriterT::new(M::fmap(computation.inner, |(value, output): (A, W)| {
            ((value, output.clone()), output)
        }))
    }

    /// Rewrites the output of `computation`.
    pub fn censor<F>(modifier: F, computation: Self) -> Self
    where
        F: Fn(W) -> W + 'static,
    {
        Self::new(M::fmap(computation.inner, move |(value, output): (A, W)| {
            (value, modifier(output))
        }))
    }
}

impl<W, M> WriterT<W, M, ()>
where
    W: Monoid + Clone + 'static,
    M: Monad,
{
    /// Appends to the output.
    pub fn tell(output: W) -> Self {
        Self::new(M::pure(((), output)))
    }
}

/// The kind of [`WriterT`] with output `W` over the inner kind `M`.
pub struct WriterTKind<W, M>(PhantomData<fn() -> (W, M)>);

impl<W, M> TypeConstructor for WriterTKind<W, M>
where
    W: 'static,
    M: TypeConstructor,
{
    type WithType<A: 'static> = WriterT<W, M, A>;
}

impl<W, M> Functor for WriterTKind<W, M>
where
    W: Monoid + Clone + 'static,
    M: Monad,
{
    fn fmap<A, B, F>(computation: WriterT<W, M, A>, function: F) -> WriterT<W, M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        WriterT::new(M::fmap::<(A, W), (B, W), _>(
            computation.inner,
            move |(value, output): (A, W)| (function(value), output),
        ))
    }
}

impl<W, M> Monad for WriterTKind<W, M>
where
    W: Monoid + Clone + 'static,
    M: Monad,
{
    fn pure<A>(value: A) -> WriterT<W, M, A>
    where
        A: Clone + 'static,
    {
        WriterT::new(M::pure((value, W::empty())))
    }

    fn flat_map<A, B, F>(computation: WriterT<W, M, A>, function: F) -> WriterT<W, M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> WriterT<W, M, B> + 'static,
    {
        WriterT::new(M::flat_map::<(A, W), (B, W), _>(
            computation.inner,
            move |(value, earlier): (A, W)| {
                M::fmap::<(B, W), (B, W), _>(
                    function(value).inner,
                    move |(result, later): (B, W)| (result, earlier.clone().combine(later)),
                )
            },
        ))
    }
}

impl<W, M> MonadTrans for WriterTKind<W, M>
where
    W: Monoid + Clone + 'static,
    M: Monad,
{
    type Inner = M;

    fn lift<A>(inner: M::WithType<A>) -> WriterT<W, M, A>
    where
        A: Clone + 'static,
    {
        WriterT::new(M::fmap(inner, |value: A| (value, W::empty())))
    }
}

impl<W, M> LiftCatch for WriterTKind<W, M>
where
    W: Monoid + Clone + 'static,
    M: Monad,
{
    type Layer<A: Clone + 'static> = (A, W);

    fn lift_catch<E, A, C, H>(catch: C, computation: WriterT<W, M, A>, handler: H) -> WriterT<W, M, A>
    where
        E: 'static,
        A: Clone + 'static,
        C: FnOnce(
                InnerOf<Self, Self::Layer<A>>,
                CatchHandler<E, InnerOf<Self, Self::Layer<A>>>,
            ) -> InnerOf<Self, Self::Layer<A>>
            + 'static,
        H: Fn(E) -> WriterT<W, M, A> + 'static,
    {
        let recover: CatchHandler<E, M::WithType<(A, W)>> =
            Box::new(move |error| handler(error).inner);
        WriterT::new(catch(computation.inner, recover))
    }
}

impl<W, M> MonadError for WriterTKind<W, M>
where
    W: Monoid + Clone + 'static,
    M: MonadError,
{
    type Error = M::Error;

    fn throw_error<A>(error: M::Error) -> WriterT<W, M, A>
    where
        A: Clone + 'static,
    {
        Self::lift(M::throw_error(error))
    }

    fn catch_error<A, F>(computation: WriterT<W, M, A>, handler: F) -> WriterT<W, M, A>
    where
        A: Clone + 'static,
        F: Fn(M::Error) -> WriterT<W, M, A> + 'static,
    {
        Self::lift_catch::<M::Error, A, _, _>(
            |inner, recover| M::catch_error(inner, recover),
            computation,
            handler,
        )
    }
}

static_assertions::assert_type_eq_all!(
    <WriterTKind<String, crate::typeclass::ResultKind<i32>> as MonadError>::Error,
    i32
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeclass::{OptionKind, ResultKind, Sum};
    use rstest::rstest;

    type Logged = WriterTKind<Vec<String>, ResultKind<String>>;

    fn log(message: &str) -> WriterT<Vec<String>, ResultKind<String>, ()> {
        WriterT::tell(vec![message.to_string()])
    }

    #[rstest]
    fn flat_map_accumulates_in_order() {
        let logged = Logged::then(log("one"), || Logged::then(log("two"), || Logged::pure(2)));
        assert_eq!(
            logged.run(),
            Ok((2, vec!["one".to_string(), "two".to_string()]))
        );
    }

    #[rstest]
    fn tell_with_sum_output() {
        type Counted = WriterTKind<Sum<i32>, OptionKind>;
        let counted = Counted::then(WriterT::tell(Sum(2)), || WriterT::tell(Sum(3)));
        assert_eq!(counted.exec(), Some(Sum(5)));
    }

    #[rstest]
    fn censor_rewrites_output() {
        let censored = WriterT::censor(
            |entries: Vec<String>| entries.into_iter().map(|entry| entry.to_uppercase()).collect(),
            log("quiet"),
        );
        assert_eq!(censored.exec(), Ok(vec!["QUIET".to_string()]));
    }

    #[rstest]
    fn output_before_catch_is_kept() {
        let guarded = Logged::then(log("before"), || {
            Logged::catch_error(
                Logged::then(log("inside"), || Logged::throw_error::<i32>("e".to_string())),
                |_| Logged::pure(0),
            )
        });
        assert_eq!(guarded.run(), Ok((0, vec!["before".to_string()])));
    }

    #[rstest]
    fn uncaught_error_drops_output() {
        let failing = Logged::then(log("lost"), || Logged::throw_error::<i32>("e".to_string()));
        assert_eq!(failing.run(), Err("e".to_string()));
    }
}
