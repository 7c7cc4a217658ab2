//! `ListT` - list-producing monad transformer.
//!
//! `ListT<M, A>` holds `M<Vec<A>>`: an inner computation producing every
//! result of a nondeterministic computation at once. Binding runs the
//! continuation for each element in order, sequencing the inner effects
//! left to right and concatenating the results.
//!
//! A failure thrown by `M` aborts the whole list. When such a failure is
//! caught, the partial results of the failed block are discarded and the
//! handler's list takes their place.
//!
//! # Examples
//!
//! ```rust
//! use lambars_error::effect::{ListT, ListTKind};
//! use lambars_error::typeclass::{Monad, ResultKind};
//!
//! type Branches = ListTKind<ResultKind<String>>;
//!
//! let pairs = Branches::flat_map(ListT::from_vec(vec![1, 2]), |x| {
//!     ListT::from_vec(vec![x * 10, x * 100])
//! });
//! assert_eq!(pairs.run(), Ok(vec![10, 100, 20, 200]));
//! ```

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use super::{CatchHandler, InnerOf, LiftCatch, MonadError, MonadTrans};
use crate::typeclass::{Functor, Monad, TypeConstructor};

/// A computation producing any number of results, running in `M`.
pub struct ListT<M, A>
where
    M: TypeConstructor,
    A: 'static,
{
    inner: M::WithType<Vec<A>>,
}

impl<M, A> ListT<M, A>
where
    M: TypeConstructor,
    A: 'static,
{
    /// Wraps an inner computation producing a list.
    pub const fn new(inner: M::WithType<Vec<A>>) -> Self {
        Self { inner }
    }

    /// Unwraps the inner computation.
    pub fn run(self) -> M::WithType<Vec<A>> {
        self.inner
    }
}

impl<M, A> ListT<M, A>
where
    M: Monad,
    A: Clone + 'static,
{
    /// A computation producing exactly these results.
    pub fn from_vec(values: Vec<A>) -> Self {
        Self::new(M::pure(values))
    }
}

/// Results bound so far: the first `len` items of a shared buffer.
///
/// Extending writes in place while this prefix ends at the buffer's tip and
/// copies the prefix otherwise, so a continuation run more than once by a
/// branching inner kind never sees another run's results.
#[derive(Clone)]
struct Bound<B> {
    buffer: Rc<RefCell<Vec<B>>>,
    len: usize,
}

impl<B: Clone> Bound<B> {
    fn new() -> Self {
        Self {
            buffer: Rc::new(RefCell::new(Vec::new())),
            len: 0,
        }
    }

    fn extend(self, produced: Vec<B>) -> Self {
        let at_tip = self.buffer.borrow().len() == self.len;
        let buffer = if at_tip {
            self.buffer
        } else {
            let prefix = self.buffer.borrow()[..self.len].to_vec();
            Rc::new(RefCell::new(prefix))
        };
        let len = self.len + produced.len();
        buffer.borrow_mut().extend(produced);
        Self { buffer, len }
    }

    fn into_vec(self) -> Vec<B> {
        self.buffer.borrow()[..self.len].to_vec()
    }
}

/// The kind of [`ListT`] over the inner kind `M`.
pub struct ListTKind<M>(PhantomData<fn() -> M>);

impl<M: TypeConstructor> TypeConstructor for ListTKind<M> {
    type WithType<A: 'static> = ListT<M, A>;
}

impl<M: Monad> Functor for ListTKind<M> {
    fn fmap<A, B, F>(computation: ListT<M, A>, function: F) -> ListT<M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        ListT::new(M::fmap(computation.inner, move |values: Vec<A>| {
            values.into_iter().map(&function).collect::<Vec<B>>()
        }))
    }
}

impl<M: Monad> Monad for ListTKind<M> {
    fn pure<A>(value: A) -> ListT<M, A>
    where
        A: Clone + 'static,
    {
        ListT::new(M::pure(vec![value]))
    }

    fn flat_map<A, B, F>(computation: ListT<M, A>, function: F) -> ListT<M, B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> ListT<M, B> + 'static,
    {
        let function = Rc::new(function);
        ListT::new(M::flat_map(computation.inner, move |values: Vec<A>| {
            let bound = values.into_iter().fold(M::pure(Bound::new()), |bound, value| {
                let function = Rc::clone(&function);
                M::flat_map(bound, move |bound: Bound<B>| {
                    M::fmap(function(value.clone()).inner, move |produced: Vec<B>| {
                        bound.clone().extend(produced)
                    })
                })
            });
            M::fmap(bound, Bound::into_vec)
        }))
    }
}

impl<M: Monad> MonadTrans for ListTKind<M> {
    type Inner = M;

    fn lift<A>(inner: M::WithType<A>) -> ListT<M, A>
    where
        A: Clone + 'static,
    {
        ListT::new(M::fmap(inner, |value: A| vec![value]))
    }
}

impl<M: Monad> LiftCatch for ListTKind<M> {
    type Layer<A: Clone + 'static> = Vec<A>;

    fn lift_catch<E, A, C, H>(catch: C, computation: ListT<M, A>, handler: H) -> ListT<M, A>
    where
        E: 'static,
        A: Clone + 'static,
        C: FnOnce(
                InnerOf<Self, Self::Layer<A>>,
                CatchHandler<E, InnerOf<Self, Self::Layer<A>>>,
            ) -> InnerOf<Self, Self::Layer<A>>
            + 'static,
        H: Fn(E) -> ListT<M, A> + 'static,
    {
        let recover: CatchHandler<E, M::WithType<Vec<A>>> =
            Box::new(move |error| handler(error).inner);
        ListT::new(catch(computation.inner, recover))
    }
}

impl<M: MonadError> MonadError for ListTKind<M> {
    type Error = M::Error;

    fn throw_error<A>(error: M::Error) -> ListT<M, A>
    where
        A: Clone + 'static,
    {
        Self::lift(M::throw_error(error))
    }

    fn catch_error<A, F>(computation: ListT<M, A>, handler: F) -> ListT<M, A>
    where
        A: Clone + 'static,
        F: Fn(M::Error) -> ListT<M, A> + 'static,
    {
        Self::lift_catch::<M::Error, A, _, _>(
            |inner, recover| M::catch_error(inner, recover),
            computation,
            handler,
        )
    }
}

static_assertions::assert_type_eq_all!(
    <ListTKind<crate::typeclass::ResultKind<String>> as MonadError>::Error,
    String
);
