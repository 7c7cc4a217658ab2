//! Identity wrapper type - the identity monad.
//!
//! `Identity` adds no effect at all. It is the base of transformer stacks
//! that need a monad but no error channel of their own, e.g.
//! `ExceptT<String, IdentityKind, A>`.

use std::marker::PhantomData;

use super::TypeConstructor;

/// The identity functor - wraps a value without adding any behavior.
///
/// # Examples
///
/// ```rust
/// use lambars_error::typeclass::Identity;
///
/// let wrapped = Identity::new(42);
/// assert_eq!(wrapped.into_inner(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Identity<A>(pub A);

impl<A> Identity<A> {
    /// Creates a new `Identity` wrapping the given value.
    #[inline]
    pub const fn new(value: A) -> Self {
        Self(value)
    }

    /// Consumes the `Identity` and returns the inner value.
    #[inline]
    pub fn into_inner(self) -> A {
        self.0
    }

    /// Returns a reference to the inner value.
    #[inline]
    pub const fn as_inner(&self) -> &A {
        &self.0
    }
}

impl<A> From<A> for Identity<A> {
    fn from(value: A) -> Self {
        Self::new(value)
    }
}

/// The kind of [`Identity`].
pub struct IdentityKind(PhantomData<()>);

impl TypeConstructor for IdentityKind {
    type WithType<A: 'static> = Identity<A>;
}
