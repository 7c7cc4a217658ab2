//! Numeric wrapper types for different algebraic operations.
//!
//! The same number can be accumulated by addition ([`Sum`]) or by
//! multiplication ([`Product`]); the wrapper picks the `Semigroup`.

/// The additive semigroup/monoid (identity: `0`).
///
/// # Examples
///
/// ```rust
/// use lambars_error::typeclass::{Monoid, Semigroup, Sum};
///
/// assert_eq!(Sum(3).combine(Sum(5)), Sum(8));
/// assert_eq!(Sum::<i32>::empty(), Sum(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Sum<A>(pub A);

impl<A> Sum<A> {
    /// Consumes the `Sum` and returns the inner value.
    #[inline]
    pub fn into_inner(self) -> A {
        self.0
    }
}

/// The multiplicative semigroup/monoid (identity: `1`).
///
/// # Examples
///
/// ```rust
/// use lambars_error::typeclass::{Monoid, Product, Semigroup};
///
/// assert_eq!(Product(3).combine(Product(5)), Product(15));
/// assert_eq!(Product::<i64>::empty(), Product(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Product<A>(pub A);

impl<A> Product<A> {
    /// Consumes the `Product` and returns the inner value.
    #[inline]
    pub fn into_inner(self) -> A {
        self.0
    }
}
