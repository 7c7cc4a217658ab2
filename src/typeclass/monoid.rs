//! Monoid type class - semigroups with an identity element.
//!
//! Writer-style transformers start every computation from `empty()`.
//!
//! # Laws
//!
//! ```text
//! Self::empty().combine(a) == a
//! a.combine(Self::empty()) == a
//! ```

use std::ops::Add;

use super::Semigroup;
use super::wrappers::{Product, Sum};

/// A semigroup with an identity element.
///
/// # Examples
///
/// ```rust
/// use lambars_error::typeclass::{Monoid, Semigroup};
///
/// let s = String::from("hello");
/// assert_eq!(String::empty().combine(s.clone()), s);
/// assert_eq!(String::combine_all(vec!["a".to_string(), "b".to_string()]), "ab");
/// ```
pub trait Monoid: Semigroup {
    /// Returns the identity element.
    fn empty() -> Self;

    /// Combines all elements, starting from `empty()`.
    fn combine_all<I>(iterator: I) -> Self
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        iterator
            .into_iter()
            .fold(Self::empty(), |accumulator, element| {
                accumulator.combine(element)
            })
    }
}

impl Monoid for String {
    fn empty() -> Self {
        Self::new()
    }
}

impl<T> Monoid for Vec<T> {
    fn empty() -> Self {
        Self::new()
    }
}

impl<T: Semigroup> Monoid for Option<T> {
    fn empty() -> Self {
        None
    }
}

impl Monoid for () {
    fn empty() -> Self {}
}

impl<A: Add<Output = A> + Default> Monoid for Sum<A> {
    fn empty() -> Self {
        Self(A::default())
    }
}

macro_rules! impl_product_monoid {
    ($($numeric:ty => $one:expr),* $(,)?) => {
        $(
            impl Monoid for Product<$numeric> {
                fn empty() -> Self {
                    Self($one)
                }
            }
        )*
    };
}

impl_product_monoid!(
    i32 => 1,
    i64 => 1,
    u32 => 1,
    u64 => 1,
    usize => 1,
    f64 => 1.0,
);

impl<A: Monoid, B: Monoid> Monoid for (A, B) {
    fn empty() -> Self {
        (A::empty(), B::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn vec_identity_laws() {
        let value = vec![1, 2, 3];
        assert_eq!(Vec::empty().combine(value.clone()), value);
        assert_eq!(value.clone().combine(Vec::empty()), value);
    }

    #[rstest]
    fn sum_combine_all() {
        assert_eq!(Sum::combine_all(vec![Sum(1), Sum(2), Sum(3)]), Sum(6));
        assert_eq!(Sum::<i32>::combine_all(Vec::new()), Sum(0));
    }

    #[rstest]
    fn product_identity_is_one() {
        assert_eq!(Product::<i64>::empty(), Product(1));
        assert_eq!(Product(7_i64).combine(Product::empty()), Product(7));
    }

    #[rstest]
    fn pair_empty_is_componentwise() {
        let empty: (String, Vec<u8>) = Monoid::empty();
        assert_eq!(empty, (String::new(), Vec::new()));
    }
}
