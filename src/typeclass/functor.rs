//! Functor type class - mapping over the value of a computation.
//!
//! # Laws
//!
//! ## Identity Law
//!
//! ```text
//! fmap(fa, |x| x) == fa
//! ```
//!
//! ## Composition Law
//!
//! ```text
//! fmap(fmap(fa, f), g) == fmap(fa, |x| g(f(x)))
//! ```

use super::{Identity, IdentityKind, OptionKind, ResultKind, TypeConstructor};

/// A type class for kinds whose computations can be mapped over.
///
/// The mapping function is `Fn` rather than `FnOnce`: a computation may
/// produce its value more than once (a list-producing wrapper does), and the
/// function is applied to each.
///
/// # Examples
///
/// ```rust
/// use lambars_error::typeclass::{Functor, OptionKind};
///
/// assert_eq!(OptionKind::fmap(Some(20), |x: i32| x + 1), Some(21));
/// ```
pub trait Functor: TypeConstructor {
    /// Applies `function` to the value produced by `computation`.
    fn fmap<A, B, F>(computation: Self::WithType<A>, function: F) -> Self::WithType<B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static;
}

impl Functor for OptionKind {
    fn fmap<A, B, F>(computation: Option<A>, function: F) -> Option<B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        computation.map(function)
    }
}

impl<E: 'static> Functor for ResultKind<E> {
    fn fmap<A, B, F>(computation: Result<A, E>, function: F) -> Result<B, E>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        computation.map(function)
    }
}

impl Functor for IdentityKind {
    fn fmap<A, B, F>(computation: Identity<A>, function: F) -> Identity<B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        Identity(function(computation.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(3), Some(6))]
    #[case(None, None)]
    fn option_fmap_doubles(#[case] input: Option<i32>, #[case] expected: Option<i32>) {
        assert_eq!(OptionKind::fmap(input, |x: i32| x * 2), expected);
    }

    #[rstest]
    fn result_fmap_leaves_error_alone() {
        let failed: Result<i32, String> = Err("nope".to_string());
        assert_eq!(
            ResultKind::<String>::fmap(failed, |x: i32| x + 1),
            Err("nope".to_string())
        );
    }

    #[rstest]
    fn identity_fmap_composition() {
        let left = IdentityKind::fmap(IdentityKind::fmap(Identity(2), |x: i32| x + 1), |x: i32| {
            x * 10
        });
        let right = IdentityKind::fmap(Identity(2), |x: i32| (x + 1) * 10);
        assert_eq!(left, right);
    }
}
