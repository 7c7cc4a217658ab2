//! Monad type class - sequencing computations within a context.
//!
//! # Laws
//!
//! ## Left Identity Law
//!
//! ```text
//! flat_map(pure(a), f) == f(a)
//! ```
//!
//! ## Right Identity Law
//!
//! ```text
//! flat_map(m, pure) == m
//! ```
//!
//! ## Associativity Law
//!
//! ```text
//! flat_map(flat_map(m, f), g) == flat_map(m, |x| flat_map(f(x), g))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use lambars_error::typeclass::{Monad, OptionKind};
//!
//! fn parse_positive(text: &str) -> Option<i32> {
//!     text.parse::<i32>().ok().filter(|&n| n > 0)
//! }
//!
//! let result = OptionKind::flat_map(Some("42"), parse_positive);
//! assert_eq!(result, Some(42));
//! ```

use super::{Functor, Identity, IdentityKind, OptionKind, ResultKind};

/// A type class for kinds that support sequencing of computations.
///
/// Continuations are `Fn + 'static`: transformers store them inside boxed
/// closures, and a branching inner computation may resume them repeatedly.
pub trait Monad: Functor {
    /// Lifts a plain value into a computation that produces it.
    fn pure<A>(value: A) -> Self::WithType<A>
    where
        A: Clone + 'static;

    /// Runs `computation` and feeds its value to `function`.
    ///
    /// In Haskell, this is `>>=` (bind).
    fn flat_map<A, B, F>(computation: Self::WithType<A>, function: F) -> Self::WithType<B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> Self::WithType<B> + 'static;

    /// Sequences two computations, discarding the first value.
    ///
    /// The second computation is built on demand by `next`, so it is never
    /// constructed when the first one fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lambars_error::typeclass::{Monad, ResultKind};
    ///
    /// let chained = ResultKind::<String>::then(Ok(1), || Ok::<_, String>("next"));
    /// assert_eq!(chained, Ok("next"));
    /// ```
    fn then<A, B, F>(first: Self::WithType<A>, next: F) -> Self::WithType<B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn() -> Self::WithType<B> + 'static,
    {
        Self::flat_map(first, move |_: A| next())
    }
}

impl Monad for OptionKind {
    fn pure<A>(value: A) -> Option<A>
    where
        A: Clone + 'static,
    {
        Some(value)
    }

    fn flat_map<A, B, F>(computation: Option<A>, function: F) -> Option<B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> Option<B> + 'static,
    {
        computation.and_then(function)
    }
}

impl<E: 'static> Monad for ResultKind<E> {
    fn pure<A>(value: A) -> Result<A, E>
    where
        A: Clone + 'static,
    {
        Ok(value)
    }

    fn flat_map<A, B, F>(computation: Result<A, E>, function: F) -> Result<B, E>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> Result<B, E> + 'static,
    {
        computation.and_then(function)
    }
}

impl Monad for IdentityKind {
    fn pure<A>(value: A) -> Identity<A>
    where
        A: Clone + 'static,
    {
        Identity(value)
    }

    fn flat_map<A, B, F>(computation: Identity<A>, function: F) -> Identity<B>
    where
        A: Clone + 'static,
        B: Clone + 'static,
        F: Fn(A) -> Identity<B> + 'static,
    {
        function(computation.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn half(value: i32) -> Option<i32> {
        if value % 2 == 0 { Some(value / 2) } else { None }
    }

    #[rstest]
    #[case(8)]
    #[case(3)]
    fn option_left_identity(#[case] value: i32) {
        assert_eq!(OptionKind::flat_map(OptionKind::pure(value), half), half(value));
    }

    #[rstest]
    #[case(Some(4))]
    #[case(None)]
    fn option_right_identity(#[case] computation: Option<i32>) {
        assert_eq!(
            OptionKind::flat_map(computation, OptionKind::pure::<i32>),
            computation
        );
    }

    #[rstest]
    fn option_associativity() {
        let left = OptionKind::flat_map(OptionKind::flat_map(Some(16), half), half);
        let right = OptionKind::flat_map(Some(16), |x| OptionKind::flat_map(half(x), half));
        assert_eq!(left, right);
        assert_eq!(left, Some(4));
    }

    #[rstest]
    fn result_flat_map_short_circuits_on_err() {
        let failed: Result<i32, &str> = Err("stop");
        let chained = ResultKind::<&str>::flat_map(failed, |x: i32| Ok(x + 1));
        assert_eq!(chained, Err("stop"));
    }

    #[rstest]
    fn identity_then_discards_first() {
        let chained = IdentityKind::then(Identity(1), || Identity("second"));
        assert_eq!(chained, Identity("second"));
    }
}
