//! Higher-Kinded Type emulation through Generic Associated Types.
//!
//! Rust cannot abstract over a type constructor such as `Option<_>` directly.
//! This module works around that with *kinds*: zero-sized marker types that
//! stand for a type constructor and name its application through a generic
//! associated type.
//!
//! ```text
//! OptionKind::WithType<A>       == Option<A>
//! ResultKind<E>::WithType<A>    == Result<A, E>
//! StateTKind<S, M>::WithType<A> == StateT<S, M, A>
//! ```
//!
//! Every type class in this crate (`Functor`, `Monad`, `MonadError`, ...) is
//! implemented on the kind, not on the value type. This is what lets a monad
//! transformer be generic over its inner monad: `StateTKind<S, M>` only needs
//! `M: Monad` to build `M::WithType<(A, S)>`.
//!
//! # Example
//!
//! ```rust
//! use lambars_error::typeclass::{OptionKind, ResultKind, TypeConstructor};
//!
//! let some: <OptionKind as TypeConstructor>::WithType<i32> = Some(1);
//! let ok: <ResultKind<String> as TypeConstructor>::WithType<i32> = Ok(1);
//! assert_eq!(some, Some(1));
//! assert_eq!(ok, Ok(1));
//! ```

use std::marker::PhantomData;

/// A marker type standing for a type constructor.
///
/// # Laws
///
/// `WithType<A>` must be the same constructor for every `A`; an
/// implementation may not inspect `A` to pick a representation.
pub trait TypeConstructor: Sized + 'static {
    /// The constructor applied to `A`.
    type WithType<A: 'static>: 'static;
}

/// The kind of `Option<_>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptionKind;

impl TypeConstructor for OptionKind {
    type WithType<A: 'static> = Option<A>;
}

/// The kind of `Result<_, E>`.
///
/// The error type is part of the kind, so `ResultKind<String>` and
/// `ResultKind<i32>` are different computation types.
pub struct ResultKind<E>(PhantomData<fn() -> E>);

impl<E: 'static> TypeConstructor for ResultKind<E> {
    type WithType<A: 'static> = Result<A, E>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_kind_applies_to_option() {
        fn assert_same<T>(_: T, _: T) {}
        let applied: <OptionKind as TypeConstructor>::WithType<i32> = Some(3);
        assert_same(applied, Some(3_i32));
    }

    #[test]
    fn result_kind_preserves_error_type() {
        fn assert_result_kind<E: 'static, A: 'static>()
        where
            ResultKind<E>: TypeConstructor<WithType<A> = Result<A, E>>,
        {
        }

        assert_result_kind::<String, i32>();
        assert_result_kind::<(), Vec<u8>>();
    }

    #[test]
    fn chained_applications_stay_in_kind() {
        type Step1 = <OptionKind as TypeConstructor>::WithType<String>;
        type Step2 = <OptionKind as TypeConstructor>::WithType<Step1>;

        let nested: Step2 = Some(Some(String::from("x")));
        assert_eq!(nested.flatten().as_deref(), Some("x"));
    }
}
