//! Type class traits for functional programming abstractions.
//!
//! - [`TypeConstructor`]: Higher-kinded type emulation through kinds
//! - [`Functor`]: Mapping over the value of a computation
//! - [`Monad`]: Sequencing computations with dependency
//! - [`Semigroup`] / [`Monoid`]: Accumulating writer output
//!
//! ## Higher-Kinded Types Emulation
//!
//! Rust does not have native support for higher-kinded types (HKT). Each
//! computation type is represented by a zero-sized *kind* whose generic
//! associated type `WithType<A>` names the computation producing `A`. The
//! type classes are implemented on kinds, so generic code is written as
//! `M::flat_map(computation, function)` for any `M: Monad`.
//!
//! # Examples
//!
//! ```rust
//! use lambars_error::typeclass::{Functor, Monad, ResultKind};
//!
//! type Parse = ResultKind<String>;
//!
//! let doubled = Parse::fmap(Parse::pure(21), |x: i32| x * 2);
//! assert_eq!(doubled, Ok(42));
//! ```

mod functor;
mod higher;
mod identity;
mod monad;
mod monoid;
mod semigroup;
mod wrappers;

pub use functor::Functor;
pub use higher::{OptionKind, ResultKind, TypeConstructor};
pub use identity::{Identity, IdentityKind};
pub use monad::Monad;
pub use monoid::Monoid;
pub use semigroup::Semigroup;
pub use wrappers::{Product, Sum};
