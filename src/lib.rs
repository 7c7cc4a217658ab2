//! # lambars-error
//!
//! A composable error-handling capability for Rust, in the style of
//! `MonadError` from Haskell's mtl.
//!
//! ## Overview
//!
//! - **Type Classes**: higher-kinded type emulation, Functor, Monad,
//!   Semigroup, Monoid, and the Identity monad
//! - **Error Capability**: [`MonadError`](effect::MonadError) with
//!   `throw_error` and `catch_error`, plus `lift_either` and `try_error`
//! - **Instances**: `Option`, `Result`, [`IO`](effect::IO), `ExceptT`
//! - **Transformers**: identity, list, optional, reader, state, writer and
//!   reader/writer/state transformers, in lazy and strict variants, each
//!   inheriting the error capability of the kind it wraps
//!
//! ## Feature Flags
//!
//! - `typeclass`: Type class traits (Functor, Monad, etc.)
//! - `effect`: `MonadError`, `IO`, `ExceptT`
//! - `transformers`: The lifting transformers
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lambars_error::prelude::*;
//!
//! type Checked = ExceptTKind<String, IdentityKind>;
//!
//! let failing = Checked::then(Checked::pure(1), || {
//!     Checked::throw_error::<usize>("boom".to_string())
//! });
//! let recovered = Checked::catch_error(failing, |error| Checked::pure(error.len()));
//! assert_eq!(recovered.run(), Identity(Ok(4)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use lambars_error::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "typeclass")]
    pub use crate::typeclass::*;

    #[cfg(feature = "effect")]
    pub use crate::effect::*;
}

#[cfg(feature = "typeclass")]
pub mod typeclass;

#[cfg(feature = "effect")]
pub mod effect;
