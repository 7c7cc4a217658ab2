//! Error handling across computation types and transformer stacks.
//!
//! # The Capability
//!
//! [`MonadError`] lets a computation throw an error and lets a caller catch
//! it. Its error type is an associated type, so a computation kind has
//! exactly one error type. [`lift_either`], [`try_error`], and [`map_error`]
//! are built on the two primitives.
//!
//! # Instances
//!
//! - Base: [`IOKind`] (errors travel by unwinding) and `OptionKind`
//!   (error `()`).
//! - Primary: `ResultKind` and [`ExceptTKind`].
//! - Lifting (feature `transformers`): every transformer over a kind with
//!   the capability has it too. [`MonadTrans::lift`] carries `throw_error`
//!   and [`LiftCatch::lift_catch`] carries `catch_error`.
//!
//! | transformer | handler sees |
//! |---|---|
//! | [`IdentityT`], [`MaybeT`], [`ListT`] | nothing extra |
//! | [`ReaderT`] | the same environment |
//! | [`StateT`] | the state at catch entry |
//! | [`StrictStateT`] | the state at the throw point |
//! | [`WriterT`] | output of the failed block discarded |
//! | [`StrictWriterT`] | output of the failed block kept |
//! | [`RWST`] | environment, entry state, failed output discarded |
//! | [`StrictRWST`] | environment, throw-point state, failed output kept |
//!
//! # Examples
//!
//! ```rust
//! use lambars_error::effect::{ExceptTKind, MonadError, try_error};
//! use lambars_error::typeclass::{Identity, IdentityKind, Monad};
//!
//! type Checked = ExceptTKind<String, IdentityKind>;
//!
//! let failing = Checked::then(Checked::pure(1), || Checked::throw_error::<i32>("boom".to_string()));
//! let outcome = try_error::<Checked, i32>(failing);
//! assert_eq!(outcome.run(), Identity(Ok(Err("boom".to_string()))));
//! ```

// =============================================================================
// Capability
// =============================================================================

mod error_value;
mod monad_error;

pub use error_value::ErrorValue;
pub use monad_error::{MonadError, lift_either, map_error, try_error};

// =============================================================================
// IO Monad
// =============================================================================

mod io;

pub use io::{IO, IOKind};

// =============================================================================
// Lifting Machinery
// =============================================================================

mod monad_trans;

pub use monad_trans::{CatchHandler, InnerOf, LiftCatch, MonadTrans};

// =============================================================================
// Monad Transformers
// =============================================================================

mod except_transformer;

pub use except_transformer::{ExceptT, ExceptTKind};

#[cfg(feature = "transformers")]
mod identity_transformer;
#[cfg(feature = "transformers")]
mod list_transformer;
#[cfg(feature = "transformers")]
mod maybe_transformer;
#[cfg(feature = "transformers")]
mod reader_transformer;
#[cfg(feature = "transformers")]
mod rws_transformer;
#[cfg(feature = "transformers")]
mod state_transformer;
#[cfg(feature = "transformers")]
mod strict_rws_transformer;
#[cfg(feature = "transformers")]
mod strict_state_transformer;
#[cfg(feature = "transformers")]
mod strict_writer_transformer;
#[cfg(feature = "transformers")]
mod writer_transformer;

#[cfg(feature = "transformers")]
pub use identity_transformer::{IdentityT, IdentityTKind};
#[cfg(feature = "transformers")]
pub use list_transformer::{ListT, ListTKind};
#[cfg(feature = "transformers")]
pub use maybe_transformer::{MaybeT, MaybeTKind};
#[cfg(feature = "transformers")]
pub use reader_transformer::{ReaderT, ReaderTKind};
#[cfg(feature = "transformers")]
pub use rws_transformer::{RWST, RWSTKind};
#[cfg(feature = "transformers")]
pub use state_transformer::{StateT, StateTKind};
#[cfg(feature = "transformers")]
pub use strict_rws_transformer::{StrictRWST, StrictRWSTKind};
#[cfg(feature = "transformers")]
pub use strict_state_transformer::{StrictStateT, StrictStateTKind};
#[cfg(feature = "transformers")]
pub use strict_writer_transformer::{StrictWriterT, StrictWriterTKind};
#[cfg(feature = "transformers")]
pub use writer_transformer::{WriterT, WriterTKind};
