//! `ErrorValue` - errors that can be built without a cause and merged.
//!
//! `ExceptT` needs more from its error type than `MonadError` does: its
//! `zero` needs an error that carries no information, its `fail` needs to
//! turn a message into an error, and its `plus` needs to combine the errors
//! of two failed alternatives.
//!
//! # Examples
//!
//! ```rust
//! use lambars_error::effect::ErrorValue;
//!
//! let merged = vec!["first".to_string()].merge(vec!["second".to_string()]);
//! assert_eq!(merged, vec!["first".to_string(), "second".to_string()]);
//! assert_eq!(String::from_message("bad input"), "bad input");
//! ```

use std::io::ErrorKind;

/// An error type with a neutral value and a merge operation.
///
/// Only the [`ExceptT`](super::ExceptT) instance of
/// [`MonadError`](super::MonadError) requires this capability.
pub trait ErrorValue: Clone + 'static {
    /// An error that carries no information.
    fn no_message() -> Self;

    /// Builds an error from a message.
    ///
    /// Defaults to [`no_message`](Self::no_message).
    fn from_message(_message: &str) -> Self {
        Self::no_message()
    }

    /// Combines the error of an earlier failure with a later one.
    ///
    /// Defaults to keeping the later error.
    #[must_use]
    fn merge(self, later: Self) -> Self {
        later
    }
}

impl ErrorValue for String {
    fn no_message() -> Self {
        Self::new()
    }

    fn from_message(message: &str) -> Self {
        message.to_owned()
    }
}

/// Keeps every message, in order of failure.
impl ErrorValue for Vec<String> {
    fn no_message() -> Self {
        Self::new()
    }

    fn from_message(message: &str) -> Self {
        vec![message.to_owned()]
    }

    fn merge(mut self, mut later: Self) -> Self {
        self.append(&mut later);
        self
    }
}

impl ErrorValue for ErrorKind {
    fn no_message() -> Self {
        Self::Other
    }
}

impl ErrorValue for () {
    fn no_message() -> Self {}
}

static_assertions::assert_impl_all!(String: ErrorValue);
static_assertions::assert_impl_all!(Vec<String>: ErrorValue);
