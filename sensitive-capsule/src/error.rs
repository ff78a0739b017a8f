//! Error types for detaching records.

use std::fmt;

use thiserror::Error;

use crate::capsule::Shape;

/// Result type for capsule operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why [`crate::detach`] rejected a source.
///
/// There is no "type mismatch" variant: a [`crate::Capsule<T>`] can only be
/// attached where a `T` is expected, and the compiler enforces that.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The value is not a struct-like record, so there are no fields to detach.
    ///
    /// Nothing was mutated when this is returned.
    #[error("cannot detach `{type_name}`: expected a struct, found {shape}")]
    UnsupportedType {
        /// Fully qualified name of the rejected type.
        type_name: &'static str,
        /// Shape the rejected type reported.
        shape: Shape,
    },
}

/// A failed [`crate::detach`]: the reason, plus the source handed back
/// untouched.
///
/// `Debug` and `Display` show only the [`Error`], never the source.
#[derive(Error)]
#[error("{error}")]
pub struct Rejected<S> {
    input: S,
    error: Error,
}

impl<S> Rejected<S> {
    pub(crate) fn new(input: S, error: Error) -> Self {
        Self { input, error }
    }

    /// Why the source was rejected.
    pub fn error(&self) -> Error {
        self.error
    }

    /// Returns the source exactly as it was passed to `detach`.
    pub fn into_source(self) -> S {
        self.input
    }

    pub fn into_parts(self) -> (S, Error) {
        (self.input, self.error)
    }
}

impl<S> fmt::Debug for Rejected<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<S> From<Rejected<S>> for Error {
    fn from(rejected: Rejected<S>) -> Self {
        rejected.error
    }
}
