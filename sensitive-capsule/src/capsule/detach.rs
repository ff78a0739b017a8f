//! Application layer: splitting a record into an insensitive copy and a
//! capsule, and recovering the original.
//!
//! ## Value vs reference sources
//!
//! | Source | Insensitive result | Caller's variable after `detach` |
//! |--------|--------------------|----------------------------------|
//! | `record` | the moved record, zeroed | moved (clones made earlier are untouched) |
//! | `&mut record` | the same reference | sensitive fields zeroed in place |
//!
//! In both cases the capsule owns a fresh clone taken before any field is
//! zeroed, so nothing the caller does afterwards can reach it.

use std::{any::type_name, fmt};

use super::record::{Record, Shape};
use crate::error::{Error, Rejected};

// =============================================================================
// Source - what detach accepts
// =============================================================================

/// A value [`detach`] can split: a record by value, or `&mut` to one.
///
/// `#[derive(Sensitive)]` implements this for `T` and `&mut T`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be detached",
    label = "expected a record or a mutable reference to one",
    note = "add `#[derive(Clone, Sensitive)]` to the struct definition"
)]
pub trait Source: Sized {
    /// The record type the source gives access to.
    type Record: Record;

    /// Returns the record whose sensitive fields `detach` zeroes.
    fn record_mut(&mut self) -> &mut Self::Record;
}

// =============================================================================
// Capsule - opaque holder of the original record
// =============================================================================

/// Holds the original, unredacted record produced by [`detach`].
///
/// A capsule has no accessors. The only way to get the record back is
/// [`attach`], and its `Debug` output names the type without the contents.
#[derive(Clone)]
pub struct Capsule<T> {
    original: T,
}

impl<T> Capsule<T> {
    fn seal(original: T) -> Self {
        Self { original }
    }

    fn open(self) -> T {
        self.original
    }
}

impl<T> fmt::Debug for Capsule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capsule")
            .field("record", &type_name::<T>())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Entrypoints
// =============================================================================

/// Splits `source` into an insensitive copy and a capsule of the original.
///
/// Every field for which [`crate::FieldDescriptor::is_sensitive`] holds is
/// reset to its zero value in the returned copy. The capsule is a clone taken
/// before zeroing.
///
/// Passing `&mut record` zeroes the referent in place and returns the same
/// reference.
///
/// # Errors
///
/// Returns [`Rejected`] carrying [`Error::UnsupportedType`] if the record
/// type is not a struct. Nothing is mutated in that case, and
/// [`Rejected::into_source`] gives the source back.
pub fn detach<S: Source>(mut source: S) -> Result<(S, Capsule<S::Record>), Rejected<S>> {
    let shape = <S::Record as Record>::SHAPE;
    if shape != Shape::Struct {
        let error = Error::UnsupportedType {
            type_name: type_name::<S::Record>(),
            shape,
        };
        return Err(Rejected::new(source, error));
    }

    let record = source.record_mut();
    let capsule = Capsule::seal(record.clone());
    record.zero_sensitive();

    Ok((source, capsule))
}

/// Recovers the record captured by [`detach`].
///
/// `current` is accepted so the call mirrors `detach`, but it is ignored:
/// the result is exactly the snapshot in the capsule. Changes made to the
/// insensitive copy between the two calls, sensitive or not, are discarded.
///
/// Attaching a capsule to the wrong record type does not compile:
///
/// ```compile_fail
/// use sensitive_capsule::{attach, detach, Sensitive};
///
/// #[derive(Clone, Sensitive)]
/// # #[cfg_attr(feature = "slog", derive(serde::Serialize))]
/// pub struct User {
///     #[sensitive = "true"]
///     pub password: String,
/// }
///
/// #[derive(Clone, Sensitive)]
/// # #[cfg_attr(feature = "slog", derive(serde::Serialize))]
/// pub struct Account {
///     #[sensitive = "true"]
///     pub token: String,
/// }
///
/// let (_, capsule) = detach(User { password: "secret".into() }).unwrap();
/// let account = Account { token: String::new() };
/// let _ = attach(account, capsule);
/// ```
pub fn attach<S: Source>(_current: S, capsule: Capsule<S::Record>) -> S::Record {
    capsule.open()
}
