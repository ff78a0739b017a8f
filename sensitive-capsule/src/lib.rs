//! Reversible redaction for structured records.
//!
//! [`detach`] takes a record and returns two things:
//! - an **insensitive copy**, with every field annotated `#[sensitive = "true"]`
//!   reset to its zero value, safe to log, serialize or hand around;
//! - a [`Capsule`] holding the untouched original.
//!
//! [`attach`] later turns the capsule back into the original record.
//!
//! ```rust
//! use sensitive_capsule::{attach, detach, Sensitive};
//!
//! #[derive(Clone, Sensitive)]
//! # #[cfg_attr(feature = "slog", derive(serde::Serialize))]
//! pub struct Login {
//!     pub username: String,
//!     #[sensitive = "true"]
//!     pub password: String,
//! }
//!
//! let login = Login {
//!     username: "ada".to_string(),
//!     password: "hunter2".to_string(),
//! };
//!
//! let (insensitive, capsule) = detach(login)?;
//! assert_eq!(insensitive.username, "ada");
//! assert_eq!(insensitive.password, "");
//!
//! let restored = attach(insensitive, capsule);
//! assert_eq!(restored.password, "hunter2");
//! # Ok::<(), sensitive_capsule::Error>(())
//! ```
//!
//! Key rules:
//! - Only top-level `pub` fields annotated with exactly `"true"` are zeroed.
//!   Private and `pub(crate)` fields pass through even when annotated.
//! - The zero value is `Default::default()`: `0`, `""`, `None`, and empty,
//!   unallocated collections.
//! - Passing `&mut record` zeroes the referent in place; passing a value
//!   leaves every other copy of it alone. Either way the capsule owns its own
//!   clone.
//! - `attach` ignores its first argument and always returns the snapshot taken
//!   by `detach`. Edits made to the insensitive copy in between are discarded.
//!
//! Shapes that cannot be detached are rejected where possible at compile time.
//! Enums are not records:
//!
//! ```compile_fail
//! use sensitive_capsule::Sensitive;
//!
//! #[derive(Clone, Sensitive)]
//! # #[cfg_attr(feature = "slog", derive(serde::Serialize))]
//! pub enum Credential {
//!     Password(String),
//! }
//! ```
//!
//! A sensitive field needs a zero value, i.e. a `Default` impl:
//!
//! ```compile_fail
//! use sensitive_capsule::Sensitive;
//!
//! #[derive(Clone)]
//! # #[cfg_attr(feature = "slog", derive(serde::Serialize))]
//! pub struct Handle(u32);
//!
//! #[derive(Clone, Sensitive)]
//! # #[cfg_attr(feature = "slog", derive(serde::Serialize))]
//! pub struct Session {
//!     #[sensitive = "true"]
//!     pub handle: Handle,
//! }
//! ```
//!
//! The annotation must carry a string value:
//!
//! ```compile_fail
//! use sensitive_capsule::Sensitive;
//!
//! #[derive(Clone, Sensitive)]
//! # #[cfg_attr(feature = "slog", derive(serde::Serialize))]
//! pub struct Login {
//!     #[sensitive = true]
//!     pub password: String,
//! }
//! ```
//!
//! Scalars and collections still go through [`detach`], but only to be turned
//! away at run time with [`Error::UnsupportedType`]. The rejection hands the
//! source back:
//!
//! ```rust
//! use sensitive_capsule::{detach, Error, Shape};
//!
//! let mut count = 3_u32;
//! let rejected = detach(&mut count).unwrap_err();
//! assert!(matches!(rejected.error(), Error::UnsupportedType { shape: Shape::Scalar, .. }));
//! assert_eq!(*rejected.into_source(), 3);
//! assert_eq!(count, 3);
//! ```
//!
//! What this crate does not do:
//! - walk into nested structs, slices or maps
//! - encrypt, serialize or transport capsules
//! - perform I/O or logging on its own (see the `slog` feature for a consumer
//!   side adapter)
//!
//! The `Sensitive` derive macro lives in `sensitive-capsule-derive` and is
//! re-exported here.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use sensitive_capsule_derive::Sensitive;

// Generated code names this crate as `::sensitive_capsule`, including when the
// derive is used inside the crate's own unit tests.
#[allow(unused_extern_crates)]
extern crate self as sensitive_capsule;

mod capsule;
mod error;
#[cfg(feature = "slog")]
pub mod slog;

pub use capsule::{
    attach, detach, Capsule, FieldDescriptor, FieldVisibility, Record, SensitiveFields, Shape,
    Source,
};
#[doc(hidden)]
pub use capsule::zero_field;
pub use error::{Error, Rejected, Result};
