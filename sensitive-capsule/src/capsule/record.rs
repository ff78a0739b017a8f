//! Domain layer: records and their field metadata.
//!
//! A [`Record`] is a struct-like type whose top-level fields can be inspected
//! and selectively zeroed. `#[derive(Sensitive)]` implements it for structs.
//!
//! ## Field Handling
//!
//! | Declaration | Exported | Annotation | Zeroed by `detach` |
//! |-------------|----------|------------|--------------------|
//! | `pub password: String` with `#[sensitive = "true"]` | yes | `"true"` | yes |
//! | `pub username: String` | yes | none | no |
//! | `pub hint: String` with `#[sensitive = "True"]` | yes | `"True"` | no |
//! | `password: String` with `#[sensitive = "true"]` | no | `"true"` | no |
//!
//! ## Non-struct types
//!
//! Scalars, strings, and std collections also implement [`Record`] so they can
//! be handed to `detach`, but they report a non-[`Shape::Struct`] shape and
//! are rejected with [`crate::Error::UnsupportedType`].

use std::{
    collections::{BTreeMap, HashMap},
    fmt, iter, slice,
};

use super::detach::Source;

/// Annotation value that marks a field as sensitive.
const SENSITIVE_MARKER: &str = "true";

/// Iterator returned by [`Record::sensitive_fields`].
pub type SensitiveFields =
    iter::Filter<slice::Iter<'static, FieldDescriptor>, fn(&&'static FieldDescriptor) -> bool>;

// =============================================================================
// FieldDescriptor - per-field metadata
// =============================================================================

/// Whether a field can be reached by the detach machinery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldVisibility {
    /// Declared plain `pub`.
    Exported,
    /// Inherited or restricted (`pub(crate)`, `pub(super)`, `pub(in ..)`).
    Private,
}

/// Compile-time metadata for one top-level field of a [`Record`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    /// Field name, or its index for tuple structs.
    pub name: &'static str,
    /// Declared type as written in the struct definition.
    pub type_name: &'static str,
    /// Whether the field is exported.
    pub visibility: FieldVisibility,
    /// Value of the `#[sensitive = "..."]` annotation, if any.
    pub annotation: Option<&'static str>,
}

impl FieldDescriptor {
    #[must_use]
    pub const fn new(
        name: &'static str,
        type_name: &'static str,
        visibility: FieldVisibility,
        annotation: Option<&'static str>,
    ) -> Self {
        Self {
            name,
            type_name,
            visibility,
            annotation,
        }
    }

    pub fn is_exported(&self) -> bool {
        self.visibility == FieldVisibility::Exported
    }

    /// Returns `true` if `detach` zeroes this field.
    ///
    /// The field must be exported and annotated with exactly `"true"`.
    /// `"True"`, `"1"` and `"false"` all classify as not sensitive.
    pub fn is_sensitive(&self) -> bool {
        self.is_exported() && self.annotation == Some(SENSITIVE_MARKER)
    }
}

// =============================================================================
// Shape - what kind of value a Record is
// =============================================================================

/// Coarse shape of a [`Record`] type. Only [`Shape::Struct`] can be detached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Named, tuple, or unit struct.
    Struct,
    /// Number, `bool`, or `char`.
    Scalar,
    /// `String`.
    Text,
    /// `Vec<T>`.
    Sequence,
    /// `HashMap` or `BTreeMap`.
    Map,
    /// `Option<T>`.
    Optional,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Struct => "a struct",
            Self::Scalar => "a scalar",
            Self::Text => "text",
            Self::Sequence => "a sequence",
            Self::Map => "a map",
            Self::Optional => "an optional value",
        })
    }
}

// =============================================================================
// Record - struct-like types with zeroable fields
// =============================================================================

/// A struct-like type whose sensitive fields can be zeroed.
///
/// Implemented by `#[derive(Sensitive)]`; there is rarely a reason to
/// implement it by hand. `Clone` is required because the capsule keeps its own
/// copy of the record.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a detachable record",
    label = "this type cannot be detached",
    note = "add `#[derive(Clone, Sensitive)]` to the struct definition"
)]
pub trait Record: Clone {
    /// Shape of the type. `detach` rejects anything but [`Shape::Struct`].
    const SHAPE: Shape;

    /// Every top-level field, in declaration order.
    const FIELDS: &'static [FieldDescriptor];

    /// Resets every sensitive field to its zero value.
    ///
    /// Fields for which [`FieldDescriptor::is_sensitive`] is `false` are left
    /// untouched.
    fn zero_sensitive(&mut self);

    /// Iterates over the fields that `zero_sensitive` resets.
    fn sensitive_fields() -> SensitiveFields {
        let is_sensitive: fn(&&'static FieldDescriptor) -> bool = |field| field.is_sensitive();
        Self::FIELDS.iter().filter(is_sensitive)
    }
}

/// Resets a field to its zero value. Called from derived `zero_sensitive`.
///
/// Assigning a fresh default drops the old value, so collections are released
/// rather than cleared in place.
#[doc(hidden)]
pub fn zero_field<T: Default>(field: &mut T) {
    *field = T::default();
}

// =============================================================================
// Record implementations for non-struct standard library types
// =============================================================================

macro_rules! impl_unsupported_record {
    ([$($gen:tt)*] $shape:expr => $ty:ty) => {
        impl<$($gen)*> Record for $ty {
            const SHAPE: Shape = $shape;
            const FIELDS: &'static [FieldDescriptor] = &[];

            fn zero_sensitive(&mut self) {}
        }

        impl<$($gen)*> Source for $ty {
            type Record = Self;

            fn record_mut(&mut self) -> &mut Self::Record {
                self
            }
        }

        impl<'capsule, $($gen)*> Source for &'capsule mut $ty {
            type Record = $ty;

            fn record_mut(&mut self) -> &mut Self::Record {
                &mut **self
            }
        }
    };
    ($shape:expr => $($ty:ty),+ $(,)?) => {
        $(impl_unsupported_record!([] $shape => $ty);)+
    };
}

impl_unsupported_record!(
    Shape::Scalar => bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
    f32, f64,
);
impl_unsupported_record!(Shape::Text => String);
impl_unsupported_record!([T: Clone] Shape::Sequence => Vec<T>);
impl_unsupported_record!([T: Clone] Shape::Optional => Option<T>);
impl_unsupported_record!([K: Clone, V: Clone, S: Clone] Shape::Map => HashMap<K, V, S>);
impl_unsupported_record!([K: Clone, V: Clone] Shape::Map => BTreeMap<K, V>);

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(visibility: FieldVisibility, annotation: Option<&'static str>) -> FieldDescriptor {
        FieldDescriptor::new("password", "String", visibility, annotation)
    }

    #[test]
    fn exported_true_is_sensitive() {
        assert!(descriptor(FieldVisibility::Exported, Some("true")).is_sensitive());
    }

    #[test]
    fn missing_annotation_is_not_sensitive() {
        assert!(!descriptor(FieldVisibility::Exported, None).is_sensitive());
    }

    #[test]
    fn explicit_false_matches_missing_annotation() {
        assert_eq!(
            descriptor(FieldVisibility::Exported, Some("false")).is_sensitive(),
            descriptor(FieldVisibility::Exported, None).is_sensitive()
        );
    }

    #[test]
    fn annotation_match_is_exact() {
        for value in ["True", "TRUE", "1", "yes", " true", "true ", ""] {
            assert!(
                !descriptor(FieldVisibility::Exported, Some(value)).is_sensitive(),
                "{value:?} should not classify as sensitive"
            );
        }
    }

    #[test]
    fn private_field_is_never_sensitive() {
        assert!(!descriptor(FieldVisibility::Private, Some("true")).is_sensitive());
    }

    #[test]
    fn scalars_report_scalar_shape() {
        assert_eq!(<i32 as Record>::SHAPE, Shape::Scalar);
        assert_eq!(<f64 as Record>::SHAPE, Shape::Scalar);
        assert_eq!(<String as Record>::SHAPE, Shape::Text);
        assert_eq!(<Vec<u8> as Record>::SHAPE, Shape::Sequence);
        assert_eq!(<Option<String> as Record>::SHAPE, Shape::Optional);
        assert_eq!(<HashMap<String, i32> as Record>::SHAPE, Shape::Map);
        assert!(<String as Record>::FIELDS.is_empty());
    }

    #[test]
    fn zero_field_releases_collections() {
        let mut values = vec![1_u8; 64];
        zero_field(&mut values);
        assert!(values.is_empty());
        assert_eq!(values.capacity(), 0);
    }

    #[test]
    fn zero_field_resets_options_and_numbers() {
        let mut maybe = Some(Box::new("secret".to_string()));
        zero_field(&mut maybe);
        assert!(maybe.is_none());

        let mut number = -7_i64;
        zero_field(&mut number);
        assert_eq!(number, 0);
    }
}
