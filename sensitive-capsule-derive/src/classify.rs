//! Parsing of `#[sensitive = "..."]` field attributes and field classification.
//!
//! A field is sensitive iff it is declared plain `pub` and its annotation is
//! the string literal `"true"`. Everything else passes through `detach`
//! unchanged. Malformed annotations are compile errors.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, Expr, ExprLit, Lit, LitStr, Meta, Result, Visibility};

/// Annotation value that marks a field as sensitive.
const SENSITIVE_MARKER: &str = "true";

/// The parsed `#[sensitive = "..."]` annotation of a single field.
#[derive(Clone, Debug)]
pub(crate) enum Annotation {
    /// No `#[sensitive]` attribute on the field.
    Absent,
    /// `#[sensitive = "value"]`, with the literal as written.
    Value(LitStr),
}

impl Annotation {
    pub(crate) fn value(&self) -> Option<String> {
        match self {
            Self::Absent => None,
            Self::Value(lit) => Some(lit.value()),
        }
    }
}

/// Outcome of classifying one field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FieldClass {
    /// Zeroed by `detach`.
    Sensitive,
    /// Left as is.
    PassThrough,
}

fn set_annotation(target: &mut Option<Annotation>, next: Annotation, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple #[sensitive] attributes specified on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_annotation(attrs: &[Attribute]) -> Result<Annotation> {
    let mut annotation: Option<Annotation> = None;
    for attr in attrs {
        if !attr.path().is_ident("sensitive") {
            continue;
        }

        match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) => {
                    set_annotation(&mut annotation, Annotation::Value(lit.clone()), attr.span())?;
                }
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "#[sensitive] expects a string literal (e.g., #[sensitive = \"true\"])",
                    ));
                }
            },
            Meta::Path(_) | Meta::List(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected #[sensitive = \"true\"] on a field",
                ));
            }
        }
    }

    Ok(annotation.unwrap_or(Annotation::Absent))
}

/// Plain `pub` is the only visibility `detach` may write through.
pub(crate) fn is_exported(vis: &Visibility) -> bool {
    matches!(vis, Visibility::Public(_))
}

pub(crate) fn classify_field(vis: &Visibility, annotation: &Annotation) -> FieldClass {
    let marked = annotation.value().as_deref() == Some(SENSITIVE_MARKER);
    if marked && is_exported(vis) {
        FieldClass::Sensitive
    } else {
        FieldClass::PassThrough
    }
}
