//! Per-field code generation shared by named and tuple structs.
//!
//! ## Field Transformation Rules
//!
//! | Field | `zero_sensitive` | `FIELDS` entry | Redacted `Debug` |
//! |-------|------------------|----------------|------------------|
//! | exported, `#[sensitive = "true"]` | `zero_field(&mut self.f)` | yes | `"[REDACTED]"` |
//! | anything else | nothing | yes | the value |

use proc_macro2::{Ident, Span, TokenStream};
use quote::{quote, quote_spanned};
use syn::{Field, Member, Result};

use crate::{
    classify::{classify_field, is_exported, parse_field_annotation, Annotation, FieldClass},
    generics::collect_generics_from_type,
    types::type_label,
};

/// Accumulated state during field processing.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    pub(crate) crate_root: &'a TokenStream,
    pub(crate) sensitive_types: &'a mut Vec<syn::Type>,
    pub(crate) debug_redacted_generics: &'a mut Vec<Ident>,
    pub(crate) debug_unredacted_generics: &'a mut Vec<Ident>,
}

/// Tokens generated for one field.
pub(crate) struct FieldParts {
    pub(crate) class: FieldClass,
    pub(crate) zero: TokenStream,
    pub(crate) descriptor: TokenStream,
}

pub(crate) fn generate_field_parts(
    ctx: &mut DeriveContext<'_>,
    field: &Field,
    member: &Member,
    span: Span,
) -> Result<FieldParts> {
    let crate_root = ctx.crate_root;
    let annotation = parse_field_annotation(&field.attrs)?;
    let class = classify_field(&field.vis, &annotation);
    let ty = &field.ty;

    collect_generics_from_type(ty, ctx.generics, ctx.debug_unredacted_generics);

    let zero = match class {
        FieldClass::Sensitive => {
            ctx.sensitive_types.push(ty.clone());
            quote_spanned! { span =>
                #crate_root::zero_field(&mut self.#member);
            }
        }
        FieldClass::PassThrough => {
            collect_generics_from_type(ty, ctx.generics, ctx.debug_redacted_generics);
            quote! {}
        }
    };

    let name = match member {
        Member::Named(ident) => ident.to_string(),
        Member::Unnamed(index) => index.index.to_string(),
    };
    let label = type_label(ty);
    let visibility = if is_exported(&field.vis) {
        quote! { #crate_root::FieldVisibility::Exported }
    } else {
        quote! { #crate_root::FieldVisibility::Private }
    };
    let annotation = match annotation {
        Annotation::Absent => quote! { ::core::option::Option::None },
        Annotation::Value(lit) => quote! { ::core::option::Option::Some(#lit) },
    };
    let descriptor = quote! {
        #crate_root::FieldDescriptor::new(#name, #label, #visibility, #annotation)
    };

    Ok(FieldParts {
        class,
        zero,
        descriptor,
    })
}
