//! Struct-specific `Record` derivation.
//!
//! This module generates the zeroing body, the field descriptors and the
//! `Debug` bodies for named, tuple and unit structs.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::{spanned::Spanned, DataStruct, Fields, Member, Result};

use crate::{
    classify::FieldClass,
    transform::{generate_field_parts, DeriveContext},
};

pub(crate) struct StructDeriveOutput {
    pub(crate) zero_body: TokenStream,
    pub(crate) descriptors: Vec<TokenStream>,
    pub(crate) sensitive_types: Vec<syn::Type>,
    pub(crate) debug_redacted_body: TokenStream,
    pub(crate) debug_redacted_generics: Vec<Ident>,
    pub(crate) debug_unredacted_body: TokenStream,
    pub(crate) debug_unredacted_generics: Vec<Ident>,
}

pub(crate) fn derive_struct(
    name: &Ident,
    data: DataStruct,
    generics: &syn::Generics,
    crate_root: &TokenStream,
) -> Result<StructDeriveOutput> {
    let mut sensitive_types = Vec::new();
    let mut debug_redacted_generics = Vec::new();
    let mut debug_unredacted_generics = Vec::new();
    let mut ctx = DeriveContext {
        generics,
        crate_root,
        sensitive_types: &mut sensitive_types,
        debug_redacted_generics: &mut debug_redacted_generics,
        debug_unredacted_generics: &mut debug_unredacted_generics,
    };

    let named = matches!(data.fields, Fields::Named(_));
    let mut patterns = Vec::new();
    let mut zeroes = Vec::new();
    let mut descriptors = Vec::new();
    let mut debug_redacted_fields = Vec::new();
    let mut debug_unredacted_fields = Vec::new();

    for (index, field) in data.fields.iter().enumerate() {
        let span = field.span();
        // Bindings are prefixed so field names like `f` or `debug` cannot
        // shadow the formatter or the builder.
        let (member, binding, label) = match &field.ident {
            Some(ident) => (
                Member::Named(ident.clone()),
                format_ident!("__field_{}", ident),
                quote! { stringify!(#ident) },
            ),
            None => (
                Member::from(index),
                format_ident!("__field_{}", index),
                TokenStream::new(),
            ),
        };
        let parts = generate_field_parts(&mut ctx, field, &member, span)?;

        let shown = match parts.class {
            FieldClass::Sensitive => quote! { &"[REDACTED]" },
            FieldClass::PassThrough => quote! { #binding },
        };
        if named {
            debug_redacted_fields.push(quote_spanned! { span =>
                debug.field(#label, #shown);
            });
            debug_unredacted_fields.push(quote_spanned! { span =>
                debug.field(#label, #binding);
            });
        } else {
            debug_redacted_fields.push(quote_spanned! { span =>
                debug.field(#shown);
            });
            debug_unredacted_fields.push(quote_spanned! { span =>
                debug.field(#binding);
            });
        }

        patterns.push(if named {
            quote! { #member: #binding }
        } else {
            quote! { #binding }
        });
        zeroes.push(parts.zero);
        descriptors.push(parts.descriptor);
    }

    let debug_body = |fields: &[TokenStream]| match &data.fields {
        Fields::Named(_) => quote! {
            match self {
                Self { #(#patterns),* } => {
                    let mut debug = f.debug_struct(stringify!(#name));
                    #(#fields)*
                    debug.finish()
                }
            }
        },
        Fields::Unnamed(_) => quote! {
            match self {
                Self ( #(#patterns),* ) => {
                    let mut debug = f.debug_tuple(stringify!(#name));
                    #(#fields)*
                    debug.finish()
                }
            }
        },
        Fields::Unit => quote! {
            f.write_str(stringify!(#name))
        },
    };
    let debug_redacted_body = debug_body(&debug_redacted_fields);
    let debug_unredacted_body = debug_body(&debug_unredacted_fields);

    Ok(StructDeriveOutput {
        zero_body: quote! { #(#zeroes)* },
        descriptors,
        sensitive_types,
        debug_redacted_body,
        debug_redacted_generics,
        debug_unredacted_body,
        debug_unredacted_generics,
    })
}
