//! Derive macros for `sensitive-capsule`.
//!
//! This crate generates the code behind `#[derive(Sensitive)]`. It:
//! - reads `#[sensitive = "..."]` field attributes and classifies each field
//! - emits `Record` and `Source` implementations that zero the sensitive fields
//! - emits a `Debug` impl that hides sensitive values
//!
//! It does **not** implement `detach` or `attach`. Those live in the main
//! `sensitive-capsule` crate.

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

#[allow(unused_extern_crates)]
extern crate proc_macro;

#[cfg(feature = "slog")]
use proc_macro2::Span;
use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, parse_quote, spanned::Spanned, Data, DeriveInput, Result};

mod classify;
mod container;
mod derive_struct;
mod generics;
mod transform;
mod types;
use container::{parse_container_options, ContainerOptions};
use derive_struct::derive_struct;
use generics::{add_clone_bound, add_debug_bounds, add_zero_value_bounds};

/// Derives `sensitive_capsule::Record` and `sensitive_capsule::Source` for a struct.
///
/// # Field Attributes
///
/// - **No annotation**: the field passes through `detach` unchanged.
///
/// - `#[sensitive = "true"]`: on a `pub` field, `detach` resets the field to
///   `Default::default()` in the insensitive copy. The field type must
///   implement `Default`. The value is compared exactly: `"True"`, `"1"` or
///   `"false"` leave the field alone. Private and `pub(crate)` fields are never
///   touched, even when annotated.
///
/// # Container Attributes
///
/// - `#[sensitive(skip_debug)]` - Opt out of `Debug` impl generation.
///
/// Enums and unions are rejected at compile time. The struct must be `Clone`.
///
/// # Additional Generated Impls
///
/// - `Debug`: when *not* building with `cfg(any(test, feature = "testing"))`,
///   sensitive fields are formatted as `"[REDACTED]"`.
/// - `slog::Value` (behind the `slog` feature): clones the value, detaches it
///   and logs only the insensitive copy as JSON. Requires `Clone` and
///   `serde::Serialize`. The slog crate is found by name, or through the
///   `SENSITIVE_CAPSULE_SLOG_CRATE` env var (e.g. `my_log::slog`).
#[proc_macro_derive(Sensitive, attributes(sensitive))]
pub fn derive_sensitive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the sensitive-capsule crate root.
///
/// Handles crate renaming (e.g., `capsule = { package = "sensitive-capsule", ... }`).
/// Inside the crate itself the path still goes through `::sensitive_capsule`,
/// which the crate provides with `extern crate self as sensitive_capsule`.
fn crate_root() -> TokenStream {
    match crate_name("sensitive-capsule") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::sensitive_capsule },
    }
}

/// Returns the token stream to reference the slog crate root.
///
/// If the top-level `slog` crate is not available, falls back to the
/// `SENSITIVE_CAPSULE_SLOG_CRATE` env var, which should be a path like `my_log::slog`.
#[cfg(feature = "slog")]
fn slog_crate() -> Result<TokenStream> {
    match crate_name("slog") {
        Ok(FoundCrate::Itself) => Ok(quote! { crate }),
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            Ok(quote! { ::#ident })
        }
        Err(_) => {
            let env_value = std::env::var("SENSITIVE_CAPSULE_SLOG_CRATE").map_err(|_| {
                syn::Error::new(
                    Span::call_site(),
                    "slog support is enabled, but no top-level `slog` crate was found. \
Set the SENSITIVE_CAPSULE_SLOG_CRATE env var to a path (e.g., `my_log::slog`) or add \
`slog` as a direct dependency.",
                )
            })?;
            let path = syn::parse_str::<syn::Path>(&env_value).map_err(|_| {
                syn::Error::new(
                    Span::call_site(),
                    format!(
                        "SENSITIVE_CAPSULE_SLOG_CRATE must be a valid Rust path (got `{env_value}`)"
                    ),
                )
            })?;
            Ok(quote! { #path })
        }
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { skip_debug } = parse_container_options(&attrs)?;

    let crate_root = crate_root();

    let data = match data {
        Data::Struct(data) => data,
        Data::Enum(e) => {
            return Err(syn::Error::new(
                e.enum_token.span(),
                "`Sensitive` can only be derived for structs; enums are not struct-like records",
            ));
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Sensitive` cannot be derived for unions",
            ));
        }
    };

    let output = derive_struct(&ident, data, &generics, &crate_root)?;

    let (_, plain_ty_generics, _) = generics.split_for_impl();
    let self_ty: syn::Type = parse_quote!(#ident #plain_ty_generics);

    let record_generics = add_clone_bound(generics.clone(), &self_ty);
    let record_generics = add_zero_value_bounds(record_generics, &output.sensitive_types);
    let (impl_generics, ty_generics, where_clause) = record_generics.split_for_impl();

    let mut reference_generics = record_generics.clone();
    reference_generics
        .params
        .insert(0, parse_quote!('__capsule));
    let (reference_impl_generics, _, reference_where_clause) =
        reference_generics.split_for_impl();

    let debug_redacted_generics =
        add_debug_bounds(generics.clone(), &output.debug_redacted_generics);
    let (debug_redacted_impl_generics, debug_redacted_ty_generics, debug_redacted_where_clause) =
        debug_redacted_generics.split_for_impl();
    let debug_unredacted_generics =
        add_debug_bounds(generics.clone(), &output.debug_unredacted_generics);
    let (
        debug_unredacted_impl_generics,
        debug_unredacted_ty_generics,
        debug_unredacted_where_clause,
    ) = debug_unredacted_generics.split_for_impl();

    let zero_body = &output.zero_body;
    let descriptors = &output.descriptors;
    let debug_redacted_body = &output.debug_redacted_body;
    let debug_unredacted_body = &output.debug_unredacted_body;

    let debug_impl = if skip_debug {
        quote! {}
    } else {
        quote! {
            #[cfg(any(test, feature = "testing"))]
            impl #debug_unredacted_impl_generics ::core::fmt::Debug for #ident #debug_unredacted_ty_generics #debug_unredacted_where_clause {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    #debug_unredacted_body
                }
            }

            #[cfg(not(any(test, feature = "testing")))]
            #[allow(unused_variables)]
            impl #debug_redacted_impl_generics ::core::fmt::Debug for #ident #debug_redacted_ty_generics #debug_redacted_where_clause {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    #debug_redacted_body
                }
            }
        }
    };

    // Only generate slog impl when the slog feature is enabled on the derive crate.
    #[cfg(feature = "slog")]
    let slog_impl = {
        let slog_crate = slog_crate()?;
        let mut slog_generics = generics;
        let slog_where_clause = slog_generics.make_where_clause();
        slog_where_clause
            .predicates
            .push(parse_quote!(#self_ty: ::core::clone::Clone));
        slog_where_clause
            .predicates
            .push(parse_quote!(#self_ty: ::serde::Serialize));
        slog_where_clause
            .predicates
            .push(parse_quote!(#self_ty: #crate_root::slog::IntoDetachedJson));
        let (slog_impl_generics, slog_ty_generics, slog_where_clause) =
            slog_generics.split_for_impl();
        quote! {
            impl #slog_impl_generics #slog_crate::Value for #ident #slog_ty_generics #slog_where_clause {
                fn serialize(
                    &self,
                    _record: &#slog_crate::Record<'_>,
                    key: #slog_crate::Key,
                    serializer: &mut dyn #slog_crate::Serializer,
                ) -> #slog_crate::Result {
                    let detached = #crate_root::slog::IntoDetachedJson::into_detached_json(
                        ::core::clone::Clone::clone(self),
                    );
                    #slog_crate::Value::serialize(&detached, _record, key, serializer)
                }
            }
        }
    };

    #[cfg(not(feature = "slog"))]
    let slog_impl = quote! {};

    Ok(quote! {
        impl #impl_generics #crate_root::Record for #ident #ty_generics #where_clause {
            const SHAPE: #crate_root::Shape = #crate_root::Shape::Struct;
            const FIELDS: &'static [#crate_root::FieldDescriptor] = &[#(#descriptors),*];

            fn zero_sensitive(&mut self) {
                #zero_body
            }
        }

        impl #impl_generics #crate_root::Source for #ident #ty_generics #where_clause {
            type Record = Self;

            fn record_mut(&mut self) -> &mut Self::Record {
                self
            }
        }

        impl #reference_impl_generics #crate_root::Source for &'__capsule mut #ident #ty_generics #reference_where_clause {
            type Record = #ident #ty_generics;

            fn record_mut(&mut self) -> &mut Self::Record {
                &mut **self
            }
        }

        #debug_impl

        #slog_impl
    })
}
