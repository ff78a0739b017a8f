//! Generic type parameter handling and trait bound management.
//!
//! Bounds are added per use:
//! - the record itself must be `Clone` (the capsule keeps a clone),
//! - a sensitive field whose type mentions a generic parameter must be
//!   `Default`, so it has a zero value,
//! - generic parameters printed by the generated `Debug` impl must be `Debug`.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` fields are skipped when collecting generics, so a marker
//! like `_marker: PhantomData<T>` never forces a `Debug` bound onto `T`.

use syn::{parse_quote, Ident, WherePredicate};

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    match ty {
        syn::Type::Path(path) => {
            for segment in &path.path.segments {
                if segment.ident == "PhantomData" {
                    return;
                }

                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    for arg in &args.args {
                        if let syn::GenericArgument::Type(inner_ty) = arg {
                            collect_generics_from_type(inner_ty, generics, result);
                        }
                    }
                }

                // Check if this type identifier matches a generic parameter
                for param in generics.type_params() {
                    if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                        result.push(param.ident.clone());
                    }
                }
            }
        }
        syn::Type::Reference(reference) => {
            collect_generics_from_type(&reference.elem, generics, result);
        }
        syn::Type::Array(array) => collect_generics_from_type(&array.elem, generics, result),
        syn::Type::Slice(slice) => collect_generics_from_type(&slice.elem, generics, result),
        syn::Type::Tuple(tuple) => {
            for elem in &tuple.elems {
                collect_generics_from_type(elem, generics, result);
            }
        }
        syn::Type::Paren(paren) => collect_generics_from_type(&paren.elem, generics, result),
        syn::Type::Group(group) => collect_generics_from_type(&group.elem, generics, result),
        _ => {}
    }
}

/// Returns `true` if `ty` mentions any of the container's type parameters.
pub(crate) fn mentions_generics(ty: &syn::Type, generics: &syn::Generics) -> bool {
    let mut found = Vec::new();
    collect_generics_from_type(ty, generics, &mut found);
    !found.is_empty()
}

/// Adds `Default` bounds for generic sensitive field types.
///
/// Non-generic field types get no predicate: `zero_field` reports a missing
/// `Default` impl at the field itself.
pub(crate) fn add_zero_value_bounds(
    mut generics: syn::Generics,
    sensitive_types: &[syn::Type],
) -> syn::Generics {
    let predicates: Vec<WherePredicate> = sensitive_types
        .iter()
        .filter(|ty| mentions_generics(ty, &generics))
        .map(|ty| parse_quote!(#ty: ::core::default::Default))
        .collect();
    if !predicates.is_empty() {
        generics.make_where_clause().predicates.extend(predicates);
    }
    generics
}

/// Adds a `Clone` bound on the record type itself.
pub(crate) fn add_clone_bound(mut generics: syn::Generics, self_ty: &syn::Type) -> syn::Generics {
    if generics.type_params().next().is_some() {
        generics
            .make_where_clause()
            .predicates
            .push(parse_quote!(#self_ty: ::core::clone::Clone));
    }
    generics
}

pub(crate) fn add_debug_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(::core::fmt::Debug));
        }
    }
    generics
}
