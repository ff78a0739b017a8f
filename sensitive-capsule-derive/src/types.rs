//! Type utilities for the derive macro.

use quote::ToTokens;

/// Renders a field type the way it is usually written, for `FieldDescriptor::type_name`.
///
/// Token streams print with a space between every token (`Option < String >`);
/// this collapses the spacing around path and generic punctuation.
pub(crate) fn type_label(ty: &syn::Type) -> String {
    let raw = ty.to_token_stream().to_string();
    let mut label = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ' ' {
            let prev = label.chars().last();
            let next = chars.peek().copied();
            let glue_prev = matches!(prev, Some('<' | ':' | '&' | '(' | '[' | '\''));
            let glue_next = matches!(next, Some('<' | '>' | ':' | ',' | '(' | ')' | ']' | ';'));
            if glue_prev || glue_next {
                continue;
            }
        }
        label.push(c);
    }
    label
}
