//! `#[sensitive(...)]` on the record type itself.
//!
//! The only struct-level switch is `skip_debug`. Marking sensitivity is a
//! per-field decision, so `#[sensitive]` and `#[sensitive = ".."]` on the
//! struct are rejected instead of being read as "everything is sensitive".

use syn::{meta::ParseNestedMeta, Attribute, Meta, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ContainerOptions {
    /// Leave `Debug` to the user.
    pub(crate) skip_debug: bool,
}

impl ContainerOptions {
    fn apply(&mut self, meta: &ParseNestedMeta<'_>) -> Result<()> {
        if !meta.path.is_ident("skip_debug") {
            let name = meta
                .path
                .get_ident()
                .map_or_else(|| "?".to_string(), ToString::to_string);
            return Err(meta.error(format!(
                "unknown record option `{name}`; the only option is `skip_debug`"
            )));
        }
        if self.skip_debug {
            return Err(meta.error("`skip_debug` is given more than once"));
        }
        self.skip_debug = true;
        Ok(())
    }
}

pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("sensitive")) {
        match &attr.meta {
            Meta::List(list) => list.parse_nested_meta(|meta| options.apply(&meta))?,
            Meta::Path(path) => {
                return Err(syn::Error::new_spanned(
                    path,
                    "#[sensitive] on a struct marks nothing; annotate fields with #[sensitive = \"true\"]",
                ));
            }
            Meta::NameValue(nv) => {
                return Err(syn::Error::new_spanned(
                    nv,
                    "#[sensitive = ..] belongs on a field, not on the struct",
                ));
            }
        }
    }

    Ok(options)
}
