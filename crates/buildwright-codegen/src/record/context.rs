use darling::FromDeriveInput;
use proc_macro2::TokenStream;

use crate::attrs::{RecordInput, RecordOptions};

/// Expands one `#[record]` struct into the value type and its builder.
#[derive(Debug, Clone)]
pub struct GenerateRecord {
    pub default_crate_path: syn::Path,
}

impl Default for GenerateRecord {
    fn default() -> Self {
        Self {
            default_crate_path: syn::parse_quote!(::buildwright),
        }
    }
}

impl GenerateRecord {
    pub fn new(default_crate_path: syn::Path) -> Self {
        Self { default_crate_path }
    }

    /// `args` are the tokens inside `#[record(...)]`, `input` the annotated
    /// struct. Either the whole unit is generated or an error is returned.
    #[tracing::instrument(level = "debug", skip_all, fields(record = %input.ident))]
    pub fn emit(
        &self,
        args: TokenStream,
        input: &syn::DeriveInput,
    ) -> darling::Result<TokenStream> {
        let mut options = RecordOptions::from_args(args)?;
        if options.crate_path.is_none() {
            options.crate_path = Some(self.default_crate_path.clone());
        }
        let record = RecordInput::from_derive_input(input)?;
        let unit = self.scan_input(input, &options, record)?;
        self.emit_unit(&unit)
    }
}
