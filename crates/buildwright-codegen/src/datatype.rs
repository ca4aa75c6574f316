use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::attrs::RecordOptions;
use crate::property::Property;

/// The unit being generated: the value type and its builder.
#[derive(Debug, Clone)]
pub struct Datatype {
    pub name: syn::Ident,
    pub vis: syn::Visibility,
    pub generics: syn::Generics,
    pub builder: syn::Ident,
    pub crate_path: syn::Path,
    /// Attributes of the original struct, re-emitted on the value type.
    pub attrs: Vec<syn::Attribute>,
    has_defaults: bool,
}

impl Datatype {
    pub fn new(input: &syn::DeriveInput, options: &RecordOptions, properties: &[Property]) -> Self {
        let builder = options
            .builder
            .as_ref()
            .map(|name| name.0.clone())
            .unwrap_or_else(|| format_ident!("{}Builder", input.ident, span = input.ident.span()));
        let crate_path = options
            .crate_path
            .clone()
            .unwrap_or_else(|| syn::parse_quote!(::buildwright));
        Self {
            name: input.ident.clone(),
            vis: input.vis.clone(),
            generics: input.generics.clone(),
            builder,
            crate_path,
            attrs: input.attrs.clone(),
            has_defaults: properties.iter().any(|p| p.default.is_some()),
        }
    }

    /// Whether a freshly constructed builder carries values of its own, so
    /// that clearing a field should restore them.
    pub fn has_defaults(&self) -> bool {
        self.has_defaults
    }

    pub fn value_type(&self) -> TokenStream {
        let name = &self.name;
        let (_, ty_generics, _) = self.generics.split_for_impl();
        quote! { #name #ty_generics }
    }

    pub fn builder_type(&self) -> TokenStream {
        let builder = &self.builder;
        let (_, ty_generics, _) = self.generics.split_for_impl();
        quote! { #builder #ty_generics }
    }

    pub fn build_error(&self) -> TokenStream {
        let crate_path = &self.crate_path;
        quote! { #crate_path::BuildError }
    }

    /// Intra-doc link to the value getter of `property`.
    pub fn getter_link(&self, property: &Property) -> String {
        format!("[`{}::{}`]", self.name, property.name)
    }
}
