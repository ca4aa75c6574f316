//! Parsed `#[record(...)]` options.
//!
//! Unit-level options are the arguments of the attribute itself:
//!
//! - `builder = <ident>`: name of the generated builder type
//!   (defaults to `<Name>Builder`).
//! - `crate = <path>`: path of the runtime crate providing `BuildError`
//!   (defaults to `::buildwright`).
//!
//! Field-level options are written as `#[record(...)]` on individual fields:
//!
//! - `default` / `default = <expr>`: value applied by the builder's `new()`.
//!   The expression has the field's declared type; the bare form uses
//!   `Default::default()`.

use darling::{Error, FromDeriveInput, FromField, FromMeta};

#[derive(Debug, Clone, Default, FromMeta)]
pub struct RecordOptions {
    #[darling(rename = "crate")]
    pub crate_path: Option<syn::Path>,
    pub builder: Option<BuilderName>,
}

/// The `builder = ...` option, accepted as an identifier or a string.
#[derive(Debug, Clone)]
pub struct BuilderName(pub syn::Ident);

impl FromMeta for BuilderName {
    fn from_expr(expr: &syn::Expr) -> darling::Result<Self> {
        match expr {
            syn::Expr::Path(syn::ExprPath { path, .. }) => path
                .get_ident()
                .map(|ident| BuilderName(ident.clone()))
                .ok_or_else(|| {
                    Error::custom("expected identifier for builder name").with_span(path)
                }),
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(s),
                ..
            }) => s
                .parse::<syn::Ident>()
                .map(BuilderName)
                .map_err(|err| Error::custom(err).with_span(s)),
            _ => Err(
                Error::custom("expected identifier or string for builder name").with_span(expr),
            ),
        }
    }
}

/// The annotated struct. Only structs with named fields are supported.
#[derive(Debug, Clone, FromDeriveInput)]
#[darling(supports(struct_named))]
pub struct RecordInput {
    pub ident: syn::Ident,
    pub vis: syn::Visibility,
    pub generics: syn::Generics,
    pub data: darling::ast::Data<(), RecordField>,
}

#[derive(Debug, Clone, FromField)]
#[darling(attributes(record), forward_attrs(doc))]
pub struct RecordField {
    pub ident: Option<syn::Ident>,
    pub vis: syn::Visibility,
    pub ty: syn::Type,
    pub attrs: Vec<syn::Attribute>,
    pub default: Option<DefaultValue>,
}

/// Default value declared on a field.
#[derive(Debug, Clone)]
pub enum DefaultValue {
    /// `#[record(default)]`
    Default,
    /// `#[record(default = expr)]`
    Expr(syn::Expr),
}

impl DefaultValue {
    pub fn to_expr(&self) -> syn::Expr {
        match self {
            DefaultValue::Default => syn::parse_quote!(::core::default::Default::default()),
            DefaultValue::Expr(expr) => expr.clone(),
        }
    }
}

impl FromMeta for DefaultValue {
    fn from_word() -> darling::Result<Self> {
        Ok(DefaultValue::Default)
    }

    fn from_expr(expr: &syn::Expr) -> darling::Result<Self> {
        Ok(DefaultValue::Expr(expr.clone()))
    }
}

impl RecordOptions {
    /// Parses the attribute's own argument list.
    pub fn from_args(args: proc_macro2::TokenStream) -> darling::Result<Self> {
        let items = darling::ast::NestedMeta::parse_meta_list(args)?;
        Self::from_list(&items)
    }
}
