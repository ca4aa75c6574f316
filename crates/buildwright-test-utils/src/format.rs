use proc_macro2::TokenStream;
use quote::quote;

use crate::rustfmt;

/// Formats methods inside an `impl` block for `self_ty`. Doc attributes are
/// dropped so the result shows only code.
pub fn format_methods(self_ty: &str, methods: TokenStream) -> String {
    let self_ty: syn::Type = match syn::parse_str(self_ty) {
        Ok(ty) => ty,
        Err(err) => panic!("`{self_ty}` is not a type: {err}"),
    };
    let mut block: syn::ItemImpl = match syn::parse2(quote! { impl #self_ty { #methods } }) {
        Ok(block) => block,
        Err(err) => panic!("generated methods do not parse: {err}\n{methods}"),
    };
    for item in &mut block.items {
        if let syn::ImplItem::Fn(method) = item {
            method.attrs.retain(|attr| !attr.path().is_ident("doc"));
        }
    }
    rustfmt(quote!(#block).to_string())
}

/// Formats a run of statements as the body of `fn fragment()`.
pub fn format_statements(statements: TokenStream) -> String {
    rustfmt(quote! { fn fragment() { #statements } }.to_string())
}

/// Formats comma-terminated `name: ty` or `name: expr` entries, as the body
/// of `struct Fields` or of a `Fields { .. }` literal respectively.
pub fn format_fields(fields: TokenStream, literal: bool) -> String {
    let item = if literal {
        quote! { fn fragment() -> Fields { Fields { #fields } } }
    } else {
        quote! { struct Fields { #fields } }
    };
    rustfmt(item.to_string())
}
