extern crate proc_macro;

use buildwright_codegen::record::GenerateRecord;
use proc_macro::TokenStream;
use syn::parse_macro_input;

/// Turns a struct with named fields into an immutable value type with a
/// generated builder.
///
/// See the `buildwright` crate for the generated API.
#[proc_macro_attribute]
pub fn record(args: TokenStream, input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as syn::DeriveInput);
    match GenerateRecord::default().emit(args.into(), &ast) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.write_errors().into(),
    }
}
