use proc_macro2::TokenStream;

/// Renders tokens with all whitespace removed.
///
/// `TokenStream`'s `Display` spacing is an implementation detail, so tests
/// compare generated fragments in this compacted form.
pub fn compact(tokens: impl ToString) -> String {
    tokens
        .to_string()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Returns true if `needle` appears in `haystack` once both are compacted.
pub fn contains_tokens(haystack: impl ToString, needle: impl ToString) -> bool {
    compact(haystack).contains(&compact(needle))
}

/// Parses a generated unit as a Rust file, panicking with the generated
/// text if it is not syntactically valid.
pub fn parse_unit(tokens: &TokenStream) -> syn::File {
    match syn::parse2::<syn::File>(tokens.clone()) {
        Ok(file) => file,
        Err(err) => panic!("generated unit does not parse: {err}\n{tokens}"),
    }
}
