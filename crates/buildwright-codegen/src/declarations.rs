//! Scoped declarations shared between code generators.
//!
//! Generators never invent identifiers for temporaries. They ask for them
//! here, which records every name in the [`Scope`](crate::scope::Scope) so
//! that nothing emitted for one unit collides.

use proc_macro2::{Span, TokenStream};
use quote::quote;

use crate::datatype::Datatype;
use crate::scope::{Element, Level};
use crate::source::SourceBuilder;

/// A name claimed for the whole unit, such as one of its generic
/// parameters. Temporaries never reuse it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedName(pub String);

impl Element for ReservedName {
    type Value = ();

    fn level(&self) -> Level {
        Level::Unit
    }
}

/// A storage field of the builder. Locals may shadow these freely, but no
/// two builder fields may share a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldName(pub String);

impl Element for FieldName {
    type Value = ();

    fn level(&self) -> Level {
        Level::Unit
    }
}

/// A temporary or type parameter introduced by one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableName(pub String);

impl Element for VariableName {
    type Value = ();

    fn level(&self) -> Level {
        Level::Method
    }
}

/// Expression producing a builder populated with the unit's defaults, or
/// `None` when a fresh builder has no defaults to offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultBuilderExpr;

impl Element for DefaultBuilderExpr {
    type Value = Option<TokenStream>;

    fn level(&self) -> Level {
        Level::Unit
    }
}

/// The local holding a fresh default builder within one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreshBuilder;

impl Element for FreshBuilder {
    type Value = Option<syn::Ident>;

    fn level(&self) -> Level {
        Level::Method
    }
}

/// The local collecting unset required fields within `build()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields;

impl Element for MissingFields {
    type Value = syn::Ident;

    fn level(&self) -> Level {
        Level::Method
    }
}

pub fn reserve(code: &mut SourceBuilder<'_>, name: impl Into<String>) -> darling::Result<()> {
    code.scope_mut().put_if_absent(ReservedName(name.into()), ())?;
    Ok(())
}

/// Claims a builder storage field name, failing if another field already
/// holds it.
pub fn declare_field(code: &mut SourceBuilder<'_>, name: &syn::Ident) -> darling::Result<()> {
    let previous = code
        .scope_mut()
        .put_if_absent(FieldName(name.to_string()), ())?;
    match previous {
        None => Ok(()),
        Some(()) => Err(darling::Error::custom(format!(
            "builder field `{name}` is generated more than once; rename one of the fields"
        ))
        .with_span(name)),
    }
}

fn claim(
    code: &mut SourceBuilder<'_>,
    candidates: impl Iterator<Item = String>,
) -> darling::Result<String> {
    let scope = code.scope();
    let taken: Vec<String> = scope
        .keys_of_type::<ReservedName>()
        .into_iter()
        .map(|key| key.0)
        .chain(scope.keys_of_type::<VariableName>().into_iter().map(|key| key.0))
        .collect();
    for candidate in candidates {
        if taken.contains(&candidate) {
            continue;
        }
        code.scope_mut()
            .put_if_absent(VariableName(candidate.clone()), ())?;
        return Ok(candidate);
    }
    Err(darling::Error::custom("exhausted candidate names for a temporary"))
}

/// Turns a preferred name into a plain identifier: a raw `r#` prefix is
/// dropped, and a keyword left bare gets a trailing underscore.
fn plain(preferred: &str) -> String {
    let bare = preferred.strip_prefix("r#").unwrap_or(preferred);
    if syn::parse_str::<syn::Ident>(bare).is_ok() {
        bare.to_string()
    } else {
        format!("{bare}_")
    }
}

/// Claims a local variable name, preferring `preferred` and falling back to
/// `preferred_1`, `preferred_2`, ...
///
/// Must be called on a method-level builder.
pub fn fresh_variable(
    code: &mut SourceBuilder<'_>,
    preferred: &str,
) -> darling::Result<syn::Ident> {
    let base = plain(preferred);
    let candidates =
        std::iter::once(base.clone()).chain((1..).map(move |n| format!("{base}_{n}")));
    let name = claim(code, candidates)?;
    Ok(syn::Ident::new(&name, Span::call_site()))
}

/// Claims a method-level generic type parameter name, preferring
/// `preferred` and falling back to `preferred1`, `preferred2`, ...
pub fn fresh_type_param(
    code: &mut SourceBuilder<'_>,
    preferred: &str,
) -> darling::Result<syn::Ident> {
    let base = plain(preferred);
    let candidates =
        std::iter::once(base.clone()).chain((1..).map(move |n| format!("{base}{n}")));
    let name = claim(code, candidates)?;
    Ok(syn::Ident::new(&name, Span::call_site()))
}

/// Returns a local holding a freshly constructed builder, declaring it on
/// first use within the current method.
///
/// Yields `None` when the unit has no defaults, in which case a fresh
/// builder is indistinguishable from a cleared one.
pub fn fresh_builder(
    code: &mut SourceBuilder<'_>,
    datatype: &Datatype,
) -> darling::Result<Option<syn::Ident>> {
    if let Some(existing) = code.scope().get(&FreshBuilder) {
        return Ok(existing);
    }
    let expr = code.scope_mut().compute_if_absent(DefaultBuilderExpr, || {
        datatype.has_defaults().then(|| quote! { Self::new() })
    })?;
    let variable = match expr {
        Some(expr) => {
            let variable = fresh_variable(code, "defaults")?;
            code.add(quote! { let #variable = #expr; });
            Some(variable)
        }
        None => None,
    };
    code.scope_mut().put_if_absent(FreshBuilder, variable.clone())?;
    Ok(variable)
}

/// Returns the local collecting unset required fields, declaring it on first
/// use within the current method.
pub fn missing_fields(code: &mut SourceBuilder<'_>) -> darling::Result<syn::Ident> {
    if let Some(existing) = code.scope().get(&MissingFields) {
        return Ok(existing);
    }
    let variable = fresh_variable(code, "missing")?;
    code.add(quote! {
        let mut #variable: ::std::vec::Vec<&'static str> = ::std::vec::Vec::new();
    });
    code.scope_mut().put_if_absent(MissingFields, variable.clone())?;
    Ok(variable)
}
