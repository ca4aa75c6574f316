//! Accessor naming policy. Every name is a pure function of the field name.

use quote::format_ident;

use crate::property::Property;

/// Builder methods that no field may shadow.
pub const RESERVED_METHODS: &[&str] = &[
    "new",
    "build",
    "clear",
    "merge_from",
    "merge_from_builder",
    "builder",
    "to_builder",
];

pub fn setter(property: &Property) -> syn::Ident {
    format_ident!("set_{}", property.name, span = property.name.span())
}

/// Setter taking the field's optional form; `None` clears the field.
pub fn optional_setter(property: &Property) -> syn::Ident {
    format_ident!("set_optional_{}", property.name, span = property.name.span())
}

pub fn mapper(property: &Property) -> syn::Ident {
    format_ident!("map_{}", property.name, span = property.name.span())
}

pub fn clear_method(property: &Property) -> syn::Ident {
    format_ident!("clear_{}", property.name, span = property.name.span())
}

pub fn getter(property: &Property) -> syn::Ident {
    property.name.clone()
}
