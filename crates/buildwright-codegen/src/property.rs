use quote::format_ident;
use syn::ext::IdentExt;

use crate::attrs::{DefaultValue, RecordField};

/// Suffix appended to a field name to form its presence flag.
pub const PRESENCE_FLAG_SUFFIX: &str = "valid";

/// Immutable description of one field of a record.
#[derive(Debug, Clone)]
pub struct Property {
    /// Field name, also the base of every accessor name.
    pub name: syn::Ident,
    /// Declared type of the field.
    pub ty: syn::Type,
    /// Builder storage field.
    pub field: syn::Ident,
    /// Visibility of the value getter.
    pub vis: syn::Visibility,
    /// Doc attributes forwarded to the value getter.
    pub docs: Vec<syn::Attribute>,
    pub default: Option<DefaultValue>,
}

impl Property {
    pub fn from_field(field: &RecordField) -> darling::Result<Self> {
        let name = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("record fields must be named").with_span(&field.ty)
        })?;
        Ok(Self {
            field: name.clone(),
            name,
            ty: field.ty.clone(),
            vis: field.vis.clone(),
            docs: field.attrs.clone(),
            default: field.default.clone(),
        })
    }

    /// The boolean sidecar tracking whether this property holds a value.
    ///
    /// Always derived from the origin property so the two names cannot
    /// drift apart.
    pub fn presence_flag(&self) -> Property {
        let name = format_ident!(
            "{}_{}",
            self.name,
            PRESENCE_FLAG_SUFFIX,
            span = self.name.span()
        );
        Property {
            field: name.clone(),
            name,
            ty: syn::parse_quote!(bool),
            vis: self.vis.clone(),
            docs: Vec::new(),
            default: None,
        }
    }

    /// The field name without any `r#` prefix, as used in messages and as
    /// the base of local variable names.
    pub fn label(&self) -> String {
        self.name.unraw().to_string()
    }

    pub fn default_expr(&self) -> Option<syn::Expr> {
        self.default.as_ref().map(DefaultValue::to_expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::ToTokens;

    fn property(name: &str, ty: &str) -> Property {
        let name: syn::Ident = syn::parse_str(name).unwrap();
        Property {
            field: name.clone(),
            name,
            ty: syn::parse_str(ty).unwrap(),
            vis: syn::Visibility::Inherited,
            docs: Vec::new(),
            default: None,
        }
    }

    #[test]
    fn test_presence_flag_is_derived() {
        let count = property("count", "Option<i32>");
        let flag = count.presence_flag();
        assert_eq!(flag.name, "count_valid");
        assert_eq!(flag.field, "count_valid");
        assert_eq!(flag.ty.to_token_stream().to_string(), "bool");
        assert!(flag.default.is_none());
    }

    #[test]
    fn test_raw_field_name() {
        let kind = property("r#type", "Option<i32>");
        assert_eq!(kind.label(), "type");
        assert_eq!(kind.presence_flag().name, "type_valid");
    }

    #[test]
    fn test_bare_default_expands_to_default_call() {
        let mut count = property("count", "Option<i32>");
        assert!(count.default_expr().is_none());
        count.default = Some(DefaultValue::Default);
        let expr = count.default_expr().unwrap();
        assert_eq!(
            expr.to_token_stream().to_string(),
            quote::quote!(::core::default::Default::default()).to_string()
        );
    }
}
