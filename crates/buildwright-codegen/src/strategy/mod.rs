//! Per-field code generators and the recognizer chain that picks one.

mod default;
mod optional;
mod primitive_optional;


pub use default::DefaultProperty;
pub use optional::OptionalProperty;
pub use primitive_optional::{OptionalKind, PrimitiveOptionalProperty};

use proc_macro2::TokenStream;

use crate::datatype::Datatype;
use crate::property::Property;
use crate::source::SourceBuilder;

/// State of a property in a freshly constructed builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initially {
    /// Must be set before `build()` succeeds.
    Required,
    /// May be left unset; the value then reports it as absent.
    Optional,
    /// Set by `new()` from a declared default.
    HasDefault,
}

/// What a recognizer is allowed to look at: the unit and one of its fields.
#[derive(Debug, Clone, Copy)]
pub struct Config<'a> {
    pub datatype: &'a Datatype,
    pub property: &'a Property,
}

impl Config<'_> {
    pub fn initially(&self, absent: Initially) -> Initially {
        if self.property.default.is_some() {
            Initially::HasDefault
        } else {
            absent
        }
    }
}

/// Code generator for one field kind.
///
/// Every method appends source fragments to `code`. Fragments that need
/// temporaries request them from the builder's scope instead of naming them
/// directly.
pub trait PropertyCodeGenerator {
    fn property(&self) -> &Property;

    fn initial_state(&self) -> Initially;

    /// Return type of the value type's getter.
    fn getter_type(&self) -> TokenStream;

    /// Storage field(s) of the built value, named `final_field`.
    fn add_value_field_declaration(
        &self,
        code: &mut SourceBuilder<'_>,
        final_field: &syn::Ident,
    ) -> darling::Result<()>;

    /// Storage field(s) of the builder, sidecars included.
    fn add_builder_field_declaration(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()>;

    /// Field initializers for the builder's struct literal in `new()`.
    fn add_builder_field_initializer(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()>;

    /// Every public builder method for this property, in a fixed order.
    fn add_builder_field_accessors(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()>;

    /// Statements in `build()` recording this property if it is unset.
    fn add_missing_check(&self, _code: &mut SourceBuilder<'_>) -> darling::Result<()> {
        Ok(())
    }

    /// Field initializer for the built value's struct literal, reading the
    /// populated `builder`.
    fn add_final_field_assignment(
        &self,
        code: &mut SourceBuilder<'_>,
        final_field: &syn::Ident,
        builder: &TokenStream,
    ) -> darling::Result<()>;

    /// Statements copying a present value from the built `value` into
    /// `self`. Absent values leave `self` untouched.
    fn add_merge_from_value(
        &self,
        code: &mut SourceBuilder<'_>,
        value: &syn::Ident,
    ) -> darling::Result<()>;

    /// Statements copying a present value from another builder into `self`.
    fn add_merge_from_builder(
        &self,
        code: &mut SourceBuilder<'_>,
        builder: &syn::Ident,
    ) -> darling::Result<()>;

    /// Statements seeding `builder` from the value's own fields, so that
    /// `self.to_builder().build()` reproduces `self`.
    fn add_set_builder_from_partial(
        &self,
        code: &mut SourceBuilder<'_>,
        builder: &syn::Ident,
    ) -> darling::Result<()>;

    /// Expression reading the value's getter result back out of
    /// `final_field`.
    fn add_read_value_fragment(
        &self,
        code: &mut SourceBuilder<'_>,
        final_field: &TokenStream,
    ) -> darling::Result<()>;

    /// Statement adopting `variable`, an expression of the field's declared
    /// type, into `builder`.
    fn add_set_from_result(
        &self,
        code: &mut SourceBuilder<'_>,
        builder: &syn::Ident,
        variable: &TokenStream,
    ) -> darling::Result<()>;

    /// Statements resetting this property inside the builder's `clear()`.
    ///
    /// When the unit has defaults, the property is reset to the value a
    /// fresh builder holds; otherwise it becomes unset.
    fn add_clear_field(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()>;
}

pub type CodeGenerator<'a> = Box<dyn PropertyCodeGenerator + 'a>;

/// Inspects one field and either claims it or declines.
pub type Recognizer = for<'a> fn(&Config<'a>) -> darling::Result<Option<CodeGenerator<'a>>>;

/// Recognizers in priority order. The first to claim a field wins.
pub const RECOGNIZERS: &[(&str, Recognizer)] = &[
    ("primitive optional", primitive_optional::recognize),
    ("optional", optional::recognize),
];

/// Picks the code generator for `config.property`, falling back to
/// [`DefaultProperty`] when no recognizer claims it.
pub fn create_code_generator<'a>(config: &Config<'a>) -> darling::Result<CodeGenerator<'a>> {
    for (name, recognize) in RECOGNIZERS {
        if let Some(generator) = recognize(config)? {
            tracing::debug!(
                field = %config.property.name,
                strategy = *name,
                "selected code generator"
            );
            return Ok(generator);
        }
    }
    tracing::debug!(
        field = %config.property.name,
        strategy = "default",
        "no recognizer matched, using fallback"
    );
    Ok(Box::new(DefaultProperty::new(config)))
}

/// `#[doc = "..."]` attribute tokens.
pub(crate) fn doc(text: impl AsRef<str>) -> TokenStream {
    let text = text.as_ref();
    quote::quote! { #[doc = #text] }
}
