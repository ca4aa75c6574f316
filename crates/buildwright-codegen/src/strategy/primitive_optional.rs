//! `Option<i32>`, `Option<i64>` and `Option<f64>` fields.
//!
//! The builder stores the bare primitive next to a `<name>_valid` flag
//! instead of an `Option`. The flag alone decides presence; the primitive
//! slot is meaningless while the flag is down and is never read then.

use proc_macro2::TokenStream;
use quote::quote;

use super::{CodeGenerator, Config, Initially, PropertyCodeGenerator, doc};
use crate::datatype::Datatype;
use crate::declarations::{declare_field, fresh_builder, fresh_type_param, fresh_variable};
use crate::methods;
use crate::misc::{bare_ident, option_argument};
use crate::property::Property;
use crate::source::SourceBuilder;

/// The closed set of primitive optionals handled with a presence flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionalKind {
    Int,
    Long,
    Double,
}

impl OptionalKind {
    pub const ALL: [OptionalKind; 3] =
        [OptionalKind::Int, OptionalKind::Long, OptionalKind::Double];

    pub fn primitive_name(self) -> &'static str {
        match self {
            OptionalKind::Int => "i32",
            OptionalKind::Long => "i64",
            OptionalKind::Double => "f64",
        }
    }

    pub fn primitive(self) -> TokenStream {
        match self {
            OptionalKind::Int => quote!(i32),
            OptionalKind::Long => quote!(i64),
            OptionalKind::Double => quote!(f64),
        }
    }

    /// Placeholder stored while the presence flag is down.
    pub fn zero(self) -> TokenStream {
        match self {
            OptionalKind::Int => quote!(0i32),
            OptionalKind::Long => quote!(0i64),
            OptionalKind::Double => quote!(0.0f64),
        }
    }

    pub fn optional_type(self) -> TokenStream {
        let primitive = self.primitive();
        quote!(::core::option::Option<#primitive>)
    }

    pub fn empty(self) -> TokenStream {
        quote!(::core::option::Option::None)
    }

    /// Matches `ty` against the catalog.
    ///
    /// Only `Option<prim>` (optionally spelled through `std::option` or
    /// `core::option`) with a bare primitive argument matches; aliases and
    /// wrappers do not.
    pub fn lookup(ty: &syn::Type) -> Option<OptionalKind> {
        let argument = bare_ident(option_argument(ty)?)?;
        Self::ALL
            .into_iter()
            .find(|kind| *argument == kind.primitive_name())
    }
}

/// Claims fields whose type is in the [`OptionalKind`] catalog.
pub fn recognize<'a>(config: &Config<'a>) -> darling::Result<Option<CodeGenerator<'a>>> {
    if OptionalKind::lookup(&config.property.ty).is_none() {
        return Ok(None);
    }
    Ok(Some(Box::new(PrimitiveOptionalProperty::new(config)?)))
}

pub struct PrimitiveOptionalProperty<'a> {
    datatype: &'a Datatype,
    property: &'a Property,
    kind: OptionalKind,
    initially: Initially,
}

impl<'a> PrimitiveOptionalProperty<'a> {
    pub fn new(config: &Config<'a>) -> darling::Result<Self> {
        let ty = &config.property.ty;
        let kind = OptionalKind::lookup(ty).ok_or_else(|| {
            darling::Error::custom(format!(
                "`{}` is not `Option<i32>`, `Option<i64>` or `Option<f64>`",
                quote!(#ty)
            ))
            .with_span(ty)
        })?;
        Ok(Self {
            datatype: config.datatype,
            property: config.property,
            kind,
            initially: config.initially(Initially::Optional),
        })
    }

    pub fn kind(&self) -> OptionalKind {
        self.kind
    }

    fn link(&self) -> String {
        self.datatype.getter_link(self.property)
    }

    fn add_setter(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()> {
        let setter = methods::setter(self.property);
        let field = &self.property.field;
        let flag = self.property.presence_flag().field;
        let primitive = self.kind.primitive();

        let mut method = code.nested();
        let value = fresh_variable(&mut method, &self.property.label())?;
        method.add(quote! {
            self.#field = #value;
            self.#flag = true;
            self
        });
        let body = method.into_tokens();

        let doc = doc(format!("Sets the value to be returned by {}.", self.link()));
        code.add(quote! {
            #doc
            pub fn #setter(&mut self, #value: #primitive) -> &mut Self {
                #body
            }
        });
        Ok(())
    }

    fn add_optional_setter(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()> {
        let optional_setter = methods::optional_setter(self.property);
        let setter = methods::setter(self.property);
        let clear = methods::clear_method(self.property);
        let optional_type = self.kind.optional_type();

        let mut method = code.nested();
        let value = fresh_variable(&mut method, &self.property.label())?;
        let present = fresh_variable(&mut method, "value")?;
        method.add(quote! {
            match #value {
                ::core::option::Option::Some(#present) => self.#setter(#present),
                ::core::option::Option::None => self.#clear(),
            }
        });
        let body = method.into_tokens();

        let doc = doc(format!(
            "Sets the value to be returned by {}, clearing it when `None`.",
            self.link()
        ));
        code.add(quote! {
            #doc
            pub fn #optional_setter(&mut self, #value: #optional_type) -> &mut Self {
                #body
            }
        });
        Ok(())
    }

    fn add_mapper(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()> {
        let mapper_method = methods::mapper(self.property);
        let getter = methods::getter(self.property);
        let optional_setter = methods::optional_setter(self.property);
        let primitive = self.kind.primitive();
        let optional_type = self.kind.optional_type();

        let mut method = code.nested();
        let function = fresh_type_param(&mut method, "F")?;
        let result = fresh_type_param(&mut method, "R")?;
        let mapper = fresh_variable(&mut method, "mapper")?;
        let current = fresh_variable(&mut method, &self.property.label())?;
        method.add(quote! {
            if let ::core::option::Option::Some(#current) = self.#getter() {
                self.#optional_setter(
                    ::core::convert::Into::<#optional_type>::into(#mapper(#current)),
                );
            }
            self
        });
        let body = method.into_tokens();

        let doc = doc(format!(
            "If the value to be returned by {} is present, replaces it by applying \
             `mapper` to it. A `None` result clears the value; an absent value is \
             left alone and `mapper` is not called.",
            self.link()
        ));
        code.add(quote! {
            #doc
            pub fn #mapper_method<#function, #result>(&mut self, #mapper: #function) -> &mut Self
            where
                #function: ::core::ops::FnOnce(#primitive) -> #result,
                #result: ::core::convert::Into<#optional_type>,
            {
                #body
            }
        });
        Ok(())
    }

    fn add_clear(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()> {
        let clear = methods::clear_method(self.property);
        let flag = self.property.presence_flag().field;
        let doc = doc(format!(
            "Sets the value to be returned by {} to `None`.",
            self.link()
        ));
        code.add(quote! {
            #doc
            pub fn #clear(&mut self) -> &mut Self {
                self.#flag = false;
                self
            }
        });
        Ok(())
    }

    fn add_getter(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()> {
        let getter = methods::getter(self.property);
        let field = &self.property.field;
        let flag = self.property.presence_flag().field;
        let optional_type = self.kind.optional_type();
        let empty = self.kind.empty();
        let doc = doc(format!(
            "Returns the value that will be returned by {}.",
            self.link()
        ));
        code.add(quote! {
            #doc
            pub fn #getter(&self) -> #optional_type {
                if self.#flag {
                    ::core::option::Option::Some(self.#field)
                } else {
                    #empty
                }
            }
        });
        Ok(())
    }
}

impl PropertyCodeGenerator for PrimitiveOptionalProperty<'_> {
    fn property(&self) -> &Property {
        self.property
    }

    fn initial_state(&self) -> Initially {
        self.initially
    }

    fn getter_type(&self) -> TokenStream {
        self.kind.optional_type()
    }

    fn add_value_field_declaration(
        &self,
        code: &mut SourceBuilder<'_>,
        final_field: &syn::Ident,
    ) -> darling::Result<()> {
        let optional_type = self.kind.optional_type();
        code.add(quote! { #final_field: #optional_type, });
        Ok(())
    }

    fn add_builder_field_declaration(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()> {
        let field = &self.property.field;
        let flag = self.property.presence_flag().field;
        declare_field(code, field)?;
        declare_field(code, &flag)?;
        let primitive = self.kind.primitive();
        code.add(quote! {
            #field: #primitive,
            #flag: bool,
        });
        Ok(())
    }

    fn add_builder_field_initializer(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()> {
        let field = &self.property.field;
        let flag = self.property.presence_flag().field;
        let zero = self.kind.zero();
        code.add(quote! {
            #field: #zero,
            #flag: false,
        });
        Ok(())
    }

    fn add_builder_field_accessors(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()> {
        self.add_setter(code)?;
        self.add_optional_setter(code)?;
        self.add_mapper(code)?;
        self.add_clear(code)?;
        self.add_getter(code)
    }

    fn add_final_field_assignment(
        &self,
        code: &mut SourceBuilder<'_>,
        final_field: &syn::Ident,
        builder: &TokenStream,
    ) -> darling::Result<()> {
        let field = &self.property.field;
        let flag = self.property.presence_flag().field;
        let empty = self.kind.empty();
        code.add(quote! {
            #final_field: if #builder.#flag {
                ::core::option::Option::Some(#builder.#field)
            } else {
                #empty
            },
        });
        Ok(())
    }

    fn add_merge_from_value(
        &self,
        code: &mut SourceBuilder<'_>,
        value: &syn::Ident,
    ) -> darling::Result<()> {
        let getter = methods::getter(self.property);
        let setter = methods::setter(self.property);
        let present = fresh_variable(code, &self.property.label())?;
        code.add(quote! {
            if let ::core::option::Option::Some(#present) = #value.#getter() {
                self.#setter(#present);
            }
        });
        Ok(())
    }

    fn add_merge_from_builder(
        &self,
        code: &mut SourceBuilder<'_>,
        builder: &syn::Ident,
    ) -> darling::Result<()> {
        let getter = methods::getter(self.property);
        let setter = methods::setter(self.property);
        let present = fresh_variable(code, &self.property.label())?;
        code.add(quote! {
            if let ::core::option::Option::Some(#present) = #builder.#getter() {
                self.#setter(#present);
            }
        });
        Ok(())
    }

    fn add_set_builder_from_partial(
        &self,
        code: &mut SourceBuilder<'_>,
        builder: &syn::Ident,
    ) -> darling::Result<()> {
        let optional_setter = methods::optional_setter(self.property);
        let final_field = &self.property.name;
        code.add(quote! { #builder.#optional_setter(self.#final_field); });
        Ok(())
    }

    fn add_read_value_fragment(
        &self,
        code: &mut SourceBuilder<'_>,
        final_field: &TokenStream,
    ) -> darling::Result<()> {
        code.add(final_field.clone());
        Ok(())
    }

    fn add_set_from_result(
        &self,
        code: &mut SourceBuilder<'_>,
        builder: &syn::Ident,
        variable: &TokenStream,
    ) -> darling::Result<()> {
        let optional_setter = methods::optional_setter(self.property);
        code.add(quote! { #builder.#optional_setter(#variable); });
        Ok(())
    }

    fn add_clear_field(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()> {
        match fresh_builder(code, self.datatype)? {
            Some(defaults) => {
                let optional_setter = methods::optional_setter(self.property);
                let getter = methods::getter(self.property);
                code.add(quote! { self.#optional_setter(#defaults.#getter()); });
            }
            None => {
                let flag = self.property.presence_flag().field;
                code.add(quote! { self.#flag = false; });
            }
        }
        Ok(())
    }
}
