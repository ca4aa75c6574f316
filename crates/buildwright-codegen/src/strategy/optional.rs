//! `Option<T>` fields not claimed by the primitive catalog.

use proc_macro2::TokenStream;
use quote::quote;

use super::{CodeGenerator, Config, Initially, PropertyCodeGenerator, doc};
use crate::datatype::Datatype;
use crate::declarations::{declare_field, fresh_builder, fresh_type_param, fresh_variable};
use crate::methods;
use crate::misc::option_argument;
use crate::property::Property;
use crate::source::SourceBuilder;

pub fn recognize<'a>(config: &Config<'a>) -> darling::Result<Option<CodeGenerator<'a>>> {
    Ok(OptionalProperty::new(config).map(|generator| Box::new(generator) as CodeGenerator<'a>))
}

pub struct OptionalProperty<'a> {
    datatype: &'a Datatype,
    property: &'a Property,
    element: &'a syn::Type,
    initially: Initially,
}

impl<'a> OptionalProperty<'a> {
    /// Returns `None` unless the field is declared as `Option<T>`.
    pub fn new(config: &Config<'a>) -> Option<Self> {
        let element = option_argument(&config.property.ty)?;
        Some(Self {
            datatype: config.datatype,
            property: config.property,
            element,
            initially: config.initially(Initially::Optional),
        })
    }

    fn optional_type(&self) -> TokenStream {
        let element = self.element;
        quote!(::core::option::Option<#element>)
    }

    fn link(&self) -> String {
        self.datatype.getter_link(self.property)
    }
}

impl PropertyCodeGenerator for OptionalProperty<'_> {
    fn property(&self) -> &Property {
        self.property
    }

    fn initial_state(&self) -> Initially {
        self.initially
    }

    fn getter_type(&self) -> TokenStream {
        let element = self.element;
        quote!(::core::option::Option<&#element>)
    }

    fn add_value_field_declaration(
        &self,
        code: &mut SourceBuilder<'_>,
        final_field: &syn::Ident,
    ) -> darling::Result<()> {
        let optional_type = self.optional_type();
        code.add(quote! { #final_field: #optional_type, });
        Ok(())
    }

    fn add_builder_field_declaration(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()> {
        let field = &self.property.field;
        declare_field(code, field)?;
        let optional_type = self.optional_type();
        code.add(quote! { #field: #optional_type, });
        Ok(())
    }

    fn add_builder_field_initializer(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()> {
        let field = &self.property.field;
        code.add(quote! { #field: ::core::option::Option::None, });
        Ok(())
    }

    fn add_builder_field_accessors(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()> {
        let field = &self.property.field;
        let element = self.element;
        let optional_type = self.optional_type();
        let setter = methods::setter(self.property);
        let optional_setter = methods::optional_setter(self.property);
        let mapper_method = methods::mapper(self.property);
        let clear = methods::clear_method(self.property);
        let getter = methods::getter(self.property);
        let name = self.property.label();
        let link = self.link();

        let mut method = code.nested();
        let value = fresh_variable(&mut method, &name)?;
        drop(method);
        let set_doc = doc(format!("Sets the value to be returned by {link}."));
        let optional_doc = doc(format!(
            "Sets the value to be returned by {link}, clearing it when `None`."
        ));
        code.add(quote! {
            #set_doc
            pub fn #setter(&mut self, #value: #element) -> &mut Self {
                self.#field = ::core::option::Option::Some(#value);
                self
            }

            #optional_doc
            pub fn #optional_setter(&mut self, #value: #optional_type) -> &mut Self {
                self.#field = #value;
                self
            }
        });

        let mut method = code.nested();
        let function = fresh_type_param(&mut method, "F")?;
        let result = fresh_type_param(&mut method, "R")?;
        let mapper = fresh_variable(&mut method, "mapper")?;
        let current = fresh_variable(&mut method, &name)?;
        method.add(quote! {
            if let ::core::option::Option::Some(#current) = self.#field.take() {
                self.#field = ::core::convert::Into::<#optional_type>::into(#mapper(#current));
            }
            self
        });
        let body = method.into_tokens();
        let map_doc = doc(format!(
            "If the value to be returned by {link} is present, replaces it by applying \
             `mapper` to it. A `None` result clears the value."
        ));
        code.add(quote! {
            #map_doc
            pub fn #mapper_method<#function, #result>(&mut self, #mapper: #function) -> &mut Self
            where
                #function: ::core::ops::FnOnce(#element) -> #result,
                #result: ::core::convert::Into<#optional_type>,
            {
                #body
            }
        });

        let clear_doc = doc(format!("Sets the value to be returned by {link} to `None`."));
        let get_doc = doc(format!("Returns the value that will be returned by {link}."));
        code.add(quote! {
            #clear_doc
            pub fn #clear(&mut self) -> &mut Self {
                self.#field = ::core::option::Option::None;
                self
            }

            #get_doc
            pub fn #getter(&self) -> ::core::option::Option<&#element> {
                self.#field.as_ref()
            }
        });
        Ok(())
    }

    fn add_final_field_assignment(
        &self,
        code: &mut SourceBuilder<'_>,
        final_field: &syn::Ident,
        builder: &TokenStream,
    ) -> darling::Result<()> {
        let field = &self.property.field;
        code.add(quote! {
            #final_field: ::core::clone::Clone::clone(&#builder.#field),
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
                self.#setter(::core::clone::Clone::clone(#present));
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
                self.#setter(::core::clone::Clone::clone(#present));
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
        code.add(quote! {
            #builder.#optional_setter(::core::clone::Clone::clone(&self.#final_field));
        });
        Ok(())
    }

    fn add_read_value_fragment(
        &self,
        code: &mut SourceBuilder<'_>,
        final_field: &TokenStream,
    ) -> darling::Result<()> {
        code.add(quote! { #final_field.as_ref() });
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
        let field = &self.property.field;
        match fresh_builder(code, self.datatype)? {
            Some(defaults) => {
                let optional_setter = methods::optional_setter(self.property);
                let getter = methods::getter(self.property);
                code.add(quote! {
                    self.#optional_setter(#defaults.#getter().cloned());
                });
            }
            None => {
                code.add(quote! { self.#field = ::core::option::Option::None; });
            }
        }
        Ok(())
    }
}
