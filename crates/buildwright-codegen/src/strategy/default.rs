//! Fallback for fields no recognizer claims.
//!
//! The builder holds an `Option<T>` that is `None` until set. Such fields
//! are required unless they carry a default.

use proc_macro2::TokenStream;
use quote::quote;

use super::{Config, Initially, PropertyCodeGenerator, doc};
use crate::datatype::Datatype;
use crate::declarations::{
    declare_field, fresh_builder, fresh_type_param, fresh_variable, missing_fields,
};
use crate::methods;
use crate::property::Property;
use crate::source::SourceBuilder;

pub struct DefaultProperty<'a> {
    datatype: &'a Datatype,
    property: &'a Property,
    initially: Initially,
}

impl<'a> DefaultProperty<'a> {
    pub fn new(config: &Config<'a>) -> Self {
        Self {
            datatype: config.datatype,
            property: config.property,
            initially: config.initially(Initially::Required),
        }
    }

    fn missing(&self) -> TokenStream {
        let error = self.datatype.build_error();
        let name = self.property.label();
        quote! { #error::MissingFields(::std::vec![#name]) }
    }
}

impl PropertyCodeGenerator for DefaultProperty<'_> {
    fn property(&self) -> &Property {
        self.property
    }

    fn initial_state(&self) -> Initially {
        self.initially
    }

    fn getter_type(&self) -> TokenStream {
        let ty = &self.property.ty;
        quote!(&#ty)
    }

    fn add_value_field_declaration(
        &self,
        code: &mut SourceBuilder<'_>,
        final_field: &syn::Ident,
    ) -> darling::Result<()> {
        let ty = &self.property.ty;
        code.add(quote! { #final_field: #ty, });
        Ok(())
    }

    fn add_builder_field_declaration(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()> {
        let field = &self.property.field;
        let ty = &self.property.ty;
        declare_field(code, field)?;
        code.add(quote! { #field: ::core::option::Option<#ty>, });
        Ok(())
    }

    fn add_builder_field_initializer(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()> {
        let field = &self.property.field;
        code.add(quote! { #field: ::core::option::Option::None, });
        Ok(())
    }

    fn add_builder_field_accessors(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()> {
        let field = &self.property.field;
        let ty = &self.property.ty;
        let setter = methods::setter(self.property);
        let mapper_method = methods::mapper(self.property);
        let getter = methods::getter(self.property);
        let name = self.property.label();
        let link = self.datatype.getter_link(self.property);

        let mut method = code.nested();
        let value = fresh_variable(&mut method, &name)?;
        drop(method);
        let set_doc = doc(format!("Sets the value to be returned by {link}."));
        code.add(quote! {
            #set_doc
            pub fn #setter(&mut self, #value: #ty) -> &mut Self {
                self.#field = ::core::option::Option::Some(#value);
                self
            }
        });

        let mut method = code.nested();
        let function = fresh_type_param(&mut method, "F")?;
        let mapper = fresh_variable(&mut method, "mapper")?;
        let current = fresh_variable(&mut method, &name)?;
        method.add(quote! {
            if let ::core::option::Option::Some(#current) = self.#field.take() {
                self.#field = ::core::option::Option::Some(#mapper(#current));
            }
            self
        });
        let body = method.into_tokens();
        let map_doc = doc(format!(
            "Replaces the value to be returned by {link} by applying `mapper` to it. \
             Does nothing if the value has not been set."
        ));
        let get_doc = doc(format!(
            "Returns the value that will be returned by {link}, if it has been set."
        ));
        code.add(quote! {
            #map_doc
            pub fn #mapper_method<#function>(&mut self, #mapper: #function) -> &mut Self
            where
                #function: ::core::ops::FnOnce(#ty) -> #ty,
            {
                #body
            }

            #get_doc
            pub fn #getter(&self) -> ::core::option::Option<&#ty> {
                self.#field.as_ref()
            }
        });
        Ok(())
    }

    fn add_missing_check(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()> {
        if self.initially != Initially::Required {
            return Ok(());
        }
        let missing = missing_fields(code)?;
        let field = &self.property.field;
        let name = self.property.label();
        code.add(quote! {
            if self.#field.is_none() {
                #missing.push(#name);
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
        let missing = self.missing();
        code.add(quote! {
            #final_field: ::core::clone::Clone::clone(
                #builder.#field.as_ref().ok_or_else(|| #missing)?
            ),
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
        code.add(quote! {
            self.#setter(::core::clone::Clone::clone(#value.#getter()));
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
        let setter = methods::setter(self.property);
        let final_field = &self.property.name;
        code.add(quote! {
            #builder.#setter(::core::clone::Clone::clone(&self.#final_field));
        });
        Ok(())
    }

    fn add_read_value_fragment(
        &self,
        code: &mut SourceBuilder<'_>,
        final_field: &TokenStream,
    ) -> darling::Result<()> {
        code.add(quote! { &#final_field });
        Ok(())
    }

    fn add_set_from_result(
        &self,
        code: &mut SourceBuilder<'_>,
        builder: &syn::Ident,
        variable: &TokenStream,
    ) -> darling::Result<()> {
        let setter = methods::setter(self.property);
        code.add(quote! { #builder.#setter(#variable); });
        Ok(())
    }

    fn add_clear_field(&self, code: &mut SourceBuilder<'_>) -> darling::Result<()> {
        let field = &self.property.field;
        match fresh_builder(code, self.datatype)? {
            Some(defaults) => {
                code.add(quote! {
                    self.#field = ::core::clone::Clone::clone(&#defaults.#field);
                });
            }
            None => {
                code.add(quote! { self.#field = ::core::option::Option::None; });
            }
        }
        Ok(())
    }
}
