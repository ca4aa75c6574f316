use proc_macro2::TokenStream;
use quote::quote;

use super::GenerateRecord;
use super::scan::Unit;
use crate::declarations::{MissingFields, fresh_variable, reserve};
use crate::misc::{expr_path_names, generic_param_names, type_path_names};
use crate::source::SourceBuilder;
use crate::strategy::{CodeGenerator, Config, create_code_generator};

impl GenerateRecord {
    pub(crate) fn emit_unit(&self, unit: &Unit) -> darling::Result<TokenStream> {
        let datatype = &unit.datatype;
        let mut code = SourceBuilder::unit();
        for name in generic_param_names(&datatype.generics) {
            reserve(&mut code, name)?;
        }
        for property in &unit.properties {
            for name in type_path_names(&property.ty) {
                reserve(&mut code, name)?;
            }
            if let Some(expr) = property.default_expr() {
                for name in expr_path_names(&expr) {
                    reserve(&mut code, name)?;
                }
            }
        }

        let mut errors = darling::Error::accumulator();
        let generators: Vec<CodeGenerator<'_>> = unit
            .properties
            .iter()
            .filter_map(|property| {
                errors.handle(create_code_generator(&Config { datatype, property }))
            })
            .collect();
        errors.finish()?;

        for generator in &generators {
            generator.add_value_field_declaration(&mut code, &generator.property().name)?;
        }
        let value_fields = code.take();

        for generator in &generators {
            generator.add_builder_field_declaration(&mut code)?;
        }
        let builder_fields = code.take();

        let constructor = emit_constructor(&mut code, &generators)?;
        for generator in &generators {
            generator.add_builder_field_accessors(&mut code)?;
        }
        let accessors = code.take();

        let getters = emit_value_getters(&mut code, &generators)?;
        let to_builder = emit_to_builder(&mut code, unit, &generators)?;
        let merge_from = emit_merge_from(&mut code, unit, &generators)?;
        let merge_from_builder = emit_merge_from_builder(&mut code, &generators)?;
        let clear = emit_clear(&mut code, &generators)?;
        let build = emit_build(&mut code, unit, &generators)?;

        let name = &datatype.name;
        let vis = &datatype.vis;
        let attrs = &datatype.attrs;
        let builder = &datatype.builder;
        let builder_type = datatype.builder_type();
        let generics = &datatype.generics;
        let where_clause = &generics.where_clause;

        let mut bounded = generics.clone();
        if bounded.type_params().next().is_some() {
            let predicates = &mut bounded.make_where_clause().predicates;
            for property in &unit.properties {
                let ty = &property.ty;
                predicates.push(syn::parse_quote!(#ty: ::core::clone::Clone));
            }
        }
        let (impl_generics, ty_generics, bounded_where) = bounded.split_for_impl();

        let builder_doc = format!("Builder for [`{name}`].");
        let builder_fn_doc = format!("Returns a new builder for [`{name}`].");
        tracing::debug!(builder = %builder, fields = generators.len(), "emitting record");

        Ok(quote! {
            #(#attrs)*
            #vis struct #name #generics #where_clause {
                #value_fields
            }

            #[allow(dead_code)]
            impl #impl_generics #name #ty_generics #bounded_where {
                #[doc = #builder_fn_doc]
                #vis fn builder() -> #builder_type {
                    <#builder_type>::new()
                }

                #to_builder
                #getters
            }

            #[doc = #builder_doc]
            #[derive(Clone, Debug)]
            #vis struct #builder #generics #where_clause {
                #builder_fields
            }

            #[allow(dead_code)]
            impl #impl_generics #builder #ty_generics #bounded_where {
                #constructor
                #accessors
                #merge_from
                #merge_from_builder
                #clear
                #build
            }

            impl #impl_generics ::core::default::Default for #builder #ty_generics #bounded_where {
                fn default() -> Self {
                    Self::new()
                }
            }
        })
    }
}

/// `new()`: storage initializers, then declared defaults.
fn emit_constructor(
    code: &mut SourceBuilder<'_>,
    generators: &[CodeGenerator<'_>],
) -> darling::Result<TokenStream> {
    for generator in generators {
        generator.add_builder_field_initializer(code)?;
    }
    let initializers = code.take();

    let mut method = code.nested();
    let builder = fresh_variable(&mut method, "builder")?;
    for generator in generators {
        if let Some(expr) = generator.property().default_expr() {
            generator.add_set_from_result(&mut method, &builder, &quote!(#expr))?;
        }
    }
    let defaults = method.into_tokens();

    let body = if defaults.is_empty() {
        quote! { Self { #initializers } }
    } else {
        quote! {
            let mut #builder = Self { #initializers };
            #defaults
            #builder
        }
    };
    Ok(quote! {
        /// Creates a builder with every field unset, apart from declared
        /// defaults.
        pub fn new() -> Self {
            #body
        }
    })
}

fn emit_value_getters(
    code: &mut SourceBuilder<'_>,
    generators: &[CodeGenerator<'_>],
) -> darling::Result<TokenStream> {
    let mut getters = TokenStream::new();
    for generator in generators {
        let property = generator.property();
        let name = &property.name;
        let mut method = code.nested();
        generator.add_read_value_fragment(&mut method, &quote!(self.#name))?;
        let body = method.into_tokens();

        let docs = &property.docs;
        let vis = &property.vis;
        let getter_type = generator.getter_type();
        getters.extend(quote! {
            #(#docs)*
            #vis fn #name(&self) -> #getter_type {
                #body
            }
        });
    }
    Ok(getters)
}

fn emit_to_builder(
    code: &mut SourceBuilder<'_>,
    unit: &Unit,
    generators: &[CodeGenerator<'_>],
) -> darling::Result<TokenStream> {
    let vis = &unit.datatype.vis;
    let builder_type = unit.datatype.builder_type();

    let mut method = code.nested();
    let builder = fresh_variable(&mut method, "builder")?;
    for generator in generators {
        generator.add_set_builder_from_partial(&mut method, &builder)?;
    }
    let seeds = method.into_tokens();

    Ok(quote! {
        /// Returns a builder holding every field of `self`.
        #vis fn to_builder(&self) -> #builder_type {
            let mut #builder = <#builder_type>::new();
            #seeds
            #builder
        }
    })
}

fn emit_merge_from(
    code: &mut SourceBuilder<'_>,
    unit: &Unit,
    generators: &[CodeGenerator<'_>],
) -> darling::Result<TokenStream> {
    let value_type = unit.datatype.value_type();

    let mut method = code.nested();
    let value = fresh_variable(&mut method, "value")?;
    for generator in generators {
        generator.add_merge_from_value(&mut method, &value)?;
    }
    let body = method.into_tokens();

    Ok(quote! {
        /// Copies every present field of `value` into this builder. Fields
        /// absent from `value` are left untouched.
        pub fn merge_from(&mut self, #value: &#value_type) -> &mut Self {
            #body
            self
        }
    })
}

fn emit_merge_from_builder(
    code: &mut SourceBuilder<'_>,
    generators: &[CodeGenerator<'_>],
) -> darling::Result<TokenStream> {
    let mut method = code.nested();
    let builder = fresh_variable(&mut method, "builder")?;
    for generator in generators {
        generator.add_merge_from_builder(&mut method, &builder)?;
    }
    let body = method.into_tokens();

    Ok(quote! {
        /// Copies every field set on `builder` into this builder. Fields
        /// unset on `builder` are left untouched.
        pub fn merge_from_builder(&mut self, #builder: &Self) -> &mut Self {
            #body
            self
        }
    })
}

fn emit_clear(
    code: &mut SourceBuilder<'_>,
    generators: &[CodeGenerator<'_>],
) -> darling::Result<TokenStream> {
    let mut method = code.nested();
    for generator in generators {
        generator.add_clear_field(&mut method)?;
    }
    let body = method.into_tokens();

    Ok(quote! {
        /// Resets every field to the state of a freshly created builder.
        pub fn clear(&mut self) -> &mut Self {
            #body
            self
        }
    })
}

fn emit_build(
    code: &mut SourceBuilder<'_>,
    unit: &Unit,
    generators: &[CodeGenerator<'_>],
) -> darling::Result<TokenStream> {
    let name = &unit.datatype.name;
    let value_type = unit.datatype.value_type();
    let error = unit.datatype.build_error();

    let mut method = code.nested();
    for generator in generators {
        generator.add_missing_check(&mut method)?;
    }
    if let Some(missing) = method.scope().get(&MissingFields) {
        method.add(quote! {
            if !#missing.is_empty() {
                return ::core::result::Result::Err(#error::MissingFields(#missing));
            }
        });
    }
    let checks = method.take();

    for generator in generators {
        let final_field = &generator.property().name;
        generator.add_final_field_assignment(&mut method, final_field, &quote!(self))?;
    }
    let assignments = method.into_tokens();

    let doc = format!(
        "Returns a newly created [`{name}`] based on the contents of this builder.\n\n\
         # Errors\n\n\
         Fails with `MissingFields` naming every required field that is not set."
    );
    Ok(quote! {
        #[doc = #doc]
        pub fn build(&self) -> ::core::result::Result<#value_type, #error> {
            #checks
            ::core::result::Result::Ok(#name {
                #assignments
            })
        }
    })
}
