use proc_macro2::TokenStream;
use quote::ToTokens;

use crate::scope::Scope;

/// Emission context handed to every code generator.
///
/// Owns the tokens emitted so far and the [`Scope`] of the unit or method
/// being generated. Method bodies are written into a [`nested`] builder,
/// whose scope is a method-level child of this one.
///
/// [`nested`]: SourceBuilder::nested
#[derive(Debug)]
pub struct SourceBuilder<'p> {
    tokens: TokenStream,
    scope: Scope<'p>,
}

impl SourceBuilder<'static> {
    pub fn unit() -> Self {
        Self {
            tokens: TokenStream::new(),
            scope: Scope::unit(),
        }
    }
}

impl<'p> SourceBuilder<'p> {
    /// Opens a builder for one method body.
    pub fn nested(&mut self) -> SourceBuilder<'_> {
        SourceBuilder {
            tokens: TokenStream::new(),
            scope: self.scope.method(),
        }
    }

    pub fn add(&mut self, tokens: impl ToTokens) -> &mut Self {
        tokens.to_tokens(&mut self.tokens);
        self
    }

    pub fn scope(&self) -> &Scope<'p> {
        &self.scope
    }

    pub fn scope_mut(&mut self) -> &mut Scope<'p> {
        &mut self.scope
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Takes the tokens emitted so far, keeping the scope.
    pub fn take(&mut self) -> TokenStream {
        std::mem::take(&mut self.tokens)
    }

    pub fn into_tokens(self) -> TokenStream {
        self.tokens
    }
}
