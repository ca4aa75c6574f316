//! Small helpers for inspecting declared types.

use syn::ext::IdentExt;
use syn::visit::{self, Visit};

/// Strips invisible groups that macro expansion may wrap around a type.
pub fn strip_groups(ty: &syn::Type) -> &syn::Type {
    match ty {
        syn::Type::Group(group) => strip_groups(&group.elem),
        syn::Type::Paren(paren) => strip_groups(&paren.elem),
        _ => ty,
    }
}

/// Returns true if `path` names `Option`, either bare or through
/// `std::option` / `core::option`.
pub fn is_option_path(path: &syn::Path) -> bool {
    let names: Vec<String> = path.segments.iter().map(|seg| seg.ident.to_string()).collect();
    let all_plain = path
        .segments
        .iter()
        .take(path.segments.len().saturating_sub(1))
        .all(|seg| seg.arguments.is_none());
    if !all_plain {
        return false;
    }
    match names.as_slice() {
        [last] => last == "Option" && path.leading_colon.is_none(),
        [root, module, last] => {
            (root == "std" || root == "core") && module == "option" && last == "Option"
        }
        _ => false,
    }
}

/// If `ty` is exactly `Option<T>`, returns `T`.
pub fn option_argument(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(type_path) = strip_groups(ty) else {
        return None;
    };
    if type_path.qself.is_some() || !is_option_path(&type_path.path) {
        return None;
    }
    let last = type_path.path.segments.last()?;
    let syn::PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first()? {
        syn::GenericArgument::Type(inner) => Some(strip_groups(inner)),
        _ => None,
    }
}

/// If `ty` is a bare single-segment path with no generic arguments, returns
/// its identifier.
pub fn bare_ident(ty: &syn::Type) -> Option<&syn::Ident> {
    let syn::Type::Path(type_path) = strip_groups(ty) else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    type_path.path.get_ident()
}

/// Names declared by a generic parameter list, lifetimes included.
pub fn generic_param_names(generics: &syn::Generics) -> Vec<String> {
    generics
        .params
        .iter()
        .map(|param| match param {
            syn::GenericParam::Type(ty) => ty.ident.to_string(),
            syn::GenericParam::Const(c) => c.ident.to_string(),
            syn::GenericParam::Lifetime(lt) => lt.lifetime.to_string(),
        })
        .collect()
}

/// Collects every path segment named inside a syntax tree.
#[derive(Default)]
struct PathNames(Vec<String>);

impl<'ast> Visit<'ast> for PathNames {
    fn visit_path_segment(&mut self, segment: &'ast syn::PathSegment) {
        let name = segment.ident.unraw().to_string();
        if !self.0.contains(&name) {
            self.0.push(name);
        }
        visit::visit_path_segment(self, segment);
    }
}

/// Names a field type refers to, such as `F` and `Option` in `Option<F>`.
/// Generated type parameters and locals must not shadow any of them.
pub fn type_path_names(ty: &syn::Type) -> Vec<String> {
    let mut names = PathNames::default();
    names.visit_type(ty);
    names.0
}

/// Names a default-value expression refers to.
pub fn expr_path_names(expr: &syn::Expr) -> Vec<String> {
    let mut names = PathNames::default();
    names.visit_expr(expr);
    names.0
}
