//! Generic parameter analysis for synthesized type aliases

use proc_macro2::{TokenStream as TokenStream2, TokenTree};
use quote::ToTokens;
use std::collections::HashSet;
use syn::{GenericParam, Generics, Type};

/// Collect every identifier and lifetime name (as `'a`) mentioned in a token stream
fn collect_referenced_names(tokens: TokenStream2, names: &mut HashSet<String>) {
    let mut after_quote = false;
    for token in tokens {
        match token {
            TokenTree::Ident(ident) => {
                let ident = ident.to_string();
                if after_quote {
                    names.insert(format!("'{ident}"));
                } else {
                    names.insert(ident);
                }
                after_quote = false;
            }
            TokenTree::Punct(punct) => after_quote = punct.as_char() == '\'',
            TokenTree::Group(group) => {
                collect_referenced_names(group.stream(), names);
                after_quote = false;
            }
            TokenTree::Literal(_) => after_quote = false,
        }
    }
}

/// Extract the enum's generic parameters used in a given type
pub fn used_generic_params(ty: &Type, generics: &Generics) -> HashSet<String> {
    let mut referenced = HashSet::new();
    collect_referenced_names(ty.to_token_stream(), &mut referenced);

    generics
        .params
        .iter()
        .filter_map(|param| {
            let name = match param {
                GenericParam::Type(t) => t.ident.to_string(),
                GenericParam::Lifetime(l) => l.lifetime.to_string(),
                GenericParam::Const(c) => c.ident.to_string(),
            };
            referenced.contains(&name).then_some(name)
        })
        .collect()
}

/// Build alias generics containing only the parameters the aliased type uses,
/// without bounds, defaults or where clause (bounds are not enforced on type
/// aliases).
pub fn alias_generics(generics: &Generics, ty: &Type) -> Generics {
    let used = used_generic_params(ty, generics);

    let mut alias = generics.clone();
    alias.where_clause = None;
    alias.params = alias
        .params
        .into_iter()
        .filter_map(|param| match param {
            GenericParam::Type(mut t) if used.contains(&t.ident.to_string()) => {
                t.attrs.clear();
                t.colon_token = None;
                t.bounds.clear();
                t.eq_token = None;
                t.default = None;
                Some(GenericParam::Type(t))
            }
            GenericParam::Lifetime(mut l) if used.contains(&l.lifetime.to_string()) => {
                l.attrs.clear();
                l.colon_token = None;
                l.bounds.clear();
                Some(GenericParam::Lifetime(l))
            }
            GenericParam::Const(mut c) if used.contains(&c.ident.to_string()) => {
                c.attrs.clear();
                c.eq_token = None;
                c.default = None;
                Some(GenericParam::Const(c))
            }
            _ => None,
        })
        .collect();

    if alias.params.is_empty() {
        alias.lt_token = None;
        alias.gt_token = None;
    }
    alias
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_used_generic_params() {
        let generics: Generics = parse_quote!(<'a, T: Clone, U, const N: usize>);
        let ty: Type = parse_quote!(fn(&'a T, [u8; N]) -> bool);

        let used = used_generic_params(&ty, &generics);
        assert!(used.contains("'a"));
        assert!(used.contains("T"));
        assert!(used.contains("N"));
        assert!(!used.contains("U"));
    }

    #[test]
    fn test_alias_generics_strip_bounds() {
        let item: syn::ItemEnum = parse_quote! {
            enum Callback<'a, T: Clone + 'a, U> where U: Default { A(U) }
        };
        let generics = item.generics;
        assert!(generics.where_clause.is_some());
        let ty: Type = parse_quote!(fn(&'a T) -> bool);

        let alias = alias_generics(&generics, &ty);
        assert_eq!(alias.to_token_stream().to_string(), "< 'a , T >");
        assert!(alias.where_clause.is_none());
    }

    #[test]
    fn test_alias_generics_empty_when_unused() {
        let generics: Generics = parse_quote!(<T>);
        let ty: Type = parse_quote!(fn(i32) -> bool);

        let alias = alias_generics(&generics, &ty);
        assert!(alias.params.is_empty());
        assert!(alias.to_token_stream().is_empty());
    }
}
