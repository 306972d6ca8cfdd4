//! Rust rendering of synthesized declarations

use proc_macro2::{Ident, TokenStream as TokenStream2};
use quote::quote;
use syn::{ItemEnum, Type};

use crate::config::MacroConfig;
use crate::error::GenerationError;
use crate::extract::{AliasDecl, PayloadShape};
use crate::helpers::{module_ident, parse_ident};
use crate::synth::{ProjectionFn, SimplifiedEnumDecl, SynthesizedDecl};
use crate::type_analysis::alias_generics;

/// Associated items of the generated enum that a variant of the same name
/// would shadow in path position.
const RESERVED_ASSOCIATED_NAMES: [&str; 6] = ["ALL", "COUNT", "iter", "index", "name", "payload"];

/// Render the generated items that follow the annotated enum: a module
/// holding the aliases and the simplified enum, then the projection impls.
pub fn render(
    item: &ItemEnum,
    config: &MacroConfig,
    decls: &[SynthesizedDecl],
) -> Result<TokenStream2, GenerationError> {
    let module = match &config.module {
        Some(module) => module.clone(),
        None => module_ident(&item.ident)?,
    };

    let mut aliases = Vec::new();
    let mut simplified = None;
    let mut projection = None;
    for decl in decls {
        match decl {
            SynthesizedDecl::Alias(alias) => aliases.push(render_alias(item, alias)?),
            SynthesizedDecl::SimplifiedEnum(decl) => {
                simplified = Some(render_simplified(item, decl)?)
            }
            SynthesizedDecl::Projection(func) => {
                projection = Some(render_projection(item, config, &module, func)?)
            }
        }
    }

    let vis = &item.vis;
    Ok(quote! {
        #vis mod #module {
            #[allow(unused_imports)]
            use super::*;

            #(#aliases)*
            #simplified
        }

        #projection
    })
}

fn render_alias(item: &ItemEnum, alias: &AliasDecl) -> Result<TokenStream2, GenerationError> {
    let name = parse_ident(&alias.name, item.ident.span())?;
    let target: Type = syn::parse_str(alias.target.text()).map_err(|_| {
        GenerationError::SynthesisFailed {
            name: alias.name.clone(),
        }
    })?;
    let generics = alias_generics(&item.generics, &target);

    Ok(quote! {
        #[allow(non_camel_case_types)]
        pub type #name #generics = #target;
    })
}

fn render_simplified(item: &ItemEnum, decl: &SimplifiedEnumDecl) -> Result<TokenStream2, GenerationError> {
    let name = parse_ident(&decl.name, item.ident.span())?;
    let variants = decl
        .variants
        .iter()
        .map(|variant| {
            if RESERVED_ASSOCIATED_NAMES.contains(&variant.name.as_str()) {
                return Err(GenerationError::SynthesisFailed {
                    name: variant.name.clone(),
                });
            }
            let span = item
                .variants
                .iter()
                .find(|source| source.ident == variant.name)
                .map_or_else(|| item.ident.span(), |source| source.ident.span());
            parse_ident(&variant.name, span)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let docs: Vec<_> = decl
        .variants
        .iter()
        .map(|variant| format!(" {}", variant.annotation.trim()))
        .collect();
    let names: Vec<_> = decl
        .variants
        .iter()
        .map(|variant| variant.name.trim_start_matches("r#").to_owned())
        .collect();
    let payloads: Vec<_> = decl
        .variants
        .iter()
        .map(|variant| variant.annotation.trim().to_owned())
        .collect();
    let count = variants.len();

    Ok(quote! {
        /// Payload-free mirror of the annotated enum, one variant per source variant.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum #name {
            #(
                #[doc = #docs]
                #variants,
            )*
        }

        impl #name {
            pub const COUNT: usize = #count;

            /// Every variant in declaration order
            pub const ALL: [#name; #count] = [#(#name::#variants),*];

            pub fn iter() -> impl ::core::iter::Iterator<Item = #name> {
                Self::ALL.into_iter()
            }

            /// Position of the variant in declaration order
            pub const fn index(self) -> usize {
                self as usize
            }

            pub const fn name(self) -> &'static str {
                match self {
                    #(Self::#variants => #names,)*
                }
            }

            /// Payload type of the source variant
            pub const fn payload(self) -> &'static str {
                match self {
                    #(Self::#variants => #payloads,)*
                }
            }
        }

        impl ::core::fmt::Display for #name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.name())
            }
        }
    })
}

fn render_projection(
    item: &ItemEnum,
    config: &MacroConfig,
    module: &Ident,
    func: &ProjectionFn,
) -> Result<TokenStream2, GenerationError> {
    let method = match &config.method {
        Some(method) => method.clone(),
        None => parse_ident(&func.name, item.ident.span())?,
    };
    let target = parse_ident(&func.target_type, item.ident.span())?;

    let arms = func
        .arms
        .iter()
        .map(|arm| {
            let variant = parse_ident(&arm.variant, item.ident.span())?;
            let simplified = parse_ident(&arm.target, item.ident.span())?;
            let pattern = match arm.shape {
                PayloadShape::Unit => quote!(Self::#variant),
                PayloadShape::Tuple => quote!(Self::#variant(..)),
                PayloadShape::Record => quote!(Self::#variant { .. }),
            };
            Ok(quote!(#pattern => #module::#target::#simplified,))
        })
        .collect::<Result<Vec<_>, GenerationError>>()?;

    let vis = &item.vis;
    let enum_name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #enum_name #ty_generics #where_clause {
            /// The variant of `self` with its payload stripped.
            #[must_use]
            #vis fn #method(&self) -> #module::#target {
                match self {
                    #(#arms)*
                }
            }

            /// Whether both values are the same variant, ignoring payloads.
            #vis fn is_same_variant(&self, other: &Self) -> bool {
                self.#method() == other.#method()
            }
        }

        impl #impl_generics ::core::convert::From<&#enum_name #ty_generics> for #module::#target #where_clause {
            fn from(value: &#enum_name #ty_generics) -> Self {
                value.#method()
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::snapshot_item;
    use crate::synth::synthesize;
    use crate::validate::validate;
    use pretty_assertions::assert_eq;
    use syn::{parse_quote, Item};

    fn render_item(item: ItemEnum, config: &MacroConfig) -> String {
        let tree = snapshot_item(&Item::Enum(item.clone()));
        let decls = synthesize(&validate(&tree).unwrap()).unwrap();
        render(&item, config, &decls).unwrap().to_string()
    }

    #[test]
    fn test_render_module_and_projection() {
        let output = render_item(
            parse_quote! {
                pub enum MyEnum {
                    One(String),
                    Two { count: usize },
                    Four,
                }
            },
            &MacroConfig::default(),
        );

        assert!(output.starts_with("pub mod my_enum {"));
        assert!(output.contains("pub enum Simplified { # [doc = \" String\"] One ,"));
        assert!(output.contains("# [doc = \" -- has no payload\"] Four ,"));
        assert!(output.contains("pub const COUNT : usize = 3usize ;"));
        assert!(output.contains(
            "match self { Self :: One (..) => my_enum :: Simplified :: One , \
             Self :: Two { .. } => my_enum :: Simplified :: Two , \
             Self :: Four => my_enum :: Simplified :: Four , }"
        ));
        assert!(output.contains("pub fn simplified (& self) -> my_enum :: Simplified"));
    }

    #[test]
    fn test_render_alias_with_used_generics_only() {
        let item: ItemEnum = parse_quote! {
            enum Callback<'a, T: Clone, U> {
                Typed(fn(&'a T) -> bool),
                Plain(U),
            }
        };
        let output = render_item(item, &MacroConfig::default());

        assert!(output.contains(
            "# [allow (non_camel_case_types)] pub type AnonymousFunc_0 < 'a , T > = fn (& 'a T) -> bool ;"
        ));
        assert!(output.contains("impl < 'a , T : Clone , U > Callback < 'a , T , U >"));
    }

    #[test]
    fn test_config_overrides_names() {
        let config: MacroConfig = syn::parse_quote!(module = kinds, method = kind);
        let output = render_item(
            parse_quote! {
                enum Token { Word(String), Space }
            },
            &config,
        );

        assert!(output.starts_with("mod kinds {"));
        assert!(output.contains("fn kind (& self) -> kinds :: Simplified"));
        assert!(output.contains("self . kind () == other . kind ()"));
    }

    #[test]
    fn test_unparseable_alias_target_fails() {
        let item: ItemEnum = parse_quote!(enum E { A(fn()) });
        let alias = AliasDecl {
            name: "AnonymousFunc_0".into(),
            target: crate::tree::TypeExpr::Other("fn(".into()),
        };
        assert_eq!(
            render_alias(&item, &alias).unwrap_err(),
            GenerationError::SynthesisFailed {
                name: "AnonymousFunc_0".into()
            }
        );
    }

    #[test]
    fn test_variant_shadowing_associated_item_fails() {
        let item: ItemEnum = parse_quote! {
            enum Filter { ALL(u8), None }
        };
        let tree = snapshot_item(&Item::Enum(item.clone()));
        let decls = synthesize(&validate(&tree).unwrap()).unwrap();

        assert_eq!(
            render(&item, &MacroConfig::default(), &decls).unwrap_err(),
            GenerationError::SynthesisFailed { name: "ALL".into() }
        );
    }

    #[test]
    fn test_simplified_enum_parses_back() {
        let item: ItemEnum = parse_quote! {
            enum Token { Word(String), Space }
        };
        let tree = snapshot_item(&Item::Enum(item.clone()));
        let decls = synthesize(&validate(&tree).unwrap()).unwrap();
        let SynthesizedDecl::SimplifiedEnum(decl) = &decls[0] else {
            panic!("expected simplified enum first");
        };
        let tokens = render_simplified(&item, decl).unwrap();
        let file: syn::File = syn::parse2(tokens).unwrap();
        let Item::Enum(simplified) = &file.items[0] else {
            panic!("expected enum first");
        };

        let names: Vec<_> = simplified.variants.iter().map(|v| v.ident.to_string()).collect();
        assert_eq!(names, vec!["Word", "Space"]);
        assert_eq!(simplified.ident, "Simplified");
    }

    #[test]
    fn test_generated_items_parse_back() {
        let item: ItemEnum = parse_quote! {
            pub(crate) enum Sorting {
                NoSorting(MyFunc),
                Custom(fn(&dyn std::fmt::Debug, &dyn std::fmt::Debug) -> bool),
                ByIdHashes,
            }
        };
        let tree = snapshot_item(&Item::Enum(item.clone()));
        let decls = synthesize(&validate(&tree).unwrap()).unwrap();
        let tokens = render(&item, &MacroConfig::default(), &decls).unwrap();
        let file: syn::File = syn::parse2(tokens).unwrap();

        assert_eq!(file.items.len(), 3);
        let Item::Mod(module) = &file.items[0] else {
            panic!("expected module first");
        };
        assert!(matches!(module.vis, syn::Visibility::Restricted(_)));
        assert_eq!(module.ident, "sorting");
    }
}
