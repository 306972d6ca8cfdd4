//! Derive a payload-free `Simplified` mirror of an enum.
//!
//! `#[simplified_enum]` keeps the annotated enum as written and adds:
//! - a module (the enum name in snake_case) holding `enum Simplified` with one
//!   unit variant per source variant, plus an `AnonymousFunc_<k>` alias for
//!   every inline `fn(..)` payload type,
//! - `fn simplified(&self)` projecting a value onto its `Simplified` variant,
//! - `fn is_same_variant(&self, other)` and `From<&Enum> for Simplified`.

mod codegen;
mod config;
mod diagnostic;
mod error;
mod extract;
mod helpers;
mod pipeline;
mod query;
mod snapshot;
mod synth;
mod tree;
mod type_analysis;
mod validate;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{spanned::Spanned, Item};
use tracing::debug;

use codegen::render;
use config::MacroConfig;
use diagnostic::to_compile_errors;
use error::{FatalError, GenerationError};
use pipeline::{generate, report, GenerationResult};
use snapshot::snapshot_item;

/// Attribute macro generating a simplified, payload-free version of an enum.
///
/// # Example
///
/// ```ignore
/// #[simplified_enum]
/// pub enum Sorting {
///     NoSorting(MyFunc),
///     Custom(fn(&Node, &Node) -> bool),
///     ByIdHashes,
/// }
///
/// // generates
/// pub mod sorting {
///     pub type AnonymousFunc_0 = fn(&Node, &Node) -> bool;
///
///     pub enum Simplified {
///         NoSorting,  // MyFunc
///         Custom,     // AnonymousFunc_0
///         ByIdHashes, // -- has no payload
///     }
/// }
///
/// assert_eq!(Sorting::ByIdHashes.simplified(), sorting::Simplified::ByIdHashes);
/// ```
///
/// The module and the projection method can be renamed:
///
/// ```ignore
/// #[simplified_enum(module = sort_kind, method = kind)]
/// pub enum Sorting { ... }
/// ```
///
/// The enum needs at least one variant with a payload, must not already
/// have a variant named `Simplified` or after one of the associated items of
/// `Simplified` (`ALL`, `COUNT`, `iter`, ...), and every payloaded variant
/// carries a single payload type.
#[proc_macro_attribute]
pub fn simplified_enum(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand(attr.into(), item.into()).into()
}

fn expand(attr: TokenStream2, item: TokenStream2) -> TokenStream2 {
    let config = match syn::parse2::<MacroConfig>(attr) {
        Ok(config) => config,
        Err(e) => {
            let e = e.to_compile_error();
            return quote! { #item #e };
        }
    };
    let parsed = match syn::parse2::<Item>(item.clone()) {
        Ok(parsed) => parsed,
        Err(e) => return e.to_compile_error(),
    };

    let generated = match expand_item(&config, &parsed) {
        Ok(tokens) => tokens,
        Err(fatal) => {
            tracing::error!(%fatal, "simplified_enum aborted");
            syn::Error::new(parsed.span(), fatal.to_string()).to_compile_error()
        }
    };

    quote! {
        #item
        #generated
    }
}

/// Generated items for `item`, or `compile_error!`s explaining why none were made.
fn expand_item(config: &MacroConfig, item: &Item) -> Result<TokenStream2, FatalError> {
    let tree = snapshot_item(item);
    debug!(?config, "expanding simplified_enum");

    let decls = match generate(&tree)? {
        GenerationResult::Declarations(decls) => decls,
        GenerationResult::Diagnostics(diagnostics) => return Ok(to_compile_errors(&diagnostics)),
    };

    let rendered = match item {
        Item::Enum(item) => render(item, config, &decls),
        _ => Err(GenerationError::NotASumType { decl: tree.root() }),
    };
    match rendered {
        Ok(tokens) => Ok(tokens),
        Err(error) => Ok(to_compile_errors(&report(&tree, error)?)),
    }
}
