//! Attribute arguments: `#[simplified_enum(module = name, method = name)]`

use proc_macro2::Ident;
use syn::parse::{Parse, ParseStream};
use syn::Token;

mod kw {
    syn::custom_keyword!(module);
    syn::custom_keyword!(method);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroConfig {
    /// Module holding the generated items, defaults to the snake_case enum name
    pub module: Option<Ident>,
    /// Projection method, defaults to `simplified`
    pub method: Option<Ident>,
}

impl Parse for MacroConfig {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut config = MacroConfig::default();

        while !input.is_empty() {
            let lookahead = input.lookahead1();
            let slot = if lookahead.peek(kw::module) {
                input.parse::<kw::module>()?;
                &mut config.module
            } else if lookahead.peek(kw::method) {
                input.parse::<kw::method>()?;
                &mut config.method
            } else {
                return Err(lookahead.error());
            };

            input.parse::<Token![=]>()?;
            let value: Ident = input.parse()?;
            if slot.is_some() {
                return Err(syn::Error::new(
                    value.span(),
                    "simplified_enum argument given more than once",
                ));
            }
            *slot = Some(value);

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }

        Ok(config)
    }
}
