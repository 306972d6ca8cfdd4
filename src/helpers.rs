//! Helper functions for rendering source text and identifiers

use proc_macro2::{Ident, Span};
use quote::ToTokens;

use crate::error::GenerationError;

/// Render tokens as compact, human-readable source text
/// (e.g. `Vec < u8 >` -> `Vec<u8>`, `fn (i32) -> bool` -> `fn(i32) -> bool`).
pub fn compact_tokens(tokens: &impl ToTokens) -> String {
    let mut text = tokens.to_token_stream().to_string();
    for (from, to) in [
        (" :: ", "::"),
        (":: ", "::"),
        (" ::", "::"),
        (" : ", ": "),
        (" < ", "<"),
        ("< ", "<"),
        (" <", "<"),
        (" >", ">"),
        (" ,", ","),
        ("( ", "("),
        (" )", ")"),
        ("[ ", "["),
        (" ]", "]"),
        ("& ", "&"),
        (" ;", ";"),
        ("fn (", "fn("),
        ("Fn (", "Fn("),
        ("FnMut (", "FnMut("),
        ("FnOnce (", "FnOnce("),
    ] {
        text = text.replace(from, to);
    }
    text
}

/// Parse `name` as a Rust identifier, falling back to a raw identifier for
/// keywords. Names that are not identifiers at all cannot be synthesized.
pub fn parse_ident(name: &str, span: Span) -> Result<Ident, GenerationError> {
    syn::parse_str::<Ident>(name)
        .or_else(|_| syn::parse_str::<Ident>(&format!("r#{name}")))
        .map(|mut ident| {
            ident.set_span(span);
            ident
        })
        .map_err(|_| GenerationError::SynthesisFailed {
            name: name.to_owned(),
        })
}

/// Convert a CamelCase name to snake_case, splitting acronyms before their
/// last capital (`MNTestStruct` -> `mn_test_struct`).
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev != '_' && (!prev.is_uppercase() || next_is_lower) {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }

    result
}

/// Default name of the module holding the generated items (`HttpMethod` -> `http_method`)
pub fn module_ident(enum_ident: &Ident) -> Result<Ident, GenerationError> {
    let name = enum_ident.to_string();
    let snake = to_snake_case(name.trim_start_matches("r#"));
    parse_ident(&snake, enum_ident.span())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{parse_quote, Type};

    #[test]
    fn test_compact_tokens() {
        let ty: Type = parse_quote!(std::collections::HashMap<String, Vec<u8>>);
        assert_eq!(compact_tokens(&ty), "std::collections::HashMap<String, Vec<u8>>");

        let ty: Type = parse_quote!(fn(&'static str, i32) -> bool);
        assert_eq!(compact_tokens(&ty), "fn(&'static str, i32) -> bool");

        let ty: Type = parse_quote!(Box<dyn Fn(i32) -> bool>);
        assert_eq!(compact_tokens(&ty), "Box<dyn Fn(i32) -> bool>");
    }

    #[test]
    fn test_parse_ident_handles_keywords() {
        let span = Span::call_site();
        assert_eq!(parse_ident("One", span).unwrap().to_string(), "One");
        assert_eq!(parse_ident("type", span).unwrap().to_string(), "r#type");
        assert_eq!(
            parse_ident("not an ident", span),
            Err(GenerationError::SynthesisFailed {
                name: "not an ident".into()
            })
        );
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("MyEnum"), "my_enum");
        assert_eq!(to_snake_case("MNTestStruct"), "mn_test_struct");
        assert_eq!(to_snake_case("Http2Method"), "http2_method");
        assert_eq!(to_snake_case("Sorting"), "sorting");
        assert_eq!(to_snake_case("Already_Snake"), "already_snake");
    }

    #[test]
    fn test_module_ident_is_snake_case() {
        let ident: Ident = parse_quote!(HttpMethod);
        assert_eq!(module_ident(&ident).unwrap().to_string(), "http_method");

        let ident: Ident = parse_quote!(Type);
        assert_eq!(module_ident(&ident).unwrap().to_string(), "r#type");
    }
}
