//! Host-neutral generation: validate, synthesize, or explain why not

use tracing::{debug, warn};

use crate::diagnostic::Diagnostic;
use crate::error::{FatalError, GenerationError};
use crate::synth::{synthesize, SynthesizedDecl};
use crate::tree::SyntaxTree;
use crate::validate::validate;

#[derive(Debug)]
pub enum GenerationResult {
    Declarations(Vec<SynthesizedDecl>),
    Diagnostics(Vec<Diagnostic>),
}

/// Run the validation gate and the synthesizer over a snapshot.
///
/// User-facing problems come back as [`GenerationResult::Diagnostics`]; only
/// a tree too deep to query aborts with a [`FatalError`].
pub fn generate(tree: &SyntaxTree) -> Result<GenerationResult, FatalError> {
    let name = tree.name_of(tree.root()).unwrap_or_default();
    debug!(declaration = %name, "generating simplified declarations");

    let outcome = validate(tree).and_then(|validated| synthesize(&validated));
    match outcome {
        Ok(decls) => {
            debug!(declaration = %name, count = decls.len(), "synthesized declarations");
            Ok(GenerationResult::Declarations(decls))
        }
        Err(error) => report(tree, error).map(GenerationResult::Diagnostics),
    }
}

/// Turn a generation error into diagnostics, escalating the ones that mean
/// the tree itself could not be walked.
pub fn report(tree: &SyntaxTree, error: GenerationError) -> Result<Vec<Diagnostic>, FatalError> {
    if let GenerationError::RecursionTooDeep(query) = error {
        return Err(FatalError::MalformedTree(query));
    }

    let diagnostic = Diagnostic::from_error(tree, &error);
    warn!(kind = ?diagnostic.kind, "{}", diagnostic.message);
    Ok(vec![diagnostic])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;
    use crate::error::QueryError;
    use crate::query::MAX_RECURSION_DEPTH;
    use crate::snapshot::snapshot_item;
    use crate::synth::SimplifiedEnumDecl;
    use crate::tree::{DeclKind, NodeKind};
    use pretty_assertions::assert_eq;
    use proc_macro2::Span;
    use syn::parse_quote;

    fn declarations(item: syn::Item) -> Vec<SynthesizedDecl> {
        match generate(&snapshot_item(&item)).unwrap() {
            GenerationResult::Declarations(decls) => decls,
            GenerationResult::Diagnostics(diagnostics) => {
                panic!("unexpected diagnostics: {diagnostics:?}")
            }
        }
    }

    fn diagnostic_kinds(item: syn::Item) -> Vec<DiagnosticKind> {
        match generate(&snapshot_item(&item)).unwrap() {
            GenerationResult::Diagnostics(diagnostics) => {
                diagnostics.iter().map(|d| d.kind).collect()
            }
            GenerationResult::Declarations(decls) => panic!("unexpected declarations: {decls:?}"),
        }
    }

    fn simplified(decls: &[SynthesizedDecl]) -> &SimplifiedEnumDecl {
        decls
            .iter()
            .find_map(|decl| match decl {
                SynthesizedDecl::SimplifiedEnum(simplified) => Some(simplified),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_named_payloads() {
        let decls = declarations(parse_quote! {
            enum MyEnum {
                One(String),
                Two(i32),
                Three(TestStructExample),
                Four,
            }
        });

        let annotations: Vec<_> = simplified(&decls)
            .variants
            .iter()
            .map(|v| v.annotation.as_str())
            .collect();
        assert_eq!(
            annotations,
            vec!["String", "i32", "TestStructExample", " -- has no payload"]
        );
    }

    #[test]
    fn test_function_payloads_get_aliases() {
        let decls = declarations(parse_quote! {
            enum MNTestFncEnum {
                NoSorting(MyFunc),
                ByIdHashes,
                Custom(fn(&dyn std::fmt::Debug, &dyn std::fmt::Debug) -> bool),
                Reverse(fn(i32) -> i32),
            }
        });

        let aliases: Vec<_> = decls
            .iter()
            .filter_map(|decl| match decl {
                SynthesizedDecl::Alias(alias) => Some(alias.name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(aliases, vec!["AnonymousFunc_0", "AnonymousFunc_1"]);
        assert_eq!(decls.len(), 4);
        assert_eq!(simplified(&decls).variants[3].annotation, "AnonymousFunc_1");
    }

    #[test]
    fn test_struct_reports_not_a_sum_type() {
        let kinds = diagnostic_kinds(parse_quote! {
            struct MNTestStruct {
                x: i32,
            }
        });
        assert_eq!(kinds, vec![DiagnosticKind::NotASumType]);
    }

    #[test]
    fn test_already_simplified_reported_first() {
        let kinds = diagnostic_kinds(parse_quote! {
            enum MNTestFncEnum { One, Two, Simplified }
        });
        assert_eq!(kinds, vec![DiagnosticKind::AlreadySimplified]);
    }

    #[test]
    fn test_all_unit_variants() {
        let kinds = diagnostic_kinds(parse_quote! {
            enum MyEnum { One, Two, Three, Four }
        });
        assert_eq!(kinds, vec![DiagnosticKind::NoPayloadedVariant]);
    }

    #[test]
    fn test_duplicate_variant_names_fail_synthesis() {
        let span = Span::call_site();
        let mut tree = SyntaxTree::new(NodeKind::Declaration(DeclKind::Sum), "enum E", span);
        let root = tree.root();
        tree.push(root, NodeKind::Name, "E", span);
        for _ in 0..2 {
            let variant = tree.push(root, NodeKind::Variant, "A(Int)", span);
            tree.push(variant, NodeKind::Name, "A", span);
            let clause = tree.push(
                variant,
                NodeKind::PayloadClause {
                    open: Some(crate::tree::Delimiter::Paren),
                    close: Some(crate::tree::Delimiter::Paren),
                },
                "(Int)",
                span,
            );
            tree.push(
                clause,
                NodeKind::PayloadSlot {
                    label: None,
                    ty: crate::tree::TypeExpr::Named("Int".into()),
                },
                "Int",
                span,
            );
        }

        let GenerationResult::Diagnostics(diagnostics) = generate(&tree).unwrap() else {
            panic!("expected diagnostics");
        };
        assert_eq!(diagnostics[0].kind, DiagnosticKind::SynthesisFailed);
        assert_eq!(
            diagnostics[0].message,
            "simplified_enum failed creating a simplified enum for `E`"
        );
    }

    #[test]
    fn test_deep_tree_is_fatal() {
        let span = Span::call_site();
        let mut tree = SyntaxTree::new(NodeKind::Declaration(DeclKind::Sum), "enum E", span);
        let mut last = tree.root();
        for _ in 0..MAX_RECURSION_DEPTH {
            last = tree.push(last, NodeKind::NestedDecl, "nested", span);
        }

        assert_eq!(
            generate(&tree).unwrap_err(),
            FatalError::MalformedTree(QueryError::RecursionTooDeep)
        );
    }

    #[test]
    fn test_report_escalates_recursion_only() {
        let tree = snapshot_item(&parse_quote!(enum E { A(u8) }));

        assert!(report(&tree, GenerationError::RecursionTooDeep(QueryError::RecursionTooDeep)).is_err());
        let diagnostics = report(&tree, GenerationError::NoPayloadedVariant { decl: tree.root() }).unwrap();
        assert_eq!(diagnostics.len(), 1);
    }
}
