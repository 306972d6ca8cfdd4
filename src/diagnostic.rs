//! Diagnostics and advisory fix-its for rejected declarations.
//!
//! Fix-its are suggestions only: they are rendered into the reported message
//! as a `help:` section and never applied to the source.

use proc_macro2::{Span, TokenStream as TokenStream2};

use crate::error::GenerationError;
use crate::synth::SIMPLIFIED_TYPE_NAME;
use crate::tree::{NodeId, NodeKind, SyntaxTree};

/// Payload types handed out round-robin by suggested rewrites
pub const PLACEHOLDER_PAYLOAD_TYPES: [&str; 4] = ["i32", "String", "bool", "f64"];

pub const RENAMED_MEMBER_PREFIX: &str = "Old";

const FALLBACK_DECL_NAME: &str = "MyEnum";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    NotASumType,
    AlreadySimplified,
    NoPayloadedVariant,
    MultiplePayloadGroupsInVariant,
    UnclearVariantName,
    RecursionTooDeep,
    SynthesisFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
}

#[derive(Debug, Clone)]
pub struct FixIt {
    pub message: String,
    pub replacement: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    pub fix_it: Option<FixIt>,
}

impl Diagnostic {
    pub fn from_error(tree: &SyntaxTree, error: &GenerationError) -> Self {
        let root = tree.root();
        let (span, fix_it) = match error {
            GenerationError::NotASumType { decl } => {
                (span_of(tree, *decl), Some(recast_as_sum_type(tree, *decl)))
            }
            GenerationError::NoPayloadedVariant { decl } => {
                (span_of(tree, *decl), Some(add_placeholder_payloads(tree, *decl)))
            }
            GenerationError::AlreadySimplified { member } => {
                let fix_it = rename_member(tree, *member);
                (fix_it.span, Some(fix_it))
            }
            GenerationError::MultiplePayloadGroupsInVariant { node, .. } => (span_of(tree, *node), None),
            GenerationError::UnclearVariantName { node, .. } => {
                let variant = tree
                    .first_recursive_parent(*node, |n, _| matches!(n.kind(), NodeKind::Variant))
                    .ok()
                    .flatten()
                    .unwrap_or(*node);
                (span_of(tree, variant), None)
            }
            GenerationError::RecursionTooDeep(_) | GenerationError::SynthesisFailed { .. } => {
                (span_of(tree, root), None)
            }
        };

        Diagnostic {
            kind: error.kind(),
            severity: Severity::Error,
            message: error.to_string(),
            span,
            fix_it,
        }
    }

    /// Full text shown to the user, including the suggested rewrite.
    pub fn rendered_message(&self) -> String {
        match &self.fix_it {
            Some(fix_it) => format!(
                "{}\n\nhelp: {}:\n\n{}",
                self.message, fix_it.message, fix_it.replacement
            ),
            None => self.message.clone(),
        }
    }

    pub fn to_syn_error(&self) -> syn::Error {
        match self.severity {
            Severity::Error => syn::Error::new(self.span, self.rendered_message()),
        }
    }
}

/// Combine diagnostics into `compile_error!` invocations.
pub fn to_compile_errors(diagnostics: &[Diagnostic]) -> TokenStream2 {
    let mut errors = diagnostics.iter().map(Diagnostic::to_syn_error);
    let Some(mut combined) = errors.next() else {
        return TokenStream2::new();
    };
    for error in errors {
        combined.combine(error);
    }
    combined.to_compile_error()
}

fn span_of(tree: &SyntaxTree, id: NodeId) -> Span {
    tree.node(id).span()
}

/// Name of the outermost declaration containing `id`.
fn declaration_name(tree: &SyntaxTree, id: NodeId) -> String {
    tree.topmost_recursive_parent(id, |node, _| matches!(node.kind(), NodeKind::Declaration(_)))
        .ok()
        .flatten()
        .and_then(|decl| tree.name_of(decl))
        .unwrap_or(FALLBACK_DECL_NAME)
        .to_owned()
}

fn placeholder(index: usize) -> &'static str {
    PLACEHOLDER_PAYLOAD_TYPES[index % PLACEHOLDER_PAYLOAD_TYPES.len()]
}

fn recast_as_sum_type(tree: &SyntaxTree, decl: NodeId) -> FixIt {
    let name = declaration_name(tree, decl);
    FixIt {
        message: format!("declare `{name}` as an enum whose variants carry payloads"),
        replacement: format!(
            "enum {name} {{\n    First({}),\n    Second({}),\n}}",
            placeholder(0),
            placeholder(1)
        ),
        span: span_of(tree, decl),
    }
}

fn add_placeholder_payloads(tree: &SyntaxTree, decl: NodeId) -> FixIt {
    let name = declaration_name(tree, decl);
    let variants: String = tree
        .children(decl)
        .iter()
        .filter(|&&id| matches!(tree.node(id).kind(), NodeKind::Variant))
        .filter_map(|&id| tree.name_of(id))
        .enumerate()
        .map(|(index, variant)| format!("    {variant}({}),\n", placeholder(index)))
        .collect();
    FixIt {
        message: "add a payload type to the variants".to_owned(),
        replacement: format!("enum {name} {{\n{variants}}}"),
        span: span_of(tree, decl),
    }
}

fn rename_member(tree: &SyntaxTree, member: NodeId) -> FixIt {
    let name_token = tree
        .first_recursive_child(member, |node, depth| {
            depth == 1 && matches!(node.kind(), NodeKind::Name)
        })
        .ok()
        .flatten()
        .unwrap_or(member);
    FixIt {
        message: format!("rename the existing `{SIMPLIFIED_TYPE_NAME}` member"),
        replacement: format!("{RENAMED_MEMBER_PREFIX}{SIMPLIFIED_TYPE_NAME}"),
        span: span_of(tree, name_token),
    }
}
