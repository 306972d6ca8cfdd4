//! Error taxonomy of the generator

use thiserror::Error;

use crate::diagnostic::DiagnosticKind;
use crate::query::MAX_RECURSION_DEPTH;
use crate::synth::SIMPLIFIED_TYPE_NAME;
use crate::tree::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("syntax tree recursion was too deep (max {})", MAX_RECURSION_DEPTH)]
    RecursionTooDeep,
}

/// Why a declaration could not be simplified. Every variant except
/// `RecursionTooDeep` is reported back to the user as a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error(
        "simplified_enum can only be applied to an enum. (NOTE: the enum declaration must have at least one variant with a payload.)"
    )]
    NotASumType { decl: NodeId },

    #[error(
        "simplified_enum cannot be implemented: a member named \"{}\" was already declared",
        SIMPLIFIED_TYPE_NAME
    )]
    AlreadySimplified { member: NodeId },

    #[error(
        "simplified_enum can only be applied to an enum declaration that has at least one variant with a payload"
    )]
    NoPayloadedVariant { decl: NodeId },

    #[error("simplified_enum cannot be implemented: variant `{variant}` declares more than one payload slot")]
    MultiplePayloadGroupsInVariant { variant: String, node: NodeId },

    #[error("simplified_enum cannot be implemented: no clear variant name for payload `{raw}`")]
    UnclearVariantName { raw: String, node: NodeId },

    #[error(transparent)]
    RecursionTooDeep(#[from] QueryError),

    #[error("simplified_enum failed creating a simplified enum for `{name}`")]
    SynthesisFailed { name: String },
}

impl GenerationError {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            GenerationError::NotASumType { .. } => DiagnosticKind::NotASumType,
            GenerationError::AlreadySimplified { .. } => DiagnosticKind::AlreadySimplified,
            GenerationError::NoPayloadedVariant { .. } => DiagnosticKind::NoPayloadedVariant,
            GenerationError::MultiplePayloadGroupsInVariant { .. } => {
                DiagnosticKind::MultiplePayloadGroupsInVariant
            }
            GenerationError::UnclearVariantName { .. } => DiagnosticKind::UnclearVariantName,
            GenerationError::RecursionTooDeep(_) => DiagnosticKind::RecursionTooDeep,
            GenerationError::SynthesisFailed { .. } => DiagnosticKind::SynthesisFailed,
        }
    }
}

/// Aborts the whole invocation; no declarations are produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalError {
    #[error("internal error in simplified_enum: {0}")]
    MalformedTree(#[from] QueryError),
}
