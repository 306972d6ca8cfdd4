//! Ordered structural checks run before anything is synthesized

use tracing::debug;

use crate::error::GenerationError;
use crate::extract::{AliasDecl, ExtractedVariant, PayloadExtractor};
use crate::synth::SIMPLIFIED_TYPE_NAME;
use crate::tree::{DeclKind, NodeId, NodeKind, SyntaxTree};

/// A declaration that passed every check, with its variants in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDeclaration {
    pub name: String,
    pub node: NodeId,
    pub variants: Vec<ExtractedVariant>,
    pub aliases: Vec<AliasDecl>,
}

/// Run the checks in order and stop at the first failure:
/// 1. the declaration is a sum type,
/// 2. no directly nested member is already named `Simplified`,
/// 3. at least one variant carries a payload (extractor errors win).
pub fn validate(tree: &SyntaxTree) -> Result<ValidatedDeclaration, GenerationError> {
    let root = tree.root();
    if !matches!(tree.node(root).kind(), NodeKind::Declaration(DeclKind::Sum)) {
        return Err(GenerationError::NotASumType { decl: root });
    }

    let existing = tree.first_recursive_child(root, |node, depth| {
        depth == 1
            && node.kind().is_member()
            && tree.name_of(node.id()) == Some(SIMPLIFIED_TYPE_NAME)
    })?;
    if let Some(member) = existing {
        return Err(GenerationError::AlreadySimplified { member });
    }

    let variant_ids = tree.all_recursive_children(root, |node, depth| {
        depth == 1 && matches!(node.kind(), NodeKind::Variant)
    })?;

    let mut extractor = PayloadExtractor::new(tree);
    let variants = variant_ids
        .into_iter()
        .enumerate()
        .map(|(ordinal, id)| extractor.extract(id, ordinal))
        .collect::<Result<Vec<_>, _>>()?;

    let name = tree.name_of(root).unwrap_or_default().to_owned();
    if variants.iter().all(|variant| variant.signature.is_none()) {
        debug!(declaration = %name, "no variant with a payload");
        return Err(GenerationError::NoPayloadedVariant { decl: root });
    }

    Ok(ValidatedDeclaration {
        name,
        node: root,
        variants,
        aliases: extractor.into_aliases(),
    })
}
