//! Per-variant payload classification.
//!
//! Every variant reduces to exactly one [`PayloadSignature`]. Named payload
//! types contribute their own name, and any other non-function type (`&str`,
//! tuples, arrays) contributes its source text. Inline function types have no name, so
//! the extractor binds them to a fresh `AnonymousFunc_<k>` alias, numbered in
//! the order they are first seen within the declaration.

use std::collections::BTreeMap;

use tracing::trace;

use crate::error::GenerationError;
use crate::tree::{Delimiter, NodeId, NodeKind, SyntaxTree, TypeExpr};

pub const ANONYMOUS_FUNC_PREFIX: &str = "AnonymousFunc_";

/// Annotation used for variants that carry nothing.
pub const NO_PAYLOAD_ANNOTATION: &str = " -- has no payload";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadSignature {
    None,
    Named(String),
    SynthesizedAlias(String),
}

impl PayloadSignature {
    pub fn is_none(&self) -> bool {
        matches!(self, PayloadSignature::None)
    }

    /// Human-readable label for generated annotations.
    pub fn description(&self) -> &str {
        match self {
            PayloadSignature::None => NO_PAYLOAD_ANNOTATION,
            PayloadSignature::Named(name) | PayloadSignature::SynthesizedAlias(name) => name,
        }
    }
}

/// How a variant's payload is grouped, which decides the match pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    Unit,
    Tuple,
    Record,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDecl {
    /// Empty when the name token could not be determined
    pub name: String,
    pub ordinal: usize,
    pub node: NodeId,
    pub shape: PayloadShape,
    pub payloads: Vec<TypeExpr>,
}

/// `type <name> = <target>;` for an inline function payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasDecl {
    pub name: String,
    pub target: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedVariant {
    pub decl: VariantDecl,
    pub signature: PayloadSignature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct PayloadKey {
    clause: NodeId,
    slot: usize,
}

#[derive(Debug)]
enum Contribution {
    Named(String),
    Alias(String),
}

pub struct PayloadExtractor<'t> {
    tree: &'t SyntaxTree,
    aliases: Vec<AliasDecl>,
}

impl<'t> PayloadExtractor<'t> {
    pub fn new(tree: &'t SyntaxTree) -> Self {
        PayloadExtractor {
            tree,
            aliases: Vec::new(),
        }
    }

    /// Aliases synthesized so far, in first-seen order.
    pub fn into_aliases(self) -> Vec<AliasDecl> {
        self.aliases
    }

    fn synthesize_alias(&mut self, target: &TypeExpr) -> String {
        let name = format!("{ANONYMOUS_FUNC_PREFIX}{}", self.aliases.len());
        self.aliases.push(AliasDecl {
            name: name.clone(),
            target: target.clone(),
        });
        name
    }

    pub fn extract(
        &mut self,
        variant: NodeId,
        ordinal: usize,
    ) -> Result<ExtractedVariant, GenerationError> {
        let tree = self.tree;
        let name = tree.name_of(variant);
        let clauses = tree.all_recursive_children(variant, |node, depth| {
            depth == 1 && matches!(node.kind(), NodeKind::PayloadClause { .. })
        })?;

        let mut shape = PayloadShape::Unit;
        let mut payloads = Vec::new();
        let mut contributions: BTreeMap<PayloadKey, (NodeId, Contribution)> = BTreeMap::new();

        for clause in clauses {
            let NodeKind::PayloadClause { open, close } = tree.node(clause).kind() else {
                continue;
            };
            shape = match open {
                Some(Delimiter::Paren) => PayloadShape::Tuple,
                Some(Delimiter::Brace) | None => PayloadShape::Record,
            };
            if !is_well_formed(*open, *close) {
                trace!(
                    clause = tree.node(clause).text(),
                    "malformed payload grouping, treating as no payload"
                );
                continue;
            }

            let slots = tree
                .children(clause)
                .iter()
                .copied()
                .filter_map(|id| match tree.node(id).kind() {
                    NodeKind::PayloadSlot { ty, .. } => Some((id, ty)),
                    _ => None,
                });
            for (slot, (id, ty)) in slots.enumerate() {
                payloads.push(ty.clone());
                let contribution = match ty {
                    TypeExpr::Function { .. } => Contribution::Alias(self.synthesize_alias(ty)),
                    TypeExpr::Named(name) | TypeExpr::Other(name) => Contribution::Named(name.clone()),
                };
                contributions.insert(PayloadKey { clause, slot }, (id, contribution));
            }
        }

        let raw = tree.node(variant).text();
        if contributions.len() > 1 {
            let extra = contributions.values().nth(1).map_or(variant, |(id, _)| *id);
            return Err(GenerationError::MultiplePayloadGroupsInVariant {
                variant: name.unwrap_or(raw).to_owned(),
                node: extra,
            });
        }

        let signature = match contributions.into_iter().next() {
            None => PayloadSignature::None,
            Some((key, _)) if name.is_none() => {
                return Err(GenerationError::UnclearVariantName {
                    raw: raw.to_owned(),
                    node: key.clause,
                });
            }
            Some((_, (_, Contribution::Named(ty_name)))) => PayloadSignature::Named(ty_name),
            Some((_, (_, Contribution::Alias(alias)))) => PayloadSignature::SynthesizedAlias(alias),
        };

        trace!(variant = name.unwrap_or(raw), ?signature, "classified payload");

        Ok(ExtractedVariant {
            decl: VariantDecl {
                name: name.unwrap_or_default().to_owned(),
                ordinal,
                node: variant,
                shape,
                payloads,
            },
            signature,
        })
    }
}

fn is_well_formed(open: Option<Delimiter>, close: Option<Delimiter>) -> bool {
    matches!((open, close), (Some(open), Some(close)) if open == close)
}
