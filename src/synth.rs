//! Host-neutral synthesis of the simplified type and its projection

use std::collections::HashSet;
use std::fmt;

use crate::error::GenerationError;
use crate::extract::{AliasDecl, PayloadShape};
use crate::validate::ValidatedDeclaration;

pub const SIMPLIFIED_TYPE_NAME: &str = "Simplified";
pub const PROJECTION_FN_NAME: &str = "simplified";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplifiedVariant {
    pub name: String,
    /// Payload signature of the source variant, kept for documentation only
    pub annotation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplifiedEnumDecl {
    pub name: String,
    pub variants: Vec<SimplifiedVariant>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionArm {
    pub variant: String,
    pub shape: PayloadShape,
    pub target: String,
    pub annotation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionFn {
    pub name: String,
    pub target_type: String,
    pub arms: Vec<ProjectionArm>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesizedDecl {
    Alias(AliasDecl),
    SimplifiedEnum(SimplifiedEnumDecl),
    Projection(ProjectionFn),
}

/// Build the alias declarations, the `Simplified` type and the projection
/// function, in that order.
pub fn synthesize(validated: &ValidatedDeclaration) -> Result<Vec<SynthesizedDecl>, GenerationError> {
    let mut seen = HashSet::new();
    for variant in &validated.variants {
        let name = &variant.decl.name;
        if name.is_empty() || !seen.insert(name.as_str()) {
            return Err(GenerationError::SynthesisFailed {
                name: validated.name.clone(),
            });
        }
    }

    let simplified = SimplifiedEnumDecl {
        name: SIMPLIFIED_TYPE_NAME.to_owned(),
        variants: validated
            .variants
            .iter()
            .map(|variant| SimplifiedVariant {
                name: variant.decl.name.clone(),
                annotation: variant.signature.description().to_owned(),
            })
            .collect(),
    };

    let projection = ProjectionFn {
        name: PROJECTION_FN_NAME.to_owned(),
        target_type: SIMPLIFIED_TYPE_NAME.to_owned(),
        arms: validated
            .variants
            .iter()
            .map(|variant| ProjectionArm {
                variant: variant.decl.name.clone(),
                shape: variant.decl.shape,
                target: variant.decl.name.clone(),
                annotation: variant.signature.description().to_owned(),
            })
            .collect(),
    };

    let mut decls: Vec<SynthesizedDecl> = validated
        .aliases
        .iter()
        .cloned()
        .map(SynthesizedDecl::Alias)
        .collect();
    decls.push(SynthesizedDecl::SimplifiedEnum(simplified));
    decls.push(SynthesizedDecl::Projection(projection));
    Ok(decls)
}

impl ProjectionArm {
    fn pattern(&self) -> String {
        match self.shape {
            PayloadShape::Unit => format!("Self::{}", self.variant),
            PayloadShape::Tuple => format!("Self::{}(..)", self.variant),
            PayloadShape::Record => format!("Self::{} {{ .. }}", self.variant),
        }
    }
}

/// Write `code` followed by a `//` comment starting at `column`.
fn write_commented(f: &mut fmt::Formatter<'_>, indent: &str, code: &str, column: usize, comment: &str) -> fmt::Result {
    writeln!(f, "{indent}{code:<column$} // {}", comment.trim())
}

/// Source fragment with comments aligned after the longest line
impl fmt::Display for SynthesizedDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthesizedDecl::Alias(alias) => {
                writeln!(f, "type {} = {};", alias.name, alias.target.text())
            }
            SynthesizedDecl::SimplifiedEnum(decl) => {
                let lines: Vec<_> = decl.variants.iter().map(|v| format!("{},", v.name)).collect();
                let column = lines.iter().map(String::len).max().unwrap_or(0);
                writeln!(f, "enum {} {{", decl.name)?;
                for (line, variant) in lines.iter().zip(&decl.variants) {
                    write_commented(f, "    ", line, column, &variant.annotation)?;
                }
                writeln!(f, "}}")
            }
            SynthesizedDecl::Projection(func) => {
                let lines: Vec<_> = func
                    .arms
                    .iter()
                    .map(|arm| format!("{} => {}::{},", arm.pattern(), func.target_type, arm.target))
                    .collect();
                let column = lines.iter().map(String::len).max().unwrap_or(0);
                writeln!(f, "fn {}(&self) -> {} {{", func.name, func.target_type)?;
                writeln!(f, "    match self {{")?;
                for (line, arm) in lines.iter().zip(&func.arms) {
                    write_commented(f, "        ", line, column, &arm.annotation)?;
                }
                writeln!(f, "    }}")?;
                writeln!(f, "}}")
            }
        }
    }
}
