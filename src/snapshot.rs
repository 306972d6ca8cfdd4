//! Snapshot a parsed `syn` item into a [`SyntaxTree`]

use syn::{spanned::Spanned, Field, Fields, Ident, Item, ItemEnum, ItemMod, ReturnType, Type, Variant};

use crate::helpers::compact_tokens;
use crate::tree::{DeclKind, Delimiter, NodeId, NodeKind, SyntaxTree, TypeExpr};

/// Copy the annotated item into an immutable tree. Enums get their variants
/// as members and inline modules their items as nested declarations; every
/// other item is recorded as a bare declaration with its name.
pub fn snapshot_item(item: &Item) -> SyntaxTree {
    let kind = match item {
        Item::Enum(item) => return snapshot_enum(item),
        Item::Struct(_) => DeclKind::Product,
        _ => DeclKind::Other,
    };

    let mut tree = SyntaxTree::new(
        NodeKind::Declaration(kind),
        compact_tokens(item),
        item.span(),
    );
    let root = tree.root();
    push_name(&mut tree, root, item_ident(item));

    if let Item::Mod(ItemMod {
        content: Some((_, items)),
        ..
    }) = item
    {
        for nested in items {
            let id = tree.push(root, NodeKind::NestedDecl, compact_tokens(nested), nested.span());
            push_name(&mut tree, id, item_ident(nested));
        }
    }
    tree
}

fn item_ident(item: &Item) -> Option<&Ident> {
    match item {
        Item::Enum(e) => Some(&e.ident),
        Item::Struct(s) => Some(&s.ident),
        Item::Union(u) => Some(&u.ident),
        Item::Trait(t) => Some(&t.ident),
        Item::Type(t) => Some(&t.ident),
        Item::Fn(f) => Some(&f.sig.ident),
        Item::Mod(m) => Some(&m.ident),
        Item::Const(c) => Some(&c.ident),
        Item::Static(s) => Some(&s.ident),
        _ => None,
    }
}

fn push_name(tree: &mut SyntaxTree, parent: NodeId, ident: Option<&Ident>) {
    if let Some(ident) = ident {
        tree.push(parent, NodeKind::Name, ident.to_string(), ident.span());
    }
}

fn snapshot_enum(item: &ItemEnum) -> SyntaxTree {
    let mut tree = SyntaxTree::new(
        NodeKind::Declaration(DeclKind::Sum),
        compact_tokens(item),
        item.span(),
    );
    let root = tree.root();
    tree.push(root, NodeKind::Name, item.ident.to_string(), item.ident.span());

    for variant in &item.variants {
        snapshot_variant(&mut tree, root, variant);
    }
    tree
}

fn snapshot_variant(tree: &mut SyntaxTree, parent: NodeId, variant: &Variant) {
    let id = tree.push(parent, NodeKind::Variant, compact_tokens(variant), variant.span());
    tree.push(id, NodeKind::Name, variant.ident.to_string(), variant.ident.span());

    let (delimiter, fields) = match &variant.fields {
        Fields::Unit => return,
        Fields::Unnamed(fields) => (Delimiter::Paren, &fields.unnamed),
        Fields::Named(fields) => (Delimiter::Brace, &fields.named),
    };

    let clause = tree.push(
        id,
        NodeKind::PayloadClause {
            open: Some(delimiter),
            close: Some(delimiter),
        },
        compact_tokens(&variant.fields),
        variant.fields.span(),
    );
    for field in fields {
        snapshot_slot(tree, clause, field);
    }
}

fn snapshot_slot(tree: &mut SyntaxTree, clause: NodeId, field: &Field) {
    let kind = NodeKind::PayloadSlot {
        label: field.ident.as_ref().map(ToString::to_string),
        ty: classify_type(&field.ty),
    };
    tree.push(clause, kind, compact_tokens(field), field.span());
}

/// Sort a payload type into named, inline function, or anything else.
pub fn classify_type(ty: &Type) -> TypeExpr {
    match ty {
        Type::Path(path) => TypeExpr::Named(compact_tokens(path)),
        Type::BareFn(func) => TypeExpr::Function {
            params: func.inputs.iter().map(|arg| compact_tokens(&arg.ty)).collect(),
            ret: match &func.output {
                ReturnType::Default => None,
                ReturnType::Type(_, ret) => Some(compact_tokens(ret)),
            },
            source: compact_tokens(func),
        },
        Type::Paren(inner) => classify_type(&inner.elem),
        Type::Group(inner) => classify_type(&inner.elem),
        other => TypeExpr::Other(compact_tokens(other)),
    }
}
