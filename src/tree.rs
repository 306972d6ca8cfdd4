//! Immutable, index-addressed snapshot of an annotated declaration.
//!
//! The host hands the generator an already parsed item. Instead of walking the
//! host's live syntax objects, the item is copied once into a [`SyntaxTree`]:
//! a flat arena of [`Node`]s where parent and child links are plain
//! [`NodeId`] indices. Everything downstream only reads from this snapshot.

use proc_macro2::Span;

/// Index of a node inside the [`SyntaxTree`] that minted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// What kind of declaration the annotated item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// Closed set of named variants (`enum`)
    Sum,
    /// Fixed-field record (`struct`)
    Product,
    Other,
}

/// Grouping delimiter of a payload clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Paren,
    Brace,
}

/// Type expression written in a payload slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A direct reference to a named type, e.g. `String` or `Vec<u8>`
    Named(String),
    /// An inline function type, e.g. `fn(i32, &str) -> bool`
    Function {
        params: Vec<String>,
        ret: Option<String>,
        source: String,
    },
    /// Anything else (references, tuples, arrays, trait objects, ...)
    Other(String),
}

impl TypeExpr {
    /// Source text of the whole type expression.
    pub fn text(&self) -> &str {
        match self {
            TypeExpr::Named(text) | TypeExpr::Other(text) => text,
            TypeExpr::Function { source, .. } => source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Declaration(DeclKind),
    /// Identifier token naming its parent
    Name,
    Variant,
    /// Grouped payload slots of a variant. A missing delimiter means the
    /// grouping was malformed in the source.
    PayloadClause {
        open: Option<Delimiter>,
        close: Option<Delimiter>,
    },
    PayloadSlot {
        label: Option<String>,
        ty: TypeExpr,
    },
    /// A type or module declared inside the annotated declaration
    NestedDecl,
}

impl NodeKind {
    /// Members are the named things declared directly inside a declaration.
    pub fn is_member(&self) -> bool {
        matches!(self, NodeKind::Variant | NodeKind::NestedDecl)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    text: String,
    span: Span,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

/// Arena holding one annotated declaration. The root is always node 0.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
}

impl SyntaxTree {
    pub fn new(kind: NodeKind, text: impl Into<String>, span: Span) -> Self {
        let root = Node {
            id: NodeId(0),
            kind,
            parent: None,
            children: Vec::new(),
            text: text.into(),
            span,
        };
        SyntaxTree { nodes: vec![root] }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new last child under `parent` and return its id.
    pub fn push(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        text: impl Into<String>,
        span: Span,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            kind,
            parent: Some(parent),
            children: Vec::new(),
            text: text.into(),
            span,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Ids are only minted by [`SyntaxTree::push`], so indexing never misses
    /// for an id that came from this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    /// Text of the direct [`NodeKind::Name`] child, if the node has one.
    pub fn name_of(&self, id: NodeId) -> Option<&str> {
        self.children(id)
            .iter()
            .map(|&child| self.node(child))
            .find(|child| matches!(child.kind(), NodeKind::Name))
            .map(Node::text)
    }
}
