//! Depth-bounded ancestor/descendant search over a [`SyntaxTree`].
//!
//! Every search passes its depth down explicitly and gives up with
//! [`QueryError::RecursionTooDeep`] once it reaches [`MAX_RECURSION_DEPTH`].
//! Predicates see the candidate node and its distance from the starting node;
//! the starting node itself is tested at depth 0.

use crate::error::QueryError;
use crate::tree::{Node, NodeId, SyntaxTree};

pub const MAX_RECURSION_DEPTH: usize = 64;

impl SyntaxTree {
    fn parents_from<F>(
        &self,
        id: NodeId,
        test: &F,
        stop_on_first: bool,
        depth: usize,
        found: &mut Vec<NodeId>,
    ) -> Result<(), QueryError>
    where
        F: Fn(&Node, usize) -> bool,
    {
        if depth >= MAX_RECURSION_DEPTH {
            return Err(QueryError::RecursionTooDeep);
        }

        let node = self.node(id);
        if test(node, depth) {
            found.push(id);
            if stop_on_first {
                return Ok(());
            }
        }

        match node.parent() {
            Some(parent) => self.parents_from(parent, test, stop_on_first, depth + 1, found),
            None => Ok(()),
        }
    }

    fn children_from<F>(
        &self,
        id: NodeId,
        test: &F,
        stop_on_first: bool,
        depth: usize,
        found: &mut Vec<NodeId>,
    ) -> Result<(), QueryError>
    where
        F: Fn(&Node, usize) -> bool,
    {
        if depth >= MAX_RECURSION_DEPTH {
            return Err(QueryError::RecursionTooDeep);
        }

        let node = self.node(id);
        if test(node, depth) {
            found.push(id);
            if stop_on_first {
                return Ok(());
            }
        }

        for &child in node.children() {
            self.children_from(child, test, stop_on_first, depth + 1, found)?;
            if stop_on_first && !found.is_empty() {
                return Ok(());
            }
        }

        Ok(())
    }

    /// All ancestors (and `id` itself) passing `test`, nearest first.
    pub fn recursive_parents<F>(&self, id: NodeId, test: F) -> Result<Vec<NodeId>, QueryError>
    where
        F: Fn(&Node, usize) -> bool,
    {
        let mut found = Vec::new();
        self.parents_from(id, &test, false, 0, &mut found)?;
        Ok(found)
    }

    /// Nearest node walking up from `id` that passes `test`.
    pub fn first_recursive_parent<F>(&self, id: NodeId, test: F) -> Result<Option<NodeId>, QueryError>
    where
        F: Fn(&Node, usize) -> bool,
    {
        let mut found = Vec::new();
        self.parents_from(id, &test, true, 0, &mut found)?;
        Ok(found.first().copied())
    }

    /// Node nearest to the root that passes `test`.
    pub fn topmost_recursive_parent<F>(
        &self,
        id: NodeId,
        test: F,
    ) -> Result<Option<NodeId>, QueryError>
    where
        F: Fn(&Node, usize) -> bool,
    {
        Ok(self.recursive_parents(id, test)?.last().copied())
    }

    /// Pre-order search below `id` (inclusive), outermost first.
    pub fn recursive_children<F>(
        &self,
        id: NodeId,
        test: F,
        stop_on_first: bool,
    ) -> Result<Vec<NodeId>, QueryError>
    where
        F: Fn(&Node, usize) -> bool,
    {
        let mut found = Vec::new();
        self.children_from(id, &test, stop_on_first, 0, &mut found)?;
        Ok(found)
    }

    pub fn all_recursive_children<F>(&self, id: NodeId, test: F) -> Result<Vec<NodeId>, QueryError>
    where
        F: Fn(&Node, usize) -> bool,
    {
        self.recursive_children(id, test, false)
    }

    pub fn first_recursive_child<F>(&self, id: NodeId, test: F) -> Result<Option<NodeId>, QueryError>
    where
        F: Fn(&Node, usize) -> bool,
    {
        Ok(self.recursive_children(id, test, true)?.first().copied())
    }
}
