//! The HIR arena: storage, typed access and checked conversion

use serde::Serialize;

use super::{HirNode, Id, IndexVec, Node, NodeId, NodeVariant, Program};
use crate::error::{HirError, Result};
use crate::lexer::Span;

/// A stored node with its explicit span
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeData {
    /// Location recorded at construction; unset ends are derived from children
    pub span: Span,
    pub node: Node,
}

/// Owns every node of one compilation unit.
///
/// Nodes are allocated bottom-up: a parent can only name children that
/// already exist, so the structure is acyclic by construction. A node is
/// part of the program if it is reachable from [`Hir::root`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct Hir {
    nodes: IndexVec<NodeId, NodeData>,
    root: Option<Id<Program>>,
}

impl Hir {
    /// Create an empty arena
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node, checking that its children exist and that it
    /// satisfies its structural invariants
    pub fn alloc<T: HirNode>(&mut self, span: Span, node: T) -> Result<Id<T::Handle>> {
        let node: Node = node.into();
        for child in node.children() {
            if !self.nodes.contains(child) {
                return Err(HirError::DanglingChild {
                    parent: node.variant(),
                    child,
                });
            }
        }
        node.check(span)?;
        self.check_links(&node)?;

        let variant = node.variant();
        let id = self.nodes.push(NodeData { span, node });
        tracing::trace!(%id, %variant, %span, "allocated HIR node");
        Ok(Id::from_raw(id))
    }

    /// Mark `program` as the root of the compilation unit
    pub fn set_root(&mut self, program: Id<Program>) {
        tracing::debug!(root = %program, nodes = self.nodes.len(), "HIR root set");
        self.root = Some(program);
    }

    #[must_use]
    pub fn root(&self) -> Option<Id<Program>> {
        self.root
    }

    /// Number of allocated nodes, reachable or not
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate all nodes in allocation order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.nodes.iter_enumerated()
    }

    /// The stored node data, if `id` belongs to this arena
    #[must_use]
    pub fn data(&self, id: impl Into<NodeId>) -> Option<&NodeData> {
        self.nodes.get(id.into())
    }

    /// The stored node
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this arena.
    #[must_use]
    pub fn node(&self, id: impl Into<NodeId>) -> &Node {
        &self.entry(id.into()).node
    }

    /// The explicit span recorded at construction, ignoring derivation rules
    #[must_use]
    pub fn explicit_span(&self, id: impl Into<NodeId>) -> Span {
        self.entry(id.into()).span
    }

    /// Overwrite the explicit span of a node
    pub fn set_span(&mut self, id: impl Into<NodeId>, span: Span) {
        let id = id.into();
        self.entry_mut(id).span = span;
    }

    /// Exact variant of a node
    #[must_use]
    pub fn variant(&self, id: impl Into<NodeId>) -> NodeVariant {
        self.node(id).variant()
    }

    /// Returns true if the node is exactly of variant `T`
    #[must_use]
    pub fn isa<T: HirNode>(&self, id: impl Into<NodeId>) -> bool {
        self.variant(id) == T::VARIANT
    }

    /// A typed view of the node, or `None` if it is another variant
    #[must_use]
    pub fn get<T: HirNode>(&self, id: impl Into<NodeId>) -> Option<&T> {
        self.nodes.get(id.into()).and_then(|data| T::from_node(&data.node))
    }

    /// A typed view of the node, or a [`HirError::VariantMismatch`]
    pub fn try_to<T: HirNode>(&self, id: impl Into<NodeId>) -> Result<&T> {
        let id = id.into();
        let data = self.nodes.get(id).ok_or(HirError::UnknownNode { id })?;
        T::from_node(&data.node).ok_or(HirError::VariantMismatch {
            id,
            expected: T::VARIANT,
            found: data.node.variant(),
        })
    }

    /// A typed view of the node.
    ///
    /// # Panics
    ///
    /// Panics if the node is not exactly of variant `T`. That is a bug in the
    /// calling pass, not a property of the program being compiled.
    #[must_use]
    pub fn to<T: HirNode>(&self, id: impl Into<NodeId>) -> &T {
        match self.try_to(id) {
            Ok(node) => node,
            Err(err) => panic!("{err}"),
        }
    }

    /// A mutable typed view of the node.
    ///
    /// # Panics
    ///
    /// Panics if the node is not exactly of variant `T`.
    pub fn to_mut<T: HirNode>(&mut self, id: impl Into<NodeId>) -> &mut T {
        let id = id.into();
        let data = self.entry_mut(id);
        let found = data.node.variant();
        match T::from_node_mut(&mut data.node) {
            Some(node) => node,
            None => panic!(
                "{}",
                HirError::VariantMismatch {
                    id,
                    expected: T::VARIANT,
                    found,
                }
            ),
        }
    }

    /// Direct children of a node in source order
    #[must_use]
    pub fn children(&self, id: impl Into<NodeId>) -> Vec<NodeId> {
        self.node(id).children()
    }

    /// Every node reachable from the root, in pre-order. A subtree shared by
    /// several parents is listed once, at its first occurrence.
    #[must_use]
    pub fn reachable(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(root) = self.root else {
            return out;
        };
        let mut seen = vec![false; self.len()];
        let mut stack = vec![root.node()];
        while let Some(id) = stack.pop() {
            let slot = &mut seen[id.index()];
            if *slot {
                continue;
            }
            *slot = true;
            out.push(id);
            stack.extend(self.children(id).into_iter().rev());
        }
        out
    }

    /// Dump the arena as JSON for debugging
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| HirError::Serialize(e.to_string()))
    }

    /// Invariants that depend on the variant of a child
    fn check_links(&self, node: &Node) -> Result<()> {
        if let Node::NonScalarTensorType(n) = node {
            let found = self.variant(n.block_type);
            if !matches!(
                found,
                NodeVariant::ScalarTensorType | NodeVariant::NonScalarTensorType
            ) {
                return Err(HirError::NonTensorBlockType { found });
            }
        }
        Ok(())
    }

    fn entry(&self, id: NodeId) -> &NodeData {
        match self.nodes.get(id) {
            Some(data) => data,
            None => panic!("{}", HirError::UnknownNode { id }),
        }
    }

    fn entry_mut(&mut self, id: NodeId) -> &mut NodeData {
        match self.nodes.get_mut(id) {
            Some(data) => data,
            None => panic!("{}", HirError::UnknownNode { id }),
        }
    }
}
