//! Type and index-set nodes
//!
//! Tensor types are recursive: a [`NonScalarTensorType`] lists its dimensions
//! as index sets and names a block type, which may itself be a non-scalar
//! tensor. A matrix of 3-vectors over a vertex set is
//! `tensor[V, V](tensor[3](float))` rather than a flat rank-3 tensor.

use serde::Serialize;

use super::{Id, IndexSetId, TypeId};

/// A fixed-size dimension (`tensor[3]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeIndexSet {
    pub range: u32,
}

/// A dimension sized by a graph set (`tensor[points]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetIndexSet {
    pub set_name: String,
}

/// A dimension whose size is only known at runtime (`tensor[*]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DynamicIndexSet;

/// A named record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementType {
    pub ident: String,
}

/// A named set that an edge set connects to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub set_name: String,
}

/// A homogeneous set of elements, optionally connecting endpoint sets.
///
/// No endpoints makes a vertex set; two or more make an edge or hyperedge set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetType {
    pub element: Id<ElementType>,
    pub endpoints: Vec<Id<Endpoint>>,
}

impl SetType {
    /// Returns true if elements of this set connect other sets
    #[must_use]
    pub fn is_edge_set(&self) -> bool {
        !self.endpoints.is_empty()
    }

    /// Number of endpoints per element
    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.endpoints.len()
    }
}

/// A compile-time tuple length
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TupleLength {
    pub val: u32,
}

/// A fixed-length tuple of elements (`(Vertex * 2)`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TupleType {
    pub element: Id<ElementType>,
    pub length: Id<TupleLength>,
}

/// Scalar component type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScalarKind {
    Int,
    Float,
    Bool,
}

impl ScalarKind {
    /// Returns the keyword spelling of the type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
            ScalarKind::Bool => "bool",
        }
    }
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScalarTensorType {
    pub kind: ScalarKind,
}

/// A (possibly blocked) tensor type.
///
/// Must have at least one dimension; a zero-dimensional tensor is a
/// [`ScalarTensorType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NonScalarTensorType {
    pub index_sets: Vec<IndexSetId>,
    pub block_type: TypeId,
    pub transposed: bool,
}

impl NonScalarTensorType {
    /// Number of dimensions at this level of blocking
    #[must_use]
    pub fn order(&self) -> usize {
        self.index_sets.len()
    }
}
