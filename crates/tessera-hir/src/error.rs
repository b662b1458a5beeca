//! Error types for HIR construction and annotation

use thiserror::Error;

use crate::hir::{NodeId, NodeVariant};

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, HirError>;

/// Errors raised by the HIR core.
///
/// These are builder and pass contract violations, never user-facing
/// diagnostics: those belong to the parser and semantic analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HirError {
    /// A checked conversion was asked for the wrong variant
    #[error("internal error: {id} is a {found}, expected {expected}")]
    VariantMismatch {
        id: NodeId,
        expected: NodeVariant,
        found: NodeVariant,
    },

    /// A node id that does not belong to this arena
    #[error("internal error: {id} does not exist")]
    UnknownNode { id: NodeId },

    /// A node was allocated before one of its children
    #[error("{parent} refers to {child}, which has not been allocated")]
    DanglingChild { parent: NodeVariant, child: NodeId },

    #[error("assignment must have at least one target")]
    EmptyAssignTargets,

    #[error("comparison chain has {operands} operands but {ops} operators")]
    ComparisonArity { operands: usize, ops: usize },

    #[error("a non-scalar tensor type needs at least one dimension")]
    ZeroDimensionTensor,

    #[error("a tensor block type must be a tensor type, found {found}")]
    NonTensorBlockType { found: NodeVariant },

    #[error("an if statement without an else branch must record its end location")]
    MissingIfEnd,

    #[error("type annotations are sealed; cannot annotate {expr}")]
    AnnotationsSealed { expr: NodeId },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("serialization failed: {0}")]
    Serialize(String),
}
