//! High-level intermediate representation of Tessera programs.
//!
//! The parser builds a [`Hir`] bottom-up, recording on each node the span of
//! the tokens it was built from. Later passes walk it with a [`Visitor`],
//! record resolved types in an [`ExprTypes`] side table, and ask for source
//! locations through [`Hir::span`], which fills in the parts of a span a
//! node cannot know itself from its children.

mod annotations;
mod arena;
mod decl;
mod expr;
mod ids;
mod node;
mod span;
mod stmt;
mod types;
mod visitor;

pub mod pretty;

pub use annotations::ExprTypes;
pub use arena::{Hir, NodeData};
pub use decl::*;
pub use expr::*;
pub use ids::*;
pub use node::{HirNode, Node, NodeFamily, NodeVariant};
pub use pretty::Printer;
pub use stmt::*;
pub use types::*;
pub use visitor::{walk_children, Visitor};

// Re-export Span from lexer for convenience
pub use crate::lexer::Span;
