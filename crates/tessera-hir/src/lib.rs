//! Tessera HIR - the tree every compiler stage after parsing works on
//!
//! This crate provides:
//! - Lexer: tokens with line/column spans
//! - HIR: the node arena, span derivation and visitor dispatch
//! - Printer: HIR rendered back to source text
//! - Config: printer settings loaded from TOML

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lexer module - tokenization of Tessera source code
pub mod lexer;

/// High-level IR - nodes, spans and visitors
pub mod hir;

/// Printer configuration
pub mod config;

/// Error types shared by the HIR core
pub mod error;

/// Convenience re-export of lexer
pub use lexer::Lexer;

/// Convenience re-export of the arena and visitor protocol
pub use hir::{Hir, Visitor};

pub use config::PrintConfig;
pub use error::{HirError, Result};
