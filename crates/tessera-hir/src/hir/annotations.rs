//! Resolved types attached to expressions.
//!
//! Semantic analysis records the type(s) of each expression here instead of
//! mutating the tree. Most expressions get one type; a call to a function
//! with several results gets one per result, in order. Once analysis is done
//! the table is sealed and later passes only read it.

use std::collections::HashMap;

use super::ExprId;
use crate::error::{HirError, Result};

/// Side table from expression to resolved types
#[derive(Debug, Clone)]
pub struct ExprTypes<T> {
    types: HashMap<ExprId, Vec<T>>,
    sealed: bool,
}

impl<T> Default for ExprTypes<T> {
    fn default() -> Self {
        Self {
            types: HashMap::new(),
            sealed: false,
        }
    }
}

impl<T> ExprTypes<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one resolved type to `expr`
    pub fn append(&mut self, expr: ExprId, ty: T) -> Result<()> {
        if self.sealed {
            return Err(HirError::AnnotationsSealed { expr: expr.node() });
        }
        let types = self.types.entry(expr).or_default();
        types.push(ty);
        tracing::trace!(%expr, count = types.len(), "annotated expression");
        Ok(())
    }

    /// Append several resolved types to `expr`, in order
    pub fn extend(&mut self, expr: ExprId, tys: impl IntoIterator<Item = T>) -> Result<()> {
        for ty in tys {
            self.append(expr, ty)?;
        }
        Ok(())
    }

    /// The types recorded for `expr`; empty if it was never annotated
    #[must_use]
    pub fn get(&self, expr: ExprId) -> &[T] {
        self.types.get(&expr).map(Vec::as_slice).unwrap_or(&[])
    }

    #[must_use]
    pub fn is_annotated(&self, expr: ExprId) -> bool {
        self.types.get(&expr).is_some_and(|tys| !tys.is_empty())
    }

    /// Freeze the table. Further appends fail.
    pub fn seal(&mut self) {
        tracing::debug!(annotated = self.types.len(), "expression types sealed");
        self.sealed = true;
    }

    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Number of annotated expressions
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate annotated expressions in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (ExprId, &[T])> {
        self.types.iter().map(|(id, tys)| (*id, tys.as_slice()))
    }
}
