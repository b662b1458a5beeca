//! Statement nodes and the two sequence containers

use std::marker::PhantomData;

use serde::Serialize;

use super::{ExprId, ForDomainId, Id, IdentDecl, Identifier, NodeId, SetIndexSet, StmtId};

/// The root of a compilation unit: element types, externs, functions,
/// procedures, constants and tests in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Program {
    pub elems: Vec<NodeId>,
}

/// A sequence of statements executed in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StmtBlock {
    pub stmts: Vec<StmtId>,
}

/// Marker for `var` bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutable {}

/// Marker for `const` bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {}

/// A local declaration with an optional initializer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding<K> {
    pub var: Id<IdentDecl>,
    pub init_val: Option<ExprId>,
    #[serde(skip)]
    kind: PhantomData<K>,
}

impl<K> Binding<K> {
    #[must_use]
    pub fn new(var: Id<IdentDecl>, init_val: Option<ExprId>) -> Self {
        Self {
            var,
            init_val,
            kind: PhantomData,
        }
    }
}

pub type VarDecl = Binding<Mutable>;
pub type ConstDecl = Binding<Constant>;

/// Marker for loops that test before each iteration (`while`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreTest {}

/// Marker for loops that test after each iteration (`do ... end while`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostTest {}

/// Condition plus body, shared by both loop forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Loop<K> {
    pub cond: ExprId,
    pub body: Id<StmtBlock>,
    #[serde(skip)]
    kind: PhantomData<K>,
}

impl<K> Loop<K> {
    #[must_use]
    pub fn new(cond: ExprId, body: Id<StmtBlock>) -> Self {
        Self {
            cond,
            body,
            kind: PhantomData,
        }
    }
}

pub type WhileStmt = Loop<PreTest>;
pub type DoWhileStmt = Loop<PostTest>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IfStmt {
    pub cond: ExprId,
    pub if_body: StmtId,
    pub else_body: Option<StmtId>,
}

impl IfStmt {
    #[must_use]
    pub fn has_else(&self) -> bool {
        self.else_body.is_some()
    }
}

/// Iterate the elements of a named set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSetDomain {
    pub set: Id<SetIndexSet>,
}

/// Iterate a numeric range. Bound inclusivity is decided by semantic analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeDomain {
    pub lower: ExprId,
    pub upper: ExprId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForStmt {
    pub loop_var: Id<Identifier>,
    pub domain: ForDomainId,
    pub body: Id<StmtBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintStmt {
    pub expr: ExprId,
}

/// An expression evaluated for its effects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExprStmt {
    pub expr: ExprId,
}

/// Assignment of one expression to one or more targets.
///
/// Several targets receive the results of a multi-valued call in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignStmt {
    pub lhs: Vec<ExprId>,
    pub expr: ExprId,
}
