//! Declaration nodes: names, typed bindings, element records and functions

use std::marker::PhantomData;

use serde::Serialize;

use super::{ExprId, Id, StmtBlock, TypeId};

/// A name as written in source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    pub ident: String,
}

/// A name with its declared type (`x : float`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentDecl {
    pub name: Id<Identifier>,
    pub ty: TypeId,
}

/// A field of an element type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub field: Id<IdentDecl>,
}

/// A record type declaration (`element Vertex ... end`).
///
/// Field names are expected to be unique; semantic analysis checks that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementTypeDecl {
    pub name: Id<Identifier>,
    pub fields: Vec<Id<Field>>,
}

/// A function argument: a typed binding that may be passed `inout`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub decl: IdentDecl,
    pub inout: bool,
}

/// A global supplied by the host program (`extern points : set{Point};`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternDecl {
    pub var: Id<Argument>,
}

/// Marker for functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {}

/// Marker for procedures, which run with sequential semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Procedure {}

/// Shape shared by functions and procedures
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Callable<K> {
    pub name: Id<Identifier>,
    pub args: Vec<Id<Argument>>,
    pub results: Vec<Id<IdentDecl>>,
    pub body: Id<StmtBlock>,
    #[serde(skip)]
    kind: PhantomData<K>,
}

impl<K> Callable<K> {
    #[must_use]
    pub fn new(
        name: Id<Identifier>,
        args: Vec<Id<Argument>>,
        results: Vec<Id<IdentDecl>>,
        body: Id<StmtBlock>,
    ) -> Self {
        Self {
            name,
            args,
            results,
            body,
            kind: PhantomData,
        }
    }
}

pub type FuncDecl = Callable<Function>;
pub type ProcDecl = Callable<Procedure>;

/// An embedded example: `%! f(args) == expected;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Test {
    pub func: Id<Identifier>,
    pub args: Vec<ExprId>,
    pub expected: ExprId,
}
