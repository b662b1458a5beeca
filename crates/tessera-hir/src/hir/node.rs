//! The closed set of HIR node variants.
//!
//! [`Node`] has one variant per concrete node kind. [`NodeVariant`] is the
//! matching fieldless tag, used for type tests and diagnostics, and
//! [`HirNode`] ties each payload type to its tag so the arena can offer
//! checked conversions.

use serde::Serialize;

use super::{
    AddExpr, AndExpr, Argument, AssignStmt, BoolLiteral, CallExpr, ConstDecl, DenseFloatVector,
    DenseIntVector, DenseNdTensor, DenseTensor, DenseTensorLiteral, DivExpr, DoWhileStmt,
    DynamicIndexSet, ElementType, ElementTypeDecl, ElwiseDivExpr, ElwiseMulExpr, Endpoint, EqExpr,
    ExpExpr, Expr, ExprParam, ExprStmt, ExternDecl, Field, FieldReadExpr, FloatLiteral, ForDomain,
    ForStmt, FuncDecl, Handle, IdentDecl, Identifier, IfStmt, IndexSet, IndexSetDomain,
    IntLiteral, MapExpr, MulExpr, NegExpr, NodeId, NonScalarTensorType, NotExpr, OrExpr,
    ParenExpr, PrintStmt, ProcDecl, Program, RangeDomain, RangeIndexSet, ReadParam,
    ScalarTensorType, SetIndexSet, SetType, Slice, Stmt, StmtBlock, SubExpr, TensorReadExpr, Test,
    TransposeExpr, TupleLength, TupleReadExpr, TupleType, Type, VarDecl, VarExpr, WhileStmt,
    XorExpr,
};
use crate::error::{HirError, Result};
use crate::lexer::Span;

/// Coarse grouping of variants, used for visitor fallbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeFamily {
    Program,
    Stmt,
    Expr,
    IndexSet,
    Type,
    Decl,
    ForDomain,
    ReadParam,
    DenseTensor,
    Misc,
}

/// A node payload stored in the arena
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    Program(Program),
    StmtBlock(StmtBlock),

    // Index sets
    RangeIndexSet(RangeIndexSet),
    SetIndexSet(SetIndexSet),
    DynamicIndexSet(DynamicIndexSet),

    // Types
    ElementType(ElementType),
    Endpoint(Endpoint),
    SetType(SetType),
    TupleLength(TupleLength),
    TupleType(TupleType),
    ScalarTensorType(ScalarTensorType),
    NonScalarTensorType(NonScalarTensorType),

    // Declarations
    Identifier(Identifier),
    IdentDecl(IdentDecl),
    Field(Field),
    ElementTypeDecl(ElementTypeDecl),
    Argument(Argument),
    ExternDecl(ExternDecl),
    FuncDecl(FuncDecl),
    ProcDecl(ProcDecl),

    // Statements
    VarDecl(VarDecl),
    ConstDecl(ConstDecl),
    WhileStmt(WhileStmt),
    DoWhileStmt(DoWhileStmt),
    IfStmt(IfStmt),
    IndexSetDomain(IndexSetDomain),
    RangeDomain(RangeDomain),
    ForStmt(ForStmt),
    PrintStmt(PrintStmt),
    ExprStmt(ExprStmt),
    AssignStmt(AssignStmt),

    // Tensor read parameters
    Slice(Slice),
    ExprParam(ExprParam),

    // Expressions
    MapExpr(MapExpr),
    OrExpr(OrExpr),
    AndExpr(AndExpr),
    XorExpr(XorExpr),
    EqExpr(EqExpr),
    NotExpr(NotExpr),
    AddExpr(AddExpr),
    SubExpr(SubExpr),
    MulExpr(MulExpr),
    DivExpr(DivExpr),
    ElwiseMulExpr(ElwiseMulExpr),
    ElwiseDivExpr(ElwiseDivExpr),
    NegExpr(NegExpr),
    ExpExpr(ExpExpr),
    TransposeExpr(TransposeExpr),
    CallExpr(CallExpr),
    TensorReadExpr(TensorReadExpr),
    TupleReadExpr(TupleReadExpr),
    FieldReadExpr(FieldReadExpr),
    ParenExpr(ParenExpr),
    VarExpr(VarExpr),
    IntLiteral(IntLiteral),
    FloatLiteral(FloatLiteral),
    BoolLiteral(BoolLiteral),

    // Dense tensor literals
    DenseIntVector(DenseIntVector),
    DenseFloatVector(DenseFloatVector),
    DenseNdTensor(DenseNdTensor),
    DenseTensorLiteral(DenseTensorLiteral),

    Test(Test),
}

/// Exact runtime variant of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeVariant {
    Program,
    StmtBlock,
    RangeIndexSet,
    SetIndexSet,
    DynamicIndexSet,
    ElementType,
    Endpoint,
    SetType,
    TupleLength,
    TupleType,
    ScalarTensorType,
    NonScalarTensorType,
    Identifier,
    IdentDecl,
    Field,
    ElementTypeDecl,
    Argument,
    ExternDecl,
    FuncDecl,
    ProcDecl,
    VarDecl,
    ConstDecl,
    WhileStmt,
    DoWhileStmt,
    IfStmt,
    IndexSetDomain,
    RangeDomain,
    ForStmt,
    PrintStmt,
    ExprStmt,
    AssignStmt,
    Slice,
    ExprParam,
    MapExpr,
    OrExpr,
    AndExpr,
    XorExpr,
    EqExpr,
    NotExpr,
    AddExpr,
    SubExpr,
    MulExpr,
    DivExpr,
    ElwiseMulExpr,
    ElwiseDivExpr,
    NegExpr,
    ExpExpr,
    TransposeExpr,
    CallExpr,
    TensorReadExpr,
    TupleReadExpr,
    FieldReadExpr,
    ParenExpr,
    VarExpr,
    IntLiteral,
    FloatLiteral,
    BoolLiteral,
    DenseIntVector,
    DenseFloatVector,
    DenseNdTensor,
    DenseTensorLiteral,
    Test,
}

impl NodeVariant {
    /// Every variant, in declaration order
    pub const ALL: [NodeVariant; 62] = [
        NodeVariant::Program,
        NodeVariant::StmtBlock,
        NodeVariant::RangeIndexSet,
        NodeVariant::SetIndexSet,
        NodeVariant::DynamicIndexSet,
        NodeVariant::ElementType,
        NodeVariant::Endpoint,
        NodeVariant::SetType,
        NodeVariant::TupleLength,
        NodeVariant::TupleType,
        NodeVariant::ScalarTensorType,
        NodeVariant::NonScalarTensorType,
        NodeVariant::Identifier,
        NodeVariant::IdentDecl,
        NodeVariant::Field,
        NodeVariant::ElementTypeDecl,
        NodeVariant::Argument,
        NodeVariant::ExternDecl,
        NodeVariant::FuncDecl,
        NodeVariant::ProcDecl,
        NodeVariant::VarDecl,
        NodeVariant::ConstDecl,
        NodeVariant::WhileStmt,
        NodeVariant::DoWhileStmt,
        NodeVariant::IfStmt,
        NodeVariant::IndexSetDomain,
        NodeVariant::RangeDomain,
        NodeVariant::ForStmt,
        NodeVariant::PrintStmt,
        NodeVariant::ExprStmt,
        NodeVariant::AssignStmt,
        NodeVariant::Slice,
        NodeVariant::ExprParam,
        NodeVariant::MapExpr,
        NodeVariant::OrExpr,
        NodeVariant::AndExpr,
        NodeVariant::XorExpr,
        NodeVariant::EqExpr,
        NodeVariant::NotExpr,
        NodeVariant::AddExpr,
        NodeVariant::SubExpr,
        NodeVariant::MulExpr,
        NodeVariant::DivExpr,
        NodeVariant::ElwiseMulExpr,
        NodeVariant::ElwiseDivExpr,
        NodeVariant::NegExpr,
        NodeVariant::ExpExpr,
        NodeVariant::TransposeExpr,
        NodeVariant::CallExpr,
        NodeVariant::TensorReadExpr,
        NodeVariant::TupleReadExpr,
        NodeVariant::FieldReadExpr,
        NodeVariant::ParenExpr,
        NodeVariant::VarExpr,
        NodeVariant::IntLiteral,
        NodeVariant::FloatLiteral,
        NodeVariant::BoolLiteral,
        NodeVariant::DenseIntVector,
        NodeVariant::DenseFloatVector,
        NodeVariant::DenseNdTensor,
        NodeVariant::DenseTensorLiteral,
        NodeVariant::Test,
    ];

    /// The family this variant falls back to in a visitor
    #[must_use]
    pub const fn family(self) -> NodeFamily {
        use NodeVariant as V;
        match self {
            V::Program => NodeFamily::Program,
            V::StmtBlock
            | V::VarDecl
            | V::ConstDecl
            | V::WhileStmt
            | V::DoWhileStmt
            | V::IfStmt
            | V::ForStmt
            | V::PrintStmt
            | V::ExprStmt
            | V::AssignStmt => NodeFamily::Stmt,
            V::RangeIndexSet | V::SetIndexSet | V::DynamicIndexSet => NodeFamily::IndexSet,
            V::ElementType
            | V::SetType
            | V::TupleType
            | V::ScalarTensorType
            | V::NonScalarTensorType => NodeFamily::Type,
            V::Identifier
            | V::IdentDecl
            | V::Field
            | V::ElementTypeDecl
            | V::Argument
            | V::ExternDecl
            | V::FuncDecl
            | V::ProcDecl => NodeFamily::Decl,
            V::IndexSetDomain | V::RangeDomain => NodeFamily::ForDomain,
            V::Slice | V::ExprParam => NodeFamily::ReadParam,
            V::DenseIntVector | V::DenseFloatVector | V::DenseNdTensor => NodeFamily::DenseTensor,
            V::Endpoint | V::TupleLength | V::Test => NodeFamily::Misc,
            V::MapExpr
            | V::OrExpr
            | V::AndExpr
            | V::XorExpr
            | V::EqExpr
            | V::NotExpr
            | V::AddExpr
            | V::SubExpr
            | V::MulExpr
            | V::DivExpr
            | V::ElwiseMulExpr
            | V::ElwiseDivExpr
            | V::NegExpr
            | V::ExpExpr
            | V::TransposeExpr
            | V::CallExpr
            | V::TensorReadExpr
            | V::TupleReadExpr
            | V::FieldReadExpr
            | V::ParenExpr
            | V::VarExpr
            | V::IntLiteral
            | V::FloatLiteral
            | V::BoolLiteral
            | V::DenseTensorLiteral => NodeFamily::Expr,
        }
    }
}

impl std::fmt::Display for NodeVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// A concrete node payload.
///
/// `Handle` is the kind of typed id the arena returns when the payload is
/// allocated: the open family for most variants, the payload itself for
/// nodes that parents refer to by exact kind.
pub trait HirNode: Sized + Into<Node> {
    const VARIANT: NodeVariant;
    type Handle: Handle;

    fn from_node(node: &Node) -> Option<&Self>;
    fn from_node_mut(node: &mut Node) -> Option<&mut Self>;
}

macro_rules! hir_nodes {
    ($($variant:ident => $handle:ty),* $(,)?) => {
        $(
            impl From<$variant> for Node {
                fn from(node: $variant) -> Self {
                    Node::$variant(node)
                }
            }

            impl HirNode for $variant {
                const VARIANT: NodeVariant = NodeVariant::$variant;
                type Handle = $handle;

                fn from_node(node: &Node) -> Option<&Self> {
                    match node {
                        Node::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn from_node_mut(node: &mut Node) -> Option<&mut Self> {
                    match node {
                        Node::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )*

        impl Node {
            /// The exact variant of this node
            #[must_use]
            pub const fn variant(&self) -> NodeVariant {
                match self {
                    $(Node::$variant(_) => NodeVariant::$variant,)*
                }
            }
        }
    };
}

hir_nodes! {
    Program => Program,
    StmtBlock => StmtBlock,
    RangeIndexSet => IndexSet,
    SetIndexSet => SetIndexSet,
    DynamicIndexSet => IndexSet,
    ElementType => ElementType,
    Endpoint => Endpoint,
    SetType => Type,
    TupleLength => TupleLength,
    TupleType => Type,
    ScalarTensorType => Type,
    NonScalarTensorType => Type,
    Identifier => Identifier,
    IdentDecl => IdentDecl,
    Field => Field,
    ElementTypeDecl => ElementTypeDecl,
    Argument => Argument,
    ExternDecl => ExternDecl,
    FuncDecl => FuncDecl,
    ProcDecl => ProcDecl,
    VarDecl => Stmt,
    ConstDecl => Stmt,
    WhileStmt => Stmt,
    DoWhileStmt => Stmt,
    IfStmt => Stmt,
    IndexSetDomain => ForDomain,
    RangeDomain => ForDomain,
    ForStmt => Stmt,
    PrintStmt => Stmt,
    ExprStmt => Stmt,
    AssignStmt => Stmt,
    Slice => ReadParam,
    ExprParam => ReadParam,
    MapExpr => Expr,
    OrExpr => Expr,
    AndExpr => Expr,
    XorExpr => Expr,
    EqExpr => Expr,
    NotExpr => Expr,
    AddExpr => Expr,
    SubExpr => Expr,
    MulExpr => Expr,
    DivExpr => Expr,
    ElwiseMulExpr => Expr,
    ElwiseDivExpr => Expr,
    NegExpr => Expr,
    ExpExpr => Expr,
    TransposeExpr => Expr,
    CallExpr => Expr,
    TensorReadExpr => Expr,
    TupleReadExpr => Expr,
    FieldReadExpr => Expr,
    ParenExpr => Expr,
    VarExpr => Expr,
    IntLiteral => Expr,
    FloatLiteral => Expr,
    BoolLiteral => Expr,
    DenseIntVector => DenseTensor,
    DenseFloatVector => DenseTensor,
    DenseNdTensor => DenseTensor,
    DenseTensorLiteral => Expr,
    Test => Test,
}

macro_rules! self_handles {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(impl Handle for $ty {
            const NAME: &'static str = $name;
        })*
    };
}

self_handles! {
    Program => "program",
    StmtBlock => "block",
    SetIndexSet => "set_index_set",
    ElementType => "element_type",
    Endpoint => "endpoint",
    TupleLength => "tuple_length",
    Identifier => "ident",
    IdentDecl => "ident_decl",
    Field => "field",
    ElementTypeDecl => "element_decl",
    Argument => "argument",
    ExternDecl => "extern",
    FuncDecl => "func",
    ProcDecl => "proc",
    Test => "test",
}

fn push_ids<H>(out: &mut Vec<NodeId>, ids: &[super::Id<H>]) {
    out.extend(ids.iter().map(|id| id.node()));
}

impl Node {
    /// Direct children in source order
    #[must_use]
    pub fn children(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        match self {
            Node::Program(n) => out.extend_from_slice(&n.elems),
            Node::StmtBlock(n) => push_ids(&mut out, &n.stmts),
            Node::RangeIndexSet(_)
            | Node::SetIndexSet(_)
            | Node::DynamicIndexSet(_)
            | Node::ElementType(_)
            | Node::Endpoint(_)
            | Node::TupleLength(_)
            | Node::ScalarTensorType(_)
            | Node::Identifier(_)
            | Node::Slice(_)
            | Node::VarExpr(_)
            | Node::IntLiteral(_)
            | Node::FloatLiteral(_)
            | Node::BoolLiteral(_)
            | Node::DenseIntVector(_)
            | Node::DenseFloatVector(_) => {}
            Node::SetType(n) => {
                out.push(n.element.node());
                push_ids(&mut out, &n.endpoints);
            }
            Node::TupleType(n) => out.extend([n.element.node(), n.length.node()]),
            Node::NonScalarTensorType(n) => {
                push_ids(&mut out, &n.index_sets);
                out.push(n.block_type.node());
            }
            Node::IdentDecl(n) => out.extend([n.name.node(), n.ty.node()]),
            Node::Field(n) => out.push(n.field.node()),
            Node::ElementTypeDecl(n) => {
                out.push(n.name.node());
                push_ids(&mut out, &n.fields);
            }
            Node::Argument(n) => out.extend([n.decl.name.node(), n.decl.ty.node()]),
            Node::ExternDecl(n) => out.push(n.var.node()),
            Node::FuncDecl(n) => {
                out.push(n.name.node());
                push_ids(&mut out, &n.args);
                push_ids(&mut out, &n.results);
                out.push(n.body.node());
            }
            Node::ProcDecl(n) => {
                out.push(n.name.node());
                push_ids(&mut out, &n.args);
                push_ids(&mut out, &n.results);
                out.push(n.body.node());
            }
            Node::VarDecl(n) => {
                out.push(n.var.node());
                out.extend(n.init_val.map(|e| e.node()));
            }
            Node::ConstDecl(n) => {
                out.push(n.var.node());
                out.extend(n.init_val.map(|e| e.node()));
            }
            Node::WhileStmt(n) => out.extend([n.cond.node(), n.body.node()]),
            Node::DoWhileStmt(n) => out.extend([n.body.node(), n.cond.node()]),
            Node::IfStmt(n) => {
                out.extend([n.cond.node(), n.if_body.node()]);
                out.extend(n.else_body.map(|s| s.node()));
            }
            Node::IndexSetDomain(n) => out.push(n.set.node()),
            Node::RangeDomain(n) => out.extend([n.lower.node(), n.upper.node()]),
            Node::ForStmt(n) => {
                out.extend([n.loop_var.node(), n.domain.node(), n.body.node()]);
            }
            Node::PrintStmt(n) => out.push(n.expr.node()),
            Node::ExprStmt(n) => out.push(n.expr.node()),
            Node::AssignStmt(n) => {
                push_ids(&mut out, &n.lhs);
                out.push(n.expr.node());
            }
            Node::ExprParam(n) => out.push(n.expr.node()),
            Node::MapExpr(n) => {
                out.push(n.func.node());
                push_ids(&mut out, &n.partial_actuals);
                out.push(n.target.node());
            }
            Node::OrExpr(n) => out.extend([n.lhs.node(), n.rhs.node()]),
            Node::AndExpr(n) => out.extend([n.lhs.node(), n.rhs.node()]),
            Node::XorExpr(n) => out.extend([n.lhs.node(), n.rhs.node()]),
            Node::AddExpr(n) => out.extend([n.lhs.node(), n.rhs.node()]),
            Node::SubExpr(n) => out.extend([n.lhs.node(), n.rhs.node()]),
            Node::MulExpr(n) => out.extend([n.lhs.node(), n.rhs.node()]),
            Node::DivExpr(n) => out.extend([n.lhs.node(), n.rhs.node()]),
            Node::ElwiseMulExpr(n) => out.extend([n.lhs.node(), n.rhs.node()]),
            Node::ElwiseDivExpr(n) => out.extend([n.lhs.node(), n.rhs.node()]),
            Node::ExpExpr(n) => out.extend([n.lhs.node(), n.rhs.node()]),
            Node::EqExpr(n) => push_ids(&mut out, &n.operands),
            Node::NotExpr(n) => out.push(n.operand.node()),
            Node::TransposeExpr(n) => out.push(n.operand.node()),
            Node::NegExpr(n) => out.push(n.operand.node()),
            Node::CallExpr(n) => {
                out.push(n.func.node());
                push_ids(&mut out, &n.args);
            }
            Node::TensorReadExpr(n) => {
                out.push(n.tensor.node());
                push_ids(&mut out, &n.indices);
            }
            Node::TupleReadExpr(n) => out.extend([n.tuple.node(), n.index.node()]),
            Node::FieldReadExpr(n) => out.extend([n.set_or_elem.node(), n.field.node()]),
            Node::ParenExpr(n) => out.push(n.expr.node()),
            Node::DenseNdTensor(n) => push_ids(&mut out, &n.elems),
            Node::DenseTensorLiteral(n) => out.push(n.tensor.node()),
            Node::Test(n) => {
                out.push(n.func.node());
                push_ids(&mut out, &n.args);
                out.push(n.expected.node());
            }
        }
        out
    }

    /// Structural invariants a builder must satisfy
    pub(crate) fn check(&self, span: Span) -> Result<()> {
        match self {
            Node::AssignStmt(n) if n.lhs.is_empty() => Err(HirError::EmptyAssignTargets),
            Node::EqExpr(n) if n.operands.is_empty() || n.ops.len() + 1 != n.operands.len() => {
                Err(HirError::ComparisonArity {
                    operands: n.operands.len(),
                    ops: n.ops.len(),
                })
            }
            Node::NonScalarTensorType(n) if n.index_sets.is_empty() => {
                Err(HirError::ZeroDimensionTensor)
            }
            Node::IfStmt(n) if n.else_body.is_none() && !span.has_end() => {
                Err(HirError::MissingIfEnd)
            }
            _ => Ok(()),
        }
    }
}
