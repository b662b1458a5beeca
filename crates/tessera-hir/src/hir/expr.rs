//! Expression nodes for the Tessera HIR

use std::marker::PhantomData;

use serde::Serialize;

use super::{DenseTensorId, ExprId, Hir, Id, Identifier, Node, ReadParamId};

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    // Logical
    Or,
    And,
    Xor,

    // Arithmetic
    Add,
    Sub,
    /// Matrix/tensor product (*)
    Mul,
    Div,
    /// Element-wise multiplication (.*)
    ElwiseMul,
    /// Element-wise division (./)
    ElwiseDiv,
    /// Exponentiation (^)
    Exp,
}

impl BinaryOp {
    /// Returns the precedence of the operator (higher = binds tighter)
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or | BinaryOp::Xor => 1,
            BinaryOp::And => 2,
            BinaryOp::Add | BinaryOp::Sub => 4,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::ElwiseMul | BinaryOp::ElwiseDiv => 5,
            BinaryOp::Exp => 7,
        }
    }

    /// Returns the symbol representation of the operator
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Or => "or",
            BinaryOp::And => "and",
            BinaryOp::Xor => "xor",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::ElwiseMul => ".*",
            BinaryOp::ElwiseDiv => "./",
            BinaryOp::Exp => "^",
        }
    }
}

/// Associates a binary marker type with its operator
pub trait BinaryOperator {
    const OP: BinaryOp;
}

macro_rules! binary_markers {
    ($($marker:ident => $op:ident),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub enum $marker {}

            impl BinaryOperator for $marker {
                const OP: BinaryOp = BinaryOp::$op;
            }
        )*
    };
}

binary_markers! {
    OrOp => Or,
    AndOp => And,
    XorOp => Xor,
    AddOp => Add,
    SubOp => Sub,
    MulOp => Mul,
    DivOp => Div,
    ElwiseMulOp => ElwiseMul,
    ElwiseDivOp => ElwiseDiv,
    ExpOp => Exp,
}

/// Two operands; the operator is carried by the marker type `Op`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binary<Op> {
    pub lhs: ExprId,
    pub rhs: ExprId,
    #[serde(skip)]
    op: PhantomData<Op>,
}

impl<Op> Binary<Op> {
    #[must_use]
    pub fn new(lhs: ExprId, rhs: ExprId) -> Self {
        Self {
            lhs,
            rhs,
            op: PhantomData,
        }
    }
}

impl<Op: BinaryOperator> Binary<Op> {
    /// The operator this node applies
    #[must_use]
    pub const fn op(&self) -> BinaryOp {
        Op::OP
    }
}

pub type OrExpr = Binary<OrOp>;
pub type AndExpr = Binary<AndOp>;
pub type XorExpr = Binary<XorOp>;
pub type AddExpr = Binary<AddOp>;
pub type SubExpr = Binary<SubOp>;
pub type MulExpr = Binary<MulOp>;
pub type DivExpr = Binary<DivOp>;
pub type ElwiseMulExpr = Binary<ElwiseMulOp>;
pub type ElwiseDivExpr = Binary<ElwiseDivOp>;
pub type ExpExpr = Binary<ExpOp>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotOp {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransposeOp {}

/// One operand; the operator is carried by the marker type `K`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unary<K> {
    pub operand: ExprId,
    #[serde(skip)]
    kind: PhantomData<K>,
}

impl<K> Unary<K> {
    #[must_use]
    pub fn new(operand: ExprId) -> Self {
        Self {
            operand,
            kind: PhantomData,
        }
    }
}

pub type NotExpr = Unary<NotOp>;
pub type TransposeExpr = Unary<TransposeOp>;

/// Unary minus. Consecutive signs fold into one node, so `negate` records
/// whether an odd number of minuses was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NegExpr {
    pub operand: ExprId,
    pub negate: bool,
}

/// Comparison operators used in chains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComparisonOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl ComparisonOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ComparisonOp::Lt => "<",
            ComparisonOp::Le => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Ge => ">=",
            ComparisonOp::Eq => "==",
            ComparisonOp::Ne => "!=",
        }
    }
}

/// A comparison chain `a < b <= c`: `ops[i]` compares `operands[i]` with
/// `operands[i + 1]`, so there is always one fewer operator than operand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EqExpr {
    pub operands: Vec<ExprId>,
    pub ops: Vec<ComparisonOp>,
}

impl EqExpr {
    /// Iterate `(lhs, op, rhs)` links of the chain
    pub fn links(&self) -> impl Iterator<Item = (ExprId, ComparisonOp, ExprId)> + '_ {
        self.ops
            .iter()
            .enumerate()
            .map(|(i, op)| (self.operands[i], *op, self.operands[i + 1]))
    }
}

/// How per-element results of a map are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReductionOp {
    Sum,
    None,
}

impl ReductionOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ReductionOp::Sum => "+",
            ReductionOp::None => "",
        }
    }
}

/// `map f(partial_actuals) to target reduce +`: apply `func` to every
/// element of `target`, passing `partial_actuals` alongside each element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapExpr {
    pub func: Id<Identifier>,
    pub partial_actuals: Vec<ExprId>,
    pub target: Id<Identifier>,
    pub op: ReductionOp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallExpr {
    pub func: Id<Identifier>,
    pub args: Vec<ExprId>,
}

/// `A(i, :)`: each index is an expression or a whole-dimension slice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TensorReadExpr {
    pub tensor: ExprId,
    pub indices: Vec<ReadParamId>,
}

/// A concrete index in a tensor read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExprParam {
    pub expr: ExprId,
}

/// A `:` index in a tensor read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slice;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TupleReadExpr {
    pub tuple: ExprId,
    pub index: ExprId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReadExpr {
    pub set_or_elem: ExprId,
    pub field: Id<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParenExpr {
    pub expr: ExprId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarExpr {
    pub ident: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntLiteral {
    pub val: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloatLiteral {
    pub val: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoolLiteral {
    pub val: bool,
}

/// Innermost row of an integer tensor literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenseIntVector {
    pub vals: Vec<i64>,
}

/// Innermost row of a floating-point tensor literal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DenseFloatVector {
    pub vals: Vec<f64>,
}

/// One level of nesting above the rows of a tensor literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenseNdTensor {
    pub elems: Vec<DenseTensorId>,
}

/// `[1, 2; 3, 4]`, optionally transposed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenseTensorLiteral {
    pub tensor: DenseTensorId,
    pub transposed: bool,
}

impl Hir {
    /// The operator of a binary expression, or `None` for other expressions
    #[must_use]
    pub fn binary_op(&self, id: ExprId) -> Option<BinaryOp> {
        match self.node(id) {
            Node::OrExpr(n) => Some(n.op()),
            Node::AndExpr(n) => Some(n.op()),
            Node::XorExpr(n) => Some(n.op()),
            Node::AddExpr(n) => Some(n.op()),
            Node::SubExpr(n) => Some(n.op()),
            Node::MulExpr(n) => Some(n.op()),
            Node::DivExpr(n) => Some(n.op()),
            Node::ElwiseMulExpr(n) => Some(n.op()),
            Node::ElwiseDivExpr(n) => Some(n.op()),
            Node::ExpExpr(n) => Some(n.op()),
            _ => None,
        }
    }

    /// Returns true if a tensor read index is a whole-dimension `:`
    #[must_use]
    pub fn is_slice(&self, id: ReadParamId) -> bool {
        self.isa::<Slice>(id)
    }

    /// Extent of each dimension of a dense literal, outermost first.
    ///
    /// Nested levels are measured along their first element; ragged
    /// literals are left for semantic analysis to reject.
    #[must_use]
    pub fn dense_shape(&self, id: DenseTensorId) -> Vec<usize> {
        match self.node(id) {
            Node::DenseIntVector(n) => vec![n.vals.len()],
            Node::DenseFloatVector(n) => vec![n.vals.len()],
            Node::DenseNdTensor(n) => {
                let mut shape = vec![n.elems.len()];
                if let Some(&first) = n.elems.first() {
                    shape.extend(self.dense_shape(first));
                }
                shape
            }
            _ => Vec::new(),
        }
    }
}
