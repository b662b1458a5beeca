//! Span derivation.
//!
//! Most composite nodes have no single token covering their full extent, so
//! their begin and/or end is taken from a designated child. The rules are per
//! variant; anything not listed uses the explicit span stored on the node.

use super::{Hir, Node, NodeId, ReductionOp};
use crate::lexer::{Location, Span};

impl Hir {
    /// The source span of a node, with derivation rules applied
    #[must_use]
    pub fn span(&self, id: impl Into<NodeId>) -> Span {
        let id = id.into();
        Span::from_locations(self.begin(id), self.end(id))
    }

    #[must_use]
    pub fn begin_line(&self, id: impl Into<NodeId>) -> u32 {
        self.begin(id.into()).line
    }

    #[must_use]
    pub fn begin_col(&self, id: impl Into<NodeId>) -> u32 {
        self.begin(id.into()).column
    }

    #[must_use]
    pub fn end_line(&self, id: impl Into<NodeId>) -> u32 {
        self.end(id.into()).line
    }

    #[must_use]
    pub fn end_col(&self, id: impl Into<NodeId>) -> u32 {
        self.end(id.into()).column
    }

    fn begin(&self, mut id: NodeId) -> Location {
        loop {
            id = match self.node(id) {
                Node::IdentDecl(n) => n.name.node(),
                Node::Argument(n) => n.decl.name.node(),
                Node::Field(n) => n.field.node(),
                Node::ExprStmt(n) => n.expr.node(),
                Node::AssignStmt(n) => n.lhs[0].node(),
                Node::OrExpr(n) => n.lhs.node(),
                Node::AndExpr(n) => n.lhs.node(),
                Node::XorExpr(n) => n.lhs.node(),
                Node::AddExpr(n) => n.lhs.node(),
                Node::SubExpr(n) => n.lhs.node(),
                Node::MulExpr(n) => n.lhs.node(),
                Node::DivExpr(n) => n.lhs.node(),
                Node::ElwiseMulExpr(n) => n.lhs.node(),
                Node::ElwiseDivExpr(n) => n.lhs.node(),
                Node::ExpExpr(n) => n.lhs.node(),
                Node::TransposeExpr(n) => n.operand.node(),
                Node::EqExpr(n) => n.operands[0].node(),
                Node::CallExpr(n) => n.func.node(),
                Node::TensorReadExpr(n) => n.tensor.node(),
                Node::TupleReadExpr(n) => n.tuple.node(),
                Node::FieldReadExpr(n) => n.set_or_elem.node(),
                Node::ExprParam(n) => n.expr.node(),
                Node::DenseTensorLiteral(n) => n.tensor.node(),
                Node::IndexSetDomain(n) => n.set.node(),
                Node::RangeDomain(n) => n.lower.node(),
                _ => return self.explicit_span(id).begin(),
            };
        }
    }

    fn end(&self, mut id: NodeId) -> Location {
        loop {
            let explicit = self.explicit_span(id);
            id = match self.node(id) {
                Node::IdentDecl(n) => n.ty.node(),
                Node::Argument(n) => n.decl.ty.node(),
                Node::OrExpr(n) => n.rhs.node(),
                Node::AndExpr(n) => n.rhs.node(),
                Node::XorExpr(n) => n.rhs.node(),
                Node::AddExpr(n) => n.rhs.node(),
                Node::SubExpr(n) => n.rhs.node(),
                Node::MulExpr(n) => n.rhs.node(),
                Node::DivExpr(n) => n.rhs.node(),
                Node::ElwiseMulExpr(n) => n.rhs.node(),
                Node::ElwiseDivExpr(n) => n.rhs.node(),
                Node::ExpExpr(n) => n.rhs.node(),
                Node::NotExpr(n) => n.operand.node(),
                Node::NegExpr(n) => n.operand.node(),
                Node::EqExpr(n) => n.operands[n.operands.len() - 1].node(),
                Node::FieldReadExpr(n) => n.field.node(),
                Node::ExprParam(n) => n.expr.node(),
                Node::DenseTensorLiteral(n) => n.tensor.node(),
                Node::IndexSetDomain(n) => n.set.node(),
                Node::RangeDomain(n) => n.upper.node(),
                Node::DoWhileStmt(n) => n.cond.node(),
                // The allocator rejects an else-less `if` with no recorded end
                Node::IfStmt(n) => match n.else_body {
                    Some(else_body) if !explicit.has_end() => else_body.node(),
                    _ => return explicit.end(),
                },
                Node::MapExpr(n) => match n.op {
                    ReductionOp::Sum if explicit.has_end() => return explicit.end(),
                    ReductionOp::Sum | ReductionOp::None => n.target.node(),
                },
                _ => return explicit.end(),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::hir::*;
    use crate::lexer::Span;

    fn var(hir: &mut Hir, name: &str, span: Span) -> ExprId {
        hir.alloc(
            span,
            VarExpr {
                ident: name.to_string(),
            },
        )
        .unwrap()
    }

    fn ident(hir: &mut Hir, name: &str, span: Span) -> Id<Identifier> {
        hir.alloc(
            span,
            Identifier {
                ident: name.to_string(),
            },
        )
        .unwrap()
    }

    #[test]
    fn binary_spans_lhs_to_rhs() {
        let mut hir = Hir::new();
        let lhs = var(&mut hir, "abc", Span::new(1, 1, 1, 3));
        let rhs = var(&mut hir, "def", Span::new(1, 7, 1, 9));
        let sum = hir.alloc(Span::unset(), AddExpr::new(lhs, rhs)).unwrap();
        assert_eq!(hir.span(sum), Span::new(1, 1, 1, 9));
        assert_eq!(hir.begin_line(sum), 1);
        assert_eq!(hir.begin_col(sum), 1);
        assert_eq!(hir.end_line(sum), 1);
        assert_eq!(hir.end_col(sum), 9);
    }

    #[test]
    fn comparison_chain_spans_first_to_last_operand() {
        let mut hir = Hir::new();
        let a = var(&mut hir, "a", Span::new(2, 1, 2, 1));
        let b = var(&mut hir, "b", Span::new(2, 5, 2, 5));
        let c = var(&mut hir, "c", Span::new(2, 10, 2, 10));
        let chain = hir
            .alloc(
                Span::unset(),
                EqExpr {
                    operands: vec![a, b, c],
                    ops: vec![ComparisonOp::Lt, ComparisonOp::Le],
                },
            )
            .unwrap();
        let node = hir.to::<EqExpr>(chain);
        assert_eq!(node.ops.len(), node.operands.len() - 1);
        assert_eq!(hir.span(chain).begin(), hir.span(a).begin());
        assert_eq!(hir.span(chain).end(), hir.span(c).end());
    }

    #[test]
    fn assignment_begins_at_first_target() {
        let mut hir = Hir::new();
        let x = var(&mut hir, "x", Span::new(3, 1, 3, 1));
        let y = var(&mut hir, "y", Span::new(3, 4, 3, 4));
        let f = ident(&mut hir, "f", Span::new(3, 8, 3, 8));
        let call = hir
            .alloc(
                Span::new(3, 8, 3, 10),
                CallExpr {
                    func: f,
                    args: Vec::new(),
                },
            )
            .unwrap();
        let assign = hir
            .alloc(
                Span::new(3, 8, 3, 11),
                AssignStmt {
                    lhs: vec![x, y],
                    expr: call,
                },
            )
            .unwrap();
        assert_eq!(hir.span(assign), Span::new(3, 1, 3, 11));
        assert_ne!(hir.span(assign).begin(), hir.span(call).begin());
    }

    #[test]
    fn map_without_reduction_ends_at_target() {
        let mut hir = Hir::new();
        let func = ident(&mut hir, "f", Span::new(1, 5, 1, 5));
        let target = ident(&mut hir, "edges", Span::new(1, 10, 1, 14));
        let map = hir
            .alloc(
                Span::new(1, 1, 1, 3),
                MapExpr {
                    func,
                    partial_actuals: Vec::new(),
                    target,
                    op: ReductionOp::None,
                },
            )
            .unwrap();
        assert_eq!(hir.span(map), Span::new(1, 1, 1, 14));
    }

    #[test]
    fn map_with_reduction_uses_recorded_end() {
        let mut hir = Hir::new();
        let func = ident(&mut hir, "f", Span::new(1, 5, 1, 5));
        let target = ident(&mut hir, "edges", Span::new(1, 10, 1, 14));
        let map = hir
            .alloc(
                Span::new(1, 1, 1, 23),
                MapExpr {
                    func,
                    partial_actuals: Vec::new(),
                    target,
                    op: ReductionOp::Sum,
                },
            )
            .unwrap();
        assert_eq!(hir.span(map), Span::new(1, 1, 1, 23));

        let bare = hir
            .alloc(
                Span::new(2, 1, 0, 0),
                MapExpr {
                    func,
                    partial_actuals: Vec::new(),
                    target,
                    op: ReductionOp::Sum,
                },
            )
            .unwrap();
        assert_eq!(hir.span(bare).end(), hir.span(target).end());
    }

    #[test]
    fn if_falls_back_to_else_body() {
        let mut hir = Hir::new();
        let cond = var(&mut hir, "c", Span::new(1, 4, 1, 4));
        let then = hir.alloc(Span::new(2, 3, 2, 10), StmtBlock::default()).unwrap();
        let other = hir.alloc(Span::new(4, 3, 4, 12), StmtBlock::default()).unwrap();
        let stmt = hir
            .alloc(
                Span::new(1, 1, 0, 0),
                IfStmt {
                    cond,
                    if_body: then.into(),
                    else_body: Some(other.into()),
                },
            )
            .unwrap();
        assert_eq!(hir.span(stmt), Span::new(1, 1, 4, 12));

        hir.set_span(stmt, Span::new(1, 1, 5, 3));
        assert_eq!(hir.span(stmt), Span::new(1, 1, 5, 3));
    }

    #[test]
    fn do_while_ends_at_condition() {
        let mut hir = Hir::new();
        let body = hir.alloc(Span::new(2, 3, 2, 9), StmtBlock::default()).unwrap();
        let cond = var(&mut hir, "done", Span::new(3, 11, 3, 14));
        let stmt = hir
            .alloc(Span::new(1, 1, 3, 3), DoWhileStmt::new(cond, body))
            .unwrap();
        assert_eq!(hir.span(stmt), Span::new(1, 1, 3, 14));

        let plain = hir
            .alloc(Span::new(5, 1, 7, 3), WhileStmt::new(cond, body))
            .unwrap();
        assert_eq!(hir.span(plain), Span::new(5, 1, 7, 3));
    }

    #[test]
    fn unary_rules() {
        let mut hir = Hir::new();
        let x = var(&mut hir, "x", Span::new(1, 5, 1, 5));
        let not = hir
            .alloc(Span::new(1, 1, 1, 3), NotExpr::new(x))
            .unwrap();
        let neg = hir
            .alloc(
                Span::new(1, 4, 1, 4),
                NegExpr {
                    operand: x,
                    negate: true,
                },
            )
            .unwrap();
        let transpose = hir
            .alloc(Span::new(1, 6, 1, 6), TransposeExpr::new(x))
            .unwrap();
        assert_eq!(hir.span(not), Span::new(1, 1, 1, 5));
        assert_eq!(hir.span(neg), Span::new(1, 4, 1, 5));
        assert_eq!(hir.span(transpose), Span::new(1, 5, 1, 6));
    }

    #[test]
    fn reads_begin_at_base() {
        let mut hir = Hir::new();
        let a = var(&mut hir, "A", Span::new(1, 1, 1, 1));
        let i = var(&mut hir, "i", Span::new(1, 3, 1, 3));
        let param = hir.alloc(Span::unset(), ExprParam { expr: i }).unwrap();
        let slice = hir.alloc(Span::new(1, 6, 1, 6), Slice).unwrap();
        let read = hir
            .alloc(
                Span::new(1, 2, 1, 7),
                TensorReadExpr {
                    tensor: a,
                    indices: vec![param, slice],
                },
            )
            .unwrap();
        assert_eq!(hir.span(read), Span::new(1, 1, 1, 7));
        assert_eq!(hir.span(param), Span::new(1, 3, 1, 3));

        let field = ident(&mut hir, "pos", Span::new(1, 3, 1, 5));
        let p = var(&mut hir, "p", Span::new(1, 1, 1, 1));
        let field_read = hir
            .alloc(
                Span::unset(),
                FieldReadExpr {
                    set_or_elem: p,
                    field,
                },
            )
            .unwrap();
        assert_eq!(hir.span(field_read), Span::new(1, 1, 1, 5));

        let t = var(&mut hir, "t", Span::new(4, 2, 4, 2));
        let zero = hir.alloc(Span::new(4, 4, 4, 4), IntLiteral { val: 0 }).unwrap();
        let tuple_read = hir
            .alloc(
                Span::new(4, 3, 4, 5),
                TupleReadExpr {
                    tuple: t,
                    index: zero,
                },
            )
            .unwrap();
        assert_eq!(hir.span(tuple_read), Span::new(4, 2, 4, 5));
    }

    #[test]
    fn declarations_span_name_to_type() {
        let mut hir = Hir::new();
        let name = ident(&mut hir, "x", Span::new(1, 5, 1, 5));
        let ty = hir
            .alloc(
                Span::new(1, 9, 1, 13),
                ScalarTensorType {
                    kind: ScalarKind::Float,
                },
            )
            .unwrap();
        let decl = hir.alloc(Span::unset(), IdentDecl { name, ty }).unwrap();
        assert_eq!(hir.span(decl), Span::new(1, 5, 1, 13));

        let arg = hir
            .alloc(
                Span::new(1, 1, 0, 0),
                Argument {
                    decl: IdentDecl { name, ty },
                    inout: true,
                },
            )
            .unwrap();
        assert_eq!(hir.span(arg), Span::new(1, 5, 1, 13));

        let field = hir.alloc(Span::new(0, 0, 1, 14), Field { field: decl }).unwrap();
        assert_eq!(hir.span(field), Span::new(1, 5, 1, 14));
    }

    #[test]
    fn domains_delegate_to_bounds() {
        let mut hir = Hir::new();
        let lower = hir.alloc(Span::new(1, 10, 1, 10), IntLiteral { val: 0 }).unwrap();
        let upper = var(&mut hir, "n", Span::new(1, 12, 1, 12));
        let range = hir.alloc(Span::unset(), RangeDomain { lower, upper }).unwrap();
        assert_eq!(hir.span(range), Span::new(1, 10, 1, 12));

        let set = hir
            .alloc(
                Span::new(2, 10, 2, 14),
                SetIndexSet {
                    set_name: "edges".to_string(),
                },
            )
            .unwrap();
        let domain = hir.alloc(Span::unset(), IndexSetDomain { set }).unwrap();
        assert_eq!(hir.span(domain), Span::new(2, 10, 2, 14));
    }
}
