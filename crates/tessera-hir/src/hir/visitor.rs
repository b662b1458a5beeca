//! Double-dispatch over HIR nodes.
//!
//! [`Hir::accept`] matches on the exact variant of a node and calls the
//! corresponding `visit_*` method with a typed id and the payload. Every
//! method has a default that forwards to its family (`visit_expr`,
//! `visit_stmt`, ...), and every family forwards to [`Visitor::visit_node`],
//! which does nothing. Nodes never traverse themselves: a visitor that wants
//! to descend calls [`walk_children`] or accepts specific children.

use super::{
    AddExpr, AndExpr, Argument, AssignStmt, BinaryOp, BoolLiteral, CallExpr, ConstDecl,
    DenseFloatVector, DenseIntVector, DenseNdTensor, DenseTensorId, DenseTensorLiteral, DivExpr,
    DoWhileStmt, DynamicIndexSet, ElementType, ElementTypeDecl, ElwiseDivExpr, ElwiseMulExpr,
    Endpoint, EqExpr, ExpExpr, ExprId, ExprParam, ExprStmt, ExternDecl, Field, FieldReadExpr,
    FloatLiteral, ForDomainId, ForStmt, FuncDecl, Hir, Id, IdentDecl, Identifier, IfStmt,
    IndexSetDomain, IndexSetId, IntLiteral, MapExpr, MulExpr, NegExpr, Node, NodeId,
    NonScalarTensorType, NotExpr, OrExpr, ParenExpr, PrintStmt, ProcDecl, Program, RangeDomain,
    RangeIndexSet, ReadParamId, ScalarTensorType, SetIndexSet, SetType, Slice, StmtBlock, StmtId,
    SubExpr, TensorReadExpr, Test, TransposeExpr, TupleLength, TupleReadExpr, TupleType, TypeId,
    VarDecl, VarExpr, WhileStmt, XorExpr,
};

/// A pass over the HIR.
///
/// Override the concrete methods you care about; everything else falls
/// through to the family handlers and finally to [`Visitor::visit_node`].
#[allow(unused_variables)]
pub trait Visitor {
    // ===== Fallbacks =====

    /// Final fallback for every node
    fn visit_node(&mut self, hir: &Hir, id: NodeId) {}

    fn visit_expr(&mut self, hir: &Hir, id: ExprId) {
        self.visit_node(hir, id.node());
    }

    fn visit_stmt(&mut self, hir: &Hir, id: StmtId) {
        self.visit_node(hir, id.node());
    }

    fn visit_type(&mut self, hir: &Hir, id: TypeId) {
        self.visit_node(hir, id.node());
    }

    fn visit_index_set(&mut self, hir: &Hir, id: IndexSetId) {
        self.visit_node(hir, id.node());
    }

    fn visit_for_domain(&mut self, hir: &Hir, id: ForDomainId) {
        self.visit_node(hir, id.node());
    }

    fn visit_read_param(&mut self, hir: &Hir, id: ReadParamId) {
        self.visit_node(hir, id.node());
    }

    fn visit_dense_tensor(&mut self, hir: &Hir, id: DenseTensorId) {
        self.visit_node(hir, id.node());
    }

    /// Identifiers, declarations and callables
    fn visit_decl(&mut self, hir: &Hir, id: NodeId) {
        self.visit_node(hir, id);
    }

    /// Endpoints, tuple lengths and tests
    fn visit_misc(&mut self, hir: &Hir, id: NodeId) {
        self.visit_node(hir, id);
    }

    /// Shared entry for the ten binary operators
    fn visit_binary(&mut self, hir: &Hir, id: ExprId, op: BinaryOp, lhs: ExprId, rhs: ExprId) {
        self.visit_expr(hir, id);
    }

    // ===== Containers =====

    fn visit_program(&mut self, hir: &Hir, id: Id<Program>, node: &Program) {
        self.visit_node(hir, id.node());
    }

    fn visit_stmt_block(&mut self, hir: &Hir, id: Id<StmtBlock>, node: &StmtBlock) {
        self.visit_stmt(hir, id.into());
    }

    // ===== Index sets =====

    fn visit_range_index_set(&mut self, hir: &Hir, id: IndexSetId, node: &RangeIndexSet) {
        self.visit_index_set(hir, id);
    }

    fn visit_set_index_set(&mut self, hir: &Hir, id: Id<SetIndexSet>, node: &SetIndexSet) {
        self.visit_index_set(hir, id.into());
    }

    fn visit_dynamic_index_set(&mut self, hir: &Hir, id: IndexSetId, node: &DynamicIndexSet) {
        self.visit_index_set(hir, id);
    }

    // ===== Types =====

    fn visit_element_type(&mut self, hir: &Hir, id: Id<ElementType>, node: &ElementType) {
        self.visit_type(hir, id.into());
    }

    fn visit_endpoint(&mut self, hir: &Hir, id: Id<Endpoint>, node: &Endpoint) {
        self.visit_misc(hir, id.node());
    }

    fn visit_set_type(&mut self, hir: &Hir, id: TypeId, node: &SetType) {
        self.visit_type(hir, id);
    }

    fn visit_tuple_length(&mut self, hir: &Hir, id: Id<TupleLength>, node: &TupleLength) {
        self.visit_misc(hir, id.node());
    }

    fn visit_tuple_type(&mut self, hir: &Hir, id: TypeId, node: &TupleType) {
        self.visit_type(hir, id);
    }

    fn visit_scalar_tensor_type(&mut self, hir: &Hir, id: TypeId, node: &ScalarTensorType) {
        self.visit_type(hir, id);
    }

    fn visit_non_scalar_tensor_type(
        &mut self,
        hir: &Hir,
        id: TypeId,
        node: &NonScalarTensorType,
    ) {
        self.visit_type(hir, id);
    }

    // ===== Declarations =====

    fn visit_identifier(&mut self, hir: &Hir, id: Id<Identifier>, node: &Identifier) {
        self.visit_decl(hir, id.node());
    }

    fn visit_ident_decl(&mut self, hir: &Hir, id: Id<IdentDecl>, node: &IdentDecl) {
        self.visit_decl(hir, id.node());
    }

    fn visit_field(&mut self, hir: &Hir, id: Id<Field>, node: &Field) {
        self.visit_decl(hir, id.node());
    }

    fn visit_element_type_decl(
        &mut self,
        hir: &Hir,
        id: Id<ElementTypeDecl>,
        node: &ElementTypeDecl,
    ) {
        self.visit_decl(hir, id.node());
    }

    fn visit_argument(&mut self, hir: &Hir, id: Id<Argument>, node: &Argument) {
        self.visit_decl(hir, id.node());
    }

    fn visit_extern_decl(&mut self, hir: &Hir, id: Id<ExternDecl>, node: &ExternDecl) {
        self.visit_decl(hir, id.node());
    }

    fn visit_func_decl(&mut self, hir: &Hir, id: Id<FuncDecl>, node: &FuncDecl) {
        self.visit_decl(hir, id.node());
    }

    fn visit_proc_decl(&mut self, hir: &Hir, id: Id<ProcDecl>, node: &ProcDecl) {
        self.visit_decl(hir, id.node());
    }

    // ===== Statements =====

    fn visit_var_decl(&mut self, hir: &Hir, id: StmtId, node: &VarDecl) {
        self.visit_stmt(hir, id);
    }

    fn visit_const_decl(&mut self, hir: &Hir, id: StmtId, node: &ConstDecl) {
        self.visit_stmt(hir, id);
    }

    fn visit_while_stmt(&mut self, hir: &Hir, id: StmtId, node: &WhileStmt) {
        self.visit_stmt(hir, id);
    }

    fn visit_do_while_stmt(&mut self, hir: &Hir, id: StmtId, node: &DoWhileStmt) {
        self.visit_stmt(hir, id);
    }

    fn visit_if_stmt(&mut self, hir: &Hir, id: StmtId, node: &IfStmt) {
        self.visit_stmt(hir, id);
    }

    fn visit_index_set_domain(&mut self, hir: &Hir, id: ForDomainId, node: &IndexSetDomain) {
        self.visit_for_domain(hir, id);
    }

    fn visit_range_domain(&mut self, hir: &Hir, id: ForDomainId, node: &RangeDomain) {
        self.visit_for_domain(hir, id);
    }

    fn visit_for_stmt(&mut self, hir: &Hir, id: StmtId, node: &ForStmt) {
        self.visit_stmt(hir, id);
    }

    fn visit_print_stmt(&mut self, hir: &Hir, id: StmtId, node: &PrintStmt) {
        self.visit_stmt(hir, id);
    }

    fn visit_expr_stmt(&mut self, hir: &Hir, id: StmtId, node: &ExprStmt) {
        self.visit_stmt(hir, id);
    }

    fn visit_assign_stmt(&mut self, hir: &Hir, id: StmtId, node: &AssignStmt) {
        self.visit_stmt(hir, id);
    }

    // ===== Tensor read parameters =====

    fn visit_slice(&mut self, hir: &Hir, id: ReadParamId, node: &Slice) {
        self.visit_read_param(hir, id);
    }

    fn visit_expr_param(&mut self, hir: &Hir, id: ReadParamId, node: &ExprParam) {
        self.visit_read_param(hir, id);
    }

    // ===== Expressions =====

    fn visit_map_expr(&mut self, hir: &Hir, id: ExprId, node: &MapExpr) {
        self.visit_expr(hir, id);
    }

    fn visit_or_expr(&mut self, hir: &Hir, id: ExprId, node: &OrExpr) {
        self.visit_binary(hir, id, node.op(), node.lhs, node.rhs);
    }

    fn visit_and_expr(&mut self, hir: &Hir, id: ExprId, node: &AndExpr) {
        self.visit_binary(hir, id, node.op(), node.lhs, node.rhs);
    }

    fn visit_xor_expr(&mut self, hir: &Hir, id: ExprId, node: &XorExpr) {
        self.visit_binary(hir, id, node.op(), node.lhs, node.rhs);
    }

    fn visit_eq_expr(&mut self, hir: &Hir, id: ExprId, node: &EqExpr) {
        self.visit_expr(hir, id);
    }

    fn visit_not_expr(&mut self, hir: &Hir, id: ExprId, node: &NotExpr) {
        self.visit_expr(hir, id);
    }

    fn visit_add_expr(&mut self, hir: &Hir, id: ExprId, node: &AddExpr) {
        self.visit_binary(hir, id, node.op(), node.lhs, node.rhs);
    }

    fn visit_sub_expr(&mut self, hir: &Hir, id: ExprId, node: &SubExpr) {
        self.visit_binary(hir, id, node.op(), node.lhs, node.rhs);
    }

    fn visit_mul_expr(&mut self, hir: &Hir, id: ExprId, node: &MulExpr) {
        self.visit_binary(hir, id, node.op(), node.lhs, node.rhs);
    }

    fn visit_div_expr(&mut self, hir: &Hir, id: ExprId, node: &DivExpr) {
        self.visit_binary(hir, id, node.op(), node.lhs, node.rhs);
    }

    fn visit_elwise_mul_expr(&mut self, hir: &Hir, id: ExprId, node: &ElwiseMulExpr) {
        self.visit_binary(hir, id, node.op(), node.lhs, node.rhs);
    }

    fn visit_elwise_div_expr(&mut self, hir: &Hir, id: ExprId, node: &ElwiseDivExpr) {
        self.visit_binary(hir, id, node.op(), node.lhs, node.rhs);
    }

    fn visit_neg_expr(&mut self, hir: &Hir, id: ExprId, node: &NegExpr) {
        self.visit_expr(hir, id);
    }

    fn visit_exp_expr(&mut self, hir: &Hir, id: ExprId, node: &ExpExpr) {
        self.visit_binary(hir, id, node.op(), node.lhs, node.rhs);
    }

    fn visit_transpose_expr(&mut self, hir: &Hir, id: ExprId, node: &TransposeExpr) {
        self.visit_expr(hir, id);
    }

    fn visit_call_expr(&mut self, hir: &Hir, id: ExprId, node: &CallExpr) {
        self.visit_expr(hir, id);
    }

    fn visit_tensor_read_expr(&mut self, hir: &Hir, id: ExprId, node: &TensorReadExpr) {
        self.visit_expr(hir, id);
    }

    fn visit_tuple_read_expr(&mut self, hir: &Hir, id: ExprId, node: &TupleReadExpr) {
        self.visit_expr(hir, id);
    }

    fn visit_field_read_expr(&mut self, hir: &Hir, id: ExprId, node: &FieldReadExpr) {
        self.visit_expr(hir, id);
    }

    fn visit_paren_expr(&mut self, hir: &Hir, id: ExprId, node: &ParenExpr) {
        self.visit_expr(hir, id);
    }

    fn visit_var_expr(&mut self, hir: &Hir, id: ExprId, node: &VarExpr) {
        self.visit_expr(hir, id);
    }

    fn visit_int_literal(&mut self, hir: &Hir, id: ExprId, node: &IntLiteral) {
        self.visit_expr(hir, id);
    }

    fn visit_float_literal(&mut self, hir: &Hir, id: ExprId, node: &FloatLiteral) {
        self.visit_expr(hir, id);
    }

    fn visit_bool_literal(&mut self, hir: &Hir, id: ExprId, node: &BoolLiteral) {
        self.visit_expr(hir, id);
    }

    // ===== Dense tensor literals =====

    fn visit_dense_int_vector(&mut self, hir: &Hir, id: DenseTensorId, node: &DenseIntVector) {
        self.visit_dense_tensor(hir, id);
    }

    fn visit_dense_float_vector(
        &mut self,
        hir: &Hir,
        id: DenseTensorId,
        node: &DenseFloatVector,
    ) {
        self.visit_dense_tensor(hir, id);
    }

    fn visit_dense_nd_tensor(&mut self, hir: &Hir, id: DenseTensorId, node: &DenseNdTensor) {
        self.visit_dense_tensor(hir, id);
    }

    fn visit_dense_tensor_literal(
        &mut self,
        hir: &Hir,
        id: ExprId,
        node: &DenseTensorLiteral,
    ) {
        self.visit_expr(hir, id);
    }

    fn visit_test(&mut self, hir: &Hir, id: Id<Test>, node: &Test) {
        self.visit_misc(hir, id.node());
    }
}

impl Hir {
    /// Call the `visit_*` method matching the exact variant of `id`
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this arena.
    pub fn accept<V: Visitor + ?Sized>(&self, id: impl Into<NodeId>, visitor: &mut V) {
        let id = id.into();
        match self.node(id) {
            Node::Program(n) => visitor.visit_program(self, Id::from_raw(id), n),
            Node::StmtBlock(n) => visitor.visit_stmt_block(self, Id::from_raw(id), n),
            Node::RangeIndexSet(n) => visitor.visit_range_index_set(self, Id::from_raw(id), n),
            Node::SetIndexSet(n) => visitor.visit_set_index_set(self, Id::from_raw(id), n),
            Node::DynamicIndexSet(n) => {
                visitor.visit_dynamic_index_set(self, Id::from_raw(id), n);
            }
            Node::ElementType(n) => visitor.visit_element_type(self, Id::from_raw(id), n),
            Node::Endpoint(n) => visitor.visit_endpoint(self, Id::from_raw(id), n),
            Node::SetType(n) => visitor.visit_set_type(self, Id::from_raw(id), n),
            Node::TupleLength(n) => visitor.visit_tuple_length(self, Id::from_raw(id), n),
            Node::TupleType(n) => visitor.visit_tuple_type(self, Id::from_raw(id), n),
            Node::ScalarTensorType(n) => {
                visitor.visit_scalar_tensor_type(self, Id::from_raw(id), n);
            }
            Node::NonScalarTensorType(n) => {
                visitor.visit_non_scalar_tensor_type(self, Id::from_raw(id), n);
            }
            Node::Identifier(n) => visitor.visit_identifier(self, Id::from_raw(id), n),
            Node::IdentDecl(n) => visitor.visit_ident_decl(self, Id::from_raw(id), n),
            Node::Field(n) => visitor.visit_field(self, Id::from_raw(id), n),
            Node::ElementTypeDecl(n) => {
                visitor.visit_element_type_decl(self, Id::from_raw(id), n);
            }
            Node::Argument(n) => visitor.visit_argument(self, Id::from_raw(id), n),
            Node::ExternDecl(n) => visitor.visit_extern_decl(self, Id::from_raw(id), n),
            Node::FuncDecl(n) => visitor.visit_func_decl(self, Id::from_raw(id), n),
            Node::ProcDecl(n) => visitor.visit_proc_decl(self, Id::from_raw(id), n),
            Node::VarDecl(n) => visitor.visit_var_decl(self, Id::from_raw(id), n),
            Node::ConstDecl(n) => visitor.visit_const_decl(self, Id::from_raw(id), n),
            Node::WhileStmt(n) => visitor.visit_while_stmt(self, Id::from_raw(id), n),
            Node::DoWhileStmt(n) => visitor.visit_do_while_stmt(self, Id::from_raw(id), n),
            Node::IfStmt(n) => visitor.visit_if_stmt(self, Id::from_raw(id), n),
            Node::IndexSetDomain(n) => visitor.visit_index_set_domain(self, Id::from_raw(id), n),
            Node::RangeDomain(n) => visitor.visit_range_domain(self, Id::from_raw(id), n),
            Node::ForStmt(n) => visitor.visit_for_stmt(self, Id::from_raw(id), n),
            Node::PrintStmt(n) => visitor.visit_print_stmt(self, Id::from_raw(id), n),
            Node::ExprStmt(n) => visitor.visit_expr_stmt(self, Id::from_raw(id), n),
            Node::AssignStmt(n) => visitor.visit_assign_stmt(self, Id::from_raw(id), n),
            Node::Slice(n) => visitor.visit_slice(self, Id::from_raw(id), n),
            Node::ExprParam(n) => visitor.visit_expr_param(self, Id::from_raw(id), n),
            Node::MapExpr(n) => visitor.visit_map_expr(self, Id::from_raw(id), n),
            Node::OrExpr(n) => visitor.visit_or_expr(self, Id::from_raw(id), n),
            Node::AndExpr(n) => visitor.visit_and_expr(self, Id::from_raw(id), n),
            Node::XorExpr(n) => visitor.visit_xor_expr(self, Id::from_raw(id), n),
            Node::EqExpr(n) => visitor.visit_eq_expr(self, Id::from_raw(id), n),
            Node::NotExpr(n) => visitor.visit_not_expr(self, Id::from_raw(id), n),
            Node::AddExpr(n) => visitor.visit_add_expr(self, Id::from_raw(id), n),
            Node::SubExpr(n) => visitor.visit_sub_expr(self, Id::from_raw(id), n),
            Node::MulExpr(n) => visitor.visit_mul_expr(self, Id::from_raw(id), n),
            Node::DivExpr(n) => visitor.visit_div_expr(self, Id::from_raw(id), n),
            Node::ElwiseMulExpr(n) => visitor.visit_elwise_mul_expr(self, Id::from_raw(id), n),
            Node::ElwiseDivExpr(n) => visitor.visit_elwise_div_expr(self, Id::from_raw(id), n),
            Node::NegExpr(n) => visitor.visit_neg_expr(self, Id::from_raw(id), n),
            Node::ExpExpr(n) => visitor.visit_exp_expr(self, Id::from_raw(id), n),
            Node::TransposeExpr(n) => visitor.visit_transpose_expr(self, Id::from_raw(id), n),
            Node::CallExpr(n) => visitor.visit_call_expr(self, Id::from_raw(id), n),
            Node::TensorReadExpr(n) => visitor.visit_tensor_read_expr(self, Id::from_raw(id), n),
            Node::TupleReadExpr(n) => visitor.visit_tuple_read_expr(self, Id::from_raw(id), n),
            Node::FieldReadExpr(n) => visitor.visit_field_read_expr(self, Id::from_raw(id), n),
            Node::ParenExpr(n) => visitor.visit_paren_expr(self, Id::from_raw(id), n),
            Node::VarExpr(n) => visitor.visit_var_expr(self, Id::from_raw(id), n),
            Node::IntLiteral(n) => visitor.visit_int_literal(self, Id::from_raw(id), n),
            Node::FloatLiteral(n) => visitor.visit_float_literal(self, Id::from_raw(id), n),
            Node::BoolLiteral(n) => visitor.visit_bool_literal(self, Id::from_raw(id), n),
            Node::DenseIntVector(n) => visitor.visit_dense_int_vector(self, Id::from_raw(id), n),
            Node::DenseFloatVector(n) => {
                visitor.visit_dense_float_vector(self, Id::from_raw(id), n);
            }
            Node::DenseNdTensor(n) => visitor.visit_dense_nd_tensor(self, Id::from_raw(id), n),
            Node::DenseTensorLiteral(n) => {
                visitor.visit_dense_tensor_literal(self, Id::from_raw(id), n);
            }
            Node::Test(n) => visitor.visit_test(self, Id::from_raw(id), n),
        }
    }
}

/// Accept every direct child of `id` in source order
pub fn walk_children<V: Visitor + ?Sized>(hir: &Hir, id: impl Into<NodeId>, visitor: &mut V) {
    for child in hir.children(id) {
        hir.accept(child, visitor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::{
        ComparisonOp, HirNode, NodeFamily, NodeVariant, ReductionOp, ScalarKind,
    };
    use crate::lexer::Span;
    use std::collections::HashSet;

    /// Allocates one node of every variant, returning the ids in allocation order
    fn every_variant(hir: &mut Hir) -> Vec<NodeId> {
        let s = Span::new(1, 1, 1, 1);
        let mut ids = Vec::new();
        macro_rules! add {
            ($node:expr) => {{
                let id = hir.alloc(s, $node).unwrap();
                ids.push(id.node());
                id
            }};
        }

        let range_set = add!(RangeIndexSet { range: 3 });
        let named_set = add!(SetIndexSet {
            set_name: "V".to_string()
        });
        let dynamic = add!(DynamicIndexSet);
        let elem = add!(ElementType {
            ident: "Point".to_string()
        });
        let endpoint = add!(Endpoint {
            set_name: "V".to_string()
        });
        add!(SetType {
            element: elem,
            endpoints: vec![endpoint],
        });
        let length = add!(TupleLength { val: 2 });
        add!(TupleType {
            element: elem,
            length,
        });
        let float = add!(ScalarTensorType {
            kind: ScalarKind::Float
        });
        add!(NonScalarTensorType {
            index_sets: vec![range_set, named_set.into(), dynamic],
            block_type: float,
            transposed: false,
        });
        let name = add!(Identifier {
            ident: "x".to_string()
        });
        let decl = add!(IdentDecl { name, ty: float });
        let field = add!(Field { field: decl });
        add!(ElementTypeDecl {
            name,
            fields: vec![field],
        });
        let arg = add!(Argument {
            decl: IdentDecl { name, ty: float },
            inout: false,
        });
        add!(ExternDecl { var: arg });
        let body = add!(StmtBlock::default());
        add!(FuncDecl::new(name, vec![arg], vec![decl], body));
        add!(ProcDecl::new(name, Vec::new(), Vec::new(), body));

        let x = add!(VarExpr {
            ident: "x".to_string()
        });
        let one = add!(IntLiteral { val: 1 });
        add!(VarDecl::new(decl, Some(one)));
        add!(ConstDecl::new(decl, None));
        add!(WhileStmt::new(x, body));
        add!(DoWhileStmt::new(x, body));
        add!(IfStmt {
            cond: x,
            if_body: body.into(),
            else_body: Some(body.into()),
        });
        let domain = add!(IndexSetDomain { set: named_set });
        add!(RangeDomain {
            lower: one,
            upper: x
        });
        add!(ForStmt {
            loop_var: name,
            domain,
            body,
        });
        add!(PrintStmt { expr: x });
        add!(ExprStmt { expr: x });
        add!(AssignStmt {
            lhs: vec![x],
            expr: one,
        });
        let slice = add!(Slice);
        let param = add!(ExprParam { expr: one });
        add!(MapExpr {
            func: name,
            partial_actuals: vec![one],
            target: name,
            op: ReductionOp::Sum,
        });
        add!(OrExpr::new(x, x));
        add!(AndExpr::new(x, x));
        add!(XorExpr::new(x, x));
        add!(EqExpr {
            operands: vec![x, one],
            ops: vec![ComparisonOp::Ne],
        });
        add!(NotExpr::new(x));
        add!(AddExpr::new(x, one));
        add!(SubExpr::new(x, one));
        add!(MulExpr::new(x, one));
        add!(DivExpr::new(x, one));
        add!(ElwiseMulExpr::new(x, one));
        add!(ElwiseDivExpr::new(x, one));
        add!(NegExpr {
            operand: x,
            negate: true,
        });
        add!(ExpExpr::new(x, one));
        add!(TransposeExpr::new(x));
        add!(CallExpr {
            func: name,
            args: vec![x],
        });
        add!(TensorReadExpr {
            tensor: x,
            indices: vec![param, slice],
        });
        add!(TupleReadExpr {
            tuple: x,
            index: one,
        });
        add!(FieldReadExpr {
            set_or_elem: x,
            field: name,
        });
        add!(ParenExpr { expr: x });
        add!(FloatLiteral { val: 2.5 });
        add!(BoolLiteral { val: true });
        let ints = add!(DenseIntVector { vals: vec![1, 2] });
        add!(DenseFloatVector {
            vals: vec![1.0, 2.0]
        });
        let nd = add!(DenseNdTensor {
            elems: vec![ints, ints]
        });
        add!(DenseTensorLiteral {
            tensor: nd,
            transposed: false,
        });
        let test = add!(Test {
            func: name,
            args: vec![one],
            expected: one,
        });
        add!(Program {
            elems: vec![test.node()],
        });
        ids
    }

    #[derive(Default)]
    struct FamilyRecorder {
        seen: Vec<(NodeId, NodeFamily)>,
    }

    impl Visitor for FamilyRecorder {
        fn visit_expr(&mut self, _: &Hir, id: ExprId) {
            self.seen.push((id.node(), NodeFamily::Expr));
        }
        fn visit_stmt(&mut self, _: &Hir, id: StmtId) {
            self.seen.push((id.node(), NodeFamily::Stmt));
        }
        fn visit_type(&mut self, _: &Hir, id: TypeId) {
            self.seen.push((id.node(), NodeFamily::Type));
        }
        fn visit_index_set(&mut self, _: &Hir, id: IndexSetId) {
            self.seen.push((id.node(), NodeFamily::IndexSet));
        }
        fn visit_for_domain(&mut self, _: &Hir, id: ForDomainId) {
            self.seen.push((id.node(), NodeFamily::ForDomain));
        }
        fn visit_read_param(&mut self, _: &Hir, id: ReadParamId) {
            self.seen.push((id.node(), NodeFamily::ReadParam));
        }
        fn visit_dense_tensor(&mut self, _: &Hir, id: DenseTensorId) {
            self.seen.push((id.node(), NodeFamily::DenseTensor));
        }
        fn visit_decl(&mut self, _: &Hir, id: NodeId) {
            self.seen.push((id, NodeFamily::Decl));
        }
        fn visit_misc(&mut self, _: &Hir, id: NodeId) {
            self.seen.push((id, NodeFamily::Misc));
        }
        fn visit_program(&mut self, _: &Hir, id: Id<Program>, _: &Program) {
            self.seen.push((id.node(), NodeFamily::Program));
        }
    }

    #[test]
    fn every_variant_reaches_its_family() {
        let mut hir = Hir::new();
        let ids = every_variant(&mut hir);

        let variants: HashSet<_> = ids.iter().map(|&id| hir.variant(id)).collect();
        assert_eq!(variants.len(), NodeVariant::ALL.len());

        let mut recorder = FamilyRecorder::default();
        for &id in &ids {
            hir.accept(id, &mut recorder);
        }
        assert_eq!(recorder.seen.len(), ids.len());
        for (id, family) in recorder.seen {
            assert_eq!(hir.variant(id).family(), family, "{}", hir.variant(id));
        }
    }

    /// Overrides every concrete method and records which one ran
    #[derive(Default)]
    struct VariantRecorder {
        seen: Vec<(NodeId, NodeVariant)>,
    }

    macro_rules! record_variants {
        ($($method:ident: $ty:ident => $handle:ty),* $(,)?) => {
            $(
                fn $method(&mut self, _: &Hir, id: $handle, _: &$ty) {
                    self.seen.push((id.node(), NodeVariant::$ty));
                }
            )*
        };
    }

    impl Visitor for VariantRecorder {
        record_variants!(
            visit_program: Program => Id<Program>,
            visit_stmt_block: StmtBlock => Id<StmtBlock>,
            visit_range_index_set: RangeIndexSet => IndexSetId,
            visit_set_index_set: SetIndexSet => Id<SetIndexSet>,
            visit_dynamic_index_set: DynamicIndexSet => IndexSetId,
            visit_element_type: ElementType => Id<ElementType>,
            visit_endpoint: Endpoint => Id<Endpoint>,
            visit_set_type: SetType => TypeId,
            visit_tuple_length: TupleLength => Id<TupleLength>,
            visit_tuple_type: TupleType => TypeId,
            visit_scalar_tensor_type: ScalarTensorType => TypeId,
            visit_non_scalar_tensor_type: NonScalarTensorType => TypeId,
            visit_identifier: Identifier => Id<Identifier>,
            visit_ident_decl: IdentDecl => Id<IdentDecl>,
            visit_field: Field => Id<Field>,
            visit_element_type_decl: ElementTypeDecl => Id<ElementTypeDecl>,
            visit_argument: Argument => Id<Argument>,
            visit_extern_decl: ExternDecl => Id<ExternDecl>,
            visit_func_decl: FuncDecl => Id<FuncDecl>,
            visit_proc_decl: ProcDecl => Id<ProcDecl>,
            visit_var_decl: VarDecl => StmtId,
            visit_const_decl: ConstDecl => StmtId,
            visit_while_stmt: WhileStmt => StmtId,
            visit_do_while_stmt: DoWhileStmt => StmtId,
            visit_if_stmt: IfStmt => StmtId,
            visit_index_set_domain: IndexSetDomain => ForDomainId,
            visit_range_domain: RangeDomain => ForDomainId,
            visit_for_stmt: ForStmt => StmtId,
            visit_print_stmt: PrintStmt => StmtId,
            visit_expr_stmt: ExprStmt => StmtId,
            visit_assign_stmt: AssignStmt => StmtId,
            visit_slice: Slice => ReadParamId,
            visit_expr_param: ExprParam => ReadParamId,
            visit_map_expr: MapExpr => ExprId,
            visit_or_expr: OrExpr => ExprId,
            visit_and_expr: AndExpr => ExprId,
            visit_xor_expr: XorExpr => ExprId,
            visit_eq_expr: EqExpr => ExprId,
            visit_not_expr: NotExpr => ExprId,
            visit_add_expr: AddExpr => ExprId,
            visit_sub_expr: SubExpr => ExprId,
            visit_mul_expr: MulExpr => ExprId,
            visit_div_expr: DivExpr => ExprId,
            visit_elwise_mul_expr: ElwiseMulExpr => ExprId,
            visit_elwise_div_expr: ElwiseDivExpr => ExprId,
            visit_neg_expr: NegExpr => ExprId,
            visit_exp_expr: ExpExpr => ExprId,
            visit_transpose_expr: TransposeExpr => ExprId,
            visit_call_expr: CallExpr => ExprId,
            visit_tensor_read_expr: TensorReadExpr => ExprId,
            visit_tuple_read_expr: TupleReadExpr => ExprId,
            visit_field_read_expr: FieldReadExpr => ExprId,
            visit_paren_expr: ParenExpr => ExprId,
            visit_var_expr: VarExpr => ExprId,
            visit_int_literal: IntLiteral => ExprId,
            visit_float_literal: FloatLiteral => ExprId,
            visit_bool_literal: BoolLiteral => ExprId,
            visit_dense_int_vector: DenseIntVector => DenseTensorId,
            visit_dense_float_vector: DenseFloatVector => DenseTensorId,
            visit_dense_nd_tensor: DenseNdTensor => DenseTensorId,
            visit_dense_tensor_literal: DenseTensorLiteral => ExprId,
            visit_test: Test => Id<Test>,
        );

        fn visit_node(&mut self, hir: &Hir, id: NodeId) {
            panic!("{} fell through to visit_node", hir.variant(id));
        }
    }

    #[test]
    fn every_variant_reaches_its_own_method() {
        let mut hir = Hir::new();
        let ids = every_variant(&mut hir);

        let mut recorder = VariantRecorder::default();
        for &id in &ids {
            hir.accept(id, &mut recorder);
        }

        assert_eq!(recorder.seen.len(), NodeVariant::ALL.len());
        for (&id, &(seen_id, variant)) in ids.iter().zip(&recorder.seen) {
            assert_eq!(seen_id, id);
            assert_eq!(variant, hir.variant(id), "dispatched to the wrong method");
        }
    }

    #[test]
    fn conversion_succeeds_only_for_the_exact_variant() {
        let mut hir = Hir::new();
        let ids = every_variant(&mut hir);

        macro_rules! check {
            ($($ty:ty),* $(,)?) => {
                let mut checked = 0;
                $(
                    checked += 1;
                    for &id in &ids {
                        let same = hir.variant(id) == <$ty as HirNode>::VARIANT;
                        assert_eq!(hir.try_to::<$ty>(id).is_ok(), same);
                        assert_eq!(hir.isa::<$ty>(id), same);
                    }
                )*
                assert_eq!(checked, NodeVariant::ALL.len());
            };
        }

        check!(
            Program, StmtBlock, RangeIndexSet, SetIndexSet, DynamicIndexSet, ElementType,
            Endpoint, SetType, TupleLength, TupleType, ScalarTensorType, NonScalarTensorType,
            Identifier, IdentDecl, Field, ElementTypeDecl, Argument, ExternDecl, FuncDecl,
            ProcDecl, VarDecl, ConstDecl, WhileStmt, DoWhileStmt, IfStmt, IndexSetDomain,
            RangeDomain, ForStmt, PrintStmt, ExprStmt, AssignStmt, Slice, ExprParam, MapExpr,
            OrExpr, AndExpr, XorExpr, EqExpr, NotExpr, AddExpr, SubExpr, MulExpr, DivExpr,
            ElwiseMulExpr, ElwiseDivExpr, NegExpr, ExpExpr, TransposeExpr, CallExpr,
            TensorReadExpr, TupleReadExpr, FieldReadExpr, ParenExpr, VarExpr, IntLiteral,
            FloatLiteral, BoolLiteral, DenseIntVector, DenseFloatVector, DenseNdTensor,
            DenseTensorLiteral, Test,
        );
    }

    #[derive(Default)]
    struct Calls {
        adds: usize,
        binaries: Vec<BinaryOp>,
        nodes: usize,
    }

    impl Visitor for Calls {
        fn visit_node(&mut self, _: &Hir, _: NodeId) {
            self.nodes += 1;
        }
        fn visit_add_expr(&mut self, _: &Hir, _: ExprId, _: &AddExpr) {
            self.adds += 1;
        }
        fn visit_binary(&mut self, _: &Hir, _: ExprId, op: BinaryOp, _: ExprId, _: ExprId) {
            self.binaries.push(op);
        }
    }

    #[test]
    fn overrides_take_precedence_over_fallbacks() {
        let mut hir = Hir::new();
        let s = Span::new(1, 1, 1, 1);
        let a = hir.alloc(s, IntLiteral { val: 1 }).unwrap();
        let add = hir.alloc(s, AddExpr::new(a, a)).unwrap();
        let sub = hir.alloc(s, SubExpr::new(a, a)).unwrap();
        let pow = hir.alloc(s, ExpExpr::new(a, a)).unwrap();

        let mut calls = Calls::default();
        for id in [add, sub, pow, a] {
            hir.accept(id, &mut calls);
        }
        assert_eq!(calls.adds, 1);
        assert_eq!(calls.binaries, vec![BinaryOp::Sub, BinaryOp::Exp]);
        assert_eq!(calls.nodes, 1);
    }

    #[test]
    fn default_visitor_does_nothing() {
        struct Silent;
        impl Visitor for Silent {}

        let mut hir = Hir::new();
        for id in every_variant(&mut hir) {
            hir.accept(id, &mut Silent);
        }
    }

    struct Order(Vec<NodeVariant>);

    impl Visitor for Order {
        fn visit_node(&mut self, hir: &Hir, id: NodeId) {
            self.0.push(hir.variant(id));
            walk_children(hir, id, self);
        }
    }

    #[test]
    fn walk_children_descends_in_source_order() {
        let mut hir = Hir::new();
        let s = Span::new(1, 1, 1, 1);
        let body = hir.alloc(s, StmtBlock::default()).unwrap();
        let cond = hir.alloc(s, BoolLiteral { val: false }).unwrap();
        let stmt = hir.alloc(s, DoWhileStmt::new(cond, body)).unwrap();

        let mut order = Order(Vec::new());
        hir.accept(stmt, &mut order);
        assert_eq!(
            order.0,
            vec![
                NodeVariant::DoWhileStmt,
                NodeVariant::StmtBlock,
                NodeVariant::BoolLiteral
            ]
        );
    }
}
