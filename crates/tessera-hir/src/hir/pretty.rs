//! Rendering HIR back to Tessera source text.
//!
//! The output is for debugging and tests. It is valid surface syntax but
//! does not round-trip formatting or comments.

use super::{
    Argument, AssignStmt, BinaryOp, BoolLiteral, CallExpr, ConstDecl, DenseFloatVector,
    DenseIntVector, DenseNdTensor, DenseTensorId, DenseTensorLiteral, DoWhileStmt,
    DynamicIndexSet, ElementType, ElementTypeDecl, Endpoint, EqExpr, ExprId, ExprParam, ExprStmt,
    ExternDecl, Field, FieldReadExpr, FloatLiteral, ForDomainId, ForStmt, FuncDecl, Hir, Id,
    IdentDecl, Identifier, IfStmt, IndexSetDomain, IndexSetId, IntLiteral, MapExpr, NegExpr,
    Node, NodeId, NonScalarTensorType, NotExpr, ParenExpr, PrintStmt, ProcDecl, Program,
    RangeDomain, RangeIndexSet, ReadParamId, ReductionOp, ScalarTensorType, SetIndexSet, SetType,
    Slice, StmtBlock, StmtId, TensorReadExpr, Test, TransposeExpr, TupleLength, TupleReadExpr,
    TupleType, TypeId, VarDecl, VarExpr, Visitor, WhileStmt,
};
use crate::config::PrintConfig;

/// Comparisons bind between `and` and `+`
const COMPARISON_PRECEDENCE: u8 = 3;

/// A visitor that renders nodes as source text
#[derive(Debug)]
pub struct Printer {
    output: String,
    indent_level: usize,
    config: PrintConfig,
    at_line_start: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    /// Create a printer with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PrintConfig::default())
    }

    #[must_use]
    pub fn with_config(config: PrintConfig) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            config,
            at_line_start: true,
        }
    }

    /// Render one node and everything below it
    #[must_use]
    pub fn print(hir: &Hir, id: impl Into<NodeId>) -> String {
        Self::new().render(hir, id)
    }

    /// Render the whole program reachable from the root
    #[must_use]
    pub fn print_program(hir: &Hir) -> String {
        Self::new().render_program(hir)
    }

    /// Render one node with this printer's configuration. The output is
    /// returned as printed: `trailing_newline` only applies to
    /// [`Printer::render_program`].
    #[must_use]
    pub fn render(mut self, hir: &Hir, id: impl Into<NodeId>) -> String {
        let id = id.into();
        tracing::debug!(%id, "printing HIR");
        hir.accept(id, &mut self);
        self.output
    }

    /// Render the program with this printer's configuration. An arena with
    /// no root renders as nothing.
    #[must_use]
    pub fn render_program(mut self, hir: &Hir) -> String {
        if let Some(root) = hir.root() {
            tracing::debug!(%root, "printing HIR program");
            hir.accept(root, &mut self);
        }
        if self.config.trailing_newline && !self.output.is_empty() && !self.output.ends_with('\n')
        {
            self.output.push('\n');
        }
        if !self.config.trailing_newline {
            while self.output.ends_with('\n') {
                self.output.pop();
            }
        }
        self.output
    }

    // ==================== Output Helpers ====================

    fn write(&mut self, s: &str) {
        if self.at_line_start && !s.is_empty() {
            let width = self.indent_level * self.config.indent_size;
            self.output.extend(std::iter::repeat(' ').take(width));
            self.at_line_start = false;
        }
        self.output.push_str(s);
    }

    fn writeln(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    /// Finish a statement line, noting where it came from if configured
    fn end_line(&mut self, hir: &Hir, id: impl Into<NodeId>) {
        if self.config.show_spans {
            let span = hir.span(id);
            self.write(&format!("  % {span}"));
        }
        self.writeln();
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn node(&mut self, hir: &Hir, id: impl Into<NodeId>) {
        hir.accept(id, self);
    }

    fn comma_separated<H>(&mut self, hir: &Hir, ids: &[Id<H>]) {
        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.node(hir, *id);
        }
    }

    fn body(&mut self, hir: &Hir, id: impl Into<NodeId>) {
        self.indent();
        self.node(hir, id);
        self.dedent();
    }

    /// Operand of a prefix or postfix operator
    fn atom(&mut self, hir: &Hir, id: ExprId) {
        let compound = hir.binary_op(id).is_some() || hir.isa::<EqExpr>(id);
        self.parenthesized(hir, id, compound);
    }

    /// Operand of a binary operator, parenthesized when it binds looser
    fn operand(&mut self, hir: &Hir, id: ExprId, parent: BinaryOp, right: bool) {
        let wrap = match hir.binary_op(id) {
            Some(child) => {
                child.precedence() < parent.precedence()
                    || (child.precedence() == parent.precedence()
                        && right != (parent == BinaryOp::Exp))
            }
            // -a ^ 2 would read as -(a ^ 2)
            None if parent == BinaryOp::Exp && !right => {
                hir.isa::<EqExpr>(id) || hir.isa::<NegExpr>(id) || hir.isa::<NotExpr>(id)
            }
            None => hir.isa::<EqExpr>(id),
        };
        self.parenthesized(hir, id, wrap);
    }

    /// Operand of a comparison chain. Nested chains and the boolean
    /// connectives are wrapped so the chain keeps its own operands.
    fn comparand(&mut self, hir: &Hir, id: ExprId) {
        let wrap = hir.isa::<EqExpr>(id)
            || hir
                .binary_op(id)
                .is_some_and(|op| op.precedence() < COMPARISON_PRECEDENCE);
        self.parenthesized(hir, id, wrap);
    }

    fn parenthesized(&mut self, hir: &Hir, id: ExprId, wrap: bool) {
        if wrap {
            self.write("(");
        }
        self.node(hir, id);
        if wrap {
            self.write(")");
        }
    }

    fn callable(
        &mut self,
        hir: &Hir,
        keyword: &str,
        name: Id<Identifier>,
        args: &[Id<Argument>],
        results: &[Id<IdentDecl>],
    ) {
        self.write(keyword);
        self.write(" ");
        self.node(hir, name);
        self.write("(");
        self.comma_separated(hir, args);
        self.write(")");
        if !results.is_empty() {
            self.write(" -> (");
            self.comma_separated(hir, results);
            self.write(")");
        }
    }

    fn binding(
        &mut self,
        hir: &Hir,
        id: StmtId,
        keyword: &str,
        var: Id<IdentDecl>,
        init: Option<ExprId>,
    ) {
        self.write(keyword);
        self.write(" ");
        self.node(hir, var);
        if let Some(init) = init {
            self.write(" = ");
            self.node(hir, init);
        }
        self.write(";");
        self.end_line(hir, id);
    }

    fn if_chain(&mut self, hir: &Hir, id: StmtId, node: &IfStmt, keyword: &str) {
        self.write(keyword);
        self.write(" ");
        self.node(hir, node.cond);
        self.end_line(hir, id);
        self.body(hir, node.if_body);
        if let Some(else_body) = node.else_body {
            match hir.get::<IfStmt>(else_body) {
                Some(elif) => self.if_chain(hir, else_body, elif, "elif"),
                None => {
                    self.write("else");
                    self.writeln();
                    self.body(hir, else_body);
                }
            }
        }
    }
}

fn format_float(val: f64) -> String {
    if val.fract() == 0.0 && val.is_finite() {
        format!("{val}.0")
    } else {
        format!("{val}")
    }
}

fn join<T>(vals: &[T], render: impl Fn(&T) -> String) -> String {
    vals.iter().map(render).collect::<Vec<_>>().join(", ")
}

impl Visitor for Printer {
    fn visit_program(&mut self, hir: &Hir, _: Id<Program>, node: &Program) {
        for (i, elem) in node.elems.iter().enumerate() {
            if i > 0 {
                self.writeln();
            }
            self.node(hir, *elem);
        }
    }

    fn visit_stmt_block(&mut self, hir: &Hir, _: Id<StmtBlock>, node: &StmtBlock) {
        for stmt in &node.stmts {
            self.node(hir, *stmt);
        }
    }

    // ===== Index sets and types =====

    fn visit_range_index_set(&mut self, _: &Hir, _: IndexSetId, node: &RangeIndexSet) {
        self.write(&node.range.to_string());
    }

    fn visit_set_index_set(&mut self, _: &Hir, _: Id<SetIndexSet>, node: &SetIndexSet) {
        self.write(&node.set_name);
    }

    fn visit_dynamic_index_set(&mut self, _: &Hir, _: IndexSetId, _: &DynamicIndexSet) {
        self.write("*");
    }

    fn visit_element_type(&mut self, _: &Hir, _: Id<ElementType>, node: &ElementType) {
        self.write(&node.ident);
    }

    fn visit_endpoint(&mut self, _: &Hir, _: Id<Endpoint>, node: &Endpoint) {
        self.write(&node.set_name);
    }

    fn visit_set_type(&mut self, hir: &Hir, _: TypeId, node: &SetType) {
        self.write("set{");
        self.node(hir, node.element);
        self.write("}");
        if node.is_edge_set() {
            self.write("(");
            self.comma_separated(hir, &node.endpoints);
            self.write(")");
        }
    }

    fn visit_tuple_length(&mut self, _: &Hir, _: Id<TupleLength>, node: &TupleLength) {
        self.write(&node.val.to_string());
    }

    fn visit_tuple_type(&mut self, hir: &Hir, _: TypeId, node: &TupleType) {
        self.write("(");
        self.node(hir, node.element);
        self.write(" * ");
        self.node(hir, node.length);
        self.write(")");
    }

    fn visit_scalar_tensor_type(&mut self, _: &Hir, _: TypeId, node: &ScalarTensorType) {
        self.write(node.kind.as_str());
    }

    fn visit_non_scalar_tensor_type(
        &mut self,
        hir: &Hir,
        _: TypeId,
        node: &NonScalarTensorType,
    ) {
        self.write("tensor[");
        self.comma_separated(hir, &node.index_sets);
        self.write("](");
        self.node(hir, node.block_type);
        self.write(")");
        if node.transposed {
            self.write("'");
        }
    }

    // ===== Declarations =====

    fn visit_identifier(&mut self, _: &Hir, _: Id<Identifier>, node: &Identifier) {
        self.write(&node.ident);
    }

    fn visit_ident_decl(&mut self, hir: &Hir, _: Id<IdentDecl>, node: &IdentDecl) {
        self.node(hir, node.name);
        self.write(" : ");
        self.node(hir, node.ty);
    }

    fn visit_field(&mut self, hir: &Hir, id: Id<Field>, node: &Field) {
        self.node(hir, node.field);
        self.write(";");
        self.end_line(hir, id);
    }

    fn visit_element_type_decl(
        &mut self,
        hir: &Hir,
        id: Id<ElementTypeDecl>,
        node: &ElementTypeDecl,
    ) {
        self.write("element ");
        self.node(hir, node.name);
        self.end_line(hir, id);
        self.indent();
        for field in &node.fields {
            self.node(hir, *field);
        }
        self.dedent();
        self.write("end");
        self.writeln();
    }

    fn visit_argument(&mut self, hir: &Hir, _: Id<Argument>, node: &Argument) {
        if node.inout {
            self.write("inout ");
        }
        self.node(hir, node.decl.name);
        self.write(" : ");
        self.node(hir, node.decl.ty);
    }

    fn visit_extern_decl(&mut self, hir: &Hir, id: Id<ExternDecl>, node: &ExternDecl) {
        self.write("extern ");
        self.node(hir, node.var);
        self.write(";");
        self.end_line(hir, id);
    }

    fn visit_func_decl(&mut self, hir: &Hir, id: Id<FuncDecl>, node: &FuncDecl) {
        self.callable(hir, "func", node.name, &node.args, &node.results);
        self.end_line(hir, id);
        self.body(hir, node.body);
        self.write("end");
        self.writeln();
    }

    fn visit_proc_decl(&mut self, hir: &Hir, id: Id<ProcDecl>, node: &ProcDecl) {
        self.callable(hir, "proc", node.name, &node.args, &node.results);
        self.end_line(hir, id);
        self.body(hir, node.body);
        self.write("end");
        self.writeln();
    }

    // ===== Statements =====

    fn visit_var_decl(&mut self, hir: &Hir, id: StmtId, node: &VarDecl) {
        self.binding(hir, id, "var", node.var, node.init_val);
    }

    fn visit_const_decl(&mut self, hir: &Hir, id: StmtId, node: &ConstDecl) {
        self.binding(hir, id, "const", node.var, node.init_val);
    }

    fn visit_while_stmt(&mut self, hir: &Hir, id: StmtId, node: &WhileStmt) {
        self.write("while ");
        self.node(hir, node.cond);
        self.end_line(hir, id);
        self.body(hir, node.body);
        self.write("end");
        self.writeln();
    }

    fn visit_do_while_stmt(&mut self, hir: &Hir, id: StmtId, node: &DoWhileStmt) {
        self.write("do");
        self.end_line(hir, id);
        self.body(hir, node.body);
        self.write("end while ");
        self.node(hir, node.cond);
        self.writeln();
    }

    fn visit_if_stmt(&mut self, hir: &Hir, id: StmtId, node: &IfStmt) {
        self.if_chain(hir, id, node, "if");
        self.write("end");
        self.writeln();
    }

    fn visit_index_set_domain(&mut self, hir: &Hir, _: ForDomainId, node: &IndexSetDomain) {
        self.node(hir, node.set);
    }

    fn visit_range_domain(&mut self, hir: &Hir, _: ForDomainId, node: &RangeDomain) {
        self.node(hir, node.lower);
        self.write(":");
        self.node(hir, node.upper);
    }

    fn visit_for_stmt(&mut self, hir: &Hir, id: StmtId, node: &ForStmt) {
        self.write("for ");
        self.node(hir, node.loop_var);
        self.write(" in ");
        self.node(hir, node.domain);
        self.end_line(hir, id);
        self.body(hir, node.body);
        self.write("end");
        self.writeln();
    }

    fn visit_print_stmt(&mut self, hir: &Hir, id: StmtId, node: &PrintStmt) {
        self.write("print ");
        self.node(hir, node.expr);
        self.write(";");
        self.end_line(hir, id);
    }

    fn visit_expr_stmt(&mut self, hir: &Hir, id: StmtId, node: &ExprStmt) {
        self.node(hir, node.expr);
        self.write(";");
        self.end_line(hir, id);
    }

    fn visit_assign_stmt(&mut self, hir: &Hir, id: StmtId, node: &AssignStmt) {
        self.comma_separated(hir, &node.lhs);
        self.write(" = ");
        self.node(hir, node.expr);
        self.write(";");
        self.end_line(hir, id);
    }

    // ===== Expressions =====

    fn visit_slice(&mut self, _: &Hir, _: ReadParamId, _: &Slice) {
        self.write(":");
    }

    fn visit_expr_param(&mut self, hir: &Hir, _: ReadParamId, node: &ExprParam) {
        self.node(hir, node.expr);
    }

    fn visit_map_expr(&mut self, hir: &Hir, _: ExprId, node: &MapExpr) {
        self.write("map ");
        self.node(hir, node.func);
        if !node.partial_actuals.is_empty() {
            self.write("(");
            self.comma_separated(hir, &node.partial_actuals);
            self.write(")");
        }
        self.write(" to ");
        self.node(hir, node.target);
        if node.op == ReductionOp::Sum {
            self.write(" reduce ");
            self.write(node.op.as_str());
        }
    }

    fn visit_binary(&mut self, hir: &Hir, _: ExprId, op: BinaryOp, lhs: ExprId, rhs: ExprId) {
        self.operand(hir, lhs, op, false);
        self.write(" ");
        self.write(op.as_str());
        self.write(" ");
        self.operand(hir, rhs, op, true);
    }

    fn visit_eq_expr(&mut self, hir: &Hir, _: ExprId, node: &EqExpr) {
        self.comparand(hir, node.operands[0]);
        for (_, op, rhs) in node.links() {
            self.write(" ");
            self.write(op.as_str());
            self.write(" ");
            self.comparand(hir, rhs);
        }
    }

    fn visit_not_expr(&mut self, hir: &Hir, _: ExprId, node: &NotExpr) {
        self.write("not ");
        self.atom(hir, node.operand);
    }

    fn visit_neg_expr(&mut self, hir: &Hir, _: ExprId, node: &NegExpr) {
        self.write(if node.negate { "-" } else { "+" });
        self.atom(hir, node.operand);
    }

    fn visit_transpose_expr(&mut self, hir: &Hir, _: ExprId, node: &TransposeExpr) {
        self.atom(hir, node.operand);
        self.write("'");
    }

    fn visit_call_expr(&mut self, hir: &Hir, _: ExprId, node: &CallExpr) {
        self.node(hir, node.func);
        self.write("(");
        self.comma_separated(hir, &node.args);
        self.write(")");
    }

    fn visit_tensor_read_expr(&mut self, hir: &Hir, _: ExprId, node: &TensorReadExpr) {
        self.atom(hir, node.tensor);
        self.write("(");
        self.comma_separated(hir, &node.indices);
        self.write(")");
    }

    fn visit_tuple_read_expr(&mut self, hir: &Hir, _: ExprId, node: &TupleReadExpr) {
        self.atom(hir, node.tuple);
        self.write("(");
        self.node(hir, node.index);
        self.write(")");
    }

    fn visit_field_read_expr(&mut self, hir: &Hir, _: ExprId, node: &FieldReadExpr) {
        self.atom(hir, node.set_or_elem);
        self.write(".");
        self.node(hir, node.field);
    }

    fn visit_paren_expr(&mut self, hir: &Hir, _: ExprId, node: &ParenExpr) {
        self.write("(");
        self.node(hir, node.expr);
        self.write(")");
    }

    fn visit_var_expr(&mut self, _: &Hir, _: ExprId, node: &VarExpr) {
        self.write(&node.ident);
    }

    fn visit_int_literal(&mut self, _: &Hir, _: ExprId, node: &IntLiteral) {
        self.write(&node.val.to_string());
    }

    fn visit_float_literal(&mut self, _: &Hir, _: ExprId, node: &FloatLiteral) {
        self.write(&format_float(node.val));
    }

    fn visit_bool_literal(&mut self, _: &Hir, _: ExprId, node: &BoolLiteral) {
        self.write(if node.val { "true" } else { "false" });
    }

    // ===== Dense tensor literals =====

    fn visit_dense_int_vector(&mut self, _: &Hir, _: DenseTensorId, node: &DenseIntVector) {
        self.write(&join(&node.vals, ToString::to_string));
    }

    fn visit_dense_float_vector(&mut self, _: &Hir, _: DenseTensorId, node: &DenseFloatVector) {
        self.write(&join(&node.vals, |val| format_float(*val)));
    }

    fn visit_dense_nd_tensor(&mut self, hir: &Hir, _: DenseTensorId, node: &DenseNdTensor) {
        // Rows of a matrix are split by `;`, higher slices by `|`
        let separator = match node.elems.first().map(|&first| hir.node(first)) {
            Some(Node::DenseNdTensor(_)) => " | ",
            _ => "; ",
        };
        for (i, elem) in node.elems.iter().enumerate() {
            if i > 0 {
                self.write(separator);
            }
            self.node(hir, *elem);
        }
    }

    fn visit_dense_tensor_literal(&mut self, hir: &Hir, _: ExprId, node: &DenseTensorLiteral) {
        self.write("[");
        self.node(hir, node.tensor);
        self.write("]");
        if node.transposed {
            self.write("'");
        }
    }

    fn visit_test(&mut self, hir: &Hir, id: Id<Test>, node: &Test) {
        self.write("%! ");
        self.node(hir, node.func);
        self.write("(");
        self.comma_separated(hir, &node.args);
        self.write(") == ");
        self.node(hir, node.expected);
        self.write(";");
        self.end_line(hir, id);
    }
}
