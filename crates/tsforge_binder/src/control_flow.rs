//! Lowering of statements and expressions into the flow graph.
//!
//! [`Binder::bind_children`] is the descent step of the walk. Nodes that
//! affect control flow bind their children in evaluation order and wire
//! the flow labels around them; everything else just binds its children.

use crate::binder::Binder;
use crate::flow::{FlowLabel, FlowNodeId};
use crate::module_instance::{get_module_instance_state, ModuleInstanceState};
use crate::narrowing::{
    is_dotted_name, is_logical_expression, is_logical_or_coalescing_assignment, is_narrowable_operand,
    is_narrowable_reference, is_narrowing_expression, is_push_or_unshift,
};
use tracing::trace;
use tsforge_ast::{
    ArrayBindingElement, BinaryExpression, BindingElement, BindingName, CallExpression, CaseOrDefaultClause,
    ConditionalExpression, Expression, ForInOrOfStatement, ForInitializer, ForStatement, IfStatement, LabeledStatement, MemberName,
    NodeFlags, NodeId, NodeRef, ObjectLiteralElement, ParameterDeclaration, Statement, SyntaxKind, TryStatement,
    VariableDeclaration,
};
use tsforge_core::text::TextSpan;
use tsforge_diagnostics::messages;

impl<'a, 'o> Binder<'a, 'o> {
    pub(crate) fn bind_children(&mut self, node: NodeRef<'a>) {
        let save_in_assignment_pattern = self.in_assignment_pattern;
        self.in_assignment_pattern = false;
        if self.check_unreachable(node) {
            self.bind_each_child(node);
            self.in_assignment_pattern = save_in_assignment_pattern;
            return;
        }
        if let NodeRef::Statement(stmt) = node {
            assert!(!self.graph.is_empty(), "flow lowered outside a control flow container");
            if self.options.allow_unreachable_code != Some(true) || matches!(stmt, Statement::ReturnStatement(_)) {
                self.flow_nodes.insert(node.id(), self.current_flow);
            }
        }
        match node {
            NodeRef::SourceFile(file) => self.bind_each_functions_first(file.statements),
            NodeRef::Block(block) => self.bind_each_functions_first(block.statements),
            NodeRef::ModuleBlock(block) => self.bind_each_functions_first(block.statements),
            NodeRef::Statement(stmt) => self.bind_statement_children(node, stmt),
            NodeRef::Expression(expr) => {
                self.bind_expression_children(node, expr, save_in_assignment_pattern);
            }
            NodeRef::CaseBlock(_) => self.bind_case_block(node),
            NodeRef::CaseClause(clause) => self.bind_case_clause(clause),
            NodeRef::VariableDeclaration(declaration) => self.bind_variable_declaration_flow(node, declaration),
            NodeRef::BindingElement(element) => self.bind_binding_element_flow(element),
            NodeRef::Parameter(parameter) => self.bind_parameter_flow(parameter),
            NodeRef::ObjectLiteralElement(ObjectLiteralElement::PropertyAssignment(_)) => {
                self.in_assignment_pattern = save_in_assignment_pattern;
                self.bind_each_child(node);
            }
            _ => self.bind_each_child(node),
        }
        self.in_assignment_pattern = save_in_assignment_pattern;
    }

    fn bind_statement_children(&mut self, node: NodeRef<'a>, stmt: &'a Statement<'a>) {
        match stmt {
            Statement::Block(block) => self.bind_each_functions_first(block.statements),
            Statement::WhileStatement(s) => self.bind_while_statement(node, s.expression, s.statement),
            Statement::DoStatement(s) => self.bind_do_statement(node, s.statement, s.expression),
            Statement::ForStatement(s) => self.bind_for_statement(node, s),
            Statement::ForInStatement(s) | Statement::ForOfStatement(s) => self.bind_for_in_or_of_statement(node, s),
            Statement::IfStatement(s) => self.bind_if_statement(s),
            Statement::ReturnStatement(s) => {
                self.bind_opt_expression(s.expression);
                self.has_explicit_return = true;
                if let Some(target) = self.current_return_target {
                    self.graph.add_antecedent(target, self.current_flow);
                }
                self.current_flow = FlowNodeId::UNREACHABLE;
            }
            Statement::ThrowStatement(s) => {
                self.bind_node(NodeRef::Expression(s.expression));
                self.current_flow = FlowNodeId::UNREACHABLE;
            }
            Statement::BreakStatement(s) | Statement::ContinueStatement(s) => {
                let is_break = matches!(stmt, Statement::BreakStatement(_));
                if let Some(label) = &s.label {
                    self.bind_node(NodeRef::Identifier(label));
                }
                self.bind_break_or_continue(is_break, s.label.as_ref().map(|l| l.escaped_text));
            }
            Statement::TryStatement(s) => self.bind_try_statement(s),
            Statement::SwitchStatement(s) => {
                let post_switch_label = self.graph.create_branch_label();
                self.bind_node(NodeRef::Expression(s.expression));
                let save_break_target = self.current_break_target.replace(post_switch_label);
                let pre_switch_case_flow = self.current_flow;
                let save_pre_switch_case_flow = self.pre_switch_case_flow.replace(pre_switch_case_flow);
                self.bind_node(NodeRef::CaseBlock(&s.case_block));
                self.graph.add_antecedent(post_switch_label, self.current_flow);
                let has_default = s.case_block.clauses.iter().any(CaseOrDefaultClause::is_default);
                if !has_default {
                    let implicit_default = self.graph.create_switch_clause(node.id(), 0, 0, pre_switch_case_flow);
                    self.graph.add_antecedent(post_switch_label, implicit_default);
                }
                self.current_break_target = save_break_target;
                self.pre_switch_case_flow = save_pre_switch_case_flow;
                self.current_flow = self.graph.finish_flow_label(post_switch_label);
            }
            Statement::LabeledStatement(s) => self.bind_labeled_statement(s),
            Statement::ExpressionStatement(s) => {
                self.bind_node(NodeRef::Expression(s.expression));
                self.maybe_bind_expression_flow_if_call(s.expression);
            }
            _ => self.bind_each_child(node),
        }
    }

    fn bind_expression_children(
        &mut self,
        node: NodeRef<'a>,
        expr: &'a Expression<'a>,
        save_in_assignment_pattern: bool,
    ) {
        match expr {
            Expression::Binary(binary) => {
                let is_destructuring = binary.operator() == SyntaxKind::EqualsToken
                    && matches!(binary.left, Expression::ObjectLiteral(_) | Expression::ArrayLiteral(_));
                if is_destructuring {
                    self.in_assignment_pattern = save_in_assignment_pattern;
                    self.bind_destructuring_assignment_flow(binary);
                } else {
                    self.bind_binary_expression_flow(node, expr, binary);
                }
            }
            Expression::PrefixUnary(prefix) => {
                if prefix.operator == SyntaxKind::ExclamationToken {
                    std::mem::swap(&mut self.current_true_target, &mut self.current_false_target);
                    self.bind_each_child(node);
                    std::mem::swap(&mut self.current_true_target, &mut self.current_false_target);
                } else {
                    self.bind_each_child(node);
                    if matches!(prefix.operator, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken) {
                        self.bind_assignment_target_flow(prefix.operand);
                    }
                }
            }
            Expression::PostfixUnary(postfix) => {
                self.bind_each_child(node);
                if matches!(postfix.operator, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken) {
                    self.bind_assignment_target_flow(postfix.operand);
                }
            }
            Expression::Delete(delete) => {
                self.bind_each_child(node);
                if let Expression::PropertyAccess(_) = delete.expression {
                    self.bind_assignment_target_flow(delete.expression);
                }
            }
            Expression::Conditional(conditional) => self.bind_conditional_expression_flow(conditional),
            Expression::PropertyAccess(_) | Expression::ElementAccess(_) | Expression::NonNull(_) => {
                if expr.is_optional_chain() {
                    self.bind_optional_chain_flow(node, expr);
                } else {
                    self.bind_each_child(node);
                }
            }
            Expression::Call(call) => self.bind_call_expression_flow(node, expr, call),
            Expression::ObjectLiteral(_) | Expression::ArrayLiteral(_) | Expression::Spread(_) => {
                self.in_assignment_pattern = save_in_assignment_pattern;
                self.bind_each_child(node);
            }
            _ => self.bind_each_child(node),
        }
    }

    fn bind_opt_expression(&mut self, expr: Option<&'a Expression<'a>>) {
        if let Some(expr) = expr {
            self.bind_node(NodeRef::Expression(expr));
        }
    }

    // ========================================================================
    // Flow node construction
    // ========================================================================

    /// The flow after `expr` evaluated to `assume_true`. Conditions that
    /// cannot narrow anything are not materialized.
    fn create_flow_condition(
        &mut self,
        assume_true: bool,
        antecedent: FlowNodeId,
        expr: Option<&'a Expression<'a>>,
    ) -> FlowNodeId {
        if antecedent.is_unreachable() {
            return antecedent;
        }
        let Some(expr) = expr else {
            return if assume_true { antecedent } else { FlowNodeId::UNREACHABLE };
        };
        let constant_false = (expr.is_keyword(SyntaxKind::TrueKeyword) && !assume_true)
            || (expr.is_keyword(SyntaxKind::FalseKeyword) && assume_true);
        if constant_false && !self.is_expression_of_optional_chain_root(expr) && !self.is_nullish_coalesce_operand(expr)
        {
            return FlowNodeId::UNREACHABLE;
        }
        if !is_narrowing_expression(expr) {
            return antecedent;
        }
        self.graph.create_condition(assume_true, NodeRef::Expression(expr).id(), antecedent)
    }

    /// Assignments and array mutations may also end the try block early.
    fn create_flow_mutation(&mut self, is_array_mutation: bool, node: NodeId) -> FlowNodeId {
        let result = if is_array_mutation {
            self.graph.create_array_mutation(node, self.current_flow)
        } else {
            self.graph.create_assignment(node, self.current_flow)
        };
        if let Some(target) = self.current_exception_target {
            self.graph.add_antecedent(target, result);
        }
        result
    }

    fn add_condition(&mut self, target: FlowLabel, assume_true: bool, expr: Option<&'a Expression<'a>>) {
        let condition = self.create_flow_condition(assume_true, self.current_flow, expr);
        self.graph.add_antecedent(target, condition);
    }

    fn with_conditional_branches(
        &mut self,
        true_target: FlowLabel,
        false_target: FlowLabel,
        action: impl FnOnce(&mut Self),
    ) {
        let save_true_target = self.current_true_target.replace(true_target);
        let save_false_target = self.current_false_target.replace(false_target);
        action(self);
        self.current_true_target = save_true_target;
        self.current_false_target = save_false_target;
    }

    fn bind_condition(&mut self, expr: Option<&'a Expression<'a>>, true_target: FlowLabel, false_target: FlowLabel) {
        self.with_conditional_branches(true_target, false_target, |b| b.bind_opt_expression(expr));
        let handled_inside = expr.is_some_and(|e| {
            is_logical_or_coalescing_assignment(e.skip_parentheses())
                || is_logical_expression(e)
                || (e.is_optional_chain() && self.is_outermost_optional_chain(NodeRef::Expression(e)))
        });
        if !handled_inside {
            self.add_condition(true_target, true, expr);
            self.add_condition(false_target, false, expr);
        }
    }

    fn bind_iterative_statement(&mut self, stmt: &'a Statement<'a>, break_target: FlowLabel, continue_target: FlowLabel) {
        let save_break_target = self.current_break_target.replace(break_target);
        let save_continue_target = self.current_continue_target.replace(continue_target);
        self.bind_node(NodeRef::Statement(stmt));
        self.current_break_target = save_break_target;
        self.current_continue_target = save_continue_target;
    }

    /// Labels directly around a loop continue at `target`.
    fn set_continue_target(&mut self, node: NodeRef<'a>, target: FlowLabel) -> FlowLabel {
        let mut current = node;
        for label in self.active_labels.iter_mut().rev() {
            match self.parents.get(&current.id()).copied() {
                Some(parent @ NodeRef::Statement(Statement::LabeledStatement(_))) => {
                    label.continue_target = Some(target);
                    current = parent;
                }
                _ => break,
            }
        }
        target
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn bind_while_statement(&mut self, node: NodeRef<'a>, condition: &'a Expression<'a>, body: &'a Statement<'a>) {
        let loop_label = self.graph.create_loop_label();
        let pre_while_label = self.set_continue_target(node, loop_label);
        let pre_body_label = self.graph.create_branch_label();
        let post_while_label = self.graph.create_branch_label();
        self.graph.add_antecedent(pre_while_label, self.current_flow);
        self.current_flow = pre_while_label.id();
        self.bind_condition(Some(condition), pre_body_label, post_while_label);
        self.current_flow = self.graph.finish_flow_label(pre_body_label);
        self.bind_iterative_statement(body, post_while_label, pre_while_label);
        self.graph.add_antecedent(pre_while_label, self.current_flow);
        self.current_flow = self.graph.finish_flow_label(post_while_label);
    }

    fn bind_do_statement(&mut self, node: NodeRef<'a>, body: &'a Statement<'a>, condition: &'a Expression<'a>) {
        let pre_do_label = self.graph.create_loop_label();
        let condition_label = self.graph.create_branch_label();
        let pre_condition_label = self.set_continue_target(node, condition_label);
        let post_do_label = self.graph.create_branch_label();
        self.graph.add_antecedent(pre_do_label, self.current_flow);
        self.current_flow = pre_do_label.id();
        self.bind_iterative_statement(body, post_do_label, pre_condition_label);
        self.graph.add_antecedent(pre_condition_label, self.current_flow);
        self.current_flow = self.graph.finish_flow_label(pre_condition_label);
        self.bind_condition(Some(condition), pre_do_label, post_do_label);
        self.current_flow = self.graph.finish_flow_label(post_do_label);
    }

    fn bind_for_statement(&mut self, node: NodeRef<'a>, stmt: &'a ForStatement<'a>) {
        let pre_loop_label = self.graph.create_loop_label();
        let pre_body_label = self.graph.create_branch_label();
        let incrementor_label = self.graph.create_branch_label();
        let pre_incrementor_label = self.set_continue_target(node, incrementor_label);
        let post_loop_label = self.graph.create_branch_label();
        if let Some(initializer) = &stmt.initializer {
            self.bind_node(initializer.as_node());
        }
        self.graph.add_antecedent(pre_loop_label, self.current_flow);
        self.current_flow = pre_loop_label.id();
        self.bind_condition(stmt.condition, pre_body_label, post_loop_label);
        self.current_flow = self.graph.finish_flow_label(pre_body_label);
        self.bind_iterative_statement(stmt.statement, post_loop_label, pre_incrementor_label);
        self.graph.add_antecedent(pre_incrementor_label, self.current_flow);
        self.current_flow = self.graph.finish_flow_label(pre_incrementor_label);
        self.bind_opt_expression(stmt.incrementor);
        self.graph.add_antecedent(pre_loop_label, self.current_flow);
        self.current_flow = self.graph.finish_flow_label(post_loop_label);
    }

    fn bind_for_in_or_of_statement(&mut self, node: NodeRef<'a>, stmt: &'a ForInOrOfStatement<'a>) {
        let loop_label = self.graph.create_loop_label();
        let pre_loop_label = self.set_continue_target(node, loop_label);
        let post_loop_label = self.graph.create_branch_label();
        self.bind_node(NodeRef::Expression(stmt.expression));
        self.graph.add_antecedent(pre_loop_label, self.current_flow);
        self.current_flow = pre_loop_label.id();
        if let Some(await_modifier) = &stmt.await_modifier {
            self.bind_node(NodeRef::Token(await_modifier));
        }
        // Zero iterations.
        self.graph.add_antecedent(post_loop_label, self.current_flow);
        self.bind_node(stmt.initializer.as_node());
        if let ForInitializer::Expression(target) = stmt.initializer {
            self.bind_assignment_target_flow(target);
        }
        self.bind_iterative_statement(stmt.statement, post_loop_label, pre_loop_label);
        self.graph.add_antecedent(pre_loop_label, self.current_flow);
        self.current_flow = self.graph.finish_flow_label(post_loop_label);
    }

    fn bind_if_statement(&mut self, stmt: &'a IfStatement<'a>) {
        let then_label = self.graph.create_branch_label();
        let else_label = self.graph.create_branch_label();
        let post_if_label = self.graph.create_branch_label();
        self.bind_condition(Some(stmt.expression), then_label, else_label);
        self.current_flow = self.graph.finish_flow_label(then_label);
        self.bind_node(NodeRef::Statement(stmt.then_statement));
        self.graph.add_antecedent(post_if_label, self.current_flow);
        self.current_flow = self.graph.finish_flow_label(else_label);
        if let Some(else_statement) = stmt.else_statement {
            self.bind_node(NodeRef::Statement(else_statement));
        }
        self.graph.add_antecedent(post_if_label, self.current_flow);
        self.current_flow = self.graph.finish_flow_label(post_if_label);
    }

    fn bind_break_or_continue(&mut self, is_break: bool, label: Option<tsforge_core::InternedString>) {
        let target = match label {
            Some(name) => {
                let Some(active) = self.active_labels.iter_mut().rev().find(|l| l.label.escaped_text == name) else {
                    panic!("break or continue to a label that is not in scope");
                };
                active.referenced = true;
                if is_break {
                    Some(active.break_target)
                } else {
                    active.continue_target
                }
            }
            None if is_break => self.current_break_target,
            None => self.current_continue_target,
        };
        if let Some(target) = target {
            self.graph.add_antecedent(target, self.current_flow);
            self.current_flow = FlowNodeId::UNREACHABLE;
        }
    }

    fn bind_labeled_statement(&mut self, stmt: &'a LabeledStatement<'a>) {
        let post_statement_label = self.graph.create_branch_label();
        self.active_labels.push(crate::binder::ActiveLabel {
            label: &stmt.label,
            break_target: post_statement_label,
            continue_target: None,
            referenced: false,
        });
        self.bind_node(NodeRef::Identifier(&stmt.label));
        self.bind_node(NodeRef::Statement(stmt.statement));
        let Some(active) = self.active_labels.pop() else {
            panic!("label scope popped twice");
        };
        if !active.referenced {
            let span = self.error_span(NodeRef::Identifier(&stmt.label));
            self.error_or_suggestion(self.options.unused_label_is_error(), span, &messages::UNUSED_LABEL);
        }
        self.graph.add_antecedent(post_statement_label, self.current_flow);
        self.current_flow = self.graph.finish_flow_label(post_statement_label);
    }

    /// Mutations inside the try block flow into the exception label, which
    /// starts the catch clause. A `finally` block is entered from the normal
    /// ends of try and catch and, through a pre-finally node, from the
    /// exceptional paths. The after-finally node shares the pre-finally lock
    /// so analysis starting past the statement skips the exceptional edge.
    fn bind_try_statement(&mut self, stmt: &'a TryStatement<'a>) {
        let save_exception_target = self.current_exception_target;
        let pre_finally_label = self.graph.create_branch_label();
        let mut exception_label = self.graph.create_branch_label();
        self.graph.add_antecedent(exception_label, self.current_flow);
        self.current_exception_target = Some(exception_label);

        self.bind_node(NodeRef::Block(&stmt.try_block));
        self.graph.add_antecedent(pre_finally_label, self.current_flow);
        let flow_after_try = self.current_flow;
        let mut flow_after_catch = FlowNodeId::UNREACHABLE;

        if let Some(catch_clause) = &stmt.catch_clause {
            self.current_flow = self.graph.finish_flow_label(exception_label);
            // Mutations in the catch clause may throw into the finally block.
            exception_label = self.graph.create_branch_label();
            self.graph.add_antecedent(exception_label, self.current_flow);
            self.current_exception_target = Some(exception_label);
            self.bind_node(NodeRef::CatchClause(catch_clause));
            self.graph.add_antecedent(pre_finally_label, self.current_flow);
            flow_after_catch = self.current_flow;
        }
        self.current_exception_target = save_exception_target;

        let Some(finally_block) = &stmt.finally_block else {
            self.current_flow = self.graph.finish_flow_label(pre_finally_label);
            return;
        };

        let exceptional_flow = self.graph.finish_flow_label(exception_label);
        let lock = self.graph.new_finally_lock();
        if !exceptional_flow.is_unreachable() {
            let pre_finally = self.graph.create_pre_finally(exceptional_flow, lock);
            self.graph.add_antecedent(pre_finally_label, pre_finally);
        }
        self.current_flow = self.graph.finish_flow_label(pre_finally_label);
        self.bind_node(NodeRef::Block(finally_block));

        // `try { return 1 } finally { ... }` ends unreachably even when the
        // finally block completes normally.
        if !self.current_flow.is_unreachable() && flow_after_try.is_unreachable() && flow_after_catch.is_unreachable()
        {
            self.current_flow = if flow_after_try == FlowNodeId::REPORTED_UNREACHABLE
                || flow_after_catch == FlowNodeId::REPORTED_UNREACHABLE
            {
                FlowNodeId::REPORTED_UNREACHABLE
            } else {
                FlowNodeId::UNREACHABLE
            };
        }
        if !self.current_flow.is_unreachable() {
            self.current_flow = self.graph.create_after_finally(self.current_flow, lock);
        }
    }

    /// Each clause is entered from the discriminant and from the previous
    /// clause falling through. Runs of empty clauses share one entry.
    fn bind_case_block(&mut self, node: NodeRef<'a>) {
        let NodeRef::CaseBlock(case_block) = node else {
            return;
        };
        let Some(switch @ NodeRef::Statement(Statement::SwitchStatement(switch_statement))) = self.parent_of(node)
        else {
            panic!("case block outside a switch statement");
        };
        let Some(pre_switch_case_flow) = self.pre_switch_case_flow else {
            panic!("case block bound without a pre-switch flow");
        };
        let discriminant = switch_statement.expression;
        let is_narrowing_switch =
            discriminant.is_keyword(SyntaxKind::TrueKeyword) || is_narrowing_expression(discriminant);
        let clauses = case_block.clauses;
        let mut fallthrough_flow = FlowNodeId::UNREACHABLE;
        let mut i = 0;
        while i < clauses.len() {
            let clause_start = i;
            while clauses[i].statements.is_empty() && i + 1 < clauses.len() {
                if fallthrough_flow == FlowNodeId::UNREACHABLE {
                    self.current_flow = pre_switch_case_flow;
                }
                self.bind_node(NodeRef::CaseClause(&clauses[i]));
                i += 1;
            }
            let pre_case_label = self.graph.create_branch_label();
            let entry = if is_narrowing_switch {
                self.graph.create_switch_clause(switch.id(), clause_start as u32, (i + 1) as u32, pre_switch_case_flow)
            } else {
                pre_switch_case_flow
            };
            self.graph.add_antecedent(pre_case_label, entry);
            self.graph.add_antecedent(pre_case_label, fallthrough_flow);
            self.current_flow = self.graph.finish_flow_label(pre_case_label);

            let clause = &clauses[i];
            self.bind_node(NodeRef::CaseClause(clause));
            fallthrough_flow = self.current_flow;
            if !self.current_flow.is_unreachable()
                && i != clauses.len() - 1
                && self.options.no_fallthrough_cases_in_switch == Some(true)
            {
                self.fallthrough_flow.insert(clause.data.id, self.current_flow);
            }
            i += 1;
        }
    }

    fn bind_case_clause(&mut self, clause: &'a CaseOrDefaultClause<'a>) {
        let save_current_flow = self.current_flow;
        if let Some(pre_switch_case_flow) = self.pre_switch_case_flow {
            self.current_flow = pre_switch_case_flow;
        }
        self.bind_opt_expression(clause.expression);
        self.current_flow = save_current_flow;
        self.bind_statements(clause.statements);
    }

    /// A call through a dotted name may be an assertion.
    fn maybe_bind_expression_flow_if_call(&mut self, expr: &'a Expression<'a>) {
        if let Expression::Call(call) = expr {
            if !call.expression.is_keyword(SyntaxKind::SuperKeyword) && is_dotted_name(call.expression) {
                self.current_flow = self.graph.create_call(NodeRef::Expression(expr).id(), self.current_flow);
            }
        }
    }

    // ========================================================================
    // Unreachable code
    // ========================================================================

    /// Whether `node` is unreachable. The first unreachable statement of a
    /// run is reported.
    fn check_unreachable(&mut self, node: NodeRef<'a>) -> bool {
        if !self.current_flow.is_unreachable() {
            return false;
        }
        self.unreachable.insert(node.id());
        if self.current_flow != FlowNodeId::UNREACHABLE {
            return true;
        }
        let NodeRef::Statement(stmt) = node else {
            return true;
        };
        let report = match stmt {
            Statement::EmptyStatement(_)
            | Statement::FunctionDeclaration(_)
            | Statement::EnumDeclaration(_)
            | Statement::InterfaceDeclaration(_)
            | Statement::TypeAliasDeclaration(_)
            | Statement::ImportDeclaration(_)
            | Statement::ImportEqualsDeclaration(_)
            | Statement::ExportDeclaration(_)
            | Statement::ExportAssignment(_)
            | Statement::NamespaceExportDeclaration(_)
            | Statement::NotEmittedStatement(_) => false,
            Statement::ModuleDeclaration(decl) => match get_module_instance_state(decl) {
                ModuleInstanceState::Instantiated => true,
                ModuleInstanceState::ConstEnumOnly => self.options.should_preserve_const_enums(),
                ModuleInstanceState::NonInstantiated => false,
            },
            _ => true,
        };
        if !report {
            return true;
        }
        self.current_flow = FlowNodeId::REPORTED_UNREACHABLE;
        let Some(severity) = self.options.unreachable_code_is_error() else {
            return true;
        };
        if self.is_ambient(node) {
            return true;
        }
        let is_error = severity
            && match stmt {
                Statement::VariableStatement(v) => {
                    v.declaration_list.data.flags.intersects(NodeFlags::BLOCK_SCOPED)
                        || v.declaration_list.declarations.iter().any(|d| d.initializer.is_some())
                }
                _ => true,
            };
        let span = self.unreachable_range(node, stmt);
        trace!(start = span.start, length = span.length, "unreachable code");
        self.error_or_suggestion(Some(is_error), span, &messages::UNREACHABLE_CODE_DETECTED);
        true
    }

    /// From `stmt` through the executable statements that follow it in the
    /// same statement list.
    fn unreachable_range(&self, node: NodeRef<'a>, stmt: &'a Statement<'a>) -> TextSpan {
        let start = self.error_span(node);
        if !self.is_executable_statement(stmt) {
            return start;
        }
        let statements: &'a [Statement<'a>] = match self.parent_of(node) {
            Some(NodeRef::SourceFile(file)) => file.statements,
            Some(NodeRef::Block(block)) => block.statements,
            Some(NodeRef::Statement(Statement::Block(block))) => block.statements,
            Some(NodeRef::ModuleBlock(block)) => block.statements,
            Some(NodeRef::CaseClause(clause)) => clause.statements,
            _ => return start,
        };
        let Some(index) = statements.iter().position(|s| NodeRef::Statement(s).same_node(&node)) else {
            return start;
        };
        let last = statements[index..]
            .iter()
            .take_while(|s| self.is_executable_statement(s))
            .last()
            .map_or(node, NodeRef::Statement);
        let end = last.range();
        if end.is_synthesized() {
            return start;
        }
        TextSpan::from_bounds(start.start, end.end.max(start.start))
    }

    fn is_executable_statement(&self, stmt: &Statement<'_>) -> bool {
        match stmt {
            Statement::FunctionDeclaration(_)
            | Statement::InterfaceDeclaration(_)
            | Statement::TypeAliasDeclaration(_)
            | Statement::EnumDeclaration(_) => false,
            Statement::ModuleDeclaration(decl) => get_module_instance_state(decl) == ModuleInstanceState::Instantiated,
            Statement::VariableStatement(v) => {
                v.declaration_list.data.flags.intersects(NodeFlags::BLOCK_SCOPED)
                    || v.declaration_list.declarations.iter().all(|d| d.initializer.is_some())
            }
            _ => true,
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn bind_binary_expression_flow(&mut self, node: NodeRef<'a>, expr: &'a Expression<'a>, binary: &'a BinaryExpression<'a>) {
        let operator = binary.operator();
        if operator.is_logical_operator() || operator.is_logical_or_coalescing_assignment() {
            if self.is_top_level_logical_expression(node) {
                let post_expression_label = self.graph.create_branch_label();
                self.bind_logical_like_expression(expr, binary, post_expression_label, post_expression_label);
                self.current_flow = self.graph.finish_flow_label(post_expression_label);
            } else {
                let (Some(true_target), Some(false_target)) = (self.current_true_target, self.current_false_target)
                else {
                    panic!("nested logical expression bound without condition targets");
                };
                self.bind_logical_like_expression(expr, binary, true_target, false_target);
            }
            return;
        }

        self.bind_node(NodeRef::Expression(binary.left));
        self.bind_node(NodeRef::Token(&binary.operator_token));
        self.bind_node(NodeRef::Expression(binary.right));

        if operator.is_assignment_operator() && !self.is_assignment_target(expr) {
            self.bind_assignment_target_flow(binary.left);
            if operator == SyntaxKind::EqualsToken {
                if let Expression::ElementAccess(access) = binary.left {
                    if is_narrowable_operand(access.expression) {
                        self.current_flow = self.create_flow_mutation(true, node.id());
                    }
                }
            }
        }
        if operator == SyntaxKind::CommaToken {
            self.maybe_bind_expression_flow_if_call(binary.left);
        }
    }

    /// `a && b` continues into `b` only when `a` is truthy; `a || b` and
    /// `a ?? b` only when it is not. Logical assignments also assign.
    fn bind_logical_like_expression(
        &mut self,
        expr: &'a Expression<'a>,
        binary: &'a BinaryExpression<'a>,
        true_target: FlowLabel,
        false_target: FlowLabel,
    ) {
        let operator = binary.operator();
        let pre_right_label = self.graph.create_branch_label();
        if matches!(operator, SyntaxKind::AmpersandAmpersandToken | SyntaxKind::AmpersandAmpersandEqualsToken) {
            self.bind_condition(Some(binary.left), pre_right_label, false_target);
        } else {
            self.bind_condition(Some(binary.left), true_target, pre_right_label);
        }
        self.current_flow = self.graph.finish_flow_label(pre_right_label);
        self.bind_node(NodeRef::Token(&binary.operator_token));

        if operator.is_logical_or_coalescing_assignment() {
            self.with_conditional_branches(true_target, false_target, |b| {
                b.bind_node(NodeRef::Expression(binary.right));
            });
            self.bind_assignment_target_flow(binary.left);
            self.add_condition(true_target, true, Some(expr));
            self.add_condition(false_target, false, Some(expr));
        } else {
            self.bind_condition(Some(binary.right), true_target, false_target);
        }
    }

    fn bind_destructuring_assignment_flow(&mut self, binary: &'a BinaryExpression<'a>) {
        if self.in_assignment_pattern {
            self.in_assignment_pattern = false;
            self.bind_node(NodeRef::Token(&binary.operator_token));
            self.bind_node(NodeRef::Expression(binary.right));
            self.in_assignment_pattern = true;
            self.bind_node(NodeRef::Expression(binary.left));
        } else {
            self.in_assignment_pattern = true;
            self.bind_node(NodeRef::Expression(binary.left));
            self.in_assignment_pattern = false;
            self.bind_node(NodeRef::Token(&binary.operator_token));
            self.bind_node(NodeRef::Expression(binary.right));
        }
        self.bind_assignment_target_flow(binary.left);
    }

    /// Assignment nodes for every narrowable reference a target writes.
    fn bind_assignment_target_flow(&mut self, target: &'a Expression<'a>) {
        if is_narrowable_reference(target) {
            self.current_flow = self.create_flow_mutation(false, NodeRef::Expression(target).id());
            return;
        }
        match target {
            Expression::ArrayLiteral(array) => {
                for element in array.elements {
                    match element {
                        Expression::Spread(spread) => self.bind_assignment_target_flow(spread.expression),
                        _ => self.bind_destructuring_target_flow(element),
                    }
                }
            }
            Expression::ObjectLiteral(object) => {
                for property in object.properties {
                    match property {
                        ObjectLiteralElement::PropertyAssignment(p) => self.bind_destructuring_target_flow(p.initializer),
                        ObjectLiteralElement::ShorthandPropertyAssignment(s) => {
                            self.current_flow = self.create_flow_mutation(false, s.name.data.id);
                        }
                        ObjectLiteralElement::SpreadAssignment(s) => self.bind_assignment_target_flow(s.expression),
                        _ => {}
                    }
                }
            }
            Expression::Parenthesized(p) => self.bind_assignment_target_flow(p.expression),
            _ => {}
        }
    }

    /// `a = 1` inside a pattern assigns `a`.
    fn bind_destructuring_target_flow(&mut self, target: &'a Expression<'a>) {
        match target {
            Expression::Binary(b) if b.operator() == SyntaxKind::EqualsToken => self.bind_assignment_target_flow(b.left),
            _ => self.bind_assignment_target_flow(target),
        }
    }

    fn bind_conditional_expression_flow(&mut self, conditional: &'a ConditionalExpression<'a>) {
        let true_label = self.graph.create_branch_label();
        let false_label = self.graph.create_branch_label();
        let post_expression_label = self.graph.create_branch_label();
        self.bind_condition(Some(conditional.condition), true_label, false_label);
        self.current_flow = self.graph.finish_flow_label(true_label);
        self.bind_node(NodeRef::Token(&conditional.question_token));
        self.bind_node(NodeRef::Expression(conditional.when_true));
        self.graph.add_antecedent(post_expression_label, self.current_flow);
        self.current_flow = self.graph.finish_flow_label(false_label);
        self.bind_node(NodeRef::Token(&conditional.colon_token));
        self.bind_node(NodeRef::Expression(conditional.when_false));
        self.graph.add_antecedent(post_expression_label, self.current_flow);
        self.current_flow = self.graph.finish_flow_label(post_expression_label);
    }

    fn bind_call_expression_flow(&mut self, node: NodeRef<'a>, expr: &'a Expression<'a>, call: &'a CallExpression<'a>) {
        if expr.is_optional_chain() {
            self.bind_optional_chain_flow(node, expr);
        } else if matches!(
            call.expression.skip_parentheses(),
            Expression::FunctionExpression(_) | Expression::ArrowFunction(_)
        ) {
            // Arguments of an immediately invoked function run before its body.
            if let Some(type_arguments) = call.type_arguments {
                for type_argument in type_arguments {
                    self.bind_node(NodeRef::TypeNode(type_argument));
                }
            }
            for argument in call.arguments {
                self.bind_node(NodeRef::Expression(argument));
            }
            self.bind_node(NodeRef::Expression(call.expression));
        } else {
            self.bind_each_child(node);
            if call.expression.is_keyword(SyntaxKind::SuperKeyword) {
                self.current_flow = self.graph.create_call(node.id(), self.current_flow);
            }
        }
        if let Expression::PropertyAccess(access) = call.expression {
            if let MemberName::Identifier(name) = &access.name {
                if is_narrowable_operand(access.expression) && is_push_or_unshift(name, &self.interner) {
                    self.current_flow = self.create_flow_mutation(true, node.id());
                }
            }
        }
    }

    // ========================================================================
    // Optional chains
    // ========================================================================

    fn is_outermost_optional_chain(&self, node: NodeRef<'a>) -> bool {
        match self.parent_of(node) {
            Some(NodeRef::Expression(parent)) if parent.is_optional_chain() => {
                !parent.chain_expression().is_some_and(|e| NodeRef::Expression(e).same_node(&node))
            }
            _ => true,
        }
    }

    fn is_expression_of_optional_chain_root(&self, expr: &'a Expression<'a>) -> bool {
        let node = NodeRef::Expression(expr);
        matches!(
            self.parent_of(node),
            Some(NodeRef::Expression(parent)) if parent.question_dot_token().is_some()
                && parent.chain_expression().is_some_and(|e| NodeRef::Expression(e).same_node(&node))
        )
    }

    fn is_nullish_coalesce_operand(&self, expr: &'a Expression<'a>) -> bool {
        matches!(
            self.parent_of(NodeRef::Expression(expr)),
            Some(NodeRef::Expression(Expression::Binary(b))) if b.operator() == SyntaxKind::QuestionQuestionToken
        )
    }

    fn is_statement_condition(&self, node: NodeRef<'a>) -> bool {
        let is = |expr: Option<&'a Expression<'a>>| expr.is_some_and(|e| NodeRef::Expression(e).same_node(&node));
        match self.parent_of(node) {
            Some(NodeRef::Statement(Statement::IfStatement(s))) => is(Some(s.expression)),
            Some(NodeRef::Statement(Statement::WhileStatement(s))) => is(Some(s.expression)),
            Some(NodeRef::Statement(Statement::DoStatement(s))) => is(Some(s.expression)),
            Some(NodeRef::Statement(Statement::ForStatement(s))) => is(s.condition),
            Some(NodeRef::Expression(Expression::Conditional(c))) => is(Some(c.condition)),
            _ => false,
        }
    }

    /// A logical expression whose value is not itself a condition of an
    /// enclosing statement, logical expression or optional chain.
    fn is_top_level_logical_expression(&self, node: NodeRef<'a>) -> bool {
        let mut node = node;
        while let Some(parent) = self.parent_of(node) {
            match parent {
                NodeRef::Expression(Expression::Parenthesized(_)) => node = parent,
                NodeRef::Expression(Expression::PrefixUnary(p)) if p.operator == SyntaxKind::ExclamationToken => {
                    node = parent
                }
                _ => break,
            }
        }
        if self.is_statement_condition(node) {
            return false;
        }
        match self.parent_of(node) {
            Some(NodeRef::Expression(parent)) => {
                !is_logical_expression(parent)
                    && !(parent.is_optional_chain()
                        && parent.chain_expression().is_some_and(|e| NodeRef::Expression(e).same_node(&node)))
            }
            _ => true,
        }
    }

    /// `a?.b.c` flows like `a && a.b.c`.
    fn bind_optional_chain_flow(&mut self, node: NodeRef<'a>, expr: &'a Expression<'a>) {
        if self.is_top_level_logical_expression(node) {
            let post_expression_label = self.graph.create_branch_label();
            self.bind_optional_chain(node, expr, post_expression_label, post_expression_label);
            self.current_flow = self.graph.finish_flow_label(post_expression_label);
        } else {
            let (Some(true_target), Some(false_target)) = (self.current_true_target, self.current_false_target) else {
                panic!("nested optional chain bound without condition targets");
            };
            self.bind_optional_chain(node, expr, true_target, false_target);
        }
    }

    fn bind_optional_chain(
        &mut self,
        node: NodeRef<'a>,
        expr: &'a Expression<'a>,
        true_target: FlowLabel,
        false_target: FlowLabel,
    ) {
        let pre_chain_label = expr.question_dot_token().map(|_| self.graph.create_branch_label());
        if let Some(inner) = expr.chain_expression() {
            self.bind_optional_expression(inner, pre_chain_label.unwrap_or(true_target), false_target);
        }
        if let Some(label) = pre_chain_label {
            self.current_flow = self.graph.finish_flow_label(label);
        }
        self.with_conditional_branches(true_target, false_target, |b| b.bind_optional_chain_rest(expr));
        if self.is_outermost_optional_chain(node) {
            self.add_condition(true_target, true, Some(expr));
            self.add_condition(false_target, false, Some(expr));
        }
    }

    fn bind_optional_expression(&mut self, expr: &'a Expression<'a>, true_target: FlowLabel, false_target: FlowLabel) {
        self.with_conditional_branches(true_target, false_target, |b| b.bind_node(NodeRef::Expression(expr)));
        if !expr.is_optional_chain() || self.is_outermost_optional_chain(NodeRef::Expression(expr)) {
            self.add_condition(true_target, true, Some(expr));
            self.add_condition(false_target, false, Some(expr));
        }
    }

    /// The parts of a chain link after its `expression`.
    fn bind_optional_chain_rest(&mut self, expr: &'a Expression<'a>) {
        match expr {
            Expression::PropertyAccess(access) => {
                if let Some(token) = &access.question_dot_token {
                    self.bind_node(NodeRef::Token(token));
                }
                self.bind_node(NodeRef::Identifier(access.name.identifier()));
            }
            Expression::ElementAccess(access) => {
                if let Some(token) = &access.question_dot_token {
                    self.bind_node(NodeRef::Token(token));
                }
                self.bind_node(NodeRef::Expression(access.argument_expression));
            }
            Expression::Call(call) => {
                if let Some(token) = &call.question_dot_token {
                    self.bind_node(NodeRef::Token(token));
                }
                if let Some(type_arguments) = call.type_arguments {
                    for type_argument in type_arguments {
                        self.bind_node(NodeRef::TypeNode(type_argument));
                    }
                }
                for argument in call.arguments {
                    self.bind_node(NodeRef::Expression(argument));
                }
            }
            _ => {}
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn bind_variable_declaration_flow(&mut self, node: NodeRef<'a>, declaration: &'a VariableDeclaration<'a>) {
        self.bind_each_child(node);
        let in_for_in_or_of = self.parent_of(node).and_then(|list| self.parent_of(list)).is_some_and(|s| {
            matches!(s, NodeRef::Statement(Statement::ForInStatement(_) | Statement::ForOfStatement(_)))
        });
        if declaration.initializer.is_some() || in_for_in_or_of {
            self.bind_initialized_variable_flow(node.id(), &declaration.name);
        }
    }

    fn bind_initialized_variable_flow(&mut self, declaration: NodeId, name: &'a BindingName<'a>) {
        match name {
            BindingName::Identifier(_) => {
                self.current_flow = self.create_flow_mutation(false, declaration);
            }
            BindingName::ObjectBindingPattern(pattern) => {
                for element in pattern.elements {
                    self.bind_initialized_variable_flow(element.data.id, &element.name);
                }
            }
            BindingName::ArrayBindingPattern(pattern) => {
                for element in pattern.elements {
                    if let ArrayBindingElement::BindingElement(element) = element {
                        self.bind_initialized_variable_flow(element.data.id, &element.name);
                    }
                }
            }
        }
    }

    /// A default initializer runs before the name it defaults is bound.
    fn bind_binding_element_flow(&mut self, element: &'a BindingElement<'a>) {
        if let Some(token) = &element.dot_dot_dot_token {
            self.bind_node(NodeRef::Token(token));
        }
        if let Some(property_name) = &element.property_name {
            self.bind_node(property_name.as_node());
        }
        self.bind_initializer(element.initializer);
        self.bind_node(element.name.as_node());
    }

    fn bind_parameter_flow(&mut self, parameter: &'a ParameterDeclaration<'a>) {
        if let Some(token) = &parameter.dot_dot_dot_token {
            self.bind_node(NodeRef::Token(token));
        }
        if let Some(token) = &parameter.question_token {
            self.bind_node(NodeRef::Token(token));
        }
        if let Some(type_annotation) = parameter.type_annotation {
            self.bind_node(NodeRef::TypeNode(type_annotation));
        }
        self.bind_initializer(parameter.initializer);
        self.bind_node(parameter.name.as_node());
    }

    /// The initializer only runs when the value is `undefined`, so the flow
    /// after it joins the flow that skipped it.
    fn bind_initializer(&mut self, initializer: Option<&'a Expression<'a>>) {
        let Some(initializer) = initializer else {
            return;
        };
        let entry_flow = self.current_flow;
        self.bind_node(NodeRef::Expression(initializer));
        if entry_flow == FlowNodeId::UNREACHABLE || entry_flow == self.current_flow {
            return;
        }
        let exit_flow = self.graph.create_branch_label();
        self.graph.add_antecedent(exit_flow, entry_flow);
        self.graph.add_antecedent(exit_flow, self.current_flow);
        self.current_flow = self.graph.finish_flow_label(exit_flow);
    }
}

#[cfg(test)]
mod tests {
    use crate::flow::FlowNode;
    use crate::{bind_source_file, FlowNodeId};
    use tsforge_ast::{BindingName, Expression, ForInitializer, NodeFactory, NodeFlags, NodeRef, Statement};
    use tsforge_core::{CompilerArena, StringInterner};
    use tsforge_tsoptions::CompilerOptions;

    fn ident<'a>(f: &NodeFactory<'a>, name: &str) -> Expression<'a> {
        Expression::Identifier(f.create_identifier(name))
    }

    #[test]
    fn test_statement_after_return_is_unreachable() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let call = f.create_call(ident(&f, "g"), None, vec![]);
        let body = f.create_block(vec![f.create_return(None), f.create_expression_statement(call)], true);
        let func = f.create_function_declaration(false, Some(f.create_identifier("fn1")), None, vec![], None, Some(body));
        let file = f.create_source_file("a.ts", "", vec![func]);
        let bound = bind_source_file(file, &CompilerOptions::default(), f.interner());

        let diagnostics: Vec<_> = bound.diagnostics().with_code(7027).collect();
        assert_eq!(diagnostics.len(), 1);
        assert!(!diagnostics[0].is_error());
        let Statement::FunctionDeclaration(decl) = &file.statements[0] else {
            unreachable!()
        };
        let body = decl.body.as_ref().unwrap();
        assert!(bound.is_unreachable(NodeRef::Statement(&body.statements[1])));
        assert!(!bound.is_unreachable(NodeRef::Statement(&body.statements[0])));
    }

    #[test]
    fn test_allow_unreachable_code_suppresses_report() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let stmts = vec![f.create_throw(ident(&f, "e")), f.create_expression_statement(ident(&f, "x"))];
        let file = f.create_source_file("a.ts", "", stmts);
        let options = CompilerOptions { allow_unreachable_code: Some(true), ..Default::default() };
        let bound = bind_source_file(file, &options, f.interner());
        assert_eq!(bound.diagnostics().with_code(7027).count(), 0);
        assert!(bound.is_unreachable(NodeRef::Statement(&file.statements[1])));
    }

    #[test]
    fn test_unreachable_is_error_when_disallowed() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let loop_body = f.create_block(vec![f.create_break(None), f.create_expression_statement(f.create_true())], true);
        let stmts = vec![f.create_while(f.create_true(), loop_body.into())];
        let file = f.create_source_file("a.ts", "", stmts);
        let options = CompilerOptions { allow_unreachable_code: Some(false), ..Default::default() };
        let bound = bind_source_file(file, &options, f.interner());
        let diagnostics: Vec<_> = bound.diagnostics().with_code(7027).collect();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].is_error());
    }

    #[test]
    fn test_unused_label_is_reported() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let unused = f.create_labeled(f.create_identifier("outer"), f.create_empty_statement());
        let used = f.create_labeled(
            f.create_identifier("inner"),
            f.create_while(f.create_true(), f.create_break(Some(f.create_identifier("inner")))),
        );
        let file = f.create_source_file("a.ts", "", vec![unused, used]);
        let bound = bind_source_file(file, &CompilerOptions::default(), f.interner());
        assert_eq!(bound.diagnostics().with_code(7028).count(), 1);
    }

    #[test]
    fn test_if_condition_creates_condition_nodes() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let then = f.create_expression_statement(ident(&f, "x"));
        let stmts = vec![f.create_if(ident(&f, "x"), then, None)];
        let file = f.create_source_file("a.ts", "", stmts);
        let bound = bind_source_file(file, &CompilerOptions::default(), f.interner());
        let Statement::IfStatement(if_statement) = &file.statements[0] else {
            unreachable!()
        };
        let Statement::ExpressionStatement(then) = if_statement.then_statement else {
            unreachable!()
        };
        let flow = bound.flow_of(NodeRef::Expression(then.expression)).unwrap();
        assert!(matches!(bound.graph().node(flow), FlowNode::Condition { assume_true: true, .. }));
    }

    #[test]
    fn test_assignment_creates_assignment_node() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let declaration =
            f.create_variable_declaration(BindingName::Identifier(f.create_identifier("x")), false, None, None);
        let list = f.create_variable_declaration_list(vec![declaration], NodeFlags::LET);
        let assign = f.create_assignment(ident(&f, "x"), Expression::NumericLiteral(f.create_numeric_literal("1")));
        let read = f.create_expression_statement(ident(&f, "x"));
        let stmts = vec![f.create_variable_statement(list), f.create_expression_statement(assign), read];
        let file = f.create_source_file("a.ts", "", stmts);
        let bound = bind_source_file(file, &CompilerOptions::default(), f.interner());
        let Statement::ExpressionStatement(read) = &file.statements[2] else {
            unreachable!()
        };
        let flow = bound.flow_of(NodeRef::Expression(read.expression)).unwrap();
        assert!(matches!(bound.graph().node(flow), FlowNode::Assignment { .. }));
    }

    #[test]
    fn test_try_finally_after_return_is_unreachable() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let try_block = f.create_block(vec![f.create_return(None)], true);
        let finally_block = f.create_block(vec![f.create_expression_statement(ident(&f, "cleanup"))], true);
        let try_statement = f.create_try(try_block, None, Some(finally_block));
        let after = f.create_expression_statement(ident(&f, "after"));
        let body = f.create_block(vec![try_statement, after], true);
        let func = f.create_function_declaration(false, Some(f.create_identifier("g")), None, vec![], None, Some(body));
        let file = f.create_source_file("a.ts", "", vec![func]);
        let bound = bind_source_file(file, &CompilerOptions::default(), f.interner());
        let Statement::FunctionDeclaration(decl) = &file.statements[0] else {
            unreachable!()
        };
        let body = decl.body.as_ref().unwrap();
        assert!(bound.is_unreachable(NodeRef::Statement(&body.statements[1])));
        let Statement::TryStatement(t) = &body.statements[0] else {
            unreachable!()
        };
        let finally_statement = &t.finally_block.as_ref().unwrap().statements[0];
        assert!(!bound.is_unreachable(NodeRef::Statement(finally_statement)));
    }

    #[test]
    fn test_try_and_catch_returning_leave_only_finally_reachable() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let number = |text: &str| Expression::NumericLiteral(f.create_numeric_literal(text));
        let try_block = f.create_block(vec![f.create_return(Some(number("1")))], true);
        let catch_block = f.create_block(vec![f.create_return(Some(number("2")))], true);
        let catch_clause = f.create_catch_clause(None, catch_block);
        let finally_block = f.create_block(vec![f.create_expression_statement(ident(&f, "cleanup"))], true);
        let try_statement = f.create_try(try_block, Some(catch_clause), Some(finally_block));
        let after = f.create_expression_statement(ident(&f, "after"));
        let body = f.create_block(vec![try_statement, after], true);
        let func = f.create_function_declaration(false, Some(f.create_identifier("g")), None, vec![], None, Some(body));
        let file = f.create_source_file("a.ts", "", vec![func]);
        let bound = bind_source_file(file, &CompilerOptions::default(), f.interner());
        let Statement::FunctionDeclaration(decl) = &file.statements[0] else {
            unreachable!()
        };
        let body = decl.body.as_ref().unwrap();
        assert!(bound.is_unreachable(NodeRef::Statement(&body.statements[1])));
        let Statement::TryStatement(t) = &body.statements[0] else {
            unreachable!()
        };
        let finally_statement = &t.finally_block.as_ref().unwrap().statements[0];
        assert!(!bound.is_unreachable(NodeRef::Statement(finally_statement)));
    }

    #[test]
    fn test_catch_assignment_reaches_finally_through_pre_finally() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let call = f.create_call(ident(&f, "run"), None, vec![]);
        let try_block = f.create_block(vec![f.create_expression_statement(call)], true);
        let assign = f.create_assignment(ident(&f, "x"), Expression::NumericLiteral(f.create_numeric_literal("1")));
        let rethrow = f.create_throw(ident(&f, "e"));
        let catch_block = f.create_block(vec![f.create_expression_statement(assign), rethrow], true);
        let catch_clause = f.create_catch_clause(None, catch_block);
        let finally_block = f.create_block(vec![f.create_expression_statement(ident(&f, "x"))], true);
        let try_statement = f.create_try(try_block, Some(catch_clause), Some(finally_block));
        let after = f.create_expression_statement(ident(&f, "after"));
        let file = f.create_source_file("a.ts", "", vec![try_statement, after]);
        let bound = bind_source_file(file, &CompilerOptions::default(), f.interner());

        let Statement::TryStatement(t) = &file.statements[0] else {
            unreachable!()
        };
        let Statement::ExpressionStatement(read) = &t.finally_block.as_ref().unwrap().statements[0] else {
            unreachable!()
        };
        let graph = bound.graph();
        let flow = bound.flow_of(NodeRef::Expression(read.expression)).unwrap();
        let exceptional = graph
            .reachable_from(flow)
            .into_iter()
            .find_map(|id| match graph.node(id) {
                FlowNode::PreFinally { antecedent, .. } => Some(*antecedent),
                _ => None,
            })
            .expect("finally entered through a pre-finally node");
        assert!(graph
            .reachable_from(exceptional)
            .iter()
            .any(|&id| matches!(graph.node(id), FlowNode::Assignment { .. })));
        assert!(!bound.is_unreachable(NodeRef::Statement(&file.statements[1])));
    }

    #[test]
    fn test_for_of_reaches_exit_without_iterating() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let declaration =
            f.create_variable_declaration(BindingName::Identifier(f.create_identifier("item")), false, None, None);
        let list = f.create_variable_declaration_list(vec![declaration], NodeFlags::CONST);
        let body = f.create_block(vec![f.create_return(None)], true);
        let for_of =
            f.create_for_of(false, ForInitializer::VariableDeclarationList(list), ident(&f, "items"), body.into());
        let after = f.create_expression_statement(ident(&f, "after"));
        let file = f.create_source_file("a.ts", "", vec![for_of, after]);
        let bound = bind_source_file(file, &CompilerOptions::default(), f.interner());
        assert!(!bound.is_unreachable(NodeRef::Statement(&file.statements[1])));
        let flow = bound.flow_of(NodeRef::Statement(&file.statements[1]));
        assert!(flow.is_some_and(|id| id != FlowNodeId::UNREACHABLE));
    }
}
