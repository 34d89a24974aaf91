//! Statements and declarations.

use crate::list_format::ListFormat;
use crate::printer::{EmitHint, Printer};
use tsforge_ast::utilities::{is_ambient_module, prologue_directive_count};
use tsforge_ast::*;
use tsforge_scanner::skip_trivia;

impl<'a, 'r> Printer<'a, 'r> {
    // ========================================================================
    // Statement printing
    // ========================================================================

    pub(crate) fn print_statement(&mut self, stmt: &'a Statement<'a>) {
        match stmt {
            Statement::EmptyStatement(_) => self.write_punctuation(";"),
            Statement::NotEmittedStatement(_) => {}
            Statement::ExpressionStatement(n) => {
                self.emit_expression(n.expression);
                self.write_trailing_semicolon();
            }
            Statement::VariableStatement(n) => {
                self.emit_modifiers(&n.data);
                self.pipeline_emit(EmitHint::Unspecified, NodeRef::VariableDeclarationList(&n.declaration_list));
                self.write_trailing_semicolon();
            }
            Statement::ReturnStatement(n) => {
                self.emit_token_with_comment(SyntaxKind::ReturnKeyword, n.data.pos(), &n.data, false);
                self.emit_expression_with_leading_space(n.expression);
                self.write_trailing_semicolon();
            }
            Statement::ThrowStatement(n) => {
                self.emit_token_with_comment(SyntaxKind::ThrowKeyword, n.data.pos(), &n.data, false);
                self.emit_expression_with_leading_space(Some(n.expression));
                self.write_trailing_semicolon();
            }
            Statement::BreakStatement(n) | Statement::ContinueStatement(n) => {
                let keyword = if n.data.kind == SyntaxKind::BreakStatement {
                    SyntaxKind::BreakKeyword
                } else {
                    SyntaxKind::ContinueKeyword
                };
                self.emit_token_with_comment(keyword, n.data.pos(), &n.data, false);
                if let Some(label) = &n.label {
                    self.write_space();
                    self.emit_identifier_name(label);
                }
                self.write_trailing_semicolon();
            }
            Statement::DebuggerStatement(n) => {
                self.emit_token_with_comment(SyntaxKind::DebuggerKeyword, n.data.pos(), &n.data, false);
                self.write_trailing_semicolon();
            }
            Statement::Block(n) => self.print_block(n),
            Statement::IfStatement(n) => self.print_if_statement(n),
            Statement::DoStatement(n) => self.print_do_statement(n),
            Statement::WhileStatement(n) => {
                self.emit_token_with_comment(SyntaxKind::WhileKeyword, n.data.pos(), &n.data, false);
                self.write_space();
                self.emit_parenthesized(n.expression);
                self.emit_embedded_statement(&n.data, n.statement);
            }
            Statement::ForStatement(n) => self.print_for_statement(n),
            Statement::ForInStatement(n) | Statement::ForOfStatement(n) => self.print_for_in_or_of_statement(n),
            Statement::WithStatement(n) => {
                self.emit_token_with_comment(SyntaxKind::WithKeyword, n.data.pos(), &n.data, false);
                self.write_space();
                self.emit_parenthesized(n.expression);
                self.emit_embedded_statement(&n.data, n.statement);
            }
            Statement::SwitchStatement(n) => {
                self.emit_token_with_comment(SyntaxKind::SwitchKeyword, n.data.pos(), &n.data, false);
                self.write_space();
                self.emit_parenthesized(n.expression);
                self.write_space();
                self.pipeline_emit(EmitHint::Unspecified, NodeRef::CaseBlock(&n.case_block));
            }
            Statement::LabeledStatement(n) => {
                self.emit_identifier_name(&n.label);
                self.write_punctuation(":");
                self.write_space();
                self.pipeline_emit(EmitHint::Unspecified, n.statement.as_node());
            }
            Statement::TryStatement(n) => self.print_try_statement(n),
            Statement::FunctionDeclaration(n) => self.print_function_declaration(n),
            Statement::ClassDeclaration(n) => self.print_class_like(n),
            Statement::InterfaceDeclaration(n) => self.print_interface_declaration(n),
            Statement::TypeAliasDeclaration(n) => self.print_type_alias(n),
            Statement::EnumDeclaration(n) => self.print_enum_declaration(n),
            Statement::ModuleDeclaration(n) => self.print_module_declaration(n),
            Statement::ImportDeclaration(n) => self.print_import_declaration(n),
            Statement::ImportEqualsDeclaration(n) => self.print_import_equals_declaration(n),
            Statement::ExportDeclaration(n) => self.print_export_declaration(n),
            Statement::ExportAssignment(n) => {
                self.emit_token_with_comment(SyntaxKind::ExportKeyword, n.data.pos(), &n.data, false);
                self.write_space();
                if n.is_export_equals {
                    self.write_operator("=");
                } else {
                    self.write_keyword("default");
                }
                self.write_space();
                self.emit_expression(n.expression);
                self.write_trailing_semicolon();
            }
            Statement::NamespaceExportDeclaration(n) => {
                self.write_keyword("export");
                self.write_space();
                self.write_keyword("as");
                self.write_space();
                self.write_keyword("namespace");
                self.write_space();
                self.emit_identifier_name(&n.name);
                self.write_trailing_semicolon();
            }
        }
    }

    /// Whether a statement survives into the output. With types stripped,
    /// declarations that only exist at compile time are left out.
    pub(crate) fn is_emitted_statement(&self, stmt: &Statement<'a>) -> bool {
        if !self.options.strip_types {
            return true;
        }
        if stmt.data().has_modifier(ModifierFlags::AMBIENT) {
            return false;
        }
        match stmt {
            Statement::InterfaceDeclaration(_)
            | Statement::TypeAliasDeclaration(_)
            | Statement::NamespaceExportDeclaration(_) => false,
            Statement::FunctionDeclaration(n) => n.body.is_some(),
            Statement::ModuleDeclaration(n) => !is_ambient_module(n),
            Statement::ImportDeclaration(n) => n.import_clause.as_ref().map_or(true, |c| self.import_clause_has_value(c)),
            Statement::ImportEqualsDeclaration(n) => {
                !n.is_type_only && self.resolver.is_referenced_alias_declaration(n.data.id)
            }
            Statement::ExportDeclaration(n) => !n.is_type_only,
            _ => true,
        }
    }

    pub(crate) fn print_block(&mut self, block: &'a Block<'a>) {
        let data = &block.data;
        let open_end = self.emit_token_with_comment(SyntaxKind::OpenBraceToken, data.pos(), data, false);
        let single_line = (!block.multi_line && block.statements.is_empty()) || data.emit_flags.contains(EmitFlags::SINGLE_LINE);
        let format = if single_line {
            ListFormat::SINGLE_LINE_BLOCK_STATEMENTS
        } else {
            ListFormat::MULTI_LINE_BLOCK_STATEMENTS
        };
        self.emit_statement_list(Some(data), block.statements, format);
        let statements_end = block.statements.last().map_or(open_end, |s| s.data().end());
        self.emit_token_with_comment(SyntaxKind::CloseBraceToken, statements_end, data, format.is_multi_line());
    }

    fn print_if_statement(&mut self, node: &'a IfStatement<'a>) {
        let data = &node.data;
        self.emit_token_with_comment(SyntaxKind::IfKeyword, data.pos(), data, false);
        self.write_space();
        self.emit_parenthesized(node.expression);
        self.emit_embedded_statement(data, node.then_statement);
        if let Some(else_statement) = node.else_statement {
            self.write_line_or_space(data, node.then_statement.data(), else_statement.data());
            self.emit_token_with_comment(SyntaxKind::ElseKeyword, node.then_statement.data().end(), data, false);
            if matches!(else_statement, Statement::IfStatement(_)) {
                self.write_space();
                self.pipeline_emit(EmitHint::Unspecified, else_statement.as_node());
            } else {
                self.emit_embedded_statement(data, else_statement);
            }
        }
    }

    fn print_do_statement(&mut self, node: &'a DoStatement<'a>) {
        let data = &node.data;
        self.emit_token_with_comment(SyntaxKind::DoKeyword, data.pos(), data, false);
        self.emit_embedded_statement(data, node.statement);
        if matches!(node.statement, Statement::Block(_)) {
            self.write_space();
        } else {
            self.write_line_or_space(data, node.statement.data(), node.expression.data());
        }
        self.emit_token_with_comment(SyntaxKind::WhileKeyword, node.statement.data().end(), data, false);
        self.write_space();
        self.emit_parenthesized(node.expression);
        self.write_trailing_semicolon();
    }

    fn print_for_statement(&mut self, node: &'a ForStatement<'a>) {
        let data = &node.data;
        self.emit_token_with_comment(SyntaxKind::ForKeyword, data.pos(), data, false);
        self.write_space();
        self.write_punctuation("(");
        if let Some(initializer) = &node.initializer {
            self.pipeline_emit(EmitHint::Unspecified, initializer.as_node());
        }
        self.write_punctuation(";");
        self.emit_expression_with_leading_space(node.condition);
        self.write_punctuation(";");
        self.emit_expression_with_leading_space(node.incrementor);
        self.write_punctuation(")");
        self.emit_embedded_statement(data, node.statement);
    }

    fn print_for_in_or_of_statement(&mut self, node: &'a ForInOrOfStatement<'a>) {
        let data = &node.data;
        self.emit_token_with_comment(SyntaxKind::ForKeyword, data.pos(), data, false);
        self.write_space();
        if node.await_modifier.is_some() {
            self.write_keyword("await");
            self.write_space();
        }
        self.write_punctuation("(");
        self.pipeline_emit(EmitHint::Unspecified, node.initializer.as_node());
        self.write_space();
        self.write_keyword(if data.kind == SyntaxKind::ForOfStatement { "of" } else { "in" });
        self.write_space();
        self.emit_expression(node.expression);
        self.write_punctuation(")");
        self.emit_embedded_statement(data, node.statement);
    }

    fn print_try_statement(&mut self, node: &'a TryStatement<'a>) {
        let data = &node.data;
        self.emit_token_with_comment(SyntaxKind::TryKeyword, data.pos(), data, false);
        self.write_space();
        self.pipeline_emit(EmitHint::Unspecified, NodeRef::Block(&node.try_block));
        let mut previous = &node.try_block.data;
        if let Some(catch) = &node.catch_clause {
            self.write_line_or_space(data, previous, &catch.data);
            self.pipeline_emit(EmitHint::Unspecified, NodeRef::CatchClause(catch));
            previous = &catch.data;
        }
        if let Some(finally) = &node.finally_block {
            self.write_line_or_space(data, previous, &finally.data);
            self.emit_token_with_comment(SyntaxKind::FinallyKeyword, previous.end(), data, false);
            self.write_space();
            self.pipeline_emit(EmitHint::Unspecified, NodeRef::Block(finally));
        }
    }

    pub(crate) fn print_catch_clause(&mut self, clause: &'a CatchClause<'a>) {
        let data = &clause.data;
        self.emit_token_with_comment(SyntaxKind::CatchKeyword, data.pos(), data, false);
        self.write_space();
        if let Some(decl) = &clause.variable_declaration {
            self.write_punctuation("(");
            self.pipeline_emit(EmitHint::Unspecified, NodeRef::VariableDeclaration(decl));
            self.write_punctuation(")");
            self.write_space();
        }
        self.pipeline_emit(EmitHint::Unspecified, NodeRef::Block(&clause.block));
    }

    pub(crate) fn print_case_block(&mut self, block: &'a CaseBlock<'a>) {
        let data = &block.data;
        let open_end = self.emit_token_with_comment(SyntaxKind::OpenBraceToken, data.pos(), data, false);
        self.emit_list(Some(data), Some(block.clauses), ListFormat::CASE_BLOCK_CLAUSES, |p, clause| {
            p.pipeline_emit(EmitHint::Unspecified, NodeRef::CaseClause(clause));
        });
        let clauses_end = block.clauses.last().map_or(open_end, |c| c.data.end());
        self.emit_token_with_comment(SyntaxKind::CloseBraceToken, clauses_end, data, true);
    }

    pub(crate) fn print_case_clause(&mut self, clause: &'a CaseOrDefaultClause<'a>) {
        let data = &clause.data;
        match clause.expression {
            Some(expression) => {
                self.emit_token_with_comment(SyntaxKind::CaseKeyword, data.pos(), data, false);
                self.write_space();
                self.emit_expression(expression);
            }
            None => {
                self.emit_token_with_comment(SyntaxKind::DefaultKeyword, data.pos(), data, false);
            }
        }
        let statements = clause.statements;
        let single_statement = statements.len() == 1
            && (self.current_source_file.is_none()
                || data.is_synthesized()
                || statements[0].data().is_synthesized()
                || self.on_same_line(self.start_of(data), self.start_of(statements[0].data())));
        let mut format = ListFormat::CASE_OR_DEFAULT_CLAUSE_STATEMENTS;
        self.write_punctuation(":");
        if single_statement {
            self.write_space();
            format.remove(ListFormat::MULTI_LINE | ListFormat::INDENTED);
        }
        self.emit_statement_list(Some(data), statements, format);
    }

    // ========================================================================
    // Variables and bindings
    // ========================================================================

    pub(crate) fn print_variable_declaration_list(&mut self, list: &'a VariableDeclarationList<'a>) {
        let keyword = if list.data.flags.contains(NodeFlags::CONST) {
            "const"
        } else if list.data.flags.contains(NodeFlags::LET) {
            "let"
        } else {
            "var"
        };
        self.write_keyword(keyword);
        self.write_space();
        self.emit_list(Some(&list.data), Some(list.declarations), ListFormat::VARIABLE_DECLARATION_LIST, |p, decl| {
            p.pipeline_emit(EmitHint::Unspecified, NodeRef::VariableDeclaration(decl));
        });
    }

    pub(crate) fn print_variable_declaration(&mut self, decl: &'a VariableDeclaration<'a>) {
        self.pipeline_emit(EmitHint::Unspecified, decl.name.as_node());
        if decl.exclamation_token.is_some() && !self.options.strip_types {
            self.write_punctuation("!");
        }
        self.emit_type_annotation(decl.type_annotation);
        self.emit_initializer(decl.initializer);
    }

    pub(crate) fn print_object_binding_pattern(&mut self, pattern: &'a ObjectBindingPattern<'a>) {
        self.write_punctuation("{");
        self.emit_list(Some(&pattern.data), Some(pattern.elements), ListFormat::OBJECT_BINDING_PATTERN_ELEMENTS, |p, e| {
            p.pipeline_emit(EmitHint::Unspecified, NodeRef::BindingElement(e));
        });
        self.write_punctuation("}");
    }

    pub(crate) fn print_array_binding_pattern(&mut self, pattern: &'a ArrayBindingPattern<'a>) {
        self.write_punctuation("[");
        self.emit_list(Some(&pattern.data), Some(pattern.elements), ListFormat::ARRAY_BINDING_PATTERN_ELEMENTS, |p, e| {
            if let ArrayBindingElement::BindingElement(element) = e {
                p.pipeline_emit(EmitHint::Unspecified, NodeRef::BindingElement(element));
            }
        });
        self.write_punctuation("]");
    }

    pub(crate) fn print_binding_element(&mut self, element: &'a BindingElement<'a>) {
        if element.dot_dot_dot_token.is_some() {
            self.write_punctuation("...");
        }
        if let Some(property_name) = &element.property_name {
            self.emit_property_name(property_name);
            self.write_punctuation(":");
            self.write_space();
        }
        self.pipeline_emit(EmitHint::Unspecified, element.name.as_node());
        self.emit_initializer(element.initializer);
    }

    // ========================================================================
    // Functions
    // ========================================================================

    fn print_function_declaration(&mut self, node: &'a FunctionDeclaration<'a>) {
        self.emit_modifiers(&node.data);
        self.write_keyword("function");
        if node.asterisk_token.is_some() {
            self.write_punctuation("*");
        }
        self.write_space();
        if let Some(name) = &node.name {
            self.emit_identifier_name(name);
        }
        self.emit_signature_and_body(&node.data, node.type_parameters, node.parameters, node.return_type, node.body.as_ref());
    }

    pub(crate) fn emit_signature_and_body(
        &mut self,
        data: &NodeData,
        type_parameters: Option<&'a [TypeParameterDeclaration<'a>]>,
        parameters: &'a [ParameterDeclaration<'a>],
        return_type: Option<&'a TypeNode<'a>>,
        body: Option<&'a Block<'a>>,
    ) {
        let Some(body) = body else {
            self.emit_signature_head(data, type_parameters, parameters, return_type);
            self.write_trailing_semicolon();
            return;
        };
        let reuse = data.emit_flags.contains(EmitFlags::REUSE_TEMP_VARIABLE_SCOPE);
        self.names.push_scope(reuse);
        for param in parameters {
            self.generate_names_for_binding(&param.name);
        }
        self.generate_names_for_statements(body.statements);
        self.emit_signature_head(data, type_parameters, parameters, return_type);
        self.emit_block_function_body(body);
        self.names.pop_scope(reuse);
    }

    pub(crate) fn emit_signature_head(
        &mut self,
        data: &NodeData,
        type_parameters: Option<&'a [TypeParameterDeclaration<'a>]>,
        parameters: &'a [ParameterDeclaration<'a>],
        return_type: Option<&'a TypeNode<'a>>,
    ) {
        self.emit_type_parameters(data, type_parameters);
        self.emit_parameters(data, parameters);
        self.emit_type_annotation(return_type);
    }

    pub(crate) fn emit_parameters(&mut self, parent: &NodeData, parameters: &'a [ParameterDeclaration<'a>]) {
        self.emit_list_filtered(
            Some(parent),
            parameters,
            ListFormat::PARAMETERS,
            |p, param| !(p.options.strip_types && p.is_this_parameter(param)),
            |p, param| p.pipeline_emit(EmitHint::Unspecified, NodeRef::Parameter(param)),
        );
    }

    fn is_this_parameter(&self, param: &ParameterDeclaration<'_>) -> bool {
        matches!(&param.name, BindingName::Identifier(id) if self.interner.unescape(id.escaped_text) == "this")
    }

    pub(crate) fn print_parameter(&mut self, param: &'a ParameterDeclaration<'a>) {
        self.emit_modifiers(&param.data);
        if param.dot_dot_dot_token.is_some() {
            self.write_punctuation("...");
        }
        self.pipeline_emit(EmitHint::Unspecified, param.name.as_node());
        if param.question_token.is_some() && !self.options.strip_types {
            self.write_punctuation("?");
        }
        self.emit_type_annotation(param.type_annotation);
        self.emit_initializer(param.initializer);
    }

    /// The body of a function, method or accessor. Prints on one line when
    /// the source did.
    pub(crate) fn emit_block_function_body(&mut self, body: &'a Block<'a>) {
        self.write_space();
        self.write_punctuation("{");
        self.writer.increase_indent();
        let single_line = self.should_emit_function_body_on_single_line(body);
        let (pos, end) = self.statements_range(body);
        self.emit_body_with_detached_comments(body.data.emit_flags, pos, end, |p| {
            p.emit_block_function_body_worker(body, single_line);
        });
        self.writer.decrease_indent();
        self.write_punctuation("}");
    }

    fn emit_block_function_body_worker(&mut self, body: &'a Block<'a>, single_line: bool) {
        let statements = body.statements;
        let prologue_count = prologue_directive_count(statements);
        for stmt in &statements[..prologue_count] {
            self.write_line();
            self.pipeline_emit(EmitHint::Unspecified, stmt.as_node());
        }
        if prologue_count == 0 && single_line {
            self.writer.decrease_indent();
            self.emit_statement_list(Some(&body.data), statements, ListFormat::SINGLE_LINE_FUNCTION_BODY_STATEMENTS);
            self.writer.increase_indent();
        } else {
            self.emit_statement_list(
                Some(&body.data),
                &statements[prologue_count..],
                ListFormat::MULTI_LINE_FUNCTION_BODY_STATEMENTS,
            );
        }
    }

    fn should_emit_function_body_on_single_line(&self, body: &Block<'a>) -> bool {
        let data = &body.data;
        if data.emit_flags.contains(EmitFlags::SINGLE_LINE) {
            return true;
        }
        if body.multi_line {
            return false;
        }
        if self.in_current_file(data) && !self.range_is_on_single_line(data) {
            return false;
        }
        let statements = body.statements;
        let first = statements.first().map(|s| s.data());
        let last = statements.last().map(|s| s.data());
        if self.leading_line_terminator_count(Some(data), first, ListFormat::PRESERVE_LINES) > 0
            || self.closing_line_terminator_count(Some(data), last, ListFormat::PRESERVE_LINES) > 0
        {
            return false;
        }
        statements
            .windows(2)
            .all(|pair| self.separating_line_terminator_count(pair[0].data(), pair[1].data(), ListFormat::PRESERVE_LINES) == 0)
    }

    /// The source range of a block's statements, between its braces.
    fn statements_range(&self, block: &Block<'a>) -> (u32, u32) {
        let data = &block.data;
        match self.current_source_file {
            Some(file) if self.in_current_file(data) => {
                let pos = skip_trivia(&file.text, data.pos()) + 1;
                let end = block.statements.last().map_or(pos, |s| s.data().end());
                (pos, end)
            }
            _ => (u32::MAX, u32::MAX),
        }
    }

    // ========================================================================
    // Classes
    // ========================================================================

    pub(crate) fn print_class_like(&mut self, node: &'a ClassLikeDeclaration<'a>) {
        self.emit_modifiers(&node.data);
        self.write_keyword("class");
        if let Some(name) = &node.name {
            self.write_space();
            self.emit_identifier_name(name);
        }
        self.emit_type_parameters(&node.data, node.type_parameters);
        self.emit_list_filtered(
            Some(&node.data),
            node.heritage_clauses.unwrap_or(&[]),
            ListFormat::CLASS_HERITAGE_CLAUSES,
            |p, clause| !(p.options.strip_types && clause.token == SyntaxKind::ImplementsKeyword),
            |p, clause| p.pipeline_emit(EmitHint::Unspecified, NodeRef::HeritageClause(clause)),
        );
        self.write_space();
        self.write_punctuation("{");
        self.emit_list_filtered(
            Some(&node.data),
            node.members,
            ListFormat::CLASS_MEMBERS,
            |p, member| p.is_emitted_class_element(member),
            |p, member| p.pipeline_emit(EmitHint::Unspecified, member.as_node()),
        );
        self.write_punctuation("}");
    }

    pub(crate) fn print_heritage_clause(&mut self, clause: &'a HeritageClause<'a>) {
        self.write_space();
        self.write_token(clause.token);
        self.write_space();
        self.emit_list(Some(&clause.data), Some(clause.types), ListFormat::HERITAGE_CLAUSE_TYPES, |p, ty| {
            p.pipeline_emit(EmitHint::Unspecified, NodeRef::ExpressionWithTypeArguments(ty));
        });
    }

    fn is_emitted_class_element(&self, member: &ClassElement<'a>) -> bool {
        if !self.options.strip_types {
            return true;
        }
        let data = member.data();
        if data.has_modifier(ModifierFlags::AMBIENT | ModifierFlags::ABSTRACT) {
            return false;
        }
        match member {
            ClassElement::IndexSignature(_) => false,
            ClassElement::MethodDeclaration(m) => m.body.is_some(),
            ClassElement::Constructor(c) => c.body.is_some(),
            _ => true,
        }
    }

    pub(crate) fn print_class_element(&mut self, member: &'a ClassElement<'a>) {
        match member {
            ClassElement::PropertyDeclaration(n) => {
                self.emit_modifiers(&n.data);
                self.emit_property_name(&n.name);
                if !self.options.strip_types {
                    if n.question_token.is_some() { self.write_punctuation("?"); }
                    if n.exclamation_token.is_some() { self.write_punctuation("!"); }
                }
                self.emit_type_annotation(n.type_annotation);
                self.emit_initializer(n.initializer);
                self.write_trailing_semicolon();
            }
            ClassElement::MethodDeclaration(n) => self.print_method(n),
            ClassElement::Constructor(n) => {
                self.emit_modifiers(&n.data);
                self.write_keyword("constructor");
                self.emit_signature_and_body(&n.data, None, n.parameters, None, n.body.as_ref());
            }
            ClassElement::GetAccessor(n) | ClassElement::SetAccessor(n) => self.print_accessor(n),
            ClassElement::IndexSignature(n) => self.print_index_signature(n),
            ClassElement::SemicolonClassElement(_) => self.write_punctuation(";"),
            ClassElement::ClassStaticBlockDeclaration(n) => {
                self.write_keyword("static");
                self.names.push_scope(false);
                self.generate_names_for_statements(n.body.statements);
                self.emit_block_function_body(&n.body);
                self.names.pop_scope(false);
            }
        }
    }

    pub(crate) fn print_method(&mut self, n: &'a MethodDeclaration<'a>) {
        self.emit_modifiers(&n.data);
        if n.asterisk_token.is_some() {
            self.write_punctuation("*");
        }
        self.emit_property_name(&n.name);
        if n.question_token.is_some() && !self.options.strip_types {
            self.write_punctuation("?");
        }
        self.emit_signature_and_body(&n.data, n.type_parameters, n.parameters, n.return_type, n.body.as_ref());
    }

    pub(crate) fn print_accessor(&mut self, n: &'a AccessorDeclaration<'a>) {
        self.emit_modifiers(&n.data);
        self.write_keyword(if n.data.kind == SyntaxKind::GetAccessor { "get" } else { "set" });
        self.write_space();
        self.emit_property_name(&n.name);
        self.emit_signature_and_body(&n.data, None, n.parameters, n.return_type, n.body.as_ref());
    }

    pub(crate) fn print_index_signature(&mut self, n: &'a IndexSignatureDeclaration<'a>) {
        self.emit_modifiers(&n.data);
        self.emit_list(Some(&n.data), Some(n.parameters), ListFormat::INDEX_SIGNATURE_PARAMETERS, |p, param| {
            p.pipeline_emit(EmitHint::Unspecified, NodeRef::Parameter(param));
        });
        self.emit_type_annotation(n.type_annotation);
        self.write_trailing_semicolon();
    }

    // ========================================================================
    // Interfaces, type aliases and enums
    // ========================================================================

    fn print_interface_declaration(&mut self, node: &'a InterfaceDeclaration<'a>) {
        self.emit_modifiers(&node.data);
        self.write_keyword("interface");
        self.write_space();
        self.emit_identifier_name(&node.name);
        self.emit_type_parameters(&node.data, node.type_parameters);
        self.emit_list(Some(&node.data), node.heritage_clauses, ListFormat::HERITAGE_CLAUSES, |p, clause| {
            p.pipeline_emit(EmitHint::Unspecified, NodeRef::HeritageClause(clause));
        });
        self.write_space();
        self.write_punctuation("{");
        self.emit_list(Some(&node.data), Some(node.members), ListFormat::INTERFACE_MEMBERS, |p, member| {
            p.pipeline_emit(EmitHint::Unspecified, member.as_node());
        });
        self.write_punctuation("}");
    }

    fn print_type_alias(&mut self, node: &'a TypeAliasDeclaration<'a>) {
        self.emit_modifiers(&node.data);
        self.write_keyword("type");
        self.write_space();
        self.emit_identifier_name(&node.name);
        self.emit_type_parameters(&node.data, node.type_parameters);
        self.write_space();
        self.write_operator("=");
        self.write_space();
        self.emit_type(node.type_node);
        self.write_trailing_semicolon();
    }

    fn print_enum_declaration(&mut self, node: &'a EnumDeclaration<'a>) {
        self.emit_modifiers(&node.data);
        self.write_keyword("enum");
        self.write_space();
        self.emit_identifier_name(&node.name);
        self.write_space();
        self.write_punctuation("{");
        self.emit_list(Some(&node.data), Some(node.members), ListFormat::ENUM_MEMBERS, |p, member| {
            p.pipeline_emit(EmitHint::Unspecified, NodeRef::EnumMember(member));
        });
        self.write_punctuation("}");
    }

    pub(crate) fn print_enum_member(&mut self, member: &'a EnumMember<'a>) {
        self.emit_property_name(&member.name);
        self.emit_initializer(member.initializer);
    }

    // ========================================================================
    // Namespaces and modules
    // ========================================================================

    pub(crate) fn print_module_declaration(&mut self, node: &'a ModuleDeclaration<'a>) {
        self.emit_modifiers(&node.data);
        if !node.data.flags.contains(NodeFlags::GLOBAL_AUGMENTATION) {
            self.write_keyword(if node.data.flags.contains(NodeFlags::NAMESPACE) { "namespace" } else { "module" });
            self.write_space();
        }
        self.emit_module_name(&node.name);
        let mut body = node.body.as_ref();
        while let Some(ModuleBody::ModuleDeclaration(inner)) = body {
            self.write_punctuation(".");
            self.emit_module_name(&inner.name);
            body = inner.body.as_ref();
        }
        match body {
            Some(body) => {
                self.write_space();
                self.pipeline_emit(EmitHint::Unspecified, body.as_node());
            }
            None => self.write_trailing_semicolon(),
        }
    }

    fn emit_module_name(&mut self, name: &'a ModuleName<'a>) {
        match name {
            ModuleName::Identifier(id) => self.emit_identifier_name(id),
            ModuleName::StringLiteral(lit) => self.pipeline_emit(EmitHint::Unspecified, NodeRef::StringLiteral(lit)),
        }
    }

    pub(crate) fn print_module_block(&mut self, block: &'a ModuleBlock<'a>) {
        self.names.push_scope(false);
        self.generate_names_for_statements(block.statements);
        let data = &block.data;
        self.write_punctuation("{");
        let format = if block.statements.is_empty() {
            ListFormat::SINGLE_LINE_BLOCK_STATEMENTS
        } else {
            ListFormat::MULTI_LINE_BLOCK_STATEMENTS
        };
        self.emit_statement_list(Some(data), block.statements, format);
        let statements_end = block.statements.last().map_or(u32::MAX, |s| s.data().end());
        self.emit_token_with_comment(SyntaxKind::CloseBraceToken, statements_end, data, format.is_multi_line());
        self.names.pop_scope(false);
    }

    // ========================================================================
    // Imports and exports
    // ========================================================================

    fn print_import_declaration(&mut self, node: &'a ImportDeclaration<'a>) {
        self.emit_modifiers(&node.data);
        self.emit_token_with_comment(SyntaxKind::ImportKeyword, node.data.pos(), &node.data, false);
        self.write_space();
        if let Some(clause) = &node.import_clause {
            self.pipeline_emit(EmitHint::Unspecified, NodeRef::ImportClause(clause));
            self.write_space();
            self.write_keyword("from");
            self.write_space();
        }
        self.emit_expression(node.module_specifier);
        if let Some(attributes) = &node.attributes {
            self.write_space();
            self.pipeline_emit(EmitHint::Unspecified, NodeRef::ImportAttributes(attributes));
        }
        self.write_trailing_semicolon();
    }

    /// Whether any binding of an import clause is used as a value.
    fn import_clause_has_value(&self, clause: &ImportClause<'a>) -> bool {
        if clause.is_type_only {
            return false;
        }
        let default_used = clause.name.is_some() && self.resolver.is_referenced_alias_declaration(clause.data.id);
        default_used || self.named_bindings_have_value(clause.named_bindings.as_ref())
    }

    fn named_bindings_have_value(&self, bindings: Option<&NamedImportBindings<'a>>) -> bool {
        match bindings {
            Some(NamedImportBindings::NamespaceImport(ns)) => self.resolver.is_referenced_alias_declaration(ns.data.id),
            Some(NamedImportBindings::NamedImports(named)) => {
                named.elements.iter().any(|spec| self.is_emitted_import_specifier(spec))
            }
            None => false,
        }
    }

    fn is_emitted_import_specifier(&self, spec: &ImportOrExportSpecifier) -> bool {
        if !self.options.strip_types {
            return true;
        }
        if spec.is_type_only {
            return false;
        }
        spec.data.kind == SyntaxKind::ExportSpecifier || self.resolver.is_referenced_alias_declaration(spec.data.id)
    }

    pub(crate) fn print_import_clause(&mut self, clause: &'a ImportClause<'a>) {
        let strip = self.options.strip_types;
        if clause.is_type_only && !strip {
            self.write_keyword("type");
            self.write_space();
        }
        let name = clause
            .name
            .as_ref()
            .filter(|_| !strip || self.resolver.is_referenced_alias_declaration(clause.data.id));
        let bindings = clause
            .named_bindings
            .as_ref()
            .filter(|bindings| !strip || self.named_bindings_have_value(Some(bindings)));
        if let Some(name) = name {
            self.emit_identifier_name(name);
            if bindings.is_some() {
                self.write_punctuation(",");
                self.write_space();
            }
        }
        if let Some(bindings) = bindings {
            self.pipeline_emit(EmitHint::Unspecified, bindings.as_node());
        }
    }

    pub(crate) fn print_namespace_import(&mut self, ns: &'a NamespaceImport) {
        self.write_punctuation("*");
        self.write_space();
        self.write_keyword("as");
        self.write_space();
        self.emit_identifier_name(&ns.name);
    }

    pub(crate) fn print_named_imports(&mut self, named: &'a NamedImports<'a>) {
        self.write_punctuation("{");
        self.emit_list_filtered(
            Some(&named.data),
            named.elements,
            ListFormat::NAMED_IMPORTS_OR_EXPORTS_ELEMENTS,
            |p, spec| p.is_emitted_import_specifier(spec),
            |p, spec| p.pipeline_emit(EmitHint::Unspecified, NodeRef::ImportSpecifier(spec)),
        );
        self.write_punctuation("}");
    }

    pub(crate) fn print_import_or_export_specifier(&mut self, spec: &'a ImportOrExportSpecifier) {
        if spec.is_type_only && !self.options.strip_types {
            self.write_keyword("type");
            self.write_space();
        }
        if let Some(property_name) = &spec.property_name {
            self.emit_identifier_name(property_name);
            self.write_space();
            self.write_keyword("as");
            self.write_space();
        }
        self.emit_identifier_name(&spec.name);
    }

    fn print_export_declaration(&mut self, node: &'a ExportDeclaration<'a>) {
        self.emit_modifiers(&node.data);
        self.emit_token_with_comment(SyntaxKind::ExportKeyword, node.data.pos(), &node.data, false);
        self.write_space();
        if node.is_type_only && !self.options.strip_types {
            self.write_keyword("type");
            self.write_space();
        }
        match &node.export_clause {
            Some(clause) => self.pipeline_emit(EmitHint::Unspecified, clause.as_node()),
            None => self.write_punctuation("*"),
        }
        if let Some(specifier) = node.module_specifier {
            self.write_space();
            self.write_keyword("from");
            self.write_space();
            self.emit_expression(specifier);
        }
        if let Some(attributes) = &node.attributes {
            self.write_space();
            self.pipeline_emit(EmitHint::Unspecified, NodeRef::ImportAttributes(attributes));
        }
        self.write_trailing_semicolon();
    }

    fn print_import_equals_declaration(&mut self, node: &'a ImportEqualsDeclaration<'a>) {
        self.emit_modifiers(&node.data);
        self.emit_token_with_comment(SyntaxKind::ImportKeyword, node.data.pos(), &node.data, false);
        self.write_space();
        if node.is_type_only && !self.options.strip_types {
            self.write_keyword("type");
            self.write_space();
        }
        self.emit_identifier_name(&node.name);
        self.write_space();
        self.write_operator("=");
        self.write_space();
        match &node.module_reference {
            ModuleReference::ExternalModuleReference(reference) => {
                self.pipeline_emit(EmitHint::Unspecified, NodeRef::ExternalModuleReference(reference));
            }
            ModuleReference::EntityName(name) => self.pipeline_emit(EmitHint::Unspecified, name.as_node()),
        }
        self.write_trailing_semicolon();
    }

    pub(crate) fn print_external_module_reference(&mut self, reference: &'a ExternalModuleReference<'a>) {
        self.write_keyword("require");
        self.write_punctuation("(");
        self.emit_expression(reference.expression);
        self.write_punctuation(")");
    }

    pub(crate) fn print_import_attributes(&mut self, attributes: &'a ImportAttributes<'a>) {
        self.write_token(attributes.token);
        self.write_space();
        let mut format = ListFormat::IMPORT_ATTRIBUTES;
        if attributes.multi_line {
            format |= ListFormat::PREFER_NEW_LINE;
        }
        self.emit_list(Some(&attributes.data), Some(attributes.elements), format, |p, attribute| {
            p.pipeline_emit(EmitHint::Unspecified, NodeRef::ImportAttribute(attribute));
        });
    }

    pub(crate) fn print_import_attribute(&mut self, attribute: &'a ImportAttribute<'a>) {
        match &attribute.name {
            ImportAttributeName::Identifier(id) => self.emit_identifier_name(id),
            ImportAttributeName::StringLiteral(lit) => self.pipeline_emit(EmitHint::Unspecified, NodeRef::StringLiteral(lit)),
        }
        self.write_punctuation(":");
        self.write_space();
        self.emit_expression(attribute.value);
    }

    // ========================================================================
    // Shared pieces
    // ========================================================================

    /// Modifiers in canonical order, each followed by a space. Modifiers
    /// with no meaning at run time are dropped when types are stripped.
    pub(crate) fn emit_modifiers(&mut self, data: &NodeData) {
        let flags = data.modifier_flags;
        if flags.is_empty() {
            return;
        }
        let strip = self.options.strip_types;
        let words = [
            (ModifierFlags::EXPORT, "export", false),
            (ModifierFlags::DEFAULT, "default", false),
            (ModifierFlags::AMBIENT, "declare", true),
            (ModifierFlags::PUBLIC, "public", true),
            (ModifierFlags::PRIVATE, "private", true),
            (ModifierFlags::PROTECTED, "protected", true),
            (ModifierFlags::STATIC, "static", false),
            (ModifierFlags::ABSTRACT, "abstract", true),
            (ModifierFlags::OVERRIDE, "override", true),
            (ModifierFlags::READONLY, "readonly", true),
            (ModifierFlags::ACCESSOR, "accessor", false),
            (ModifierFlags::ASYNC, "async", false),
            (ModifierFlags::CONST, "const", false),
        ];
        for (flag, word, type_only) in words {
            if flags.contains(flag) && !(strip && type_only) {
                self.write_keyword(word);
                self.write_space();
            }
        }
    }

    pub(crate) fn emit_expression(&mut self, expr: &'a Expression<'a>) {
        self.pipeline_emit(EmitHint::Expression, expr.as_node());
    }

    pub(crate) fn emit_expression_with_leading_space(&mut self, expr: Option<&'a Expression<'a>>) {
        if let Some(expr) = expr {
            self.write_space();
            self.emit_expression(expr);
        }
    }

    fn emit_parenthesized(&mut self, expr: &'a Expression<'a>) {
        self.write_punctuation("(");
        self.emit_expression(expr);
        self.write_punctuation(")");
    }

    pub(crate) fn emit_initializer(&mut self, initializer: Option<&'a Expression<'a>>) {
        if let Some(initializer) = initializer {
            self.write_space();
            self.write_operator("=");
            self.write_space();
            self.emit_expression(initializer);
        }
    }

    pub(crate) fn emit_property_name(&mut self, name: &'a PropertyName<'a>) {
        match name {
            PropertyName::Identifier(id) | PropertyName::PrivateIdentifier(id) => self.emit_identifier_name(id),
            _ => self.pipeline_emit(EmitHint::Unspecified, name.as_node()),
        }
    }

    fn emit_embedded_statement(&mut self, parent: &NodeData, stmt: &'a Statement<'a>) {
        if matches!(stmt, Statement::Block(_)) || parent.emit_flags.contains(EmitFlags::SINGLE_LINE) {
            self.write_space();
            self.pipeline_emit(EmitHint::Unspecified, stmt.as_node());
        } else {
            self.write_line();
            self.writer.increase_indent();
            self.pipeline_emit(EmitHint::EmbeddedStatement, stmt.as_node());
            self.writer.decrease_indent();
        }
    }

    fn write_line_or_space(&mut self, parent: &NodeData, previous: &NodeData, next: &NodeData) {
        if self.lines_between_nodes(parent, previous, next) > 0 {
            self.write_line();
        } else {
            self.write_space();
        }
    }

    fn lines_between_nodes(&self, parent: &NodeData, previous: &NodeData, next: &NodeData) -> u32 {
        if parent.emit_flags.contains(EmitFlags::NO_INDENTATION) {
            return 0;
        }
        if next.is_synthesized() && next.emit_flags.contains(EmitFlags::STARTS_ON_NEW_LINE) {
            return 1;
        }
        if self.in_current_file(parent) && self.in_current_file(previous) && self.in_current_file(next) {
            return u32::from(!self.on_same_line(previous.end(), self.start_of(next)));
        }
        0
    }
}
