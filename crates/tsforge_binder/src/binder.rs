//! The binder implementation.
//!
//! Walks one source file and records, in side tables keyed by node id:
//! - the parent of every node
//! - the symbol of every declaration, merged per the declaration-space rules
//! - the locals of every scope-owning container
//! - the flow node in effect at every narrowable reference
//! - end-of-body and return flow nodes of functions
//!
//! Flow lowering lives in `control_flow`, strict-mode checks in
//! `strict_mode` and CommonJS assignment declarations in `js_declarations`.

use crate::bound_file::BoundFile;
use crate::container::{container_flags, ContainerFlags};
use crate::flow::{FlowGraph, FlowLabel, FlowNodeId};
use crate::module_instance::{get_module_instance_state, ModuleInstanceState};
use crate::symbol::{InternalNames, Symbol, SymbolTable, TableRef};
use rustc_hash::{FxHashMap, FxHashSet};
use tsforge_ast::types::{ModifierFlags, NodeFlags, SymbolFlags, SymbolId};
use tsforge_ast::utilities::{
    declaration_name, declaration_name_text, is_ambient_module, is_enum_const, is_parameter_property,
    literal_expression_key, module_name_key,
};
use tsforge_ast::{
    for_each_child, ClassElement, Expression, Identifier, ModuleDeclaration, ModuleName, NamedExportBindings, NodeId,
    NodeRef, ObjectLiteralElement, ParameterDeclaration, SourceFile, Statement, SyntaxKind, TypeElement, TypeNode,
};
use tsforge_core::text::TextSpan;
use tsforge_core::{InternedString, StringInterner};
use tsforge_diagnostics::{messages, Diagnostic, DiagnosticCategory, DiagnosticCollection, DiagnosticMessage};
use tsforge_scanner::skip_trivia;
use tsforge_tsoptions::{CompilerOptions, ScriptTarget};

/// Names the binder compares identifiers against.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WellKnownNames {
    pub eval: InternedString,
    pub arguments: InternedString,
    pub module: InternedString,
    pub exports: InternedString,
    pub require: InternedString,
    pub object: InternedString,
    pub define_property: InternedString,
    pub prototype: InternedString,
}

impl WellKnownNames {
    fn new(interner: &StringInterner) -> Self {
        Self {
            eval: interner.intern_static("eval"),
            arguments: interner.intern_static("arguments"),
            module: interner.intern_static("module"),
            exports: interner.intern_static("exports"),
            require: interner.intern_static("require"),
            object: interner.intern_static("Object"),
            define_property: interner.intern_static("defineProperty"),
            prototype: interner.intern_static("prototype"),
        }
    }
}

/// A label in scope of the statement being bound.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ActiveLabel<'a> {
    pub label: &'a Identifier,
    pub break_target: FlowLabel,
    pub continue_target: Option<FlowLabel>,
    pub referenced: bool,
}

/// Binds one source file.
///
/// A binder is consumed by [`Binder::bind`], so a file is bound once per
/// binder and the results are handed out as a [`BoundFile`].
pub struct Binder<'a, 'o> {
    pub(crate) file: &'a SourceFile<'a>,
    pub(crate) options: &'o CompilerOptions,
    pub(crate) interner: StringInterner,
    pub(crate) names: InternalNames,
    pub(crate) well_known: WellKnownNames,
    pub(crate) language_version: ScriptTarget,

    // Results
    /// All symbols, indexed by `SymbolId`.
    pub(crate) symbols: Vec<Symbol<'a>>,
    /// Locals of containers that own a scope.
    pub(crate) locals: FxHashMap<NodeId, SymbolTable>,
    pub(crate) parents: FxHashMap<NodeId, NodeRef<'a>>,
    /// The symbol a declaration contributes to.
    pub(crate) node_symbols: FxHashMap<NodeId, SymbolId>,
    /// The local half of an exported declaration.
    pub(crate) local_symbols: FxHashMap<NodeId, SymbolId>,
    /// Flow node in effect at references, statements and function expressions.
    pub(crate) flow_nodes: FxHashMap<NodeId, FlowNodeId>,
    /// Flow at the end of function bodies whose end is reachable.
    pub(crate) end_flow: FxHashMap<NodeId, FlowNodeId>,
    /// Flow after every return of constructors, static blocks and JS functions.
    pub(crate) return_flow: FxHashMap<NodeId, FlowNodeId>,
    /// Flow falling out of a case clause into the next one.
    pub(crate) fallthrough_flow: FxHashMap<NodeId, FlowNodeId>,
    /// Flags the binder computes for nodes (implicit return, contains this, ...).
    pub(crate) node_flags: FxHashMap<NodeId, NodeFlags>,
    pub(crate) unreachable: FxHashSet<NodeId>,
    pub(crate) graph: FlowGraph,
    pub(crate) diagnostics: DiagnosticCollection,
    pub(crate) file_symbol: Option<SymbolId>,
    pub(crate) js_global_augmentations: SymbolTable,
    pub(crate) common_js_module_indicator: Option<NodeId>,

    // Walk state
    pub(crate) parent: Option<NodeRef<'a>>,
    pub(crate) container: NodeRef<'a>,
    pub(crate) this_parent_container: Option<NodeRef<'a>>,
    pub(crate) block_scope_container: NodeRef<'a>,
    pub(crate) seen_this_keyword: bool,
    pub(crate) in_strict_mode: bool,
    pub(crate) in_assignment_pattern: bool,
    pub(crate) emit_flags: NodeFlags,

    // Flow state
    pub(crate) current_flow: FlowNodeId,
    pub(crate) current_break_target: Option<FlowLabel>,
    pub(crate) current_continue_target: Option<FlowLabel>,
    pub(crate) current_return_target: Option<FlowLabel>,
    pub(crate) current_true_target: Option<FlowLabel>,
    pub(crate) current_false_target: Option<FlowLabel>,
    pub(crate) current_exception_target: Option<FlowLabel>,
    pub(crate) pre_switch_case_flow: Option<FlowNodeId>,
    /// Innermost label last.
    pub(crate) active_labels: Vec<ActiveLabel<'a>>,
    pub(crate) has_explicit_return: bool,
}

impl<'a, 'o> Binder<'a, 'o> {
    pub fn new(file: &'a SourceFile<'a>, options: &'o CompilerOptions, interner: &StringInterner) -> Self {
        let interner = interner.clone();
        let names = InternalNames::new(&interner);
        let well_known = WellKnownNames::new(&interner);
        let root = NodeRef::SourceFile(file);
        Self {
            file,
            options,
            names,
            well_known,
            language_version: options.get_emit_script_target(),
            interner,
            symbols: Vec::new(),
            locals: FxHashMap::default(),
            parents: FxHashMap::default(),
            node_symbols: FxHashMap::default(),
            local_symbols: FxHashMap::default(),
            flow_nodes: FxHashMap::default(),
            end_flow: FxHashMap::default(),
            return_flow: FxHashMap::default(),
            fallthrough_flow: FxHashMap::default(),
            node_flags: FxHashMap::default(),
            unreachable: FxHashSet::default(),
            graph: FlowGraph::new(),
            diagnostics: DiagnosticCollection::new(),
            file_symbol: None,
            js_global_augmentations: SymbolTable::new(),
            common_js_module_indicator: None,
            parent: None,
            container: root,
            this_parent_container: None,
            block_scope_container: root,
            seen_this_keyword: false,
            in_strict_mode: false,
            in_assignment_pattern: false,
            emit_flags: NodeFlags::empty(),
            current_flow: FlowNodeId::UNREACHABLE,
            current_break_target: None,
            current_continue_target: None,
            current_return_target: None,
            current_true_target: None,
            current_false_target: None,
            current_exception_target: None,
            pre_switch_case_flow: None,
            active_labels: Vec::new(),
            has_explicit_return: false,
        }
    }

    /// Bind the whole file.
    pub fn bind(mut self) -> BoundFile<'a> {
        self.in_strict_mode = (self.options.get_strict_option_value() && !self.file.is_declaration_file)
            || self.file.is_external_module();
        self.bind_node(NodeRef::SourceFile(self.file));
        assert!(self.active_labels.is_empty(), "label scope leaked out of the source file");
        BoundFile::from_binder(self)
    }

    // ========================================================================
    // Walk
    // ========================================================================

    pub(crate) fn bind_node(&mut self, node: NodeRef<'a>) {
        if let Some(parent) = self.parent {
            self.parents.insert(node.id(), parent);
        }
        let save_in_strict_mode = self.in_strict_mode;

        self.bind_worker(node);

        let save_parent = self.parent.replace(node);
        let flags = container_flags(node, save_parent);
        if flags.is_empty() {
            self.bind_children(node);
        } else {
            self.bind_container(node, flags);
        }
        self.parent = save_parent;
        self.in_strict_mode = save_in_strict_mode;
    }

    pub(crate) fn bind_each_child(&mut self, node: NodeRef<'a>) {
        for_each_child(node, |child| self.bind_node(child));
    }

    pub(crate) fn bind_statements(&mut self, statements: &'a [Statement<'a>]) {
        for statement in statements {
            self.bind_node(NodeRef::Statement(statement));
        }
    }

    /// Function declarations are hoisted: bind them before the other
    /// statements of the list.
    pub(crate) fn bind_each_functions_first(&mut self, statements: &'a [Statement<'a>]) {
        for statement in statements {
            if matches!(statement, Statement::FunctionDeclaration(_)) {
                self.bind_node(NodeRef::Statement(statement));
            }
        }
        for statement in statements {
            if !matches!(statement, Statement::FunctionDeclaration(_)) {
                self.bind_node(NodeRef::Statement(statement));
            }
        }
    }

    fn bind_container(&mut self, node: NodeRef<'a>, flags: ContainerFlags) {
        let save_container = self.container;
        let save_this_parent_container = self.this_parent_container;
        let save_block_scope_container = self.block_scope_container;

        if flags.contains(ContainerFlags::IS_CONTAINER) {
            if !matches!(node, NodeRef::Expression(Expression::ArrowFunction(_))) {
                self.this_parent_container = Some(self.container);
            }
            self.container = node;
            self.block_scope_container = node;
            if flags.contains(ContainerFlags::HAS_LOCALS) {
                self.locals.insert(node.id(), SymbolTable::new());
            }
        } else if flags.contains(ContainerFlags::IS_BLOCK_SCOPED_CONTAINER) {
            self.block_scope_container = node;
            // Created on the first block-scoped declaration.
            self.locals.remove(&node.id());
        }

        if flags.contains(ContainerFlags::IS_CONTROL_FLOW_CONTAINER) {
            self.bind_control_flow_container(node, flags);
        } else if flags.contains(ContainerFlags::IS_INTERFACE) {
            let save_seen_this_keyword = self.seen_this_keyword;
            self.seen_this_keyword = false;
            self.bind_children(node);
            if self.seen_this_keyword {
                self.add_node_flags(node, NodeFlags::CONTAINS_THIS);
            }
            self.seen_this_keyword = save_seen_this_keyword;
        } else {
            self.bind_children(node);
        }

        self.container = save_container;
        self.this_parent_container = save_this_parent_container;
        self.block_scope_container = save_block_scope_container;
    }

    fn bind_control_flow_container(&mut self, node: NodeRef<'a>, flags: ContainerFlags) {
        let save_current_flow = self.current_flow;
        let save_break_target = self.current_break_target;
        let save_continue_target = self.current_continue_target;
        let save_return_target = self.current_return_target;
        let save_exception_target = self.current_exception_target;
        let save_active_labels = std::mem::take(&mut self.active_labels);
        let save_has_explicit_return = self.has_explicit_return;

        let is_static_block = matches!(node, NodeRef::ClassElement(ClassElement::ClassStaticBlockDeclaration(_)));
        let is_iife = is_static_block
            || (flags.contains(ContainerFlags::IS_FUNCTION_EXPRESSION)
                && !node.data().has_modifier(ModifierFlags::ASYNC)
                && !is_generator(node)
                && self.is_immediately_invoked(node));

        // An immediately invoked function continues the flow of its caller.
        if !is_iife {
            let flow_container = flags.intersects(
                ContainerFlags::IS_FUNCTION_EXPRESSION
                    | ContainerFlags::IS_OBJECT_LITERAL_OR_CLASS_EXPRESSION_METHOD_OR_ACCESSOR,
            );
            self.current_flow = self.graph.create_start(flow_container.then(|| node.id()));
        }

        let is_constructor = matches!(node, NodeRef::ClassElement(ClassElement::Constructor(_)));
        let is_js_function = self.file.is_js_file()
            && matches!(
                node,
                NodeRef::Statement(Statement::FunctionDeclaration(_))
                    | NodeRef::Expression(Expression::FunctionExpression(_))
            );
        self.current_return_target =
            (is_iife || is_constructor || is_js_function).then(|| self.graph.create_branch_label());
        self.current_exception_target = None;
        self.current_break_target = None;
        self.current_continue_target = None;
        self.has_explicit_return = false;

        self.bind_children(node);

        let mut node_flags = self.node_flags_of(node) & !NodeFlags::REACHABILITY_CHECK_FLAGS;
        if !self.current_flow.is_unreachable()
            && flags.contains(ContainerFlags::IS_FUNCTION_LIKE)
            && function_has_body(node)
        {
            node_flags |= NodeFlags::HAS_IMPLICIT_RETURN;
            if self.has_explicit_return {
                node_flags |= NodeFlags::HAS_EXPLICIT_RETURN;
            }
            self.end_flow.insert(node.id(), self.current_flow);
        }
        if let NodeRef::SourceFile(_) = node {
            node_flags |= self.emit_flags;
            self.end_flow.insert(node.id(), self.current_flow);
        }
        self.set_node_flags(node, node_flags);

        if let Some(return_target) = self.current_return_target {
            self.graph.add_antecedent(return_target, self.current_flow);
            self.current_flow = self.graph.finish_flow_label(return_target);
            if is_constructor || is_static_block || is_js_function {
                self.return_flow.insert(node.id(), self.current_flow);
            }
        }
        if !is_iife {
            self.current_flow = save_current_flow;
        }

        self.current_break_target = save_break_target;
        self.current_continue_target = save_continue_target;
        self.current_return_target = save_return_target;
        self.current_exception_target = save_exception_target;
        self.active_labels = save_active_labels;
        self.has_explicit_return = save_has_explicit_return;
    }

    /// A function expression called right where it is written, possibly
    /// through parentheses: `(function () {})()`.
    fn is_immediately_invoked(&self, node: NodeRef<'a>) -> bool {
        let mut callee = node;
        let mut parent = self.parent_of(node);
        while let Some(p @ NodeRef::Expression(Expression::Parenthesized(_))) = parent {
            callee = p;
            parent = self.parent_of(p);
        }
        match parent {
            Some(NodeRef::Expression(Expression::Call(call))) => {
                NodeRef::Expression(call.expression).same_node(&callee)
            }
            _ => false,
        }
    }

    // ========================================================================
    // Symbol actions
    // ========================================================================

    fn bind_worker(&mut self, node: NodeRef<'a>) {
        match node {
            NodeRef::SourceFile(file) => {
                self.update_strict_mode_statement_list(file.statements);
                self.bind_source_file_if_external_module();
            }
            NodeRef::Identifier(id) => {
                if matches!(
                    self.parent,
                    Some(NodeRef::ObjectLiteralElement(ObjectLiteralElement::ShorthandPropertyAssignment(_)))
                ) {
                    self.flow_nodes.insert(node.id(), self.current_flow);
                }
                self.check_contextual_identifier(node, id);
            }
            NodeRef::Expression(expr) => self.bind_expression_worker(node, expr),
            NodeRef::Statement(stmt) => self.bind_statement_worker(node, stmt),
            NodeRef::NumericLiteral(_) => self.check_strict_mode_numeric_literal(node),
            NodeRef::TypeNode(ty) => match ty {
                TypeNode::ThisType(_) => self.seen_this_keyword = true,
                TypeNode::FunctionType(_) | TypeNode::ConstructorType(_) => self.bind_function_or_constructor_type(node),
                TypeNode::TypeLiteral(_) | TypeNode::MappedType(_) => {
                    self.bind_anonymous_declaration(node, SymbolFlags::TYPE_LITERAL, self.names.type_literal);
                }
                _ => {}
            },
            NodeRef::TypeParameter(_) => self.bind_type_parameter(node),
            NodeRef::Parameter(param) => self.bind_parameter(node, param),
            NodeRef::VariableDeclaration(_) => self.bind_variable_declaration_or_binding_element(node),
            NodeRef::BindingElement(_) => {
                self.flow_nodes.insert(node.id(), self.current_flow);
                self.bind_variable_declaration_or_binding_element(node);
            }
            NodeRef::ClassElement(element) => self.bind_class_element(node, element),
            NodeRef::TypeElement(element) => match element {
                TypeElement::PropertySignature(p) => {
                    let optional = optional_flag(p.question_token.is_some());
                    self.bind_property_or_method_or_accessor(
                        node,
                        SymbolFlags::PROPERTY | optional,
                        SymbolFlags::PROPERTY_EXCLUDES,
                    );
                }
                TypeElement::MethodSignature(m) => {
                    let optional = optional_flag(m.question_token.is_some());
                    self.bind_property_or_method_or_accessor(
                        node,
                        SymbolFlags::METHOD | optional,
                        SymbolFlags::METHOD_EXCLUDES,
                    );
                }
                TypeElement::CallSignature(_) | TypeElement::ConstructSignature(_) | TypeElement::IndexSignature(_) => {
                    self.declare_symbol_and_add_to_symbol_table(node, SymbolFlags::SIGNATURE, SymbolFlags::empty());
                }
            },
            NodeRef::ObjectLiteralElement(element) => match element {
                ObjectLiteralElement::PropertyAssignment(_) | ObjectLiteralElement::ShorthandPropertyAssignment(_) => {
                    self.bind_property_or_method_or_accessor(node, SymbolFlags::PROPERTY, SymbolFlags::PROPERTY_EXCLUDES);
                }
                ObjectLiteralElement::MethodDeclaration(m) => {
                    let optional = optional_flag(m.question_token.is_some());
                    self.bind_property_or_method_or_accessor(
                        node,
                        SymbolFlags::METHOD | optional,
                        SymbolFlags::PROPERTY_EXCLUDES,
                    );
                }
                ObjectLiteralElement::GetAccessor(_) => {
                    self.bind_property_or_method_or_accessor(
                        node,
                        SymbolFlags::GET_ACCESSOR,
                        SymbolFlags::GET_ACCESSOR_EXCLUDES,
                    );
                }
                ObjectLiteralElement::SetAccessor(_) => {
                    self.bind_property_or_method_or_accessor(
                        node,
                        SymbolFlags::SET_ACCESSOR,
                        SymbolFlags::SET_ACCESSOR_EXCLUDES,
                    );
                }
                ObjectLiteralElement::SpreadAssignment(_) => {}
            },
            NodeRef::EnumMember(_) => {
                self.bind_property_or_method_or_accessor(
                    node,
                    SymbolFlags::ENUM_MEMBER,
                    SymbolFlags::ENUM_MEMBER_EXCLUDES,
                );
            }
            NodeRef::CatchClause(clause) => self.check_strict_mode_catch_clause(clause),
            NodeRef::ModuleDeclaration(decl) => self.bind_module_declaration(node, decl),
            NodeRef::ModuleBlock(block) => self.update_strict_mode_statement_list(block.statements),
            NodeRef::Block(block) => {
                let in_function_body = self.parent.is_some_and(|p| {
                    p.is_function_like()
                        || matches!(p, NodeRef::ClassElement(ClassElement::ClassStaticBlockDeclaration(_)))
                });
                if in_function_body {
                    self.update_strict_mode_statement_list(block.statements);
                }
            }
            NodeRef::ImportClause(clause) => {
                if clause.name.is_some() {
                    self.declare_symbol_and_add_to_symbol_table(node, SymbolFlags::ALIAS, SymbolFlags::ALIAS_EXCLUDES);
                }
            }
            NodeRef::NamespaceImport(_) if node.kind() == SyntaxKind::NamespaceImport => {
                self.declare_symbol_and_add_to_symbol_table(node, SymbolFlags::ALIAS, SymbolFlags::ALIAS_EXCLUDES);
            }
            NodeRef::ImportSpecifier(_) => {
                self.declare_symbol_and_add_to_symbol_table(node, SymbolFlags::ALIAS, SymbolFlags::ALIAS_EXCLUDES);
            }
            _ => {}
        }
    }

    fn bind_expression_worker(&mut self, node: NodeRef<'a>, expr: &'a Expression<'a>) {
        match expr {
            Expression::Identifier(id) => {
                self.flow_nodes.insert(node.id(), self.current_flow);
                self.check_contextual_identifier(node, id);
            }
            Expression::Keyword(token)
                if matches!(token.kind(), SyntaxKind::ThisKeyword | SyntaxKind::SuperKeyword) =>
            {
                self.flow_nodes.insert(node.id(), self.current_flow);
            }
            Expression::MetaProperty(_) => {
                self.flow_nodes.insert(node.id(), self.current_flow);
            }
            Expression::PropertyAccess(_) | Expression::ElementAccess(_) => {
                if crate::narrowing::is_narrowable_reference(expr) {
                    self.flow_nodes.insert(node.id(), self.current_flow);
                }
                self.bind_module_exports_reference(expr);
            }
            Expression::Binary(binary) => {
                self.bind_assignment_declaration(node, binary);
                self.check_strict_mode_binary_expression(binary);
            }
            Expression::Delete(delete) => self.check_strict_mode_delete_expression(delete.expression),
            Expression::NumericLiteral(_) => self.check_strict_mode_numeric_literal(node),
            Expression::PostfixUnary(postfix) => {
                self.check_strict_mode_update_operand(node, postfix.operator, postfix.operand);
            }
            Expression::PrefixUnary(prefix) => {
                self.check_strict_mode_update_operand(node, prefix.operator, prefix.operand);
            }
            Expression::ObjectLiteral(_) => self.bind_object_literal_expression(node, expr),
            Expression::FunctionExpression(_) | Expression::ArrowFunction(_) => {
                self.bind_function_expression(node, expr);
            }
            Expression::Call(call) => self.bind_call_expression(node, call),
            Expression::ClassExpression(_) => {
                self.in_strict_mode = true;
                self.bind_class_like_declaration(node);
            }
            _ => {}
        }
    }

    fn bind_statement_worker(&mut self, node: NodeRef<'a>, stmt: &'a Statement<'a>) {
        match stmt {
            Statement::FunctionDeclaration(_) => self.bind_function_declaration(node),
            Statement::ClassDeclaration(_) => {
                self.in_strict_mode = true;
                self.bind_class_like_declaration(node);
            }
            Statement::InterfaceDeclaration(_) => {
                self.bind_block_scoped_declaration(node, SymbolFlags::INTERFACE, SymbolFlags::INTERFACE_EXCLUDES);
            }
            Statement::TypeAliasDeclaration(_) => {
                self.bind_block_scoped_declaration(node, SymbolFlags::TYPE_ALIAS, SymbolFlags::TYPE_ALIAS_EXCLUDES);
            }
            Statement::EnumDeclaration(decl) => {
                if is_enum_const(decl) {
                    self.bind_block_scoped_declaration(node, SymbolFlags::CONST_ENUM, SymbolFlags::CONST_ENUM_EXCLUDES);
                } else {
                    self.bind_block_scoped_declaration(
                        node,
                        SymbolFlags::REGULAR_ENUM,
                        SymbolFlags::REGULAR_ENUM_EXCLUDES,
                    );
                }
            }
            Statement::ModuleDeclaration(decl) => self.bind_module_declaration(node, decl),
            Statement::ImportEqualsDeclaration(_) => {
                self.declare_symbol_and_add_to_symbol_table(node, SymbolFlags::ALIAS, SymbolFlags::ALIAS_EXCLUDES);
            }
            Statement::NamespaceExportDeclaration(_) => self.bind_namespace_export_declaration(node),
            Statement::ExportDeclaration(_) => self.bind_export_declaration(node, stmt),
            Statement::ExportAssignment(assignment) => {
                self.bind_export_assignment(node, assignment.is_export_equals, assignment.expression);
            }
            Statement::WithStatement(_) => self.check_strict_mode_with_statement(node),
            _ => {}
        }
    }

    fn bind_source_file_if_external_module(&mut self) {
        let root = NodeRef::SourceFile(self.file);
        let ambient = self.file.is_declaration_file;
        self.set_export_context_flag(root, ambient, Some(self.file.statements));
        if self.file.is_external_module() {
            self.bind_source_file_as_external_module();
        }
    }

    /// The file symbol of an ES or CommonJS module.
    pub(crate) fn bind_source_file_as_external_module(&mut self) {
        if self.file_symbol.is_some() {
            return;
        }
        let base = tsforge_tspath::remove_file_extension(&self.file.file_name);
        let name = self.interner.intern(&format!("\"{base}\""));
        let symbol = self.bind_anonymous_declaration(NodeRef::SourceFile(self.file), SymbolFlags::VALUE_MODULE, name);
        self.file_symbol = Some(symbol);
    }

    /// An ambient module or declaration file without export declarations
    /// implicitly exports everything it declares.
    fn set_export_context_flag(&mut self, node: NodeRef<'a>, ambient: bool, body: Option<&'a [Statement<'a>]>) {
        let has_export_declarations = body.is_some_and(|statements| {
            statements
                .iter()
                .any(|s| matches!(s, Statement::ExportDeclaration(_) | Statement::ExportAssignment(_)))
        });
        let mut flags = self.node_flags_of(node);
        flags.set(NodeFlags::EXPORT_CONTEXT, ambient && !has_export_declarations);
        self.set_node_flags(node, flags);
    }

    fn bind_function_declaration(&mut self, node: NodeRef<'a>) {
        if !self.file.is_declaration_file && !self.is_ambient(node) && node.data().has_modifier(ModifierFlags::ASYNC) {
            self.emit_flags |= NodeFlags::HAS_ASYNC_FUNCTIONS;
        }
        self.check_strict_mode_function_name(node);
        self.check_block_scoped_function_declaration(node);
        if self.in_strict_mode {
            self.bind_block_scoped_declaration(node, SymbolFlags::FUNCTION, SymbolFlags::FUNCTION_EXCLUDES);
        } else {
            self.declare_symbol_and_add_to_symbol_table(node, SymbolFlags::FUNCTION, SymbolFlags::FUNCTION_EXCLUDES);
        }
    }

    fn bind_function_expression(&mut self, node: NodeRef<'a>, expr: &'a Expression<'a>) {
        if !self.file.is_declaration_file && !self.is_ambient(node) && node.data().has_modifier(ModifierFlags::ASYNC) {
            self.emit_flags |= NodeFlags::HAS_ASYNC_FUNCTIONS;
        }
        self.flow_nodes.insert(node.id(), self.current_flow);
        self.check_strict_mode_function_name(node);
        let name = match expr {
            Expression::FunctionExpression(f) => f.name.as_ref().map(|n| n.escaped_text),
            _ => None,
        };
        self.bind_anonymous_declaration(node, SymbolFlags::FUNCTION, name.unwrap_or(self.names.function));
    }

    fn bind_class_like_declaration(&mut self, node: NodeRef<'a>) {
        let symbol = match node {
            NodeRef::Statement(_) => {
                self.bind_block_scoped_declaration(node, SymbolFlags::CLASS, SymbolFlags::CLASS_EXCLUDES)
            }
            _ => {
                let name = declaration_name(node).and_then(|n| n.as_identifier()).map(|id| id.escaped_text);
                Some(self.bind_anonymous_declaration(node, SymbolFlags::CLASS, name.unwrap_or(self.names.class)))
            }
        };
        let Some(symbol) = self.node_symbols.get(&node.id()).copied().or(symbol) else {
            return;
        };

        // Every class has a static `prototype` property.
        let prototype = self.create_symbol(SymbolFlags::PROPERTY | SymbolFlags::PROTOTYPE, self.names.prototype);
        let existing = self.symbols[symbol.index()].exports.as_ref().and_then(|e| e.get(&self.names.prototype));
        if let Some(existing) = existing {
            if let Some(&declaration) = self.symbols[existing.index()].declarations.first() {
                let diagnostic = self.diagnostic_at(declaration, &messages::DUPLICATE_IDENTIFIER_0, &["prototype"]);
                self.diagnostics.add(diagnostic);
            }
        }
        let name = self.names.prototype;
        self.table_mut(TableRef::Exports(symbol)).set(name, prototype);
        self.symbols[prototype.index()].parent = Some(symbol);
    }

    fn bind_class_element(&mut self, node: NodeRef<'a>, element: &'a ClassElement<'a>) {
        match element {
            ClassElement::PropertyDeclaration(p) => {
                let optional = optional_flag(p.question_token.is_some());
                if node.data().has_modifier(ModifierFlags::ACCESSOR) {
                    self.bind_property_or_method_or_accessor(node, SymbolFlags::ACCESSOR | optional, SymbolFlags::VALUE);
                } else {
                    self.bind_property_or_method_or_accessor(
                        node,
                        SymbolFlags::PROPERTY | optional,
                        SymbolFlags::PROPERTY_EXCLUDES,
                    );
                }
            }
            ClassElement::MethodDeclaration(m) => {
                let optional = optional_flag(m.question_token.is_some());
                self.bind_property_or_method_or_accessor(node, SymbolFlags::METHOD | optional, SymbolFlags::METHOD_EXCLUDES);
            }
            ClassElement::Constructor(_) => {
                self.declare_symbol_and_add_to_symbol_table(node, SymbolFlags::CONSTRUCTOR, SymbolFlags::empty());
            }
            ClassElement::GetAccessor(_) => {
                self.bind_property_or_method_or_accessor(
                    node,
                    SymbolFlags::GET_ACCESSOR,
                    SymbolFlags::GET_ACCESSOR_EXCLUDES,
                );
            }
            ClassElement::SetAccessor(_) => {
                self.bind_property_or_method_or_accessor(
                    node,
                    SymbolFlags::SET_ACCESSOR,
                    SymbolFlags::SET_ACCESSOR_EXCLUDES,
                );
            }
            ClassElement::IndexSignature(_) => {
                self.declare_symbol_and_add_to_symbol_table(node, SymbolFlags::SIGNATURE, SymbolFlags::empty());
            }
            ClassElement::ClassStaticBlockDeclaration(_) | ClassElement::SemicolonClassElement(_) => {}
        }
    }

    fn bind_property_or_method_or_accessor(&mut self, node: NodeRef<'a>, includes: SymbolFlags, excludes: SymbolFlags) {
        if !self.file.is_declaration_file && !self.is_ambient(node) && node.data().has_modifier(ModifierFlags::ASYNC) {
            self.emit_flags |= NodeFlags::HAS_ASYNC_FUNCTIONS;
        }
        if container_flags(node, self.parent)
            .contains(ContainerFlags::IS_OBJECT_LITERAL_OR_CLASS_EXPRESSION_METHOD_OR_ACCESSOR)
        {
            self.flow_nodes.insert(node.id(), self.current_flow);
        }
        if has_dynamic_name(node) {
            self.bind_anonymous_declaration(node, includes, self.names.computed);
        } else {
            self.declare_symbol_and_add_to_symbol_table(node, includes, excludes);
        }
    }

    /// `(a: T) => U` gets a `__type` symbol whose only member is the call
    /// or construct signature.
    fn bind_function_or_constructor_type(&mut self, node: NodeRef<'a>) {
        let signature_name = match node {
            NodeRef::TypeNode(TypeNode::ConstructorType(_)) => self.names.new,
            _ => self.names.call,
        };
        let signature = self.create_symbol(SymbolFlags::SIGNATURE, signature_name);
        self.add_declaration_to_symbol(signature, node, SymbolFlags::SIGNATURE);
        let type_literal = self.create_symbol(SymbolFlags::TYPE_LITERAL, self.names.type_literal);
        self.add_declaration_to_symbol(type_literal, node, SymbolFlags::TYPE_LITERAL);
        self.table_mut(TableRef::Members(type_literal)).set(signature_name, signature);
    }

    fn bind_object_literal_expression(&mut self, node: NodeRef<'a>, expr: &'a Expression<'a>) {
        if self.in_strict_mode && !self.is_assignment_target(expr) {
            self.check_duplicate_object_literal_properties(expr);
        }
        self.bind_anonymous_declaration(node, SymbolFlags::OBJECT_LITERAL, self.names.object);
    }

    fn bind_type_parameter(&mut self, node: NodeRef<'a>) {
        if let Some(NodeRef::TypeNode(TypeNode::InferType(_))) = self.parent {
            // `infer T` declares into the enclosing conditional type.
            let conditional = self.ancestors(node).find(|a| matches!(a, NodeRef::TypeNode(TypeNode::ConditionalType(_))));
            match conditional {
                Some(conditional) => {
                    self.declare_symbol(
                        TableRef::Locals(conditional.id()),
                        None,
                        node,
                        SymbolFlags::TYPE_PARAMETER,
                        SymbolFlags::TYPE_PARAMETER_EXCLUDES,
                        false,
                        false,
                    );
                }
                None => {
                    let name = self.declaration_symbol_name(node).unwrap_or(self.names.missing);
                    self.bind_anonymous_declaration(node, SymbolFlags::TYPE_PARAMETER, name);
                }
            }
        } else {
            self.declare_symbol_and_add_to_symbol_table(
                node,
                SymbolFlags::TYPE_PARAMETER,
                SymbolFlags::TYPE_PARAMETER_EXCLUDES,
            );
        }
    }

    fn bind_parameter(&mut self, node: NodeRef<'a>, param: &'a ParameterDeclaration<'a>) {
        if self.in_strict_mode && !self.is_ambient(node) {
            self.check_strict_mode_eval_or_arguments(node, Some(param.name.as_node()));
        }
        if param.name.is_binding_pattern() {
            let index = self
                .parent
                .map(function_parameters)
                .and_then(|params| params.iter().position(|p| std::ptr::eq(p, param)))
                .unwrap_or(0);
            let name = self.interner.intern(&format!("__{index}"));
            self.bind_anonymous_declaration(node, SymbolFlags::FUNCTION_SCOPED_VARIABLE, name);
        } else {
            self.declare_symbol_and_add_to_symbol_table(
                node,
                SymbolFlags::FUNCTION_SCOPED_VARIABLE,
                SymbolFlags::PARAMETER_EXCLUDES,
            );
        }

        // A parameter property also declares a property of the class.
        if let Some(constructor @ NodeRef::ClassElement(ClassElement::Constructor(_))) = self.parent {
            if is_parameter_property(param) {
                let class_symbol = self.parent_of(constructor).and_then(|c| self.node_symbols.get(&c.id()).copied());
                if let Some(class_symbol) = class_symbol {
                    let includes = SymbolFlags::PROPERTY | optional_flag(param.question_token.is_some());
                    self.declare_symbol(
                        TableRef::Members(class_symbol),
                        Some(class_symbol),
                        node,
                        includes,
                        SymbolFlags::PROPERTY_EXCLUDES,
                        false,
                        false,
                    );
                }
            }
        }
    }

    fn bind_variable_declaration_or_binding_element(&mut self, node: NodeRef<'a>) {
        let Some(name) = declaration_name(node) else {
            return;
        };
        // Catch variables are checked with their clause.
        if self.in_strict_mode && !self.is_catch_variable(node) {
            self.check_strict_mode_eval_or_arguments(node, Some(name));
        }
        if matches!(name, NodeRef::ObjectBindingPattern(_) | NodeRef::ArrayBindingPattern(_)) {
            return;
        }
        let root = self.root_declaration(node);
        let (node_flags, modifiers) = self.combined_flags(node);
        if self.file.is_js_file() && self.is_require_variable(root) && !modifiers.contains(ModifierFlags::EXPORT) {
            self.declare_symbol_and_add_to_symbol_table(node, SymbolFlags::ALIAS, SymbolFlags::ALIAS_EXCLUDES);
        } else if node_flags.intersects(NodeFlags::BLOCK_SCOPED) || self.is_catch_variable(node) {
            self.bind_block_scoped_declaration(
                node,
                SymbolFlags::BLOCK_SCOPED_VARIABLE,
                SymbolFlags::BLOCK_SCOPED_VARIABLE_EXCLUDES,
            );
        } else if matches!(root, NodeRef::Parameter(_)) {
            // `function f([a, a]) {}` reports the duplicate like two parameters.
            self.declare_symbol_and_add_to_symbol_table(
                node,
                SymbolFlags::FUNCTION_SCOPED_VARIABLE,
                SymbolFlags::PARAMETER_EXCLUDES,
            );
        } else {
            self.declare_symbol_and_add_to_symbol_table(
                node,
                SymbolFlags::FUNCTION_SCOPED_VARIABLE,
                SymbolFlags::FUNCTION_SCOPED_VARIABLE_EXCLUDES,
            );
        }
    }

    fn bind_module_declaration(&mut self, node: NodeRef<'a>, decl: &'a ModuleDeclaration<'a>) {
        let ambient = self.is_ambient(node);
        let body = match &decl.body {
            Some(tsforge_ast::ModuleBody::ModuleBlock(block)) => Some(block.statements),
            _ => None,
        };
        self.set_export_context_flag(node, ambient, body);

        if is_ambient_module(decl) {
            let augments_external_module =
                self.file.is_external_module() && matches!(decl.name, ModuleName::StringLiteral(_));
            if augments_external_module {
                self.declare_module_symbol(node, decl);
            } else {
                self.declare_symbol_and_add_to_symbol_table(
                    node,
                    SymbolFlags::VALUE_MODULE,
                    SymbolFlags::VALUE_MODULE_EXCLUDES,
                );
            }
            return;
        }

        let state = self.declare_module_symbol(node, decl);
        if state == ModuleInstanceState::NonInstantiated {
            return;
        }
        let Some(&symbol) = self.node_symbols.get(&node.id()) else {
            return;
        };
        let preserve = self.options.should_preserve_const_enums();
        let symbol = &mut self.symbols[symbol.index()];
        // A namespace merged with a function, class or regular enum is never
        // const-enum-only, and neither is one that was instantiated before.
        symbol.const_enum_only_module = Some(
            !symbol.has_flags(SymbolFlags::FUNCTION | SymbolFlags::CLASS | SymbolFlags::REGULAR_ENUM)
                && state == ModuleInstanceState::ConstEnumOnly
                && !preserve
                && symbol.const_enum_only_module != Some(false),
        );
    }

    fn declare_module_symbol(&mut self, node: NodeRef<'a>, decl: &'a ModuleDeclaration<'a>) -> ModuleInstanceState {
        let state = get_module_instance_state(decl);
        if state == ModuleInstanceState::NonInstantiated {
            self.declare_symbol_and_add_to_symbol_table(
                node,
                SymbolFlags::NAMESPACE_MODULE,
                SymbolFlags::NAMESPACE_MODULE_EXCLUDES,
            );
        } else {
            self.declare_symbol_and_add_to_symbol_table(
                node,
                SymbolFlags::VALUE_MODULE,
                SymbolFlags::VALUE_MODULE_EXCLUDES,
            );
        }
        state
    }

    fn bind_export_declaration(&mut self, node: NodeRef<'a>, stmt: &'a Statement<'a>) {
        let Statement::ExportDeclaration(export) = stmt else {
            return;
        };
        let Some(container_symbol) = self.container_symbol_with_exports() else {
            // `export *` inside some block construct.
            self.bind_anonymous_declaration(node, SymbolFlags::EXPORT_STAR, self.names.export_star);
            return;
        };
        match &export.export_clause {
            None => {
                self.declare_symbol(
                    TableRef::Exports(container_symbol),
                    Some(container_symbol),
                    node,
                    SymbolFlags::EXPORT_STAR,
                    SymbolFlags::empty(),
                    false,
                    false,
                );
            }
            Some(NamedExportBindings::NamespaceExport(namespace)) => {
                let clause = NodeRef::NamespaceImport(namespace);
                self.parents.insert(clause.id(), node);
                self.declare_symbol(
                    TableRef::Exports(container_symbol),
                    Some(container_symbol),
                    clause,
                    SymbolFlags::ALIAS,
                    SymbolFlags::ALIAS_EXCLUDES,
                    false,
                    false,
                );
            }
            Some(NamedExportBindings::NamedExports(_)) => {}
        }
    }

    fn bind_export_assignment(&mut self, node: NodeRef<'a>, is_export_equals: bool, expression: &'a Expression<'a>) {
        let Some(container_symbol) = self.container_symbol_with_exports() else {
            let name = self.declaration_symbol_name(node).unwrap_or(self.names.default);
            self.bind_anonymous_declaration(node, SymbolFlags::VALUE, name);
            return;
        };
        let flags = if is_aliasable_expression(expression) { SymbolFlags::ALIAS } else { SymbolFlags::PROPERTY };
        // After `export default x;` nothing else can be the default export.
        let symbol = self.declare_symbol(
            TableRef::Exports(container_symbol),
            Some(container_symbol),
            node,
            flags,
            SymbolFlags::all(),
            false,
            false,
        );
        if is_export_equals {
            self.set_value_declaration(symbol, node);
        }
    }

    /// `export as namespace X;` in a module declaration file.
    fn bind_namespace_export_declaration(&mut self, node: NodeRef<'a>) {
        let at_top_level = matches!(self.parent, Some(NodeRef::SourceFile(_)));
        if !at_top_level || !self.file.is_external_module() || !self.file.is_declaration_file {
            return;
        }
        if let Some(file_symbol) = self.file_symbol {
            self.declare_symbol(
                TableRef::GlobalExports(file_symbol),
                Some(file_symbol),
                node,
                SymbolFlags::ALIAS,
                SymbolFlags::ALIAS_EXCLUDES,
                false,
                false,
            );
        }
    }

    // ========================================================================
    // Declaring symbols
    // ========================================================================

    pub(crate) fn create_symbol(&mut self, flags: SymbolFlags, name: InternedString) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol::new(id, name, flags));
        id
    }

    pub(crate) fn table(&self, table: TableRef) -> Option<&SymbolTable> {
        match table {
            TableRef::Locals(node) => self.locals.get(&node),
            TableRef::Exports(symbol) => self.symbols[symbol.index()].exports.as_ref(),
            TableRef::Members(symbol) => self.symbols[symbol.index()].members.as_ref(),
            TableRef::GlobalExports(symbol) => self.symbols[symbol.index()].global_exports.as_ref(),
            TableRef::JsGlobalAugmentations => Some(&self.js_global_augmentations),
        }
    }

    /// The table, created empty if its owner has none yet.
    pub(crate) fn table_mut(&mut self, table: TableRef) -> &mut SymbolTable {
        match table {
            TableRef::Locals(node) => self.locals.entry(node).or_default(),
            TableRef::Exports(symbol) => self.symbols[symbol.index()].exports.get_or_insert_with(SymbolTable::new),
            TableRef::Members(symbol) => self.symbols[symbol.index()].members.get_or_insert_with(SymbolTable::new),
            TableRef::GlobalExports(symbol) => {
                self.symbols[symbol.index()].global_exports.get_or_insert_with(SymbolTable::new)
            }
            TableRef::JsGlobalAugmentations => &mut self.js_global_augmentations,
        }
    }

    /// Declare `node` in `table`.
    ///
    /// An existing symbol of the same name absorbs the declaration unless its
    /// flags intersect `excludes`. On such a conflict every declaration,
    /// old and new, gets a diagnostic and the table entry is replaced by a
    /// fresh symbol holding only the new declaration.
    #[allow(clippy::too_many_arguments)]
    pub fn declare_symbol(
        &mut self,
        table: TableRef,
        parent: Option<SymbolId>,
        node: NodeRef<'a>,
        includes: SymbolFlags,
        excludes: SymbolFlags,
        is_replaceable_by_method: bool,
        is_computed_name: bool,
    ) -> SymbolId {
        let is_default_export = self.is_default_export(node);
        let name = if is_computed_name {
            Some(self.names.computed)
        } else if is_default_export && parent.is_some() {
            Some(self.names.default)
        } else {
            self.declaration_symbol_name(node)
        };

        let symbol = match name {
            None => self.create_symbol(SymbolFlags::empty(), self.names.missing),
            Some(name) => match self.table(table).and_then(|t| t.get(&name)) {
                None => {
                    let symbol = self.create_symbol(SymbolFlags::empty(), name);
                    self.table_mut(table).set(name, symbol);
                    if is_replaceable_by_method {
                        self.symbols[symbol.index()].is_replaceable_by_method = true;
                    }
                    symbol
                }
                Some(existing) => {
                    let existing_symbol = &self.symbols[existing.index()];
                    if is_replaceable_by_method && !existing_symbol.is_replaceable_by_method {
                        // A method already took the name.
                        return existing;
                    }
                    if !existing_symbol.flags.intersects(excludes) {
                        existing
                    } else if existing_symbol.is_replaceable_by_method {
                        let symbol = self.create_symbol(SymbolFlags::empty(), name);
                        self.table_mut(table).set(name, symbol);
                        symbol
                    } else if includes.intersects(SymbolFlags::VARIABLE)
                        && existing_symbol.flags.contains(SymbolFlags::ASSIGNMENT)
                    {
                        existing
                    } else {
                        self.report_conflict(existing, node, includes, is_default_export);
                        let symbol = self.create_symbol(SymbolFlags::empty(), name);
                        self.table_mut(table).set(name, symbol);
                        symbol
                    }
                }
            },
        };

        self.add_declaration_to_symbol(symbol, node, includes);
        let symbol_parent = &mut self.symbols[symbol.index()].parent;
        if symbol_parent.is_none() {
            *symbol_parent = parent;
        }
        symbol
    }

    fn report_conflict(&mut self, existing: SymbolId, node: NodeRef<'a>, includes: SymbolFlags, is_default_export: bool) {
        let existing_flags = self.symbols[existing.index()].flags;
        let declarations = self.symbols[existing.index()].declarations.clone();
        tracing::trace!(
            name = self.interner.resolve(self.symbols[existing.index()].name),
            declarations = declarations.len(),
            "conflicting declaration"
        );

        let mut message: &DiagnosticMessage = if existing_flags.contains(SymbolFlags::BLOCK_SCOPED_VARIABLE) {
            &messages::CANNOT_REDECLARE_BLOCK_SCOPED_VARIABLE_0
        } else {
            &messages::DUPLICATE_IDENTIFIER_0
        };
        let mut needs_name = true;
        if existing_flags.intersects(SymbolFlags::ENUM) || includes.intersects(SymbolFlags::ENUM) {
            message = &messages::ENUM_DECLARATIONS_CAN_ONLY_MERGE_WITH_NAMESPACE_OR_OTHER_ENUM_DECLARATIONS;
            needs_name = false;
        }
        let mut multiple_default_exports = false;
        let is_export_default_assignment = matches!(
            node,
            NodeRef::Statement(Statement::ExportAssignment(a)) if !a.is_export_equals
        );
        if !declarations.is_empty() && (is_default_export || is_export_default_assignment) {
            message = &messages::A_MODULE_CANNOT_HAVE_MULTIPLE_DEFAULT_EXPORTS;
            needs_name = false;
            multiple_default_exports = true;
        }

        let new_name_node = declaration_name(node).unwrap_or(node);
        let mut related_to_new = Vec::new();
        for (index, &declaration) in declarations.iter().enumerate() {
            let name_node = declaration_name(declaration).unwrap_or(declaration);
            let display = self.display_name(declaration);
            let args: &[&str] = if needs_name { &[display.as_str()] } else { &[] };
            let mut diagnostic = self.diagnostic_at(name_node, message, args);
            if multiple_default_exports {
                let related_message = if index == 0 { &messages::ANOTHER_EXPORT_DEFAULT_IS_HERE } else { &messages::AND_HERE };
                diagnostic.add_related_information(self.diagnostic_at(new_name_node, related_message, &[]));
                related_to_new.push(self.diagnostic_at(name_node, &messages::THE_FIRST_EXPORT_DEFAULT_IS_HERE, &[]));
            }
            self.diagnostics.add(diagnostic);
        }
        let display = self.display_name(node);
        let args: &[&str] = if needs_name { &[display.as_str()] } else { &[] };
        let mut diagnostic = self.diagnostic_at(new_name_node, message, args);
        for related in related_to_new {
            diagnostic.add_related_information(related);
        }
        self.diagnostics.add(diagnostic);
    }

    pub(crate) fn add_declaration_to_symbol(&mut self, symbol: SymbolId, node: NodeRef<'a>, includes: SymbolFlags) {
        self.node_symbols.insert(node.id(), symbol);
        let s = &mut self.symbols[symbol.index()];
        s.flags |= includes;
        if !s.is_declared_by(node.id()) {
            s.declarations.push(node);
        }
        if includes.intersects(SymbolFlags::CLASS | SymbolFlags::ENUM | SymbolFlags::MODULE | SymbolFlags::VARIABLE)
            && s.exports.is_none()
        {
            s.exports = Some(SymbolTable::new());
        }
        if includes.intersects(
            SymbolFlags::CLASS | SymbolFlags::INTERFACE | SymbolFlags::TYPE_LITERAL | SymbolFlags::OBJECT_LITERAL,
        ) && s.members.is_none()
        {
            s.members = Some(SymbolTable::new());
        }
        if s.const_enum_only_module == Some(true)
            && s.has_flags(SymbolFlags::FUNCTION | SymbolFlags::CLASS | SymbolFlags::REGULAR_ENUM)
        {
            s.const_enum_only_module = Some(false);
        }
        if includes.intersects(SymbolFlags::VALUE) {
            self.set_value_declaration(symbol, node);
        }
    }

    /// Ordinary declarations win over assignment declarations, and any other
    /// kind wins over a namespace it merges with.
    pub(crate) fn set_value_declaration(&mut self, symbol: SymbolId, node: NodeRef<'a>) {
        let s = &mut self.symbols[symbol.index()];
        let replace = match s.value_declaration {
            None => true,
            Some(existing) => {
                (is_assignment_declaration(existing) && !is_assignment_declaration(node))
                    || (existing.kind() != node.kind() && is_module_declaration(existing))
            }
        };
        if replace {
            s.value_declaration = Some(node);
        }
    }

    pub(crate) fn bind_anonymous_declaration(
        &mut self,
        node: NodeRef<'a>,
        flags: SymbolFlags,
        name: InternedString,
    ) -> SymbolId {
        let symbol = self.create_symbol(flags, name);
        if flags.intersects(SymbolFlags::ENUM_MEMBER | SymbolFlags::CLASS_MEMBER) {
            self.symbols[symbol.index()].parent = self.node_symbols.get(&self.container.id()).copied();
        }
        self.add_declaration_to_symbol(symbol, node, flags);
        symbol
    }

    /// Declare into the table the current container dictates.
    pub(crate) fn declare_symbol_and_add_to_symbol_table(
        &mut self,
        node: NodeRef<'a>,
        includes: SymbolFlags,
        excludes: SymbolFlags,
    ) -> Option<SymbolId> {
        match self.container {
            NodeRef::Statement(Statement::ModuleDeclaration(_)) | NodeRef::ModuleDeclaration(_) => {
                Some(self.declare_module_member(node, includes, excludes))
            }
            NodeRef::SourceFile(_) => Some(self.declare_source_file_member(node, includes, excludes)),
            NodeRef::Statement(Statement::ClassDeclaration(_)) | NodeRef::Expression(Expression::ClassExpression(_)) => {
                Some(self.declare_class_member(node, includes, excludes))
            }
            NodeRef::Statement(Statement::EnumDeclaration(_)) => {
                let parent = self.container_symbol()?;
                Some(self.declare_symbol(TableRef::Exports(parent), Some(parent), node, includes, excludes, false, false))
            }
            NodeRef::TypeNode(TypeNode::TypeLiteral(_))
            | NodeRef::Expression(Expression::ObjectLiteral(_))
            | NodeRef::Statement(Statement::InterfaceDeclaration(_)) => {
                let parent = self.container_symbol()?;
                Some(self.declare_symbol(TableRef::Members(parent), Some(parent), node, includes, excludes, false, false))
            }
            container if self.locals.contains_key(&container.id()) => {
                Some(self.declare_symbol(TableRef::Locals(container.id()), None, node, includes, excludes, false, false))
            }
            _ => None,
        }
    }

    fn declare_class_member(&mut self, node: NodeRef<'a>, includes: SymbolFlags, excludes: SymbolFlags) -> SymbolId {
        let class_symbol = self.container_symbol().unwrap_or_else(|| panic!("class container has no symbol"));
        let table = if node.data().has_modifier(ModifierFlags::STATIC) {
            TableRef::Exports(class_symbol)
        } else {
            TableRef::Members(class_symbol)
        };
        self.declare_symbol(table, Some(class_symbol), node, includes, excludes, false, false)
    }

    fn declare_source_file_member(&mut self, node: NodeRef<'a>, includes: SymbolFlags, excludes: SymbolFlags) -> SymbolId {
        if self.file.is_external_module() {
            self.declare_module_member(node, includes, excludes)
        } else {
            let file = NodeRef::SourceFile(self.file).id();
            self.declare_symbol(TableRef::Locals(file), None, node, includes, excludes, false, false)
        }
    }

    /// Exported declarations get two symbols: a local one with only the
    /// export-value meaning, and the real one in the container's exports.
    fn declare_module_member(&mut self, node: NodeRef<'a>, includes: SymbolFlags, excludes: SymbolFlags) -> SymbolId {
        let container = self.container;
        let has_export_modifier = self.combined_flags(node).1.contains(ModifierFlags::EXPORT)
            || node.data().flags.contains(NodeFlags::NESTED_NAMESPACE);

        if includes.intersects(SymbolFlags::ALIAS) {
            let is_export_specifier = node.kind() == SyntaxKind::ExportSpecifier;
            let is_exported_import_equals =
                matches!(node, NodeRef::Statement(Statement::ImportEqualsDeclaration(_))) && has_export_modifier;
            if is_export_specifier || is_exported_import_equals {
                if let Some(parent) = self.container_symbol() {
                    return self.declare_symbol(TableRef::Exports(parent), Some(parent), node, includes, excludes, false, false);
                }
            }
            return self.declare_symbol(TableRef::Locals(container.id()), None, node, includes, excludes, false, false);
        }

        let is_ambient_module_declaration = matches!(
            node,
            NodeRef::Statement(Statement::ModuleDeclaration(m)) if is_ambient_module(m)
        );
        let in_export_context = self.node_flags_of(container).contains(NodeFlags::EXPORT_CONTEXT);
        if !is_ambient_module_declaration && (has_export_modifier || in_export_context) {
            let Some(parent) = self.container_symbol() else {
                return self.declare_symbol(TableRef::Locals(container.id()), None, node, includes, excludes, false, false);
            };
            let unnamed_default =
                node.data().has_modifier(ModifierFlags::DEFAULT) && declaration_name(node).is_none();
            if !self.locals.contains_key(&container.id()) || unnamed_default {
                return self.declare_symbol(TableRef::Exports(parent), Some(parent), node, includes, excludes, false, false);
            }
            let export_kind = if includes.intersects(SymbolFlags::VALUE) {
                SymbolFlags::EXPORT_VALUE
            } else {
                SymbolFlags::empty()
            };
            let local =
                self.declare_symbol(TableRef::Locals(container.id()), None, node, export_kind, excludes, false, false);
            let exported =
                self.declare_symbol(TableRef::Exports(parent), Some(parent), node, includes, excludes, false, false);
            self.symbols[local.index()].export_symbol = Some(exported);
            self.local_symbols.insert(node.id(), local);
            return local;
        }
        self.declare_symbol(TableRef::Locals(container.id()), None, node, includes, excludes, false, false)
    }

    /// `let`, `const`, classes, interfaces, enums and strict-mode functions
    /// are scoped to the nearest block.
    pub(crate) fn bind_block_scoped_declaration(
        &mut self,
        node: NodeRef<'a>,
        includes: SymbolFlags,
        excludes: SymbolFlags,
    ) -> Option<SymbolId> {
        match self.block_scope_container {
            NodeRef::Statement(Statement::ModuleDeclaration(_)) | NodeRef::ModuleDeclaration(_) => {
                Some(self.declare_module_member(node, includes, excludes))
            }
            NodeRef::SourceFile(_) if self.is_external_or_common_js_module() => {
                Some(self.declare_module_member(node, includes, excludes))
            }
            scope => Some(self.declare_symbol(TableRef::Locals(scope.id()), None, node, includes, excludes, false, false)),
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    pub(crate) fn parent_of(&self, node: NodeRef<'a>) -> Option<NodeRef<'a>> {
        self.parents.get(&node.id()).copied()
    }

    /// Parents of `node`, innermost first.
    pub(crate) fn ancestors(&self, node: NodeRef<'a>) -> impl Iterator<Item = NodeRef<'a>> + '_ {
        std::iter::successors(self.parent_of(node), move |n| self.parent_of(*n))
    }

    pub(crate) fn node_flags_of(&self, node: NodeRef<'a>) -> NodeFlags {
        self.node_flags.get(&node.id()).copied().unwrap_or_else(NodeFlags::empty)
    }

    fn set_node_flags(&mut self, node: NodeRef<'a>, flags: NodeFlags) {
        if flags.is_empty() {
            self.node_flags.remove(&node.id());
        } else {
            self.node_flags.insert(node.id(), flags);
        }
    }

    fn add_node_flags(&mut self, node: NodeRef<'a>, flags: NodeFlags) {
        let combined = self.node_flags_of(node) | flags;
        self.set_node_flags(node, combined);
    }

    pub(crate) fn container_symbol(&self) -> Option<SymbolId> {
        self.node_symbols.get(&self.container.id()).copied()
    }

    fn container_symbol_with_exports(&self) -> Option<SymbolId> {
        self.container_symbol().filter(|s| self.symbols[s.index()].exports.is_some())
    }

    pub(crate) fn is_external_or_common_js_module(&self) -> bool {
        self.file.is_external_module() || self.common_js_module_indicator.is_some()
    }

    /// Inside a declaration file, a `declare` modifier or an ambient namespace.
    pub(crate) fn is_ambient(&self, node: NodeRef<'a>) -> bool {
        if self.file.is_declaration_file {
            return true;
        }
        std::iter::once(node).chain(self.ancestors(node)).any(|n| {
            let data = n.data();
            data.flags.contains(NodeFlags::AMBIENT) || data.has_modifier(ModifierFlags::AMBIENT)
        })
    }

    /// The declaration that owns a binding element: a variable declaration
    /// or a parameter.
    pub(crate) fn root_declaration(&self, node: NodeRef<'a>) -> NodeRef<'a> {
        let mut current = node;
        while let NodeRef::BindingElement(_) = current {
            let Some(owner) = self.parent_of(current).and_then(|pattern| self.parent_of(pattern)) else {
                break;
            };
            current = owner;
        }
        current
    }

    /// Node flags and modifiers of a variable declaration combined with its
    /// declaration list and statement.
    pub(crate) fn combined_flags(&self, node: NodeRef<'a>) -> (NodeFlags, ModifierFlags) {
        let node = self.root_declaration(node);
        let mut flags = node.data().flags;
        let mut modifiers = node.data().modifier_flags;
        if let NodeRef::VariableDeclaration(_) = node {
            if let Some(list) = self.parent_of(node) {
                flags |= list.data().flags;
                modifiers |= list.data().modifier_flags;
                if let Some(statement @ NodeRef::Statement(Statement::VariableStatement(_))) = self.parent_of(list) {
                    flags |= statement.data().flags;
                    modifiers |= statement.data().modifier_flags;
                }
            }
        }
        (flags, modifiers)
    }

    fn is_catch_variable(&self, node: NodeRef<'a>) -> bool {
        matches!(node, NodeRef::VariableDeclaration(_)) && matches!(self.parent_of(node), Some(NodeRef::CatchClause(_)))
    }

    fn is_default_export(&self, node: NodeRef<'a>) -> bool {
        node.data().has_modifier(ModifierFlags::DEFAULT)
            || (node.kind() == SyntaxKind::ExportSpecifier
                && declaration_name(node)
                    .and_then(|n| n.as_identifier())
                    .is_some_and(|id| id.escaped_text == self.names.default))
    }

    /// Whether `expr` is written to by an enclosing assignment or
    /// destructuring pattern.
    pub(crate) fn is_assignment_target(&self, expr: &'a Expression<'a>) -> bool {
        let mut node = NodeRef::Expression(expr);
        loop {
            let Some(parent) = self.parent_of(node) else {
                return false;
            };
            match parent {
                NodeRef::Expression(Expression::Binary(b)) => {
                    return b.operator().is_assignment_operator() && NodeRef::Expression(b.left).same_node(&node);
                }
                NodeRef::Expression(Expression::Parenthesized(_))
                | NodeRef::Expression(Expression::ArrayLiteral(_))
                | NodeRef::Expression(Expression::Spread(_))
                | NodeRef::Expression(Expression::NonNull(_))
                | NodeRef::ObjectLiteralElement(ObjectLiteralElement::SpreadAssignment(_))
                | NodeRef::ObjectLiteralElement(ObjectLiteralElement::ShorthandPropertyAssignment(_)) => node = parent,
                NodeRef::ObjectLiteralElement(ObjectLiteralElement::PropertyAssignment(p)) => {
                    if !NodeRef::Expression(p.initializer).same_node(&node) {
                        return false;
                    }
                    node = parent;
                }
                NodeRef::Expression(Expression::ObjectLiteral(_)) => node = parent,
                NodeRef::Expression(Expression::PrefixUnary(p)) => {
                    return matches!(p.operator, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken);
                }
                NodeRef::Expression(Expression::PostfixUnary(_)) => return true,
                NodeRef::Statement(Statement::ForInStatement(f) | Statement::ForOfStatement(f)) => {
                    return f.initializer.as_node().same_node(&node);
                }
                _ => return false,
            }
        }
    }

    /// Symbol-table key of a declaration.
    pub(crate) fn declaration_symbol_name(&self, node: NodeRef<'a>) -> Option<InternedString> {
        match node {
            NodeRef::Statement(Statement::ExportAssignment(a)) => {
                return Some(if a.is_export_equals { self.names.export_equals } else { self.names.default });
            }
            NodeRef::Statement(Statement::ExportDeclaration(_)) => return Some(self.names.export_star),
            NodeRef::Statement(Statement::ModuleDeclaration(m)) if is_ambient_module(m) => {
                return Some(match m.name {
                    ModuleName::Identifier(_) => self.names.global,
                    ModuleName::StringLiteral(_) => module_name_key(&m.name, &self.interner),
                });
            }
            NodeRef::ClassElement(ClassElement::Constructor(_)) => return Some(self.names.constructor),
            NodeRef::ClassElement(ClassElement::IndexSignature(_)) | NodeRef::TypeElement(TypeElement::IndexSignature(_)) => {
                return Some(self.names.index);
            }
            NodeRef::TypeElement(TypeElement::CallSignature(_)) | NodeRef::TypeNode(TypeNode::FunctionType(_)) => {
                return Some(self.names.call);
            }
            NodeRef::TypeElement(TypeElement::ConstructSignature(_)) | NodeRef::TypeNode(TypeNode::ConstructorType(_)) => {
                return Some(self.names.new);
            }
            NodeRef::SourceFile(_) => return Some(self.names.export_equals),
            NodeRef::Identifier(id) => return Some(id.escaped_text),
            NodeRef::Expression(expr) => return self.expression_declaration_name(expr),
            _ => {}
        }
        self.name_key(declaration_name(node)?)
    }

    /// Names of JavaScript assignment declarations and of the identifiers
    /// and literals they declare along the way.
    fn expression_declaration_name(&self, expr: &'a Expression<'a>) -> Option<InternedString> {
        match expr {
            Expression::Identifier(id) => Some(id.escaped_text),
            Expression::StringLiteral(_) | Expression::NumericLiteral(_) | Expression::NoSubstitutionTemplateLiteral(_) => {
                literal_expression_key(expr, &self.interner)
            }
            Expression::PropertyAccess(_) | Expression::ElementAccess(_) => self.access_name(expr),
            Expression::Binary(b) => {
                if self.is_module_exports_access(b.left) {
                    Some(self.names.export_equals)
                } else {
                    self.access_name(b.left)
                }
            }
            Expression::Call(call) => call.arguments.get(1).and_then(|arg| literal_expression_key(arg, &self.interner)),
            Expression::FunctionExpression(_) | Expression::ClassExpression(_) => {
                self.name_key(declaration_name(NodeRef::Expression(expr))?)
            }
            _ => None,
        }
    }

    pub(crate) fn name_key(&self, name: NodeRef<'a>) -> Option<InternedString> {
        match name {
            NodeRef::Identifier(id) => Some(id.escaped_text),
            NodeRef::StringLiteral(lit) => Some(self.interner.intern_escaped(self.interner.resolve(lit.text))),
            NodeRef::NumericLiteral(lit) => Some(lit.text),
            NodeRef::ComputedPropertyName(computed) => literal_expression_key(computed.expression, &self.interner),
            NodeRef::Expression(expr) => literal_expression_key(expr, &self.interner),
            _ => None,
        }
    }

    fn display_name(&self, node: NodeRef<'a>) -> String {
        if let Some(text) = declaration_name_text(node, &self.interner) {
            return text.to_string();
        }
        match self.declaration_symbol_name(node) {
            Some(name) => self.interner.unescape(name).to_string(),
            None => String::new(),
        }
    }

    pub(crate) fn error_span(&self, node: NodeRef<'_>) -> TextSpan {
        let range = node.range();
        if range.is_synthesized() {
            return TextSpan::new(0, 0);
        }
        let start = skip_trivia(&self.file.text, range.pos).min(range.end);
        TextSpan::from_bounds(start, range.end)
    }

    pub(crate) fn diagnostic_at(&self, node: NodeRef<'_>, message: &DiagnosticMessage, args: &[&str]) -> Diagnostic {
        Diagnostic::with_location(&self.file.file_name, self.error_span(node), message, args)
    }

    /// Report with a configurable severity: `None` suppresses the report.
    pub(crate) fn error_or_suggestion(&mut self, is_error: Option<bool>, span: TextSpan, message: &DiagnosticMessage) {
        let Some(is_error) = is_error else {
            return;
        };
        let category = if is_error { DiagnosticCategory::Error } else { DiagnosticCategory::Suggestion };
        let diagnostic =
            Diagnostic::with_location(&self.file.file_name, span, message, &[]).with_category(category);
        self.diagnostics.add(diagnostic);
    }
}

fn optional_flag(optional: bool) -> SymbolFlags {
    if optional {
        SymbolFlags::OPTIONAL
    } else {
        SymbolFlags::empty()
    }
}

fn is_generator(node: NodeRef<'_>) -> bool {
    match node {
        NodeRef::Statement(Statement::FunctionDeclaration(f)) => f.asterisk_token.is_some(),
        NodeRef::Expression(Expression::FunctionExpression(f)) => f.asterisk_token.is_some(),
        NodeRef::ClassElement(ClassElement::MethodDeclaration(m))
        | NodeRef::ObjectLiteralElement(ObjectLiteralElement::MethodDeclaration(m)) => m.asterisk_token.is_some(),
        _ => false,
    }
}

fn function_has_body(node: NodeRef<'_>) -> bool {
    match node {
        NodeRef::Statement(Statement::FunctionDeclaration(f)) => f.body.is_some(),
        NodeRef::Expression(Expression::FunctionExpression(_) | Expression::ArrowFunction(_)) => true,
        NodeRef::ClassElement(element) => match element {
            ClassElement::MethodDeclaration(m) => m.body.is_some(),
            ClassElement::Constructor(c) => c.body.is_some(),
            ClassElement::GetAccessor(a) | ClassElement::SetAccessor(a) => a.body.is_some(),
            ClassElement::ClassStaticBlockDeclaration(_) => true,
            _ => false,
        },
        NodeRef::ObjectLiteralElement(element) => match element {
            ObjectLiteralElement::MethodDeclaration(m) => m.body.is_some(),
            ObjectLiteralElement::GetAccessor(a) | ObjectLiteralElement::SetAccessor(a) => a.body.is_some(),
            _ => false,
        },
        _ => false,
    }
}

/// Parameters of a function-like node or signature.
fn function_parameters<'a>(node: NodeRef<'a>) -> &'a [ParameterDeclaration<'a>] {
    match node {
        NodeRef::Statement(Statement::FunctionDeclaration(f)) => f.parameters,
        NodeRef::Expression(Expression::FunctionExpression(f)) => f.parameters,
        NodeRef::Expression(Expression::ArrowFunction(f)) => f.parameters,
        NodeRef::ClassElement(element) => match element {
            ClassElement::MethodDeclaration(m) => m.parameters,
            ClassElement::Constructor(c) => c.parameters,
            ClassElement::GetAccessor(a) | ClassElement::SetAccessor(a) => a.parameters,
            ClassElement::IndexSignature(i) => i.parameters,
            _ => &[],
        },
        NodeRef::ObjectLiteralElement(element) => match element {
            ObjectLiteralElement::MethodDeclaration(m) => m.parameters,
            ObjectLiteralElement::GetAccessor(a) | ObjectLiteralElement::SetAccessor(a) => a.parameters,
            _ => &[],
        },
        NodeRef::TypeElement(element) => match element {
            TypeElement::MethodSignature(s) | TypeElement::CallSignature(s) | TypeElement::ConstructSignature(s) => {
                s.parameters
            }
            TypeElement::IndexSignature(i) => i.parameters,
            TypeElement::PropertySignature(_) => &[],
        },
        NodeRef::TypeNode(TypeNode::FunctionType(f) | TypeNode::ConstructorType(f)) => f.parameters,
        _ => &[],
    }
}

/// A computed property name that is not a literal.
fn has_dynamic_name(node: NodeRef<'_>) -> bool {
    matches!(
        declaration_name(node),
        Some(NodeRef::ComputedPropertyName(c)) if !matches!(
            c.expression,
            Expression::StringLiteral(_) | Expression::NumericLiteral(_) | Expression::NoSubstitutionTemplateLiteral(_)
        )
    )
}

/// `export default a.b` and `export = a` re-export an existing entity.
pub(crate) fn is_aliasable_expression(expr: &Expression<'_>) -> bool {
    crate::narrowing::is_entity_name_expression(expr) || matches!(expr, Expression::ClassExpression(_))
}

/// CommonJS assignment declarations: `exports.x = ...`, `this.y = ...`,
/// `Object.defineProperty(...)`.
fn is_assignment_declaration(node: NodeRef<'_>) -> bool {
    matches!(
        node,
        NodeRef::Expression(
            Expression::Binary(_) | Expression::Call(_) | Expression::PropertyAccess(_) | Expression::ElementAccess(_)
        )
    )
}

fn is_module_declaration(node: NodeRef<'_>) -> bool {
    matches!(node, NodeRef::Statement(Statement::ModuleDeclaration(_)) | NodeRef::ModuleDeclaration(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsforge_ast::{HasNodeData, NodeFactory};
    use tsforge_core::CompilerArena;

    #[test]
    fn test_conflicting_declarations_replace_the_table_entry() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let first = f.create_class_declaration(Some(f.create_identifier("A")), None, None, vec![]);
        let second = f.create_enum_declaration(f.create_identifier("A"), vec![]);
        let file = f.create_source_file("a.ts", "", vec![]);
        let first = f.alloc(first);
        let second = f.alloc(second);

        let options = CompilerOptions::default();
        let mut binder = Binder::new(file, &options, f.interner());
        let table = TableRef::Locals(file.data.id);
        let a = binder.declare_symbol(
            table,
            None,
            NodeRef::Statement(first),
            SymbolFlags::CLASS,
            SymbolFlags::CLASS_EXCLUDES,
            false,
            false,
        );
        let b = binder.declare_symbol(
            table,
            None,
            NodeRef::Statement(second),
            SymbolFlags::REGULAR_ENUM,
            SymbolFlags::REGULAR_ENUM_EXCLUDES,
            false,
            false,
        );
        assert_ne!(a, b);
        let locals = binder.table(table).unwrap();
        assert_eq!(locals.len(), 1);
        assert_eq!(locals.iter().next().map(|(_, s)| *s), Some(b));
        assert_eq!(binder.diagnostics.len(), 2);
        assert!(binder.diagnostics.diagnostics().iter().all(|d| d.code == 2567));
    }

    #[test]
    fn test_interfaces_merge_into_one_symbol() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let i1 = f.alloc(f.create_interface_declaration(f.create_identifier("I"), None, None, vec![]));
        let i2 = f.alloc(f.create_interface_declaration(f.create_identifier("I"), None, None, vec![]));
        let file = f.create_source_file("a.ts", "", vec![]);

        let options = CompilerOptions::default();
        let mut binder = Binder::new(file, &options, f.interner());
        let table = TableRef::Locals(file.data.id);
        let a = binder.declare_symbol(
            table,
            None,
            NodeRef::Statement(i1),
            SymbolFlags::INTERFACE,
            SymbolFlags::INTERFACE_EXCLUDES,
            false,
            false,
        );
        let b = binder.declare_symbol(
            table,
            None,
            NodeRef::Statement(i2),
            SymbolFlags::INTERFACE,
            SymbolFlags::INTERFACE_EXCLUDES,
            false,
            false,
        );
        assert_eq!(a, b);
        assert_eq!(binder.symbols[a.index()].declarations.len(), 2);
        assert!(binder.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_name_gets_a_fresh_symbol() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let func = f.alloc(f.create_function_declaration(false, None, None, vec![], None, None));
        let file = f.create_source_file("a.ts", "", vec![]);

        let options = CompilerOptions::default();
        let mut binder = Binder::new(file, &options, f.interner());
        let table = TableRef::Locals(file.data.id);
        let symbol = binder.declare_symbol(
            table,
            None,
            NodeRef::Statement(func),
            SymbolFlags::FUNCTION,
            SymbolFlags::FUNCTION_EXCLUDES,
            false,
            false,
        );
        assert_eq!(binder.symbols[symbol.index()].name, binder.names.missing);
        assert!(binder.table(table).map_or(true, |t| t.is_empty()));
    }

    #[test]
    fn test_ambient_flag_is_inherited() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let func = f.alloc(
            f.create_function_declaration(false, Some(f.create_identifier("g")), None, vec![], None, None)
                .with_modifiers(ModifierFlags::AMBIENT),
        );
        let file = f.create_source_file("a.ts", "", vec![]);
        let options = CompilerOptions::default();
        let binder = Binder::new(file, &options, f.interner());
        assert!(binder.is_ambient(NodeRef::Statement(func)));
        assert!(!binder.is_ambient(NodeRef::SourceFile(file)));
    }
}
