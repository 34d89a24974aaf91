//! Binder integration tests.
//!
//! Trees are built with the node factory, bound, and checked through the
//! side tables of the resulting `BoundFile`.

use tsforge_ast::types::{ModifierFlags, SymbolFlags, SymbolId};
use tsforge_ast::{
    BindingName, ClassElement, Expression, HasNodeData, NodeFactory, NodeFlags, NodeRef, ObjectLiteralElement,
    PropertyName, SourceFile, Statement,
};
use tsforge_binder::{bind_source_file, BoundFile, FlowNode};
use tsforge_core::{CompilerArena, StringInterner};
use tsforge_tsoptions::{CompilerOptions, ScriptTarget};

fn ident<'a>(f: &NodeFactory<'a>, name: &str) -> Expression<'a> {
    Expression::Identifier(f.create_identifier(name))
}

/// Route binder logging to the test harness; `RUST_LOG=tsforge_binder=trace`
/// shows flow lowering.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn bind<'a>(f: &NodeFactory<'a>, name: &str, statements: Vec<Statement<'a>>) -> (&'a SourceFile<'a>, BoundFile<'a>) {
    bind_with(f, name, statements, &CompilerOptions::default())
}

fn bind_with<'a>(
    f: &NodeFactory<'a>,
    name: &str,
    statements: Vec<Statement<'a>>,
    options: &CompilerOptions,
) -> (&'a SourceFile<'a>, BoundFile<'a>) {
    init_tracing();
    let file = f.create_source_file(name, "", statements);
    let bound = bind_source_file(file, options, f.interner());
    (file, bound)
}

fn const_statement<'a>(f: &NodeFactory<'a>, name: &str, value: &str) -> Statement<'a> {
    let declaration = f.create_variable_declaration(
        BindingName::Identifier(f.create_identifier(name)),
        false,
        None,
        Some(Expression::NumericLiteral(f.create_numeric_literal(value))),
    );
    f.create_variable_statement(f.create_variable_declaration_list(vec![declaration], NodeFlags::CONST))
}

// ============================================================================
// Symbols
// ============================================================================

#[test]
fn test_single_const_declaration() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let (file, bound) = bind(&f, "a.ts", vec![const_statement(&f, "x", "1")]);

    let locals = bound.locals_of(NodeRef::SourceFile(file)).expect("file locals");
    assert_eq!(locals.len(), 1);
    let x = locals.get(&f.interner().intern("x")).expect("symbol x");
    assert!(bound.symbol(x).has_flags(SymbolFlags::BLOCK_SCOPED_VARIABLE));
    assert!(bound.diagnostics().is_empty());

    let nodes: Vec<_> = bound.graph().nodes().map(|(_, node)| node).collect();
    assert_eq!(nodes.len(), 2, "{nodes:?}");
    assert!(matches!(nodes[0], FlowNode::Start { .. }));
    assert!(matches!(nodes[1], FlowNode::Assignment { .. }));
}

#[test]
fn test_interface_and_namespace_merge() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let interface = f.create_interface_declaration(f.create_identifier("Shape"), None, None, vec![]);
    let namespace = f.create_module_declaration(
        tsforge_ast::ModuleName::Identifier(f.create_identifier("Shape")),
        Some(f.create_module_block(vec![const_statement(&f, "unit", "1")])),
        NodeFlags::NAMESPACE,
    );
    let (file, bound) = bind(&f, "a.ts", vec![interface, namespace]);

    let locals = bound.locals_of(NodeRef::SourceFile(file)).expect("file locals");
    assert_eq!(locals.len(), 1);
    let shape = locals.get(&f.interner().intern("Shape")).unwrap();
    let symbol = bound.symbol(shape);
    assert_eq!(symbol.declarations.len(), 2);
    assert!(symbol.has_flags(SymbolFlags::INTERFACE));
    assert!(symbol.has_flags(SymbolFlags::VALUE_MODULE));
    assert!(bound.diagnostics().is_empty());
}

#[test]
fn test_duplicate_let_is_reported_on_both_declarations() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let (_, bound) = bind(&f, "a.ts", vec![const_statement(&f, "x", "1"), const_statement(&f, "x", "2")]);
    let diagnostics: Vec<_> = bound.diagnostics().with_code(2451).collect();
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| d.message_text.contains("'x'")));
}

#[test]
fn test_multiple_default_exports_cross_reference() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let class = f.create_class_declaration(None, None, None, vec![]).with_modifiers(ModifierFlags::EXPORT_DEFAULT);
    let function = f
        .create_function_declaration(false, Some(f.create_identifier("namedF")), None, vec![], None, Some(f.create_block(vec![], false)))
        .with_modifiers(ModifierFlags::EXPORT_DEFAULT);
    let (_, bound) = bind(&f, "a.ts", vec![class, function]);

    let diagnostics = bound.diagnostics().diagnostics();
    assert_eq!(diagnostics.len(), 2, "{diagnostics:?}");
    assert!(diagnostics.iter().all(|d| d.code == 2528));
    assert_eq!(diagnostics[0].related_information.len(), 1);
    assert_eq!(diagnostics[0].related_information[0].code, 2753);
    assert_eq!(diagnostics[1].related_information.len(), 1);
    assert_eq!(diagnostics[1].related_information[0].code, 2752);
}

#[test]
fn test_class_members_are_not_file_locals() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let class = f.create_class_declaration(Some(f.create_identifier("Point")), None, None, vec![]);
    let (file, bound) = bind(&f, "a.ts", vec![class]);
    let locals = bound.locals_of(NodeRef::SourceFile(file)).unwrap();
    let point = locals.get(&f.interner().intern("Point")).unwrap();
    assert!(bound.symbol(point).has_flags(SymbolFlags::CLASS));
    assert_eq!(bound.symbol_of(NodeRef::Statement(&file.statements[0])), Some(point));
    assert_eq!(bound.parent_of(NodeRef::Statement(&file.statements[0])).map(|p| p.id()), Some(NodeRef::SourceFile(file).id()));
}

/// `this.m = 1; this.m = 2;` inside the constructor of `class C`, plus a method `m`.
fn class_with_this_assignments<'a>(f: &NodeFactory<'a>, method_first: bool) -> Statement<'a> {
    let assign = |value: &str| {
        let target = f.create_property_access(f.create_this(), f.create_identifier("m"));
        let value = Expression::NumericLiteral(f.create_numeric_literal(value));
        f.create_expression_statement(f.create_assignment(target, value))
    };
    let body = f.create_block(vec![assign("1"), assign("2")], true);
    let constructor = f.create_constructor_declaration(vec![], Some(body));
    let method = ClassElement::MethodDeclaration(f.create_method_declaration(
        false,
        PropertyName::Identifier(f.create_identifier("m")),
        false,
        None,
        vec![],
        None,
        Some(f.create_block(vec![], false)),
    ));
    let members = if method_first { vec![method, constructor] } else { vec![constructor, method] };
    f.create_class_declaration(Some(f.create_identifier("C")), None, None, members)
}

fn member_m<'a>(f: &NodeFactory<'a>, file: &'a SourceFile<'a>, bound: &BoundFile<'a>) -> SymbolFlags {
    let locals = bound.locals_of(NodeRef::SourceFile(file)).expect("file locals");
    let class = locals.get(&f.interner().intern("C")).expect("symbol C");
    let members = bound.symbol(class).members.as_ref().expect("class members");
    let m = members.get(&f.interner().intern("m")).expect("member m");
    bound.symbol(m).flags
}

#[test]
fn test_later_method_replaces_constructor_assigned_properties() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let (file, bound) = bind(&f, "a.js", vec![class_with_this_assignments(&f, false)]);

    let flags = member_m(&f, file, &bound);
    assert!(flags.contains(SymbolFlags::METHOD));
    assert!(!flags.intersects(SymbolFlags::PROPERTY | SymbolFlags::ASSIGNMENT));
    assert!(bound.diagnostics().is_empty());
}

#[test]
fn test_earlier_method_keeps_name_over_this_assignments() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let (file, bound) = bind(&f, "a.js", vec![class_with_this_assignments(&f, true)]);

    let flags = member_m(&f, file, &bound);
    assert!(flags.contains(SymbolFlags::METHOD));
    assert!(!flags.contains(SymbolFlags::PROPERTY));
    assert!(bound.diagnostics().is_empty());
}

// ============================================================================
// Strict Mode
// ============================================================================

#[test]
fn test_nested_function_declaration_before_es2015() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let inner = f.create_function_declaration(false, Some(f.create_identifier("f")), None, vec![], None, Some(f.create_block(vec![], false)));
    let body = f.create_block(vec![f.create_return(None), inner], true);
    let outer = f.create_function_declaration(false, Some(f.create_identifier("f")), None, vec![], None, Some(body));
    let options = CompilerOptions { target: Some(ScriptTarget::ES5), ..Default::default() };
    let (_, bound) = bind_with(&f, "a.ts", vec![outer], &options);

    let diagnostics: Vec<_> = bound.diagnostics().with_code(1250).collect();
    assert_eq!(diagnostics.len(), 1, "{:?}", bound.diagnostics());
    // Function declarations after `return` are hoisted, so nothing is unreachable.
    assert_eq!(bound.diagnostics().with_code(7027).count(), 0);
}

#[test]
fn test_nested_function_declaration_is_reported_in_sloppy_script() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let inner = f.create_function_declaration(false, Some(f.create_identifier("g")), None, vec![], None, Some(f.create_block(vec![], false)));
    let body = f.create_block(vec![inner], true);
    let outer = f.create_function_declaration(false, Some(f.create_identifier("f")), None, vec![], None, Some(body));
    let options = CompilerOptions {
        target: Some(ScriptTarget::ES5),
        always_strict: Some(false),
        ..Default::default()
    };
    let (_, bound) = bind_with(&f, "a.ts", vec![outer], &options);

    let diagnostics: Vec<_> = bound.diagnostics().with_code(1250).collect();
    assert_eq!(diagnostics.len(), 1, "{:?}", bound.diagnostics());
    assert_eq!(bound.diagnostics().with_code(1251).count() + bound.diagnostics().with_code(1252).count(), 0);
}

#[test]
fn test_nested_function_declaration_allowed_in_es2015() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let inner = f.create_function_declaration(false, Some(f.create_identifier("g")), None, vec![], None, Some(f.create_block(vec![], false)));
    let body = f.create_block(vec![inner], true);
    let outer = f.create_function_declaration(false, Some(f.create_identifier("f")), None, vec![], None, Some(body));
    let options = CompilerOptions { target: Some(ScriptTarget::ES2015), ..Default::default() };
    let (_, bound) = bind_with(&f, "a.ts", vec![outer], &options);
    assert_eq!(bound.diagnostics().with_code(1250).count(), 0);
}

#[test]
fn test_use_strict_rejects_reserved_word_binding() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let statements = vec![f.create_prologue_directive("use strict"), const_statement(&f, "interface", "1")];
    let (_, bound) = bind(&f, "a.ts", statements);
    assert_eq!(bound.diagnostics().with_code(1212).count(), 1, "{:?}", bound.diagnostics());
}

#[test]
fn test_sloppy_mode_allows_reserved_word_binding() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let (_, bound) = bind(&f, "a.ts", vec![const_statement(&f, "interface", "1")]);
    assert!(bound.diagnostics().is_empty());
}

// ============================================================================
// Control Flow
// ============================================================================

#[test]
fn test_optional_chain_condition_gates_whole_chain() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let ab = f.create_property_access_chain(ident(&f, "a"), true, f.create_identifier("b"));
    let abc = f.create_property_access_chain(ab, false, f.create_identifier("c"));
    let then = f.create_expression_statement(ident(&f, "a"));
    let (file, bound) = bind(&f, "a.ts", vec![f.create_if(abc, then, None)]);

    let Statement::IfStatement(if_statement) = &file.statements[0] else {
        unreachable!()
    };
    let chain = NodeRef::Expression(if_statement.expression);
    let Expression::PropertyAccess(outer) = if_statement.expression else {
        unreachable!()
    };
    let inner = NodeRef::Expression(outer.expression);

    let graph = bound.graph();
    let conditions_on = |node: NodeRef<'_>| {
        graph
            .nodes()
            .filter(|(_, n)| matches!(n, FlowNode::Condition { expression, .. } if *expression == node.id()))
            .count()
    };
    assert_eq!(conditions_on(chain), 2);
    assert_eq!(conditions_on(inner), 0);
}

#[test]
fn test_switch_without_default_reaches_exit() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let clause = f.create_case_clause(
        Expression::NumericLiteral(f.create_numeric_literal("1")),
        vec![f.create_return(None)],
    );
    let switch = f.create_switch(ident(&f, "x"), vec![clause]);
    let after = f.create_expression_statement(ident(&f, "x"));
    let body = f.create_block(vec![switch, after], true);
    let func = f.create_function_declaration(false, Some(f.create_identifier("g")), None, vec![], None, Some(body));
    let (file, bound) = bind(&f, "a.ts", vec![func]);

    let Statement::FunctionDeclaration(decl) = &file.statements[0] else {
        unreachable!()
    };
    let statements = decl.body.as_ref().unwrap().statements;
    assert!(!bound.is_unreachable(NodeRef::Statement(&statements[1])));
    let flow = bound.flow_of(NodeRef::Statement(&statements[1])).unwrap();
    assert!(matches!(bound.graph().node(flow), FlowNode::SwitchClause { clause_start: 0, clause_end: 0, .. }));
}

#[test]
fn test_switch_with_default_returning_everywhere_ends_unreachably() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let case = f.create_case_clause(Expression::NumericLiteral(f.create_numeric_literal("1")), vec![f.create_return(None)]);
    let default = f.create_default_clause(vec![f.create_return(None)]);
    let switch = f.create_switch(ident(&f, "x"), vec![case, default]);
    let after = f.create_expression_statement(ident(&f, "x"));
    let (file, bound) = bind(&f, "a.ts", vec![switch, after]);
    assert!(bound.is_unreachable(NodeRef::Statement(&file.statements[1])));
    assert_eq!(bound.diagnostics().with_code(7027).count(), 1);
}

#[test]
fn test_labeled_continue_targets_loop() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let body = f.create_block(vec![f.create_continue(Some(f.create_identifier("outer")))], true);
    let loop_statement = f.create_while(ident(&f, "x"), body.into());
    let labeled = f.create_labeled(f.create_identifier("outer"), loop_statement);
    let (_, bound) = bind(&f, "a.ts", vec![labeled]);
    assert_eq!(bound.diagnostics().with_code(7028).count(), 0);
}

#[test]
fn test_unused_label_is_error_when_disallowed() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let labeled = f.create_labeled(f.create_identifier("unused"), f.create_expression_statement(ident(&f, "x")));
    let options = CompilerOptions { allow_unused_labels: Some(false), ..Default::default() };
    let (_, bound) = bind_with(&f, "a.ts", vec![labeled], &options);
    let diagnostics: Vec<_> = bound.diagnostics().with_code(7028).collect();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].is_error());
}

#[test]
fn test_unused_label_is_silent_when_allowed() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let labeled = f.create_labeled(f.create_identifier("unused"), f.create_expression_statement(ident(&f, "x")));
    let options = CompilerOptions { allow_unused_labels: Some(true), ..Default::default() };
    let (_, bound) = bind_with(&f, "a.ts", vec![labeled], &options);
    assert_eq!(bound.diagnostics().with_code(7028).count(), 0);
}

#[test]
fn test_unreachable_run_is_one_diagnostic() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let statements = vec![
        f.create_throw(ident(&f, "e")),
        f.create_expression_statement(ident(&f, "a")),
        f.create_expression_statement(ident(&f, "b")),
        f.create_expression_statement(ident(&f, "c")),
    ];
    let (file, bound) = bind(&f, "a.ts", statements);
    assert_eq!(bound.diagnostics().with_code(7027).count(), 1);
    assert!(file.statements[1..].iter().all(|s| bound.is_unreachable(NodeRef::Statement(s))));
}

#[test]
fn test_unreachable_const_enum_is_not_reported() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let const_enum = f.create_enum_declaration(f.create_identifier("E"), vec![]).with_modifiers(ModifierFlags::CONST);
    let (_, bound) = bind(&f, "a.ts", vec![f.create_throw(ident(&f, "e")), const_enum]);
    assert_eq!(bound.diagnostics().with_code(7027).count(), 0);
}

#[test]
fn test_enum_after_return_is_hoisted() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let body = f.create_block(
        vec![f.create_return(None), f.create_enum_declaration(f.create_identifier("E"), vec![])],
        true,
    );
    let function = f.create_function_declaration(false, Some(f.create_identifier("g")), None, vec![], None, Some(body));
    let options = CompilerOptions {
        allow_unreachable_code: Some(false),
        ..Default::default()
    };
    let (_, bound) = bind_with(&f, "a.ts", vec![function], &options);
    assert_eq!(bound.diagnostics().with_code(7027).count(), 0);
}

#[test]
fn test_unreachable_run_skips_leading_enum() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let statements = vec![
        f.create_throw(ident(&f, "e")),
        f.create_enum_declaration(f.create_identifier("E"), vec![]),
        f.create_expression_statement(ident(&f, "after")),
    ];
    let options = CompilerOptions {
        allow_unreachable_code: Some(false),
        ..Default::default()
    };
    let (_, bound) = bind_with(&f, "a.ts", statements, &options);
    let reported: Vec<_> = bound.diagnostics().with_code(7027).collect();
    assert_eq!(reported.len(), 1);
    assert!(reported[0].is_error());
}

#[test]
fn test_keyword_condition_prunes_false_branch() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let body = f.create_block(vec![f.create_expression_statement(ident(&f, "tick"))], true);
    let loop_statement = f.create_while(f.create_true(), body.into());
    let after = f.create_expression_statement(ident(&f, "after"));
    let (file, bound) = bind(&f, "a.ts", vec![loop_statement, after]);
    assert!(bound.is_unreachable(NodeRef::Statement(&file.statements[1])));
}

// ============================================================================
// CommonJS
// ============================================================================

#[test]
fn test_module_exports_marks_commonjs_module() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let target = f.create_property_access(ident(&f, "module"), f.create_identifier("exports"));
    let assignment = f.create_assignment(target, f.create_object_literal(vec![], false));
    let (_, bound) = bind(&f, "lib.js", vec![f.create_expression_statement(assignment)]);
    assert!(bound.common_js_module_indicator().is_some());
    assert!(bound.file_symbol().is_some());
}

#[test]
fn test_exports_property_in_typescript_is_plain_expression() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let target = f.create_property_access(ident(&f, "exports"), f.create_identifier("x"));
    let assignment = f.create_assignment(target, Expression::NumericLiteral(f.create_numeric_literal("1")));
    let (_, bound) = bind(&f, "lib.ts", vec![f.create_expression_statement(assignment)]);
    assert!(bound.common_js_module_indicator().is_none());
}

// ============================================================================
// Expando assignments
// ============================================================================

fn empty_function<'a>(f: &NodeFactory<'a>, name: &str) -> Statement<'a> {
    let body = f.create_block(vec![], false);
    f.create_function_declaration(false, Some(f.create_identifier(name)), None, vec![], None, Some(body))
}

fn define_property<'a>(f: &NodeFactory<'a>, target: &str, name: &str, descriptor: Expression<'a>) -> Statement<'a> {
    let callee = f.create_property_access(ident(f, "Object"), f.create_identifier("defineProperty"));
    let name = Expression::StringLiteral(f.create_string_literal(name, false));
    f.create_expression_statement(f.create_call(callee, None, vec![ident(f, target), name, descriptor]))
}

fn descriptor_function<'a>(f: &NodeFactory<'a>, key: &str) -> ObjectLiteralElement<'a> {
    let function = f.create_function_expression(false, None, None, vec![], None, f.create_block(vec![], false));
    f.create_property_assignment(PropertyName::Identifier(f.create_identifier(key)), function)
}

fn export_flags(f: &NodeFactory<'_>, bound: &BoundFile<'_>, owner: SymbolId, name: &str) -> SymbolFlags {
    let exports = bound.symbol(owner).exports.as_ref().expect("owner exports");
    let symbol = exports.get(&f.interner().intern(name)).expect("exported member");
    bound.symbol(symbol).flags
}

fn file_local(f: &NodeFactory<'_>, file: &SourceFile<'_>, bound: &BoundFile<'_>, name: &str) -> SymbolId {
    let locals = bound.locals_of(NodeRef::SourceFile(file)).expect("file locals");
    locals.get(&f.interner().intern(name)).expect("file local")
}

#[test]
fn test_define_property_descriptor_declares_accessors() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let accessors =
        f.create_object_literal(vec![descriptor_function(&f, "get"), descriptor_function(&f, "set")], false);
    let getter = f.create_object_literal(vec![descriptor_function(&f, "get")], false);
    let value = f.create_object_literal(
        vec![f.create_property_assignment(
            PropertyName::Identifier(f.create_identifier("value")),
            Expression::NumericLiteral(f.create_numeric_literal("1")),
        )],
        false,
    );
    let statements = vec![
        empty_function(&f, "f"),
        define_property(&f, "f", "both", accessors),
        define_property(&f, "f", "read", getter),
        define_property(&f, "f", "plain", value),
    ];
    let (file, bound) = bind(&f, "a.js", statements);
    let owner = file_local(&f, file, &bound, "f");

    let both = export_flags(&f, &bound, owner, "both");
    assert!(both.contains(SymbolFlags::GET_ACCESSOR | SymbolFlags::SET_ACCESSOR));
    assert!(!both.contains(SymbolFlags::PROPERTY));

    let read = export_flags(&f, &bound, owner, "read");
    assert!(read.contains(SymbolFlags::GET_ACCESSOR));
    assert!(!read.contains(SymbolFlags::SET_ACCESSOR));

    let plain = export_flags(&f, &bound, owner, "plain");
    assert!(plain.contains(SymbolFlags::PROPERTY | SymbolFlags::ASSIGNMENT));
    assert!(!plain.intersects(SymbolFlags::GET_ACCESSOR | SymbolFlags::SET_ACCESSOR));
}

#[test]
fn test_function_valued_expando_is_a_method() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let assign = |name: &str, value| {
        let target = f.create_property_access(ident(&f, "f"), f.create_identifier(name));
        f.create_expression_statement(f.create_assignment(target, value))
    };
    let function = f.create_function_expression(false, None, None, vec![], None, f.create_block(vec![], false));
    let statements = vec![
        empty_function(&f, "f"),
        assign("m", function),
        assign("p", Expression::NumericLiteral(f.create_numeric_literal("1"))),
    ];
    let (file, bound) = bind(&f, "a.js", statements);
    let owner = file_local(&f, file, &bound, "f");

    let method = export_flags(&f, &bound, owner, "m");
    assert!(method.contains(SymbolFlags::METHOD | SymbolFlags::ASSIGNMENT));
    assert!(!method.contains(SymbolFlags::PROPERTY));

    let property = export_flags(&f, &bound, owner, "p");
    assert!(property.contains(SymbolFlags::PROPERTY | SymbolFlags::ASSIGNMENT));
    assert!(!property.contains(SymbolFlags::METHOD));
}

#[test]
fn test_nested_assignment_declares_missing_namespaces() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let ns_x = f.create_property_access(ident(&f, "ns"), f.create_identifier("x"));
    let target = f.create_property_access(ns_x, f.create_identifier("y"));
    let assignment = f.create_assignment(target, Expression::NumericLiteral(f.create_numeric_literal("1")));
    let (_, bound) = bind(&f, "a.js", vec![f.create_expression_statement(assignment)]);

    let ns = bound
        .js_global_augmentations()
        .get(&f.interner().intern("ns"))
        .expect("ns declared as a global augmentation");
    assert!(bound.symbol(ns).flags.contains(SymbolFlags::MODULE | SymbolFlags::ASSIGNMENT));

    let x_flags = export_flags(&f, &bound, ns, "x");
    assert!(x_flags.contains(SymbolFlags::MODULE | SymbolFlags::ASSIGNMENT));

    let x = bound.symbol(ns).exports.as_ref().and_then(|e| e.get(&f.interner().intern("x"))).expect("ns.x");
    let y_flags = export_flags(&f, &bound, x, "y");
    assert!(y_flags.contains(SymbolFlags::PROPERTY | SymbolFlags::ASSIGNMENT));
}
