//! Printer integration tests.
//!
//! Trees are built with the node factory and printed whole. Trees carrying
//! source positions are paired with the text those positions index into.

use std::cell::RefCell;
use std::rc::Rc;

use sourcemap::SourceMap;
use tsforge_ast::{
    BindingName, EmitFlags, Expression, GeneratedIdentifierFlags, HasNodeData, ModuleName, NodeFactory, NodeFlags,
    NodeId, NodeRef, SourceFile, Statement, SyntaxKind, TypeNode,
};
use tsforge_core::{CompilerArena, StringInterner};
use tsforge_printer::{
    BundleFileSectionKind, EmitHint, EmitResolver, NoopHandlers, NullResolver, PrintHandlers, Printer, PrinterOptions,
    SourceMapTarget, EXTENDS_HELPER,
};
use tsforge_sourcemap::SourceMapGenerator;

fn ident<'a>(f: &NodeFactory<'a>, name: &str) -> Expression<'a> {
    Expression::Identifier(f.create_identifier(name))
}

fn number<'a>(f: &NodeFactory<'a>) -> TypeNode<'a> {
    f.create_keyword_type_node(SyntaxKind::NumberKeyword)
}

fn var_statement<'a>(f: &NodeFactory<'a>, name: BindingName<'a>, value: &str) -> Statement<'a> {
    let declaration = f.create_variable_declaration(
        name,
        false,
        None,
        Some(Expression::NumericLiteral(f.create_numeric_literal(value))),
    );
    f.create_variable_statement(f.create_variable_declaration_list(vec![declaration], NodeFlags::NONE))
}

fn print<'a>(f: &NodeFactory<'a>, file: &'a SourceFile<'a>, options: PrinterOptions) -> String {
    let mut printer = Printer::new(f.interner(), options, &NullResolver, Box::new(NoopHandlers));
    printer.print_file(file)
}

fn js() -> PrinterOptions {
    PrinterOptions {
        strip_types: true,
        ..Default::default()
    }
}

/// `function add(a: number, b: number): number { return a + b; }`
fn add_function<'a>(f: &NodeFactory<'a>) -> Statement<'a> {
    let param = |name: &str| {
        f.create_parameter_declaration(false, BindingName::Identifier(f.create_identifier(name)), false, Some(number(f)), None)
    };
    let sum = f.create_binary(ident(f, "a"), SyntaxKind::PlusToken, ident(f, "b"));
    let body = f.create_block(vec![f.create_return(Some(sum))], true);
    f.create_function_declaration(
        false,
        Some(f.create_identifier("add")),
        None,
        vec![param("a"), param("b")],
        Some(number(f)),
        Some(body),
    )
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_function_keeps_type_annotations() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let file = f.create_source_file("a.ts", "", vec![add_function(&f)]);

    assert_eq!(
        print(&f, file, PrinterOptions::default()),
        "function add(a: number, b: number): number {\n    return a + b;\n}\n"
    );
}

#[test]
fn test_function_with_types_stripped() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let file = f.create_source_file("a.ts", "", vec![add_function(&f)]);

    assert_eq!(print(&f, file, js()), "function add(a, b) {\n    return a + b;\n}\n");
}

#[test]
fn test_type_only_statements_are_not_printed() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let interface = f.create_interface_declaration(f.create_identifier("Shape"), None, None, Vec::new());
    let statement = var_statement(&f, BindingName::Identifier(f.create_identifier("x")), "1");
    let file = f.create_source_file("a.ts", "", vec![interface, statement]);

    assert_eq!(print(&f, file, js()), "var x = 1;\n");
}

#[test]
fn test_string_named_module_is_not_printed_when_stripping() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let name = ModuleName::StringLiteral(f.create_string_literal("pkg", false));
    let module = f.create_module_declaration(name, Some(f.create_module_block(Vec::new())), NodeFlags::NONE);
    let statement = var_statement(&f, BindingName::Identifier(f.create_identifier("x")), "1");
    let file = f.create_source_file("a.ts", "", vec![module, statement]);

    assert_eq!(print(&f, file, js()), "var x = 1;\n");
}

#[test]
fn test_as_expression_prints_operand_only_when_stripping() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let cast = f.create_as_expression(ident(&f, "value"), f.create_keyword_type_node(SyntaxKind::AnyKeyword));
    let file = f.create_source_file("a.ts", "", vec![f.create_expression_statement(cast)]);

    assert_eq!(print(&f, file, js()), "value;\n");
}

#[test]
fn test_call_with_property_access() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let callee = f.create_property_access(ident(&f, "console"), f.create_identifier("log"));
    let call = f.create_call(callee, None, vec![Expression::StringLiteral(f.create_string_literal("hi", false))]);
    let file = f.create_source_file("a.ts", "", vec![f.create_expression_statement(call)]);

    assert_eq!(print(&f, file, js()), "console.log(\"hi\");\n");
}

// ============================================================================
// Generated names
// ============================================================================

#[test]
fn test_temp_variable_skips_names_used_in_file() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let taken = var_statement(&f, BindingName::Identifier(f.create_identifier("_a")), "0");
    let temp = var_statement(&f, BindingName::Identifier(f.create_temp_variable(false)), "1");
    let file = f.create_source_file("a.ts", "", vec![taken, temp]);

    assert_eq!(print(&f, file, js()), "var _a = 0;\nvar _b = 1;\n");
}

#[test]
fn test_unique_names() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let unique = var_statement(
        &f,
        BindingName::Identifier(f.create_unique_name("x", GeneratedIdentifierFlags::NONE)),
        "1",
    );
    let optimistic = var_statement(&f, BindingName::Identifier(f.create_optimistic_unique_name("y")), "2");
    let file = f.create_source_file("a.ts", "", vec![unique, optimistic]);

    assert_eq!(print(&f, file, js()), "var x_1 = 1;\nvar y = 2;\n");
}

// ============================================================================
// Comments
// ============================================================================

/// `foo();` spanning `pos..end` of the source text.
fn call_statement<'a>(f: &NodeFactory<'a>, pos: u32, name_pos: u32, end: u32) -> Statement<'a> {
    let name_end = name_pos + 3;
    let callee = ident(f, "foo").at(name_pos, name_end);
    let call = f.create_call(callee, None, Vec::new()).at(pos, end - 1);
    f.create_expression_statement(call).at(pos, end)
}

#[test]
fn test_leading_and_trailing_comments_are_kept() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let text = "/* lead */ foo(); // tail\n";
    f.begin_source_file();
    let statement = call_statement(&f, 0, 11, 17);
    let file = f.create_source_file("a.ts", text, vec![statement]);

    assert_eq!(print(&f, file, js()), "/* lead */ foo(); // tail\n");
}

#[test]
fn test_detached_comments_print_before_the_body() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let text = "/*! keep */\n\n/* drop */\nfoo();\n";
    f.begin_source_file();
    let statement = call_statement(&f, 0, 24, 30);
    let file = f.create_source_file("a.ts", text, vec![statement]);

    assert_eq!(print(&f, file, js()), "/*! keep */\n/* drop */\nfoo();\n");
}

#[test]
fn test_remove_comments_keeps_pinned_header() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let text = "/*! keep */\n\n/* drop */\nfoo();\n";
    f.begin_source_file();
    let statement = call_statement(&f, 0, 24, 30);
    let file = f.create_source_file("a.ts", text, vec![statement]);

    let options = PrinterOptions {
        remove_comments: true,
        ..js()
    };
    assert_eq!(print(&f, file, options), "/*! keep */\nfoo();\n");
}

#[test]
fn test_remove_comments_drops_attached_comments() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let text = "/* lead */ foo(); // tail\n";
    f.begin_source_file();
    let statement = call_statement(&f, 0, 11, 17);
    let file = f.create_source_file("a.ts", text, vec![statement]);

    let options = PrinterOptions {
        remove_comments: true,
        ..js()
    };
    assert_eq!(print(&f, file, options), "foo();\n");
}

// ============================================================================
// Bundles
// ============================================================================

fn strict_file<'a>(f: &NodeFactory<'a>, file_name: &str, var_name: &str) -> &'a SourceFile<'a> {
    f.begin_source_file();
    let directive = f.create_prologue_directive("use strict");
    let statement = var_statement(f, BindingName::Identifier(f.create_identifier(var_name)), "1");
    f.create_source_file_with_helpers(file_name, "", vec![directive, statement], vec![&EXTENDS_HELPER])
}

#[test]
fn test_bundle_prints_shared_prologue_once() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let a = strict_file(&f, "a.ts", "a");
    let b = strict_file(&f, "b.ts", "b");
    let bundle = f.create_bundle(vec![a, b], Vec::new());

    let options = PrinterOptions {
        write_bundle_file_info: true,
        no_emit_helpers: true,
        ..js()
    };
    let mut printer = Printer::new(f.interner(), options, &NullResolver, Box::new(NoopHandlers));
    let output = printer.write_bundle(&bundle, None);

    assert_eq!(output.text, "\"use strict\";\nvar a = 1;\nvar b = 1;\n");
    let info = output.bundle_file_info.expect("bundle info");
    let prologue = &info.sections[0];
    assert_eq!(prologue.kind, BundleFileSectionKind::Prologue);
    assert_eq!(prologue.data.as_deref(), Some("use strict"));
    assert_eq!(&output.text[prologue.pos..prologue.end], "\"use strict\";");
    let text = info.sections.last().expect("text section");
    assert_eq!(text.kind, BundleFileSectionKind::Text);
    assert_eq!(&output.text[text.pos..text.end], "var a = 1;\nvar b = 1;\n");

    let json = serde_json::to_value(&info.sections[0]).expect("serializable");
    assert_eq!(json["kind"], "prologue");
}

#[test]
fn test_bundle_writes_shared_reference_directive_once() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let text = "/// <reference path=\"lib.d.ts\" />\n";
    let file = |file_name: &str, var_name: &str| {
        f.begin_source_file();
        let statement = var_statement(&f, BindingName::Identifier(f.create_identifier(var_name)), "1");
        f.create_source_file(file_name, text, vec![statement])
    };
    let a = file("a.ts", "a");
    let b = file("b.ts", "b");
    assert_eq!(a.referenced_files.len(), 1);
    let bundle = f.create_bundle(vec![a, b], Vec::new());

    let options = PrinterOptions {
        write_bundle_file_info: true,
        ..js()
    };
    let mut printer = Printer::new(f.interner(), options, &NullResolver, Box::new(NoopHandlers));
    let output = printer.write_bundle(&bundle, None);

    assert_eq!(output.text.matches("/// <reference path=\"lib.d.ts\" />").count(), 1);
    assert!(output.text.ends_with("var a = 1;\nvar b = 1;\n"));
    let info = output.bundle_file_info.expect("bundle info");
    let references: Vec<_> = info
        .sections
        .iter()
        .filter(|section| section.kind == BundleFileSectionKind::Reference)
        .collect();
    assert_eq!(references.len(), 1);
    assert_eq!(references[0].data.as_deref(), Some("lib.d.ts"));
}

#[test]
fn test_bundle_prints_each_helper_once() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let a = strict_file(&f, "a.ts", "a");
    let b = strict_file(&f, "b.ts", "b");
    let bundle = f.create_bundle(vec![a, b], Vec::new());

    let options = PrinterOptions {
        write_bundle_file_info: true,
        ..js()
    };
    let mut printer = Printer::new(f.interner(), options, &NullResolver, Box::new(NoopHandlers));
    let output = printer.write_bundle(&bundle, None);

    assert_eq!(output.text.matches("var __extends").count(), 1);
    let info = output.bundle_file_info.expect("bundle info");
    let helpers: Vec<_> = info
        .sections
        .iter()
        .filter(|section| section.kind == BundleFileSectionKind::EmitHelpers)
        .collect();
    assert_eq!(helpers.len(), 1);
    assert_eq!(helpers[0].data.as_deref(), Some(EXTENDS_HELPER.name));
    let sources = info.sources.expect("sources");
    assert_eq!(sources.helpers, Some(vec![EXTENDS_HELPER.name.to_string()]));
}

#[test]
fn test_no_emit_helpers_leaves_helpers_out() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let a = strict_file(&f, "a.ts", "a");

    let options = PrinterOptions {
        no_emit_helpers: true,
        ..js()
    };
    assert_eq!(print(&f, a, options), "\"use strict\";\nvar a = 1;\n");
}

// ============================================================================
// Emit pipeline
// ============================================================================

/// Swaps one node for a replacement and records the hooks it sees.
struct Replace<'a> {
    target: NodeId,
    replacement: &'a Expression<'a>,
    log: Rc<RefCell<Vec<&'static str>>>,
}

impl<'a> PrintHandlers<'a> for Replace<'a> {
    fn is_emit_notification_enabled(&self, node: NodeRef<'a>) -> bool {
        node.id() == self.target
    }

    fn on_before_emit_node(&mut self, _hint: EmitHint, _node: NodeRef<'a>) {
        self.log.borrow_mut().push("before");
    }

    fn on_after_emit_node(&mut self, _hint: EmitHint, _node: NodeRef<'a>) {
        self.log.borrow_mut().push("after");
    }

    fn has_substitutions(&self) -> bool {
        true
    }

    fn substitute_node(&mut self, _hint: EmitHint, node: NodeRef<'a>) -> NodeRef<'a> {
        if node.id() != self.target {
            return node;
        }
        self.log.borrow_mut().push("substitute");
        NodeRef::Expression(self.replacement)
    }
}

/// Reports one enum member access as a constant.
struct Constant {
    node: NodeId,
    value: f64,
}

impl EmitResolver for Constant {
    fn has_global_name(&self, _name: &str) -> bool {
        false
    }

    fn get_constant_value(&self, node: NodeId) -> Option<f64> {
        (node == self.node).then_some(self.value)
    }
}

#[test]
fn test_substituted_node_is_commented_and_mapped() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let text = "old;\n/* sub */ renamed;\n";
    f.begin_source_file();
    let old = ident(&f, "old").at(0, 3);
    let target = old.data().id;
    let statement = f.create_expression_statement(old).at(0, 4);
    let file = f.create_source_file("a.ts", text, vec![statement]);
    let replacement = arena.alloc(ident(&f, "renamed").at(4, 22));

    let log = Rc::new(RefCell::new(Vec::new()));
    let handlers = Replace {
        target,
        replacement,
        log: Rc::clone(&log),
    };
    let mut printer = Printer::new(f.interner(), js(), &NullResolver, Box::new(handlers));
    let target = SourceMapTarget::new(SourceMapGenerator::new("a.js".to_string()));
    let output = printer.write_file(file, Some(target));

    assert_eq!(output.text, "/* sub */ renamed;\n");
    assert_eq!(*log.borrow(), vec!["before", "substitute", "after"]);

    let generator = output.source_map.expect("source map");
    let map = SourceMap::from_slice(generator.to_json().as_bytes()).expect("valid source map");
    let token = map.lookup_token(0, 10).expect("token at 0:10");
    assert_eq!((token.get_src_line(), token.get_src_col()), (1, 10));
}

#[test]
fn test_no_substitution_flag_skips_the_handler() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let old = ident(&f, "old").with_emit_flags(EmitFlags::NO_SUBSTITUTION);
    let target = old.data().id;
    let statement = f.create_expression_statement(old);
    let file = f.create_source_file("a.ts", "", vec![statement]);
    let replacement = arena.alloc(ident(&f, "renamed"));

    let log = Rc::new(RefCell::new(Vec::new()));
    let handlers = Replace {
        target,
        replacement,
        log: Rc::clone(&log),
    };
    let mut printer = Printer::new(f.interner(), js(), &NullResolver, Box::new(handlers));
    assert_eq!(printer.print_file(file), "old;\n");
    assert_eq!(*log.borrow(), vec!["before", "after"]);
}

#[test]
fn test_integer_literal_receiver_gets_second_dot() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let to_string = |receiver: &str| {
        let receiver = Expression::NumericLiteral(f.create_numeric_literal(receiver));
        let access = f.create_property_access(receiver, f.create_identifier("toString"));
        f.create_expression_statement(f.create_call(access, None, Vec::new()))
    };
    let file = f.create_source_file("a.ts", "", vec![to_string("1"), to_string("1.5"), to_string("1e3")]);

    assert_eq!(print(&f, file, js()), "1..toString();\n1.5.toString();\n1e3.toString();\n");
}

#[test]
fn test_constant_enum_receiver_gets_second_dot() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let member = f.create_property_access(ident(&f, "E"), f.create_identifier("A"));
    let member_id = member.data().id;
    let access = f.create_property_access(member, f.create_identifier("toString"));
    let statement = f.create_expression_statement(f.create_call(access, None, Vec::new()));
    let file = f.create_source_file("a.ts", "", vec![statement]);
    let inlined = arena.alloc(Expression::NumericLiteral(f.create_numeric_literal("1")));

    let handlers = Replace {
        target: member_id,
        replacement: inlined,
        log: Rc::new(RefCell::new(Vec::new())),
    };
    let resolver = Constant {
        node: member_id,
        value: 1.0,
    };
    let mut printer = Printer::new(f.interner(), js(), &resolver, Box::new(handlers));
    assert_eq!(printer.print_file(file), "1..toString();\n");

    let resolver = Constant {
        node: member_id,
        value: 1.5,
    };
    let mut printer = Printer::new(f.interner(), js(), &resolver, Box::new(NoopHandlers));
    assert_eq!(printer.print_file(file), "E.A.toString();\n");
}

// ============================================================================
// Source maps
// ============================================================================

#[test]
fn test_source_map_points_at_statements() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let text = "foo();\nfoo();\n";
    f.begin_source_file();
    let first = call_statement(&f, 0, 0, 6);
    let second = call_statement(&f, 6, 7, 13);
    let file = f.create_source_file("a.ts", text, vec![first, second]);

    let mut printer = Printer::new(f.interner(), js(), &NullResolver, Box::new(NoopHandlers));
    let target = SourceMapTarget::new(SourceMapGenerator::new("a.js".to_string()));
    let output = printer.write_file(file, Some(target));
    assert_eq!(output.text, "foo();\nfoo();\n");

    let generator = output.source_map.expect("source map");
    let map = SourceMap::from_slice(generator.to_json().as_bytes()).expect("valid source map");
    let token = map.lookup_token(0, 0).expect("token at 0:0");
    assert_eq!(token.get_source(), Some("a.ts"));
    assert_eq!((token.get_src_line(), token.get_src_col()), (0, 0));

    let token = map.lookup_token(1, 0).expect("token at 1:0");
    assert_eq!((token.get_src_line(), token.get_src_col()), (1, 0));
}

#[test]
fn test_synthesized_nodes_are_not_mapped() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let file = f.create_source_file("a.ts", "", vec![add_function(&f)]);

    let mut printer = Printer::new(f.interner(), js(), &NullResolver, Box::new(NoopHandlers));
    let target = SourceMapTarget::new(SourceMapGenerator::new("a.js".to_string()));
    let output = printer.write_file(file, Some(target));

    let generator = output.source_map.expect("source map");
    assert!(generator.mappings().is_empty());
}
