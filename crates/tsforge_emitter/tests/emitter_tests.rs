//! Emitter integration tests.
//!
//! Programs are built with the node factory and emitted into an in-memory
//! host that records every write.

use sourcemap::SourceMap;
use std::cell::RefCell;
use std::collections::BTreeMap;
use tsforge_ast::{
    BindingName, Expression, HasNodeData, ModifierFlags, NodeFactory, NodeFlags, SourceFile, Statement, SyntaxKind,
    UnparsedSource,
};
use tsforge_core::{CompilerArena, StringInterner};
use tsforge_emitter::{
    emit_files, get_output_paths_for, get_output_paths_for_bundle, read_build_info, reconstruct_bundle_text,
    BuildInfoReconstruction, EmitError, EmitFileNames, EmitHost, EmitOptions,
};
use tsforge_printer::{BundleFileSectionKind, NullResolver};
use tsforge_tsoptions::{CompilerOptions, JsxEmit};

#[derive(Debug, Clone)]
struct Written {
    text: String,
    byte_order_mark: bool,
}

struct MemoryHost<'a, 'i> {
    options: CompilerOptions,
    files: Vec<&'a SourceFile<'a>>,
    interner: &'i StringInterner,
    declarations: Vec<&'a SourceFile<'a>>,
    prepends: Vec<UnparsedSource>,
    blocked: Vec<String>,
    failing: Vec<String>,
    outputs: RefCell<BTreeMap<String, Written>>,
}

impl<'a, 'i> MemoryHost<'a, 'i> {
    fn new(interner: &'i StringInterner, options: CompilerOptions, files: Vec<&'a SourceFile<'a>>) -> Self {
        Self {
            options,
            files,
            interner,
            declarations: Vec::new(),
            prepends: Vec::new(),
            blocked: Vec::new(),
            failing: Vec::new(),
            outputs: RefCell::new(BTreeMap::new()),
        }
    }

    fn output(&self, path: &str) -> Option<Written> {
        self.outputs.borrow().get(path).cloned()
    }

    fn text(&self, path: &str) -> String {
        self.output(path).map(|w| w.text).unwrap_or_else(|| panic!("{path} was not written"))
    }
}

impl<'a, 'i> EmitHost<'a> for MemoryHost<'a, 'i> {
    fn compiler_options(&self) -> &CompilerOptions {
        &self.options
    }

    fn source_files(&self) -> &[&'a SourceFile<'a>] {
        &self.files
    }

    fn interner(&self) -> &StringInterner {
        self.interner
    }

    fn current_directory(&self) -> &str {
        "/proj"
    }

    fn use_case_sensitive_file_names(&self) -> bool {
        true
    }

    fn write_file(&self, path: &str, text: &str, write_byte_order_mark: bool, _sources: &[&str]) -> Result<(), EmitError> {
        if self.failing.iter().any(|p| p == path) {
            return Err(EmitError::write(path, "permission denied"));
        }
        self.outputs.borrow_mut().insert(
            path.to_string(),
            Written {
                text: text.to_string(),
                byte_order_mark: write_byte_order_mark,
            },
        );
        Ok(())
    }

    fn read_file(&self, path: &str) -> Option<String> {
        self.output(path).map(|w| w.text)
    }

    fn is_emit_blocked(&self, path: &str) -> bool {
        self.blocked.iter().any(|p| p == path)
    }

    fn declaration_file(&self, file: &'a SourceFile<'a>) -> Option<&'a SourceFile<'a>> {
        let name = file.file_name.trim_end_matches(".ts");
        self.declarations
            .iter()
            .copied()
            .find(|decl| decl.file_name.trim_end_matches(".d.ts") == name)
    }

    fn prepends(&self) -> Vec<UnparsedSource> {
        self.prepends.clone()
    }
}

fn var_statement<'a>(f: &NodeFactory<'a>, name: &str) -> Statement<'a> {
    let declaration = f.create_variable_declaration(
        BindingName::Identifier(f.create_identifier(name)),
        false,
        None,
        Some(Expression::NumericLiteral(f.create_numeric_literal("1"))),
    );
    f.create_variable_statement(f.create_variable_declaration_list(vec![declaration], NodeFlags::NONE))
}

fn var_file<'a>(f: &NodeFactory<'a>, file_name: &str, name: &str) -> &'a SourceFile<'a> {
    f.begin_source_file();
    let statement = var_statement(f, name);
    f.create_source_file(file_name, "", vec![statement])
}

fn strict_file<'a>(f: &NodeFactory<'a>, file_name: &str, name: &str) -> &'a SourceFile<'a> {
    f.begin_source_file();
    let directive = f.create_prologue_directive("use strict");
    let statement = var_statement(f, name);
    f.create_source_file(file_name, "", vec![directive, statement])
}

fn paths_for<'a>(host: &MemoryHost<'a, '_>, index: usize) -> EmitFileNames {
    get_output_paths_for(host.files[index], &host.options, host, false)
}

// ============================================================================
// Output paths
// ============================================================================

#[test]
fn test_out_dir_keeps_relative_structure() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let a = var_file(&f, "/proj/src/a.ts", "a");
    let b = var_file(&f, "/proj/src/lib/b.ts", "b");
    let options = CompilerOptions {
        out_dir: Some("dist".to_string()),
        declaration: Some(true),
        source_map: Some(true),
        ..Default::default()
    };
    let host = MemoryHost::new(f.interner(), options, vec![a, b]);

    let paths = paths_for(&host, 0);
    assert_eq!(paths.js_file_path.as_deref(), Some("dist/a.js"));
    assert_eq!(paths.source_map_file_path.as_deref(), Some("dist/a.js.map"));
    assert_eq!(paths.declaration_file_path.as_deref(), Some("dist/a.d.ts"));
    assert_eq!(paths.declaration_map_path, None);
    assert_eq!(paths.build_info_path, None);

    let paths = paths_for(&host, 1);
    assert_eq!(paths.js_file_path.as_deref(), Some("dist/lib/b.js"));
}

#[test]
fn test_outputs_beside_input_without_out_dir() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let a = var_file(&f, "/proj/src/view.tsx", "a");
    let options = CompilerOptions {
        jsx: Some(JsxEmit::Preserve),
        ..Default::default()
    };
    let host = MemoryHost::new(f.interner(), options, vec![a]);

    let paths = paths_for(&host, 0);
    assert_eq!(paths.js_file_path.as_deref(), Some("/proj/src/view.jsx"));
    assert_eq!(paths.source_map_file_path, None);
    assert_eq!(paths.declaration_file_path, None);
}

#[test]
fn test_declaration_only_mode_has_no_js() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let a = var_file(&f, "/proj/src/a.ts", "a");
    let options = CompilerOptions {
        declaration: Some(true),
        declaration_map: Some(true),
        emit_declaration_only: Some(true),
        source_map: Some(true),
        ..Default::default()
    };
    let host = MemoryHost::new(f.interner(), options, vec![a]);

    let paths = paths_for(&host, 0);
    assert_eq!(paths.js_file_path, None);
    assert_eq!(paths.source_map_file_path, None);
    assert_eq!(paths.declaration_file_path.as_deref(), Some("/proj/src/a.d.ts"));
    assert_eq!(paths.declaration_map_path.as_deref(), Some("/proj/src/a.d.ts.map"));
}

#[test]
fn test_declaration_inputs_have_no_outputs() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let types = var_file(&f, "/proj/src/types.d.ts", "t");
    let options = CompilerOptions {
        declaration: Some(true),
        ..Default::default()
    };
    let host = MemoryHost::new(f.interner(), options, vec![types]);

    assert_eq!(paths_for(&host, 0), EmitFileNames::default());
}

#[test]
fn test_json_is_not_emitted_onto_itself() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let data = f.create_source_file("/proj/data.json", "", Vec::new());
    let host = MemoryHost::new(f.interner(), CompilerOptions::default(), vec![data]);
    assert_eq!(paths_for(&host, 0).js_file_path, None);

    let options = CompilerOptions {
        out_dir: Some("dist".to_string()),
        source_map: Some(true),
        declaration: Some(true),
        ..Default::default()
    };
    let host = MemoryHost::new(f.interner(), options, vec![data]);
    let paths = paths_for(&host, 0);
    assert_eq!(paths.js_file_path.as_deref(), Some("dist/data.json"));
    assert_eq!(paths.source_map_file_path, None);
    assert_eq!(paths.declaration_file_path, None);
}

#[test]
fn test_bundle_paths_derive_from_out_file() {
    let options = CompilerOptions {
        out_file: Some("out/app.js".to_string()),
        source_map: Some(true),
        declaration_map: Some(true),
        composite: Some(true),
        ..Default::default()
    };
    let paths = get_output_paths_for_bundle(&options, false).expect("bundle paths");
    assert_eq!(paths.js_file_path.as_deref(), Some("out/app.js"));
    assert_eq!(paths.source_map_file_path.as_deref(), Some("out/app.js.map"));
    assert_eq!(paths.declaration_file_path.as_deref(), Some("out/app.d.ts"));
    assert_eq!(paths.declaration_map_path.as_deref(), Some("out/app.d.ts.map"));
    assert_eq!(paths.build_info_path.as_deref(), Some("out/app.tsbuildinfo"));

    assert!(get_output_paths_for_bundle(&CompilerOptions::default(), false).is_none());
}

// ============================================================================
// Emitting files
// ============================================================================

#[test]
fn test_emit_writes_javascript() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let a = var_file(&f, "/proj/src/a.ts", "x");
    let options = CompilerOptions {
        emit_bom: Some(true),
        ..Default::default()
    };
    let host = MemoryHost::new(f.interner(), options, vec![a]);

    let result = emit_files(&host, &NullResolver, EmitOptions::default());
    assert!(!result.emit_skipped);
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.emitted_files, vec!["/proj/src/a.js".to_string()]);
    let written = host.output("/proj/src/a.js").expect("js output");
    assert_eq!(written.text, "var x = 1;\n");
    assert!(written.byte_order_mark);
}

#[test]
fn test_source_map_is_written_and_linked() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    f.begin_source_file();
    let callee = Expression::Identifier(f.create_identifier("foo")).at(0, 3);
    let call = f.create_call(callee, None, Vec::new()).at(0, 5);
    let statement = f.create_expression_statement(call).at(0, 6);
    let a = f.create_source_file("/proj/src/a.ts", "foo();\n", vec![statement]);
    let options = CompilerOptions {
        source_map: Some(true),
        ..Default::default()
    };
    let host = MemoryHost::new(f.interner(), options, vec![a]);

    let result = emit_files(&host, &NullResolver, EmitOptions::default());
    assert_eq!(
        result.emitted_files,
        vec!["/proj/src/a.js.map".to_string(), "/proj/src/a.js".to_string()]
    );
    assert_eq!(host.text("/proj/src/a.js"), "foo();\n//# sourceMappingURL=a.js.map");

    let map = SourceMap::from_slice(host.text("/proj/src/a.js.map").as_bytes()).expect("valid source map");
    assert_eq!(map.get_file(), Some("a.js"));
    assert_eq!(map.get_source(0), Some("a.ts"));
    let token = map.lookup_token(0, 0).expect("token at 0:0");
    assert_eq!((token.get_src_line(), token.get_src_col()), (0, 0));
}

#[test]
fn test_inline_source_map_has_no_map_file() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let a = var_file(&f, "/proj/src/a.ts", "x");
    let options = CompilerOptions {
        inline_source_map: Some(true),
        ..Default::default()
    };
    let host = MemoryHost::new(f.interner(), options, vec![a]);

    let result = emit_files(&host, &NullResolver, EmitOptions::default());
    assert_eq!(result.emitted_files, vec!["/proj/src/a.js".to_string()]);
    assert!(host
        .text("/proj/src/a.js")
        .starts_with("var x = 1;\n//# sourceMappingURL=data:application/json;base64,"));
}

#[test]
fn test_declaration_tree_keeps_types() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let a = var_file(&f, "/proj/src/a.ts", "x");
    f.begin_source_file();
    let declaration = f.create_variable_declaration(
        BindingName::Identifier(f.create_identifier("x")),
        false,
        Some(f.create_keyword_type_node(SyntaxKind::NumberKeyword)),
        None,
    );
    let statement = f
        .create_variable_statement(f.create_variable_declaration_list(vec![declaration], NodeFlags::NONE))
        .with_modifiers(ModifierFlags::AMBIENT);
    let dts = f.create_source_file("/proj/src/a.d.ts", "", vec![statement]);
    let options = CompilerOptions {
        declaration: Some(true),
        ..Default::default()
    };
    let mut host = MemoryHost::new(f.interner(), options, vec![a]);
    host.declarations.push(dts);

    let result = emit_files(&host, &NullResolver, EmitOptions::default());
    assert_eq!(
        result.emitted_files,
        vec!["/proj/src/a.js".to_string(), "/proj/src/a.d.ts".to_string()]
    );
    assert_eq!(host.text("/proj/src/a.js"), "var x = 1;\n");
    assert!(host.text("/proj/src/a.d.ts").contains("x: number;"));

    let only = EmitOptions {
        only_declarations: true,
        ..Default::default()
    };
    let result = emit_files(&host, &NullResolver, only);
    assert_eq!(result.emitted_files, vec!["/proj/src/a.d.ts".to_string()]);
}

// ============================================================================
// Skipped emit and failures
// ============================================================================

#[test]
fn test_no_emit_skips_everything() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let a = var_file(&f, "/proj/src/a.ts", "x");
    let options = CompilerOptions {
        no_emit: Some(true),
        ..Default::default()
    };
    let host = MemoryHost::new(f.interner(), options, vec![a]);

    let result = emit_files(&host, &NullResolver, EmitOptions::default());
    assert!(result.emit_skipped);
    assert!(result.emitted_files.is_empty());
    assert!(host.outputs.borrow().is_empty());
}

#[test]
fn test_blocked_output_marks_emit_skipped() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let a = var_file(&f, "/proj/src/a.ts", "a");
    let b = var_file(&f, "/proj/src/b.ts", "b");
    let mut host = MemoryHost::new(f.interner(), CompilerOptions::default(), vec![a, b]);
    host.blocked.push("/proj/src/a.js".to_string());

    let result = emit_files(&host, &NullResolver, EmitOptions::default());
    assert!(result.emit_skipped);
    assert_eq!(result.emitted_files, vec!["/proj/src/b.js".to_string()]);
    assert!(host.output("/proj/src/a.js").is_none());
}

#[test]
fn test_write_failure_becomes_diagnostic() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let a = var_file(&f, "/proj/src/a.ts", "a");
    let b = var_file(&f, "/proj/src/b.ts", "b");
    let mut host = MemoryHost::new(f.interner(), CompilerOptions::default(), vec![a, b]);
    host.failing.push("/proj/src/a.js".to_string());

    let result = emit_files(&host, &NullResolver, EmitOptions::default());
    assert!(!result.emit_skipped);
    assert_eq!(result.emitted_files, vec!["/proj/src/b.js".to_string()]);
    let diagnostics = result.diagnostics.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, 5033);
    assert_eq!(
        diagnostics[0].message_text,
        "Could not write file '/proj/src/a.js': permission denied."
    );
}

#[test]
fn test_output_that_would_overwrite_input_is_reported() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let a = var_file(&f, "/proj/src/a.js", "a");
    let options = CompilerOptions {
        allow_js: Some(true),
        ..Default::default()
    };
    let host = MemoryHost::new(f.interner(), options, vec![a]);

    let result = emit_files(&host, &NullResolver, EmitOptions::default());
    assert!(result.emit_skipped);
    assert!(result.emitted_files.is_empty());
    assert_eq!(result.diagnostics.with_code(5055).count(), 1);
}

// ============================================================================
// Bundles and build info
// ============================================================================

fn bundle_options() -> CompilerOptions {
    CompilerOptions {
        out_file: Some("/proj/out/app.js".to_string()),
        composite: Some(true),
        ..Default::default()
    }
}

#[test]
fn test_bundle_writes_build_info() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let a = strict_file(&f, "/proj/src/a.ts", "a");
    let b = strict_file(&f, "/proj/src/b.ts", "b");
    let host = MemoryHost::new(f.interner(), bundle_options(), vec![a, b]);

    let result = emit_files(&host, &NullResolver, EmitOptions::default());
    assert!(!result.emit_skipped);
    assert_eq!(
        result.emitted_files,
        vec!["/proj/out/app.js".to_string(), "/proj/out/app.tsbuildinfo".to_string()]
    );
    assert_eq!(host.text("/proj/out/app.js"), "\"use strict\";\nvar a = 1;\nvar b = 1;\n");

    let info = read_build_info(&host, "/proj/out/app.tsbuildinfo").expect("build info");
    let bundle = info.bundle.expect("bundle record");
    assert_eq!(bundle.common_source_directory, "../src");
    assert_eq!(bundle.source_files, vec!["../src/a.ts".to_string(), "../src/b.ts".to_string()]);
    assert!(bundle.dts.is_none());
    let js = bundle.js.expect("js sections");
    assert_eq!(js.sections[0].kind, BundleFileSectionKind::Prologue);
    assert_eq!(js.sections.last().map(|s| s.kind), Some(BundleFileSectionKind::Text));
    let prologues = js.sources.and_then(|s| s.prologues).expect("prologues");
    assert_eq!(prologues.len(), 2);
    assert_eq!(prologues[1].file, 1);
    assert_eq!(prologues[1].directives[0].expression.text, "use strict");

    let json: serde_json::Value =
        serde_json::from_str(&host.text("/proj/out/app.tsbuildinfo")).expect("json build info");
    assert!(json["bundle"]["commonSourceDirectory"].is_string());
    assert!(json["bundle"]["sourceFiles"].is_array());
    assert!(json["version"].is_string());
}

#[test]
fn test_bundle_text_reconstructs_from_build_info() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let a = strict_file(&f, "/proj/src/a.ts", "a");
    let b = strict_file(&f, "/proj/src/b.ts", "b");
    let host = MemoryHost::new(f.interner(), bundle_options(), vec![a, b]);
    emit_files(&host, &NullResolver, EmitOptions::default());

    match reconstruct_bundle_text(&host) {
        BuildInfoReconstruction::Reconstructed(bundle) => {
            assert_eq!(bundle.js.prologues, vec!["use strict".to_string()]);
            assert_eq!(bundle.js.text, "var a = 1;\nvar b = 1;\n");
            assert_eq!(bundle.js.file_name, "/proj/out/app.js");
            assert!(bundle.dts.is_none());
        }
        other => panic!("expected reconstruction, got {other:?}"),
    }

    host.outputs.borrow_mut().remove("/proj/out/app.js");
    match reconstruct_bundle_text(&host) {
        BuildInfoReconstruction::CouldNotRead(path) => assert_eq!(path, "/proj/out/app.js"),
        other => panic!("expected CouldNotRead, got {other:?}"),
    }
}

#[test]
fn test_reconstruct_without_out_file() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let a = var_file(&f, "/proj/src/a.ts", "a");
    let host = MemoryHost::new(f.interner(), CompilerOptions::default(), vec![a]);

    assert!(matches!(reconstruct_bundle_text(&host), BuildInfoReconstruction::NotBundled));
}

#[test]
fn test_prepends_print_ahead_of_bundle_files() {
    let arena = CompilerArena::new();
    let f = NodeFactory::new(&arena, StringInterner::new());
    let a = strict_file(&f, "/proj/src/a.ts", "a");
    let b = strict_file(&f, "/proj/src/b.ts", "b");
    let mut host = MemoryHost::new(f.interner(), bundle_options(), vec![a, b]);
    host.prepends.push(UnparsedSource {
        file_name: "/lib/out/lib.js".to_string(),
        text: "var lib = 0;\n".to_string(),
        prologues: vec!["use strict".to_string()],
        ..Default::default()
    });

    emit_files(&host, &NullResolver, EmitOptions::default());
    assert_eq!(
        host.text("/proj/out/app.js"),
        "\"use strict\";\nvar lib = 0;\nvar a = 1;\nvar b = 1;\n"
    );

    let info = read_build_info(&host, "/proj/out/app.tsbuildinfo").expect("build info");
    let js = info.bundle.and_then(|b| b.js).expect("js sections");
    let kinds: Vec<_> = js.sections.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            BundleFileSectionKind::Prologue,
            BundleFileSectionKind::Prepend,
            BundleFileSectionKind::Text
        ]
    );
}
