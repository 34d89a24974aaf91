//! Tree queries shared by the binder, printer and emitter.

use std::sync::OnceLock;

use regex::Regex;
use tsforge_core::intern::{InternedString, StringInterner};
use tsforge_scanner::{get_leading_comment_ranges, CommentRange};

use crate::generated::HasNodeData;
use crate::node::*;
use crate::node_ref::NodeRef;
use crate::syntax_kind::SyntaxKind;
use crate::types::{ModifierFlags, NodeFlags};

// ============================================================================
// File names
// ============================================================================

pub fn script_kind_from_file_name(file_name: &str) -> ScriptKind {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".tsx") {
        ScriptKind::TSX
    } else if lower.ends_with(".ts") || lower.ends_with(".mts") || lower.ends_with(".cts") {
        ScriptKind::TS
    } else if lower.ends_with(".jsx") {
        ScriptKind::JSX
    } else if lower.ends_with(".js") || lower.ends_with(".mjs") || lower.ends_with(".cjs") {
        ScriptKind::JS
    } else if lower.ends_with(".json") {
        ScriptKind::JSON
    } else {
        ScriptKind::Unknown
    }
}

pub fn is_declaration_file_name(file_name: &str) -> bool {
    file_name.ends_with(".d.ts") || file_name.ends_with(".d.mts") || file_name.ends_with(".d.cts")
}

// ============================================================================
// Pragmas
// ============================================================================

/// Triple-slash directives found in the leading comments of a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePragmas {
    pub referenced_files: Vec<FileReference>,
    pub type_reference_directives: Vec<FileReference>,
    pub lib_reference_directives: Vec<FileReference>,
    pub has_no_default_lib: bool,
}

fn reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^///\s*<reference\s+(path|types|lib)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("reference directive pattern is valid")
    })
}

fn no_default_lib_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^///\s*<reference\s+no-default-lib\s*=\s*(?:"true"|'true')"#)
            .expect("no-default-lib pattern is valid")
    })
}

/// Read the `/// <reference .../>` directives at the top of `text`.
pub fn collect_file_pragmas(text: &str) -> FilePragmas {
    let mut pragmas = FilePragmas::default();
    for comment in get_leading_comment_ranges(text, 0) {
        if comment.is_multi_line {
            continue;
        }
        let comment_text = comment.text(text);
        if no_default_lib_regex().is_match(comment_text) {
            pragmas.has_no_default_lib = true;
            continue;
        }
        let Some(caps) = reference_regex().captures(comment_text) else {
            continue;
        };
        let file_name = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let reference = FileReference {
            pos: comment.pos,
            end: comment.end,
            file_name,
        };
        match &caps[1] {
            "path" => pragmas.referenced_files.push(reference),
            "types" => pragmas.type_reference_directives.push(reference),
            _ => pragmas.lib_reference_directives.push(reference),
        }
    }
    pragmas
}

/// Leading comments of the file that are triple-slash directives.
pub fn triple_slash_comment_ranges(text: &str) -> Vec<CommentRange> {
    get_leading_comment_ranges(text, 0)
        .into_iter()
        .filter(|c| tsforge_scanner::is_recognized_triple_slash_comment(text, c))
        .collect()
}

// ============================================================================
// Statements
// ============================================================================

/// Whether the statement makes its file an ES module.
pub fn is_external_module_indicator(statement: &Statement<'_>) -> bool {
    match statement {
        Statement::ImportDeclaration(_) | Statement::ExportDeclaration(_) | Statement::ExportAssignment(_) => true,
        Statement::ImportEqualsDeclaration(decl) => {
            matches!(decl.module_reference, ModuleReference::ExternalModuleReference(_))
                || decl.data.has_modifier(ModifierFlags::EXPORT)
        }
        other => other.data().has_modifier(ModifierFlags::EXPORT),
    }
}

/// Number of leading prologue directives.
pub fn prologue_directive_count(statements: &[Statement<'_>]) -> usize {
    statements
        .iter()
        .take_while(|s| s.as_prologue_directive().is_some())
        .count()
}

pub fn is_use_strict_prologue(statement: &Statement<'_>, interner: &StringInterner) -> bool {
    match statement.as_prologue_directive() {
        Some(lit) => interner.resolve(lit.text) == "use strict",
        None => false,
    }
}

pub fn is_iteration_statement(statement: &Statement<'_>, look_in_labeled_statements: bool) -> bool {
    match statement {
        Statement::DoStatement(_)
        | Statement::WhileStatement(_)
        | Statement::ForStatement(_)
        | Statement::ForInStatement(_)
        | Statement::ForOfStatement(_) => true,
        Statement::LabeledStatement(l) => {
            look_in_labeled_statements && is_iteration_statement(l.statement, look_in_labeled_statements)
        }
        _ => false,
    }
}

/// `declare global { }` and `declare module "x" { }`.
pub fn is_ambient_module(decl: &ModuleDeclaration<'_>) -> bool {
    matches!(decl.name, ModuleName::StringLiteral(_)) || decl.data.flags.contains(NodeFlags::GLOBAL_AUGMENTATION)
}

pub fn is_enum_const(decl: &EnumDeclaration<'_>) -> bool {
    decl.data.has_modifier(ModifierFlags::CONST)
}

/// A constructor parameter that also declares a property (`constructor(private x)`).
pub fn is_parameter_property(param: &ParameterDeclaration<'_>) -> bool {
    param.data.has_modifier(ModifierFlags::PARAMETER_PROPERTY_MODIFIER)
}

// ============================================================================
// Names
// ============================================================================

/// Symbol-table key for a property name, or `None` for a non-literal computed name.
pub fn property_name_key(name: &PropertyName<'_>, interner: &StringInterner) -> Option<InternedString> {
    match name {
        PropertyName::Identifier(id) => Some(id.escaped_text),
        PropertyName::PrivateIdentifier(id) => Some(id.escaped_text),
        PropertyName::StringLiteral(lit) => Some(interner.intern_escaped(interner.resolve(lit.text))),
        PropertyName::NumericLiteral(lit) => Some(lit.text),
        PropertyName::Computed(computed) => literal_expression_key(computed.expression, interner),
    }
}

/// Key of a string, numeric or no-substitution template literal.
pub fn literal_expression_key(expr: &Expression<'_>, interner: &StringInterner) -> Option<InternedString> {
    match expr {
        Expression::StringLiteral(lit) => Some(interner.intern_escaped(interner.resolve(lit.text))),
        Expression::NoSubstitutionTemplateLiteral(lit) => Some(interner.intern_escaped(interner.resolve(lit.text))),
        Expression::NumericLiteral(lit) => Some(lit.text),
        _ => None,
    }
}

pub fn module_name_key(name: &ModuleName<'_>, interner: &StringInterner) -> InternedString {
    match name {
        ModuleName::Identifier(id) => id.escaped_text,
        ModuleName::StringLiteral(lit) => interner.intern(&format!("\"{}\"", interner.resolve(lit.text))),
    }
}

/// The name node of a declaration, if it has one.
pub fn declaration_name<'a>(node: NodeRef<'a>) -> Option<NodeRef<'a>> {
    match node {
        NodeRef::Statement(stmt) => match stmt {
            Statement::FunctionDeclaration(f) => f.name.as_ref().map(NodeRef::Identifier),
            Statement::ClassDeclaration(c) => c.name.as_ref().map(NodeRef::Identifier),
            Statement::InterfaceDeclaration(i) => Some(NodeRef::Identifier(&i.name)),
            Statement::TypeAliasDeclaration(t) => Some(NodeRef::Identifier(&t.name)),
            Statement::EnumDeclaration(e) => Some(NodeRef::Identifier(&e.name)),
            Statement::ModuleDeclaration(m) => Some(m.name.as_node()),
            Statement::ImportEqualsDeclaration(i) => Some(NodeRef::Identifier(&i.name)),
            Statement::NamespaceExportDeclaration(n) => Some(NodeRef::Identifier(&n.name)),
            _ => None,
        },
        NodeRef::Expression(expr) => match expr {
            Expression::FunctionExpression(f) => f.name.as_ref().map(NodeRef::Identifier),
            Expression::ClassExpression(c) => c.name.as_ref().map(NodeRef::Identifier),
            _ => None,
        },
        NodeRef::ModuleDeclaration(m) => Some(m.name.as_node()),
        NodeRef::VariableDeclaration(v) => Some(v.name.as_node()),
        NodeRef::Parameter(p) => Some(p.name.as_node()),
        NodeRef::BindingElement(b) => Some(b.name.as_node()),
        NodeRef::TypeParameter(t) => Some(NodeRef::Identifier(&t.name)),
        NodeRef::EnumMember(m) => Some(m.name.as_node()),
        NodeRef::ClassElement(e) => e.name().map(PropertyName::as_node),
        NodeRef::TypeElement(e) => match e {
            TypeElement::PropertySignature(p) => Some(p.name.as_node()),
            TypeElement::MethodSignature(m) => m.name.as_ref().map(PropertyName::as_node),
            _ => None,
        },
        NodeRef::ObjectLiteralElement(e) => match e {
            ObjectLiteralElement::PropertyAssignment(p) => Some(p.name.as_node()),
            ObjectLiteralElement::ShorthandPropertyAssignment(s) => Some(NodeRef::Identifier(&s.name)),
            ObjectLiteralElement::MethodDeclaration(m) => Some(m.name.as_node()),
            ObjectLiteralElement::GetAccessor(a) | ObjectLiteralElement::SetAccessor(a) => Some(a.name.as_node()),
            ObjectLiteralElement::SpreadAssignment(_) => None,
        },
        NodeRef::ImportClause(c) => c.name.as_ref().map(NodeRef::Identifier),
        NodeRef::NamespaceImport(n) => Some(NodeRef::Identifier(&n.name)),
        NodeRef::ImportSpecifier(s) => Some(NodeRef::Identifier(&s.name)),
        _ => None,
    }
}

/// Unescaped text of a declaration name that is an identifier or a literal.
pub fn declaration_name_text<'i>(node: NodeRef<'_>, interner: &'i StringInterner) -> Option<&'i str> {
    match declaration_name(node)? {
        NodeRef::Identifier(id) => Some(interner.unescape(id.escaped_text)),
        NodeRef::StringLiteral(lit) => Some(interner.resolve(lit.text)),
        NodeRef::NumericLiteral(lit) => Some(interner.resolve(lit.text)),
        _ => None,
    }
}

/// Text of the module specifier of an import or export declaration.
pub fn external_module_name_text<'i>(stmt: &Statement<'_>, interner: &'i StringInterner) -> Option<&'i str> {
    let specifier = match stmt {
        Statement::ImportDeclaration(i) => Some(i.module_specifier),
        Statement::ExportDeclaration(e) => e.module_specifier,
        Statement::ImportEqualsDeclaration(i) => match &i.module_reference {
            ModuleReference::ExternalModuleReference(r) => Some(r.expression),
            ModuleReference::EntityName(_) => None,
        },
        _ => None,
    }?;
    match specifier {
        Expression::StringLiteral(lit) => Some(interner.resolve(lit.text)),
        _ => None,
    }
}

/// Whether a keyword kind may appear as an expression (`this`, `null`, ...).
pub fn is_keyword_expression_kind(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::ImportKeyword
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_kind_from_extension() {
        assert_eq!(script_kind_from_file_name("a.ts"), ScriptKind::TS);
        assert_eq!(script_kind_from_file_name("a.d.ts"), ScriptKind::TS);
        assert_eq!(script_kind_from_file_name("a.TSX"), ScriptKind::TSX);
        assert_eq!(script_kind_from_file_name("a.cjs"), ScriptKind::JS);
        assert_eq!(script_kind_from_file_name("tsconfig.json"), ScriptKind::JSON);
        assert_eq!(script_kind_from_file_name("README"), ScriptKind::Unknown);
        assert!(is_declaration_file_name("lib.d.ts"));
        assert!(!is_declaration_file_name("lib.ts"));
    }

    #[test]
    fn test_collect_file_pragmas() {
        let text = "/// <reference path=\"a.ts\" />\n/// <reference types='node' />\n/// <reference lib=\"es2015\" />\n/// <reference no-default-lib=\"true\"/>\nlet x;";
        let pragmas = collect_file_pragmas(text);
        assert_eq!(pragmas.referenced_files.len(), 1);
        assert_eq!(pragmas.referenced_files[0].file_name, "a.ts");
        assert_eq!(pragmas.referenced_files[0].pos, 0);
        assert_eq!(pragmas.type_reference_directives[0].file_name, "node");
        assert_eq!(pragmas.lib_reference_directives[0].file_name, "es2015");
        assert!(pragmas.has_no_default_lib);
    }

    #[test]
    fn test_pragmas_stop_at_first_token() {
        let text = "let x;\n/// <reference path=\"a.ts\" />";
        assert_eq!(collect_file_pragmas(text), FilePragmas::default());
    }

    #[test]
    fn test_triple_slash_comment_ranges_skip_ordinary_comments() {
        let text = "// plain\n/// <reference path=\"a.ts\" />\nx";
        let ranges = triple_slash_comment_ranges(text);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].text(text), "/// <reference path=\"a.ts\" />");
    }
}
