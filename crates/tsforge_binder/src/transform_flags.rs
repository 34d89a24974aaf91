//! Syntax-feature summaries for down-level transforms.
//!
//! Every node gets the union of its own features and the features of its
//! children, minus what the child's kind stops from leaking out (a
//! function's `yield` does not make the enclosing file a generator). The
//! fold is bottom-up and cached per node; a cached entry carries
//! `HAS_COMPUTED_FLAGS` and is never recomputed unless invalidated.

use rustc_hash::FxHashMap;
use tsforge_ast::{
    for_each_child, ArrayBindingElement, ClassElement, Expression, HasNodeData, ModifierFlags,
    NodeFlags, NodeId, NodeRef, SourceFile, Statement, SyntaxKind, TokenFlags, TransformFlags,
};

/// Cache of computed transform flags, keyed by node.
#[derive(Debug, Clone, Default)]
pub struct TransformFlagCache {
    flags: FxHashMap<NodeId, TransformFlags>,
}

impl TransformFlagCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node: NodeId) -> Option<TransformFlags> {
        self.flags.get(&node).copied()
    }

    /// Forget a node and all of its ancestors, for example after a
    /// transform replaced its subtree. Every ancestor folded the old flags
    /// in, so `parent_of` must lead up to the root.
    pub fn invalidate<'a>(&mut self, node: NodeRef<'a>, parent_of: impl Fn(NodeRef<'a>) -> Option<NodeRef<'a>>) {
        let mut current = Some(node);
        while let Some(node) = current {
            self.flags.remove(&node.id());
            current = parent_of(node);
        }
    }

    pub fn into_map(self) -> FxHashMap<NodeId, TransformFlags> {
        self.flags
    }

    /// Flags of `node` and its whole subtree.
    pub fn compute(&mut self, node: NodeRef<'_>) -> TransformFlags {
        let id = node.id();
        if let Some(cached) = self.flags.get(&id) {
            if cached.contains(TransformFlags::HAS_COMPUTED_FLAGS) {
                return *cached;
            }
        }
        let flags = match type_only_flags(node) {
            Some(flags) => flags,
            None => {
                let mut subtree = TransformFlags::NONE;
                for_each_child(node, |child| {
                    let child_flags = self.compute(child);
                    subtree |= child_flags & !subtree_exclusions(child);
                });
                subtree | intrinsic_flags(node, subtree)
            }
        } | TransformFlags::HAS_COMPUTED_FLAGS;
        if id != NodeId::INVALID {
            self.flags.insert(id, flags);
        }
        flags
    }
}

/// Transform flags for every node of `file`.
pub fn compute_transform_flags(file: &SourceFile<'_>) -> FxHashMap<NodeId, TransformFlags> {
    let mut cache = TransformFlagCache::new();
    cache.compute(NodeRef::SourceFile(file));
    cache.into_map()
}

/// Nodes that vanish entirely when types are erased.
fn type_only_flags(node: NodeRef<'_>) -> Option<TransformFlags> {
    let erased = match node {
        NodeRef::TypeNode(_) | NodeRef::TypeParameter(_) | NodeRef::TypeElement(_) => true,
        NodeRef::Statement(stmt) => match stmt {
            Statement::InterfaceDeclaration(_) | Statement::TypeAliasDeclaration(_) => true,
            Statement::FunctionDeclaration(f) => f.body.is_none(),
            Statement::ImportDeclaration(i) => i.import_clause.as_ref().is_some_and(|c| c.is_type_only),
            Statement::ExportDeclaration(e) => e.is_type_only,
            _ => stmt.data().has_modifier(ModifierFlags::AMBIENT),
        },
        NodeRef::ClassElement(element) => match element {
            ClassElement::IndexSignature(_) => true,
            ClassElement::MethodDeclaration(m) => m.body.is_none(),
            ClassElement::Constructor(c) => c.body.is_none(),
            ClassElement::GetAccessor(a) | ClassElement::SetAccessor(a) => a.body.is_none(),
            _ => element.data().has_modifier(ModifierFlags::AMBIENT),
        },
        NodeRef::HeritageClause(h) => h.token == SyntaxKind::ImplementsKeyword,
        NodeRef::ImportSpecifier(s) => s.is_type_only,
        _ => false,
    };
    erased.then_some(TransformFlags::CONTAINS_TYPE_SCRIPT)
}

fn function_flags(is_async: bool, is_generator: bool) -> TransformFlags {
    match (is_async, is_generator) {
        (true, true) => TransformFlags::CONTAINS_ES2018,
        (true, false) => TransformFlags::CONTAINS_ES2017,
        (false, true) => TransformFlags::CONTAINS_GENERATOR | TransformFlags::CONTAINS_ES2015,
        (false, false) => TransformFlags::NONE,
    }
}

fn modifier_flags(modifiers: ModifierFlags) -> TransformFlags {
    let mut flags = TransformFlags::NONE;
    if modifiers.intersects(ModifierFlags::TYPE_SCRIPT_MODIFIER) {
        flags |= TransformFlags::CONTAINS_TYPE_SCRIPT;
    }
    if modifiers.contains(ModifierFlags::ACCESSOR) {
        flags |= TransformFlags::CONTAINS_CLASS_FIELDS;
    }
    flags
}

/// What the node itself contributes, given the flags of its subtree.
fn intrinsic_flags(node: NodeRef<'_>, subtree: TransformFlags) -> TransformFlags {
    let modifiers = modifier_flags(node.data().modifier_flags);
    let is_async = node.data().has_modifier(ModifierFlags::ASYNC);
    let own = match node {
        NodeRef::Statement(stmt) => match stmt {
            Statement::FunctionDeclaration(f) => {
                TransformFlags::CONTAINS_HOISTED_DECLARATION_OR_COMPLETION
                    | function_flags(is_async, f.asterisk_token.is_some())
            }
            Statement::ClassDeclaration(c) => class_flags(c.members, subtree),
            Statement::EnumDeclaration(_) | Statement::ModuleDeclaration(_) | Statement::ImportEqualsDeclaration(_) => {
                TransformFlags::CONTAINS_TYPE_SCRIPT
            }
            Statement::ExportAssignment(e) if e.is_export_equals => TransformFlags::CONTAINS_TYPE_SCRIPT,
            Statement::ReturnStatement(_) => {
                TransformFlags::CONTAINS_ES2018 | TransformFlags::CONTAINS_HOISTED_DECLARATION_OR_COMPLETION
            }
            Statement::BreakStatement(_) | Statement::ContinueStatement(_) => {
                TransformFlags::CONTAINS_HOISTED_DECLARATION_OR_COMPLETION
            }
            Statement::ForOfStatement(f) => {
                let mut flags = TransformFlags::CONTAINS_ES2015;
                if f.await_modifier.is_some() {
                    flags |= TransformFlags::CONTAINS_ES2018;
                }
                flags
            }
            _ => TransformFlags::NONE,
        },
        NodeRef::VariableDeclarationList(list) => {
            if list.data.flags.intersects(NodeFlags::BLOCK_SCOPED) {
                TransformFlags::CONTAINS_ES2015 | TransformFlags::CONTAINS_BLOCK_SCOPED_BINDING
            } else {
                TransformFlags::CONTAINS_HOISTED_DECLARATION_OR_COMPLETION
            }
        }
        NodeRef::VariableDeclaration(v) if v.exclamation_token.is_some() => TransformFlags::CONTAINS_TYPE_SCRIPT,
        NodeRef::Expression(expr) => expression_flags(expr, is_async),
        NodeRef::Parameter(p) => {
            let mut flags = TransformFlags::NONE;
            if p.question_token.is_some() {
                flags |= TransformFlags::CONTAINS_TYPE_SCRIPT;
            }
            if p.dot_dot_dot_token.is_some() {
                flags |= TransformFlags::CONTAINS_ES2015 | TransformFlags::CONTAINS_REST_OR_SPREAD;
            }
            if p.initializer.is_some() {
                flags |= TransformFlags::CONTAINS_ES2015;
            }
            if tsforge_ast::utilities::is_parameter_property(p) {
                flags |= TransformFlags::CONTAINS_TYPE_SCRIPT | TransformFlags::CONTAINS_TYPE_SCRIPT_CLASS_SYNTAX;
            }
            flags
        }
        NodeRef::ObjectBindingPattern(pattern) => {
            let mut flags = TransformFlags::CONTAINS_ES2015 | TransformFlags::CONTAINS_BINDING_PATTERN;
            if pattern.elements.iter().any(|e| e.dot_dot_dot_token.is_some()) {
                flags |= TransformFlags::CONTAINS_ES2018 | TransformFlags::CONTAINS_OBJECT_REST_OR_SPREAD;
            }
            flags
        }
        NodeRef::ArrayBindingPattern(pattern) => {
            let mut flags = TransformFlags::CONTAINS_ES2015 | TransformFlags::CONTAINS_BINDING_PATTERN;
            let has_rest = pattern.elements.iter().any(|e| {
                matches!(e, ArrayBindingElement::BindingElement(b) if b.dot_dot_dot_token.is_some())
            });
            if has_rest {
                flags |= TransformFlags::CONTAINS_REST_OR_SPREAD;
            }
            flags
        }
        NodeRef::ComputedPropertyName(_) => {
            TransformFlags::CONTAINS_ES2015 | TransformFlags::CONTAINS_COMPUTED_PROPERTY_NAME
        }
        NodeRef::ClassElement(element) => match element {
            ClassElement::PropertyDeclaration(p) => {
                let mut flags = TransformFlags::CONTAINS_CLASS_FIELDS;
                if p.question_token.is_some() || p.exclamation_token.is_some() {
                    flags |= TransformFlags::CONTAINS_TYPE_SCRIPT;
                }
                flags
            }
            ClassElement::MethodDeclaration(m) => {
                TransformFlags::CONTAINS_ES2015 | function_flags(is_async, m.asterisk_token.is_some())
            }
            ClassElement::Constructor(_) => TransformFlags::CONTAINS_ES2015,
            ClassElement::ClassStaticBlockDeclaration(_) => TransformFlags::CONTAINS_CLASS_FIELDS,
            _ => TransformFlags::NONE,
        },
        NodeRef::ObjectLiteralElement(element) => match element {
            tsforge_ast::ObjectLiteralElement::ShorthandPropertyAssignment(_) => TransformFlags::CONTAINS_ES2015,
            tsforge_ast::ObjectLiteralElement::MethodDeclaration(m) => {
                TransformFlags::CONTAINS_ES2015 | function_flags(is_async, m.asterisk_token.is_some())
            }
            tsforge_ast::ObjectLiteralElement::SpreadAssignment(_) => {
                TransformFlags::CONTAINS_ES2018 | TransformFlags::CONTAINS_OBJECT_REST_OR_SPREAD
            }
            _ => TransformFlags::NONE,
        },
        NodeRef::HeritageClause(_) => TransformFlags::CONTAINS_ES2015,
        NodeRef::CatchClause(c) if c.variable_declaration.is_none() => TransformFlags::CONTAINS_ES2019,
        NodeRef::NamespaceImport(n) if n.data.kind == SyntaxKind::NamespaceExport => TransformFlags::CONTAINS_ES2020,
        NodeRef::TemplateLiteral(_) | NodeRef::TemplateSpan(_) => TransformFlags::CONTAINS_ES2015,
        NodeRef::NumericLiteral(lit) => numeric_literal_flags(lit.numeric_literal_flags),
        _ => TransformFlags::NONE,
    };
    // Class members with TypeScript-only modifiers need the class transform.
    if matches!(node, NodeRef::ClassElement(_)) && modifiers.contains(TransformFlags::CONTAINS_TYPE_SCRIPT) {
        return own | modifiers | TransformFlags::CONTAINS_TYPE_SCRIPT_CLASS_SYNTAX;
    }
    own | modifiers
}

fn class_flags(members: &[ClassElement<'_>], subtree: TransformFlags) -> TransformFlags {
    let mut flags = TransformFlags::CONTAINS_ES2015;
    if subtree.contains(TransformFlags::CONTAINS_TYPE_SCRIPT_CLASS_SYNTAX) {
        flags |= TransformFlags::CONTAINS_TYPE_SCRIPT;
    }
    let has_parameter_properties = members.iter().any(|m| match m {
        ClassElement::Constructor(c) => c.parameters.iter().any(tsforge_ast::utilities::is_parameter_property),
        _ => false,
    });
    if has_parameter_properties {
        flags |= TransformFlags::CONTAINS_TYPE_SCRIPT;
    }
    flags
}

fn numeric_literal_flags(flags: TokenFlags) -> TransformFlags {
    let mut result = TransformFlags::NONE;
    if flags.intersects(TokenFlags::BINARY_SPECIFIER | TokenFlags::OCTAL_SPECIFIER) {
        result |= TransformFlags::CONTAINS_ES2015;
    }
    if flags.contains(TokenFlags::CONTAINS_SEPARATOR) {
        result |= TransformFlags::CONTAINS_ES_NEXT;
    }
    result
}

fn expression_flags(expr: &Expression<'_>, is_async: bool) -> TransformFlags {
    let optional_chain = if expr.is_optional_chain() && expr.question_dot_token().is_some() {
        TransformFlags::CONTAINS_ES2020
    } else {
        TransformFlags::NONE
    };
    optional_chain
        | match expr {
            Expression::PrivateIdentifier(_) => TransformFlags::CONTAINS_CLASS_FIELDS,
            Expression::NumericLiteral(lit) => numeric_literal_flags(lit.numeric_literal_flags),
            Expression::BigIntLiteral(_) => TransformFlags::CONTAINS_ES2020,
            Expression::NoSubstitutionTemplateLiteral(_)
            | Expression::TemplateExpression(_)
            | Expression::TaggedTemplate(_)
            | Expression::ClassExpression(_) => TransformFlags::CONTAINS_ES2015,
            Expression::Spread(_) => TransformFlags::CONTAINS_ES2015 | TransformFlags::CONTAINS_REST_OR_SPREAD,
            Expression::FunctionExpression(f) => function_flags(is_async, f.asterisk_token.is_some()),
            Expression::ArrowFunction(_) => {
                TransformFlags::CONTAINS_ES2015 | function_flags(is_async, false)
            }
            Expression::Keyword(token) => match token.kind() {
                SyntaxKind::ThisKeyword => TransformFlags::CONTAINS_LEXICAL_THIS,
                SyntaxKind::SuperKeyword => TransformFlags::CONTAINS_ES2015 | TransformFlags::CONTAINS_LEXICAL_SUPER,
                _ => TransformFlags::NONE,
            },
            Expression::Await(_) => {
                TransformFlags::CONTAINS_ES2017 | TransformFlags::CONTAINS_ES2018 | TransformFlags::CONTAINS_AWAIT
            }
            Expression::Yield(_) => {
                TransformFlags::CONTAINS_ES2015 | TransformFlags::CONTAINS_ES2018 | TransformFlags::CONTAINS_YIELD
            }
            Expression::Call(call) if call.expression.is_keyword(SyntaxKind::ImportKeyword) => {
                TransformFlags::CONTAINS_DYNAMIC_IMPORT
            }
            Expression::Binary(b) => binary_flags(b),
            Expression::PrefixUnary(p) if matches!(p.operator, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken) => {
                update_flags(p.operand)
            }
            Expression::PostfixUnary(p) => update_flags(p.operand),
            Expression::TypeAssertion(_) | Expression::As(_) | Expression::Satisfies(_) | Expression::NonNull(_) => {
                TransformFlags::CONTAINS_TYPE_SCRIPT
            }
            Expression::MetaProperty(m) => match m.keyword_token {
                SyntaxKind::NewKeyword => TransformFlags::CONTAINS_ES2015,
                _ => TransformFlags::CONTAINS_ES2020,
            },
            _ => TransformFlags::NONE,
        }
}

fn update_flags(operand: &Expression<'_>) -> TransformFlags {
    if matches!(operand.skip_parentheses(), Expression::Identifier(_)) {
        TransformFlags::CONTAINS_UPDATE_EXPRESSION_FOR_IDENTIFIER
    } else {
        TransformFlags::NONE
    }
}

fn binary_flags(b: &tsforge_ast::BinaryExpression<'_>) -> TransformFlags {
    match b.operator() {
        SyntaxKind::AsteriskAsteriskToken | SyntaxKind::AsteriskAsteriskEqualsToken => TransformFlags::CONTAINS_ES2016,
        SyntaxKind::QuestionQuestionToken => TransformFlags::CONTAINS_ES2020,
        op if op.is_logical_or_coalescing_assignment() => TransformFlags::CONTAINS_ES_NEXT,
        SyntaxKind::EqualsToken => match b.left {
            Expression::ObjectLiteral(literal) => {
                let mut flags = TransformFlags::CONTAINS_ES2015 | TransformFlags::CONTAINS_DESTRUCTURING_ASSIGNMENT;
                let has_rest = literal
                    .properties
                    .iter()
                    .any(|p| matches!(p, tsforge_ast::ObjectLiteralElement::SpreadAssignment(_)));
                if has_rest {
                    flags |= TransformFlags::CONTAINS_ES2018 | TransformFlags::CONTAINS_OBJECT_REST_OR_SPREAD;
                }
                flags
            }
            Expression::ArrayLiteral(_) => {
                TransformFlags::CONTAINS_ES2015 | TransformFlags::CONTAINS_DESTRUCTURING_ASSIGNMENT
            }
            _ => TransformFlags::NONE,
        },
        _ => TransformFlags::NONE,
    }
}

/// Flags a node of this kind stops from propagating to its parent.
fn subtree_exclusions(node: NodeRef<'_>) -> TransformFlags {
    match node {
        NodeRef::TypeNode(_) | NodeRef::TypeParameter(_) | NodeRef::TypeElement(_) => TransformFlags::TYPE_EXCLUDES,
        _ => match node.kind() {
            SyntaxKind::CallExpression | SyntaxKind::NewExpression | SyntaxKind::ArrayLiteralExpression => {
                TransformFlags::ARRAY_LITERAL_OR_CALL_OR_NEW_EXCLUDES
            }
            SyntaxKind::ModuleDeclaration => TransformFlags::MODULE_EXCLUDES,
            SyntaxKind::Parameter => TransformFlags::PARAMETER_EXCLUDES,
            SyntaxKind::ArrowFunction => TransformFlags::ARROW_FUNCTION_EXCLUDES,
            SyntaxKind::FunctionExpression | SyntaxKind::FunctionDeclaration => TransformFlags::FUNCTION_EXCLUDES,
            SyntaxKind::VariableDeclarationList => TransformFlags::VARIABLE_DECLARATION_LIST_EXCLUDES,
            SyntaxKind::ClassDeclaration | SyntaxKind::ClassExpression => TransformFlags::CLASS_EXCLUDES,
            SyntaxKind::Constructor => TransformFlags::CONSTRUCTOR_EXCLUDES,
            SyntaxKind::PropertyDeclaration => TransformFlags::PROPERTY_EXCLUDES,
            SyntaxKind::MethodDeclaration | SyntaxKind::GetAccessor | SyntaxKind::SetAccessor => {
                TransformFlags::METHOD_OR_ACCESSOR_EXCLUDES
            }
            SyntaxKind::ObjectLiteralExpression => TransformFlags::OBJECT_LITERAL_EXCLUDES,
            SyntaxKind::CatchClause => TransformFlags::CATCH_CLAUSE_EXCLUDES,
            SyntaxKind::ObjectBindingPattern | SyntaxKind::ArrayBindingPattern => {
                TransformFlags::BINDING_PATTERN_EXCLUDES
            }
            SyntaxKind::TypeAssertionExpression
            | SyntaxKind::AsExpression
            | SyntaxKind::SatisfiesExpression
            | SyntaxKind::PartiallyEmittedExpression
            | SyntaxKind::ParenthesizedExpression
            | SyntaxKind::SuperKeyword => TransformFlags::OUTER_EXPRESSION_EXCLUDES,
            SyntaxKind::PropertyAccessExpression | SyntaxKind::ElementAccessExpression => {
                TransformFlags::PROPERTY_ACCESS_EXCLUDES
            }
            _ => TransformFlags::NODE_EXCLUDES,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsforge_ast::{BindingName, NodeFactory};
    use tsforge_core::{CompilerArena, StringInterner};

    #[test]
    fn test_generator_flags_do_not_leak_yield() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let one = Expression::NumericLiteral(f.create_numeric_literal("1"));
        let body = f.create_block(vec![f.create_expression_statement(f.create_yield(false, Some(one)))], true);
        let func = f.create_function_declaration(true, Some(f.create_identifier("g")), None, vec![], None, Some(body));
        let file = f.create_source_file("a.ts", "", vec![func]);

        let flags = compute_transform_flags(file);
        let func_flags = flags[&file.statements[0].data().id];
        assert!(func_flags.contains(TransformFlags::CONTAINS_YIELD | TransformFlags::CONTAINS_GENERATOR));
        let file_flags = flags[&file.data.id];
        assert!(file_flags.contains(TransformFlags::CONTAINS_GENERATOR | TransformFlags::CONTAINS_ES2015));
        assert!(!file_flags.contains(TransformFlags::CONTAINS_YIELD));
        assert!(file_flags.contains(TransformFlags::HAS_COMPUTED_FLAGS));
    }

    #[test]
    fn test_interface_is_type_script_only() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let iface = f.create_interface_declaration(f.create_identifier("I"), None, None, vec![]);
        let file = f.create_source_file("a.ts", "", vec![iface]);

        let flags = compute_transform_flags(file);
        assert_eq!(
            flags[&file.statements[0].data().id],
            TransformFlags::CONTAINS_TYPE_SCRIPT | TransformFlags::HAS_COMPUTED_FLAGS
        );
    }

    #[test]
    fn test_let_declaration_marks_block_scoped_binding() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let decl = f.create_variable_declaration(BindingName::Identifier(f.create_identifier("x")), false, None, None);
        let stmt = f.create_variable_statement(f.create_variable_declaration_list(vec![decl], NodeFlags::LET));
        let file = f.create_source_file("a.ts", "", vec![stmt]);

        let mut cache = TransformFlagCache::new();
        let computed = cache.compute(NodeRef::SourceFile(file));
        assert!(computed.contains(TransformFlags::CONTAINS_BLOCK_SCOPED_BINDING | TransformFlags::CONTAINS_ES2015));
        assert_eq!(cache.get(file.data.id), Some(computed));
        cache.invalidate(NodeRef::SourceFile(file), |_| None);
        assert_eq!(cache.get(file.data.id), None);
    }

    #[test]
    fn test_invalidate_clears_ancestors_and_keeps_siblings() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let statement = |name: &str, flags: NodeFlags| {
            let name = BindingName::Identifier(f.create_identifier(name));
            let decl = f.create_variable_declaration(name, false, None, None);
            f.create_variable_statement(f.create_variable_declaration_list(vec![decl], flags))
        };
        let statements = vec![statement("x", NodeFlags::LET), statement("y", NodeFlags::NONE)];
        let file = f.create_source_file("a.ts", "", statements);
        let bound = crate::bind_source_file(file, &tsforge_tsoptions::CompilerOptions::default(), f.interner());

        let mut cache = TransformFlagCache::new();
        let computed = cache.compute(NodeRef::SourceFile(file));
        let Statement::VariableStatement(first) = &file.statements[0] else {
            unreachable!()
        };
        let declaration = NodeRef::VariableDeclaration(&first.declaration_list.declarations[0]);
        cache.invalidate(declaration, |node| bound.parent_of(node));

        assert_eq!(cache.get(declaration.id()), None);
        assert_eq!(cache.get(first.declaration_list.data.id), None);
        assert_eq!(cache.get(file.statements[0].data().id), None);
        assert_eq!(cache.get(file.data.id), None);
        assert!(cache.get(file.statements[1].data().id).is_some());
        assert_eq!(cache.compute(NodeRef::SourceFile(file)), computed);
    }
}
