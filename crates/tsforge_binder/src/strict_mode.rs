//! Strict-mode checks performed while binding.
//!
//! All of these only look at the syntax around one node, so they run from
//! the symbol actions of the binder rather than as a separate pass.

use crate::binder::Binder;
use rustc_hash::FxHashMap;
use tsforge_ast::types::TokenFlags;
use tsforge_ast::utilities::{declaration_name, is_use_strict_prologue};
use tsforge_ast::{
    CatchClause, Expression, Identifier, NodeRef, ObjectLiteralElement, PropertyName, Statement,
    SyntaxKind,
};
use tsforge_core::text::TextSpan;
use tsforge_diagnostics::{messages, DiagnosticMessage};
use tsforge_scanner::{is_legacy_octal_literal_text, is_strict_mode_reserved_word};
use tsforge_tsoptions::ScriptTarget;

impl<'a, 'o> Binder<'a, 'o> {
    /// A `"use strict"` prologue switches the rest of the scope to strict mode.
    pub(crate) fn update_strict_mode_statement_list(&mut self, statements: &'a [Statement<'a>]) {
        if self.in_strict_mode {
            return;
        }
        for statement in statements {
            if statement.as_prologue_directive().is_none() {
                return;
            }
            if is_use_strict_prologue(statement, &self.interner) {
                self.in_strict_mode = true;
                return;
            }
        }
    }

    /// Whether the node being bound sits inside a class body.
    fn in_class_context(&self) -> bool {
        let current = self.parent;
        current
            .into_iter()
            .chain(current.into_iter().flat_map(|p| self.ancestors(p)))
            .any(|n| n.is_class_like())
    }

    fn pick_message(
        &self,
        plain: &'static DiagnosticMessage,
        in_class: &'static DiagnosticMessage,
        in_module: &'static DiagnosticMessage,
    ) -> &'static DiagnosticMessage {
        if self.in_class_context() {
            in_class
        } else if self.file.is_external_module() {
            in_module
        } else {
            plain
        }
    }

    fn report(&mut self, node: NodeRef<'_>, message: &DiagnosticMessage, args: &[&str]) {
        let diagnostic = self.diagnostic_at(node, message, args);
        self.diagnostics.add(diagnostic);
    }

    /// `interface`, `let`, `yield` and the other future reserved words may
    /// not name anything in strict mode.
    pub(crate) fn check_contextual_identifier(&mut self, node: NodeRef<'a>, id: &'a Identifier) {
        if !self.in_strict_mode || id.is_generated() || self.is_identifier_name(node) || self.is_ambient(node) {
            return;
        }
        let text = self.interner.unescape(id.escaped_text).to_string();
        if !is_strict_mode_reserved_word(&text) {
            return;
        }
        let message = self.pick_message(
            &messages::IDENTIFIER_EXPECTED_0_IS_A_RESERVED_WORD_IN_STRICT_MODE,
            &messages::IDENTIFIER_EXPECTED_0_IS_A_RESERVED_WORD_IN_STRICT_MODE_CLASS_DEFINITIONS_ARE_AUTOMATICALLY_IN_STRICT_MODE,
            &messages::IDENTIFIER_EXPECTED_0_IS_A_RESERVED_WORD_IN_STRICT_MODE_MODULES_ARE_AUTOMATICALLY_IN_STRICT_MODE,
        );
        self.report(node, message, &[&text]);
    }

    /// Identifiers used as property names rather than as bindings or references.
    fn is_identifier_name(&self, node: NodeRef<'a>) -> bool {
        let Some(parent) = self.parent else {
            return false;
        };
        match parent {
            NodeRef::Expression(Expression::PropertyAccess(_) | Expression::MetaProperty(_)) => {
                matches!(node, NodeRef::Identifier(_))
            }
            NodeRef::QualifiedName(q) => node.same_node(&NodeRef::Identifier(&q.right)),
            NodeRef::ObjectLiteralElement(ObjectLiteralElement::ShorthandPropertyAssignment(_)) => false,
            NodeRef::ClassElement(_)
            | NodeRef::TypeElement(_)
            | NodeRef::ObjectLiteralElement(_)
            | NodeRef::EnumMember(_) => declaration_name(parent).is_some_and(|name| name.same_node(&node)),
            NodeRef::ImportSpecifier(s) => {
                s.property_name.as_ref().is_some_and(|p| node.same_node(&NodeRef::Identifier(p)))
            }
            NodeRef::BindingElement(b) => match &b.property_name {
                Some(name) => name.as_node().same_node(&node),
                None => false,
            },
            _ => false,
        }
    }

    /// `eval` and `arguments` cannot be declared or assigned in strict mode.
    pub(crate) fn check_strict_mode_eval_or_arguments(&mut self, _context: NodeRef<'a>, name: Option<NodeRef<'a>>) {
        let Some((name, id)) = name.and_then(|n| Some((n, n.as_identifier()?))) else {
            return;
        };
        if id.escaped_text != self.well_known.eval && id.escaped_text != self.well_known.arguments {
            return;
        }
        let text = self.interner.unescape(id.escaped_text).to_string();
        let message = self.pick_message(
            &messages::INVALID_USE_OF_0_IN_STRICT_MODE,
            &messages::CODE_CONTAINED_IN_A_CLASS_IS_EVALUATED_IN_STRICT_MODE_WHICH_DOES_NOT_ALLOW_THIS_USE_OF_0,
            &messages::INVALID_USE_OF_0_MODULES_ARE_AUTOMATICALLY_IN_STRICT_MODE,
        );
        self.report(name, message, &[&text]);
    }

    pub(crate) fn check_strict_mode_binary_expression(&mut self, binary: &'a tsforge_ast::BinaryExpression<'a>) {
        if self.in_strict_mode && binary.operator().is_assignment_operator() {
            if let Expression::Identifier(_) = binary.left {
                self.check_strict_mode_eval_or_arguments(
                    NodeRef::Expression(binary.left),
                    Some(NodeRef::Expression(binary.left)),
                );
            }
        }
    }

    pub(crate) fn check_strict_mode_delete_expression(&mut self, operand: &'a Expression<'a>) {
        if self.in_strict_mode && matches!(operand, Expression::Identifier(_)) {
            self.report(
                NodeRef::Expression(operand),
                &messages::DELETE_CANNOT_BE_CALLED_ON_AN_IDENTIFIER_IN_STRICT_MODE,
                &[],
            );
        }
    }

    /// `010` style octal literals.
    pub(crate) fn check_strict_mode_numeric_literal(&mut self, node: NodeRef<'a>) {
        if !self.in_strict_mode {
            return;
        }
        let literal = match node {
            NodeRef::NumericLiteral(lit) | NodeRef::Expression(Expression::NumericLiteral(lit)) => lit,
            _ => return,
        };
        let is_octal = literal.numeric_literal_flags.contains(TokenFlags::OCTAL)
            || is_legacy_octal_literal_text(self.interner.resolve(literal.text));
        if is_octal {
            self.report(node, &messages::OCTAL_LITERALS_ARE_NOT_ALLOWED_IN_STRICT_MODE, &[]);
        }
    }

    /// `eval++`, `--arguments`.
    pub(crate) fn check_strict_mode_update_operand(
        &mut self,
        node: NodeRef<'a>,
        operator: SyntaxKind,
        operand: &'a Expression<'a>,
    ) {
        if !self.in_strict_mode || !matches!(operator, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken) {
            return;
        }
        if let Expression::Identifier(_) = operand {
            self.check_strict_mode_eval_or_arguments(node, Some(NodeRef::Expression(operand)));
        }
    }

    pub(crate) fn check_strict_mode_catch_clause(&mut self, clause: &'a CatchClause<'a>) {
        if !self.in_strict_mode {
            return;
        }
        if let Some(declaration) = &clause.variable_declaration {
            self.check_strict_mode_eval_or_arguments(
                NodeRef::CatchClause(clause),
                Some(declaration.name.as_node()),
            );
        }
    }

    /// Reported on the `with` keyword.
    pub(crate) fn check_strict_mode_with_statement(&mut self, node: NodeRef<'a>) {
        if !self.in_strict_mode {
            return;
        }
        let span = self.error_span(node);
        let span = TextSpan::new(span.start, span.length.min(4));
        let diagnostic = tsforge_diagnostics::Diagnostic::with_location(
            &self.file.file_name,
            span,
            &messages::WITH_STATEMENTS_ARE_NOT_ALLOWED_IN_STRICT_MODE,
            &[],
        );
        self.diagnostics.add(diagnostic);
    }

    pub(crate) fn check_strict_mode_function_name(&mut self, node: NodeRef<'a>) {
        if self.in_strict_mode {
            self.check_strict_mode_eval_or_arguments(node, declaration_name(node));
        }
    }

    /// Function declarations nested in blocks have no defined semantics
    /// before ES2015.
    ///
    /// Reported in sloppy mode too, including for a declaration directly in
    /// a function body; only the message variant follows the strictness
    /// source, with the plain "in strict mode" text when nothing forced it.
    pub(crate) fn check_block_scoped_function_declaration(&mut self, node: NodeRef<'a>) {
        if self.language_version >= ScriptTarget::ES2015 {
            return;
        }
        if matches!(self.parent, None | Some(NodeRef::SourceFile(_)) | Some(NodeRef::ModuleBlock(_))) {
            return;
        }
        let message = self.pick_message(
            &messages::FUNCTION_DECLARATIONS_ARE_NOT_ALLOWED_INSIDE_BLOCKS_IN_STRICT_MODE_WHEN_TARGETING_ES3_OR_ES5,
            &messages::FUNCTION_DECLARATIONS_ARE_NOT_ALLOWED_INSIDE_BLOCKS_IN_STRICT_MODE_WHEN_TARGETING_ES3_OR_ES5_CLASS_DEFINITIONS_ARE_AUTOMATICALLY_IN_STRICT_MODE,
            &messages::FUNCTION_DECLARATIONS_ARE_NOT_ALLOWED_INSIDE_BLOCKS_IN_STRICT_MODE_WHEN_TARGETING_ES3_OR_ES5_MODULES_ARE_AUTOMATICALLY_IN_STRICT_MODE,
        );
        let target = declaration_name(node).unwrap_or(node);
        self.report(target, message, &[]);
    }

    /// Two plain properties with the same identifier name.
    pub(crate) fn check_duplicate_object_literal_properties(&mut self, expr: &'a Expression<'a>) {
        let Expression::ObjectLiteral(literal) = expr else {
            return;
        };
        #[derive(PartialEq)]
        enum Kind {
            Property,
            Accessor,
        }
        let mut seen = FxHashMap::default();
        for property in literal.properties {
            let (name, kind) = match property {
                ObjectLiteralElement::PropertyAssignment(p) => match &p.name {
                    PropertyName::Identifier(id) => (id, Kind::Property),
                    _ => continue,
                },
                ObjectLiteralElement::ShorthandPropertyAssignment(s) => (&s.name, Kind::Property),
                ObjectLiteralElement::MethodDeclaration(m) => match &m.name {
                    PropertyName::Identifier(id) => (id, Kind::Property),
                    _ => continue,
                },
                ObjectLiteralElement::GetAccessor(a) | ObjectLiteralElement::SetAccessor(a) => match &a.name {
                    PropertyName::Identifier(id) => (id, Kind::Accessor),
                    _ => continue,
                },
                ObjectLiteralElement::SpreadAssignment(_) => continue,
            };
            match seen.get(&name.escaped_text) {
                None => {
                    seen.insert(name.escaped_text, kind);
                }
                Some(Kind::Property) if kind == Kind::Property => {
                    self.report(
                        NodeRef::Identifier(name),
                        &messages::AN_OBJECT_LITERAL_CANNOT_HAVE_MULTIPLE_PROPERTIES_WITH_THE_SAME_NAME_IN_STRICT_MODE,
                        &[],
                    );
                }
                Some(_) => {}
            }
        }
    }
}
