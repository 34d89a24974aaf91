//! Node construction.
//!
//! There is no parser in this workspace: trees reach the binder and printer
//! through [`NodeFactory`]. Every node gets a fresh [`NodeId`] and the id of
//! the file currently being built. Nodes start out synthesized; give them a
//! source range with [`HasNodeData::at`].

use std::cell::{Cell, RefCell};

use tsforge_core::collections::FxHashSet;
use tsforge_core::intern::{InternedString, StringInterner};
use tsforge_core::text::{LineMap, TextRange};
use tsforge_core::CompilerArena;

use crate::generated::HasNodeData;
use crate::node::*;
use crate::node_ref::NodeRef;
use crate::syntax_kind::SyntaxKind;
use crate::types::*;
use crate::utilities;

pub struct NodeFactory<'a> {
    arena: &'a CompilerArena,
    interner: StringInterner,
    next_node_id: Cell<u32>,
    next_auto_generate_id: Cell<u32>,
    next_file_id: Cell<u32>,
    current_file: Cell<SourceFileId>,
    /// Identifier texts created since the current file was begun.
    identifiers: RefCell<FxHashSet<InternedString>>,
}

impl<'a> NodeFactory<'a> {
    pub fn new(arena: &'a CompilerArena, interner: StringInterner) -> Self {
        Self {
            arena,
            interner,
            next_node_id: Cell::new(0),
            next_auto_generate_id: Cell::new(1),
            next_file_id: Cell::new(0),
            current_file: Cell::new(SourceFileId::SYNTHESIZED),
            identifiers: RefCell::new(FxHashSet::default()),
        }
    }

    #[inline]
    pub fn arena(&self) -> &'a CompilerArena {
        self.arena
    }

    #[inline]
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Number of node ids handed out so far.
    pub fn node_count(&self) -> u32 {
        self.next_node_id.get()
    }

    /// Start a new file. Nodes created from here on belong to it.
    pub fn begin_source_file(&self) -> SourceFileId {
        let id = SourceFileId(self.next_file_id.get());
        self.next_file_id.set(id.0 + 1);
        self.current_file.set(id);
        self.identifiers.borrow_mut().clear();
        id
    }

    fn new_data(&self, kind: SyntaxKind) -> NodeData {
        let id = self.next_node_id.get();
        self.next_node_id.set(id + 1);
        NodeData {
            id: NodeId(id),
            file: self.current_file.get(),
            range: TextRange::SYNTHESIZED,
            ..NodeData::new(kind, 0, 0)
        }
    }

    #[inline]
    pub fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    #[inline]
    pub fn list<T>(&self, items: Vec<T>) -> &'a [T] {
        self.arena.alloc_vec(items)
    }

    fn opt_list<T>(&self, items: Option<Vec<T>>) -> Option<&'a [T]> {
        items.map(|v| self.list(v))
    }

    fn opt_alloc<T>(&self, value: Option<T>) -> Option<&'a T> {
        value.map(|v| self.alloc(v))
    }

    fn opt_token(&self, present: bool, kind: SyntaxKind) -> Option<Token> {
        present.then(|| self.create_token(kind))
    }

    pub fn create_token(&self, kind: SyntaxKind) -> Token {
        Token {
            data: self.new_data(kind),
        }
    }

    // ========================================================================
    // Source Files
    // ========================================================================

    pub fn create_source_file(
        &self,
        file_name: &str,
        text: &str,
        statements: Vec<Statement<'a>>,
    ) -> &'a SourceFile<'a> {
        self.create_source_file_with_helpers(file_name, text, statements, Vec::new())
    }

    /// A file whose transformed tree requests runtime helpers.
    pub fn create_source_file_with_helpers(
        &self,
        file_name: &str,
        text: &str,
        statements: Vec<Statement<'a>>,
        emit_helpers: Vec<&'static EmitHelper>,
    ) -> &'a SourceFile<'a> {
        if self.current_file.get() == SourceFileId::SYNTHESIZED {
            self.begin_source_file();
        }
        let script_kind = utilities::script_kind_from_file_name(file_name);
        let external_module_indicator = statements.iter().any(utilities::is_external_module_indicator);
        let pragmas = utilities::collect_file_pragmas(text);

        let mut data = self.new_data(SyntaxKind::SourceFile);
        data.range = TextRange::new(0, text.len() as u32);
        if matches!(script_kind, ScriptKind::JS | ScriptKind::JSX) {
            data.flags |= NodeFlags::JAVASCRIPT_FILE;
        }
        let identifiers = std::mem::take(&mut *self.identifiers.borrow_mut());
        let file = SourceFile {
            data,
            statements: self.list(statements),
            file_name: file_name.to_string(),
            text: text.to_string(),
            script_kind,
            is_declaration_file: utilities::is_declaration_file_name(file_name),
            has_no_default_lib: pragmas.has_no_default_lib,
            referenced_files: pragmas.referenced_files,
            type_reference_directives: pragmas.type_reference_directives,
            lib_reference_directives: pragmas.lib_reference_directives,
            external_module_indicator,
            identifiers,
            line_map: LineMap::new(text),
            emit_helpers,
        };
        self.current_file.set(SourceFileId::SYNTHESIZED);
        self.alloc(file)
    }

    pub fn create_bundle(&self, source_files: Vec<&'a SourceFile<'a>>, prepends: Vec<UnparsedSource>) -> Bundle<'a> {
        Bundle {
            source_files,
            prepends,
        }
    }

    // ========================================================================
    // Names
    // ========================================================================

    pub fn create_identifier(&self, text: &str) -> Identifier {
        let escaped_text = self.interner.intern_escaped(text);
        self.identifiers.borrow_mut().insert(escaped_text);
        Identifier {
            data: self.new_data(SyntaxKind::Identifier),
            escaped_text,
            original_keyword_kind: None,
            auto_generate: None,
        }
    }

    pub fn create_private_identifier(&self, text: &str) -> Identifier {
        debug_assert!(text.starts_with('#'), "private names start with '#'");
        let escaped_text = self.interner.intern(text);
        Identifier {
            data: self.new_data(SyntaxKind::PrivateIdentifier),
            escaped_text,
            original_keyword_kind: None,
            auto_generate: None,
        }
    }

    fn next_auto_generate_id(&self) -> u32 {
        let id = self.next_auto_generate_id.get();
        self.next_auto_generate_id.set(id + 1);
        id
    }

    fn generated_identifier(
        &self,
        text: &str,
        kind: GeneratedIdentifierKind,
        flags: GeneratedIdentifierFlags,
        node: Option<GeneratedNameSource>,
    ) -> Identifier {
        let escaped_text = self.interner.intern_escaped(text);
        Identifier {
            data: self.new_data(SyntaxKind::Identifier),
            escaped_text,
            original_keyword_kind: None,
            auto_generate: Some(AutoGenerateInfo {
                kind,
                flags,
                id: self.next_auto_generate_id(),
                prefix: None,
                suffix: None,
                base: (!text.is_empty()).then_some(escaped_text),
                node,
            }),
        }
    }

    /// A temporary variable (`_a`, `_b`, ...).
    pub fn create_temp_variable(&self, reserved_in_nested_scopes: bool) -> Identifier {
        let flags = if reserved_in_nested_scopes {
            GeneratedIdentifierFlags::RESERVED_IN_NESTED_SCOPES
        } else {
            GeneratedIdentifierFlags::NONE
        };
        self.generated_identifier("", GeneratedIdentifierKind::Auto, flags, None)
    }

    /// A loop counter (`_i`, `_j`, ...).
    pub fn create_loop_variable(&self) -> Identifier {
        self.generated_identifier("", GeneratedIdentifierKind::Loop, GeneratedIdentifierFlags::NONE, None)
    }

    /// A name based on `text` that does not collide with any other name in the file.
    pub fn create_unique_name(&self, text: &str, flags: GeneratedIdentifierFlags) -> Identifier {
        self.generated_identifier(text, GeneratedIdentifierKind::Unique, flags, None)
    }

    /// Like [`create_unique_name`](Self::create_unique_name), but `text` itself is tried first.
    pub fn create_optimistic_unique_name(&self, text: &str) -> Identifier {
        self.create_unique_name(text, GeneratedIdentifierFlags::OPTIMISTIC)
    }

    /// A name derived from a declaration, an import or an export.
    pub fn get_generated_name_for_node(&self, node: NodeRef<'_>, flags: GeneratedIdentifierFlags) -> Identifier {
        let text = self.generated_name_source_text(node);
        let source = GeneratedNameSource {
            id: node.id(),
            kind: node.kind(),
            text,
        };
        self.generated_identifier("", GeneratedIdentifierKind::Node, flags, Some(source))
    }

    fn generated_name_source_text(&self, node: NodeRef<'_>) -> Option<InternedString> {
        match node {
            NodeRef::Statement(stmt)
                if matches!(
                    stmt,
                    Statement::ImportDeclaration(_) | Statement::ExportDeclaration(_) | Statement::ImportEqualsDeclaration(_)
                ) =>
            {
                utilities::external_module_name_text(stmt, &self.interner).map(|t| self.interner.intern(t))
            }
            other => {
                if let Some(id) = other.as_identifier() {
                    if let Some(info) = &id.auto_generate {
                        return info.base;
                    }
                    return Some(self.interner.intern(self.interner.unescape(id.escaped_text)));
                }
                utilities::declaration_name_text(other, &self.interner).map(|t| self.interner.intern(t))
            }
        }
    }

    pub fn create_qualified_name(&self, left: EntityName<'a>, right: Identifier) -> EntityName<'a> {
        EntityName::QualifiedName(self.alloc(QualifiedName {
            data: self.new_data(SyntaxKind::QualifiedName),
            left,
            right,
        }))
    }

    pub fn create_computed_property_name(&self, expression: Expression<'a>) -> PropertyName<'a> {
        PropertyName::Computed(self.alloc(ComputedPropertyName {
            data: self.new_data(SyntaxKind::ComputedPropertyName),
            expression: self.alloc(expression),
        }))
    }

    // ========================================================================
    // Literals
    // ========================================================================

    pub fn create_string_literal(&self, text: &str, is_single_quote: bool) -> StringLiteral<'a> {
        StringLiteral {
            data: self.new_data(SyntaxKind::StringLiteral),
            text: self.interner.intern(text),
            is_single_quote,
            text_source_node: None,
        }
    }

    /// A string literal that prints the text of `source`.
    pub fn create_string_literal_from_node(&self, source: &'a Identifier) -> StringLiteral<'a> {
        StringLiteral {
            data: self.new_data(SyntaxKind::StringLiteral),
            text: self.interner.intern(self.interner.unescape(source.escaped_text)),
            is_single_quote: false,
            text_source_node: Some(source),
        }
    }

    pub fn create_numeric_literal(&self, text: &str) -> NumericLiteral {
        self.create_numeric_literal_with_flags(text, TokenFlags::NONE)
    }

    pub fn create_numeric_literal_with_flags(&self, text: &str, flags: TokenFlags) -> NumericLiteral {
        NumericLiteral {
            data: self.new_data(SyntaxKind::NumericLiteral),
            text: self.interner.intern(text),
            numeric_literal_flags: flags,
        }
    }

    pub fn create_bigint_literal(&self, text: &str) -> Expression<'a> {
        Expression::BigIntLiteral(LiteralNode {
            data: self.new_data(SyntaxKind::BigIntLiteral),
            text: self.interner.intern(text),
        })
    }

    pub fn create_regular_expression_literal(&self, text: &str) -> Expression<'a> {
        Expression::RegularExpressionLiteral(LiteralNode {
            data: self.new_data(SyntaxKind::RegularExpressionLiteral),
            text: self.interner.intern(text),
        })
    }

    fn template_literal_like(&self, kind: SyntaxKind, text: &str, raw_text: Option<&str>) -> TemplateLiteralLikeNode {
        TemplateLiteralLikeNode {
            data: self.new_data(kind),
            text: self.interner.intern(text),
            raw_text: raw_text.map(|r| self.interner.intern(r)),
        }
    }

    pub fn create_no_substitution_template_literal(&self, text: &str, raw_text: Option<&str>) -> Expression<'a> {
        Expression::NoSubstitutionTemplateLiteral(self.template_literal_like(
            SyntaxKind::NoSubstitutionTemplateLiteral,
            text,
            raw_text,
        ))
    }

    pub fn create_template_head(&self, text: &str, raw_text: Option<&str>) -> TemplateLiteralLikeNode {
        self.template_literal_like(SyntaxKind::TemplateHead, text, raw_text)
    }

    pub fn create_template_middle(&self, text: &str, raw_text: Option<&str>) -> TemplateLiteralLikeNode {
        self.template_literal_like(SyntaxKind::TemplateMiddle, text, raw_text)
    }

    pub fn create_template_tail(&self, text: &str, raw_text: Option<&str>) -> TemplateLiteralLikeNode {
        self.template_literal_like(SyntaxKind::TemplateTail, text, raw_text)
    }

    pub fn create_template_expression(
        &self,
        head: TemplateLiteralLikeNode,
        template_spans: Vec<TemplateSpan<'a>>,
    ) -> Expression<'a> {
        Expression::TemplateExpression(TemplateExpression {
            data: self.new_data(SyntaxKind::TemplateExpression),
            head,
            template_spans: self.list(template_spans),
        })
    }

    pub fn create_template_span(&self, expression: Expression<'a>, literal: TemplateLiteralLikeNode) -> TemplateSpan<'a> {
        TemplateSpan {
            data: self.new_data(SyntaxKind::TemplateSpan),
            expression: self.alloc(expression),
            literal,
        }
    }

    /// `this`, `super`, `null`, `true`, `false` or `import`.
    pub fn create_keyword_expression(&self, kind: SyntaxKind) -> Expression<'a> {
        debug_assert!(utilities::is_keyword_expression_kind(kind));
        Expression::Keyword(self.create_token(kind))
    }

    pub fn create_this(&self) -> Expression<'a> {
        self.create_keyword_expression(SyntaxKind::ThisKeyword)
    }

    pub fn create_super(&self) -> Expression<'a> {
        self.create_keyword_expression(SyntaxKind::SuperKeyword)
    }

    pub fn create_null(&self) -> Expression<'a> {
        self.create_keyword_expression(SyntaxKind::NullKeyword)
    }

    pub fn create_true(&self) -> Expression<'a> {
        self.create_keyword_expression(SyntaxKind::TrueKeyword)
    }

    pub fn create_false(&self) -> Expression<'a> {
        self.create_keyword_expression(SyntaxKind::FalseKeyword)
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    pub fn create_array_literal(&self, elements: Vec<Expression<'a>>, multi_line: bool) -> Expression<'a> {
        Expression::ArrayLiteral(ArrayLiteralExpression {
            data: self.new_data(SyntaxKind::ArrayLiteralExpression),
            elements: self.list(elements),
            multi_line,
        })
    }

    pub fn create_object_literal(&self, properties: Vec<ObjectLiteralElement<'a>>, multi_line: bool) -> Expression<'a> {
        Expression::ObjectLiteral(ObjectLiteralExpression {
            data: self.new_data(SyntaxKind::ObjectLiteralExpression),
            properties: self.list(properties),
            multi_line,
        })
    }

    pub fn create_property_assignment(&self, name: PropertyName<'a>, initializer: Expression<'a>) -> ObjectLiteralElement<'a> {
        ObjectLiteralElement::PropertyAssignment(PropertyAssignment {
            data: self.new_data(SyntaxKind::PropertyAssignment),
            name,
            initializer: self.alloc(initializer),
        })
    }

    pub fn create_shorthand_property_assignment(
        &self,
        name: Identifier,
        object_assignment_initializer: Option<Expression<'a>>,
    ) -> ObjectLiteralElement<'a> {
        ObjectLiteralElement::ShorthandPropertyAssignment(ShorthandPropertyAssignment {
            data: self.new_data(SyntaxKind::ShorthandPropertyAssignment),
            name,
            object_assignment_initializer: self.opt_alloc(object_assignment_initializer),
        })
    }

    pub fn create_spread_assignment(&self, expression: Expression<'a>) -> ObjectLiteralElement<'a> {
        ObjectLiteralElement::SpreadAssignment(SpreadAssignment {
            data: self.new_data(SyntaxKind::SpreadAssignment),
            expression: self.alloc(expression),
        })
    }

    fn member_name(name: Identifier) -> MemberName {
        if name.data.kind == SyntaxKind::PrivateIdentifier {
            MemberName::PrivateIdentifier(name)
        } else {
            MemberName::Identifier(name)
        }
    }

    pub fn create_property_access(&self, expression: Expression<'a>, name: Identifier) -> Expression<'a> {
        Expression::PropertyAccess(PropertyAccessExpression {
            data: self.new_data(SyntaxKind::PropertyAccessExpression),
            expression: self.alloc(expression),
            question_dot_token: None,
            name: Self::member_name(name),
        })
    }

    /// A link of an optional chain; `question_dot` marks the link that starts it.
    pub fn create_property_access_chain(
        &self,
        expression: Expression<'a>,
        question_dot: bool,
        name: Identifier,
    ) -> Expression<'a> {
        let mut data = self.new_data(SyntaxKind::PropertyAccessExpression);
        data.flags |= NodeFlags::OPTIONAL_CHAIN;
        Expression::PropertyAccess(PropertyAccessExpression {
            data,
            expression: self.alloc(expression),
            question_dot_token: self.opt_token(question_dot, SyntaxKind::QuestionDotToken),
            name: Self::member_name(name),
        })
    }

    pub fn create_element_access(&self, expression: Expression<'a>, argument: Expression<'a>) -> Expression<'a> {
        Expression::ElementAccess(ElementAccessExpression {
            data: self.new_data(SyntaxKind::ElementAccessExpression),
            expression: self.alloc(expression),
            question_dot_token: None,
            argument_expression: self.alloc(argument),
        })
    }

    pub fn create_element_access_chain(
        &self,
        expression: Expression<'a>,
        question_dot: bool,
        argument: Expression<'a>,
    ) -> Expression<'a> {
        let mut data = self.new_data(SyntaxKind::ElementAccessExpression);
        data.flags |= NodeFlags::OPTIONAL_CHAIN;
        Expression::ElementAccess(ElementAccessExpression {
            data,
            expression: self.alloc(expression),
            question_dot_token: self.opt_token(question_dot, SyntaxKind::QuestionDotToken),
            argument_expression: self.alloc(argument),
        })
    }

    pub fn create_call(
        &self,
        expression: Expression<'a>,
        type_arguments: Option<Vec<TypeNode<'a>>>,
        arguments: Vec<Expression<'a>>,
    ) -> Expression<'a> {
        Expression::Call(CallExpression {
            data: self.new_data(SyntaxKind::CallExpression),
            expression: self.alloc(expression),
            question_dot_token: None,
            type_arguments: self.opt_list(type_arguments),
            arguments: self.list(arguments),
        })
    }

    pub fn create_call_chain(
        &self,
        expression: Expression<'a>,
        question_dot: bool,
        type_arguments: Option<Vec<TypeNode<'a>>>,
        arguments: Vec<Expression<'a>>,
    ) -> Expression<'a> {
        let mut data = self.new_data(SyntaxKind::CallExpression);
        data.flags |= NodeFlags::OPTIONAL_CHAIN;
        Expression::Call(CallExpression {
            data,
            expression: self.alloc(expression),
            question_dot_token: self.opt_token(question_dot, SyntaxKind::QuestionDotToken),
            type_arguments: self.opt_list(type_arguments),
            arguments: self.list(arguments),
        })
    }

    pub fn create_new(
        &self,
        expression: Expression<'a>,
        type_arguments: Option<Vec<TypeNode<'a>>>,
        arguments: Option<Vec<Expression<'a>>>,
    ) -> Expression<'a> {
        Expression::New(NewExpression {
            data: self.new_data(SyntaxKind::NewExpression),
            expression: self.alloc(expression),
            type_arguments: self.opt_list(type_arguments),
            arguments: self.opt_list(arguments),
        })
    }

    pub fn create_tagged_template(
        &self,
        tag: Expression<'a>,
        type_arguments: Option<Vec<TypeNode<'a>>>,
        template: Expression<'a>,
    ) -> Expression<'a> {
        Expression::TaggedTemplate(TaggedTemplateExpression {
            data: self.new_data(SyntaxKind::TaggedTemplateExpression),
            tag: self.alloc(tag),
            type_arguments: self.opt_list(type_arguments),
            template: self.alloc(template),
        })
    }

    pub fn create_type_assertion(&self, type_node: TypeNode<'a>, expression: Expression<'a>) -> Expression<'a> {
        Expression::TypeAssertion(TypeAssertionExpression {
            data: self.new_data(SyntaxKind::TypeAssertionExpression),
            type_node: self.alloc(type_node),
            expression: self.alloc(expression),
        })
    }

    pub fn create_parenthesized(&self, expression: Expression<'a>) -> Expression<'a> {
        Expression::Parenthesized(ParenthesizedExpression {
            data: self.new_data(SyntaxKind::ParenthesizedExpression),
            expression: self.alloc(expression),
        })
    }

    pub fn create_function_expression(
        &self,
        asterisk: bool,
        name: Option<Identifier>,
        type_parameters: Option<Vec<TypeParameterDeclaration<'a>>>,
        parameters: Vec<ParameterDeclaration<'a>>,
        return_type: Option<TypeNode<'a>>,
        body: Block<'a>,
    ) -> Expression<'a> {
        Expression::FunctionExpression(FunctionExpression {
            data: self.new_data(SyntaxKind::FunctionExpression),
            name,
            asterisk_token: self.opt_token(asterisk, SyntaxKind::AsteriskToken),
            type_parameters: self.opt_list(type_parameters),
            parameters: self.list(parameters),
            return_type: self.opt_alloc(return_type),
            body,
        })
    }

    pub fn create_arrow_function(
        &self,
        type_parameters: Option<Vec<TypeParameterDeclaration<'a>>>,
        parameters: Vec<ParameterDeclaration<'a>>,
        return_type: Option<TypeNode<'a>>,
        body: ArrowFunctionBody<'a>,
    ) -> Expression<'a> {
        Expression::ArrowFunction(ArrowFunction {
            data: self.new_data(SyntaxKind::ArrowFunction),
            type_parameters: self.opt_list(type_parameters),
            parameters: self.list(parameters),
            return_type: self.opt_alloc(return_type),
            equals_greater_than_token: self.create_token(SyntaxKind::EqualsGreaterThanToken),
            body,
        })
    }

    pub fn create_arrow_block_body(&self, block: Block<'a>) -> ArrowFunctionBody<'a> {
        ArrowFunctionBody::Block(self.alloc(block))
    }

    pub fn create_arrow_expression_body(&self, expression: Expression<'a>) -> ArrowFunctionBody<'a> {
        ArrowFunctionBody::Expression(self.alloc(expression))
    }

    fn unary_keyword(&self, kind: SyntaxKind, expression: Expression<'a>) -> UnaryKeywordExpression<'a> {
        UnaryKeywordExpression {
            data: self.new_data(kind),
            expression: self.alloc(expression),
        }
    }

    pub fn create_delete(&self, expression: Expression<'a>) -> Expression<'a> {
        Expression::Delete(self.unary_keyword(SyntaxKind::DeleteExpression, expression))
    }

    pub fn create_type_of(&self, expression: Expression<'a>) -> Expression<'a> {
        Expression::TypeOf(self.unary_keyword(SyntaxKind::TypeOfExpression, expression))
    }

    pub fn create_void(&self, expression: Expression<'a>) -> Expression<'a> {
        Expression::Void(self.unary_keyword(SyntaxKind::VoidExpression, expression))
    }

    pub fn create_void_zero(&self) -> Expression<'a> {
        let zero = Expression::NumericLiteral(self.create_numeric_literal("0"));
        self.create_void(zero)
    }

    pub fn create_await(&self, expression: Expression<'a>) -> Expression<'a> {
        Expression::Await(self.unary_keyword(SyntaxKind::AwaitExpression, expression))
    }

    pub fn create_prefix_unary(&self, operator: SyntaxKind, operand: Expression<'a>) -> Expression<'a> {
        Expression::PrefixUnary(PrefixUnaryExpression {
            data: self.new_data(SyntaxKind::PrefixUnaryExpression),
            operator,
            operand: self.alloc(operand),
        })
    }

    pub fn create_postfix_unary(&self, operand: Expression<'a>, operator: SyntaxKind) -> Expression<'a> {
        Expression::PostfixUnary(PostfixUnaryExpression {
            data: self.new_data(SyntaxKind::PostfixUnaryExpression),
            operand: self.alloc(operand),
            operator,
        })
    }

    pub fn create_binary(&self, left: Expression<'a>, operator: SyntaxKind, right: Expression<'a>) -> Expression<'a> {
        Expression::Binary(BinaryExpression {
            data: self.new_data(SyntaxKind::BinaryExpression),
            left: self.alloc(left),
            operator_token: self.create_token(operator),
            right: self.alloc(right),
        })
    }

    pub fn create_assignment(&self, left: Expression<'a>, right: Expression<'a>) -> Expression<'a> {
        self.create_binary(left, SyntaxKind::EqualsToken, right)
    }

    pub fn create_comma(&self, left: Expression<'a>, right: Expression<'a>) -> Expression<'a> {
        self.create_binary(left, SyntaxKind::CommaToken, right)
    }

    pub fn create_conditional(
        &self,
        condition: Expression<'a>,
        when_true: Expression<'a>,
        when_false: Expression<'a>,
    ) -> Expression<'a> {
        Expression::Conditional(ConditionalExpression {
            data: self.new_data(SyntaxKind::ConditionalExpression),
            condition: self.alloc(condition),
            question_token: self.create_token(SyntaxKind::QuestionToken),
            when_true: self.alloc(when_true),
            colon_token: self.create_token(SyntaxKind::ColonToken),
            when_false: self.alloc(when_false),
        })
    }

    pub fn create_yield(&self, asterisk: bool, expression: Option<Expression<'a>>) -> Expression<'a> {
        Expression::Yield(YieldExpression {
            data: self.new_data(SyntaxKind::YieldExpression),
            asterisk_token: self.opt_token(asterisk, SyntaxKind::AsteriskToken),
            expression: self.opt_alloc(expression),
        })
    }

    pub fn create_spread_element(&self, expression: Expression<'a>) -> Expression<'a> {
        Expression::Spread(SpreadElement {
            data: self.new_data(SyntaxKind::SpreadElement),
            expression: self.alloc(expression),
        })
    }

    pub fn create_class_expression(
        &self,
        name: Option<Identifier>,
        type_parameters: Option<Vec<TypeParameterDeclaration<'a>>>,
        heritage_clauses: Option<Vec<HeritageClause<'a>>>,
        members: Vec<ClassElement<'a>>,
    ) -> Expression<'a> {
        Expression::ClassExpression(self.class_like(
            SyntaxKind::ClassExpression,
            name,
            type_parameters,
            heritage_clauses,
            members,
        ))
    }

    pub fn create_omitted_expression(&self) -> Expression<'a> {
        Expression::Omitted(self.create_token(SyntaxKind::OmittedExpression))
    }

    pub fn create_as_expression(&self, expression: Expression<'a>, type_node: TypeNode<'a>) -> Expression<'a> {
        Expression::As(AsExpression {
            data: self.new_data(SyntaxKind::AsExpression),
            expression: self.alloc(expression),
            type_node: self.alloc(type_node),
        })
    }

    pub fn create_satisfies_expression(&self, expression: Expression<'a>, type_node: TypeNode<'a>) -> Expression<'a> {
        Expression::Satisfies(AsExpression {
            data: self.new_data(SyntaxKind::SatisfiesExpression),
            expression: self.alloc(expression),
            type_node: self.alloc(type_node),
        })
    }

    pub fn create_non_null(&self, expression: Expression<'a>) -> Expression<'a> {
        Expression::NonNull(NonNullExpression {
            data: self.new_data(SyntaxKind::NonNullExpression),
            expression: self.alloc(expression),
        })
    }

    pub fn create_non_null_chain(&self, expression: Expression<'a>) -> Expression<'a> {
        let mut data = self.new_data(SyntaxKind::NonNullExpression);
        data.flags |= NodeFlags::OPTIONAL_CHAIN;
        Expression::NonNull(NonNullExpression {
            data,
            expression: self.alloc(expression),
        })
    }

    pub fn create_meta_property(&self, keyword_token: SyntaxKind, name: Identifier) -> Expression<'a> {
        Expression::MetaProperty(MetaPropertyExpression {
            data: self.new_data(SyntaxKind::MetaProperty),
            keyword_token,
            name,
        })
    }

    pub fn create_partially_emitted_expression(&self, expression: Expression<'a>) -> Expression<'a> {
        Expression::PartiallyEmitted(PartiallyEmittedExpression {
            data: self.new_data(SyntaxKind::PartiallyEmittedExpression),
            expression: self.alloc(expression),
        })
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub fn create_block(&self, statements: Vec<Statement<'a>>, multi_line: bool) -> Block<'a> {
        Block {
            data: self.new_data(SyntaxKind::Block),
            statements: self.list(statements),
            multi_line,
        }
    }

    pub fn create_variable_statement(&self, declaration_list: VariableDeclarationList<'a>) -> Statement<'a> {
        Statement::VariableStatement(VariableStatement {
            data: self.new_data(SyntaxKind::VariableStatement),
            declaration_list,
        })
    }

    /// `flags` carries `LET` or `CONST`; neither means `var`.
    pub fn create_variable_declaration_list(
        &self,
        declarations: Vec<VariableDeclaration<'a>>,
        flags: NodeFlags,
    ) -> VariableDeclarationList<'a> {
        let mut data = self.new_data(SyntaxKind::VariableDeclarationList);
        data.flags |= flags & NodeFlags::BLOCK_SCOPED;
        VariableDeclarationList {
            data,
            declarations: self.list(declarations),
        }
    }

    pub fn create_variable_declaration(
        &self,
        name: BindingName<'a>,
        exclamation: bool,
        type_annotation: Option<TypeNode<'a>>,
        initializer: Option<Expression<'a>>,
    ) -> VariableDeclaration<'a> {
        VariableDeclaration {
            data: self.new_data(SyntaxKind::VariableDeclaration),
            name,
            exclamation_token: self.opt_token(exclamation, SyntaxKind::ExclamationToken),
            type_annotation: self.opt_alloc(type_annotation),
            initializer: self.opt_alloc(initializer),
        }
    }

    pub fn create_empty_statement(&self) -> Statement<'a> {
        Statement::EmptyStatement(self.create_token(SyntaxKind::EmptyStatement))
    }

    pub fn create_expression_statement(&self, expression: Expression<'a>) -> Statement<'a> {
        Statement::ExpressionStatement(ExpressionStatement {
            data: self.new_data(SyntaxKind::ExpressionStatement),
            expression: self.alloc(expression),
        })
    }

    /// `"use strict";` and other prologue directives.
    pub fn create_prologue_directive(&self, text: &str) -> Statement<'a> {
        let literal = Expression::StringLiteral(self.create_string_literal(text, false));
        self.create_expression_statement(literal)
    }

    pub fn create_if(
        &self,
        expression: Expression<'a>,
        then_statement: Statement<'a>,
        else_statement: Option<Statement<'a>>,
    ) -> Statement<'a> {
        Statement::IfStatement(IfStatement {
            data: self.new_data(SyntaxKind::IfStatement),
            expression: self.alloc(expression),
            then_statement: self.alloc(then_statement),
            else_statement: self.opt_alloc(else_statement),
        })
    }

    pub fn create_do(&self, statement: Statement<'a>, expression: Expression<'a>) -> Statement<'a> {
        Statement::DoStatement(DoStatement {
            data: self.new_data(SyntaxKind::DoStatement),
            statement: self.alloc(statement),
            expression: self.alloc(expression),
        })
    }

    pub fn create_while(&self, expression: Expression<'a>, statement: Statement<'a>) -> Statement<'a> {
        Statement::WhileStatement(WhileStatement {
            data: self.new_data(SyntaxKind::WhileStatement),
            expression: self.alloc(expression),
            statement: self.alloc(statement),
        })
    }

    pub fn create_for(
        &self,
        initializer: Option<ForInitializer<'a>>,
        condition: Option<Expression<'a>>,
        incrementor: Option<Expression<'a>>,
        statement: Statement<'a>,
    ) -> Statement<'a> {
        Statement::ForStatement(ForStatement {
            data: self.new_data(SyntaxKind::ForStatement),
            initializer,
            condition: self.opt_alloc(condition),
            incrementor: self.opt_alloc(incrementor),
            statement: self.alloc(statement),
        })
    }

    pub fn create_for_expression_initializer(&self, expression: Expression<'a>) -> ForInitializer<'a> {
        ForInitializer::Expression(self.alloc(expression))
    }

    pub fn create_for_in(
        &self,
        initializer: ForInitializer<'a>,
        expression: Expression<'a>,
        statement: Statement<'a>,
    ) -> Statement<'a> {
        Statement::ForInStatement(ForInOrOfStatement {
            data: self.new_data(SyntaxKind::ForInStatement),
            await_modifier: None,
            initializer,
            expression: self.alloc(expression),
            statement: self.alloc(statement),
        })
    }

    pub fn create_for_of(
        &self,
        is_await: bool,
        initializer: ForInitializer<'a>,
        expression: Expression<'a>,
        statement: Statement<'a>,
    ) -> Statement<'a> {
        Statement::ForOfStatement(ForInOrOfStatement {
            data: self.new_data(SyntaxKind::ForOfStatement),
            await_modifier: self.opt_token(is_await, SyntaxKind::AwaitKeyword),
            initializer,
            expression: self.alloc(expression),
            statement: self.alloc(statement),
        })
    }

    pub fn create_continue(&self, label: Option<Identifier>) -> Statement<'a> {
        Statement::ContinueStatement(BreakOrContinueStatement {
            data: self.new_data(SyntaxKind::ContinueStatement),
            label,
        })
    }

    pub fn create_break(&self, label: Option<Identifier>) -> Statement<'a> {
        Statement::BreakStatement(BreakOrContinueStatement {
            data: self.new_data(SyntaxKind::BreakStatement),
            label,
        })
    }

    pub fn create_return(&self, expression: Option<Expression<'a>>) -> Statement<'a> {
        Statement::ReturnStatement(ReturnStatement {
            data: self.new_data(SyntaxKind::ReturnStatement),
            expression: self.opt_alloc(expression),
        })
    }

    pub fn create_with(&self, expression: Expression<'a>, statement: Statement<'a>) -> Statement<'a> {
        Statement::WithStatement(WithStatement {
            data: self.new_data(SyntaxKind::WithStatement),
            expression: self.alloc(expression),
            statement: self.alloc(statement),
        })
    }

    pub fn create_switch(&self, expression: Expression<'a>, clauses: Vec<CaseOrDefaultClause<'a>>) -> Statement<'a> {
        let case_block = CaseBlock {
            data: self.new_data(SyntaxKind::CaseBlock),
            clauses: self.list(clauses),
        };
        Statement::SwitchStatement(SwitchStatement {
            data: self.new_data(SyntaxKind::SwitchStatement),
            expression: self.alloc(expression),
            case_block,
        })
    }

    pub fn create_case_clause(&self, expression: Expression<'a>, statements: Vec<Statement<'a>>) -> CaseOrDefaultClause<'a> {
        CaseOrDefaultClause {
            data: self.new_data(SyntaxKind::CaseClause),
            expression: Some(self.alloc(expression)),
            statements: self.list(statements),
        }
    }

    pub fn create_default_clause(&self, statements: Vec<Statement<'a>>) -> CaseOrDefaultClause<'a> {
        CaseOrDefaultClause {
            data: self.new_data(SyntaxKind::DefaultClause),
            expression: None,
            statements: self.list(statements),
        }
    }

    pub fn create_labeled(&self, label: Identifier, statement: Statement<'a>) -> Statement<'a> {
        Statement::LabeledStatement(LabeledStatement {
            data: self.new_data(SyntaxKind::LabeledStatement),
            label,
            statement: self.alloc(statement),
        })
    }

    pub fn create_throw(&self, expression: Expression<'a>) -> Statement<'a> {
        Statement::ThrowStatement(ThrowStatement {
            data: self.new_data(SyntaxKind::ThrowStatement),
            expression: self.alloc(expression),
        })
    }

    pub fn create_try(
        &self,
        try_block: Block<'a>,
        catch_clause: Option<CatchClause<'a>>,
        finally_block: Option<Block<'a>>,
    ) -> Statement<'a> {
        Statement::TryStatement(TryStatement {
            data: self.new_data(SyntaxKind::TryStatement),
            try_block,
            catch_clause,
            finally_block,
        })
    }

    pub fn create_catch_clause(
        &self,
        variable_declaration: Option<VariableDeclaration<'a>>,
        block: Block<'a>,
    ) -> CatchClause<'a> {
        CatchClause {
            data: self.new_data(SyntaxKind::CatchClause),
            variable_declaration,
            block,
        }
    }

    pub fn create_debugger(&self) -> Statement<'a> {
        Statement::DebuggerStatement(self.create_token(SyntaxKind::DebuggerStatement))
    }

    pub fn create_not_emitted_statement(&self) -> Statement<'a> {
        Statement::NotEmittedStatement(self.create_token(SyntaxKind::NotEmittedStatement))
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    pub fn create_function_declaration(
        &self,
        asterisk: bool,
        name: Option<Identifier>,
        type_parameters: Option<Vec<TypeParameterDeclaration<'a>>>,
        parameters: Vec<ParameterDeclaration<'a>>,
        return_type: Option<TypeNode<'a>>,
        body: Option<Block<'a>>,
    ) -> Statement<'a> {
        Statement::FunctionDeclaration(FunctionDeclaration {
            data: self.new_data(SyntaxKind::FunctionDeclaration),
            name,
            asterisk_token: self.opt_token(asterisk, SyntaxKind::AsteriskToken),
            type_parameters: self.opt_list(type_parameters),
            parameters: self.list(parameters),
            return_type: self.opt_alloc(return_type),
            body,
        })
    }

    fn class_like(
        &self,
        kind: SyntaxKind,
        name: Option<Identifier>,
        type_parameters: Option<Vec<TypeParameterDeclaration<'a>>>,
        heritage_clauses: Option<Vec<HeritageClause<'a>>>,
        members: Vec<ClassElement<'a>>,
    ) -> ClassLikeDeclaration<'a> {
        ClassLikeDeclaration {
            data: self.new_data(kind),
            name,
            type_parameters: self.opt_list(type_parameters),
            heritage_clauses: self.opt_list(heritage_clauses),
            members: self.list(members),
        }
    }

    pub fn create_class_declaration(
        &self,
        name: Option<Identifier>,
        type_parameters: Option<Vec<TypeParameterDeclaration<'a>>>,
        heritage_clauses: Option<Vec<HeritageClause<'a>>>,
        members: Vec<ClassElement<'a>>,
    ) -> Statement<'a> {
        Statement::ClassDeclaration(self.class_like(
            SyntaxKind::ClassDeclaration,
            name,
            type_parameters,
            heritage_clauses,
            members,
        ))
    }

    pub fn create_heritage_clause(&self, token: SyntaxKind, types: Vec<ExpressionWithTypeArguments<'a>>) -> HeritageClause<'a> {
        HeritageClause {
            data: self.new_data(SyntaxKind::HeritageClause),
            token,
            types: self.list(types),
        }
    }

    pub fn create_expression_with_type_arguments(
        &self,
        expression: Expression<'a>,
        type_arguments: Option<Vec<TypeNode<'a>>>,
    ) -> ExpressionWithTypeArguments<'a> {
        ExpressionWithTypeArguments {
            data: self.new_data(SyntaxKind::ExpressionWithTypeArguments),
            expression: self.alloc(expression),
            type_arguments: self.opt_list(type_arguments),
        }
    }

    pub fn create_property_declaration(
        &self,
        name: PropertyName<'a>,
        question: bool,
        type_annotation: Option<TypeNode<'a>>,
        initializer: Option<Expression<'a>>,
    ) -> ClassElement<'a> {
        ClassElement::PropertyDeclaration(PropertyDeclaration {
            data: self.new_data(SyntaxKind::PropertyDeclaration),
            name,
            question_token: self.opt_token(question, SyntaxKind::QuestionToken),
            exclamation_token: None,
            type_annotation: self.opt_alloc(type_annotation),
            initializer: self.opt_alloc(initializer),
        })
    }

    /// A method of a class or an object literal; convert with `.into()`.
    #[allow(clippy::too_many_arguments)]
    pub fn create_method_declaration(
        &self,
        asterisk: bool,
        name: PropertyName<'a>,
        question: bool,
        type_parameters: Option<Vec<TypeParameterDeclaration<'a>>>,
        parameters: Vec<ParameterDeclaration<'a>>,
        return_type: Option<TypeNode<'a>>,
        body: Option<Block<'a>>,
    ) -> MethodDeclaration<'a> {
        MethodDeclaration {
            data: self.new_data(SyntaxKind::MethodDeclaration),
            name,
            question_token: self.opt_token(question, SyntaxKind::QuestionToken),
            asterisk_token: self.opt_token(asterisk, SyntaxKind::AsteriskToken),
            type_parameters: self.opt_list(type_parameters),
            parameters: self.list(parameters),
            return_type: self.opt_alloc(return_type),
            body,
        }
    }

    pub fn create_constructor_declaration(
        &self,
        parameters: Vec<ParameterDeclaration<'a>>,
        body: Option<Block<'a>>,
    ) -> ClassElement<'a> {
        ClassElement::Constructor(ConstructorDeclaration {
            data: self.new_data(SyntaxKind::Constructor),
            parameters: self.list(parameters),
            body,
        })
    }

    pub fn create_get_accessor_declaration(
        &self,
        name: PropertyName<'a>,
        parameters: Vec<ParameterDeclaration<'a>>,
        return_type: Option<TypeNode<'a>>,
        body: Option<Block<'a>>,
    ) -> AccessorDeclaration<'a> {
        AccessorDeclaration {
            data: self.new_data(SyntaxKind::GetAccessor),
            name,
            parameters: self.list(parameters),
            return_type: self.opt_alloc(return_type),
            body,
        }
    }

    pub fn create_set_accessor_declaration(
        &self,
        name: PropertyName<'a>,
        parameters: Vec<ParameterDeclaration<'a>>,
        body: Option<Block<'a>>,
    ) -> AccessorDeclaration<'a> {
        AccessorDeclaration {
            data: self.new_data(SyntaxKind::SetAccessor),
            name,
            parameters: self.list(parameters),
            return_type: None,
            body,
        }
    }

    pub fn create_index_signature(
        &self,
        parameters: Vec<ParameterDeclaration<'a>>,
        type_annotation: Option<TypeNode<'a>>,
    ) -> IndexSignatureDeclaration<'a> {
        IndexSignatureDeclaration {
            data: self.new_data(SyntaxKind::IndexSignature),
            parameters: self.list(parameters),
            type_annotation: self.opt_alloc(type_annotation),
        }
    }

    pub fn create_class_static_block_declaration(&self, body: Block<'a>) -> ClassElement<'a> {
        ClassElement::ClassStaticBlockDeclaration(ClassStaticBlockDeclaration {
            data: self.new_data(SyntaxKind::ClassStaticBlockDeclaration),
            body,
        })
    }

    pub fn create_semicolon_class_element(&self) -> ClassElement<'a> {
        ClassElement::SemicolonClassElement(self.create_token(SyntaxKind::SemicolonClassElement))
    }

    pub fn create_interface_declaration(
        &self,
        name: Identifier,
        type_parameters: Option<Vec<TypeParameterDeclaration<'a>>>,
        heritage_clauses: Option<Vec<HeritageClause<'a>>>,
        members: Vec<TypeElement<'a>>,
    ) -> Statement<'a> {
        Statement::InterfaceDeclaration(InterfaceDeclaration {
            data: self.new_data(SyntaxKind::InterfaceDeclaration),
            name,
            type_parameters: self.opt_list(type_parameters),
            heritage_clauses: self.opt_list(heritage_clauses),
            members: self.list(members),
        })
    }

    pub fn create_type_alias_declaration(
        &self,
        name: Identifier,
        type_parameters: Option<Vec<TypeParameterDeclaration<'a>>>,
        type_node: TypeNode<'a>,
    ) -> Statement<'a> {
        Statement::TypeAliasDeclaration(TypeAliasDeclaration {
            data: self.new_data(SyntaxKind::TypeAliasDeclaration),
            name,
            type_parameters: self.opt_list(type_parameters),
            type_node: self.alloc(type_node),
        })
    }

    pub fn create_enum_declaration(&self, name: Identifier, members: Vec<EnumMember<'a>>) -> Statement<'a> {
        Statement::EnumDeclaration(EnumDeclaration {
            data: self.new_data(SyntaxKind::EnumDeclaration),
            name,
            members: self.list(members),
        })
    }

    pub fn create_enum_member(&self, name: PropertyName<'a>, initializer: Option<Expression<'a>>) -> EnumMember<'a> {
        EnumMember {
            data: self.new_data(SyntaxKind::EnumMember),
            name,
            initializer: self.opt_alloc(initializer),
        }
    }

    /// `flags` may carry `NAMESPACE` or `GLOBAL_AUGMENTATION`.
    pub fn create_module_declaration(
        &self,
        name: ModuleName<'a>,
        body: Option<ModuleBody<'a>>,
        flags: NodeFlags,
    ) -> Statement<'a> {
        let mut data = self.new_data(SyntaxKind::ModuleDeclaration);
        data.flags |= flags;
        Statement::ModuleDeclaration(ModuleDeclaration { data, name, body })
    }

    /// The inner declaration of `namespace a.b { }`.
    pub fn create_nested_module_declaration(
        &self,
        name: Identifier,
        body: Option<ModuleBody<'a>>,
        flags: NodeFlags,
    ) -> ModuleBody<'a> {
        let mut data = self.new_data(SyntaxKind::ModuleDeclaration);
        data.flags |= flags | NodeFlags::NESTED_NAMESPACE;
        ModuleBody::ModuleDeclaration(self.alloc(ModuleDeclaration {
            data,
            name: ModuleName::Identifier(name),
            body,
        }))
    }

    pub fn create_module_block(&self, statements: Vec<Statement<'a>>) -> ModuleBody<'a> {
        ModuleBody::ModuleBlock(ModuleBlock {
            data: self.new_data(SyntaxKind::ModuleBlock),
            statements: self.list(statements),
        })
    }

    // ========================================================================
    // Imports and Exports
    // ========================================================================

    pub fn create_import_declaration(
        &self,
        import_clause: Option<ImportClause<'a>>,
        module_specifier: Expression<'a>,
        attributes: Option<ImportAttributes<'a>>,
    ) -> Statement<'a> {
        Statement::ImportDeclaration(ImportDeclaration {
            data: self.new_data(SyntaxKind::ImportDeclaration),
            import_clause,
            module_specifier: self.alloc(module_specifier),
            attributes,
        })
    }

    pub fn create_import_clause(
        &self,
        is_type_only: bool,
        name: Option<Identifier>,
        named_bindings: Option<NamedImportBindings<'a>>,
    ) -> ImportClause<'a> {
        ImportClause {
            data: self.new_data(SyntaxKind::ImportClause),
            is_type_only,
            name,
            named_bindings,
        }
    }

    pub fn create_namespace_import(&self, name: Identifier) -> NamedImportBindings<'a> {
        NamedImportBindings::NamespaceImport(NamespaceImport {
            data: self.new_data(SyntaxKind::NamespaceImport),
            name,
        })
    }

    pub fn create_named_imports(&self, elements: Vec<ImportOrExportSpecifier>) -> NamedImportBindings<'a> {
        NamedImportBindings::NamedImports(NamedImports {
            data: self.new_data(SyntaxKind::NamedImports),
            elements: self.list(elements),
        })
    }

    pub fn create_import_specifier(
        &self,
        is_type_only: bool,
        property_name: Option<Identifier>,
        name: Identifier,
    ) -> ImportOrExportSpecifier {
        ImportOrExportSpecifier {
            data: self.new_data(SyntaxKind::ImportSpecifier),
            is_type_only,
            property_name,
            name,
        }
    }

    pub fn create_export_specifier(
        &self,
        is_type_only: bool,
        property_name: Option<Identifier>,
        name: Identifier,
    ) -> ImportOrExportSpecifier {
        ImportOrExportSpecifier {
            data: self.new_data(SyntaxKind::ExportSpecifier),
            is_type_only,
            property_name,
            name,
        }
    }

    pub fn create_export_declaration(
        &self,
        is_type_only: bool,
        export_clause: Option<NamedExportBindings<'a>>,
        module_specifier: Option<Expression<'a>>,
        attributes: Option<ImportAttributes<'a>>,
    ) -> Statement<'a> {
        Statement::ExportDeclaration(ExportDeclaration {
            data: self.new_data(SyntaxKind::ExportDeclaration),
            is_type_only,
            export_clause,
            module_specifier: self.opt_alloc(module_specifier),
            attributes,
        })
    }

    pub fn create_named_exports(&self, elements: Vec<ImportOrExportSpecifier>) -> NamedExportBindings<'a> {
        NamedExportBindings::NamedExports(NamedImports {
            data: self.new_data(SyntaxKind::NamedExports),
            elements: self.list(elements),
        })
    }

    pub fn create_namespace_export(&self, name: Identifier) -> NamedExportBindings<'a> {
        NamedExportBindings::NamespaceExport(NamespaceImport {
            data: self.new_data(SyntaxKind::NamespaceExport),
            name,
        })
    }

    pub fn create_export_assignment(&self, is_export_equals: bool, expression: Expression<'a>) -> Statement<'a> {
        Statement::ExportAssignment(ExportAssignment {
            data: self.new_data(SyntaxKind::ExportAssignment),
            is_export_equals,
            expression: self.alloc(expression),
        })
    }

    /// `export default <expression>;`
    pub fn create_export_default(&self, expression: Expression<'a>) -> Statement<'a> {
        self.create_export_assignment(false, expression)
    }

    pub fn create_import_equals_declaration(
        &self,
        is_type_only: bool,
        name: Identifier,
        module_reference: ModuleReference<'a>,
    ) -> Statement<'a> {
        Statement::ImportEqualsDeclaration(ImportEqualsDeclaration {
            data: self.new_data(SyntaxKind::ImportEqualsDeclaration),
            is_type_only,
            name,
            module_reference,
        })
    }

    pub fn create_external_module_reference(&self, expression: Expression<'a>) -> ModuleReference<'a> {
        ModuleReference::ExternalModuleReference(ExternalModuleReference {
            data: self.new_data(SyntaxKind::ExternalModuleReference),
            expression: self.alloc(expression),
        })
    }

    pub fn create_namespace_export_declaration(&self, name: Identifier) -> Statement<'a> {
        Statement::NamespaceExportDeclaration(NamespaceExportDeclaration {
            data: self.new_data(SyntaxKind::NamespaceExportDeclaration),
            name,
        })
    }

    pub fn create_import_attributes(
        &self,
        token: SyntaxKind,
        elements: Vec<ImportAttribute<'a>>,
        multi_line: bool,
    ) -> ImportAttributes<'a> {
        ImportAttributes {
            data: self.new_data(SyntaxKind::ImportAttributes),
            token,
            elements: self.list(elements),
            multi_line,
        }
    }

    pub fn create_import_attribute(&self, name: ImportAttributeName<'a>, value: Expression<'a>) -> ImportAttribute<'a> {
        ImportAttribute {
            data: self.new_data(SyntaxKind::ImportAttribute),
            name,
            value: self.alloc(value),
        }
    }

    // ========================================================================
    // Parameters and Binding Patterns
    // ========================================================================

    pub fn create_parameter_declaration(
        &self,
        dot_dot_dot: bool,
        name: BindingName<'a>,
        question: bool,
        type_annotation: Option<TypeNode<'a>>,
        initializer: Option<Expression<'a>>,
    ) -> ParameterDeclaration<'a> {
        ParameterDeclaration {
            data: self.new_data(SyntaxKind::Parameter),
            dot_dot_dot_token: self.opt_token(dot_dot_dot, SyntaxKind::DotDotDotToken),
            name,
            question_token: self.opt_token(question, SyntaxKind::QuestionToken),
            type_annotation: self.opt_alloc(type_annotation),
            initializer: self.opt_alloc(initializer),
        }
    }

    /// A plain `name` parameter.
    pub fn create_simple_parameter(&self, name: &str) -> ParameterDeclaration<'a> {
        let name = BindingName::Identifier(self.create_identifier(name));
        self.create_parameter_declaration(false, name, false, None, None)
    }

    pub fn create_type_parameter_declaration(
        &self,
        name: Identifier,
        constraint: Option<TypeNode<'a>>,
        default: Option<TypeNode<'a>>,
    ) -> TypeParameterDeclaration<'a> {
        TypeParameterDeclaration {
            data: self.new_data(SyntaxKind::TypeParameter),
            name,
            constraint: self.opt_alloc(constraint),
            default: self.opt_alloc(default),
        }
    }

    pub fn create_object_binding_pattern(&self, elements: Vec<BindingElement<'a>>) -> BindingName<'a> {
        BindingName::ObjectBindingPattern(self.alloc(ObjectBindingPattern {
            data: self.new_data(SyntaxKind::ObjectBindingPattern),
            elements: self.list(elements),
        }))
    }

    pub fn create_array_binding_pattern(&self, elements: Vec<ArrayBindingElement<'a>>) -> BindingName<'a> {
        BindingName::ArrayBindingPattern(self.alloc(ArrayBindingPattern {
            data: self.new_data(SyntaxKind::ArrayBindingPattern),
            elements: self.list(elements),
        }))
    }

    pub fn create_binding_element(
        &self,
        dot_dot_dot: bool,
        property_name: Option<PropertyName<'a>>,
        name: BindingName<'a>,
        initializer: Option<Expression<'a>>,
    ) -> BindingElement<'a> {
        BindingElement {
            data: self.new_data(SyntaxKind::BindingElement),
            dot_dot_dot_token: self.opt_token(dot_dot_dot, SyntaxKind::DotDotDotToken),
            property_name,
            name,
            initializer: self.opt_alloc(initializer),
        }
    }

    pub fn create_omitted_binding_element(&self) -> ArrayBindingElement<'a> {
        ArrayBindingElement::Omitted(self.create_token(SyntaxKind::OmittedExpression))
    }

    // ========================================================================
    // Type Nodes
    // ========================================================================

    pub fn create_keyword_type_node(&self, kind: SyntaxKind) -> TypeNode<'a> {
        TypeNode::KeywordType(KeywordTypeNode {
            data: self.new_data(kind),
        })
    }

    pub fn create_this_type_node(&self) -> TypeNode<'a> {
        TypeNode::ThisType(KeywordTypeNode {
            data: self.new_data(SyntaxKind::ThisType),
        })
    }

    pub fn create_type_reference_node(
        &self,
        type_name: EntityName<'a>,
        type_arguments: Option<Vec<TypeNode<'a>>>,
    ) -> TypeNode<'a> {
        TypeNode::TypeReference(TypeReferenceNode {
            data: self.new_data(SyntaxKind::TypeReference),
            type_name,
            type_arguments: self.opt_list(type_arguments),
        })
    }

    fn function_type_like(
        &self,
        kind: SyntaxKind,
        type_parameters: Option<Vec<TypeParameterDeclaration<'a>>>,
        parameters: Vec<ParameterDeclaration<'a>>,
        return_type: TypeNode<'a>,
    ) -> FunctionTypeNode<'a> {
        FunctionTypeNode {
            data: self.new_data(kind),
            type_parameters: self.opt_list(type_parameters),
            parameters: self.list(parameters),
            return_type: self.alloc(return_type),
        }
    }

    pub fn create_function_type_node(
        &self,
        type_parameters: Option<Vec<TypeParameterDeclaration<'a>>>,
        parameters: Vec<ParameterDeclaration<'a>>,
        return_type: TypeNode<'a>,
    ) -> TypeNode<'a> {
        TypeNode::FunctionType(self.function_type_like(SyntaxKind::FunctionType, type_parameters, parameters, return_type))
    }

    pub fn create_constructor_type_node(
        &self,
        type_parameters: Option<Vec<TypeParameterDeclaration<'a>>>,
        parameters: Vec<ParameterDeclaration<'a>>,
        return_type: TypeNode<'a>,
    ) -> TypeNode<'a> {
        TypeNode::ConstructorType(self.function_type_like(
            SyntaxKind::ConstructorType,
            type_parameters,
            parameters,
            return_type,
        ))
    }

    pub fn create_type_query_node(&self, expr_name: EntityName<'a>) -> TypeNode<'a> {
        TypeNode::TypeQuery(TypeQueryNode {
            data: self.new_data(SyntaxKind::TypeQuery),
            expr_name,
        })
    }

    pub fn create_type_literal_node(&self, members: Vec<TypeElement<'a>>) -> TypeNode<'a> {
        TypeNode::TypeLiteral(TypeLiteralNode {
            data: self.new_data(SyntaxKind::TypeLiteral),
            members: self.list(members),
        })
    }

    pub fn create_array_type_node(&self, element_type: TypeNode<'a>) -> TypeNode<'a> {
        TypeNode::ArrayType(ArrayTypeNode {
            data: self.new_data(SyntaxKind::ArrayType),
            element_type: self.alloc(element_type),
        })
    }

    pub fn create_tuple_type_node(&self, elements: Vec<TypeNode<'a>>) -> TypeNode<'a> {
        TypeNode::TupleType(TupleTypeNode {
            data: self.new_data(SyntaxKind::TupleType),
            elements: self.list(elements),
        })
    }

    fn wrapped_type(&self, kind: SyntaxKind, type_node: TypeNode<'a>) -> WrappedTypeNode<'a> {
        WrappedTypeNode {
            data: self.new_data(kind),
            type_node: self.alloc(type_node),
        }
    }

    pub fn create_optional_type_node(&self, type_node: TypeNode<'a>) -> TypeNode<'a> {
        TypeNode::OptionalType(self.wrapped_type(SyntaxKind::OptionalType, type_node))
    }

    pub fn create_rest_type_node(&self, type_node: TypeNode<'a>) -> TypeNode<'a> {
        TypeNode::RestType(self.wrapped_type(SyntaxKind::RestType, type_node))
    }

    pub fn create_parenthesized_type(&self, type_node: TypeNode<'a>) -> TypeNode<'a> {
        TypeNode::ParenthesizedType(self.wrapped_type(SyntaxKind::ParenthesizedType, type_node))
    }

    pub fn create_union_type_node(&self, types: Vec<TypeNode<'a>>) -> TypeNode<'a> {
        TypeNode::UnionType(UnionOrIntersectionTypeNode {
            data: self.new_data(SyntaxKind::UnionType),
            types: self.list(types),
        })
    }

    pub fn create_intersection_type_node(&self, types: Vec<TypeNode<'a>>) -> TypeNode<'a> {
        TypeNode::IntersectionType(UnionOrIntersectionTypeNode {
            data: self.new_data(SyntaxKind::IntersectionType),
            types: self.list(types),
        })
    }

    pub fn create_conditional_type_node(
        &self,
        check_type: TypeNode<'a>,
        extends_type: TypeNode<'a>,
        true_type: TypeNode<'a>,
        false_type: TypeNode<'a>,
    ) -> TypeNode<'a> {
        TypeNode::ConditionalType(ConditionalTypeNode {
            data: self.new_data(SyntaxKind::ConditionalType),
            check_type: self.alloc(check_type),
            extends_type: self.alloc(extends_type),
            true_type: self.alloc(true_type),
            false_type: self.alloc(false_type),
        })
    }

    pub fn create_infer_type_node(&self, type_parameter: TypeParameterDeclaration<'a>) -> TypeNode<'a> {
        TypeNode::InferType(InferTypeNode {
            data: self.new_data(SyntaxKind::InferType),
            type_parameter: self.alloc(type_parameter),
        })
    }

    pub fn create_type_operator_node(&self, operator: SyntaxKind, type_node: TypeNode<'a>) -> TypeNode<'a> {
        TypeNode::TypeOperator(TypeOperatorNode {
            data: self.new_data(SyntaxKind::TypeOperator),
            operator,
            type_node: self.alloc(type_node),
        })
    }

    pub fn create_indexed_access_type_node(&self, object_type: TypeNode<'a>, index_type: TypeNode<'a>) -> TypeNode<'a> {
        TypeNode::IndexedAccessType(IndexedAccessTypeNode {
            data: self.new_data(SyntaxKind::IndexedAccessType),
            object_type: self.alloc(object_type),
            index_type: self.alloc(index_type),
        })
    }

    pub fn create_mapped_type_node(
        &self,
        readonly_token: Option<SyntaxKind>,
        type_parameter: TypeParameterDeclaration<'a>,
        name_type: Option<TypeNode<'a>>,
        question_token: Option<SyntaxKind>,
        type_node: Option<TypeNode<'a>>,
    ) -> TypeNode<'a> {
        TypeNode::MappedType(MappedTypeNode {
            data: self.new_data(SyntaxKind::MappedType),
            readonly_token,
            type_parameter: self.alloc(type_parameter),
            name_type: self.opt_alloc(name_type),
            question_token,
            type_node: self.opt_alloc(type_node),
        })
    }

    pub fn create_literal_type_node(&self, literal: Expression<'a>) -> TypeNode<'a> {
        TypeNode::LiteralType(LiteralTypeNode {
            data: self.new_data(SyntaxKind::LiteralType),
            literal: self.alloc(literal),
        })
    }

    pub fn create_named_tuple_member(
        &self,
        dot_dot_dot: bool,
        name: Identifier,
        question: bool,
        type_node: TypeNode<'a>,
    ) -> TypeNode<'a> {
        TypeNode::NamedTupleMember(NamedTupleMemberNode {
            data: self.new_data(SyntaxKind::NamedTupleMember),
            dot_dot_dot_token: self.opt_token(dot_dot_dot, SyntaxKind::DotDotDotToken),
            name,
            question_token: self.opt_token(question, SyntaxKind::QuestionToken),
            type_node: self.alloc(type_node),
        })
    }

    pub fn create_template_literal_type(
        &self,
        head: TemplateLiteralLikeNode,
        template_spans: Vec<TemplateLiteralTypeSpan<'a>>,
    ) -> TypeNode<'a> {
        TypeNode::TemplateLiteralType(TemplateLiteralTypeNode {
            data: self.new_data(SyntaxKind::TemplateLiteralType),
            head,
            template_spans: self.list(template_spans),
        })
    }

    pub fn create_template_literal_type_span(
        &self,
        type_node: TypeNode<'a>,
        literal: TemplateLiteralLikeNode,
    ) -> TemplateLiteralTypeSpan<'a> {
        TemplateLiteralTypeSpan {
            data: self.new_data(SyntaxKind::TemplateLiteralTypeSpan),
            type_node: self.alloc(type_node),
            literal,
        }
    }

    pub fn create_import_type_node(
        &self,
        argument: TypeNode<'a>,
        qualifier: Option<EntityName<'a>>,
        type_arguments: Option<Vec<TypeNode<'a>>>,
        is_type_of: bool,
    ) -> TypeNode<'a> {
        TypeNode::ImportType(ImportTypeNode {
            data: self.new_data(SyntaxKind::ImportType),
            is_type_of,
            argument: self.alloc(argument),
            qualifier,
            type_arguments: self.opt_list(type_arguments),
        })
    }

    pub fn create_type_predicate_node(
        &self,
        asserts: bool,
        parameter_name: TypePredicateParameterName,
        type_node: Option<TypeNode<'a>>,
    ) -> TypeNode<'a> {
        TypeNode::TypePredicate(TypePredicateNode {
            data: self.new_data(SyntaxKind::TypePredicate),
            asserts_modifier: self.opt_token(asserts, SyntaxKind::AssertsKeyword),
            parameter_name,
            type_node: self.opt_alloc(type_node),
        })
    }

    pub fn create_property_signature(
        &self,
        name: PropertyName<'a>,
        question: bool,
        type_annotation: Option<TypeNode<'a>>,
    ) -> TypeElement<'a> {
        TypeElement::PropertySignature(PropertySignature {
            data: self.new_data(SyntaxKind::PropertySignature),
            name,
            question_token: self.opt_token(question, SyntaxKind::QuestionToken),
            type_annotation: self.opt_alloc(type_annotation),
        })
    }

    fn signature(
        &self,
        kind: SyntaxKind,
        name: Option<PropertyName<'a>>,
        question: bool,
        type_parameters: Option<Vec<TypeParameterDeclaration<'a>>>,
        parameters: Vec<ParameterDeclaration<'a>>,
        return_type: Option<TypeNode<'a>>,
    ) -> SignatureDeclaration<'a> {
        SignatureDeclaration {
            data: self.new_data(kind),
            name,
            question_token: self.opt_token(question, SyntaxKind::QuestionToken),
            type_parameters: self.opt_list(type_parameters),
            parameters: self.list(parameters),
            return_type: self.opt_alloc(return_type),
        }
    }

    pub fn create_method_signature(
        &self,
        name: PropertyName<'a>,
        question: bool,
        type_parameters: Option<Vec<TypeParameterDeclaration<'a>>>,
        parameters: Vec<ParameterDeclaration<'a>>,
        return_type: Option<TypeNode<'a>>,
    ) -> TypeElement<'a> {
        TypeElement::MethodSignature(self.signature(
            SyntaxKind::MethodSignature,
            Some(name),
            question,
            type_parameters,
            parameters,
            return_type,
        ))
    }

    pub fn create_call_signature(
        &self,
        type_parameters: Option<Vec<TypeParameterDeclaration<'a>>>,
        parameters: Vec<ParameterDeclaration<'a>>,
        return_type: Option<TypeNode<'a>>,
    ) -> TypeElement<'a> {
        TypeElement::CallSignature(self.signature(
            SyntaxKind::CallSignature,
            None,
            false,
            type_parameters,
            parameters,
            return_type,
        ))
    }

    pub fn create_construct_signature(
        &self,
        type_parameters: Option<Vec<TypeParameterDeclaration<'a>>>,
        parameters: Vec<ParameterDeclaration<'a>>,
        return_type: Option<TypeNode<'a>>,
    ) -> TypeElement<'a> {
        TypeElement::ConstructSignature(self.signature(
            SyntaxKind::ConstructSignature,
            None,
            false,
            type_parameters,
            parameters,
            return_type,
        ))
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl<'a> From<Identifier> for Expression<'a> {
    fn from(id: Identifier) -> Self {
        if id.data.kind == SyntaxKind::PrivateIdentifier {
            Expression::PrivateIdentifier(id)
        } else {
            Expression::Identifier(id)
        }
    }
}

impl<'a> From<Identifier> for BindingName<'a> {
    fn from(id: Identifier) -> Self {
        BindingName::Identifier(id)
    }
}

impl<'a> From<Identifier> for EntityName<'a> {
    fn from(id: Identifier) -> Self {
        EntityName::Identifier(id)
    }
}

impl<'a> From<Identifier> for ModuleName<'a> {
    fn from(id: Identifier) -> Self {
        ModuleName::Identifier(id)
    }
}

impl<'a> From<Identifier> for PropertyName<'a> {
    fn from(id: Identifier) -> Self {
        if id.data.kind == SyntaxKind::PrivateIdentifier {
            PropertyName::PrivateIdentifier(id)
        } else {
            PropertyName::Identifier(id)
        }
    }
}

impl<'a> From<StringLiteral<'a>> for Expression<'a> {
    fn from(lit: StringLiteral<'a>) -> Self {
        Expression::StringLiteral(lit)
    }
}

impl<'a> From<StringLiteral<'a>> for PropertyName<'a> {
    fn from(lit: StringLiteral<'a>) -> Self {
        PropertyName::StringLiteral(lit)
    }
}

impl<'a> From<StringLiteral<'a>> for ModuleName<'a> {
    fn from(lit: StringLiteral<'a>) -> Self {
        ModuleName::StringLiteral(lit)
    }
}

impl<'a> From<NumericLiteral> for Expression<'a> {
    fn from(lit: NumericLiteral) -> Self {
        Expression::NumericLiteral(lit)
    }
}

impl<'a> From<NumericLiteral> for PropertyName<'a> {
    fn from(lit: NumericLiteral) -> Self {
        PropertyName::NumericLiteral(lit)
    }
}

impl<'a> From<Block<'a>> for Statement<'a> {
    fn from(block: Block<'a>) -> Self {
        Statement::Block(block)
    }
}

impl<'a> From<VariableDeclarationList<'a>> for ForInitializer<'a> {
    fn from(list: VariableDeclarationList<'a>) -> Self {
        ForInitializer::VariableDeclarationList(list)
    }
}

impl<'a> From<MethodDeclaration<'a>> for ClassElement<'a> {
    fn from(method: MethodDeclaration<'a>) -> Self {
        ClassElement::MethodDeclaration(method)
    }
}

impl<'a> From<MethodDeclaration<'a>> for ObjectLiteralElement<'a> {
    fn from(method: MethodDeclaration<'a>) -> Self {
        ObjectLiteralElement::MethodDeclaration(method)
    }
}

impl<'a> From<AccessorDeclaration<'a>> for ClassElement<'a> {
    fn from(accessor: AccessorDeclaration<'a>) -> Self {
        if accessor.data.kind == SyntaxKind::GetAccessor {
            ClassElement::GetAccessor(accessor)
        } else {
            ClassElement::SetAccessor(accessor)
        }
    }
}

impl<'a> From<AccessorDeclaration<'a>> for ObjectLiteralElement<'a> {
    fn from(accessor: AccessorDeclaration<'a>) -> Self {
        if accessor.data.kind == SyntaxKind::GetAccessor {
            ObjectLiteralElement::GetAccessor(accessor)
        } else {
            ObjectLiteralElement::SetAccessor(accessor)
        }
    }
}

impl<'a> From<IndexSignatureDeclaration<'a>> for ClassElement<'a> {
    fn from(signature: IndexSignatureDeclaration<'a>) -> Self {
        ClassElement::IndexSignature(signature)
    }
}

impl<'a> From<IndexSignatureDeclaration<'a>> for TypeElement<'a> {
    fn from(signature: IndexSignatureDeclaration<'a>) -> Self {
        TypeElement::IndexSignature(signature)
    }
}

impl<'a> From<BindingElement<'a>> for ArrayBindingElement<'a> {
    fn from(element: BindingElement<'a>) -> Self {
        ArrayBindingElement::BindingElement(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ids_are_unique() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        let a = f.create_identifier("a");
        let b = f.create_identifier("a");
        assert_ne!(a.data.id, b.data.id);
        assert_eq!(a.escaped_text, b.escaped_text);
        assert_eq!(f.node_count(), 2);
    }

    #[test]
    fn test_new_nodes_are_synthesized_until_positioned() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        let id = f.create_identifier("x");
        assert!(id.data.is_synthesized());
        let id = id.at(4, 5);
        assert_eq!(id.data.pos(), 4);
        assert_eq!(id.data.end(), 5);
    }

    #[test]
    fn test_builders_on_shared_family_variants_keep_data() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        let computed = f
            .create_computed_property_name(Expression::Identifier(f.create_identifier("k")))
            .at(1, 4);
        assert!(computed.data().is_synthesized());

        let qualified = f
            .create_qualified_name(EntityName::Identifier(f.create_identifier("a")), f.create_identifier("b"))
            .with_flags(NodeFlags::AMBIENT);
        assert!(!qualified.data().flags.contains(NodeFlags::AMBIENT));

        let pattern = f.create_object_binding_pattern(Vec::new()).at(0, 2);
        assert!(pattern.data().is_synthesized());

        let name = BindingName::Identifier(f.create_identifier("x")).at(3, 4);
        assert_eq!((name.data().pos(), name.data().end()), (3, 4));
    }

    #[test]
    fn test_source_file_detects_module_and_pragmas() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let spec = f.create_string_literal("./b", false);
        let import = f.create_import_declaration(None, spec.into(), None);
        let text = "/// <reference no-default-lib=\"true\"/>\nimport './b';";
        let file = f.create_source_file("a.d.ts", text, vec![import]);
        assert!(file.is_external_module());
        assert!(file.is_declaration_file);
        assert!(file.has_no_default_lib);
        assert_eq!(file.script_kind, ScriptKind::TS);
    }

    #[test]
    fn test_exported_declaration_marks_external_module() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let func = f
            .create_function_declaration(false, Some(f.create_identifier("f")), None, vec![], None, Some(f.create_block(vec![], false)))
            .with_modifiers(ModifierFlags::EXPORT);
        let file = f.create_source_file("a.ts", "export function f() {}", vec![func]);
        assert!(file.is_external_module());
    }

    #[test]
    fn test_source_file_collects_identifiers() {
        let arena = CompilerArena::new();
        let interner = StringInterner::new();
        let f = NodeFactory::new(&arena, interner.clone());
        f.begin_source_file();
        let stmt = f.create_expression_statement(f.create_identifier("foo").into());
        let file = f.create_source_file("a.js", "foo", vec![stmt]);
        assert!(file.identifiers.contains(&interner.intern("foo")));
        assert!(file.is_js_file());
        assert!(file.data.flags.contains(NodeFlags::JAVASCRIPT_FILE));
    }

    #[test]
    fn test_generated_name_for_import_uses_module_specifier() {
        let arena = CompilerArena::new();
        let interner = StringInterner::new();
        let f = NodeFactory::new(&arena, interner.clone());
        let import = f.create_import_declaration(None, f.create_string_literal("./lib/util", false).into(), None);
        let name = f.get_generated_name_for_node(NodeRef::Statement(&import), GeneratedIdentifierFlags::NONE);
        let info = name.auto_generate.expect("generated");
        assert_eq!(info.kind, GeneratedIdentifierKind::Node);
        let source = info.node.expect("source");
        assert_eq!(source.kind, SyntaxKind::ImportDeclaration);
        assert_eq!(interner.resolve(source.text.expect("text")), "./lib/util");
    }

    #[test]
    fn test_generated_identifiers_get_distinct_ids() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        let a = f.create_temp_variable(false);
        let b = f.create_temp_variable(false);
        let (a, b) = (a.auto_generate.expect("a"), b.auto_generate.expect("b"));
        assert_ne!(a.id, b.id);
        assert_eq!(a.kind, GeneratedIdentifierKind::Auto);
        assert!(a.base.is_none());
    }

    #[test]
    fn test_accessor_conversion_follows_kind() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        let getter = f.create_get_accessor_declaration(f.create_identifier("x").into(), vec![], None, None);
        let setter = f.create_set_accessor_declaration(f.create_identifier("x").into(), vec![], None);
        assert!(matches!(ClassElement::from(getter), ClassElement::GetAccessor(_)));
        assert!(matches!(ObjectLiteralElement::from(setter), ObjectLiteralElement::SetAccessor(_)));
    }

    #[test]
    fn test_optional_chain_links_are_flagged() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        let a = f.create_identifier("a");
        let ab = f.create_property_access_chain(a.into(), true, f.create_identifier("b"));
        let abc = f.create_property_access_chain(ab, false, f.create_identifier("c"));
        assert!(abc.is_optional_chain());
        assert!(abc.question_dot_token().is_none());
        assert!(abc.chain_expression().and_then(|e| e.question_dot_token()).is_some());
    }
}
