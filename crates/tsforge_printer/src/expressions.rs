//! Expressions and object literal members.

use crate::list_format::ListFormat;
use crate::printer::{EmitHint, Printer};
use tsforge_ast::*;

impl<'a, 'r> Printer<'a, 'r> {
    // ========================================================================
    // Expression printing
    // ========================================================================

    pub(crate) fn print_expression(&mut self, expr: &'a Expression<'a>, hint: EmitHint) {
        let strip = self.options.strip_types;
        match expr {
            Expression::Identifier(id) => self.print_identifier(id, hint),
            Expression::PrivateIdentifier(id) => {
                let text = self.identifier_text(id);
                self.write(&text);
            }
            Expression::StringLiteral(n) => self.print_string_literal(n),
            Expression::NumericLiteral(n) => {
                let interner = self.interner;
                self.write_literal(interner.resolve(n.text));
            }
            Expression::BigIntLiteral(n) | Expression::RegularExpressionLiteral(n) => {
                let interner = self.interner;
                self.write_literal(interner.resolve(n.text));
            }
            Expression::NoSubstitutionTemplateLiteral(n) => self.print_template_literal(n),
            Expression::TemplateExpression(n) => {
                self.pipeline_emit(EmitHint::Unspecified, NodeRef::TemplateLiteral(&n.head));
                self.emit_list(Some(&n.data), Some(n.template_spans), ListFormat::TEMPLATE_EXPRESSION_SPANS, |p, span| {
                    p.pipeline_emit(EmitHint::Unspecified, NodeRef::TemplateSpan(span));
                });
            }
            Expression::ArrayLiteral(n) => {
                let mut format = ListFormat::ARRAY_LITERAL_EXPRESSION_ELEMENTS;
                if n.multi_line {
                    format |= ListFormat::PREFER_NEW_LINE;
                }
                self.emit_list(Some(&n.data), Some(n.elements), format, |p, element| p.emit_expression(element));
            }
            Expression::ObjectLiteral(n) => {
                let mut format = ListFormat::OBJECT_LITERAL_EXPRESSION_PROPERTIES;
                if n.multi_line {
                    format |= ListFormat::PREFER_NEW_LINE;
                }
                self.emit_list(Some(&n.data), Some(n.properties), format, |p, property| {
                    p.pipeline_emit(EmitHint::Unspecified, property.as_node());
                });
            }
            Expression::PropertyAccess(n) => {
                self.emit_expression(n.expression);
                if n.question_dot_token.is_some() {
                    self.write_punctuation("?.");
                } else {
                    if self.may_need_dot_dot(n.expression) {
                        self.write_punctuation(".");
                    }
                    self.write_punctuation(".");
                }
                self.emit_identifier_name(n.name.identifier());
            }
            Expression::ElementAccess(n) => {
                self.emit_expression(n.expression);
                if n.question_dot_token.is_some() {
                    self.write_punctuation("?.");
                }
                self.write_punctuation("[");
                self.emit_expression(n.argument_expression);
                self.write_punctuation("]");
            }
            Expression::Call(n) => {
                self.emit_expression(n.expression);
                if n.question_dot_token.is_some() {
                    self.write_punctuation("?.");
                }
                self.emit_type_arguments(&n.data, n.type_arguments);
                self.emit_list(Some(&n.data), Some(n.arguments), ListFormat::CALL_EXPRESSION_ARGUMENTS, |p, arg| {
                    p.emit_expression(arg);
                });
            }
            Expression::New(n) => {
                self.emit_token_with_comment(SyntaxKind::NewKeyword, n.data.pos(), &n.data, false);
                self.write_space();
                self.emit_expression(n.expression);
                self.emit_type_arguments(&n.data, n.type_arguments);
                self.emit_list(Some(&n.data), n.arguments, ListFormat::NEW_EXPRESSION_ARGUMENTS, |p, arg| {
                    p.emit_expression(arg);
                });
            }
            Expression::TaggedTemplate(n) => {
                self.emit_expression(n.tag);
                self.emit_type_arguments(&n.data, n.type_arguments);
                self.emit_expression(n.template);
            }
            Expression::TypeAssertion(n) => {
                if !strip {
                    self.write_punctuation("<");
                    self.emit_type(n.type_node);
                    self.write_punctuation(">");
                }
                self.emit_expression(n.expression);
            }
            Expression::Parenthesized(n) => {
                let open_end = self.emit_token_with_comment(SyntaxKind::OpenParenToken, n.data.pos(), &n.data, false);
                self.emit_expression(n.expression);
                let close_pos = if n.expression.data().is_synthesized() { open_end } else { n.expression.data().end() };
                self.emit_token_with_comment(SyntaxKind::CloseParenToken, close_pos, &n.data, false);
            }
            Expression::FunctionExpression(n) => {
                self.emit_modifiers(&n.data);
                self.write_keyword("function");
                if n.asterisk_token.is_some() {
                    self.write_punctuation("*");
                }
                self.write_space();
                if let Some(name) = &n.name {
                    self.emit_identifier_name(name);
                }
                self.emit_signature_and_body(&n.data, n.type_parameters, n.parameters, n.return_type, Some(&n.body));
            }
            Expression::ArrowFunction(n) => self.print_arrow_function(n),
            Expression::Delete(n) | Expression::TypeOf(n) | Expression::Void(n) | Expression::Await(n) => {
                let keyword = match n.data.kind {
                    SyntaxKind::DeleteExpression => SyntaxKind::DeleteKeyword,
                    SyntaxKind::TypeOfExpression => SyntaxKind::TypeOfKeyword,
                    SyntaxKind::VoidExpression => SyntaxKind::VoidKeyword,
                    _ => SyntaxKind::AwaitKeyword,
                };
                self.emit_token_with_comment(keyword, n.data.pos(), &n.data, false);
                self.write_space();
                self.emit_expression(n.expression);
            }
            Expression::PrefixUnary(n) => {
                self.write_token(n.operator);
                if needs_space_before_operand(n) {
                    self.write_space();
                }
                self.emit_expression(n.operand);
            }
            Expression::PostfixUnary(n) => {
                self.emit_expression(n.operand);
                self.write_token(n.operator);
            }
            Expression::Binary(n) => {
                self.emit_expression(n.left);
                let operator = n.operator();
                if operator != SyntaxKind::CommaToken {
                    self.write_space();
                }
                self.write_token(operator);
                self.write_space();
                self.emit_expression(n.right);
            }
            Expression::Conditional(n) => {
                self.emit_expression(n.condition);
                self.write_space();
                self.write_punctuation("?");
                self.write_space();
                self.emit_expression(n.when_true);
                self.write_space();
                self.write_punctuation(":");
                self.write_space();
                self.emit_expression(n.when_false);
            }
            Expression::Yield(n) => {
                self.emit_token_with_comment(SyntaxKind::YieldKeyword, n.data.pos(), &n.data, false);
                if n.asterisk_token.is_some() {
                    self.write_punctuation("*");
                }
                self.emit_expression_with_leading_space(n.expression);
            }
            Expression::Spread(n) => {
                self.write_punctuation("...");
                self.emit_expression(n.expression);
            }
            Expression::ClassExpression(n) => self.print_class_like(n),
            Expression::Omitted(_) => {}
            Expression::As(n) | Expression::Satisfies(n) => {
                self.emit_expression(n.expression);
                if !strip {
                    self.write_space();
                    self.write_keyword(if n.data.kind == SyntaxKind::SatisfiesExpression { "satisfies" } else { "as" });
                    self.write_space();
                    self.emit_type(n.type_node);
                }
            }
            Expression::NonNull(n) => {
                self.emit_expression(n.expression);
                if !strip {
                    self.write_operator("!");
                }
            }
            Expression::MetaProperty(n) => {
                self.write_token(n.keyword_token);
                self.write_punctuation(".");
                self.emit_identifier_name(&n.name);
            }
            Expression::PartiallyEmitted(n) => self.emit_expression(n.expression),
            Expression::Keyword(token) => self.write_token(token.kind()),
        }
    }

    fn print_arrow_function(&mut self, n: &'a ArrowFunction<'a>) {
        self.emit_modifiers(&n.data);
        let reuse = n.data.emit_flags.contains(EmitFlags::REUSE_TEMP_VARIABLE_SCOPE);
        self.names.push_scope(reuse);
        for param in n.parameters {
            self.generate_names_for_binding(&param.name);
        }
        if let ArrowFunctionBody::Block(body) = &n.body {
            self.generate_names_for_statements(body.statements);
        }

        self.emit_type_parameters(&n.data, n.type_parameters);
        if self.can_emit_simple_arrow_head(n) {
            self.emit_list(Some(&n.data), Some(n.parameters), ListFormat::PARAMETERS - ListFormat::PARENTHESIS, |p, param| {
                p.pipeline_emit(EmitHint::Unspecified, NodeRef::Parameter(param));
            });
        } else {
            self.emit_parameters(&n.data, n.parameters);
        }
        self.emit_type_annotation(n.return_type);
        self.write_space();
        self.write_punctuation("=>");
        match &n.body {
            ArrowFunctionBody::Block(body) => self.emit_block_function_body(body),
            ArrowFunctionBody::Expression(body) => {
                self.write_space();
                self.emit_expression(body);
            }
        }
        self.names.pop_scope(reuse);
    }

    /// `x => ...` without parentheses, kept only when the source had none.
    fn can_emit_simple_arrow_head(&self, n: &ArrowFunction<'a>) -> bool {
        let [param] = n.parameters else {
            return false;
        };
        !n.data.is_synthesized()
            && param.data.pos() == n.data.pos()
            && n.type_parameters.is_none()
            && n.return_type.is_none()
            && param.data.modifier_flags.is_empty()
            && param.dot_dot_dot_token.is_none()
            && param.question_token.is_none()
            && param.type_annotation.is_none()
            && param.initializer.is_none()
            && matches!(param.name, BindingName::Identifier(_))
    }

    /// `1..toString()`: an integer followed by a dot would read as a
    /// decimal point.
    fn may_need_dot_dot(&self, expression: &Expression<'a>) -> bool {
        let mut expression = expression;
        while let Expression::PartiallyEmitted(n) = expression {
            expression = n.expression;
        }
        match expression {
            Expression::NumericLiteral(n) => {
                let text = self.interner.resolve(n.text);
                let with_specifier = n
                    .numeric_literal_flags
                    .intersects(TokenFlags::HEX_SPECIFIER | TokenFlags::BINARY_SPECIFIER | TokenFlags::OCTAL_SPECIFIER);
                !with_specifier && !text.contains(['.', 'e', 'E'])
            }
            Expression::PropertyAccess(_) | Expression::ElementAccess(_) => self
                .resolver
                .get_constant_value(expression.data().id)
                .is_some_and(|value| value.is_finite() && value >= 0.0 && value.fract() == 0.0),
            _ => false,
        }
    }

    pub(crate) fn print_template_span(&mut self, span: &'a TemplateSpan<'a>) {
        self.emit_expression(span.expression);
        self.pipeline_emit(EmitHint::Unspecified, NodeRef::TemplateLiteral(&span.literal));
    }

    pub(crate) fn print_object_literal_element(&mut self, property: &'a ObjectLiteralElement<'a>) {
        match property {
            ObjectLiteralElement::PropertyAssignment(n) => {
                self.emit_property_name(&n.name);
                self.write_punctuation(":");
                self.write_space();
                self.emit_expression(n.initializer);
            }
            ObjectLiteralElement::ShorthandPropertyAssignment(n) => {
                self.emit_identifier_name(&n.name);
                self.emit_initializer(n.object_assignment_initializer);
            }
            ObjectLiteralElement::SpreadAssignment(n) => {
                self.write_punctuation("...");
                self.emit_expression(n.expression);
            }
            ObjectLiteralElement::MethodDeclaration(n) => self.print_method(n),
            ObjectLiteralElement::GetAccessor(n) | ObjectLiteralElement::SetAccessor(n) => self.print_accessor(n),
        }
    }

    pub(crate) fn print_qualified_name(&mut self, name: &'a QualifiedName<'a>) {
        self.pipeline_emit(EmitHint::Unspecified, name.left.as_node());
        self.write_punctuation(".");
        self.emit_identifier_name(&name.right);
    }

    pub(crate) fn print_computed_property_name(&mut self, name: &'a ComputedPropertyName<'a>) {
        self.write_punctuation("[");
        self.emit_expression(name.expression);
        self.write_punctuation("]");
    }

    pub(crate) fn print_expression_with_type_arguments(&mut self, node: &'a ExpressionWithTypeArguments<'a>) {
        self.emit_expression(node.expression);
        self.emit_type_arguments(&node.data, node.type_arguments);
    }
}

/// `+ +x` and `- --x` need a space to not read as one token.
fn needs_space_before_operand(n: &PrefixUnaryExpression<'_>) -> bool {
    let Expression::PrefixUnary(operand) = n.operand else {
        return false;
    };
    match n.operator {
        SyntaxKind::PlusToken => matches!(operand.operator, SyntaxKind::PlusToken | SyntaxKind::PlusPlusToken),
        SyntaxKind::MinusToken => matches!(operand.operator, SyntaxKind::MinusToken | SyntaxKind::MinusMinusToken),
        _ => false,
    }
}
