//! Type annotations, type members and type parameters. None of these print
//! when types are stripped.

use crate::list_format::ListFormat;
use crate::printer::{EmitHint, Printer};
use tsforge_ast::*;

impl<'a, 'r> Printer<'a, 'r> {
    pub(crate) fn emit_type(&mut self, ty: &'a TypeNode<'a>) {
        self.pipeline_emit(EmitHint::Unspecified, ty.as_node());
    }

    pub(crate) fn emit_type_annotation(&mut self, ty: Option<&'a TypeNode<'a>>) {
        if self.options.strip_types {
            return;
        }
        if let Some(ty) = ty {
            self.write_punctuation(":");
            self.write_space();
            self.emit_type(ty);
        }
    }

    pub(crate) fn emit_type_parameters(&mut self, parent: &NodeData, params: Option<&'a [TypeParameterDeclaration<'a>]>) {
        if self.options.strip_types {
            return;
        }
        self.emit_list(Some(parent), params, ListFormat::TYPE_PARAMETERS, |p, param| {
            p.pipeline_emit(EmitHint::Unspecified, NodeRef::TypeParameter(param));
        });
    }

    pub(crate) fn emit_type_arguments(&mut self, parent: &NodeData, args: Option<&'a [TypeNode<'a>]>) {
        if self.options.strip_types {
            return;
        }
        self.emit_list(Some(parent), args, ListFormat::TYPE_ARGUMENTS, |p, ty| p.emit_type(ty));
    }

    pub(crate) fn print_type_parameter(&mut self, param: &'a TypeParameterDeclaration<'a>) {
        self.emit_modifiers(&param.data);
        self.emit_identifier_name(&param.name);
        if let Some(constraint) = param.constraint {
            self.write_space();
            self.write_keyword("extends");
            self.write_space();
            self.emit_type(constraint);
        }
        if let Some(default) = param.default {
            self.write_space();
            self.write_operator("=");
            self.write_space();
            self.emit_type(default);
        }
    }

    // ========================================================================
    // Type nodes
    // ========================================================================

    pub(crate) fn print_type_node(&mut self, ty: &'a TypeNode<'a>) {
        match ty {
            TypeNode::KeywordType(n) => self.write_token(n.data.kind),
            TypeNode::ThisType(_) => self.write_keyword("this"),
            TypeNode::TypeReference(n) => {
                self.pipeline_emit(EmitHint::Unspecified, n.type_name.as_node());
                self.emit_type_arguments(&n.data, n.type_arguments);
            }
            TypeNode::FunctionType(n) | TypeNode::ConstructorType(n) => {
                if n.data.kind == SyntaxKind::ConstructorType {
                    self.emit_modifiers(&n.data);
                    self.write_keyword("new");
                    self.write_space();
                }
                self.emit_type_parameters(&n.data, n.type_parameters);
                self.emit_parameters(&n.data, n.parameters);
                self.write_space();
                self.write_punctuation("=>");
                self.write_space();
                self.emit_type(n.return_type);
            }
            TypeNode::TypeQuery(n) => {
                self.write_keyword("typeof");
                self.write_space();
                self.pipeline_emit(EmitHint::Unspecified, n.expr_name.as_node());
            }
            TypeNode::TypeLiteral(n) => {
                let format = if n.data.emit_flags.contains(EmitFlags::SINGLE_LINE) {
                    ListFormat::SINGLE_LINE_TYPE_LITERAL_MEMBERS
                } else {
                    ListFormat::MULTI_LINE_TYPE_LITERAL_MEMBERS
                };
                self.write_punctuation("{");
                self.emit_list(Some(&n.data), Some(n.members), format, |p, member| {
                    p.pipeline_emit(EmitHint::Unspecified, member.as_node());
                });
                self.write_punctuation("}");
            }
            TypeNode::ArrayType(n) => {
                self.emit_type(n.element_type);
                self.write_punctuation("[");
                self.write_punctuation("]");
            }
            TypeNode::TupleType(n) => {
                let format = if n.data.emit_flags.contains(EmitFlags::MULTI_LINE) {
                    ListFormat::MULTI_LINE_TUPLE_TYPE_ELEMENTS
                } else {
                    ListFormat::SINGLE_LINE_TUPLE_TYPE_ELEMENTS
                };
                self.write_punctuation("[");
                self.emit_list(Some(&n.data), Some(n.elements), format, |p, element| p.emit_type(element));
                self.write_punctuation("]");
            }
            TypeNode::OptionalType(n) => {
                self.emit_type(n.type_node);
                self.write_punctuation("?");
            }
            TypeNode::RestType(n) => {
                self.write_punctuation("...");
                self.emit_type(n.type_node);
            }
            TypeNode::ParenthesizedType(n) => {
                self.write_punctuation("(");
                self.emit_type(n.type_node);
                self.write_punctuation(")");
            }
            TypeNode::UnionType(n) => {
                self.emit_list(Some(&n.data), Some(n.types), ListFormat::UNION_TYPE_CONSTITUENTS, |p, t| p.emit_type(t));
            }
            TypeNode::IntersectionType(n) => {
                self.emit_list(Some(&n.data), Some(n.types), ListFormat::INTERSECTION_TYPE_CONSTITUENTS, |p, t| {
                    p.emit_type(t);
                });
            }
            TypeNode::ConditionalType(n) => {
                self.emit_type(n.check_type);
                self.write_space();
                self.write_keyword("extends");
                self.write_space();
                self.emit_type(n.extends_type);
                self.write_space();
                self.write_punctuation("?");
                self.write_space();
                self.emit_type(n.true_type);
                self.write_space();
                self.write_punctuation(":");
                self.write_space();
                self.emit_type(n.false_type);
            }
            TypeNode::InferType(n) => {
                self.write_keyword("infer");
                self.write_space();
                self.pipeline_emit(EmitHint::Unspecified, NodeRef::TypeParameter(n.type_parameter));
            }
            TypeNode::TypeOperator(n) => {
                self.write_token(n.operator);
                self.write_space();
                self.emit_type(n.type_node);
            }
            TypeNode::IndexedAccessType(n) => {
                self.emit_type(n.object_type);
                self.write_punctuation("[");
                self.emit_type(n.index_type);
                self.write_punctuation("]");
            }
            TypeNode::MappedType(n) => self.print_mapped_type(n),
            TypeNode::LiteralType(n) => self.emit_expression(n.literal),
            TypeNode::NamedTupleMember(n) => {
                if n.dot_dot_dot_token.is_some() {
                    self.write_punctuation("...");
                }
                self.emit_identifier_name(&n.name);
                if n.question_token.is_some() {
                    self.write_punctuation("?");
                }
                self.write_punctuation(":");
                self.write_space();
                self.emit_type(n.type_node);
            }
            TypeNode::TemplateLiteralType(n) => {
                self.pipeline_emit(EmitHint::Unspecified, NodeRef::TemplateLiteral(&n.head));
                self.emit_list(Some(&n.data), Some(n.template_spans), ListFormat::TEMPLATE_EXPRESSION_SPANS, |p, span| {
                    p.pipeline_emit(EmitHint::Unspecified, NodeRef::TemplateLiteralTypeSpan(span));
                });
            }
            TypeNode::ImportType(n) => {
                if n.is_type_of {
                    self.write_keyword("typeof");
                    self.write_space();
                }
                self.write_keyword("import");
                self.write_punctuation("(");
                self.emit_type(n.argument);
                self.write_punctuation(")");
                if let Some(qualifier) = &n.qualifier {
                    self.write_punctuation(".");
                    self.pipeline_emit(EmitHint::Unspecified, qualifier.as_node());
                }
                self.emit_type_arguments(&n.data, n.type_arguments);
            }
            TypeNode::TypePredicate(n) => {
                if n.asserts_modifier.is_some() {
                    self.write_keyword("asserts");
                    self.write_space();
                }
                match &n.parameter_name {
                    TypePredicateParameterName::Identifier(id) => self.emit_identifier_name(id),
                    TypePredicateParameterName::ThisType(_) => self.write_keyword("this"),
                }
                if let Some(ty) = n.type_node {
                    self.write_space();
                    self.write_keyword("is");
                    self.write_space();
                    self.emit_type(ty);
                }
            }
        }
    }

    fn print_mapped_type(&mut self, n: &'a MappedTypeNode<'a>) {
        let single_line = n.data.emit_flags.contains(EmitFlags::SINGLE_LINE);
        self.write_punctuation("{");
        if single_line {
            self.write_space();
        } else {
            self.write_line();
            self.writer.increase_indent();
        }
        if let Some(readonly) = n.readonly_token {
            if readonly != SyntaxKind::ReadonlyKeyword {
                self.write_token(readonly);
            }
            self.write_keyword("readonly");
            self.write_space();
        }
        self.write_punctuation("[");
        let param = n.type_parameter;
        self.emit_identifier_name(&param.name);
        if let Some(constraint) = param.constraint {
            self.write_space();
            self.write_keyword("in");
            self.write_space();
            self.emit_type(constraint);
        }
        if let Some(name_type) = n.name_type {
            self.write_space();
            self.write_keyword("as");
            self.write_space();
            self.emit_type(name_type);
        }
        self.write_punctuation("]");
        if let Some(question) = n.question_token {
            if question != SyntaxKind::QuestionToken {
                self.write_token(question);
            }
            self.write_punctuation("?");
        }
        self.write_punctuation(":");
        self.write_space();
        if let Some(ty) = n.type_node {
            self.emit_type(ty);
        }
        self.write_trailing_semicolon();
        if single_line {
            self.write_space();
        } else {
            self.write_line();
            self.writer.decrease_indent();
        }
        self.write_punctuation("}");
    }

    pub(crate) fn print_template_literal_type_span(&mut self, span: &'a TemplateLiteralTypeSpan<'a>) {
        self.emit_type(span.type_node);
        self.pipeline_emit(EmitHint::Unspecified, NodeRef::TemplateLiteral(&span.literal));
    }

    // ========================================================================
    // Type members
    // ========================================================================

    pub(crate) fn print_type_element(&mut self, member: &'a TypeElement<'a>) {
        match member {
            TypeElement::PropertySignature(n) => {
                self.emit_modifiers(&n.data);
                self.emit_property_name(&n.name);
                if n.question_token.is_some() {
                    self.write_punctuation("?");
                }
                self.emit_type_annotation(n.type_annotation);
                self.write_trailing_semicolon();
            }
            TypeElement::MethodSignature(n) | TypeElement::CallSignature(n) | TypeElement::ConstructSignature(n) => {
                self.emit_modifiers(&n.data);
                if n.data.kind == SyntaxKind::ConstructSignature {
                    self.write_keyword("new");
                    self.write_space();
                }
                if let Some(name) = &n.name {
                    self.emit_property_name(name);
                }
                if n.question_token.is_some() {
                    self.write_punctuation("?");
                }
                self.emit_signature_head(&n.data, n.type_parameters, n.parameters, n.return_type);
                self.write_trailing_semicolon();
            }
            TypeElement::IndexSignature(n) => self.print_index_signature(n),
        }
    }
}
