//! Generic child iteration.
//!
//! [`for_each_child`] yields the direct children of a node in source order.
//! Names, tokens that carry a position (`?`, `...`, `*`) and type
//! annotations are all children; flag-only tokens such as modifiers are not.

use crate::node::*;
use crate::node_ref::NodeRef;

fn visit_list<'a, T>(list: &'a [T], to_node: impl Fn(&'a T) -> NodeRef<'a>, cb: &mut impl FnMut(NodeRef<'a>)) {
    for item in list {
        cb(to_node(item));
    }
}

fn visit_types<'a>(types: Option<&'a [TypeNode<'a>]>, cb: &mut impl FnMut(NodeRef<'a>)) {
    if let Some(types) = types {
        visit_list(types, NodeRef::TypeNode, cb);
    }
}

fn visit_type_parameters<'a>(params: Option<&'a [TypeParameterDeclaration<'a>]>, cb: &mut impl FnMut(NodeRef<'a>)) {
    if let Some(params) = params {
        visit_list(params, NodeRef::TypeParameter, cb);
    }
}

fn visit_opt_expr<'a>(expr: Option<&'a Expression<'a>>, cb: &mut impl FnMut(NodeRef<'a>)) {
    if let Some(expr) = expr {
        cb(NodeRef::Expression(expr));
    }
}

fn visit_opt_type<'a>(ty: Option<&'a TypeNode<'a>>, cb: &mut impl FnMut(NodeRef<'a>)) {
    if let Some(ty) = ty {
        cb(NodeRef::TypeNode(ty));
    }
}

fn visit_opt_token<'a>(token: &'a Option<Token>, cb: &mut impl FnMut(NodeRef<'a>)) {
    if let Some(token) = token {
        cb(NodeRef::Token(token));
    }
}

fn visit_heritage<'a>(clauses: Option<&'a [HeritageClause<'a>]>, cb: &mut impl FnMut(NodeRef<'a>)) {
    if let Some(clauses) = clauses {
        visit_list(clauses, NodeRef::HeritageClause, cb);
    }
}

fn visit_signature<'a>(
    type_parameters: Option<&'a [TypeParameterDeclaration<'a>]>,
    parameters: &'a [ParameterDeclaration<'a>],
    return_type: Option<&'a TypeNode<'a>>,
    cb: &mut impl FnMut(NodeRef<'a>),
) {
    visit_type_parameters(type_parameters, cb);
    visit_list(parameters, NodeRef::Parameter, cb);
    visit_opt_type(return_type, cb);
}

fn visit_class_like<'a>(node: &'a ClassLikeDeclaration<'a>, cb: &mut impl FnMut(NodeRef<'a>)) {
    if let Some(name) = &node.name {
        cb(NodeRef::Identifier(name));
    }
    visit_type_parameters(node.type_parameters, cb);
    visit_heritage(node.heritage_clauses, cb);
    visit_list(node.members, NodeRef::ClassElement, cb);
}

fn visit_method<'a>(node: &'a MethodDeclaration<'a>, cb: &mut impl FnMut(NodeRef<'a>)) {
    visit_opt_token(&node.asterisk_token, cb);
    cb(node.name.as_node());
    visit_opt_token(&node.question_token, cb);
    visit_signature(node.type_parameters, node.parameters, node.return_type, cb);
    if let Some(body) = &node.body {
        cb(NodeRef::Block(body));
    }
}

fn visit_accessor<'a>(node: &'a AccessorDeclaration<'a>, cb: &mut impl FnMut(NodeRef<'a>)) {
    cb(node.name.as_node());
    visit_signature(None, node.parameters, node.return_type, cb);
    if let Some(body) = &node.body {
        cb(NodeRef::Block(body));
    }
}

fn visit_named_imports<'a>(node: &'a NamedImports<'a>, cb: &mut impl FnMut(NodeRef<'a>)) {
    visit_list(node.elements, NodeRef::ImportSpecifier, cb);
}

fn visit_statement<'a>(stmt: &'a Statement<'a>, cb: &mut impl FnMut(NodeRef<'a>)) {
    match stmt {
        Statement::VariableStatement(n) => cb(NodeRef::VariableDeclarationList(&n.declaration_list)),
        Statement::FunctionDeclaration(n) => {
            visit_opt_token(&n.asterisk_token, cb);
            if let Some(name) = &n.name {
                cb(NodeRef::Identifier(name));
            }
            visit_signature(n.type_parameters, n.parameters, n.return_type, cb);
            if let Some(body) = &n.body {
                cb(NodeRef::Block(body));
            }
        }
        Statement::ClassDeclaration(n) => visit_class_like(n, cb),
        Statement::InterfaceDeclaration(n) => {
            cb(NodeRef::Identifier(&n.name));
            visit_type_parameters(n.type_parameters, cb);
            visit_heritage(n.heritage_clauses, cb);
            visit_list(n.members, NodeRef::TypeElement, cb);
        }
        Statement::TypeAliasDeclaration(n) => {
            cb(NodeRef::Identifier(&n.name));
            visit_type_parameters(n.type_parameters, cb);
            cb(NodeRef::TypeNode(n.type_node));
        }
        Statement::EnumDeclaration(n) => {
            cb(NodeRef::Identifier(&n.name));
            visit_list(n.members, NodeRef::EnumMember, cb);
        }
        Statement::ModuleDeclaration(n) => visit_module_declaration(n, cb),
        Statement::ImportDeclaration(n) => {
            if let Some(clause) = &n.import_clause {
                cb(NodeRef::ImportClause(clause));
            }
            cb(NodeRef::Expression(n.module_specifier));
            if let Some(attributes) = &n.attributes {
                cb(NodeRef::ImportAttributes(attributes));
            }
        }
        Statement::ImportEqualsDeclaration(n) => {
            cb(NodeRef::Identifier(&n.name));
            cb(n.module_reference.as_node());
        }
        Statement::ExportDeclaration(n) => {
            if let Some(clause) = &n.export_clause {
                cb(clause.as_node());
            }
            visit_opt_expr(n.module_specifier, cb);
            if let Some(attributes) = &n.attributes {
                cb(NodeRef::ImportAttributes(attributes));
            }
        }
        Statement::ExportAssignment(n) => cb(NodeRef::Expression(n.expression)),
        Statement::NamespaceExportDeclaration(n) => cb(NodeRef::Identifier(&n.name)),
        Statement::Block(n) => visit_list(n.statements, NodeRef::Statement, cb),
        Statement::EmptyStatement(_) | Statement::DebuggerStatement(_) | Statement::NotEmittedStatement(_) => {}
        Statement::ExpressionStatement(n) => cb(NodeRef::Expression(n.expression)),
        Statement::IfStatement(n) => {
            cb(NodeRef::Expression(n.expression));
            cb(NodeRef::Statement(n.then_statement));
            if let Some(else_statement) = n.else_statement {
                cb(NodeRef::Statement(else_statement));
            }
        }
        Statement::DoStatement(n) => {
            cb(NodeRef::Statement(n.statement));
            cb(NodeRef::Expression(n.expression));
        }
        Statement::WhileStatement(n) => {
            cb(NodeRef::Expression(n.expression));
            cb(NodeRef::Statement(n.statement));
        }
        Statement::ForStatement(n) => {
            if let Some(init) = &n.initializer {
                cb(init.as_node());
            }
            visit_opt_expr(n.condition, cb);
            visit_opt_expr(n.incrementor, cb);
            cb(NodeRef::Statement(n.statement));
        }
        Statement::ForInStatement(n) | Statement::ForOfStatement(n) => {
            visit_opt_token(&n.await_modifier, cb);
            cb(n.initializer.as_node());
            cb(NodeRef::Expression(n.expression));
            cb(NodeRef::Statement(n.statement));
        }
        Statement::ContinueStatement(n) | Statement::BreakStatement(n) => {
            if let Some(label) = &n.label {
                cb(NodeRef::Identifier(label));
            }
        }
        Statement::ReturnStatement(n) => visit_opt_expr(n.expression, cb),
        Statement::WithStatement(n) => {
            cb(NodeRef::Expression(n.expression));
            cb(NodeRef::Statement(n.statement));
        }
        Statement::SwitchStatement(n) => {
            cb(NodeRef::Expression(n.expression));
            cb(NodeRef::CaseBlock(&n.case_block));
        }
        Statement::LabeledStatement(n) => {
            cb(NodeRef::Identifier(&n.label));
            cb(NodeRef::Statement(n.statement));
        }
        Statement::ThrowStatement(n) => cb(NodeRef::Expression(n.expression)),
        Statement::TryStatement(n) => {
            cb(NodeRef::Block(&n.try_block));
            if let Some(catch) = &n.catch_clause {
                cb(NodeRef::CatchClause(catch));
            }
            if let Some(finally) = &n.finally_block {
                cb(NodeRef::Block(finally));
            }
        }
    }
}

fn visit_module_declaration<'a>(n: &'a ModuleDeclaration<'a>, cb: &mut impl FnMut(NodeRef<'a>)) {
    cb(n.name.as_node());
    if let Some(body) = &n.body {
        cb(body.as_node());
    }
}

fn visit_expression<'a>(expr: &'a Expression<'a>, cb: &mut impl FnMut(NodeRef<'a>)) {
    match expr {
        Expression::Identifier(_)
        | Expression::PrivateIdentifier(_)
        | Expression::StringLiteral(_)
        | Expression::NumericLiteral(_)
        | Expression::BigIntLiteral(_)
        | Expression::RegularExpressionLiteral(_)
        | Expression::NoSubstitutionTemplateLiteral(_)
        | Expression::Omitted(_)
        | Expression::Keyword(_) => {}
        Expression::TemplateExpression(n) => {
            cb(NodeRef::TemplateLiteral(&n.head));
            visit_list(n.template_spans, NodeRef::TemplateSpan, cb);
        }
        Expression::ArrayLiteral(n) => visit_list(n.elements, NodeRef::Expression, cb),
        Expression::ObjectLiteral(n) => visit_list(n.properties, NodeRef::ObjectLiteralElement, cb),
        Expression::PropertyAccess(n) => {
            cb(NodeRef::Expression(n.expression));
            visit_opt_token(&n.question_dot_token, cb);
            cb(NodeRef::Identifier(n.name.identifier()));
        }
        Expression::ElementAccess(n) => {
            cb(NodeRef::Expression(n.expression));
            visit_opt_token(&n.question_dot_token, cb);
            cb(NodeRef::Expression(n.argument_expression));
        }
        Expression::Call(n) => {
            cb(NodeRef::Expression(n.expression));
            visit_opt_token(&n.question_dot_token, cb);
            visit_types(n.type_arguments, cb);
            visit_list(n.arguments, NodeRef::Expression, cb);
        }
        Expression::New(n) => {
            cb(NodeRef::Expression(n.expression));
            visit_types(n.type_arguments, cb);
            if let Some(args) = n.arguments {
                visit_list(args, NodeRef::Expression, cb);
            }
        }
        Expression::TaggedTemplate(n) => {
            cb(NodeRef::Expression(n.tag));
            visit_types(n.type_arguments, cb);
            cb(NodeRef::Expression(n.template));
        }
        Expression::TypeAssertion(n) => {
            cb(NodeRef::TypeNode(n.type_node));
            cb(NodeRef::Expression(n.expression));
        }
        Expression::Parenthesized(n) => cb(NodeRef::Expression(n.expression)),
        Expression::FunctionExpression(n) => {
            visit_opt_token(&n.asterisk_token, cb);
            if let Some(name) = &n.name {
                cb(NodeRef::Identifier(name));
            }
            visit_signature(n.type_parameters, n.parameters, n.return_type, cb);
            cb(NodeRef::Block(&n.body));
        }
        Expression::ArrowFunction(n) => {
            visit_signature(n.type_parameters, n.parameters, n.return_type, cb);
            cb(NodeRef::Token(&n.equals_greater_than_token));
            cb(n.body.as_node());
        }
        Expression::Delete(n) | Expression::TypeOf(n) | Expression::Void(n) | Expression::Await(n) => {
            cb(NodeRef::Expression(n.expression))
        }
        Expression::PrefixUnary(n) => cb(NodeRef::Expression(n.operand)),
        Expression::PostfixUnary(n) => cb(NodeRef::Expression(n.operand)),
        Expression::Binary(n) => {
            cb(NodeRef::Expression(n.left));
            cb(NodeRef::Token(&n.operator_token));
            cb(NodeRef::Expression(n.right));
        }
        Expression::Conditional(n) => {
            cb(NodeRef::Expression(n.condition));
            cb(NodeRef::Token(&n.question_token));
            cb(NodeRef::Expression(n.when_true));
            cb(NodeRef::Token(&n.colon_token));
            cb(NodeRef::Expression(n.when_false));
        }
        Expression::Yield(n) => {
            visit_opt_token(&n.asterisk_token, cb);
            visit_opt_expr(n.expression, cb);
        }
        Expression::Spread(n) => cb(NodeRef::Expression(n.expression)),
        Expression::ClassExpression(n) => visit_class_like(n, cb),
        Expression::As(n) | Expression::Satisfies(n) => {
            cb(NodeRef::Expression(n.expression));
            cb(NodeRef::TypeNode(n.type_node));
        }
        Expression::NonNull(n) => cb(NodeRef::Expression(n.expression)),
        Expression::MetaProperty(n) => cb(NodeRef::Identifier(&n.name)),
        Expression::PartiallyEmitted(n) => cb(NodeRef::Expression(n.expression)),
    }
}

fn visit_type_node<'a>(ty: &'a TypeNode<'a>, cb: &mut impl FnMut(NodeRef<'a>)) {
    match ty {
        TypeNode::KeywordType(_) | TypeNode::ThisType(_) => {}
        TypeNode::TypeReference(n) => {
            cb(n.type_name.as_node());
            visit_types(n.type_arguments, cb);
        }
        TypeNode::FunctionType(n) | TypeNode::ConstructorType(n) => {
            visit_signature(n.type_parameters, n.parameters, Some(n.return_type), cb)
        }
        TypeNode::TypeQuery(n) => cb(n.expr_name.as_node()),
        TypeNode::TypeLiteral(n) => visit_list(n.members, NodeRef::TypeElement, cb),
        TypeNode::ArrayType(n) => cb(NodeRef::TypeNode(n.element_type)),
        TypeNode::TupleType(n) => visit_list(n.elements, NodeRef::TypeNode, cb),
        TypeNode::OptionalType(n) | TypeNode::RestType(n) | TypeNode::ParenthesizedType(n) => {
            cb(NodeRef::TypeNode(n.type_node))
        }
        TypeNode::UnionType(n) | TypeNode::IntersectionType(n) => visit_list(n.types, NodeRef::TypeNode, cb),
        TypeNode::ConditionalType(n) => {
            cb(NodeRef::TypeNode(n.check_type));
            cb(NodeRef::TypeNode(n.extends_type));
            cb(NodeRef::TypeNode(n.true_type));
            cb(NodeRef::TypeNode(n.false_type));
        }
        TypeNode::InferType(n) => cb(NodeRef::TypeParameter(n.type_parameter)),
        TypeNode::TypeOperator(n) => cb(NodeRef::TypeNode(n.type_node)),
        TypeNode::IndexedAccessType(n) => {
            cb(NodeRef::TypeNode(n.object_type));
            cb(NodeRef::TypeNode(n.index_type));
        }
        TypeNode::MappedType(n) => {
            cb(NodeRef::TypeParameter(n.type_parameter));
            visit_opt_type(n.name_type, cb);
            visit_opt_type(n.type_node, cb);
        }
        TypeNode::LiteralType(n) => cb(NodeRef::Expression(n.literal)),
        TypeNode::NamedTupleMember(n) => {
            visit_opt_token(&n.dot_dot_dot_token, cb);
            cb(NodeRef::Identifier(&n.name));
            visit_opt_token(&n.question_token, cb);
            cb(NodeRef::TypeNode(n.type_node));
        }
        TypeNode::TemplateLiteralType(n) => {
            cb(NodeRef::TemplateLiteral(&n.head));
            visit_list(n.template_spans, NodeRef::TemplateLiteralTypeSpan, cb);
        }
        TypeNode::ImportType(n) => {
            cb(NodeRef::TypeNode(n.argument));
            if let Some(qualifier) = &n.qualifier {
                cb(qualifier.as_node());
            }
            visit_types(n.type_arguments, cb);
        }
        TypeNode::TypePredicate(n) => {
            visit_opt_token(&n.asserts_modifier, cb);
            match &n.parameter_name {
                TypePredicateParameterName::Identifier(id) => cb(NodeRef::Identifier(id)),
                TypePredicateParameterName::ThisType(_) => {}
            }
            visit_opt_type(n.type_node, cb);
        }
    }
}

/// Invoke `cb` on each direct child of `node`, in source order.
pub fn for_each_child<'a>(node: NodeRef<'a>, mut cb: impl FnMut(NodeRef<'a>)) {
    let cb = &mut cb;
    match node {
        NodeRef::SourceFile(n) => visit_list(n.statements, NodeRef::Statement, cb),
        NodeRef::Statement(n) => visit_statement(n, cb),
        NodeRef::Expression(n) => visit_expression(n, cb),
        NodeRef::TypeNode(n) => visit_type_node(n, cb),
        NodeRef::Identifier(_)
        | NodeRef::StringLiteral(_)
        | NodeRef::NumericLiteral(_)
        | NodeRef::TemplateLiteral(_)
        | NodeRef::Token(_) => {}
        NodeRef::QualifiedName(n) => {
            cb(n.left.as_node());
            cb(NodeRef::Identifier(&n.right));
        }
        NodeRef::ComputedPropertyName(n) => cb(NodeRef::Expression(n.expression)),
        NodeRef::ObjectBindingPattern(n) => visit_list(n.elements, NodeRef::BindingElement, cb),
        NodeRef::ArrayBindingPattern(n) => visit_list(n.elements, ArrayBindingElement::as_node, cb),
        NodeRef::BindingElement(n) => {
            visit_opt_token(&n.dot_dot_dot_token, cb);
            if let Some(property_name) = &n.property_name {
                cb(property_name.as_node());
            }
            cb(n.name.as_node());
            visit_opt_expr(n.initializer, cb);
        }
        NodeRef::Parameter(n) => {
            visit_opt_token(&n.dot_dot_dot_token, cb);
            cb(n.name.as_node());
            visit_opt_token(&n.question_token, cb);
            visit_opt_type(n.type_annotation, cb);
            visit_opt_expr(n.initializer, cb);
        }
        NodeRef::TypeParameter(n) => {
            cb(NodeRef::Identifier(&n.name));
            visit_opt_type(n.constraint, cb);
            visit_opt_type(n.default, cb);
        }
        NodeRef::Block(n) => visit_list(n.statements, NodeRef::Statement, cb),
        NodeRef::VariableDeclarationList(n) => visit_list(n.declarations, NodeRef::VariableDeclaration, cb),
        NodeRef::VariableDeclaration(n) => {
            cb(n.name.as_node());
            visit_opt_token(&n.exclamation_token, cb);
            visit_opt_type(n.type_annotation, cb);
            visit_opt_expr(n.initializer, cb);
        }
        NodeRef::ClassElement(element) => match element {
            ClassElement::PropertyDeclaration(n) => {
                cb(n.name.as_node());
                visit_opt_token(&n.question_token, cb);
                visit_opt_token(&n.exclamation_token, cb);
                visit_opt_type(n.type_annotation, cb);
                visit_opt_expr(n.initializer, cb);
            }
            ClassElement::MethodDeclaration(n) => visit_method(n, cb),
            ClassElement::Constructor(n) => {
                visit_list(n.parameters, NodeRef::Parameter, cb);
                if let Some(body) = &n.body {
                    cb(NodeRef::Block(body));
                }
            }
            ClassElement::GetAccessor(n) | ClassElement::SetAccessor(n) => visit_accessor(n, cb),
            ClassElement::IndexSignature(n) => {
                visit_list(n.parameters, NodeRef::Parameter, cb);
                visit_opt_type(n.type_annotation, cb);
            }
            ClassElement::SemicolonClassElement(_) => {}
            ClassElement::ClassStaticBlockDeclaration(n) => cb(NodeRef::Block(&n.body)),
        },
        NodeRef::TypeElement(element) => match element {
            TypeElement::PropertySignature(n) => {
                cb(n.name.as_node());
                visit_opt_token(&n.question_token, cb);
                visit_opt_type(n.type_annotation, cb);
            }
            TypeElement::MethodSignature(n) | TypeElement::CallSignature(n) | TypeElement::ConstructSignature(n) => {
                if let Some(name) = &n.name {
                    cb(name.as_node());
                }
                visit_opt_token(&n.question_token, cb);
                visit_signature(n.type_parameters, n.parameters, n.return_type, cb);
            }
            TypeElement::IndexSignature(n) => {
                visit_list(n.parameters, NodeRef::Parameter, cb);
                visit_opt_type(n.type_annotation, cb);
            }
        },
        NodeRef::ObjectLiteralElement(element) => match element {
            ObjectLiteralElement::PropertyAssignment(n) => {
                cb(n.name.as_node());
                cb(NodeRef::Expression(n.initializer));
            }
            ObjectLiteralElement::ShorthandPropertyAssignment(n) => {
                cb(NodeRef::Identifier(&n.name));
                visit_opt_expr(n.object_assignment_initializer, cb);
            }
            ObjectLiteralElement::SpreadAssignment(n) => cb(NodeRef::Expression(n.expression)),
            ObjectLiteralElement::MethodDeclaration(n) => visit_method(n, cb),
            ObjectLiteralElement::GetAccessor(n) | ObjectLiteralElement::SetAccessor(n) => visit_accessor(n, cb),
        },
        NodeRef::EnumMember(n) => {
            cb(n.name.as_node());
            visit_opt_expr(n.initializer, cb);
        }
        NodeRef::HeritageClause(n) => visit_list(n.types, NodeRef::ExpressionWithTypeArguments, cb),
        NodeRef::ExpressionWithTypeArguments(n) => {
            cb(NodeRef::Expression(n.expression));
            visit_types(n.type_arguments, cb);
        }
        NodeRef::CaseBlock(n) => visit_list(n.clauses, NodeRef::CaseClause, cb),
        NodeRef::CaseClause(n) => {
            visit_opt_expr(n.expression, cb);
            visit_list(n.statements, NodeRef::Statement, cb);
        }
        NodeRef::CatchClause(n) => {
            if let Some(decl) = &n.variable_declaration {
                cb(NodeRef::VariableDeclaration(decl));
            }
            cb(NodeRef::Block(&n.block));
        }
        NodeRef::ModuleDeclaration(n) => visit_module_declaration(n, cb),
        NodeRef::ModuleBlock(n) => visit_list(n.statements, NodeRef::Statement, cb),
        NodeRef::ImportClause(n) => {
            if let Some(name) = &n.name {
                cb(NodeRef::Identifier(name));
            }
            if let Some(bindings) = &n.named_bindings {
                cb(bindings.as_node());
            }
        }
        NodeRef::NamespaceImport(n) => cb(NodeRef::Identifier(&n.name)),
        NodeRef::NamedImports(n) => visit_named_imports(n, cb),
        NodeRef::ImportSpecifier(n) => {
            if let Some(property_name) = &n.property_name {
                cb(NodeRef::Identifier(property_name));
            }
            cb(NodeRef::Identifier(&n.name));
        }
        NodeRef::ExternalModuleReference(n) => cb(NodeRef::Expression(n.expression)),
        NodeRef::TemplateSpan(n) => {
            cb(NodeRef::Expression(n.expression));
            cb(NodeRef::TemplateLiteral(&n.literal));
        }
        NodeRef::TemplateLiteralTypeSpan(n) => {
            cb(NodeRef::TypeNode(n.type_node));
            cb(NodeRef::TemplateLiteral(&n.literal));
        }
        NodeRef::ImportAttributes(n) => visit_list(n.elements, NodeRef::ImportAttribute, cb),
        NodeRef::ImportAttribute(n) => {
            cb(n.name.as_node());
            cb(NodeRef::Expression(n.value));
        }
    }
}

/// Collect the direct children of `node`.
pub fn children<'a>(node: NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut out = Vec::new();
    for_each_child(node, |child| out.push(child));
    out
}
