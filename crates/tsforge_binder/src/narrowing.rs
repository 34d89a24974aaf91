//! Which expressions can narrow the type of a reference.
//!
//! The binder only creates condition, call and mutation flow nodes for
//! expressions a checker could learn something from.

use tsforge_ast::{Expression, SyntaxKind};
use tsforge_core::StringInterner;

/// `a`, `this`, `super`, `new.target`, `a.b.c`, `(a).b`.
pub fn is_dotted_name(expr: &Expression<'_>) -> bool {
    match expr {
        Expression::Identifier(_) | Expression::MetaProperty(_) => true,
        Expression::Keyword(token) => {
            matches!(token.kind(), SyntaxKind::ThisKeyword | SyntaxKind::SuperKeyword)
        }
        Expression::PropertyAccess(n) => is_dotted_name(n.expression),
        Expression::Parenthesized(n) => is_dotted_name(n.expression),
        _ => false,
    }
}

/// `a` or `a.b.c` with identifier names only.
pub fn is_entity_name_expression(expr: &Expression<'_>) -> bool {
    match expr {
        Expression::Identifier(_) => true,
        Expression::PropertyAccess(n) => {
            matches!(n.name, tsforge_ast::MemberName::Identifier(_)) && is_entity_name_expression(n.expression)
        }
        _ => false,
    }
}

fn is_string_or_numeric_literal_like(expr: &Expression<'_>) -> bool {
    matches!(
        expr,
        Expression::StringLiteral(_) | Expression::NumericLiteral(_) | Expression::NoSubstitutionTemplateLiteral(_)
    )
}

fn is_string_literal_like(expr: &Expression<'_>) -> bool {
    matches!(expr, Expression::StringLiteral(_) | Expression::NoSubstitutionTemplateLiteral(_))
}

fn is_boolean_literal(expr: &Expression<'_>) -> bool {
    expr.is_keyword(SyntaxKind::TrueKeyword) || expr.is_keyword(SyntaxKind::FalseKeyword)
}

/// A reference whose type a checker tracks through the flow graph.
pub fn is_narrowable_reference(expr: &Expression<'_>) -> bool {
    if is_dotted_name(expr) {
        return true;
    }
    match expr {
        Expression::PropertyAccess(n) => is_narrowable_reference(n.expression),
        Expression::NonNull(n) => is_narrowable_reference(n.expression),
        Expression::Parenthesized(n) => is_narrowable_reference(n.expression),
        Expression::ElementAccess(n) => {
            (is_string_or_numeric_literal_like(n.argument_expression)
                || is_entity_name_expression(n.argument_expression))
                && is_narrowable_reference(n.expression)
        }
        Expression::Binary(b) => match b.operator() {
            SyntaxKind::CommaToken => is_narrowable_reference(b.right),
            SyntaxKind::EqualsToken => is_narrowable_reference(b.left),
            _ => false,
        },
        _ => false,
    }
}

/// A narrowable reference, possibly behind optional chain links.
pub fn contains_narrowable_reference(expr: &Expression<'_>) -> bool {
    if is_narrowable_reference(expr) {
        return true;
    }
    expr.is_optional_chain() && expr.chain_expression().is_some_and(contains_narrowable_reference)
}

pub fn has_narrowable_argument(call: &tsforge_ast::CallExpression<'_>) -> bool {
    if call.arguments.iter().any(contains_narrowable_reference) {
        return true;
    }
    match call.expression {
        Expression::PropertyAccess(access) => contains_narrowable_reference(access.expression),
        _ => false,
    }
}

pub fn is_narrowable_operand(expr: &Expression<'_>) -> bool {
    match expr {
        Expression::Parenthesized(n) => is_narrowable_operand(n.expression),
        Expression::Binary(b) if b.operator() == SyntaxKind::EqualsToken => is_narrowable_operand(b.left),
        Expression::Binary(b) if b.operator() == SyntaxKind::CommaToken => is_narrowable_operand(b.right),
        _ => contains_narrowable_reference(expr),
    }
}

/// `typeof x === "string"` with the operands in the given order.
pub fn is_narrowing_typeof_operands(typeof_side: &Expression<'_>, literal_side: &Expression<'_>) -> bool {
    match typeof_side {
        Expression::TypeOf(t) => is_narrowable_operand(t.expression) && is_string_literal_like(literal_side),
        _ => false,
    }
}

pub fn is_narrowing_binary_expression(expr: &tsforge_ast::BinaryExpression<'_>) -> bool {
    match expr.operator() {
        SyntaxKind::EqualsToken
        | SyntaxKind::BarBarEqualsToken
        | SyntaxKind::AmpersandAmpersandEqualsToken
        | SyntaxKind::QuestionQuestionEqualsToken => contains_narrowable_reference(expr.left),
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => {
            is_narrowable_operand(expr.left)
                || is_narrowable_operand(expr.right)
                || is_narrowing_typeof_operands(expr.right, expr.left)
                || is_narrowing_typeof_operands(expr.left, expr.right)
                || (is_boolean_literal(expr.right) && is_narrowing_expression(expr.left))
                || (is_boolean_literal(expr.left) && is_narrowing_expression(expr.right))
        }
        SyntaxKind::InstanceOfKeyword => is_narrowable_operand(expr.left),
        SyntaxKind::InKeyword | SyntaxKind::CommaToken => is_narrowing_expression(expr.right),
        _ => false,
    }
}

/// Whether a condition on `expr` could narrow some reference.
pub fn is_narrowing_expression(expr: &Expression<'_>) -> bool {
    match expr {
        Expression::Identifier(_)
        | Expression::PrivateIdentifier(_)
        | Expression::PropertyAccess(_)
        | Expression::ElementAccess(_) => contains_narrowable_reference(expr),
        Expression::Keyword(token)
            if matches!(token.kind(), SyntaxKind::ThisKeyword | SyntaxKind::SuperKeyword) =>
        {
            contains_narrowable_reference(expr)
        }
        Expression::Call(call) => has_narrowable_argument(call),
        Expression::Parenthesized(n) => is_narrowing_expression(n.expression),
        Expression::NonNull(n) => is_narrowing_expression(n.expression),
        Expression::Binary(b) => is_narrowing_binary_expression(b),
        Expression::PrefixUnary(p) => {
            p.operator == SyntaxKind::ExclamationToken && is_narrowing_expression(p.operand)
        }
        Expression::TypeOf(t) => is_narrowing_expression(t.expression),
        _ => false,
    }
}

/// `&&`, `||` or `??`.
pub fn is_logical_or_coalescing_binary(expr: &Expression<'_>) -> bool {
    matches!(expr, Expression::Binary(b) if matches!(
        b.operator(),
        SyntaxKind::AmpersandAmpersandToken | SyntaxKind::BarBarToken | SyntaxKind::QuestionQuestionToken
    ))
}

/// `&&=`, `||=` or `??=`.
pub fn is_logical_or_coalescing_assignment(expr: &Expression<'_>) -> bool {
    matches!(expr, Expression::Binary(b) if b.operator().is_logical_or_coalescing_assignment())
}

/// A logical expression, looking through parentheses and `!`.
pub fn is_logical_expression(expr: &Expression<'_>) -> bool {
    let mut expr = expr;
    loop {
        expr = match expr {
            Expression::Parenthesized(n) => n.expression,
            Expression::PrefixUnary(p) if p.operator == SyntaxKind::ExclamationToken => p.operand,
            _ => return is_logical_or_coalescing_binary(expr),
        };
    }
}

/// `x.push` or `x.unshift` as a callee.
pub fn is_push_or_unshift(name: &tsforge_ast::Identifier, interner: &StringInterner) -> bool {
    matches!(interner.resolve(name.escaped_text), "push" | "unshift")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsforge_ast::NodeFactory;
    use tsforge_core::CompilerArena;

    #[test]
    fn test_dotted_names_are_narrowable() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let a_b = f.create_property_access(Expression::Identifier(f.create_identifier("a")), f.create_identifier("b"));
        assert!(is_narrowable_reference(&a_b));
        let call = f.create_call(Expression::Identifier(f.create_identifier("g")), None, vec![]);
        assert!(!is_narrowable_reference(&call));
        let indexed = f.create_element_access(call, f.create_true());
        assert!(!is_narrowable_reference(&indexed));
    }

    #[test]
    fn test_typeof_comparison_narrows() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let typeof_x = f.create_type_of(Expression::Identifier(f.create_identifier("x")));
        let literal = Expression::StringLiteral(f.create_string_literal("string", false));
        let cmp = f.create_binary(typeof_x, SyntaxKind::EqualsEqualsEqualsToken, literal);
        assert!(is_narrowing_expression(&cmp));
        let one = Expression::NumericLiteral(f.create_numeric_literal("1"));
        let two = Expression::NumericLiteral(f.create_numeric_literal("2"));
        let sum = f.create_binary(one, SyntaxKind::PlusToken, two);
        assert!(!is_narrowing_expression(&sum));
    }

    #[test]
    fn test_logical_expression_looks_through_not() {
        let arena = CompilerArena::new();
        let f = NodeFactory::new(&arena, StringInterner::new());
        f.begin_source_file();
        let and = f.create_binary(
            Expression::Identifier(f.create_identifier("a")),
            SyntaxKind::AmpersandAmpersandToken,
            Expression::Identifier(f.create_identifier("b")),
        );
        let not = f.create_prefix_unary(SyntaxKind::ExclamationToken, f.create_parenthesized(and));
        assert!(is_logical_expression(&not));
    }
}
