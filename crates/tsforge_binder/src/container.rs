//! What kind of scope each node opens.

use bitflags::bitflags;
use tsforge_ast::{ClassElement, Expression, NodeRef, ObjectLiteralElement, Statement, TypeElement, TypeNode};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ContainerFlags: u16 {
        const NONE = 0;
        /// Declarations inside go into this node's symbol or locals.
        const IS_CONTAINER = 1 << 0;
        /// `let`, `const` and classes inside are scoped to this node.
        const IS_BLOCK_SCOPED_CONTAINER = 1 << 1;
        /// The node starts a fresh control flow graph.
        const IS_CONTROL_FLOW_CONTAINER = 1 << 2;
        const IS_FUNCTION_LIKE = 1 << 3;
        const IS_FUNCTION_EXPRESSION = 1 << 4;
        const HAS_LOCALS = 1 << 5;
        const IS_INTERFACE = 1 << 6;
        const IS_OBJECT_LITERAL_OR_CLASS_EXPRESSION_METHOD_OR_ACCESSOR = 1 << 7;
        /// `this` inside refers to this node.
        const IS_THIS_CONTAINER = 1 << 8;
    }
}

const FUNCTION_CONTAINER: ContainerFlags = ContainerFlags::IS_CONTAINER
    .union(ContainerFlags::IS_CONTROL_FLOW_CONTAINER)
    .union(ContainerFlags::HAS_LOCALS)
    .union(ContainerFlags::IS_FUNCTION_LIKE);

const BLOCK_CONTAINER: ContainerFlags = ContainerFlags::IS_BLOCK_SCOPED_CONTAINER.union(ContainerFlags::HAS_LOCALS);

/// Container flags of `node`; `parent` decides the case of blocks and of
/// methods in class expressions.
pub fn container_flags(node: NodeRef<'_>, parent: Option<NodeRef<'_>>) -> ContainerFlags {
    match node {
        NodeRef::SourceFile(_) => {
            ContainerFlags::IS_CONTAINER | ContainerFlags::IS_CONTROL_FLOW_CONTAINER | ContainerFlags::HAS_LOCALS
        }
        NodeRef::Statement(stmt) => match stmt {
            Statement::ClassDeclaration(_) | Statement::EnumDeclaration(_) => ContainerFlags::IS_CONTAINER,
            Statement::InterfaceDeclaration(_) => ContainerFlags::IS_CONTAINER | ContainerFlags::IS_INTERFACE,
            Statement::ModuleDeclaration(_) | Statement::TypeAliasDeclaration(_) => {
                ContainerFlags::IS_CONTAINER | ContainerFlags::HAS_LOCALS
            }
            Statement::FunctionDeclaration(_) => FUNCTION_CONTAINER | ContainerFlags::IS_THIS_CONTAINER,
            Statement::ForStatement(_) | Statement::ForInStatement(_) | Statement::ForOfStatement(_) => BLOCK_CONTAINER,
            Statement::Block(_) => block_flags(parent),
            _ => ContainerFlags::NONE,
        },
        NodeRef::ModuleDeclaration(_) => ContainerFlags::IS_CONTAINER | ContainerFlags::HAS_LOCALS,
        NodeRef::Expression(expr) => match expr {
            Expression::ClassExpression(_) | Expression::ObjectLiteral(_) => ContainerFlags::IS_CONTAINER,
            Expression::FunctionExpression(_) => {
                FUNCTION_CONTAINER | ContainerFlags::IS_FUNCTION_EXPRESSION | ContainerFlags::IS_THIS_CONTAINER
            }
            Expression::ArrowFunction(_) => FUNCTION_CONTAINER | ContainerFlags::IS_FUNCTION_EXPRESSION,
            _ => ContainerFlags::NONE,
        },
        NodeRef::TypeNode(ty) => match ty {
            TypeNode::TypeLiteral(_) => ContainerFlags::IS_CONTAINER,
            TypeNode::MappedType(_) => ContainerFlags::IS_CONTAINER | ContainerFlags::HAS_LOCALS,
            TypeNode::FunctionType(_) | TypeNode::ConstructorType(_) => {
                FUNCTION_CONTAINER | ContainerFlags::IS_THIS_CONTAINER
            }
            _ => ContainerFlags::NONE,
        },
        NodeRef::TypeElement(element) => match element {
            TypeElement::MethodSignature(_) | TypeElement::CallSignature(_) | TypeElement::ConstructSignature(_) => {
                FUNCTION_CONTAINER | ContainerFlags::IS_THIS_CONTAINER
            }
            TypeElement::IndexSignature(_) => ContainerFlags::IS_CONTAINER | ContainerFlags::HAS_LOCALS,
            TypeElement::PropertySignature(_) => ContainerFlags::NONE,
        },
        NodeRef::ClassElement(element) => match element {
            ClassElement::MethodDeclaration(_) | ClassElement::GetAccessor(_) | ClassElement::SetAccessor(_) => {
                let in_class_expression =
                    matches!(parent, Some(NodeRef::Expression(Expression::ClassExpression(_))));
                let flags = FUNCTION_CONTAINER | ContainerFlags::IS_THIS_CONTAINER;
                if in_class_expression {
                    flags | ContainerFlags::IS_OBJECT_LITERAL_OR_CLASS_EXPRESSION_METHOD_OR_ACCESSOR
                } else {
                    flags
                }
            }
            ClassElement::Constructor(_) | ClassElement::ClassStaticBlockDeclaration(_) => {
                FUNCTION_CONTAINER | ContainerFlags::IS_THIS_CONTAINER
            }
            ClassElement::IndexSignature(_) => ContainerFlags::IS_CONTAINER | ContainerFlags::HAS_LOCALS,
            ClassElement::PropertyDeclaration(p) if p.initializer.is_some() => {
                ContainerFlags::IS_CONTROL_FLOW_CONTAINER | ContainerFlags::IS_THIS_CONTAINER
            }
            ClassElement::PropertyDeclaration(_) | ClassElement::SemicolonClassElement(_) => ContainerFlags::NONE,
        },
        NodeRef::ObjectLiteralElement(element) => match element {
            ObjectLiteralElement::MethodDeclaration(_)
            | ObjectLiteralElement::GetAccessor(_)
            | ObjectLiteralElement::SetAccessor(_) => {
                FUNCTION_CONTAINER
                    | ContainerFlags::IS_THIS_CONTAINER
                    | ContainerFlags::IS_OBJECT_LITERAL_OR_CLASS_EXPRESSION_METHOD_OR_ACCESSOR
            }
            _ => ContainerFlags::NONE,
        },
        NodeRef::ModuleBlock(_) => ContainerFlags::IS_CONTROL_FLOW_CONTAINER,
        NodeRef::CatchClause(_) | NodeRef::CaseBlock(_) => BLOCK_CONTAINER,
        NodeRef::Block(_) => block_flags(parent),
        _ => ContainerFlags::NONE,
    }
}

/// Function bodies share the function's scope; other blocks open their own.
fn block_flags(parent: Option<NodeRef<'_>>) -> ContainerFlags {
    match parent {
        Some(p) if p.is_function_like() => ContainerFlags::NONE,
        Some(NodeRef::ClassElement(ClassElement::ClassStaticBlockDeclaration(_))) => ContainerFlags::NONE,
        _ => BLOCK_CONTAINER,
    }
}
