//! A uniform borrowed handle to any node.

use crate::generated::HasNodeData;
use crate::node::*;
use crate::syntax_kind::SyntaxKind;
use crate::types::{NodeId, SourceFileId};
use tsforge_core::text::TextRange;

/// A reference to a node of any kind.
///
/// The typed families (`Statement`, `Expression`, ...) are what the tree is
/// built from; `NodeRef` is what generic passes (parent links, transform
/// flags, comments, source maps) walk over.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    SourceFile(&'a SourceFile<'a>),
    Statement(&'a Statement<'a>),
    Expression(&'a Expression<'a>),
    TypeNode(&'a TypeNode<'a>),
    Identifier(&'a Identifier),
    StringLiteral(&'a StringLiteral<'a>),
    NumericLiteral(&'a NumericLiteral),
    TemplateLiteral(&'a TemplateLiteralLikeNode),
    Token(&'a Token),
    QualifiedName(&'a QualifiedName<'a>),
    ComputedPropertyName(&'a ComputedPropertyName<'a>),
    ObjectBindingPattern(&'a ObjectBindingPattern<'a>),
    ArrayBindingPattern(&'a ArrayBindingPattern<'a>),
    BindingElement(&'a BindingElement<'a>),
    Parameter(&'a ParameterDeclaration<'a>),
    TypeParameter(&'a TypeParameterDeclaration<'a>),
    Block(&'a Block<'a>),
    VariableDeclarationList(&'a VariableDeclarationList<'a>),
    VariableDeclaration(&'a VariableDeclaration<'a>),
    ClassElement(&'a ClassElement<'a>),
    TypeElement(&'a TypeElement<'a>),
    ObjectLiteralElement(&'a ObjectLiteralElement<'a>),
    EnumMember(&'a EnumMember<'a>),
    HeritageClause(&'a HeritageClause<'a>),
    ExpressionWithTypeArguments(&'a ExpressionWithTypeArguments<'a>),
    CaseBlock(&'a CaseBlock<'a>),
    CaseClause(&'a CaseOrDefaultClause<'a>),
    CatchClause(&'a CatchClause<'a>),
    /// The inner declaration of `namespace a.b {}`.
    ModuleDeclaration(&'a ModuleDeclaration<'a>),
    ModuleBlock(&'a ModuleBlock<'a>),
    ImportClause(&'a ImportClause<'a>),
    /// `* as ns` in an import or an export.
    NamespaceImport(&'a NamespaceImport),
    /// `{ a, b as c }` in an import or an export.
    NamedImports(&'a NamedImports<'a>),
    ImportSpecifier(&'a ImportOrExportSpecifier),
    ExternalModuleReference(&'a ExternalModuleReference<'a>),
    TemplateSpan(&'a TemplateSpan<'a>),
    TemplateLiteralTypeSpan(&'a TemplateLiteralTypeSpan<'a>),
    ImportAttributes(&'a ImportAttributes<'a>),
    ImportAttribute(&'a ImportAttribute<'a>),
}

impl<'a> NodeRef<'a> {
    pub fn data(&self) -> &'a NodeData {
        match *self {
            NodeRef::SourceFile(n) => &n.data,
            NodeRef::Statement(n) => n.data(),
            NodeRef::Expression(n) => n.data(),
            NodeRef::TypeNode(n) => n.data(),
            NodeRef::Identifier(n) => &n.data,
            NodeRef::StringLiteral(n) => &n.data,
            NodeRef::NumericLiteral(n) => &n.data,
            NodeRef::TemplateLiteral(n) => &n.data,
            NodeRef::Token(n) => &n.data,
            NodeRef::QualifiedName(n) => &n.data,
            NodeRef::ComputedPropertyName(n) => &n.data,
            NodeRef::ObjectBindingPattern(n) => &n.data,
            NodeRef::ArrayBindingPattern(n) => &n.data,
            NodeRef::BindingElement(n) => &n.data,
            NodeRef::Parameter(n) => &n.data,
            NodeRef::TypeParameter(n) => &n.data,
            NodeRef::Block(n) => &n.data,
            NodeRef::VariableDeclarationList(n) => &n.data,
            NodeRef::VariableDeclaration(n) => &n.data,
            NodeRef::ClassElement(n) => n.data(),
            NodeRef::TypeElement(n) => n.data(),
            NodeRef::ObjectLiteralElement(n) => n.data(),
            NodeRef::EnumMember(n) => &n.data,
            NodeRef::HeritageClause(n) => &n.data,
            NodeRef::ExpressionWithTypeArguments(n) => &n.data,
            NodeRef::CaseBlock(n) => &n.data,
            NodeRef::CaseClause(n) => &n.data,
            NodeRef::CatchClause(n) => &n.data,
            NodeRef::ModuleDeclaration(n) => &n.data,
            NodeRef::ModuleBlock(n) => &n.data,
            NodeRef::ImportClause(n) => &n.data,
            NodeRef::NamespaceImport(n) => &n.data,
            NodeRef::NamedImports(n) => &n.data,
            NodeRef::ImportSpecifier(n) => &n.data,
            NodeRef::ExternalModuleReference(n) => &n.data,
            NodeRef::TemplateSpan(n) => &n.data,
            NodeRef::TemplateLiteralTypeSpan(n) => &n.data,
            NodeRef::ImportAttributes(n) => &n.data,
            NodeRef::ImportAttribute(n) => &n.data,
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.data().id
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        self.data().range
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.data().range.pos
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.data().range.end
    }

    #[inline]
    pub fn file(&self) -> SourceFileId {
        self.data().file
    }

    /// The identifier, whether it sits in an expression or a name position.
    pub fn as_identifier(&self) -> Option<&'a Identifier> {
        match *self {
            NodeRef::Identifier(id) => Some(id),
            NodeRef::Expression(Expression::Identifier(id)) => Some(id),
            _ => None,
        }
    }

    pub fn as_statement(&self) -> Option<&'a Statement<'a>> {
        match *self {
            NodeRef::Statement(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_expression(&self) -> Option<&'a Expression<'a>> {
        match *self {
            NodeRef::Expression(e) => Some(e),
            _ => None,
        }
    }

    /// Whether two handles denote the same node.
    #[inline]
    pub fn same_node(&self, other: &NodeRef<'_>) -> bool {
        let (a, b) = (self.data(), other.data());
        std::ptr::eq(a, b) || (a.id == b.id && a.id != NodeId::INVALID)
    }

    /// Whether the node is a function-like declaration or expression with a body.
    pub fn is_function_like(&self) -> bool {
        match *self {
            NodeRef::Statement(Statement::FunctionDeclaration(_)) => true,
            NodeRef::Expression(e) => e.is_function_like(),
            NodeRef::ClassElement(
                ClassElement::MethodDeclaration(_)
                | ClassElement::Constructor(_)
                | ClassElement::GetAccessor(_)
                | ClassElement::SetAccessor(_),
            ) => true,
            NodeRef::ObjectLiteralElement(
                ObjectLiteralElement::MethodDeclaration(_)
                | ObjectLiteralElement::GetAccessor(_)
                | ObjectLiteralElement::SetAccessor(_),
            ) => true,
            _ => false,
        }
    }

    pub fn is_class_like(&self) -> bool {
        matches!(
            self,
            NodeRef::Statement(Statement::ClassDeclaration(_)) | NodeRef::Expression(Expression::ClassExpression(_))
        )
    }
}
