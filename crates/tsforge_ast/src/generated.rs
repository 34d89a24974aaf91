//! Per-family accessors for node data.
//!
//! Every node struct and family enum hands out its common [`NodeData`]
//! through [`HasNodeData`] and can be converted into a [`NodeRef`] for
//! generic traversal.

use crate::node::*;
use crate::node_ref::NodeRef;
use crate::syntax_kind::SyntaxKind;
use crate::types::{EmitFlags, ModifierFlags, NodeFlags, NodeId};

/// Access to the [`NodeData`] every node carries.
pub trait HasNodeData {
    fn data(&self) -> &NodeData;
    /// `None` for family variants that hold an already allocated node by
    /// shared reference; their data is fixed once allocated.
    fn data_mut(&mut self) -> Option<&mut NodeData>;

    #[inline]
    fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    #[inline]
    fn node_id(&self) -> NodeId {
        self.data().id
    }

    /// Give the node a source range.
    fn at(mut self, pos: u32, end: u32) -> Self
    where
        Self: Sized,
    {
        if let Some(data) = self.data_mut() {
            data.range = tsforge_core::text::TextRange::new(pos, end);
        }
        self
    }

    fn with_flags(mut self, flags: NodeFlags) -> Self
    where
        Self: Sized,
    {
        if let Some(data) = self.data_mut() {
            data.flags |= flags;
        }
        self
    }

    fn with_modifiers(mut self, modifiers: ModifierFlags) -> Self
    where
        Self: Sized,
    {
        if let Some(data) = self.data_mut() {
            data.modifier_flags |= modifiers;
        }
        self
    }

    fn with_emit_flags(mut self, emit_flags: EmitFlags) -> Self
    where
        Self: Sized,
    {
        if let Some(data) = self.data_mut() {
            data.emit_flags |= emit_flags;
        }
        self
    }
}

macro_rules! impl_has_node_data {
    ($($ty:ty),* $(,)?) => {
        $(
            impl HasNodeData for $ty {
                #[inline]
                fn data(&self) -> &NodeData {
                    &self.data
                }

                #[inline]
                fn data_mut(&mut self) -> Option<&mut NodeData> {
                    Some(&mut self.data)
                }
            }
        )*
    };
}

/// Every variant of a family wraps a struct with a `data` field. Variants
/// listed under `shared` hold that struct by `&'a` reference.
macro_rules! impl_family_node_data {
    ($family:ident { $($variant:ident),* $(,)? }) => {
        impl_family_node_data!($family { $($variant),* } shared {});
    };
    ($family:ident { $($variant:ident),* $(,)? } shared { $($shared:ident),* $(,)? }) => {
        impl HasNodeData for $family<'_> {
            fn data(&self) -> &NodeData {
                match self {
                    $($family::$variant(n) => &n.data,)*
                    $($family::$shared(n) => &n.data,)*
                }
            }

            fn data_mut(&mut self) -> Option<&mut NodeData> {
                match self {
                    $($family::$variant(n) => Some(&mut n.data),)*
                    $($family::$shared(_) => None,)*
                }
            }
        }
    };
}

impl_has_node_data!(
    Token,
    Identifier,
    NumericLiteral,
    LiteralNode,
    TemplateLiteralLikeNode,
    KeywordTypeNode,
    MetaPropertyExpression,
    BreakOrContinueStatement,
    NamespaceImport,
    ImportOrExportSpecifier,
    NamespaceExportDeclaration,
    SourceFile<'_>,
    StringLiteral<'_>,
    TypeReferenceNode<'_>,
    FunctionTypeNode<'_>,
    TypeQueryNode<'_>,
    TypeLiteralNode<'_>,
    ArrayTypeNode<'_>,
    TupleTypeNode<'_>,
    WrappedTypeNode<'_>,
    UnionOrIntersectionTypeNode<'_>,
    ConditionalTypeNode<'_>,
    InferTypeNode<'_>,
    TypeOperatorNode<'_>,
    IndexedAccessTypeNode<'_>,
    MappedTypeNode<'_>,
    LiteralTypeNode<'_>,
    NamedTupleMemberNode<'_>,
    TemplateLiteralTypeNode<'_>,
    TemplateLiteralTypeSpan<'_>,
    ImportTypeNode<'_>,
    TypePredicateNode<'_>,
    ExpressionWithTypeArguments<'_>,
    TypeParameterDeclaration<'_>,
    ParameterDeclaration<'_>,
    QualifiedName<'_>,
    ComputedPropertyName<'_>,
    ObjectBindingPattern<'_>,
    ArrayBindingPattern<'_>,
    BindingElement<'_>,
    PropertySignature<'_>,
    SignatureDeclaration<'_>,
    IndexSignatureDeclaration<'_>,
    TemplateExpression<'_>,
    TemplateSpan<'_>,
    ArrayLiteralExpression<'_>,
    ObjectLiteralExpression<'_>,
    PropertyAssignment<'_>,
    ShorthandPropertyAssignment<'_>,
    SpreadAssignment<'_>,
    PropertyAccessExpression<'_>,
    ElementAccessExpression<'_>,
    CallExpression<'_>,
    NewExpression<'_>,
    TaggedTemplateExpression<'_>,
    TypeAssertionExpression<'_>,
    ParenthesizedExpression<'_>,
    FunctionExpression<'_>,
    ArrowFunction<'_>,
    UnaryKeywordExpression<'_>,
    PrefixUnaryExpression<'_>,
    PostfixUnaryExpression<'_>,
    BinaryExpression<'_>,
    ConditionalExpression<'_>,
    YieldExpression<'_>,
    SpreadElement<'_>,
    AsExpression<'_>,
    NonNullExpression<'_>,
    PartiallyEmittedExpression<'_>,
    Block<'_>,
    VariableStatement<'_>,
    VariableDeclarationList<'_>,
    VariableDeclaration<'_>,
    ExpressionStatement<'_>,
    IfStatement<'_>,
    DoStatement<'_>,
    WhileStatement<'_>,
    ForStatement<'_>,
    ForInOrOfStatement<'_>,
    ReturnStatement<'_>,
    WithStatement<'_>,
    SwitchStatement<'_>,
    CaseBlock<'_>,
    CaseOrDefaultClause<'_>,
    LabeledStatement<'_>,
    ThrowStatement<'_>,
    TryStatement<'_>,
    CatchClause<'_>,
    FunctionDeclaration<'_>,
    ClassLikeDeclaration<'_>,
    HeritageClause<'_>,
    PropertyDeclaration<'_>,
    MethodDeclaration<'_>,
    ConstructorDeclaration<'_>,
    AccessorDeclaration<'_>,
    ClassStaticBlockDeclaration<'_>,
    InterfaceDeclaration<'_>,
    TypeAliasDeclaration<'_>,
    EnumDeclaration<'_>,
    EnumMember<'_>,
    ModuleDeclaration<'_>,
    ModuleBlock<'_>,
    ImportDeclaration<'_>,
    ImportClause<'_>,
    NamedImports<'_>,
    ExportDeclaration<'_>,
    ExportAssignment<'_>,
    ImportEqualsDeclaration<'_>,
    ExternalModuleReference<'_>,
    ImportAttributes<'_>,
    ImportAttribute<'_>,
);

impl_family_node_data!(Statement {
    VariableStatement,
    FunctionDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    TypeAliasDeclaration,
    EnumDeclaration,
    ModuleDeclaration,
    ImportDeclaration,
    ImportEqualsDeclaration,
    ExportDeclaration,
    ExportAssignment,
    NamespaceExportDeclaration,
    Block,
    EmptyStatement,
    ExpressionStatement,
    IfStatement,
    DoStatement,
    WhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    ContinueStatement,
    BreakStatement,
    ReturnStatement,
    WithStatement,
    SwitchStatement,
    LabeledStatement,
    ThrowStatement,
    TryStatement,
    DebuggerStatement,
    NotEmittedStatement,
});

impl_family_node_data!(Expression {
    Identifier,
    PrivateIdentifier,
    StringLiteral,
    NumericLiteral,
    BigIntLiteral,
    RegularExpressionLiteral,
    NoSubstitutionTemplateLiteral,
    TemplateExpression,
    ArrayLiteral,
    ObjectLiteral,
    PropertyAccess,
    ElementAccess,
    Call,
    New,
    TaggedTemplate,
    TypeAssertion,
    Parenthesized,
    FunctionExpression,
    ArrowFunction,
    Delete,
    TypeOf,
    Void,
    Await,
    PrefixUnary,
    PostfixUnary,
    Binary,
    Conditional,
    Yield,
    Spread,
    ClassExpression,
    Omitted,
    As,
    Satisfies,
    NonNull,
    MetaProperty,
    PartiallyEmitted,
    Keyword,
});

impl_family_node_data!(TypeNode {
    KeywordType,
    TypeReference,
    FunctionType,
    ConstructorType,
    TypeQuery,
    TypeLiteral,
    ArrayType,
    TupleType,
    OptionalType,
    RestType,
    UnionType,
    IntersectionType,
    ConditionalType,
    InferType,
    ParenthesizedType,
    ThisType,
    TypeOperator,
    IndexedAccessType,
    MappedType,
    LiteralType,
    NamedTupleMember,
    TemplateLiteralType,
    ImportType,
    TypePredicate,
});

impl_family_node_data!(ClassElement {
    PropertyDeclaration,
    MethodDeclaration,
    Constructor,
    GetAccessor,
    SetAccessor,
    IndexSignature,
    SemicolonClassElement,
    ClassStaticBlockDeclaration,
});

impl_family_node_data!(TypeElement {
    PropertySignature,
    MethodSignature,
    CallSignature,
    ConstructSignature,
    IndexSignature,
});

impl_family_node_data!(ObjectLiteralElement {
    PropertyAssignment,
    ShorthandPropertyAssignment,
    SpreadAssignment,
    MethodDeclaration,
    GetAccessor,
    SetAccessor,
});

impl_family_node_data!(PropertyName {
    Identifier,
    StringLiteral,
    NumericLiteral,
    PrivateIdentifier,
} shared {
    Computed,
});

impl_family_node_data!(BindingName { Identifier } shared { ObjectBindingPattern, ArrayBindingPattern });

impl_family_node_data!(EntityName { Identifier } shared { QualifiedName });

impl_family_node_data!(ModuleName { Identifier, StringLiteral });

impl_family_node_data!(ArrayBindingElement { BindingElement, Omitted });

impl HasNodeData for TypePredicateParameterName {
    fn data(&self) -> &NodeData {
        match self {
            TypePredicateParameterName::Identifier(n) => &n.data,
            TypePredicateParameterName::ThisType(n) => &n.data,
        }
    }

    fn data_mut(&mut self) -> Option<&mut NodeData> {
        match self {
            TypePredicateParameterName::Identifier(n) => Some(&mut n.data),
            TypePredicateParameterName::ThisType(n) => Some(&mut n.data),
        }
    }
}

impl<'a> Statement<'a> {
    #[inline]
    pub fn as_node(&'a self) -> NodeRef<'a> {
        NodeRef::Statement(self)
    }

    /// `"use strict";` and other string-literal expression statements.
    pub fn as_prologue_directive(&self) -> Option<&StringLiteral<'a>> {
        match self {
            Statement::ExpressionStatement(stmt) => match stmt.expression {
                Expression::StringLiteral(lit) => Some(lit),
                _ => None,
            },
            _ => None,
        }
    }
}

impl<'a> Expression<'a> {
    #[inline]
    pub fn as_node(&'a self) -> NodeRef<'a> {
        NodeRef::Expression(self)
    }

    #[inline]
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Expression::Identifier(id) => Some(id),
            _ => None,
        }
    }

    /// Strip parentheses, type assertions and non-null assertions.
    pub fn skip_outer_expressions(&self) -> &Expression<'a> {
        let mut expr = self;
        loop {
            expr = match expr {
                Expression::Parenthesized(n) => n.expression,
                Expression::TypeAssertion(n) => n.expression,
                Expression::As(n) | Expression::Satisfies(n) => n.expression,
                Expression::NonNull(n) => n.expression,
                Expression::PartiallyEmitted(n) => n.expression,
                _ => return expr,
            };
        }
    }

    pub fn skip_parentheses(&self) -> &Expression<'a> {
        let mut expr = self;
        while let Expression::Parenthesized(n) = expr {
            expr = n.expression;
        }
        expr
    }

    /// Whether this is a link of an optional chain (`a?.b`, `a?.b.c`, ...).
    #[inline]
    pub fn is_optional_chain(&self) -> bool {
        matches!(
            self,
            Expression::PropertyAccess(_) | Expression::ElementAccess(_) | Expression::Call(_) | Expression::NonNull(_)
        ) && self.data().flags.contains(crate::types::NodeFlags::OPTIONAL_CHAIN)
    }

    /// The `?.` token of an optional chain link, if it has one.
    pub fn question_dot_token(&self) -> Option<&Token> {
        match self {
            Expression::PropertyAccess(n) => n.question_dot_token.as_ref(),
            Expression::ElementAccess(n) => n.question_dot_token.as_ref(),
            Expression::Call(n) => n.question_dot_token.as_ref(),
            _ => None,
        }
    }

    /// `expression` of a property access, element access, call or non-null link.
    pub fn chain_expression(&self) -> Option<&Expression<'a>> {
        match self {
            Expression::PropertyAccess(n) => Some(n.expression),
            Expression::ElementAccess(n) => Some(n.expression),
            Expression::Call(n) => Some(n.expression),
            Expression::NonNull(n) => Some(n.expression),
            _ => None,
        }
    }

    #[inline]
    pub fn is_keyword(&self, kind: SyntaxKind) -> bool {
        matches!(self, Expression::Keyword(t) if t.data.kind == kind)
    }

    pub fn is_function_like(&self) -> bool {
        matches!(self, Expression::FunctionExpression(_) | Expression::ArrowFunction(_))
    }
}

impl<'a> TypeNode<'a> {
    #[inline]
    pub fn as_node(&'a self) -> NodeRef<'a> {
        NodeRef::TypeNode(self)
    }
}

impl<'a> ClassElement<'a> {
    #[inline]
    pub fn as_node(&'a self) -> NodeRef<'a> {
        NodeRef::ClassElement(self)
    }

    pub fn name(&self) -> Option<&PropertyName<'a>> {
        match self {
            ClassElement::PropertyDeclaration(n) => Some(&n.name),
            ClassElement::MethodDeclaration(n) => Some(&n.name),
            ClassElement::GetAccessor(n) | ClassElement::SetAccessor(n) => Some(&n.name),
            _ => None,
        }
    }
}

impl<'a> TypeElement<'a> {
    #[inline]
    pub fn as_node(&'a self) -> NodeRef<'a> {
        NodeRef::TypeElement(self)
    }
}

impl<'a> ObjectLiteralElement<'a> {
    #[inline]
    pub fn as_node(&'a self) -> NodeRef<'a> {
        NodeRef::ObjectLiteralElement(self)
    }
}

impl<'a> PropertyName<'a> {
    pub fn as_node(&'a self) -> NodeRef<'a> {
        match self {
            PropertyName::Identifier(n) | PropertyName::PrivateIdentifier(n) => NodeRef::Identifier(n),
            PropertyName::StringLiteral(n) => NodeRef::StringLiteral(n),
            PropertyName::NumericLiteral(n) => NodeRef::NumericLiteral(n),
            PropertyName::Computed(n) => NodeRef::ComputedPropertyName(n),
        }
    }
}

impl<'a> BindingName<'a> {
    pub fn as_node(&'a self) -> NodeRef<'a> {
        match self {
            BindingName::Identifier(n) => NodeRef::Identifier(n),
            BindingName::ObjectBindingPattern(n) => NodeRef::ObjectBindingPattern(n),
            BindingName::ArrayBindingPattern(n) => NodeRef::ArrayBindingPattern(n),
        }
    }

    #[inline]
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            BindingName::Identifier(id) => Some(id),
            _ => None,
        }
    }

    #[inline]
    pub fn is_binding_pattern(&self) -> bool {
        !matches!(self, BindingName::Identifier(_))
    }
}

impl<'a> EntityName<'a> {
    pub fn as_node(&'a self) -> NodeRef<'a> {
        match self {
            EntityName::Identifier(n) => NodeRef::Identifier(n),
            EntityName::QualifiedName(n) => NodeRef::QualifiedName(n),
        }
    }

    /// The leftmost identifier of `a.b.c`.
    pub fn first_identifier(&self) -> &Identifier {
        match self {
            EntityName::Identifier(id) => id,
            EntityName::QualifiedName(q) => q.left.first_identifier(),
        }
    }
}

impl<'a> ModuleName<'a> {
    pub fn as_node(&'a self) -> NodeRef<'a> {
        match self {
            ModuleName::Identifier(n) => NodeRef::Identifier(n),
            ModuleName::StringLiteral(n) => NodeRef::StringLiteral(n),
        }
    }
}

impl<'a> ModuleBody<'a> {
    pub fn as_node(&'a self) -> NodeRef<'a> {
        match self {
            ModuleBody::ModuleBlock(n) => NodeRef::ModuleBlock(n),
            ModuleBody::ModuleDeclaration(n) => NodeRef::ModuleDeclaration(n),
        }
    }
}

impl<'a> ArrayBindingElement<'a> {
    pub fn as_node(&'a self) -> NodeRef<'a> {
        match self {
            ArrayBindingElement::BindingElement(n) => NodeRef::BindingElement(n),
            ArrayBindingElement::Omitted(t) => NodeRef::Token(t),
        }
    }
}

impl<'a> ImportAttributeName<'a> {
    pub fn as_node(&'a self) -> NodeRef<'a> {
        match self {
            ImportAttributeName::Identifier(n) => NodeRef::Identifier(n),
            ImportAttributeName::StringLiteral(n) => NodeRef::StringLiteral(n),
        }
    }
}

impl<'a> ForInitializer<'a> {
    pub fn as_node(&'a self) -> NodeRef<'a> {
        match self {
            ForInitializer::VariableDeclarationList(n) => NodeRef::VariableDeclarationList(n),
            ForInitializer::Expression(n) => NodeRef::Expression(n),
        }
    }
}

impl<'a> ArrowFunctionBody<'a> {
    pub fn as_node(&'a self) -> NodeRef<'a> {
        match self {
            ArrowFunctionBody::Block(n) => NodeRef::Block(n),
            ArrowFunctionBody::Expression(n) => NodeRef::Expression(n),
        }
    }
}

impl<'a> ModuleReference<'a> {
    pub fn as_node(&'a self) -> NodeRef<'a> {
        match self {
            ModuleReference::ExternalModuleReference(n) => NodeRef::ExternalModuleReference(n),
            ModuleReference::EntityName(n) => n.as_node(),
        }
    }
}

impl<'a> NamedImportBindings<'a> {
    pub fn as_node(&'a self) -> NodeRef<'a> {
        match self {
            NamedImportBindings::NamespaceImport(n) => NodeRef::NamespaceImport(n),
            NamedImportBindings::NamedImports(n) => NodeRef::NamedImports(n),
        }
    }
}

impl<'a> NamedExportBindings<'a> {
    pub fn as_node(&'a self) -> NodeRef<'a> {
        match self {
            NamedExportBindings::NamespaceExport(n) => NodeRef::NamespaceImport(n),
            NamedExportBindings::NamedExports(n) => NodeRef::NamedImports(n),
        }
    }
}
