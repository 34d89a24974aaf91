//! Typed syntax tree.
//!
//! Nodes are allocated in a [`CompilerArena`](tsforge_core::CompilerArena)
//! and reference their children through `&'a` borrows and arena slices.
//! The tree itself is never mutated after construction: binder results live
//! in side tables keyed by [`NodeId`].

use crate::syntax_kind::SyntaxKind;
use crate::types::*;
use tsforge_core::intern::InternedString;
use tsforge_core::text::{LineMap, TextRange};

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all nodes.
#[derive(Debug, Clone, Copy)]
pub struct NodeData {
    pub kind: SyntaxKind,
    /// Source range, or [`TextRange::SYNTHESIZED`] for nodes with no position.
    pub range: TextRange,
    pub flags: NodeFlags,
    pub modifier_flags: ModifierFlags,
    pub id: NodeId,
    /// The file this node was created for.
    pub file: SourceFileId,
    pub emit_flags: EmitFlags,
}

impl NodeData {
    pub fn new(kind: SyntaxKind, pos: u32, end: u32) -> Self {
        Self {
            kind,
            range: TextRange::new(pos, end),
            flags: NodeFlags::NONE,
            modifier_flags: ModifierFlags::NONE,
            id: NodeId::INVALID,
            file: SourceFileId::SYNTHESIZED,
            emit_flags: EmitFlags::NONE,
        }
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.range.pos
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.range.end
    }

    #[inline]
    pub fn is_synthesized(&self) -> bool {
        self.range.is_synthesized()
    }

    #[inline]
    pub fn has_modifier(&self, flags: ModifierFlags) -> bool {
        self.modifier_flags.intersects(flags)
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

/// An optional arena-allocated node.
pub type OptionalNode<'a, T> = Option<&'a T>;

// ============================================================================
// Source File, Bundle and Prepends
// ============================================================================

#[derive(Debug)]
pub struct SourceFile<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
    pub file_name: String,
    pub text: String,
    pub script_kind: ScriptKind,
    pub is_declaration_file: bool,
    pub has_no_default_lib: bool,
    pub referenced_files: Vec<FileReference>,
    pub type_reference_directives: Vec<FileReference>,
    pub lib_reference_directives: Vec<FileReference>,
    /// Whether the file has a top-level import or export.
    pub external_module_indicator: bool,
    /// Every identifier text that occurs in the file.
    pub identifiers: tsforge_core::collections::FxHashSet<InternedString>,
    pub line_map: LineMap,
    /// Helpers requested by the transforms that produced this tree.
    pub emit_helpers: Vec<&'static EmitHelper>,
}

impl<'a> SourceFile<'a> {
    #[inline]
    pub fn is_external_module(&self) -> bool {
        self.external_module_indicator
    }

    #[inline]
    pub fn is_js_file(&self) -> bool {
        matches!(self.script_kind, ScriptKind::JS | ScriptKind::JSX)
    }

    #[inline]
    pub fn is_json_file(&self) -> bool {
        self.script_kind == ScriptKind::JSON
    }

    #[inline]
    pub fn id(&self) -> SourceFileId {
        self.data.file
    }
}

/// A `/// <reference .../>` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    pub pos: u32,
    pub end: u32,
    pub file_name: String,
}

/// The kind of script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    Unknown,
    JS,
    JSX,
    TS,
    TSX,
    External,
    JSON,
}

/// Several files printed into one output.
#[derive(Debug)]
pub struct Bundle<'a> {
    pub source_files: Vec<&'a SourceFile<'a>>,
    pub prepends: Vec<UnparsedSource>,
}

/// Output of a referenced project, printed ahead of the bundle's own files.
#[derive(Debug, Clone, Default)]
pub struct UnparsedSource {
    pub file_name: String,
    pub text: String,
    /// Prologue directive texts, without quotes.
    pub prologues: Vec<String>,
    /// Names of the helpers already present in `text`.
    pub helpers: Vec<String>,
    pub has_no_default_lib: bool,
    pub referenced_files: Vec<FileReference>,
    pub type_reference_directives: Vec<FileReference>,
    pub lib_reference_directives: Vec<FileReference>,
}

/// A runtime helper function printed at the top of an output file.
#[derive(Debug, PartialEq, Eq)]
pub struct EmitHelper {
    pub name: &'static str,
    /// Scoped helpers are printed where they are used, not at file level.
    pub scoped: bool,
    /// Lower priorities are printed first; `None` sorts last.
    pub priority: Option<u32>,
    pub text: &'static str,
}

// ============================================================================
// Tokens and Names
// ============================================================================

/// A punctuation or keyword token kept for its position.
#[derive(Debug, Clone, Copy)]
pub struct Token {
    pub data: NodeData,
}

impl Token {
    pub fn new(kind: SyntaxKind, pos: u32, end: u32) -> Self {
        Self {
            data: NodeData::new(kind, pos, end),
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }
}

#[derive(Debug, Clone)]
pub struct Identifier {
    pub data: NodeData,
    /// The name with leading double underscores escaped.
    pub escaped_text: InternedString,
    /// Set when the identifier is a keyword written with unicode escapes.
    pub original_keyword_kind: Option<SyntaxKind>,
    /// Set for names the printer must invent.
    pub auto_generate: Option<AutoGenerateInfo>,
}

impl Identifier {
    #[inline]
    pub fn is_generated(&self) -> bool {
        self.auto_generate.is_some()
    }
}

/// How a generated identifier gets its final text.
#[derive(Debug, Clone, Copy)]
pub struct AutoGenerateInfo {
    pub kind: GeneratedIdentifierKind,
    pub flags: GeneratedIdentifierFlags,
    /// Unique per factory; the name generator caches on it.
    pub id: u32,
    pub prefix: Option<InternedString>,
    pub suffix: Option<InternedString>,
    pub base: Option<InternedString>,
    /// For [`GeneratedIdentifierKind::Node`]: the node the name derives from.
    pub node: Option<GeneratedNameSource>,
}

/// The part of a node that a derived name depends on.
#[derive(Debug, Clone, Copy)]
pub struct GeneratedNameSource {
    pub id: NodeId,
    pub kind: SyntaxKind,
    /// Name text (declarations) or module specifier text (imports and exports).
    pub text: Option<InternedString>,
}

// ============================================================================
// Type Nodes
// ============================================================================

#[derive(Debug)]
pub enum TypeNode<'a> {
    KeywordType(KeywordTypeNode),
    TypeReference(TypeReferenceNode<'a>),
    FunctionType(FunctionTypeNode<'a>),
    ConstructorType(FunctionTypeNode<'a>),
    TypeQuery(TypeQueryNode<'a>),
    TypeLiteral(TypeLiteralNode<'a>),
    ArrayType(ArrayTypeNode<'a>),
    TupleType(TupleTypeNode<'a>),
    OptionalType(WrappedTypeNode<'a>),
    RestType(WrappedTypeNode<'a>),
    UnionType(UnionOrIntersectionTypeNode<'a>),
    IntersectionType(UnionOrIntersectionTypeNode<'a>),
    ConditionalType(ConditionalTypeNode<'a>),
    InferType(InferTypeNode<'a>),
    ParenthesizedType(WrappedTypeNode<'a>),
    ThisType(KeywordTypeNode),
    TypeOperator(TypeOperatorNode<'a>),
    IndexedAccessType(IndexedAccessTypeNode<'a>),
    MappedType(MappedTypeNode<'a>),
    LiteralType(LiteralTypeNode<'a>),
    NamedTupleMember(NamedTupleMemberNode<'a>),
    TemplateLiteralType(TemplateLiteralTypeNode<'a>),
    ImportType(ImportTypeNode<'a>),
    TypePredicate(TypePredicateNode<'a>),
}

/// `any`, `string`, `this` and the other keyword types.
#[derive(Debug)]
pub struct KeywordTypeNode {
    pub data: NodeData,
}

#[derive(Debug)]
pub struct TypeReferenceNode<'a> {
    pub data: NodeData,
    pub type_name: EntityName<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
}

/// Function and constructor types.
#[derive(Debug)]
pub struct FunctionTypeNode<'a> {
    pub data: NodeData,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct TypeQueryNode<'a> {
    pub data: NodeData,
    pub expr_name: EntityName<'a>,
}

#[derive(Debug)]
pub struct TypeLiteralNode<'a> {
    pub data: NodeData,
    pub members: NodeList<'a, TypeElement<'a>>,
}

#[derive(Debug)]
pub struct ArrayTypeNode<'a> {
    pub data: NodeData,
    pub element_type: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct TupleTypeNode<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, TypeNode<'a>>,
}

/// `T?`, `...T` and `(T)`.
#[derive(Debug)]
pub struct WrappedTypeNode<'a> {
    pub data: NodeData,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct UnionOrIntersectionTypeNode<'a> {
    pub data: NodeData,
    pub types: NodeList<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct ConditionalTypeNode<'a> {
    pub data: NodeData,
    pub check_type: &'a TypeNode<'a>,
    pub extends_type: &'a TypeNode<'a>,
    pub true_type: &'a TypeNode<'a>,
    pub false_type: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct InferTypeNode<'a> {
    pub data: NodeData,
    pub type_parameter: &'a TypeParameterDeclaration<'a>,
}

#[derive(Debug)]
pub struct TypeOperatorNode<'a> {
    pub data: NodeData,
    /// `keyof`, `unique` or `readonly`.
    pub operator: SyntaxKind,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct IndexedAccessTypeNode<'a> {
    pub data: NodeData,
    pub object_type: &'a TypeNode<'a>,
    pub index_type: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct MappedTypeNode<'a> {
    pub data: NodeData,
    /// `ReadonlyKeyword`, or `PlusToken`/`MinusToken` for `+readonly`/`-readonly`.
    pub readonly_token: Option<SyntaxKind>,
    pub type_parameter: &'a TypeParameterDeclaration<'a>,
    pub name_type: OptionalNode<'a, TypeNode<'a>>,
    pub question_token: Option<SyntaxKind>,
    pub type_node: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct LiteralTypeNode<'a> {
    pub data: NodeData,
    pub literal: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct NamedTupleMemberNode<'a> {
    pub data: NodeData,
    pub dot_dot_dot_token: Option<Token>,
    pub name: Identifier,
    pub question_token: Option<Token>,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct TemplateLiteralTypeNode<'a> {
    pub data: NodeData,
    pub head: TemplateLiteralLikeNode,
    pub template_spans: NodeList<'a, TemplateLiteralTypeSpan<'a>>,
}

#[derive(Debug)]
pub struct TemplateLiteralTypeSpan<'a> {
    pub data: NodeData,
    pub type_node: &'a TypeNode<'a>,
    pub literal: TemplateLiteralLikeNode,
}

#[derive(Debug)]
pub struct ImportTypeNode<'a> {
    pub data: NodeData,
    pub is_type_of: bool,
    pub argument: &'a TypeNode<'a>,
    pub qualifier: Option<EntityName<'a>>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
}

#[derive(Debug)]
pub struct TypePredicateNode<'a> {
    pub data: NodeData,
    pub asserts_modifier: Option<Token>,
    pub parameter_name: TypePredicateParameterName,
    pub type_node: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub enum TypePredicateParameterName {
    Identifier(Identifier),
    ThisType(KeywordTypeNode),
}

#[derive(Debug)]
pub struct ExpressionWithTypeArguments<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
}

// ============================================================================
// Signature Declarations
// ============================================================================

#[derive(Debug)]
pub struct TypeParameterDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier,
    pub constraint: OptionalNode<'a, TypeNode<'a>>,
    pub default: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct ParameterDeclaration<'a> {
    pub data: NodeData,
    pub dot_dot_dot_token: Option<Token>,
    pub name: BindingName<'a>,
    pub question_token: Option<Token>,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

// ============================================================================
// Names
// ============================================================================

#[derive(Debug)]
pub enum EntityName<'a> {
    Identifier(Identifier),
    QualifiedName(&'a QualifiedName<'a>),
}

#[derive(Debug)]
pub struct QualifiedName<'a> {
    pub data: NodeData,
    pub left: EntityName<'a>,
    pub right: Identifier,
}

#[derive(Debug)]
pub enum BindingName<'a> {
    Identifier(Identifier),
    ObjectBindingPattern(&'a ObjectBindingPattern<'a>),
    ArrayBindingPattern(&'a ArrayBindingPattern<'a>),
}

#[derive(Debug)]
pub struct ComputedPropertyName<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub enum PropertyName<'a> {
    Identifier(Identifier),
    StringLiteral(StringLiteral<'a>),
    NumericLiteral(NumericLiteral),
    Computed(&'a ComputedPropertyName<'a>),
    PrivateIdentifier(Identifier),
}

// ============================================================================
// Binding Patterns
// ============================================================================

#[derive(Debug)]
pub struct ObjectBindingPattern<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, BindingElement<'a>>,
}

#[derive(Debug)]
pub struct ArrayBindingPattern<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, ArrayBindingElement<'a>>,
}

#[derive(Debug)]
pub enum ArrayBindingElement<'a> {
    BindingElement(BindingElement<'a>),
    Omitted(Token),
}

#[derive(Debug)]
pub struct BindingElement<'a> {
    pub data: NodeData,
    pub dot_dot_dot_token: Option<Token>,
    pub property_name: Option<PropertyName<'a>>,
    pub name: BindingName<'a>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

// ============================================================================
// Type Elements (interface and type literal members)
// ============================================================================

#[derive(Debug)]
pub enum TypeElement<'a> {
    PropertySignature(PropertySignature<'a>),
    MethodSignature(SignatureDeclaration<'a>),
    CallSignature(SignatureDeclaration<'a>),
    ConstructSignature(SignatureDeclaration<'a>),
    IndexSignature(IndexSignatureDeclaration<'a>),
}

#[derive(Debug)]
pub struct PropertySignature<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub question_token: Option<Token>,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
}

/// Method, call and construct signatures. Only methods have a name.
#[derive(Debug)]
pub struct SignatureDeclaration<'a> {
    pub data: NodeData,
    pub name: Option<PropertyName<'a>>,
    pub question_token: Option<Token>,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct IndexSignatureDeclaration<'a> {
    pub data: NodeData,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug)]
pub enum Expression<'a> {
    Identifier(Identifier),
    PrivateIdentifier(Identifier),
    StringLiteral(StringLiteral<'a>),
    NumericLiteral(NumericLiteral),
    BigIntLiteral(LiteralNode),
    RegularExpressionLiteral(LiteralNode),
    NoSubstitutionTemplateLiteral(TemplateLiteralLikeNode),
    TemplateExpression(TemplateExpression<'a>),
    ArrayLiteral(ArrayLiteralExpression<'a>),
    ObjectLiteral(ObjectLiteralExpression<'a>),
    PropertyAccess(PropertyAccessExpression<'a>),
    ElementAccess(ElementAccessExpression<'a>),
    Call(CallExpression<'a>),
    New(NewExpression<'a>),
    TaggedTemplate(TaggedTemplateExpression<'a>),
    TypeAssertion(TypeAssertionExpression<'a>),
    Parenthesized(ParenthesizedExpression<'a>),
    FunctionExpression(FunctionExpression<'a>),
    ArrowFunction(ArrowFunction<'a>),
    Delete(UnaryKeywordExpression<'a>),
    TypeOf(UnaryKeywordExpression<'a>),
    Void(UnaryKeywordExpression<'a>),
    Await(UnaryKeywordExpression<'a>),
    PrefixUnary(PrefixUnaryExpression<'a>),
    PostfixUnary(PostfixUnaryExpression<'a>),
    Binary(BinaryExpression<'a>),
    Conditional(ConditionalExpression<'a>),
    Yield(YieldExpression<'a>),
    Spread(SpreadElement<'a>),
    ClassExpression(ClassLikeDeclaration<'a>),
    Omitted(Token),
    As(AsExpression<'a>),
    Satisfies(AsExpression<'a>),
    NonNull(NonNullExpression<'a>),
    MetaProperty(MetaPropertyExpression),
    /// A transform placeholder that prints nothing but keeps its comments.
    PartiallyEmitted(PartiallyEmittedExpression<'a>),
    /// `this`, `super`, `null`, `true` and `false`.
    Keyword(Token),
}

// -- Literal Expressions --

#[derive(Debug, Clone)]
pub struct StringLiteral<'a> {
    pub data: NodeData,
    pub text: InternedString,
    pub is_single_quote: bool,
    /// Print the text of this identifier instead of `text`.
    pub text_source_node: Option<&'a Identifier>,
}

#[derive(Debug, Clone)]
pub struct NumericLiteral {
    pub data: NodeData,
    pub text: InternedString,
    pub numeric_literal_flags: TokenFlags,
}

/// BigInt and regular expression literals.
#[derive(Debug, Clone)]
pub struct LiteralNode {
    pub data: NodeData,
    pub text: InternedString,
}

/// Template heads, middles, tails and no-substitution templates.
#[derive(Debug, Clone)]
pub struct TemplateLiteralLikeNode {
    pub data: NodeData,
    /// Cooked text.
    pub text: InternedString,
    /// Raw source text, when it differs from the escaped cooked text.
    pub raw_text: Option<InternedString>,
}

#[derive(Debug)]
pub struct TemplateExpression<'a> {
    pub data: NodeData,
    pub head: TemplateLiteralLikeNode,
    pub template_spans: NodeList<'a, TemplateSpan<'a>>,
}

#[derive(Debug)]
pub struct TemplateSpan<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub literal: TemplateLiteralLikeNode,
}

// -- Compound Expressions --

#[derive(Debug)]
pub struct ArrayLiteralExpression<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, Expression<'a>>,
    pub multi_line: bool,
}

#[derive(Debug)]
pub struct ObjectLiteralExpression<'a> {
    pub data: NodeData,
    pub properties: NodeList<'a, ObjectLiteralElement<'a>>,
    pub multi_line: bool,
}

#[derive(Debug)]
pub enum ObjectLiteralElement<'a> {
    PropertyAssignment(PropertyAssignment<'a>),
    ShorthandPropertyAssignment(ShorthandPropertyAssignment<'a>),
    SpreadAssignment(SpreadAssignment<'a>),
    MethodDeclaration(MethodDeclaration<'a>),
    GetAccessor(AccessorDeclaration<'a>),
    SetAccessor(AccessorDeclaration<'a>),
}

#[derive(Debug)]
pub struct PropertyAssignment<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub initializer: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct ShorthandPropertyAssignment<'a> {
    pub data: NodeData,
    pub name: Identifier,
    pub object_assignment_initializer: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct SpreadAssignment<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct PropertyAccessExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub question_dot_token: Option<Token>,
    pub name: MemberName,
}

#[derive(Debug)]
pub enum MemberName {
    Identifier(Identifier),
    PrivateIdentifier(Identifier),
}

impl MemberName {
    #[inline]
    pub fn identifier(&self) -> &Identifier {
        match self {
            MemberName::Identifier(id) | MemberName::PrivateIdentifier(id) => id,
        }
    }
}

#[derive(Debug)]
pub struct ElementAccessExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub question_dot_token: Option<Token>,
    pub argument_expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct CallExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub question_dot_token: Option<Token>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
    pub arguments: NodeList<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct NewExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
    pub arguments: Option<NodeList<'a, Expression<'a>>>,
}

#[derive(Debug)]
pub struct TaggedTemplateExpression<'a> {
    pub data: NodeData,
    pub tag: &'a Expression<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
    /// A no-substitution template or a template expression.
    pub template: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct TypeAssertionExpression<'a> {
    pub data: NodeData,
    pub type_node: &'a TypeNode<'a>,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct ParenthesizedExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct FunctionExpression<'a> {
    pub data: NodeData,
    pub name: Option<Identifier>,
    pub asterisk_token: Option<Token>,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
    pub body: Block<'a>,
}

#[derive(Debug)]
pub struct ArrowFunction<'a> {
    pub data: NodeData,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
    pub equals_greater_than_token: Token,
    pub body: ArrowFunctionBody<'a>,
}

#[derive(Debug)]
pub enum ArrowFunctionBody<'a> {
    Block(&'a Block<'a>),
    Expression(&'a Expression<'a>),
}

/// `delete`, `typeof`, `void` and `await`.
#[derive(Debug)]
pub struct UnaryKeywordExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct PrefixUnaryExpression<'a> {
    pub data: NodeData,
    pub operator: SyntaxKind,
    pub operand: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct PostfixUnaryExpression<'a> {
    pub data: NodeData,
    pub operand: &'a Expression<'a>,
    pub operator: SyntaxKind,
}

#[derive(Debug)]
pub struct BinaryExpression<'a> {
    pub data: NodeData,
    pub left: &'a Expression<'a>,
    pub operator_token: Token,
    pub right: &'a Expression<'a>,
}

impl BinaryExpression<'_> {
    #[inline]
    pub fn operator(&self) -> SyntaxKind {
        self.operator_token.data.kind
    }
}

#[derive(Debug)]
pub struct ConditionalExpression<'a> {
    pub data: NodeData,
    pub condition: &'a Expression<'a>,
    pub question_token: Token,
    pub when_true: &'a Expression<'a>,
    pub colon_token: Token,
    pub when_false: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct YieldExpression<'a> {
    pub data: NodeData,
    pub asterisk_token: Option<Token>,
    pub expression: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct SpreadElement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// `x as T` and `x satisfies T`.
#[derive(Debug)]
pub struct AsExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct NonNullExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct MetaPropertyExpression {
    pub data: NodeData,
    /// `new` or `import`.
    pub keyword_token: SyntaxKind,
    pub name: Identifier,
}

#[derive(Debug)]
pub struct PartiallyEmittedExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug)]
pub enum Statement<'a> {
    VariableStatement(VariableStatement<'a>),
    FunctionDeclaration(FunctionDeclaration<'a>),
    ClassDeclaration(ClassLikeDeclaration<'a>),
    InterfaceDeclaration(InterfaceDeclaration<'a>),
    TypeAliasDeclaration(TypeAliasDeclaration<'a>),
    EnumDeclaration(EnumDeclaration<'a>),
    ModuleDeclaration(ModuleDeclaration<'a>),
    ImportDeclaration(ImportDeclaration<'a>),
    ImportEqualsDeclaration(ImportEqualsDeclaration<'a>),
    ExportDeclaration(ExportDeclaration<'a>),
    ExportAssignment(ExportAssignment<'a>),
    NamespaceExportDeclaration(NamespaceExportDeclaration),
    Block(Block<'a>),
    EmptyStatement(Token),
    ExpressionStatement(ExpressionStatement<'a>),
    IfStatement(IfStatement<'a>),
    DoStatement(DoStatement<'a>),
    WhileStatement(WhileStatement<'a>),
    ForStatement(ForStatement<'a>),
    ForInStatement(ForInOrOfStatement<'a>),
    ForOfStatement(ForInOrOfStatement<'a>),
    ContinueStatement(BreakOrContinueStatement),
    BreakStatement(BreakOrContinueStatement),
    ReturnStatement(ReturnStatement<'a>),
    WithStatement(WithStatement<'a>),
    SwitchStatement(SwitchStatement<'a>),
    LabeledStatement(LabeledStatement<'a>),
    ThrowStatement(ThrowStatement<'a>),
    TryStatement(TryStatement<'a>),
    DebuggerStatement(Token),
    /// Prints nothing but keeps the comments of a removed statement.
    NotEmittedStatement(Token),
}

#[derive(Debug)]
pub struct Block<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
    pub multi_line: bool,
}

#[derive(Debug)]
pub struct VariableStatement<'a> {
    pub data: NodeData,
    pub declaration_list: VariableDeclarationList<'a>,
}

#[derive(Debug)]
pub struct VariableDeclarationList<'a> {
    /// `LET` or `CONST` in `data.flags` selects the keyword.
    pub data: NodeData,
    pub declarations: NodeList<'a, VariableDeclaration<'a>>,
}

#[derive(Debug)]
pub struct VariableDeclaration<'a> {
    pub data: NodeData,
    pub name: BindingName<'a>,
    pub exclamation_token: Option<Token>,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct ExpressionStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct IfStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub then_statement: &'a Statement<'a>,
    pub else_statement: OptionalNode<'a, Statement<'a>>,
}

#[derive(Debug)]
pub struct DoStatement<'a> {
    pub data: NodeData,
    pub statement: &'a Statement<'a>,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct WhileStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug)]
pub struct ForStatement<'a> {
    pub data: NodeData,
    pub initializer: Option<ForInitializer<'a>>,
    pub condition: OptionalNode<'a, Expression<'a>>,
    pub incrementor: OptionalNode<'a, Expression<'a>>,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug)]
pub enum ForInitializer<'a> {
    VariableDeclarationList(VariableDeclarationList<'a>),
    Expression(&'a Expression<'a>),
}

#[derive(Debug)]
pub struct ForInOrOfStatement<'a> {
    pub data: NodeData,
    /// `for await (...)`; only meaningful for `for-of`.
    pub await_modifier: Option<Token>,
    pub initializer: ForInitializer<'a>,
    pub expression: &'a Expression<'a>,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug)]
pub struct BreakOrContinueStatement {
    pub data: NodeData,
    pub label: Option<Identifier>,
}

#[derive(Debug)]
pub struct ReturnStatement<'a> {
    pub data: NodeData,
    pub expression: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct WithStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug)]
pub struct SwitchStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub case_block: CaseBlock<'a>,
}

#[derive(Debug)]
pub struct CaseBlock<'a> {
    pub data: NodeData,
    pub clauses: NodeList<'a, CaseOrDefaultClause<'a>>,
}

/// A `case` clause, or a `default` clause when `expression` is `None`.
#[derive(Debug)]
pub struct CaseOrDefaultClause<'a> {
    pub data: NodeData,
    pub expression: OptionalNode<'a, Expression<'a>>,
    pub statements: NodeList<'a, Statement<'a>>,
}

impl CaseOrDefaultClause<'_> {
    #[inline]
    pub fn is_default(&self) -> bool {
        self.data.kind == SyntaxKind::DefaultClause
    }
}

#[derive(Debug)]
pub struct LabeledStatement<'a> {
    pub data: NodeData,
    pub label: Identifier,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug)]
pub struct ThrowStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct TryStatement<'a> {
    pub data: NodeData,
    pub try_block: Block<'a>,
    pub catch_clause: Option<CatchClause<'a>>,
    pub finally_block: Option<Block<'a>>,
}

#[derive(Debug)]
pub struct CatchClause<'a> {
    pub data: NodeData,
    pub variable_declaration: Option<VariableDeclaration<'a>>,
    pub block: Block<'a>,
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug)]
pub struct FunctionDeclaration<'a> {
    pub data: NodeData,
    pub name: Option<Identifier>,
    pub asterisk_token: Option<Token>,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
    pub body: Option<Block<'a>>,
}

/// Class declarations and class expressions; `data.kind` tells them apart.
#[derive(Debug)]
pub struct ClassLikeDeclaration<'a> {
    pub data: NodeData,
    pub name: Option<Identifier>,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub heritage_clauses: Option<NodeList<'a, HeritageClause<'a>>>,
    pub members: NodeList<'a, ClassElement<'a>>,
}

#[derive(Debug)]
pub struct HeritageClause<'a> {
    pub data: NodeData,
    /// `extends` or `implements`.
    pub token: SyntaxKind,
    pub types: NodeList<'a, ExpressionWithTypeArguments<'a>>,
}

#[derive(Debug)]
pub enum ClassElement<'a> {
    PropertyDeclaration(PropertyDeclaration<'a>),
    MethodDeclaration(MethodDeclaration<'a>),
    Constructor(ConstructorDeclaration<'a>),
    GetAccessor(AccessorDeclaration<'a>),
    SetAccessor(AccessorDeclaration<'a>),
    IndexSignature(IndexSignatureDeclaration<'a>),
    SemicolonClassElement(Token),
    ClassStaticBlockDeclaration(ClassStaticBlockDeclaration<'a>),
}

#[derive(Debug)]
pub struct PropertyDeclaration<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub question_token: Option<Token>,
    pub exclamation_token: Option<Token>,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct MethodDeclaration<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub question_token: Option<Token>,
    pub asterisk_token: Option<Token>,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
    pub body: Option<Block<'a>>,
}

#[derive(Debug)]
pub struct ConstructorDeclaration<'a> {
    pub data: NodeData,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub body: Option<Block<'a>>,
}

/// `get` and `set` accessors; `data.kind` tells them apart.
#[derive(Debug)]
pub struct AccessorDeclaration<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
    pub body: Option<Block<'a>>,
}

#[derive(Debug)]
pub struct ClassStaticBlockDeclaration<'a> {
    pub data: NodeData,
    pub body: Block<'a>,
}

#[derive(Debug)]
pub struct InterfaceDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub heritage_clauses: Option<NodeList<'a, HeritageClause<'a>>>,
    pub members: NodeList<'a, TypeElement<'a>>,
}

#[derive(Debug)]
pub struct TypeAliasDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier,
    pub type_parameters: Option<NodeList<'a, TypeParameterDeclaration<'a>>>,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct EnumDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier,
    pub members: NodeList<'a, EnumMember<'a>>,
}

#[derive(Debug)]
pub struct EnumMember<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct ModuleDeclaration<'a> {
    /// `NAMESPACE` in `data.flags` selects the `namespace` keyword;
    /// `GLOBAL_AUGMENTATION` marks `declare global`.
    pub data: NodeData,
    pub name: ModuleName<'a>,
    pub body: Option<ModuleBody<'a>>,
}

#[derive(Debug)]
pub enum ModuleName<'a> {
    Identifier(Identifier),
    StringLiteral(StringLiteral<'a>),
}

#[derive(Debug)]
pub enum ModuleBody<'a> {
    ModuleBlock(ModuleBlock<'a>),
    /// The inner declaration of `namespace a.b`.
    ModuleDeclaration(&'a ModuleDeclaration<'a>),
}

#[derive(Debug)]
pub struct ModuleBlock<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
}

// ============================================================================
// Import/Export
// ============================================================================

#[derive(Debug)]
pub struct ImportDeclaration<'a> {
    pub data: NodeData,
    pub import_clause: Option<ImportClause<'a>>,
    pub module_specifier: &'a Expression<'a>,
    pub attributes: Option<ImportAttributes<'a>>,
}

#[derive(Debug)]
pub struct ImportClause<'a> {
    pub data: NodeData,
    pub is_type_only: bool,
    pub name: Option<Identifier>,
    pub named_bindings: Option<NamedImportBindings<'a>>,
}

#[derive(Debug)]
pub enum NamedImportBindings<'a> {
    NamespaceImport(NamespaceImport),
    NamedImports(NamedImports<'a>),
}

/// `* as ns` in an import or export clause.
#[derive(Debug)]
pub struct NamespaceImport {
    pub data: NodeData,
    pub name: Identifier,
}

#[derive(Debug)]
pub struct NamedImports<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, ImportOrExportSpecifier>,
}

/// `a as b` in a named import or export list.
#[derive(Debug)]
pub struct ImportOrExportSpecifier {
    pub data: NodeData,
    pub is_type_only: bool,
    pub property_name: Option<Identifier>,
    pub name: Identifier,
}

#[derive(Debug)]
pub struct ExportDeclaration<'a> {
    pub data: NodeData,
    pub is_type_only: bool,
    pub export_clause: Option<NamedExportBindings<'a>>,
    pub module_specifier: OptionalNode<'a, Expression<'a>>,
    pub attributes: Option<ImportAttributes<'a>>,
}

#[derive(Debug)]
pub enum NamedExportBindings<'a> {
    NamespaceExport(NamespaceImport),
    NamedExports(NamedImports<'a>),
}

#[derive(Debug)]
pub struct ExportAssignment<'a> {
    pub data: NodeData,
    pub is_export_equals: bool,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct ImportEqualsDeclaration<'a> {
    pub data: NodeData,
    pub is_type_only: bool,
    pub name: Identifier,
    pub module_reference: ModuleReference<'a>,
}

#[derive(Debug)]
pub enum ModuleReference<'a> {
    ExternalModuleReference(ExternalModuleReference<'a>),
    EntityName(EntityName<'a>),
}

#[derive(Debug)]
pub struct ExternalModuleReference<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// `export as namespace X;`
#[derive(Debug)]
pub struct NamespaceExportDeclaration {
    pub data: NodeData,
    pub name: Identifier,
}

#[derive(Debug)]
pub struct ImportAttributes<'a> {
    pub data: NodeData,
    /// `with` or `assert`.
    pub token: SyntaxKind,
    pub elements: NodeList<'a, ImportAttribute<'a>>,
    pub multi_line: bool,
}

#[derive(Debug)]
pub struct ImportAttribute<'a> {
    pub data: NodeData,
    pub name: ImportAttributeName<'a>,
    pub value: &'a Expression<'a>,
}

#[derive(Debug)]
pub enum ImportAttributeName<'a> {
    Identifier(Identifier),
    StringLiteral(StringLiteral<'a>),
}
