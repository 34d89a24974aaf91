//! Flag sets and handles shared by the tree, the binder and the printer.

use std::fmt;

bitflags::bitflags! {
    /// Flags set on a node when it is created.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u32 {
        const NONE                = 0;
        const LET                 = 1 << 0;
        const CONST               = 1 << 1;
        /// Inner declaration of `namespace a.b.c`.
        const NESTED_NAMESPACE    = 1 << 2;
        /// Created by a transform rather than read from a file.
        const SYNTHESIZED         = 1 << 3;
        /// `namespace x {}` as opposed to `module x {}`.
        const NAMESPACE           = 1 << 4;
        const OPTIONAL_CHAIN      = 1 << 5;
        const EXPORT_CONTEXT      = 1 << 6;
        const CONTAINS_THIS       = 1 << 7;
        const HAS_IMPLICIT_RETURN = 1 << 8;
        const HAS_EXPLICIT_RETURN = 1 << 9;
        const GLOBAL_AUGMENTATION = 1 << 10;
        const HAS_ASYNC_FUNCTIONS = 1 << 11;
        const AMBIENT             = 1 << 12;
        const IN_WITH_STATEMENT   = 1 << 13;
        const JAVASCRIPT_FILE     = 1 << 14;
        const THIS_NODE_HAS_ERROR = 1 << 15;

        const BLOCK_SCOPED = Self::LET.bits() | Self::CONST.bits();
        const REACHABILITY_CHECK_FLAGS = Self::HAS_IMPLICIT_RETURN.bits() | Self::HAS_EXPLICIT_RETURN.bits();
    }
}

bitflags::bitflags! {
    /// Modifiers written on a declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u32 {
        const NONE      = 0;
        const EXPORT    = 1 << 0;
        const AMBIENT   = 1 << 1;
        const PUBLIC    = 1 << 2;
        const PRIVATE   = 1 << 3;
        const PROTECTED = 1 << 4;
        const STATIC    = 1 << 5;
        const READONLY  = 1 << 6;
        const ABSTRACT  = 1 << 7;
        const ASYNC     = 1 << 8;
        const DEFAULT   = 1 << 9;
        const CONST     = 1 << 10;
        const OVERRIDE  = 1 << 11;
        const ACCESSOR  = 1 << 12;

        const ACCESSIBILITY_MODIFIER = Self::PUBLIC.bits() | Self::PRIVATE.bits() | Self::PROTECTED.bits();
        const PARAMETER_PROPERTY_MODIFIER = Self::ACCESSIBILITY_MODIFIER.bits() | Self::READONLY.bits() | Self::OVERRIDE.bits();
        const TYPE_SCRIPT_MODIFIER = Self::AMBIENT.bits()
            | Self::PUBLIC.bits()
            | Self::PRIVATE.bits()
            | Self::PROTECTED.bits()
            | Self::READONLY.bits()
            | Self::ABSTRACT.bits()
            | Self::CONST.bits()
            | Self::OVERRIDE.bits();
        const EXPORT_DEFAULT = Self::EXPORT.bits() | Self::DEFAULT.bits();
    }
}

bitflags::bitflags! {
    /// Per-node printing controls, normally set by transforms.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EmitFlags: u32 {
        const NONE                      = 0;
        const SINGLE_LINE               = 1 << 0;
        const MULTI_LINE                = 1 << 1;
        const ADVISORY_INDENTATION      = 1 << 2;
        const EMIT_EXPORT_STAR          = 1 << 3;
        const NO_SUBSTITUTION           = 1 << 4;
        const HELPER_NAME               = 1 << 5;
        const NO_LEADING_SOURCE_MAP     = 1 << 6;
        const NO_TRAILING_SOURCE_MAP    = 1 << 7;
        const NO_NESTED_SOURCE_MAPS     = 1 << 8;
        const NO_TOKEN_LEADING_SOURCE_MAPS  = 1 << 9;
        const NO_TOKEN_TRAILING_SOURCE_MAPS = 1 << 10;
        const NO_LEADING_COMMENTS       = 1 << 11;
        const NO_TRAILING_COMMENTS      = 1 << 12;
        const NO_NESTED_COMMENTS        = 1 << 13;
        const NO_INDENTATION            = 1 << 14;
        const REUSE_TEMP_VARIABLE_SCOPE = 1 << 15;
        const CUSTOM_PROLOGUE           = 1 << 16;
        const NO_ASCII_ESCAPING         = 1 << 17;
        const STARTS_ON_NEW_LINE        = 1 << 18;
        const NO_HOISTING               = 1 << 19;

        const NO_SOURCE_MAP = Self::NO_LEADING_SOURCE_MAP.bits() | Self::NO_TRAILING_SOURCE_MAP.bits();
        const NO_TOKEN_SOURCE_MAPS = Self::NO_TOKEN_LEADING_SOURCE_MAPS.bits() | Self::NO_TOKEN_TRAILING_SOURCE_MAPS.bits();
        const NO_COMMENTS = Self::NO_LEADING_COMMENTS.bits() | Self::NO_TRAILING_COMMENTS.bits();
    }
}

bitflags::bitflags! {
    /// Syntax features found in a subtree, used to decide which down-level
    /// transforms have work to do.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TransformFlags: u32 {
        const NONE                                   = 0;
        const CONTAINS_TYPE_SCRIPT                   = 1 << 0;
        const CONTAINS_JSX                           = 1 << 1;
        const CONTAINS_ES_NEXT                       = 1 << 2;
        const CONTAINS_ES2020                        = 1 << 3;
        const CONTAINS_ES2019                        = 1 << 4;
        const CONTAINS_ES2018                        = 1 << 5;
        const CONTAINS_ES2017                        = 1 << 6;
        const CONTAINS_ES2016                        = 1 << 7;
        const CONTAINS_ES2015                        = 1 << 8;
        const CONTAINS_GENERATOR                     = 1 << 9;
        const CONTAINS_DESTRUCTURING_ASSIGNMENT      = 1 << 10;
        const CONTAINS_TYPE_SCRIPT_CLASS_SYNTAX      = 1 << 11;
        const CONTAINS_LEXICAL_THIS                  = 1 << 12;
        const CONTAINS_REST_OR_SPREAD                = 1 << 13;
        const CONTAINS_OBJECT_REST_OR_SPREAD         = 1 << 14;
        const CONTAINS_COMPUTED_PROPERTY_NAME        = 1 << 15;
        const CONTAINS_BLOCK_SCOPED_BINDING          = 1 << 16;
        const CONTAINS_BINDING_PATTERN               = 1 << 17;
        const CONTAINS_YIELD                         = 1 << 18;
        const CONTAINS_AWAIT                         = 1 << 19;
        const CONTAINS_HOISTED_DECLARATION_OR_COMPLETION = 1 << 20;
        const CONTAINS_DYNAMIC_IMPORT                = 1 << 21;
        const CONTAINS_CLASS_FIELDS                  = 1 << 22;
        const CONTAINS_LEXICAL_SUPER                 = 1 << 23;
        const CONTAINS_POSSIBLE_TOP_LEVEL_AWAIT      = 1 << 24;
        const CONTAINS_UPDATE_EXPRESSION_FOR_IDENTIFIER = 1 << 25;
        /// The flags of this node have been computed and cached.
        const HAS_COMPUTED_FLAGS                     = 1 << 29;

        const ASSERT_TYPE_SCRIPT = Self::CONTAINS_TYPE_SCRIPT.bits();
        const ASSERT_ES2015 = Self::CONTAINS_ES2015.bits();
        const ASSERT_GENERATOR = Self::CONTAINS_GENERATOR.bits();
        const ASSERT_DESTRUCTURING_ASSIGNMENT = Self::CONTAINS_DESTRUCTURING_ASSIGNMENT.bits();

        // Exclusion masks. A parent of the given kind stops these flags from
        // propagating out of its children.
        const OUTER_EXPRESSION_EXCLUDES = Self::HAS_COMPUTED_FLAGS.bits();
        const PROPERTY_ACCESS_EXCLUDES = Self::OUTER_EXPRESSION_EXCLUDES.bits();
        const NODE_EXCLUDES = Self::PROPERTY_ACCESS_EXCLUDES.bits();
        const ARROW_FUNCTION_EXCLUDES = Self::NODE_EXCLUDES.bits()
            | Self::CONTAINS_TYPE_SCRIPT_CLASS_SYNTAX.bits()
            | Self::CONTAINS_BLOCK_SCOPED_BINDING.bits()
            | Self::CONTAINS_YIELD.bits()
            | Self::CONTAINS_AWAIT.bits()
            | Self::CONTAINS_HOISTED_DECLARATION_OR_COMPLETION.bits()
            | Self::CONTAINS_BINDING_PATTERN.bits()
            | Self::CONTAINS_OBJECT_REST_OR_SPREAD.bits()
            | Self::CONTAINS_POSSIBLE_TOP_LEVEL_AWAIT.bits();
        const FUNCTION_EXCLUDES = Self::NODE_EXCLUDES.bits()
            | Self::CONTAINS_TYPE_SCRIPT_CLASS_SYNTAX.bits()
            | Self::CONTAINS_LEXICAL_THIS.bits()
            | Self::CONTAINS_LEXICAL_SUPER.bits()
            | Self::CONTAINS_BLOCK_SCOPED_BINDING.bits()
            | Self::CONTAINS_YIELD.bits()
            | Self::CONTAINS_AWAIT.bits()
            | Self::CONTAINS_HOISTED_DECLARATION_OR_COMPLETION.bits()
            | Self::CONTAINS_BINDING_PATTERN.bits()
            | Self::CONTAINS_OBJECT_REST_OR_SPREAD.bits()
            | Self::CONTAINS_POSSIBLE_TOP_LEVEL_AWAIT.bits();
        const CONSTRUCTOR_EXCLUDES = Self::FUNCTION_EXCLUDES.bits();
        const METHOD_OR_ACCESSOR_EXCLUDES = Self::NODE_EXCLUDES.bits()
            | Self::CONTAINS_LEXICAL_THIS.bits()
            | Self::CONTAINS_LEXICAL_SUPER.bits()
            | Self::CONTAINS_BLOCK_SCOPED_BINDING.bits()
            | Self::CONTAINS_YIELD.bits()
            | Self::CONTAINS_AWAIT.bits()
            | Self::CONTAINS_HOISTED_DECLARATION_OR_COMPLETION.bits()
            | Self::CONTAINS_BINDING_PATTERN.bits()
            | Self::CONTAINS_OBJECT_REST_OR_SPREAD.bits();
        const PROPERTY_EXCLUDES = Self::NODE_EXCLUDES.bits()
            | Self::CONTAINS_LEXICAL_THIS.bits()
            | Self::CONTAINS_LEXICAL_SUPER.bits();
        const CLASS_EXCLUDES = Self::NODE_EXCLUDES.bits()
            | Self::CONTAINS_TYPE_SCRIPT_CLASS_SYNTAX.bits()
            | Self::CONTAINS_COMPUTED_PROPERTY_NAME.bits();
        const MODULE_EXCLUDES = Self::NODE_EXCLUDES.bits()
            | Self::CONTAINS_TYPE_SCRIPT_CLASS_SYNTAX.bits()
            | Self::CONTAINS_LEXICAL_THIS.bits()
            | Self::CONTAINS_LEXICAL_SUPER.bits()
            | Self::CONTAINS_BLOCK_SCOPED_BINDING.bits()
            | Self::CONTAINS_HOISTED_DECLARATION_OR_COMPLETION.bits()
            | Self::CONTAINS_POSSIBLE_TOP_LEVEL_AWAIT.bits();
        const TYPE_EXCLUDES = !Self::CONTAINS_TYPE_SCRIPT.bits();
        const OBJECT_LITERAL_EXCLUDES = Self::NODE_EXCLUDES.bits()
            | Self::CONTAINS_TYPE_SCRIPT_CLASS_SYNTAX.bits()
            | Self::CONTAINS_COMPUTED_PROPERTY_NAME.bits()
            | Self::CONTAINS_OBJECT_REST_OR_SPREAD.bits();
        const ARRAY_LITERAL_OR_CALL_OR_NEW_EXCLUDES = Self::NODE_EXCLUDES.bits()
            | Self::CONTAINS_REST_OR_SPREAD.bits();
        const VARIABLE_DECLARATION_LIST_EXCLUDES = Self::NODE_EXCLUDES.bits()
            | Self::CONTAINS_BINDING_PATTERN.bits()
            | Self::CONTAINS_OBJECT_REST_OR_SPREAD.bits();
        const PARAMETER_EXCLUDES = Self::NODE_EXCLUDES.bits();
        const CATCH_CLAUSE_EXCLUDES = Self::NODE_EXCLUDES.bits()
            | Self::CONTAINS_OBJECT_REST_OR_SPREAD.bits();
        const BINDING_PATTERN_EXCLUDES = Self::NODE_EXCLUDES.bits()
            | Self::CONTAINS_REST_OR_SPREAD.bits();
    }
}

bitflags::bitflags! {
    /// What kind of entity a symbol stands for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SymbolFlags: u32 {
        const NONE                     = 0;
        const FUNCTION_SCOPED_VARIABLE = 1 << 0;
        const BLOCK_SCOPED_VARIABLE    = 1 << 1;
        const PROPERTY                 = 1 << 2;
        const ENUM_MEMBER              = 1 << 3;
        const FUNCTION                 = 1 << 4;
        const CLASS                    = 1 << 5;
        const INTERFACE                = 1 << 6;
        const CONST_ENUM               = 1 << 7;
        const REGULAR_ENUM             = 1 << 8;
        const VALUE_MODULE             = 1 << 9;
        const NAMESPACE_MODULE         = 1 << 10;
        const TYPE_LITERAL             = 1 << 11;
        const OBJECT_LITERAL           = 1 << 12;
        const METHOD                   = 1 << 13;
        const CONSTRUCTOR              = 1 << 14;
        const GET_ACCESSOR             = 1 << 15;
        const SET_ACCESSOR             = 1 << 16;
        const SIGNATURE                = 1 << 17;
        const TYPE_PARAMETER           = 1 << 18;
        const TYPE_ALIAS               = 1 << 19;
        const EXPORT_VALUE             = 1 << 20;
        const ALIAS                    = 1 << 21;
        const PROTOTYPE                = 1 << 22;
        const EXPORT_STAR              = 1 << 23;
        const OPTIONAL                 = 1 << 24;
        const TRANSIENT                = 1 << 25;
        /// Declared by a JavaScript assignment (`exports.x = ...`).
        const ASSIGNMENT               = 1 << 26;
        const MODULE_EXPORTS           = 1 << 27;

        const ENUM = Self::REGULAR_ENUM.bits() | Self::CONST_ENUM.bits();
        const VARIABLE = Self::FUNCTION_SCOPED_VARIABLE.bits() | Self::BLOCK_SCOPED_VARIABLE.bits();
        const VALUE = Self::VARIABLE.bits()
            | Self::PROPERTY.bits()
            | Self::ENUM_MEMBER.bits()
            | Self::OBJECT_LITERAL.bits()
            | Self::FUNCTION.bits()
            | Self::CLASS.bits()
            | Self::ENUM.bits()
            | Self::VALUE_MODULE.bits()
            | Self::METHOD.bits()
            | Self::GET_ACCESSOR.bits()
            | Self::SET_ACCESSOR.bits();
        const TYPE = Self::CLASS.bits()
            | Self::INTERFACE.bits()
            | Self::ENUM.bits()
            | Self::ENUM_MEMBER.bits()
            | Self::TYPE_LITERAL.bits()
            | Self::TYPE_PARAMETER.bits()
            | Self::TYPE_ALIAS.bits();
        const NAMESPACE = Self::VALUE_MODULE.bits() | Self::NAMESPACE_MODULE.bits() | Self::ENUM.bits();
        const MODULE = Self::VALUE_MODULE.bits() | Self::NAMESPACE_MODULE.bits();
        const ACCESSOR = Self::GET_ACCESSOR.bits() | Self::SET_ACCESSOR.bits();

        // A declaration with these flags may not share a table entry with a
        // symbol that has any of the matching *_EXCLUDES flags.
        const FUNCTION_SCOPED_VARIABLE_EXCLUDES = Self::VALUE.bits() & !Self::FUNCTION_SCOPED_VARIABLE.bits();
        const BLOCK_SCOPED_VARIABLE_EXCLUDES = Self::VALUE.bits();
        const PARAMETER_EXCLUDES = Self::VALUE.bits();
        const PROPERTY_EXCLUDES = Self::NONE.bits();
        const ENUM_MEMBER_EXCLUDES = Self::VALUE.bits() | Self::TYPE.bits();
        const FUNCTION_EXCLUDES = Self::VALUE.bits() & !(Self::FUNCTION.bits() | Self::VALUE_MODULE.bits());
        const CLASS_EXCLUDES = (Self::VALUE.bits() | Self::TYPE.bits()) & !(Self::VALUE_MODULE.bits() | Self::INTERFACE.bits());
        const INTERFACE_EXCLUDES = Self::TYPE.bits() & !(Self::INTERFACE.bits() | Self::CLASS.bits());
        const REGULAR_ENUM_EXCLUDES = (Self::VALUE.bits() | Self::TYPE.bits()) & !(Self::REGULAR_ENUM.bits() | Self::VALUE_MODULE.bits());
        const CONST_ENUM_EXCLUDES = (Self::VALUE.bits() | Self::TYPE.bits()) & !Self::CONST_ENUM.bits();
        const VALUE_MODULE_EXCLUDES = Self::VALUE.bits() & !(Self::FUNCTION.bits() | Self::CLASS.bits() | Self::REGULAR_ENUM.bits() | Self::VALUE_MODULE.bits());
        const NAMESPACE_MODULE_EXCLUDES = Self::NONE.bits();
        const METHOD_EXCLUDES = Self::VALUE.bits() & !Self::METHOD.bits();
        const GET_ACCESSOR_EXCLUDES = Self::VALUE.bits() & !Self::SET_ACCESSOR.bits();
        const SET_ACCESSOR_EXCLUDES = Self::VALUE.bits() & !Self::GET_ACCESSOR.bits();
        const TYPE_PARAMETER_EXCLUDES = Self::TYPE.bits() & !Self::TYPE_PARAMETER.bits();
        const TYPE_ALIAS_EXCLUDES = Self::TYPE.bits();
        const ALIAS_EXCLUDES = Self::ALIAS.bits();

        const MODULE_MEMBER = Self::VARIABLE.bits()
            | Self::FUNCTION.bits()
            | Self::CLASS.bits()
            | Self::INTERFACE.bits()
            | Self::ENUM.bits()
            | Self::MODULE.bits()
            | Self::TYPE_ALIAS.bits()
            | Self::ALIAS.bits();
        const EXPORT_HAS_LOCAL = Self::FUNCTION.bits() | Self::CLASS.bits() | Self::ENUM.bits() | Self::VALUE_MODULE.bits();
        const BLOCK_SCOPED = Self::BLOCK_SCOPED_VARIABLE.bits() | Self::CLASS.bits() | Self::ENUM.bits();
        const PROPERTY_OR_ACCESSOR = Self::PROPERTY.bits() | Self::ACCESSOR.bits();
        const CLASS_MEMBER = Self::METHOD.bits() | Self::ACCESSOR.bits() | Self::PROPERTY.bits();
        const EXPORT_SUPPORTS_DEFAULT_MODIFIER = Self::CLASS.bits() | Self::FUNCTION.bits() | Self::INTERFACE.bits();
    }
}

bitflags::bitflags! {
    /// Flags on a numeric literal token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u16 {
        const NONE               = 0;
        const SCIENTIFIC         = 1 << 0;
        const OCTAL              = 1 << 1;
        const HEX_SPECIFIER      = 1 << 2;
        const BINARY_SPECIFIER   = 1 << 3;
        const OCTAL_SPECIFIER    = 1 << 4;
        const CONTAINS_SEPARATOR = 1 << 5;

        const NUMERIC_LITERAL_FLAGS = Self::SCIENTIFIC.bits()
            | Self::OCTAL.bits()
            | Self::HEX_SPECIFIER.bits()
            | Self::BINARY_SPECIFIER.bits()
            | Self::OCTAL_SPECIFIER.bits()
            | Self::CONTAINS_SEPARATOR.bits();
    }
}

/// How a compiler-generated identifier gets its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratedIdentifierKind {
    /// Temporary variable: `_a`, `_b`, ...
    Auto,
    /// Loop variable: `_i`, `_j`, ...
    Loop,
    /// A unique name based on a base name: `x_1`.
    Unique,
    /// A name derived from another node.
    Node,
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GeneratedIdentifierFlags: u8 {
        const NONE                      = 0;
        const RESERVED_IN_NESTED_SCOPES = 1 << 0;
        /// Try the base name before appending a suffix.
        const OPTIMISTIC                = 1 << 1;
        /// Only check uniqueness against the file, not the enclosing scopes.
        const FILE_LEVEL                = 1 << 2;
    }
}

/// Stable identity of a node, unique across every tree built by one factory.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const INVALID: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a symbol in a binder's symbol arena.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SymbolId(pub u32);

impl SymbolId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}

/// The tree a node was created for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SourceFileId(pub u32);

impl SourceFileId {
    /// Nodes created outside of any file.
    pub const SYNTHESIZED: SourceFileId = SourceFileId(u32::MAX);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_and_class_conflict() {
        assert!(SymbolFlags::CLASS_EXCLUDES.intersects(SymbolFlags::FUNCTION));
        assert!(SymbolFlags::FUNCTION_EXCLUDES.intersects(SymbolFlags::CLASS));
    }

    #[test]
    fn test_namespace_merges_with_function_and_class() {
        assert!(!SymbolFlags::VALUE_MODULE_EXCLUDES.intersects(SymbolFlags::FUNCTION));
        assert!(!SymbolFlags::VALUE_MODULE_EXCLUDES.intersects(SymbolFlags::CLASS));
        assert!(!SymbolFlags::FUNCTION_EXCLUDES.intersects(SymbolFlags::VALUE_MODULE));
    }

    #[test]
    fn test_var_redeclaration_is_allowed() {
        assert!(!SymbolFlags::FUNCTION_SCOPED_VARIABLE_EXCLUDES.intersects(SymbolFlags::FUNCTION_SCOPED_VARIABLE));
        assert!(SymbolFlags::BLOCK_SCOPED_VARIABLE_EXCLUDES.intersects(SymbolFlags::BLOCK_SCOPED_VARIABLE));
    }

    #[test]
    fn test_type_excludes_keeps_only_type_script() {
        assert!(!TransformFlags::TYPE_EXCLUDES.contains(TransformFlags::CONTAINS_TYPE_SCRIPT));
        assert!(TransformFlags::TYPE_EXCLUDES.contains(TransformFlags::CONTAINS_ES2015));
    }
}
