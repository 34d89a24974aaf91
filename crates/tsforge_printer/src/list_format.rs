//! Format descriptors for the generic list emitter.

bitflags::bitflags! {
    /// How a syntactic list is bracketed, delimited, broken into lines and
    /// indented.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ListFormat: u32 {
        const NONE = 0;

        // Line separators
        const SINGLE_LINE    = 0;
        const MULTI_LINE     = 1 << 0;
        /// Break lines where the original source did.
        const PRESERVE_LINES = 1 << 1;
        const LINES_MASK     = Self::MULTI_LINE.bits() | Self::PRESERVE_LINES.bits();

        // Delimiters
        const NOT_DELIMITED       = 0;
        const BAR_DELIMITED       = 1 << 2;
        const AMPERSAND_DELIMITED = 1 << 3;
        const COMMA_DELIMITED     = 1 << 4;
        const ASTERISK_DELIMITED  = 1 << 5;
        const DELIMITERS_MASK     = Self::BAR_DELIMITED.bits()
            | Self::AMPERSAND_DELIMITED.bits()
            | Self::COMMA_DELIMITED.bits()
            | Self::ASTERISK_DELIMITED.bits();

        const ALLOW_TRAILING_COMMA = 1 << 6;

        // Whitespace
        const INDENTED               = 1 << 7;
        const SPACE_BETWEEN_BRACES   = 1 << 8;
        const SPACE_BETWEEN_SIBLINGS = 1 << 9;

        // Brackets
        const BRACES         = 1 << 10;
        const PARENTHESIS    = 1 << 11;
        const ANGLE_BRACKETS = 1 << 12;
        const SQUARE_BRACKETS = 1 << 13;
        const BRACKETS_MASK  = Self::BRACES.bits()
            | Self::PARENTHESIS.bits()
            | Self::ANGLE_BRACKETS.bits()
            | Self::SQUARE_BRACKETS.bits();

        /// Print nothing, not even brackets, for a missing list.
        const OPTIONAL_IF_UNDEFINED = 1 << 14;
        /// Print nothing, not even brackets, for an empty list.
        const OPTIONAL_IF_EMPTY     = 1 << 15;
        const OPTIONAL = Self::OPTIONAL_IF_UNDEFINED.bits() | Self::OPTIONAL_IF_EMPTY.bits();

        // Other
        /// A synthesized list starts its first element on a new line.
        const PREFER_NEW_LINE          = 1 << 16;
        const NO_TRAILING_NEW_LINE     = 1 << 17;
        const NO_INTERVENING_COMMENTS  = 1 << 18;
        const NO_SPACE_IF_EMPTY        = 1 << 19;
        const SINGLE_ELEMENT           = 1 << 20;
        const SPACE_AFTER_LIST         = 1 << 21;

        // Precomputed formats
        const MODIFIERS = Self::SINGLE_LINE.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::NO_INTERVENING_COMMENTS.bits();
        const HERITAGE_CLAUSES = Self::SINGLE_LINE.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits();
        const SINGLE_LINE_TYPE_LITERAL_MEMBERS = Self::SINGLE_LINE.bits() | Self::SPACE_BETWEEN_BRACES.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits();
        const MULTI_LINE_TYPE_LITERAL_MEMBERS = Self::MULTI_LINE.bits() | Self::INDENTED.bits() | Self::OPTIONAL_IF_EMPTY.bits();

        const SINGLE_LINE_TUPLE_TYPE_ELEMENTS = Self::COMMA_DELIMITED.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::SINGLE_LINE.bits();
        const MULTI_LINE_TUPLE_TYPE_ELEMENTS = Self::COMMA_DELIMITED.bits() | Self::INDENTED.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::MULTI_LINE.bits();
        const UNION_TYPE_CONSTITUENTS = Self::BAR_DELIMITED.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::SINGLE_LINE.bits();
        const INTERSECTION_TYPE_CONSTITUENTS = Self::AMPERSAND_DELIMITED.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::SINGLE_LINE.bits();
        const OBJECT_BINDING_PATTERN_ELEMENTS = Self::SINGLE_LINE.bits() | Self::ALLOW_TRAILING_COMMA.bits() | Self::SPACE_BETWEEN_BRACES.bits() | Self::COMMA_DELIMITED.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::NO_SPACE_IF_EMPTY.bits();
        const ARRAY_BINDING_PATTERN_ELEMENTS = Self::SINGLE_LINE.bits() | Self::ALLOW_TRAILING_COMMA.bits() | Self::COMMA_DELIMITED.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::NO_SPACE_IF_EMPTY.bits();
        const OBJECT_LITERAL_EXPRESSION_PROPERTIES = Self::PRESERVE_LINES.bits() | Self::COMMA_DELIMITED.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::SPACE_BETWEEN_BRACES.bits() | Self::INDENTED.bits() | Self::BRACES.bits() | Self::NO_SPACE_IF_EMPTY.bits();
        const IMPORT_ATTRIBUTES = Self::PRESERVE_LINES.bits() | Self::COMMA_DELIMITED.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::SPACE_BETWEEN_BRACES.bits() | Self::INDENTED.bits() | Self::BRACES.bits() | Self::NO_SPACE_IF_EMPTY.bits();
        const ARRAY_LITERAL_EXPRESSION_ELEMENTS = Self::PRESERVE_LINES.bits() | Self::COMMA_DELIMITED.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::ALLOW_TRAILING_COMMA.bits() | Self::INDENTED.bits() | Self::SQUARE_BRACKETS.bits();
        const COMMA_LIST_ELEMENTS = Self::COMMA_DELIMITED.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::SINGLE_LINE.bits();
        const CALL_EXPRESSION_ARGUMENTS = Self::COMMA_DELIMITED.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::SINGLE_LINE.bits() | Self::PARENTHESIS.bits();
        const NEW_EXPRESSION_ARGUMENTS = Self::COMMA_DELIMITED.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::SINGLE_LINE.bits() | Self::PARENTHESIS.bits() | Self::OPTIONAL_IF_UNDEFINED.bits();
        const TEMPLATE_EXPRESSION_SPANS = Self::SINGLE_LINE.bits() | Self::NO_INTERVENING_COMMENTS.bits();
        const SINGLE_LINE_BLOCK_STATEMENTS = Self::SPACE_BETWEEN_BRACES.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::SINGLE_LINE.bits();
        const MULTI_LINE_BLOCK_STATEMENTS = Self::INDENTED.bits() | Self::MULTI_LINE.bits();
        const VARIABLE_DECLARATION_LIST = Self::COMMA_DELIMITED.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::SINGLE_LINE.bits();
        const SINGLE_LINE_FUNCTION_BODY_STATEMENTS = Self::SINGLE_LINE.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::SPACE_BETWEEN_BRACES.bits();
        const MULTI_LINE_FUNCTION_BODY_STATEMENTS = Self::MULTI_LINE.bits();
        const CLASS_HERITAGE_CLAUSES = Self::SINGLE_LINE.bits();
        const CLASS_MEMBERS = Self::INDENTED.bits() | Self::MULTI_LINE.bits();
        const INTERFACE_MEMBERS = Self::INDENTED.bits() | Self::MULTI_LINE.bits();
        const ENUM_MEMBERS = Self::COMMA_DELIMITED.bits() | Self::INDENTED.bits() | Self::MULTI_LINE.bits();
        const CASE_BLOCK_CLAUSES = Self::INDENTED.bits() | Self::MULTI_LINE.bits();
        const NAMED_IMPORTS_OR_EXPORTS_ELEMENTS = Self::COMMA_DELIMITED.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::ALLOW_TRAILING_COMMA.bits() | Self::SINGLE_LINE.bits() | Self::SPACE_BETWEEN_BRACES.bits() | Self::NO_SPACE_IF_EMPTY.bits();
        const CASE_OR_DEFAULT_CLAUSE_STATEMENTS = Self::INDENTED.bits() | Self::MULTI_LINE.bits() | Self::NO_TRAILING_NEW_LINE.bits() | Self::OPTIONAL_IF_EMPTY.bits();
        const HERITAGE_CLAUSE_TYPES = Self::COMMA_DELIMITED.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::SINGLE_LINE.bits();
        /// Top-level statements; the output ends with a line break.
        const SOURCE_FILE_STATEMENTS = Self::MULTI_LINE.bits();
        const TYPE_ARGUMENTS = Self::COMMA_DELIMITED.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::SINGLE_LINE.bits() | Self::ANGLE_BRACKETS.bits() | Self::OPTIONAL.bits();
        const TYPE_PARAMETERS = Self::COMMA_DELIMITED.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::SINGLE_LINE.bits() | Self::ANGLE_BRACKETS.bits() | Self::OPTIONAL.bits();
        const PARAMETERS = Self::COMMA_DELIMITED.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::SINGLE_LINE.bits() | Self::PARENTHESIS.bits();
        const INDEX_SIGNATURE_PARAMETERS = Self::COMMA_DELIMITED.bits() | Self::SPACE_BETWEEN_SIBLINGS.bits() | Self::SINGLE_LINE.bits() | Self::INDENTED.bits() | Self::SQUARE_BRACKETS.bits();
    }
}

impl ListFormat {
    /// Opening and closing bracket text for the format.
    pub fn brackets(self) -> Option<(&'static str, &'static str)> {
        match self & Self::BRACKETS_MASK {
            b if b == Self::BRACES => Some(("{", "}")),
            b if b == Self::PARENTHESIS => Some(("(", ")")),
            b if b == Self::ANGLE_BRACKETS => Some(("<", ">")),
            b if b == Self::SQUARE_BRACKETS => Some(("[", "]")),
            _ => None,
        }
    }

    /// Delimiter text written between siblings, before any space.
    pub fn delimiter(self) -> &'static str {
        match self & Self::DELIMITERS_MASK {
            d if d == Self::COMMA_DELIMITED => ",",
            d if d == Self::BAR_DELIMITED => " |",
            d if d == Self::AMPERSAND_DELIMITED => " &",
            d if d == Self::ASTERISK_DELIMITED => " *",
            _ => "",
        }
    }

    #[inline]
    pub fn is_multi_line(self) -> bool {
        self.contains(Self::MULTI_LINE)
    }

    #[inline]
    pub fn preserves_lines(self) -> bool {
        self.contains(Self::PRESERVE_LINES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brackets_and_delimiters() {
        assert_eq!(ListFormat::PARAMETERS.brackets(), Some(("(", ")")));
        assert_eq!(ListFormat::TYPE_ARGUMENTS.brackets(), Some(("<", ">")));
        assert_eq!(ListFormat::VARIABLE_DECLARATION_LIST.brackets(), None);
        assert_eq!(ListFormat::UNION_TYPE_CONSTITUENTS.delimiter(), " |");
        assert_eq!(ListFormat::CLASS_MEMBERS.delimiter(), "");
    }

    #[test]
    fn test_line_modes() {
        assert!(ListFormat::MULTI_LINE_BLOCK_STATEMENTS.is_multi_line());
        assert!(ListFormat::OBJECT_LITERAL_EXPRESSION_PROPERTIES.preserves_lines());
        assert!(!ListFormat::CALL_EXPRESSION_ARGUMENTS.is_multi_line());
    }
}
