//! tsforge_diagnostics: Diagnostics reported by binding and emit.
//!
//! Binding never fails on user input; everything it finds is appended to a
//! [`DiagnosticCollection`] as a [`Diagnostic`]. Messages come from the
//! [`messages`] catalog and are formatted with `{0}`-style placeholders.

use std::fmt;
use tsforge_core::text::TextSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Suggestion => write!(f, "suggestion"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A message template with its code and default category.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// A reported diagnostic with resolved text and location.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub file: Option<String>,
    pub span: Option<TextSpan>,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
    /// Secondary locations rendered together with this diagnostic.
    pub related_information: Vec<Diagnostic>,
}

impl Diagnostic {
    /// A diagnostic that is not attached to any file.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
            related_information: Vec::new(),
        }
    }

    pub fn with_location(
        file: &str,
        span: TextSpan,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: Some(file.to_string()),
            span: Some(span),
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
            related_information: Vec::new(),
        }
    }

    /// Override the catalog category, for diagnostics whose severity is configurable.
    pub fn with_category(mut self, category: DiagnosticCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_related(mut self, related: Diagnostic) -> Self {
        self.related_information.push(related);
        self
    }

    pub fn add_related_information(&mut self, related: Diagnostic) {
        self.related_information.push(related);
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    pub fn start(&self) -> u32 {
        self.span.map(|s| s.start).unwrap_or(0)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(span) = self.span {
                write!(f, "({})", span.start)?;
            }
            write!(f, ": ")?;
        }
        write!(f, "{} TS{}: {}", self.category, self.code, self.message_text)
    }
}

/// Replace `{0}`, `{1}`, ... in a template with the given arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// Diagnostics accumulated for one file or one emit run.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// All diagnostics with the given code, in report order.
    pub fn with_code(&self, code: u32) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.code == code)
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Sort by file, then by start position. Stable for equal keys.
    pub fn sort(&mut self) {
        self.diagnostics
            .sort_by(|a, b| a.file.cmp(&b.file).then(a.start().cmp(&b.start())));
    }
}

// ============================================================================
// Message catalog
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Suggestion, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Suggestion, message: $msg }
        };
        ($code:expr, Message, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Message, message: $msg }
        };
    }

    // ========================================================================
    // Strict mode (1100-1299)
    // ========================================================================

    pub const INVALID_USE_OF_0_IN_STRICT_MODE: DiagnosticMessage = diag!(1100, Error, "Invalid use of '{0}' in strict mode.");
    pub const WITH_STATEMENTS_ARE_NOT_ALLOWED_IN_STRICT_MODE: DiagnosticMessage = diag!(1101, Error, "'with' statements are not allowed in strict mode.");
    pub const DELETE_CANNOT_BE_CALLED_ON_AN_IDENTIFIER_IN_STRICT_MODE: DiagnosticMessage = diag!(1102, Error, "'delete' cannot be called on an identifier in strict mode.");
    pub const AN_OBJECT_LITERAL_CANNOT_HAVE_MULTIPLE_PROPERTIES_WITH_THE_SAME_NAME_IN_STRICT_MODE: DiagnosticMessage = diag!(1117, Error, "An object literal cannot have multiple properties with the same name in strict mode.");
    pub const OCTAL_LITERALS_ARE_NOT_ALLOWED_IN_STRICT_MODE: DiagnosticMessage = diag!(1121, Error, "Octal literals are not allowed in strict mode.");
    pub const CODE_CONTAINED_IN_A_CLASS_IS_EVALUATED_IN_STRICT_MODE_WHICH_DOES_NOT_ALLOW_THIS_USE_OF_0: DiagnosticMessage = diag!(1210, Error, "Code contained in a class is evaluated in JavaScript's strict mode which does not allow this use of '{0}'. For more information, see https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Strict_mode.");
    pub const IDENTIFIER_EXPECTED_0_IS_A_RESERVED_WORD_IN_STRICT_MODE: DiagnosticMessage = diag!(1212, Error, "Identifier expected. '{0}' is a reserved word in strict mode.");
    pub const IDENTIFIER_EXPECTED_0_IS_A_RESERVED_WORD_IN_STRICT_MODE_CLASS_DEFINITIONS_ARE_AUTOMATICALLY_IN_STRICT_MODE: DiagnosticMessage = diag!(1213, Error, "Identifier expected. '{0}' is a reserved word in strict mode. Class definitions are automatically in strict mode.");
    pub const IDENTIFIER_EXPECTED_0_IS_A_RESERVED_WORD_IN_STRICT_MODE_MODULES_ARE_AUTOMATICALLY_IN_STRICT_MODE: DiagnosticMessage = diag!(1214, Error, "Identifier expected. '{0}' is a reserved word in strict mode. Modules are automatically in strict mode.");
    pub const INVALID_USE_OF_0_MODULES_ARE_AUTOMATICALLY_IN_STRICT_MODE: DiagnosticMessage = diag!(1215, Error, "Invalid use of '{0}'. Modules are automatically in strict mode.");
    pub const FUNCTION_DECLARATIONS_ARE_NOT_ALLOWED_INSIDE_BLOCKS_IN_STRICT_MODE_WHEN_TARGETING_ES3_OR_ES5: DiagnosticMessage = diag!(1250, Error, "Function declarations are not allowed inside blocks in strict mode when targeting 'ES3' or 'ES5'.");
    pub const FUNCTION_DECLARATIONS_ARE_NOT_ALLOWED_INSIDE_BLOCKS_IN_STRICT_MODE_WHEN_TARGETING_ES3_OR_ES5_CLASS_DEFINITIONS_ARE_AUTOMATICALLY_IN_STRICT_MODE: DiagnosticMessage = diag!(1251, Error, "Function declarations are not allowed inside blocks in strict mode when targeting 'ES3' or 'ES5'. Class definitions are automatically in strict mode.");
    pub const FUNCTION_DECLARATIONS_ARE_NOT_ALLOWED_INSIDE_BLOCKS_IN_STRICT_MODE_WHEN_TARGETING_ES3_OR_ES5_MODULES_ARE_AUTOMATICALLY_IN_STRICT_MODE: DiagnosticMessage = diag!(1252, Error, "Function declarations are not allowed inside blocks in strict mode when targeting 'ES3' or 'ES5'. Modules are automatically in strict mode.");

    // ========================================================================
    // Declarations (2300-2799)
    // ========================================================================

    pub const DUPLICATE_IDENTIFIER_0: DiagnosticMessage = diag!(2300, Error, "Duplicate identifier '{0}'.");
    pub const CANNOT_REDECLARE_BLOCK_SCOPED_VARIABLE_0: DiagnosticMessage = diag!(2451, Error, "Cannot redeclare block-scoped variable '{0}'.");
    pub const A_MODULE_CANNOT_HAVE_MULTIPLE_DEFAULT_EXPORTS: DiagnosticMessage = diag!(2528, Error, "A module cannot have multiple default exports.");
    pub const ENUM_DECLARATIONS_CAN_ONLY_MERGE_WITH_NAMESPACE_OR_OTHER_ENUM_DECLARATIONS: DiagnosticMessage = diag!(2567, Error, "Enum declarations can only merge with namespace or other enum declarations.");
    pub const THE_FIRST_EXPORT_DEFAULT_IS_HERE: DiagnosticMessage = diag!(2752, Error, "The first export default is here.");
    pub const ANOTHER_EXPORT_DEFAULT_IS_HERE: DiagnosticMessage = diag!(2753, Error, "Another export default is here.");

    // ========================================================================
    // Emit (5000-5099)
    // ========================================================================

    pub const COULD_NOT_WRITE_FILE_0_COLON_1: DiagnosticMessage = diag!(5033, Error, "Could not write file '{0}': {1}.");
    pub const CANNOT_WRITE_FILE_0_BECAUSE_IT_WOULD_OVERWRITE_INPUT_FILE: DiagnosticMessage = diag!(5055, Error, "Cannot write file '{0}' because it would overwrite input file.");

    // ========================================================================
    // Informational (6000-6999)
    // ========================================================================

    pub const AND_HERE: DiagnosticMessage = diag!(6204, Message, "and here.");

    // ========================================================================
    // Suggestions and configurable checks (7000-7099)
    // ========================================================================

    pub const UNREACHABLE_CODE_DETECTED: DiagnosticMessage = diag!(7027, Error, "Unreachable code detected.");
    pub const UNUSED_LABEL: DiagnosticMessage = diag!(7028, Error, "Unused label.");
    pub const FILE_IS_A_COMMONJS_MODULE: DiagnosticMessage = diag!(80001, Suggestion, "File is a CommonJS module; it may be converted to an ES module.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        let msg = format_message("Duplicate identifier '{0}'.", &["x"]);
        assert_eq!(msg, "Duplicate identifier 'x'.");
    }

    #[test]
    fn test_with_category_overrides_catalog() {
        let diag = Diagnostic::with_location(
            "a.ts",
            TextSpan::new(0, 3),
            &messages::UNREACHABLE_CODE_DETECTED,
            &[],
        )
        .with_category(DiagnosticCategory::Suggestion);
        assert_eq!(diag.code, 7027);
        assert!(!diag.is_error());
    }

    #[test]
    fn test_related_information() {
        let mut primary = Diagnostic::with_location(
            "a.ts",
            TextSpan::new(0, 6),
            &messages::A_MODULE_CANNOT_HAVE_MULTIPLE_DEFAULT_EXPORTS,
            &[],
        );
        primary.add_related_information(Diagnostic::with_location(
            "a.ts",
            TextSpan::new(20, 6),
            &messages::AND_HERE,
            &[],
        ));
        assert_eq!(primary.related_information.len(), 1);
        assert_eq!(primary.related_information[0].code, 6204);
    }

    #[test]
    fn test_collection_sort_and_filter() {
        let mut collection = DiagnosticCollection::new();
        collection.add(Diagnostic::with_location("b.ts", TextSpan::new(10, 1), &messages::UNUSED_LABEL, &[]));
        collection.add(Diagnostic::with_location("a.ts", TextSpan::new(5, 1), &messages::DUPLICATE_IDENTIFIER_0, &["x"]));
        collection.sort();
        assert_eq!(collection.diagnostics()[0].file.as_deref(), Some("a.ts"));
        assert_eq!(collection.with_code(7028).count(), 1);
        assert_eq!(collection.error_count(), 2);
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic::with_location("test.ts", TextSpan::new(10, 5), &messages::DUPLICATE_IDENTIFIER_0, &["foo"]);
        let display = format!("{}", diag);
        assert_eq!(display, "test.ts(10): error TS2300: Duplicate identifier 'foo'.");
    }
}
