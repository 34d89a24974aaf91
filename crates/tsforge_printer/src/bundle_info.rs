//! Section records for incremental bundle rebuilds.
//!
//! While a bundle prints, the printer notes which byte ranges of the output
//! came from where. A later build can then reuse the unchanged ranges.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BundleFileSectionKind {
    #[serde(rename = "prologue")]
    Prologue,
    #[serde(rename = "emitHelpers")]
    EmitHelpers,
    #[serde(rename = "no-default-lib")]
    NoDefaultLib,
    #[serde(rename = "reference")]
    Reference,
    #[serde(rename = "type")]
    Type,
    #[serde(rename = "lib")]
    Lib,
    #[serde(rename = "prepend")]
    Prepend,
    #[serde(rename = "text")]
    Text,
    /// Declaration text marked `@internal`.
    #[serde(rename = "internal")]
    Internal,
}

impl BundleFileSectionKind {
    /// Text-like sections hold printed statements.
    pub fn is_text_like(self) -> bool {
        matches!(self, BundleFileSectionKind::Text | BundleFileSectionKind::Internal)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleFileSection {
    pub pos: usize,
    pub end: usize,
    pub kind: BundleFileSectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// For a prepend section, the text sections inside it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texts: Option<Vec<BundleFileSection>>,
}

impl BundleFileSection {
    pub fn new(pos: usize, end: usize, kind: BundleFileSectionKind) -> Self {
        Self {
            pos,
            end,
            kind,
            data: None,
            texts: None,
        }
    }

    pub fn with_data(pos: usize, end: usize, kind: BundleFileSectionKind, data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            ..Self::new(pos, end, kind)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleFileInfo {
    pub sections: Vec<BundleFileSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<SourceFileInfo>,
}

impl BundleFileInfo {
    /// Extend the last section when it has the same kind, else start one.
    pub fn push_text_like(&mut self, pos: usize, end: usize, kind: BundleFileSectionKind) {
        match self.sections.last_mut() {
            Some(last) if last.kind == kind => last.end = end,
            _ => self.sections.push(BundleFileSection::new(pos, end, kind)),
        }
    }
}

/// What the bundled files contributed besides their statements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFileInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helpers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prologues: Option<Vec<SourceFilePrologueInfo>>,
}

/// The leading directives of one bundled file, with their source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFilePrologueInfo {
    /// Index of the file in the bundle.
    pub file: usize,
    /// Source text from the start of the file to the end of its last directive.
    pub text: String,
    pub directives: Vec<SourceFilePrologueDirective>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFilePrologueDirective {
    pub pos: i64,
    pub end: i64,
    pub expression: SourceFilePrologueDirectiveExpression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFilePrologueDirectiveExpression {
    pub pos: i64,
    pub end: i64,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_sections_coalesce() {
        let mut info = BundleFileInfo::default();
        info.push_text_like(0, 10, BundleFileSectionKind::Text);
        info.push_text_like(10, 20, BundleFileSectionKind::Text);
        info.push_text_like(20, 25, BundleFileSectionKind::Internal);
        assert_eq!(info.sections.len(), 2);
        assert_eq!(info.sections[0].end, 20);
    }

    #[test]
    fn test_section_json_shape() {
        let section = BundleFileSection::with_data(0, 14, BundleFileSectionKind::Prologue, "use strict");
        let json = serde_json::to_string(&section).unwrap();
        assert_eq!(json, r#"{"pos":0,"end":14,"kind":"prologue","data":"use strict"}"#);
        let helpers = BundleFileSection::new(3, 9, BundleFileSectionKind::EmitHelpers);
        assert!(serde_json::to_string(&helpers).unwrap().contains(r#""kind":"emitHelpers""#));
    }
}
