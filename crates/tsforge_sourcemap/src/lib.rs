//! tsforge_sourcemap: Source map generation.
//!
//! Generates V3 source maps for mapping emitted JavaScript and declaration
//! text back to the original TypeScript source. Lines and columns are
//! zero-based throughout.

pub mod vlq;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub use vlq::base64_encode;

/// A single mapping entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    pub generated_line: u32,
    pub generated_column: u32,
    pub source_index: Option<u32>,
    pub original_line: Option<u32>,
    pub original_column: Option<u32>,
    pub name_index: Option<u32>,
}

/// The serialized V3 document.
///
/// Field order matches what editors and other emitters produce, so the
/// JSON text is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSourceMap {
    pub version: u32,
    pub file: String,
    pub source_root: String,
    pub sources: Vec<String>,
    pub names: Vec<String>,
    pub mappings: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<Option<String>>>,
}

/// Accumulates mappings for one output file.
#[derive(Debug, Clone)]
pub struct SourceMapGenerator {
    file: String,
    source_root: String,
    sources: Vec<String>,
    source_indices: FxHashMap<String, u32>,
    sources_content: Vec<Option<String>>,
    names: Vec<String>,
    name_indices: FxHashMap<String, u32>,
    mappings: Vec<Mapping>,
}

impl SourceMapGenerator {
    pub fn new(file: String) -> Self {
        Self {
            file,
            source_root: String::new(),
            sources: Vec::new(),
            source_indices: FxHashMap::default(),
            sources_content: Vec::new(),
            names: Vec::new(),
            name_indices: FxHashMap::default(),
            mappings: Vec::new(),
        }
    }

    pub fn with_source_root(mut self, source_root: impl Into<String>) -> Self {
        self.source_root = source_root.into();
        self
    }

    #[inline]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Register a source path, returning its index. Adding the same path
    /// twice returns the first index.
    pub fn add_source(&mut self, source: String) -> u32 {
        if let Some(&idx) = self.source_indices.get(&source) {
            return idx;
        }
        let idx = self.sources.len() as u32;
        self.source_indices.insert(source.clone(), idx);
        self.sources.push(source);
        self.sources_content.push(None);
        idx
    }

    pub fn add_source_with_content(&mut self, source: String, content: String) -> u32 {
        let idx = self.add_source(source);
        self.set_source_content(idx, content);
        idx
    }

    pub fn set_source_content(&mut self, source_index: u32, content: String) {
        if let Some(slot) = self.sources_content.get_mut(source_index as usize) {
            *slot = Some(content);
        }
    }

    pub fn add_name(&mut self, name: String) -> u32 {
        if let Some(&idx) = self.name_indices.get(&name) {
            return idx;
        }
        let idx = self.names.len() as u32;
        self.name_indices.insert(name.clone(), idx);
        self.names.push(name);
        idx
    }

    /// Record a mapping. Mappings must arrive in generated order; a mapping at
    /// the same generated position as the previous one replaces it.
    pub fn add_mapping(&mut self, mapping: Mapping) {
        if let Some(last) = self.mappings.last_mut() {
            debug_assert!(
                (last.generated_line, last.generated_column)
                    <= (mapping.generated_line, mapping.generated_column),
                "source map mappings added out of order"
            );
            if last.generated_line == mapping.generated_line
                && last.generated_column == mapping.generated_column
            {
                *last = mapping;
                return;
            }
        }
        self.mappings.push(mapping);
    }

    pub fn add_simple_mapping(
        &mut self,
        generated_line: u32,
        generated_column: u32,
        source_index: u32,
        original_line: u32,
        original_column: u32,
    ) {
        self.add_mapping(Mapping {
            generated_line,
            generated_column,
            source_index: Some(source_index),
            original_line: Some(original_line),
            original_column: Some(original_column),
            name_index: None,
        });
    }

    pub fn add_named_mapping(
        &mut self,
        generated_line: u32,
        generated_column: u32,
        source_index: u32,
        original_line: u32,
        original_column: u32,
        name_index: u32,
    ) {
        self.add_mapping(Mapping {
            generated_line,
            generated_column,
            source_index: Some(source_index),
            original_line: Some(original_line),
            original_column: Some(original_column),
            name_index: Some(name_index),
        });
    }

    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Encode the `mappings` field.
    pub fn encoded_mappings(&self) -> String {
        let mut out = String::new();
        let mut line = 0u32;
        let mut prev_column = 0i64;
        let mut prev_source = 0i64;
        let mut prev_original_line = 0i64;
        let mut prev_original_column = 0i64;
        let mut prev_name = 0i64;
        let mut first_in_line = true;

        for mapping in &self.mappings {
            while line < mapping.generated_line {
                out.push(';');
                line += 1;
                prev_column = 0;
                first_in_line = true;
            }
            if !first_in_line {
                out.push(',');
            }
            first_in_line = false;

            let column = mapping.generated_column as i64;
            vlq::encode(column - prev_column, &mut out);
            prev_column = column;

            let (Some(source), Some(original_line), Some(original_column)) =
                (mapping.source_index, mapping.original_line, mapping.original_column)
            else {
                continue;
            };
            vlq::encode(source as i64 - prev_source, &mut out);
            prev_source = source as i64;
            vlq::encode(original_line as i64 - prev_original_line, &mut out);
            prev_original_line = original_line as i64;
            vlq::encode(original_column as i64 - prev_original_column, &mut out);
            prev_original_column = original_column as i64;

            if let Some(name) = mapping.name_index {
                vlq::encode(name as i64 - prev_name, &mut out);
                prev_name = name as i64;
            }
        }
        out
    }

    pub fn to_raw(&self) -> RawSourceMap {
        let sources_content = if self.sources_content.iter().any(Option::is_some) {
            Some(self.sources_content.clone())
        } else {
            None
        };
        RawSourceMap {
            version: 3,
            file: self.file.clone(),
            source_root: self.source_root.clone(),
            sources: self.sources.clone(),
            names: self.names.clone(),
            mappings: self.encoded_mappings(),
            sources_content,
        }
    }

    /// Encode the source map as a JSON string.
    pub fn to_json(&self) -> String {
        // A struct of strings and vectors always serializes.
        serde_json::to_string(&self.to_raw()).unwrap_or_default()
    }

    /// `data:application/json;base64,...` form of the map.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:application/json;base64,{}",
            base64_encode(self.to_json().as_bytes())
        )
    }

    /// A `//# sourceMappingURL=` comment carrying the whole map inline.
    pub fn to_inline_comment(&self) -> String {
        source_mapping_url_comment(&self.to_data_url())
    }
}

/// The trailing comment that points a runtime at a source map.
pub fn source_mapping_url_comment(url: &str) -> String {
    format!("//# sourceMappingURL={url}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_map() {
        let generator = SourceMapGenerator::new("out.js".to_string());
        assert_eq!(
            generator.to_json(),
            r#"{"version":3,"file":"out.js","sourceRoot":"","sources":[],"names":[],"mappings":""}"#
        );
    }

    #[test]
    fn test_mappings_are_relative() {
        let mut generator = SourceMapGenerator::new("out.js".to_string());
        let src = generator.add_source("a.ts".to_string());
        generator.add_simple_mapping(0, 0, src, 0, 0);
        generator.add_simple_mapping(0, 4, src, 0, 6);
        generator.add_simple_mapping(2, 0, src, 1, 0);
        assert_eq!(generator.encoded_mappings(), "AAAA,IAAM;;AACN");
    }

    #[test]
    fn test_same_position_replaces_previous() {
        let mut generator = SourceMapGenerator::new("out.js".to_string());
        let src = generator.add_source("a.ts".to_string());
        generator.add_simple_mapping(0, 0, src, 0, 0);
        generator.add_simple_mapping(0, 0, src, 3, 2);
        assert_eq!(generator.mappings().len(), 1);
        assert_eq!(generator.mappings()[0].original_line, Some(3));
    }

    #[test]
    fn test_sources_are_deduplicated() {
        let mut generator = SourceMapGenerator::new("out.js".to_string());
        let a = generator.add_source("a.ts".to_string());
        let b = generator.add_source("b.ts".to_string());
        assert_eq!(generator.add_source("a.ts".to_string()), a);
        assert_ne!(a, b);
        assert_eq!(generator.sources(), &["a.ts".to_string(), "b.ts".to_string()]);
    }

    #[test]
    fn test_sources_content_only_when_present() {
        let mut generator = SourceMapGenerator::new("out.js".to_string());
        generator.add_source("a.ts".to_string());
        assert!(!generator.to_json().contains("sourcesContent"));
        generator.add_source_with_content("b.ts".to_string(), "let b;".to_string());
        let raw = generator.to_raw();
        assert_eq!(raw.sources_content, Some(vec![None, Some("let b;".to_string())]));
    }

    #[test]
    fn test_inline_comment() {
        let generator = SourceMapGenerator::new("out.js".to_string());
        let comment = generator.to_inline_comment();
        assert!(comment.starts_with("//# sourceMappingURL=data:application/json;base64,"));
    }
}
