//! Source-map recording.
//!
//! Each printed node maps the start of its first token and its end back to
//! the file it was parsed from. Mappings go to whichever file the node came
//! from, so nodes moved between files still point at their origin.

use crate::printer::{EmitHint, PipelinePhase, Printer, SourceMapTarget};
use tracing::trace;
use tsforge_ast::*;
use tsforge_scanner::skip_trivia;
use tsforge_sourcemap::SourceMapGenerator;
use tsforge_tspath::{get_normalized_absolute_path, get_relative_path_to_directory_or_url};

pub(crate) struct SourceMapState<'a> {
    generator: SourceMapGenerator,
    sources_directory: String,
    current_directory: String,
    use_case_sensitive_file_names: bool,
    inline_sources: bool,
    source: Option<&'a SourceFile<'a>>,
    source_index: u32,
    pub disabled: bool,
}

impl<'a> SourceMapState<'a> {
    pub fn new(target: SourceMapTarget, inline_sources: bool) -> Self {
        Self {
            generator: target.generator,
            sources_directory: target.sources_directory,
            current_directory: target.current_directory,
            use_case_sensitive_file_names: target.use_case_sensitive_file_names,
            inline_sources,
            source: None,
            source_index: 0,
            disabled: false,
        }
    }

    pub fn into_generator(self) -> SourceMapGenerator {
        self.generator
    }

    /// The name a source file is listed under in the map.
    fn source_name(&self, file: &SourceFile<'_>) -> String {
        if self.sources_directory.is_empty() {
            return file.file_name.clone();
        }
        let absolute = get_normalized_absolute_path(&file.file_name, &self.current_directory);
        get_relative_path_to_directory_or_url(&self.sources_directory, &absolute, self.use_case_sensitive_file_names)
    }

    fn set_source(&mut self, file: &'a SourceFile<'a>) {
        if self.source.is_some_and(|current| std::ptr::eq(current, file)) {
            return;
        }
        self.source = Some(file);
        let name = self.source_name(file);
        self.source_index = self.generator.add_source(name);
        if self.inline_sources {
            self.generator.set_source_content(self.source_index, file.text.clone());
        }
    }

    fn emit_pos(&mut self, generated_line: u32, generated_column: u32, pos: u32) {
        let Some(source) = self.source else {
            return;
        };
        if self.disabled || pos == u32::MAX || source.is_json_file() {
            return;
        }
        let original = source.line_map.line_and_column_of(pos);
        trace!(generated_line, generated_column, line = original.line, "source map position");
        self.generator
            .add_simple_mapping(generated_line, generated_column, self.source_index, original.line, original.character);
    }
}

impl<'a, 'r> Printer<'a, 'r> {
    pub(crate) fn source_maps_enabled_for(&self, node: NodeRef<'a>) -> bool {
        self.source_map.as_ref().is_some_and(|map| !map.disabled) && !matches!(node, NodeRef::SourceFile(_))
    }

    pub(crate) fn set_source_map_source(&mut self, file: &'a SourceFile<'a>) {
        if let Some(map) = self.source_map.as_mut() {
            map.set_source(file);
        }
    }

    /// The file a node's positions belong to.
    fn source_of(&self, data: &NodeData) -> Option<&'a SourceFile<'a>> {
        if data.file == SourceFileId::SYNTHESIZED {
            return self.current_source_file;
        }
        self.files.get(&data.file).copied().or(self.current_source_file)
    }

    pub(crate) fn emit_with_source_map(&mut self, hint: EmitHint, node: NodeRef<'a>) {
        let data = node.data();
        let flags = data.emit_flags;
        let mapped = data.kind != SyntaxKind::NotEmittedStatement && !data.is_synthesized();
        let source = self.source_of(data);

        if mapped && !flags.contains(EmitFlags::NO_LEADING_SOURCE_MAP) {
            if let Some(source) = source {
                self.set_source_map_source(source);
                self.emit_source_pos(skip_trivia(&source.text, data.pos()));
            }
        }

        let nested = flags.contains(EmitFlags::NO_NESTED_SOURCE_MAPS);
        if nested {
            self.set_source_maps_disabled(true);
        }
        self.run_phase(PipelinePhase::Emit, hint, node);
        if nested {
            self.set_source_maps_disabled(false);
        }

        if mapped && !flags.contains(EmitFlags::NO_TRAILING_SOURCE_MAP) {
            if let Some(source) = source {
                self.set_source_map_source(source);
                self.emit_source_pos(data.end());
            }
        }
        if let Some(current) = self.current_source_file {
            self.set_source_map_source(current);
        }
    }

    /// Map the start of a token written at `pos` in the current file.
    pub(crate) fn emit_token_source_pos(&mut self, pos: u32) {
        if let Some(current) = self.current_source_file {
            self.set_source_map_source(current);
            self.emit_source_pos(pos);
        }
    }

    fn emit_source_pos(&mut self, pos: u32) {
        let (line, column) = (self.writer.line(), self.writer.column());
        if let Some(map) = self.source_map.as_mut() {
            map.emit_pos(line, column, pos);
        }
    }

    fn set_source_maps_disabled(&mut self, disabled: bool) {
        if let Some(map) = self.source_map.as_mut() {
            map.disabled = disabled;
        }
    }
}
