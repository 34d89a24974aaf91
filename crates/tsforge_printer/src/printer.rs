//! The printer: writes syntax trees back out as text.
//!
//! Every node passes through the same phases in a fixed order: emit
//! notification, substitution, comments, source maps, then the rendering
//! rule for its kind. A phase whose concern is switched off is skipped.
//!
//! Comments wrap source-map positions, so the text of a comment never gets
//! a mapping; substitution runs first, so the replacement node is the one
//! that gets commented and mapped.

use crate::bundle_info::{
    BundleFileInfo, BundleFileSection, BundleFileSectionKind, SourceFileInfo, SourceFilePrologueDirective,
    SourceFilePrologueDirectiveExpression, SourceFilePrologueInfo,
};
use crate::comments::CommentState;
use crate::helpers::{helper_lines, sorted_emit_helpers};
use crate::list_format::ListFormat;
use crate::name_generator::NameGenerator;
use crate::resolver::EmitResolver;
use crate::source_maps::SourceMapState;
use crate::text_writer::TextWriter;
use rustc_hash::{FxHashMap, FxHashSet};
use std::borrow::Cow;
use tracing::debug;
use tsforge_ast::utilities::prologue_directive_count;
use tsforge_ast::*;
use tsforge_core::StringInterner;
use tsforge_scanner::{escape_non_ascii_string, escape_string, get_leading_comment_ranges, get_shebang, skip_trivia, QuoteKind};
use tsforge_sourcemap::SourceMapGenerator;

/// The context a node is printed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitHint {
    SourceFile,
    Expression,
    /// A name in a declaration or after a `.`; never qualified.
    IdentifierName,
    /// The body of an `if`, loop or label.
    EmbeddedStatement,
    Unspecified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum PipelinePhase {
    Notification,
    Substitution,
    Comments,
    SourceMaps,
    Emit,
}

/// Hooks a transform installs to watch or replace nodes while they print.
pub trait PrintHandlers<'a> {
    fn is_emit_notification_enabled(&self, _node: NodeRef<'a>) -> bool {
        false
    }

    fn on_before_emit_node(&mut self, _hint: EmitHint, _node: NodeRef<'a>) {}

    fn on_after_emit_node(&mut self, _hint: EmitHint, _node: NodeRef<'a>) {}

    /// Whether `substitute_node` may return something other than its input.
    fn has_substitutions(&self) -> bool {
        false
    }

    fn substitute_node(&mut self, _hint: EmitHint, node: NodeRef<'a>) -> NodeRef<'a> {
        node
    }
}

/// Handlers that observe nothing and substitute nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHandlers;

impl<'a> PrintHandlers<'a> for NoopHandlers {}

#[derive(Debug, Clone)]
pub struct PrinterOptions {
    pub new_line: &'static str,
    /// Drop every comment except pinned `/*! ... */` comments at the top of a file.
    pub remove_comments: bool,
    /// Print JavaScript: type annotations and type-only declarations are left out.
    pub strip_types: bool,
    pub no_emit_helpers: bool,
    /// Helpers come from an imported module, so external modules print none.
    pub import_helpers: bool,
    /// Keep non-ASCII characters in string literals as they are.
    pub never_ascii_escape: bool,
    /// Record statements marked `@internal` as their own bundle sections.
    pub strip_internal: bool,
    /// Record bundle sections while printing bundles.
    pub write_bundle_file_info: bool,
    /// Embed source text in generated source maps.
    pub inline_sources: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            new_line: "\n",
            remove_comments: false,
            strip_types: false,
            no_emit_helpers: false,
            import_helpers: false,
            never_ascii_escape: false,
            strip_internal: false,
            write_bundle_file_info: false,
            inline_sources: false,
        }
    }
}

/// Where mappings go while an output prints.
#[derive(Debug)]
pub struct SourceMapTarget {
    pub generator: SourceMapGenerator,
    /// Source paths are recorded relative to this directory. Empty keeps
    /// them as the file names were given.
    pub sources_directory: String,
    pub current_directory: String,
    pub use_case_sensitive_file_names: bool,
}

impl SourceMapTarget {
    pub fn new(generator: SourceMapGenerator) -> Self {
        Self {
            generator,
            sources_directory: String::new(),
            current_directory: String::new(),
            use_case_sensitive_file_names: true,
        }
    }
}

/// Everything one `write_file` or `write_bundle` call produced.
#[derive(Debug)]
pub struct PrintOutput {
    pub text: String,
    pub source_map: Option<SourceMapGenerator>,
    pub bundle_file_info: Option<BundleFileInfo>,
}

pub struct Printer<'a, 'r> {
    pub(crate) options: PrinterOptions,
    pub(crate) interner: &'r StringInterner,
    pub(crate) resolver: &'r dyn EmitResolver,
    pub(crate) handlers: Box<dyn PrintHandlers<'a> + 'r>,
    pub(crate) writer: TextWriter,
    pub(crate) names: NameGenerator<'r>,
    pub(crate) current_source_file: Option<&'a SourceFile<'a>>,
    /// Files of the output being printed, for switching source-map sources.
    pub(crate) files: FxHashMap<SourceFileId, &'a SourceFile<'a>>,
    pub(crate) comments: CommentState,
    pub(crate) source_map: Option<SourceMapState<'a>>,
    is_own_file_emit: bool,
    bundled_helpers: FxHashSet<String>,
    pub(crate) bundle_file_info: Option<BundleFileInfo>,
    source_file_text_pos: usize,
    source_file_text_kind: BundleFileSectionKind,
}

impl<'a, 'r> Printer<'a, 'r> {
    pub fn new(
        interner: &'r StringInterner,
        options: PrinterOptions,
        resolver: &'r dyn EmitResolver,
        handlers: Box<dyn PrintHandlers<'a> + 'r>,
    ) -> Self {
        Self {
            writer: TextWriter::new(options.new_line),
            comments: CommentState::new(options.remove_comments),
            names: NameGenerator::new(resolver),
            options,
            interner,
            resolver,
            handlers,
            current_source_file: None,
            files: FxHashMap::default(),
            source_map: None,
            is_own_file_emit: false,
            bundled_helpers: FxHashSet::default(),
            bundle_file_info: None,
            source_file_text_pos: 0,
            source_file_text_kind: BundleFileSectionKind::Text,
        }
    }

    #[inline]
    pub fn options(&self) -> &PrinterOptions {
        &self.options
    }

    /// Print a single node. Positions in the node refer to `source_file`.
    pub fn print_node(&mut self, hint: EmitHint, node: NodeRef<'a>, source_file: Option<&'a SourceFile<'a>>) -> String {
        self.begin_print(None);
        if let Some(file) = source_file {
            self.files.insert(file.id(), file);
        }
        self.set_source_file(source_file);
        self.pipeline_emit(hint, node);
        self.finish_print().text
    }

    pub fn print_file(&mut self, file: &'a SourceFile<'a>) -> String {
        self.write_file(file, None).text
    }

    pub fn print_bundle(&mut self, bundle: &Bundle<'a>) -> String {
        self.write_bundle(bundle, None).text
    }

    pub fn write_file(&mut self, file: &'a SourceFile<'a>, source_map: Option<SourceMapTarget>) -> PrintOutput {
        self.begin_print(source_map);
        self.is_own_file_emit = true;
        self.files.insert(file.id(), file);
        self.emit_shebang(file);
        self.set_source_file(Some(file));
        self.emit_prologue_directives(file.statements, file, None, false);
        self.print_root(file);
        self.finish_print()
    }

    pub fn write_bundle(&mut self, bundle: &Bundle<'a>, source_map: Option<SourceMapTarget>) -> PrintOutput {
        self.begin_print(source_map);
        self.is_own_file_emit = false;
        if self.options.write_bundle_file_info {
            self.bundle_file_info = Some(BundleFileInfo::default());
        }
        for &file in &bundle.source_files {
            self.files.insert(file.id(), file);
        }

        self.emit_bundle_shebang(bundle);
        self.emit_bundle_prologues(bundle);
        self.emit_helpers_of_bundle(bundle);
        self.emit_bundle_triple_slash_directives(bundle);
        for prepend in &bundle.prepends {
            self.emit_prepend(prepend);
        }

        self.source_file_text_pos = self.writer.text_pos_with_write_line();
        for &file in &bundle.source_files {
            self.print_root(file);
        }

        if !bundle.source_files.is_empty() && self.bundle_file_info.is_some() {
            let end = self.writer.text_pos();
            if self.record_text_like_section(end) {
                let prologues = bundled_prologues(bundle, self.interner);
                let helpers = self.bundled_helper_names(bundle);
                if let Some(info) = self.bundle_file_info.as_mut() {
                    if prologues.is_some() || helpers.is_some() {
                        info.sources = Some(SourceFileInfo { helpers, prologues });
                    }
                }
            }
        }

        debug!(
            files = bundle.source_files.len(),
            prepends = bundle.prepends.len(),
            sections = self.bundle_file_info.as_ref().map_or(0, |info| info.sections.len()),
            "printed bundle"
        );
        self.finish_print()
    }

    fn begin_print(&mut self, source_map: Option<SourceMapTarget>) {
        self.reset();
        self.source_map = source_map.map(|target| SourceMapState::new(target, self.options.inline_sources));
    }

    fn finish_print(&mut self) -> PrintOutput {
        let writer = std::mem::replace(&mut self.writer, TextWriter::new(self.options.new_line));
        let output = PrintOutput {
            text: writer.into_text(),
            source_map: self.source_map.take().map(SourceMapState::into_generator),
            bundle_file_info: self.bundle_file_info.take(),
        };
        self.reset();
        output
    }

    fn reset(&mut self) {
        self.writer.clear();
        self.names.reset();
        self.comments = CommentState::new(self.options.remove_comments);
        self.current_source_file = None;
        self.files.clear();
        self.source_map = None;
        self.is_own_file_emit = false;
        self.bundled_helpers.clear();
        self.bundle_file_info = None;
        self.source_file_text_pos = 0;
        self.source_file_text_kind = BundleFileSectionKind::Text;
    }

    pub(crate) fn set_source_file(&mut self, file: Option<&'a SourceFile<'a>>) {
        self.current_source_file = file;
        self.comments.detached.clear();
        if let Some(file) = file {
            let interner = self.interner;
            self.names.set_file_identifiers(file.identifiers.iter().map(|&id| interner.unescape(id)));
            self.set_source_map_source(file);
        }
    }

    fn print_root(&mut self, file: &'a SourceFile<'a>) {
        self.set_source_file(Some(file));
        self.pipeline_emit(EmitHint::SourceFile, NodeRef::SourceFile(file));
    }

    // ========================================================================
    // Pipeline
    // ========================================================================

    pub(crate) fn pipeline_emit(&mut self, hint: EmitHint, node: NodeRef<'a>) {
        self.run_phase(PipelinePhase::Notification, hint, node);
    }

    pub(crate) fn run_phase(&mut self, phase: PipelinePhase, hint: EmitHint, node: NodeRef<'a>) {
        match phase {
            PipelinePhase::Notification => {
                if self.handlers.is_emit_notification_enabled(node) {
                    self.handlers.on_before_emit_node(hint, node);
                    self.run_phase(PipelinePhase::Substitution, hint, node);
                    self.handlers.on_after_emit_node(hint, node);
                } else {
                    self.run_phase(PipelinePhase::Substitution, hint, node);
                }
            }
            PipelinePhase::Substitution => {
                let node = if self.handlers.has_substitutions()
                    && !node.data().emit_flags.contains(EmitFlags::NO_SUBSTITUTION)
                {
                    self.handlers.substitute_node(hint, node)
                } else {
                    node
                };
                self.run_phase(PipelinePhase::Comments, hint, node);
            }
            PipelinePhase::Comments => {
                if self.comments_enabled_for(node) {
                    self.emit_with_comments(hint, node);
                } else {
                    self.run_phase(PipelinePhase::SourceMaps, hint, node);
                }
            }
            PipelinePhase::SourceMaps => {
                if self.source_maps_enabled_for(node) {
                    self.emit_with_source_map(hint, node);
                } else {
                    self.run_phase(PipelinePhase::Emit, hint, node);
                }
            }
            PipelinePhase::Emit => self.emit_node(hint, node),
        }
    }

    /// The rendering rule for every node kind.
    fn emit_node(&mut self, hint: EmitHint, node: NodeRef<'a>) {
        match node {
            NodeRef::SourceFile(file) => self.print_source_file(file),
            NodeRef::Statement(stmt) => self.print_statement(stmt),
            NodeRef::Expression(expr) => self.print_expression(expr, hint),
            NodeRef::TypeNode(ty) => self.print_type_node(ty),
            NodeRef::Identifier(id) => self.print_identifier(id, hint),
            NodeRef::StringLiteral(lit) => self.print_string_literal(lit),
            NodeRef::NumericLiteral(lit) => {
                let interner = self.interner;
                self.write_literal(interner.resolve(lit.text));
            }
            NodeRef::TemplateLiteral(lit) => self.print_template_literal(lit),
            NodeRef::Token(token) => self.write_token(token.kind()),
            NodeRef::QualifiedName(name) => self.print_qualified_name(name),
            NodeRef::ComputedPropertyName(name) => self.print_computed_property_name(name),
            NodeRef::ObjectBindingPattern(pattern) => self.print_object_binding_pattern(pattern),
            NodeRef::ArrayBindingPattern(pattern) => self.print_array_binding_pattern(pattern),
            NodeRef::BindingElement(element) => self.print_binding_element(element),
            NodeRef::Parameter(param) => self.print_parameter(param),
            NodeRef::TypeParameter(param) => self.print_type_parameter(param),
            NodeRef::Block(block) => self.print_block(block),
            NodeRef::VariableDeclarationList(list) => self.print_variable_declaration_list(list),
            NodeRef::VariableDeclaration(decl) => self.print_variable_declaration(decl),
            NodeRef::ClassElement(member) => self.print_class_element(member),
            NodeRef::TypeElement(member) => self.print_type_element(member),
            NodeRef::ObjectLiteralElement(property) => self.print_object_literal_element(property),
            NodeRef::EnumMember(member) => self.print_enum_member(member),
            NodeRef::HeritageClause(clause) => self.print_heritage_clause(clause),
            NodeRef::ExpressionWithTypeArguments(node) => self.print_expression_with_type_arguments(node),
            NodeRef::CaseBlock(block) => self.print_case_block(block),
            NodeRef::CaseClause(clause) => self.print_case_clause(clause),
            NodeRef::CatchClause(clause) => self.print_catch_clause(clause),
            NodeRef::ModuleDeclaration(decl) => self.print_module_declaration(decl),
            NodeRef::ModuleBlock(block) => self.print_module_block(block),
            NodeRef::ImportClause(clause) => self.print_import_clause(clause),
            NodeRef::NamespaceImport(ns) => self.print_namespace_import(ns),
            NodeRef::NamedImports(named) => self.print_named_imports(named),
            NodeRef::ImportSpecifier(spec) => self.print_import_or_export_specifier(spec),
            NodeRef::ExternalModuleReference(reference) => self.print_external_module_reference(reference),
            NodeRef::TemplateSpan(span) => self.print_template_span(span),
            NodeRef::TemplateLiteralTypeSpan(span) => self.print_template_literal_type_span(span),
            NodeRef::ImportAttributes(attributes) => self.print_import_attributes(attributes),
            NodeRef::ImportAttribute(attribute) => self.print_import_attribute(attribute),
        }
    }

    // ========================================================================
    // Source files
    // ========================================================================

    fn print_source_file(&mut self, file: &'a SourceFile<'a>) {
        self.write_line();
        let statements = file.statements;
        let emit_detached = statements
            .first()
            .map_or(true, |first| first.as_prologue_directive().is_none() || first.data().is_synthesized());
        if emit_detached {
            let end = statements.last().map_or(0, |s| s.data().end());
            self.emit_body_with_detached_comments(file.data.emit_flags, 0, end, |p| p.print_source_file_worker(file));
        } else {
            self.print_source_file_worker(file);
        }
    }

    fn print_source_file_worker(&mut self, file: &'a SourceFile<'a>) {
        let statements = file.statements;
        self.names.push_scope(false);
        self.generate_names_for_statements(statements);
        self.emit_helpers_of_file(file);
        let prologue_count = prologue_directive_count(statements);
        if self.is_own_file_emit && file.is_declaration_file {
            self.emit_triple_slash_directives(
                file.has_no_default_lib,
                &file.referenced_files,
                &file.type_reference_directives,
                &file.lib_reference_directives,
            );
        }
        self.emit_statement_list(None, &statements[prologue_count..], ListFormat::SOURCE_FILE_STATEMENTS);
        self.names.pop_scope(false);
    }

    /// Print the prologue directives of `statements`, skipping any whose
    /// text is already in `seen`. Returns how many leading statements were
    /// directives.
    fn emit_prologue_directives(
        &mut self,
        statements: &'a [Statement<'a>],
        file: &'a SourceFile<'a>,
        mut seen: Option<&mut FxHashSet<String>>,
        record_section: bool,
    ) -> usize {
        let mut needs_source_file = self.current_source_file.map_or(true, |current| current.id() != file.id());
        for (index, stmt) in statements.iter().enumerate() {
            let Some(directive) = stmt.as_prologue_directive() else {
                return index;
            };
            let interner = self.interner;
            let text = interner.resolve(directive.text);
            if seen.as_ref().is_some_and(|seen| seen.contains(text)) {
                continue;
            }
            if needs_source_file {
                needs_source_file = false;
                self.set_source_file(Some(file));
            }
            self.write_line();
            let pos = self.writer.text_pos();
            self.pipeline_emit(EmitHint::Unspecified, stmt.as_node());
            if record_section {
                let end = self.writer.text_pos();
                if let Some(info) = self.bundle_file_info.as_mut() {
                    info.sections
                        .push(BundleFileSection::with_data(pos, end, BundleFileSectionKind::Prologue, text));
                }
            }
            if let Some(seen) = seen.as_mut() {
                seen.insert(text.to_string());
            }
        }
        statements.len()
    }

    fn emit_bundle_prologues(&mut self, bundle: &Bundle<'a>) {
        let mut seen = FxHashSet::default();
        for prepend in &bundle.prepends {
            for prologue in &prepend.prologues {
                if !seen.insert(prologue.clone()) {
                    continue;
                }
                self.write_line();
                let pos = self.writer.text_pos();
                let literal = format!("\"{}\";", escape_string(prologue, QuoteKind::Double));
                self.writer.write(&literal);
                let end = self.writer.text_pos();
                if let Some(info) = self.bundle_file_info.as_mut() {
                    info.sections
                        .push(BundleFileSection::with_data(pos, end, BundleFileSectionKind::Prologue, prologue.as_str()));
                }
            }
        }
        for &file in &bundle.source_files {
            self.emit_prologue_directives(file.statements, file, Some(&mut seen), true);
        }
        self.set_source_file(None);
    }

    fn emit_shebang(&mut self, file: &SourceFile<'_>) -> bool {
        match get_shebang(&file.text) {
            Some(shebang) => {
                self.writer.write_comment(shebang);
                self.write_line();
                true
            }
            None => false,
        }
    }

    /// Only the first shebang found in a bundle is kept.
    fn emit_bundle_shebang(&mut self, bundle: &Bundle<'a>) {
        for prepend in &bundle.prepends {
            if let Some(shebang) = get_shebang(&prepend.text) {
                self.writer.write_comment(shebang);
                self.write_line();
                return;
            }
        }
        for &file in &bundle.source_files {
            if self.emit_shebang(file) {
                return;
            }
        }
    }

    // ========================================================================
    // Triple-slash directives
    // ========================================================================

    /// Hoist the reference directives of every unit in the bundle, once each.
    fn emit_bundle_triple_slash_directives(&mut self, bundle: &Bundle<'a>) {
        let mut has_no_default_lib = false;
        let mut files = Vec::new();
        let mut types = Vec::new();
        let mut libs = Vec::new();
        let mut seen: FxHashSet<(BundleFileSectionKind, String)> = FxHashSet::default();
        let units = bundle
            .prepends
            .iter()
            .map(|p| (p.has_no_default_lib, &p.referenced_files, &p.type_reference_directives, &p.lib_reference_directives))
            .chain(bundle.source_files.iter().map(|f| {
                (f.has_no_default_lib, &f.referenced_files, &f.type_reference_directives, &f.lib_reference_directives)
            }));
        for (no_default_lib, referenced, type_refs, lib_refs) in units {
            has_no_default_lib |= no_default_lib;
            for (refs, kind, out) in [
                (referenced, BundleFileSectionKind::Reference, &mut files),
                (type_refs, BundleFileSectionKind::Type, &mut types),
                (lib_refs, BundleFileSectionKind::Lib, &mut libs),
            ] {
                for reference in refs {
                    if seen.insert((kind, reference.file_name.clone())) {
                        out.push(reference.clone());
                    }
                }
            }
        }
        self.comments.skip_triple_slash = true;
        self.emit_triple_slash_directives(has_no_default_lib, &files, &types, &libs);
    }

    fn emit_triple_slash_directives(
        &mut self,
        has_no_default_lib: bool,
        files: &[FileReference],
        types: &[FileReference],
        libs: &[FileReference],
    ) {
        if has_no_default_lib {
            self.emit_directive_comment(
                "/// <reference no-default-lib=\"true\"/>".to_string(),
                BundleFileSectionKind::NoDefaultLib,
                None,
            );
        }
        for (refs, attribute, kind) in [
            (files, "path", BundleFileSectionKind::Reference),
            (types, "types", BundleFileSectionKind::Type),
            (libs, "lib", BundleFileSectionKind::Lib),
        ] {
            for reference in refs {
                let comment = format!("/// <reference {}=\"{}\" />", attribute, reference.file_name);
                self.emit_directive_comment(comment, kind, Some(&reference.file_name));
            }
        }
    }

    fn emit_directive_comment(&mut self, comment: String, kind: BundleFileSectionKind, data: Option<&str>) {
        let pos = self.writer.text_pos();
        self.writer.write_comment(&comment);
        let end = self.writer.text_pos();
        if let Some(info) = self.bundle_file_info.as_mut() {
            let section = match data {
                Some(data) => BundleFileSection::with_data(pos, end, kind, data),
                None => BundleFileSection::new(pos, end, kind),
            };
            info.sections.push(section);
        }
        self.write_line();
    }

    // ========================================================================
    // Helpers and prepends
    // ========================================================================

    fn emit_helpers_of_bundle(&mut self, bundle: &Bundle<'a>) {
        for prepend in &bundle.prepends {
            for name in &prepend.helpers {
                self.bundled_helpers.insert(name.clone());
            }
        }
        for &file in &bundle.source_files {
            self.emit_helper_list(file, true);
        }
    }

    fn emit_helpers_of_file(&mut self, file: &'a SourceFile<'a>) {
        let should_bundle = !self.is_own_file_emit;
        self.emit_helper_list(file, should_bundle);
    }

    fn emit_helper_list(&mut self, file: &'a SourceFile<'a>, at_bundle_level: bool) -> bool {
        let should_skip = self.options.no_emit_helpers || (self.options.import_helpers && file.is_external_module());
        let should_bundle = !self.is_own_file_emit;
        let mut emitted = false;
        for helper in sorted_emit_helpers(&file.emit_helpers) {
            if !helper.scoped {
                if should_skip {
                    continue;
                }
                if should_bundle && !self.bundled_helpers.insert(helper.name.to_string()) {
                    continue;
                }
            } else if at_bundle_level && !self.is_own_file_emit {
                continue;
            }
            let pos = self.writer.text_pos_with_write_line();
            for line in helper_lines(helper.text) {
                self.write_line();
                self.writer.write(line);
            }
            let end = self.writer.text_pos();
            if let Some(info) = self.bundle_file_info.as_mut() {
                info.sections
                    .push(BundleFileSection::with_data(pos, end, BundleFileSectionKind::EmitHelpers, helper.name));
            }
            emitted = true;
        }
        if emitted {
            self.write_line();
        }
        emitted
    }

    /// Names of the unscoped helpers the bundled files requested, first
    /// request first.
    fn bundled_helper_names(&self, bundle: &Bundle<'a>) -> Option<Vec<String>> {
        if self.options.no_emit_helpers {
            return None;
        }
        let mut seen = FxHashSet::default();
        let mut names = Vec::new();
        for &file in &bundle.source_files {
            if self.options.import_helpers && file.is_external_module() {
                continue;
            }
            for helper in sorted_emit_helpers(&file.emit_helpers) {
                if !helper.scoped && seen.insert(helper.name) {
                    names.push(helper.name.to_string());
                }
            }
        }
        (!names.is_empty()).then_some(names)
    }

    fn emit_prepend(&mut self, prepend: &UnparsedSource) {
        self.write_line();
        let pos = self.writer.text_pos();
        let text = prepend.text.trim_end_matches(['\r', '\n']);
        for (index, line) in text.lines().enumerate() {
            if index > 0 {
                self.writer.write_line(true);
            }
            self.writer.raw_write(line);
        }
        let end = self.writer.text_pos();
        if let Some(info) = self.bundle_file_info.as_mut() {
            let mut section =
                BundleFileSection::with_data(pos, end, BundleFileSectionKind::Prepend, prepend.file_name.as_str());
            section.texts = Some(vec![BundleFileSection::new(pos, end, BundleFileSectionKind::Text)]);
            info.sections.push(section);
        }
    }

    // ========================================================================
    // Text-like bundle sections
    // ========================================================================

    fn record_text_like_section(&mut self, end: usize) -> bool {
        if self.source_file_text_pos >= end {
            return false;
        }
        let (pos, kind) = (self.source_file_text_pos, self.source_file_text_kind);
        match self.bundle_file_info.as_mut() {
            Some(info) => {
                info.push_text_like(pos, end, kind);
                true
            }
            None => false,
        }
    }

    /// Open an internal section before a statement marked `@internal`.
    /// Returns the kind to restore afterwards.
    pub(crate) fn record_internal_section_start(&mut self, stmt: &Statement<'a>) -> Option<BundleFileSectionKind> {
        if !self.options.strip_internal
            || self.bundle_file_info.is_none()
            || self.source_file_text_kind == BundleFileSectionKind::Internal
            || !self.is_internal_declaration(stmt)
        {
            return None;
        }
        let previous = self.source_file_text_kind;
        self.record_text_like_section(self.writer.text_pos());
        self.source_file_text_pos = self.writer.text_pos_with_write_line();
        self.source_file_text_kind = BundleFileSectionKind::Internal;
        Some(previous)
    }

    pub(crate) fn record_internal_section_end(&mut self, previous: Option<BundleFileSectionKind>) {
        if let Some(previous) = previous {
            self.record_text_like_section(self.writer.text_pos());
            self.source_file_text_pos = self.writer.text_pos_with_write_line();
            self.source_file_text_kind = previous;
        }
    }

    fn is_internal_declaration(&self, stmt: &Statement<'a>) -> bool {
        let Some(file) = self.current_source_file else {
            return false;
        };
        let data = stmt.data();
        if !self.in_current_file(data) {
            return false;
        }
        get_leading_comment_ranges(&file.text, data.pos())
            .iter()
            .any(|comment| comment.text(&file.text).contains("@internal"))
    }

    // ========================================================================
    // Lists
    // ========================================================================

    pub(crate) fn emit_list<T: HasNodeData>(
        &mut self,
        parent: Option<&NodeData>,
        children: Option<&'a [T]>,
        format: ListFormat,
        emit_item: impl FnMut(&mut Self, &'a T),
    ) {
        if children.is_none() && format.contains(ListFormat::OPTIONAL_IF_UNDEFINED) {
            return;
        }
        let items: Vec<&'a T> = children.unwrap_or(&[]).iter().collect();
        self.emit_list_items(parent, &items, format, emit_item);
    }

    /// Like [`Printer::emit_list`], leaving out children `keep` rejects.
    pub(crate) fn emit_list_filtered<T: HasNodeData>(
        &mut self,
        parent: Option<&NodeData>,
        children: &'a [T],
        format: ListFormat,
        keep: impl Fn(&Self, &'a T) -> bool,
        emit_item: impl FnMut(&mut Self, &'a T),
    ) {
        let items: Vec<&'a T> = children.iter().filter(|&child| keep(self, child)).collect();
        self.emit_list_items(parent, &items, format, emit_item);
    }

    fn emit_list_items<T: HasNodeData>(
        &mut self,
        parent: Option<&NodeData>,
        items: &[&'a T],
        format: ListFormat,
        mut emit_item: impl FnMut(&mut Self, &'a T),
    ) {
        let is_empty = items.is_empty();
        if is_empty && format.contains(ListFormat::OPTIONAL_IF_EMPTY) {
            return;
        }
        let brackets = format.brackets();
        if let Some((open, _)) = brackets {
            self.write_punctuation(open);
        }

        if is_empty {
            if format.is_multi_line() {
                self.write_line();
            } else if format.contains(ListFormat::SPACE_BETWEEN_BRACES) && !format.contains(ListFormat::NO_SPACE_IF_EMPTY) {
                self.write_space();
            }
        } else {
            let may_emit_intervening_comments = !format.contains(ListFormat::NO_INTERVENING_COMMENTS);
            let mut should_emit_intervening_comments = may_emit_intervening_comments;
            let leading = self.leading_line_terminator_count(parent, Some(items[0].data()), format);
            if leading > 0 {
                self.write_lines(leading);
                should_emit_intervening_comments = false;
            } else if format.contains(ListFormat::SPACE_BETWEEN_BRACES) {
                self.write_space();
            }
            if format.contains(ListFormat::INDENTED) {
                self.writer.increase_indent();
            }

            let mut previous: Option<&'a NodeData> = None;
            for &child in items {
                let data = child.data();
                let mut decrease_indent_after = false;
                if let Some(prev) = previous {
                    if format.intersects(ListFormat::DELIMITERS_MASK)
                        && parent.map_or(true, |p| p.end() != prev.end())
                        && !prev.emit_flags.contains(EmitFlags::NO_TRAILING_COMMENTS)
                    {
                        self.emit_leading_comments_of_position(prev.end());
                    }
                    self.write_punctuation(format.delimiter());
                    let separating = self.separating_line_terminator_count(prev, data, format);
                    if separating > 0 {
                        if !format.intersects(ListFormat::LINES_MASK | ListFormat::INDENTED) {
                            self.writer.increase_indent();
                            decrease_indent_after = true;
                        }
                        self.write_lines(separating);
                        should_emit_intervening_comments = false;
                    } else if format.contains(ListFormat::SPACE_BETWEEN_SIBLINGS) {
                        self.write_space();
                    }
                }
                if should_emit_intervening_comments {
                    self.emit_trailing_comments_of_position(data.pos(), false);
                } else {
                    should_emit_intervening_comments = may_emit_intervening_comments;
                }
                emit_item(self, child);
                if decrease_indent_after {
                    self.writer.decrease_indent();
                }
                previous = Some(data);
            }

            if let Some(prev) = previous {
                if format.intersects(ListFormat::DELIMITERS_MASK)
                    && parent.map_or(true, |p| p.end() != prev.end())
                    && !prev.emit_flags.contains(EmitFlags::NO_TRAILING_COMMENTS)
                {
                    self.emit_leading_comments_of_position(prev.end());
                }
            }
            if format.contains(ListFormat::INDENTED) {
                self.writer.decrease_indent();
            }
            let closing = self.closing_line_terminator_count(parent, previous, format);
            if closing > 0 {
                self.write_lines(closing);
            } else if format.intersects(ListFormat::SPACE_AFTER_LIST | ListFormat::SPACE_BETWEEN_BRACES) {
                self.write_space();
            }
        }

        if let Some((_, close)) = brackets {
            self.write_punctuation(close);
        }
    }

    /// Statements of a block-like body, with type-only statements left out
    /// when types are stripped and `@internal` sections recorded.
    pub(crate) fn emit_statement_list(&mut self, parent: Option<&NodeData>, statements: &'a [Statement<'a>], format: ListFormat) {
        self.emit_list_filtered(
            parent,
            statements,
            format,
            |p, stmt| p.is_emitted_statement(stmt),
            |p, stmt| {
                let previous = p.record_internal_section_start(stmt);
                p.pipeline_emit(EmitHint::Unspecified, stmt.as_node());
                p.record_internal_section_end(previous);
            },
        );
    }

    pub(crate) fn leading_line_terminator_count(&self, parent: Option<&NodeData>, first: Option<&NodeData>, format: ListFormat) -> u32 {
        if format.preserves_lines() {
            if format.contains(ListFormat::PREFER_NEW_LINE) {
                return 1;
            }
            let Some(first) = first else {
                return match parent {
                    Some(p) if self.in_current_file(p) && !self.range_is_on_single_line(p) => 1,
                    _ => 0,
                };
            };
            if let Some(p) = parent {
                if self.in_current_file(p) && self.in_current_file(first) {
                    let same_line = self.on_same_line(self.start_of(p), self.start_of(first));
                    return u32::from(!same_line);
                }
            }
            if starts_on_new_line(first, format) {
                return 1;
            }
        }
        u32::from(format.is_multi_line())
    }

    pub(crate) fn separating_line_terminator_count(&self, previous: &NodeData, next: &NodeData, format: ListFormat) -> u32 {
        if format.preserves_lines() {
            if self.in_current_file(previous) && self.in_current_file(next) {
                return u32::from(!self.on_same_line(previous.end(), self.start_of(next)));
            }
            if starts_on_new_line(previous, format) || starts_on_new_line(next, format) {
                return 1;
            }
        } else if next.emit_flags.contains(EmitFlags::STARTS_ON_NEW_LINE) {
            return 1;
        }
        u32::from(format.is_multi_line())
    }

    pub(crate) fn closing_line_terminator_count(&self, parent: Option<&NodeData>, last: Option<&NodeData>, format: ListFormat) -> u32 {
        if format.preserves_lines() {
            if format.contains(ListFormat::PREFER_NEW_LINE) {
                return 1;
            }
            let Some(last) = last else {
                return match parent {
                    Some(p) if self.in_current_file(p) && !self.range_is_on_single_line(p) => 1,
                    _ => 0,
                };
            };
            if let Some(p) = parent {
                if self.in_current_file(p) && self.in_current_file(last) {
                    return u32::from(!self.on_same_line(p.end(), last.end()));
                }
            }
            if starts_on_new_line(last, format) {
                return 1;
            }
        }
        u32::from(format.is_multi_line() && !format.contains(ListFormat::NO_TRAILING_NEW_LINE))
    }

    // ========================================================================
    // Positions
    // ========================================================================

    /// Whether the node's positions index into the file being printed.
    pub(crate) fn in_current_file(&self, data: &NodeData) -> bool {
        !data.is_synthesized()
            && self
                .current_source_file
                .is_some_and(|file| data.file == SourceFileId::SYNTHESIZED || data.file == file.id())
    }

    /// A node copied in from a different tree than the one being printed.
    pub(crate) fn is_foreign(&self, data: &NodeData) -> bool {
        data.file != SourceFileId::SYNTHESIZED && self.current_source_file.is_some_and(|file| data.file != file.id())
    }

    pub(crate) fn start_of(&self, data: &NodeData) -> u32 {
        match self.current_source_file {
            Some(file) => skip_trivia(&file.text, data.pos()),
            None => data.pos(),
        }
    }

    pub(crate) fn on_same_line(&self, a: u32, b: u32) -> bool {
        self.current_source_file.map_or(true, |file| file.line_map.on_same_line(a, b))
    }

    pub(crate) fn range_is_on_single_line(&self, data: &NodeData) -> bool {
        self.on_same_line(self.start_of(data), data.end())
    }

    // ========================================================================
    // Names and literals
    // ========================================================================

    /// The text an identifier prints as.
    pub(crate) fn identifier_text(&mut self, id: &Identifier) -> Cow<'r, str> {
        let interner = self.interner;
        match self.names.generate_name(id, interner) {
            Some(name) => Cow::Owned(name),
            None => Cow::Borrowed(interner.unescape(id.escaped_text)),
        }
    }

    pub(crate) fn print_identifier(&mut self, id: &'a Identifier, hint: EmitHint) {
        if hint == EmitHint::Expression && !id.is_generated() {
            if let Some(container) = self.resolver.get_referenced_export_container(id.data.id) {
                self.write(&container);
                self.write_punctuation(".");
            }
        }
        let text = self.identifier_text(id);
        self.write(&text);
    }

    /// Emit a name through the pipeline so it keeps its comments and mappings.
    pub(crate) fn emit_identifier_name(&mut self, id: &'a Identifier) {
        if self.is_foreign(&id.data) {
            let text = self.identifier_text(id);
            self.write(&text);
            return;
        }
        self.pipeline_emit(EmitHint::IdentifierName, NodeRef::Identifier(id));
    }

    pub(crate) fn print_string_literal(&mut self, lit: &'a StringLiteral<'a>) {
        let text = self.string_literal_text(lit);
        self.write_literal(&text);
    }

    pub(crate) fn string_literal_text(&mut self, lit: &StringLiteral<'_>) -> String {
        let escape_ascii = !self.options.never_ascii_escape && !lit.data.emit_flags.contains(EmitFlags::NO_ASCII_ESCAPING);
        let escape = |text: &str, quote| {
            if escape_ascii {
                escape_non_ascii_string(text, quote)
            } else {
                escape_string(text, quote)
            }
        };
        if let Some(source) = lit.text_source_node {
            let text = self.identifier_text(source);
            return format!("\"{}\"", escape(&text, QuoteKind::Double));
        }
        let interner = self.interner;
        let text = interner.resolve(lit.text);
        if lit.is_single_quote {
            format!("'{}'", escape(text, QuoteKind::Single))
        } else {
            format!("\"{}\"", escape(text, QuoteKind::Double))
        }
    }

    pub(crate) fn print_template_literal(&mut self, lit: &TemplateLiteralLikeNode) {
        let interner = self.interner;
        let body = match lit.raw_text {
            Some(raw) => interner.resolve(raw).to_string(),
            None => escape_string(interner.resolve(lit.text), QuoteKind::Backtick),
        };
        let text = match lit.data.kind {
            SyntaxKind::NoSubstitutionTemplateLiteral => format!("`{body}`"),
            SyntaxKind::TemplateHead => format!("`{body}${{"),
            SyntaxKind::TemplateMiddle => format!("}}{body}${{"),
            _ => format!("}}{body}`"),
        };
        self.write_literal(&text);
    }

    // ========================================================================
    // Name generation scopes
    // ========================================================================

    /// Settle generated names declared directly in a scope before any use
    /// of them prints, so declarations get the first pick.
    pub(crate) fn generate_names_for_statements(&mut self, statements: &'a [Statement<'a>]) {
        for stmt in statements {
            self.generate_names_for_statement(stmt);
        }
    }

    fn generate_names_for_statement(&mut self, stmt: &'a Statement<'a>) {
        match stmt {
            Statement::VariableStatement(var) => {
                for decl in var.declaration_list.declarations {
                    self.generate_names_for_binding(&decl.name);
                }
            }
            Statement::FunctionDeclaration(func) => self.generate_name_if_needed(func.name.as_ref()),
            Statement::ClassDeclaration(class) => self.generate_name_if_needed(class.name.as_ref()),
            Statement::EnumDeclaration(decl) => self.generate_name_if_needed(Some(&decl.name)),
            Statement::ModuleDeclaration(decl) => {
                if let ModuleName::Identifier(name) = &decl.name {
                    self.generate_name_if_needed(Some(name));
                }
            }
            Statement::ImportDeclaration(decl) => {
                if let Some(clause) = &decl.import_clause {
                    self.generate_name_if_needed(clause.name.as_ref());
                    match &clause.named_bindings {
                        Some(NamedImportBindings::NamespaceImport(ns)) => self.generate_name_if_needed(Some(&ns.name)),
                        Some(NamedImportBindings::NamedImports(named)) => {
                            for spec in named.elements {
                                self.generate_name_if_needed(Some(&spec.name));
                            }
                        }
                        None => {}
                    }
                }
            }
            Statement::ImportEqualsDeclaration(decl) => self.generate_name_if_needed(Some(&decl.name)),
            Statement::Block(block) => self.generate_names_for_statements(block.statements),
            Statement::LabeledStatement(labeled) => self.generate_names_for_statement(labeled.statement),
            Statement::IfStatement(stmt) => {
                self.generate_names_for_statement(stmt.then_statement);
                if let Some(else_statement) = stmt.else_statement {
                    self.generate_names_for_statement(else_statement);
                }
            }
            Statement::TryStatement(stmt) => {
                self.generate_names_for_statements(stmt.try_block.statements);
                if let Some(catch) = &stmt.catch_clause {
                    if let Some(decl) = &catch.variable_declaration {
                        self.generate_names_for_binding(&decl.name);
                    }
                    self.generate_names_for_statements(catch.block.statements);
                }
                if let Some(finally) = &stmt.finally_block {
                    self.generate_names_for_statements(finally.statements);
                }
            }
            Statement::DoStatement(stmt) => self.generate_names_for_statement(stmt.statement),
            Statement::WhileStatement(stmt) => self.generate_names_for_statement(stmt.statement),
            Statement::ForStatement(stmt) => {
                if let Some(ForInitializer::VariableDeclarationList(list)) = &stmt.initializer {
                    for decl in list.declarations {
                        self.generate_names_for_binding(&decl.name);
                    }
                }
                self.generate_names_for_statement(stmt.statement);
            }
            Statement::ForInStatement(stmt) | Statement::ForOfStatement(stmt) => {
                if let ForInitializer::VariableDeclarationList(list) = &stmt.initializer {
                    for decl in list.declarations {
                        self.generate_names_for_binding(&decl.name);
                    }
                }
                self.generate_names_for_statement(stmt.statement);
            }
            Statement::SwitchStatement(stmt) => {
                for clause in stmt.case_block.clauses {
                    self.generate_names_for_statements(clause.statements);
                }
            }
            _ => {}
        }
    }

    pub(crate) fn generate_names_for_binding(&mut self, name: &'a BindingName<'a>) {
        match name {
            BindingName::Identifier(id) => self.generate_name_if_needed(Some(id)),
            BindingName::ObjectBindingPattern(pattern) => {
                for element in pattern.elements {
                    self.generate_names_for_binding(&element.name);
                }
            }
            BindingName::ArrayBindingPattern(pattern) => {
                for element in pattern.elements {
                    if let ArrayBindingElement::BindingElement(element) = element {
                        self.generate_names_for_binding(&element.name);
                    }
                }
            }
        }
    }

    fn generate_name_if_needed(&mut self, name: Option<&Identifier>) {
        if let Some(name) = name.filter(|name| name.is_generated()) {
            self.names.generate_name(name, self.interner);
        }
    }

    // ========================================================================
    // Write helpers
    // ========================================================================

    #[inline]
    pub(crate) fn write(&mut self, s: &str) {
        self.writer.write(s);
    }

    #[inline]
    pub(crate) fn write_keyword(&mut self, s: &str) {
        self.writer.write_keyword(s);
    }

    #[inline]
    pub(crate) fn write_punctuation(&mut self, s: &str) {
        self.writer.write_punctuation(s);
    }

    #[inline]
    pub(crate) fn write_operator(&mut self, s: &str) {
        self.writer.write_operator(s);
    }

    #[inline]
    pub(crate) fn write_literal(&mut self, s: &str) {
        self.writer.write_literal(s);
    }

    #[inline]
    pub(crate) fn write_space(&mut self) {
        self.writer.write_space();
    }

    #[inline]
    pub(crate) fn write_line(&mut self) {
        self.writer.write_line(false);
    }

    pub(crate) fn write_lines(&mut self, count: u32) {
        for i in 0..count {
            self.writer.write_line(i > 0);
        }
    }

    pub(crate) fn write_token(&mut self, kind: SyntaxKind) {
        if let Some(text) = kind.token_text() {
            self.writer.write(text);
        }
    }

    pub(crate) fn write_trailing_semicolon(&mut self) {
        self.writer.write_punctuation(";");
    }
}

fn starts_on_new_line(data: &NodeData, format: ListFormat) -> bool {
    if data.is_synthesized() && data.emit_flags.contains(EmitFlags::STARTS_ON_NEW_LINE) {
        return true;
    }
    format.contains(ListFormat::PREFER_NEW_LINE)
}

/// The leading directives of every bundled file, with the source text up to
/// the last of them.
fn bundled_prologues(bundle: &Bundle<'_>, interner: &StringInterner) -> Option<Vec<SourceFilePrologueInfo>> {
    let mut prologues = Vec::new();
    for (index, file) in bundle.source_files.iter().enumerate() {
        let mut directives = Vec::new();
        let mut end = 0;
        for stmt in file.statements {
            let Some(directive) = stmt.as_prologue_directive() else {
                break;
            };
            let data = stmt.data();
            directives.push(SourceFilePrologueDirective {
                pos: position_value(data.pos()),
                end: position_value(data.end()),
                expression: SourceFilePrologueDirectiveExpression {
                    pos: position_value(directive.data.pos()),
                    end: position_value(directive.data.end()),
                    text: interner.resolve(directive.text).to_string(),
                },
            });
            if !data.is_synthesized() {
                end = end.max(data.end() as usize);
            }
        }
        if !directives.is_empty() {
            prologues.push(SourceFilePrologueInfo {
                file: index,
                text: file.text.get(..end).unwrap_or("").to_string(),
                directives,
            });
        }
    }
    (!prologues.is_empty()).then_some(prologues)
}

/// Synthesized positions are written as `-1`.
fn position_value(pos: u32) -> i64 {
    if pos == u32::MAX {
        -1
    } else {
        i64::from(pos)
    }
}
