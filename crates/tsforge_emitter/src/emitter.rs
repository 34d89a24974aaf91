//! Drives the printer over every emit unit and hands the text to the host.

use crate::build_info::{BuildInfo, BundleBuildInfo};
use crate::host::EmitHost;
use crate::paths::{get_output_paths_for, get_output_paths_for_bundle, get_source_file_path_in_new_dir, EmitFileNames};
use tracing::{debug, warn};
use tsforge_ast::{Bundle, SourceFile};
use tsforge_diagnostics::{messages, Diagnostic, DiagnosticCollection};
use tsforge_printer::{
    BundleFileInfo, EmitResolver, NoopHandlers, PrintOutput, Printer, PrinterOptions, SourceMapTarget,
};
use tsforge_sourcemap::{source_mapping_url_comment, SourceMapGenerator};
use tsforge_tsoptions::CompilerOptions;
use tsforge_tspath::{
    combine_paths, ensure_path_is_non_module_name, ensure_trailing_directory_separator, get_base_file_name,
    get_directory_path, get_normalized_absolute_path, get_relative_path_from_directory,
    get_relative_path_to_directory_or_url, get_root_length, is_declaration_file_name, normalize_path, normalize_slashes,
    paths_are_equal,
};

/// Which artifacts an emit call should produce.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmitOptions {
    /// Write declaration outputs only.
    pub only_declarations: bool,
    /// Compute declaration paths even when `declaration` is off.
    pub force_declarations: bool,
}

#[derive(Debug, Default)]
pub struct EmitResult {
    /// Set when an artifact that should have been written was not.
    pub emit_skipped: bool,
    pub diagnostics: DiagnosticCollection,
    /// Paths written, in write order.
    pub emitted_files: Vec<String>,
}

/// Emit every emit unit of the host's program: one bundle in `outFile`
/// mode, otherwise one unit per non-declaration input.
pub fn emit_files<'a>(host: &dyn EmitHost<'a>, resolver: &dyn EmitResolver, emit: EmitOptions) -> EmitResult {
    let options = host.compiler_options();
    let mut emitter = Emitter {
        host,
        resolver,
        options,
        emit,
        result: EmitResult::default(),
    };
    if options.no_emit.unwrap_or(false) {
        emitter.result.emit_skipped = true;
        return emitter.result;
    }

    let files: Vec<&'a SourceFile<'a>> = host
        .source_files()
        .iter()
        .copied()
        .filter(|file| !file.is_declaration_file)
        .collect();
    match get_output_paths_for_bundle(options, emit.force_declarations) {
        Some(paths) => emitter.emit_bundle(&files, &paths),
        None => {
            for &file in &files {
                let paths = get_output_paths_for(file, options, host, emit.force_declarations);
                emitter.emit_file(file, &paths);
            }
        }
    }
    debug!(
        written = emitter.result.emitted_files.len(),
        skipped = emitter.result.emit_skipped,
        diagnostics = emitter.result.diagnostics.len(),
        "emit finished"
    );
    emitter.result
}

#[derive(Clone, Copy)]
enum EmitUnit<'u, 'a> {
    File(&'a SourceFile<'a>),
    Bundle(&'u Bundle<'a>),
}

struct Emitter<'h, 'a> {
    host: &'h dyn EmitHost<'a>,
    resolver: &'h dyn EmitResolver,
    options: &'h CompilerOptions,
    emit: EmitOptions,
    result: EmitResult,
}

impl<'h, 'a> Emitter<'h, 'a> {
    fn emit_file(&mut self, file: &'a SourceFile<'a>, paths: &EmitFileNames) {
        let names = [file.file_name.as_str()];
        if let Some(js_path) = paths.js_file_path.as_deref() {
            if !self.emit.only_declarations && self.can_write(js_path) {
                let tree = self.host.transformed_file(file);
                self.print_and_write(
                    EmitUnit::File(tree),
                    js_path,
                    paths.source_map_file_path.as_deref(),
                    self.js_printer_options(false),
                    &names,
                );
            }
        }
        if let Some(dts_path) = paths.declaration_file_path.as_deref() {
            if let Some(tree) = self.host.declaration_file(file) {
                if self.can_write(dts_path) {
                    self.print_and_write(
                        EmitUnit::File(tree),
                        dts_path,
                        paths.declaration_map_path.as_deref(),
                        self.declaration_printer_options(false),
                        &names,
                    );
                }
            }
        }
    }

    fn emit_bundle(&mut self, files: &[&'a SourceFile<'a>], paths: &EmitFileNames) {
        let names: Vec<&str> = files.iter().map(|file| file.file_name.as_str()).collect();
        let record = paths.build_info_path.is_some();
        let mut js_info = None;
        let mut dts_info = None;

        if let Some(js_path) = paths.js_file_path.as_deref() {
            if !self.emit.only_declarations && self.can_write(js_path) {
                let transformed = files.iter().map(|&file| self.host.transformed_file(file)).collect();
                let bundle = Bundle {
                    source_files: transformed,
                    prepends: self.host.prepends(),
                };
                js_info = self.print_and_write(
                    EmitUnit::Bundle(&bundle),
                    js_path,
                    paths.source_map_file_path.as_deref(),
                    self.js_printer_options(record),
                    &names,
                );
            }
        }

        if let Some(dts_path) = paths.declaration_file_path.as_deref() {
            let declarations: Vec<_> = files.iter().filter_map(|&file| self.host.declaration_file(file)).collect();
            if !declarations.is_empty() && self.can_write(dts_path) {
                let bundle = Bundle {
                    source_files: declarations,
                    prepends: self.host.prepends(),
                };
                dts_info = self.print_and_write(
                    EmitUnit::Bundle(&bundle),
                    dts_path,
                    paths.declaration_map_path.as_deref(),
                    self.declaration_printer_options(record),
                    &names,
                );
            }
        }

        if let Some(build_info_path) = paths.build_info_path.as_deref() {
            if self.result.emit_skipped || !self.can_write(build_info_path) {
                return;
            }
            let bundle = self.bundle_build_info(build_info_path, files, js_info, dts_info);
            let text = BuildInfo::new(Some(bundle)).to_json();
            self.write(build_info_path, &text, false, &names);
        }
    }

    fn bundle_build_info(
        &self,
        build_info_path: &str,
        files: &[&'a SourceFile<'a>],
        js: Option<BundleFileInfo>,
        dts: Option<BundleFileInfo>,
    ) -> BundleBuildInfo {
        let current_directory = self.host.current_directory();
        let case_sensitive = self.host.use_case_sensitive_file_names();
        let directory = get_directory_path(&get_normalized_absolute_path(build_info_path, current_directory));
        let relative = |path: &str| {
            let absolute = get_normalized_absolute_path(path, current_directory);
            ensure_path_is_non_module_name(&get_relative_path_from_directory(&directory, &absolute, case_sensitive))
        };
        BundleBuildInfo {
            common_source_directory: relative(&self.host.common_source_directory()),
            source_files: files.iter().map(|file| relative(&file.file_name)).collect(),
            js,
            dts,
        }
    }

    // ========================================================================
    // Printing and writing
    // ========================================================================

    /// Whether `path` may be written. Blocked paths and paths of inputs
    /// mark the emit as skipped.
    fn can_write(&mut self, path: &str) -> bool {
        if self.host.is_emit_blocked(path) {
            debug!(path, "emit blocked");
            self.result.emit_skipped = true;
            return false;
        }
        let current_directory = self.host.current_directory();
        let case_sensitive = self.host.use_case_sensitive_file_names();
        let output = get_normalized_absolute_path(path, current_directory);
        let overwrites_input = self.host.source_files().iter().any(|file| {
            paths_are_equal(
                &get_normalized_absolute_path(&file.file_name, current_directory),
                &output,
                case_sensitive,
            )
        });
        if overwrites_input {
            self.result
                .diagnostics
                .add(Diagnostic::new(&messages::CANNOT_WRITE_FILE_0_BECAUSE_IT_WOULD_OVERWRITE_INPUT_FILE, &[path]));
            self.result.emit_skipped = true;
            return false;
        }
        true
    }

    fn js_printer_options(&self, record_bundle_info: bool) -> PrinterOptions {
        PrinterOptions {
            strip_types: true,
            strip_internal: false,
            ..self.base_printer_options(record_bundle_info)
        }
    }

    fn declaration_printer_options(&self, record_bundle_info: bool) -> PrinterOptions {
        PrinterOptions {
            strip_types: false,
            strip_internal: self.options.strip_internal.unwrap_or(false),
            ..self.base_printer_options(record_bundle_info)
        }
    }

    fn base_printer_options(&self, record_bundle_info: bool) -> PrinterOptions {
        let options = self.options;
        PrinterOptions {
            new_line: options.get_new_line_character(),
            remove_comments: options.remove_comments.unwrap_or(false),
            no_emit_helpers: options.no_emit_helpers.unwrap_or(false),
            import_helpers: options.import_helpers.unwrap_or(false),
            inline_sources: options.inline_sources.unwrap_or(false),
            write_bundle_file_info: record_bundle_info,
            ..PrinterOptions::default()
        }
    }

    /// Print one unit, append its `sourceMappingURL` and write the text and
    /// map. Returns the bundle sections the printer recorded.
    fn print_and_write(
        &mut self,
        unit: EmitUnit<'_, 'a>,
        path: &str,
        map_path: Option<&str>,
        printer_options: PrinterOptions,
        source_names: &[&str],
    ) -> Option<BundleFileInfo> {
        let new_line = printer_options.new_line;
        let target = self.source_map_target(path, &unit);
        let mut printer = Printer::new(self.host.interner(), printer_options, self.resolver, Box::new(NoopHandlers));
        let PrintOutput {
            mut text,
            source_map,
            bundle_file_info,
        } = match unit {
            EmitUnit::File(file) => printer.write_file(file, target),
            EmitUnit::Bundle(bundle) => printer.write_bundle(bundle, target),
        };

        if let Some(generator) = source_map {
            let inline = !is_declaration_file_name(path) && self.options.inline_source_map.unwrap_or(false);
            let url = if inline {
                Some(generator.to_data_url())
            } else {
                map_path.map(|map_path| self.source_mapping_url(path, map_path, &unit))
            };
            if let Some(url) = url {
                if !text.is_empty() && !text.ends_with(new_line) {
                    text.push_str(new_line);
                }
                text.push_str(&source_mapping_url_comment(&url));
            }
            if let Some(map_path) = map_path {
                self.write(map_path, &generator.to_json(), false, source_names);
            }
        }

        let bom = self.options.emit_bom.unwrap_or(false);
        self.write(path, &text, bom, source_names);
        bundle_file_info
    }

    fn write(&mut self, path: &str, text: &str, write_byte_order_mark: bool, source_names: &[&str]) {
        match self.host.write_file(path, text, write_byte_order_mark, source_names) {
            Ok(()) => {
                debug!(path, bytes = text.len(), "wrote output");
                self.result.emitted_files.push(path.to_string());
            }
            Err(err) => {
                warn!(path, error = %err, "could not write output");
                self.result.diagnostics.add(err.to_diagnostic());
            }
        }
    }

    // ========================================================================
    // Source maps
    // ========================================================================

    fn source_map_target(&self, path: &str, unit: &EmitUnit<'_, 'a>) -> Option<SourceMapTarget> {
        let options = self.options;
        let enabled = if is_declaration_file_name(path) {
            options.get_are_declaration_maps_enabled()
        } else {
            options.source_map.unwrap_or(false) || options.inline_source_map.unwrap_or(false)
        };
        if !enabled {
            return None;
        }
        if let EmitUnit::File(file) = unit {
            if file.is_json_file() {
                return None;
            }
        }

        let current_directory = self.host.current_directory();
        let source_root = normalize_slashes(options.source_root.as_deref().unwrap_or(""));
        let source_root = ensure_trailing_directory_separator(&source_root);
        let generator = SourceMapGenerator::new(get_base_file_name(&normalize_slashes(path)).to_string())
            .with_source_root(source_root);
        let directory = self.source_map_directory(path, unit);
        Some(SourceMapTarget {
            generator,
            sources_directory: get_normalized_absolute_path(&directory, current_directory),
            current_directory: current_directory.to_string(),
            use_case_sensitive_file_names: self.host.use_case_sensitive_file_names(),
        })
    }

    /// The directory map sources are written relative to.
    fn source_map_directory(&self, path: &str, unit: &EmitUnit<'_, 'a>) -> String {
        if self.options.source_root.as_deref().is_some_and(|root| !root.is_empty()) {
            return self.host.common_source_directory();
        }
        if let Some(map_root) = self.map_root_directory(unit) {
            return map_root;
        }
        get_directory_path(&normalize_path(path))
    }

    /// `mapRoot` re-rooted for `unit`, when set.
    fn map_root_directory(&self, unit: &EmitUnit<'_, 'a>) -> Option<String> {
        let map_root = self.options.map_root.as_deref().filter(|root| !root.is_empty())?;
        let mut directory = normalize_slashes(map_root);
        if let EmitUnit::File(file) = unit {
            directory = get_directory_path(&get_source_file_path_in_new_dir(&file.file_name, &directory, self.host));
        }
        if get_root_length(&directory) == 0 {
            directory = combine_paths(&self.host.common_source_directory(), &directory);
        }
        Some(directory)
    }

    /// The URL the output uses to find its map file.
    fn source_mapping_url(&self, path: &str, map_path: &str, unit: &EmitUnit<'_, 'a>) -> String {
        let map_file = get_base_file_name(&normalize_slashes(map_path)).to_string();
        let Some(map_root) = self.options.map_root.as_deref().filter(|root| !root.is_empty()) else {
            return map_file;
        };
        let directory = self.map_root_directory(unit).unwrap_or_else(|| normalize_slashes(map_root));
        let map_location = combine_paths(&directory, &map_file);
        if get_root_length(&normalize_slashes(map_root)) == 0 {
            let current_directory = self.host.current_directory();
            let output_directory = get_normalized_absolute_path(&get_directory_path(&normalize_path(path)), current_directory);
            let target = get_normalized_absolute_path(&map_location, current_directory);
            return get_relative_path_to_directory_or_url(
                &output_directory,
                &target,
                self.host.use_case_sensitive_file_names(),
            );
        }
        map_location
    }
}
