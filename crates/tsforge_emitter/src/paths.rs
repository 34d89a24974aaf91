//! Where each input's outputs go.
//!
//! Everything here is a pure function of the compiler options, the file
//! name and the host's directory layout.

use crate::host::EmitHost;
use tsforge_ast::SourceFile;
use tsforge_tsoptions::CompilerOptions;
use tsforge_tspath::{
    change_extension, combine_paths, ensure_trailing_directory_separator, get_normalized_absolute_path,
    normalize_path, paths_are_equal, remove_file_extension, Extension,
};

/// The artifacts one emit unit produces. `None` means the artifact is not
/// written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitFileNames {
    pub js_file_path: Option<String>,
    pub source_map_file_path: Option<String>,
    pub declaration_file_path: Option<String>,
    pub declaration_map_path: Option<String>,
    pub build_info_path: Option<String>,
}

/// Output paths for `file` when every input is emitted on its own.
pub fn get_output_paths_for<'a>(
    file: &SourceFile<'a>,
    options: &CompilerOptions,
    host: &dyn EmitHost<'a>,
    force_dts_paths: bool,
) -> EmitFileNames {
    if file.is_declaration_file {
        return EmitFileNames::default();
    }
    let is_json = file.is_json_file();
    let own_output = get_own_emit_output_file_path(&file.file_name, options, host);
    let emitted_to_same_location = is_json
        && paths_are_equal(
            &get_normalized_absolute_path(&file.file_name, host.current_directory()),
            &get_normalized_absolute_path(&own_output, host.current_directory()),
            host.use_case_sensitive_file_names(),
        );
    let js_file_path = (!options.emit_declaration_only.unwrap_or(false) && !emitted_to_same_location).then_some(own_output);
    let source_map_file_path = match &js_file_path {
        Some(js) if !is_json => get_source_map_file_path(js, options),
        _ => None,
    };
    let declaration_file_path = (force_dts_paths || (options.get_emit_declarations() && !is_json))
        .then(|| get_declaration_emit_output_file_path(&file.file_name, options, host));
    let declaration_map_path = declaration_file_path
        .as_ref()
        .filter(|_| options.get_are_declaration_maps_enabled())
        .map(|dts| format!("{dts}.map"));
    EmitFileNames {
        js_file_path,
        source_map_file_path,
        declaration_file_path,
        declaration_map_path,
        build_info_path: None,
    }
}

/// Output paths when every input goes to the single `outFile`. Returns
/// `None` when no `outFile` is configured.
pub fn get_output_paths_for_bundle(options: &CompilerOptions, force_dts_paths: bool) -> Option<EmitFileNames> {
    let out_path = options.out_file()?;
    let js_file_path = (!options.emit_declaration_only.unwrap_or(false)).then(|| out_path.to_string());
    let source_map_file_path = js_file_path.as_deref().and_then(|js| get_source_map_file_path(js, options));
    let declaration_file_path = (force_dts_paths || options.get_emit_declarations())
        .then(|| format!("{}{}", remove_file_extension(out_path), Extension::Dts.as_str()));
    let declaration_map_path = declaration_file_path
        .as_ref()
        .filter(|_| options.get_are_declaration_maps_enabled())
        .map(|dts| format!("{dts}.map"));
    Some(EmitFileNames {
        js_file_path,
        source_map_file_path,
        declaration_file_path,
        declaration_map_path,
        build_info_path: get_ts_build_info_emit_output_file_path(options),
    })
}

/// `<js>.map`, unless maps are off or inlined.
pub fn get_source_map_file_path(js_file_path: &str, options: &CompilerOptions) -> Option<String> {
    let wanted = options.source_map.unwrap_or(false) && !options.inline_source_map.unwrap_or(false);
    wanted.then(|| format!("{js_file_path}.map"))
}

/// Where the build info record goes, for incremental builds only.
pub fn get_ts_build_info_emit_output_file_path(options: &CompilerOptions) -> Option<String> {
    if !options.is_incremental_compilation() {
        return None;
    }
    if let Some(path) = options.ts_build_info_file.as_deref() {
        return Some(path.to_string());
    }
    let out_path = options.out_file()?;
    Some(change_extension(out_path, Extension::TsBuildInfo.as_str()))
}

/// The JavaScript output path of `file_name`, ignoring whether it is
/// actually written.
pub fn get_own_emit_output_file_path<'a>(file_name: &str, options: &CompilerOptions, host: &dyn EmitHost<'a>) -> String {
    let path = match options.out_dir.as_deref() {
        Some(out_dir) => get_source_file_path_in_new_dir(file_name, out_dir, host),
        None => file_name.to_string(),
    };
    let extension = Extension::from_path(file_name)
        .unwrap_or(Extension::Ts)
        .output_js_extension(options.preserves_jsx());
    format!("{}{}", remove_file_extension(&path), extension.as_str())
}

/// `declarationDir`, falling back to `outDir`, falling back to beside the input.
pub fn get_declaration_emit_output_file_path<'a>(
    file_name: &str,
    options: &CompilerOptions,
    host: &dyn EmitHost<'a>,
) -> String {
    let output_dir = options.declaration_dir.as_deref().or(options.out_dir.as_deref());
    let path = match output_dir {
        Some(dir) => get_source_file_path_in_new_dir(file_name, dir, host),
        None => file_name.to_string(),
    };
    let extension = Extension::from_path(file_name)
        .unwrap_or(Extension::Ts)
        .output_declaration_extension();
    format!("{}{}", remove_file_extension(&path), extension.as_str())
}

/// Re-root `file_name` from the common source directory into `new_dir`,
/// keeping its relative position. Files outside the common directory keep
/// their whole absolute path under `new_dir`.
pub fn get_source_file_path_in_new_dir<'a>(file_name: &str, new_dir: &str, host: &dyn EmitHost<'a>) -> String {
    let current_directory = host.current_directory();
    let source_path = get_normalized_absolute_path(file_name, current_directory);
    let common = ensure_trailing_directory_separator(&host.common_source_directory());
    let relative = if starts_with_path(&source_path, &common, host.use_case_sensitive_file_names()) {
        &source_path[common.len()..]
    } else {
        source_path.as_str()
    };
    normalize_path(&combine_paths(new_dir, relative))
}

fn starts_with_path(path: &str, prefix: &str, use_case_sensitive_file_names: bool) -> bool {
    match path.get(..prefix.len()) {
        Some(head) => paths_are_equal(head, prefix, use_case_sensitive_file_names),
        None => false,
    }
}
