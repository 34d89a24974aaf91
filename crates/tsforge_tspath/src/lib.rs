//! tsforge_tspath: Path arithmetic for output-path computation.
//!
//! Paths are plain `/`-separated strings. Nothing here touches the file
//! system; the emitter combines these helpers with the host's current
//! directory and case-sensitivity flag.

/// File extensions the emitter distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    Ts,
    Tsx,
    Dts,
    Js,
    Jsx,
    Json,
    TsBuildInfo,
    Mjs,
    Mts,
    Dmts,
    Cjs,
    Cts,
    Dcts,
}

impl Extension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Extension::Ts => ".ts",
            Extension::Tsx => ".tsx",
            Extension::Dts => ".d.ts",
            Extension::Js => ".js",
            Extension::Jsx => ".jsx",
            Extension::Json => ".json",
            Extension::TsBuildInfo => ".tsbuildinfo",
            Extension::Mjs => ".mjs",
            Extension::Mts => ".mts",
            Extension::Dmts => ".d.mts",
            Extension::Cjs => ".cjs",
            Extension::Cts => ".cts",
            Extension::Dcts => ".d.cts",
        }
    }

    pub fn is_declaration(&self) -> bool {
        matches!(self, Extension::Dts | Extension::Dmts | Extension::Dcts)
    }

    /// The extension of the JavaScript output for a file with this extension.
    pub fn output_js_extension(&self, preserve_jsx: bool) -> Extension {
        match self {
            Extension::Mts | Extension::Mjs => Extension::Mjs,
            Extension::Cts | Extension::Cjs => Extension::Cjs,
            Extension::Json => Extension::Json,
            Extension::Tsx | Extension::Jsx if preserve_jsx => Extension::Jsx,
            _ => Extension::Js,
        }
    }

    /// The extension of the declaration output for a file with this extension.
    pub fn output_declaration_extension(&self) -> Extension {
        match self {
            Extension::Mts | Extension::Mjs | Extension::Dmts => Extension::Dmts,
            Extension::Cts | Extension::Cjs | Extension::Dcts => Extension::Dcts,
            _ => Extension::Dts,
        }
    }

    /// The extension of `path`, matching the longest known suffix.
    pub fn from_path(path: &str) -> Option<Extension> {
        const BY_LENGTH: [Extension; 13] = [
            Extension::TsBuildInfo,
            Extension::Dmts,
            Extension::Dcts,
            Extension::Dts,
            Extension::Json,
            Extension::Tsx,
            Extension::Jsx,
            Extension::Mts,
            Extension::Cts,
            Extension::Mjs,
            Extension::Cjs,
            Extension::Ts,
            Extension::Js,
        ];
        BY_LENGTH.into_iter().find(|ext| ends_with_ignore_ascii_case(path, ext.as_str()))
    }
}

fn ends_with_ignore_ascii_case(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len()
        && s.is_char_boundary(s.len() - suffix.len())
        && s[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

#[inline]
pub fn is_directory_separator(ch: char) -> bool {
    ch == '/' || ch == '\\'
}

pub fn normalize_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Length of the root of `path` (`/`, `c:/`, `//server/`), or 0 for a relative path.
pub fn get_root_length(path: &str) -> usize {
    let bytes = path.as_bytes();
    match bytes {
        [] => 0,
        [b'/' | b'\\', b'/' | b'\\', rest @ ..] => {
            // UNC: //server/share/
            let server_end = rest.iter().position(|&b| b == b'/' || b == b'\\');
            match server_end {
                Some(i) => 2 + i + 1,
                None => path.len(),
            }
        }
        [b'/' | b'\\', ..] => 1,
        [drive, b':', b'/' | b'\\', ..] if drive.is_ascii_alphabetic() => 3,
        [drive, b':'] if drive.is_ascii_alphabetic() => 2,
        _ => 0,
    }
}

pub fn is_rooted(path: &str) -> bool {
    get_root_length(path) > 0
}

/// Split `path` into its root followed by its non-empty segments.
pub fn get_path_components(path: &str) -> Vec<String> {
    let path = normalize_slashes(path);
    let root_len = get_root_length(&path);
    let mut components = vec![path[..root_len].to_string()];
    components.extend(path[root_len..].split('/').filter(|s| !s.is_empty()).map(str::to_string));
    components
}

/// Resolve `.` and `..` segments. `..` never climbs above the root.
pub fn reduce_path_components(components: Vec<String>) -> Vec<String> {
    let mut iter = components.into_iter();
    let root = iter.next().unwrap_or_default();
    let mut reduced = vec![root];
    for component in iter {
        match component.as_str() {
            "." => {}
            ".." => {
                if reduced.len() > 1 && reduced.last().is_some_and(|c| c != "..") {
                    reduced.pop();
                } else if reduced[0].is_empty() {
                    reduced.push(component);
                }
            }
            _ => reduced.push(component),
        }
    }
    reduced
}

pub fn get_path_from_path_components(components: &[String]) -> String {
    match components.split_first() {
        None => String::new(),
        Some((root, rest)) => {
            let root = if root.is_empty() || root.ends_with('/') {
                root.clone()
            } else {
                format!("{}/", root)
            };
            format!("{}{}", root, rest.join("/"))
        }
    }
}

/// Forward slashes, with `.` and `..` resolved. A trailing separator is kept.
pub fn normalize_path(path: &str) -> String {
    let slashed = normalize_slashes(path);
    let trailing = slashed.len() > 1 && slashed.ends_with('/');
    let mut normalized = get_path_from_path_components(&reduce_path_components(get_path_components(&slashed)));
    if trailing && !normalized.ends_with('/') && !normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}

pub fn combine_paths(base: &str, relative: &str) -> String {
    if is_rooted(relative) || base.is_empty() {
        return normalize_slashes(relative);
    }
    if relative.is_empty() {
        return normalize_slashes(base);
    }
    format!("{}{}", ensure_trailing_directory_separator(&normalize_slashes(base)), normalize_slashes(relative))
}

/// `combine_paths` followed by `normalize_path`.
pub fn resolve_path(base: &str, relative: &str) -> String {
    normalize_path(&combine_paths(base, relative))
}

/// `file_name` made absolute against `current_directory`.
pub fn get_normalized_absolute_path(file_name: &str, current_directory: &str) -> String {
    resolve_path(current_directory, file_name)
}

/// Everything before the last separator, without the separator.
pub fn get_directory_path(path: &str) -> String {
    let path = normalize_slashes(path);
    let root_len = get_root_length(&path);
    let path = remove_trailing_directory_separator(&path);
    match path.rfind('/') {
        Some(i) if i >= root_len => path[..i.max(root_len)].to_string(),
        _ => path[..root_len.min(path.len())].to_string(),
    }
}

pub fn get_base_file_name(path: &str) -> &str {
    let path = remove_trailing_directory_separator(path);
    match path.rfind(is_directory_separator) {
        Some(i) => &path[i + 1..],
        None => path,
    }
}

pub fn ensure_trailing_directory_separator(path: &str) -> String {
    if path.is_empty() || path.ends_with(is_directory_separator) {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

pub fn remove_trailing_directory_separator(path: &str) -> &str {
    if path.len() > 1 && path.ends_with(is_directory_separator) && get_root_length(path) != path.len() {
        &path[..path.len() - 1]
    } else {
        path
    }
}

pub fn file_extension_is(path: &str, extension: &str) -> bool {
    ends_with_ignore_ascii_case(path, extension)
}

pub fn file_extension_is_one_of(path: &str, extensions: &[&str]) -> bool {
    extensions.iter().any(|ext| file_extension_is(path, ext))
}

pub fn is_declaration_file_name(path: &str) -> bool {
    Extension::from_path(path).is_some_and(|ext| ext.is_declaration())
}

/// `path` without its known extension.
pub fn remove_file_extension(path: &str) -> &str {
    match Extension::from_path(path) {
        Some(ext) => &path[..path.len() - ext.as_str().len()],
        None => path,
    }
}

/// Replace the known extension of `path` with `new_extension`.
pub fn change_extension(path: &str, new_extension: &str) -> String {
    format!("{}{}", remove_file_extension(path), new_extension)
}

fn to_comparable(path: &str, use_case_sensitive_file_names: bool) -> String {
    if use_case_sensitive_file_names {
        path.to_string()
    } else {
        path.to_lowercase()
    }
}

/// Whether two normalized paths name the same file.
pub fn paths_are_equal(a: &str, b: &str, use_case_sensitive_file_names: bool) -> bool {
    to_comparable(a, use_case_sensitive_file_names) == to_comparable(b, use_case_sensitive_file_names)
}

/// Whether `child` lies under `parent` (or is `parent`).
pub fn contains_path(parent: &str, child: &str, use_case_sensitive_file_names: bool) -> bool {
    let parent = get_path_components(&normalize_path(parent));
    let child = get_path_components(&normalize_path(child));
    if child.len() < parent.len() {
        return false;
    }
    parent
        .iter()
        .zip(&child)
        .all(|(p, c)| paths_are_equal(p, c, use_case_sensitive_file_names))
}

/// The relative path from directory `from` to `to`, `/`-separated.
pub fn get_relative_path_from_directory(from: &str, to: &str, use_case_sensitive_file_names: bool) -> String {
    let from_components = reduce_path_components(get_path_components(from));
    let to_components = reduce_path_components(get_path_components(to));
    if !paths_are_equal(&from_components[0], &to_components[0], use_case_sensitive_file_names) {
        return get_path_from_path_components(&to_components);
    }
    let common = from_components
        .iter()
        .zip(&to_components)
        .skip(1)
        .take_while(|(a, b)| paths_are_equal(a, b, use_case_sensitive_file_names))
        .count()
        + 1;
    let mut relative: Vec<&str> = vec![".."; from_components.len() - common];
    relative.extend(to_components[common..].iter().map(String::as_str));
    relative.join("/")
}

/// Like [`get_relative_path_from_directory`], for source-map URLs: a path
/// that stays absolute becomes a `file://` URL.
pub fn get_relative_path_to_directory_or_url(from: &str, to: &str, use_case_sensitive_file_names: bool) -> String {
    let relative = get_relative_path_from_directory(from, to, use_case_sensitive_file_names);
    if !is_rooted(&relative) {
        return relative;
    }
    if relative.starts_with('/') {
        format!("file://{}", relative)
    } else {
        format!("file:///{}", relative)
    }
}

/// `path` prefixed with `./` unless it is rooted or already starts with `.`.
pub fn ensure_path_is_non_module_name(path: &str) -> String {
    if is_rooted(path) || path.starts_with('.') {
        path.to_string()
    } else {
        format!("./{}", path)
    }
}

/// The longest directory containing every file in `file_names`.
///
/// Returns a path with a trailing separator, or an empty string when the
/// files share no root.
pub fn compute_common_source_directory<'s>(
    file_names: impl IntoIterator<Item = &'s str>,
    current_directory: &str,
    use_case_sensitive_file_names: bool,
) -> String {
    let mut common: Option<Vec<String>> = None;
    for file_name in file_names {
        let absolute = get_normalized_absolute_path(file_name, current_directory);
        let mut components = get_path_components(&absolute);
        // Drop the file name itself.
        components.pop();
        common = Some(match common {
            None => components,
            Some(existing) => {
                if !paths_are_equal(&existing[0], &components[0], use_case_sensitive_file_names) {
                    return String::new();
                }
                let shared = existing
                    .iter()
                    .zip(&components)
                    .take_while(|(a, b)| paths_are_equal(a, b, use_case_sensitive_file_names))
                    .count();
                existing.into_iter().take(shared).collect()
            }
        });
    }
    match common {
        Some(components) if !components.is_empty() => {
            ensure_trailing_directory_separator(&get_path_from_path_components(&components))
        }
        _ => ensure_trailing_directory_separator(&normalize_path(current_directory)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_prefers_longest_suffix() {
        assert_eq!(Extension::from_path("a.d.ts"), Some(Extension::Dts));
        assert_eq!(Extension::from_path("a.D.MTS"), Some(Extension::Dmts));
        assert_eq!(Extension::from_path("a.tsx"), Some(Extension::Tsx));
        assert_eq!(Extension::from_path("a.tsbuildinfo"), Some(Extension::TsBuildInfo));
        assert_eq!(Extension::from_path("a.txt"), None);
    }

    #[test]
    fn test_output_extensions() {
        assert_eq!(Extension::Tsx.output_js_extension(true), Extension::Jsx);
        assert_eq!(Extension::Tsx.output_js_extension(false), Extension::Js);
        assert_eq!(Extension::Mts.output_js_extension(false), Extension::Mjs);
        assert_eq!(Extension::Cts.output_declaration_extension(), Extension::Dcts);
    }

    #[test]
    fn test_normalize_path_resolves_dots() {
        assert_eq!(normalize_path("a\\b\\..\\c"), "a/c");
        assert_eq!(normalize_path("/a/./b/../../c"), "/c");
        assert_eq!(normalize_path("/../a"), "/a");
        assert_eq!(normalize_path("../a/b"), "../a/b");
        assert_eq!(normalize_path("c:\\src\\x.ts"), "c:/src/x.ts");
        assert_eq!(normalize_path("/out/"), "/out/");
    }

    #[test]
    fn test_directory_and_base_name() {
        assert_eq!(get_directory_path("/a/b/c.ts"), "/a/b");
        assert_eq!(get_directory_path("/c.ts"), "/");
        assert_eq!(get_directory_path("c.ts"), "");
        assert_eq!(get_base_file_name("/a/b/c.ts"), "c.ts");
    }

    #[test]
    fn test_change_extension() {
        assert_eq!(change_extension("/src/a.ts", ".js"), "/src/a.js");
        assert_eq!(change_extension("/src/a.d.ts", ".js"), "/src/a.js");
        assert_eq!(change_extension("/out/bundle.js", ".d.ts"), "/out/bundle.d.ts");
    }

    #[test]
    fn test_relative_paths() {
        assert_eq!(get_relative_path_from_directory("/out", "/src/a.ts", true), "../src/a.ts");
        assert_eq!(get_relative_path_from_directory("/src", "/src/lib/a.ts", true), "lib/a.ts");
        assert_eq!(get_relative_path_from_directory("/SRC", "/src/a.ts", false), "a.ts");
        assert_eq!(get_relative_path_to_directory_or_url("/src", "/src/a.ts", true), "a.ts");
        assert_eq!(get_relative_path_to_directory_or_url("c:/out", "d:/src/a.ts", true), "file:///d:/src/a.ts");
        assert_eq!(ensure_path_is_non_module_name("a.ts"), "./a.ts");
        assert_eq!(ensure_path_is_non_module_name("../a.ts"), "../a.ts");
    }

    #[test]
    fn test_common_source_directory() {
        let files = ["/p/src/a.ts", "/p/src/lib/b.ts"];
        assert_eq!(compute_common_source_directory(files, "/p", true), "/p/src/");
        let relative = ["src/a.ts", "test/b.ts"];
        assert_eq!(compute_common_source_directory(relative, "/p", true), "/p/");
    }

    #[test]
    fn test_contains_path() {
        assert!(contains_path("/p/src", "/p/src/a.ts", true));
        assert!(!contains_path("/p/src", "/p/test/a.ts", true));
        assert!(contains_path("/P/Src", "/p/src/a.ts", false));
    }
}
