//! tsforge_tsoptions: tsconfig.json parsing and the compiler options that
//! drive binding and emit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while reading a tsconfig file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse tsconfig: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown value '{value}' for option '{option}'")]
    UnknownValue { option: &'static str, value: String },

    #[error("unterminated block comment in tsconfig")]
    UnterminatedComment,
}

/// Compiler options, matching the tsconfig.json `compilerOptions` schema.
///
/// Every field is optional; the helper methods supply the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    // -- Language and module --
    pub target: Option<ScriptTarget>,
    pub module: Option<ModuleKind>,
    pub jsx: Option<JsxEmit>,
    pub allow_js: Option<bool>,
    pub isolated_modules: Option<bool>,

    // -- Output locations --
    pub out_file: Option<String>,
    /// Deprecated spelling of `outFile`.
    pub out: Option<String>,
    pub out_dir: Option<String>,
    pub root_dir: Option<String>,
    pub declaration_dir: Option<String>,
    pub ts_build_info_file: Option<String>,

    // -- What to emit --
    pub declaration: Option<bool>,
    pub declaration_map: Option<bool>,
    pub emit_declaration_only: Option<bool>,
    pub no_emit: Option<bool>,
    pub no_emit_helpers: Option<bool>,
    pub import_helpers: Option<bool>,
    pub remove_comments: Option<bool>,
    pub preserve_const_enums: Option<bool>,
    pub strip_internal: Option<bool>,
    pub composite: Option<bool>,
    pub incremental: Option<bool>,

    // -- Source maps --
    pub source_map: Option<bool>,
    pub inline_source_map: Option<bool>,
    pub inline_sources: Option<bool>,
    pub source_root: Option<String>,
    pub map_root: Option<String>,

    // -- Text formatting --
    pub new_line: Option<NewLineKind>,
    #[serde(rename = "emitBOM")]
    pub emit_bom: Option<bool>,

    // -- Checks performed by the binder --
    pub strict: Option<bool>,
    pub always_strict: Option<bool>,
    pub no_implicit_use_strict: Option<bool>,
    pub allow_unreachable_code: Option<bool>,
    pub allow_unused_labels: Option<bool>,
    pub no_fallthrough_cases_in_switch: Option<bool>,
}

impl CompilerOptions {
    /// The language version output is produced for. Defaults to ES5.
    pub fn get_emit_script_target(&self) -> ScriptTarget {
        self.target.unwrap_or(ScriptTarget::ES5)
    }

    pub fn get_emit_module_kind(&self) -> ModuleKind {
        self.module.unwrap_or(if self.get_emit_script_target() >= ScriptTarget::ES2015 {
            ModuleKind::ES2015
        } else {
            ModuleKind::CommonJS
        })
    }

    /// `alwaysStrict` falls back to `strict`.
    pub fn get_strict_option_value(&self) -> bool {
        self.always_strict.or(self.strict).unwrap_or(false)
    }

    pub fn should_preserve_const_enums(&self) -> bool {
        self.preserve_const_enums.unwrap_or(false) || self.isolated_modules.unwrap_or(false)
    }

    /// Severity of unreachable-code reports, or `None` when they are suppressed.
    pub fn unreachable_code_is_error(&self) -> Option<bool> {
        report_severity(self.allow_unreachable_code)
    }

    /// Severity of unused-label reports, or `None` when they are suppressed.
    pub fn unused_label_is_error(&self) -> Option<bool> {
        report_severity(self.allow_unused_labels)
    }

    pub fn get_new_line_character(&self) -> &'static str {
        match self.new_line {
            Some(NewLineKind::CarriageReturnLineFeed) => "\r\n",
            _ => "\n",
        }
    }

    /// `outFile`, falling back to the deprecated `out`.
    pub fn out_file(&self) -> Option<&str> {
        self.out_file.as_deref().or(self.out.as_deref()).filter(|s| !s.is_empty())
    }

    pub fn get_are_declaration_maps_enabled(&self) -> bool {
        self.declaration_map.unwrap_or(false) && self.get_emit_declarations()
    }

    pub fn get_emit_declarations(&self) -> bool {
        self.declaration.unwrap_or(false) || self.composite.unwrap_or(false)
    }

    pub fn is_incremental_compilation(&self) -> bool {
        self.incremental.unwrap_or(false) || self.composite.unwrap_or(false)
    }

    pub fn preserves_jsx(&self) -> bool {
        self.jsx == Some(JsxEmit::Preserve)
    }
}

/// Unset: report as a suggestion. `false`: report as an error. `true`: do not report.
fn report_severity(allow: Option<bool>) -> Option<bool> {
    match allow {
        None => Some(false),
        Some(false) => Some(true),
        Some(true) => None,
    }
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $option:literal {
            $($variant:ident => [$($spelling:literal),+]),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => string_enum!(@first $($spelling),+)),+
                }
            }
        }

        impl FromStr for $name {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lower = s.to_ascii_lowercase();
                $(
                    if [$($spelling),+].contains(&lower.as_str()) {
                        return Ok($name::$variant);
                    }
                )+
                Err(ConfigError::UnknownValue { option: $option, value: s.to_string() })
            }
        }

        impl TryFrom<String> for $name {
            type Error = ConfigError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
    (@first $first:literal $(, $rest:literal)*) => { $first };
}

string_enum! {
    /// Script target version. Ordered, so `target < ScriptTarget::ES2015` reads naturally.
    pub enum ScriptTarget as "target" {
        ES3 => ["es3"],
        ES5 => ["es5"],
        ES2015 => ["es2015", "es6"],
        ES2016 => ["es2016"],
        ES2017 => ["es2017"],
        ES2018 => ["es2018"],
        ES2019 => ["es2019"],
        ES2020 => ["es2020"],
        ES2021 => ["es2021"],
        ES2022 => ["es2022"],
        ES2023 => ["es2023"],
        ES2024 => ["es2024"],
        ESNext => ["esnext", "latest"],
    }
}

string_enum! {
    pub enum ModuleKind as "module" {
        None => ["none"],
        CommonJS => ["commonjs"],
        AMD => ["amd"],
        UMD => ["umd"],
        System => ["system"],
        ES2015 => ["es2015", "es6"],
        ES2020 => ["es2020"],
        ES2022 => ["es2022"],
        ESNext => ["esnext"],
        Node16 => ["node16"],
        NodeNext => ["nodenext"],
        Preserve => ["preserve"],
    }
}

string_enum! {
    pub enum JsxEmit as "jsx" {
        None => ["none"],
        Preserve => ["preserve"],
        React => ["react"],
        ReactNative => ["react-native"],
        ReactJSX => ["react-jsx"],
        ReactJSXDev => ["react-jsxdev"],
    }
}

string_enum! {
    pub enum NewLineKind as "newLine" {
        CarriageReturnLineFeed => ["crlf"],
        LineFeed => ["lf"],
    }
}

/// The tsconfig.json file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    #[serde(default)]
    pub compiler_options: CompilerOptions,
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub files: Option<Vec<String>>,
    pub extends: Option<String>,
    pub references: Option<Vec<ProjectReference>>,
}

/// A project reference in tsconfig.json.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectReference {
    pub path: String,
    #[serde(default)]
    pub prepend: bool,
    #[serde(default)]
    pub circular: bool,
}

/// Parse tsconfig.json text. Comments and trailing commas are accepted.
pub fn parse_tsconfig(content: &str) -> Result<TsConfig, ConfigError> {
    let json = strip_json_comments(content)?;
    let config: TsConfig = serde_json::from_str(&json)?;
    tracing::debug!(
        target = ?config.compiler_options.target,
        out_file = ?config.compiler_options.out_file(),
        "parsed tsconfig"
    );
    Ok(config)
}

/// Replace `//` and `/* */` comments with whitespace and drop trailing
/// commas before `}` or `]`. String contents are left untouched.
fn strip_json_comments(content: &str) -> Result<String, ConfigError> {
    let bytes = content.as_bytes();
    let mut out = String::with_capacity(content.len());
    let mut i = 0;
    let mut copied = 0;
    let mut pending_comma: Option<usize> = None;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                pending_comma = None;
                i += 1;
                while i < bytes.len() && bytes[i] != b'"' {
                    i += if bytes[i] == b'\\' { 2 } else { 1 };
                }
                i += 1;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                out.push_str(&content[copied..i]);
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                copied = i;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                out.push_str(&content[copied..i]);
                let close = content[i + 2..].find("*/").ok_or(ConfigError::UnterminatedComment)?;
                i += 2 + close + 2;
                out.push(' ');
                copied = i;
            }
            b',' => {
                out.push_str(&content[copied..i]);
                copied = i;
                pending_comma = Some(out.len());
                i += 1;
            }
            b'}' | b']' => {
                if let Some(at) = pending_comma.take() {
                    out.push_str(&content[copied..i]);
                    copied = i;
                    if out[at + 1..].trim().is_empty() {
                        out.replace_range(at..at + 1, " ");
                    }
                }
                i += 1;
            }
            b if b.is_ascii_whitespace() => i += 1,
            _ => {
                pending_comma = None;
                i += 1;
            }
        }
    }
    out.push_str(&content[copied.min(content.len())..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compiler_options() {
        let config = parse_tsconfig(
            r#"{
                "compilerOptions": {
                    "target": "ES2015",
                    "module": "commonjs",
                    "outDir": "out",
                    "sourceMap": true,
                    "emitBOM": true,
                    "newLine": "CRLF"
                },
                "references": [{ "path": "../core", "prepend": true }]
            }"#,
        )
        .unwrap();
        let options = &config.compiler_options;
        assert_eq!(options.target, Some(ScriptTarget::ES2015));
        assert_eq!(options.module, Some(ModuleKind::CommonJS));
        assert_eq!(options.out_dir.as_deref(), Some("out"));
        assert_eq!(options.emit_bom, Some(true));
        assert_eq!(options.get_new_line_character(), "\r\n");
        let references = config.references.unwrap();
        assert!(references[0].prepend);
    }

    #[test]
    fn test_comments_and_trailing_commas() {
        let config = parse_tsconfig(
            r#"{
                // line comment
                "compilerOptions": {
                    /* block */ "outFile": "a//b.js",
                    "strict": true,
                },
            }"#,
        )
        .unwrap();
        assert_eq!(config.compiler_options.out_file(), Some("a//b.js"));
        assert!(config.compiler_options.get_strict_option_value());
    }

    #[test]
    fn test_unknown_enum_value() {
        let err = parse_tsconfig(r#"{ "compilerOptions": { "target": "es1999" } }"#).unwrap_err();
        assert!(err.to_string().contains("es1999"));
    }

    #[test]
    fn test_unterminated_comment() {
        assert!(matches!(parse_tsconfig("{ /* "), Err(ConfigError::UnterminatedComment)));
    }

    #[test]
    fn test_defaults() {
        let options = CompilerOptions::default();
        assert_eq!(options.get_emit_script_target(), ScriptTarget::ES5);
        assert_eq!(options.get_emit_module_kind(), ModuleKind::CommonJS);
        assert!(!options.get_strict_option_value());
        assert_eq!(options.get_new_line_character(), "\n");
        assert_eq!(options.out_file(), None);
    }

    #[test]
    fn test_always_strict_overrides_strict() {
        let options = CompilerOptions { strict: Some(true), always_strict: Some(false), ..Default::default() };
        assert!(!options.get_strict_option_value());
    }

    #[test]
    fn test_report_severity() {
        let mut options = CompilerOptions::default();
        assert_eq!(options.unreachable_code_is_error(), Some(false));
        options.allow_unreachable_code = Some(false);
        assert_eq!(options.unreachable_code_is_error(), Some(true));
        options.allow_unused_labels = Some(true);
        assert_eq!(options.unused_label_is_error(), None);
    }

    #[test]
    fn test_preserve_const_enums() {
        let options = CompilerOptions { isolated_modules: Some(true), ..Default::default() };
        assert!(options.should_preserve_const_enums());
    }

    #[test]
    fn test_targets_are_ordered() {
        assert!(ScriptTarget::ES5 < ScriptTarget::ES2015);
        assert_eq!("ES6".parse::<ScriptTarget>().unwrap(), ScriptTarget::ES2015);
        assert_eq!(ScriptTarget::ESNext.to_string(), "esnext");
    }
}
