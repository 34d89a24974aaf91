//! What the emitter needs from the program that drives it.

use crate::error::EmitError;
use tsforge_ast::{SourceFile, UnparsedSource};
use tsforge_core::StringInterner;
use tsforge_tsoptions::CompilerOptions;
use tsforge_tspath::{compute_common_source_directory, ensure_trailing_directory_separator, get_normalized_absolute_path};

/// The program side of an emit: configuration, the trees to print and a
/// place to put the results.
pub trait EmitHost<'a> {
    fn compiler_options(&self) -> &CompilerOptions;

    /// Every file of the program, in program order. Declaration files are
    /// included; they are never emitted.
    fn source_files(&self) -> &[&'a SourceFile<'a>];

    /// The interner the trees' names were interned with.
    fn interner(&self) -> &StringInterner;

    fn current_directory(&self) -> &str;

    fn use_case_sensitive_file_names(&self) -> bool;

    /// Persist one artifact. `source_files` names the inputs it was
    /// produced from.
    fn write_file(&self, path: &str, text: &str, write_byte_order_mark: bool, source_files: &[&str])
        -> Result<(), EmitError>;

    fn read_file(&self, path: &str) -> Option<String>;

    /// Whether writing `path` must not happen, for instance because it
    /// would clobber a file the program reads.
    fn is_emit_blocked(&self, _path: &str) -> bool {
        false
    }

    /// The tree to print as JavaScript for `file`. Transforms run here.
    fn transformed_file(&self, file: &'a SourceFile<'a>) -> &'a SourceFile<'a> {
        file
    }

    /// The declaration-shaped tree for `file`. Without one no declaration
    /// output is written for it.
    fn declaration_file(&self, _file: &'a SourceFile<'a>) -> Option<&'a SourceFile<'a>> {
        None
    }

    /// Output of referenced projects printed ahead of a bundle's own files.
    fn prepends(&self) -> Vec<UnparsedSource> {
        Vec::new()
    }

    /// `rootDir` when set, otherwise the deepest directory holding every
    /// emitted input. Always ends with a separator.
    fn common_source_directory(&self) -> String {
        let options = self.compiler_options();
        let current_directory = self.current_directory();
        if let Some(root_dir) = options.root_dir.as_deref() {
            return ensure_trailing_directory_separator(&get_normalized_absolute_path(root_dir, current_directory));
        }
        let names = self
            .source_files()
            .iter()
            .filter(|file| !file.is_declaration_file)
            .map(|file| file.file_name.as_str());
        compute_common_source_directory(names, current_directory, self.use_case_sensitive_file_names())
    }
}
