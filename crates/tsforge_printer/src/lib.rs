//! tsforge_printer: AST to text output.
//!
//! Prints source files and bundles back to TypeScript or JavaScript. Along
//! the way the printer keeps comments, records source-map mappings, picks
//! text for compiler-generated names, writes runtime helpers once per
//! output, and can describe the sections of a bundle for later rebuilds.
//!
//! Every node goes through the same pipeline: notification, substitution,
//! comments, source maps, then the rendering rule for its kind.

mod bundle_info;
mod comments;
mod expressions;
mod helpers;
mod list_format;
mod name_generator;
mod printer;
mod resolver;
mod source_maps;
mod statements;
mod text_writer;
mod types;

pub use bundle_info::{
    BundleFileInfo, BundleFileSection, BundleFileSectionKind, SourceFileInfo, SourceFilePrologueDirective,
    SourceFilePrologueDirectiveExpression, SourceFilePrologueInfo,
};
pub use helpers::{compare_emit_helpers, sorted_emit_helpers, ASSIGN_HELPER, AWAITER_HELPER, EXTENDS_HELPER};
pub use list_format::ListFormat;
pub use name_generator::{make_identifier_from_module_name, NameGenerator, TempKind};
pub use printer::{EmitHint, NoopHandlers, PrintHandlers, PrintOutput, Printer, PrinterOptions, SourceMapTarget};
pub use resolver::{EmitResolver, NullResolver};
pub use text_writer::TextWriter;
