//! tsforge_emitter: Output files from printed trees.
//!
//! Decides which artifacts each input produces and where they go, prints
//! them, appends source-map links and hands the text to the [`EmitHost`].
//! In `outFile` mode it also records the build info that lets a later
//! build read the bundle back section by section.
//!
//! Failures to write are reported as diagnostics on the [`EmitResult`];
//! nothing here returns early on a single bad artifact.

mod build_info;
mod emitter;
mod error;
mod host;
mod paths;

pub use build_info::{
    read_build_info, reconstruct_bundle_text, BuildInfo, BuildInfoReconstruction, BundleBuildInfo, ReconstructedBundle,
};
pub use emitter::{emit_files, EmitOptions, EmitResult};
pub use error::EmitError;
pub use host::EmitHost;
pub use paths::{
    get_declaration_emit_output_file_path, get_output_paths_for, get_output_paths_for_bundle,
    get_own_emit_output_file_path, get_source_file_path_in_new_dir, get_source_map_file_path,
    get_ts_build_info_emit_output_file_path, EmitFileNames,
};
