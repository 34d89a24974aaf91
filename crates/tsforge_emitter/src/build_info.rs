//! The build info record and rebuilding bundle text from it.
//!
//! In `outFile` mode the record lists, for the JavaScript and declaration
//! bundles, which byte ranges came from prologues, helpers, reference
//! directives, prepends and file text. A later build reads the outputs
//! back through these sections instead of reprinting the inputs.

use crate::error::EmitError;
use crate::host::EmitHost;
use crate::paths::get_output_paths_for_bundle;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use tsforge_ast::{FileReference, UnparsedSource};
use tsforge_printer::{BundleFileInfo, BundleFileSectionKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle: Option<BundleBuildInfo>,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleBuildInfo {
    /// Relative to the build info file's directory.
    pub common_source_directory: String,
    /// Relative to the build info file's directory, in bundle order.
    pub source_files: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub js: Option<BundleFileInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dts: Option<BundleFileInfo>,
}

impl BuildInfo {
    pub fn new(bundle: Option<BundleBuildInfo>) -> Self {
        Self {
            bundle,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        // Strings, integers and vectors only; serializing cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

pub fn read_build_info<'a>(host: &dyn EmitHost<'a>, path: &str) -> Result<BuildInfo, EmitError> {
    let text = host.read_file(path).ok_or_else(|| EmitError::NotFound(path.to_string()))?;
    serde_json::from_str(&text).map_err(|source| EmitError::BuildInfo {
        path: path.to_string(),
        source,
    })
}

/// The outputs of a previous bundle build, split back into their parts.
#[derive(Debug, Clone)]
pub struct ReconstructedBundle {
    pub common_source_directory: String,
    pub source_files: Vec<String>,
    pub js: UnparsedSource,
    pub dts: Option<UnparsedSource>,
}

#[derive(Debug, Clone)]
pub enum BuildInfoReconstruction {
    Reconstructed(ReconstructedBundle),
    /// The configuration has no `outFile` or no build info path.
    NotBundled,
    /// An output the record refers to is missing or does not match it.
    CouldNotRead(String),
}

/// Read the previous bundle outputs of the host's configuration back
/// through their build info record.
pub fn reconstruct_bundle_text<'a>(host: &dyn EmitHost<'a>) -> BuildInfoReconstruction {
    let options = host.compiler_options();
    let Some(paths) = get_output_paths_for_bundle(options, false) else {
        return BuildInfoReconstruction::NotBundled;
    };
    let Some(build_info_path) = paths.build_info_path else {
        return BuildInfoReconstruction::NotBundled;
    };
    let build_info = match read_build_info(host, &build_info_path) {
        Ok(info) => info,
        Err(err) => {
            warn!(path = build_info_path.as_str(), error = %err, "could not read build info");
            return BuildInfoReconstruction::CouldNotRead(build_info_path);
        }
    };
    let Some(bundle) = build_info.bundle else {
        return BuildInfoReconstruction::CouldNotRead(build_info_path);
    };

    let Some(js_path) = paths.js_file_path else {
        return BuildInfoReconstruction::CouldNotRead(build_info_path);
    };
    let js = match read_unparsed(host, &js_path, bundle.js.as_ref(), false) {
        Ok(js) => js,
        Err(path) => return BuildInfoReconstruction::CouldNotRead(path),
    };
    let dts = match (paths.declaration_file_path, bundle.dts.as_ref()) {
        (Some(dts_path), Some(info)) => {
            let strip_internal = options.strip_internal.unwrap_or(false);
            match read_unparsed(host, &dts_path, Some(info), strip_internal) {
                Ok(dts) => Some(dts),
                Err(path) => return BuildInfoReconstruction::CouldNotRead(path),
            }
        }
        _ => None,
    };

    debug!(path = build_info_path.as_str(), files = bundle.source_files.len(), "reconstructed bundle");
    BuildInfoReconstruction::Reconstructed(ReconstructedBundle {
        common_source_directory: bundle.common_source_directory,
        source_files: bundle.source_files,
        js,
        dts,
    })
}

/// Split one output back into prologues, helpers, directives and text.
/// `Err` carries the path that could not be read or did not match.
fn read_unparsed<'a>(
    host: &dyn EmitHost<'a>,
    path: &str,
    info: Option<&BundleFileInfo>,
    strip_internal: bool,
) -> Result<UnparsedSource, String> {
    let text = host.read_file(path).ok_or_else(|| path.to_string())?;
    let Some(info) = info else {
        return Err(path.to_string());
    };
    let mut unparsed = UnparsedSource {
        file_name: path.to_string(),
        ..Default::default()
    };
    let mut body = String::new();
    for section in &info.sections {
        let data = || section.data.clone().unwrap_or_default();
        let reference = || FileReference {
            pos: section.pos as u32,
            end: section.end as u32,
            file_name: data(),
        };
        match section.kind {
            BundleFileSectionKind::Prologue => unparsed.prologues.push(data()),
            BundleFileSectionKind::EmitHelpers => unparsed.helpers.push(data()),
            BundleFileSectionKind::NoDefaultLib => unparsed.has_no_default_lib = true,
            BundleFileSectionKind::Reference => unparsed.referenced_files.push(reference()),
            BundleFileSectionKind::Type => unparsed.type_reference_directives.push(reference()),
            BundleFileSectionKind::Lib => unparsed.lib_reference_directives.push(reference()),
            BundleFileSectionKind::Internal if strip_internal => {}
            BundleFileSectionKind::Prepend | BundleFileSectionKind::Text | BundleFileSectionKind::Internal => {
                let slice = text.get(section.pos..section.end).ok_or_else(|| path.to_string())?;
                push_line(&mut body, slice);
            }
        }
    }
    unparsed.text = body;
    Ok(unparsed)
}

fn push_line(body: &mut String, slice: &str) {
    if !body.is_empty() && !body.ends_with('\n') {
        body.push('\n');
    }
    body.push_str(slice);
}
