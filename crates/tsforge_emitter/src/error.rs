use thiserror::Error;
use tsforge_diagnostics::{messages, Diagnostic};

/// Failures of the host's file system while emitting or reading back
/// build info. None of these escape [`emit_files`](crate::emit_files).
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("{message}")]
    Write { path: String, message: String },

    #[error("file '{0}' could not be read")]
    NotFound(String),

    #[error("invalid build info in '{path}': {source}")]
    BuildInfo {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl EmitError {
    pub fn write(path: impl Into<String>, message: impl Into<String>) -> Self {
        EmitError::Write {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The file the failure concerns.
    pub fn path(&self) -> &str {
        match self {
            EmitError::Write { path, .. } | EmitError::BuildInfo { path, .. } => path,
            EmitError::NotFound(path) => path,
        }
    }

    /// "Could not write file '{0}': {1}."
    pub fn to_diagnostic(&self) -> Diagnostic {
        let reason = self.to_string();
        Diagnostic::new(&messages::COULD_NOT_WRITE_FILE_0_COLON_1, &[self.path(), reason.as_str()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_becomes_could_not_write() {
        let err = EmitError::write("/out/a.js", "disk full");
        let diagnostic = err.to_diagnostic();
        assert_eq!(diagnostic.code, 5033);
        assert_eq!(diagnostic.message_text, "Could not write file '/out/a.js': disk full.");
    }

    #[test]
    fn test_build_info_error_names_the_file() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = EmitError::BuildInfo {
            path: "/out/app.tsbuildinfo".to_string(),
            source,
        };
        assert_eq!(err.path(), "/out/app.tsbuildinfo");
        assert!(err.to_string().starts_with("invalid build info in '/out/app.tsbuildinfo'"));
    }
}
