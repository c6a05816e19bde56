use std::path::{Path, PathBuf};

/// Single file adapter configuration
#[derive(Debug, Clone)]
pub struct SingleFileConfig {
    /// Path of the JSON source file
    pub path: PathBuf,

    /// Reject sources whose name does not end in `.json`
    pub require_json_extension: bool,

    /// Pretty-print the persisted document
    pub pretty: bool,

    /// Create missing parent directories when writing
    pub create_dirs: bool,
}

impl SingleFileConfig {
    /// Create a configuration with defaults for the given source path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            require_json_extension: true,
            pretty: false,
            create_dirs: true,
        }
    }

    /// Require (or stop requiring) the `.json` extension
    pub fn require_json_extension(mut self, require: bool) -> Self {
        self.require_json_extension = require;
        self
    }

    /// Enable pretty-printed output
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Enable or disable parent directory creation
    pub fn create_dirs(mut self, create: bool) -> Self {
        self.create_dirs = create;
        self
    }

    pub(crate) fn has_json_extension(&self) -> bool {
        self.path.to_string_lossy().ends_with(".json")
    }
}
