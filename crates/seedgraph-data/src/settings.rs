use std::path::{Path, PathBuf};

/// Environment variable that overrides the document directory.
pub const CONFIG_DIR_ENV: &str = "SEEDGRAPH_CONFIG_DIR";

/// Directory name used under the working directory when nothing else is set.
pub const DEFAULT_CONFIG_DIR: &str = "configurations";

/// Where schema documents are looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderSettings {
    pub base_dir: PathBuf,
}

impl LoaderSettings {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Settings from `SEEDGRAPH_CONFIG_DIR`, or `<cwd>/configurations`.
    pub fn from_env() -> Self {
        match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }
}

impl Default for LoaderSettings {
    fn default() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::new(cwd.join(DEFAULT_CONFIG_DIR))
    }
}
