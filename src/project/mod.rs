// Project configuration
//
// Discovers the project root and reads the two optional config files: the
// manifest (declared library names) and the compiler config (path
// aliases). All state lives in an explicitly constructed ProjectContext
// that is passed by reference to whoever needs it; accessors memoize the
// first answer for the lifetime of the context. A configuration edit
// therefore requires a fresh context, never a process restart dance with
// ambient globals.

pub mod resolver;

use crate::error::ConfigError;
use crate::scanner::strip_comments;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

pub const MANIFEST_FILE: &str = "package.json";
pub const COMPILER_CONFIG_FILE: &str = "tsconfig.json";

/// Project-level configuration with memoized accessors.
#[derive(Debug, Default)]
pub struct ProjectContext {
    root: OnceLock<Option<PathBuf>>,
    library_names: OnceLock<Vec<String>>,
    path_aliases: OnceLock<Vec<(String, String)>>,
}

impl ProjectContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The project root for `anchor`: the nearest ancestor directory that
    /// contains a manifest or compiler config file. The first anchor
    /// queried wins for the lifetime of this context.
    pub fn project_root(&self, anchor: &Path) -> Option<PathBuf> {
        self.root.get_or_init(|| discover_root(anchor)).clone()
    }

    /// Declared library names: the union of the manifest's runtime and
    /// development dependency keys. Empty when no manifest exists.
    pub fn library_names(&self, anchor: &Path) -> &[String] {
        self.library_names
            .get_or_init(|| match self.load_library_names(anchor) {
                Ok(names) => names,
                Err(error) => {
                    warn!("manifest unavailable, treating all imports as local: {error}");
                    Vec::new()
                }
            })
    }

    /// Whether `specifier` names a declared external library.
    pub fn is_external_library(&self, specifier: &str, anchor: &Path) -> bool {
        self.library_names(anchor).iter().any(|name| name == specifier)
    }

    /// Path aliases from the compiler config (`compilerOptions.paths`,
    /// first candidate target each), longest alias first so the most
    /// specific prefix wins.
    pub fn path_aliases(&self, anchor: &Path) -> &[(String, String)] {
        self.path_aliases
            .get_or_init(|| match self.load_path_aliases(anchor) {
                Ok(aliases) => aliases,
                Err(error) => {
                    warn!("compiler config unavailable, skipping alias remapping: {error}");
                    Vec::new()
                }
            })
    }

    fn load_library_names(&self, anchor: &Path) -> crate::error::Result<Vec<String>> {
        let Some(manifest) = self.config_value(anchor, MANIFEST_FILE)? else {
            return Ok(Vec::new());
        };
        let mut names = Vec::new();
        for section in ["dependencies", "devDependencies"] {
            if let Some(map) = manifest.get(section).and_then(Value::as_object) {
                names.extend(map.keys().cloned());
            }
        }
        debug!(count = names.len(), "loaded declared library names");
        Ok(names)
    }

    fn load_path_aliases(&self, anchor: &Path) -> crate::error::Result<Vec<(String, String)>> {
        let Some(config) = self.config_value(anchor, COMPILER_CONFIG_FILE)? else {
            return Ok(Vec::new());
        };
        let mut aliases: Vec<(String, String)> = Vec::new();
        if let Some(paths) = config
            .get("compilerOptions")
            .and_then(|options| options.get("paths"))
            .and_then(Value::as_object)
        {
            for (alias, targets) in paths {
                if let Some(first) = targets.get(0).and_then(Value::as_str) {
                    aliases.push((alias.clone(), first.to_string()));
                }
            }
        }
        aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        debug!(count = aliases.len(), "loaded path aliases");
        Ok(aliases)
    }

    /// Read and parse one config file from the project root. `Ok(None)`
    /// when there is no root or no such file; absence is not an error.
    fn config_value(&self, anchor: &Path, file_name: &str) -> crate::error::Result<Option<Value>> {
        let Some(root) = self.project_root(anchor) else {
            return Ok(None);
        };
        let path = root.join(file_name);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        // Config files may carry comments; strip them before parsing.
        let value = serde_json::from_str(&strip_comments(&content))
            .map_err(|source| ConfigError::Json { path, source })?;
        Ok(Some(value))
    }
}

/// Walk parent directories upward from `anchor` until one contains a
/// manifest or compiler config file.
fn discover_root(anchor: &Path) -> Option<PathBuf> {
    for dir in anchor.ancestors().skip(1) {
        if dir.join(MANIFEST_FILE).exists() || dir.join(COMPILER_CONFIG_FILE).exists() {
            debug!(root = %dir.display(), "discovered project root");
            return Some(dir.to_path_buf());
        }
    }
    None
}
