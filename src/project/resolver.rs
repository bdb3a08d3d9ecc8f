// Path resolution
//
// Turns an import specifier into an absolute file location: absolute
// passthrough, relative join against the importing directory, path-alias
// remapping, or a fallback join against the discovered project root.
// Also provides the raw file-content retrieval every resolution hop uses.

use super::ProjectContext;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Recognized source-file extensions. Anything else gets the default
/// script extension appended.
pub const SOURCE_EXTENSIONS: [&str; 4] = [".ts", ".js", ".vue", ".localization"];

const DEFAULT_EXTENSION: &str = ".ts";

pub struct PathResolver<'a> {
    context: &'a ProjectContext,
}

impl<'a> PathResolver<'a> {
    pub fn new(context: &'a ProjectContext) -> Self {
        Self { context }
    }

    /// Resolve `specifier` to an absolute, extension-complete path.
    /// `directory` is the importing file's directory, used for relative
    /// specifiers; aliased and bare specifiers join the project root.
    pub fn resolve(&self, specifier: &str, directory: Option<&Path>) -> PathBuf {
        if Path::new(specifier).is_absolute() {
            return fix_extension(normalize(Path::new(specifier)));
        }
        if specifier.starts_with("./") || specifier.starts_with("../") {
            return self.join_absolute(specifier, directory);
        }

        let anchor = directory
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(specifier));
        for (alias, target) in self.context.path_aliases(&anchor) {
            let prefix = alias.trim_end_matches('*');
            if let Some(tail) = specifier.strip_prefix(prefix) {
                let rebased = format!("{}{}", target.trim_end_matches('*'), tail);
                return self.join_absolute(&rebased, None);
            }
        }
        self.join_absolute(specifier, None)
    }

    /// Resolve `specifier` and read the file it lands on.
    pub fn read(&self, specifier: &str, directory: Option<&Path>) -> Option<String> {
        let path = self.resolve(specifier, directory);
        self.read_path(&path)
    }

    /// Read a file that is already resolved. `None` when it does not
    /// exist or cannot be read, never an error.
    pub fn read_path(&self, path: &Path) -> Option<String> {
        if !path.exists() {
            debug!(path = %path.display(), "file does not exist");
            return None;
        }
        fs::read_to_string(path).ok()
    }

    fn join_absolute(&self, specifier: &str, directory: Option<&Path>) -> PathBuf {
        let joined = match directory {
            Some(dir) => dir.join(specifier),
            None => match self.context.project_root(Path::new(specifier)) {
                Some(root) => root.join(specifier),
                None => PathBuf::from(specifier),
            },
        };
        fix_extension(normalize(&joined))
    }
}

/// Lexically fold `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(parts.last(), Some(Component::Normal(_))) {
                    parts.pop();
                } else {
                    parts.push(component);
                }
            }
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}

/// Append the default script extension unless the path already ends in a
/// recognized source extension.
fn fix_extension(path: PathBuf) -> PathBuf {
    let text = path.to_string_lossy();
    if text.is_empty() || SOURCE_EXTENSIONS.iter().any(|ext| text.ends_with(ext)) {
        path
    } else {
        PathBuf::from(format!("{text}{DEFAULT_EXTENSION}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path_gets_default_extension() {
        let context = ProjectContext::new();
        let resolver = PathResolver::new(&context);
        let resolved = resolver.resolve("/project/src/cart", None);
        assert_eq!(resolved, PathBuf::from("/project/src/cart.ts"));
    }

    #[test]
    fn test_recognized_extensions_are_kept() {
        let context = ProjectContext::new();
        let resolver = PathResolver::new(&context);
        for name in ["/p/a.ts", "/p/a.js", "/p/a.vue", "/p/a.localization"] {
            assert_eq!(resolver.resolve(name, None), PathBuf::from(name));
        }
    }

    #[test]
    fn test_relative_specifier_joins_directory() {
        let context = ProjectContext::new();
        let resolver = PathResolver::new(&context);
        let resolved = resolver.resolve("../models/item", Some(Path::new("/project/src/views")));
        assert_eq!(resolved, PathBuf::from("/project/src/models/item.ts"));
    }

    #[test]
    fn test_current_dir_components_are_folded() {
        let context = ProjectContext::new();
        let resolver = PathResolver::new(&context);
        let resolved = resolver.resolve("./item", Some(Path::new("/project/src")));
        assert_eq!(resolved, PathBuf::from("/project/src/item.ts"));
    }
}
