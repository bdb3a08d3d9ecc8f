// Workspace façade
//
// Owns the project configuration and wires the parser and resolvers
// behind one entry point. Everything stays synchronous and value-based:
// models are parsed per request, only the configuration is memoized.

use crate::model::FileModel;
use crate::parser::FileParser;
use crate::project::ProjectContext;
use crate::project::resolver::PathResolver;
use crate::resolve::{ChainResolver, IdentifierToken};
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct Workspace {
    context: ProjectContext,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            context: ProjectContext::new(),
        }
    }

    pub fn context(&self) -> &ProjectContext {
        &self.context
    }

    /// Parse raw text into a file model.
    pub fn parse(&self, text: &str, path: &Path) -> FileModel {
        FileParser::new(&self.context).parse(text, path)
    }

    /// Read and parse a file from storage. `None` when it cannot be read.
    pub fn parse_file(&self, path: &Path) -> Option<FileModel> {
        let resolver = PathResolver::new(&self.context);
        let resolved = resolver.resolve(&path.to_string_lossy(), None);
        let content = resolver.read_path(&resolved)?;
        Some(self.parse(&content, &resolved))
    }

    /// Resolve an import specifier to an absolute file location.
    pub fn resolve_path(&self, specifier: &str, directory: Option<&Path>) -> PathBuf {
        PathResolver::new(&self.context).resolve(specifier, directory)
    }

    /// Resolve a specifier and read the file it lands on.
    pub fn read_source(&self, specifier: &str, directory: Option<&Path>) -> Option<String> {
        PathResolver::new(&self.context).read(specifier, directory)
    }

    /// Walk a member chain across files starting from `model`.
    pub fn resolve_chain(&self, chain: &[IdentifierToken], model: FileModel) -> FileModel {
        ChainResolver::new(&self.context).resolve(chain, model)
    }
}
