// File model builder
//
// Orchestrates the extractors to turn one file's raw text into its full
// structural model: resolved path, import dependencies and classes with
// their declarations. Models are built fresh on every request; there is
// no cache to go stale.

use crate::extractors::{self, ClassRegion};
use crate::model::{ClassModel, Dependency, FileModel};
use crate::position::line_of_offset;
use crate::project::ProjectContext;
use crate::project::resolver::PathResolver;
use std::path::Path;
use tracing::debug;

pub struct FileParser<'a> {
    context: &'a ProjectContext,
}

impl<'a> FileParser<'a> {
    pub fn new(context: &'a ProjectContext) -> Self {
        Self { context }
    }

    /// Build the structural model of one file from its raw text and path.
    pub fn parse(&self, text: &str, path: &Path) -> FileModel {
        let resolver = PathResolver::new(self.context);
        let resolved_path = resolver.resolve(&path.to_string_lossy(), None);

        let classes: Vec<ClassModel> = extractors::extract_class_regions(text)
            .iter()
            .filter_map(|region| self.build_class(region, text))
            .collect();
        debug!(
            path = %resolved_path.display(),
            classes = classes.len(),
            "parsed file model"
        );

        FileModel {
            path: resolved_path,
            raw_text: text.to_string(),
            dependencies: self.parse_dependencies(text, path),
            classes,
        }
    }

    fn parse_dependencies(&self, text: &str, path: &Path) -> Vec<Dependency> {
        let resolver = PathResolver::new(self.context);
        let directory = path.parent();

        extractors::extract_imports(text)
            .into_iter()
            .map(|import| {
                let is_external_library = self
                    .context
                    .is_external_library(&import.specifier, path);
                let absolute_path = (!is_external_library)
                    .then(|| resolver.resolve(&import.specifier, directory));
                Dependency {
                    alias: import.alias,
                    imported_names: import.imported_names,
                    specifier: import.specifier,
                    is_external_library,
                    absolute_path,
                }
            })
            .collect()
    }

    fn build_class(&self, region: &ClassRegion, file_text: &str) -> Option<ClassModel> {
        let Some(name) = extractors::class_name(&region.text) else {
            debug!("skipping class region without a recoverable name");
            return None;
        };
        let start_line = line_of_offset(file_text, region.offset);

        let input_fields = extractors::extract_input_fields(&region.text, file_text, start_line);
        let methods = extractors::extract_methods(&region.text, file_text, start_line);
        let properties = extractors::extract_properties(&region.text, file_text, start_line);
        // An input-field declaration always wins over a same-named plain
        // field scanned from the same line.
        let variables = extractors::extract_variables(&region.text, file_text, start_line)
            .into_iter()
            .filter(|variable| !input_fields.iter().any(|field| field.name == variable.name))
            .collect();

        Some(ClassModel {
            name,
            text: region.text.clone(),
            variables,
            input_fields,
            properties,
            methods,
        })
    }
}
