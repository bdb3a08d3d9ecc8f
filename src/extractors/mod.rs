// Declaration extractors
//
// One extractor per declaration kind, each built from the shared line
// scanner, the bracket scanner and the position locator.

pub mod classes;
pub mod imports;
pub mod input_fields;
pub(crate) mod lines;
pub mod methods;
pub mod properties;
pub mod variables;

pub use classes::{ClassRegion, class_name, extract_class_regions};
pub use imports::{ImportStatement, extract_imports};
pub use input_fields::extract_input_fields;
pub use methods::extract_methods;
pub use properties::extract_properties;
pub use variables::extract_variables;
