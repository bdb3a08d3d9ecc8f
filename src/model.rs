// Structural model types
//
// Typed declaration records extracted from class bodies, plus the
// per-file aggregate (classes + import dependencies). Everything here is
// a plain value: models are produced per request and owned by the caller.

use crate::position::SourcePosition;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::LazyLock;

// Whole-type match against the primitive set, optionally in array form
// (either `Array<...>` or trailing `[]` pairs).
static SIMPLE_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(array\s*<\s*)?(number|string|datetime|date|any|boolean)(\s*>|(\s*\[\s*\])*)?$")
        .unwrap()
});
static ARRAY_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\s*\]\s*$").unwrap());

/// True when the declared type names a primitive (optionally wrapped in an
/// array-of-primitive form). Simple types never resolve to another file.
pub fn is_simple_type(declared_type: &str) -> bool {
    SIMPLE_TYPE_RE.is_match(declared_type.trim())
}

/// True when the declared type is an array (`T[]`). Array types never
/// trigger a cross-file hop either: the element type is not the binding.
pub fn is_array_type(declared_type: &str) -> bool {
    ARRAY_TYPE_RE.is_match(declared_type)
}

/// Access modifier on a class member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Public,
    Protected,
    Private,
    #[default]
    Unspecified,
}

impl AccessLevel {
    pub fn parse(word: &str) -> AccessLevel {
        match word {
            "public" => AccessLevel::Public,
            "protected" => AccessLevel::Protected,
            "private" => AccessLevel::Private,
            _ => AccessLevel::Unspecified,
        }
    }

    /// Display prefix: `"public "` etc., empty when unspecified.
    pub fn prefix(&self) -> &'static str {
        match self {
            AccessLevel::Public => "public ",
            AccessLevel::Protected => "protected ",
            AccessLevel::Private => "private ",
            AccessLevel::Unspecified => "",
        }
    }
}

/// One parameter of a method or setter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodParameter {
    pub name: String,
    pub declared_type: Option<String>,
    pub default_value: Option<String>,
}

impl MethodParameter {
    pub fn to_display_string(&self) -> String {
        let mut result = self.name.clone();
        if let Some(declared_type) = &self.declared_type {
            result.push_str(": ");
            result.push_str(declared_type);
        }
        if let Some(default_value) = &self.default_value {
            result.push_str(" = ");
            result.push_str(default_value);
        }
        result
    }
}

/// A plain field declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub access: AccessLevel,
    /// Raw annotation text; may span lines for structural `{ ... }` types.
    pub declared_type: Option<String>,
    pub default_value: Option<String>,
    pub position: SourcePosition,
}

impl Variable {
    pub fn to_display_string(&self, class_name: &str) -> String {
        let mut result = format!(
            "(variable)\n{}{}.{}",
            self.access.prefix(),
            class_name,
            self.name
        );
        if let Some(declared_type) = &self.declared_type {
            result.push_str(&format!(": {declared_type}"));
        }
        if let Some(default_value) = &self.default_value {
            result.push_str(&format!(" = {default_value}"));
        }
        result
    }
}

/// A getter/setter pair merged into one record. The declared type comes
/// from the getter's return annotation; a paired setter contributes its
/// parameter signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub access: AccessLevel,
    pub declared_type: Option<String>,
    pub setter_parameter: Option<MethodParameter>,
    pub position: SourcePosition,
}

impl Property {
    pub fn to_display_string(&self, class_name: &str) -> String {
        let mut result = format!(
            "(property)\n{}{}.{}",
            self.access.prefix(),
            class_name,
            self.name
        );
        if let Some(declared_type) = &self.declared_type {
            result.push_str(&format!(": {declared_type}"));
        }
        if let Some(setter) = &self.setter_parameter {
            result.push_str(&format!(
                "\n\nset (property) {}{}.{}(",
                self.access.prefix(),
                class_name,
                self.name
            ));
            result.push_str(&setter.name);
            if let Some(declared_type) = &setter.declared_type {
                result.push_str(&format!(": {declared_type}"));
            }
            result.push(')');
        }
        result
    }
}

/// A method declaration with its parsed parameter list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub access: AccessLevel,
    pub parameters: Vec<MethodParameter>,
    pub return_type: Option<String>,
    pub position: SourcePosition,
}

impl Method {
    pub fn to_display_string(&self, class_name: &str) -> String {
        let mut result = format!(
            "(method)\n{}{}.{}(",
            self.access.prefix(),
            class_name,
            self.name
        );
        result.push_str(
            &self
                .parameters
                .iter()
                .map(|p| p.to_display_string())
                .collect::<Vec<_>>()
                .join(", "),
        );
        result.push(')');
        if let Some(return_type) = &self.return_type {
            result.push_str(&format!(": {return_type}"));
        }
        result
    }
}

/// A decorator-marked input field (externally settable "prop"), carrying
/// the optional `default`/`required` metadata from the decorator call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputField {
    pub name: String,
    pub access: AccessLevel,
    pub declared_type: Option<String>,
    pub default_value: Option<String>,
    pub required: Option<bool>,
    pub position: SourcePosition,
}

impl InputField {
    pub fn to_display_string(&self, class_name: &str) -> String {
        let mut result = format!(
            "(input property)\n{}{}.{}",
            self.access.prefix(),
            class_name,
            self.name
        );
        if let Some(declared_type) = &self.declared_type {
            result.push_str(&format!(": {declared_type}"));
        }
        if let Some(default_value) = &self.default_value {
            result.push_str(&format!("\n\ndefault: {default_value}"));
        }
        if self.required == Some(true) {
            result.push_str("\n\nrequired");
        }
        result
    }
}

/// Declaration kinds, serialized for record consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Variable,
    Property,
    Method,
    InputField,
}

/// Borrowed view over any declaration kind, used for uniform search and
/// projection without flattening the per-kind lists.
#[derive(Debug, Clone, Copy)]
pub enum Declaration<'a> {
    Variable(&'a Variable),
    Property(&'a Property),
    Method(&'a Method),
    InputField(&'a InputField),
}

impl<'a> Declaration<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Declaration::Variable(v) => &v.name,
            Declaration::Property(p) => &p.name,
            Declaration::Method(m) => &m.name,
            Declaration::InputField(f) => &f.name,
        }
    }

    pub fn kind(&self) -> DeclarationKind {
        match self {
            Declaration::Variable(_) => DeclarationKind::Variable,
            Declaration::Property(_) => DeclarationKind::Property,
            Declaration::Method(_) => DeclarationKind::Method,
            Declaration::InputField(_) => DeclarationKind::InputField,
        }
    }

    pub fn position(&self) -> SourcePosition {
        match self {
            Declaration::Variable(v) => v.position,
            Declaration::Property(p) => p.position,
            Declaration::Method(m) => m.position,
            Declaration::InputField(f) => f.position,
        }
    }

    /// Declared type text where the kind has one. Methods deliberately
    /// report none: a call result is not a navigable field binding.
    pub fn declared_type(&self) -> Option<&'a str> {
        match self {
            Declaration::Variable(v) => v.declared_type.as_deref(),
            Declaration::Property(p) => p.declared_type.as_deref(),
            Declaration::InputField(f) => f.declared_type.as_deref(),
            Declaration::Method(_) => None,
        }
    }

    pub fn to_display_string(&self, class_name: &str) -> String {
        match self {
            Declaration::Variable(v) => v.to_display_string(class_name),
            Declaration::Property(p) => p.to_display_string(class_name),
            Declaration::Method(m) => m.to_display_string(class_name),
            Declaration::InputField(f) => f.to_display_string(class_name),
        }
    }

    pub fn to_record(&self, class_name: &str) -> SymbolRecord {
        SymbolRecord {
            name: self.name().to_string(),
            kind: self.kind(),
            class_name: class_name.to_string(),
            detail: self.to_display_string(class_name),
            position: self.position(),
        }
    }
}

/// Searchable/displayable projection of one declaration, the shape handed
/// to completion and hover consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub name: String,
    pub kind: DeclarationKind,
    pub class_name: String,
    pub detail: String,
    pub position: SourcePosition,
}

/// One import statement with its resolved target classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Bound local name for default / namespace imports.
    pub alias: Option<String>,
    /// Named imports in appearance order (local bound names).
    pub imported_names: Vec<String>,
    /// Raw module string as written in the source.
    pub specifier: String,
    pub is_external_library: bool,
    /// Resolved file location; `None` for external libraries.
    pub absolute_path: Option<PathBuf>,
}

impl Dependency {
    /// Whether this import binds `name` locally, either as the alias or
    /// as one of the named imports.
    pub fn binds(&self, name: &str) -> bool {
        self.alias.as_deref() == Some(name) || self.imported_names.iter().any(|n| n == name)
    }
}

/// One class (or interface) with its extracted declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassModel {
    pub name: String,
    /// Raw text span: signature line through closing brace.
    pub text: String,
    pub variables: Vec<Variable>,
    pub input_fields: Vec<InputField>,
    pub properties: Vec<Property>,
    pub methods: Vec<Method>,
}

impl ClassModel {
    /// All declarations of every kind.
    pub fn members(&self) -> impl Iterator<Item = Declaration<'_>> {
        self.variables
            .iter()
            .map(Declaration::Variable)
            .chain(self.methods.iter().map(Declaration::Method))
            .chain(self.properties.iter().map(Declaration::Property))
            .chain(self.input_fields.iter().map(Declaration::InputField))
    }

    /// Field-like declarations only (variables, properties, input fields)
    /// that a member chain can step through.
    pub fn fields(&self) -> impl Iterator<Item = Declaration<'_>> {
        self.variables
            .iter()
            .map(Declaration::Variable)
            .chain(self.properties.iter().map(Declaration::Property))
            .chain(self.input_fields.iter().map(Declaration::InputField))
    }
}

/// The full structural model of one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileModel {
    pub path: PathBuf,
    pub raw_text: String,
    pub dependencies: Vec<Dependency>,
    pub classes: Vec<ClassModel>,
}

impl FileModel {
    /// Find a member of any kind by name, with the class that owns it.
    pub fn find_declaration(&self, name: &str) -> Option<(&ClassModel, Declaration<'_>)> {
        self.classes.iter().find_map(|class| {
            class
                .members()
                .find(|member| member.name() == name)
                .map(|member| (class, member))
        })
    }

    /// Find a field-like member by name across all classes.
    pub fn find_field(&self, name: &str) -> Option<Declaration<'_>> {
        self.classes
            .iter()
            .flat_map(|class| class.fields())
            .find(|field| field.name() == name)
    }

    /// Find the dependency whose binding matches `name`, if any.
    pub fn dependency_binding(&self, name: &str) -> Option<&Dependency> {
        self.dependencies.iter().find(|dep| dep.binds(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_type_classification() {
        assert!(is_simple_type("string"));
        assert!(is_simple_type("Number"));
        assert!(is_simple_type("Array<boolean>"));
        assert!(is_simple_type("string[]"));
        assert!(!is_simple_type("Bar"));
        assert!(!is_simple_type("Array<Bar>"));
        // Whole-type match: containing a primitive name is not enough.
        assert!(!is_simple_type("MyStringBuilder"));
    }

    #[test]
    fn test_array_type_classification() {
        assert!(is_array_type("string[]"));
        assert!(is_array_type("Bar[ ] "));
        assert!(!is_array_type("Array<Bar>"));
        assert!(!is_array_type("Bar"));
    }

    #[test]
    fn test_variable_display() {
        let variable = Variable {
            name: "count".into(),
            access: AccessLevel::Private,
            declared_type: Some("number".into()),
            default_value: Some("0".into()),
            position: SourcePosition::UNRESOLVED,
        };
        assert_eq!(
            variable.to_display_string("Counter"),
            "(variable)\nprivate Counter.count: number = 0"
        );
    }

    #[test]
    fn test_property_display_with_setter() {
        let property = Property {
            name: "title".into(),
            access: AccessLevel::Public,
            declared_type: Some("string".into()),
            setter_parameter: Some(MethodParameter {
                name: "value".into(),
                declared_type: Some("string".into()),
                default_value: None,
            }),
            position: SourcePosition::UNRESOLVED,
        };
        assert_eq!(
            property.to_display_string("Page"),
            "(property)\npublic Page.title: string\n\nset (property) public Page.title(value: string)"
        );
    }

    #[test]
    fn test_input_field_display() {
        let field = InputField {
            name: "limit".into(),
            access: AccessLevel::Public,
            declared_type: Some("number".into()),
            default_value: Some("1".into()),
            required: Some(true),
            position: SourcePosition::UNRESOLVED,
        };
        assert_eq!(
            field.to_display_string("Grid"),
            "(input property)\npublic Grid.limit: number\n\ndefault: 1\n\nrequired"
        );
    }

    #[test]
    fn test_method_display() {
        let method = Method {
            name: "send".into(),
            access: AccessLevel::Unspecified,
            parameters: vec![
                MethodParameter {
                    name: "payload".into(),
                    declared_type: Some("Message".into()),
                    default_value: None,
                },
                MethodParameter {
                    name: "retries".into(),
                    declared_type: Some("number".into()),
                    default_value: Some("3".into()),
                },
            ],
            return_type: Some("boolean".into()),
            position: SourcePosition::UNRESOLVED,
        };
        assert_eq!(
            method.to_display_string("Mailer"),
            "(method)\nMailer.send(payload: Message, retries: number = 3): boolean"
        );
    }

    #[test]
    fn test_dependency_binds() {
        let dep = Dependency {
            alias: Some("Foo".into()),
            imported_names: vec!["Bar".into(), "Baz".into()],
            specifier: "./foo".into(),
            is_external_library: false,
            absolute_path: None,
        };
        assert!(dep.binds("Foo"));
        assert!(dep.binds("Baz"));
        assert!(!dep.binds("Qux"));
    }
}
