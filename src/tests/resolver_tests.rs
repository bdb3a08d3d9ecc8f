// Cross-file member-chain resolution tests
//
// These build a real project tree on disk (manifest, compiler config,
// source files) and resolve chains across it.

use crate::model::DeclarationKind;
use crate::resolve::{IdentifierToken, identifier_chain_at};
use crate::workspace::Workspace;
use std::fs;
use tempfile::TempDir;

fn token(name: &str) -> IdentifierToken {
    IdentifierToken {
        name: name.to_string(),
        start_index: 0,
        end_index: name.len(),
    }
}

/// root/
///   package.json        declares `vue` and `typescript` as libraries
///   tsconfig.json       maps `@models/*` to `src/models/*`
///   src/views/cart.ts   CartView { basket: Basket, tags: Label[], owner: Owner }
///   src/models/basket.ts  Basket { items: Item[], owner: Owner, total() }
///   src/models/item.ts  Item { price: number }
fn build_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    fs::write(
        root.join("package.json"),
        r#"{
  "dependencies": { "vue": "^2.6.0" },
  "devDependencies": { "typescript": "^4.0.0" }
}"#,
    )
    .unwrap();
    fs::write(
        root.join("tsconfig.json"),
        r#"{
  "compilerOptions": {
    /* alias targets are root-relative */
    "paths": {
      "@models/*": ["src/models/*"]
    }
  }
}"#,
    )
    .unwrap();

    fs::create_dir_all(root.join("src/views")).unwrap();
    fs::create_dir_all(root.join("src/models")).unwrap();

    fs::write(
        root.join("src/views/cart.ts"),
        "import Vue from 'vue';\n\
         import { Basket } from '@models/basket';\n\
         import { Label } from '@models/label';\n\
         import { Owner } from '@models/owner';\n\
         \n\
         export default class CartView extends Vue {\n\
         \tpublic basket: Basket;\n\
         \ttags: Label[];\n\
         \towner: Owner;\n\
         \n\
         \tcheckout(): void {\n\
         \t}\n\
         }\n",
    )
    .unwrap();
    fs::write(
        root.join("src/models/basket.ts"),
        "import { Item } from './item';\n\
         \n\
         export class Basket {\n\
         \titems: Item[] = [];\n\
         \towner: string;\n\
         \n\
         \ttotal(): number {\n\
         \t\treturn 0;\n\
         \t}\n\
         \n\
         \tget empty(): boolean {\n\
         \t\treturn this.items.length === 0;\n\
         \t}\n\
         }\n",
    )
    .unwrap();
    fs::write(
        root.join("src/models/item.ts"),
        "export class Item {\n\
         \tprice: number = 0;\n\
         }\n",
    )
    .unwrap();

    dir
}

#[test]
fn test_single_element_chain_is_a_noop() {
    let project = build_project();
    let workspace = Workspace::new();
    let model = workspace
        .parse_file(&project.path().join("src/views/cart.ts"))
        .unwrap();
    let resolved = workspace.resolve_chain(&[token("basket")], model.clone());
    assert_eq!(resolved, model);
}

#[test]
fn test_chain_hops_into_declaring_file() {
    let project = build_project();
    let workspace = Workspace::new();
    let model = workspace
        .parse_file(&project.path().join("src/views/cart.ts"))
        .unwrap();

    let declaring = workspace.resolve_chain(&[token("basket"), token("total")], model);
    assert_eq!(
        declaring.path,
        project.path().join("src/models/basket.ts")
    );

    let (class, member) = declaring.find_declaration("total").unwrap();
    assert_eq!(class.name, "Basket");
    assert_eq!(member.kind(), DeclarationKind::Method);
    assert!(member.position().is_resolved());
}

#[test]
fn test_leading_this_is_stepped_over() {
    let project = build_project();
    let workspace = Workspace::new();
    let model = workspace
        .parse_file(&project.path().join("src/views/cart.ts"))
        .unwrap();

    let declaring =
        workspace.resolve_chain(&[token("this"), token("basket"), token("empty")], model);
    assert_eq!(
        declaring.path,
        project.path().join("src/models/basket.ts")
    );
    let (_, member) = declaring.find_declaration("empty").unwrap();
    assert_eq!(member.kind(), DeclarationKind::Property);
}

#[test]
fn test_array_typed_field_never_hops() {
    let project = build_project();
    let workspace = Workspace::new();
    let model = workspace
        .parse_file(&project.path().join("src/views/cart.ts"))
        .unwrap();
    let view_path = model.path.clone();

    // `tags: Label[]` has a same-named import binding, but the array type
    // short-circuits resolution.
    let resolved = workspace.resolve_chain(&[token("tags"), token("anything")], model);
    assert_eq!(resolved.path, view_path);
}

#[test]
fn test_simple_typed_field_never_hops() {
    let project = build_project();
    let workspace = Workspace::new();
    let model = workspace
        .parse_file(&project.path().join("src/models/basket.ts"))
        .unwrap();
    let basket_path = model.path.clone();

    let resolved = workspace.resolve_chain(&[token("owner"), token("length")], model);
    assert_eq!(resolved.path, basket_path);
}

#[test]
fn test_unknown_field_returns_current_model() {
    let project = build_project();
    let workspace = Workspace::new();
    let model = workspace
        .parse_file(&project.path().join("src/views/cart.ts"))
        .unwrap();
    let view_path = model.path.clone();

    let resolved = workspace.resolve_chain(&[token("ghost"), token("x")], model);
    assert_eq!(resolved.path, view_path);
}

#[test]
fn test_method_links_do_not_navigate() {
    let project = build_project();
    let workspace = Workspace::new();
    let model = workspace
        .parse_file(&project.path().join("src/views/cart.ts"))
        .unwrap();
    let view_path = model.path.clone();

    // `checkout` is a method; a call result is not a navigable field.
    let resolved = workspace.resolve_chain(&[token("checkout"), token("x")], model);
    assert_eq!(resolved.path, view_path);
}

#[test]
fn test_missing_dependency_file_degrades_gracefully() {
    let project = build_project();
    let workspace = Workspace::new();
    let model = workspace
        .parse_file(&project.path().join("src/views/cart.ts"))
        .unwrap();
    let view_path = model.path.clone();

    // The Owner model file was never written; `@models/owner` resolves to
    // a path that does not exist.
    let resolved = workspace.resolve_chain(&[token("owner"), token("name")], model);
    assert_eq!(resolved.path, view_path);
}

#[test]
fn test_external_library_import_is_classified() {
    let project = build_project();
    let workspace = Workspace::new();
    let model = workspace
        .parse_file(&project.path().join("src/views/cart.ts"))
        .unwrap();

    let vue = model
        .dependencies
        .iter()
        .find(|d| d.specifier == "vue")
        .unwrap();
    assert!(vue.is_external_library);
    assert_eq!(vue.absolute_path, None);

    let basket = model
        .dependencies
        .iter()
        .find(|d| d.specifier == "@models/basket")
        .unwrap();
    assert!(!basket.is_external_library);
    assert_eq!(
        basket.absolute_path.as_deref(),
        Some(project.path().join("src/models/basket.ts").as_path())
    );
}

#[test]
fn test_use_site_line_to_declaration() {
    let project = build_project();
    let workspace = Workspace::new();
    let model = workspace
        .parse_file(&project.path().join("src/views/cart.ts"))
        .unwrap();

    let line = "\t\tconst sum = this.basket.total();";
    let cursor = line.find("total").unwrap() + 1;
    let chain = identifier_chain_at(line, cursor);
    let names: Vec<&str> = chain.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["this", "basket", "total"]);

    let declaring = workspace.resolve_chain(&chain, model);
    let (class, member) = declaring.find_declaration("total").unwrap();
    assert_eq!(class.name, "Basket");
    assert_eq!(
        member.to_display_string(&class.name),
        "(method)\nBasket.total(): number"
    );
}
