//! Catalog queries over the petstore fixture

use dazzle::prelude::*;

fn petstore() -> Spec {
    let doc = parse_str(include_str!("fixtures/petstore.yaml")).unwrap();
    adapt_spec(&doc, SCHEMA_MAX_DEPTH)
}

fn ids(ops: &[&Operation]) -> Vec<String> {
    ops.iter().map(|op| op.id.clone()).collect()
}

#[test]
fn test_list_returns_everything() {
    let spec = petstore();
    let catalog = OperationCatalog::new();
    assert_eq!(catalog.list(&spec).len(), spec.operations.len());
}

#[test]
fn test_sorted_fixture_order() {
    let spec = petstore();
    let sorted = OperationCatalog::new().sort(&spec.operations);
    let order: Vec<_> = sorted.iter().map(|op| op.id.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "listPets",
            "createPets",
            "showPetById",
            "DELETE /pets/{petId}",
            "listUsers",
        ]
    );
}

#[test]
fn test_sort_leaves_input_untouched() {
    let spec = petstore();
    let before = spec.operations.clone();
    let _ = OperationCatalog::new().sort(&spec.operations);
    assert_eq!(spec.operations, before);
}

#[test]
fn test_filter_by_query_matches_path_or_summary() {
    let spec = petstore();
    let catalog = OperationCatalog::new();

    let by_summary = OperationFilter {
        query: "REMOVE".to_string(),
        ..Default::default()
    };
    assert_eq!(
        ids(&catalog.filter(&spec.operations, &by_summary)),
        vec!["DELETE /pets/{petId}"]
    );

    let by_path = OperationFilter {
        query: "/users".to_string(),
        ..Default::default()
    };
    assert_eq!(ids(&catalog.filter(&spec.operations, &by_path)), vec!["listUsers"]);
}

#[test]
fn test_filter_combines_criteria() {
    let spec = petstore();
    let catalog = OperationCatalog::new();

    let filter = OperationFilter {
        query: "pet".to_string(),
        tags: vec!["admin".to_string()],
        method: Some(HttpMethod::Delete),
    };
    assert_eq!(
        ids(&catalog.filter(&spec.operations, &filter)),
        vec!["DELETE /pets/{petId}"]
    );

    let wrong_method = OperationFilter {
        method: Some(HttpMethod::Get),
        ..filter
    };
    assert!(catalog.filter(&spec.operations, &wrong_method).is_empty());
}

#[test]
fn test_tag_match_is_exact() {
    let spec = petstore();
    let filter = OperationFilter {
        tags: vec!["Pets".to_string()],
        ..Default::default()
    };
    assert!(OperationCatalog::new()
        .filter(&spec.operations, &filter)
        .is_empty());
}
