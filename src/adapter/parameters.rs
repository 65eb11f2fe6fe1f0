//! Path-scope and operation-scope parameter merging

use super::schema::adapt_schema_ref;
use crate::document::{Document, Parameter as DocParameter, RefOr};
use crate::types::{Parameter, ParameterLocation};
use std::borrow::Cow;
use std::collections::HashSet;

/// A parameter slot after reference resolution; `None` when it did not resolve
pub type ParamSlot<'a> = Option<&'a DocParameter>;

/// Merges path-scope parameters into an operation's own list
///
/// Operation parameters win over scope parameters with the same
/// `(in, name)` key. Empty slots on the operation side are carried through
/// unchanged but never match anything; empty slots on the scope side are
/// dropped. When either side is empty the other is returned without copying.
pub fn merge_parameters<'p, 'a>(
    scope: &'p [ParamSlot<'a>],
    operation: &'p [ParamSlot<'a>],
) -> Cow<'p, [ParamSlot<'a>]> {
    if scope.is_empty() {
        return Cow::Borrowed(operation);
    }
    if operation.is_empty() {
        return Cow::Borrowed(scope);
    }

    let overridden: HashSet<(&str, &str)> = operation
        .iter()
        .flatten()
        .map(|p| (p.location.as_str(), p.name.as_str()))
        .collect();

    let mut merged: Vec<ParamSlot<'a>> = scope
        .iter()
        .flatten()
        .filter(|p| !overridden.contains(&(p.location.as_str(), p.name.as_str())))
        .map(|p| Some(*p))
        .collect();
    merged.extend_from_slice(operation);

    Cow::Owned(merged)
}

/// Resolves each entry of a parameter list, keeping slot positions
pub fn resolve_parameters<'a>(
    doc: &'a Document,
    params: &'a [RefOr<DocParameter>],
) -> Vec<ParamSlot<'a>> {
    params.iter().map(|p| doc.resolve(p)).collect()
}

/// Converts resolved parameters into domain parameters
///
/// Empty slots and parameters with an unknown `in` value are dropped.
pub fn adapt_parameters(
    doc: &Document,
    params: &[ParamSlot<'_>],
    schema_depth: usize,
) -> Vec<Parameter> {
    params
        .iter()
        .flatten()
        .filter_map(|p| {
            let Some(location) = ParameterLocation::parse(&p.location) else {
                tracing::debug!(
                    name = %p.name,
                    location = %p.location,
                    "skipping parameter with unknown location"
                );
                return None;
            };
            Some(Parameter {
                name: p.name.clone(),
                location,
                description: p.description.clone().unwrap_or_default(),
                required: p.required.unwrap_or(false),
                schema: adapt_schema_ref(doc, p.schema.as_ref(), schema_depth),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, location: &str, description: &str) -> DocParameter {
        DocParameter {
            name: name.to_string(),
            location: location.to_string(),
            description: Some(description.to_string()),
            ..Default::default()
        }
    }

    fn descriptions(slots: &[ParamSlot<'_>]) -> Vec<Option<String>> {
        slots
            .iter()
            .map(|s| s.and_then(|p| p.description.clone()))
            .collect()
    }

    #[test]
    fn test_operation_overrides_scope() {
        let scope_id = param("id", "path", "scope");
        let scope_limit = param("limit", "query", "scope");
        let op_id = param("id", "path", "op");

        let scope = [Some(&scope_id), Some(&scope_limit)];
        let operation = [Some(&op_id)];
        let merged = merge_parameters(&scope, &operation);

        assert_eq!(
            descriptions(&merged),
            vec![Some("scope".to_string()), Some("op".to_string())]
        );
        assert_eq!(merged[0].unwrap().name, "limit");
        assert!(merged[0].is_some_and(|p| std::ptr::eq(p, &scope_limit)));
        assert!(merged[1].is_some_and(|p| std::ptr::eq(p, &op_id)));
    }

    #[test]
    fn test_key_includes_location() {
        let scope_id = param("id", "query", "scope");
        let op_id = param("id", "path", "op");

        let scope = [Some(&scope_id)];
        let operation = [Some(&op_id)];
        assert_eq!(merge_parameters(&scope, &operation).len(), 2);
    }

    #[test]
    fn test_empty_sides_are_borrowed() {
        let p = param("id", "path", "x");
        let one = [Some(&p)];

        assert!(matches!(merge_parameters(&[], &one), Cow::Borrowed(_)));
        assert!(matches!(merge_parameters(&one, &[]), Cow::Borrowed(_)));
    }

    #[test]
    fn test_empty_slots() {
        let scope_id = param("id", "path", "scope");
        let op_id = param("id", "path", "op");

        // Empty scope slots vanish; empty operation slots stay and override nothing.
        let scope = [None, Some(&scope_id)];
        let operation = [None, Some(&op_id)];
        let merged = merge_parameters(&scope, &operation);
        assert_eq!(descriptions(&merged), vec![None, Some("op".to_string())]);

        let operation = [None];
        let merged = merge_parameters(&scope, &operation);
        assert_eq!(descriptions(&merged), vec![Some("scope".to_string()), None]);
    }

    #[test]
    fn test_adapt_drops_empty_and_unknown() {
        let doc = Document::default();
        let id = param("id", "path", "pet id");
        let body = param("payload", "body", "swagger 2 leftover");
        let limit = DocParameter {
            required: Some(true),
            ..param("limit", "query", "")
        };

        let adapted = adapt_parameters(&doc, &[Some(&id), None, Some(&body), Some(&limit)], 3);
        assert_eq!(adapted.len(), 2);
        assert_eq!(adapted[0].location, ParameterLocation::Path);
        assert!(!adapted[0].required);
        assert_eq!(adapted[1].name, "limit");
        assert!(adapted[1].required);
        assert!(adapted[1].schema.is_none());
    }

    #[test]
    fn test_resolve_keeps_slots() {
        let mut doc = Document::default();
        doc.components
            .parameters
            .insert("Limit".to_string(), RefOr::Item(param("limit", "query", "")));

        let params = vec![
            RefOr::Ref("#/components/parameters/Limit".to_string()),
            RefOr::Ref("#/components/parameters/Missing".to_string()),
        ];
        let slots = resolve_parameters(&doc, &params);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].unwrap().name, "limit");
        assert!(slots[1].is_none());
    }
}
