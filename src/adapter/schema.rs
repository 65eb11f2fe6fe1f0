//! Depth-bounded schema conversion

use crate::document::{Document, RefOr, SchemaObject};
use crate::types::{Schema, SchemaType};

/// Nesting levels expanded below a top-level schema
pub const SCHEMA_MAX_DEPTH: usize = 3;

/// Converts a document schema into a [`Schema`] tree
///
/// Scalar fields are always copied. With `remaining_depth == 0` the node is
/// returned without `properties` or `items`; otherwise each child consumes
/// one level. A missing node yields `None`.
pub fn adapt_schema(
    doc: &Document,
    node: Option<&SchemaObject>,
    remaining_depth: usize,
) -> Option<Schema> {
    let node = node?;

    let mut schema = Schema {
        schema_type: node
            .schema_type
            .as_deref()
            .map(SchemaType::parse)
            .unwrap_or_default(),
        format: node.format.clone().unwrap_or_default(),
        description: node.description.clone().unwrap_or_default(),
        required: node.required.clone(),
        enum_values: node.enum_values.clone(),
        ..Default::default()
    };

    if remaining_depth == 0 {
        return Some(schema);
    }

    let child_depth = remaining_depth - 1;
    schema.items = adapt_schema_ref(doc, node.items.as_deref(), child_depth).map(Box::new);
    schema.properties = node
        .properties
        .iter()
        .map(|(name, prop)| (name.clone(), adapt_schema_ref(doc, Some(prop), child_depth)))
        .collect();

    Some(schema)
}

/// Resolves a possibly-referenced schema, then adapts it
pub fn adapt_schema_ref(
    doc: &Document,
    node: Option<&RefOr<SchemaObject>>,
    remaining_depth: usize,
) -> Option<Schema> {
    adapt_schema(doc, node.and_then(|n| doc.resolve(n)), remaining_depth)
}
