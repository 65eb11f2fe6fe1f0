//! Conversion from a parsed [`Document`] into the domain [`Spec`]
//!
//! The adapter never fails. References that do not resolve are treated as
//! absent: a missing schema becomes `None`, a missing parameter, header or
//! response is dropped, and a missing request body leaves the operation
//! without one.

pub mod parameters;
pub mod schema;

pub use parameters::{adapt_parameters, merge_parameters, resolve_parameters, ParamSlot};
pub use schema::{adapt_schema, adapt_schema_ref, SCHEMA_MAX_DEPTH};

use crate::document::{self, Document};
use crate::types::{
    Header, HttpMethod, MediaType, Operation, RequestBody, Response, Server, Spec, SpecInfo,
};
use std::collections::BTreeMap;

/// Builds a [`Spec`] from a document
#[derive(Debug, Clone, Copy)]
pub struct SpecAdapter<'a> {
    doc: &'a Document,
    schema_depth: usize,
}

impl<'a> SpecAdapter<'a> {
    /// Creates an adapter using the default schema depth
    pub fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            schema_depth: SCHEMA_MAX_DEPTH,
        }
    }

    /// Overrides how many nested schema levels are expanded
    pub fn with_schema_depth(mut self, depth: usize) -> Self {
        self.schema_depth = depth;
        self
    }

    /// Runs the conversion
    pub fn adapt(&self) -> Spec {
        let doc = self.doc;
        let operations = doc
            .paths
            .iter()
            .flat_map(|(path, item)| self.path_operations(path, item))
            .collect();

        Spec {
            info: SpecInfo {
                title: doc.info.title.clone(),
                description: doc.info.description.clone().unwrap_or_default(),
                version: doc.info.version.clone(),
            },
            servers: doc
                .servers
                .iter()
                .map(|s| Server {
                    url: s.url.clone(),
                    description: s.description.clone().unwrap_or_default(),
                })
                .collect(),
            operations,
        }
    }

    fn path_operations(&self, path: &str, item: &document::PathItem) -> Vec<Operation> {
        let scope = resolve_parameters(self.doc, &item.parameters);
        item.operations()
            .map(|(method, op)| self.operation(path, method, op, &scope))
            .collect()
    }

    fn operation(
        &self,
        path: &str,
        method: HttpMethod,
        op: &document::Operation,
        scope: &[ParamSlot<'_>],
    ) -> Operation {
        let own = resolve_parameters(self.doc, &op.parameters);
        let merged = merge_parameters(scope, &own);

        let id = op
            .operation_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Operation::synthesized_id(method, path));

        Operation {
            id,
            path: path.to_string(),
            method,
            summary: op.summary.clone().unwrap_or_default(),
            description: op.description.clone().unwrap_or_default(),
            tags: op.tags.clone(),
            parameters: adapt_parameters(self.doc, &merged, self.schema_depth),
            request_body: op
                .request_body
                .as_ref()
                .and_then(|body| self.request_body(body)),
            responses: self.responses(&op.responses),
        }
    }

    fn request_body(
        &self,
        body: &document::RefOr<document::RequestBody>,
    ) -> Option<RequestBody> {
        let body = self.doc.resolve(body)?;
        Some(RequestBody {
            description: body.description.clone().unwrap_or_default(),
            required: body.required.unwrap_or(false),
            content: self.content(&body.content),
        })
    }

    fn responses(
        &self,
        responses: &[(String, document::RefOr<document::Response>)],
    ) -> BTreeMap<String, Response> {
        responses
            .iter()
            .filter_map(|(code, response)| {
                let response = self.doc.resolve(response)?;
                Some((
                    code.clone(),
                    Response {
                        description: response.description.clone().unwrap_or_default(),
                        content: self.content(&response.content),
                        headers: self.headers(&response.headers),
                    },
                ))
            })
            .collect()
    }

    fn headers(
        &self,
        headers: &BTreeMap<String, document::RefOr<document::Header>>,
    ) -> BTreeMap<String, Header> {
        headers
            .iter()
            .filter_map(|(name, header)| {
                let header = self.doc.resolve(header)?;
                Some((
                    name.clone(),
                    Header {
                        description: header.description.clone().unwrap_or_default(),
                        schema: adapt_schema_ref(
                            self.doc,
                            header.schema.as_ref(),
                            self.schema_depth,
                        ),
                    },
                ))
            })
            .collect()
    }

    fn content(
        &self,
        content: &BTreeMap<String, document::MediaType>,
    ) -> BTreeMap<String, MediaType> {
        content
            .iter()
            .map(|(media_type, entry)| {
                (
                    media_type.clone(),
                    MediaType {
                        schema: adapt_schema_ref(
                            self.doc,
                            entry.schema.as_ref(),
                            self.schema_depth,
                        ),
                    },
                )
            })
            .collect()
    }
}

/// Convenience wrapper around [`SpecAdapter`]
pub fn adapt_spec(doc: &Document, schema_depth: usize) -> Spec {
    SpecAdapter::new(doc).with_schema_depth(schema_depth).adapt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{PathItem, RefOr};

    fn doc_with(path: &str, item: PathItem) -> Document {
        Document {
            paths: vec![(path.to_string(), item)],
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_document_yields_no_operations() {
        let spec = adapt_spec(&Document::default(), SCHEMA_MAX_DEPTH);
        assert!(spec.operations.is_empty());
        assert_eq!(spec.info, SpecInfo::default());
    }

    #[test]
    fn test_path_without_methods_contributes_nothing() {
        let doc = doc_with("/empty", PathItem::default());
        assert!(adapt_spec(&doc, SCHEMA_MAX_DEPTH).operations.is_empty());
    }

    #[test]
    fn test_synthesized_and_explicit_ids() {
        let doc = doc_with(
            "/pets",
            PathItem {
                get: Some(document::Operation {
                    operation_id: Some("listPets".to_string()),
                    ..Default::default()
                }),
                post: Some(document::Operation {
                    operation_id: Some(String::new()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );

        let spec = adapt_spec(&doc, SCHEMA_MAX_DEPTH);
        let ids: Vec<&str> = spec.operations.iter().map(|op| op.id.as_str()).collect();
        assert!(ids.contains(&"listPets"));
        assert!(ids.contains(&"POST /pets"));
    }

    #[test]
    fn test_unresolved_nodes_are_dropped() {
        let mut headers = BTreeMap::new();
        headers.insert(
            "X-Rate".to_string(),
            RefOr::Ref("#/components/headers/Missing".to_string()),
        );
        let op = document::Operation {
            request_body: Some(RefOr::Ref("#/components/requestBodies/Missing".to_string())),
            responses: vec![
                (
                    "200".to_string(),
                    RefOr::Item(document::Response {
                        description: Some("ok".to_string()),
                        headers,
                        ..Default::default()
                    }),
                ),
                (
                    "404".to_string(),
                    RefOr::Ref("#/components/responses/Missing".to_string()),
                ),
            ],
            ..Default::default()
        };
        let doc = doc_with(
            "/pets",
            PathItem {
                get: Some(op),
                ..Default::default()
            },
        );

        let spec = adapt_spec(&doc, SCHEMA_MAX_DEPTH);
        let op = &spec.operations[0];
        assert!(op.request_body.is_none());
        assert_eq!(op.responses.len(), 1);
        assert_eq!(op.responses["200"].description, "ok");
        assert!(op.responses["200"].headers.is_empty());
    }
}
