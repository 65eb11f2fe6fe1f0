//! Typed view of a raw OpenAPI 3.x description document.
//!
//! This is the loader side of the crate: it mirrors the document's own shape
//! (optional fields stay optional, `$ref`s stay unresolved) and hands out
//! resolved nodes on demand through [`Document::resolve`]. Nothing here is
//! validated beyond what is needed to read it.

pub mod loader;
pub mod parse;

pub use loader::{DocumentLoader, SourceKind};
pub use parse::{parse_document, parse_str};

use crate::types::HttpMethod;
use std::collections::{BTreeMap, HashMap};

/// Maximum number of `$ref` hops followed before giving up on a chain
pub const MAX_REF_HOPS: usize = 16;

/// A node that is either inline or a `$ref` to a component
#[derive(Debug, Clone, PartialEq)]
pub enum RefOr<T> {
    Ref(String),
    Item(T),
}

impl<T> RefOr<T> {
    /// Returns the inline item, if any
    pub fn as_item(&self) -> Option<&T> {
        match self {
            RefOr::Item(item) => Some(item),
            RefOr::Ref(_) => None,
        }
    }

    /// Returns the reference string, if any
    pub fn reference(&self) -> Option<&str> {
        match self {
            RefOr::Ref(reference) => Some(reference),
            RefOr::Item(_) => None,
        }
    }
}

/// Component kinds that can be the target of a local `$ref`
pub trait Referenceable: Sized {
    /// Section name under `#/components/`
    const KIND: &'static str;

    /// Returns the component table for this kind
    fn table(components: &Components) -> &HashMap<String, RefOr<Self>>;
}

/// Parsed description document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub info: Info,
    pub servers: Vec<Server>,
    /// Path items keyed by template
    pub paths: Vec<(String, PathItem)>,
    pub components: Components,
}

impl Document {
    /// Resolves a node, following local component references
    ///
    /// Returns `None` for external references, dangling names and chains
    /// longer than [`MAX_REF_HOPS`] (which covers ref cycles).
    pub fn resolve<'a, T: Referenceable>(&'a self, node: &'a RefOr<T>) -> Option<&'a T> {
        let mut current = node;
        for _ in 0..MAX_REF_HOPS {
            match current {
                RefOr::Item(item) => return Some(item),
                RefOr::Ref(reference) => {
                    let name = component_name(reference, T::KIND)?;
                    current = T::table(&self.components).get(&name)?;
                }
            }
        }
        None
    }

    /// Total number of (path, method) pairs in the document
    pub fn operation_count(&self) -> usize {
        self.paths
            .iter()
            .map(|(_, item)| item.operations().count())
            .sum()
    }
}

/// Extracts and unescapes the component name from `#/components/<kind>/<name>`
fn component_name(reference: &str, kind: &str) -> Option<String> {
    let name = reference
        .strip_prefix("#/components/")?
        .strip_prefix(kind)?
        .strip_prefix('/')?;
    if name.is_empty() || name.contains('/') {
        return None;
    }
    Some(name.replace("~1", "/").replace("~0", "~"))
}

/// Info object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Info {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
}

/// Server object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Server {
    pub url: String,
    pub description: Option<String>,
}

/// Path item: up to seven operations plus shared parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub post: Option<Operation>,
    pub put: Option<Operation>,
    pub patch: Option<Operation>,
    pub delete: Option<Operation>,
    pub head: Option<Operation>,
    pub options: Option<Operation>,
    pub parameters: Vec<RefOr<Parameter>>,
}

impl PathItem {
    /// Iterates the operations defined on this path
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        [
            (HttpMethod::Get, &self.get),
            (HttpMethod::Post, &self.post),
            (HttpMethod::Put, &self.put),
            (HttpMethod::Patch, &self.patch),
            (HttpMethod::Delete, &self.delete),
            (HttpMethod::Head, &self.head),
            (HttpMethod::Options, &self.options),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
    }

    /// Returns the slot for a method
    pub fn operation_mut(&mut self, method: HttpMethod) -> &mut Option<Operation> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Patch => &mut self.patch,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Head => &mut self.head,
            HttpMethod::Options => &mut self.options,
        }
    }
}

/// Operation object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub parameters: Vec<RefOr<Parameter>>,
    pub request_body: Option<RefOr<RequestBody>>,
    /// Responses keyed by status code (or `default`)
    pub responses: Vec<(String, RefOr<Response>)>,
}

/// Parameter object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameter {
    pub name: String,
    /// Raw `in` value
    pub location: String,
    pub description: Option<String>,
    pub required: Option<bool>,
    pub schema: Option<RefOr<SchemaObject>>,
}

impl Referenceable for Parameter {
    const KIND: &'static str = "parameters";

    fn table(components: &Components) -> &HashMap<String, RefOr<Self>> {
        &components.parameters
    }
}

/// Request body object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBody {
    pub description: Option<String>,
    pub content: BTreeMap<String, MediaType>,
    pub required: Option<bool>,
}

impl Referenceable for RequestBody {
    const KIND: &'static str = "requestBodies";

    fn table(components: &Components) -> &HashMap<String, RefOr<Self>> {
        &components.request_bodies
    }
}

/// Response object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub description: Option<String>,
    pub content: BTreeMap<String, MediaType>,
    pub headers: BTreeMap<String, RefOr<Header>>,
}

impl Referenceable for Response {
    const KIND: &'static str = "responses";

    fn table(components: &Components) -> &HashMap<String, RefOr<Self>> {
        &components.responses
    }
}

/// Media type object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaType {
    pub schema: Option<RefOr<SchemaObject>>,
}

/// Header object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    pub description: Option<String>,
    pub schema: Option<RefOr<SchemaObject>>,
}

impl Referenceable for Header {
    const KIND: &'static str = "headers";

    fn table(components: &Components) -> &HashMap<String, RefOr<Self>> {
        &components.headers
    }
}

/// Schema object, limited to the fields the browser displays
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaObject {
    /// Declared type; for 3.1 type arrays, the first non-`null` entry
    pub schema_type: Option<String>,
    pub format: Option<String>,
    pub description: Option<String>,
    pub required: Vec<String>,
    pub properties: BTreeMap<String, RefOr<SchemaObject>>,
    pub items: Option<Box<RefOr<SchemaObject>>>,
    pub enum_values: Vec<serde_json::Value>,
}

impl Referenceable for SchemaObject {
    const KIND: &'static str = "schemas";

    fn table(components: &Components) -> &HashMap<String, RefOr<Self>> {
        &components.schemas
    }
}

/// Reusable components
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Components {
    pub schemas: HashMap<String, RefOr<SchemaObject>>,
    pub parameters: HashMap<String, RefOr<Parameter>>,
    pub request_bodies: HashMap<String, RefOr<RequestBody>>,
    pub responses: HashMap<String, RefOr<Response>>,
    pub headers: HashMap<String, RefOr<Header>>,
}
