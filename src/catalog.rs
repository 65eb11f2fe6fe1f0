//! Listing, filtering and ordering of operations

use crate::types::{HttpMethod, Operation, OperationFilter, Spec};

/// Stateless query helpers over a spec's operations
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationCatalog;

impl OperationCatalog {
    /// Creates a new catalog
    pub fn new() -> Self {
        Self
    }

    /// Returns the spec's operations unfiltered, in source order
    pub fn list<'a>(&self, spec: &'a Spec) -> &'a [Operation] {
        &spec.operations
    }

    /// Keeps the operations matching every criterion of `filter`
    pub fn filter<'a>(
        &self,
        operations: &'a [Operation],
        filter: &OperationFilter,
    ) -> Vec<&'a Operation> {
        let query = filter.query.to_lowercase();
        operations
            .iter()
            .filter(|op| matches(op, filter, &query))
            .collect()
    }

    /// Returns a copy ordered by path, then by method rank
    pub fn sort(&self, operations: &[Operation]) -> Vec<Operation> {
        let mut sorted = operations.to_vec();
        // sort_by is stable
        sorted.sort_by(|a, b| {
            a.path
                .cmp(&b.path)
                .then_with(|| method_rank(a.method).cmp(&method_rank(b.method)))
        });
        sorted
    }
}

/// Display rank of a method: GET first, OPTIONS last
pub fn method_rank(method: HttpMethod) -> u8 {
    match method {
        HttpMethod::Get => 1,
        HttpMethod::Post => 2,
        HttpMethod::Put => 3,
        HttpMethod::Patch => 4,
        HttpMethod::Delete => 5,
        HttpMethod::Head => 6,
        HttpMethod::Options => 7,
    }
}

fn matches(op: &Operation, filter: &OperationFilter, query: &str) -> bool {
    if !query.is_empty()
        && !op.path.to_lowercase().contains(query)
        && !op.summary.to_lowercase().contains(query)
    {
        return false;
    }

    if filter.method.is_some_and(|m| m != op.method) {
        return false;
    }

    if !filter.tags.is_empty() && !op.tags.iter().any(|t| filter.tags.contains(t)) {
        return false;
    }

    true
}
