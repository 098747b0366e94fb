use crate::model::RecipeSummary;

/// A query and the results the catalog returned for it.
///
/// Each search produces a new session; results are never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSession {
    pub query: String,
    pub results: Vec<RecipeSummary>,
}

impl SearchSession {
    pub fn new(query: impl Into<String>, results: Vec<RecipeSummary>) -> Self {
        Self {
            query: query.into(),
            results,
        }
    }

    pub fn find(&self, id: &str) -> Option<&RecipeSummary> {
        self.results.iter().find(|summary| summary.id == id)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
