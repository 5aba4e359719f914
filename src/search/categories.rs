//! Category list and picker filtering.
//!
//! Categories are fetched once per plugin instance. A failed fetch leaves the
//! list empty; the picker then simply has nothing to offer.

use crate::catalog::{ApiRequest, CatalogClient, RequestId, Response};
use crate::domain::Category;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// A category name that survived the picker filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMatch {
    pub name: String,
    /// `(start, end)` character ranges to highlight, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Default)]
pub struct CategoryList {
    categories: Vec<Category>,
    request: Option<RequestId>,
    requested: bool,
}

impl CategoryList {
    /// Issues the one-time category fetch. Later calls return `None`.
    pub fn fetch_once(&mut self, client: &mut CatalogClient) -> Option<ApiRequest> {
        if self.requested {
            return None;
        }
        self.requested = true;
        let request = client.list_categories(None);
        self.request = Some(request.id);
        Some(request)
    }

    #[must_use]
    pub fn is_current(&self, id: RequestId) -> bool {
        self.request == Some(id)
    }

    pub fn apply(&mut self, response: &Response) -> bool {
        if !self.is_current(response.id) {
            return false;
        }
        self.request = None;
        self.categories = response.categories().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "category list unavailable");
            Vec::new()
        });
        tracing::debug!(count = self.categories.len(), "categories loaded");
        true
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Filters category names with a fuzzy pattern.
    ///
    /// An empty pattern keeps every category in catalog order; otherwise
    /// matches are ordered by score, best first.
    #[must_use]
    pub fn filter(&self, pattern: &str) -> Vec<CategoryMatch> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return self
                .categories
                .iter()
                .map(|c| CategoryMatch {
                    name: c.name.clone(),
                    highlight_ranges: Vec::new(),
                })
                .collect();
        }

        let matcher = SkimMatcherV2::default().ignore_case();
        let mut scored: Vec<(i64, CategoryMatch)> = self
            .categories
            .iter()
            .filter_map(|c| {
                matcher.fuzzy_indices(&c.name, pattern).map(|(score, indices)| {
                    (
                        score,
                        CategoryMatch {
                            name: c.name.clone(),
                            highlight_ranges: coalesce(&indices),
                        },
                    )
                })
            })
            .collect();
        // Stable, so equal scores keep catalog order.
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, m)| m).collect()
    }
}

/// Collapses sorted character indices into contiguous `(start, end)` runs.
fn coalesce(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Settlement;

    fn loaded(names: &[&str]) -> CategoryList {
        let mut client = CatalogClient::default();
        let mut list = CategoryList::default();
        let request = list.fetch_once(&mut client).unwrap();
        let categories: Vec<_> = names
            .iter()
            .map(|n| serde_json::json!({ "idCategory": "1", "strCategory": n }))
            .collect();
        let body = serde_json::json!({ "categories": categories }).to_string();
        let Settlement::Delivered(response) = client.settle(request.id, 200, body.as_bytes()) else {
            panic!("expected delivery");
        };
        assert!(list.apply(&response));
        list
    }

    #[test]
    fn fetches_only_once() {
        let mut client = CatalogClient::default();
        let mut list = CategoryList::default();
        assert!(list.fetch_once(&mut client).is_some());
        assert!(list.fetch_once(&mut client).is_none());
    }

    #[test]
    fn failed_fetch_leaves_list_empty() {
        let mut client = CatalogClient::default();
        let mut list = CategoryList::default();
        let request = list.fetch_once(&mut client).unwrap();
        let Settlement::Delivered(response) = client.settle(request.id, 502, b"") else {
            panic!("expected delivery");
        };
        assert!(list.apply(&response));
        assert!(list.is_empty());
    }

    #[test]
    fn empty_pattern_keeps_catalog_order() {
        let list = loaded(&["Beef", "Chicken", "Dessert"]);
        let names: Vec<_> = list.filter("").into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Beef", "Chicken", "Dessert"]);
    }

    #[test]
    fn fuzzy_filter_highlights_matches() {
        let list = loaded(&["Beef", "Seafood", "Side"]);
        let matches = list.filter("sea");
        assert_eq!(matches[0].name, "Seafood");
        assert_eq!(matches[0].highlight_ranges, vec![(0, 3)]);
        assert!(matches.iter().all(|m| m.name != "Beef"));
    }

    #[test]
    fn coalesces_runs() {
        assert_eq!(coalesce(&[0, 1, 2, 5, 7, 8]), vec![(0, 3), (5, 6), (7, 9)]);
        assert!(coalesce(&[]).is_empty());
    }
}
