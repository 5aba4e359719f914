//! Fetch decision table.
//!
//! | category | query | fetch                                   |
//! |----------|-------|-----------------------------------------|
//! | set      | set   | filter by category, then keep name hits |
//! | set      | empty | filter by category                      |
//! | empty    | set   | search by name                          |
//! | empty    | empty | nothing                                 |

use crate::domain::RecipeSummary;

/// Which catalog call, if any, the current input requires.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchPlan {
    #[default]
    Nothing,
    ByCategory {
        category: String,
        /// Lowercased query; only names containing it are kept.
        name_filter: Option<String>,
    },
    ByName {
        query: String,
    },
}

impl FetchPlan {
    /// Chooses the fetch for a category and a free-text query.
    ///
    /// ```
    /// use mums::search::FetchPlan;
    ///
    /// assert_eq!(FetchPlan::choose("", "  "), FetchPlan::Nothing);
    /// assert_eq!(
    ///     FetchPlan::choose("", " pie "),
    ///     FetchPlan::ByName { query: "pie".into() }
    /// );
    /// ```
    #[must_use]
    pub fn choose(category: &str, query: &str) -> Self {
        let category = category.trim();
        let query = query.trim();
        match (category.is_empty(), query.is_empty()) {
            (false, false) => Self::ByCategory {
                category: category.to_string(),
                name_filter: Some(query.to_lowercase()),
            },
            (false, true) => Self::ByCategory {
                category: category.to_string(),
                name_filter: None,
            },
            (true, false) => Self::ByName {
                query: query.to_string(),
            },
            (true, true) => Self::Nothing,
        }
    }

    #[must_use]
    pub const fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }

    /// Applies the name filter of a category plan. Other plans pass results through.
    #[must_use]
    pub fn narrow(&self, results: Vec<RecipeSummary>) -> Vec<RecipeSummary> {
        match self {
            Self::ByCategory {
                name_filter: Some(needle),
                ..
            } => results
                .into_iter()
                .filter(|recipe| recipe.name.to_lowercase().contains(needle.as_str()))
                .collect(),
            _ => results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str) -> RecipeSummary {
        RecipeSummary {
            id: name.len().to_string(),
            name: name.into(),
            thumbnail_url: String::new(),
        }
    }

    #[test]
    fn decision_table() {
        assert_eq!(
            FetchPlan::choose("Seafood", "salmon"),
            FetchPlan::ByCategory {
                category: "Seafood".into(),
                name_filter: Some("salmon".into())
            }
        );
        assert_eq!(
            FetchPlan::choose("Seafood", ""),
            FetchPlan::ByCategory {
                category: "Seafood".into(),
                name_filter: None
            }
        );
        assert_eq!(
            FetchPlan::choose("", "salmon"),
            FetchPlan::ByName {
                query: "salmon".into()
            }
        );
        assert!(FetchPlan::choose("", "").is_nothing());
    }

    #[test]
    fn category_filter_is_case_insensitive_substring() {
        let plan = FetchPlan::choose("Seafood", "SALMON");
        let kept = plan.narrow(vec![
            summary("Baked salmon with fennel"),
            summary("Fish pie"),
            summary("Salmon Avocado Salad"),
        ]);
        let names: Vec<_> = kept.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Baked salmon with fennel", "Salmon Avocado Salad"]);
    }

    #[test]
    fn name_plan_does_not_narrow() {
        let plan = FetchPlan::choose("", "zzz");
        assert_eq!(plan.narrow(vec![summary("Fish pie")]).len(), 1);
    }
}
