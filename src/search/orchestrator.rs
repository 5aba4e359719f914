//! Search orchestration.
//!
//! [`SearchOrchestrator`] turns the current category and query into at most one
//! catalog request, cancels whatever it had in flight before, and commits a
//! response only if it still belongs to the latest evaluation. It also owns the
//! random pick, whose failures surface in the same results panel.

use crate::catalog::{ApiRequest, CancellationToken, CatalogClient, RequestId, Response};
use crate::domain::error::MumsError;
use crate::domain::{RecipeDetail, RecipeSummary};
use crate::search::plan::FetchPlan;

/// Shown when there is nothing to search for.
pub const PROMPT_MESSAGE: &str = "Search for a dish or pick a category.";
/// Shown when a real query came back empty.
pub const NO_RESULTS_MESSAGE: &str = "No results. Try another search term or category.";
/// Error for a random pick or lookup that returned no recipe.
pub const NOT_FOUND_MESSAGE: &str = "Recipe not found.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

#[derive(Debug)]
struct InFlight {
    id: RequestId,
    token: CancellationToken,
}

impl InFlight {
    fn start(request: &ApiRequest, token: CancellationToken) -> Self {
        Self {
            id: request.id,
            token,
        }
    }
}

#[derive(Debug, Default)]
pub struct SearchOrchestrator {
    plan: FetchPlan,
    status: SearchStatus,
    results: Vec<RecipeSummary>,
    search: Option<InFlight>,
    random: Option<InFlight>,
}

impl SearchOrchestrator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-evaluates the search for a category/query pair.
    ///
    /// The previous search request, if any, is canceled first. Returns the
    /// request to issue, or `None` when the input is empty, in which case the
    /// results are cleared immediately.
    pub fn evaluate(&mut self, client: &mut CatalogClient, category: &str, query: &str) -> Option<ApiRequest> {
        let _span = tracing::debug_span!("search_evaluate", category = %category, query = %query).entered();

        if let Some(previous) = self.search.take() {
            previous.token.cancel();
            tracing::debug!(request_id = %previous.id, "superseded search canceled");
        }

        self.plan = FetchPlan::choose(category, query);
        let token = CancellationToken::new();
        let request = match &self.plan {
            FetchPlan::Nothing => {
                self.results.clear();
                self.status = SearchStatus::Idle;
                return None;
            }
            FetchPlan::ByCategory { category, .. } => client.filter_by_category(category, Some(token.clone())),
            FetchPlan::ByName { query } => client.search_by_name(query, Some(token.clone())),
        };

        self.search = Some(InFlight::start(&request, token));
        self.status = SearchStatus::Loading;
        Some(request)
    }

    /// Whether `id` is the search request of the latest evaluation.
    #[must_use]
    pub fn is_current(&self, id: RequestId) -> bool {
        self.search.as_ref().is_some_and(|s| s.id == id)
    }

    /// Commits the response of the current search request.
    ///
    /// Responses for any other request are ignored and `false` is returned.
    pub fn apply(&mut self, response: &Response) -> bool {
        if !self.is_current(response.id) {
            tracing::debug!(request_id = %response.id, "stale search response ignored");
            return false;
        }
        self.search = None;

        let decoded = match &self.plan {
            FetchPlan::ByCategory { .. } => response.summaries(),
            FetchPlan::ByName { .. } => response
                .details()
                .map(|details| details.iter().map(RecipeDetail::summary).collect()),
            FetchPlan::Nothing => Ok(Vec::new()),
        };

        match decoded {
            Ok(results) => {
                self.results = self.plan.narrow(results);
                self.status = SearchStatus::Success;
                tracing::debug!(count = self.results.len(), "search results committed");
            }
            Err(e) => self.fail(&e),
        }
        true
    }

    /// Starts a random pick, superseding any earlier one.
    pub fn random(&mut self, client: &mut CatalogClient) -> ApiRequest {
        if let Some(previous) = self.random.take() {
            previous.token.cancel();
        }
        let token = CancellationToken::new();
        let request = client.random_one(Some(token.clone()));
        self.random = Some(InFlight::start(&request, token));
        request
    }

    #[must_use]
    pub fn is_random(&self, id: RequestId) -> bool {
        self.random.as_ref().is_some_and(|r| r.id == id)
    }

    /// Settles the current random pick.
    ///
    /// Returns the recipe to open on success. A failure replaces the results
    /// panel content with the error.
    pub fn apply_random(&mut self, response: &Response) -> Option<RecipeDetail> {
        if !self.is_random(response.id) {
            return None;
        }
        self.random = None;

        match response.details().and_then(|details| {
            details
                .into_iter()
                .next()
                .ok_or_else(|| MumsError::NotFound(NOT_FOUND_MESSAGE.to_string()))
        }) {
            Ok(detail) => {
                tracing::debug!(id = %detail.id, "random recipe picked");
                Some(detail)
            }
            Err(e) => {
                if let Some(search) = self.search.take() {
                    search.token.cancel();
                }
                self.fail(&e);
                None
            }
        }
    }

    /// Cancels every outstanding request.
    pub fn cancel_all(&mut self) {
        for in_flight in [self.search.take(), self.random.take()].into_iter().flatten() {
            in_flight.token.cancel();
        }
    }

    fn fail(&mut self, error: &MumsError) {
        tracing::warn!(error = %error, "search failed");
        self.results.clear();
        self.status = SearchStatus::Error(error.to_string());
    }

    #[must_use]
    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            SearchStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn results(&self) -> &[RecipeSummary] {
        &self.results
    }

    #[must_use]
    pub fn plan(&self) -> &FetchPlan {
        &self.plan
    }

    /// Message for the empty state, derived from input and status.
    ///
    /// Nothing while loading or failed; the prompt when there is no input; the
    /// no-results hint after a query that returned nothing.
    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        match self.status {
            SearchStatus::Loading | SearchStatus::Error(_) => None,
            _ if self.plan.is_nothing() => Some(PROMPT_MESSAGE),
            SearchStatus::Success if self.results.is_empty() => Some(NO_RESULTS_MESSAGE),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Settlement;

    fn deliver(client: &mut CatalogClient, request: &ApiRequest, status: u16, body: &str) -> Option<Response> {
        match client.settle(request.id, status, body.as_bytes()) {
            Settlement::Delivered(response) => Some(response),
            _ => None,
        }
    }

    const SEAFOOD: &str = r#"{"meals":[
        {"idMeal":"1","strMeal":"Baked salmon","strMealThumb":""},
        {"idMeal":"2","strMeal":"Fish pie","strMealThumb":""}
    ]}"#;

    #[test]
    fn empty_input_issues_nothing_and_prompts() {
        let mut client = CatalogClient::default();
        let mut search = SearchOrchestrator::new();

        assert!(search.evaluate(&mut client, "", " ").is_none());
        assert_eq!(client.in_flight(), 0);
        assert_eq!(search.empty_message(), Some(PROMPT_MESSAGE));
    }

    #[test]
    fn category_and_query_filters_names() {
        let mut client = CatalogClient::default();
        let mut search = SearchOrchestrator::new();

        let request = search.evaluate(&mut client, "Seafood", "PIE").unwrap();
        assert!(request.url.ends_with("filter.php?c=Seafood"));
        assert!(search.is_loading());
        assert_eq!(search.empty_message(), None);

        let response = deliver(&mut client, &request, 200, SEAFOOD).unwrap();
        assert!(search.apply(&response));
        let names: Vec<_> = search.results().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Fish pie"]);
    }

    #[test]
    fn only_latest_evaluation_commits() {
        let mut client = CatalogClient::default();
        let mut search = SearchOrchestrator::new();

        let first = search.evaluate(&mut client, "", "a").unwrap();
        let second = search.evaluate(&mut client, "", "ab").unwrap();

        // The first request was canceled; the client drops its response.
        assert!(deliver(&mut client, &first, 200, SEAFOOD).is_none());

        let body = r#"{"meals":[{"idMeal":"9","strMeal":"Abgoosht","strMealThumb":""}]}"#;
        let response = deliver(&mut client, &second, 200, body).unwrap();
        assert!(search.apply(&response));
        assert_eq!(search.results().len(), 1);
        assert_eq!(search.status(), &SearchStatus::Success);
    }

    #[test]
    fn late_response_of_superseded_search_is_dropped() {
        let mut client = CatalogClient::default();
        let mut search = SearchOrchestrator::new();

        let first = search.evaluate(&mut client, "", "a").unwrap();
        let second = search.evaluate(&mut client, "", "ab").unwrap();

        let body = r#"{"meals":[{"idMeal":"9","strMeal":"Abgoosht","strMealThumb":""}]}"#;
        let response = deliver(&mut client, &second, 200, body).unwrap();
        assert!(search.apply(&response));

        assert!(deliver(&mut client, &first, 200, SEAFOOD).is_none());
        assert_eq!(search.results().len(), 1);
        assert_eq!(search.results()[0].name, "Abgoosht");
        assert_eq!(search.status(), &SearchStatus::Success);
    }

    #[test]
    fn clearing_input_cancels_in_flight_search() {
        let mut client = CatalogClient::default();
        let mut search = SearchOrchestrator::new();

        let request = search.evaluate(&mut client, "Beef", "").unwrap();
        search.evaluate(&mut client, "", "");

        assert!(deliver(&mut client, &request, 200, SEAFOOD).is_none());
        assert!(search.results().is_empty());
        assert_eq!(search.status(), &SearchStatus::Idle);
    }

    #[test]
    fn failure_sets_error_and_hides_empty_message() {
        let mut client = CatalogClient::default();
        let mut search = SearchOrchestrator::new();

        let request = search.evaluate(&mut client, "", "pie").unwrap();
        let response = deliver(&mut client, &request, 500, "").unwrap();
        search.apply(&response);

        assert_eq!(search.error(), Some("HTTP 500"));
        assert_eq!(search.empty_message(), None);
    }

    #[test]
    fn empty_success_shows_no_results() {
        let mut client = CatalogClient::default();
        let mut search = SearchOrchestrator::new();

        let request = search.evaluate(&mut client, "", "qqqq").unwrap();
        let response = deliver(&mut client, &request, 200, r#"{"meals":null}"#).unwrap();
        search.apply(&response);

        assert_eq!(search.empty_message(), Some(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn random_pick_returns_recipe_and_supersedes() {
        let mut client = CatalogClient::default();
        let mut search = SearchOrchestrator::new();

        let first = search.random(&mut client);
        let second = search.random(&mut client);
        assert!(deliver(&mut client, &first, 200, "{}").is_none());

        let body = r#"{"meals":[{"idMeal":"52772","strMeal":"Teriyaki Chicken Casserole"}]}"#;
        let response = deliver(&mut client, &second, 200, body).unwrap();
        let detail = search.apply_random(&response).unwrap();
        assert_eq!(detail.id, "52772");
    }

    #[test]
    fn empty_random_pick_is_not_found() {
        let mut client = CatalogClient::default();
        let mut search = SearchOrchestrator::new();

        let request = search.random(&mut client);
        let response = deliver(&mut client, &request, 200, r#"{"meals":[]}"#).unwrap();
        assert!(search.apply_random(&response).is_none());
        assert_eq!(search.error(), Some(NOT_FOUND_MESSAGE));
    }
}
