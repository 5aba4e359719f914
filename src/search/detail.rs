//! Recipe detail view.
//!
//! Follows the open recipe id: opening an id looks the recipe up (canceling
//! the previous lookup), an empty id closes the view. A recipe that is already
//! at hand, such as a random pick, is shown without a second lookup.

use crate::catalog::{ApiRequest, CancellationToken, CatalogClient, RequestId, Response};
use crate::domain::error::MumsError;
use crate::domain::RecipeDetail;
use crate::search::orchestrator::NOT_FOUND_MESSAGE;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailStatus {
    #[default]
    Closed,
    Loading,
    Ready(Box<RecipeDetail>),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Ingredients,
    Instructions,
}

impl DetailTab {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ingredients => Self::Instructions,
            Self::Instructions => Self::Ingredients,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Ingredients => "Ingredients",
            Self::Instructions => "Instructions",
        }
    }
}

#[derive(Debug, Default)]
pub struct DetailView {
    recipe_id: String,
    status: DetailStatus,
    lookup: Option<(RequestId, CancellationToken)>,
    pub tab: DetailTab,
    pub scroll: usize,
}

impl DetailView {
    /// Aligns the view with the open recipe id.
    ///
    /// Returns the lookup to issue when a different recipe must be fetched.
    pub fn follow(&mut self, client: &mut CatalogClient, open_recipe_id: &str) -> Option<ApiRequest> {
        if open_recipe_id.is_empty() {
            self.close();
            return None;
        }
        if open_recipe_id == self.recipe_id && self.status != DetailStatus::Closed {
            return None;
        }
        Some(self.open(client, open_recipe_id))
    }

    fn open(&mut self, client: &mut CatalogClient, id: &str) -> ApiRequest {
        let _span = tracing::debug_span!("detail_open", id = %id).entered();

        self.cancel_lookup();
        let token = CancellationToken::new();
        let request = client.lookup_by_id(id, Some(token.clone()));
        self.lookup = Some((request.id, token));
        self.reset(id, DetailStatus::Loading);
        request
    }

    /// Shows a recipe that was fetched elsewhere.
    pub fn show(&mut self, detail: RecipeDetail) {
        self.cancel_lookup();
        let id = detail.id.clone();
        self.reset(&id, DetailStatus::Ready(Box::new(detail)));
    }

    pub fn close(&mut self) {
        self.cancel_lookup();
        self.reset("", DetailStatus::Closed);
    }

    fn reset(&mut self, id: &str, status: DetailStatus) {
        self.recipe_id = id.to_string();
        self.status = status;
        self.tab = DetailTab::Ingredients;
        self.scroll = 0;
    }

    fn cancel_lookup(&mut self) {
        if let Some((id, token)) = self.lookup.take() {
            tracing::debug!(request_id = %id, "detail lookup canceled");
            token.cancel();
        }
    }

    #[must_use]
    pub fn is_current(&self, id: RequestId) -> bool {
        self.lookup.as_ref().is_some_and(|(current, _)| *current == id)
    }

    /// Commits a lookup response. Returns `false` for responses to other requests.
    pub fn apply(&mut self, response: &Response) -> bool {
        if !self.is_current(response.id) {
            return false;
        }
        self.lookup = None;

        self.status = match response.details().and_then(|details| {
            details
                .into_iter()
                .next()
                .ok_or_else(|| MumsError::NotFound(NOT_FOUND_MESSAGE.to_string()))
        }) {
            Ok(detail) => DetailStatus::Ready(Box::new(detail)),
            Err(e) => {
                tracing::warn!(id = %self.recipe_id, error = %e, "recipe lookup failed");
                DetailStatus::Failed(e.to_string())
            }
        };
        true
    }

    #[must_use]
    pub fn status(&self) -> &DetailStatus {
        &self.status
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status != DetailStatus::Closed
    }

    #[must_use]
    pub fn recipe(&self) -> Option<&RecipeDetail> {
        match &self.status {
            DetailStatus::Ready(detail) => Some(detail.as_ref()),
            _ => None,
        }
    }

    #[must_use]
    pub fn recipe_id(&self) -> &str {
        &self.recipe_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Settlement;

    fn deliver(client: &mut CatalogClient, request: &ApiRequest, body: &str) -> Option<Response> {
        match client.settle(request.id, 200, body.as_bytes()) {
            Settlement::Delivered(response) => Some(response),
            _ => None,
        }
    }

    #[test]
    fn following_same_id_does_not_refetch() {
        let mut client = CatalogClient::default();
        let mut detail = DetailView::default();

        assert!(detail.follow(&mut client, "52772").is_some());
        assert!(detail.follow(&mut client, "52772").is_none());
        assert_eq!(detail.status(), &DetailStatus::Loading);
    }

    #[test]
    fn empty_meals_is_not_found() {
        let mut client = CatalogClient::default();
        let mut detail = DetailView::default();

        let request = detail.follow(&mut client, "1").unwrap();
        let response = deliver(&mut client, &request, r#"{"meals":null}"#).unwrap();
        assert!(detail.apply(&response));
        assert_eq!(detail.status(), &DetailStatus::Failed(NOT_FOUND_MESSAGE.into()));
    }

    #[test]
    fn switching_recipe_cancels_previous_lookup() {
        let mut client = CatalogClient::default();
        let mut detail = DetailView::default();

        let first = detail.follow(&mut client, "1").unwrap();
        let second = detail.follow(&mut client, "2").unwrap();
        assert!(deliver(&mut client, &first, "{}").is_none());

        let body = r#"{"meals":[{"idMeal":"2","strMeal":"Pie","strInstructions":"Bake."}]}"#;
        let response = deliver(&mut client, &second, body).unwrap();
        assert!(detail.apply(&response));
        assert_eq!(detail.recipe().unwrap().instructions.as_deref(), Some("Bake."));
    }

    #[test]
    fn closing_drops_late_lookup() {
        let mut client = CatalogClient::default();
        let mut detail = DetailView::default();

        let request = detail.follow(&mut client, "3").unwrap();
        detail.follow(&mut client, "");
        assert!(!detail.is_open());
        assert!(deliver(&mut client, &request, "{}").is_none());
    }

    #[test]
    fn tab_resets_when_another_recipe_opens() {
        let mut client = CatalogClient::default();
        let mut detail = DetailView::default();

        detail.follow(&mut client, "1");
        detail.tab = detail.tab.toggled();
        assert_eq!(detail.tab, DetailTab::Instructions);
        detail.follow(&mut client, "2");
        assert_eq!(detail.tab, DetailTab::Ingredients);
    }
}
