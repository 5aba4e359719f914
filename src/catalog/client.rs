//! Recipe catalog client.
//!
//! The plugin cannot perform blocking I/O, so the client does not send anything
//! itself. Each operation returns an [`ApiRequest`] describing the GET to issue
//! through the host, and remembers it under a fresh [`RequestId`]. When the host
//! delivers the response, [`CatalogClient::settle`] matches it back to the
//! request and decides whether it was canceled, failed, or succeeded.
//!
//! ```text
//! search_by_name("pizza", token) ──► ApiRequest { id: 7, url }
//!                                       │ web_request(url, context{request_id: 7})
//!                                       ▼
//! settle(7, status, body) ──► Canceled | Delivered(Response) | Unknown
//!                                              │
//!                                              ▼
//!                                 Response::summaries() / details() / categories()
//! ```

use crate::catalog::cancel::CancellationToken;
use crate::domain::error::{MumsError, Result};
use crate::domain::{Category, RecipeDetail, RecipeSummary};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Public catalog base URL.
pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Headers sent with every request. The catalog must never be answered from a cache.
pub const REQUEST_HEADERS: &[(&str, &str)] = &[("Cache-Control", "no-store")];

/// Identifier correlating a host response with the request that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The five read-only catalog operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Categories,
    SearchByName(String),
    FilterByCategory(String),
    LookupById(String),
    Random,
}

impl Endpoint {
    /// Builds the full request URL. Parameters are trimmed and percent-encoded.
    ///
    /// ```
    /// use mums::catalog::Endpoint;
    ///
    /// let url = Endpoint::SearchByName(" mac and cheese ".into()).url("https://x/api");
    /// assert_eq!(url, "https://x/api/search.php?s=mac%20and%20cheese");
    /// ```
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        let base = base.trim_end_matches('/');
        match self {
            Self::Categories => format!("{base}/categories.php"),
            Self::SearchByName(text) => format!("{base}/search.php?s={}", encode(text)),
            Self::FilterByCategory(category) => format!("{base}/filter.php?c={}", encode(category)),
            Self::LookupById(id) => format!("{base}/lookup.php?i={}", encode(id)),
            Self::Random => format!("{base}/random.php"),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::SearchByName(_) => "search",
            Self::FilterByCategory(_) => "filter",
            Self::LookupById(_) => "lookup",
            Self::Random => "random",
        }
    }
}

fn encode(param: &str) -> String {
    urlencoding::encode(param.trim()).into_owned()
}

/// A GET request the host should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub id: RequestId,
    pub endpoint: Endpoint,
    pub url: String,
}

#[derive(Debug)]
struct Pending {
    endpoint: Endpoint,
    token: Option<CancellationToken>,
}

/// How a host response resolved.
#[derive(Debug)]
pub enum Settlement {
    /// The id does not belong to any outstanding request.
    Unknown,
    /// The request's token was canceled before the response arrived.
    Canceled { id: RequestId, endpoint: Endpoint },
    /// The response is current; decode it through [`Response`].
    Delivered(Response),
}

/// A settled, non-canceled response.
#[derive(Debug, Clone)]
pub struct Response {
    pub id: RequestId,
    pub endpoint: Endpoint,
    pub status: u16,
    body: Vec<u8>,
}

#[derive(Deserialize)]
struct MealsEnvelope<T> {
    meals: Option<Vec<T>>,
}

#[derive(Deserialize)]
struct CategoriesEnvelope {
    #[serde(default)]
    categories: Option<Vec<Category>>,
}

impl Response {
    fn check_status(&self) -> Result<()> {
        if (200..300).contains(&self.status) {
            Ok(())
        } else {
            Err(MumsError::Http { status: self.status })
        }
    }

    fn meals<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.check_status()?;
        let envelope: MealsEnvelope<T> = serde_json::from_slice(&self.body)
            .map_err(|e| MumsError::Decode(e.to_string()))?;
        Ok(envelope.meals.unwrap_or_default())
    }

    /// Decodes a `filter.php` body. An absent `meals` array is an empty result.
    ///
    /// # Errors
    ///
    /// [`MumsError::Http`] for a non-2xx status, [`MumsError::Decode`] for a
    /// body that is not the expected JSON.
    pub fn summaries(&self) -> Result<Vec<RecipeSummary>> {
        self.meals()
    }

    /// Decodes a `search.php`, `lookup.php` or `random.php` body.
    ///
    /// # Errors
    ///
    /// Same as [`Response::summaries`].
    pub fn details(&self) -> Result<Vec<RecipeDetail>> {
        self.meals()
    }

    /// Decodes a `categories.php` body.
    ///
    /// # Errors
    ///
    /// Same as [`Response::summaries`].
    pub fn categories(&self) -> Result<Vec<Category>> {
        self.check_status()?;
        let envelope: CategoriesEnvelope = serde_json::from_slice(&self.body)
            .map_err(|e| MumsError::Decode(e.to_string()))?;
        Ok(envelope.categories.unwrap_or_default())
    }
}

/// Client for the recipe catalog.
///
/// # Examples
///
/// ```
/// use mums::catalog::{CatalogClient, CancellationToken, Settlement};
///
/// let mut client = CatalogClient::new("https://www.themealdb.com/api/json/v1/1");
/// let token = CancellationToken::new();
/// let request = client.filter_by_category("Seafood", Some(token.clone()));
/// assert!(request.url.ends_with("/filter.php?c=Seafood"));
///
/// token.cancel();
/// let settled = client.settle(request.id, 200, br#"{"meals":[]}"#);
/// assert!(matches!(settled, Settlement::Canceled { .. }));
/// ```
#[derive(Debug)]
pub struct CatalogClient {
    base_url: String,
    next_id: u64,
    pending: HashMap<RequestId, Pending>,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl CatalogClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            next_id: 1,
            pending: HashMap::new(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Number of requests issued and not yet settled.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    pub fn list_categories(&mut self, token: Option<CancellationToken>) -> ApiRequest {
        self.issue(Endpoint::Categories, token)
    }

    pub fn search_by_name(&mut self, text: &str, token: Option<CancellationToken>) -> ApiRequest {
        self.issue(Endpoint::SearchByName(text.trim().to_string()), token)
    }

    pub fn filter_by_category(&mut self, category: &str, token: Option<CancellationToken>) -> ApiRequest {
        self.issue(Endpoint::FilterByCategory(category.trim().to_string()), token)
    }

    pub fn lookup_by_id(&mut self, id: &str, token: Option<CancellationToken>) -> ApiRequest {
        self.issue(Endpoint::LookupById(id.trim().to_string()), token)
    }

    pub fn random_one(&mut self, token: Option<CancellationToken>) -> ApiRequest {
        self.issue(Endpoint::Random, token)
    }

    fn issue(&mut self, endpoint: Endpoint, token: Option<CancellationToken>) -> ApiRequest {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        let url = endpoint.url(&self.base_url);

        tracing::debug!(request_id = %id, endpoint = endpoint.name(), url = %url, "issuing catalog request");

        self.pending.insert(
            id,
            Pending {
                endpoint: endpoint.clone(),
                token,
            },
        );
        ApiRequest { id, endpoint, url }
    }

    /// Resolves a host response against the outstanding request it answers.
    ///
    /// Each id settles at most once; a second response for the same id is
    /// [`Settlement::Unknown`].
    pub fn settle(&mut self, id: RequestId, status: u16, body: &[u8]) -> Settlement {
        let _span = tracing::debug_span!("catalog_settle", request_id = %id, status).entered();

        let Some(pending) = self.pending.remove(&id) else {
            tracing::debug!("response for unknown request ignored");
            return Settlement::Unknown;
        };

        if pending.token.as_ref().is_some_and(CancellationToken::is_cancelled) {
            tracing::debug!(endpoint = pending.endpoint.name(), "response for canceled request dropped");
            return Settlement::Canceled {
                id,
                endpoint: pending.endpoint,
            };
        }

        tracing::debug!(endpoint = pending.endpoint.name(), bytes = body.len(), "response delivered");
        Settlement::Delivered(Response {
            id,
            endpoint: pending.endpoint,
            status,
            body: body.to_vec(),
        })
    }
}
