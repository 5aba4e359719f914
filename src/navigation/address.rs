//! Navigable address codec and history.
//!
//! The address is a form-urlencoded query string carrying three optional
//! parameters: `q` (free-text query), `cat` (category) and `meal` (open recipe
//! id). An empty value is never written.

use url::form_urlencoded;

/// Query parameter for the free-text search.
pub const PARAM_QUERY: &str = "q";
/// Query parameter for the category filter.
pub const PARAM_CATEGORY: &str = "cat";
/// Query parameter for the open recipe.
pub const PARAM_MEAL: &str = "meal";

/// The part of the UI state reflected in the address. Empty strings mean absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub query: String,
    pub category: String,
    pub open_recipe_id: String,
}

impl NavigationState {
    /// Encodes the state as an address.
    ///
    /// Returns `""` when every field is empty, otherwise `?` followed by the
    /// non-empty parameters in `q`, `cat`, `meal` order. The query is trimmed.
    ///
    /// ```
    /// use mums::navigation::NavigationState;
    ///
    /// let state = NavigationState {
    ///     query: "pizza".into(),
    ///     category: "Seafood".into(),
    ///     open_recipe_id: "52772".into(),
    /// };
    /// assert_eq!(state.to_query_string(), "?q=pizza&cat=Seafood&meal=52772");
    /// assert_eq!(NavigationState::default().to_query_string(), "");
    /// ```
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        let query = self.query.trim();
        if !query.is_empty() {
            serializer.append_pair(PARAM_QUERY, query);
        }
        if !self.category.is_empty() {
            serializer.append_pair(PARAM_CATEGORY, &self.category);
        }
        if !self.open_recipe_id.is_empty() {
            serializer.append_pair(PARAM_MEAL, &self.open_recipe_id);
        }

        let encoded = serializer.finish();
        if encoded.is_empty() {
            encoded
        } else {
            format!("?{encoded}")
        }
    }

    /// Decodes an address.
    ///
    /// Accepts `?q=...`, a bare `q=...`, or any string containing `?` (a full
    /// link), in which case only the part after the first `?` is read. Unknown
    /// parameters are ignored; for repeated ones the first occurrence wins.
    ///
    /// ```
    /// use mums::navigation::NavigationState;
    ///
    /// let state = NavigationState::from_query_string("https://x/?q=fish+pie&meal=7");
    /// assert_eq!(state.query, "fish pie");
    /// assert_eq!(state.category, "");
    /// assert_eq!(state.open_recipe_id, "7");
    /// ```
    #[must_use]
    pub fn from_query_string(address: &str) -> Self {
        let query = address
            .split_once('?')
            .map_or(address, |(_, rest)| rest);
        // A fragment is not part of the query.
        let query = query.split_once('#').map_or(query, |(q, _)| q);

        let mut state = Self::default();
        let (mut seen_q, mut seen_cat, mut seen_meal) = (false, false, false);
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                PARAM_QUERY if !seen_q => {
                    state.query = value.into_owned();
                    seen_q = true;
                }
                PARAM_CATEGORY if !seen_cat => {
                    state.category = value.into_owned();
                    seen_cat = true;
                }
                PARAM_MEAL if !seen_meal => {
                    state.open_recipe_id = value.into_owned();
                    seen_meal = true;
                }
                _ => {}
            }
        }
        state
    }

    /// Whether there is neither a query nor a category to search for.
    #[must_use]
    pub fn is_search_empty(&self) -> bool {
        self.query.trim().is_empty() && self.category.is_empty()
    }
}

/// Linear address history with a cursor.
///
/// Pushing truncates any entries ahead of the cursor; replacing rewrites the
/// entry under it.
#[derive(Debug, Clone)]
pub struct AddressHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl AddressHistory {
    #[must_use]
    pub fn new(initial: String) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    #[must_use]
    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    pub fn push(&mut self, address: String) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(address);
        self.cursor = self.entries.len() - 1;
    }

    pub fn replace(&mut self, address: String) {
        self.entries[self.cursor] = address;
    }

    pub fn back(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AddressHistory {
    fn default() -> Self {
        Self::new(String::new())
    }
}
