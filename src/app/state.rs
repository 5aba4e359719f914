//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the plugin.
//! It owns the navigation state, the catalog client and every store and view
//! built on it. It serves as the single source of truth for all UI state.
//!
//! # Architecture
//!
//! `AppState` separates the navigation state (`query`, `category`, open recipe)
//! from everything derived from it (search results, detail lookup, address).
//! The event handler mutates the navigation state and then lets each component
//! catch up; view models are computed on demand from the result.
//!
//! # State Components
//!
//! - **Navigation**: query, category and open recipe id
//! - **Search**: orchestrator with the current results and status
//! - **Detail**: lookup status, tab and scroll of the open recipe
//! - **Categories**: one-time category list and picker filter
//! - **Stores**: favorites and theme preference, injected at construction
//! - **Address**: debounced write-back and history
//!
//! # Example
//!
//! ```rust
//! use mums::app::{AppOptions, AppState, Stores};
//! use mums::ui::theme::Palettes;
//!
//! let state = AppState::new(Stores::in_memory(), Palettes::default(), AppOptions::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.detail.is_none());
//! ```

use super::modes::{InputMode, Panel};
use crate::catalog::{CatalogClient, DEFAULT_BASE_URL};
use crate::domain::{FavoriteRecord, RecipeDetail, RecipeSummary};
use crate::navigation::{AddressSync, NavigationState};
use crate::search::{CategoryList, CategoryMatch, DetailStatus, DetailTab, DetailView, SearchOrchestrator, SearchStatus};
use crate::share::ShareSettings;
use crate::storage::{FavoritesStore, MemoryStore, ThemeStore};
use crate::ui::helpers::{substring_ranges, truncate, visible_window, wrap_text};
use crate::ui::theme::{Palettes, Theme};
use crate::ui::viewmodel::{
    header_minimized, Body, DetailContent, DetailInfo, DisplayItem, EmptyState, FooterInfo, HeaderInfo, ListInfo,
    SearchBarInfo, UIViewModel,
};

/// Rows taken by everything except the list rows: top margin, two header
/// lines, border, search box (3), list title, border and footer.
const CHROME_ROWS: usize = 10;

/// Rows of the detail overlay that are not content: top border, badges,
/// tabs, separator and bottom border.
const DETAIL_CHROME_ROWS: usize = 5;

/// Width of the name column in list rows.
const NAME_COLUMN_WIDTH: usize = 40;

const SUBTITLE: &str = "Discover recipes from TheMealDB";

/// The two persisted stores, each with its own backend.
pub struct Stores {
    pub favorites: FavoritesStore,
    pub themes: ThemeStore,
}

impl Stores {
    /// Stores backed by memory only; nothing survives the plugin.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            favorites: FavoritesStore::new(Box::new(MemoryStore::default())),
            themes: ThemeStore::new(Box::new(MemoryStore::default())),
        }
    }
}

/// Settings that shape behavior but are not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOptions {
    pub api_base_url: String,
    pub share: ShareSettings,
    /// Scroll offset (rows) past which the header minimizes.
    pub header_minimize_at: usize,
    /// Address observed at cold load.
    pub initial_address: String,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            share: ShareSettings {
                base_url: None,
                clipboard: true,
            },
            header_minimize_at: 3,
            initial_address: String::new(),
        }
    }
}

/// Central application state container.
///
/// Mutated by the event handler in response to user input and host events.
pub struct AppState {
    /// Query, category and open recipe; the single source for the address.
    pub nav: NavigationState,

    /// How printable keys are interpreted.
    pub input_mode: InputMode,

    /// What the body shows.
    pub panel: Panel,

    /// Zero-based selection within the results or favorites list.
    pub selected_index: usize,

    /// Category picker filter text.
    pub picker_filter: String,

    /// Zero-based selection within the filtered categories.
    pub picker_selected: usize,

    pub client: CatalogClient,
    pub search: SearchOrchestrator,
    pub detail: DetailView,
    pub categories: CategoryList,
    pub favorites: FavoritesStore,
    pub themes: ThemeStore,
    pub address: AddressSync,
    pub palettes: Palettes,
    pub share: ShareSettings,
    pub header_minimize_at: usize,

    /// Transient message shown above the footer hints.
    pub notice: Option<String>,

    /// Set once the host granted permissions and the stores were loaded.
    pub started: bool,
}

impl AppState {
    /// Creates the state with injected stores and the cold-load address applied.
    ///
    /// Nothing is fetched or loaded yet; that happens on [`crate::Event::Started`].
    #[must_use]
    pub fn new(stores: Stores, palettes: Palettes, options: AppOptions) -> Self {
        let (address, nav) = AddressSync::new(&options.initial_address);
        Self {
            nav,
            input_mode: InputMode::Normal,
            panel: Panel::Results,
            selected_index: 0,
            picker_filter: String::new(),
            picker_selected: 0,
            client: CatalogClient::new(&options.api_base_url),
            search: SearchOrchestrator::new(),
            detail: DetailView::default(),
            categories: CategoryList::default(),
            favorites: stores.favorites,
            themes: stores.themes,
            address,
            palettes,
            share: options.share,
            header_minimize_at: options.header_minimize_at,
            notice: None,
            started: false,
        }
    }

    /// Palette for the current effective appearance.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        self.palettes.active(self.themes.effective())
    }

    /// Number of rows in the list the selection moves over.
    #[must_use]
    pub fn list_len(&self) -> usize {
        match self.panel {
            Panel::Results => self.search.results().len(),
            Panel::Favorites => self.favorites.len(),
            Panel::Categories => self.picker_matches().len(),
        }
    }

    /// Moves the selection down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let index = self.selection_mut();
        *index = (*index + 1) % len;
    }

    /// Moves the selection up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let index = self.selection_mut();
        *index = if *index == 0 { len - 1 } else { *index - 1 };
    }

    fn selection_mut(&mut self) -> &mut usize {
        match self.panel {
            Panel::Categories => &mut self.picker_selected,
            Panel::Results | Panel::Favorites => &mut self.selected_index,
        }
    }

    /// Keeps the selection inside the current list.
    pub fn clamp_selection(&mut self) {
        let len = self.list_len();
        let index = self.selection_mut();
        *index = if len == 0 { 0 } else { (*index).min(len - 1) };
    }

    /// The recipe under the cursor in the results or favorites list.
    #[must_use]
    pub fn selected_recipe(&self) -> Option<RecipeSummary> {
        match self.panel {
            Panel::Results => self.search.results().get(self.selected_index).cloned(),
            Panel::Favorites => self.favorites.list().get(self.selected_index).map(|record| RecipeSummary {
                id: record.id.clone(),
                name: record.name.clone(),
                thumbnail_url: record.thumbnail_url.clone(),
            }),
            Panel::Categories => None,
        }
    }

    /// What a favorite toggle applies to: the open recipe, else the selected row.
    #[must_use]
    pub fn favorite_target(&self) -> Option<FavoriteRecord> {
        if self.detail.is_open() {
            return self.detail.recipe().map(FavoriteRecord::from);
        }
        self.selected_recipe().as_ref().map(FavoriteRecord::from)
    }

    /// Categories surviving the picker filter, best match first.
    #[must_use]
    pub fn picker_matches(&self) -> Vec<CategoryMatch> {
        self.categories.filter(&self.picker_filter)
    }

    /// Upper bound for the detail scroll position.
    #[must_use]
    pub fn detail_scroll_limit(&self) -> usize {
        self.detail.recipe().map_or(0, |recipe| match self.detail.tab {
            DetailTab::Ingredients => recipe.ingredients().len(),
            DetailTab::Instructions => recipe.instructions.as_deref().map_or(0, |text| wrap_text(text, 40).len()),
        })
    }

    /// Computes a renderable UI view model from current state and terminal size.
    ///
    /// # Windowing
    ///
    /// The list window is centered on the selection. Its start is the scroll
    /// offset that decides header minimisation; a minimized header gives its
    /// row back to the list.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows, cols).entered();

        let notice_rows = usize::from(self.notice.is_some());
        let full_rows = rows.saturating_sub(CHROME_ROWS + notice_rows);

        let (mut body, mut offset) = self.compute_body(full_rows, cols);
        let mut detail = self.compute_detail(full_rows + 1, cols);
        if let Some((_, scroll)) = &detail {
            offset = *scroll;
        }

        let minimized = header_minimized(offset, self.header_minimize_at);
        if minimized {
            (body, _) = self.compute_body(full_rows + 1, cols);
            detail = self.compute_detail(full_rows + 2, cols);
        }

        UIViewModel {
            header: self.compute_header(minimized),
            search_bar: self.compute_search_bar(),
            body,
            detail: detail.map(|(info, _)| info),
            footer: self.compute_footer(),
        }
    }

    fn compute_body(&self, available: usize, cols: usize) -> (Body, usize) {
        match self.panel {
            Panel::Results => match self.search.status() {
                SearchStatus::Loading => (Body::Loading, 0),
                SearchStatus::Error(message) => (Body::Error(message.clone()), 0),
                SearchStatus::Idle | SearchStatus::Success => {
                    if let Some(message) = self.search.empty_message() {
                        return (
                            Body::Empty(EmptyState {
                                message: message.to_string(),
                                subtitle: "/ to search, c to pick a category, r for a random recipe".to_string(),
                            }),
                            0,
                        );
                    }
                    let query = self.nav.query.trim();
                    let rows: Vec<(String, String, Vec<(usize, usize)>)> = self
                        .search
                        .results()
                        .iter()
                        .map(|r| (r.name.clone(), r.id.clone(), substring_ranges(&r.name, query)))
                        .collect();
                    self.list_body(format!("Results ({})", rows.len()), None, rows, available, cols)
                }
            },
            Panel::Favorites => {
                let favorites = self.favorites.list();
                if favorites.is_empty() {
                    return (
                        Body::Empty(EmptyState {
                            message: "No favorites yet.".to_string(),
                            subtitle: "Press f on a recipe to keep it here.".to_string(),
                        }),
                        0,
                    );
                }
                let rows = favorites
                    .into_iter()
                    .map(|f| (f.name, f.id, Vec::new()))
                    .collect::<Vec<_>>();
                self.list_body(format!("Favorites ({})", rows.len()), None, rows, available, cols)
            }
            Panel::Categories => {
                if self.categories.is_empty() {
                    return (
                        Body::Empty(EmptyState {
                            message: "No categories available.".to_string(),
                            subtitle: "Esc to go back.".to_string(),
                        }),
                        0,
                    );
                }
                let descriptions = self.categories.categories();
                let rows = self
                    .picker_matches()
                    .into_iter()
                    .map(|m| {
                        let description = descriptions
                            .iter()
                            .find(|c| c.name == m.name)
                            .and_then(|c| c.description.lines().find(|l| !l.trim().is_empty()))
                            .unwrap_or_default()
                            .trim()
                            .to_string();
                        (m.name, description, m.highlight_ranges)
                    })
                    .collect();
                self.list_body("Categories".to_string(), Some(self.picker_filter.clone()), rows, available, cols)
            }
        }
    }

    fn list_body(
        &self,
        title: String,
        filter: Option<String>,
        rows: Vec<(String, String, Vec<(usize, usize)>)>,
        available: usize,
        cols: usize,
    ) -> (Body, usize) {
        let selected = match self.panel {
            Panel::Categories => self.picker_selected,
            Panel::Results | Panel::Favorites => self.selected_index,
        };
        let (start, end) = visible_window(rows.len(), selected, available);
        let detail_width = cols.saturating_sub(NAME_COLUMN_WIDTH + 4);
        let check_favorites = self.panel != Panel::Categories;

        let items = rows
            .into_iter()
            .enumerate()
            .skip(start)
            .take(end - start)
            .map(|(index, (name, detail, highlight_ranges))| DisplayItem {
                is_favorite: check_favorites && self.favorites.is_favorite(&detail),
                name: truncate(&name, NAME_COLUMN_WIDTH - 2),
                detail: truncate(&detail, detail_width),
                is_selected: index == selected,
                highlight_ranges,
            })
            .collect();

        (Body::List(ListInfo { title, filter, items }), start)
    }

    /// Detail overlay plus the effective scroll offset, when a recipe is open.
    fn compute_detail(&self, body_rows: usize, cols: usize) -> Option<(DetailInfo, usize)> {
        let title = |fallback: &str| {
            self.detail
                .recipe()
                .map(|r| r.name.clone())
                .unwrap_or_else(|| fallback.to_string())
        };

        match self.detail.status() {
            DetailStatus::Closed => None,
            DetailStatus::Loading => Some((self.detail_info(title("Loading recipe..."), None, DetailContent::Loading), 0)),
            DetailStatus::Failed(message) => Some((
                self.detail_info(title("Recipe"), None, DetailContent::Failed(message.clone())),
                0,
            )),
            DetailStatus::Ready(recipe) => {
                let width = cols.saturating_sub(6).max(10);
                let lines = self.detail_lines(recipe, width);
                let links: Vec<String> = [("Video", &recipe.video_url), ("Source", &recipe.source_url)]
                    .into_iter()
                    .filter_map(|(label, url)| url.as_ref().map(|u| truncate(&format!("{label}: {u}"), width)))
                    .collect();

                let content_rows = body_rows.saturating_sub(DETAIL_CHROME_ROWS + links.len()).max(1);
                let scroll = self.detail.scroll.min(lines.len().saturating_sub(content_rows));
                let more = scroll + content_rows < lines.len();
                let lines = lines.into_iter().skip(scroll).take(content_rows).collect();

                Some((
                    self.detail_info(recipe.name.clone(), Some(recipe.as_ref()), DetailContent::Ready { lines, links, more }),
                    scroll,
                ))
            }
        }
    }

    fn detail_info(&self, title: String, recipe: Option<&RecipeDetail>, content: DetailContent) -> DetailInfo {
        let badges = recipe.map_or_else(Vec::new, |r| {
            [&r.category, &r.area].into_iter().flatten().cloned().collect()
        });
        DetailInfo {
            title,
            badges,
            is_favorite: self.favorites.is_favorite(self.detail.recipe_id()),
            tab: self.detail.tab,
            content,
        }
    }

    fn detail_lines(&self, recipe: &RecipeDetail, width: usize) -> Vec<String> {
        match self.detail.tab {
            DetailTab::Ingredients => {
                let ingredients = recipe.ingredients();
                if ingredients.is_empty() {
                    return vec!["No ingredients found.".to_string()];
                }
                ingredients
                    .iter()
                    .map(|i| {
                        let line = if i.measure.is_empty() {
                            format!("• {}", i.name)
                        } else {
                            format!("• {} {}", i.measure, i.name)
                        };
                        truncate(&line, width)
                    })
                    .collect()
            }
            DetailTab::Instructions => match recipe.instructions.as_deref() {
                Some(text) => wrap_text(text, width),
                None => vec!["No instructions.".to_string()],
            },
        }
    }

    fn compute_header(&self, minimized: bool) -> HeaderInfo {
        let address = self.address.current_address();
        let subtitle = (!minimized).then(|| {
            if address.is_empty() {
                SUBTITLE.to_string()
            } else {
                format!("{SUBTITLE}  {address}")
            }
        });

        HeaderInfo {
            title: " Mums ".to_string(),
            theme_label: self.themes.preference().label(),
            favorites: self.favorites.len(),
            subtitle,
        }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        SearchBarInfo {
            query: self.nav.query.clone(),
            category: (!self.nav.category.is_empty()).then(|| self.nav.category.clone()),
            is_typing: self.input_mode.is_typing(),
            is_loading: self.search.is_loading(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.detail.is_open() {
            "Esc: close  Tab: switch tab  j/k: scroll  f: favorite  s: share  [/]: back/forward"
        } else if self.input_mode.is_typing() {
            "Enter/Esc: done  Ctrl+n/p: navigate  Type to search"
        } else {
            match self.panel {
                Panel::Categories => "Type to filter  Enter: pick  Ctrl+n/p: navigate  Esc: cancel",
                Panel::Favorites => "Enter: open  f: remove  j/k: navigate  F/Esc: back",
                Panel::Results => {
                    "/: search  c: category  x: clear  Enter: open  f: favorite  F: favorites  r: random  t: theme  s: share  q: hide"
                }
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
            notice: self.notice.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Settlement;

    fn state() -> AppState {
        let mut state = AppState::new(Stores::in_memory(), Palettes::default(), AppOptions::default());
        state.favorites.load();
        state.started = true;
        state
    }

    fn with_results(state: &mut AppState, count: usize) {
        let meals: Vec<String> = (0..count)
            .map(|i| format!(r#"{{"idMeal":"{i}","strMeal":"Pie {i}","strMealThumb":"t"}}"#))
            .collect();
        let body = format!(r#"{{"meals":[{}]}}"#, meals.join(","));
        let request = state.search.evaluate(&mut state.client, "Dessert", "").unwrap();
        let Settlement::Delivered(response) = state.client.settle(request.id, 200, body.as_bytes()) else {
            panic!("response should be delivered");
        };
        assert!(state.search.apply(&response));
    }

    #[test]
    fn selection_wraps() {
        let mut state = state();
        with_results(&mut state, 3);
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn prompt_shown_without_input() {
        let vm = state().compute_viewmodel(24, 80);
        match vm.body {
            Body::Empty(empty) => assert_eq!(empty.message, crate::search::PROMPT_MESSAGE),
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn header_minimizes_when_list_scrolls() {
        let mut state = state();
        with_results(&mut state, 50);

        assert!(state.compute_viewmodel(24, 80).header.subtitle.is_some());

        state.selected_index = 30;
        let vm = state.compute_viewmodel(24, 80);
        assert!(vm.header.subtitle.is_none());
        let Body::List(list) = vm.body else {
            panic!("expected a list");
        };
        assert_eq!(list.items.len(), 24 - CHROME_ROWS + 1);
        assert!(list.items.iter().any(|item| item.is_selected && item.name == "Pie 30"));
    }

    #[test]
    fn favorites_panel_empty_state() {
        let mut state = state();
        state.panel = Panel::Favorites;
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(
            vm.body,
            Body::Empty(EmptyState {
                message: "No favorites yet.".into(),
                subtitle: "Press f on a recipe to keep it here.".into(),
            })
        );
    }

    #[test]
    fn favorite_rows_are_marked() {
        let mut state = state();
        with_results(&mut state, 2);
        state.favorites.toggle(&FavoriteRecord {
            id: "1".into(),
            name: "Pie 1".into(),
            thumbnail_url: "t".into(),
        })
        .unwrap();

        let Body::List(list) = state.compute_viewmodel(24, 80).body else {
            panic!("expected a list");
        };
        let marked: Vec<bool> = list.items.iter().map(|item| item.is_favorite).collect();
        assert_eq!(marked, vec![false, true]);
    }
}
