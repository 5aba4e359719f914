//! End-to-end flows through `handle_event`, with the host played by the test.

use mums::search::{DetailStatus, SearchStatus};
use mums::storage::ThemePreference;
use mums::{handle_event, initialize, Action, AppState, Config, Event, Panel};
use std::path::Path;

const PIE_RESULTS: &str = r#"{"meals":[
    {"idMeal":"52772","strMeal":"Teriyaki Chicken Pie","strMealThumb":"https://img/52772.jpg","strCategory":"Chicken"},
    {"idMeal":"52853","strMeal":"Key Lime Pie","strMealThumb":"https://img/52853.jpg","strCategory":"Dessert"}
]}"#;

const RANDOM_RESULT: &str = r#"{"meals":[
    {"idMeal":"53000","strMeal":"Lamb Tagine","strMealThumb":"https://img/53000.jpg",
     "strCategory":"Lamb","strArea":"Moroccan","strInstructions":"Simmer slowly.",
     "strIngredient1":"Lamb","strMeasure1":"500g","strIngredient2":"","strMeasure2":" "}
]}"#;

fn config(dir: &Path, address: &str) -> Config {
    Config {
        data_dir: dir.to_path_buf(),
        initial_address: address.to_string(),
        ..Config::default()
    }
}

fn started(dir: &Path, address: &str) -> (AppState, Vec<Action>) {
    let mut state = initialize(&config(dir, address));
    let (_, actions) = handle_event(&mut state, &Event::Started).unwrap();
    (state, actions)
}

fn send(state: &mut AppState, event: Event) -> Vec<Action> {
    handle_event(state, &event).unwrap().1
}

/// The single request whose URL contains `needle`.
fn request(actions: &[Action], needle: &str) -> u64 {
    let ids: Vec<u64> = actions
        .iter()
        .filter_map(|a| match a {
            Action::HttpGet { request_id, url } if url.contains(needle) => Some(*request_id),
            _ => None,
        })
        .collect();
    assert_eq!(ids.len(), 1, "expected one request matching {needle}, got {actions:?}");
    ids[0]
}

fn respond(state: &mut AppState, request_id: u64, body: &str) -> bool {
    handle_event(
        state,
        &Event::HttpResponse {
            request_id,
            status: 200,
            body: body.as_bytes().to_vec(),
        },
    )
    .unwrap()
    .0
}

fn type_text(state: &mut AppState, text: &str) -> Vec<Action> {
    let mut actions = send(state, Event::StartTyping);
    for c in text.chars() {
        actions.extend(send(state, Event::Char(c)));
    }
    actions
}

#[test]
fn cold_start_requests_categories_search_and_detail() {
    let dir = tempfile::tempdir().unwrap();
    let (state, actions) = started(dir.path(), "?q=pie&meal=52772");

    request(&actions, "categories.php");
    request(&actions, "search.php?s=pie");
    request(&actions, "lookup.php?i=52772");
    assert!(actions.contains(&Action::WatchHostAppearance(true)));
    assert!(actions.contains(&Action::ReplaceAddress {
        address: "?q=pie&meal=52772".to_string()
    }));
    assert!(state.search.is_loading());
    assert_eq!(state.detail.status(), &DetailStatus::Loading);
}

#[test]
fn nothing_is_fetched_before_permissions() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = initialize(&config(dir.path(), ""));

    let actions = type_text(&mut state, "pie");
    assert!(!actions.iter().any(|a| matches!(a, Action::HttpGet { .. })));
    assert_eq!(state.nav.query, "pie");

    let (_, actions) = handle_event(&mut state, &Event::Started).unwrap();
    request(&actions, "search.php?s=pie");
}

#[test]
fn typing_debounces_the_address_write() {
    let dir = tempfile::tempdir().unwrap();
    let (mut state, _) = started(dir.path(), "");

    let actions = type_text(&mut state, "pi");
    let timers = actions
        .iter()
        .filter(|a| matches!(a, Action::ScheduleTimer { .. }))
        .count();
    assert_eq!(timers, 2);

    assert!(send(&mut state, Event::Timer).is_empty());
    assert_eq!(
        send(&mut state, Event::Timer),
        vec![Action::ReplaceAddress {
            address: "?q=pi".to_string()
        }]
    );
    assert_eq!(state.address.current_address(), "?q=pi");
}

#[test]
fn only_the_latest_search_response_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let (mut state, _) = started(dir.path(), "");

    let first = request(&type_text(&mut state, "p"), "search.php?s=p");
    let second = request(&send(&mut state, Event::Char('i')), "search.php?s=pi");

    assert!(!respond(&mut state, first, r#"{"meals":[{"idMeal":"1","strMeal":"Pasta"}]}"#));
    assert!(state.search.results().is_empty());

    assert!(respond(&mut state, second, PIE_RESULTS));
    assert_eq!(state.search.status(), &SearchStatus::Success);
    let names: Vec<&str> = state.search.results().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Teriyaki Chicken Pie", "Key Lime Pie"]);
}

#[test]
fn category_with_query_narrows_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let (mut state, actions) = started(dir.path(), "?q=lime&cat=Dessert");
    let id = request(&actions, "filter.php?c=Dessert");

    respond(
        &mut state,
        id,
        r#"{"meals":[{"idMeal":"52853","strMeal":"Key Lime Pie"},{"idMeal":"52854","strMeal":"Pancakes"}]}"#,
    );
    assert_eq!(state.search.results().len(), 1);
    assert_eq!(state.search.results()[0].id, "52853");
}

#[test]
fn http_errors_surface_in_the_results_panel() {
    let dir = tempfile::tempdir().unwrap();
    let (mut state, actions) = started(dir.path(), "?q=pie");
    let id = request(&actions, "search.php");

    handle_event(
        &mut state,
        &Event::HttpResponse {
            request_id: id,
            status: 500,
            body: Vec::new(),
        },
    )
    .unwrap();
    assert!(state.search.error().is_some());
}

#[test]
fn confirm_opens_selected_recipe_and_dismiss_closes_it() {
    let dir = tempfile::tempdir().unwrap();
    let (mut state, actions) = started(dir.path(), "?q=pie");
    respond(&mut state, request(&actions, "search.php"), PIE_RESULTS);

    send(&mut state, Event::MoveDown);
    let actions = send(&mut state, Event::Confirm);
    request(&actions, "lookup.php?i=52853");
    assert_eq!(state.nav.open_recipe_id, "52853");

    send(&mut state, Event::Dismiss);
    assert!(state.nav.open_recipe_id.is_empty());
    assert!(!state.detail.is_open());
}

#[test]
fn random_recipe_opens_without_a_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let (mut state, _) = started(dir.path(), "");

    let id = request(&send(&mut state, Event::RandomRecipe), "random.php");
    assert!(respond(&mut state, id, RANDOM_RESULT));

    assert_eq!(state.nav.open_recipe_id, "53000");
    let recipe = state.detail.recipe().unwrap();
    assert_eq!(recipe.name, "Lamb Tagine");
    assert_eq!(recipe.ingredients().len(), 1);
}

#[test]
fn favorites_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let (mut state, actions) = started(dir.path(), "?q=pie");
        respond(&mut state, request(&actions, "search.php"), PIE_RESULTS);
        send(&mut state, Event::ToggleFavorite);
        assert!(state.favorites.is_favorite("52772"));
    }

    let (mut state, _) = started(dir.path(), "");
    assert!(state.favorites.is_favorite("52772"));

    send(&mut state, Event::OpenFavorites);
    assert_eq!(state.panel, Panel::Favorites);
    assert_eq!(state.selected_recipe().unwrap().name, "Teriyaki Chicken Pie");

    send(&mut state, Event::ToggleFavorite);
    assert!(state.favorites.is_empty());
}

#[test]
fn external_navigation_pushes_history() {
    let dir = tempfile::tempdir().unwrap();
    let (mut state, _) = started(dir.path(), "?q=pie");

    let actions = send(
        &mut state,
        Event::Navigate {
            address: "?cat=Seafood".to_string(),
        },
    );
    request(&actions, "filter.php?c=Seafood");
    assert_eq!(state.nav.category, "Seafood");
    assert!(state.nav.query.is_empty());

    let actions = send(&mut state, Event::NavigateBack);
    request(&actions, "search.php?s=pie");
    assert_eq!(state.nav.query, "pie");
    assert!(actions.contains(&Action::ReplaceAddress {
        address: "?q=pie".to_string()
    }));

    send(&mut state, Event::NavigateForward);
    assert_eq!(state.nav.category, "Seafood");
}

#[test]
fn category_picker_filters_and_applies() {
    let dir = tempfile::tempdir().unwrap();
    let (mut state, actions) = started(dir.path(), "");
    respond(
        &mut state,
        request(&actions, "categories.php"),
        r#"{"categories":[
            {"idCategory":"1","strCategory":"Beef","strCategoryDescription":"Cow."},
            {"idCategory":"2","strCategory":"Seafood","strCategoryDescription":"Fish."}
        ]}"#,
    );

    send(&mut state, Event::OpenCategories);
    for c in "sea".chars() {
        send(&mut state, Event::Char(c));
    }
    assert!(state.nav.query.is_empty());

    let actions = send(&mut state, Event::Confirm);
    request(&actions, "filter.php?c=Seafood");
    assert_eq!(state.nav.category, "Seafood");
    assert_eq!(state.panel, Panel::Results);

    send(&mut state, Event::ClearCategory);
    assert!(state.nav.category.is_empty());
}

#[test]
fn share_copies_or_prompts() {
    let dir = tempfile::tempdir().unwrap();
    let (mut state, _) = started(dir.path(), "?q=pie&meal=52772");

    let actions = send(&mut state, Event::Share);
    assert!(matches!(&actions[..], [Action::CopyToClipboard { text }] if text.contains("?q=pie&meal=52772")));
    assert!(state.notice.as_deref().unwrap().starts_with("Link copied"));

    state.share.clipboard = false;
    assert!(send(&mut state, Event::Share).is_empty());
    assert!(state.notice.as_deref().unwrap().starts_with("Share link"));

    send(&mut state, Event::MoveDown);
    assert!(state.notice.is_none());
}

#[test]
fn theme_cycle_persists_and_stops_following_host() {
    let dir = tempfile::tempdir().unwrap();
    {
        let (mut state, _) = started(dir.path(), "");
        assert_eq!(state.themes.preference(), ThemePreference::System);

        let actions = send(&mut state, Event::CycleTheme);
        assert_eq!(actions, vec![Action::WatchHostAppearance(false)]);
        assert_eq!(state.themes.preference(), ThemePreference::Light);
    }

    let (state, actions) = started(dir.path(), "");
    assert_eq!(state.themes.preference(), ThemePreference::Light);
    assert!(!actions.iter().any(|a| matches!(a, Action::WatchHostAppearance(_))));
}

#[test]
fn theme_change_before_start_keeps_stored_preference() {
    let dir = tempfile::tempdir().unwrap();
    {
        let (mut state, _) = started(dir.path(), "");
        send(&mut state, Event::CycleTheme);
        send(&mut state, Event::CycleTheme);
        assert_eq!(state.themes.preference(), ThemePreference::Dark);
    }

    let mut state = initialize(&config(dir.path(), ""));
    send(&mut state, Event::CycleTheme);
    assert_eq!(state.themes.preference(), ThemePreference::Light);

    send(&mut state, Event::Started);
    assert_eq!(state.themes.preference(), ThemePreference::Dark);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("mums_theme.json")).unwrap(),
        "\"dark\""
    );
}

#[test]
fn quit_cancels_outstanding_work() {
    let dir = tempfile::tempdir().unwrap();
    let (mut state, actions) = started(dir.path(), "?q=pie&meal=52772");
    let search = request(&actions, "search.php");

    let actions = send(&mut state, Event::Quit);
    assert_eq!(actions, vec![Action::WatchHostAppearance(false), Action::Quit]);

    assert!(!respond(&mut state, search, PIE_RESULTS));
    assert!(state.search.results().is_empty());
}
