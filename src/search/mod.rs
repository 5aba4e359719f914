//! Search orchestration and the catalog-backed views.
//!
//! - `plan`: the category/query decision table
//! - `orchestrator`: cancel-and-replace search plus random pick
//! - `detail`: recipe lookup for the detail view
//! - `categories`: one-time category list and fuzzy picker filtering

pub mod categories;
pub mod detail;
pub mod orchestrator;
pub mod plan;

pub use categories::{CategoryList, CategoryMatch};
pub use detail::{DetailStatus, DetailTab, DetailView};
pub use orchestrator::{
    SearchOrchestrator, SearchStatus, NOT_FOUND_MESSAGE, NO_RESULTS_MESSAGE, PROMPT_MESSAGE,
};
pub use plan::FetchPlan;
