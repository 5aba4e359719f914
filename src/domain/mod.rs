//! Domain layer for the Mums plugin.
//!
//! Core types shared by every other layer, independent of Zellij APIs and of
//! the storage backend.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`recipe`]: Recipe, category and favorite records in the catalog's wire format
//!
//! # Examples
//!
//! ```
//! use mums::domain::{FavoriteRecord, RecipeSummary, Result};
//!
//! fn bookmark(summary: &RecipeSummary) -> Result<FavoriteRecord> {
//!     Ok(FavoriteRecord::from(summary))
//! }
//! ```

pub mod error;
pub mod recipe;

pub use error::{MumsError, Result};
pub use recipe::{
    Category, FavoriteRecord, Ingredient, IngredientSlot, RecipeDetail, RecipeSummary,
    INGREDIENT_SLOTS,
};
