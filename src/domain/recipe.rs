//! Recipe domain model.
//!
//! Types in this module mirror the catalog API's wire format (`idMeal`,
//! `strMeal`, ...) through serde renames so responses deserialize directly into
//! them. The detail record's twenty positional ingredient/measure fields are
//! collected into a fixed-size slot array instead of dynamically named fields.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of positional ingredient slots in a catalog recipe.
pub const INGREDIENT_SLOTS: usize = 20;

/// Minimal recipe record returned by search and category filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail_url: String,
}

/// One raw positional slot as delivered by the API, before trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientSlot {
    pub ingredient: Option<String>,
    pub measure: Option<String>,
}

/// An extracted ingredient line: trimmed name plus trimmed (possibly empty) measure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub name: String,
    pub measure: String,
}

/// Full recipe record returned by lookup, name search and random pick.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawRecipe")]
pub struct RecipeDetail {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: Option<String>,
    pub video_url: Option<String>,
    pub source_url: Option<String>,
    /// Slots 1..=20 stored at indices 0..20.
    pub slots: [IngredientSlot; INGREDIENT_SLOTS],
}

impl RecipeDetail {
    /// Projects the detail record down to its summary fields.
    #[must_use]
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            thumbnail_url: self.thumbnail_url.clone(),
        }
    }

    /// Extracts the ingredient list.
    ///
    /// Slots are visited in ascending index order. A slot contributes an entry
    /// only when its ingredient name is non-empty after trimming; the measure is
    /// trimmed and may end up empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use mums::domain::{IngredientSlot, RecipeDetail};
    ///
    /// let mut detail: RecipeDetail = serde_json::from_str(
    ///     r#"{"idMeal":"1","strMeal":"Test","strMealThumb":"x"}"#,
    /// ).unwrap();
    /// detail.slots[0] = IngredientSlot {
    ///     ingredient: Some("Chicken".into()),
    ///     measure: Some("200g".into()),
    /// };
    /// detail.slots[1] = IngredientSlot {
    ///     ingredient: Some(" ".into()),
    ///     measure: Some("1 tsp".into()),
    /// };
    ///
    /// let out = detail.ingredients();
    /// assert_eq!(out.len(), 1);
    /// assert_eq!(out[0].name, "Chicken");
    /// ```
    #[must_use]
    pub fn ingredients(&self) -> Vec<Ingredient> {
        self.slots
            .iter()
            .filter_map(|slot| {
                let name = slot.ingredient.as_deref().unwrap_or_default().trim();
                if name.is_empty() {
                    return None;
                }
                let measure = slot.measure.as_deref().unwrap_or_default().trim();
                Some(Ingredient {
                    name: name.to_string(),
                    measure: measure.to_string(),
                })
            })
            .collect()
    }
}

/// Wire shape of a detail record; positional fields land in `rest`.
#[derive(Deserialize)]
struct RawRecipe {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strMealThumb", default)]
    thumbnail_url: Option<String>,
    #[serde(rename = "strCategory", default)]
    category: Option<String>,
    #[serde(rename = "strArea", default)]
    area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(rename = "strYoutube", default)]
    video_url: Option<String>,
    #[serde(rename = "strSource", default)]
    source_url: Option<String>,
    #[serde(flatten)]
    rest: HashMap<String, serde_json::Value>,
}

impl From<RawRecipe> for RecipeDetail {
    fn from(raw: RawRecipe) -> Self {
        let mut slots: [IngredientSlot; INGREDIENT_SLOTS] = Default::default();
        for (index, slot) in slots.iter_mut().enumerate() {
            let position = index + 1;
            slot.ingredient = string_field(&raw.rest, &format!("strIngredient{position}"));
            slot.measure = string_field(&raw.rest, &format!("strMeasure{position}"));
        }

        Self {
            id: raw.id,
            name: raw.name,
            thumbnail_url: raw.thumbnail_url.unwrap_or_default(),
            category: non_empty(raw.category),
            area: non_empty(raw.area),
            instructions: non_empty(raw.instructions),
            video_url: non_empty(raw.video_url),
            source_url: non_empty(raw.source_url),
            slots,
        }
    }
}

fn string_field(fields: &HashMap<String, serde_json::Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(serde_json::Value::as_str).map(String::from)
}

// The API sends "" for missing links as often as it sends null.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Catalog category as listed by `categories.php`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "idCategory", default)]
    pub id: String,
    #[serde(rename = "strCategory")]
    pub name: String,
    #[serde(rename = "strCategoryThumb", default)]
    pub thumbnail_url: String,
    #[serde(rename = "strCategoryDescription", default)]
    pub description: String,
}

/// A user-curated bookmark of a recipe, keyed by catalog id.
///
/// Persisted with the same field names as the catalog so stored favorites stay
/// readable by anything that understands the API format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail_url: String,
}

impl From<&RecipeSummary> for FavoriteRecord {
    fn from(summary: &RecipeSummary) -> Self {
        Self {
            id: summary.id.clone(),
            name: summary.name.clone(),
            thumbnail_url: summary.thumbnail_url.clone(),
        }
    }
}

impl From<&RecipeDetail> for FavoriteRecord {
    fn from(detail: &RecipeDetail) -> Self {
        Self {
            id: detail.id.clone(),
            name: detail.name.clone(),
            thumbnail_url: detail.thumbnail_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detail_from(value: serde_json::Value) -> RecipeDetail {
        serde_json::from_value(value).expect("valid detail json")
    }

    #[test]
    fn extracts_non_empty_ingredients_with_measures() {
        let detail = detail_from(json!({
            "idMeal": "1",
            "strMeal": "Test",
            "strMealThumb": "x",
            "strIngredient1": "Chicken",
            "strMeasure1": "200g",
            "strIngredient2": " ",
            "strMeasure2": "1 tsp",
        }));

        assert_eq!(
            detail.ingredients(),
            vec![Ingredient {
                name: "Chicken".into(),
                measure: "200g".into()
            }]
        );
    }

    #[test]
    fn ingredient_extraction_keeps_index_order_and_trims() {
        let detail = detail_from(json!({
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strIngredient1": "  soy sauce ",
            "strMeasure1": " 3/4 cup",
            "strIngredient2": null,
            "strMeasure2": "1 tbsp",
            "strIngredient3": "",
            "strIngredient5": "water",
            "strMeasure5": null,
            "strIngredient20": "brown sugar",
            "strMeasure20": "  ",
        }));

        let names: Vec<_> = detail.ingredients().into_iter().map(|i| (i.name, i.measure)).collect();
        assert_eq!(
            names,
            vec![
                ("soy sauce".to_string(), "3/4 cup".to_string()),
                ("water".to_string(), String::new()),
                ("brown sugar".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn blank_links_become_none() {
        let detail = detail_from(json!({
            "idMeal": "7",
            "strMeal": "Soup",
            "strYoutube": "",
            "strSource": null,
            "strCategory": "Starter",
            "dateModified": null,
        }));

        assert_eq!(detail.video_url, None);
        assert_eq!(detail.source_url, None);
        assert_eq!(detail.category.as_deref(), Some("Starter"));
        assert_eq!(detail.thumbnail_url, "");
    }

    #[test]
    fn favorite_projection_keeps_identity_fields() {
        let detail = detail_from(json!({
            "idMeal": "9",
            "strMeal": "Pie",
            "strMealThumb": "https://img/pie.jpg",
            "strArea": "British",
        }));

        let record = FavoriteRecord::from(&detail);
        assert_eq!(record.id, "9");
        assert_eq!(record.name, "Pie");
        assert_eq!(record.thumbnail_url, "https://img/pie.jpg");
        assert_eq!(FavoriteRecord::from(&detail.summary()), record);
    }
}
