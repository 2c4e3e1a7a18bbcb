use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::nutrition_estimator::{IngredientRecord, MASS_UNIT, REFERENCE_QUANTITY};
use crate::recipe_aggregator::normalize_ingredient_name;
use crate::selection::taxonomy::ClassifiedRecipe;

pub const RECIPES_FILE: &str = "recipes.json";
pub const INGREDIENTS_FILE: &str = "ingredients.json";

pub const DEFAULT_SERVINGS: u32 = 4;
pub const SUMMARY_MAX_CHARS: usize = 500;
pub const RECIPE_SOURCE: &str = "food-com";
pub const PLACEHOLDER_IMAGE: &str = "/images/default-recipe.jpg";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngredientDocument {
    pub label: String,
    pub unit: String,
    #[serde(rename = "quantityPer100")]
    pub quantity_per_100: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl Default for IngredientDocument {
    fn default() -> Self {
        Self {
            label: String::new(),
            unit: MASS_UNIT.to_string(),
            quantity_per_100: REFERENCE_QUANTITY,
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fats: 0.0,
        }
    }
}

impl From<&IngredientRecord> for IngredientDocument {
    fn from(record: &IngredientRecord) -> Self {
        Self {
            label: record.label.clone(),
            unit: record.unit.to_string(),
            quantity_per_100: record.quantity_per_100,
            calories: record.macros.calories,
            protein: record.macros.protein,
            carbs: record.macros.carbs,
            fats: record.macros.fats,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecipeDocument {
    pub title: String,
    pub cuisine: String,
    pub meal: String,
    pub servings: u32,
    pub summary: String,
    pub time_minutes: i64,
    pub difficulty_level: String,
    pub source: String,
    pub image_url: String,
    pub dietary_tags: Vec<String>,
    pub ingredient_names: Vec<String>,
    pub steps: Vec<String>,
}

// Field defaults used when reading documents back in.
impl Default for RecipeDocument {
    fn default() -> Self {
        Self {
            title: String::new(),
            cuisine: "Other".to_string(),
            meal: "dinner".to_string(),
            servings: DEFAULT_SERVINGS,
            summary: String::new(),
            time_minutes: 30,
            difficulty_level: "medium".to_string(),
            source: RECIPE_SOURCE.to_string(),
            image_url: PLACEHOLDER_IMAGE.to_string(),
            dietary_tags: Vec::new(),
            ingredient_names: Vec::new(),
            steps: Vec::new(),
        }
    }
}

impl From<&ClassifiedRecipe> for RecipeDocument {
    fn from(recipe: &ClassifiedRecipe) -> Self {
        let record = &recipe.record;
        let summary: String = record
            .description
            .as_deref()
            .unwrap_or_default()
            .trim()
            .chars()
            .take(SUMMARY_MAX_CHARS)
            .collect();
        Self {
            title: record.title.trim().to_string(),
            cuisine: recipe.cuisine.to_string(),
            meal: recipe.meal.to_string(),
            servings: DEFAULT_SERVINGS,
            summary,
            time_minutes: record.minutes.unwrap_or_default(),
            difficulty_level: recipe.difficulty.to_string(),
            source: RECIPE_SOURCE.to_string(),
            image_url: PLACEHOLDER_IMAGE.to_string(),
            dietary_tags: recipe.dietary_tags.iter().map(|t| t.to_string()).collect(),
            ingredient_names: record
                .ingredients
                .iter()
                .map(|i| normalize_ingredient_name(i))
                .collect(),
            steps: record.steps.clone(),
        }
    }
}

pub async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {:?}", path))?;
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("Failed to write {:?}", path))
}

pub async fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
}

/// Writes the two generated collections as `recipes.json` and
/// `ingredients.json` under one directory.
#[derive(Debug, Clone)]
pub struct JsonDirectorySink {
    dir: PathBuf,
}

impl JsonDirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn emit(&self, recipes: &[RecipeDocument], ingredients: &[IngredientDocument]) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create output directory {:?}", self.dir))?;

        let recipes_path = self.dir.join(RECIPES_FILE);
        write_json(&recipes_path, recipes).await?;
        tracing::info!(count = recipes.len(), path = ?recipes_path, "Saved recipes");

        let ingredients_path = self.dir.join(INGREDIENTS_FILE);
        write_json(&ingredients_path, ingredients).await?;
        tracing::info!(count = ingredients.len(), path = ?ingredients_path, "Saved ingredients");
        Ok(())
    }
}
