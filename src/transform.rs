use anyhow::Result;
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::documents::{read_json, write_json, IngredientDocument, RecipeDocument, INGREDIENTS_FILE, RECIPES_FILE};
use crate::error::PipelineError;

pub const INGREDIENT_ID_PREFIX: &str = "ing";
pub const RECIPE_ID_PREFIX: &str = "r";
const ID_HASH_CHARS: usize = 8;
const PLACEHOLDER_QUANTITY: u32 = 100;

/// `ing` followed by the first eight hex digits of MD5(lowercased label).
pub fn stable_ingredient_id(label: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(label.to_lowercase().as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    format!("{}{}", INGREDIENT_ID_PREFIX, &digest[..ID_HASH_CHARS])
}

pub fn recipe_id(sequence: usize) -> String {
    format!("{}{:05}", RECIPE_ID_PREFIX, sequence)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogNutrition {
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fats: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogIngredient {
    pub id: String,
    pub label: String,
    pub unit: String,
    pub quantity: i64,
    pub nutrition: CatalogNutrition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRef {
    pub id: String,
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparationStep {
    pub step: String,
    pub description: String,
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecipe {
    pub id: String,
    pub title: String,
    pub cuisine: String,
    pub meal: String,
    pub servings: u32,
    pub ingredients: Vec<IngredientRef>,
    pub summary: String,
    pub time: i64,
    pub difficulty_level: String,
    pub dietary_tags: Vec<String>,
    pub source: String,
    pub img: String,
    pub preparation: Vec<PreparationStep>,
}

/// Label → id lookup used to resolve recipe ingredient names.
pub type IngredientIdMap = HashMap<String, String>;

pub fn transform_ingredients(documents: &[IngredientDocument]) -> (Vec<CatalogIngredient>, IngredientIdMap) {
    let mut ids = IngredientIdMap::new();
    let catalog = documents
        .iter()
        .filter(|doc| !doc.label.is_empty())
        .map(|doc| {
            let id = stable_ingredient_id(&doc.label);
            ids.insert(doc.label.clone(), id.clone());
            CatalogIngredient {
                id,
                label: doc.label.clone(),
                unit: doc.unit.clone(),
                quantity: doc.quantity_per_100 as i64,
                nutrition: CatalogNutrition {
                    calories: doc.calories,
                    carbs: doc.carbs,
                    protein: doc.protein,
                    fats: doc.fats,
                },
            }
        })
        .collect();
    (catalog, ids)
}

/// Names with no catalog entry are dropped from the recipe.
pub fn transform_recipes(documents: &[RecipeDocument], ids: &IngredientIdMap) -> Vec<CatalogRecipe> {
    documents
        .iter()
        .filter(|doc| !doc.title.is_empty())
        .enumerate()
        .map(|(i, doc)| {
            let ingredients: Vec<IngredientRef> = doc
                .ingredient_names
                .iter()
                .filter_map(|name| {
                    ids.get(name).map(|id| IngredientRef {
                        id: id.clone(),
                        name: name.clone(),
                        quantity: PLACEHOLDER_QUANTITY,
                    })
                })
                .collect();
            let ingredient_ids: Vec<String> = ingredients.iter().map(|r| r.id.clone()).collect();
            let preparation = doc
                .steps
                .iter()
                .enumerate()
                .map(|(n, text)| PreparationStep {
                    step: format!("Step {}", n + 1),
                    description: text.clone(),
                    ingredients: ingredient_ids.clone(),
                })
                .collect();

            CatalogRecipe {
                id: recipe_id(i + 1),
                title: doc.title.clone(),
                cuisine: doc.cuisine.clone(),
                meal: doc.meal.clone(),
                servings: doc.servings,
                ingredients,
                summary: doc.summary.clone(),
                time: doc.time_minutes,
                difficulty_level: doc.difficulty_level.clone(),
                dietary_tags: doc.dietary_tags.clone(),
                source: doc.source.clone(),
                img: doc.image_url.clone(),
                preparation,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformSummary {
    pub ingredients: usize,
    pub recipes: usize,
}

/// Reads `ingredients.json` and `recipes.json` from `data_dir` and writes the
/// restructured collections under the same names into `out_dir`.
pub async fn transform_catalog(data_dir: &Path, out_dir: &Path) -> Result<TransformSummary> {
    for name in [INGREDIENTS_FILE, RECIPES_FILE] {
        if !data_dir.join(name).exists() {
            return Err(PipelineError::MissingArtifact {
                name: name.to_string(),
                dir: data_dir.to_path_buf(),
            }
            .into());
        }
    }

    let ingredient_docs: Vec<IngredientDocument> = read_json(&data_dir.join(INGREDIENTS_FILE)).await?;
    let recipe_docs: Vec<RecipeDocument> = read_json(&data_dir.join(RECIPES_FILE)).await?;
    tracing::info!(ingredients = ingredient_docs.len(), recipes = recipe_docs.len(), "Loaded generated documents");

    let (ingredients, ids) = transform_ingredients(&ingredient_docs);
    let recipes = transform_recipes(&recipe_docs, &ids);

    tokio::fs::create_dir_all(out_dir).await?;
    write_json(&out_dir.join(INGREDIENTS_FILE), &ingredients).await?;
    write_json(&out_dir.join(RECIPES_FILE), &recipes).await?;
    tracing::info!(ingredients = ingredients.len(), recipes = recipes.len(), out_dir = ?out_dir, "Transformation complete");

    Ok(TransformSummary {
        ingredients: ingredients.len(),
        recipes: recipes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(label: &str, calories: f64) -> IngredientDocument {
        IngredientDocument {
            label: label.to_string(),
            calories,
            ..IngredientDocument::default()
        }
    }

    #[test]
    fn test_stable_ingredient_id() {
        // md5("salt") = ceb20772e0c9d240c75eb26b0e37abee
        assert_eq!(stable_ingredient_id("salt"), "ingceb20772");
        assert_eq!(stable_ingredient_id("SALT"), stable_ingredient_id("salt"));
        assert_eq!(stable_ingredient_id("salt").len(), 11);
        assert_ne!(stable_ingredient_id("pepper"), stable_ingredient_id("salt"));
    }

    #[test]
    fn test_recipe_id_padding() {
        assert_eq!(recipe_id(1), "r00001");
        assert_eq!(recipe_id(500), "r00500");
    }

    #[test]
    fn test_transform_ingredients_skips_blank_labels() {
        let (catalog, ids) = transform_ingredients(&[ingredient("salt", 0.0), ingredient("", 10.0), ingredient("rice", 130.0)]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[1].quantity, 100);
        assert_eq!(catalog[1].nutrition.calories, 130.0);
        assert_eq!(ids.len(), 2);
        assert_eq!(ids["salt"], catalog[0].id);
    }

    #[test]
    fn test_transform_recipes_resolves_and_numbers() {
        let (_, ids) = transform_ingredients(&[ingredient("salt", 1.0), ingredient("rice", 2.0)]);
        let docs = vec![
            RecipeDocument {
                title: "fried rice".to_string(),
                ingredient_names: vec!["rice".to_string(), "unicorn".to_string(), String::new(), "salt".to_string()],
                steps: vec!["boil".to_string(), "fry".to_string()],
                ..RecipeDocument::default()
            },
            RecipeDocument::default(),
            RecipeDocument {
                title: "plain".to_string(),
                ..RecipeDocument::default()
            },
        ];
        let recipes = transform_recipes(&docs, &ids);
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].id, "r00001");
        assert_eq!(recipes[1].id, "r00002");

        let fried = &recipes[0];
        let names: Vec<&str> = fried.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["rice", "salt"]);
        assert!(fried.ingredients.iter().all(|i| i.quantity == 100));
        assert_eq!(fried.preparation.len(), 2);
        assert_eq!(fried.preparation[1].step, "Step 2");
        assert_eq!(fried.preparation[1].description, "fry");
        assert_eq!(fried.preparation[0].ingredients, vec![ids["rice"].clone(), ids["salt"].clone()]);
        assert_eq!(fried.img, "/images/default-recipe.jpg");
    }

    #[tokio::test]
    async fn test_transform_catalog_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let err = transform_catalog(dir.path(), dir.path()).await.unwrap_err();
        match err.downcast_ref::<PipelineError>() {
            Some(PipelineError::MissingArtifact { name, .. }) => assert_eq!(name, INGREDIENTS_FILE),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
