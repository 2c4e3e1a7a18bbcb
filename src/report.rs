use std::collections::BTreeMap;
use std::fmt::{self, Write};

use crate::documents::{IngredientDocument, RecipeDocument};

const RULE_WIDTH: usize = 60;

/// Operator listing: selected titles grouped by cuisine, then every
/// ingredient with its macros, both sorted alphabetically.
pub fn render_summary(recipes: &[RecipeDocument], ingredients: &[IngredientDocument]) -> Result<String, fmt::Error> {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    let mut by_cuisine: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for recipe in recipes {
        by_cuisine.entry(recipe.cuisine.as_str()).or_default().push(recipe.title.as_str());
    }

    writeln!(out, "{rule}\nSELECTED RECIPES LIST\n{rule}")?;
    for (cuisine, titles) in by_cuisine.iter_mut() {
        titles.sort_unstable();
        writeln!(out, "\n{} ({} recipes):", cuisine, titles.len())?;
        for (i, title) in titles.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, title)?;
        }
    }

    writeln!(out, "\n{rule}\nINGREDIENTS LIST\n{rule}")?;
    writeln!(out, "Total: {} unique ingredients\n", ingredients.len())?;

    let mut sorted: Vec<&IngredientDocument> = ingredients.iter().collect();
    sorted.sort_by(|a, b| a.label.cmp(&b.label));
    for (i, ing) in sorted.iter().enumerate() {
        writeln!(
            out,
            "{:4}. {:30} | {:6.1} kcal | P: {:4.1}g | C: {:4.1}g | F: {:4.1}g",
            i + 1,
            ing.label,
            ing.calories,
            ing.protein,
            ing.carbs,
            ing.fats
        )?;
    }
    writeln!(out, "\n{rule}")?;
    Ok(out)
}
