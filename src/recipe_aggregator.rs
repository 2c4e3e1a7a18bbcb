use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::recipe_parser::{NutritionVector, RawRecord};

// Grams representing 100% of the daily value.
pub const DV_PROTEIN_G: f64 = 50.0;
pub const DV_CARBS_G: f64 = 275.0;
pub const DV_FAT_G: f64 = 78.0;

static QUANTITY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s./]+").expect("static regex"));
static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").expect("static regex"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

/// Reduces an ingredient mention to its aggregation key: quantity prefix
/// dropped, lowercased, ASCII alphanumerics and single spaces only.
///
/// The quantity prefix is stripped again after punctuation removal so that
/// e.g. `"-1 egg"` lands on `"egg"`; this keeps the transform idempotent.
pub fn normalize_ingredient_name(name: &str) -> String {
    let without_quantity = QUANTITY_PREFIX.replace(name, "");
    let lowered = without_quantity.to_lowercase();
    let alnum = NON_ALNUM.replace_all(lowered.trim(), "");
    let collapsed = WHITESPACE_RUN.replace_all(&alnum, " ");
    QUANTITY_PREFIX.replace(collapsed.trim(), "").trim().to_string()
}

/// Rounds to one decimal place on the exact binary value, with ties going to
/// the even digit (`12.25` becomes `12.2`, `0.15` becomes `0.1`).
pub fn round1(value: f64) -> f64 {
    format!("{:.1}", value).parse::<f64>().unwrap_or(value)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl MacroTotals {
    pub fn new(calories: f64, protein: f64, carbs: f64, fats: f64) -> Self {
        Self { calories, protein, carbs, fats }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fats: self.fats * factor,
        }
    }
}

/// Converts a source nutrition vector to kcal and grams. An absent vector
/// converts to all zeros.
pub fn convert_nutrition(nutrition: Option<&NutritionVector>) -> MacroTotals {
    let Some(vector) = nutrition else {
        return MacroTotals::default();
    };
    let grams = |pdv: f64, reference: f64| round1((pdv / 100.0 * reference).max(0.0));
    MacroTotals {
        calories: round1(vector.calories()),
        protein: grams(vector.protein_pdv(), DV_PROTEIN_G),
        carbs: grams(vector.carbs_pdv(), DV_CARBS_G),
        fats: grams(vector.fat_pdv(), DV_FAT_G),
    }
}

/// Running sums for one normalized ingredient.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientAggregate {
    pub count: usize,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl IngredientAggregate {
    fn add(&mut self, share: &MacroTotals) {
        self.count += 1;
        self.calories += share.calories;
        self.protein += share.protein;
        self.carbs += share.carbs;
        self.fats += share.fats;
    }

    fn mean(&self) -> MacroTotals {
        if self.count == 0 {
            return MacroTotals::default();
        }
        let count = self.count as f64;
        macro_rules! mean_of {
            ($field:ident) => {
                round1(self.$field / count)
            };
        }
        MacroTotals {
            calories: mean_of!(calories),
            protein: mean_of!(protein),
            carbs: mean_of!(carbs),
            fats: mean_of!(fats),
        }
    }
}

/// Averaged, rounded nutrition for one ingredient as computed from recipes.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedIngredient {
    pub label: String,
    pub count: usize,
    pub macros: MacroTotals,
}

impl FinalizedIngredient {
    pub fn needs_estimate(&self) -> bool {
        self.macros.calories == 0.0
    }
}

/// Keyed by normalized name, iterated in first-seen order.
#[derive(Debug, Default)]
pub struct IngredientAccumulator {
    index: HashMap<String, usize>,
    entries: Vec<(String, IngredientAggregate)>,
}

impl IngredientAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits the recipe's totals evenly over its ingredient mentions
    /// (duplicates included) and credits each normalized name once per mention.
    pub fn add_recipe(&mut self, record: &RawRecord) {
        let totals = convert_nutrition(record.nutrition.as_ref());
        let mentions = record.ingredients.len().max(1);
        let share = totals.scaled(1.0 / mentions as f64);

        for mention in &record.ingredients {
            let label = normalize_ingredient_name(mention);
            if label.is_empty() {
                continue;
            }
            self.entry(label).add(&share);
        }
    }

    fn entry(&mut self, label: String) -> &mut IngredientAggregate {
        let slot = match self.index.get(&label) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(label.clone(), slot);
                self.entries.push((label, IngredientAggregate::default()));
                slot
            }
        };
        &mut self.entries[slot].1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, label: &str) -> Option<&IngredientAggregate> {
        self.index.get(label).map(|&slot| &self.entries[slot].1)
    }

    pub fn finalize(self) -> Vec<FinalizedIngredient> {
        self.entries
            .into_iter()
            .map(|(label, aggregate)| FinalizedIngredient {
                macros: aggregate.mean(),
                count: aggregate.count,
                label,
            })
            .collect()
    }
}

pub fn aggregate_ingredients<'a>(records: impl IntoIterator<Item = &'a RawRecord>) -> Vec<FinalizedIngredient> {
    let mut accumulator = IngredientAccumulator::new();
    for record in records {
        accumulator.add_recipe(record);
    }
    tracing::info!(unique = accumulator.len(), "Extracted unique ingredients");
    accumulator.finalize()
}
