use crate::recipe_aggregator::{FinalizedIngredient, MacroTotals};

pub const MASS_UNIT: &str = "gram";
pub const REFERENCE_QUANTITY: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IngredientCategory {
    Vegetable,
    Fruit,
    Meat,
    Fish,
    Poultry,
    Grain,
    Dairy,
    Oil,
}

/// Categories in the order their keywords are tested.
pub const CATEGORY_PRIORITY: [IngredientCategory; 8] = [
    IngredientCategory::Vegetable,
    IngredientCategory::Fruit,
    IngredientCategory::Meat,
    IngredientCategory::Fish,
    IngredientCategory::Poultry,
    IngredientCategory::Grain,
    IngredientCategory::Dairy,
    IngredientCategory::Oil,
];

impl IngredientCategory {
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            IngredientCategory::Vegetable => &[
                "carrot", "lettuce", "spinach", "broccoli", "tomato", "onion", "garlic",
                "pepper", "celery", "cucumber", "pea", "bean", "squash",
            ],
            IngredientCategory::Fruit => &["apple", "banana", "orange", "berry", "grape", "lemon", "lime", "pineapple"],
            IngredientCategory::Meat => &["beef", "pork", "lamb", "ham", "bacon", "sausage", "veal"],
            IngredientCategory::Fish => &["salmon", "tuna", "cod", "shrimp", "lobster", "crab", "fish"],
            IngredientCategory::Poultry => &["chicken", "turkey", "duck"],
            IngredientCategory::Grain => &["rice", "pasta", "bread", "flour", "wheat", "oat", "cereal", "corn"],
            IngredientCategory::Dairy => &["milk", "cheese", "yogurt", "butter", "cream", "egg"],
            IngredientCategory::Oil => &["oil", "butter", "ghee"],
        }
    }

    /// Typical kcal and grams of protein, carbs, fats per 100 g.
    pub fn defaults(&self) -> MacroTotals {
        match self {
            IngredientCategory::Vegetable => MacroTotals::new(40.0, 1.0, 9.0, 0.2),
            IngredientCategory::Fruit => MacroTotals::new(50.0, 0.5, 12.0, 0.3),
            IngredientCategory::Meat => MacroTotals::new(150.0, 25.0, 0.0, 5.0),
            IngredientCategory::Fish => MacroTotals::new(110.0, 20.0, 0.0, 2.0),
            IngredientCategory::Poultry => MacroTotals::new(165.0, 31.0, 0.0, 3.6),
            IngredientCategory::Grain => MacroTotals::new(350.0, 12.0, 70.0, 2.0),
            IngredientCategory::Dairy => MacroTotals::new(100.0, 7.0, 5.0, 5.0),
            IngredientCategory::Oil => MacroTotals::new(800.0, 0.0, 0.0, 90.0),
        }
    }
}

/// Purely lexical: the first category with a keyword contained in the name.
pub fn categorize_ingredient(name: &str) -> IngredientCategory {
    let name_lower = name.to_lowercase();
    CATEGORY_PRIORITY
        .into_iter()
        .find(|category| category.keywords().iter().any(|k| name_lower.contains(k)))
        .unwrap_or(IngredientCategory::Vegetable)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NutritionSource {
    Computed,
    Estimated(IngredientCategory),
}

/// Final catalog entry. Its macros come entirely from recipe attribution or
/// entirely from the category table.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientRecord {
    pub label: String,
    pub unit: &'static str,
    pub quantity_per_100: f64,
    pub macros: MacroTotals,
    pub count: usize,
    pub source: NutritionSource,
}

pub fn resolve_ingredient(ingredient: FinalizedIngredient) -> IngredientRecord {
    let (macros, source) = if ingredient.needs_estimate() {
        let category = categorize_ingredient(&ingredient.label);
        (category.defaults(), NutritionSource::Estimated(category))
    } else {
        (ingredient.macros, NutritionSource::Computed)
    };
    IngredientRecord {
        label: ingredient.label,
        unit: MASS_UNIT,
        quantity_per_100: REFERENCE_QUANTITY,
        macros,
        count: ingredient.count,
        source,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EstimationSummary {
    pub calculated: usize,
    pub defaulted: usize,
}

pub fn resolve_all(ingredients: Vec<FinalizedIngredient>) -> (Vec<IngredientRecord>, EstimationSummary) {
    let mut summary = EstimationSummary::default();
    let records: Vec<IngredientRecord> = ingredients
        .into_iter()
        .map(resolve_ingredient)
        .inspect(|record| match record.source {
            NutritionSource::Computed => summary.calculated += 1,
            NutritionSource::Estimated(_) => summary.defaulted += 1,
        })
        .collect();
    tracing::info!(
        total = records.len(),
        calculated = summary.calculated,
        defaulted = summary.defaulted,
        "Resolved ingredient nutrition"
    );
    (records, summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finalized(label: &str, calories: f64) -> FinalizedIngredient {
        FinalizedIngredient {
            label: label.to_string(),
            count: 1,
            macros: MacroTotals::new(calories, 1.0, 2.0, 3.0),
        }
    }

    #[test]
    fn test_categorize_priority() {
        assert_eq!(categorize_ingredient("chicken breast"), IngredientCategory::Poultry);
        assert_eq!(categorize_ingredient("ground beef"), IngredientCategory::Meat);
        assert_eq!(categorize_ingredient("unsalted butter"), IngredientCategory::Dairy);
        assert_eq!(categorize_ingredient("ghee"), IngredientCategory::Oil);
        // vegetable keywords are tested first: "pea" matches "peanut"
        assert_eq!(categorize_ingredient("peanut oil"), IngredientCategory::Vegetable);
        assert_eq!(categorize_ingredient("lemon juice"), IngredientCategory::Fruit);
        assert_eq!(categorize_ingredient("Canned Tuna"), IngredientCategory::Fish);
    }

    #[test]
    fn test_unmatched_defaults_to_vegetable() {
        assert_eq!(categorize_ingredient("xanthan gum"), IngredientCategory::Vegetable);
        let record = resolve_ingredient(finalized("xanthan gum", 0.0));
        assert_eq!(record.macros, MacroTotals::new(40.0, 1.0, 9.0, 0.2));
        assert_eq!(record.source, NutritionSource::Estimated(IngredientCategory::Vegetable));
    }

    #[test]
    fn test_zero_calories_resolve_to_poultry_defaults() {
        let record = resolve_ingredient(finalized("chicken breast", 0.0));
        assert_eq!(record.macros, MacroTotals::new(165.0, 31.0, 0.0, 3.6));
        assert_eq!(record.unit, "gram");
        assert_eq!(record.quantity_per_100, 100.0);
    }

    #[test]
    fn test_computed_values_untouched() {
        let record = resolve_ingredient(finalized("chicken breast", 12.5));
        assert_eq!(record.macros, MacroTotals::new(12.5, 1.0, 2.0, 3.0));
        assert_eq!(record.source, NutritionSource::Computed);
    }

    #[test]
    fn test_resolve_all_counts() {
        let (records, summary) = resolve_all(vec![finalized("salt", 0.0), finalized("rice", 30.0)]);
        assert_eq!(records.len(), 2);
        assert_eq!(summary, EstimationSummary { calculated: 1, defaulted: 1 });
    }
}
