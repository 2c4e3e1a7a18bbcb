use crate::recipe_parser::RawRecord;

/// Completeness bounds a record must meet to be considered for selection.
/// All ranges are inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityThresholds {
    pub min_ingredients: usize,
    pub max_ingredients: usize,
    pub min_minutes: i64,
    pub max_minutes: i64,
    pub min_steps: usize,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_ingredients: 5,
            max_ingredients: 20,
            min_minutes: 15,
            max_minutes: 120,
            min_steps: 5,
        }
    }
}

pub fn passes_quality(record: &RawRecord, thresholds: &QualityThresholds) -> bool {
    let ingredient_count = record.ingredients.len();
    let ingredients_ok =
        (thresholds.min_ingredients..=thresholds.max_ingredients).contains(&ingredient_count);
    let minutes_ok = record
        .minutes
        .is_some_and(|m| (thresholds.min_minutes..=thresholds.max_minutes).contains(&m));
    let steps_ok = record.steps.len() >= thresholds.min_steps;
    let description_ok = record
        .description
        .as_deref()
        .is_some_and(|d| !d.trim().is_empty());

    ingredients_ok && minutes_ok && steps_ok && description_ok
}

pub fn filter_records(records: Vec<RawRecord>, thresholds: &QualityThresholds) -> Vec<RawRecord> {
    let total = records.len();
    let kept: Vec<RawRecord> = records
        .into_iter()
        .filter(|r| passes_quality(r, thresholds))
        .collect();
    tracing::info!(total, kept = kept.len(), "Applied quality filters");
    kept
}
