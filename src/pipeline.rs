use crate::config::PipelineConfig;
use crate::documents::{IngredientDocument, RecipeDocument};
use crate::nutrition_estimator::{resolve_all, EstimationSummary, IngredientRecord};
use crate::recipe_aggregator::aggregate_ingredients;
use crate::recipe_parser::RawRecord;
use crate::selection::quality_filter::filter_records;
use crate::selection::sampler::{select_diverse, CategoryCounts};
use crate::selection::taxonomy::classify_all;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSummary {
    pub source_records: usize,
    pub qualifying_records: usize,
    pub quota_pass: usize,
    pub fill_pass: usize,
    pub counts: CategoryCounts,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub recipes: Vec<RecipeDocument>,
    pub ingredients: Vec<IngredientDocument>,
    pub ingredient_records: Vec<IngredientRecord>,
    pub selection: SelectionSummary,
    pub estimation: EstimationSummary,
}

/// Filter, classify, sample, aggregate and estimate in one pass. Each stage
/// consumes the whole output of the previous one.
pub fn run_pipeline(records: Vec<RawRecord>, config: &PipelineConfig) -> PipelineOutput {
    let source_records = records.len();
    let filtered = filter_records(records, &config.thresholds);
    let qualifying_records = filtered.len();

    let classified = classify_all(filtered);
    let selected = select_diverse(classified, config.target, config.seed, &config.quotas);

    let finalized = aggregate_ingredients(selected.recipes.iter().map(|r| &r.record));
    let (ingredient_records, estimation) = resolve_all(finalized);

    let recipes = selected.recipes.iter().map(RecipeDocument::from).collect();
    let ingredients = ingredient_records.iter().map(IngredientDocument::from).collect();

    PipelineOutput {
        recipes,
        ingredients,
        ingredient_records,
        selection: SelectionSummary {
            source_records,
            qualifying_records,
            quota_pass: selected.quota_pass_count,
            fill_pass: selected.fill_pass_count,
            counts: selected.counts,
        },
        estimation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_parser::NutritionVector;

    fn record(id: usize, tags: &[&str], steps: usize) -> RawRecord {
        RawRecord {
            id: id.to_string(),
            title: format!("dish {}", id),
            description: Some("tasty".to_string()),
            minutes: Some(30),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ingredients: vec!["salt".into(), "2 cups rice".into(), "chicken".into(), "onion".into(), format!("spice {}", id)],
            steps: (0..steps).map(|s| format!("step {}", s)).collect(),
            nutrition: Some(NutritionVector([250.0, 10.0, 2.0, 5.0, 20.0, 1.0, 8.0])),
        }
    }

    #[test]
    fn test_run_pipeline_small_pool() {
        let mut records: Vec<RawRecord> = (0..6).map(|i| record(i, &["italian", "lunch"], 6)).collect();
        records.push(RawRecord { minutes: Some(5), ..record(99, &[], 6) });
        let config = PipelineConfig { target: 4, ..PipelineConfig::default() };

        let output = run_pipeline(records, &config);
        assert_eq!(output.selection.source_records, 7);
        assert_eq!(output.selection.qualifying_records, 6);
        assert_eq!(output.recipes.len(), 4);
        assert_eq!(output.selection.quota_pass, 4);
        assert!(output.recipes.iter().all(|r| r.cuisine == "Italian" && r.meal == "lunch"));
        // four shared ingredients plus one "spice N" per selected recipe
        assert_eq!(output.ingredients.len(), 8);
        assert_eq!(output.estimation.defaulted, 0);
        let salt = output.ingredients.iter().find(|i| i.label == "salt").unwrap();
        assert_eq!(salt.calories, 50.0);
    }

    #[test]
    fn test_run_pipeline_is_deterministic() {
        let make = || (0..40).map(|i| record(i, &[["thai", "greek", "bbq"][i % 3], "dinner"], 4 + i % 14)).collect::<Vec<_>>();
        let config = PipelineConfig { target: 25, ..PipelineConfig::default() };
        let first = run_pipeline(make(), &config);
        let second = run_pipeline(make(), &config);
        assert_eq!(first, second);
    }
}
