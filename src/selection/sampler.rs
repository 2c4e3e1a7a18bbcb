use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

use super::taxonomy::ClassifiedRecipe;

/// Ordered category → ceiling table. A category missing from the table has a
/// ceiling of zero and is never admitted by the quota pass.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotaTable {
    entries: Vec<(String, usize)>,
}

impl QuotaTable {
    pub fn new<S: Into<String>>(entries: impl IntoIterator<Item = (S, usize)>) -> Self {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn ceiling(&self, category: &str) -> usize {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map_or(0, |(_, ceiling)| *ceiling)
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuotaTables {
    pub cuisine: QuotaTable,
    pub meal: QuotaTable,
    pub difficulty: QuotaTable,
}

impl Default for QuotaTables {
    fn default() -> Self {
        Self {
            cuisine: QuotaTable::new([
                ("Italian", 60),
                ("Mexican", 60),
                ("Asian", 60),
                ("Mediterranean", 60),
                ("American", 60),
                ("Indian", 50),
                ("Middle Eastern", 50),
                ("French", 50),
                ("Other", 50),
            ]),
            meal: QuotaTable::new([("breakfast", 100), ("lunch", 200), ("dinner", 150), ("snack", 50)]),
            difficulty: QuotaTable::new([("easy", 250), ("medium", 175), ("hard", 75)]),
        }
    }
}

pub type Histogram = BTreeMap<String, usize>;

/// Running per-category totals, threaded explicitly through selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCounts {
    pub cuisine: Histogram,
    pub meal: Histogram,
    pub difficulty: Histogram,
}

impl CategoryCounts {
    fn count(histogram: &Histogram, key: &str) -> usize {
        histogram.get(key).copied().unwrap_or(0)
    }

    pub fn admits(&self, recipe: &ClassifiedRecipe, quotas: &QuotaTables) -> bool {
        Self::count(&self.cuisine, recipe.cuisine) < quotas.cuisine.ceiling(recipe.cuisine)
            && Self::count(&self.meal, recipe.meal) < quotas.meal.ceiling(recipe.meal)
            && Self::count(&self.difficulty, recipe.difficulty.as_str())
                < quotas.difficulty.ceiling(recipe.difficulty.as_str())
    }

    pub fn record(&mut self, recipe: &ClassifiedRecipe) {
        *self.cuisine.entry(recipe.cuisine.to_string()).or_insert(0) += 1;
        *self.meal.entry(recipe.meal.to_string()).or_insert(0) += 1;
        *self.difficulty.entry(recipe.difficulty.as_str().to_string()).or_insert(0) += 1;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedSet {
    pub recipes: Vec<ClassifiedRecipe>,
    pub counts: CategoryCounts,
    pub quota_pass_count: usize,
    pub fill_pass_count: usize,
}

/// Pass 1: walk `order` and admit a pool index only while all three of its
/// category counters are under their ceilings.
pub fn quota_pass(
    pool: &[ClassifiedRecipe],
    order: &[usize],
    target: usize,
    quotas: &QuotaTables,
    counts: &mut CategoryCounts,
) -> Vec<usize> {
    let mut admitted = Vec::new();
    for &idx in order {
        if admitted.len() >= target {
            break;
        }
        let recipe = &pool[idx];
        if counts.admits(recipe, quotas) {
            counts.record(recipe);
            admitted.push(idx);
        }
    }
    admitted
}

/// Pass 2: draw up to `needed` indices without replacement from those not yet
/// admitted, ignoring quotas.
pub fn fill_pass(
    pool: &[ClassifiedRecipe],
    admitted: &[usize],
    needed: usize,
    seed: u64,
    counts: &mut CategoryCounts,
) -> Vec<usize> {
    let mut taken = vec![false; pool.len()];
    for &idx in admitted {
        taken[idx] = true;
    }
    let mut remaining: Vec<usize> = (0..pool.len()).filter(|&i| !taken[i]).collect();
    let amount = needed.min(remaining.len());

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let (drawn, _) = remaining.partial_shuffle(&mut rng, amount);
    let drawn = drawn.to_vec();
    for &idx in &drawn {
        counts.record(&pool[idx]);
    }
    drawn
}

/// Picks up to `target` recipes balanced across cuisine, meal and difficulty.
/// A pool smaller than `target` yields a smaller selection.
pub fn select_diverse(
    pool: Vec<ClassifiedRecipe>,
    target: usize,
    seed: u64,
    quotas: &QuotaTables,
) -> SelectedSet {
    let mut order: Vec<usize> = (0..pool.len()).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    let mut counts = CategoryCounts::default();
    let mut chosen = quota_pass(&pool, &order, target, quotas, &mut counts);
    let quota_pass_count = chosen.len();

    let needed = target.saturating_sub(chosen.len());
    let mut fill_pass_count = 0;
    if needed > 0 {
        tracing::info!(quota_pass = quota_pass_count, needed, "Filling remaining slots ignoring quotas");
        let filled = fill_pass(&pool, &chosen, needed, seed, &mut counts);
        fill_pass_count = filled.len();
        chosen.extend(filled);
    }

    let mut slots: Vec<Option<ClassifiedRecipe>> = pool.into_iter().map(Some).collect();
    let recipes: Vec<ClassifiedRecipe> = chosen.iter().filter_map(|&i| slots[i].take()).collect();

    tracing::info!(selected = recipes.len(), target, "Selected diverse recipes");
    tracing::info!(cuisines = ?counts.cuisine, meals = ?counts.meal, difficulty = ?counts.difficulty, "Selection distribution");

    SelectedSet {
        recipes,
        counts,
        quota_pass_count,
        fill_pass_count,
    }
}
