use serde::{Deserialize, Serialize};
use std::fmt;

use crate::recipe_parser::RawRecord;

pub const OTHER_CUISINE: &str = "Other";
pub const DEFAULT_MEAL: &str = "dinner";

/// Priority-ordered: the first cuisine with any keyword found in any tag wins.
pub const CUISINE_KEYWORDS: &[(&str, &[&str])] = &[
    ("Italian", &["italian", "pasta", "risotto", "pizza", "pesto"]),
    ("Mexican", &["mexican", "taco", "enchilada", "salsa", "churro"]),
    ("Asian", &["asian", "chinese", "japanese", "thai", "vietnamese", "korean", "stir-fry"]),
    ("Mediterranean", &["mediterranean", "greek", "middle eastern", "lebanese", "moroccan"]),
    ("American", &["american", "burger", "bbq", "fried", "southern"]),
    ("Indian", &["indian", "curry", "tikka", "dal", "tandoori"]),
    ("Middle Eastern", &["middle eastern", "lebanese", "persian", "falafel", "hummus"]),
    ("French", &["french", "crepe", "coq au vin", "beef bourguignon"]),
];

pub const MEAL_KEYWORDS: &[(&str, &[&str])] = &[
    ("breakfast", &["breakfast", "brunch", "pancake", "waffle", "omelet", "smoothie"]),
    ("lunch", &["lunch", "sandwich", "salad", "wrap", "bowl"]),
    ("dinner", &["dinner", "supper"]),
    ("snack", &["snack", "appetizer", "dip", "chip"]),
];

pub const DIETARY_KEYWORDS: &[&str] = &[
    "vegetarian", "vegan", "gluten-free", "low-carb", "keto", "paleo",
    "dairy-free", "nut-free", "egg-free", "soy-free", "low-sugar", "low-fat",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn from_step_count(steps: usize) -> Self {
        match steps {
            0..=8 => Difficulty::Easy,
            9..=15 => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRecipe {
    pub record: RawRecord,
    pub cuisine: &'static str,
    pub meal: &'static str,
    pub difficulty: Difficulty,
    pub dietary_tags: Vec<&'static str>,
}

fn lowercase_tags(tags: &[String]) -> Vec<String> {
    tags.iter().map(|t| t.to_lowercase()).collect()
}

fn any_tag_contains(tags_lower: &[String], keyword: &str) -> bool {
    tags_lower.iter().any(|tag| tag.contains(keyword))
}

fn first_match(tags_lower: &[String], mapping: &[(&'static str, &[&str])]) -> Option<&'static str> {
    mapping
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| any_tag_contains(tags_lower, k)))
        .map(|(name, _)| *name)
}

pub fn classify_cuisine(tags: &[String]) -> &'static str {
    first_match(&lowercase_tags(tags), CUISINE_KEYWORDS).unwrap_or(OTHER_CUISINE)
}

pub fn classify_meal(tags: &[String]) -> &'static str {
    first_match(&lowercase_tags(tags), MEAL_KEYWORDS).unwrap_or(DEFAULT_MEAL)
}

/// Every dietary keyword present in any tag, in keyword declaration order.
pub fn extract_dietary_tags(tags: &[String]) -> Vec<&'static str> {
    let tags_lower = lowercase_tags(tags);
    DIETARY_KEYWORDS
        .iter()
        .copied()
        .filter(|k| any_tag_contains(&tags_lower, k))
        .collect()
}

pub fn classify(record: RawRecord) -> ClassifiedRecipe {
    ClassifiedRecipe {
        cuisine: classify_cuisine(&record.tags),
        meal: classify_meal(&record.tags),
        difficulty: Difficulty::from_step_count(record.steps.len()),
        dietary_tags: extract_dietary_tags(&record.tags),
        record,
    }
}

pub fn classify_all(records: Vec<RawRecord>) -> Vec<ClassifiedRecipe> {
    records.into_iter().map(classify).collect()
}
