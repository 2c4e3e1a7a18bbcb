pub mod quality_filter;
pub mod sampler;
pub mod taxonomy;

pub use quality_filter::{filter_records, passes_quality, QualityThresholds};
pub use sampler::{select_diverse, CategoryCounts, QuotaTable, QuotaTables, SelectedSet};
pub use taxonomy::{classify, ClassifiedRecipe, Difficulty};
