pub mod cli;
pub mod config;
pub mod data_loader;
pub mod documents;
pub mod error;
pub mod nutrition_estimator;
pub mod pipeline;
pub mod recipe_aggregator;
pub mod recipe_parser;
pub mod report;
pub mod selection;
pub mod transform;
