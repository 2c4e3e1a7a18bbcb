use anyhow::{Context, Result};
use recipe_curator::cli::{parse_args, Command};
use recipe_curator::config::PipelineConfig;
use recipe_curator::data_loader::load_raw_records;
use recipe_curator::documents::JsonDirectorySink;
use recipe_curator::pipeline::run_pipeline;
use recipe_curator::report::render_summary;
use recipe_curator::transform::transform_catalog;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

async fn process(
    mut config: PipelineConfig,
    source: PathBuf,
    out_dir: Option<PathBuf>,
    target: Option<usize>,
    seed: Option<u64>,
    quiet: bool,
) -> Result<()> {
    if let Some(target) = target {
        config.target = target;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }
    let out_dir = out_dir.unwrap_or_else(|| config.data_dir.clone());

    info!(source = ?source, target = config.target, seed = config.seed, "Processing recipe source");
    let records = load_raw_records(&source).await?;
    let output = run_pipeline(records, &config);

    JsonDirectorySink::new(&out_dir)
        .emit(&output.recipes, &output.ingredients)
        .await
        .with_context(|| format!("Failed to save documents to {:?}", out_dir))?;

    if !quiet {
        println!("{}", render_summary(&output.recipes, &output.ingredients)?);
    }
    info!(
        recipes = output.recipes.len(),
        ingredients = output.ingredients.len(),
        "Processing complete"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli_args = parse_args();
    let config = PipelineConfig::from_env().context("Failed to load configuration")?;

    match cli_args.command {
        Command::Process { source, out_dir, target, seed, quiet } => {
            process(config, source, out_dir, target, seed, quiet).await
        }
        Command::Transform { data_dir, out_dir } => {
            let data_dir = data_dir.unwrap_or(config.data_dir);
            let out_dir = out_dir.unwrap_or_else(|| data_dir.clone());
            let summary = transform_catalog(&data_dir, &out_dir)
                .await
                .with_context(|| format!("Failed to transform documents in {:?}", data_dir))?;
            info!(ingredients = summary.ingredients, recipes = summary.recipes, "Catalog transform finished");
            Ok(())
        }
    }
}
