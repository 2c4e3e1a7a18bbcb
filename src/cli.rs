use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Select a balanced recipe subset from a raw CSV and build the ingredient catalog
    Process {
        /// Path to the raw recipes CSV
        #[arg(short, long)]
        source: PathBuf,
        /// Directory receiving recipes.json and ingredients.json
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
        /// Number of recipes to select
        #[arg(short, long)]
        target: Option<usize>,
        /// Seed for the shuffle and fill sampling
        #[arg(long)]
        seed: Option<u64>,
        /// Skip the recipe and ingredient listing
        #[arg(short, long)]
        quiet: bool,
    },
    /// Restructure generated documents into seed documents with stable ids
    Transform {
        /// Directory holding recipes.json and ingredients.json
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
        /// Where to write the restructured files (defaults to the data directory)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_process_command() {
        let cli = Cli::try_parse_from(["recipe_curator", "process", "-s", "raw.csv", "--target", "50", "--seed", "9"]).unwrap();
        match cli.command {
            Command::Process { source, out_dir, target, seed, quiet } => {
                assert_eq!(source, PathBuf::from("raw.csv"));
                assert_eq!(out_dir, None);
                assert_eq!(target, Some(50));
                assert_eq!(seed, Some(9));
                assert!(!quiet);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_transform_command() {
        let cli = Cli::try_parse_from(["recipe_curator", "transform", "-d", "data"]).unwrap();
        assert!(matches!(cli.command, Command::Transform { data_dir: Some(_), out_dir: None }));
    }

    #[test]
    fn test_process_requires_source() {
        assert!(Cli::try_parse_from(["recipe_curator", "process"]).is_err());
    }
}
