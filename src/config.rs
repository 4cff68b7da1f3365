use crate::matcher::MatchPolicy;
use crate::model::ConfigError;
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_PATH: &str = "./output/results.txt";

/// Groups merchant listings under the catalog product they describe.
#[derive(Debug, Parser)]
#[command(name = "catalog-matcher")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Products file, one JSON object per line.
    pub products_file: PathBuf,

    /// Listings file, one JSON object per line.
    pub listings_file: PathBuf,

    /// Where to write the grouped results.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Optional JSON config file.
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Only match listings whose title contains a product model.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output_path: Option<PathBuf>,
    pub require_positive_score: bool,
}

pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Settings for one run after merging flags, config file and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub products_file: PathBuf,
    pub listings_file: PathBuf,
    pub output_path: PathBuf,
    pub policy: MatchPolicy,
}

impl Cli {
    pub fn resolve(self) -> Result<RunConfig, ConfigError> {
        let file = match &self.config {
            Some(path) => load_config(path)?,
            None => AppConfig::default(),
        };
        Ok(self.merge(file))
    }

    fn merge(self, file: AppConfig) -> RunConfig {
        RunConfig {
            products_file: self.products_file,
            listings_file: self.listings_file,
            output_path: self
                .output
                .or(file.output_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
            policy: MatchPolicy::from_strict(self.strict || file.require_positive_score),
        }
    }
}
