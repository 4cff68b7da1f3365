// Wires decoding, indexing, matching and the results file together
use crate::catalog::CatalogIndex;
use crate::config::RunConfig;
use crate::matcher::{ListingMatcher, MatchStats};
use crate::model::AppError;
use crate::parser::{listings, products};
use crate::storage::ResultsFile;
use chrono::Utc;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;
use tracing::{info, warn};

/// What a finished run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub products: usize,
    pub manufacturers: usize,
    pub stats: MatchStats,
    pub groups: usize,
}

fn open_input(path: &Path) -> Result<BufReader<File>, AppError> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::InputNotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(AppError::OpenInput {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub fn run(config: &RunConfig) -> Result<RunSummary, AppError> {
    let started = Utc::now();

    // Both inputs must exist before anything is written.
    let products_reader = open_input(&config.products_file)?;
    let listings_reader = open_input(&config.listings_file)?;

    info!("Indexing products from {}...", config.products_file.display());
    let index = CatalogIndex::try_build(products(products_reader))?;
    info!(
        "Indexed {} products across {} manufacturers",
        index.len(),
        index.manufacturer_count()
    );

    info!("Matching listings from {}...", config.listings_file.display());
    let matcher = ListingMatcher::new(config.policy);
    let (grouping, stats) = matcher.try_process(&index, listings(listings_reader))?;
    if stats.matched == 0 {
        warn!("No listing matched any product");
    }

    let groups = ResultsFile::new(&config.output_path).save(&grouping)?;

    let elapsed = Utc::now() - started;
    info!(
        listings = stats.listings,
        matched = stats.matched,
        unmatched = stats.unmatched(),
        unknown_manufacturer = stats.unknown_manufacturer,
        zero_score = stats.zero_score,
        groups,
        elapsed_ms = elapsed.num_milliseconds(),
        "Run finished"
    );

    Ok(RunSummary {
        products: index.len(),
        manufacturers: index.manufacturer_count(),
        stats,
        groups,
    })
}
