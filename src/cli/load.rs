//! CLI `load` command — replace the pair table from a scored-prediction dataset.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::cli::download_text;
use robokop_pairs::config::RobokopConfig;
use robokop_pairs::pairs::load::{load_pairs, parse_dataset, select_for_load};

/// Load from a file, a URL, or the configured `pairs.dataset_url`.
pub async fn load(
    config: &RobokopConfig,
    file: Option<&Path>,
    url: Option<&str>,
    min_score: Option<f64>,
) -> Result<()> {
    let (json, source) = match (file, url.or(config.pairs.dataset_url.as_deref())) {
        (Some(path), _) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read dataset: {}", path.display()))?;
            (json, path.display().to_string())
        }
        (None, Some(url)) => {
            println!("Downloading {url}...");
            (download_text(url).await?, url.to_string())
        }
        (None, None) => bail!("no dataset given: pass a file, --url, or set pairs.dataset_url"),
    };

    let min_score = min_score.unwrap_or(config.pairs.min_score);
    let records = parse_dataset(&json)?;
    let total = records.len();
    let selected = select_for_load(records, min_score);

    let db_path = config.resolved_db_path();
    let mut conn = robokop_pairs::db::open_database(&db_path)?;
    let summary = load_pairs(&mut conn, &selected, &source)?;

    println!("Load complete:");
    println!("  Records in dataset:  {total}");
    println!("  Score threshold:     {min_score}");
    println!("  Below threshold:     {}", total - summary.loaded);
    println!("  Pairs loaded:        {}", summary.loaded);
    println!("  Loaded at:           {}", summary.loaded_at);

    Ok(())
}
