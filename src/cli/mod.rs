pub mod doctor;
pub mod export;
pub mod load;
pub mod query;
pub mod stats;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

/// Download a dataset into memory, showing a progress bar on stderr.
pub async fn download_text(url: &str) -> Result<String> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("HTTP request failed for {url}"))?;

    anyhow::ensure!(
        response.status().is_success(),
        "download failed with HTTP {}",
        response.status()
    );

    let pb = match response.content_length() {
        Some(size) => {
            let pb = ProgressBar::new(size);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  {bar:40.cyan/blue} {bytes}/{total_bytes} ({eta})")?
                    .progress_chars("##-"),
            );
            pb
        }
        None => ProgressBar::new_spinner(),
    };

    let bytes = response.bytes().await.context("error reading response")?;
    pb.inc(bytes.len() as u64);
    pb.finish_and_clear();

    String::from_utf8(bytes.to_vec()).context("dataset is not valid UTF-8")
}
