use anyhow::Result;

use robokop_pairs::config::RobokopConfig;
use robokop_pairs::pairs::stats::pair_stats;

/// Display pair table statistics in the terminal.
pub fn stats(config: &RobokopConfig) -> Result<()> {
    let conn = robokop_pairs::db::open_database(config.resolved_db_path())?;
    let stats = pair_stats(&conn)?;

    println!("Drug-Disease Pair Statistics");
    println!("{}", "=".repeat(40));
    println!("  Total pairs:         {}", stats.total_pairs);
    println!("  Known:               {}", stats.known_pairs);
    println!("  Predicted:           {}", stats.predicted_pairs);
    println!("  Distinct drugs:      {}", stats.distinct_drugs);
    println!("  Distinct diseases:   {}", stats.distinct_diseases);

    if let (Some(min), Some(max)) = (stats.min_score, stats.max_score) {
        println!("  Score range:         {min:.3} .. {max:.3}");
    }
    println!();
    if let Some(ref loaded_at) = stats.loaded_at {
        println!("Loaded at:             {loaded_at}");
    }
    if let Some(ref source) = stats.source {
        println!("Source:                {source}");
    }

    Ok(())
}
