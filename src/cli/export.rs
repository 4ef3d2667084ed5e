use anyhow::Result;

use robokop_pairs::config::RobokopConfig;
use robokop_pairs::pairs::load::render_dataset;
use robokop_pairs::pairs::store::all_rows;

/// Print every stored pair to stdout in the keyed dataset format read by `load`.
pub fn export(config: &RobokopConfig) -> Result<()> {
    let conn = robokop_pairs::db::open_database(config.resolved_db_path())?;
    let records = all_rows(&conn)?;

    println!("{}", render_dataset(&records)?);
    eprintln!("Exported {} pairs.", records.len());

    Ok(())
}
