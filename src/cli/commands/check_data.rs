use anyhow::Result;
use common::format_euro;
use std::path::Path;
use tracing::{debug, info};

use crate::store::Store;

/// Loads a JSON snapshot, recomputes the derived figures and prints the
/// headline summary. Exits non-zero when the file does not parse.
pub async fn check_data(data_file: &Path) -> Result<()> {
    info!("Checking data file {}", data_file.display());
    let store = Store::from_data_file(data_file)?;

    let (records, evolution, prepaid) = store.counts().await;
    debug!(
        "Loaded {} monthly records, {} evolution entries, {} prepaid entries",
        records, evolution, prepaid
    );

    let monthly = store.monthly_records().await;
    let prepaid_entries = store.prepaid_entries().await;
    let summary = compute::dashboard_summary(&monthly, &prepaid_entries);

    println!("Data file: {}", data_file.display());
    println!("  Monthly records:   {}", records);
    println!("  Evolution entries: {}", evolution);
    println!("  Prepaid entries:   {}", prepaid);
    println!("  Total forecast:    {}", format_euro(summary.total_forecast));
    println!("  Total facturado:   {}", format_euro(summary.total_facturado));
    println!("  Total pendiente:   {}", format_euro(summary.total_pendiente));
    println!("  WIP:               {}", format_euro(summary.wip));
    println!("  Prepaid total:     {}", format_euro(summary.prepaid_total));
    println!("  WIP total:         {}", format_euro(summary.wip_total));
    println!("  WIP calculado:     {}", format_euro(summary.wip_calculado));

    info!("Data file OK");
    Ok(())
}
