//! Detector database command implementations.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use console::style;
use tracing::info;

use stratum_compile::{CompileConfig, DetectorDatabase};

use super::common::{database_path, load_database};

/// Print a summary of a detector database.
pub fn stats(config: &CompileConfig, file: Option<&Path>) -> Result<()> {
    let path = database_path(config, file)?;
    println!(
        "{} Loading database from {}",
        style("→").cyan().bold(),
        path.display()
    );
    let database = load_database(&path)?;

    let mut by_timeslices: BTreeMap<usize, (usize, usize)> = BTreeMap::new();
    for (key, detectors) in database.situations() {
        let entry = by_timeslices.entry(key.num_timeslices()).or_default();
        entry.0 += 1;
        entry.1 += detectors.len();
    }
    let total_detectors: usize = by_timeslices.values().map(|&(_, d)| d).sum();

    println!();
    println!("  Situations:  {}", style(database.len()).yellow());
    println!("  Detectors:   {}", style(total_detectors).yellow());
    println!(
        "  Frozen:      {}",
        if database.is_frozen() { "yes" } else { "no" }
    );
    if !by_timeslices.is_empty() {
        println!();
        println!("  Time slices  Situations  Detectors");
        for (timeslices, (situations, detectors)) in &by_timeslices {
            println!("  {timeslices:>11}  {situations:>10}  {detectors:>9}");
        }
    }

    Ok(())
}

/// Re-encode a detector database and check that the copy answers every
/// stored situation with the same detectors.
pub fn verify(config: &CompileConfig, file: Option<&Path>) -> Result<()> {
    let path = database_path(config, file)?;
    let database = load_database(&path)?;
    println!(
        "{} Verifying {} situations from {}",
        style("→").cyan().bold(),
        database.len(),
        path.display()
    );

    let restored = DetectorDatabase::from_json(&database.to_json()?)?;
    if restored.len() != database.len() {
        anyhow::bail!(
            "Re-encoded database holds {} situations instead of {}",
            restored.len(),
            database.len()
        );
    }

    let mut mismatches = 0usize;
    for (key, detectors) in database.situations() {
        let answer = restored.get_detectors(key.subtemplates(), key.plaquettes())?;
        if answer != Some(detectors) {
            mismatches += 1;
            info!(
                "Situation with hash {:#018x} answers differently",
                key.reliable_hash()
            );
        }
    }

    if mismatches > 0 {
        anyhow::bail!(
            "{} of {} situations answer differently after re-encoding",
            mismatches,
            database.len()
        );
    }

    println!(
        "{} All {} situations answer identically",
        style("✓").green().bold(),
        database.len()
    );
    Ok(())
}
