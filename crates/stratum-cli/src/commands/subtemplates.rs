//! Subtemplates command implementation.

use anyhow::Result;
use console::style;
use tracing::info;

use stratum_compile::CompileConfig;
use stratum_lattice::{QubitTemplate, Template, get_spatially_distinct_subtemplates};

/// Execute the subtemplates command.
///
/// Flags given on the command line take precedence over the configuration.
pub fn execute(
    config: &CompileConfig,
    k: Option<u32>,
    radius: Option<usize>,
    keep_empty: bool,
    show: bool,
) -> Result<()> {
    let k = k.unwrap_or(config.k);
    let radius = radius.unwrap_or(config.manhattan_radius);
    let avoid_zero = config.avoid_zero_plaquettes && !keep_empty;

    let template = QubitTemplate::new();
    let instantiation = template.instantiate(k, None)?;
    info!("Instantiated qubit template at k = {}", k);

    println!(
        "{} Qubit template at k = {} ({}x{} cells)",
        style("→").cyan().bold(),
        k,
        instantiation.nrows(),
        instantiation.ncols()
    );

    let unique = get_spatially_distinct_subtemplates(instantiation.view(), radius, avoid_zero)?;
    let covered = unique
        .subtemplate_indices()
        .iter()
        .filter(|&&id| id != 0)
        .count();

    println!(
        "{} {} distinct subtemplates of radius {} covering {} cells",
        style("✓").green().bold(),
        unique.len(),
        radius,
        covered
    );

    if show {
        for (id, subtemplate) in unique.subtemplates() {
            let occurrences = unique
                .subtemplate_indices()
                .iter()
                .filter(|&&other| other == *id)
                .count();
            println!();
            println!(
                "  {} {} ({} occurrences)",
                style("#").dim(),
                style(id).yellow(),
                occurrences
            );
            for row in subtemplate.rows() {
                let cells: Vec<String> = row.iter().map(|i| format!("{i:>3}")).collect();
                println!("    {}", cells.join(""));
            }
        }
    }

    Ok(())
}
