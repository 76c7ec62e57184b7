//! Layout command implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use console::style;

use stratum_compile::{BlockLayout, CompileConfig, CompiledBlock, lookup_detectors};
use stratum_ir::{Basis, BlockPosition2D};
use stratum_lattice::plaquette::library::memory_plaquettes;
use stratum_lattice::{
    LinearFunction, QubitTemplate, Template, get_spatially_distinct_3d_subtemplates,
};

use super::common::load_database;

/// A Z-basis memory block: initialisation, `2k - 1` bulk rounds, readout.
fn memory_block() -> CompiledBlock {
    CompiledBlock::new(
        Arc::new(QubitTemplate::new()),
        vec![
            memory_plaquettes(Some(Basis::Z), None),
            memory_plaquettes(None, None).repeat(LinearFunction::new(2, -1)),
            memory_plaquettes(None, Some(Basis::Z)),
        ],
    )
}

/// Execute the layout command.
pub fn execute(config: &CompileConfig, k: Option<u32>, blocks: u32) -> Result<()> {
    if blocks == 0 {
        anyhow::bail!("At least one block is needed");
    }
    let k = k.unwrap_or(config.k);

    let placed: BTreeMap<BlockPosition2D, CompiledBlock> = (0..blocks)
        .map(|x| -> Result<_> {
            let x = i32::try_from(x)?;
            Ok((BlockPosition2D::new(x, 0), memory_block()))
        })
        .collect::<Result<_>>()?;

    println!(
        "{} Merging {} memory blocks at k = {}",
        style("→").cyan().bold(),
        blocks,
        k
    );
    let layout = BlockLayout::new(&placed)?;
    let (rows, cols) = layout.template().scalable_shape().to_shape(k);
    println!(
        "  Template: {}x{} cells, {} plaquette indices",
        rows,
        cols,
        layout.template().expected_plaquettes_number()
    );

    let circuits = layout.get_shifted_circuits(k)?;
    println!();
    println!("  Layer  Repetitions  Moments  Qubits  Measurements");
    for (i, (circuit, layer)) in circuits.iter().zip(layout.layers()).enumerate() {
        let repetitions = layer
            .repetitions()
            .map_or_else(|| "-".to_string(), |r| r.call(k).to_string());
        println!(
            "  {:>5}  {:>11}  {:>7}  {:>6}  {:>12}",
            i,
            repetitions,
            circuit.num_moments(),
            circuit.qubits().len(),
            circuit.num_measurements()
        );
    }

    if let Some(path) = &config.database_path {
        let database = load_database(path)?;
        let instantiation = layout.template().instantiate(k, None)?;
        let slices = vec![instantiation; layout.num_layers()];
        let subtemplates =
            get_spatially_distinct_3d_subtemplates(&slices, config.manhattan_radius)?;
        let lookup = lookup_detectors(
            &database,
            &subtemplates,
            layout.layers(),
            layout.template().get_increments(),
        )?;

        println!();
        if lookup.is_complete() {
            println!(
                "{} {} detectors found in {}",
                style("✓").green().bold(),
                lookup.detectors.len(),
                path.display()
            );
        } else {
            println!(
                "{} {} detectors found, {} of {} situations missing from {}",
                style("!").yellow().bold(),
                lookup.detectors.len(),
                lookup.missing.len(),
                subtemplates.len(),
                path.display()
            );
        }
    }

    Ok(())
}
