//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - lattice compilation for surface-code computations",
        style("Stratum").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  stratum-ir       Grid qubits, measurements and circuits");
    println!("  stratum-lattice  Templates, plaquettes and subtemplates");
    println!("  stratum-compile  Detector database and block layouts");
    println!("  stratum-cli      Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style(env!("CARGO_PKG_REPOSITORY")).underlined()
    );
    println!("License:    {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
