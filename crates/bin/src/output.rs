//! Output formatting helpers for human-readable and JSON output.

use atomtree::Node;
use clap::ValueEnum;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Render a tree for printing.
///
/// Human output uses the node's sorted display form; JSON output is the
/// compact JSON document.
pub fn render_node(
    tree: &Node,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Human => Ok(tree.to_string()),
        OutputFormat::Json => Ok(tree.to_json_string()?),
    }
}

/// Print labelled rows with the labels padded to a common width.
pub fn print_labelled(rows: &[(&str, String)]) {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in rows {
        println!("{:<width$}  {}", format!("{label}:"), value, width = width + 1);
    }
}
