//! Path query commands over JSON documents.

use atomtree::{Node, Path, Value};

use crate::cli::{AssocInArgs, GetInArgs};
use crate::document;
use crate::output::{OutputFormat, render_node};

/// Run the get-in command
pub fn get_in(args: &GetInArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let tree = document::load(args.file.as_ref())?;
    println!("{}", render_lookup(&tree, &Path::parse(&args.path), format)?);
    Ok(())
}

/// Run the assoc-in command
pub fn assoc_in(
    args: &AssocInArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let tree = document::load(args.file.as_ref())?;
    let value = document::parse_value(&args.value)?;
    let path = Path::parse(&args.path);
    if path.is_empty() {
        tracing::warn!("Empty path, document left unchanged");
    }

    let updated = tree.assoc_in(&path, value);
    println!("{}", render_node(&updated, format)?);
    Ok(())
}

/// Render the value at `path`, or `absent` when there is none
fn render_lookup(
    tree: &Node,
    path: &Path,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let found = tree.get_in(path);
    match format {
        OutputFormat::Human => Ok(found.map_or_else(|| "absent".to_string(), Value::to_string)),
        OutputFormat::Json => {
            let value = serde_json::json!({
                "path": path.to_string(),
                "found": found.is_some(),
                "value": found,
            });
            Ok(serde_json::to_string(&value)?)
        }
    }
}
