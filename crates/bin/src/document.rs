//! Loading JSON documents for the query commands.

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use atomtree::{Node, Value};

/// Read a JSON object from `file`, or from stdin when no file is given
pub fn load(file: Option<&PathBuf>) -> Result<Node, Box<dyn std::error::Error>> {
    let contents = match file {
        Some(path) => read_file(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(Node::from_json_str(&contents)?)
}

fn read_file(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    tracing::debug!("Reading document from {}", path.display());
    std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()).into())
}

/// Parse a command line value as JSON, falling back to plain text.
///
/// Arrays and other shapes that have no [`Value`] counterpart are rejected
/// rather than stored as text.
pub fn parse_value(raw: &str) -> Result<Value, Box<dyn std::error::Error>> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => serde_json::from_value::<Value>(json)
            .map_err(|e| format!("Unsupported value {raw}: {e}").into()),
        Err(_) => Ok(Value::from(raw)),
    }
}
