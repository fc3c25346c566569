use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{InventoryError, Result};

/// One staging instruction: search pattern (media tree), file mask, and the
/// subdirectory of the unpack root the matches land in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub pattern: Option<String>,
    pub mask: String,
    pub target_dir: PathBuf,
}

/// Reads the `;`-delimited inventory into memory, in file order. A missing
/// file and a malformed row are both fatal; a half-applied inventory leaves
/// the staging tree in an unknown state.
pub fn read_inventory(path: &Path) -> Result<Vec<InventoryEntry>> {
    if !path.exists() {
        return Err(InventoryError::Missing(path.to_path_buf()).into());
    }
    let contents = fs::read_to_string(path)?;
    let mut entries = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(';').map(str::trim).collect();
        if fields.len() != 3 {
            return Err(InventoryError::Malformed {
                line: idx + 1,
                fields: fields.len(),
            }
            .into());
        }
        let pattern = if fields[0].is_empty() {
            None
        } else {
            Some(fields[0].to_string())
        };
        entries.push(InventoryEntry {
            pattern,
            mask: fields[1].to_string(),
            target_dir: PathBuf::from(fields[2]),
        });
    }
    Ok(entries)
}
