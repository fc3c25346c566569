use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::config::model::Settings;
use crate::error::{ConfigError, Result};

/// Loads settings from a YAML file, or returns defaults when the file does
/// not exist. A file that exists but does not parse is an error.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let mut contents = String::new();
    File::open(path)?.read_to_string(&mut contents)?;
    let settings: Settings =
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
    Ok(settings)
}
