//! Reading the world configuration from a file.

use anyhow::{bail, Context, Result};
use lifewatch_lib::Config;
use log::debug;
use std::{fs, path::Path};

/// Formats of settings files, chosen by the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("toml") => Ok(Format::Toml),
            _ => bail!(
                "Unknown settings format for {}; expected .json, .yaml or .toml",
                path.display()
            ),
        }
    }
}

/// Parses a configuration in the given format. Missing fields take default values.
fn parse(text: &str, format: Format) -> Result<Config> {
    let config = match format {
        Format::Json => serde_json::from_str(text)?,
        Format::Yaml => serde_yaml::from_str(text)?,
        Format::Toml => toml::from_str(text)?,
    };
    Ok(config)
}

/// Reads and validates a configuration file.
pub(crate) fn load(path: &Path) -> Result<Config> {
    let format = Format::of(path)?;
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    let config = parse(&text, format)
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    debug!("Loaded {:?} from {}", config, path.display());
    Ok(config)
}
