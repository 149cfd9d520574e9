//! Command implementations for the SAP replay CLI.

pub mod convert;
pub mod decode;

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::cli::InputArgs;
use crate::error::{ConvertError, Result};
use crate::maps::CalculatorMaps;

#[cfg(test)]
mod tests;

/// Resolve the export text: inline argument, then file, then stdin.
pub fn read_export(input: &InputArgs) -> Result<String> {
    if let Some(export) = &input.export {
        return Ok(export.clone());
    }
    if let Some(path) = &input.input_file {
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    if text.trim().is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    Ok(text)
}

/// Load the dictionary from the given path, or fall back to the bundled one.
pub fn load_maps(path: Option<&PathBuf>) -> Result<CalculatorMaps> {
    match path {
        Some(path) => {
            log::debug!("loading dictionary from {}", path.display());
            CalculatorMaps::from_path(path)
        }
        None => CalculatorMaps::bundled(),
    }
}

/// Serialize a value and write it to the output path or stdout.
pub fn emit_json<T: serde::Serialize>(
    value: &T,
    output: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    match output {
        Some(path) => std::fs::write(path, text + "\n")?,
        None => println!("{text}"),
    }
    Ok(())
}
