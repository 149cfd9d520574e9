//! Decode command implementation.

use crate::cli::InputArgs;
use crate::Result;
use crate::{decode, keys};

use super::{emit_json, read_export};

/// Handle the decode command: decode + expand, no battle synthesis.
pub fn handle_decode(input: InputArgs, pretty: bool) -> Result<()> {
    let export = read_export(&input)?;
    let expanded = keys::expand(&decode::parse_export(&export)?);
    emit_json(&expanded, None, pretty)
}
