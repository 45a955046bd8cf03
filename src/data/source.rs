use crate::data::schema::{YearBlock, safe_parse_dataset};
use crate::foundation::error::{BarRaceError, BarRaceResult};
use anyhow::Context as _;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Parse a population document from JSON text.
///
/// Text that is not JSON at all is an error. A JSON document that violates the schema yields an
/// empty list instead (see [`safe_parse_dataset`]).
pub fn load_from_str(s: &str) -> BarRaceResult<Vec<YearBlock>> {
    let v: serde_json::Value = serde_json::from_str(s)
        .map_err(|e| BarRaceError::serde(format!("parse population JSON: {e}")))?;
    Ok(safe_parse_dataset(&v))
}

/// Parse a population document from a JSON reader.
pub fn load_from_reader<R: std::io::Read>(r: R) -> BarRaceResult<Vec<YearBlock>> {
    let v: serde_json::Value = serde_json::from_reader(r)
        .map_err(|e| BarRaceError::serde(format!("parse population JSON: {e}")))?;
    Ok(safe_parse_dataset(&v))
}

/// Parse a population document from a JSON file on disk.
///
/// A file that cannot be opened surfaces as [`BarRaceError::Other`] carrying the I/O error.
pub fn load_from_path(path: impl AsRef<Path>) -> BarRaceResult<Vec<YearBlock>> {
    let path = path.as_ref();
    let f = File::open(path)
        .with_context(|| format!("open population JSON '{}'", path.display()))?;
    load_from_reader(BufReader::new(f))
}

#[cfg(test)]
#[path = "../../tests/unit/data/source.rs"]
mod tests;
