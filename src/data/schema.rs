use crate::foundation::core::Year;
use serde_json::Value;
use std::fmt;

/// One validated `{Country, Population}` entry, name already trimmed.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RawCountry {
    /// Trimmed, non-empty country name.
    #[serde(rename = "Country")]
    pub country: String,
    /// Finite, non-negative population.
    #[serde(rename = "Population")]
    pub population: f64,
}

/// One validated `{Year, Countries}` block.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct YearBlock {
    /// Integer year.
    #[serde(rename = "Year")]
    pub year: Year,
    /// Entries in source order (may contain duplicate names).
    #[serde(rename = "Countries")]
    pub countries: Vec<RawCountry>,
}

/// One step of a JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaPathElem {
    /// Object field.
    Field(&'static str),
    /// Array index.
    Index(usize),
}

/// A single schema violation located by its JSON path.
#[derive(Debug, Clone)]
pub struct SchemaError {
    /// Location of the offending value, outermost first.
    pub path: Vec<SchemaPathElem>,
    /// Human-readable description.
    pub message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

/// All schema violations found in one document.
#[derive(Debug, Clone)]
pub struct SchemaErrors {
    /// Violations in document order.
    pub errors: Vec<SchemaError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

/// Validate and coerce an untyped document into year blocks.
///
/// Every violation is collected; the document is accepted only when there are none.
pub fn validate_dataset(input: &Value) -> Result<Vec<YearBlock>, SchemaErrors> {
    let mut errors = Vec::new();
    let mut out = Vec::new();

    let Some(blocks) = input.as_array() else {
        errors.push(SchemaError::at(&[], "expected an array of year blocks"));
        return Err(SchemaErrors { errors });
    };

    let mut path = Vec::with_capacity(4);
    for (i, block) in blocks.iter().enumerate() {
        path.push(SchemaPathElem::Index(i));
        if let Some(b) = validate_block(block, &mut path, &mut errors) {
            out.push(b);
        }
        path.pop();
    }

    if errors.is_empty() {
        Ok(out)
    } else {
        Err(SchemaErrors { errors })
    }
}

/// Fail-closed validation: any violation yields an empty dataset.
///
/// Violations are reported through `tracing` and never returned to the caller.
pub fn safe_parse_dataset(input: &Value) -> Vec<YearBlock> {
    match validate_dataset(input) {
        Ok(blocks) => blocks,
        Err(e) => {
            tracing::warn!(
                errors = e.errors.len(),
                "population dataset failed schema validation, using empty dataset:\n{e}"
            );
            Vec::new()
        }
    }
}

fn validate_block(
    v: &Value,
    path: &mut Vec<SchemaPathElem>,
    errors: &mut Vec<SchemaError>,
) -> Option<YearBlock> {
    let Some(obj) = v.as_object() else {
        errors.push(SchemaError::at(path, "year block must be an object"));
        return None;
    };

    path.push(SchemaPathElem::Field("Year"));
    let year = match obj.get("Year") {
        Some(y) => {
            let year = as_integer(y);
            if year.is_none() {
                errors.push(SchemaError::at(path, "Year must be an integer"));
            }
            year
        }
        None => {
            errors.push(SchemaError::at(path, "Year is required"));
            None
        }
    };
    path.pop();

    path.push(SchemaPathElem::Field("Countries"));
    let countries = match obj.get("Countries").map(Value::as_array) {
        Some(Some(items)) => {
            let mut rows = Vec::with_capacity(items.len());
            for (j, item) in items.iter().enumerate() {
                path.push(SchemaPathElem::Index(j));
                if let Some(row) = validate_country(item, path, errors) {
                    rows.push(row);
                }
                path.pop();
            }
            Some(rows)
        }
        Some(None) => {
            errors.push(SchemaError::at(path, "Countries must be an array"));
            None
        }
        None => {
            errors.push(SchemaError::at(path, "Countries is required"));
            None
        }
    };
    path.pop();

    Some(YearBlock {
        year: year?,
        countries: countries?,
    })
}

fn validate_country(
    v: &Value,
    path: &mut Vec<SchemaPathElem>,
    errors: &mut Vec<SchemaError>,
) -> Option<RawCountry> {
    let Some(obj) = v.as_object() else {
        errors.push(SchemaError::at(path, "country entry must be an object"));
        return None;
    };

    path.push(SchemaPathElem::Field("Country"));
    let country = match obj.get("Country").map(Value::as_str) {
        Some(Some(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                errors.push(SchemaError::at(path, "Country must be non-empty"));
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        Some(None) => {
            errors.push(SchemaError::at(path, "Country must be a string"));
            None
        }
        None => {
            errors.push(SchemaError::at(path, "Country is required"));
            None
        }
    };
    path.pop();

    path.push(SchemaPathElem::Field("Population"));
    let population = match obj.get("Population").map(Value::as_f64) {
        Some(Some(p)) if p.is_finite() && p >= 0.0 => Some(p),
        Some(Some(_)) => {
            errors.push(SchemaError::at(
                path,
                "Population must be a finite number >= 0",
            ));
            None
        }
        Some(None) => {
            errors.push(SchemaError::at(path, "Population must be a number"));
            None
        }
        None => {
            errors.push(SchemaError::at(path, "Population is required"));
            None
        }
    };
    path.pop();

    Some(RawCountry {
        country: country?,
        population: population?,
    })
}

fn as_integer(v: &Value) -> Option<Year> {
    if let Some(i) = v.as_i64() {
        return Some(i);
    }
    // JSON writers sometimes emit `2000.0` for integral years.
    let f = v.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 {
        Some(f as Year)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/schema.rs"]
mod tests;
