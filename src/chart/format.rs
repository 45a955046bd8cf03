use crate::foundation::core::{CountryRow, Year};

const COMPACT_UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

/// en-US compact notation with at most two fraction digits: `1.41B`, `331.9M`, `950`.
pub fn format_compact(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let sign = if v < 0.0 { "-" } else { "" };
    let abs = v.abs();
    for (unit, suffix) in COMPACT_UNITS {
        // Promote when rounding would otherwise print e.g. `1000K`.
        if abs >= unit * 0.999_995 {
            return format!("{sign}{}{suffix}", trim_fraction(round2(abs / unit)));
        }
    }
    format!("{sign}{}", trim_fraction(round2(abs)))
}

/// Integer with thousands separators: `1,412,000`.
pub fn format_grouped(v: f64) -> String {
    let n = v.round();
    let digits = format!("{:.0}", n.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0.0 {
        out.push('-');
    }
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Screen-reader announcement for a newly selected year.
pub fn announcement(year: Year, leader: Option<&CountryRow>) -> String {
    match leader {
        Some(r) => format!("Year changed to {year}. Top: {} {}.", r.name, r.pop),
        None => format!("Year changed to {year}. Top: none 0."),
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn trim_fraction(x: f64) -> String {
    let s = format!("{x:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_owned()
}

#[cfg(test)]
#[path = "../../tests/unit/chart/format.rs"]
mod tests;
