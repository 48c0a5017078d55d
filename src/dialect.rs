//! Slicer comment dialects.
//!
//! Each dialect is one convention for embedding print metadata as G-code
//! comments. All of them work the same way: scan a sample for the dialect's
//! marker lines, parse the values, and report a match only when the mandatory
//! print-time marker parsed.
//!
//! ```text
//! sample ── MarkerMask::scan ──┐
//!                              v
//!         for dialect in Dialect::PRECEDENCE
//!             skip if required marker key absent
//!             dialect.try_match(sample) ── Some(DialectMatch) ──> first wins
//! ```
//!
//! ## Dialects
//!
//! - [`Dialect::Header`] (`"A"`, Cura family): `;TIME:<seconds>` near the top,
//!   `;Filament used: <metres>m`, optional `;Filament weight: <grams>g`.
//! - [`Dialect::Footer`] (`"B"`, PrusaSlicer family incl. SuperSlicer,
//!   OrcaSlicer, Bambu Studio): `; estimated printing time = 1h 2m 3s`,
//!   `; filament used [mm] = <mm>`, `; filament used [g] = <grams>`.
//!
//! ## Adding a dialect
//!
//! Add a variant, a submodule with a `try_match(&str) -> Option<DialectMatch>`,
//! a `MarkerMask` bit for its mandatory key, and a slot in `PRECEDENCE`.

#[path = "dialect/footer.rs"]
mod footer;
#[path = "dialect/header.rs"]
mod header;

use crate::trigger::MarkerMask;
use serde::Serialize;

/// A supported metadata convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Header-style markers (Cura).
    Header,
    /// Footer-style markers (PrusaSlicer and derivatives).
    Footer,
}

/// Metadata a single dialect recovered from a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialectMatch {
    pub print_time_seconds: u64,
    pub filament_length_m: Option<f64>,
    pub filament_weight_g: Option<f64>,
}

impl Dialect {
    /// Order in which dialects are tried. When a sample satisfies more than
    /// one, the earlier dialect's reading is kept.
    pub const PRECEDENCE: [Dialect; 2] = [Dialect::Header, Dialect::Footer];

    /// Short stable identifier reported in results.
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Header => "A",
            Dialect::Footer => "B",
        }
    }

    /// Human label for the slicer family that writes this dialect.
    pub fn family(self) -> &'static str {
        match self {
            Dialect::Header => "Cura",
            Dialect::Footer => "PrusaSlicer",
        }
    }

    /// Marker key that must occur in a sample for this dialect to match.
    pub fn required_marker(self) -> MarkerMask {
        match self {
            Dialect::Header => MarkerMask::HEADER_TIME,
            Dialect::Footer => MarkerMask::FOOTER_TIME,
        }
    }

    /// Scan `sample` for this dialect's markers.
    ///
    /// Returns `None` unless the print-time marker is present and parses.
    /// Length and weight are parsed independently; a malformed one is left
    /// empty without affecting the others.
    pub fn try_match(self, sample: &str) -> Option<DialectMatch> {
        match self {
            Dialect::Header => header::try_match(sample),
            Dialect::Footer => footer::try_match(sample),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.family())
    }
}

/// Sum a comma separated list of decimals, each optionally followed by `unit`.
///
/// Multi-extruder prints report one value per extruder. Returns `None` if
/// any element fails to parse or the total is not finite.
pub(crate) fn sum_decimals(list: &str, unit: &str) -> Option<f64> {
    let mut total = 0.0;
    for item in list.split(',') {
        let item = item.trim();
        let number = item.strip_suffix(unit).unwrap_or(item).trim_end();
        let value = number.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)?;
        total += value;
    }
    Some(total).filter(|t: &f64| t.is_finite())
}
