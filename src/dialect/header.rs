//! Header-style markers, as written by Cura.
//!
//! ```text
//! ;FLAVOR:Marlin
//! ;TIME:3665
//! ;Filament used: 1.23m
//! ;Filament weight: 3.45g
//! ```

use super::{DialectMatch, sum_decimals};
use regex::Regex;
use tracing::debug;

pub(super) fn try_match(sample: &str) -> Option<DialectMatch> {
    let time = capture!(regex!(r"(?m)^[ \t]*;TIME:(\d+)"), sample)?;
    let Ok(print_time_seconds) = time.parse::<u64>() else {
        debug!(value = time, "header time marker out of range");
        return None;
    };

    let filament_length_m =
        unit_marker(regex!(r"(?m)^[ \t]*;Filament used:[ \t]*([\d.]+m(?:[ \t]*,[ \t]*[\d.]+m)*)"), sample, "m");
    let filament_weight_g =
        unit_marker(regex!(r"(?m)^[ \t]*;Filament weight:[ \t]*([\d.]+g(?:[ \t]*,[ \t]*[\d.]+g)*)"), sample, "g");

    Some(DialectMatch { print_time_seconds, filament_length_m, filament_weight_g })
}

// Values carry their unit as a suffix: `1.23m`, `1.2m, 0.3m`.
fn unit_marker(re: &Regex, sample: &str, unit: &str) -> Option<f64> {
    let list = capture!(re, sample)?;
    let parsed = sum_decimals(list, unit);
    if parsed.is_none() {
        debug!(value = list, unit, "malformed header value");
    }
    parsed
}
