//! Footer-style markers, as written by PrusaSlicer and its derivatives.
//!
//! ```text
//! ; filament used [mm] = 1234.56
//! ; filament used [cm3] = 1.23
//! ; filament used [g] = 12.34
//! ; estimated printing time (normal mode) = 1h 23m 45s
//! ```
//!
//! Older releases omit the `(normal mode)` qualifier. The silent-mode line is
//! ignored.

use super::{DialectMatch, sum_decimals};
use crate::duration::parse_duration;
use regex::Regex;
use tracing::debug;

pub(super) fn try_match(sample: &str) -> Option<DialectMatch> {
    let time = capture!(
        regex!(r"(?m)^[ \t]*;[ \t]*estimated printing time(?:[ \t]*\(normal mode\))?[ \t]*=[ \t]*([^\r\n]*)"),
        sample
    )?
    .trim();
    // An empty or unrecognized value still counts as a match, at zero seconds.
    let print_time_seconds = parse_duration(time);

    let filament_length_m = decimal_marker(
        regex!(r"(?m)^[ \t]*;[ \t]*filament used \[mm\][ \t]*=[ \t]*([\d.]+(?:[ \t]*,[ \t]*[\d.]+)*)"),
        sample,
    )
    .map(|mm| mm / 1000.0);

    let filament_weight_g = decimal_marker(
        regex!(r"(?m)^[ \t]*;[ \t]*filament used \[g\][ \t]*=[ \t]*([\d.]+(?:[ \t]*,[ \t]*[\d.]+)*)"),
        sample,
    );

    Some(DialectMatch { print_time_seconds, filament_length_m, filament_weight_g })
}

fn decimal_marker(re: &Regex, sample: &str) -> Option<f64> {
    let list = capture!(re, sample)?;
    let parsed = sum_decimals(list, "");
    if parsed.is_none() {
        debug!(value = list, pattern = re.as_str(), "malformed footer value");
    }
    parsed
}
