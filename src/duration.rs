//! Composite duration strings ("1d 2h 3m 4s") to seconds.
//!
//! Slicers print durations as a run of `<integer><unit>` components with the
//! units `d`, `h`, `m` and `s`. Each unit is looked up independently, so any
//! subset in any order is accepted; the canonical output is ordered
//! days → hours → minutes → seconds.

use regex::Regex;

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Parse `text` into a total number of seconds.
///
/// Never fails: missing components contribute zero, so a string with no
/// recognizable component yields `0`. Callers decide whether a duration is
/// present at all before calling this.
///
/// ```
/// assert_eq!(slicemeta::parse_duration("1h 23m 45s"), 5025);
/// assert_eq!(slicemeta::parse_duration("1d 2h"), 93_600);
/// assert_eq!(slicemeta::parse_duration(""), 0);
/// ```
pub fn parse_duration(text: &str) -> u64 {
    let days = component(regex!(r"(\d+)\s*d"), text);
    let hours = component(regex!(r"(\d+)\s*h"), text);
    let minutes = component(regex!(r"(\d+)\s*m"), text);
    let seconds = component(regex!(r"(\d+)\s*s"), text);

    days.saturating_mul(SECONDS_PER_DAY)
        .saturating_add(hours.saturating_mul(SECONDS_PER_HOUR))
        .saturating_add(minutes.saturating_mul(SECONDS_PER_MINUTE))
        .saturating_add(seconds)
}

/// Value of the first occurrence of one unit; `0` when absent or unparsable.
fn component(re: &Regex, text: &str) -> u64 {
    capture!(re, text).and_then(|digits| digits.parse::<u64>().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_examples() {
        let cases: Vec<(u64, &str)> = vec![
            (45, "45s"),
            (7_200, "2h"),
            (93_600, "1d 2h"),
            (5_025, "1h 23m 45s"),
            (2_700, "45m 0s"),
            (2_700, "45m"),
            (90_061, "1d 1h 1m 1s"),
            (3_660, "1m 1h"),
            (0, ""),
            (0, "soon"),
        ];

        for (expected, input) in cases {
            assert_eq!(parse_duration(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn tolerates_surrounding_noise() {
        assert_eq!(parse_duration("  1h 2m 3s\r"), 3_723);
        assert_eq!(parse_duration("2d 0h 0m 10s"), 172_810);
    }

    #[test]
    fn oversized_components_do_not_panic() {
        assert_eq!(parse_duration("99999999999999999999999h"), 0);
        assert_eq!(parse_duration("18446744073709551615d"), u64::MAX);
    }
}
