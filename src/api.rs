use crate::dialect::{Dialect, DialectMatch};
use crate::sampler::{SampleError, SampleLimits, TextSample, sample};
use crate::trigger::MarkerMask;
use crate::weight::{Material, estimate_weight};
use chrono::TimeDelta;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Options that affect sampling and the weight fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Options {
    /// How much of each file is read.
    pub limits: SampleLimits,
    /// Filament assumed when a dialect reports length but no weight.
    pub material: Material,
}

/// Print metadata recovered from one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    pub print_time_seconds: u64,
    pub filament_length_m: Option<f64>,
    pub filament_weight_g: Option<f64>,
    /// Identifier of the matching dialect (`"A"`, `"B"`).
    pub dialect_name: String,
    pub dialect: Dialect,
    /// True when `filament_weight_g` was derived from length and the
    /// configured [`Material`] rather than reported by the slicer.
    pub weight_estimated: bool,
}

impl ExtractionResult {
    fn from_match(dialect: Dialect, found: DialectMatch, material: &Material) -> Self {
        let (filament_weight_g, weight_estimated) = match (found.filament_weight_g, found.filament_length_m) {
            (Some(weight), _) => (Some(weight), false),
            (None, Some(length)) => {
                let estimate = Some(estimate_weight(length, material)).filter(|g| g.is_finite());
                (estimate, estimate.is_some())
            }
            (None, None) => (None, false),
        };

        Self {
            print_time_seconds: found.print_time_seconds,
            filament_length_m: found.filament_length_m,
            filament_weight_g,
            dialect_name: dialect.name().to_string(),
            dialect,
            weight_estimated,
        }
    }

    /// Print time as a [`TimeDelta`], `None` if it does not fit.
    pub fn print_duration(&self) -> Option<TimeDelta> {
        i64::try_from(self.print_time_seconds).ok().and_then(TimeDelta::try_seconds)
    }
}

/// What happened to one dialect during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The pre-scan found no trace of the dialect's time marker.
    Skipped,
    /// Markers were scanned but the mandatory time marker did not parse.
    NoMatch,
    Matched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectAttempt {
    pub dialect: Dialect,
    pub outcome: AttemptOutcome,
}

/// Extra information returned by [`extract_verbose_with`].
#[derive(Debug, Clone, Default)]
pub struct ExtractionDetails {
    /// Total elapsed time.
    pub total: Duration,
    /// Time spent reading the file.
    pub sampling: Duration,
    /// Time spent scanning markers and running dialects.
    pub matching: Duration,
    /// Size of the source file.
    pub total_bytes: u64,
    pub head_lines: usize,
    pub head_bytes: usize,
    pub tail_bytes: usize,
    /// Marker keys seen by the pre-scan.
    pub markers: Option<MarkerMask>,
    /// Dialects in the order they were considered, up to the first match.
    pub attempts: Vec<DialectAttempt>,
    /// Sampling failure, if any.
    pub error: Option<String>,
}

/// Result from [`extract_verbose_with`].
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    pub path: PathBuf,
    pub result: Option<ExtractionResult>,
    pub details: ExtractionDetails,
}

/// Extract metadata from the file at `path` with default [`Options`].
///
/// Returns `None` when the file cannot be read or carries no recognized
/// dialect; neither is treated as an error.
///
/// ```no_run
/// if let Some(meta) = slicemeta::extract("benchy.gcode") {
///     println!("{}s via dialect {}", meta.print_time_seconds, meta.dialect_name);
/// }
/// ```
pub fn extract(path: impl AsRef<Path>) -> Option<ExtractionResult> {
    extract_with(path, &Options::default())
}

/// Extract metadata from the file at `path` using `options`.
pub fn extract_with(path: impl AsRef<Path>, options: &Options) -> Option<ExtractionResult> {
    let path = path.as_ref();
    let sample = sample_or_log(path, options)?;
    let result = extract_text(sample.text(), options);
    if result.is_none() {
        debug!(path = %path.display(), "no recognized dialect");
    }
    result
}

/// Run the dialect chain and weight fallback over an in-memory sample.
pub fn extract_text(text: &str, options: &Options) -> Option<ExtractionResult> {
    let (found, _, _) = match_dialects(text);
    found.map(|(dialect, m)| ExtractionResult::from_match(dialect, m, &options.material))
}

/// Like [`extract_with`], but also reports sampling and matching details.
///
/// Intended for inspection and debugging; [`extract_with`] skips the extra
/// bookkeeping.
pub fn extract_verbose_with(path: impl AsRef<Path>, options: &Options) -> ExtractionReport {
    let path = path.as_ref();
    let start = Instant::now();
    let mut details = ExtractionDetails::default();

    let sampled = sample(path, &options.limits);
    details.sampling = start.elapsed();

    let sample = match sampled {
        Ok(sample) => sample,
        Err(err) => {
            log_sample_error(&err);
            details.error = Some(err.to_string());
            details.total = start.elapsed();
            return ExtractionReport { path: path.to_path_buf(), result: None, details };
        }
    };

    details.total_bytes = sample.total_bytes();
    details.head_lines = sample.head_lines();
    details.head_bytes = sample.head().len();
    details.tail_bytes = sample.tail().len();

    let matching_start = Instant::now();
    let (found, markers, attempts) = match_dialects(sample.text());
    details.matching = matching_start.elapsed();
    details.markers = Some(markers);
    details.attempts = attempts;

    let result = found.map(|(dialect, m)| ExtractionResult::from_match(dialect, m, &options.material));
    details.total = start.elapsed();

    ExtractionReport { path: path.to_path_buf(), result, details }
}

/// Try each dialect in precedence order; the first match wins.
fn match_dialects(text: &str) -> (Option<(Dialect, DialectMatch)>, MarkerMask, Vec<DialectAttempt>) {
    let markers = MarkerMask::scan(text);
    let mut attempts = Vec::with_capacity(Dialect::PRECEDENCE.len());

    for dialect in Dialect::PRECEDENCE {
        if !markers.contains(dialect.required_marker()) {
            attempts.push(DialectAttempt { dialect, outcome: AttemptOutcome::Skipped });
            continue;
        }

        match dialect.try_match(text) {
            Some(found) => {
                debug!(dialect = dialect.name(), seconds = found.print_time_seconds, "dialect matched");
                attempts.push(DialectAttempt { dialect, outcome: AttemptOutcome::Matched });
                return (Some((dialect, found)), markers, attempts);
            }
            None => attempts.push(DialectAttempt { dialect, outcome: AttemptOutcome::NoMatch }),
        }
    }

    (None, markers, attempts)
}

fn sample_or_log(path: &Path, options: &Options) -> Option<TextSample> {
    sample(path, &options.limits).map_err(|err| log_sample_error(&err)).ok()
}

fn log_sample_error(err: &SampleError) {
    match err {
        SampleError::NotFound { .. } => debug!("{err}"),
        SampleError::Io { .. } => warn!("{err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn gcode_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".gcode").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn header_dialect_estimates_weight() {
        let file = gcode_file(";FLAVOR:Marlin\n;TIME:3665\n;Filament used: 1.23m\n;Layer height: 0.2\n");
        let meta = extract(file.path()).unwrap();

        assert_eq!(meta.print_time_seconds, 3665);
        assert_eq!(meta.filament_length_m, Some(1.23));
        assert_eq!(meta.dialect_name, "A");
        assert_eq!(meta.dialect, Dialect::Header);
        assert!(meta.weight_estimated);
        assert!((meta.filament_weight_g.unwrap() - 3.66).abs() < 0.1);
    }

    #[test]
    fn footer_dialect_keeps_reported_weight() {
        let file = gcode_file(
            "G1 X10 Y10 E1\n; estimated printing time = 1h 23m 45s\n; filament used [mm] = 1234.56\n\
             ; filament used [cm3] = 1.23\n; filament used [g] = 12.34\n; total filament cost = 0.25\n",
        );
        let meta = extract(file.path()).unwrap();

        assert_eq!(meta.print_time_seconds, 5025);
        assert!((meta.filament_length_m.unwrap() - 1.23456).abs() < 1e-4);
        assert_eq!(meta.filament_weight_g, Some(12.34));
        assert_eq!(meta.dialect_name, "B");
        assert!(!meta.weight_estimated);
    }

    #[test]
    fn footer_dialect_estimates_missing_weight() {
        let file = gcode_file("G1 X10 Y10 E1\n; estimated printing time = 45m 0s\n; filament used [mm] = 1000.00\n");
        let meta = extract(file.path()).unwrap();

        assert_eq!(meta.print_time_seconds, 2700);
        assert_eq!(meta.filament_length_m, Some(1.0));
        assert!((meta.filament_weight_g.unwrap() - 2.98).abs() < 0.1);
        assert!(meta.weight_estimated);
    }

    #[test]
    fn empty_footer_time_counts_as_zero() {
        let file = gcode_file("; estimated printing time = \n; filament used [mm] = 1000\n");
        let meta = extract(file.path()).unwrap();

        assert_eq!(meta.print_time_seconds, 0);
        assert_eq!(meta.dialect_name, "B");
        assert_eq!(meta.filament_length_m, Some(1.0));
    }

    #[test]
    fn unrecognized_file_is_absent() {
        let file = gcode_file("G28\nG1 X10 Y10 E1\n; generated by hand\n");
        assert_eq!(extract(file.path()), None);
    }

    #[test]
    fn missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(extract(dir.path().join("missing.gcode")), None);
    }

    #[test]
    fn time_only_match_has_no_weight() {
        let meta = extract_text(";TIME:120\n", &Options::default()).unwrap();
        assert_eq!(meta.filament_length_m, None);
        assert_eq!(meta.filament_weight_g, None);
        assert!(!meta.weight_estimated);
    }

    #[test]
    fn custom_material_drives_estimate() {
        let options = Options { material: Material::new(2.85, 1.24), ..Options::default() };
        let pla = extract_text(";TIME:1\n;Filament used: 1m\n", &Options::default()).unwrap();
        let thick = extract_text(";TIME:1\n;Filament used: 1m\n", &options).unwrap();

        assert!(thick.filament_weight_g.unwrap() > pla.filament_weight_g.unwrap());
    }

    #[test]
    fn footer_metadata_beyond_head_is_found_in_tail() {
        let mut content = String::new();
        for i in 0..20_000 {
            content.push_str(&format!("G1 X{} Y{} E0.01\n", i % 200, i % 180));
        }
        content.push_str("; filament used [mm] = 5000.0\n; estimated printing time = 2h 0m 0s\n");
        let file = gcode_file(&content);

        let meta = extract(file.path()).unwrap();
        assert_eq!(meta.print_time_seconds, 7200);
        assert_eq!(meta.filament_length_m, Some(5.0));
    }

    #[test]
    fn metadata_outside_window_is_missed() {
        let mut content = String::from(";HEADER\n");
        for _ in 0..2_000 {
            content.push_str("G1 X1 Y1 E0.01\n");
        }
        content.push_str("; estimated printing time = 1h\n");
        for _ in 0..2_000 {
            content.push_str("G1 X2 Y2 E0.01\n");
        }
        let file = gcode_file(&content);

        assert_eq!(extract(file.path()), None);
    }

    #[test]
    fn verbose_reports_attempts() {
        let file = gcode_file("; estimated printing time = 10m\n");
        let report = extract_verbose_with(file.path(), &Options::default());

        assert_eq!(report.result.as_ref().map(|r| r.print_time_seconds), Some(600));
        assert_eq!(
            report.details.attempts,
            vec![
                DialectAttempt { dialect: Dialect::Header, outcome: AttemptOutcome::Skipped },
                DialectAttempt { dialect: Dialect::Footer, outcome: AttemptOutcome::Matched },
            ]
        );
        assert!(report.details.markers.unwrap().contains(MarkerMask::FOOTER_TIME));
        assert!(report.details.error.is_none());
        assert!(report.details.matching <= report.details.total);
    }

    #[test]
    fn verbose_reports_sampling_error() {
        let dir = tempfile::tempdir().unwrap();
        let report = extract_verbose_with(dir.path().join("missing.gcode"), &Options::default());

        assert!(report.result.is_none());
        assert!(report.details.error.unwrap().contains("file not found"));
        assert!(report.details.attempts.is_empty());
    }

    #[test]
    fn malformed_header_time_falls_through_to_footer() {
        let meta = extract_text(";TIME:\n; estimated printing time = 5m\n", &Options::default()).unwrap();
        assert_eq!(meta.dialect, Dialect::Footer);
        assert_eq!(meta.print_time_seconds, 300);
    }

    #[test]
    fn overflowing_estimate_is_left_empty() {
        let length = "9".repeat(307);
        let meta = extract_text(&format!(";TIME:10\n;Filament used: {length}m\n"), &Options::default()).unwrap();

        assert!(meta.filament_length_m.is_some_and(f64::is_finite));
        assert_eq!(meta.filament_weight_g, None);
        assert!(!meta.weight_estimated);
    }

    #[test]
    fn print_duration_converts_seconds() {
        let meta = extract_text(";TIME:3665\n", &Options::default()).unwrap();
        assert_eq!(meta.print_duration(), Some(TimeDelta::seconds(3665)));
    }
}
