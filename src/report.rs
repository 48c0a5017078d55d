use slicemeta::{AttemptOutcome, ExtractionReport, ExtractionResult, MarkerMask};

/// SGR escape codes; `Palette` drops them when color is off.
mod ansi {
    const RESET: &str = "\x1b[0m";
    const DIM: &str = "\x1b[2m";
    const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RED: &str = "\x1b[31m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette(bool);

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self(enabled)
        }

        fn wrap(&self, code: &str, s: &str) -> String {
            match self.0 {
                true => format!("{code}{s}{RESET}"),
                false => s.to_string(),
            }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            self.wrap(color, s.as_ref())
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            self.wrap(BOLD, s.as_ref())
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            self.wrap(DIM, s.as_ref())
        }
    }
}

pub fn print_report(report: &ExtractionReport, color: bool) {
    let palette = ansi::Palette::new(color);
    let details = &report.details;
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Extracting: {}", report.path.display()), ansi::CYAN)));

    if let Some(error) = &details.error {
        println!("  {}", palette.paint(format!("✗ {error}"), ansi::RED));
        return;
    }

    println!("\n{}", palette.paint("━━━ Sample ━━━", ansi::GRAY));
    println!(
        "  Size: {}  │  Head: {} lines ({} bytes)  │  Tail: {} bytes",
        palette.paint(format!("{} bytes", details.total_bytes), ansi::YELLOW),
        palette.paint(details.head_lines.to_string(), ansi::BLUE),
        details.head_bytes,
        palette.paint(details.tail_bytes.to_string(), ansi::BLUE),
    );
    if let Some(markers) = details.markers {
        println!("  {} {}", palette.dim("markers:"), palette.paint(marker_names(markers), ansi::CYAN));
    }

    println!("\n{}", palette.paint("━━━ Dialects ━━━", ansi::GRAY));
    for attempt in &details.attempts {
        let outcome = match attempt.outcome {
            AttemptOutcome::Matched => palette.paint("✓ matched", ansi::GREEN),
            AttemptOutcome::NoMatch => palette.paint("✗ markers present, no valid time", ansi::YELLOW),
            AttemptOutcome::Skipped => palette.dim("✗ skipped (no time marker)"),
        };
        println!("  {} {}", palette.paint(format!("{:<16}", attempt.dialect.to_string()), ansi::BLUE), outcome);
    }

    println!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    match &report.result {
        Some(result) => print_result(result, &palette),
        None => {
            println!("{}", palette.dim("  No metadata found"));
            println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
            println!("  • The file was produced by an unsupported slicer");
            println!("  • Metadata lies outside the sampled window (try --head-lines / --tail-bytes)");
        }
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Sampling: {}  │  Matching: {}",
        palette.paint(format!("{:?}", details.total), ansi::GREEN),
        palette.paint(format!("{:?}", details.sampling), ansi::CYAN),
        palette.dim(format!("{:?}", details.matching)),
    );
    println!();
}

fn print_result(result: &ExtractionResult, palette: &ansi::Palette) {
    println!(
        "  {} {} {}",
        palette.dim("print time:"),
        palette.bold(palette.paint(format_duration(result.print_time_seconds), ansi::GREEN)),
        palette.dim(format!("({} s)", result.print_time_seconds)),
    );

    let length = result.filament_length_m.map(|m| format!("{m:.3} m")).unwrap_or_else(|| "-".to_string());
    let weight = match result.filament_weight_g {
        Some(g) if result.weight_estimated => format!("{g:.2} g (estimated)"),
        Some(g) => format!("{g:.2} g"),
        None => "-".to_string(),
    };
    println!(
        "  {} {}  {} {}",
        palette.dim("filament:"),
        palette.paint(length, ansi::YELLOW),
        palette.dim("│"),
        palette.paint(weight, ansi::YELLOW),
    );
    println!("  {} {}", palette.dim("dialect:"), palette.paint(result.dialect.to_string(), ansi::CYAN));
}

/// Flag names of `markers`, e.g. `HEADER_TIME HEADER_LENGTH`, or `none`.
fn marker_names(markers: MarkerMask) -> String {
    if markers.is_empty() {
        return "none".to_string();
    }
    markers.iter_names().map(|(name, _)| name).collect::<Vec<_>>().join(" ")
}

/// `5025` -> `1h 23m 45s`, in the same shape slicers print.
fn format_duration(seconds: u64) -> String {
    let (days, rest) = (seconds / 86_400, seconds % 86_400);
    let (hours, rest) = (rest / 3_600, rest % 3_600);
    let (minutes, seconds) = (rest / 60, rest % 60);

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if days > 0 || hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if days > 0 || hours > 0 || minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    parts.push(format!("{seconds}s"));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::{MarkerMask, ansi, format_duration, marker_names};

    #[test]
    fn format_duration_round_trips_through_parser() {
        for seconds in [0, 45, 2_700, 5_025, 93_600, 90_061] {
            assert_eq!(slicemeta::parse_duration(&format_duration(seconds)), seconds);
        }
        assert_eq!(format_duration(5_025), "1h 23m 45s");
        assert_eq!(format_duration(45), "45s");
    }

    #[test]
    fn marker_names_lists_found_keys() {
        let header = MarkerMask::scan(";TIME:60\n;Filament used: 1m\n");
        assert_eq!(marker_names(header), "HEADER_TIME HEADER_LENGTH");
        assert_eq!(marker_names(MarkerMask::scan("G28\n")), "none");
    }

    #[test]
    fn palette_without_color_is_plain() {
        let plain = ansi::Palette::new(false);
        assert_eq!(plain.paint("x", ansi::GREEN), "x");
        assert_eq!(plain.bold("x"), "x");

        let colored = ansi::Palette::new(true);
        assert_eq!(colored.paint("x", ansi::GREEN), "\x1b[32mx\x1b[0m");
    }
}
