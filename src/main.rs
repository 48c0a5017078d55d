mod report;

use serde::Serialize;
use slicemeta::{ExtractionReport, ExtractionResult, Material, Options, SampleLimits, extract_verbose_with};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SLICEMETA_LOG";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let reports: Vec<ExtractionReport> = config.paths.iter().map(|path| extract_verbose_with(path, &config.options)).collect();

    if config.json {
        if let Err(err) = print_json(&reports) {
            eprintln!("error: failed to encode results: {err}");
            std::process::exit(1);
        }
    } else {
        for report in &reports {
            report::print_report(report, config.color);
        }
    }

    if reports.iter().any(|report| report.result.is_none()) {
        std::process::exit(1);
    }
}

struct CliConfig {
    paths: Vec<PathBuf>,
    options: Options,
    json: bool,
    color: bool,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    path: String,
    result: Option<&'a ExtractionResult>,
    error: Option<&'a str>,
}

fn print_json(reports: &[ExtractionReport]) -> Result<(), serde_json::Error> {
    let entries: Vec<JsonEntry<'_>> = reports
        .iter()
        .map(|report| JsonEntry {
            path: report.path.display().to_string(),
            result: report.result.as_ref(),
            error: report.details.error.as_deref(),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

fn parse_args() -> Result<CliConfig, String> {
    let mut paths = Vec::new();
    let mut limits = SampleLimits::default();
    let mut material = Material::default();
    let mut json = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("slicemeta {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--json" => json = true,
            "--color" => color = true,
            "--no-color" => color = false,
            "--head-lines" => limits.head_lines = parse_value(&arg, args.next())?,
            "--tail-bytes" => limits.tail_bytes = parse_value(&arg, args.next())?,
            "--diameter" => material.diameter_mm = parse_positive(&arg, args.next())?,
            "--density" => material.density_g_per_cm3 = parse_positive(&arg, args.next())?,
            "--" => {
                paths.extend(args.by_ref().map(PathBuf::from));
                break;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => paths.push(PathBuf::from(arg)),
        }
    }

    if paths.is_empty() {
        return Err(format!("error: no input files\n\n{}", help_text()));
    }

    Ok(CliConfig { paths, options: Options { limits, material }, json, color })
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("error: {flag} expects a value"))?;
    value.parse().map_err(|_| format!("error: invalid value '{value}' for {flag}"))
}

fn parse_positive(flag: &str, value: Option<String>) -> Result<f64, String> {
    let parsed: f64 = parse_value(flag, value)?;
    if parsed.is_finite() && parsed > 0.0 {
        Ok(parsed)
    } else {
        Err(format!("error: {flag} must be a positive number"))
    }
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    let limits = SampleLimits::default();
    let material = Material::default();
    format!(
        "slicemeta {version}

Extract print time and filament usage from slicer G-code comments.

Usage:
  slicemeta [OPTIONS] [--] <file...>

Options:
  --json                     Print results as JSON instead of a report.
  --head-lines <n>           Lines read from the start of each file.
                             Default: {head_lines}
  --tail-bytes <n>           Bytes read from the end of each file.
                             Default: {tail_bytes}
  --diameter <mm>            Filament diameter used for weight estimates.
                             Default: {diameter}
  --density <g/cm3>          Filament density used for weight estimates.
                             Default: {density} (PLA)
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}                  Log filter, e.g. debug or slicemeta=trace.

Exit codes:
  0  Metadata found in every file.
  1  At least one file had no recognizable metadata.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        head_lines = limits.head_lines,
        tail_bytes = limits.tail_bytes,
        diameter = material.diameter_mm,
        density = material.density_g_per_cm3,
        log_env = LOG_ENV,
    )
}
