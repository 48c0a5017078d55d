//! Print metadata extraction from slicer-generated G-code.
//!
//! Slicers annotate their output with human readable comments: estimated print
//! time, filament length, sometimes filament weight. Each slicer family has
//! its own convention (a *dialect*). This crate reads a bounded sample of a
//! file, recognizes the dialect and returns the numbers in one shape.
//!
//! ```text
//! path ── sampler::sample ──> TextSample (first 500 lines + last 10 KB)
//!                                   │
//!                       MarkerMask::scan (trigger.rs)
//!                                   │
//!              Dialect::PRECEDENCE: Header ("A") → Footer ("B")
//!                                   │ first match wins
//!                                   v
//!          weight fallback (weight.rs) if length but no weight
//!                                   │
//!                                   v
//!                        Option<ExtractionResult>
//! ```
//!
//! Nothing here keeps state between calls; extracting several files from
//! different threads is fine.
//!
//! Set `SLICEMETA_LOG=debug` with the bundled CLI to see matching traces.

#[macro_use]
mod macros;
mod api;
mod dialect;
mod duration;
mod sampler;
mod trigger;
mod weight;

pub use api::{
    AttemptOutcome, DialectAttempt, ExtractionDetails, ExtractionReport, ExtractionResult, Options, extract,
    extract_text, extract_verbose_with, extract_with,
};
pub use dialect::{Dialect, DialectMatch};
pub use duration::parse_duration;
pub use sampler::{
    DEFAULT_HEAD_BYTES, DEFAULT_HEAD_LINES, DEFAULT_TAIL_BYTES, SampleError, SampleLimits, TextSample, sample,
};
pub use trigger::MarkerMask;
pub use weight::{Material, estimate_weight};
