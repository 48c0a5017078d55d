//! Marker pre-scan.
//!
//! Before any dialect regex runs, the sample is scanned once for the literal
//! marker keys each dialect depends on. A dialect whose mandatory marker is
//! absent is skipped without touching its regexes.
//!
//! Only the time bits gate matching; the length and weight bits are surfaced in
//! the CLI report to show which satellite markers a sample carries.
//!
//! This is a heuristic: a set bit only means the key text occurs somewhere.
//! The dialect matcher still has to match the full marker line.

bitflags::bitflags! {
    /// Marker keys found in a sample.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MarkerMask: u8 {
        /// `;TIME:`
        const HEADER_TIME     = 1 << 0;
        /// `;Filament used:`
        const HEADER_LENGTH   = 1 << 1;
        /// `;Filament weight:`
        const HEADER_WEIGHT   = 1 << 2;
        /// `estimated printing time`
        const FOOTER_TIME     = 1 << 3;
        /// `filament used [mm]`
        const FOOTER_LENGTH   = 1 << 4;
        /// `filament used [g]`
        const FOOTER_WEIGHT   = 1 << 5;
    }
}

const MARKER_KEYS: &[(&str, MarkerMask)] = &[
    (";TIME:", MarkerMask::HEADER_TIME),
    (";Filament used:", MarkerMask::HEADER_LENGTH),
    (";Filament weight:", MarkerMask::HEADER_WEIGHT),
    ("estimated printing time", MarkerMask::FOOTER_TIME),
    ("filament used [mm]", MarkerMask::FOOTER_LENGTH),
    ("filament used [g]", MarkerMask::FOOTER_WEIGHT),
];

impl MarkerMask {
    /// Scan `sample` for every known marker key.
    pub fn scan(sample: &str) -> Self {
        let mut mask = MarkerMask::empty();
        for (key, bit) in MARKER_KEYS {
            if sample.contains(key) {
                mask |= *bit;
            }
        }
        mask
    }
}
