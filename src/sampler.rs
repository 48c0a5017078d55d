//! Bounded head + tail sampling of toolpath files.
//!
//! Slicers write their metadata either as a header before the first move or as
//! a footer after the last one. Reading only the first lines and the final
//! bytes keeps extraction cost independent of file size, which matters for
//! G-code files that run to hundreds of megabytes.
//!
//! ## Invariants
//!
//! - The head read stops after `head_lines` lines, `head_bytes` bytes, or end
//!   of stream, whichever comes first.
//! - The tail is read only when the file is larger than `tail_bytes`; smaller
//!   files are already covered by the head, up to the line cap.
//! - Invalid UTF-8 is replaced, never rejected.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

/// Lines read from the start of the file.
pub const DEFAULT_HEAD_LINES: usize = 500;
/// Hard cap on head bytes, for files with few or no newlines.
pub const DEFAULT_HEAD_BYTES: u64 = 1024 * 1024;
/// Bytes read from the end of the file; also the size above which a tail is read.
pub const DEFAULT_TAIL_BYTES: u64 = 10_000;

/// How much of a file the sampler is allowed to look at.
///
/// Metadata placed outside this window on unusually large files is missed;
/// widen the limits when a slicer is known to emit bulky headers or footers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleLimits {
    pub head_lines: usize,
    pub head_bytes: u64,
    pub tail_bytes: u64,
}

impl Default for SampleLimits {
    fn default() -> Self {
        Self { head_lines: DEFAULT_HEAD_LINES, head_bytes: DEFAULT_HEAD_BYTES, tail_bytes: DEFAULT_TAIL_BYTES }
    }
}

/// Errors produced while sampling a file.
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SampleError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => SampleError::NotFound { path: path.to_path_buf() },
            _ => SampleError::Io { path: path.to_path_buf(), source },
        }
    }
}

/// Head and tail of a file joined by a newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSample {
    text: String,
    /// Byte offset in `text` where the tail starts (just past the separator).
    boundary: usize,
    /// Size of the source file in bytes.
    total_bytes: u64,
    head_lines: usize,
}

impl TextSample {
    /// Build a sample from already decoded parts.
    pub fn from_parts(head: &str, tail: &str, total_bytes: u64) -> Self {
        let mut text = String::with_capacity(head.len() + tail.len() + 1);
        text.push_str(head);
        text.push('\n');
        let boundary = text.len();
        text.push_str(tail);
        Self { text, boundary, total_bytes, head_lines: head.lines().count() }
    }

    /// The whole sample, head first.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn head(&self) -> &str {
        &self.text[..self.boundary - 1]
    }

    pub fn tail(&self) -> &str {
        &self.text[self.boundary..]
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Number of lines in the head portion.
    pub fn head_lines(&self) -> usize {
        self.head_lines
    }

    /// Decoded length of head and tail, without the separator.
    pub fn sampled_bytes(&self) -> usize {
        self.text.len() - 1
    }
}

/// Sample the file at `path` within `limits`.
///
/// The file handle is dropped before returning on every path, including errors.
pub fn sample(path: impl AsRef<Path>, limits: &SampleLimits) -> Result<TextSample, SampleError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| SampleError::from_io(path, err))?;
    let mut reader = BufReader::new(file);

    let head = read_head(&mut reader, limits).map_err(|err| SampleError::from_io(path, err))?;
    let (tail, total_bytes) = read_tail(&mut reader, limits).map_err(|err| SampleError::from_io(path, err))?;

    debug!(
        path = %path.display(),
        total_bytes,
        head_bytes = head.len(),
        tail_bytes = tail.len(),
        "sampled file"
    );

    Ok(TextSample::from_parts(&String::from_utf8_lossy(&head), &String::from_utf8_lossy(&tail), total_bytes))
}

/// Read up to `head_lines` lines, never more than `head_bytes` bytes.
fn read_head<R: BufRead>(reader: &mut R, limits: &SampleLimits) -> io::Result<Vec<u8>> {
    let mut head = Vec::new();
    let mut capped = reader.take(limits.head_bytes);

    for _ in 0..limits.head_lines {
        let read = capped.read_until(b'\n', &mut head)?;
        if read == 0 {
            break;
        }
    }

    trace!(bytes = head.len(), "read head");
    Ok(head)
}

/// Read the last `tail_bytes` bytes if the stream is larger than that.
///
/// Returns the tail (empty for small files) and the total stream length.
fn read_tail<R: Read + Seek>(reader: &mut R, limits: &SampleLimits) -> io::Result<(Vec<u8>, u64)> {
    let total_bytes = reader.seek(SeekFrom::End(0))?;
    let mut tail = Vec::new();

    if total_bytes > limits.tail_bytes {
        reader.seek(SeekFrom::Start(total_bytes - limits.tail_bytes))?;
        reader.take(limits.tail_bytes).read_to_end(&mut tail)?;
    }

    trace!(bytes = tail.len(), total_bytes, "read tail");
    Ok((tail, total_bytes))
}
