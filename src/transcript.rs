/*!
 * Transcript document model and tolerant SRT parser.
 *
 * A transcript document is a sequence of blank-line-delimited blocks, each
 * with an optional numeric index line, a `HH:MM:SS,mmm --> HH:MM:SS,mmm`
 * time-range line, and one or more text lines. Human editors mangle these
 * files freely (renumbering, deleting blank lines, breaking timestamps), so
 * parsing never fails fatally: a block whose time range cannot be recovered
 * is emitted with `times: None` and a warning, and parsing continues.
 *
 * The written timestamps are advisory only. Cut extraction resolves time
 * ranges through the timing store, never through these fields.
 */

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::RunWarning;
use crate::text_match::normalize_text;

// SRT time-range line; tolerant of single-digit hours and '.' millis
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(\d{1,2}):(\d{2}):(\d{2})[,\.](\d{3})\s*-->\s*(\d{1,2}):(\d{2}):(\d{2})[,\.](\d{3})",
    )
    .unwrap()
});

static ARROW_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"-->").unwrap());

static BLANK_LINE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// A parsed time range in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length in seconds; zero for degenerate ranges.
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// One deletable unit of a transcript document.
#[derive(Debug, Clone)]
pub struct TranscriptBlock {
    /// Index as written in the document, or a running counter when missing.
    /// Informational only; never used for block identity.
    pub index: usize,

    /// Time range as written in the document (advisory), or `None` when the
    /// timestamp line was malformed or missing.
    pub times: Option<TimeRange>,

    /// Block text, whitespace-collapsed across lines.
    pub text: String,

    /// Cached normalization of `text`, the block's comparison key.
    pub normalized: String,
}

impl TranscriptBlock {
    /// Whether the block's time-range line failed to parse.
    pub fn is_unparseable(&self) -> bool {
        self.times.is_none()
    }
}

impl fmt::Display for TranscriptBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        match self.times {
            Some(range) => writeln!(
                f,
                "{} --> {}",
                format_timestamp(range.start),
                format_timestamp(range.end)
            )?,
            None => writeln!(f, "<unparseable> --> <unparseable>")?,
        }
        writeln!(f, "{}", self.text)
    }
}

/// Parse a transcript document into ordered blocks plus warnings.
///
/// Worst case every block comes back unparseable; the parse itself cannot
/// fail. Document order is preserved.
pub fn parse_transcript(content: &str) -> (Vec<TranscriptBlock>, Vec<RunWarning>) {
    let mut blocks = Vec::new();
    let mut warnings = Vec::new();
    let mut counter = 0usize;

    for raw in BLANK_LINE_REGEX.split(content.trim()) {
        let lines: Vec<&str> = raw
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();
        if lines.is_empty() {
            continue;
        }

        counter += 1;

        // Locate the time-range line; everything after it is text.
        let ts_pos = lines.iter().position(|line| ARROW_REGEX.is_match(line));

        let Some(ts_pos) = ts_pos else {
            // No timestamp line at all. Treat the whole group as text of an
            // unparseable block so the content is not silently dropped.
            let text = lines.join(" ");
            warnings.push(RunWarning::MissingTimeRange { index: counter });
            blocks.push(make_block(counter, None, text));
            continue;
        };

        // Index line precedes the timestamps when present and numeric.
        let index = if ts_pos > 0 {
            lines[ts_pos - 1].parse::<usize>().unwrap_or(counter)
        } else {
            counter
        };

        let times = match parse_time_range(lines[ts_pos]) {
            Some(range) if range.start <= range.end => Some(range),
            _ => {
                warnings.push(RunWarning::MalformedTimeRange {
                    index,
                    line: lines[ts_pos].to_string(),
                });
                None
            }
        };

        let text = lines[ts_pos + 1..].join(" ");
        blocks.push(make_block(index, times, text));
    }

    (blocks, warnings)
}

fn make_block(index: usize, times: Option<TimeRange>, text: String) -> TranscriptBlock {
    let normalized = normalize_text(&text);
    TranscriptBlock {
        index,
        times,
        text,
        normalized,
    }
}

/// Parse a `HH:MM:SS,mmm --> HH:MM:SS,mmm` line into seconds.
pub fn parse_time_range(line: &str) -> Option<TimeRange> {
    let caps = TIMESTAMP_REGEX.captures(line)?;
    let start = capture_to_seconds(&caps, 1)?;
    let end = capture_to_seconds(&caps, 5)?;
    Some(TimeRange::new(start, end))
}

fn capture_to_seconds(caps: &regex::Captures, start_idx: usize) -> Option<f64> {
    let field = |i: usize| -> Option<u64> { caps.get(i)?.as_str().parse().ok() };
    let hours = field(start_idx)?;
    let minutes = field(start_idx + 1)?;
    let seconds = field(start_idx + 2)?;
    let millis = field(start_idx + 3)?;

    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    Some((hours * 3600 + minutes * 60 + seconds) as f64 + millis as f64 / 1000.0)
}

/// Format seconds as an SRT timestamp (HH:MM:SS,mmm).
pub fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1_000;
    let millis = total_ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}
