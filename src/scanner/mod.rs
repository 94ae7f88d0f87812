//! # Report Scanner Module
//!
//! Inspects the text report left behind by the memory-analysis tool and
//! decides whether it contains a leak signature.
//!
//! The scan is a linear pass over the report's lines. A line reports a leak
//! when it contains the leak-summary marker `"definitely lost"` but is not the
//! clean summary `"definitely lost: 0 bytes"`. The first such line settles the
//! verdict.
//!
//! ## Known limitation
//!
//! A report with no `"definitely lost"` line at all reads as [`LeakVerdict::NoLeaks`],
//! the same as an explicit zero-byte summary. Absence of the summary section is
//! conflated with a clean summary; callers needing strict verification must
//! check for the section themselves.
//!
//! Lines longer than [`MAX_LINE_LEN`] are truncated for matching, so a marker
//! appearing only past that bound is not seen. A chunked fixed-buffer read
//! would instead match each chunk separately and could catch such a marker;
//! real analysis reports keep summary lines far under the bound either way.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Substring introducing a leak-summary line in the report.
pub const LEAK_MARKER: &str = "definitely lost";

/// The exact form a leak-summary line takes when nothing was lost.
pub const CLEAN_SUMMARY: &str = "definitely lost: 0 bytes";

/// Maximum number of bytes of a line considered for matching.
///
/// Longer lines are truncated for matching purposes; a marker that only
/// appears past this bound is not seen.
pub const MAX_LINE_LEN: usize = 512;

/// Outcome of scanning a leak report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeakVerdict {
    /// Every leak-summary line reported zero bytes, or no summary was present.
    NoLeaks,
    /// At least one leak-summary line reported a nonzero loss.
    LeaksDetected,
    /// The report file could not be opened.
    ReportUnreadable,
}

impl LeakVerdict {
    /// Process exit code this verdict maps to.
    pub fn exit_code(self) -> i32 {
        match self {
            LeakVerdict::NoLeaks => 0,
            LeakVerdict::LeaksDetected | LeakVerdict::ReportUnreadable => 1,
        }
    }
}

/// Scans the report at `path` for a leak signature.
///
/// An unopenable report yields [`LeakVerdict::ReportUnreadable`]; that is a
/// normal outcome, not a panic. The scan short-circuits on the first line
/// satisfying the leak predicate.
pub fn scan(path: &Path) -> LeakVerdict {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            log::warn!("could not open report {}: {}", path.display(), err);
            return LeakVerdict::ReportUnreadable;
        }
    };

    let mut reader = BufReader::new(file);
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                if line_reports_leak(truncate_for_match(&line)) {
                    return LeakVerdict::LeaksDetected;
                }
            }
            Err(err) => {
                log::warn!("stopped reading {}: {}", path.display(), err);
                break;
            }
        }
    }

    LeakVerdict::NoLeaks
}

/// Leak predicate applied to a single report line.
fn line_reports_leak(line: &str) -> bool {
    line.contains(LEAK_MARKER) && !line.contains(CLEAN_SUMMARY)
}

/// Caps a line at [`MAX_LINE_LEN`] bytes, backing up to a char boundary.
fn truncate_for_match(line: &str) -> &str {
    if line.len() <= MAX_LINE_LEN {
        return line;
    }
    let mut end = MAX_LINE_LEN;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}
