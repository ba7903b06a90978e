//! Tolerant parser for delimited `time, value` text
//!
//! Rows are split on runs of commas, tabs and whitespace. Only the first two
//! fields matter. A field that does not start with a number is not an error:
//! the time falls back to `row_index * default_sample_interval_s` and the
//! value to `0.0`, so messy exports still load.

use super::statistics::Statistics;
use super::IngestError;
use crate::config::constants::ingest;
use crate::config::IngestSettings;
use crate::types::Sample;
use crate::utils::rounding::round_to_decimals;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// First-line header heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderDetection {
    /// Header if the line contains `time`, `Time` or any `t`
    #[default]
    Legacy,
    /// Header only if the first field reads `time`, ignoring case
    Strict,
}

impl HeaderDetection {
    pub fn is_header(self, line: &str) -> bool {
        match self {
            HeaderDetection::Legacy => ingest::HEADER_MARKERS
                .iter()
                .any(|marker| line.contains(marker)),
            HeaderDetection::Strict => split_fields(line)
                .first()
                .is_some_and(|field| field.eq_ignore_ascii_case("time")),
        }
    }
}

/// Samples plus the statistics derived from them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestedDataset {
    samples: Vec<Sample>,
    stats: Statistics,
}

impl IngestedDataset {
    /// Build a dataset, computing its statistics; empty input is rejected
    pub fn from_samples(samples: Vec<Sample>) -> Result<Self, IngestError> {
        let stats = Statistics::compute(&samples).ok_or(IngestError::NoValidSamples)?;
        Ok(Self { samples, stats })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}

/// Parse with default settings
pub fn parse(raw_text: &str) -> Result<IngestedDataset, IngestError> {
    parse_with(raw_text, &IngestSettings::default())
}

/// Parse raw text into a validated dataset
pub fn parse_with(raw_text: &str, settings: &IngestSettings) -> Result<IngestedDataset, IngestError> {
    let mut lines = raw_text.lines().map(str::trim).filter(|line| !line.is_empty()).peekable();

    if lines
        .peek()
        .is_some_and(|first| settings.header_detection.is_header(first))
    {
        lines.next();
    }

    let mut skipped_rows = 0usize;
    let samples: Vec<Sample> = lines
        .enumerate()
        .filter_map(|(index, line)| {
            let row = parse_row(line, index, settings.default_sample_interval_s);
            if row.is_none() {
                skipped_rows += 1;
            }
            row
        })
        .collect();

    if samples.is_empty() {
        warn!(skipped_rows, "no valid samples in ingested text");
        return Err(IngestError::NoValidSamples);
    }

    debug!(samples = samples.len(), skipped_rows, "parsed ingested text");
    IngestedDataset::from_samples(samples)
}

/// One data row; `None` when it holds fewer than two fields
fn parse_row(line: &str, index: usize, default_interval_s: f64) -> Option<Sample> {
    let fields = split_fields(line);
    if fields.len() < 2 {
        return None;
    }

    let time = parse_leading_f64(fields[0]).unwrap_or(index as f64 * default_interval_s);
    let value = parse_leading_f64(fields[1]).unwrap_or(0.0);

    Some(Sample::new(
        round_to_decimals(time, ingest::VALUE_DECIMALS),
        round_to_decimals(value, ingest::VALUE_DECIMALS),
    ))
}

fn is_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

/// Split on separator runs. A leading or trailing run yields one empty field.
pub(crate) fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut in_separator = false;

    for (i, c) in line.char_indices() {
        if is_separator(c) {
            if !in_separator {
                fields.push(&line[start..i]);
                in_separator = true;
            }
        } else if in_separator {
            start = i;
            in_separator = false;
        }
    }
    fields.push(if in_separator { "" } else { &line[start..] });
    fields
}

/// Longest numeric prefix of `field`, e.g. `"0.5mV"` reads as `0.5`.
/// Returns `None` when no digits lead the field.
pub(crate) fn parse_leading_f64(field: &str) -> Option<f64> {
    let bytes = field.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    field[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
