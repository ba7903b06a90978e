//! CSV export of a sample sequence

use crate::config::constants::ingest;
use crate::types::Sample;
use std::fmt::Write;

/// Header line followed by one `time,value` row per sample.
///
/// Values are written exactly as stored; `f64`'s shortest round-trip
/// formatting keeps `parse(serialize(x)) == x` for parsed datasets.
pub fn serialize(samples: &[Sample]) -> String {
    let mut out = String::with_capacity(ingest::EXPORT_HEADER.len() + samples.len() * 16);
    out.push_str(ingest::EXPORT_HEADER);
    for sample in samples {
        // Writing into a String cannot fail
        let _ = write!(out, "\n{},{}", sample.time, sample.value);
    }
    out
}

/// `record.txt` becomes `record_processed.csv`; only the last extension is replaced
pub fn export_file_name(source_name: &str) -> String {
    let stem = match source_name.rfind('.') {
        Some(dot) if dot > 0 && !source_name[dot + 1..].is_empty() => &source_name[..dot],
        _ => source_name,
    };
    format!("{}{}", stem, ingest::EXPORT_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_layout() {
        let csv = serialize(&[Sample::new(0.0, 0.123), Sample::new(0.004, 0.2)]);
        assert_eq!(csv, "time,value\n0,0.123\n0.004,0.2");
    }

    #[test]
    fn test_serialize_empty_is_header_only() {
        assert_eq!(serialize(&[]), "time,value");
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("record.txt"), "record_processed.csv");
        assert_eq!(export_file_name("a.b.csv"), "a.b_processed.csv");
        assert_eq!(export_file_name("noext"), "noext_processed.csv");
        assert_eq!(export_file_name(".hidden"), ".hidden_processed.csv");
        assert_eq!(export_file_name("trailing."), "trailing._processed.csv");
    }
}
