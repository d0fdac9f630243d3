use crate::analyze::Analyzer;
use crate::model::TIMESTAMP_FORMAT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Summary {
    pub total_entries: u64,
    pub malformed_lines: u64,
    pub first_log: Option<String>,
    pub last_log: Option<String>,
    /// Bucket start in the log's own timestamp format, chronological.
    pub timeline: Vec<(String, u64)>,
}

pub fn build_summary(an: &Analyzer) -> Summary {
    let timeline = an.timeline.iter()
        .map(|(k, v)| (k.format(TIMESTAMP_FORMAT).to_string(), *v))
        .collect();

    Summary {
        total_entries: an.total,
        malformed_lines: an.malformed_lines,
        first_log: an.first.map(|d| d.format(TIMESTAMP_FORMAT).to_string()),
        last_log: an.last.map(|d| d.format(TIMESTAMP_FORMAT).to_string()),
        timeline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::{Filters, Granularity};
    use crate::model::LogEntry;
    use chrono::NaiveDateTime;

    #[test]
    fn summary_json_shape() {
        let ts = NaiveDateTime::parse_from_str("2024-01-15 08:30:10", TIMESTAMP_FORMAT).unwrap();
        let mut an = Analyzer::new(Granularity::Hour, Filters::default());
        an.consume([LogEntry::new(ts, "Server started.")]);
        an.malformed_lines = 2;

        let v = serde_json::to_value(build_summary(&an)).unwrap();
        assert_eq!(v["total_entries"], 1);
        assert_eq!(v["malformed_lines"], 2);
        assert_eq!(v["first_log"], "2024-01-15 08:30:10");
        assert_eq!(v["timeline"][0][0], "2024-01-15 08:00:00");
        assert_eq!(v["timeline"][0][1], 1);
    }

    #[test]
    fn empty_summary_has_no_bounds() {
        let s = build_summary(&Analyzer::default());
        assert_eq!(s.total_entries, 0);
        assert!(s.first_log.is_none() && s.last_log.is_none());
        assert!(s.timeline.is_empty());
    }
}
