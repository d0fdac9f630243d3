use crate::model::LogEntry;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Granularity { Minute, #[default] Hour, Day }

#[derive(Debug, thiserror::Error)]
#[error("could not parse datetime: {0}")]
pub struct BadDateTime(pub String);

#[derive(Clone, Debug, Default)]
pub struct Filters {
    pub keyword: Option<String>,
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

impl Filters {
    pub fn parse(keyword: Option<&str>, from: Option<&str>, to: Option<&str>) -> Result<Self, BadDateTime> {
        Ok(Self { keyword: keyword.map(str::to_lowercase), from: parse_opt(from)?, to: parse_opt(to)? })
    }

    pub fn pass(&self, e: &LogEntry) -> bool {
        if let Some(f) = self.from { if e.ts < f { return false; } }
        if let Some(t) = self.to { if e.ts >= t { return false; } }
        if let Some(k) = &self.keyword { if !e.message.to_lowercase().contains(k) { return false; } }
        true
    }
}

fn parse_opt(s: Option<&str>) -> Result<Option<NaiveDateTime>, BadDateTime> {
    let Some(val) = s else { return Ok(None) };
    for f in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(val, f) { return Ok(Some(dt)); }
    }
    // date only: midnight
    if let Ok(date) = NaiveDate::parse_from_str(val, "%Y-%m-%d") { return Ok(Some(date.and_time(NaiveTime::MIN))); }
    Err(BadDateTime(val.to_string()))
}

#[derive(Default)]
pub struct Analyzer {
    pub granularity: Granularity,
    pub filters: Filters,
    pub total: u64,
    pub malformed_lines: u64,

    pub first: Option<NaiveDateTime>,
    pub last: Option<NaiveDateTime>,

    /// Entry count per bucket start.
    pub timeline: BTreeMap<NaiveDateTime, u64>,
}

impl Analyzer {
    pub fn new(granularity: Granularity, filters: Filters) -> Self {
        Self { granularity, filters, ..Default::default() }
    }

    fn bucket(&self, ts: NaiveDateTime) -> NaiveDateTime {
        let t = ts.time();
        let time = match self.granularity {
            Granularity::Minute => NaiveTime::from_hms_opt(t.hour(), t.minute(), 0),
            Granularity::Hour => NaiveTime::from_hms_opt(t.hour(), 0, 0),
            Granularity::Day => Some(NaiveTime::MIN),
        };
        // hour/minute come from a valid time, so the rebuild cannot fail
        ts.date().and_time(time.unwrap_or(NaiveTime::MIN))
    }

    pub fn consume<I: IntoIterator<Item = LogEntry>>(&mut self, entries: I) {
        for e in entries { self.consume_entry(&e); }
    }

    pub fn consume_entry(&mut self, e: &LogEntry) {
        if !self.filters.pass(e) { return; }
        self.total += 1;
        self.first = Some(self.first.map_or(e.ts, |cur| cur.min(e.ts)));
        self.last = Some(self.last.map_or(e.ts, |cur| cur.max(e.ts)));
        let b = self.bucket(e.ts);
        *self.timeline.entry(b).or_default() += 1;
    }
}
