//! Per-species counts and the sightings trend series for the analytics charts.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use wildtrack_core::SightingRecord;

/// Entries in the "Top Observed Species" ranking.
pub const TOP_SPECIES_LIMIT: usize = 15;

/// One point on the trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    /// Running total of observations up to and including this point.
    pub value: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalyticsSummary {
    /// Observations per species name.
    pub counts: BTreeMap<String, usize>,
    /// One point per record. Every timestamp is the aggregation time, not the
    /// sighting date: records carry only an unvalidated display date.
    pub series: Vec<SeriesPoint>,
}

impl AnalyticsSummary {
    /// Total number of records aggregated.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Species ordered by count, highest first, ties by name.
    pub fn top_species(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(name, &count)| (name.as_str(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }
}

pub fn aggregate(records: &[SightingRecord]) -> AnalyticsSummary {
    aggregate_at(records, Utc::now())
}

/// Aggregate with an explicit "now" stamped onto every series point.
pub fn aggregate_at(records: &[SightingRecord], now: DateTime<Utc>) -> AnalyticsSummary {
    let mut counts = BTreeMap::new();
    for rec in records {
        *counts.entry(rec.name.clone()).or_insert(0) += 1;
    }
    let series = (1..=records.len())
        .map(|value| SeriesPoint {
            timestamp: now,
            value,
        })
        .collect();
    AnalyticsSummary { counts, series }
}

/// Caption under the analytics charts.
pub fn data_note(observations: usize) -> String {
    format!("Showing {observations} observations.")
}

/// Chart sink: the bar and trend data most recently plotted, plus the note.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChartPanel {
    /// One bar per species, by name.
    pub bars: Vec<(String, usize)>,
    /// At most [`TOP_SPECIES_LIMIT`] species, highest count first.
    pub top: Vec<(String, usize)>,
    pub trend: Vec<SeriesPoint>,
    pub note: String,
}

impl ChartPanel {
    /// Replace the charts and the note with `summary`.
    pub fn plot(&mut self, summary: &AnalyticsSummary, observations: usize) {
        self.bars = summary
            .counts
            .iter()
            .map(|(name, &count)| (name.clone(), count))
            .collect();
        self.top = summary
            .top_species(TOP_SPECIES_LIMIT)
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        self.trend = summary.series.clone();
        self.note = data_note(observations);
    }
}
