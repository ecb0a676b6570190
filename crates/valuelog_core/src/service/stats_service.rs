//! Dashboard aggregation.
//!
//! # Responsibility
//! - Filter entries to one child and order them for the timeline.
//! - Derive tag histograms and satisfaction statistics for the dashboard.
//!
//! # Invariants
//! - Timeline order is `date DESC`; equal dates keep insertion order.
//! - Histogram buckets are keyed by localized label, so keys that localize
//!   to the same label share a bucket.
//! - Average satisfaction is `0.0` for an empty selection.

use crate::model::entry::ExperienceEntry;
use crate::model::locale::LocaleTable;
use serde::Serialize;
use std::collections::HashMap;

/// One histogram bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub name: String,
    pub value: u32,
}

/// Aggregates shown on the dashboard for the selected child.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Buckets in first-seen order over the timeline.
    pub activity_distribution: Vec<TagCount>,
    pub competency_distribution: Vec<TagCount>,
    /// Mean satisfaction rounded to one decimal place.
    pub avg_satisfaction: f64,
    pub total_entries: usize,
}

impl DashboardStats {
    pub fn empty() -> Self {
        Self {
            activity_distribution: Vec::new(),
            competency_distribution: Vec::new(),
            avg_satisfaction: 0.0,
            total_entries: 0,
        }
    }
}

/// Entries of `child_id` ordered newest first.
pub fn entries_for_child<'a>(
    entries: &'a [ExperienceEntry],
    child_id: &str,
) -> Vec<&'a ExperienceEntry> {
    let mut filtered: Vec<&ExperienceEntry> = entries
        .iter()
        .filter(|entry| entry.child_id == child_id)
        .collect();
    // `sort_by` is stable; ISO dates order lexically.
    filtered.sort_by(|a, b| b.date.cmp(&a.date));
    filtered
}

/// Computes dashboard statistics for one child.
///
/// `None` (no child selected) yields empty statistics.
pub fn compute_dashboard_stats(
    entries: &[ExperienceEntry],
    child_id: Option<&str>,
    table: &LocaleTable,
) -> DashboardStats {
    let Some(child_id) = child_id else {
        return DashboardStats::empty();
    };
    let timeline = entries_for_child(entries, child_id);
    if timeline.is_empty() {
        return DashboardStats::empty();
    }

    let mut activity = Histogram::default();
    let mut competency = Histogram::default();
    let mut satisfaction_sum: u64 = 0;

    for entry in &timeline {
        for tag in &entry.activity_tags {
            activity.bump(table.label(tag));
        }
        for tag in &entry.competency_tags {
            competency.bump(table.label(tag));
        }
        satisfaction_sum += u64::from(entry.satisfaction);
    }

    DashboardStats {
        activity_distribution: activity.into_counts(),
        competency_distribution: competency.into_counts(),
        avg_satisfaction: round_one_decimal(satisfaction_sum as f64 / timeline.len() as f64),
        total_entries: timeline.len(),
    }
}

/// Label counter that remembers first-seen order.
#[derive(Default)]
struct Histogram {
    index: HashMap<String, usize>,
    counts: Vec<TagCount>,
}

impl Histogram {
    fn bump(&mut self, label: &str) {
        if let Some(&position) = self.index.get(label) {
            self.counts[position].value += 1;
            return;
        }
        self.index.insert(label.to_string(), self.counts.len());
        self.counts.push(TagCount {
            name: label.to_string(),
            value: 1,
        });
    }

    fn into_counts(self) -> Vec<TagCount> {
        self.counts
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
