//! The dashboard read model: an in-memory reduction over one query result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  inquiry::Inquiry,
  topic::{DEFAULT_TOP_N, TopicCount, tally_subjects, tally_topics},
  window::TimeWindow,
};

/// Most records listed under "Recent Submissions".
pub const RECENT_LIMIT: usize = 50;

/// Computed dashboard state. Never stored, always derived.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardSummary {
  pub total:     usize,
  /// Records inside the trailing [`TimeWindow::Week`].
  pub this_week: usize,
  /// Top subject lines.
  pub subjects:  Vec<TopicCount>,
  /// Top classification topics.
  pub topics:    Vec<TopicCount>,
  /// Newest first, as returned by the store.
  pub recent:    Vec<Inquiry>,
  /// Set when the underlying fetch failed; all counters are then zero.
  pub error:     Option<String>,
}

impl DashboardSummary {
  /// Reduce `records` (newest first) as of `now`.
  pub fn from_records(mut records: Vec<Inquiry>, now: DateTime<Utc>) -> Self {
    let this_week = records
      .iter()
      .filter(|r| TimeWindow::Week.contains(r.created_at, now))
      .count();
    let subjects = tally_subjects(&records, DEFAULT_TOP_N);
    let topics = tally_topics(&records, DEFAULT_TOP_N);
    let total = records.len();
    records.truncate(RECENT_LIMIT);

    Self { total, this_week, subjects, topics, recent: records, error: None }
  }

  /// The degraded summary shown when the store could not be read.
  pub fn failed(message: impl Into<String>) -> Self {
    Self { error: Some(message.into()), ..Self::default() }
  }

  pub fn is_failed(&self) -> bool { self.error.is_some() }
}

#[cfg(test)]
mod tests {
  use chrono::{TimeDelta, TimeZone};

  use super::*;
  use crate::inquiry::InquiryId;

  fn record(id: &str, subject: &str, created_at: DateTime<Utc>) -> Inquiry {
    Inquiry {
      id: InquiryId::new(id),
      name: String::new(),
      address: String::new(),
      city: String::new(),
      state: String::new(),
      zip: String::new(),
      phone: None,
      subject: subject.into(),
      message: String::new(),
      created_at,
      topics: vec![],
      sentiment: None,
      relevant_bills: None,
      needs_processing: None,
      needs_manual_topic_classification: None,
    }
  }

  #[test]
  fn counts_and_breakdowns() {
    let now = Utc.with_ymd_and_hms(2024, 11, 5, 12, 0, 0).unwrap();
    let records = vec![
      record("3", "A", now - TimeDelta::hours(1)),
      record("2", "A", now - TimeDelta::days(7)),
      record("1", "B", now - TimeDelta::days(30)),
    ];

    let summary = DashboardSummary::from_records(records, now);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.this_week, 2);
    assert_eq!(summary.subjects[0], TopicCount { name: "A".into(), value: 2 });
    assert_eq!(summary.topics, vec![TopicCount { name: "Uncategorized".into(), value: 3 }]);
    assert_eq!(summary.recent.first().map(|r| r.id.as_str()), Some("3"));
    assert!(!summary.is_failed());
  }

  #[test]
  fn recent_is_capped_but_total_is_not() {
    let now = Utc::now();
    let records = (0..RECENT_LIMIT + 10)
      .map(|i| record(&i.to_string(), "x", now))
      .collect();
    let summary = DashboardSummary::from_records(records, now);
    assert_eq!(summary.total, RECENT_LIMIT + 10);
    assert_eq!(summary.recent.len(), RECENT_LIMIT);
  }

  #[test]
  fn failed_summary_is_empty() {
    let summary = DashboardSummary::failed("connection refused");
    assert_eq!(summary.total, 0);
    assert_eq!(summary.this_week, 0);
    assert!(summary.subjects.is_empty());
    assert!(summary.recent.is_empty());
    assert_eq!(summary.error.as_deref(), Some("connection refused"));
  }
}
