//! Topic vocabulary, frequency tallies and topic-membership filtering.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::inquiry::Inquiry;

/// Label used for records with no subject or topic.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Number of slices shown in the dashboard breakdowns.
pub const DEFAULT_TOP_N: usize = 5;

/// Topics offered by the contact form's multi-select.
pub const TOPICS: &[&str] = &[
  "Agriculture",
  "Animals",
  "Arts and Humanities",
  "Banking",
  "Budget and Economy",
  "Campaign Finance",
  "Civil Rights/Humanities",
  "Congress",
  "Child Tax Credit",
  "Defense and Military",
  "Economy",
  "Education",
  "Energy",
  "Climate Change",
  "Family",
  "Federal Employees",
  "Food Safety",
  "Foreign Relations",
  "Guns",
  "Health",
  "Homeland Security",
  "Housing",
  "Immigration",
  "Infrastructure",
  "International Relations",
  "Internal Revenue Service (IRS)",
  "Jobs",
  "Judiciary",
  "Labor",
  "LGBT",
  "Postal",
  "Science and Technology",
  "Senior Citizens",
  "Small Business",
  "Social Services",
  "Social Security",
  "Tax",
  "Telecommunications",
  "Transportation",
  "Trade",
  "Veterans",
  "Women's Issues",
];

/// One slice of a breakdown chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCount {
  pub name:  String,
  pub value: u64,
}

// ─── Tallies ─────────────────────────────────────────────────────────────────

/// Count occurrences of each key and keep the `limit` most frequent.
///
/// Absent or empty keys count as [`UNCATEGORIZED`]. Ties keep the order in
/// which keys were first seen.
pub fn tally<'a, I>(keys: I, limit: usize) -> Vec<TopicCount>
where
  I: IntoIterator<Item = Option<&'a str>>,
{
  let mut counts: Vec<TopicCount> = Vec::new();
  let mut index: HashMap<&'a str, usize> = HashMap::new();

  for key in keys {
    let key = key.filter(|k| !k.is_empty()).unwrap_or(UNCATEGORIZED);
    match index.get(key) {
      Some(&i) => counts[i].value += 1,
      None => {
        index.insert(key, counts.len());
        counts.push(TopicCount { name: key.to_owned(), value: 1 });
      }
    }
  }

  // `sort_by` is stable, which is what keeps ties in first-seen order.
  counts.sort_by(|a, b| b.value.cmp(&a.value));
  counts.truncate(limit);
  counts
}

/// Tally records by their free-form subject line.
pub fn tally_subjects(records: &[Inquiry], limit: usize) -> Vec<TopicCount> {
  tally(records.iter().map(|r| Some(r.subject.as_str())), limit)
}

/// Tally records by classification topic. Each topic of a multi-topic record
/// counts once; a record without topics counts as [`UNCATEGORIZED`].
pub fn tally_topics(records: &[Inquiry], limit: usize) -> Vec<TopicCount> {
  let keys = records.iter().flat_map(|r| {
    let topics: Vec<Option<&str>> = if r.topics.is_empty() {
      vec![None]
    } else {
      r.topics.iter().map(|t| Some(t.as_str())).collect()
    };
    topics
  });
  tally(keys, limit)
}

/// Whole-number share of each slice relative to the slices shown.
pub fn percentages(counts: &[TopicCount]) -> Vec<u32> {
  let total: u64 = counts.iter().map(|c| c.value).sum();
  counts
    .iter()
    .map(|c| {
      if total == 0 {
        0
      } else {
        ((c.value as f64 / total as f64) * 100.0).round() as u32
      }
    })
    .collect()
}

// ─── Filtering ───────────────────────────────────────────────────────────────

/// Every distinct non-empty topic across `records`, in first-seen order.
pub fn unique_topics(records: &[Inquiry]) -> Vec<String> {
  let mut seen = HashSet::new();
  records
    .iter()
    .flat_map(|r| r.topics.iter())
    .filter(|t| !t.is_empty())
    .filter(|t| seen.insert(t.as_str()))
    .cloned()
    .collect()
}

/// True when `selected` is empty or shares at least one topic with `record`.
pub fn matches_any_topic(record: &Inquiry, selected: &[String]) -> bool {
  selected.is_empty() || record.topics.iter().any(|t| selected.contains(t))
}
