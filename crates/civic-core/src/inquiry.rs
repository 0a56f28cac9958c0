//! The inquiry record: one row of the `Emails` table.
//!
//! Records are append-only. The enrichment columns (`topics`, `sentiment`,
//! `relevant_bills` and the workflow flags) are filled in by a process outside
//! this application; rows coming back from a hosted table may carry `null` in
//! any of them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ─── Identifier ──────────────────────────────────────────────────────────────

/// Opaque record identifier assigned by the persistence collaborator.
///
/// The SQLite store hands out UUID strings; hosted tables commonly use integer
/// keys. Both deserialize into the same string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct InquiryId(String);

impl InquiryId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for InquiryId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl<'de> Deserialize<'de> for InquiryId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
      Text(String),
      Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
      Raw::Text(s) => Self(s),
      Raw::Number(n) => Self(n.to_string()),
    })
  }
}

// ─── Relevant bills ──────────────────────────────────────────────────────────

/// Bills an inquiry was matched against. Older rows store a single string,
/// newer ones a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelevantBills {
  One(String),
  Many(Vec<String>),
}

impl RelevantBills {
  pub fn is_empty(&self) -> bool {
    match self {
      Self::One(s) => s.trim().is_empty(),
      Self::Many(v) => v.iter().all(|s| s.trim().is_empty()),
    }
  }

  /// Human-readable form: list entries joined with `", "`.
  pub fn joined(&self) -> String {
    match self {
      Self::One(s) => s.clone(),
      Self::Many(v) => v.join(", "),
    }
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A stored inquiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
  pub id:                                InquiryId,
  #[serde(default, deserialize_with = "null_as_default")]
  pub name:                              String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub address:                           String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub city:                              String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub state:                             String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub zip:                               String,
  #[serde(default, deserialize_with = "lenient_phone")]
  pub phone:                             Option<i64>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub subject:                           String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub message:                           String,
  pub created_at:                        DateTime<Utc>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub topics:                            Vec<String>,
  #[serde(default)]
  pub sentiment:                         Option<f64>,
  #[serde(default)]
  pub relevant_bills:                    Option<RelevantBills>,
  #[serde(default)]
  pub needs_processing:                  Option<bool>,
  #[serde(default)]
  pub needs_manual_topic_classification: Option<bool>,
}

impl Inquiry {
  /// Attach a store-assigned identifier to a freshly shaped submission.
  pub fn from_new(id: InquiryId, new: NewInquiry) -> Self {
    Self {
      id,
      name: new.name,
      address: new.address,
      city: new.city,
      state: new.state,
      zip: new.zip,
      phone: new.phone,
      subject: new.subject,
      message: new.message,
      created_at: new.created_at,
      topics: new.topics,
      sentiment: new.sentiment,
      relevant_bills: new.relevant_bills,
      needs_processing: new.needs_processing,
      needs_manual_topic_classification: new.needs_manual_topic_classification,
    }
  }

  /// Subject line with the placeholder used by list views.
  pub fn subject_or_placeholder(&self) -> &str {
    if self.subject.trim().is_empty() { "No Subject" } else { &self.subject }
  }

  pub fn needs_processing(&self) -> bool { self.needs_processing.unwrap_or(false) }
}

/// A shaped submission, ready to insert. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInquiry {
  pub name:                              String,
  pub address:                           String,
  pub city:                              String,
  pub state:                             String,
  pub zip:                               String,
  pub phone:                             Option<i64>,
  pub subject:                           String,
  pub message:                           String,
  pub created_at:                        DateTime<Utc>,
  pub topics:                            Vec<String>,
  pub sentiment:                         Option<f64>,
  pub relevant_bills:                    Option<RelevantBills>,
  pub needs_processing:                  Option<bool>,
  pub needs_manual_topic_classification: Option<bool>,
}

// ─── Serde helpers ───────────────────────────────────────────────────────────

/// Read an explicit `null` as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Hosted tables have stored phone numbers both as integers and as text.
fn lenient_phone<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Raw {
    Number(i64),
    Text(String),
  }

  Ok(match Option::<Raw>::deserialize(deserializer)? {
    Some(Raw::Number(n)) => Some(n),
    Some(Raw::Text(s)) => crate::form::normalize_phone(&s),
    None => None,
  })
}
