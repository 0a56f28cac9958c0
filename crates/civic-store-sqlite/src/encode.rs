//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (microseconds, `Z`
//! suffix) so that lexical order is chronological order. Topics and bills are
//! stored as compact JSON.

use chrono::{DateTime, SecondsFormat, Utc};
use civic_core::inquiry::{Inquiry, InquiryId, RelevantBills};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Micros, true) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── JSON columns ────────────────────────────────────────────────────────────

pub fn encode_topics(topics: &[String]) -> Result<String> { Ok(serde_json::to_string(topics)?) }

pub fn decode_topics(s: &str) -> Result<Vec<String>> { Ok(serde_json::from_str(s)?) }

pub fn encode_bills(bills: Option<&RelevantBills>) -> Result<Option<String>> {
  bills.map(|b| serde_json::to_string(b)).transpose().map_err(Error::from)
}

pub fn decode_bills(s: Option<&str>) -> Result<Option<RelevantBills>> {
  s.map(serde_json::from_str::<RelevantBills>).transpose().map_err(Error::from)
}

// ─── Raw row type ────────────────────────────────────────────────────────────

/// An `emails` row as read straight out of SQLite, before decoding.
pub struct RawInquiry {
  pub id:                                String,
  pub name:                              String,
  pub address:                           String,
  pub city:                              String,
  pub state:                             String,
  pub zip:                               String,
  pub phone:                             Option<i64>,
  pub subject:                           String,
  pub message:                           String,
  pub created_at:                        String,
  pub topics:                            String,
  pub sentiment:                         Option<f64>,
  pub relevant_bills:                    Option<String>,
  pub needs_processing:                  Option<bool>,
  pub needs_manual_topic_classification: Option<bool>,
}

impl RawInquiry {
  /// Read a row selected with [`COLUMNS`](crate::schema::COLUMNS).
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                                row.get(0)?,
      name:                              row.get(1)?,
      address:                           row.get(2)?,
      city:                              row.get(3)?,
      state:                             row.get(4)?,
      zip:                               row.get(5)?,
      phone:                             row.get(6)?,
      subject:                           row.get(7)?,
      message:                           row.get(8)?,
      created_at:                        row.get(9)?,
      topics:                            row.get(10)?,
      sentiment:                         row.get(11)?,
      relevant_bills:                    row.get(12)?,
      needs_processing:                  row.get(13)?,
      needs_manual_topic_classification: row.get(14)?,
    })
  }

  pub fn into_inquiry(self) -> Result<Inquiry> {
    Ok(Inquiry {
      id:                                InquiryId::new(self.id),
      name:                              self.name,
      address:                           self.address,
      city:                              self.city,
      state:                             self.state,
      zip:                               self.zip,
      phone:                             self.phone,
      subject:                           self.subject,
      message:                           self.message,
      created_at:                        decode_dt(&self.created_at)?,
      topics:                            decode_topics(&self.topics)?,
      sentiment:                         self.sentiment,
      relevant_bills:                    decode_bills(self.relevant_bills.as_deref())?,
      needs_processing:                  self.needs_processing,
      needs_manual_topic_classification: self.needs_manual_topic_classification,
    })
  }
}
