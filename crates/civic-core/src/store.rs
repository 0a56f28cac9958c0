//! The `InquiryStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (`civic-store-sqlite`,
//! `civic-store-rest`). Higher layers (`civic-api`, `civic-web`) depend on
//! this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  inquiry::{Inquiry, InquiryId, NewInquiry},
  window::TimeWindow,
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`InquiryStore::list`].
#[derive(Debug, Clone, Default)]
pub struct InquiryQuery {
  /// Inclusive lower bound on `created_at`.
  pub since:   Option<DateTime<Utc>>,
  /// Exact match on the subject line.
  pub subject: Option<String>,
  pub limit:   Option<usize>,
}

impl InquiryQuery {
  /// Everything inside `window` as of `now`.
  pub fn within(window: TimeWindow, now: DateTime<Utc>) -> Self {
    Self { since: window.cutoff(now), ..Self::default() }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the table that holds inquiry records.
///
/// Records are append-only: there is no update or delete. All methods return
/// `Send` futures so the trait can be used behind `axum`.
pub trait InquiryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a shaped submission and return it with its assigned id.
  fn insert(
    &self,
    input: NewInquiry,
  ) -> impl Future<Output = Result<Inquiry, Self::Error>> + Send + '_;

  /// Retrieve one record. Returns `None` if not found.
  fn get<'a>(
    &'a self,
    id: &'a InquiryId,
  ) -> impl Future<Output = Result<Option<Inquiry>, Self::Error>> + Send + 'a;

  /// Records matching `query`, newest `created_at` first.
  fn list<'a>(
    &'a self,
    query: &'a InquiryQuery,
  ) -> impl Future<Output = Result<Vec<Inquiry>, Self::Error>> + Send + 'a;

  /// The `state` column of every record, for the map tally.
  fn list_states(&self) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;
}
