//! Handler for `GET /dashboard`.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::Utc;
use civic_core::{
  dashboard::DashboardSummary,
  store::{InquiryQuery, InquiryStore},
};

/// Load the whole table and reduce it to a [`DashboardSummary`].
///
/// Store failures are logged and reported inside the summary; this never
/// answers with an error status.
pub async fn summarize<S: InquiryStore>(store: &S) -> DashboardSummary {
  match store.list(&InquiryQuery::default()).await {
    Ok(records) => DashboardSummary::from_records(records, Utc::now()),
    Err(e) => {
      tracing::error!(error = %e, "failed to load dashboard records");
      DashboardSummary::failed("Failed to fetch inquiries")
    }
  }
}

/// `GET /dashboard`
pub async fn handler<S>(State(store): State<Arc<S>>) -> Json<DashboardSummary>
where
  S: InquiryStore,
{
  Json(summarize(store.as_ref()).await)
}
