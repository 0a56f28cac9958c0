//! Handlers for `/inquiries` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/inquiries` | Optional `?window=today\|week\|month`, `topics=a,b`, `subject=s` |
//! | `POST` | `/inquiries` | Body: [`ContactForm`]; returns 201 + stored record |
//! | `GET`  | `/inquiries/{id}` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use civic_core::{
  form::ContactForm,
  inquiry::{Inquiry, InquiryId},
  store::{InquiryQuery, InquiryStore},
  topic::matches_any_topic,
  window::TimeWindow,
};
use serde::Deserialize;

use crate::error::ApiError;

/// Split a comma-separated query value, dropping blank entries.
pub fn split_list(value: Option<&str>) -> Vec<String> {
  value
    .map(|s| {
      s.split(',')
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
        .collect()
    })
    .unwrap_or_default()
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// `today`, `week`, `month` or `all`. Absent means all.
  pub window:  Option<String>,
  /// Comma-separated topics; a record matches if it carries any of them.
  pub topics:  Option<String>,
  /// Exact subject line.
  pub subject: Option<String>,
}

/// `GET /inquiries[?window=...][&topics=...][&subject=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Inquiry>>, ApiError>
where
  S: InquiryStore,
{
  let window: TimeWindow = params.window.as_deref().unwrap_or_default().parse()?;
  let selected = split_list(params.topics.as_deref());

  let query = InquiryQuery {
    subject: params.subject.filter(|s| !s.is_empty()),
    ..InquiryQuery::within(window, Utc::now())
  };

  let mut records = store.list(&query).await.map_err(ApiError::store)?;
  records.retain(|r| matches_any_topic(r, &selected));
  Ok(Json(records))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /inquiries`: returns 201 + the stored [`Inquiry`]. A body that is
/// not a [`ContactForm`] is a 400 like any other bad submission.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  payload: Result<Json<ContactForm>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InquiryStore,
{
  let Json(form) = payload?;
  form.validate()?;
  let inquiry = store
    .insert(form.into_new_inquiry(Utc::now()))
    .await
    .map_err(ApiError::store)?;
  tracing::info!(id = %inquiry.id, subject = %inquiry.subject, "inquiry submitted");
  Ok((StatusCode::CREATED, Json(inquiry)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /inquiries/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Inquiry>, ApiError>
where
  S: InquiryStore,
{
  let id = InquiryId::new(id);
  let inquiry = store
    .get(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("inquiry {id}")))?;
  Ok(Json(inquiry))
}
