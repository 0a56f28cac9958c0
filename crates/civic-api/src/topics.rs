//! Handlers for `/topics` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/topics` | Topics present on stored records, first-seen order |
//! | `GET`  | `/topics/vocabulary` | The fixed list offered by the contact form |

use std::sync::Arc;

use axum::{Json, extract::State};
use civic_core::{
  store::{InquiryQuery, InquiryStore},
  topic::{TOPICS, unique_topics},
};

use crate::error::ApiError;

/// `GET /topics`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<String>>, ApiError>
where
  S: InquiryStore,
{
  let records = store
    .list(&InquiryQuery::default())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(unique_topics(&records)))
}

/// `GET /topics/vocabulary`
pub async fn vocabulary() -> Json<&'static [&'static str]> { Json(TOPICS) }
