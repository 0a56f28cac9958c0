//! Handler for `GET /states/tallies`.

use std::{collections::BTreeMap, sync::Arc};

use axum::{Json, extract::State};
use civic_core::{states::tally_states, store::InquiryStore};

use crate::error::ApiError;

/// `GET /states/tallies`: inquiry count per two-letter state code.
pub async fn tallies<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<BTreeMap<&'static str, u64>>, ApiError>
where
  S: InquiryStore,
{
  let states = store.list_states().await.map_err(ApiError::store)?;
  Ok(Json(tally_states(states.iter().map(String::as_str))))
}
