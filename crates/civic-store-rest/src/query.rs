//! PostgREST query-string construction.
//!
//! Filters are expressed as `column=op.value` pairs; ordering and projection
//! use the reserved `order` and `select` keys.

use chrono::SecondsFormat;
use civic_core::{inquiry::InquiryId, store::InquiryQuery};

pub type Params = Vec<(&'static str, String)>;

/// Newest-first selection of whole rows, narrowed by `query`.
pub fn list_params(query: &InquiryQuery) -> Params {
  let mut params: Params = vec![
    ("select", "*".to_owned()),
    ("order", "created_at.desc".to_owned()),
  ];
  if let Some(since) = query.since {
    params.push((
      "created_at",
      format!("gte.{}", since.to_rfc3339_opts(SecondsFormat::Micros, true)),
    ));
  }
  if let Some(subject) = &query.subject {
    params.push(("subject", format!("eq.{subject}")));
  }
  if let Some(limit) = query.limit {
    params.push(("limit", limit.to_string()));
  }
  params
}

pub fn get_params(id: &InquiryId) -> Params {
  vec![("select", "*".to_owned()), ("id", format!("eq.{id}"))]
}

pub fn states_params() -> Params { vec![("select", "state".to_owned())] }
