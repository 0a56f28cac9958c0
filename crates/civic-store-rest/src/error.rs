//! Error type for `civic-store-rest`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("table endpoint returned {status}: {body}")]
  Status { status: StatusCode, body: String },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("insert returned no rows")]
  EmptyInsert,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
