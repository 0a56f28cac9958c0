//! Runtime choice between the embedded and the hosted inquiry table.

use civic_core::{
  inquiry::{Inquiry, InquiryId, NewInquiry},
  store::{InquiryQuery, InquiryStore},
};
use civic_store_rest::{RestConfig, RestStore};
use civic_store_sqlite::SqliteStore;
use thiserror::Error;

use crate::{ServerConfig, error::Error};

#[derive(Debug, Error)]
pub enum BackendError {
  #[error(transparent)]
  Sqlite(#[from] civic_store_sqlite::Error),
  #[error(transparent)]
  Rest(#[from] civic_store_rest::Error),
}

/// The store selected by configuration.
#[derive(Clone)]
pub enum Backend {
  Sqlite(SqliteStore),
  Rest(RestStore),
}

impl Backend {
  /// A `database_url` selects the hosted table; otherwise the SQLite file at
  /// `store_path` is opened (and created if missing).
  pub async fn from_config(config: &ServerConfig) -> Result<Self, Error> {
    match &config.database_url {
      Some(url) if !url.trim().is_empty() => {
        let api_key = config
          .database_key
          .clone()
          .filter(|k| !k.trim().is_empty())
          .ok_or_else(|| Error::Config("database_url is set but database_key is not".into()))?;
        let store = RestStore::new(RestConfig {
          base_url: url.clone(),
          api_key,
          table: config.table.clone(),
        })
        .map_err(BackendError::from)?;
        tracing::info!(url = %url, table = %config.table, "using hosted inquiry table");
        Ok(Self::Rest(store))
      }
      _ => {
        let store = SqliteStore::open(&config.store_path)
          .await
          .map_err(BackendError::from)?;
        tracing::info!(path = %config.store_path.display(), "using sqlite inquiry table");
        Ok(Self::Sqlite(store))
      }
    }
  }
}

impl InquiryStore for Backend {
  type Error = BackendError;

  async fn insert(&self, input: NewInquiry) -> Result<Inquiry, BackendError> {
    match self {
      Self::Sqlite(s) => Ok(s.insert(input).await?),
      Self::Rest(s) => Ok(s.insert(input).await?),
    }
  }

  async fn get(&self, id: &InquiryId) -> Result<Option<Inquiry>, BackendError> {
    match self {
      Self::Sqlite(s) => Ok(s.get(id).await?),
      Self::Rest(s) => Ok(s.get(id).await?),
    }
  }

  async fn list(&self, query: &InquiryQuery) -> Result<Vec<Inquiry>, BackendError> {
    match self {
      Self::Sqlite(s) => Ok(s.list(query).await?),
      Self::Rest(s) => Ok(s.list(query).await?),
    }
  }

  async fn list_states(&self) -> Result<Vec<String>, BackendError> {
    match self {
      Self::Sqlite(s) => Ok(s.list_states().await?),
      Self::Rest(s) => Ok(s.list_states().await?),
    }
  }
}
