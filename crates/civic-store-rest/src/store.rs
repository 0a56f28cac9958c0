//! [`RestStore`]: the hosted-table implementation of [`InquiryStore`].

use std::time::Duration;

use civic_core::{
  inquiry::{Inquiry, InquiryId, NewInquiry},
  store::{InquiryQuery, InquiryStore},
};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
  Error, Result,
  query::{Params, get_params, list_params, states_params},
};

/// Connection settings for the hosted table.
#[derive(Debug, Clone)]
pub struct RestConfig {
  /// Project URL, e.g. `https://abc.supabase.co`.
  pub base_url: String,
  pub api_key:  String,
  /// Table name. Defaults to `Emails` in the server configuration.
  pub table:    String,
}

/// Inquiry table reached over HTTP.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct RestStore {
  client: Client,
  config: RestConfig,
}

impl RestStore {
  pub fn new(config: RestConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }

  fn url(&self) -> String {
    format!(
      "{}/rest/v1/{}",
      self.config.base_url.trim_end_matches('/'),
      self.config.table
    )
  }

  fn auth(&self, req: RequestBuilder) -> RequestBuilder {
    req
      .header("apikey", &self.config.api_key)
      .bearer_auth(&self.config.api_key)
  }

  async fn select<T: DeserializeOwned>(&self, params: &Params) -> Result<Vec<T>> {
    let resp = self
      .auth(self.client.get(self.url()))
      .query(params)
      .send()
      .await?;
    read_rows(resp).await
  }
}

/// Decode a JSON array body, or turn a non-success status into
/// [`Error::Status`].
async fn read_rows<T: DeserializeOwned>(resp: Response) -> Result<Vec<T>> {
  let status = resp.status();
  if !status.is_success() {
    let body = resp.text().await.unwrap_or_default();
    return Err(Error::Status { status, body });
  }
  let bytes = resp.bytes().await?;
  Ok(serde_json::from_slice(&bytes)?)
}

#[derive(Deserialize)]
struct StateRow {
  #[serde(default)]
  state: Option<String>,
}

// ─── InquiryStore impl ───────────────────────────────────────────────────────

impl InquiryStore for RestStore {
  type Error = Error;

  async fn insert(&self, input: NewInquiry) -> Result<Inquiry> {
    let resp = self
      .auth(self.client.post(self.url()))
      .header("Prefer", "return=representation")
      .json(&[&input])
      .send()
      .await?;

    let inquiry = read_rows::<Inquiry>(resp)
      .await?
      .into_iter()
      .next()
      .ok_or(Error::EmptyInsert)?;

    tracing::debug!(id = %inquiry.id, "inserted inquiry");
    Ok(inquiry)
  }

  async fn get(&self, id: &InquiryId) -> Result<Option<Inquiry>> {
    let rows: Vec<Inquiry> = self.select(&get_params(id)).await?;
    Ok(rows.into_iter().next())
  }

  async fn list(&self, query: &InquiryQuery) -> Result<Vec<Inquiry>> {
    self.select(&list_params(query)).await
  }

  async fn list_states(&self) -> Result<Vec<String>> {
    let rows: Vec<StateRow> = self.select(&states_params()).await?;
    Ok(rows.into_iter().filter_map(|r| r.state).collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn store(base_url: &str) -> RestStore {
    RestStore::new(RestConfig {
      base_url: base_url.into(),
      api_key:  "anon-key".into(),
      table:    "Emails".into(),
    })
    .unwrap()
  }

  #[test]
  fn url_joins_base_and_table() {
    assert_eq!(store("https://x.example.co").url(), "https://x.example.co/rest/v1/Emails");
    assert_eq!(store("https://x.example.co/").url(), "https://x.example.co/rest/v1/Emails");
  }

  #[test]
  fn requests_carry_both_key_headers() {
    let s = store("https://x.example.co");
    let req = s.auth(s.client.get(s.url())).build().unwrap();
    assert_eq!(req.headers()["apikey"], "anon-key");
    assert_eq!(req.headers()["authorization"], "Bearer anon-key");
  }

  #[tokio::test]
  async fn unreachable_endpoint_is_an_http_error() {
    // Port 9 (discard) on localhost is closed in test environments.
    let s = store("http://127.0.0.1:9");
    let err = s.list(&InquiryQuery::default()).await.unwrap_err();
    assert!(matches!(err, Error::Http(_)), "{err:?}");
  }

  #[test]
  fn state_rows_skip_nulls() {
    let rows: Vec<StateRow> =
      serde_json::from_str(r#"[{"state":"PA"},{"state":null},{}]"#).unwrap();
    let states: Vec<_> = rows.into_iter().filter_map(|r| r.state).collect();
    assert_eq!(states, vec!["PA"]);
  }
}
