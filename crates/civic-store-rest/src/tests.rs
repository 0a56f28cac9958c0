//! Store tests against a stand-in table endpoint served on a local port.

use std::sync::{Arc, Mutex};

use axum::{
  Json, Router,
  extract::Query,
  http::{HeaderMap, StatusCode},
  routing::get,
};
use chrono::{TimeZone, Utc};
use civic_core::{
  inquiry::{InquiryId, NewInquiry},
  store::{InquiryQuery, InquiryStore},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use crate::{Error, RestConfig, RestStore};

const TABLE_PATH: &str = "/rest/v1/Emails";

/// Serve `app` on an ephemeral port and return a store pointed at it.
async fn serve(app: Router) -> RestStore {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
  RestStore::new(RestConfig {
    base_url: format!("http://{addr}"),
    api_key:  "anon-key".into(),
    table:    "Emails".into(),
  })
  .unwrap()
}

fn new_inquiry() -> NewInquiry {
  NewInquiry {
    name: "Jane Doe".into(),
    address: "12 Main St".into(),
    city: "Erie".into(),
    state: "PA".into(),
    zip: "16501".into(),
    phone: Some(8145550101),
    subject: "Rent".into(),
    message: "Please help.".into(),
    created_at: Utc.with_ymd_and_hms(2024, 11, 5, 12, 0, 0).unwrap(),
    topics: vec!["Housing".into()],
    sentiment: None,
    relevant_bills: None,
    needs_processing: Some(false),
    needs_manual_topic_classification: Some(false),
  }
}

/// What the stand-in endpoint saw on its last request.
#[derive(Default)]
struct Seen {
  params:  Vec<(String, String)>,
  apikey:  Option<String>,
  prefer:  Option<String>,
  payload: Option<Value>,
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
  headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned)
}

#[tokio::test]
async fn list_decodes_rows_and_sends_filters() {
  let seen = Arc::new(Mutex::new(Seen::default()));
  let app = Router::new().route(
    TABLE_PATH,
    get({
      let seen = seen.clone();
      move |Query(params): Query<Vec<(String, String)>>, headers: HeaderMap| {
        let seen = seen.clone();
        async move {
          let mut seen = seen.lock().unwrap();
          seen.params = params;
          seen.apikey = header(&headers, "apikey");
          Json(json!([
            {
              "id": 7,
              "name": "Ada Lovelace",
              "state": "PA",
              "subject": "Transit",
              "created_at": "2024-11-05T14:00:00+00:00",
              "topics": ["Transportation"],
            }
          ]))
        }
      }
    }),
  );
  let store = serve(app).await;

  let query = InquiryQuery { subject: Some("Transit".into()), ..InquiryQuery::default() };
  let rows = store.list(&query).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].id, InquiryId::new("7"));
  assert_eq!(rows[0].topics, vec!["Transportation"]);

  let seen = seen.lock().unwrap();
  assert_eq!(seen.apikey.as_deref(), Some("anon-key"));
  assert!(seen.params.contains(&("order".into(), "created_at.desc".into())));
  assert!(seen.params.contains(&("subject".into(), "eq.Transit".into())));
}

#[tokio::test]
async fn rejected_request_keeps_status_and_body() {
  let app = Router::new().route(
    TABLE_PATH,
    get(|| async { (StatusCode::UNAUTHORIZED, r#"{"message":"Invalid API key"}"#) }),
  );
  let store = serve(app).await;

  let err = store.list_states().await.unwrap_err();
  match err {
    Error::Status { status, body } => {
      assert_eq!(status.as_u16(), 401);
      assert!(body.contains("Invalid API key"));
    }
    other => panic!("expected a status error, got {other:?}"),
  }
}

#[tokio::test]
async fn insert_asks_for_the_stored_row() {
  let seen = Arc::new(Mutex::new(Seen::default()));
  let app = Router::new().route(
    TABLE_PATH,
    axum::routing::post({
      let seen = seen.clone();
      move |headers: HeaderMap, Json(payload): Json<Value>| {
        let seen = seen.clone();
        async move {
          let mut row = payload[0].clone();
          row["id"] = json!(99);
          let mut seen = seen.lock().unwrap();
          seen.prefer = header(&headers, "prefer");
          seen.payload = Some(payload);
          (StatusCode::CREATED, Json(json!([row])))
        }
      }
    }),
  );
  let store = serve(app).await;

  let input = new_inquiry();
  let stored = store.insert(input.clone()).await.unwrap();
  assert_eq!(stored.id, InquiryId::new("99"));
  assert_eq!(stored.subject, input.subject);
  assert_eq!(stored.phone, input.phone);
  assert_eq!(stored.created_at, input.created_at);

  let seen = seen.lock().unwrap();
  assert_eq!(seen.prefer.as_deref(), Some("return=representation"));
  let payload = seen.payload.as_ref().unwrap();
  assert_eq!(payload.as_array().map(Vec::len), Some(1));
  assert_eq!(payload[0]["subject"], "Rent");
}

#[tokio::test]
async fn insert_without_returned_row_is_an_error() {
  let app = Router::new().route(
    TABLE_PATH,
    axum::routing::post(|| async { (StatusCode::CREATED, Json(json!([]))) }),
  );
  let store = serve(app).await;

  let err = store.insert(new_inquiry()).await.unwrap_err();
  assert!(matches!(err, Error::EmptyInsert), "{err:?}");
}

#[tokio::test]
async fn get_and_states_read_rows() {
  let app = Router::new().route(
    TABLE_PATH,
    get(|Query(params): Query<Vec<(String, String)>>| async move {
      let select = params
        .iter()
        .find(|(k, _)| k == "select")
        .map(|(_, v)| v.as_str());
      if select == Some("state") {
        Json(json!([{ "state": "PA" }, { "state": null }, { "state": "NY" }]))
      } else {
        Json(json!([]))
      }
    }),
  );
  let store = serve(app).await;

  assert_eq!(store.get(&InquiryId::new("missing")).await.unwrap(), None);
  assert_eq!(store.list_states().await.unwrap(), vec!["PA", "NY"]);
}
