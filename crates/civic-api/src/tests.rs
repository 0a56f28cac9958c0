//! Router tests driven through `tower::ServiceExt::oneshot` against an
//! in-memory SQLite store.

use std::sync::Arc;

use axum::{
  Router,
  body::{Body, to_bytes},
  http::{Request, StatusCode, header},
};
use chrono::{TimeDelta, Utc};
use civic_core::{
  dashboard::DashboardSummary,
  form::ContactForm,
  inquiry::Inquiry,
  store::InquiryStore,
};
use civic_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

async fn setup() -> (Arc<SqliteStore>, Router) {
  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
  let router = api_router(store.clone());
  (store, router)
}

fn form(subject: &str, topics: &[&str]) -> ContactForm {
  ContactForm {
    first_name: "Jane".into(),
    last_name: "Doe".into(),
    street_address: "12 Main St".into(),
    city: "Erie".into(),
    state: "Pennsylvania".into(),
    zip: "16501".into(),
    phone: "(814) 555-0101".into(),
    email: "jane@example.com".into(),
    subject: subject.into(),
    topics: topics.iter().map(|t| t.to_string()).collect(),
    message: "Hello".into(),
    ..ContactForm::default()
  }
}

async fn seed(store: &SqliteStore, subject: &str, topics: &[&str], age: TimeDelta) -> Inquiry {
  store
    .insert(form(subject, topics).into_new_inquiry(Utc::now() - age))
    .await
    .unwrap()
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
  let resp = router
    .oneshot(Request::get(uri).body(Body::empty()).unwrap())
    .await
    .unwrap();
  let status = resp.status();
  let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
  let resp = router
    .oneshot(
      Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap(),
    )
    .await
    .unwrap();
  let status = resp.status();
  let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  (status, serde_json::from_slice(&bytes).unwrap())
}

// ─── Inquiries ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_shapes_and_stores() {
  let (store, router) = setup().await;

  let body = serde_json::to_value(form("Rent", &["Housing"])).unwrap();
  let (status, json) = post_json(router, "/inquiries", body).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(json["name"], "Jane Doe");
  assert_eq!(json["state"], "PA");
  assert_eq!(json["phone"], 8145550101_i64);
  assert_eq!(json["needs_processing"], false);

  let stored: Inquiry = serde_json::from_value(json).unwrap();
  assert_eq!(store.get(&stored.id).await.unwrap(), Some(stored));
}

#[tokio::test]
async fn create_without_subject_is_bad_request() {
  let (_store, router) = setup().await;
  let mut body = serde_json::to_value(form("", &[])).unwrap();
  body["subject"] = json!("   ");

  let (status, json) = post_json(router, "/inquiries", body).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(json["error"].as_str().unwrap().contains("subject"));
}

#[tokio::test]
async fn mistyped_body_is_json_bad_request() {
  let (store, router) = setup().await;
  let mut body = serde_json::to_value(form("Rent", &[])).unwrap();
  body["topics"] = json!("Housing");

  let (status, json) = post_json(router, "/inquiries", body).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(json["error"].as_str().unwrap().contains("topics"));
  assert!(store.list(&Default::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn unparseable_body_is_json_bad_request() {
  let (_store, router) = setup().await;
  let resp = router
    .oneshot(
      Request::post("/inquiries")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap(),
    )
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let json: Value = serde_json::from_slice(&bytes).unwrap();
  assert!(json["error"].as_str().unwrap().starts_with("bad request"));
}

#[tokio::test]
async fn get_one_and_missing() {
  let (store, router) = setup().await;
  let record = seed(&store, "Roads", &[], TimeDelta::zero()).await;

  let (status, json) = get(router.clone(), &format!("/inquiries/{}", record.id)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json["subject"], "Roads");

  let (status, json) = get(router, "/inquiries/does-not-exist").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(json["error"].is_string());
}

#[tokio::test]
async fn list_applies_window_and_topic_filters() {
  let (store, router) = setup().await;
  seed(&store, "old", &["Housing"], TimeDelta::days(20)).await;
  seed(&store, "recent-housing", &["Housing"], TimeDelta::days(2)).await;
  seed(&store, "recent-labor", &["Labor"], TimeDelta::hours(1)).await;

  let (_, all) = get(router.clone(), "/inquiries").await;
  assert_eq!(all.as_array().unwrap().len(), 3);
  assert_eq!(all[0]["subject"], "recent-labor");

  let (_, week) = get(router.clone(), "/inquiries?window=week").await;
  assert_eq!(week.as_array().unwrap().len(), 2);

  let (_, housing) = get(router.clone(), "/inquiries?window=month&topics=Housing").await;
  let subjects: Vec<_> = housing
    .as_array()
    .unwrap()
    .iter()
    .map(|r| r["subject"].as_str().unwrap())
    .collect();
  assert_eq!(subjects, vec!["recent-housing", "old"]);

  let (_, either) = get(router, "/inquiries?topics=Housing,Labor&subject=recent-labor").await;
  assert_eq!(either.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_window_is_bad_request() {
  let (_store, router) = setup().await;
  let (status, _) = get(router, "/inquiries?window=decade").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ─── Read models ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn dashboard_summarizes_table() {
  let (store, router) = setup().await;
  seed(&store, "A", &["Housing"], TimeDelta::hours(1)).await;
  seed(&store, "A", &[], TimeDelta::days(2)).await;
  seed(&store, "B", &["Housing"], TimeDelta::days(30)).await;

  let (status, json) = get(router, "/dashboard").await;
  assert_eq!(status, StatusCode::OK);
  let summary: DashboardSummary = serde_json::from_value(json).unwrap();
  assert_eq!(summary.total, 3);
  assert_eq!(summary.this_week, 2);
  assert_eq!(summary.subjects[0].name, "A");
  assert_eq!(summary.subjects[0].value, 2);
  assert_eq!(summary.topics[0].name, "Housing");
  assert_eq!(summary.recent.len(), 3);
  assert!(summary.error.is_none());
}

#[tokio::test]
async fn topics_and_vocabulary() {
  let (store, router) = setup().await;
  seed(&store, "x", &["Labor", "Housing"], TimeDelta::hours(2)).await;
  seed(&store, "y", &["Housing", "Energy"], TimeDelta::hours(1)).await;

  let (_, topics) = get(router.clone(), "/topics").await;
  assert_eq!(topics, json!(["Housing", "Energy", "Labor"]));

  let (_, vocab) = get(router, "/topics/vocabulary").await;
  assert_eq!(vocab.as_array().unwrap().len(), civic_core::topic::TOPICS.len());
}

#[tokio::test]
async fn state_tallies() {
  let (store, router) = setup().await;
  seed(&store, "a", &[], TimeDelta::zero()).await;
  let mut ny = form("b", &[]);
  ny.state = "ny".into();
  store.insert(ny.into_new_inquiry(Utc::now())).await.unwrap();

  let (status, json) = get(router, "/states/tallies").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, json!({ "NY": 1, "PA": 1 }));
}
