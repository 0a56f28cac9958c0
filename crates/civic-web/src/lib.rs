//! Web front end for the Civic inquiry desk.
//!
//! Serves the public contact form, the internal triage pages (dashboard,
//! inquiry center, state map) and the JSON API, all backed by any
//! [`InquiryStore`].

pub mod auth;
pub mod error;
pub mod geo;
pub mod pages;
pub mod store;

pub use error::{Error, Result};

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{Router, middleware, routing::get};
use civic_core::store::InquiryStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::AuthConfig;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CIVIC_*` environment variables.
#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  /// SQLite file used when no `database_url` is configured.
  pub store_path:           PathBuf,
  /// Hosted table endpoint. Selects the REST store when set.
  pub database_url:         Option<String>,
  pub database_key:         Option<String>,
  pub table:                String,
  /// Public token handed to the map renderer in the browser.
  pub mapbox_token:         String,
  pub states_geojson_url:   String,
  pub counties_geojson_url: String,
  pub auth_username:        String,
  pub auth_password_hash:   String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                 "127.0.0.1".into(),
      port:                 3000,
      store_path:           PathBuf::from("civic.db"),
      database_url:         None,
      database_key:         None,
      table:                "Emails".into(),
      mapbox_token:         String::new(),
      states_geojson_url:   geo::STATES_URL.into(),
      counties_geojson_url: geo::COUNTIES_URL.into(),
      auth_username:        String::new(),
      auth_password_hash:   String::new(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
  pub auth:   Arc<AuthConfig>,
  /// Client for the boundary GeoJSON fetches.
  pub http:   reqwest::Client,
}

impl<S: InquiryStore> AppState<S> {
  pub fn new(store: S, config: ServerConfig) -> Result<Self> {
    let http = reqwest::Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    let auth = AuthConfig {
      username:      config.auth_username.clone(),
      password_hash: config.auth_password_hash.clone(),
    };
    Ok(Self {
      store: Arc::new(store),
      config: Arc::new(config),
      auth: Arc::new(auth),
      http,
    })
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application [`Router`].
///
/// The home page, contact form and API submissions are public; everything
/// else sits behind basic auth when credentials are configured.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: InquiryStore + Clone + 'static,
{
  let internal = Router::new()
    .route("/dashboard", get(pages::dashboard::handler::<S>))
    .route("/inquiries", get(pages::inquiries::handler::<S>))
    .route("/map", get(pages::map::handler::<S>))
    .route("/map/states.geojson", get(geo::states::<S>))
    .route("/map/counties.geojson", get(geo::counties::<S>))
    .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth::<S>));

  let api = Router::new()
    .nest_service("/api", civic_api::api_router(state.store.clone()))
    .route_layer(middleware::from_fn_with_state(
      state.clone(),
      auth::require_auth_for_reads::<S>,
    ));

  Router::new()
    .route("/", get(pages::home::handler))
    .route("/contact", get(pages::contact::form).post(pages::contact::submit::<S>))
    .merge(internal)
    .merge(api)
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
