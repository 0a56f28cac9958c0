//! HTTP Basic-auth middleware and standalone verifier.

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use axum::{
  extract::{Request, State},
  http::{HeaderMap, Method},
  middleware::Next,
  response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use rand_core::OsRng;

use crate::{AppState, error::Error};

/// Credentials accepted as valid for this server instance.
#[derive(Clone, Default)]
pub struct AuthConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

impl AuthConfig {
  /// Auth is only enforced when both halves are configured.
  pub fn enabled(&self) -> bool {
    !self.username.is_empty() && !self.password_hash.is_empty()
  }
}

/// PHC string for `password` with a fresh random salt, suitable for
/// `auth_password_hash`.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
  let salt = SaltString::generate(&mut OsRng);
  Ok(Argon2::default().hash_password(password.as_bytes(), &salt)?.to_string())
}

/// Verify credentials directly from headers.
pub fn verify_auth(headers: &HeaderMap, config: &AuthConfig) -> Result<(), Error> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(Error::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(Error::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| Error::Unauthorized)?;
  let creds = std::str::from_utf8(&decoded).map_err(|_| Error::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(Error::Unauthorized)?;

  if username != config.username {
    return Err(Error::Unauthorized);
  }

  let parsed_hash = PasswordHash::new(&config.password_hash).map_err(|_| Error::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| Error::Unauthorized)?;

  Ok(())
}

/// Middleware guarding the internal routes.
pub async fn require_auth<S>(
  State(state): State<AppState<S>>,
  req: Request,
  next: Next,
) -> Response
where
  S: Clone + Send + Sync + 'static,
{
  if !state.auth.enabled() {
    return next.run(req).await;
  }
  match verify_auth(req.headers(), &state.auth) {
    Ok(()) => next.run(req).await,
    Err(e) => {
      tracing::warn!(path = %req.uri().path(), "rejected unauthenticated request");
      e.into_response()
    }
  }
}

/// Guard for the JSON API mount. Submissions (`POST`) are as open as the
/// contact form; every read requires credentials.
pub async fn require_auth_for_reads<S>(
  state: State<AppState<S>>,
  req: Request,
  next: Next,
) -> Response
where
  S: Clone + Send + Sync + 'static,
{
  if req.method() == Method::POST {
    return next.run(req).await;
  }
  require_auth(state, req, next).await
}
