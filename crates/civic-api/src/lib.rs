//! JSON REST API for the Civic inquiry desk.
//!
//! Exposes an axum [`Router`] backed by any [`civic_core::store::InquiryStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", civic_api::api_router(store.clone()))
//! ```

pub mod dashboard;
pub mod error;
pub mod inquiries;
pub mod states;
pub mod topics;

use std::sync::Arc;

use axum::{Router, routing::get};
use civic_core::store::InquiryStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: InquiryStore + 'static,
{
  Router::new()
    // Inquiries
    .route("/inquiries", get(inquiries::list::<S>).post(inquiries::create::<S>))
    .route("/inquiries/{id}", get(inquiries::get_one::<S>))
    // Read models
    .route("/dashboard", get(dashboard::handler::<S>))
    .route("/topics", get(topics::list::<S>))
    .route("/topics/vocabulary", get(topics::vocabulary))
    .route("/states/tallies", get(states::tallies::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests;
