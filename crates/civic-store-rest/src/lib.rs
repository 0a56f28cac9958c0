//! Hosted-table backend for the Civic inquiry table.
//!
//! Talks to a PostgREST-style endpoint (`{base}/rest/v1/{table}`)
//! authenticated with a project access key.

mod query;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{RestConfig, RestStore};

#[cfg(test)]
mod tests;
