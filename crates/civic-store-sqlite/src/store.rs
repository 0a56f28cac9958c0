//! [`SqliteStore`]: the SQLite implementation of [`InquiryStore`].

use std::path::Path;

use chrono::SubsecRound as _;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use civic_core::{
  inquiry::{Inquiry, InquiryId, NewInquiry},
  store::{InquiryQuery, InquiryStore},
};

use crate::{
  Result,
  encode::{RawInquiry, encode_bills, encode_dt, encode_topics},
  schema::{COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An inquiry table backed by a single SQLite file. Clones share one
/// connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open the file at `path`, creating it and the `emails` table if needed.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open a private in-memory database.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── InquiryStore impl ───────────────────────────────────────────────────────

impl InquiryStore for SqliteStore {
  type Error = crate::Error;

  async fn insert(&self, mut input: NewInquiry) -> Result<Inquiry> {
    // Stored timestamps carry microseconds; match that in the returned record.
    input.created_at = input.created_at.trunc_subsecs(6);
    let inquiry = Inquiry::from_new(InquiryId::new(Uuid::new_v4().hyphenated().to_string()), input);

    let id_str         = inquiry.id.to_string();
    let name           = inquiry.name.clone();
    let address        = inquiry.address.clone();
    let city           = inquiry.city.clone();
    let state          = inquiry.state.clone();
    let zip            = inquiry.zip.clone();
    let phone          = inquiry.phone;
    let subject        = inquiry.subject.clone();
    let message        = inquiry.message.clone();
    let created_at_str = encode_dt(inquiry.created_at);
    let topics_str     = encode_topics(&inquiry.topics)?;
    let sentiment      = inquiry.sentiment;
    let bills_str      = encode_bills(inquiry.relevant_bills.as_ref())?;
    let needs_proc     = inquiry.needs_processing;
    let needs_manual   = inquiry.needs_manual_topic_classification;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO emails (
             id, name, address, city, state, zip, phone, subject, message,
             created_at, topics, sentiment, relevant_bills,
             needs_processing, needs_manual_topic_classification
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
          rusqlite::params![
            id_str,
            name,
            address,
            city,
            state,
            zip,
            phone,
            subject,
            message,
            created_at_str,
            topics_str,
            sentiment,
            bills_str,
            needs_proc,
            needs_manual,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(id = %inquiry.id, "inserted inquiry");
    Ok(inquiry)
  }

  async fn get(&self, id: &InquiryId) -> Result<Option<Inquiry>> {
    let id_str = id.to_string();

    let raw: Option<RawInquiry> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {COLUMNS} FROM emails WHERE id = ?1"),
              rusqlite::params![id_str],
              RawInquiry::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawInquiry::into_inquiry).transpose()
  }

  async fn list(&self, query: &InquiryQuery) -> Result<Vec<Inquiry>> {
    let since_str = query.since.map(encode_dt);
    let subject   = query.subject.clone();
    // SQLite treats a negative LIMIT as "no limit".
    let limit_val = query.limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));

    let raws: Vec<RawInquiry> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {COLUMNS}
           FROM emails
           WHERE (?1 IS NULL OR created_at >= ?1)
             AND (?2 IS NULL OR subject = ?2)
           ORDER BY created_at DESC
           LIMIT ?3"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![since_str.as_deref(), subject.as_deref(), limit_val],
            RawInquiry::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawInquiry::into_inquiry).collect()
  }

  async fn list_states(&self) -> Result<Vec<String>> {
    let states = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT state FROM emails")?;
        let rows = stmt
          .query_map([], |row| row.get::<_, String>(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(states)
  }
}
