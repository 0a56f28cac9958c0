//! SQL schema for the Civic SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Append-only. No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS emails (
    id                                TEXT PRIMARY KEY,
    name                              TEXT NOT NULL DEFAULT '',
    address                           TEXT NOT NULL DEFAULT '',
    city                              TEXT NOT NULL DEFAULT '',
    state                             TEXT NOT NULL DEFAULT '',
    zip                               TEXT NOT NULL DEFAULT '',
    phone                             INTEGER,          -- digits only, NULL if blank
    subject                           TEXT NOT NULL DEFAULT '',
    message                           TEXT NOT NULL DEFAULT '',
    created_at                        TEXT NOT NULL,    -- fixed-width RFC 3339 UTC
    topics                            TEXT NOT NULL DEFAULT '[]',
    sentiment                         REAL,
    relevant_bills                    TEXT,             -- JSON string or array
    needs_processing                  INTEGER,
    needs_manual_topic_classification INTEGER
);

CREATE INDEX IF NOT EXISTS emails_created_idx ON emails(created_at);
CREATE INDEX IF NOT EXISTS emails_subject_idx ON emails(subject);

PRAGMA user_version = 1;
";

/// Column list shared by every SELECT, in [`RawInquiry`](crate::encode::RawInquiry) order.
pub const COLUMNS: &str = "id, name, address, city, state, zip, phone, subject, message, \
                           created_at, topics, sentiment, relevant_bills, needs_processing, \
                           needs_manual_topic_classification";
