//! Parsing of exported mailbox dumps into contact forms.
//!
//! The export is a JSON array of emails, each with a sender `profile`, a list
//! of `topics` and the `subject`/`body` of the message. Any of those may be
//! missing or `null`, and older exports stored zip codes and phone numbers as
//! bare numbers.
//!
//! Rows are converted independently: a malformed row yields an error in its
//! slot without affecting its neighbours.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{Result, form::ContactForm, inquiry::null_as_default};

/// Read a scalar as text. Numbers and booleans are stringified; `null`,
/// arrays and objects read as empty.
fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
  Ok(match Value::deserialize(deserializer)? {
    Value::String(s) => s,
    Value::Number(n) => n.to_string(),
    Value::Bool(b) => b.to_string(),
    Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
  })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ExportedProfile {
  #[serde(deserialize_with = "scalar_text")]
  first_name:     String,
  #[serde(deserialize_with = "scalar_text")]
  last_name:      String,
  #[serde(deserialize_with = "scalar_text")]
  street_address: String,
  #[serde(deserialize_with = "scalar_text")]
  city:           String,
  #[serde(deserialize_with = "scalar_text")]
  state:          String,
  #[serde(deserialize_with = "scalar_text")]
  zip_code:       String,
  #[serde(deserialize_with = "scalar_text")]
  email:          String,
  #[serde(deserialize_with = "scalar_text")]
  phone_number:   String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ExportedTopic {
  #[serde(deserialize_with = "scalar_text")]
  topic_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExportedEmail {
  #[serde(deserialize_with = "null_as_default")]
  profile: ExportedProfile,
  #[serde(deserialize_with = "null_as_default")]
  topics:  Vec<ExportedTopic>,
  #[serde(deserialize_with = "scalar_text")]
  subject: String,
  #[serde(deserialize_with = "scalar_text")]
  body:    String,
}

impl From<ExportedEmail> for ContactForm {
  fn from(email: ExportedEmail) -> Self {
    let p = email.profile;
    // Only the primary topic is carried over.
    let topics = email
      .topics
      .into_iter()
      .next()
      .map(|t| t.topic_name)
      .filter(|t| !t.is_empty())
      .into_iter()
      .collect();

    ContactForm {
      prefix: String::new(),
      first_name: p.first_name,
      last_name: p.last_name,
      street_address: p.street_address,
      address_line2: String::new(),
      city: p.city,
      state: p.state,
      zip: p.zip_code,
      phone: p.phone_number,
      email: p.email,
      subject: email.subject,
      topics,
      message: email.body,
    }
  }
}

/// Parse an export document into one [`ContactForm`] per email, in document
/// order. The outer error means the document is not a JSON array; each inner
/// result is one row.
pub fn parse_export(json: &str) -> Result<Vec<Result<ContactForm>>> {
  let rows: Vec<Value> = serde_json::from_str(json)?;
  Ok(
    rows
      .into_iter()
      .map(|row| {
        let email: ExportedEmail = serde_json::from_value(row)?;
        Ok(ContactForm::from(email))
      })
      .collect(),
  )
}
