//! Contact-form submissions and the field shaping applied before insert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  inquiry::{NewInquiry, RelevantBills},
  states::normalize_state,
};

/// Maximum stored message length, in characters.
pub const MESSAGE_LIMIT: usize = 1200;

// ─── Field shaping ───────────────────────────────────────────────────────────

fn join_present(parts: &[&str], separator: &str) -> String {
  parts
    .iter()
    .map(|p| p.trim())
    .filter(|p| !p.is_empty())
    .collect::<Vec<_>>()
    .join(separator)
}

/// `"Dr", "Jane", "Doe"` → `"Dr Jane Doe"`; blank parts are dropped.
pub fn join_name(prefix: &str, first: &str, last: &str) -> String {
  join_present(&[prefix, first, last], " ")
}

/// `"12 Main St", "Apt 4"` → `"12 Main St, Apt 4"`; a blank second line is dropped.
pub fn join_address(street: &str, line2: &str) -> String {
  join_present(&[street, line2], ", ")
}

/// Keep only the digits of `input` and parse them.
///
/// Returns `None` when there are no digits, or when the digit string does not
/// fit in an `i64`.
pub fn normalize_phone(input: &str) -> Option<i64> {
  let digits: String = input.chars().filter(char::is_ascii_digit).collect();
  if digits.is_empty() {
    return None;
  }
  digits.parse().ok()
}

/// Cut `input` down to [`MESSAGE_LIMIT`] characters.
pub fn truncate_message(input: &str) -> String {
  match input.char_indices().nth(MESSAGE_LIMIT) {
    Some((byte_idx, _)) => input[..byte_idx].to_owned(),
    None => input.to_owned(),
  }
}

// ─── Form ────────────────────────────────────────────────────────────────────

/// Raw contact-form fields as submitted by a constituent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
  pub prefix:         String,
  pub first_name:     String,
  pub last_name:      String,
  pub street_address: String,
  pub address_line2:  String,
  pub city:           String,
  pub state:          String,
  pub zip:            String,
  pub phone:          String,
  /// Collected for the reply channel; the inquiry table has no column for it.
  pub email:          String,
  pub subject:        String,
  pub topics:         Vec<String>,
  pub message:        String,
}

impl ContactForm {
  /// Build a form from url-encoded pairs. Repeated `topics` keys accumulate;
  /// unknown keys are ignored.
  pub fn from_pairs<I, K, V>(pairs: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
  {
    let mut form = Self::default();
    for (key, value) in pairs {
      let value = value.into();
      match key.as_ref() {
        "prefix" => form.prefix = value,
        "first_name" => form.first_name = value,
        "last_name" => form.last_name = value,
        "street_address" => form.street_address = value,
        "address_line2" => form.address_line2 = value,
        "city" => form.city = value,
        "state" => form.state = value,
        "zip" => form.zip = value,
        "phone" => form.phone = value,
        "email" => form.email = value,
        "subject" => form.subject = value,
        "message" => form.message = value,
        "topics" if !value.trim().is_empty() => form.topics.push(value),
        _ => {}
      }
    }
    form
  }

  /// Check that every required field is non-blank. Reports the first gap.
  pub fn validate(&self) -> Result<()> {
    let required: [(&'static str, &str); 9] = [
      ("first_name", &self.first_name),
      ("last_name", &self.last_name),
      ("street_address", &self.street_address),
      ("city", &self.city),
      ("state", &self.state),
      ("zip", &self.zip),
      ("email", &self.email),
      ("subject", &self.subject),
      ("message", &self.message),
    ];

    match required.iter().find(|(_, value)| value.trim().is_empty()) {
      Some((field, _)) => Err(Error::MissingField(*field)),
      None => Ok(()),
    }
  }

  /// Shape the form into an insertable row stamped with `now`.
  ///
  /// The enrichment columns are initialised the way a fresh submission is
  /// expected to look: no sentiment, no bills, nothing flagged.
  pub fn into_new_inquiry(self, now: DateTime<Utc>) -> NewInquiry {
    let state = normalize_state(&self.state)
      .map(str::to_owned)
      .unwrap_or_else(|| self.state.trim().to_owned());

    NewInquiry {
      name:                              join_name(&self.prefix, &self.first_name, &self.last_name),
      address:                           join_address(&self.street_address, &self.address_line2),
      city:                              self.city.trim().to_owned(),
      state,
      zip:                               self.zip.trim().to_owned(),
      phone:                             normalize_phone(&self.phone),
      subject:                           self.subject.trim().to_owned(),
      message:                           truncate_message(&self.message),
      created_at:                        now,
      topics:                            self
        .topics
        .into_iter()
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
        .collect(),
      sentiment:                         Some(0.0),
      relevant_bills:                    Some(RelevantBills::Many(Vec::new())),
      needs_processing:                  Some(false),
      needs_manual_topic_classification: Some(false),
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn filled() -> ContactForm {
    ContactForm {
      prefix:         "Dr".into(),
      first_name:     "Jane".into(),
      last_name:      "Doe".into(),
      street_address: "12 Main St".into(),
      address_line2:  "Apt 4".into(),
      city:           "Harrisburg".into(),
      state:          "Pennsylvania".into(),
      zip:            "17101".into(),
      phone:          "(717) 555-0142".into(),
      email:          "jane@example.com".into(),
      subject:        "Bridge repair".into(),
      topics:         vec!["Infrastructure".into(), " ".into()],
      message:        "Please fix the bridge.".into(),
    }
  }

  #[test]
  fn name_drops_blank_parts() {
    assert_eq!(join_name("", "Jane", "Doe"), "Jane Doe");
    assert_eq!(join_name("Mr", " ", "Smith"), "Mr Smith");
    assert_eq!(join_name("", "", ""), "");
  }

  #[test]
  fn address_joins_with_comma() {
    assert_eq!(join_address("12 Main St", "Apt 4"), "12 Main St, Apt 4");
    assert_eq!(join_address("12 Main St", ""), "12 Main St");
  }

  #[test]
  fn phone_keeps_only_digits() {
    assert_eq!(normalize_phone("(717) 555-0142"), Some(7175550142));
    assert_eq!(normalize_phone("+1 717.555.0142"), Some(17175550142));
    assert_eq!(normalize_phone(""), None);
    assert_eq!(normalize_phone("n/a"), None);
    assert_eq!(normalize_phone("99999999999999999999999"), None);
  }

  #[test]
  fn message_is_capped_by_characters() {
    let long = "é".repeat(MESSAGE_LIMIT + 30);
    let cut = truncate_message(&long);
    assert_eq!(cut.chars().count(), MESSAGE_LIMIT);

    let exact = "a".repeat(MESSAGE_LIMIT);
    assert_eq!(truncate_message(&exact), exact);
  }

  #[test]
  fn validate_reports_first_missing_field() {
    assert!(filled().validate().is_ok());

    let mut form = filled();
    form.city = "   ".into();
    form.message = String::new();
    assert!(matches!(form.validate(), Err(Error::MissingField("city"))));
  }

  #[test]
  fn optional_fields_are_not_required() {
    let mut form = filled();
    form.prefix.clear();
    form.address_line2.clear();
    form.phone.clear();
    form.topics.clear();
    assert!(form.validate().is_ok());
  }

  #[test]
  fn shaping_applies_every_rule() {
    let now = Utc.with_ymd_and_hms(2024, 11, 5, 12, 0, 0).unwrap();
    let new = filled().into_new_inquiry(now);

    assert_eq!(new.name, "Dr Jane Doe");
    assert_eq!(new.address, "12 Main St, Apt 4");
    assert_eq!(new.state, "PA");
    assert_eq!(new.phone, Some(7175550142));
    assert_eq!(new.topics, vec!["Infrastructure".to_string()]);
    assert_eq!(new.created_at, now);
    assert_eq!(new.sentiment, Some(0.0));
    assert_eq!(new.needs_processing, Some(false));
    assert_eq!(new.relevant_bills, Some(RelevantBills::Many(vec![])));
  }

  #[test]
  fn unrecognised_state_is_kept_verbatim() {
    let mut form = filled();
    form.state = " Ontario ".into();
    let new = form.into_new_inquiry(Utc::now());
    assert_eq!(new.state, "Ontario");
  }

  #[test]
  fn blank_phone_is_stored_absent() {
    let mut form = filled();
    form.phone = "   ".into();
    assert_eq!(form.into_new_inquiry(Utc::now()).phone, None);
  }

  #[test]
  fn pairs_accumulate_topics() {
    let form = ContactForm::from_pairs(vec![
      ("first_name", "Jane"),
      ("topics", "Housing"),
      ("topics", "Labor"),
      ("topics", ""),
      ("unknown", "ignored"),
    ]);
    assert_eq!(form.first_name, "Jane");
    assert_eq!(form.topics, vec!["Housing".to_string(), "Labor".to_string()]);
  }
}
