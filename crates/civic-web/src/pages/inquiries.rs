//! `GET /inquiries`: the inquiry center: filters, list and detail panel.
//!
//! Query parameters:
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `window` | `today`, `week`, `month`; anything else shows all time |
//! | `topics` | repeatable and/or comma-separated; any match is kept |
//! | `subject` | exact subject line |
//! | `selected` | id of the record shown in the detail panel |

use std::fmt::Write as _;

use axum::{
  extract::{Query, State},
  response::Html,
};
use chrono::Utc;
use civic_api::inquiries::split_list;
use civic_core::{
  inquiry::{Inquiry, InquiryId},
  store::{InquiryQuery, InquiryStore},
  topic::{matches_any_topic, unique_topics},
  window::TimeWindow,
};

use super::layout::{escape, format_date, href, page};
use crate::AppState;

#[derive(Debug, Default, PartialEq)]
pub struct Filters {
  pub window:   TimeWindow,
  pub topics:   Vec<String>,
  pub subject:  Option<String>,
  pub selected: Option<String>,
}

impl Filters {
  pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
    let mut filters = Self::default();
    for (key, value) in pairs {
      match key.as_str() {
        "window" => filters.window = value.parse().unwrap_or_default(),
        "topics" => {
          for t in split_list(Some(&value)) {
            if !filters.topics.contains(&t) {
              filters.topics.push(t);
            }
          }
        }
        "subject" if !value.trim().is_empty() => filters.subject = Some(value.trim().to_owned()),
        "selected" if !value.is_empty() => filters.selected = Some(value),
        _ => {}
      }
    }
    filters
  }

  /// Link to this view with `selected` replaced.
  fn link(&self, selected: Option<&str>) -> String {
    let window = match self.window {
      TimeWindow::All => "",
      w => w.as_str(),
    };
    let topics = self.topics.join(",");
    href(
      "/inquiries",
      &[
        ("window", window),
        ("topics", &topics),
        ("subject", self.subject.as_deref().unwrap_or("")),
        ("selected", selected.unwrap_or("")),
      ],
    )
  }
}

fn filter_form(out: &mut String, filters: &Filters, available: &[String]) {
  out.push_str("<form method=\"get\" action=\"/inquiries\" class=\"card\"><label for=\"window\">Time</label><select id=\"window\" name=\"window\">");
  for w in TimeWindow::ALL {
    let sel = if w == filters.window { " selected" } else { "" };
    let _ = write!(out, "<option value=\"{}\"{sel}>{}</option>", w.as_str(), w.label());
  }
  out.push_str("</select>");

  let _ = write!(
    out,
    "<label for=\"subject\">Subject</label><input id=\"subject\" name=\"subject\" value=\"{}\">",
    escape(filters.subject.as_deref().unwrap_or(""))
  );

  if !available.is_empty() {
    out.push_str("<label>Topics</label><div>");
    for t in available {
      let checked = if filters.topics.contains(t) { " checked" } else { "" };
      let _ = write!(
        out,
        "<span><input type=\"checkbox\" name=\"topics\" value=\"{0}\" style=\"width:auto\"{checked}> {0}</span> ",
        escape(t)
      );
    }
    out.push_str("</div>");
  }
  out.push_str("<button type=\"submit\">Apply</button></form>");
}

fn detail(out: &mut String, r: &Inquiry) {
  out.push_str("<div class=\"card\"><h2>Raw Inquiry Panel</h2>");
  if let Some(s) = r.sentiment.filter(|s| *s != 0.0) {
    let _ = write!(out, "<p class=\"muted\">Sentiment Score {s:+}</p>");
  }

  let mut field = |label: &str, value: &str| {
    let _ = write!(out, "<label>{label}</label><p>{}</p>", escape(value));
  };
  field("Subject", r.subject_or_placeholder());
  field("Name", &r.name);
  field("Address", &r.address);
  field("City", &r.city);
  field("State", &r.state);
  field("Phone", &r.phone.map(|p| p.to_string()).unwrap_or_default());
  field("Date", &format_date(r.created_at));
  if !r.topics.is_empty() {
    field("Topics", &r.topics.join(", "));
  }
  if let Some(bills) = r.relevant_bills.as_ref().filter(|b| !b.is_empty()) {
    field("Relevant Bills", &bills.joined());
  }

  let _ = write!(
    out,
    "<label>Message</label><p style=\"white-space:pre-wrap\">{}</p></div>",
    escape(&r.message)
  );
}

pub fn render(
  filters: &Filters,
  records: &[Inquiry],
  selected: Option<&Inquiry>,
  error: Option<&str>,
) -> Html<String> {
  let mut body = String::from("<h1>Inquiry Center</h1>");
  if let Some(err) = error {
    let _ = write!(body, "<p class=\"error\">{}</p>", escape(err));
  }

  filter_form(&mut body, filters, &unique_topics(records));

  let shown: Vec<&Inquiry> = records
    .iter()
    .filter(|r| matches_any_topic(r, &filters.topics))
    .collect();

  body.push_str("<div class=\"grid\"><div class=\"card list\">");
  if shown.is_empty() {
    body.push_str("<p class=\"muted\">No inquiries found.</p>");
  }
  for r in &shown {
    let class = if selected.is_some_and(|s| s.id == r.id) { " class=\"selected\"" } else { "" };
    let badge = if r.needs_processing() {
      " <span class=\"badge\">Needs Processing</span>"
    } else {
      ""
    };
    let snippet: String = r.message.chars().take(120).collect();
    let _ = write!(
      body,
      "<a href=\"{}\"{class}><span class=\"muted\">{}</span>{badge}<h3>{}</h3><p class=\"muted\">{}</p></a>",
      escape(&filters.link(Some(r.id.as_str()))),
      format_date(r.created_at),
      escape(r.subject_or_placeholder()),
      escape(&snippet),
    );
  }
  body.push_str("</div>");

  if let Some(r) = selected {
    detail(&mut body, r);
  }
  body.push_str("</div>");

  page("Inquiry Center", "/inquiries", "", &body)
}

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Query(pairs): Query<Vec<(String, String)>>,
) -> Html<String>
where
  S: InquiryStore + Clone + 'static,
{
  let filters = Filters::from_pairs(pairs);
  let query = InquiryQuery {
    subject: filters.subject.clone(),
    ..InquiryQuery::within(filters.window, Utc::now())
  };

  let (records, error) = match state.store.list(&query).await {
    Ok(records) => (records, None),
    Err(e) => {
      tracing::error!(error = %e, "failed to load inquiries");
      (Vec::new(), Some("Failed to fetch inquiries"))
    }
  };

  let mut selected = None;
  if let Some(id) = &filters.selected {
    selected = records.iter().find(|r| r.id.as_str() == id).cloned();
    if selected.is_none() {
      // Outside the current window; look it up directly.
      selected = match state.store.get(&InquiryId::new(id.as_str())).await {
        Ok(found) => found,
        Err(e) => {
          tracing::warn!(id = %id, error = %e, "failed to load selected inquiry");
          None
        }
      };
    }
  }

  render(&filters, &records, selected.as_ref(), error)
}
