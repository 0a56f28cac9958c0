//! `/contact`: the public submission form.

use std::fmt::Write as _;

use axum::{
  Form,
  extract::{Query, State},
  http::StatusCode,
  response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;
use civic_core::{
  Error as CoreError,
  form::{ContactForm, MESSAGE_LIMIT},
  states::{DEFAULT_STATE, STATES, normalize_state},
  store::InquiryStore,
  topic::TOPICS,
};
use serde::Deserialize;

use super::layout::{escape, page};
use crate::AppState;

const PREFIXES: &[&str] = &["Mr", "Mrs", "Ms", "Dr"];

enum Banner {
  Sent,
  Problem(String),
}

fn field_label(field: &str) -> &'static str {
  match field {
    "first_name" => "First Name",
    "last_name" => "Last Name",
    "street_address" => "Street Address",
    "city" => "City",
    "state" => "State",
    "zip" => "ZIP Code",
    "email" => "Email",
    "subject" => "Subject",
    "message" => "Message",
    _ => "a required field",
  }
}

fn text_input(out: &mut String, name: &str, label: &str, value: &str, kind: &str, required: bool) {
  let req = if required { " required" } else { "" };
  let _ = write!(
    out,
    "<label for=\"{name}\">{label}</label>\
     <input type=\"{kind}\" id=\"{name}\" name=\"{name}\" value=\"{}\"{req}>",
    escape(value)
  );
}

fn render(form: &ContactForm, banner: Option<Banner>) -> Html<String> {
  let mut body = String::from("<div class=\"card\"><h1>Contact Us</h1>");

  match banner {
    Some(Banner::Sent) => {
      body.push_str("<p class=\"notice\">Thank you! Your message has been sent.</p>");
    }
    Some(Banner::Problem(msg)) => {
      let _ = write!(body, "<p class=\"error\">{}</p>", escape(&msg));
    }
    None => {}
  }

  body.push_str("<form method=\"post\" action=\"/contact\">");

  body.push_str("<label for=\"prefix\">Prefix</label><select id=\"prefix\" name=\"prefix\"><option value=\"\">Select</option>");
  for p in PREFIXES {
    let sel = if form.prefix == *p { " selected" } else { "" };
    let _ = write!(body, "<option value=\"{p}\"{sel}>{p}</option>");
  }
  body.push_str("</select>");

  text_input(&mut body, "first_name", "First Name", &form.first_name, "text", true);
  text_input(&mut body, "last_name", "Last Name", &form.last_name, "text", true);
  text_input(&mut body, "street_address", "Street Address", &form.street_address, "text", true);
  text_input(&mut body, "address_line2", "Address Line 2", &form.address_line2, "text", false);
  text_input(&mut body, "city", "City", &form.city, "text", true);

  let chosen = normalize_state(&form.state).unwrap_or(DEFAULT_STATE);
  body.push_str("<label for=\"state\">State</label><select id=\"state\" name=\"state\" required>");
  for s in STATES {
    let sel = if s.code == chosen { " selected" } else { "" };
    let _ = write!(body, "<option value=\"{}\"{sel}>{}</option>", s.code, escape(s.name));
  }
  body.push_str("</select>");

  text_input(&mut body, "zip", "ZIP Code", &form.zip, "text", true);
  text_input(&mut body, "phone", "Phone", &form.phone, "tel", false);
  text_input(&mut body, "email", "Email", &form.email, "email", true);
  text_input(&mut body, "subject", "Subject", &form.subject, "text", true);

  body.push_str("<label for=\"topics\">Select Topics</label><select id=\"topics\" name=\"topics\" multiple size=\"8\">");
  for t in TOPICS {
    let sel = if form.topics.iter().any(|x| x == t) { " selected" } else { "" };
    let _ = write!(body, "<option value=\"{0}\"{sel}>{0}</option>", escape(t));
  }
  body.push_str("</select>");

  let _ = write!(
    body,
    "<label for=\"message\">What's your message? (1,200 characters or less)</label>\
     <textarea id=\"message\" name=\"message\" rows=\"6\" maxlength=\"{MESSAGE_LIMIT}\" required>{}</textarea>\
     <button type=\"submit\">Submit</button></form></div>",
    escape(&form.message)
  );

  page("Contact", "/contact", "", &body)
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactParams {
  pub sent: Option<String>,
}

/// `GET /contact[?sent=1]`
pub async fn form(Query(params): Query<ContactParams>) -> Html<String> {
  let banner = params.sent.map(|_| Banner::Sent);
  render(&ContactForm::default(), banner)
}

/// `POST /contact`: url-encoded form body; `topics` may repeat.
pub async fn submit<S>(
  State(state): State<AppState<S>>,
  Form(pairs): Form<Vec<(String, String)>>,
) -> Response
where
  S: InquiryStore + Clone + 'static,
{
  let form = ContactForm::from_pairs(pairs);

  if let Err(e) = form.validate() {
    let msg = match e {
      CoreError::MissingField(field) => format!("Please fill in {}.", field_label(field)),
      other => other.to_string(),
    };
    return (StatusCode::BAD_REQUEST, render(&form, Some(Banner::Problem(msg)))).into_response();
  }

  match state.store.insert(form.clone().into_new_inquiry(Utc::now())).await {
    Ok(inquiry) => {
      tracing::info!(id = %inquiry.id, subject = %inquiry.subject, "inquiry submitted");
      Redirect::to("/contact?sent=1").into_response()
    }
    Err(e) => {
      tracing::error!(error = %e, "failed to store inquiry");
      let msg = "Something went wrong sending your message. Please try again.".to_owned();
      (StatusCode::INTERNAL_SERVER_ERROR, render(&form, Some(Banner::Problem(msg)))).into_response()
    }
  }
}
