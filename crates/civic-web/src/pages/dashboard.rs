//! `GET /dashboard`: totals, breakdowns and recent submissions.

use std::fmt::Write as _;

use axum::{extract::State, response::Html};
use civic_api::dashboard::summarize;
use civic_core::{
  dashboard::DashboardSummary,
  store::InquiryStore,
  topic::{TopicCount, percentages},
};

use super::layout::{escape, format_date, href, page};
use crate::AppState;

fn breakdown(out: &mut String, title: &str, counts: &[TopicCount]) {
  let _ = write!(out, "<div class=\"card\"><h3>{title}</h3>");
  if counts.is_empty() {
    out.push_str("<p class=\"muted\">No data yet.</p>");
  }
  for (count, pct) in counts.iter().zip(percentages(counts)) {
    let _ = write!(
      out,
      "<div><span>{} ({pct}%)</span> <span class=\"muted\">{}</span>\
       <div class=\"bar\" style=\"width:{pct}%\"></div></div>",
      escape(&count.name),
      count.value,
    );
  }
  out.push_str("</div>");
}

pub fn render(summary: &DashboardSummary) -> Html<String> {
  let mut body = String::from("<h1>Dashboard</h1>");

  if let Some(err) = &summary.error {
    let _ = write!(body, "<p class=\"error\">{}</p>", escape(err));
  }

  let _ = write!(
    body,
    "<div class=\"grid\">\
     <div class=\"card\"><div class=\"muted\">Total Inquiries</div><div class=\"stat\">{}</div></div>\
     <div class=\"card\"><div class=\"muted\">This Week</div><div class=\"stat\">{}</div></div>\
     </div>",
    summary.total, summary.this_week,
  );

  body.push_str("<div class=\"grid\">");
  breakdown(&mut body, "Top Subjects", &summary.subjects);
  breakdown(&mut body, "Topic Breakdown", &summary.topics);
  body.push_str("</div>");

  body.push_str("<div class=\"card list\"><h3>Recent Submissions</h3>");
  if summary.recent.is_empty() {
    body.push_str("<p class=\"muted\">No submissions.</p>");
  }
  for r in &summary.recent {
    let link = href("/inquiries", &[("selected", r.id.as_str())]);
    let _ = write!(
      body,
      "<a href=\"{}\"><strong>{}</strong> <span class=\"muted\">{} · {}</span></a>",
      escape(&link),
      escape(r.subject_or_placeholder()),
      escape(&r.name),
      format_date(r.created_at),
    );
  }
  body.push_str("</div>");

  page("Dashboard", "/dashboard", "", &body)
}

pub async fn handler<S>(State(state): State<AppState<S>>) -> Html<String>
where
  S: InquiryStore + Clone + 'static,
{
  render(&summarize(state.store.as_ref()).await)
}
