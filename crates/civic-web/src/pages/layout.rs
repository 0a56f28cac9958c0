//! Shared page chrome and HTML helpers.

use axum::response::Html;
use chrono::{DateTime, Utc};

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; color: #1f2937; background: #f9fafb; }
nav { display: flex; gap: 1.5rem; align-items: center; padding: 0.75rem 2rem; background: #0e1e5b; }
nav a { color: #e5e7eb; text-decoration: none; }
nav a.active { color: #fff; font-weight: 600; }
nav .brand { color: #fff; font-weight: 700; margin-right: 1rem; }
main { max-width: 72rem; margin: 0 auto; padding: 2rem; }
.card { background: #fff; border-radius: 0.5rem; box-shadow: 0 1px 2px rgba(0,0,0,.06); padding: 1.5rem; margin-bottom: 1.5rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(16rem, 1fr)); gap: 1.5rem; }
.muted { color: #6b7280; font-size: 0.875rem; }
.stat { font-size: 2rem; font-weight: 700; }
.error { background: #fef2f2; color: #b91c1c; padding: 0.75rem 1rem; border-radius: 0.375rem; }
.notice { background: #ecfdf5; color: #047857; padding: 0.75rem 1rem; border-radius: 0.375rem; }
.badge { background: #fef3c7; color: #92400e; font-size: 0.75rem; padding: 0.125rem 0.5rem; border-radius: 9999px; }
.bar { background: #3b82f6; height: 0.5rem; border-radius: 0.25rem; }
.list a { display: block; padding: 0.75rem; border-bottom: 1px solid #f3f4f6; color: inherit; text-decoration: none; }
.list a.selected { background: #eff6ff; }
label { display: block; font-size: 0.875rem; color: #6b7280; margin-top: 0.75rem; }
input, select, textarea { width: 100%; padding: 0.5rem; border: 1px solid #d1d5db; border-radius: 0.375rem; box-sizing: border-box; }
button { margin-top: 1rem; background: #0e1e5b; color: #fff; border: 0; padding: 0.625rem 1.25rem; border-radius: 0.375rem; cursor: pointer; }
"#;

/// Top-level navigation entries: `(href, label)`.
const NAV: &[(&str, &str)] = &[
  ("/dashboard", "Dashboard"),
  ("/inquiries", "Inquiry Center"),
  ("/map", "Map"),
  ("/contact", "Contact"),
];

/// Escape text for inclusion in HTML content or a quoted attribute.
pub fn escape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(c),
    }
  }
  out
}

/// `path?query` with blank values dropped and the rest url-encoded.
pub fn href(path: &str, pairs: &[(&str, &str)]) -> String {
  let pairs = pairs.iter().filter(|(_, v)| !v.is_empty());
  match reqwest::Url::parse_with_params("http://localhost/", pairs) {
    Ok(url) => match url.query() {
      Some(q) if !q.is_empty() => format!("{path}?{q}"),
      _ => path.to_owned(),
    },
    Err(_) => path.to_owned(),
  }
}

pub fn format_date(dt: DateTime<Utc>) -> String { dt.format("%b %-d, %Y %-I:%M %p UTC").to_string() }

/// Wrap `body` in the page shell. `active` is the nav href to highlight.
pub fn page(title: &str, active: &str, head: &str, body: &str) -> Html<String> {
  let nav: String = NAV
    .iter()
    .map(|(path, label)| {
      let class = if *path == active { " class=\"active\"" } else { "" };
      format!("<a href=\"{path}\"{class}>{label}</a>")
    })
    .collect();

  Html(format!(
    "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
     <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
     <title>{title} · Civic</title>\n<style>{STYLE}</style>\n{head}\n</head>\n<body>\n\
     <nav><a class=\"brand\" href=\"/\">Civic</a>{nav}</nav>\n<main>\n{body}\n</main>\n</body>\n</html>\n",
    title = escape(title),
  ))
}
