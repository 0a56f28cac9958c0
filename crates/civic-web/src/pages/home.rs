//! `GET /`: public landing page.

use axum::response::Html;

use super::layout::page;

pub async fn handler() -> Html<String> {
  page(
    "Home",
    "/",
    "",
    r#"<div class="card">
<h1>Contact your representative</h1>
<p>Share a question, concern or idea with our office. Every message is read
by a member of staff and routed to the right team.</p>
<p><a href="/contact">Send us a message &rarr;</a></p>
</div>"#,
  )
}
