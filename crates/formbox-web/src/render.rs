//! HTML fragments: the submission form, the public entries table, and the
//! page layouts that wrap them.
//!
//! Every value that originates from a submission goes through [`escape`]
//! before it is embedded.

use std::borrow::Cow;

use formbox_core::entry::Entry;
use serde_json::json;

/// Escape `& < > ' "` for embedding in HTML text or attribute values.
pub fn escape(raw: &str) -> Cow<'_, str> { quick_xml::escape::escape(raw) }

// ─── Form ────────────────────────────────────────────────────────────────────

const FORM_HTML: &str = r#"<div>
<form id="customForm" method="post">
    <label for="name">Name:</label>
    <input type="text" id="name" name="name" required><br><br>
    <label for="email">Email:</label>
    <input type="email" id="email" name="email" required><br><br>
    <label for="message">Message:</label>
    <textarea id="message" name="message" required></textarea><br><br>
    <button type="submit">Submit</button>
</form>
</div>
<div id="formResponse"></div>
"#;

/// The submission form plus its empty response container.
pub fn form() -> &'static str { FORM_HTML }

// ─── Entries table ───────────────────────────────────────────────────────────

/// One row per entry in the order given; headers only when `entries` is empty.
pub fn entries_table(entries: &[Entry]) -> String {
  let mut html = String::from(
    "<table>\n\
     <thead>\n\
     <tr><th>Name</th><th>Email</th><th>Message</th><th>Date</th></tr>\n\
     </thead>\n\
     <tbody style=\"text-align: center;\">\n",
  );

  for entry in entries {
    html.push_str(&format!(
      "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
      escape(&entry.name),
      escape(&entry.email),
      escape(&entry.message),
      escape(&entry.timestamp()),
    ));
  }

  html.push_str("</tbody>\n</table>\n");
  html
}

// ─── Layouts ─────────────────────────────────────────────────────────────────

/// Wrap page content in a document that loads the submission script.
///
/// `content` is trusted page markup and is embedded as-is.
pub fn page(title: &str, content: &str, base_url: &str) -> String {
  let base = base_url.trim_end_matches('/');
  let settings = json!({ "ajaxUrl": format!("{base}/ajax") });
  format!(
    "<!DOCTYPE html>\n\
     <html lang=\"en\">\n\
     <head>\n\
     <meta charset=\"utf-8\">\n\
     <title>{title}</title>\n\
     </head>\n\
     <body>\n\
     {content}\
     <script>window.formboxAjax = {settings};</script>\n\
     <script src=\"{src}\"></script>\n\
     </body>\n\
     </html>\n",
    title = escape(title),
    src = escape(&format!("{base}/assets/form.js")),
  )
}

/// Wrap admin markup in a bare document (no submission script).
pub fn admin_page(title: &str, content: &str) -> String {
  format!(
    "<!DOCTYPE html>\n\
     <html lang=\"en\">\n\
     <head>\n\
     <meta charset=\"utf-8\">\n\
     <title>{title}</title>\n\
     </head>\n\
     <body>\n\
     <h1>{title}</h1>\n\
     {content}\
     </body>\n\
     </html>\n",
    title = escape(title),
  )
}
