//! The admin list view and its column extension.
//!
//! The list view owns two columns, `title` and `date`. Everything else comes
//! from an [`AdminColumns`] implementation: it declares extra columns and
//! renders their cells.

use formbox_core::{entry::Entry, store::EntryStore};
use uuid::Uuid;

use crate::render::escape;

/// A list view column: stable key plus human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
  pub key:   &'static str,
  pub label: &'static str,
}

impl Column {
  pub const fn new(key: &'static str, label: &'static str) -> Self { Self { key, label } }
}

/// Columns the list view renders itself.
pub fn default_columns() -> Vec<Column> {
  vec![Column::new("title", "Title"), Column::new("date", "Date")]
}

/// Extension point for the admin list view.
pub trait AdminColumns: Send + Sync {
  /// Return `defaults` with this extension's columns added. Existing columns
  /// keep their position.
  fn columns(&self, defaults: Vec<Column>) -> Vec<Column>;

  /// Escaped cell content for `key`, or `None` if this extension does not own
  /// the column.
  fn render(&self, key: &str, entry: &Entry) -> Option<String>;
}

/// Adds `email`, `message` and `timestamp` columns for stored entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryColumns;

impl EntryColumns {
  const COLUMNS: [Column; 3] = [
    Column::new("email", "Email"),
    Column::new("message", "Message"),
    Column::new("timestamp", "Date Submitted"),
  ];
}

impl AdminColumns for EntryColumns {
  fn columns(&self, mut defaults: Vec<Column>) -> Vec<Column> {
    defaults.extend(Self::COLUMNS);
    defaults
  }

  fn render(&self, key: &str, entry: &Entry) -> Option<String> {
    let value = match key {
      "email" => escape(&entry.email).into_owned(),
      "message" => escape(&entry.message).into_owned(),
      "timestamp" => escape(&entry.timestamp()).into_owned(),
      _ => return None,
    };
    Some(value)
  }
}

/// Render one cell by record id. `None` for an unknown record or a column the
/// extension does not own.
pub async fn render_column<S>(
  store: &S,
  columns: &dyn AdminColumns,
  key: &str,
  entry_id: Uuid,
) -> Result<Option<String>, S::Error>
where
  S: EntryStore,
{
  let entry = store.get_entry(entry_id).await?;
  Ok(entry.and_then(|e| columns.render(key, &e)))
}

// ─── List view ───────────────────────────────────────────────────────────────

/// Paging state for the list view (1-based `page`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
  pub page:     usize,
  pub per_page: usize,
  pub total:    usize,
}

impl Paging {
  pub fn pages(&self) -> usize { self.total.div_ceil(self.per_page.max(1)).max(1) }
}

/// The admin entries table. `title` and `date` are rendered here; all other
/// columns are delegated to `ext`, with an empty cell when it declines.
pub fn list_view(entries: &[Entry], ext: &dyn AdminColumns, paging: Paging) -> String {
  let columns = ext.columns(default_columns());

  let mut html = format!(
    "<p class=\"displaying-num\">{} {}</p>\n<table class=\"entries\">\n<thead>\n<tr>",
    paging.total,
    if paging.total == 1 { "item" } else { "items" },
  );
  for column in &columns {
    html.push_str(&format!(
      "<th class=\"column-{}\">{}</th>",
      escape(column.key),
      escape(column.label)
    ));
  }
  html.push_str("</tr>\n</thead>\n<tbody>\n");

  if entries.is_empty() {
    html.push_str(&format!(
      "<tr class=\"no-items\"><td colspan=\"{}\">No entries found.</td></tr>\n",
      columns.len()
    ));
  }

  for entry in entries {
    html.push_str("<tr>");
    for column in &columns {
      let cell = match column.key {
        "title" => escape(&entry.name).into_owned(),
        "date" => escape(&entry.timestamp()).into_owned(),
        key => ext.render(key, entry).unwrap_or_default(),
      };
      html.push_str(&format!("<td class=\"column-{}\">{cell}</td>", escape(column.key)));
    }
    html.push_str("</tr>\n");
  }

  html.push_str("</tbody>\n</table>\n");
  html.push_str(&pagination(paging));
  html
}

fn pagination(paging: Paging) -> String {
  let pages = paging.pages();
  let mut nav = String::from("<nav class=\"pagination\">");
  if paging.page > 1 {
    nav.push_str(&format!("<a href=\"?paged={}\">&laquo; Previous</a> ", paging.page - 1));
  }
  nav.push_str(&format!("Page {} of {pages}", paging.page));
  if paging.page < pages {
    nav.push_str(&format!(" <a href=\"?paged={}\">Next &raquo;</a>", paging.page + 1));
  }
  nav.push_str("</nav>\n");
  nav
}
