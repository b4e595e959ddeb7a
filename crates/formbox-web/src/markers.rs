//! Embeddable page markers: `[custom_form]` and `[form_entries]`.
//!
//! A marker is replaced by rendered output wherever it appears in page
//! content. Doubling the brackets (`[[custom_form]]`) emits the marker text
//! literally. Anything else in brackets is left untouched.

/// A known marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
  /// The submission form.
  CustomForm,
  /// The table of stored entries.
  FormEntries,
}

impl Marker {
  pub const ALL: [Self; 2] = [Self::CustomForm, Self::FormEntries];

  pub fn name(self) -> &'static str {
    match self {
      Self::CustomForm => "custom_form",
      Self::FormEntries => "form_entries",
    }
  }

  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|m| m.name() == name)
  }
}

enum Token {
  Marker(Marker),
  Escaped(Marker),
}

/// Recognise a marker at the start of `s` (which begins with `[`); returns
/// the token and its byte length.
fn token_at(s: &str) -> Option<(Token, usize)> {
  if let Some(inner) = s.strip_prefix("[[")
    && let Some(end) = inner.find("]]")
    && let Some(marker) = Marker::from_name(inner[..end].trim())
  {
    return Some((Token::Escaped(marker), end + 4));
  }

  let inner = s.strip_prefix('[')?;
  let end = inner.find(']')?;
  Marker::from_name(inner[..end].trim()).map(|m| (Token::Marker(m), end + 2))
}

/// Replace each marker in `content` with `render(marker)`.
pub fn expand(content: &str, mut render: impl FnMut(Marker) -> String) -> String {
  let mut out  = String::with_capacity(content.len());
  let mut rest = content;
  while let Some(open) = rest.find('[') {
    out.push_str(&rest[..open]);
    let at = &rest[open..];
    match token_at(at) {
      Some((Token::Marker(marker), len)) => {
        out.push_str(&render(marker));
        rest = &at[len..];
      }
      Some((Token::Escaped(marker), len)) => {
        out.push('[');
        out.push_str(marker.name());
        out.push(']');
        rest = &at[len..];
      }
      None => {
        out.push('[');
        rest = &at[1..];
      }
    }
  }
  out.push_str(rest);
  out
}

/// Whether `content` would render `marker` when expanded.
pub fn contains(content: &str, marker: Marker) -> bool {
  let mut found = false;
  expand(content, |m| {
    found |= m == marker;
    String::new()
  });
  found
}
