//! Field sanitisers and the email address grammar.
//!
//! Sanitisers never fail: they return a cleaned (possibly empty) string and
//! leave the "is this acceptable?" decision to
//! [`Submission::validate`](crate::Submission::validate).

/// Characters allowed in the local part of an address.
const LOCAL_PART_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~.-";

/// Whitespace that is trimmed from address domains and labels.
const EDGE_WHITESPACE: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

const MIN_EMAIL_LEN: usize = 6;

// ─── Text fields ─────────────────────────────────────────────────────────────

/// Clean a single-line plain-text value (the submitter's name).
///
/// Removes `<script>`/`<style>` elements together with their content, strips
/// every remaining tag, collapses whitespace and line breaks into single
/// spaces, drops control characters and percent-encoded octets, and trims.
pub fn sanitize_text_field(raw: &str) -> String { sanitize_text(raw, false) }

/// Clean a multi-line plain-text value (the message). Same as
/// [`sanitize_text_field`] except that line breaks survive.
pub fn sanitize_textarea_field(raw: &str) -> String { sanitize_text(raw, true) }

fn sanitize_text(raw: &str, keep_newlines: bool) -> String {
  let mut text = if raw.contains('<') {
    strip_tags(&remove_elements(&remove_elements(raw, "script"), "style"))
  } else {
    raw.to_owned()
  };

  if !keep_newlines {
    text = collapse(&text, |c| matches!(c, '\r' | '\n' | '\t' | ' '));
  }

  text = text
    .chars()
    .filter(|&c| !c.is_control() || (keep_newlines && matches!(c, '\n' | '\r' | '\t')))
    .collect();

  let mut text = text.trim().to_owned();

  let mut found_octets = false;
  loop {
    let (next, hit) = strip_octets_once(&text);
    if !hit {
      break;
    }
    found_octets = true;
    text = next;
  }

  if found_octets {
    text = collapse(&text, |c| c == ' ').trim().to_owned();
  }

  text
}

/// Remove `<tag ...>...</tag>` elements (ASCII case-insensitive), content
/// included. An element without a closing tag is left for [`strip_tags`].
fn remove_elements(input: &str, tag: &str) -> String {
  // ASCII lowercasing keeps byte offsets identical to `input`.
  let lower = input.to_ascii_lowercase();
  let open  = format!("<{tag}");
  let close = format!("</{tag}>");

  let mut out = String::with_capacity(input.len());
  let mut pos = 0;
  while let Some(rel) = lower[pos..].find(&open) {
    let start = pos + rel;
    let Some(close_rel) = lower[start..].find(&close) else {
      break;
    };
    out.push_str(&input[pos..start]);
    pos = start + close_rel + close.len();
  }
  out.push_str(&input[pos..]);
  out
}

/// Drop everything between `<` and the next `>`.
///
/// A `<` that is followed by another `<` (or by the end of input) before any
/// `>` is not a tag and is kept as a literal character.
fn strip_tags(input: &str) -> String {
  let mut out  = String::with_capacity(input.len());
  let mut rest = input;
  while let Some(start) = rest.find('<') {
    out.push_str(&rest[..start]);
    let after = &rest[start + 1..];
    match after.find(['<', '>']) {
      Some(end) if after[end..].starts_with('>') => rest = &after[end + 1..],
      _ => {
        out.push('<');
        rest = after;
      }
    }
  }
  out.push_str(rest);
  out
}

/// Replace each run of characters matching `is_run` with a single space.
fn collapse(input: &str, is_run: impl Fn(char) -> bool) -> String {
  let mut out    = String::with_capacity(input.len());
  let mut in_run = false;
  for c in input.chars() {
    if is_run(c) {
      if !in_run {
        out.push(' ');
      }
      in_run = true;
    } else {
      out.push(c);
      in_run = false;
    }
  }
  out
}

/// Remove every `%XX` hex octet once; report whether any was found.
fn strip_octets_once(input: &str) -> (String, bool) {
  let chars: Vec<char> = input.chars().collect();
  let mut out   = String::with_capacity(input.len());
  let mut found = false;
  let mut i     = 0;
  while i < chars.len() {
    let is_octet = chars[i] == '%'
      && chars.get(i + 1).is_some_and(char::is_ascii_hexdigit)
      && chars.get(i + 2).is_some_and(char::is_ascii_hexdigit);
    if is_octet {
      found = true;
      i += 3;
    } else {
      out.push(chars[i]);
      i += 1;
    }
  }
  (out, found)
}

// ─── Email ───────────────────────────────────────────────────────────────────

fn is_local_char(c: char) -> bool {
  c.is_ascii_alphanumeric() || LOCAL_PART_SPECIALS.contains(c)
}

fn is_label_char(c: char) -> bool { c.is_ascii_alphanumeric() || c == '-' }

/// Split at the first `@`, requiring a non-empty local part.
fn split_address(email: &str) -> Option<(&str, &str)> {
  if email.len() < MIN_EMAIL_LEN {
    return None;
  }
  email.split_once('@').filter(|(local, _)| !local.is_empty())
}

/// Normalise a submitted address by removing characters that cannot appear
/// in it. Returns an empty string when nothing usable remains.
pub fn sanitize_email(raw: &str) -> String {
  let Some((local, domain)) = split_address(raw.trim()) else {
    return String::new();
  };

  let local: String = local.chars().filter(|c| is_local_char(*c)).collect();
  if local.is_empty() || domain.contains("..") {
    return String::new();
  }

  let domain = domain.trim_matches(|c| EDGE_WHITESPACE.contains(&c) || c == '.');
  let labels: Vec<&str> = domain.split('.').collect();
  if labels.len() < 2 {
    return String::new();
  }

  let labels: Vec<String> = labels
    .into_iter()
    .map(|label| {
      label
        .trim_matches(|c| EDGE_WHITESPACE.contains(&c) || c == '-')
        .chars()
        .filter(|c| is_label_char(*c))
        .collect::<String>()
    })
    .filter(|label| !label.is_empty())
    .collect();
  if labels.len() < 2 {
    return String::new();
  }

  format!("{local}@{}", labels.join("."))
}

/// Whether `email` is a syntactically acceptable address.
///
/// The grammar is deliberately narrower than RFC 5322: ASCII only, no quoted
/// local parts, no IP-literal domains, and at least two domain labels.
pub fn is_email(email: &str) -> bool {
  let Some((local, domain)) = split_address(email) else {
    return false;
  };

  if !local.chars().all(is_local_char) {
    return false;
  }

  if domain.contains("..")
    || domain.trim_matches(|c| EDGE_WHITESPACE.contains(&c) || c == '.') != domain
  {
    return false;
  }

  let labels: Vec<&str> = domain.split('.').collect();
  labels.len() >= 2
    && labels.iter().all(|label| {
      !label.is_empty()
        && label.trim_matches(|c| EDGE_WHITESPACE.contains(&c) || c == '-') == *label
        && label.chars().all(is_label_char)
    })
}

#[cfg(test)]
mod tests {
  use super::*;

  // ── Text ──────────────────────────────────────────────────────────────────

  #[test]
  fn text_field_strips_tags_and_scripts() {
    assert_eq!(sanitize_text_field("<b>Bob</b>"), "Bob");
    assert_eq!(
      sanitize_text_field("Bob<script>alert(1)</script> Smith"),
      "Bob Smith"
    );
    assert_eq!(sanitize_text_field("<STYLE>p{}</STYLE>Ann"), "Ann");
  }

  #[test]
  fn text_field_collapses_whitespace() {
    assert_eq!(sanitize_text_field("  Ada \r\n\t Lovelace  "), "Ada Lovelace");
  }

  #[test]
  fn text_field_keeps_lone_less_than() {
    assert_eq!(sanitize_text_field("a < b"), "a < b");
    assert_eq!(sanitize_text_field("1 <2 <b>3</b>"), "1 <2 3");
  }

  #[test]
  fn text_field_removes_octets() {
    assert_eq!(sanitize_text_field("Bob%20Smith"), "BobSmith");
    assert_eq!(sanitize_text_field("100%"), "100%");
    assert_eq!(sanitize_text_field("a %41%42 b"), "a b");
  }

  #[test]
  fn text_field_drops_control_characters() {
    assert_eq!(sanitize_text_field("Bo\u{7}b"), "Bob");
  }

  #[test]
  fn markup_only_name_becomes_empty() {
    assert_eq!(sanitize_text_field("<script>x</script>"), "");
    assert_eq!(sanitize_text_field("   "), "");
  }

  #[test]
  fn textarea_keeps_line_breaks() {
    assert_eq!(
      sanitize_textarea_field("line one\nline <i>two</i>\n"),
      "line one\nline two"
    );
  }

  // ── Email ─────────────────────────────────────────────────────────────────

  #[test]
  fn accepts_ordinary_addresses() {
    assert!(is_email("bob@example.com"));
    assert!(is_email("first.last+tag@mail.example.co.uk"));
    assert!(is_email("a@b.co"));
  }

  #[test]
  fn rejects_malformed_addresses() {
    for bad in [
      "not-an-email",
      "",
      "a@b.c",
      "@example.com",
      "bob@example",
      "bob@.example.com",
      "bob@example..com",
      "bob@-example.com",
      "bob@exa_mple.com",
      "bo b@example.com",
      "bob@example.com.",
    ] {
      assert!(!is_email(bad), "accepted {bad:?}");
    }
  }

  #[test]
  fn sanitize_email_removes_disallowed_characters() {
    assert_eq!(sanitize_email("  bob@example.com "), "bob@example.com");
    assert_eq!(sanitize_email("b(o)b@exa_mple.com"), "bob@example.com");
    assert_eq!(sanitize_email("bob@.example.com."), "bob@example.com");
  }

  #[test]
  fn sanitize_email_empties_hopeless_input() {
    assert_eq!(sanitize_email("not-an-email"), "");
    assert_eq!(sanitize_email("bob@example"), "");
    assert_eq!(sanitize_email("bob@example..com"), "");
    assert_eq!(sanitize_email("()@example.com"), "");
    assert_eq!(sanitize_email("a@b"), "");
  }

  #[test]
  fn sanitized_addresses_satisfy_grammar() {
    for raw in ["  bob@example.com ", "b(o)b@exa_mple.com", "x@-ab-.cd-"] {
      let clean = sanitize_email(raw);
      assert!(clean.is_empty() || is_email(&clean), "{raw:?} -> {clean:?}");
    }
  }
}
