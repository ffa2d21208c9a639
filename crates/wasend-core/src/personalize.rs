//! Message personalization and chat deep links.
//!
//! Placeholders are plain literal tokens replaced everywhere they occur.
//! There is no escaping and no templating language behind them.

use crate::contact::Contact;
use crate::error::{Result, WasendError};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const FIRST_NAME_PLACEHOLDER: &str = "{{firstName}}";
pub const LAST_NAME_PLACEHOLDER: &str = "{{lastName}}";
pub const PLACEHOLDERS: &[&str] = &[FIRST_NAME_PLACEHOLDER, LAST_NAME_PLACEHOLDER];

pub const CHAT_BASE_URL: &str = "https://web.whatsapp.com/send";

/// Bytes left unescaped in a URI component: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Fill `template` with the contact's names and trim the result.
///
/// A blank template is rejected before any substitution happens.
pub fn personalize(template: &str, contact: &Contact) -> Result<String> {
    if template.trim().is_empty() {
        return Err(WasendError::EmptyTemplate);
    }
    Ok(substitute(template, contact).trim().to_string())
}

// First names are filled before last names, so a first name holding the
// last-name token is expanded by the second pass.
fn substitute(template: &str, contact: &Contact) -> String {
    template
        .replace(FIRST_NAME_PLACEHOLDER, &contact.first_name)
        .replace(LAST_NAME_PLACEHOLDER, &contact.last_name)
}

pub fn build_link(phone: &str, message: &str) -> String {
    build_link_with_base(CHAT_BASE_URL, phone, message)
}

/// `<base>?phone=<phone>&text=<percent-encoded message>`. The phone is used as stored.
pub fn build_link_with_base(base: &str, phone: &str, message: &str) -> String {
    format!(
        "{base}?phone={phone}&text={}",
        utf8_percent_encode(message, URI_COMPONENT)
    )
}

/// Replace the `[start, end)` char range of `text` with `placeholder`.
///
/// Returns the new text and the cursor position just after the inserted
/// token. Offsets are counted in chars and clamped to the text.
pub fn insert_placeholder(text: &str, start: usize, end: usize, placeholder: &str) -> (String, usize) {
    let len = text.chars().count();
    let start = start.min(len);
    let end = end.clamp(start, len);
    let byte_at = |idx: usize| {
        text.char_indices()
            .nth(idx)
            .map(|(b, _)| b)
            .unwrap_or(text.len())
    };
    let (head, tail) = (&text[..byte_at(start)], &text[byte_at(end)..]);
    let mut out = String::with_capacity(head.len() + placeholder.len() + tail.len());
    out.push_str(head);
    out.push_str(placeholder);
    out.push_str(tail);
    (out, start + placeholder.chars().count())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
