// SPDX-License-Identifier: MIT

//! Narrow HTML fragment extraction for the portal's responses.
//!
//! The portal renders everything as HTML pages; the data the client needs
//! lives in a handful of known spots: the mobile-view container
//! (`<div class="sp_view">`) holding one `<form>` per station or cycle, the
//! user-status paragraph (`<p class="usr_stat">`), hidden inputs, and the
//! session-expired message block. This module exposes exactly those
//! accessors and nothing else. Scanning is case-insensitive on tag and
//! attribute names and tolerant of attribute order and quoting style.

/// One `<form>` block extracted from a list response. Opaque to callers
/// except through the accessors below.
#[derive(Debug, Clone)]
pub struct Form {
    raw: String,
}

impl Form {
    fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
        }
    }

    /// Value of the named hidden input inside this form.
    ///
    /// The portal's forms are well-formed per event type, so a missing
    /// field is a protocol violation the caller turns into an error.
    pub fn hidden_field(&self, name: &str) -> Option<String> {
        hidden_input_value(&self.raw, name)
    }

    /// Inner markup of the form's anchor element.
    pub fn anchor_contents(&self) -> Option<&str> {
        inner_block(&self.raw, "a")
    }

    /// Raw markup of the form, for tests and diagnostics.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// All `<form>` blocks inside the mobile-view container, in document order.
///
/// `None` when the container itself is missing from the page; that is how
/// the portal signals "no stations/cycles here", not an error.
pub fn parse_form_list(body: &str) -> Option<Vec<Form>> {
    let container = find_class_block(body, "div", "sp_view")?;
    Some(
        collect_blocks(container, "form")
            .into_iter()
            .map(Form::new)
            .collect(),
    )
}

/// Inner markup of the user-status paragraph, when present.
///
/// The paragraph only appears while the account holds a reservation or an
/// active rental; absence is classified as neutral upstream.
pub fn parse_user_status(body: &str) -> Option<String> {
    find_class_block(body, "p", "usr_stat").map(|s| s.to_string())
}

/// Station name and availability text from a parking form's anchor, which
/// the portal renders as `name<br/>availability`.
pub fn parking_info(form: &Form) -> Option<(String, String)> {
    let text = form.anchor_contents()?;
    let (name, availability) = split_line_break(text)?;
    Some((name.trim().to_string(), availability.trim().to_string()))
}

/// Session token from a login response's hidden `SessionID` input.
pub fn session_token(body: &str) -> Option<String> {
    hidden_input_value(body, "SessionID")
}

/// Whether the page is the portal's "Please login again" interstitial.
pub fn is_session_expired(body: &str) -> bool {
    find_class_block(body, "div", "main_inner_message")
        .map(|inner| inner.contains("Please login again"))
        .unwrap_or(false)
}

/// Drop every `<...>` run, keeping the text between tags.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Value of the first `<input>` whose `name` attribute matches.
pub fn hidden_input_value(html: &str, name: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let mut pos = 0;
    while let Some((start, open_end)) = find_open_tag(&lower, "input", pos) {
        let attrs = &html[start + "<input".len()..open_end];
        if attr_value(attrs, "name").as_deref() == Some(name) {
            return attr_value(attrs, "value");
        }
        pos = open_end + 1;
    }
    None
}

/// Split anchor text on its single `<br>`/`<br/>` line break.
fn split_line_break(text: &str) -> Option<(&str, &str)> {
    let lower = text.to_ascii_lowercase();
    let pos = lower.find("<br")?;
    // guard against matching a longer tag name
    match lower.as_bytes().get(pos + 3) {
        Some(b'>') | Some(b'/') | Some(b' ') => {}
        _ => return None,
    }
    let rest = &text[pos..];
    let gt = rest.find('>')?;
    Some((&text[..pos], &rest[gt + 1..]))
}

/// Inner markup of the first block with the given tag and class token.
fn find_class_block<'a>(body: &'a str, tag: &str, class: &str) -> Option<&'a str> {
    let lower = body.to_ascii_lowercase();
    let mut pos = 0;
    while let Some((start, open_end)) = find_open_tag(&lower, tag, pos) {
        let attrs = &body[start + 1 + tag.len()..open_end];
        let has_class = attr_value(attrs, "class")
            .map(|v| v.split_ascii_whitespace().any(|t| t == class))
            .unwrap_or(false);
        if !has_class {
            pos = open_end + 1;
            continue;
        }
        let inner_start = open_end + 1;
        let close = find_matching_close(&lower, tag, inner_start)?;
        return Some(&body[inner_start..close]);
    }
    None
}

/// Inner markup of the first block with the given tag.
fn inner_block<'a>(body: &'a str, tag: &str) -> Option<&'a str> {
    let lower = body.to_ascii_lowercase();
    let (_, open_end) = find_open_tag(&lower, tag, 0)?;
    let inner_start = open_end + 1;
    let close = find_matching_close(&lower, tag, inner_start)?;
    Some(&body[inner_start..close])
}

/// Every non-nested block with the given tag, in document order.
fn collect_blocks<'a>(body: &'a str, tag: &str) -> Vec<&'a str> {
    let lower = body.to_ascii_lowercase();
    let close_pat = format!("</{}", tag);
    let mut out = Vec::new();
    let mut pos = 0;
    while let Some((_, open_end)) = find_open_tag(&lower, tag, pos) {
        let inner_start = open_end + 1;
        let Some(close) = lower[inner_start..].find(&close_pat) else {
            break;
        };
        let close = inner_start + close;
        out.push(&body[inner_start..close]);
        pos = close + close_pat.len();
    }
    out
}

/// Locate the next `<tag ...>` opening at or after `from`.
/// Returns (index of `<`, index of the closing `>`).
fn find_open_tag(lower: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let pat = format!("<{}", tag);
    let mut search = from;
    loop {
        let start = lower[search..].find(&pat)? + search;
        let after = start + pat.len();
        match lower.as_bytes().get(after) {
            Some(c) if c.is_ascii_whitespace() || *c == b'>' || *c == b'/' => {
                let end = tag_end(lower, after)?;
                return Some((start, end));
            }
            None => return None,
            _ => search = after,
        }
    }
}

/// Index of the `>` that closes a tag opened before `from`, skipping
/// quoted attribute values.
fn tag_end(s: &str, from: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate().skip(from) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'>' => return Some(i),
                _ => {}
            },
        }
    }
    None
}

/// Index of the `</tag` matching an already-consumed opening tag,
/// counting nested openings of the same tag.
fn find_matching_close(lower: &str, tag: &str, from: usize) -> Option<usize> {
    let close_pat = format!("</{}", tag);
    let mut depth = 0usize;
    let mut pos = from;
    loop {
        let next_close = lower[pos..].find(&close_pat)? + pos;
        match find_open_tag(lower, tag, pos) {
            Some((open, open_end)) if open < next_close => {
                depth += 1;
                pos = open_end + 1;
            }
            _ => {
                if depth == 0 {
                    return Some(next_close);
                }
                depth -= 1;
                pos = next_close + close_pat.len();
            }
        }
    }
}

/// Value of a named attribute inside a tag's attribute text. Handles
/// double-quoted, single-quoted, and bare values.
fn attr_value(attrs: &str, name: &str) -> Option<String> {
    let lower = attrs.to_ascii_lowercase();
    let needle = name.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut search = 0;
    while let Some(found) = lower[search..].find(&needle) {
        let start = search + found;
        let end = start + needle.len();
        let bounded = start == 0 || bytes[start - 1].is_ascii_whitespace();
        let mut i = end;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if !bounded || i >= bytes.len() || bytes[i] != b'=' {
            search = end;
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let raw = attrs.as_bytes();
        if i >= raw.len() {
            return None;
        }
        return match raw[i] {
            quote @ (b'"' | b'\'') => {
                let vstart = i + 1;
                let vend = attrs[vstart..].find(quote as char)? + vstart;
                Some(attrs[vstart..vend].to_string())
            }
            _ => {
                let vstart = i;
                let mut vend = vstart;
                while vend < raw.len()
                    && !raw[vend].is_ascii_whitespace()
                    && raw[vend] != b'>'
                    && raw[vend] != b'/'
                {
                    vend += 1;
                }
                Some(attrs[vstart..vend].to_string())
            }
        };
    }
    None
}
