//! Placeholder map for finished HTML fragments.
//!
//! Link HTML is built before the surrounding text is escaped, so it is parked
//! behind an out-of-band marker and restored afterwards. Markers are made of
//! private-use code points, which escaping and emphasis leave untouched and
//! which [`strip_markers`] removes from user text up front.

use std::borrow::Cow;

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';

/// Finished fragments indexed by marker number. Each slot is consumed once.
#[derive(Debug, Default)]
pub struct PlaceholderMap {
    fragments: Vec<Option<String>>,
}

impl PlaceholderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `html` and returns the marker that stands in for it.
    pub fn insert(&mut self, html: String) -> String {
        let marker = format!("{OPEN}{}{CLOSE}", self.fragments.len());
        self.fragments.push(Some(html));
        marker
    }

    /// Number of fragments not yet substituted.
    pub fn pending(&self) -> usize {
        self.fragments.iter().filter(|f| f.is_some()).count()
    }

    /// Replaces every marker in `text` with its fragment, consuming it.
    ///
    /// A marker whose fragment is unknown or already consumed is replaced with
    /// U+FFFD so no marker character survives into the output.
    pub fn substitute(&mut self, text: &str) -> String {
        if self.fragments.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + OPEN.len_utf8()..];
            let Some(end) = after_open.find(CLOSE) else {
                out.push(char::REPLACEMENT_CHARACTER);
                rest = after_open;
                continue;
            };

            let fragment = after_open[..end]
                .parse::<usize>()
                .ok()
                .and_then(|index| self.fragments.get_mut(index))
                .and_then(Option::take);
            match fragment {
                Some(html) => out.push_str(&html),
                None => out.push(char::REPLACEMENT_CHARACTER),
            }
            rest = &after_open[end + CLOSE.len_utf8()..];
        }
        out.push_str(rest);
        out
    }
}

/// Replaces marker code points in untrusted text so it cannot forge a marker.
pub fn strip_markers(text: &str) -> Cow<'_, str> {
    if text.contains([OPEN, CLOSE]) {
        Cow::Owned(text.replace([OPEN, CLOSE], "\u{FFFD}"))
    } else {
        Cow::Borrowed(text)
    }
}
