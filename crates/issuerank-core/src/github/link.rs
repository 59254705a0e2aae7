// SPDX-License-Identifier: Apache-2.0

//! RFC 8288 `Link` header parsing for GitHub pagination.
//!
//! GitHub advertises neighbouring pages as
//! `<https://api.github.com/...&page=2>; rel="next", <...&page=5>; rel="last"`.

use std::collections::HashMap;

use reqwest::header::{HeaderMap, LINK};

/// Parses a `Link` header value into a map from relation name to URL.
///
/// Malformed entries are skipped. When a relation appears more than once the
/// first URL wins. A multi-valued relation (`rel="next last"`) registers the
/// URL under every listed name.
#[must_use]
pub fn parse_link_header(value: &str) -> HashMap<String, String> {
    let mut links = HashMap::new();

    for entry in split_entries(value) {
        let entry = entry.trim();
        let Some(rest) = entry.strip_prefix('<') else {
            continue;
        };
        let Some(end) = rest.find('>') else {
            continue;
        };
        let url = rest[..end].trim();
        if url.is_empty() {
            continue;
        }

        for param in rest[end + 1..].split(';') {
            let Some((name, value)) = param.split_once('=') else {
                continue;
            };
            if !name.trim().eq_ignore_ascii_case("rel") {
                continue;
            }
            let value = value.trim().trim_matches('"');
            for rel in value.split_ascii_whitespace() {
                links
                    .entry(rel.to_ascii_lowercase())
                    .or_insert_with(|| url.to_string());
            }
        }
    }

    links
}

/// Returns the `rel="next"` URL advertised in the response headers, if any.
#[must_use]
pub fn next_link(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(LINK)?.to_str().ok()?;
    parse_link_header(value).remove("next")
}

/// Splits on commas that are not inside `<...>`.
fn split_entries(value: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in value.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&value[start..]);
    entries
}
