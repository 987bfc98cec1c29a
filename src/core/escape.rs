//! Escaping layer for the HTML renderer.
//!
//! Every user-supplied value reaches the document through one of these
//! functions. They return [`SafeHtml`], which is the only thing the renderer
//! interpolates.

use std::fmt;

/// A fragment that is safe to place in HTML text content or inside a
/// double-quoted attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeHtml(String);

impl SafeHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn escape_into(out: &mut String, raw: &str) {
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// Escapes free text for HTML body or attribute context.
pub fn text(raw: &str) -> SafeHtml {
    let mut out = String::with_capacity(raw.len());
    escape_into(&mut out, raw);
    SafeHtml(out)
}

const BLOCKED_SCHEMES: [&str; 2] = ["javascript", "vbscript"];

/// Escapes a URL for a `src`/`href` attribute.
///
/// Control characters are dropped (browsers ignore them inside URLs, so
/// `java\nscript:` would otherwise slip through) and script schemes collapse
/// to `#`.
pub fn url_attr(raw: &str) -> SafeHtml {
    let cleaned: String = raw.trim().chars().filter(|c| !c.is_ascii_control()).collect();

    if let Some((scheme, _)) = cleaned.split_once(':') {
        let scheme = scheme.trim().to_ascii_lowercase();
        if BLOCKED_SCHEMES.contains(&scheme.as_str()) {
            tracing::warn!("Blocked URL with '{}:' scheme", scheme);
            return SafeHtml("#".to_string());
        }
    }

    text(&cleaned)
}

/// Passes a CSS color through when it is a hex color or a plain keyword,
/// otherwise returns `fallback`.
pub fn css_color(raw: &str, fallback: &str) -> SafeHtml {
    let value = raw.trim();
    let accepted = match value.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic()),
    };

    if accepted {
        SafeHtml(value.to_string())
    } else {
        text(fallback)
    }
}
