//! Citation region repair and update.
//!
//! The target document carries one canonical region:
//!
//! ```html
//! <div id="citation-matrix">Citations: <span id="citation_count">42</span></div>
//! ```
//!
//! Patching first normalizes whatever region is present (stale, malformed, or
//! duplicated) back into that shape, inserts it before `</body>` when it is
//! missing, and finally writes the count into the inner span.

use crate::citation::CitationCount;
use crate::constants::{CONTAINER_ID, COUNT_ID, DEFAULT_SENTINEL};
use crate::error::PatchError;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Container open tag: any attribute order, either quote style.
static CONTAINER_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"(?i)<div\b[^>]*?\sid\s*=\s*["']{}["'][^>]*>"#,
        regex::escape(CONTAINER_ID)
    ))
    .expect("container pattern is valid")
});

static DIV_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</div\s*>").expect("div close pattern is valid"));

static COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"(?s)(<span id="{}">)(.*?)(</span>)"#,
        regex::escape(COUNT_ID)
    ))
    .expect("count pattern is valid")
});

static BODY_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</body\s*>").expect("body pattern is valid"));

/// Result of patching a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    pub text: String,
    /// True iff `text` differs from the input byte-for-byte.
    pub changed: bool,
}

/// Rewrites the citation region of an HTML document.
#[derive(Debug, Clone)]
pub struct DocumentPatcher {
    sentinel: String,
}

impl Default for DocumentPatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SENTINEL)
    }
}

impl DocumentPatcher {
    pub fn new(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
        }
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    pub fn patch(&self, document: &str, count: &CitationCount) -> Result<Patched, PatchError> {
        let repaired = normalize_region(document)?;
        let value = count.render(&self.sentinel);

        let text = COUNT_RE
            .replace_all(&repaired, |caps: &Captures| {
                format!("{}{}{}", &caps[1], value, &caps[3])
            })
            .into_owned();

        let changed = text != document;
        Ok(Patched { text, changed })
    }
}

/// Canonical region markup holding `value`.
#[must_use]
pub fn canonical_region(value: &str) -> String {
    format!(
        r#"<div id="{}">Citations: <span id="{}">{}</span></div>"#,
        CONTAINER_ID, COUNT_ID, value
    )
}

/// Replaces the first container with a zeroed canonical region and drops any
/// later duplicates. Inserts one before `</body>` if none exists.
///
/// A container runs from its open tag to the next `</div>`. An open tag with
/// no `</div>` after it counts as a container of just that tag, so a stray
/// open tag is consumed here and can never pair with the canonical region's
/// close on a later run.
///
/// Insertion keys on the container, not on the inner span: a
/// `citation_count` span outside any container does not suppress insertion,
/// and it is updated alongside the canonical one, leaving two spans with the
/// same id.
fn normalize_region(document: &str) -> Result<String, PatchError> {
    let canonical = canonical_region("0");
    let mut repaired = String::with_capacity(document.len() + canonical.len());
    let mut last = 0;
    let mut found = false;

    while let Some(open) = CONTAINER_OPEN_RE.find_at(document, last) {
        let end = match DIV_CLOSE_RE.find_at(document, open.end()) {
            Some(close) => close.end(),
            None => {
                log::debug!("citation container at byte {} is never closed", open.start());
                open.end()
            }
        };

        repaired.push_str(&document[last..open.start()]);
        if !found {
            repaired.push_str(&canonical);
            found = true;
        } else {
            log::debug!("dropping duplicate citation container at byte {}", open.start());
        }
        last = end;
    }
    repaired.push_str(&document[last..]);

    if !found {
        let close = BODY_CLOSE_RE
            .find(&repaired)
            .ok_or(PatchError::MissingInsertionPoint)?;
        log::debug!("inserting citation container before </body>");
        repaired.insert_str(close.start(), &canonical);
    }

    Ok(repaired)
}
