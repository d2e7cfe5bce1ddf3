//! Citation count value type.

use std::fmt;

/// A citation count, or the marker that it could not be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitationCount {
    Count(u64),
    Unavailable,
}

impl CitationCount {
    /// Parses scraped text into a count.
    ///
    /// Only text made entirely of ASCII digits (after trimming) is accepted.
    /// Thousands separators, signs, or an empty string yield `Unavailable`.
    #[must_use]
    pub fn from_digits(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Self::Unavailable;
        }
        text.parse().map(Self::Count).unwrap_or(Self::Unavailable)
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    /// Renders the value as it appears in the document.
    #[must_use]
    pub fn render(&self, sentinel: &str) -> String {
        match self {
            Self::Count(n) => n.to_string(),
            Self::Unavailable => sentinel.to_string(),
        }
    }
}

impl From<Option<u64>> for CitationCount {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Self::Unavailable, Self::Count)
    }
}

impl fmt::Display for CitationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{}", n),
            Self::Unavailable => f.write_str("unavailable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_digits_accepts_plain_number() {
        assert_eq!(CitationCount::from_digits("42"), CitationCount::Count(42));
        assert_eq!(
            CitationCount::from_digits("  1234\n"),
            CitationCount::Count(1234)
        );
        assert_eq!(CitationCount::from_digits("0"), CitationCount::Count(0));
    }

    #[test]
    fn test_from_digits_rejects_separators_and_signs() {
        assert_eq!(
            CitationCount::from_digits("1,234"),
            CitationCount::Unavailable
        );
        assert_eq!(CitationCount::from_digits("-5"), CitationCount::Unavailable);
        assert_eq!(CitationCount::from_digits("1.5"), CitationCount::Unavailable);
        assert_eq!(CitationCount::from_digits("12 34"), CitationCount::Unavailable);
        assert_eq!(CitationCount::from_digits(""), CitationCount::Unavailable);
        assert_eq!(CitationCount::from_digits("   "), CitationCount::Unavailable);
    }

    #[test]
    fn test_from_digits_rejects_overflow() {
        assert_eq!(
            CitationCount::from_digits("99999999999999999999999"),
            CitationCount::Unavailable
        );
    }

    #[test]
    fn test_render_uses_sentinel_when_unavailable() {
        assert_eq!(CitationCount::Count(7).render("Error"), "7");
        assert_eq!(CitationCount::Unavailable.render("Error"), "Error");
        assert_eq!(CitationCount::Unavailable.render("n/a"), "n/a");
    }

    #[test]
    fn test_from_option() {
        assert_eq!(CitationCount::from(Some(3)), CitationCount::Count(3));
        assert_eq!(CitationCount::from(None), CitationCount::Unavailable);
        assert!(!CitationCount::Unavailable.is_available());
    }
}
