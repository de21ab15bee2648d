//! IRC case-mapping functions.
//!
//! IRC uses a special case-insensitive comparison where some characters
//! are considered equivalent (e.g., `[` and `{`). Which characters fold
//! is announced by the server through the ISUPPORT `CASEMAPPING` token;
//! `rfc1459` is assumed until the server says otherwise.

/// Case mapping rule announced by `CASEMAPPING`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CaseMapping {
    /// Only `A-Z` fold to `a-z`.
    Ascii,
    /// ASCII plus `[]\~` fold to `{}|^`.
    #[default]
    Rfc1459,
    /// ASCII plus `[]\` fold to `{}|` (no `~`).
    StrictRfc1459,
}

impl CaseMapping {
    /// Resolve a `CASEMAPPING` token value. Unknown mappings fall back to `rfc1459`.
    pub fn from_token(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "ascii" => CaseMapping::Ascii,
            "strict-rfc1459" => CaseMapping::StrictRfc1459,
            _ => CaseMapping::Rfc1459,
        }
    }

    /// The token value for this mapping.
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseMapping::Ascii => "ascii",
            CaseMapping::Rfc1459 => "rfc1459",
            CaseMapping::StrictRfc1459 => "strict-rfc1459",
        }
    }

    #[inline]
    fn fold_char(&self, c: char) -> char {
        match (self, c) {
            (_, 'A'..='Z') => c.to_ascii_lowercase(),
            (CaseMapping::Ascii, _) => c,
            (_, '[') => '{',
            (_, ']') => '}',
            (_, '\\') => '|',
            (CaseMapping::Rfc1459, '~') => '^',
            _ => c,
        }
    }

    /// Convert a string to its folded (lowercase) form under this mapping.
    pub fn fold(&self, s: &str) -> String {
        s.chars().map(|c| self.fold_char(c)).collect()
    }

    /// Compare two strings case-insensitively under this mapping.
    pub fn eq(&self, a: &str, b: &str) -> bool {
        a.len() == b.len()
            && a
                .chars()
                .zip(b.chars())
                .all(|(ca, cb)| self.fold_char(ca) == self.fold_char(cb))
    }
}

/// Convert a string to IRC lowercase using RFC 1459 case mapping.
pub fn irc_to_lower(s: &str) -> String {
    CaseMapping::Rfc1459.fold(s)
}

/// Compare two strings using RFC 1459 case-insensitive comparison.
pub fn irc_eq(a: &str, b: &str) -> bool {
    CaseMapping::Rfc1459.eq(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc1459_folding() {
        assert_eq!(irc_to_lower("Nick[Away]~"), "nick{away}^");
        assert!(irc_eq("FOO\\bar", "foo|BAR"));
        assert!(!irc_eq("foo", "fooo"));
    }

    #[test]
    fn test_strict_and_ascii() {
        assert_eq!(CaseMapping::StrictRfc1459.fold("A~[x]"), "a~{x}");
        assert_eq!(CaseMapping::Ascii.fold("A~[x]"), "a~[x]");
        assert!(!CaseMapping::Ascii.eq("[a]", "{a}"));
    }

    #[test]
    fn test_from_token() {
        assert_eq!(CaseMapping::from_token("ascii"), CaseMapping::Ascii);
        assert_eq!(
            CaseMapping::from_token("STRICT-RFC1459"),
            CaseMapping::StrictRfc1459
        );
        assert_eq!(CaseMapping::from_token("rfc7613"), CaseMapping::Rfc1459);
        assert_eq!(CaseMapping::default().as_str(), "rfc1459");
    }
}
