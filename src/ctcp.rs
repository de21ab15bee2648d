//! CTCP (Client-to-Client Protocol) payload handling.
//!
//! CTCP requests travel inside PRIVMSG bodies and replies inside NOTICE
//! bodies, wrapped in `\x01` delimiters.
//!
//! # Reference
//! - CTCP: <https://modern.ircdocs.horse/ctcp.html>
//!
//! # Example
//!
//! ```
//! use slirc_session::ctcp::{encode, Ctcp};
//!
//! let ctcp = Ctcp::parse("\x01ACTION waves hello\x01").unwrap();
//! assert_eq!(ctcp.command, "ACTION");
//! assert_eq!(ctcp.params, Some("waves hello"));
//!
//! assert_eq!(encode("VERSION", None), "\x01VERSION\x01");
//! ```

use std::fmt;

/// The CTCP delimiter character (`\x01`).
pub const CTCP_DELIM: char = '\x01';

/// A borrowed CTCP payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ctcp<'a> {
    /// The inner command, as sent.
    pub command: &'a str,
    /// Text following the inner command.
    pub params: Option<&'a str>,
}

impl<'a> Ctcp<'a> {
    /// Parse a CTCP payload from a PRIVMSG/NOTICE body.
    ///
    /// A missing closing delimiter is tolerated. Returns `None` when the body
    /// is not CTCP or carries no inner command.
    pub fn parse(text: &'a str) -> Option<Self> {
        let text = text.strip_prefix(CTCP_DELIM)?;
        let text = text.strip_suffix(CTCP_DELIM).unwrap_or(text);

        let (command, params) = match text.split_once(' ') {
            Some((command, params)) => (command, Some(params)),
            None => (text, None),
        };

        if command.is_empty() {
            return None;
        }

        Some(Self { command, params })
    }

    /// Check if a message body looks like CTCP.
    #[inline]
    pub fn is_ctcp(text: &str) -> bool {
        text.starts_with(CTCP_DELIM)
    }

    /// Case-insensitive inner command comparison.
    #[inline]
    pub fn is(&self, command: &str) -> bool {
        self.command.eq_ignore_ascii_case(command)
    }
}

impl fmt::Display for Ctcp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CTCP_DELIM, self.command)?;
        if let Some(params) = self.params {
            write!(f, " {}", params)?;
        }
        write!(f, "{}", CTCP_DELIM)
    }
}

/// Build a delimited CTCP body. The closing delimiter is always written.
pub fn encode(command: &str, params: Option<&str>) -> String {
    Ctcp { command, params }.to_string()
}
