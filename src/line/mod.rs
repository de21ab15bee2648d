//! Line tokenizer.
//!
//! Splits one raw protocol line into an optional sender prefix, a command
//! token and its ordered parameters, and joins token lists back into wire
//! text using the trailing-colon rule.
//!
//! # Example
//!
//! ```
//! use slirc_session::line::{format_tokens, tokenize};
//!
//! let line = tokenize(":nick!u@h PRIVMSG #rust :hello there").unwrap();
//! assert_eq!(line.prefix.as_deref(), Some("nick!u@h"));
//! assert_eq!(line.command, "PRIVMSG");
//! assert_eq!(line.parameters, vec!["#rust", "hello there"]);
//!
//! let tokens = vec!["PRIVMSG".to_string(), "#rust".to_string(), "hi all".to_string()];
//! assert_eq!(format_tokens(&tokens), "PRIVMSG #rust :hi all");
//! ```

mod nom_parser;

use std::cell::RefCell;
use std::fmt::Write as _;

use crate::ctcp::Ctcp;
use crate::error::MessageParseError;

/// One tokenized protocol line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedLine {
    /// Sender prefix without the leading `:`.
    pub prefix: Option<String>,
    /// Command verb or three-digit numeric, as sent.
    pub command: String,
    /// Ordered parameters; the last one may contain spaces.
    pub parameters: Vec<String>,
}

impl ParsedLine {
    /// The numeric code when the command is exactly three digits.
    pub fn numeric(&self) -> Option<u16> {
        if self.command.len() == 3 && self.command.bytes().all(|b| b.is_ascii_digit()) {
            self.command.parse().ok()
        } else {
            None
        }
    }

    /// Case-insensitive verb comparison.
    #[inline]
    pub fn is_command(&self, verb: &str) -> bool {
        self.command.eq_ignore_ascii_case(verb)
    }

    /// Parameter at `index`, if present.
    #[inline]
    pub fn param(&self, index: usize) -> Option<&str> {
        self.parameters.get(index).map(String::as_str)
    }

    /// The last parameter, if any.
    #[inline]
    pub fn last_param(&self) -> Option<&str> {
        self.parameters.last().map(String::as_str)
    }

    /// The CTCP payload of a two-parameter PRIVMSG or NOTICE.
    pub fn ctcp(&self) -> Option<Ctcp<'_>> {
        if !(self.is_command("PRIVMSG") || self.is_command("NOTICE")) {
            return None;
        }
        match self.parameters.as_slice() {
            [_, body] => Ctcp::parse(body),
            _ => None,
        }
    }

    /// Whether this line is a CTCP reply (NOTICE) rather than a request.
    pub fn is_ctcp_reply(&self) -> bool {
        self.is_command("NOTICE")
    }

    /// Convert to a fresh `Vec` of command plus parameters.
    pub fn to_tokens(&self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(self.parameters.len() + 1);
        tokens.push(self.command.clone());
        tokens.extend(self.parameters.iter().cloned());
        tokens
    }
}

impl std::fmt::Display for ParsedLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, ":{} ", prefix)?;
        }
        f.write_str(&format_tokens(&self.to_tokens()))
    }
}

thread_local! {
    static LAST_LINE: RefCell<Option<(String, ParsedLine)>> = const { RefCell::new(None) };
}

/// Tokenize one raw line.
///
/// The most recent successful result is memoized per thread, so handing the
/// same line to several consumers tokenizes it once.
pub fn tokenize(raw: &str) -> Result<ParsedLine, MessageParseError> {
    if raw.is_empty() {
        return Err(MessageParseError::EmptyMessage);
    }

    let cached = LAST_LINE.with(|slot| {
        slot.borrow()
            .as_ref()
            .filter(|(line, _)| line == raw)
            .map(|(_, parsed)| parsed.clone())
    });
    if let Some(parsed) = cached {
        return Ok(parsed);
    }

    let parsed = tokenize_uncached(raw)?;
    LAST_LINE.with(|slot| {
        *slot.borrow_mut() = Some((raw.to_owned(), parsed.clone()));
    });
    Ok(parsed)
}

/// Tokenize without touching the memo slot.
pub fn tokenize_uncached(raw: &str) -> Result<ParsedLine, MessageParseError> {
    if raw.is_empty() {
        return Err(MessageParseError::EmptyMessage);
    }
    let parts = nom_parser::parse_line(raw)?;
    Ok(ParsedLine {
        prefix: parts.prefix.map(str::to_owned),
        command: parts.command.to_owned(),
        parameters: parts.params.into_iter().map(str::to_owned).collect(),
    })
}

/// Whether a parameter must be sent in trailing (`:`-prefixed) form.
#[inline]
pub fn needs_trailing(param: &str) -> bool {
    param.is_empty() || param.contains(' ') || param.starts_with(':')
}

/// Join a command and its parameters into wire text (no CRLF).
///
/// Only the last parameter may be trailing; it gets the `:` marker when it is
/// empty, contains a space, or starts with `:`.
pub fn format_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut out = String::with_capacity(tokens.iter().map(|t| t.as_ref().len() + 1).sum());
    write_tokens(&mut out, tokens);
    out
}

pub(crate) fn write_tokens<S: AsRef<str>>(out: &mut String, tokens: &[S]) {
    let last = tokens.len().saturating_sub(1);
    for (i, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        if i > 0 {
            out.push(' ');
        }
        if i > 0 && i == last && needs_trailing(token) {
            let _ = write!(out, ":{}", token);
        } else {
            out.push_str(token);
        }
    }
}
