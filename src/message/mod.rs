//! IRC message types.
//!
//! Every concrete message type implements [`MessageKind`] (token output)
//! and [`ParseMessage`] (recognition and population from a
//! [`ParsedLine`]). Concrete types are grouped into four disjoint
//! families: commands, numerics (with the error sub-family), CTCP, and
//! custom extension types. Each family has a generic catch-all that
//! accepts any line within it.
//!
//! # Example
//!
//! ```
//! use slirc_session::message::{Message, MessageKind};
//! use slirc_session::prefix::Prefix;
//!
//! let msg = Message::privmsg("#rust", "Hello, world!")
//!     .with_prefix(Prefix::new_from_str("bot!bot@example.com"));
//! assert_eq!(msg.format(), ":bot!bot@example.com PRIVMSG #rust :Hello, world!");
//! assert_eq!(msg.body.to_tokens(), vec!["PRIVMSG", "#rust", "Hello, world!"]);
//! ```

#[macro_use]
mod macros;

mod command;
mod ctcp;
mod custom;
mod error_reply;
mod numeric;

use std::fmt;

pub use self::command::*;
pub use self::ctcp::*;
pub use self::custom::CustomMessage;
pub use self::error_reply::*;
pub use self::numeric::*;

use crate::error::MessageParseError;
use crate::isupport::ServerSupport;
use crate::line::{format_tokens, ParsedLine};
use crate::mode::ModeChangeSet;
use crate::prefix::Prefix;

/// Output side of the message contract.
pub trait MessageKind: fmt::Debug {
    /// Command or numeric followed by the parameters, in wire order.
    fn to_tokens(&self) -> Vec<String>;

    /// Wire text without prefix or CRLF.
    fn format(&self) -> String {
        format_tokens(&self.to_tokens())
    }

    /// Channels or nicknames this message is addressed to or about.
    fn targets(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Whether this is user-to-user traffic (PRIVMSG, NOTICE, CTCP).
    fn is_conversation(&self) -> bool {
        false
    }
}

/// Input side of the message contract.
pub trait ParseMessage: MessageKind + Sized {
    /// Whether this type claims the line.
    fn can_parse(line: &ParsedLine) -> bool;

    /// Populate from a line this type claimed. Fails only when a typed
    /// field (a number, a timestamp) cannot be converted.
    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError>;
}

/// Command messages: fixed verb.
pub trait CommandKind {
    /// Upper-case verb.
    const COMMAND: &'static str;
}

/// Numeric messages: fixed three-digit code.
pub trait NumericKind {
    /// Reply code.
    const CODE: u16;
}

/// CTCP messages: fixed inner command and direction.
pub trait CtcpKind {
    /// Upper-case inner command.
    const CTCP_COMMAND: &'static str;
    /// `true` for NOTICE replies, `false` for PRIVMSG requests.
    const REPLY: bool;
}

/// Shared view of numeric replies.
pub trait NumericReply: MessageKind {
    /// Reply code.
    fn code(&self) -> u16;

    /// Client the reply is addressed to (first parameter).
    fn target(&self) -> &str;
}

/// Message payload, one variant per family.
#[derive(Debug)]
pub enum MessageBody {
    /// Verb-identified messages.
    Command(CommandMessage),
    /// Three-digit replies, errors included.
    Numeric(NumericMessage),
    /// `\x01`-wrapped PRIVMSG/NOTICE payloads.
    Ctcp(CtcpMessage),
    /// Types registered at runtime.
    Custom(Box<dyn CustomMessage>),
}

impl Clone for MessageBody {
    fn clone(&self) -> Self {
        match self {
            MessageBody::Command(m) => MessageBody::Command(m.clone()),
            MessageBody::Numeric(m) => MessageBody::Numeric(m.clone()),
            MessageBody::Ctcp(m) => MessageBody::Ctcp(m.clone()),
            MessageBody::Custom(m) => MessageBody::Custom(m.clone_box()),
        }
    }
}

impl PartialEq for MessageBody {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MessageBody::Command(a), MessageBody::Command(b)) => a == b,
            (MessageBody::Numeric(a), MessageBody::Numeric(b)) => a == b,
            (MessageBody::Ctcp(a), MessageBody::Ctcp(b)) => a == b,
            (MessageBody::Custom(a), MessageBody::Custom(b)) => a.to_tokens() == b.to_tokens(),
            _ => false,
        }
    }
}

/// Dispatch a `MessageKind` method to whichever family holds the payload.
macro_rules! dispatch_body {
    ($body:expr, $m:ident => $call:expr) => {
        match $body {
            MessageBody::Command($m) => $call,
            MessageBody::Numeric($m) => $call,
            MessageBody::Ctcp($m) => $call,
            MessageBody::Custom($m) => $call,
        }
    };
}

impl MessageKind for MessageBody {
    fn to_tokens(&self) -> Vec<String> {
        dispatch_body!(self, m => m.to_tokens())
    }

    fn targets(&self) -> Vec<&str> {
        dispatch_body!(self, m => m.targets())
    }

    fn is_conversation(&self) -> bool {
        dispatch_body!(self, m => m.is_conversation())
    }
}

impl From<CommandMessage> for MessageBody {
    fn from(m: CommandMessage) -> Self {
        MessageBody::Command(m)
    }
}

impl From<NumericMessage> for MessageBody {
    fn from(m: NumericMessage) -> Self {
        MessageBody::Numeric(m)
    }
}

impl From<ErrorMessage> for MessageBody {
    fn from(m: ErrorMessage) -> Self {
        MessageBody::Numeric(NumericMessage::Error(m))
    }
}

impl From<CtcpMessage> for MessageBody {
    fn from(m: CtcpMessage) -> Self {
        MessageBody::Ctcp(m)
    }
}

impl From<Box<dyn CustomMessage>> for MessageBody {
    fn from(m: Box<dyn CustomMessage>) -> Self {
        MessageBody::Custom(m)
    }
}

/// A classified IRC message with its optional sender prefix.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    /// Sender, when the line carried a prefix.
    pub prefix: Option<Prefix>,
    /// The typed payload.
    pub body: MessageBody,
}

impl Message {
    /// A prefix-less message.
    pub fn new(body: impl Into<MessageBody>) -> Self {
        Message {
            prefix: None,
            body: body.into(),
        }
    }

    /// Attach a sender prefix.
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Wire text including the prefix, without CRLF.
    pub fn format(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!(":{} {}", prefix, self.body.format()),
            None => self.body.format(),
        }
    }

    /// Sender nickname for user prefixes.
    pub fn source_nickname(&self) -> Option<&str> {
        self.prefix.as_ref().and_then(Prefix::nick)
    }

    /// Targets that are channels on this server, with STATUSMSG symbols
    /// (`@#ops`) stripped.
    pub fn channel_targets<'a>(&'a self, support: &ServerSupport) -> Vec<&'a str> {
        self.body
            .targets()
            .into_iter()
            .map(|t| support.strip_statusmsg(t))
            .filter(|t| support.is_channel_name(t))
            .collect()
    }

    /// Non-channel targets of user-to-user traffic.
    pub fn query_targets<'a>(&'a self, support: &ServerSupport) -> Vec<&'a str> {
        if !self.body.is_conversation() {
            return Vec::new();
        }
        self.body
            .targets()
            .into_iter()
            .filter(|t| !support.is_channel_name(support.strip_statusmsg(t)))
            .collect()
    }

    /// `PRIVMSG <target> :<text>`
    pub fn privmsg(target: impl Into<String>, text: impl Into<String>) -> Self {
        Message::new(CommandMessage::Chat(Chat {
            targets: vec![target.into()],
            text: text.into(),
        }))
    }

    /// `NOTICE <target> :<text>`
    pub fn notice(target: impl Into<String>, text: impl Into<String>) -> Self {
        Message::new(CommandMessage::Notice(Notice {
            targets: vec![target.into()],
            text: text.into(),
        }))
    }

    /// `JOIN <channel>`
    pub fn join(channel: impl Into<String>) -> Self {
        Message::new(CommandMessage::Join(Join {
            channels: vec![channel.into()],
            keys: Vec::new(),
        }))
    }

    /// `PART <channel>`
    pub fn part(channel: impl Into<String>) -> Self {
        Message::new(CommandMessage::Part(Part {
            channels: vec![channel.into()],
            reason: None,
        }))
    }

    /// `NICK <nickname>`
    pub fn nick(nickname: impl Into<String>) -> Self {
        Message::new(CommandMessage::Nick(Nick {
            nickname: nickname.into(),
        }))
    }

    /// `QUIT [:reason]`
    pub fn quit(reason: Option<String>) -> Self {
        Message::new(CommandMessage::Quit(Quit { reason }))
    }

    /// `MODE <target> <changes> [args...]`, as a channel or user MODE
    /// depending on the shape of `target`.
    pub fn mode(target: impl Into<String>, changes: &ModeChangeSet, support: &ServerSupport) -> Self {
        let target = target.into();
        let (modes, arguments) = changes.to_mode_string();
        if support.is_channel_name(&target) {
            Message::new(CommandMessage::ChannelMode(ChannelMode {
                channel: target,
                modes,
                arguments,
            }))
        } else {
            Message::new(CommandMessage::UserMode(UserMode {
                nickname: target,
                modes,
            }))
        }
    }

    /// `PONG <token>`
    pub fn pong(token: impl Into<String>) -> Self {
        Message::new(CommandMessage::Pong(Pong {
            server: token.into(),
            token: None,
        }))
    }

    /// `PRIVMSG <target> :\x01ACTION <text>\x01`
    pub fn ctcp_action(target: impl Into<String>, text: impl Into<String>) -> Self {
        Message::new(CtcpMessage::Action(ActionRequest {
            target: target.into(),
            text: Some(text.into()),
        }))
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Whether `name` looks like a channel before any ISUPPORT is known.
pub(crate) fn looks_like_channel(name: &str) -> bool {
    name.starts_with(['#', '&', '+', '!'])
}

/// Fail unless the line carries at least `expected` parameters.
pub(crate) fn require(line: &ParsedLine, expected: usize) -> Result<(), MessageParseError> {
    if line.parameters.len() < expected {
        return Err(MessageParseError::NotEnoughArguments {
            expected,
            got: line.parameters.len(),
        });
    }
    Ok(())
}

/// Split a comma-separated list, dropping empty items.
pub(crate) fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parse a typed numeric field.
pub(crate) fn parse_number<T: std::str::FromStr>(
    field: &'static str,
    value: &str,
) -> Result<T, MessageParseError> {
    value.parse().map_err(|_| MessageParseError::InvalidNumber {
        field,
        value: value.to_owned(),
    })
}
