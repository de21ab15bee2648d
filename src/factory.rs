//! Message classification.
//!
//! [`MessageFactory`] turns one raw line into a typed [`Message`]. Lookup is
//! keyed by command verb, numeric code, or CTCP inner command; custom types
//! registered at runtime are consulted first. Every family has an exact
//! fallback, so any well-formed line classifies.
//!
//! # Example
//!
//! ```
//! use slirc_session::factory::MessageFactory;
//! use slirc_session::message::{CommandMessage, MessageBody};
//!
//! let factory = MessageFactory::new();
//! let msg = factory.classify_and_parse(":nick!u@h PRIVMSG #rust :hello").unwrap();
//! assert!(matches!(msg.body, MessageBody::Command(CommandMessage::Chat(_))));
//!
//! let generic = factory.classify_and_parse("FOOBAR baz qux").unwrap();
//! assert!(matches!(generic.body, MessageBody::Command(CommandMessage::Generic(_))));
//! ```

use std::any::type_name;
use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

use crate::error::{MessageParseError, ProtocolError};
use crate::line::{tokenize, ParsedLine};
use crate::message::*;
use crate::prefix::Prefix;

/// Longest accepted raw line, in bytes.
pub const MAX_LINE_LEN: usize = 512;

/// One registered concrete type, erased to its family.
struct Candidate<F> {
    name: &'static str,
    can_parse: fn(&ParsedLine) -> bool,
    parse: fn(&ParsedLine) -> Result<F, MessageParseError>,
}

impl<F> Clone for Candidate<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for Candidate<F> {}

impl<F> fmt::Debug for Candidate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn short_name<M>() -> &'static str {
    let full = type_name::<M>();
    full.rsplit("::").next().unwrap_or(full)
}

fn parse_as<M, F>(line: &ParsedLine) -> Result<F, MessageParseError>
where
    M: ParseMessage + Into<F>,
{
    M::parse(line).map(Into::into)
}

fn parse_error_as<M>(line: &ParsedLine) -> Result<NumericMessage, MessageParseError>
where
    M: ParseMessage + Into<ErrorMessage>,
{
    M::parse(line).map(|m| NumericMessage::Error(m.into()))
}

impl<F> Candidate<F> {
    fn of<M>() -> Self
    where
        M: ParseMessage + Into<F>,
    {
        Candidate {
            name: short_name::<M>(),
            can_parse: M::can_parse,
            parse: parse_as::<M, F>,
        }
    }

    fn try_parse(&self, line: &ParsedLine) -> Option<Result<F, MessageParseError>> {
        if (self.can_parse)(line) {
            trace!(command = %line.command, handler = self.name, "classified line");
            Some((self.parse)(line))
        } else {
            None
        }
    }
}

/// Classifies raw lines into typed messages.
///
/// Construct one per application (or per connection) and share it by
/// reference; classification only needs `&self`.
#[derive(Debug)]
pub struct MessageFactory {
    custom: Vec<Box<dyn CustomMessage>>,
    commands: HashMap<&'static str, Vec<Candidate<CommandMessage>>>,
    numerics: HashMap<u16, Candidate<NumericMessage>>,
    ctcp_requests: HashMap<&'static str, Candidate<CtcpMessage>>,
    ctcp_replies: HashMap<&'static str, Candidate<CtcpMessage>>,
}

impl Default for MessageFactory {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! register_unique {
    ($factory:ident, $method:ident: $($ty:ty),+ $(,)?) => {
        $(
            let replaced = $factory.$method::<$ty>();
            debug_assert!(
                !replaced,
                "numeric {:03} claimed twice",
                <$ty as NumericKind>::CODE
            );
        )+
    };
}

impl MessageFactory {
    /// A factory with every built-in message type registered.
    pub fn new() -> Self {
        let mut factory = Self::empty();
        factory.register_builtins();
        factory
    }

    /// A factory with nothing registered; every line falls back to the
    /// generic type of its family.
    pub fn empty() -> Self {
        MessageFactory {
            custom: Vec::new(),
            commands: HashMap::new(),
            numerics: HashMap::new(),
            ctcp_requests: HashMap::new(),
            ctcp_replies: HashMap::new(),
        }
    }

    fn register_builtins(&mut self) {
        self.register_command::<Pass>();
        self.register_command::<Nick>();
        self.register_command::<User>();
        self.register_command::<Quit>();
        self.register_command::<Join>();
        self.register_command::<Part>();
        self.register_command::<ChannelMode>();
        self.register_command::<UserMode>();
        self.register_command::<Topic>();
        self.register_command::<Names>();
        self.register_command::<List>();
        self.register_command::<Invite>();
        self.register_command::<Kick>();
        self.register_command::<Chat>();
        self.register_command::<Notice>();
        self.register_command::<Who>();
        self.register_command::<Whois>();
        self.register_command::<Away>();
        self.register_command::<Back>();
        self.register_command::<Ping>();
        self.register_command::<Pong>();
        self.register_command::<Kill>();
        self.register_command::<ErrorCommand>();

        register_unique!(self, register_numeric:
            Welcome, YourHost, Created, MyInfo, SupportReply, UserModeIs,
            LuserClient, LocalUsers, GlobalUsers, UserAway, SelfUnaway, SelfAway,
            WhoisUser, WhoisServer, EndOfWho, WhoisIdle, EndOfWhois, WhoisChannels,
            ChannelModeIs, CreationTime, NoTopic, TopicReply, TopicSetBy, WhoReply,
            NamesReply, EndOfNames, Motd, MotdStart, EndOfMotd,
        );

        register_unique!(self, register_error:
            NoSuchNick, NoSuchServer, NoSuchChannel, CannotSendToChan, TooManyChannels,
            UnknownCommand, NoMotd, NoNicknameGiven, ErroneousNickname, NicknameInUse,
            NickCollision, UserNotInChannel, NotOnChannel, UserOnChannel, NotRegistered,
            NeedMoreParams, AlreadyRegistered, PasswdMismatch, ChannelIsFull, UnknownMode,
            InviteOnlyChan, BannedFromChan, BadChannelKey, NoPrivileges, ChanOpPrivsNeeded,
            UmodeUnknownFlag, UsersDontMatch,
        );

        self.register_ctcp::<ActionRequest>();
        self.register_ctcp::<VersionRequest>();
        self.register_ctcp::<VersionReply>();
        self.register_ctcp::<PingRequest>();
        self.register_ctcp::<PingReply>();
        self.register_ctcp::<TimeRequest>();
        self.register_ctcp::<TimeReply>();
        self.register_ctcp::<ClientInfoRequest>();
        self.register_ctcp::<ClientInfoReply>();
        self.register_ctcp::<FingerRequest>();
        self.register_ctcp::<FingerReply>();
        self.register_ctcp::<UserInfoRequest>();
        self.register_ctcp::<UserInfoReply>();
    }

    /// Register a command type. Several types may share a verb; they are
    /// tried in registration order.
    pub fn register_command<M>(&mut self)
    where
        M: ParseMessage + CommandKind + Into<CommandMessage>,
    {
        self.commands
            .entry(M::COMMAND)
            .or_default()
            .push(Candidate::of::<M>());
    }

    /// Register a numeric type. Returns `true` if it replaced the previous
    /// owner of the code.
    pub fn register_numeric<M>(&mut self) -> bool
    where
        M: ParseMessage + NumericKind + Into<NumericMessage>,
    {
        self.numerics
            .insert(M::CODE, Candidate::of::<M>())
            .is_some()
    }

    /// Register an error numeric type. Returns `true` if it replaced the
    /// previous owner of the code.
    pub fn register_error<M>(&mut self) -> bool
    where
        M: ParseMessage + NumericKind + Into<ErrorMessage>,
    {
        debug_assert!(is_error_code(M::CODE), "{} is not an error code", M::CODE);
        let candidate = Candidate {
            name: short_name::<M>(),
            can_parse: M::can_parse,
            parse: parse_error_as::<M>,
        };
        self.numerics.insert(M::CODE, candidate).is_some()
    }

    /// Register a CTCP type under its inner command and direction.
    pub fn register_ctcp<M>(&mut self)
    where
        M: ParseMessage + CtcpKind + Into<CtcpMessage>,
    {
        let table = if M::REPLY {
            &mut self.ctcp_replies
        } else {
            &mut self.ctcp_requests
        };
        table.insert(M::CTCP_COMMAND, Candidate::of::<M>());
    }

    /// Register an application-defined type. Custom types are consulted
    /// before every built-in family, in registration order.
    pub fn register_custom_message<M>(&mut self, prototype: M)
    where
        M: CustomMessage + 'static,
    {
        self.custom.push(Box::new(prototype));
    }

    /// Name of the type that owns a numeric code, if any.
    pub fn numeric_owner(&self, code: u16) -> Option<&'static str> {
        self.numerics.get(&code).map(|c| c.name)
    }

    /// Every registered numeric code, ascending.
    pub fn registered_numerics(&self) -> Vec<u16> {
        let mut codes: Vec<u16> = self.numerics.keys().copied().collect();
        codes.sort_unstable();
        codes
    }

    /// Classify and populate one raw line (no CRLF).
    ///
    /// Fails with [`ProtocolError::MalformedLine`] when the line is empty or
    /// longer than 512 bytes, and with [`ProtocolError::InvalidMessage`] when
    /// the line cannot be tokenized or the type that claimed it could not
    /// convert a typed field.
    pub fn classify_and_parse(&self, raw: &str) -> Result<Message, ProtocolError> {
        if raw.is_empty() || raw.len() > MAX_LINE_LEN {
            debug!(length = raw.len(), "rejecting malformed line");
            return Err(ProtocolError::MalformedLine { length: raw.len() });
        }

        let line = tokenize(raw).map_err(|e| e.into_protocol(raw))?;
        let body = self.classify(&line).map_err(|e| {
            debug!(error = %e, "claimed line failed to parse");
            e.into_protocol(raw)
        })?;

        Ok(Message {
            prefix: line.prefix.as_deref().map(Prefix::new_from_str),
            body,
        })
    }

    /// Classify an already tokenized line.
    pub fn classify(&self, line: &ParsedLine) -> Result<MessageBody, MessageParseError> {
        if let Some(proto) = self.custom.iter().find(|p| p.can_parse(line)) {
            trace!(command = %line.command, "classified line as custom message");
            let mut message = proto.create();
            message.parse(line)?;
            return Ok(MessageBody::Custom(message));
        }

        if let Some(code) = line.numeric() {
            return self.classify_numeric(code, line).map(MessageBody::Numeric);
        }

        if let Some(ctcp) = line.ctcp() {
            let command = ctcp.command.to_ascii_uppercase();
            return self
                .classify_ctcp(&command, line)
                .map(MessageBody::Ctcp);
        }

        self.classify_command(line).map(MessageBody::Command)
    }

    fn classify_numeric(
        &self,
        code: u16,
        line: &ParsedLine,
    ) -> Result<NumericMessage, MessageParseError> {
        if let Some(result) = self.numerics.get(&code).and_then(|c| c.try_parse(line)) {
            return result;
        }
        if is_error_code(code) {
            debug!(code, "no error handler, using generic error");
            GenericErrorMessage::parse(line).map(|m| NumericMessage::Error(ErrorMessage::Generic(m)))
        } else {
            debug!(code, "no numeric handler, using generic numeric");
            GenericNumericMessage::parse(line).map(NumericMessage::Generic)
        }
    }

    fn classify_ctcp(
        &self,
        command: &str,
        line: &ParsedLine,
    ) -> Result<CtcpMessage, MessageParseError> {
        let reply = line.is_ctcp_reply();
        let table = if reply {
            &self.ctcp_replies
        } else {
            &self.ctcp_requests
        };
        if let Some(result) = table.get(command).and_then(|c| c.try_parse(line)) {
            return result;
        }
        debug!(command, reply, "no CTCP handler, using generic CTCP");
        if reply {
            GenericCtcpReplyMessage::parse(line).map(CtcpMessage::GenericReply)
        } else {
            GenericCtcpRequestMessage::parse(line).map(CtcpMessage::GenericRequest)
        }
    }

    fn classify_command(&self, line: &ParsedLine) -> Result<CommandMessage, MessageParseError> {
        let verb = line.command.to_ascii_uppercase();
        let claimed = self
            .commands
            .get(verb.as_str())
            .and_then(|candidates| candidates.iter().find_map(|c| c.try_parse(line)));
        if let Some(result) = claimed {
            return result;
        }
        debug!(command = %line.command, "no command handler, using generic message");
        GenericMessage::parse(line).map(CommandMessage::Generic)
    }
}
