//! Command messages, identified by their verb.

use super::{looks_like_channel, require, split_list, CommandKind, MessageKind, ParseMessage};
use crate::error::MessageParseError;
use crate::isupport::ServerSupport;
use crate::line::ParsedLine;
use crate::mode::{parse_modes, parse_user_modes, ModeChangeSet};

message_family! {
    /// Verb-identified messages.
    pub enum CommandMessage as MessageKind {
        Pass(Pass),
        Nick(Nick),
        User(User),
        Quit(Quit),
        Join(Join),
        Part(Part),
        ChannelMode(ChannelMode),
        UserMode(UserMode),
        Topic(Topic),
        Names(Names),
        List(List),
        Invite(Invite),
        Kick(Kick),
        /// PRIVMSG without a CTCP payload.
        Chat(Chat),
        /// NOTICE without a CTCP payload.
        Notice(Notice),
        Who(Who),
        Whois(Whois),
        /// AWAY with a message.
        Away(Away),
        /// AWAY without a message.
        Back(Back),
        Ping(Ping),
        Pong(Pong),
        Kill(Kill),
        Error(ErrorCommand),
        /// Any other verb.
        Generic(GenericMessage),
    }
}

/// Build a token list from a verb and its parameters.
fn tokens<const N: usize>(command: &str, params: [&str; N]) -> Vec<String> {
    let mut out = Vec::with_capacity(N + 1);
    out.push(command.to_owned());
    out.extend(params.iter().map(|p| (*p).to_owned()));
    out
}

fn is_verb<M: CommandKind>(line: &ParsedLine) -> bool {
    line.is_command(M::COMMAND)
}

fn param(line: &ParsedLine, index: usize) -> String {
    line.param(index).unwrap_or_default().to_owned()
}

fn opt_param(line: &ParsedLine, index: usize) -> Option<String> {
    line.param(index).map(str::to_owned)
}

/// `PASS <password>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pass {
    pub password: String,
}

impl CommandKind for Pass {
    const COMMAND: &'static str = "PASS";
}

impl MessageKind for Pass {
    fn to_tokens(&self) -> Vec<String> {
        tokens(Self::COMMAND, [&self.password])
    }
}

impl ParseMessage for Pass {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && !line.parameters.is_empty()
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        require(line, 1)?;
        Ok(Pass {
            password: param(line, 0),
        })
    }
}

/// `NICK <nickname>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nick {
    pub nickname: String,
}

impl CommandKind for Nick {
    const COMMAND: &'static str = "NICK";
}

impl MessageKind for Nick {
    fn to_tokens(&self) -> Vec<String> {
        tokens(Self::COMMAND, [&self.nickname])
    }
}

impl ParseMessage for Nick {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && !line.parameters.is_empty()
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        require(line, 1)?;
        Ok(Nick {
            nickname: param(line, 0),
        })
    }
}

/// `USER <username> <mode> * :<realname>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub mode: String,
    pub realname: String,
}

impl CommandKind for User {
    const COMMAND: &'static str = "USER";
}

impl MessageKind for User {
    fn to_tokens(&self) -> Vec<String> {
        tokens(
            Self::COMMAND,
            [&self.username, &self.mode, "*", &self.realname],
        )
    }
}

impl ParseMessage for User {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && line.parameters.len() >= 4
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        require(line, 4)?;
        Ok(User {
            username: param(line, 0),
            mode: param(line, 1),
            realname: param(line, 3),
        })
    }
}

/// `QUIT [:reason]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quit {
    pub reason: Option<String>,
}

impl CommandKind for Quit {
    const COMMAND: &'static str = "QUIT";
}

impl MessageKind for Quit {
    fn to_tokens(&self) -> Vec<String> {
        let mut out = tokens(Self::COMMAND, []);
        out.extend(self.reason.clone());
        out
    }
}

impl ParseMessage for Quit {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line)
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        Ok(Quit {
            reason: opt_param(line, 0),
        })
    }
}

/// `JOIN <channel>{,<channel>} [<key>{,<key>}]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Join {
    pub channels: Vec<String>,
    pub keys: Vec<String>,
}

impl CommandKind for Join {
    const COMMAND: &'static str = "JOIN";
}

impl MessageKind for Join {
    fn to_tokens(&self) -> Vec<String> {
        let mut out = tokens(Self::COMMAND, [&self.channels.join(",")]);
        if !self.keys.is_empty() {
            out.push(self.keys.join(","));
        }
        out
    }

    fn targets(&self) -> Vec<&str> {
        self.channels.iter().map(String::as_str).collect()
    }
}

impl ParseMessage for Join {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && line.param(0).is_some_and(|c| !c.is_empty())
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        require(line, 1)?;
        Ok(Join {
            channels: split_list(&param(line, 0)),
            keys: line.param(1).map(split_list).unwrap_or_default(),
        })
    }
}

/// `PART <channel>{,<channel>} [:reason]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Part {
    pub channels: Vec<String>,
    pub reason: Option<String>,
}

impl CommandKind for Part {
    const COMMAND: &'static str = "PART";
}

impl MessageKind for Part {
    fn to_tokens(&self) -> Vec<String> {
        let mut out = tokens(Self::COMMAND, [&self.channels.join(",")]);
        out.extend(self.reason.clone());
        out
    }

    fn targets(&self) -> Vec<&str> {
        self.channels.iter().map(String::as_str).collect()
    }
}

impl ParseMessage for Part {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && line.param(0).is_some_and(|c| !c.is_empty())
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        require(line, 1)?;
        Ok(Part {
            channels: split_list(&param(line, 0)),
            reason: opt_param(line, 1),
        })
    }
}

/// `MODE <channel> [<changes> [args...]]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelMode {
    pub channel: String,
    /// Raw change string; empty for a mode query.
    pub modes: String,
    pub arguments: Vec<String>,
}

impl ChannelMode {
    /// Split the change string under the server's mode classes.
    pub fn changes(&self, support: &ServerSupport) -> ModeChangeSet {
        parse_modes(&self.modes, &self.arguments, support)
    }
}

impl CommandKind for ChannelMode {
    const COMMAND: &'static str = "MODE";
}

impl MessageKind for ChannelMode {
    fn to_tokens(&self) -> Vec<String> {
        let mut out = tokens(Self::COMMAND, [&self.channel]);
        if !self.modes.is_empty() {
            out.push(self.modes.clone());
            out.extend(self.arguments.iter().cloned());
        }
        out
    }

    fn targets(&self) -> Vec<&str> {
        vec![self.channel.as_str()]
    }
}

impl ParseMessage for ChannelMode {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && line.param(0).is_some_and(looks_like_channel)
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        require(line, 1)?;
        Ok(ChannelMode {
            channel: param(line, 0),
            modes: param(line, 1),
            arguments: line.parameters.iter().skip(2).cloned().collect(),
        })
    }
}

/// `MODE <nickname> [<changes>]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserMode {
    pub nickname: String,
    pub modes: String,
}

impl UserMode {
    /// Split the change string; user modes never take arguments.
    pub fn changes(&self) -> ModeChangeSet {
        parse_user_modes(&self.modes)
    }
}

impl CommandKind for UserMode {
    const COMMAND: &'static str = "MODE";
}

impl MessageKind for UserMode {
    fn to_tokens(&self) -> Vec<String> {
        let mut out = tokens(Self::COMMAND, [&self.nickname]);
        if !self.modes.is_empty() {
            out.push(self.modes.clone());
        }
        out
    }
}

impl ParseMessage for UserMode {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line)
            && line.parameters.len() <= 2
            && line.param(0).is_some_and(|t| !t.is_empty() && !looks_like_channel(t))
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        require(line, 1)?;
        Ok(UserMode {
            nickname: param(line, 0),
            modes: param(line, 1),
        })
    }
}

/// `TOPIC <channel> [:topic]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topic {
    pub channel: String,
    /// New topic; `Some("")` clears it, `None` queries it.
    pub topic: Option<String>,
}

impl CommandKind for Topic {
    const COMMAND: &'static str = "TOPIC";
}

impl MessageKind for Topic {
    fn to_tokens(&self) -> Vec<String> {
        let mut out = tokens(Self::COMMAND, [&self.channel]);
        out.extend(self.topic.clone());
        out
    }

    fn targets(&self) -> Vec<&str> {
        vec![self.channel.as_str()]
    }
}

impl ParseMessage for Topic {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && !line.parameters.is_empty()
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        require(line, 1)?;
        Ok(Topic {
            channel: param(line, 0),
            topic: opt_param(line, 1),
        })
    }
}

/// `NAMES [<channel>{,<channel>}]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Names {
    pub channels: Vec<String>,
}

impl CommandKind for Names {
    const COMMAND: &'static str = "NAMES";
}

impl MessageKind for Names {
    fn to_tokens(&self) -> Vec<String> {
        let mut out = tokens(Self::COMMAND, []);
        if !self.channels.is_empty() {
            out.push(self.channels.join(","));
        }
        out
    }
}

impl ParseMessage for Names {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && line.parameters.len() <= 1
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        Ok(Names {
            channels: line.param(0).map(split_list).unwrap_or_default(),
        })
    }
}

/// `LIST [<channel>{,<channel>}]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct List {
    pub channels: Vec<String>,
}

impl CommandKind for List {
    const COMMAND: &'static str = "LIST";
}

impl MessageKind for List {
    fn to_tokens(&self) -> Vec<String> {
        let mut out = tokens(Self::COMMAND, []);
        if !self.channels.is_empty() {
            out.push(self.channels.join(","));
        }
        out
    }
}

impl ParseMessage for List {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && line.parameters.len() <= 1
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        Ok(List {
            channels: line.param(0).map(split_list).unwrap_or_default(),
        })
    }
}

/// `INVITE <nickname> <channel>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invite {
    pub nickname: String,
    pub channel: String,
}

impl CommandKind for Invite {
    const COMMAND: &'static str = "INVITE";
}

impl MessageKind for Invite {
    fn to_tokens(&self) -> Vec<String> {
        tokens(Self::COMMAND, [&self.nickname, &self.channel])
    }
}

impl ParseMessage for Invite {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && line.parameters.len() >= 2
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        require(line, 2)?;
        Ok(Invite {
            nickname: param(line, 0),
            channel: param(line, 1),
        })
    }
}

/// `KICK <channel>{,<channel>} <nick>{,<nick>} [:reason]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Kick {
    pub channels: Vec<String>,
    pub nicknames: Vec<String>,
    pub reason: Option<String>,
}

impl Kick {
    /// `(channel, nickname)` pairs: one channel applies to every nick,
    /// otherwise the lists pair up positionally.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        match self.channels.as_slice() {
            [channel] => self
                .nicknames
                .iter()
                .map(|n| (channel.as_str(), n.as_str()))
                .collect(),
            channels => channels
                .iter()
                .zip(&self.nicknames)
                .map(|(c, n)| (c.as_str(), n.as_str()))
                .collect(),
        }
    }
}

impl CommandKind for Kick {
    const COMMAND: &'static str = "KICK";
}

impl MessageKind for Kick {
    fn to_tokens(&self) -> Vec<String> {
        let mut out = tokens(
            Self::COMMAND,
            [&self.channels.join(","), &self.nicknames.join(",")],
        );
        out.extend(self.reason.clone());
        out
    }

    fn targets(&self) -> Vec<&str> {
        self.channels.iter().map(String::as_str).collect()
    }
}

impl ParseMessage for Kick {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && line.parameters.len() >= 2
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        require(line, 2)?;
        Ok(Kick {
            channels: split_list(&param(line, 0)),
            nicknames: split_list(&param(line, 1)),
            reason: opt_param(line, 2),
        })
    }
}

/// `PRIVMSG <target>{,<target>} :<text>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chat {
    pub targets: Vec<String>,
    pub text: String,
}

impl CommandKind for Chat {
    const COMMAND: &'static str = "PRIVMSG";
}

impl MessageKind for Chat {
    fn to_tokens(&self) -> Vec<String> {
        tokens(Self::COMMAND, [&self.targets.join(","), &self.text])
    }

    fn targets(&self) -> Vec<&str> {
        self.targets.iter().map(String::as_str).collect()
    }

    fn is_conversation(&self) -> bool {
        true
    }
}

impl ParseMessage for Chat {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && line.parameters.len() == 2 && line.ctcp().is_none()
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        require(line, 2)?;
        Ok(Chat {
            targets: split_list(&param(line, 0)),
            text: param(line, 1),
        })
    }
}

/// `NOTICE <target>{,<target>} :<text>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub targets: Vec<String>,
    pub text: String,
}

impl CommandKind for Notice {
    const COMMAND: &'static str = "NOTICE";
}

impl MessageKind for Notice {
    fn to_tokens(&self) -> Vec<String> {
        tokens(Self::COMMAND, [&self.targets.join(","), &self.text])
    }

    fn targets(&self) -> Vec<&str> {
        self.targets.iter().map(String::as_str).collect()
    }

    fn is_conversation(&self) -> bool {
        true
    }
}

impl ParseMessage for Notice {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && line.parameters.len() == 2 && line.ctcp().is_none()
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        require(line, 2)?;
        Ok(Notice {
            targets: split_list(&param(line, 0)),
            text: param(line, 1),
        })
    }
}

/// `WHO [<mask> [<flags>]]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Who {
    pub mask: Option<String>,
    pub flags: Option<String>,
}

impl CommandKind for Who {
    const COMMAND: &'static str = "WHO";
}

impl MessageKind for Who {
    fn to_tokens(&self) -> Vec<String> {
        let mut out = tokens(Self::COMMAND, []);
        out.extend(self.mask.clone());
        if self.mask.is_some() {
            out.extend(self.flags.clone());
        }
        out
    }
}

impl ParseMessage for Who {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && line.parameters.len() <= 2
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        Ok(Who {
            mask: opt_param(line, 0),
            flags: opt_param(line, 1),
        })
    }
}

/// `WHOIS [<server>] <nickname>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Whois {
    pub server: Option<String>,
    pub nickname: String,
}

impl CommandKind for Whois {
    const COMMAND: &'static str = "WHOIS";
}

impl MessageKind for Whois {
    fn to_tokens(&self) -> Vec<String> {
        match &self.server {
            Some(server) => tokens(Self::COMMAND, [server, &self.nickname]),
            None => tokens(Self::COMMAND, [&self.nickname]),
        }
    }
}

impl ParseMessage for Whois {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && matches!(line.parameters.len(), 1 | 2)
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        match line.parameters.as_slice() {
            [nickname] => Ok(Whois {
                server: None,
                nickname: nickname.clone(),
            }),
            [server, nickname] => Ok(Whois {
                server: Some(server.clone()),
                nickname: nickname.clone(),
            }),
            params => Err(MessageParseError::NotEnoughArguments {
                expected: 1,
                got: params.len(),
            }),
        }
    }
}

/// `AWAY :<message>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Away {
    pub message: String,
}

impl CommandKind for Away {
    const COMMAND: &'static str = "AWAY";
}

impl MessageKind for Away {
    fn to_tokens(&self) -> Vec<String> {
        tokens(Self::COMMAND, [&self.message])
    }
}

impl ParseMessage for Away {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && line.param(0).is_some_and(|m| !m.is_empty())
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        require(line, 1)?;
        Ok(Away {
            message: param(line, 0),
        })
    }
}

/// `AWAY` with no message: the sender is back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Back;

impl CommandKind for Back {
    const COMMAND: &'static str = "AWAY";
}

impl MessageKind for Back {
    fn to_tokens(&self) -> Vec<String> {
        tokens(Self::COMMAND, [])
    }
}

impl ParseMessage for Back {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && !line.param(0).is_some_and(|m| !m.is_empty())
    }

    fn parse(_line: &ParsedLine) -> Result<Self, MessageParseError> {
        Ok(Back)
    }
}

/// `PING <token> [<target>]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ping {
    pub token: String,
    pub target: Option<String>,
}

impl CommandKind for Ping {
    const COMMAND: &'static str = "PING";
}

impl MessageKind for Ping {
    fn to_tokens(&self) -> Vec<String> {
        let mut out = tokens(Self::COMMAND, [&self.token]);
        out.extend(self.target.clone());
        out
    }
}

impl ParseMessage for Ping {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && matches!(line.parameters.len(), 1 | 2)
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        require(line, 1)?;
        Ok(Ping {
            token: param(line, 0),
            target: opt_param(line, 1),
        })
    }
}

/// `PONG <server> [<token>]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pong {
    pub server: String,
    pub token: Option<String>,
}

impl CommandKind for Pong {
    const COMMAND: &'static str = "PONG";
}

impl MessageKind for Pong {
    fn to_tokens(&self) -> Vec<String> {
        let mut out = tokens(Self::COMMAND, [&self.server]);
        out.extend(self.token.clone());
        out
    }
}

impl ParseMessage for Pong {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && matches!(line.parameters.len(), 1 | 2)
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        require(line, 1)?;
        Ok(Pong {
            server: param(line, 0),
            token: opt_param(line, 1),
        })
    }
}

/// `KILL <nickname> :<reason>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Kill {
    pub nickname: String,
    pub reason: String,
}

impl CommandKind for Kill {
    const COMMAND: &'static str = "KILL";
}

impl MessageKind for Kill {
    fn to_tokens(&self) -> Vec<String> {
        tokens(Self::COMMAND, [&self.nickname, &self.reason])
    }
}

impl ParseMessage for Kill {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && line.parameters.len() == 2
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        require(line, 2)?;
        Ok(Kill {
            nickname: param(line, 0),
            reason: param(line, 1),
        })
    }
}

/// `ERROR :<message>`, sent by the server before it closes the link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorCommand {
    pub message: String,
}

impl CommandKind for ErrorCommand {
    const COMMAND: &'static str = "ERROR";
}

impl MessageKind for ErrorCommand {
    fn to_tokens(&self) -> Vec<String> {
        tokens(Self::COMMAND, [&self.message])
    }
}

impl ParseMessage for ErrorCommand {
    fn can_parse(line: &ParsedLine) -> bool {
        is_verb::<Self>(line) && line.parameters.len() == 1
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        require(line, 1)?;
        Ok(ErrorCommand {
            message: param(line, 0),
        })
    }
}

/// Any verb without a dedicated type. Keeps the verb as sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericMessage {
    pub command: String,
    pub parameters: Vec<String>,
}

impl MessageKind for GenericMessage {
    fn to_tokens(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.parameters.len() + 1);
        out.push(self.command.clone());
        out.extend(self.parameters.iter().cloned());
        out
    }
}

impl ParseMessage for GenericMessage {
    fn can_parse(line: &ParsedLine) -> bool {
        line.numeric().is_none()
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        Ok(GenericMessage {
            command: line.command.clone(),
            parameters: line.parameters.clone(),
        })
    }
}
