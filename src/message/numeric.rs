//! Numeric replies (001-399).
//!
//! Error numerics (400-599) live in the [`ErrorMessage`] sub-family, which
//! is itself a variant of [`NumericMessage`].

use chrono::{DateTime, TimeZone, Utc};

use super::{parse_number, ErrorMessage, MessageKind, NumericKind, NumericReply, ParseMessage};
use crate::error::MessageParseError;
use crate::isupport::ServerSupport;
use crate::line::ParsedLine;
use crate::mode::{parse_modes, parse_user_modes, ModeChangeSet};

message_family! {
    /// Three-digit replies.
    pub enum NumericMessage as NumericReply {
        Welcome(Welcome),
        YourHost(YourHost),
        Created(Created),
        MyInfo(MyInfo),
        Support(SupportReply),
        UserModeIs(UserModeIs),
        LuserClient(LuserClient),
        LocalUsers(LocalUsers),
        GlobalUsers(GlobalUsers),
        UserAway(UserAway),
        SelfUnaway(SelfUnaway),
        SelfAway(SelfAway),
        WhoisUser(WhoisUser),
        WhoisServer(WhoisServer),
        EndOfWho(EndOfWho),
        WhoisIdle(WhoisIdle),
        EndOfWhois(EndOfWhois),
        WhoisChannels(WhoisChannels),
        ChannelModeIs(ChannelModeIs),
        CreationTime(CreationTime),
        NoTopic(NoTopic),
        TopicReply(TopicReply),
        TopicSetBy(TopicSetBy),
        WhoReply(WhoReply),
        NamesReply(NamesReply),
        EndOfNames(EndOfNames),
        Motd(Motd),
        MotdStart(MotdStart),
        EndOfMotd(EndOfMotd),
        /// 400-599.
        Error(ErrorMessage),
        /// Any numeric without a dedicated type.
        Generic(GenericNumericMessage),
    }
}

impl NumericReply for NumericMessage {
    fn code(&self) -> u16 {
        self.as_view().code()
    }

    fn target(&self) -> &str {
        self.as_view().target()
    }
}

impl NumericMessage {
    /// Part of the registration burst (codes below 100).
    pub fn is_direct(&self) -> bool {
        self.code() < 100
    }

    /// Whether this is an error reply.
    pub fn is_error(&self) -> bool {
        matches!(self, NumericMessage::Error(_))
    }
}

fn code_token<M: NumericKind>() -> String {
    format!("{:03}", M::CODE)
}

fn is_code<M: NumericKind>(line: &ParsedLine) -> bool {
    line.numeric() == Some(M::CODE)
}

fn param(line: &ParsedLine, index: usize) -> String {
    line.param(index).unwrap_or_default().to_owned()
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, MessageParseError> {
    let secs: i64 = parse_number(field, value)?;
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| MessageParseError::InvalidNumber {
            field,
            value: value.to_owned(),
        })
}

numeric_reply! {
    /// 001 `RPL_WELCOME`
    Welcome = 1 {} text = "Welcome to the Internet Relay Network",;
    /// 002 `RPL_YOURHOST`
    YourHost = 2 {};
    /// 003 `RPL_CREATED`
    Created = 3 {};
    /// 004 `RPL_MYINFO`
    MyInfo = 4 { server, version, user_modes, channel_modes };
    /// 221 `RPL_UMODEIS`
    UserModeIs = 221 { modes };
    /// 251 `RPL_LUSERCLIENT`
    LuserClient = 251 {};
    /// 301 `RPL_AWAY`: `text` is the away message.
    UserAway = 301 { nickname };
    /// 305 `RPL_UNAWAY`
    SelfUnaway = 305 {} text = "You are no longer marked as being away",;
    /// 306 `RPL_NOWAWAY`
    SelfAway = 306 {} text = "You have been marked as being away",;
    /// 312 `RPL_WHOISSERVER`: `text` is the server info.
    WhoisServer = 312 { nickname, server };
    /// 315 `RPL_ENDOFWHO`
    EndOfWho = 315 { mask } text = "End of WHO list",;
    /// 317 `RPL_WHOISIDLE`
    WhoisIdle = 317 { nickname, idle };
    /// 318 `RPL_ENDOFWHOIS`
    EndOfWhois = 318 { nickname } text = "End of WHOIS list",;
    /// 319 `RPL_WHOISCHANNELS`: `text` is the channel list.
    WhoisChannels = 319 { nickname };
    /// 331 `RPL_NOTOPIC`
    NoTopic = 331 { channel } channel = channel, text = "No topic is set",;
    /// 332 `RPL_TOPIC`: `text` is the topic.
    TopicReply = 332 { channel } channel = channel,;
    /// 366 `RPL_ENDOFNAMES`
    EndOfNames = 366 { channel } channel = channel, text = "End of NAMES list",;
    /// 372 `RPL_MOTD`
    Motd = 372 {};
    /// 375 `RPL_MOTDSTART`
    MotdStart = 375 {};
    /// 376 `RPL_ENDOFMOTD`
    EndOfMotd = 376 {} text = "End of MOTD command",;
}

impl UserModeIs {
    /// The advertised user modes as a change set.
    pub fn changes(&self) -> ModeChangeSet {
        parse_user_modes(&self.modes)
    }
}

/// 005 `RPL_ISUPPORT`: `<target> <token>... :are supported by this server`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupportReply {
    pub target: String,
    /// Raw `KEY[=VALUE]` / `-KEY` tokens.
    pub tokens: Vec<String>,
    pub text: Option<String>,
}

impl SupportReply {
    /// Feed the tokens into a capability table.
    pub fn apply_to(&self, support: &mut ServerSupport) {
        support.apply_tokens(&self.tokens);
    }
}

impl NumericKind for SupportReply {
    const CODE: u16 = 5;
}

impl MessageKind for SupportReply {
    fn to_tokens(&self) -> Vec<String> {
        let mut out = vec![code_token::<Self>(), self.target.clone()];
        out.extend(self.tokens.iter().cloned());
        out.extend(self.text.clone());
        out
    }
}

impl NumericReply for SupportReply {
    fn code(&self) -> u16 {
        Self::CODE
    }

    fn target(&self) -> &str {
        &self.target
    }
}

impl ParseMessage for SupportReply {
    fn can_parse(line: &ParsedLine) -> bool {
        is_code::<Self>(line)
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        let mut tokens: Vec<String> = line.parameters.iter().skip(1).cloned().collect();
        let text = match tokens.last() {
            Some(last) if last.contains(' ') => tokens.pop(),
            _ => None,
        };
        Ok(SupportReply {
            target: param(line, 0),
            tokens,
            text,
        })
    }
}

/// Pull the first two numbers out of free text such as
/// `Current local users: 12  Max: 50`.
fn counts_from_text(text: &str) -> Option<(u32, u32)> {
    let mut numbers = text
        .split(|c: char| !c.is_ascii_digit())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<u32>().ok());
    Some((numbers.next()?, numbers.next()?))
}

macro_rules! user_count_reply {
    ($(#[$meta:meta])* $name:ident = $code:literal) => {
        $(#[$meta])*
        ///
        /// Accepts both `<target> <current> <max> :text` and the older
        /// `<target> :Current ...: <current> Max: <max>`; always writes the
        /// first form.
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            pub target: String,
            pub current: u32,
            pub max: u32,
            pub text: Option<String>,
        }

        impl NumericKind for $name {
            const CODE: u16 = $code;
        }

        impl MessageKind for $name {
            fn to_tokens(&self) -> Vec<String> {
                let mut out = vec![
                    code_token::<Self>(),
                    self.target.clone(),
                    self.current.to_string(),
                    self.max.to_string(),
                ];
                out.extend(self.text.clone());
                out
            }
        }

        impl NumericReply for $name {
            fn code(&self) -> u16 {
                Self::CODE
            }

            fn target(&self) -> &str {
                &self.target
            }
        }

        impl ParseMessage for $name {
            fn can_parse(line: &ParsedLine) -> bool {
                is_code::<Self>(line)
            }

            fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
                let target = param(line, 0);
                match line.parameters.as_slice() {
                    [_, current, max, rest @ ..] => Ok($name {
                        target,
                        current: parse_number("current", current)?,
                        max: parse_number("max", max)?,
                        text: rest.last().cloned(),
                    }),
                    [_, text] => {
                        let (current, max) = counts_from_text(text).ok_or_else(|| {
                            MessageParseError::InvalidNumber {
                                field: "current",
                                value: text.clone(),
                            }
                        })?;
                        Ok($name {
                            target,
                            current,
                            max,
                            text: Some(text.clone()),
                        })
                    }
                    params => Err(MessageParseError::NotEnoughArguments {
                        expected: 2,
                        got: params.len(),
                    }),
                }
            }
        }
    };
}

user_count_reply! {
    /// 265 `RPL_LOCALUSERS`
    LocalUsers = 265
}

user_count_reply! {
    /// 266 `RPL_GLOBALUSERS`
    GlobalUsers = 266
}

/// 311 `RPL_WHOISUSER`: `<target> <nick> <user> <host> * :<realname>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WhoisUser {
    pub target: String,
    pub nickname: String,
    pub username: String,
    pub host: String,
    pub realname: String,
}

impl NumericKind for WhoisUser {
    const CODE: u16 = 311;
}

impl MessageKind for WhoisUser {
    fn to_tokens(&self) -> Vec<String> {
        vec![
            code_token::<Self>(),
            self.target.clone(),
            self.nickname.clone(),
            self.username.clone(),
            self.host.clone(),
            "*".to_owned(),
            self.realname.clone(),
        ]
    }
}

impl NumericReply for WhoisUser {
    fn code(&self) -> u16 {
        Self::CODE
    }

    fn target(&self) -> &str {
        &self.target
    }
}

impl ParseMessage for WhoisUser {
    fn can_parse(line: &ParsedLine) -> bool {
        is_code::<Self>(line)
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        Ok(WhoisUser {
            target: param(line, 0),
            nickname: param(line, 1),
            username: param(line, 2),
            host: param(line, 3),
            realname: param(line, 5),
        })
    }
}

/// 324 `RPL_CHANNELMODEIS`: `<target> <channel> <modes> [args...]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelModeIs {
    pub target: String,
    pub channel: String,
    pub modes: String,
    pub arguments: Vec<String>,
}

impl ChannelModeIs {
    /// The current modes as a change set.
    pub fn changes(&self, support: &ServerSupport) -> ModeChangeSet {
        parse_modes(&self.modes, &self.arguments, support)
    }
}

impl NumericKind for ChannelModeIs {
    const CODE: u16 = 324;
}

impl MessageKind for ChannelModeIs {
    fn to_tokens(&self) -> Vec<String> {
        let mut out = vec![
            code_token::<Self>(),
            self.target.clone(),
            self.channel.clone(),
            self.modes.clone(),
        ];
        out.extend(self.arguments.iter().cloned());
        out
    }

    fn targets(&self) -> Vec<&str> {
        vec![self.channel.as_str()]
    }
}

impl NumericReply for ChannelModeIs {
    fn code(&self) -> u16 {
        Self::CODE
    }

    fn target(&self) -> &str {
        &self.target
    }
}

impl ParseMessage for ChannelModeIs {
    fn can_parse(line: &ParsedLine) -> bool {
        is_code::<Self>(line)
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        Ok(ChannelModeIs {
            target: param(line, 0),
            channel: param(line, 1),
            modes: param(line, 2),
            arguments: line.parameters.iter().skip(3).cloned().collect(),
        })
    }
}

/// 329 `RPL_CREATIONTIME`: `<target> <channel> <unix time>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreationTime {
    pub target: String,
    pub channel: String,
    pub created: DateTime<Utc>,
}

impl NumericKind for CreationTime {
    const CODE: u16 = 329;
}

impl MessageKind for CreationTime {
    fn to_tokens(&self) -> Vec<String> {
        vec![
            code_token::<Self>(),
            self.target.clone(),
            self.channel.clone(),
            self.created.timestamp().to_string(),
        ]
    }

    fn targets(&self) -> Vec<&str> {
        vec![self.channel.as_str()]
    }
}

impl NumericReply for CreationTime {
    fn code(&self) -> u16 {
        Self::CODE
    }

    fn target(&self) -> &str {
        &self.target
    }
}

impl ParseMessage for CreationTime {
    fn can_parse(line: &ParsedLine) -> bool {
        is_code::<Self>(line)
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        Ok(CreationTime {
            target: param(line, 0),
            channel: param(line, 1),
            created: parse_timestamp("created", line.param(2).unwrap_or_default())?,
        })
    }
}

/// 333 `RPL_TOPICWHOTIME`: `<target> <channel> <setter> <unix time>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicSetBy {
    pub target: String,
    pub channel: String,
    /// Nickname or full mask of whoever set the topic.
    pub setter: String,
    pub time: DateTime<Utc>,
}

impl TopicSetBy {
    /// Nickname part of `setter`.
    pub fn setter_nickname(&self) -> &str {
        self.setter
            .split_once('!')
            .map_or(self.setter.as_str(), |(nick, _)| nick)
    }
}

impl NumericKind for TopicSetBy {
    const CODE: u16 = 333;
}

impl MessageKind for TopicSetBy {
    fn to_tokens(&self) -> Vec<String> {
        vec![
            code_token::<Self>(),
            self.target.clone(),
            self.channel.clone(),
            self.setter.clone(),
            self.time.timestamp().to_string(),
        ]
    }

    fn targets(&self) -> Vec<&str> {
        vec![self.channel.as_str()]
    }
}

impl NumericReply for TopicSetBy {
    fn code(&self) -> u16 {
        Self::CODE
    }

    fn target(&self) -> &str {
        &self.target
    }
}

impl ParseMessage for TopicSetBy {
    fn can_parse(line: &ParsedLine) -> bool {
        is_code::<Self>(line)
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        Ok(TopicSetBy {
            target: param(line, 0),
            channel: param(line, 1),
            setter: param(line, 2),
            time: parse_timestamp("time", line.param(3).unwrap_or_default())?,
        })
    }
}

/// 352 `RPL_WHOREPLY`:
/// `<target> <channel> <user> <host> <server> <nick> <flags> :<hopcount> <realname>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WhoReply {
    pub target: String,
    /// Channel context, or `*` when there is none.
    pub channel: String,
    pub username: String,
    pub host: String,
    pub server: String,
    pub nickname: String,
    /// `H`/`G` (here/gone), `*` for operators, then status symbols.
    pub flags: String,
    pub hopcount: u32,
    pub realname: String,
}

impl WhoReply {
    /// `G` flag.
    pub fn is_away(&self) -> bool {
        self.flags.starts_with('G')
    }

    /// `*` flag.
    pub fn is_operator(&self) -> bool {
        self.flags.contains('*')
    }

    /// Channel status modes named by the flag symbols.
    pub fn status_modes(&self, support: &ServerSupport) -> Vec<char> {
        self.flags
            .chars()
            .filter_map(|c| support.status_mode(c))
            .collect()
    }
}

impl NumericKind for WhoReply {
    const CODE: u16 = 352;
}

impl MessageKind for WhoReply {
    fn to_tokens(&self) -> Vec<String> {
        vec![
            code_token::<Self>(),
            self.target.clone(),
            self.channel.clone(),
            self.username.clone(),
            self.host.clone(),
            self.server.clone(),
            self.nickname.clone(),
            self.flags.clone(),
            format!("{} {}", self.hopcount, self.realname),
        ]
    }

    fn targets(&self) -> Vec<&str> {
        vec![self.channel.as_str()]
    }
}

impl NumericReply for WhoReply {
    fn code(&self) -> u16 {
        Self::CODE
    }

    fn target(&self) -> &str {
        &self.target
    }
}

impl ParseMessage for WhoReply {
    fn can_parse(line: &ParsedLine) -> bool {
        is_code::<Self>(line)
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        let trailing = line.param(7).unwrap_or_default();
        let (hopcount, realname) = trailing.split_once(' ').unwrap_or((trailing, ""));
        Ok(WhoReply {
            target: param(line, 0),
            channel: param(line, 1),
            username: param(line, 2),
            host: param(line, 3),
            server: param(line, 4),
            nickname: param(line, 5),
            flags: param(line, 6),
            hopcount: parse_number("hopcount", hopcount)?,
            realname: realname.to_owned(),
        })
    }
}

/// 353 `RPL_NAMREPLY`: `<target> [<visibility>] <channel> :<names>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamesReply {
    pub target: String,
    /// `=` public, `*` private, `@` secret.
    pub visibility: Option<String>,
    pub channel: String,
    /// Entries with their status symbols, e.g. `@alice`.
    pub names: Vec<String>,
}

impl NamesReply {
    /// Each entry split into its status modes and nickname. Any
    /// `!user@host` suffix is dropped.
    pub fn members<'a>(&'a self, support: &ServerSupport) -> Vec<(Vec<char>, &'a str)> {
        self.names
            .iter()
            .map(|entry| {
                let (modes, rest) = support.split_status(entry);
                let nick = rest.split_once('!').map_or(rest, |(nick, _)| nick);
                (modes, nick)
            })
            .filter(|(_, nick)| !nick.is_empty())
            .collect()
    }
}

impl NumericKind for NamesReply {
    const CODE: u16 = 353;
}

impl MessageKind for NamesReply {
    fn to_tokens(&self) -> Vec<String> {
        let mut out = vec![code_token::<Self>(), self.target.clone()];
        out.extend(self.visibility.clone());
        out.push(self.channel.clone());
        out.push(self.names.join(" "));
        out
    }

    fn targets(&self) -> Vec<&str> {
        vec![self.channel.as_str()]
    }
}

impl NumericReply for NamesReply {
    fn code(&self) -> u16 {
        Self::CODE
    }

    fn target(&self) -> &str {
        &self.target
    }
}

impl ParseMessage for NamesReply {
    fn can_parse(line: &ParsedLine) -> bool {
        is_code::<Self>(line)
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        let split = |names: &str| -> Vec<String> { names.split_whitespace().map(str::to_owned).collect() };
        let (visibility, channel, names) = match line.parameters.as_slice() {
            [_, visibility, channel, names, ..] => {
                (Some(visibility.clone()), channel.clone(), split(names))
            }
            [_, channel, names] => (None, channel.clone(), split(names)),
            _ => (None, param(line, 1), Vec::new()),
        };
        Ok(NamesReply {
            target: param(line, 0),
            visibility,
            channel,
            names,
        })
    }
}

/// Any numeric without a dedicated type. Keeps the code and every parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericNumericMessage {
    pub code: u16,
    pub parameters: Vec<String>,
}

impl MessageKind for GenericNumericMessage {
    fn to_tokens(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.parameters.len() + 1);
        out.push(format!("{:03}", self.code));
        out.extend(self.parameters.iter().cloned());
        out
    }
}

impl NumericReply for GenericNumericMessage {
    fn code(&self) -> u16 {
        self.code
    }

    fn target(&self) -> &str {
        self.parameters.first().map_or("", String::as_str)
    }
}

impl ParseMessage for GenericNumericMessage {
    fn can_parse(line: &ParsedLine) -> bool {
        line.numeric().is_some()
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        let code = line.numeric().ok_or(MessageParseError::InvalidCommand)?;
        Ok(GenericNumericMessage {
            code,
            parameters: line.parameters.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::tokenize;

    fn parse<M: ParseMessage>(raw: &str) -> M {
        let line = tokenize(raw).unwrap();
        assert!(M::can_parse(&line));
        M::parse(&line).unwrap()
    }

    #[test]
    fn test_welcome() {
        let w: Welcome = parse(":srv 001 alice :Welcome to IRC alice");
        assert_eq!(w.target, "alice");
        assert_eq!(w.text.as_deref(), Some("Welcome to IRC alice"));
        assert_eq!(w.format(), "001 alice :Welcome to IRC alice");
        assert_eq!(
            Welcome::new("bob").format(),
            "001 bob :Welcome to the Internet Relay Network"
        );
    }

    #[test]
    fn test_myinfo_fields() {
        let m: MyInfo = parse("004 me irc.example.com ircd-1.0 iow bklmnopstv");
        assert_eq!(m.server, "irc.example.com");
        assert_eq!(m.channel_modes, "bklmnopstv");
        assert_eq!(m.text, None);
    }

    #[test]
    fn test_whois_idle_keeps_signon() {
        let raw = "317 me alice 42 1700000000 :seconds idle, signon time";
        let idle: WhoisIdle = parse(raw);
        assert_eq!(idle.idle, "42");
        assert_eq!(idle.extra, vec!["1700000000"]);
        assert_eq!(idle.text.as_deref(), Some("seconds idle, signon time"));
        assert_eq!(idle.format(), raw);
        assert_eq!(parse::<WhoisIdle>(&idle.format()), idle);
    }

    #[test]
    fn test_support_reply() {
        let s: SupportReply = parse("005 me CHANTYPES=# PREFIX=(ov)@+ :are supported by this server");
        assert_eq!(s.tokens, vec!["CHANTYPES=#", "PREFIX=(ov)@+"]);
        assert_eq!(s.text.as_deref(), Some("are supported by this server"));
        let mut support = ServerSupport::new();
        s.apply_to(&mut support);
        assert_eq!(support.chantypes, "#");
    }

    #[test]
    fn test_local_users_both_forms() {
        let dedicated: LocalUsers = parse("265 me 12 50 :Current local users 12, max 50");
        assert_eq!((dedicated.current, dedicated.max), (12, 50));

        let free: LocalUsers = parse("265 me :Current local users: 12  Max: 50");
        assert_eq!((free.current, free.max), (12, 50));
        assert_eq!(free.format(), "265 me 12 50 :Current local users: 12  Max: 50");

        let again: LocalUsers = parse(&free.format());
        assert_eq!(again, free);

        let bad = LocalUsers::parse(&tokenize("265 me :nothing here").unwrap());
        assert!(bad.is_err());
    }

    #[test]
    fn test_who_reply() {
        let w: WhoReply = parse(":srv 352 me #c ~al host srv alice G*@ :3 Alice Liddell");
        assert_eq!(w.hopcount, 3);
        assert_eq!(w.realname, "Alice Liddell");
        assert!(w.is_away() && w.is_operator());
        assert_eq!(w.status_modes(&ServerSupport::new()), vec!['o']);
        let again: WhoReply = parse(&w.format());
        assert_eq!(again, w);
    }

    #[test]
    fn test_who_reply_bad_hopcount() {
        let line = tokenize("352 me #c u h s n H :x Real").unwrap();
        assert!(matches!(
            WhoReply::parse(&line),
            Err(MessageParseError::InvalidNumber { field: "hopcount", .. })
        ));
    }

    #[test]
    fn test_names_reply() {
        let n: NamesReply = parse("353 me = #c :@alice +bob carol!c@host");
        assert_eq!(n.visibility.as_deref(), Some("="));
        let members = n.members(&ServerSupport::new());
        assert_eq!(
            members,
            vec![(vec!['o'], "alice"), (vec!['v'], "bob"), (vec![], "carol")]
        );

        let legacy: NamesReply = parse("353 me #c :dave");
        assert_eq!(legacy.visibility, None);
        assert_eq!(legacy.channel, "#c");
        assert_eq!(legacy.format(), "353 me #c dave");
    }

    #[test]
    fn test_topic_set_by() {
        let t: TopicSetBy = parse("333 me #c alice!a@h 1700000000");
        assert_eq!(t.setter_nickname(), "alice");
        assert_eq!(t.time.timestamp(), 1_700_000_000);
        assert_eq!(t.format(), "333 me #c alice!a@h 1700000000");
    }

    #[test]
    fn test_generic_numeric() {
        let g: GenericNumericMessage = parse("999 me a b :c d");
        assert_eq!(g.code, 999);
        assert_eq!(g.target(), "me");
        assert_eq!(g.format(), "999 me a b :c d");
    }

    #[test]
    fn test_family_view() {
        let msg = NumericMessage::from(Welcome::new("me"));
        assert_eq!(msg.code(), 1);
        assert!(msg.is_direct());
        let msg = NumericMessage::from(EndOfMotd::new("me"));
        assert!(!msg.is_direct());
    }
}
