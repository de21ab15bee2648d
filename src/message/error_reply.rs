//! Error numerics (400-599).

use super::{MessageKind, NumericReply, ParseMessage};
use crate::error::{MessageParseError, ProtocolError};
use crate::line::ParsedLine;

/// Lowest error numeric.
pub const ERROR_RANGE_START: u16 = 400;
/// Highest error numeric.
pub const ERROR_RANGE_END: u16 = 599;

/// Whether `code` is in the error sub-range.
#[inline]
pub fn is_error_code(code: u16) -> bool {
    (ERROR_RANGE_START..=ERROR_RANGE_END).contains(&code)
}

message_family! {
    /// Error replies.
    pub enum ErrorMessage as NumericReply {
        NoSuchNick(NoSuchNick),
        NoSuchServer(NoSuchServer),
        NoSuchChannel(NoSuchChannel),
        CannotSendToChan(CannotSendToChan),
        TooManyChannels(TooManyChannels),
        UnknownCommand(UnknownCommand),
        NoMotd(NoMotd),
        NoNicknameGiven(NoNicknameGiven),
        ErroneousNickname(ErroneousNickname),
        NicknameInUse(NicknameInUse),
        NickCollision(NickCollision),
        UserNotInChannel(UserNotInChannel),
        NotOnChannel(NotOnChannel),
        UserOnChannel(UserOnChannel),
        NotRegistered(NotRegistered),
        NeedMoreParams(NeedMoreParams),
        AlreadyRegistered(AlreadyRegistered),
        PasswdMismatch(PasswdMismatch),
        ChannelIsFull(ChannelIsFull),
        UnknownMode(UnknownMode),
        InviteOnlyChan(InviteOnlyChan),
        BannedFromChan(BannedFromChan),
        BadChannelKey(BadChannelKey),
        NoPrivileges(NoPrivileges),
        ChanOpPrivsNeeded(ChanOpPrivsNeeded),
        UmodeUnknownFlag(UmodeUnknownFlag),
        UsersDontMatch(UsersDontMatch),
        /// Any error numeric without a dedicated type.
        Generic(GenericErrorMessage),
    }
}

impl NumericReply for ErrorMessage {
    fn code(&self) -> u16 {
        self.as_view().code()
    }

    fn target(&self) -> &str {
        self.as_view().target()
    }
}

numeric_reply! {
    /// 401 `ERR_NOSUCHNICK`
    NoSuchNick = 401 { nickname } text = "No such nick/channel",;
    /// 402 `ERR_NOSUCHSERVER`
    NoSuchServer = 402 { server } text = "No such server",;
    /// 403 `ERR_NOSUCHCHANNEL`
    NoSuchChannel = 403 { channel } channel = channel, text = "No such channel",;
    /// 404 `ERR_CANNOTSENDTOCHAN`
    CannotSendToChan = 404 { channel } channel = channel, text = "Cannot send to channel",;
    /// 405 `ERR_TOOMANYCHANNELS`
    TooManyChannels = 405 { channel } text = "You have joined too many channels",;
    /// 421 `ERR_UNKNOWNCOMMAND`
    UnknownCommand = 421 { command } text = "Unknown command",;
    /// 422 `ERR_NOMOTD`
    NoMotd = 422 {} text = "MOTD File is missing",;
    /// 431 `ERR_NONICKNAMEGIVEN`
    NoNicknameGiven = 431 {} text = "No nickname given",;
    /// 432 `ERR_ERRONEUSNICKNAME`
    ErroneousNickname = 432 { nickname } text = "Erroneous nickname",;
    /// 433 `ERR_NICKNAMEINUSE`
    NicknameInUse = 433 { nickname } text = "Nickname is already in use",;
    /// 436 `ERR_NICKCOLLISION`
    NickCollision = 436 { nickname } text = "Nickname collision KILL",;
    /// 441 `ERR_USERNOTINCHANNEL`
    UserNotInChannel = 441 { nickname, channel } channel = channel, text = "They aren't on that channel",;
    /// 442 `ERR_NOTONCHANNEL`
    NotOnChannel = 442 { channel } channel = channel, text = "You're not on that channel",;
    /// 443 `ERR_USERONCHANNEL`
    UserOnChannel = 443 { nickname, channel } channel = channel, text = "is already on channel",;
    /// 451 `ERR_NOTREGISTERED`
    NotRegistered = 451 {} text = "You have not registered",;
    /// 461 `ERR_NEEDMOREPARAMS`
    NeedMoreParams = 461 { command } text = "Not enough parameters",;
    /// 462 `ERR_ALREADYREGISTRED`
    AlreadyRegistered = 462 {} text = "Unauthorized command (already registered)",;
    /// 464 `ERR_PASSWDMISMATCH`
    PasswdMismatch = 464 {} text = "Password incorrect",;
    /// 471 `ERR_CHANNELISFULL`
    ChannelIsFull = 471 { channel } text = "Cannot join channel (+l)",;
    /// 472 `ERR_UNKNOWNMODE`
    UnknownMode = 472 { mode } text = "is unknown mode char to me",;
    /// 473 `ERR_INVITEONLYCHAN`
    InviteOnlyChan = 473 { channel } text = "Cannot join channel (+i)",;
    /// 474 `ERR_BANNEDFROMCHAN`
    BannedFromChan = 474 { channel } text = "Cannot join channel (+b)",;
    /// 475 `ERR_BADCHANNELKEY`
    BadChannelKey = 475 { channel } text = "Cannot join channel (+k)",;
    /// 481 `ERR_NOPRIVILEGES`
    NoPrivileges = 481 {} text = "Permission Denied- You're not an IRC operator",;
    /// 482 `ERR_CHANOPRIVSNEEDED`
    ChanOpPrivsNeeded = 482 { channel } channel = channel, text = "You're not channel operator",;
    /// 501 `ERR_UMODEUNKNOWNFLAG`
    UmodeUnknownFlag = 501 {} text = "Unknown MODE flag",;
    /// 502 `ERR_USERSDONTMATCH`
    UsersDontMatch = 502 {} text = "Cannot change mode for other users",;
}

/// Any error numeric without a dedicated type.
///
/// The code is fixed at construction and always lies in 400-599.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericErrorMessage {
    code: u16,
    pub parameters: Vec<String>,
}

impl GenericErrorMessage {
    /// Build an error reply, rejecting codes outside 400-599.
    pub fn new(code: u16, parameters: Vec<String>) -> Result<Self, ProtocolError> {
        if !is_error_code(code) {
            return Err(ProtocolError::NumericOutOfRange {
                code,
                expected: "error (400-599)",
            });
        }
        Ok(GenericErrorMessage { code, parameters })
    }

    /// Trailing human-readable text, if any.
    pub fn text(&self) -> Option<&str> {
        self.parameters
            .get(1..)
            .and_then(|rest| rest.last())
            .map(String::as_str)
    }
}

impl MessageKind for GenericErrorMessage {
    fn to_tokens(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.parameters.len() + 1);
        out.push(format!("{:03}", self.code));
        out.extend(self.parameters.iter().cloned());
        out
    }
}

impl NumericReply for GenericErrorMessage {
    fn code(&self) -> u16 {
        self.code
    }

    fn target(&self) -> &str {
        self.parameters.first().map_or("", String::as_str)
    }
}

impl ParseMessage for GenericErrorMessage {
    fn can_parse(line: &ParsedLine) -> bool {
        line.numeric().is_some_and(is_error_code)
    }

    fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
        match line.numeric() {
            Some(code) if is_error_code(code) => Ok(GenericErrorMessage {
                code,
                parameters: line.parameters.clone(),
            }),
            _ => Err(MessageParseError::InvalidCommand),
        }
    }
}
