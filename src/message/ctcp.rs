//! CTCP messages: requests inside PRIVMSG, replies inside NOTICE.

use super::{CtcpKind, MessageKind, ParseMessage};
use crate::ctcp::{encode, Ctcp};
use crate::error::MessageParseError;
use crate::line::ParsedLine;

message_family! {
    /// `\x01`-wrapped PRIVMSG/NOTICE payloads.
    pub enum CtcpMessage as MessageKind {
        Action(ActionRequest),
        VersionRequest(VersionRequest),
        VersionReply(VersionReply),
        PingRequest(PingRequest),
        PingReply(PingReply),
        TimeRequest(TimeRequest),
        TimeReply(TimeReply),
        ClientInfoRequest(ClientInfoRequest),
        ClientInfoReply(ClientInfoReply),
        FingerRequest(FingerRequest),
        FingerReply(FingerReply),
        UserInfoRequest(UserInfoRequest),
        UserInfoReply(UserInfoReply),
        /// Any other inner command sent with PRIVMSG.
        GenericRequest(GenericCtcpRequestMessage),
        /// Any other inner command sent with NOTICE.
        GenericReply(GenericCtcpReplyMessage),
    }
}

impl CtcpMessage {
    /// Whether this travels as a NOTICE.
    pub fn is_reply(&self) -> bool {
        self.to_tokens()
            .first()
            .is_some_and(|verb| verb == "NOTICE")
    }
}

fn outer_command(reply: bool) -> &'static str {
    if reply {
        "NOTICE"
    } else {
        "PRIVMSG"
    }
}

fn split_targets(target: &str) -> Vec<&str> {
    target.split(',').filter(|t| !t.is_empty()).collect()
}

/// The outer target and inner payload of a CTCP line in the given direction.
fn payload(line: &ParsedLine, reply: bool) -> Option<(&str, Ctcp<'_>)> {
    if !line.is_command(outer_command(reply)) {
        return None;
    }
    let ctcp = line.ctcp()?;
    Some((line.param(0)?, ctcp))
}

macro_rules! ctcp_message {
    ($(
        $(#[$meta:meta])*
        $name:ident = $command:literal, $reply:literal, $field:ident;
    )+) => {$(
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            /// Nickname or channel the payload is sent to.
            pub target: String,
            pub $field: Option<String>,
        }

        impl CtcpKind for $name {
            const CTCP_COMMAND: &'static str = $command;
            const REPLY: bool = $reply;
        }

        impl MessageKind for $name {
            fn to_tokens(&self) -> Vec<String> {
                vec![
                    outer_command(Self::REPLY).to_owned(),
                    self.target.clone(),
                    encode(Self::CTCP_COMMAND, self.$field.as_deref()),
                ]
            }

            fn targets(&self) -> Vec<&str> {
                split_targets(&self.target)
            }

            fn is_conversation(&self) -> bool {
                true
            }
        }

        impl ParseMessage for $name {
            fn can_parse(line: &ParsedLine) -> bool {
                payload(line, Self::REPLY).is_some_and(|(_, ctcp)| ctcp.is(Self::CTCP_COMMAND))
            }

            fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
                let (target, ctcp) = payload(line, Self::REPLY).ok_or(
                    MessageParseError::NotEnoughArguments {
                        expected: 2,
                        got: line.parameters.len(),
                    },
                )?;
                Ok($name {
                    target: target.to_owned(),
                    $field: ctcp.params.map(str::to_owned),
                })
            }
        }
    )+};
}

ctcp_message! {
    /// `ACTION <text>`, the `/me` command.
    ActionRequest = "ACTION", false, text;
    /// `VERSION` request.
    VersionRequest = "VERSION", false, params;
    /// `VERSION <client version>`
    VersionReply = "VERSION", true, version;
    /// `PING <token>`
    PingRequest = "PING", false, token;
    /// `PING <token>` echoed back.
    PingReply = "PING", true, token;
    /// `TIME` request.
    TimeRequest = "TIME", false, params;
    /// `TIME <local time>`
    TimeReply = "TIME", true, time;
    /// `CLIENTINFO` request.
    ClientInfoRequest = "CLIENTINFO", false, params;
    /// `CLIENTINFO <supported commands>`
    ClientInfoReply = "CLIENTINFO", true, commands;
    /// `FINGER` request.
    FingerRequest = "FINGER", false, params;
    /// `FINGER <user info>`
    FingerReply = "FINGER", true, info;
    /// `USERINFO` request.
    UserInfoRequest = "USERINFO", false, params;
    /// `USERINFO <user info>`
    UserInfoReply = "USERINFO", true, info;
}

macro_rules! generic_ctcp {
    ($(#[$meta:meta])* $name:ident, $reply:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            pub target: String,
            /// Inner command, as sent.
            pub command: String,
            pub params: Option<String>,
        }

        impl MessageKind for $name {
            fn to_tokens(&self) -> Vec<String> {
                vec![
                    outer_command($reply).to_owned(),
                    self.target.clone(),
                    encode(&self.command, self.params.as_deref()),
                ]
            }

            fn targets(&self) -> Vec<&str> {
                split_targets(&self.target)
            }

            fn is_conversation(&self) -> bool {
                true
            }
        }

        impl ParseMessage for $name {
            fn can_parse(line: &ParsedLine) -> bool {
                payload(line, $reply).is_some()
            }

            fn parse(line: &ParsedLine) -> Result<Self, MessageParseError> {
                let (target, ctcp) = payload(line, $reply).ok_or(
                    MessageParseError::NotEnoughArguments {
                        expected: 2,
                        got: line.parameters.len(),
                    },
                )?;
                Ok($name {
                    target: target.to_owned(),
                    command: ctcp.command.to_owned(),
                    params: ctcp.params.map(str::to_owned),
                })
            }
        }
    };
}

generic_ctcp! {
    /// Any CTCP request without a dedicated type.
    GenericCtcpRequestMessage, false
}

generic_ctcp! {
    /// Any CTCP reply without a dedicated type.
    GenericCtcpReplyMessage, true
}
