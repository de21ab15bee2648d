//! Sans-IO client session state.
//!
//! [`Session`] is a reducer over classified messages: it keeps channels,
//! users, queries and modes in step with what the server reports. It does
//! not perform I/O. It consumes [`Message`]s and produces
//! [`SessionEvent`]s, some of which ask the caller to send a reply.
//!
//! # Example
//!
//! ```
//! use slirc_session::factory::MessageFactory;
//! use slirc_session::state::{Session, SessionConfig, SessionEvent};
//!
//! let factory = MessageFactory::new();
//! let mut session = Session::new(SessionConfig {
//!     nickname: "testbot".to_string(),
//!     ..SessionConfig::default()
//! });
//!
//! // NICK and USER, ready to be written to the socket.
//! for message in session.start() {
//!     let _line = format!("{}\r\n", message);
//! }
//!
//! session.feed_line(&factory, ":srv 001 testbot :Welcome").unwrap();
//! session.feed_line(&factory, ":testbot!bot@host JOIN #rust").unwrap();
//! assert!(session.channel("#RUST").is_some_and(|c| c.is_open()));
//!
//! let events = session.feed_line(&factory, "PING :srv").unwrap();
//! assert!(matches!(&events[..], [SessionEvent::Send(_)]));
//! ```

mod channel;
mod engine;
mod journal;
mod user;

pub use self::channel::{Channel, ChannelModes, ChannelStatus, Query};
pub use self::engine::Session;
pub use self::journal::{Journal, JournalEntry};
pub use self::user::{User, UserId};

use crate::message::Message;
use crate::mode::ModeChangeSet;

/// Where the session is in the connection lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectionState {
    /// Nothing sent yet.
    #[default]
    Disconnected,
    /// NICK/USER sent, awaiting welcome (001).
    Registering,
    /// Received 001; the registration burst is still arriving.
    Registered,
    /// The first reply after the registration burst has arrived.
    Ready,
    /// QUIT, KILL or ERROR ended the connection.
    Terminated,
}

/// Configuration for a [`Session`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    /// Desired nickname.
    pub nickname: String,
    /// Username (ident).
    pub username: String,
    /// Real name / GECOS.
    pub realname: String,
    /// Server password, if required.
    pub password: Option<String>,
    /// Entries kept per channel, query and server journal.
    pub journal_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            nickname: "slirc".to_owned(),
            username: "slirc".to_owned(),
            realname: "slirc".to_owned(),
            password: None,
            journal_capacity: Journal::DEFAULT_CAPACITY,
        }
    }
}

/// Something the session observed or wants done.
///
/// Names are reported as the server spelled them.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// The registration burst is over. Fires once.
    Ready,
    Joined {
        channel: String,
        nickname: String,
    },
    Parted {
        channel: String,
        nickname: String,
        reason: Option<String>,
    },
    Kicked {
        channel: String,
        nickname: String,
        by: Option<String>,
        reason: Option<String>,
    },
    /// A user left the network (QUIT or KILL).
    Quit {
        nickname: String,
        reason: Option<String>,
    },
    NickChanged {
        old: String,
        new: String,
    },
    TopicChanged {
        channel: String,
        topic: Option<String>,
    },
    /// Channel or own user modes changed.
    ModesChanged {
        target: String,
        changes: ModeChangeSet,
    },
    /// The client is no longer a member of this channel.
    ChannelClosed {
        channel: String,
    },
    /// First private message from this peer.
    QueryOpened {
        nickname: String,
    },
    AwayChanged {
        nickname: String,
        away: bool,
    },
    /// New ISUPPORT tokens were applied.
    SupportUpdated,
    /// Send this message to the server.
    ///
    /// Boxed to reduce enum size variance (Message is large).
    Send(Box<Message>),
}
