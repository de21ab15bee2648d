//! # slirc-session
//!
//! A client-side IRC library: a codec that turns raw protocol lines into
//! strongly typed, round-trippable messages, and a sans-IO session engine
//! that keeps channels, users, queries and modes in step with the server.
//!
//! ## Features
//!
//! - Line tokenizer with the trailing-colon rule and a single-slot memo
//! - Typed command, numeric, error and CTCP messages with generic fallbacks
//! - Runtime registration of application-defined message types
//! - Mode-string parsing bounded by ISUPPORT (PREFIX, CHANMODES)
//! - ISUPPORT (RPL_ISUPPORT) parsing and case-mapping aware name handling
//! - A session reducer that returns typed events instead of doing I/O
//!
//! ## Quick Start
//!
//! ### Creating IRC Messages
//!
//! ```rust
//! use slirc_session::{Message, Prefix};
//!
//! let privmsg = Message::privmsg("#rust", "Hello, world!");
//! assert_eq!(privmsg.format(), "PRIVMSG #rust :Hello, world!");
//!
//! let join = Message::join("#channel").with_prefix(Prefix::new_from_str("bot!bot@example.com"));
//! assert_eq!(join.to_string(), ":bot!bot@example.com JOIN #channel");
//! ```
//!
//! ### Parsing IRC Messages
//!
//! ```rust
//! use slirc_session::message::{ErrorMessage, MessageBody, NumericMessage};
//! use slirc_session::MessageFactory;
//!
//! let factory = MessageFactory::new();
//! let message = factory
//!     .classify_and_parse(":irc.example.net 433 * alice :Nickname is already in use")
//!     .expect("valid line");
//!
//! match message.body {
//!     MessageBody::Numeric(NumericMessage::Error(ErrorMessage::NicknameInUse(err))) => {
//!         assert_eq!(err.nickname, "alice");
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```
//!
//! ## Concurrency
//!
//! The tokenizer, mode grammar, message types and [`MessageFactory`] are
//! safe to share between threads; the tokenizer's memo is thread-local.
//! A [`Session`](state::Session) has a single writer: apply messages in
//! arrival order through `&mut self`. Nothing here blocks or performs I/O.

#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod casemap;
pub mod ctcp;
pub mod error;
pub mod factory;
pub mod isupport;
pub mod line;
pub mod message;
pub mod mode;
pub mod prefix;
pub mod state;

pub use self::casemap::{irc_eq, irc_to_lower, CaseMapping};
pub use self::ctcp::Ctcp;
pub use self::error::{MessageParseError, ProtocolError};
pub use self::factory::{MessageFactory, MAX_LINE_LEN};
pub use self::isupport::{ChanModes, IsupportEntry, MaxList, PrefixSpec, ServerSupport, TargMax};
pub use self::line::{format_tokens, tokenize, ParsedLine};
pub use self::message::{Message, MessageBody, MessageKind, ParseMessage};
pub use self::mode::{parse_modes, parse_user_modes, ModeAction, ModeChange, ModeChangeSet};
pub use self::prefix::Prefix;
pub use self::state::{Session, SessionConfig, SessionEvent};
