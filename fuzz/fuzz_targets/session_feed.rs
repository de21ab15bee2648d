//! Fuzz target for the session engine
//!
//! Splits the input into lines and feeds each to a registered session. The
//! session must never panic and its rosters must only name live users.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slirc_session::state::{Session, SessionConfig};
use slirc_session::MessageFactory;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let factory = MessageFactory::new();
    let mut session = Session::new(SessionConfig {
        nickname: "me".to_owned(),
        journal_capacity: 8,
        ..SessionConfig::default()
    });
    let _ = session.start();
    let _ = session.feed_line(&factory, ":irc.example.net 001 me :Welcome");

    for line in input.split(['\r', '\n']) {
        let _ = session.feed_line(&factory, line);
    }

    for channel in session.channels() {
        for (id, _) in channel.members() {
            assert!(session.user(id).is_some());
        }
    }
});
