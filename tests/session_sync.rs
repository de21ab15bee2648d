//! Session state kept in step with a scripted server.

use std::collections::HashSet;

use proptest::prelude::*;
use slirc_session::state::{ConnectionState, Session, SessionConfig, SessionEvent};
use slirc_session::{irc_to_lower, MessageFactory};

const SERVER: &str = "irc.example.net";

fn registered() -> (MessageFactory, Session) {
    let factory = MessageFactory::new();
    let mut session = Session::new(SessionConfig {
        nickname: "me".to_owned(),
        journal_capacity: 16,
        ..SessionConfig::default()
    });
    let _ = session.start();
    feed(&factory, &mut session, &format!(":{} 001 me :Welcome", SERVER));
    feed(
        &factory,
        &mut session,
        &format!(":{} 005 me PREFIX=(ov)@+ CHANTYPES=# :are supported", SERVER),
    );
    (factory, session)
}

fn feed(factory: &MessageFactory, session: &mut Session, line: &str) -> Vec<SessionEvent> {
    session
        .feed_line(factory, line)
        .unwrap_or_else(|e| panic!("{:?} rejected: {}", line, e))
}

fn nick_of(session: &Session, channel: &str) -> Vec<String> {
    let mut nicks: Vec<String> = session
        .channel(channel)
        .map(|c| {
            c.members()
                .filter_map(|(id, _)| session.user(id))
                .map(|u| u.nickname.clone())
                .collect()
        })
        .unwrap_or_default();
    nicks.sort();
    nicks
}

#[test]
fn test_registration_reaches_ready() {
    let (factory, mut session) = registered();
    assert_eq!(session.state(), ConnectionState::Registered);
    let events = feed(
        &factory,
        &mut session,
        &format!(":{} 375 me :- {} Message of the day -", SERVER, SERVER),
    );
    assert_eq!(events, vec![SessionEvent::Ready]);
    assert!(session.is_ready());
    assert_eq!(session.server_name(), Some(SERVER));
}

#[test]
fn test_join_join_kick() {
    let (factory, mut session) = registered();
    feed(&factory, &mut session, ":me!u@h JOIN #rust");
    let events = feed(&factory, &mut session, ":alice!a@example.org JOIN #rust");
    assert_eq!(
        events,
        vec![SessionEvent::Joined {
            channel: "#rust".to_owned(),
            nickname: "alice".to_owned(),
        }]
    );
    assert_eq!(nick_of(&session, "#rust"), vec!["alice", "me"]);

    let events = feed(&factory, &mut session, ":me!u@h KICK #rust alice :bye");
    assert_eq!(
        events,
        vec![SessionEvent::Kicked {
            channel: "#rust".to_owned(),
            nickname: "alice".to_owned(),
            by: Some("me".to_owned()),
            reason: Some("bye".to_owned()),
        }]
    );
    assert_eq!(nick_of(&session, "#rust"), vec!["me"]);
}

#[test]
fn test_two_status_modes_in_one_change() {
    let (factory, mut session) = registered();
    feed(&factory, &mut session, ":me!u@h JOIN #rust");
    feed(&factory, &mut session, &format!(":{} 353 me = #rust :me alice bob", SERVER));
    feed(&factory, &mut session, ":me!u@h MODE #rust +oo alice bob");

    let channel = session.channel("#rust").unwrap();
    for nick in ["alice", "bob"] {
        let id = session.user_id(nick).unwrap();
        assert!(channel.status(id).is_some_and(|s| s.has('o')), "{} not op", nick);
    }
    let me = session.me();
    assert!(channel.status(me).is_some_and(|s| s.is_empty()));
}

#[test]
fn test_channel_journal_is_bounded() {
    let (factory, mut session) = registered();
    feed(&factory, &mut session, ":me!u@h JOIN #rust");
    for i in 0..40 {
        feed(
            &factory,
            &mut session,
            &format!(":alice!a@h PRIVMSG #rust :line {}", i),
        );
    }
    let journal = session.channel("#rust").unwrap().journal();
    assert_eq!(journal.len(), 16);
    assert_eq!(
        journal.latest().map(|e| e.message.format()),
        Some(":alice!a@h PRIVMSG #rust :line 39".to_owned())
    );
}

#[test]
fn test_private_message_opens_query() {
    let (factory, mut session) = registered();
    let events = feed(&factory, &mut session, ":alice!a@h PRIVMSG me :hi");
    assert_eq!(
        events,
        vec![SessionEvent::QueryOpened {
            nickname: "alice".to_owned(),
        }]
    );
    let events = feed(&factory, &mut session, ":alice!a@h PRIVMSG me :again");
    assert!(events.is_empty());
    assert_eq!(session.query("ALICE").map(|q| q.journal().len()), Some(2));
}

#[test]
fn test_names_tracks_channel_not_joined() {
    let (factory, mut session) = registered();
    feed(
        &factory,
        &mut session,
        &format!(":{} 353 me = #other :@alice bob", SERVER),
    );
    feed(
        &factory,
        &mut session,
        &format!(":{} 366 me #other :End of /NAMES list.", SERVER),
    );

    let channel = session.channel("#other").unwrap();
    assert!(!channel.is_open());
    assert_eq!(nick_of(&session, "#other"), vec!["alice", "bob"]);
    let alice = session.user_id("alice").unwrap();
    assert!(channel.status(alice).is_some_and(|s| s.has('o')));
}

#[test]
fn test_who_tracks_channel_not_joined() {
    let (factory, mut session) = registered();
    feed(
        &factory,
        &mut session,
        &format!(":{} 352 me #other b host.example {} bob H@ :0 Bob", SERVER, SERVER),
    );

    let channel = session.channel("#other").unwrap();
    assert!(!channel.is_open());
    let bob = session.user_id("bob").unwrap();
    assert!(channel.status(bob).is_some_and(|s| s.has('o')));
    assert_eq!(
        session.user(bob).and_then(|u| u.host.as_deref()),
        Some("host.example")
    );
}

#[test]
fn test_peer_join_tracks_channel_not_joined() {
    let (factory, mut session) = registered();
    let events = feed(&factory, &mut session, ":carol!c@example.org JOIN #other");
    assert_eq!(
        events,
        vec![SessionEvent::Joined {
            channel: "#other".to_owned(),
            nickname: "carol".to_owned(),
        }]
    );

    let channel = session.channel("#other").unwrap();
    assert!(!channel.is_open());
    assert!(!channel.contains(session.me()));
    assert_eq!(nick_of(&session, "#other"), vec!["carol"]);
}

#[test]
fn test_join_records_user_and_host() {
    let (factory, mut session) = registered();
    feed(&factory, &mut session, ":me!u@h JOIN #rust");
    feed(&factory, &mut session, ":alice!ali@example.org JOIN #rust");

    let alice = session.user_by_nick("alice").unwrap();
    assert_eq!(alice.username.as_deref(), Some("ali"));
    assert_eq!(alice.host.as_deref(), Some("example.org"));
}

#[test]
fn test_rejoining_peer_keeps_query() {
    let (factory, mut session) = registered();
    feed(&factory, &mut session, ":me!u@h JOIN #rust");
    feed(&factory, &mut session, ":alice!a@h JOIN #rust");
    feed(&factory, &mut session, ":alice!a@h PRIVMSG me :hi");
    feed(&factory, &mut session, ":alice!a@h QUIT :gone");
    assert!(session.user_by_nick("alice").is_none());

    feed(&factory, &mut session, ":alice!a@h JOIN #rust");
    let events = feed(&factory, &mut session, ":alice!a@h PRIVMSG me :back");
    assert!(events.is_empty());

    assert_eq!(session.queries().count(), 1);
    let query = session.query("alice").unwrap();
    assert_eq!(query.journal().len(), 2);
    assert_eq!(Some(query.peer()), session.user_id("alice"));
}

#[test]
fn test_ping_asks_for_pong() {
    let (factory, mut session) = registered();
    let events = feed(&factory, &mut session, "PING :token123");
    match events.as_slice() {
        [SessionEvent::Send(reply)] => assert_eq!(reply.format(), "PONG token123"),
        other => panic!("unexpected {:?}", other),
    }
}

// =============================================================================
// CHURN
// =============================================================================

const NICKS: &[&str] = &["alice", "Bob", "carol", "dave", "[eve]", "{EVE}"];
const CHANNELS: &[&str] = &["#a", "#b", "#C"];

#[derive(Clone, Debug)]
enum Op {
    Join(usize, usize),
    Part(usize, usize),
    Quit(usize),
    Nick(usize, usize),
    Kick(usize, usize),
    Names(usize, Vec<(bool, usize)>),
    SelfJoin(usize),
    SelfPart(usize),
}

impl Op {
    fn line(&self) -> String {
        match self {
            Op::Join(n, c) => format!(":{}!u@h JOIN {}", NICKS[*n], CHANNELS[*c]),
            Op::Part(n, c) => format!(":{}!u@h PART {} :later", NICKS[*n], CHANNELS[*c]),
            Op::Quit(n) => format!(":{}!u@h QUIT :gone", NICKS[*n]),
            Op::Nick(n, m) => format!(":{}!u@h NICK {}", NICKS[*n], NICKS[*m]),
            Op::Kick(c, n) => format!(":me!u@h KICK {} {} :out", CHANNELS[*c], NICKS[*n]),
            Op::Names(c, names) => {
                let names: Vec<String> = names
                    .iter()
                    .map(|(op, n)| format!("{}{}", if *op { "@" } else { "" }, NICKS[*n]))
                    .collect();
                format!(":{} 353 me = {} :me {}", SERVER, CHANNELS[*c], names.join(" "))
            }
            Op::SelfJoin(c) => format!(":me!u@h JOIN {}", CHANNELS[*c]),
            Op::SelfPart(c) => format!(":me!u@h PART {}", CHANNELS[*c]),
        }
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let nick = 0..NICKS.len();
    let chan = 0..CHANNELS.len();
    prop_oneof![
        4 => (nick.clone(), chan.clone()).prop_map(|(n, c)| Op::Join(n, c)),
        2 => (nick.clone(), chan.clone()).prop_map(|(n, c)| Op::Part(n, c)),
        1 => nick.clone().prop_map(Op::Quit),
        2 => (nick.clone(), nick.clone()).prop_map(|(n, m)| Op::Nick(n, m)),
        1 => (chan.clone(), nick.clone()).prop_map(|(c, n)| Op::Kick(c, n)),
        1 => (chan.clone(), prop::collection::vec((any::<bool>(), nick), 0..4))
            .prop_map(|(c, names)| Op::Names(c, names)),
        1 => chan.clone().prop_map(Op::SelfJoin),
        1 => chan.prop_map(Op::SelfPart),
    ]
}

proptest! {
    #[test]
    fn churn_keeps_tables_consistent(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let (factory, mut session) = registered();
        feed(&factory, &mut session, ":me!u@h JOIN #a,#b");

        for op in &ops {
            feed(&factory, &mut session, &op.line());

            // Nicknames are unique under the active case mapping and every
            // user resolves back through its own nickname.
            let mut folded = HashSet::new();
            for (id, user) in session.users() {
                prop_assert!(folded.insert(irc_to_lower(&user.nickname)), "duplicate {}", user.nickname);
                prop_assert_eq!(session.user_id(&user.nickname), Some(id));
            }
            prop_assert_eq!(folded.len(), session.user_count());

            // Rosters only reference live users. The client is a member
            // exactly of the open channels.
            for channel in session.channels() {
                prop_assert_eq!(
                    channel.contains(session.me()),
                    channel.is_open(),
                    "membership of {}",
                    channel.name()
                );
                for (id, _) in channel.members() {
                    prop_assert!(session.user(id).is_some(), "dangling member in {}", channel.name());
                }
            }
            prop_assert_eq!(session.nickname(), "me");
        }
    }
}
