//! Integration tests for message parsing and serialization
//!
//! Every concrete message type is parsed from a representative line,
//! formatted, and parsed again; the two parses must be equal.

use slirc_session::message::{CommandMessage, MessageBody, NumericReply};
use slirc_session::{Message, MessageFactory, Prefix};

/// (raw line, expected `Debug` prefix of the classified body)
const CASES: &[(&str, &str)] = &[
    // commands
    ("PASS secret", "Command(Pass("),
    ("NICK alice", "Command(Nick("),
    ("USER guest 0 * :Real Name", "Command(User("),
    ("QUIT :Gone to lunch", "Command(Quit("),
    ("QUIT", "Command(Quit("),
    ("JOIN #a,#b key1", "Command(Join("),
    ("PART #a :see you", "Command(Part("),
    ("MODE #c +ov-k alice bob key", "Command(ChannelMode("),
    ("MODE #c", "Command(ChannelMode("),
    ("MODE alice +i", "Command(UserMode("),
    ("TOPIC #c :new topic", "Command(Topic("),
    ("TOPIC #c", "Command(Topic("),
    ("NAMES #a,#b", "Command(Names("),
    ("LIST", "Command(List("),
    ("INVITE bob #c", "Command(Invite("),
    ("KICK #c bob :behave", "Command(Kick("),
    ("PRIVMSG #c :hello there", "Command(Chat("),
    ("NOTICE bob :psst", "Command(Notice("),
    ("WHO #c o", "Command(Who("),
    ("WHOIS irc.example.net alice", "Command(Whois("),
    ("AWAY :out to lunch", "Command(Away("),
    ("AWAY", "Command(Back"),
    ("PING :irc.example.net", "Command(Ping("),
    ("PONG irc.example.net :token", "Command(Pong("),
    ("KILL bob :spamming", "Command(Kill("),
    ("ERROR :Closing Link", "Command(Error("),
    ("FOOBAR baz qux", "Command(Generic("),
    // numerics
    ("001 me :Welcome to the network", "Numeric(Welcome("),
    ("002 me :Your host is irc.example.net", "Numeric(YourHost("),
    ("003 me :This server was created today", "Numeric(Created("),
    ("004 me irc.example.net ircd-1.0 iow beIklmnt", "Numeric(MyInfo("),
    (
        "005 me CHANTYPES=# PREFIX=(ov)@+ :are supported by this server",
        "Numeric(Support(",
    ),
    ("221 me +iw", "Numeric(UserModeIs("),
    ("251 me :There are 3 users on 1 server", "Numeric(LuserClient("),
    ("265 me 3 10 :Current local users 3, max 10", "Numeric(LocalUsers("),
    ("265 me :Current local users: 3 Max: 10", "Numeric(LocalUsers("),
    ("266 me 7 42 :Current global users 7, max 42", "Numeric(GlobalUsers("),
    ("301 me alice :gone fishing", "Numeric(UserAway("),
    ("305 me :You are no longer marked as being away", "Numeric(SelfUnaway("),
    ("306 me :You have been marked as being away", "Numeric(SelfAway("),
    ("311 me alice al host.example * :Alice A", "Numeric(WhoisUser("),
    ("312 me alice irc.example.net :Example server", "Numeric(WhoisServer("),
    ("315 me #c :End of WHO list", "Numeric(EndOfWho("),
    ("317 me alice 42 :seconds idle", "Numeric(WhoisIdle("),
    ("318 me alice :End of WHOIS list", "Numeric(EndOfWhois("),
    ("319 me alice :@#c +#d", "Numeric(WhoisChannels("),
    ("324 me #c +ntk key", "Numeric(ChannelModeIs("),
    ("329 me #c 1700000000", "Numeric(CreationTime("),
    ("331 me #c :No topic is set", "Numeric(NoTopic("),
    ("332 me #c :the topic", "Numeric(TopicReply("),
    ("333 me #c alice!a@h 1700000000", "Numeric(TopicSetBy("),
    ("352 me #c al host srv alice H@ :0 Alice A", "Numeric(WhoReply("),
    ("353 me = #c :@alice +bob carol", "Numeric(NamesReply("),
    ("366 me #c :End of NAMES list", "Numeric(EndOfNames("),
    ("372 me :- hello", "Numeric(Motd("),
    ("375 me :- irc.example.net Message of the day -", "Numeric(MotdStart("),
    ("376 me :End of MOTD command", "Numeric(EndOfMotd("),
    ("042 me ABCDEF :your unique ID", "Numeric(Generic("),
    // errors
    ("401 me bob :No such nick/channel", "Numeric(Error(NoSuchNick("),
    ("402 me irc.x :No such server", "Numeric(Error(NoSuchServer("),
    ("403 me #c :No such channel", "Numeric(Error(NoSuchChannel("),
    ("404 me #c :Cannot send to channel", "Numeric(Error(CannotSendToChan("),
    ("405 me #c :You have joined too many channels", "Numeric(Error(TooManyChannels("),
    ("421 me FOO :Unknown command", "Numeric(Error(UnknownCommand("),
    ("422 me :MOTD File is missing", "Numeric(Error(NoMotd("),
    ("431 me :No nickname given", "Numeric(Error(NoNicknameGiven("),
    ("432 me b@d :Erroneous nickname", "Numeric(Error(ErroneousNickname("),
    ("433 * alice :Nickname is already in use", "Numeric(Error(NicknameInUse("),
    ("436 me alice :Nickname collision KILL", "Numeric(Error(NickCollision("),
    ("441 me bob #c :They aren't on that channel", "Numeric(Error(UserNotInChannel("),
    ("442 me #c :You're not on that channel", "Numeric(Error(NotOnChannel("),
    ("443 me bob #c :is already on channel", "Numeric(Error(UserOnChannel("),
    ("451 * :You have not registered", "Numeric(Error(NotRegistered("),
    ("461 me JOIN :Not enough parameters", "Numeric(Error(NeedMoreParams("),
    ("462 me :Unauthorized command (already registered)", "Numeric(Error(AlreadyRegistered("),
    ("464 me :Password incorrect", "Numeric(Error(PasswdMismatch("),
    ("471 me #c :Cannot join channel (+l)", "Numeric(Error(ChannelIsFull("),
    ("472 me X :is unknown mode char to me", "Numeric(Error(UnknownMode("),
    ("473 me #c :Cannot join channel (+i)", "Numeric(Error(InviteOnlyChan("),
    ("474 me #c :Cannot join channel (+b)", "Numeric(Error(BannedFromChan("),
    ("475 me #c :Cannot join channel (+k)", "Numeric(Error(BadChannelKey("),
    ("481 me :Permission Denied- You're not an IRC operator", "Numeric(Error(NoPrivileges("),
    ("482 me #c :You're not channel operator", "Numeric(Error(ChanOpPrivsNeeded("),
    ("501 me :Unknown MODE flag", "Numeric(Error(UmodeUnknownFlag("),
    ("502 me :Cannot change mode for other users", "Numeric(Error(UsersDontMatch("),
    ("499 me #c :You're not a channel owner", "Numeric(Error(Generic("),
    // ctcp
    ("PRIVMSG #c :\x01ACTION waves hello\x01", "Ctcp(Action("),
    ("PRIVMSG bob :\x01VERSION\x01", "Ctcp(VersionRequest("),
    ("NOTICE alice :\x01VERSION slirc 0.1\x01", "Ctcp(VersionReply("),
    ("PRIVMSG bob :\x01PING 1700000000\x01", "Ctcp(PingRequest("),
    ("NOTICE alice :\x01PING 1700000000\x01", "Ctcp(PingReply("),
    ("PRIVMSG bob :\x01TIME\x01", "Ctcp(TimeRequest("),
    ("NOTICE alice :\x01TIME Mon Jan 1 00:00:00 2024\x01", "Ctcp(TimeReply("),
    ("PRIVMSG bob :\x01CLIENTINFO\x01", "Ctcp(ClientInfoRequest("),
    ("NOTICE alice :\x01CLIENTINFO ACTION PING VERSION\x01", "Ctcp(ClientInfoReply("),
    ("PRIVMSG bob :\x01FINGER\x01", "Ctcp(FingerRequest("),
    ("NOTICE alice :\x01FINGER bob (idle 5s)\x01", "Ctcp(FingerReply("),
    ("PRIVMSG bob :\x01USERINFO\x01", "Ctcp(UserInfoRequest("),
    ("NOTICE alice :\x01USERINFO just bob\x01", "Ctcp(UserInfoReply("),
    ("PRIVMSG bob :\x01DCC SEND file 1 2 3\x01", "Ctcp(GenericRequest("),
    ("NOTICE alice :\x01SOURCE https://example.org\x01", "Ctcp(GenericReply("),
];

fn parse(factory: &MessageFactory, raw: &str) -> Message {
    factory
        .classify_and_parse(raw)
        .unwrap_or_else(|e| panic!("failed to parse {:?}: {}", raw, e))
}

#[test]
fn test_every_type_round_trips() {
    let factory = MessageFactory::new();
    for (raw, expected) in CASES {
        let message = parse(&factory, raw);
        let kind = format!("{:?}", message.body);
        assert!(
            kind.starts_with(expected),
            "{:?} classified as {}",
            raw,
            kind
        );

        let serialized = message.format();
        let reparsed = parse(&factory, &serialized);
        assert_eq!(message, reparsed, "round trip of {:?} via {:?}", raw, serialized);
        assert_eq!(reparsed.format(), serialized);
    }
}

#[test]
fn test_round_trip_with_prefix() {
    let factory = MessageFactory::new();
    for raw in [
        ":nick!user@host PRIVMSG #channel :Hello, world!",
        ":irc.example.net 001 nickname :Welcome to the IRC Network",
        ":nick!user@host MODE #c +o other",
    ] {
        let message = parse(&factory, raw);
        assert!(message.prefix.is_some());
        assert_eq!(message.to_string(), raw);
        assert_eq!(parse(&factory, &message.to_string()), message);
    }
}

#[test]
fn test_canonical_forms() {
    let factory = MessageFactory::new();
    let cases = [
        ("PRIVMSG #c :single", "PRIVMSG #c single"),
        ("QUIT :bye", "QUIT bye"),
        ("TOPIC #c :", "TOPIC #c :"),
        ("PING :irc.example.net", "PING irc.example.net"),
        (
            "265 me :Current local users: 3 Max: 10",
            "265 me 3 10 :Current local users: 3 Max: 10",
        ),
        ("privmsg #c :lower case verb", "PRIVMSG #c :lower case verb"),
        ("PRIVMSG   #c   :extra  spaces", "PRIVMSG #c :extra  spaces"),
    ];
    for (raw, canonical) in cases {
        assert_eq!(parse(&factory, raw).format(), canonical, "canonical form of {:?}", raw);
    }
}

#[test]
fn test_construction_and_parsing() {
    let factory = MessageFactory::new();
    let message = Message::privmsg("#test", "Integration test message")
        .with_prefix(Prefix::new_from_str("testbot!test@example.com"));
    let serialized = message.to_string();
    assert_eq!(
        serialized,
        ":testbot!test@example.com PRIVMSG #test :Integration test message"
    );
    assert_eq!(parse(&factory, &serialized), message);

    let action = Message::ctcp_action("#test", "waves");
    assert_eq!(parse(&factory, &action.format()), action);
}

#[test]
fn test_numeric_reply_accessors() {
    let factory = MessageFactory::new();
    let message = parse(&factory, ":srv 433 * alice :Nickname is already in use");
    match &message.body {
        MessageBody::Numeric(numeric) => {
            assert_eq!(numeric.code(), 433);
            assert_eq!(numeric.target(), "*");
            assert!(numeric.is_error());
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_generic_keeps_everything() {
    let factory = MessageFactory::new();
    let message = parse(&factory, "FOOBAR baz qux");
    match &message.body {
        MessageBody::Command(CommandMessage::Generic(generic)) => {
            assert_eq!(generic.command, "FOOBAR");
            assert_eq!(generic.parameters, vec!["baz", "qux"]);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(message.format(), "FOOBAR baz qux");
}
