//! Property-based tests for the line tokenizer, the mode grammar and
//! message classification.
//!
//! Uses proptest to generate random protocol components and verify that:
//! 1. Tokenizing formatted tokens yields the same tokens
//! 2. Mode change sets survive serialization and re-parsing
//! 3. Classification never panics on well-formed lines

use proptest::prelude::*;
use slirc_session::line::{format_tokens, tokenize_uncached};
use slirc_session::{
    parse_modes, MessageFactory, ModeAction, ModeChange, ModeChangeSet, Prefix, ServerSupport,
};

// =============================================================================
// STRATEGIES
// =============================================================================

fn nickname_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z\\[\\]\\\\^_`{|}][a-zA-Z0-9\\-\\[\\]\\\\^_`{|}]{0,8}")
        .expect("valid regex")
}

fn channel_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[#&][a-zA-Z0-9_\\-]{1,30}").expect("valid regex")
}

/// A middle parameter: no spaces, no leading colon, not empty.
fn middle_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9#&@+!.,*=\\-_\\[\\]]{1,20}").expect("valid regex")
}

/// Free text for the trailing position.
fn trailing_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[^\r\n\0]{0,200}").expect("valid regex")
}

fn command_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[A-Z]{2,10}").expect("valid regex"),
        (0u16..1000).prop_map(|code| format!("{:03}", code)),
    ]
}

fn prefix_strategy() -> impl Strategy<Value = Prefix> {
    prop_oneof![
        prop::string::string_regex("[a-z]+\\.[a-z]+\\.[a-z]+")
            .expect("valid regex")
            .prop_map(Prefix::ServerName),
        (
            nickname_strategy(),
            prop::string::string_regex("[a-z][a-z0-9]{0,9}").expect("valid regex"),
            prop::string::string_regex("[a-z0-9]+(\\.[a-z0-9]+)*").expect("valid regex"),
        )
            .prop_map(|(nick, user, host)| Prefix::Nickname(nick, user, host)),
    ]
}

fn support() -> ServerSupport {
    let mut support = ServerSupport::new();
    support.apply_tokens(&["PREFIX=(ov)@+", "CHANMODES=beI,k,l,imnpst"]);
    support
}

/// A change set in which every change carries an argument exactly when
/// the grammar says it should.
fn mode_set_strategy() -> impl Strategy<Value = ModeChangeSet> {
    let change = (
        any::<bool>(),
        prop::sample::select(vec!['o', 'v', 'b', 'e', 'I', 'k', 'l', 'i', 'm', 'n', 'p', 's', 't']),
        prop::string::string_regex("[a-zA-Z0-9*!@.]{1,12}").expect("valid regex"),
    )
        .prop_map(|(add, letter, argument)| {
            let action = if add {
                ModeAction::Add
            } else {
                ModeAction::Remove
            };
            let argument = support()
                .takes_argument(letter, add)
                .then_some(argument);
            ModeChange {
                action,
                letter,
                argument,
            }
        });
    prop::collection::vec(change, 0..8).prop_map(ModeChangeSet)
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn tokenize_inverts_format(
        command in command_strategy(),
        middles in prop::collection::vec(middle_strategy(), 0..6),
        trailing in prop::option::of(trailing_strategy()),
    ) {
        let mut tokens = vec![command];
        tokens.extend(middles);
        tokens.extend(trailing);

        let line = format_tokens(&tokens);
        let parsed = tokenize_uncached(&line).expect("formatted tokens tokenize");
        prop_assert_eq!(parsed.to_tokens(), tokens);
        prop_assert_eq!(format_tokens(&parsed.to_tokens()), line);
    }

    #[test]
    fn mode_string_round_trips(set in mode_set_strategy()) {
        let support = support();
        let (modes, arguments) = set.to_mode_string();
        let reparsed = parse_modes(&modes, &arguments, &support);
        prop_assert_eq!(reparsed, set);
    }

    #[test]
    fn classification_is_total(
        prefix in prop::option::of(prefix_strategy()),
        command in command_strategy(),
        middles in prop::collection::vec(middle_strategy(), 0..5),
        trailing in prop::option::of(trailing_strategy()),
    ) {
        let mut tokens = vec![command];
        tokens.extend(middles);
        tokens.extend(trailing);
        let body = format_tokens(&tokens);
        let line = match prefix {
            Some(prefix) => format!(":{} {}", prefix, body),
            None => body,
        };
        prop_assume!(line.len() <= 512);

        let factory = MessageFactory::new();
        // Typed-field failures surface as errors; anything else classifies.
        if let Ok(message) = factory.classify_and_parse(&line) {
            prop_assert_eq!(message.prefix.is_some(), line.starts_with(':'));
            let _ = message.format();
        }
    }

    #[test]
    fn privmsg_round_trip(
        prefix in prefix_strategy(),
        target in prop_oneof![nickname_strategy(), channel_strategy()],
        text in prop::string::string_regex("[^\r\n\0\x01]{1,300}").expect("valid regex"),
    ) {
        let factory = MessageFactory::new();
        let line = format!(":{} PRIVMSG {} :{}", prefix, target, text);
        let message = factory.classify_and_parse(&line).expect("valid PRIVMSG");
        prop_assert!(message.prefix.is_some());
        let again = factory.classify_and_parse(&message.format()).expect("reparse");
        prop_assert_eq!(again, message);
    }
}
