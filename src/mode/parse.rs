//! IRC mode parsing.

use crate::isupport::ServerSupport;

use super::{ModeAction, ModeChange, ModeChangeSet};

/// Parse a channel mode string like `+o-v alice bob`.
///
/// `+`/`-` switch the action; letters before any sign count as additions.
/// Letters that take a parameter (per `support`) consume the next unused
/// argument. Parsing never fails: a missing argument leaves `argument`
/// empty, unknown letters are kept without one, and surplus arguments are
/// ignored.
pub fn parse_modes<S: AsRef<str>>(
    change: &str,
    arguments: &[S],
    support: &ServerSupport,
) -> ModeChangeSet {
    parse_with(change, arguments, |letter, adding| {
        support.takes_argument(letter, adding)
    })
}

/// Parse a user mode string like `+iw`. User modes never take arguments.
pub fn parse_user_modes(change: &str) -> ModeChangeSet {
    parse_with::<&str>(change, &[], |_, _| false)
}

fn parse_with<S: AsRef<str>>(
    change: &str,
    arguments: &[S],
    takes_argument: impl Fn(char, bool) -> bool,
) -> ModeChangeSet {
    let mut res = Vec::with_capacity(change.len());
    let mut args = arguments.iter().map(|a| a.as_ref().to_owned());
    let mut action = ModeAction::Add;

    for c in change.chars() {
        match c {
            '+' => action = ModeAction::Add,
            '-' => action = ModeAction::Remove,
            _ => {
                let argument = if takes_argument(c, action == ModeAction::Add) {
                    args.next()
                } else {
                    None
                };
                res.push(ModeChange {
                    action,
                    letter: c,
                    argument,
                });
            }
        }
    }

    ModeChangeSet(res)
}
