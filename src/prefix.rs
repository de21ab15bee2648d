//! Message sources.

use std::fmt;

/// Where a message came from: a server, or a user's `nick!user@host`.
///
/// Parsing never fails and `Display` reproduces the parsed text, so a
/// prefix survives a round trip even when parts are missing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Prefix {
    ServerName(String),
    /// Nickname, username and host; the last two may be empty.
    Nickname(String, String, String),
}

impl Prefix {
    /// Split a prefix without the leading `:`.
    ///
    /// A dotted name with neither `!` nor `@` is taken as a server.
    pub fn new_from_str(s: &str) -> Self {
        let (source, host) = s.split_once('@').unwrap_or((s, ""));
        let (nick, user) = source.split_once('!').unwrap_or((source, ""));
        if nick.len() == s.len() && nick.contains('.') {
            return Prefix::ServerName(s.to_owned());
        }
        Prefix::Nickname(nick.to_owned(), user.to_owned(), host.to_owned())
    }

    /// Nickname of a user source.
    pub fn nick(&self) -> Option<&str> {
        match self {
            Prefix::Nickname(nick, _, _) if !nick.is_empty() => Some(nick),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&str> {
        match self {
            Prefix::Nickname(_, user, _) if !user.is_empty() => Some(user),
            _ => None,
        }
    }

    /// Host of a user source, or the server name.
    pub fn host(&self) -> Option<&str> {
        match self {
            Prefix::ServerName(name) => Some(name),
            Prefix::Nickname(_, _, host) if !host.is_empty() => Some(host),
            _ => None,
        }
    }

    /// Nickname or server name.
    pub fn name(&self) -> &str {
        match self {
            Prefix::ServerName(name) | Prefix::Nickname(name, _, _) => name,
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (nick, user, host) = match self {
            Prefix::ServerName(name) => return f.write_str(name),
            Prefix::Nickname(nick, user, host) => (nick, user, host),
        };
        f.write_str(nick)?;
        if !user.is_empty() {
            write!(f, "!{}", user)?;
        }
        if !host.is_empty() {
            write!(f, "@{}", host)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_and_user_sources() {
        let server = Prefix::new_from_str("irc.example.com");
        assert_eq!(server, Prefix::ServerName("irc.example.com".into()));
        assert_eq!(server.nick(), None);
        assert_eq!(server.host(), Some("irc.example.com"));

        let user = Prefix::new_from_str("nick!user@host.com");
        assert_eq!(user.nick(), Some("nick"));
        assert_eq!(user.user(), Some("user"));
        assert_eq!(user.host(), Some("host.com"));
    }

    #[test]
    fn test_partial_sources() {
        let bare = Prefix::new_from_str("srv");
        assert_eq!(bare.name(), "srv");
        assert_eq!(bare.user(), None);
        assert_eq!(Prefix::new_from_str("a.b!c@d").nick(), Some("a.b"));
        assert_eq!(Prefix::new_from_str("a.b@d").nick(), Some("a.b"));
    }

    #[test]
    fn test_display_reproduces_input() {
        for raw in [
            "foo!bar@zap.com",
            "irc2.secsup.org",
            "COBOL",
            "nick@host",
            "nick!user",
            "COBOL!~COBOL@ool-435015b7.dyn.optonline.net",
        ] {
            assert_eq!(Prefix::new_from_str(raw).to_string(), raw);
        }
    }
}
