//! Server capability table learned from `RPL_ISUPPORT` (005).
//!
//! [`ServerSupport`] starts out with RFC 1459 defaults and is refined as
//! the server advertises tokens. It bounds how mode strings are split,
//! which names count as channels, and how names are case-folded.
//!
//! # Reference
//! - <https://modern.ircdocs.horse/#rplisupport-005>

mod tokens;

use std::collections::BTreeMap;

pub use self::tokens::{parse_params, ChanModes, IsupportEntry, MaxList, PrefixSpec, TargMax};
use crate::casemap::CaseMapping;

/// How a channel mode letter uses parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModeKind {
    /// Type A: list of masks.
    List,
    /// Type B: parameter on set and unset.
    AlwaysParam,
    /// Type C: parameter only on set.
    ParamWhenSet,
    /// Type D or unknown: never a parameter.
    NoParam,
    /// PREFIX mode: takes a nickname.
    Status,
}

/// Parsed ISUPPORT capabilities.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServerSupport {
    /// `NETWORK` name.
    pub network: Option<String>,
    /// `CHANTYPES` prefix characters.
    pub chantypes: String,
    /// `PREFIX` status modes.
    pub prefix: PrefixSpec,
    /// `CHANMODES` classes.
    pub chanmodes: ChanModes,
    /// `MODES`: parameterized changes per MODE command; `None` is unlimited.
    pub max_modes: Option<usize>,
    /// `CHANLIMIT` / `MAXCHANNELS`.
    pub max_channels: Option<usize>,
    /// `NICKLEN`.
    pub nicklen: Option<usize>,
    /// `CHANNELLEN`.
    pub channellen: usize,
    /// `TOPICLEN`.
    pub topiclen: Option<usize>,
    /// `CASEMAPPING`.
    pub casemapping: CaseMapping,
    /// `STATUSMSG` symbols usable as target prefixes.
    pub statusmsg: String,
    /// `EXCEPTS` ban exception mode.
    pub excepts: Option<char>,
    /// `INVEX` invite exception mode.
    pub invex: Option<char>,
    /// `TARGMAX`.
    pub targmax: TargMax,
    /// `MAXLIST`.
    pub maxlist: MaxList,
    raw: BTreeMap<String, Option<String>>,
}

const DEFAULT_CHANTYPES: &str = "#&";
const DEFAULT_CHANNELLEN: usize = 200;
const DEFAULT_MODES: usize = 3;

impl Default for ServerSupport {
    fn default() -> Self {
        ServerSupport {
            network: None,
            chantypes: DEFAULT_CHANTYPES.to_owned(),
            prefix: PrefixSpec::default(),
            chanmodes: ChanModes::default(),
            max_modes: Some(DEFAULT_MODES),
            max_channels: None,
            nicklen: None,
            channellen: DEFAULT_CHANNELLEN,
            topiclen: None,
            casemapping: CaseMapping::default(),
            statusmsg: String::new(),
            excepts: None,
            invex: None,
            targmax: TargMax::default(),
            maxlist: MaxList::default(),
            raw: BTreeMap::new(),
        }
    }
}

impl ServerSupport {
    /// A table with RFC 1459 defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the tokens of one `RPL_ISUPPORT` line.
    pub fn apply_tokens<S: AsRef<str>>(&mut self, tokens: &[S]) {
        for entry in parse_params(tokens) {
            self.apply_entry(entry);
        }
    }

    fn apply_entry(&mut self, entry: IsupportEntry<'_>) {
        let key = entry.key.to_ascii_uppercase();
        if entry.negated {
            self.raw.remove(&key);
            self.reset(&key);
            return;
        }

        let value = entry.value.unwrap_or("");
        match key.as_str() {
            "NETWORK" => self.network = entry.value.map(str::to_owned),
            "CHANTYPES" => self.chantypes = value.to_owned(),
            "PREFIX" => {
                if let Some(spec) = PrefixSpec::parse(value) {
                    self.prefix = spec;
                }
            }
            "CHANMODES" => {
                if let Some(modes) = ChanModes::parse(value) {
                    self.chanmodes = modes;
                }
            }
            "MODES" => self.max_modes = value.parse().ok(),
            "MAXCHANNELS" => self.max_channels = value.parse().ok(),
            "CHANLIMIT" => {
                self.max_channels = value
                    .split(',')
                    .filter_map(|part| part.split_once(':'))
                    .filter_map(|(_, n)| n.parse::<usize>().ok())
                    .max();
            }
            "NICKLEN" => self.nicklen = value.parse().ok(),
            "CHANNELLEN" => self.channellen = value.parse().unwrap_or(DEFAULT_CHANNELLEN),
            "TOPICLEN" => self.topiclen = value.parse().ok(),
            "CASEMAPPING" => self.casemapping = CaseMapping::from_token(value),
            "STATUSMSG" => self.statusmsg = value.to_owned(),
            "EXCEPTS" => self.excepts = Some(value.chars().next().unwrap_or('e')),
            "INVEX" => self.invex = Some(value.chars().next().unwrap_or('I')),
            "TARGMAX" => self.targmax = TargMax::parse(value),
            "MAXLIST" => self.maxlist = MaxList::parse(value),
            _ => {}
        }
        self.raw.insert(key, entry.value.map(str::to_owned));
    }

    fn reset(&mut self, key: &str) {
        let defaults = ServerSupport::default();
        match key {
            "NETWORK" => self.network = defaults.network,
            "CHANTYPES" => self.chantypes = defaults.chantypes,
            "PREFIX" => self.prefix = defaults.prefix,
            "CHANMODES" => self.chanmodes = defaults.chanmodes,
            "MODES" => self.max_modes = defaults.max_modes,
            "MAXCHANNELS" | "CHANLIMIT" => self.max_channels = defaults.max_channels,
            "NICKLEN" => self.nicklen = defaults.nicklen,
            "CHANNELLEN" => self.channellen = defaults.channellen,
            "TOPICLEN" => self.topiclen = defaults.topiclen,
            "CASEMAPPING" => self.casemapping = defaults.casemapping,
            "STATUSMSG" => self.statusmsg = defaults.statusmsg,
            "EXCEPTS" => self.excepts = defaults.excepts,
            "INVEX" => self.invex = defaults.invex,
            "TARGMAX" => self.targmax = defaults.targmax,
            "MAXLIST" => self.maxlist = defaults.maxlist,
            _ => {}
        }
    }

    /// Raw token lookup: `None` if never advertised, `Some(None)` if valueless.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.raw
            .get(&key.to_ascii_uppercase())
            .map(|v| v.as_deref())
    }

    /// Every advertised token, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.raw.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Whether `name` is shaped like a channel on this server.
    pub fn is_channel_name(&self, name: &str) -> bool {
        match name.chars().next() {
            Some(first) if self.chantypes.contains(first) => {
                name.len() <= self.channellen
                    && !name.contains([' ', ',', '\x07'])
            }
            _ => false,
        }
    }

    /// Classify a channel mode letter.
    pub fn mode_kind(&self, letter: char) -> ModeKind {
        if self.prefix.modes.contains(letter) {
            ModeKind::Status
        } else if self.chanmodes.list.contains(letter) {
            ModeKind::List
        } else if self.chanmodes.always.contains(letter) {
            ModeKind::AlwaysParam
        } else if self.chanmodes.when_set.contains(letter) {
            ModeKind::ParamWhenSet
        } else {
            ModeKind::NoParam
        }
    }

    /// Whether a channel mode letter consumes an argument in this direction.
    pub fn takes_argument(&self, letter: char, adding: bool) -> bool {
        match self.mode_kind(letter) {
            ModeKind::Status | ModeKind::List | ModeKind::AlwaysParam => true,
            ModeKind::ParamWhenSet => adding,
            ModeKind::NoParam => false,
        }
    }

    /// Status mode letter for a roster symbol such as `@`.
    pub fn status_mode(&self, symbol: char) -> Option<char> {
        self.prefix.mode_for_symbol(symbol)
    }

    /// Roster symbol for a status mode letter such as `o`.
    pub fn status_symbol(&self, mode: char) -> Option<char> {
        self.prefix.symbol_for_mode(mode)
    }

    /// Split leading status symbols off a NAMES entry: `@+nick` gives
    /// `(['o', 'v'], "nick")`.
    pub fn split_status<'a>(&self, entry: &'a str) -> (Vec<char>, &'a str) {
        let mut modes = Vec::new();
        let mut rest = entry;
        while let Some(c) = rest.chars().next() {
            match self.status_mode(c) {
                Some(mode) => {
                    modes.push(mode);
                    rest = &rest[c.len_utf8()..];
                }
                None => break,
            }
        }
        (modes, rest)
    }

    /// Strip `STATUSMSG` symbols off a message target such as `@#ops`.
    pub fn strip_statusmsg<'a>(&self, target: &'a str) -> &'a str {
        let stripped = target.trim_start_matches(|c| self.statusmsg.contains(c));
        if stripped.len() != target.len() && self.is_channel_name(stripped) {
            stripped
        } else {
            target
        }
    }

    /// Fold a nickname or channel name under the current case mapping.
    #[inline]
    pub fn fold(&self, name: &str) -> String {
        self.casemapping.fold(name)
    }

    /// Compare two names under the current case mapping.
    #[inline]
    pub fn names_eq(&self, a: &str, b: &str) -> bool {
        self.casemapping.eq(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn support(tokens: &[&str]) -> ServerSupport {
        let mut s = ServerSupport::new();
        s.apply_tokens(tokens);
        s
    }

    #[test]
    fn test_defaults() {
        let s = ServerSupport::new();
        assert!(s.is_channel_name("#rust"));
        assert!(s.is_channel_name("&local"));
        assert!(!s.is_channel_name("nick"));
        assert_eq!(s.mode_kind('o'), ModeKind::Status);
        assert_eq!(s.mode_kind('b'), ModeKind::List);
        assert_eq!(s.mode_kind('k'), ModeKind::AlwaysParam);
        assert_eq!(s.mode_kind('l'), ModeKind::ParamWhenSet);
        assert_eq!(s.mode_kind('n'), ModeKind::NoParam);
        assert_eq!(s.max_modes, Some(3));
        assert_eq!(s.casemapping, CaseMapping::Rfc1459);
    }

    #[test]
    fn test_apply_tokens() {
        let s = support(&[
            "NETWORK=Libera.Chat",
            "CHANTYPES=#",
            "PREFIX=(qaohv)~&@%+",
            "CHANMODES=beI,k,fl,imnpst",
            "MODES=4",
            "CHANLIMIT=#:250",
            "NICKLEN=16",
            "CASEMAPPING=ascii",
            "STATUSMSG=@+",
            "EXCEPTS",
            "INVEX=I",
        ]);
        assert_eq!(s.network.as_deref(), Some("Libera.Chat"));
        assert!(!s.is_channel_name("&local"));
        assert_eq!(s.mode_kind('h'), ModeKind::Status);
        assert_eq!(s.mode_kind('f'), ModeKind::ParamWhenSet);
        assert_eq!(s.max_modes, Some(4));
        assert_eq!(s.max_channels, Some(250));
        assert_eq!(s.nicklen, Some(16));
        assert_eq!(s.casemapping, CaseMapping::Ascii);
        assert_eq!(s.excepts, Some('e'));
        assert_eq!(s.invex, Some('I'));
        assert_eq!(s.get("excepts"), Some(None));
        assert_eq!(s.get("NICKLEN"), Some(Some("16")));
    }

    #[test]
    fn test_negation_restores_default() {
        let mut s = support(&["CHANTYPES=#", "EXCEPTS=e"]);
        s.apply_tokens(&["-CHANTYPES", "-EXCEPTS"]);
        assert_eq!(s.chantypes, "#&");
        assert_eq!(s.excepts, None);
        assert_eq!(s.get("EXCEPTS"), None);
    }

    #[test]
    fn test_takes_argument() {
        let s = ServerSupport::new();
        assert!(s.takes_argument('l', true));
        assert!(!s.takes_argument('l', false));
        assert!(s.takes_argument('k', false));
        assert!(s.takes_argument('v', false));
        assert!(!s.takes_argument('z', true));
    }

    #[test]
    fn test_channel_length_and_statusmsg() {
        let s = support(&["CHANNELLEN=5", "STATUSMSG=@"]);
        assert!(s.is_channel_name("#abcd"));
        assert!(!s.is_channel_name("#abcdef"));
        assert!(!s.is_channel_name("#a b"));
        assert_eq!(s.strip_statusmsg("@#ops"), "#ops");
        assert_eq!(s.strip_statusmsg("@nick"), "@nick");
    }

    #[test]
    fn test_split_status() {
        let s = support(&["PREFIX=(ohv)@%+"]);
        assert_eq!(s.split_status("@+alice"), (vec!['o', 'v'], "alice"));
        assert_eq!(s.split_status("bob"), (vec![], "bob"));
    }
}
