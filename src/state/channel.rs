//! Channels, their modes and rosters, and private queries.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use tracing::trace;

use super::journal::Journal;
use super::user::UserId;
use crate::isupport::{ModeKind, ServerSupport};
use crate::mode::{ModeAction, ModeChange};

/// Prefix modes a member holds in one channel, highest rank first.
///
/// Several modes are kept at once (`@+alice` is both `o` and `v`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelStatus {
    modes: Vec<char>,
}

impl ChannelStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_modes<I>(modes: I, support: &ServerSupport) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut status = ChannelStatus::new();
        for mode in modes {
            status.add(mode, support);
        }
        status
    }

    /// Grant a prefix mode. Letters that are not prefix modes are ignored.
    pub fn add(&mut self, mode: char, support: &ServerSupport) {
        let Some(rank) = support.prefix.rank(mode) else {
            return;
        };
        if self.modes.contains(&mode) {
            return;
        }
        let at = self
            .modes
            .iter()
            .position(|m| support.prefix.rank(*m).unwrap_or(usize::MAX) > rank)
            .unwrap_or(self.modes.len());
        self.modes.insert(at, mode);
    }

    pub fn remove(&mut self, mode: char) {
        self.modes.retain(|m| *m != mode);
    }

    pub fn has(&self, mode: char) -> bool {
        self.modes.contains(&mode)
    }

    /// Highest-ranked mode held.
    pub fn highest(&self) -> Option<char> {
        self.modes.first().copied()
    }

    pub fn modes(&self) -> &[char] {
        &self.modes
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Roster symbols, e.g. `@+`.
    pub fn symbols(&self, support: &ServerSupport) -> String {
        self.modes
            .iter()
            .filter_map(|m| support.status_symbol(*m))
            .collect()
    }
}

/// Non-status channel modes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelModes {
    /// Type A masks per letter, in the order they were added.
    lists: BTreeMap<char, Vec<String>>,
    /// Types B and C: the current value per letter.
    params: BTreeMap<char, String>,
    /// Type D flags.
    flags: BTreeSet<char>,
}

impl ChannelModes {
    /// Apply one change. Status modes are not channel modes and are ignored.
    pub fn apply(&mut self, change: &ModeChange, support: &ServerSupport) {
        let letter = change.letter;
        match (support.mode_kind(letter), change.action) {
            (ModeKind::Status, _) => {}
            (ModeKind::List, ModeAction::Add) => {
                let Some(mask) = &change.argument else {
                    return;
                };
                let list = self.lists.entry(letter).or_default();
                if !list.iter().any(|m| support.names_eq(m, mask)) {
                    list.push(mask.clone());
                }
            }
            (ModeKind::List, ModeAction::Remove) => {
                if let (Some(list), Some(mask)) = (self.lists.get_mut(&letter), &change.argument) {
                    list.retain(|m| !support.names_eq(m, mask));
                    if list.is_empty() {
                        self.lists.remove(&letter);
                    }
                }
            }
            (ModeKind::AlwaysParam | ModeKind::ParamWhenSet, ModeAction::Add) => {
                match &change.argument {
                    Some(value) => {
                        self.params.insert(letter, value.clone());
                    }
                    None => trace!(mode = %letter, "parameter mode set without a value"),
                }
            }
            (ModeKind::AlwaysParam | ModeKind::ParamWhenSet, ModeAction::Remove) => {
                self.params.remove(&letter);
            }
            (ModeKind::NoParam, ModeAction::Add) => {
                self.flags.insert(letter);
            }
            (ModeKind::NoParam, ModeAction::Remove) => {
                self.flags.remove(&letter);
            }
        }
    }

    /// Drop every non-list mode; used before applying `RPL_CHANNELMODEIS`.
    pub fn clear_settings(&mut self) {
        self.params.clear();
        self.flags.clear();
    }

    pub fn has_flag(&self, letter: char) -> bool {
        self.flags.contains(&letter)
    }

    pub fn flags(&self) -> impl Iterator<Item = char> + '_ {
        self.flags.iter().copied()
    }

    /// Value of a parameter mode such as `k` or `l`.
    pub fn param(&self, letter: char) -> Option<&str> {
        self.params.get(&letter).map(String::as_str)
    }

    /// Masks of a list mode such as `b`.
    pub fn list(&self, letter: char) -> &[String] {
        self.lists.get(&letter).map(Vec::as_slice).unwrap_or_default()
    }

    /// Flags and parameter modes as a change string with arguments,
    /// e.g. `("+klnt", ["key", "50"])`.
    pub fn to_mode_string(&self) -> (String, Vec<String>) {
        let mut letters: Vec<char> = self.flags.iter().chain(self.params.keys()).copied().collect();
        letters.sort_unstable();
        let mut modes = String::from("+");
        let mut args = Vec::new();
        for letter in letters {
            modes.push(letter);
            if let Some(value) = self.params.get(&letter) {
                args.push(value.clone());
            }
        }
        if modes.len() == 1 {
            modes.clear();
        }
        (modes, args)
    }
}

/// A channel the client is, or was, a member of.
#[derive(Clone, Debug)]
pub struct Channel {
    name: String,
    pub(crate) topic: Option<String>,
    pub(crate) topic_setter: Option<String>,
    pub(crate) topic_set_time: Option<DateTime<Utc>>,
    pub(crate) created: Option<DateTime<Utc>>,
    pub(crate) modes: ChannelModes,
    pub(crate) members: HashMap<UserId, ChannelStatus>,
    pub(crate) open: bool,
    pub(crate) journal: Journal,
}

impl Channel {
    pub(crate) fn new(name: impl Into<String>, journal_capacity: usize) -> Self {
        Channel {
            name: name.into(),
            topic: None,
            topic_setter: None,
            topic_set_time: None,
            created: None,
            modes: ChannelModes::default(),
            members: HashMap::new(),
            open: false,
            journal: Journal::new(journal_capacity),
        }
    }

    /// Name as first seen.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Nickname or mask of whoever set the topic.
    pub fn topic_setter(&self) -> Option<&str> {
        self.topic_setter.as_deref()
    }

    pub fn topic_set_time(&self) -> Option<DateTime<Utc>> {
        self.topic_set_time
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    pub fn modes(&self) -> &ChannelModes {
        &self.modes
    }

    /// Whether the client is currently a member.
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn members(&self) -> impl Iterator<Item = (UserId, &ChannelStatus)> + '_ {
        self.members.iter().map(|(id, status)| (*id, status))
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn status(&self, user: UserId) -> Option<&ChannelStatus> {
        self.members.get(&user)
    }

    pub fn contains(&self, user: UserId) -> bool {
        self.members.contains_key(&user)
    }

    /// Mark the client as no longer a member. The roster is dropped; name,
    /// topic, modes and journal are kept.
    pub(crate) fn close(&mut self) {
        self.open = false;
        self.members.clear();
    }
}

/// Private conversation with one peer.
#[derive(Clone, Debug)]
pub struct Query {
    pub(crate) peer: UserId,
    pub(crate) nickname: String,
    pub(crate) journal: Journal,
}

impl Query {
    pub(crate) fn new(peer: UserId, nickname: &str, journal_capacity: usize) -> Self {
        Query {
            peer,
            nickname: nickname.to_owned(),
            journal: Journal::new(journal_capacity),
        }
    }

    /// Handle of the peer. Stale after the peer quits until it is seen again.
    pub fn peer(&self) -> UserId {
        self.peer
    }

    /// Last nickname the peer was seen with.
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }
}
