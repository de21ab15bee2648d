//! Users known to the session and the table that owns them.

use std::collections::{BTreeSet, HashMap};

use crate::casemap::CaseMapping;
use crate::mode::{ModeAction, ModeChangeSet};
use crate::prefix::Prefix;

/// Stable handle to a [`User`].
///
/// Survives nick changes. Handles are never reused, so a handle to a
/// removed user simply stops resolving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserId(pub(crate) u64);

/// A peer on the network, or the client itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct User {
    pub nickname: String,
    pub username: Option<String>,
    pub host: Option<String>,
    pub realname: Option<String>,
    /// Server the user is connected to.
    pub server: Option<String>,
    pub operator: bool,
    pub away: bool,
    pub away_message: Option<String>,
    /// User modes; only tracked for the client itself.
    pub modes: BTreeSet<char>,
}

impl User {
    pub fn new(nickname: impl Into<String>) -> Self {
        User {
            nickname: nickname.into(),
            ..Default::default()
        }
    }

    /// `nick!user@host` with whatever parts are known.
    pub fn mask(&self) -> String {
        let mut mask = self.nickname.clone();
        if let Some(user) = &self.username {
            mask.push('!');
            mask.push_str(user);
        }
        if let Some(host) = &self.host {
            mask.push('@');
            mask.push_str(host);
        }
        mask
    }

    /// Fill in username and host from a message prefix.
    pub fn update_from_prefix(&mut self, prefix: &Prefix) {
        if let Some(user) = prefix.user() {
            self.username = Some(user.to_owned());
        }
        if let Some(host) = prefix.host() {
            if prefix.nick().is_some() {
                self.host = Some(host.to_owned());
            }
        }
    }

    /// Apply user mode changes. `o` also drives [`operator`](Self::operator).
    pub fn apply_modes(&mut self, changes: &ModeChangeSet) {
        for change in changes.iter() {
            match change.action {
                ModeAction::Add => {
                    self.modes.insert(change.letter);
                }
                ModeAction::Remove => {
                    self.modes.remove(&change.letter);
                }
            }
            if change.letter == 'o' {
                self.operator = change.is_add();
            }
        }
    }

    /// Replace all user modes.
    pub fn set_modes(&mut self, changes: &ModeChangeSet) {
        self.modes.clear();
        self.operator = false;
        self.apply_modes(changes);
    }
}

/// Owner of every [`User`], indexed by folded nickname.
#[derive(Clone, Debug)]
pub(crate) struct PeerTable {
    next: u64,
    users: HashMap<UserId, User>,
    by_nick: HashMap<String, UserId>,
}

impl PeerTable {
    pub(crate) fn new() -> Self {
        PeerTable {
            next: 0,
            users: HashMap::new(),
            by_nick: HashMap::new(),
        }
    }

    pub(crate) fn get(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.get_mut(&id)
    }

    pub(crate) fn find(&self, nickname: &str, casemap: CaseMapping) -> Option<UserId> {
        self.by_nick.get(&casemap.fold(nickname)).copied()
    }

    /// Look up a user, creating it on first reference.
    pub(crate) fn ensure(&mut self, nickname: &str, casemap: CaseMapping) -> UserId {
        let key = casemap.fold(nickname);
        if let Some(id) = self.by_nick.get(&key) {
            return *id;
        }
        let id = UserId(self.next);
        self.next += 1;
        self.users.insert(id, User::new(nickname));
        self.by_nick.insert(key, id);
        id
    }

    /// Rename a user in place. If another user already holds the new
    /// nickname, that stale entry is dropped and its handle returned.
    pub(crate) fn rename(
        &mut self,
        id: UserId,
        nickname: &str,
        casemap: CaseMapping,
    ) -> Option<UserId> {
        let user = self.users.get_mut(&id)?;
        let old_key = casemap.fold(&user.nickname);
        let new_key = casemap.fold(nickname);
        user.nickname = nickname.to_owned();

        if old_key == new_key {
            return None;
        }
        self.by_nick.remove(&old_key);
        let evicted = self.by_nick.insert(new_key, id).filter(|other| *other != id);
        if let Some(other) = evicted {
            self.users.remove(&other);
        }
        evicted
    }

    pub(crate) fn remove(&mut self, id: UserId, casemap: CaseMapping) -> Option<User> {
        let user = self.users.remove(&id)?;
        let key = casemap.fold(&user.nickname);
        if self.by_nick.get(&key) == Some(&id) {
            self.by_nick.remove(&key);
        }
        Some(user)
    }

    /// Rebuild the nickname index under a new case mapping. Users whose
    /// nicknames now collide are merged into the first one seen; the
    /// others are dropped and returned.
    pub(crate) fn rekey(&mut self, casemap: CaseMapping) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self.users.keys().copied().collect();
        ids.sort_unstable();
        self.by_nick.clear();
        let mut dropped = Vec::new();
        for id in ids {
            let Some(user) = self.users.get(&id) else {
                continue;
            };
            let key = casemap.fold(&user.nickname);
            if self.by_nick.contains_key(&key) {
                dropped.push(id);
            } else {
                self.by_nick.insert(key, id);
            }
        }
        for id in &dropped {
            self.users.remove(id);
        }
        dropped
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (UserId, &User)> + '_ {
        self.users.iter().map(|(id, user)| (*id, user))
    }

    pub(crate) fn len(&self) -> usize {
        self.users.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::parse_user_modes;

    const MAP: CaseMapping = CaseMapping::Rfc1459;

    #[test]
    fn test_ensure_is_case_insensitive() {
        let mut table = PeerTable::new();
        let a = table.ensure("Alice", MAP);
        let b = table.ensure("ALICE", MAP);
        assert_eq!(a, b);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(a).map(|u| u.nickname.as_str()), Some("Alice"));

        let c = table.ensure("[bob]", MAP);
        assert_eq!(table.find("{BOB}", MAP), Some(c));
    }

    #[test]
    fn test_rename_keeps_handle() {
        let mut table = PeerTable::new();
        let id = table.ensure("alice", MAP);
        assert_eq!(table.rename(id, "Alicia", MAP), None);
        assert_eq!(table.find("alicia", MAP), Some(id));
        assert_eq!(table.find("alice", MAP), None);
        assert_eq!(table.get(id).map(|u| u.nickname.as_str()), Some("Alicia"));
    }

    #[test]
    fn test_rename_case_only() {
        let mut table = PeerTable::new();
        let id = table.ensure("alice", MAP);
        assert_eq!(table.rename(id, "ALICE", MAP), None);
        assert_eq!(table.find("alice", MAP), Some(id));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_rename_collision_evicts_stale() {
        let mut table = PeerTable::new();
        let alice = table.ensure("alice", MAP);
        let bob = table.ensure("bob", MAP);
        assert_eq!(table.rename(alice, "bob", MAP), Some(bob));
        assert_eq!(table.find("bob", MAP), Some(alice));
        assert!(table.get(bob).is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_and_stale_handle() {
        let mut table = PeerTable::new();
        let id = table.ensure("alice", MAP);
        assert!(table.remove(id, MAP).is_some());
        assert!(table.get(id).is_none());
        assert!(table.remove(id, MAP).is_none());
        let again = table.ensure("alice", MAP);
        assert_ne!(again, id);
    }

    #[test]
    fn test_rekey_merges_collisions() {
        let mut table = PeerTable::new();
        let a = table.ensure("a[", CaseMapping::Ascii);
        let b = table.ensure("a{", CaseMapping::Ascii);
        assert_ne!(a, b);
        let dropped = table.rekey(MAP);
        assert_eq!(dropped, vec![b]);
        assert_eq!(table.find("A{", MAP), Some(a));
    }

    #[test]
    fn test_user_modes() {
        let mut user = User::new("me");
        user.apply_modes(&parse_user_modes("+iwo"));
        assert!(user.operator);
        user.apply_modes(&parse_user_modes("-o"));
        assert!(!user.operator);
        assert_eq!(user.modes.iter().collect::<String>(), "iw");
        user.set_modes(&parse_user_modes("+x"));
        assert_eq!(user.modes.iter().collect::<String>(), "x");
    }

    #[test]
    fn test_update_from_prefix() {
        let mut user = User::new("alice");
        user.update_from_prefix(&Prefix::new_from_str("alice!al@example.org"));
        assert_eq!(user.mask(), "alice!al@example.org");
    }
}
