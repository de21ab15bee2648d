//! Mode-change strings such as `+o-k alice key`.
//!
//! A MODE command carries one change string followed by the arguments its
//! parameterized letters consume. Which letters consume an argument is
//! decided by [`ServerSupport`](crate::isupport::ServerSupport).

mod parse;

pub use self::parse::{parse_modes, parse_user_modes};

/// Direction of a single mode change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModeAction {
    /// `+`
    Add,
    /// `-`
    Remove,
}

impl ModeAction {
    /// The sign character for this action.
    pub fn sign(self) -> char {
        match self {
            ModeAction::Add => '+',
            ModeAction::Remove => '-',
        }
    }
}

/// One letter being set or unset, with its argument when it consumed one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeChange {
    /// Set or unset.
    pub action: ModeAction,
    /// The mode letter.
    pub letter: char,
    /// Argument consumed by this letter.
    pub argument: Option<String>,
}

impl ModeChange {
    /// `+letter [argument]`
    pub fn add(letter: char, argument: Option<String>) -> Self {
        ModeChange {
            action: ModeAction::Add,
            letter,
            argument,
        }
    }

    /// `-letter [argument]`
    pub fn remove(letter: char, argument: Option<String>) -> Self {
        ModeChange {
            action: ModeAction::Remove,
            letter,
            argument,
        }
    }

    /// Whether this change sets the mode.
    #[inline]
    pub fn is_add(&self) -> bool {
        self.action == ModeAction::Add
    }
}

/// Ordered sequence of mode changes from one MODE command.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeChangeSet(pub Vec<ModeChange>);

impl ModeChangeSet {
    /// Iterate the changes in encounter order.
    pub fn iter(&self) -> std::slice::Iter<'_, ModeChange> {
        self.0.iter()
    }

    /// Number of changes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no changes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize back to a change string and its arguments.
    ///
    /// Letters are grouped by contiguous runs of the same action and the
    /// arguments follow in encounter order.
    pub fn to_mode_string(&self) -> (String, Vec<String>) {
        let mut out = String::new();
        let mut args = Vec::new();
        let mut current = None;

        for change in &self.0 {
            if current != Some(change.action) {
                out.push(change.action.sign());
                current = Some(change.action);
            }
            out.push(change.letter);
            if let Some(arg) = &change.argument {
                args.push(arg.clone());
            }
        }

        (out, args)
    }
}

impl From<Vec<ModeChange>> for ModeChangeSet {
    fn from(changes: Vec<ModeChange>) -> Self {
        ModeChangeSet(changes)
    }
}

impl IntoIterator for ModeChangeSet {
    type Item = ModeChange;
    type IntoIter = std::vec::IntoIter<ModeChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ModeChangeSet {
    type Item = &'a ModeChange;
    type IntoIter = std::slice::Iter<'a, ModeChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_contiguous_runs() {
        let set = ModeChangeSet(vec![
            ModeChange::add('o', Some("alice".into())),
            ModeChange::add('v', Some("bob".into())),
            ModeChange::remove('k', Some("key".into())),
            ModeChange::remove('m', None),
            ModeChange::add('t', None),
        ]);
        let (modes, args) = set.to_mode_string();
        assert_eq!(modes, "+ov-km+t");
        assert_eq!(args, vec!["alice", "bob", "key"]);
    }

    #[test]
    fn test_empty_set() {
        let (modes, args) = ModeChangeSet::default().to_mode_string();
        assert!(modes.is_empty());
        assert!(args.is_empty());
    }
}
