//! Individual ISUPPORT token values.

/// One `KEY[=VALUE]` token, or a `-KEY` negation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IsupportEntry<'a> {
    /// Token name, as sent.
    pub key: &'a str,
    /// Value after `=`, if any.
    pub value: Option<&'a str>,
    /// `-KEY`: the server withdrew a previously advertised token.
    pub negated: bool,
}

impl<'a> IsupportEntry<'a> {
    /// Parse a single token. Returns `None` for empty tokens.
    pub fn parse(token: &'a str) -> Option<Self> {
        if token.is_empty() {
            return None;
        }
        if let Some(key) = token.strip_prefix('-') {
            return (!key.is_empty()).then_some(IsupportEntry {
                key,
                value: None,
                negated: true,
            });
        }
        let (key, value) = match token.split_once('=') {
            Some((k, v)) => (k, Some(v)),
            None => (token, None),
        };
        if key.is_empty() {
            return None;
        }
        Some(IsupportEntry {
            key,
            value,
            negated: false,
        })
    }
}

/// Parse every token of an `RPL_ISUPPORT` parameter list.
pub fn parse_params<S: AsRef<str>>(params: &[S]) -> Vec<IsupportEntry<'_>> {
    params
        .iter()
        .filter_map(|p| IsupportEntry::parse(p.as_ref()))
        .collect()
}

/// `PREFIX=(modes)symbols`: status mode letters paired with their symbols,
/// highest rank first.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrefixSpec {
    /// Mode letters, e.g. `ov`.
    pub modes: String,
    /// Matching symbols, e.g. `@+`.
    pub symbols: String,
}

impl PrefixSpec {
    /// Parse a PREFIX value. An empty value means no status modes.
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() {
            return Some(PrefixSpec {
                modes: String::new(),
                symbols: String::new(),
            });
        }
        let rest = s.strip_prefix('(')?;
        let (modes, symbols) = rest.split_once(')')?;
        if modes.chars().count() != symbols.chars().count() {
            return None;
        }
        Some(PrefixSpec {
            modes: modes.to_owned(),
            symbols: symbols.to_owned(),
        })
    }

    /// Mode letter for a status symbol.
    pub fn mode_for_symbol(&self, symbol: char) -> Option<char> {
        let pos = self.symbols.chars().position(|c| c == symbol)?;
        self.modes.chars().nth(pos)
    }

    /// Status symbol for a mode letter.
    pub fn symbol_for_mode(&self, mode: char) -> Option<char> {
        let pos = self.modes.chars().position(|c| c == mode)?;
        self.symbols.chars().nth(pos)
    }

    /// Rank of a status mode letter; 0 is highest.
    pub fn rank(&self, mode: char) -> Option<usize> {
        self.modes.chars().position(|c| c == mode)
    }
}

impl Default for PrefixSpec {
    fn default() -> Self {
        PrefixSpec {
            modes: "ov".to_owned(),
            symbols: "@+".to_owned(),
        }
    }
}

/// `CHANMODES=A,B,C,D` channel mode classes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChanModes {
    /// Type A: list modes, always take a mask.
    pub list: String,
    /// Type B: always take a parameter.
    pub always: String,
    /// Type C: take a parameter only when being set.
    pub when_set: String,
    /// Type D: flags, never take a parameter.
    pub flags: String,
}

impl ChanModes {
    /// Parse a CHANMODES value. Classes past the fourth are ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split(',');
        let (a, b, c, d) = (parts.next()?, parts.next()?, parts.next()?, parts.next()?);
        Some(ChanModes {
            list: a.to_owned(),
            always: b.to_owned(),
            when_set: c.to_owned(),
            flags: d.to_owned(),
        })
    }
}

impl Default for ChanModes {
    fn default() -> Self {
        ChanModes {
            list: "b".to_owned(),
            always: "k".to_owned(),
            when_set: "l".to_owned(),
            flags: "imnpst".to_owned(),
        }
    }
}

/// `TARGMAX=CMD:n,...` per-command target limits. `None` means unlimited.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargMax {
    entries: Vec<(String, Option<usize>)>,
}

impl TargMax {
    /// Parse a TARGMAX value.
    pub fn parse(s: &str) -> Self {
        let entries = s
            .split(',')
            .filter(|part| !part.is_empty())
            .filter_map(|part| match part.split_once(':') {
                Some((cmd, num)) if !cmd.is_empty() => {
                    Some((cmd.to_ascii_uppercase(), num.parse::<usize>().ok()))
                }
                Some(_) => None,
                None => Some((part.to_ascii_uppercase(), None)),
            })
            .collect();
        TargMax { entries }
    }

    /// Limit for a command: `None` if not listed, `Some(None)` if unlimited.
    pub fn get(&self, cmd: &str) -> Option<Option<usize>> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(cmd))
            .map(|(_, v)| *v)
    }
}

/// `MAXLIST=modes:n,...` list mode limits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaxList {
    entries: Vec<(char, usize)>,
}

impl MaxList {
    /// Parse a MAXLIST value. Malformed parts are skipped.
    pub fn parse(s: &str) -> Self {
        let mut entries: Vec<(char, usize)> = Vec::new();
        for part in s.split(',').filter(|p| !p.is_empty()) {
            let Some((modes, limit)) = part.split_once(':') else {
                continue;
            };
            let Ok(limit) = limit.parse::<usize>() else {
                continue;
            };
            for ch in modes.chars() {
                entries.retain(|(c, _)| *c != ch);
                entries.push((ch, limit));
            }
        }
        MaxList { entries }
    }

    /// Limit for a list mode letter.
    pub fn limit_for(&self, mode: char) -> Option<usize> {
        self.entries.iter().find(|(c, _)| *c == mode).map(|(_, n)| *n)
    }
}
