//! Configuration keys: the values of a family's key column(s) that
//! identify one benchmark configuration, e.g. `luindex` or
//! `(10, 100)` for (Size, Iterations).

use std::cmp::Ordering;
use std::fmt::Display;

use itertools::Itertools;
use kstring::KString;
use noisy_float::types::{n64, N64};
use smallvec::SmallVec;

/// One cell of a key. Cells that look like numbers order numerically
/// (so that warehouse counts 2, 4, 16 come out in that order); numbers
/// sort before text. A number is shown as it was written (`15.0`
/// stays `15.0`), but `15` and `15.0` are the same key.
#[derive(Debug, Clone)]
pub enum KeyCell {
    Number { value: N64, text: KString },
    Text(KString),
}

impl KeyCell {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        let value = match s.parse::<i64>() {
            Ok(i) => Some(i as f64),
            Err(_) => s.parse::<f64>().ok().filter(|x| x.is_finite()),
        };
        match value {
            Some(x) => KeyCell::Number {
                value: n64(x),
                text: KString::from_ref(s),
            },
            None => KeyCell::Text(KString::from_ref(s)),
        }
    }
}

impl PartialEq for KeyCell {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for KeyCell {}

impl PartialOrd for KeyCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KeyCell {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (KeyCell::Number { value: a, .. }, KeyCell::Number { value: b, .. }) => a.cmp(b),
            (KeyCell::Number { .. }, KeyCell::Text(_)) => Ordering::Less,
            (KeyCell::Text(_), KeyCell::Number { .. }) => Ordering::Greater,
            (KeyCell::Text(a), KeyCell::Text(b)) => a.cmp(b),
        }
    }
}

impl From<i64> for KeyCell {
    fn from(i: i64) -> Self {
        KeyCell::Number {
            value: n64(i as f64),
            text: KString::from_string(i.to_string()),
        }
    }
}

impl From<&str> for KeyCell {
    fn from(s: &str) -> Self {
        KeyCell::parse(s)
    }
}

impl Display for KeyCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyCell::Number { text, .. } | KeyCell::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConfigKey(pub SmallVec<[KeyCell; 2]>);

impl ConfigKey {
    pub fn cells(&self) -> &[KeyCell] {
        &self.0
    }
}

impl FromIterator<KeyCell> for ConfigKey {
    fn from_iter<T: IntoIterator<Item = KeyCell>>(iter: T) -> Self {
        ConfigKey(iter.into_iter().collect())
    }
}

impl Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "{single}"),
            cells => write!(f, "({})", cells.iter().join(", ")),
        }
    }
}
