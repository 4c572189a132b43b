//! Chords: unordered sets of [`VKey`]s that fire together.
//!
//! Used both for parsing human-readable bindings ("Win+Shift+J") and
//! for matching the live set of logically-depressed keys against the
//! hotkey table (§4.2.2).

use std::collections::BTreeSet;
use std::fmt;

use crate::vkey::VKey;

/// An unordered set of keys that must be concurrently depressed.
///
/// Backed by a `BTreeSet` rather than a `Vec` so two chords built from
/// tokens in different orders compare equal and hash identically —
/// required for the hotkey table lookup in §4.2.2.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Chord(BTreeSet<VKey>);

/// A chord string did not parse. Carries the offending token so the
/// daemon can fail fast with a diagnostic naming the entry (§7).
#[derive(Debug, Clone, PartialEq)]
pub struct ChordParseError {
    pub token: String,
}

impl fmt::Display for ChordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized key token {:?}", self.token)
    }
}

impl std::error::Error for ChordParseError {}

impl Chord {
    pub fn new(keys: impl IntoIterator<Item = VKey>) -> Self {
        Self(keys.into_iter().collect())
    }

    /// Parses `"Mod+Mod+Key"` (case-insensitive tokens, `+`-separated).
    pub fn parse(s: &str) -> Result<Self, ChordParseError> {
        let mut set = BTreeSet::new();
        for token in s.split('+') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let key = VKey::parse_token(token).ok_or_else(|| ChordParseError {
                token: token.to_string(),
            })?;
            set.insert(key);
        }
        Ok(Self(set))
    }

    pub fn contains(&self, key: VKey) -> bool {
        self.0.contains(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = VKey> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<VKey> for Chord {
    fn from_iter<T: IntoIterator<Item = VKey>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_order_independent() {
        let a = Chord::parse("Win+Shift+J").unwrap();
        let b = Chord::parse("shift+j+win").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn unknown_token_errors_with_offending_token() {
        let err = Chord::parse("Win+Frobnicate").unwrap_err();
        assert_eq!(err.token, "Frobnicate");
    }

    #[test]
    fn empty_segments_are_skipped() {
        let c = Chord::parse("Win++J").unwrap();
        assert_eq!(c.len(), 2);
    }
}
