//! Core shortcut key types and their canonical forms.
//!
//! This module provides:
//! - `KeySpec` - the three accepted input shapes (single key, flat combo,
//!   list of alternative combos)
//! - `Combo` - a non-empty, sorted set of keys held together
//! - `ComboSet` - ordered, non-empty alternatives that trigger one shortcut
//! - `Slug` - the order-independent identity used as the registry key

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

use crate::error::ShortcutError;

/// Separator between keys of one combo in a slug.
pub const KEY_SEPARATOR: char = '-';
/// Separator between alternative combos in a slug.
pub const COMBO_SEPARATOR: char = '|';

/// Canonicalize a key name: trimmed, lower-cased, inner whitespace runs
/// collapsed to `-`.
///
/// A key made only of whitespace is the space bar (`" "` is what browsers
/// report for it) and canonicalizes to `space`. The empty string stays empty.
pub fn canonicalize_key(key: &str) -> String {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return if key.is_empty() {
            String::new()
        } else {
            "space".to_string()
        };
    }
    trimmed
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// A shortcut key specification as supplied by a caller.
///
/// Keys keep the caller's spelling and order; `ComboSet::normalize` produces
/// the canonical form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeySpec {
    /// A single key, e.g. `"?"`.
    Key(String),
    /// One combo, e.g. `["meta", "k"]`.
    Combo(Vec<String>),
    /// Alternative combos, e.g. `[["control", "s"], ["meta", "s"]]`.
    Alternatives(Vec<Vec<String>>),
}

impl KeySpec {
    /// Parse the textual form used in config files and on the command line.
    ///
    /// `+` joins the keys of one combo and `|` separates alternatives:
    /// `"meta+k | ctrl+k"`. Wherever a key is expected, a `+` or `|` names
    /// that key, so `"shift++"`, `"++shift"` and `"shift+|"` all parse.
    pub fn parse(text: &str) -> Result<Self, ShortcutError> {
        if text.trim().is_empty() {
            return Err(ShortcutError::InvalidKeySpec(
                "key specification is empty".to_string(),
            ));
        }

        let mut alternatives: Vec<Vec<String>> = vec![Vec::new()];
        let mut rest = text.trim_start();
        loop {
            let key = match rest.chars().next() {
                None => {
                    return Err(ShortcutError::InvalidKeySpec(format!(
                        "missing key at end of '{}'",
                        text.trim()
                    )))
                }
                Some(c @ ('+' | '|')) => {
                    rest = &rest[c.len_utf8()..];
                    c.to_string()
                }
                Some(_) => {
                    let end = rest
                        .find(|c: char| c == '+' || c == '|')
                        .unwrap_or(rest.len());
                    let key = rest[..end].trim().to_string();
                    rest = &rest[end..];
                    key
                }
            };
            if let Some(combo) = alternatives.last_mut() {
                combo.push(key);
            }

            rest = rest.trim_start();
            match rest.chars().next() {
                None => break,
                Some('+') => {}
                Some('|') => alternatives.push(Vec::new()),
                Some(c) => {
                    return Err(ShortcutError::InvalidKeySpec(format!(
                        "unexpected '{}' after a key in '{}'",
                        c,
                        text.trim()
                    )))
                }
            }
            rest = rest[1..].trim_start();
        }

        Ok(match alternatives.len() {
            1 => {
                let mut keys = alternatives.remove(0);
                if keys.len() == 1 {
                    Self::Key(keys.remove(0))
                } else {
                    Self::Combo(keys)
                }
            }
            _ => Self::Alternatives(alternatives),
        })
    }

    /// The combos of this spec in the caller's order, keys unsorted.
    pub fn raw_combos(&self) -> Vec<Vec<&str>> {
        match self {
            Self::Key(key) => vec![vec![key.as_str()]],
            Self::Combo(keys) if keys.is_empty() => Vec::new(),
            Self::Combo(keys) => vec![keys.iter().map(String::as_str).collect()],
            Self::Alternatives(combos) => combos
                .iter()
                .map(|combo| combo.iter().map(String::as_str).collect())
                .collect(),
        }
    }

    /// Slug of this spec, see [`ComboSet::slug`].
    pub fn slug(&self) -> Result<Slug, ShortcutError> {
        ComboSet::normalize(self).map(|combos| combos.slug())
    }
}

/// Text form accepted by [`KeySpec::parse`]. A blank key prints as `space`.
impl fmt::Display for KeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .raw_combos()
            .iter()
            .map(|combo| {
                combo
                    .iter()
                    .map(|key| {
                        if !key.is_empty() && key.trim().is_empty() {
                            "space"
                        } else {
                            *key
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("+")
            })
            .collect::<Vec<_>>()
            .join(" | ");
        f.write_str(&text)
    }
}

impl From<&str> for KeySpec {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for KeySpec {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<Vec<String>> for KeySpec {
    fn from(keys: Vec<String>) -> Self {
        Self::Combo(keys)
    }
}

impl From<Vec<&str>> for KeySpec {
    fn from(keys: Vec<&str>) -> Self {
        Self::Combo(keys.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for KeySpec {
    fn from(keys: [&str; N]) -> Self {
        Self::Combo(keys.iter().map(|key| key.to_string()).collect())
    }
}

impl From<Vec<Vec<String>>> for KeySpec {
    fn from(combos: Vec<Vec<String>>) -> Self {
        Self::Alternatives(combos)
    }
}

impl From<Vec<Vec<&str>>> for KeySpec {
    fn from(combos: Vec<Vec<&str>>) -> Self {
        Self::Alternatives(
            combos
                .into_iter()
                .map(|combo| combo.into_iter().map(str::to_string).collect())
                .collect(),
        )
    }
}

impl<const N: usize, const M: usize> From<[[&str; M]; N]> for KeySpec {
    fn from(combos: [[&str; M]; N]) -> Self {
        Self::Alternatives(
            combos
                .iter()
                .map(|combo| combo.iter().map(|key| key.to_string()).collect())
                .collect(),
        )
    }
}

impl From<&KeySpec> for KeySpec {
    fn from(spec: &KeySpec) -> Self {
        spec.clone()
    }
}

#[derive(Deserialize, Serialize)]
#[serde(untagged)]
enum RawKeySpec {
    Text(String),
    Combo(Vec<String>),
    Alternatives(Vec<Vec<String>>),
}

impl<'de> Deserialize<'de> for KeySpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawKeySpec::deserialize(deserializer)? {
            RawKeySpec::Text(text) => KeySpec::parse(&text).map_err(serde::de::Error::custom),
            RawKeySpec::Combo(keys) => Ok(KeySpec::Combo(keys)),
            RawKeySpec::Alternatives(combos) => Ok(KeySpec::Alternatives(combos)),
        }
    }
}

impl Serialize for KeySpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Key(key) => RawKeySpec::Text(key.clone()),
            Self::Combo(keys) => RawKeySpec::Combo(keys.clone()),
            Self::Alternatives(combos) => RawKeySpec::Alternatives(combos.clone()),
        }
        .serialize(serializer)
    }
}

/// Keys that must all be held at once. Never empty; keys are canonical and
/// sorted, so `{meta, k}` and `{k, meta}` are the same combo.
///
/// Repeated keys are kept.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Combo {
    keys: SmallVec<[String; 4]>,
}

impl Combo {
    /// Build a combo from key names. Blank names are dropped; returns `None`
    /// when nothing is left.
    pub fn new<I, S>(keys: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keys: SmallVec<[String; 4]> = keys
            .into_iter()
            .map(|key| canonicalize_key(key.as_ref()))
            .filter(|key| !key.is_empty())
            .collect();
        if keys.is_empty() {
            return None;
        }
        keys.sort();
        Some(Self { keys })
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        let key = canonicalize_key(key);
        self.keys.iter().any(|k| *k == key)
    }

    /// Whether any key of this combo is in `modifiers` (canonical names).
    pub fn has_modifier(&self, modifiers: &[String]) -> bool {
        self.keys.iter().any(|key| modifiers.contains(key))
    }

    /// Hyphen-joined canonical form, e.g. `k-meta`.
    pub fn canonical(&self) -> String {
        self.keys.join(&KEY_SEPARATOR.to_string())
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Ordered, non-empty alternatives. Order matters for display and for the
/// slug, never for matching.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComboSet {
    combos: Vec<Combo>,
}

impl ComboSet {
    /// Normalize any key specification into canonical alternatives.
    ///
    /// Empty combos are dropped; if none remain the spec is rejected with
    /// [`ShortcutError::EmptyKeySpec`].
    pub fn normalize(spec: &KeySpec) -> Result<Self, ShortcutError> {
        let combos: Vec<Combo> = spec
            .raw_combos()
            .into_iter()
            .filter_map(Combo::new)
            .collect();
        if combos.is_empty() {
            return Err(ShortcutError::EmptyKeySpec);
        }
        Ok(Self { combos })
    }

    pub fn combos(&self) -> &[Combo] {
        &self.combos
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Combo> {
        self.combos.iter()
    }

    pub fn len(&self) -> usize {
        self.combos.len()
    }

    /// Whether any key of any combo equals `key` (case-insensitive).
    pub fn mentions(&self, key: &str) -> bool {
        self.combos.iter().any(|combo| combo.contains(key))
    }

    /// Deterministic identity: each combo's canonical form, joined with `|`.
    pub fn slug(&self) -> Slug {
        let slug = self
            .combos
            .iter()
            .map(Combo::canonical)
            .collect::<Vec<_>>()
            .join(&COMBO_SEPARATOR.to_string());
        Slug(slug)
    }
}

impl<'a> IntoIterator for &'a ComboSet {
    type Item = &'a Combo;
    type IntoIter = std::slice::Iter<'a, Combo>;

    fn into_iter(self) -> Self::IntoIter {
        self.combos.iter()
    }
}

/// Registry lookup key derived from a [`ComboSet`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Slug {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Slug {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Slug {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Slug of any raw key specification.
pub fn slugify(keys: impl Into<KeySpec>) -> Result<Slug, ShortcutError> {
    keys.into().slug()
}
