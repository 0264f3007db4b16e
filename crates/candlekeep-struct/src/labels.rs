//! Immutable label sets for enumerations and bit flags.

use std::borrow::Cow;
use std::sync::Arc;

/// A shared, immutable table of `value → label` pairs.
///
/// For enumerations the key is the stored value; for flag sets the key is
/// the bit index. Label sets are cheap to clone and are built once per
/// engine context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels(Arc<[(i64, Cow<'static, str>)]>);

impl Labels {
    /// Labels keyed by their position in `names`.
    pub fn indexed(names: &[&'static str]) -> Self {
        Self(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| (i as i64, Cow::Borrowed(*name)))
                .collect(),
        )
    }

    /// Labels with explicit keys.
    pub fn sparse(entries: &[(i64, &'static str)]) -> Self {
        Self(
            entries
                .iter()
                .map(|(key, name)| (*key, Cow::Borrowed(*name)))
                .collect(),
        )
    }

    /// Labels from several tables; later tables override earlier keys.
    /// The result is ordered by key.
    pub fn layered(layers: &[&[(i64, &'static str)]]) -> Self {
        let mut entries: Vec<(i64, Cow<'static, str>)> = Vec::new();
        for layer in layers {
            for (key, name) in layer.iter() {
                match entries.iter_mut().find(|(k, _)| k == key) {
                    Some(entry) => entry.1 = Cow::Borrowed(*name),
                    None => entries.push((*key, Cow::Borrowed(*name))),
                }
            }
        }
        entries.sort_by_key(|(key, _)| *key);
        Self(entries.into())
    }

    /// Labels with owned names, e.g. read from an identifier table.
    pub fn owned(entries: Vec<(i64, String)>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(key, name)| (key, Cow::Owned(name)))
                .collect(),
        )
    }

    /// An empty label set.
    pub fn empty() -> Self {
        Self(Arc::from(Vec::new()))
    }

    /// Look up the label for a key.
    pub fn get(&self, key: i64) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, name)| name.as_ref())
    }

    /// Find the key for a label (case-insensitive).
    pub fn key_of(&self, label: &str) -> Option<i64> {
        self.0
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(label))
            .map(|(k, _)| *k)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, label)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.0.iter().map(|(k, name)| (*k, name.as_ref()))
    }

    /// Labels of all set bits in `bits`, in bit order.
    pub fn set_bits(&self, bits: u32) -> Vec<&str> {
        (0..32)
            .filter(|bit| bits & (1 << bit) != 0)
            .filter_map(|bit| self.get(bit))
            .collect()
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_lookup() {
        let labels = Labels::indexed(&["None", "Self", "Preset target"]);
        assert_eq!(labels.get(1), Some("Self"));
        assert_eq!(labels.get(3), None);
        assert_eq!(labels.key_of("preset target"), Some(2));
    }

    #[test]
    fn test_set_bits() {
        let labels = Labels::indexed(&["Spells", "Breath", "Death", "Wands", "Polymorph"]);
        assert_eq!(labels.set_bits(0b10101), vec!["Spells", "Death", "Polymorph"]);
    }

    #[test]
    fn test_layered_overrides() {
        let labels = Labels::layered(&[&[(2, "Two"), (0, "Zero")], &[(2, "Deux"), (1, "One")]]);
        assert_eq!(labels.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(labels.get(2), Some("Deux"));
    }
}
