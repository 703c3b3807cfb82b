//! DamageMap - One contribution per attack type

use super::DamageInfo;
use std::collections::btree_map::{self, BTreeMap};

/// Damage contributions of a single attack, keyed by attack type name
///
/// Iteration follows key order so sums are reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DamageMap {
    entries: BTreeMap<String, DamageInfo>,
}

impl DamageMap {
    pub fn new() -> Self {
        DamageMap {
            entries: BTreeMap::new(),
        }
    }

    /// Insert a contribution under its attack type, returning the one it replaced
    pub fn insert(&mut self, info: DamageInfo) -> Option<DamageInfo> {
        self.entries.insert(info.attack_type().name.clone(), info)
    }

    pub fn get(&self, attack_type: &str) -> Option<&DamageInfo> {
        self.entries.get(attack_type)
    }

    pub fn get_mut(&mut self, attack_type: &str) -> Option<&mut DamageInfo> {
        self.entries.get_mut(attack_type)
    }

    pub fn remove(&mut self, attack_type: &str) -> Option<DamageInfo> {
        self.entries.remove(attack_type)
    }

    pub fn contains(&self, attack_type: &str) -> bool {
        self.entries.contains_key(attack_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Values<'_, String, DamageInfo> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> btree_map::ValuesMut<'_, String, DamageInfo> {
        self.entries.values_mut()
    }

    /// Sum of `total_damage` over every non-cancelled contribution
    pub fn total(&self) -> f64 {
        self.iter().map(DamageInfo::effective_damage).sum()
    }

    /// Display breakdown, e.g. `basic: 10, fire: 4 (cancelled)`
    pub fn breakdown(&self) -> String {
        self.entries
            .iter()
            .map(|(name, info)| {
                if info.is_cancelled() {
                    format!("{}: {:.0} (cancelled)", name, info.total_damage())
                } else {
                    format!("{}: {:.0}", name, info.total_damage())
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<'a> IntoIterator for &'a DamageMap {
    type Item = &'a DamageInfo;
    type IntoIter = btree_map::Values<'a, String, DamageInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
