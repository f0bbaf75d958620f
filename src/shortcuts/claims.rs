//! Claimed-combo bookkeeping for collision detection.
//!
//! Every combo of every registered shortcut is claimed here. A combo may be
//! held by several shortcuts at once after a collision; the most recent
//! holder is its owner for dispatch.

use std::collections::HashMap;

use super::types::{Combo, ComboSet, Slug};

/// An incoming combo that another shortcut already holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComboConflict {
    pub combo: Combo,
    /// Current owner of the combo.
    pub held_by: Slug,
}

#[derive(Clone, Debug, Default)]
pub struct ComboClaims {
    /// Combo -> holders, oldest first.
    holders: HashMap<Combo, Vec<Slug>>,
}

impl ComboClaims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combos of `combos` already held by a shortcut other than `incoming`.
    pub fn conflicts(&self, combos: &ComboSet, incoming: &Slug) -> Vec<ComboConflict> {
        let mut conflicts: Vec<ComboConflict> = Vec::new();
        for combo in combos {
            if conflicts.iter().any(|c| c.combo == *combo) {
                continue;
            }
            let other = self
                .holders
                .get(combo)
                .and_then(|holders| holders.iter().rev().find(|slug| *slug != incoming));
            if let Some(held_by) = other {
                conflicts.push(ComboConflict {
                    combo: combo.clone(),
                    held_by: held_by.clone(),
                });
            }
        }
        conflicts
    }

    /// Claim every combo for `slug`, making it the newest holder.
    pub fn claim(&mut self, combos: &ComboSet, slug: &Slug) {
        for combo in combos {
            let holders = self.holders.entry(combo.clone()).or_default();
            holders.retain(|holder| holder != slug);
            holders.push(slug.clone());
        }
    }

    /// Drop `slug` from every combo of `combos`; combos left without a
    /// holder are unclaimed.
    pub fn release(&mut self, combos: &ComboSet, slug: &Slug) {
        for combo in combos {
            if let Some(holders) = self.holders.get_mut(combo) {
                holders.retain(|holder| holder != slug);
                if holders.is_empty() {
                    self.holders.remove(combo);
                }
            }
        }
    }

    pub fn is_claimed(&self, combo: &Combo) -> bool {
        self.holders.contains_key(combo)
    }

    /// Newest holder of `combo`.
    pub fn owner(&self, combo: &Combo) -> Option<&Slug> {
        self.holders.get(combo).and_then(|holders| holders.last())
    }

    /// Every claimed combo with its owner.
    pub fn owners(&self) -> impl Iterator<Item = (&Combo, &Slug)> {
        self.holders
            .iter()
            .filter_map(|(combo, holders)| holders.last().map(|slug| (combo, slug)))
    }

    /// Number of distinct claimed combos.
    pub fn len(&self) -> usize {
        self.holders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }

    /// Canonical strings of all claimed combos, sorted.
    pub fn canonical_combos(&self) -> Vec<String> {
        let mut combos: Vec<String> = self.holders.keys().map(Combo::canonical).collect();
        combos.sort();
        combos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcuts::KeySpec;

    fn set(keys: impl Into<KeySpec>) -> ComboSet {
        ComboSet::normalize(&keys.into()).unwrap()
    }

    #[test]
    fn test_claim_and_release() {
        let mut claims = ComboClaims::new();
        let combos = set([["control", "s"], ["meta", "s"]]);
        let slug = combos.slug();

        claims.claim(&combos, &slug);
        assert_eq!(claims.len(), 2);
        assert_eq!(claims.canonical_combos(), vec!["control-s", "meta-s"]);

        claims.release(&combos, &slug);
        assert!(claims.is_empty());
    }

    #[test]
    fn test_own_combos_are_not_conflicts() {
        let mut claims = ComboClaims::new();
        let combos = set(["meta", "k"]);
        let slug = combos.slug();
        claims.claim(&combos, &slug);

        assert!(claims.conflicts(&combos, &slug).is_empty());
    }

    #[test]
    fn test_conflict_reports_current_owner() {
        let mut claims = ComboClaims::new();
        let first = set(["meta", "k"]);
        claims.claim(&first, &first.slug());

        let second = set([["k", "meta"], ["control", "k"]]);
        let conflicts = claims.conflicts(&second, &second.slug());
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].combo.canonical(), "k-meta");
        assert_eq!(conflicts[0].held_by, "k-meta");
    }

    #[test]
    fn test_newest_holder_owns_shared_combo() {
        let mut claims = ComboClaims::new();
        let first = set(["meta", "k"]);
        let second = set([["meta", "k"], ["control", "k"]]);
        claims.claim(&first, &first.slug());
        claims.claim(&second, &second.slug());

        let combo = Combo::new(["meta", "k"]).unwrap();
        assert_eq!(claims.owner(&combo), Some(&second.slug()));

        claims.release(&second, &second.slug());
        assert_eq!(claims.owner(&combo), Some(&first.slug()));
        assert_eq!(claims.len(), 1);
    }

    #[test]
    fn test_reclaim_does_not_duplicate_holders() {
        let mut claims = ComboClaims::new();
        let combos = set("k");
        let slug = combos.slug();
        claims.claim(&combos, &slug);
        claims.claim(&combos, &slug);
        claims.release(&combos, &slug);
        assert!(claims.is_empty());
    }
}
