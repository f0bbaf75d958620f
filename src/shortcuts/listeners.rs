//! Live key listeners derived from registry state.
//!
//! After every mutation the registry recomputes the wanted listener set from
//! its claims and applies only the difference to the host's key source.

use std::collections::BTreeMap;

use super::claims::ComboClaims;
use super::types::{Combo, Slug};

/// Host hook for "these keys are down" subscriptions.
pub trait ComboSubscriber: Send {
    fn subscribe(&mut self, combo: &Combo);
    fn unsubscribe(&mut self, combo: &Combo);

    /// A combo that stays subscribed is now handled by `slug`. Hosts that
    /// route by combo alone can ignore this.
    fn rebind(&mut self, _combo: &Combo, _slug: &Slug) {}
}

/// Active listeners: combo -> shortcut that handles it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListenerSet {
    bindings: BTreeMap<Combo, Slug>,
}

/// Changes between two listener sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListenerDelta {
    pub subscribe: Vec<Combo>,
    pub unsubscribe: Vec<Combo>,
    /// Combos still listened to whose handler changed.
    pub rebind: Vec<(Combo, Slug)>,
}

impl ListenerDelta {
    pub fn is_empty(&self) -> bool {
        self.subscribe.is_empty() && self.unsubscribe.is_empty() && self.rebind.is_empty()
    }
}

impl ListenerSet {
    /// Listener set wanted for the given claims: one listener per claimed
    /// combo, bound to its owner.
    pub fn from_claims(claims: &ComboClaims) -> Self {
        Self {
            bindings: claims
                .owners()
                .map(|(combo, slug)| (combo.clone(), slug.clone()))
                .collect(),
        }
    }

    pub fn handler(&self, combo: &Combo) -> Option<&Slug> {
        self.bindings.get(combo)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn combos(&self) -> impl Iterator<Item = &Combo> {
        self.bindings.keys()
    }

    /// What must change to go from `self` to `next`.
    pub fn diff(&self, next: &ListenerSet) -> ListenerDelta {
        let mut delta = ListenerDelta::default();
        for (combo, slug) in &next.bindings {
            match self.bindings.get(combo) {
                None => delta.subscribe.push(combo.clone()),
                Some(current) if current != slug => {
                    delta.rebind.push((combo.clone(), slug.clone()))
                }
                Some(_) => {}
            }
        }
        delta.unsubscribe = self
            .bindings
            .keys()
            .filter(|combo| !next.bindings.contains_key(*combo))
            .cloned()
            .collect();
        delta
    }
}
