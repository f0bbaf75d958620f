//! Shortcut registry keyed by slug.
//!
//! Uses Vec for deterministic listing order and HashMap for O(1) lookup.
//! Owns collision bookkeeping, the live listener set and the dispatch policy.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use super::claims::{ComboClaims, ComboConflict};
use super::diagnostics::{Diagnostic, DiagnosticSink, RegistryOp, TracingSink};
use super::focus::{FocusTarget, TypingGuard};
use super::listeners::{ComboSubscriber, ListenerSet};
use super::pressed::PressedKeys;
use super::symbols::{format_for_display, DisplaySegment};
use super::types::{canonicalize_key, Combo, ComboSet, KeySpec, Slug};
use crate::config::{RegistryConfig, ShortcutConfig};
use crate::error::{Result, ShortcutError};

/// Callback run when a shortcut fires. Called once per qualifying key event.
pub type ShortcutAction = Arc<dyn Fn() + Send + Sync>;

/// What a caller hands to [`ShortcutRegistry::add`].
#[derive(Clone)]
pub struct ShortcutSpec {
    pub keys: KeySpec,
    pub description: Option<String>,
    pub action: ShortcutAction,
    /// `None` registers the shortcut enabled.
    pub enabled: Option<bool>,
}

impl ShortcutSpec {
    pub fn new<F>(keys: impl Into<KeySpec>, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::from_action(keys, Arc::new(action))
    }

    pub fn from_action(keys: impl Into<KeySpec>, action: ShortcutAction) -> Self {
        Self {
            keys: keys.into(),
            description: None,
            action,
            enabled: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }
}

impl fmt::Debug for ShortcutSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutSpec")
            .field("keys", &self.keys)
            .field("description", &self.description)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// A registered shortcut. Owned by the registry; callers address it again
/// through its keys.
#[derive(Clone)]
pub struct Shortcut {
    slug: Slug,
    keys: KeySpec,
    combos: ComboSet,
    description: Option<String>,
    action: ShortcutAction,
    enabled: bool,
}

impl Shortcut {
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Keys as the caller supplied them.
    pub fn keys(&self) -> &KeySpec {
        &self.keys
    }

    pub fn combos(&self) -> &ComboSet {
        &self.combos
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Keycap segments for a legend, in the caller's key order.
    pub fn display_segments(&self) -> Vec<DisplaySegment> {
        format_for_display(&self.keys)
    }
}

impl fmt::Debug for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shortcut")
            .field("slug", &self.slug)
            .field("keys", &self.keys)
            .field("description", &self.description)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Result of a successful `add`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddReport {
    pub slug: Slug,
    /// Combos taken over from other shortcuts.
    pub collisions: Vec<ComboConflict>,
    /// An entry with the same slug was overwritten.
    pub replaced: bool,
}

/// Decision taken for one key event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    Fired(Slug),
    /// Matched a disabled shortcut.
    Disabled(Slug),
    /// Matched, but focus is in a text field and the combo has no modifier.
    SuppressedWhileTyping(Slug),
    NoMatch,
}

impl DispatchOutcome {
    pub fn fired(&self) -> bool {
        matches!(self, Self::Fired(_))
    }

    pub fn slug(&self) -> Option<&Slug> {
        match self {
            Self::Fired(slug) | Self::Disabled(slug) | Self::SuppressedWhileTyping(slug) => {
                Some(slug)
            }
            Self::NoMatch => None,
        }
    }
}

/// Central registry of keyboard shortcuts.
///
/// One instance per application (or per modal scope). The registry is idle
/// until the first successful `add`; from then on every mutation recomputes
/// the listener set and hands only the delta to the attached subscriber.
pub struct ShortcutRegistry {
    shortcuts: Vec<Shortcut>,
    slug_to_index: HashMap<Slug, usize>,
    claims: ComboClaims,
    listeners: Option<ListenerSet>,
    subscriber: Option<Box<dyn ComboSubscriber>>,
    guard: TypingGuard,
    ignored_filter_keys: Vec<String>,
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::from_config(&RegistryConfig::default())
    }

    /// Registry using the policy of `config`. Declared shortcuts are not
    /// registered; see [`ShortcutRegistry::register_all`].
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self {
            shortcuts: Vec::new(),
            slug_to_index: HashMap::new(),
            claims: ComboClaims::new(),
            listeners: None,
            subscriber: None,
            guard: TypingGuard::from_config(config),
            ignored_filter_keys: config
                .ignored_filter_keys
                .iter()
                .map(|key| canonicalize_key(key))
                .collect(),
            sink: Arc::new(TracingSink),
        }
    }

    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Attach the host's key source. If listeners are already live, the
    /// subscriber receives all of them at once.
    pub fn with_subscriber(mut self, subscriber: impl ComboSubscriber + 'static) -> Self {
        let mut subscriber: Box<dyn ComboSubscriber> = Box::new(subscriber);
        if let Some(listeners) = &self.listeners {
            for combo in listeners.combos() {
                subscriber.subscribe(combo);
            }
        }
        self.subscriber = Some(subscriber);
        self
    }

    /// Register or overwrite the shortcut at the slug of `spec.keys`.
    ///
    /// Collisions with other shortcuts are reported but do not block; the
    /// newest registrant handles a shared combo.
    pub fn add(&mut self, spec: ShortcutSpec) -> Result<AddReport> {
        let ShortcutSpec {
            keys,
            description,
            action,
            enabled,
        } = spec;

        let combos = match ComboSet::normalize(&keys) {
            Ok(combos) => combos,
            Err(e) => {
                self.report(Diagnostic::EmptyKeySpec { description });
                return Err(e);
            }
        };
        let slug = combos.slug();
        let collisions = self.collisions(&combos, &slug, description.as_deref());

        let shortcut = Shortcut {
            slug: slug.clone(),
            keys,
            combos,
            description,
            action,
            enabled: enabled.unwrap_or(true),
        };

        let (index, replaced) = match self.slug_to_index.get(&slug) {
            Some(&index) => {
                let previous = std::mem::replace(&mut self.shortcuts[index], shortcut);
                self.claims.release(&previous.combos, &slug);
                (index, true)
            }
            None => {
                let index = self.shortcuts.len();
                self.shortcuts.push(shortcut);
                self.slug_to_index.insert(slug.clone(), index);
                (index, false)
            }
        };
        self.claims.claim(&self.shortcuts[index].combos, &slug);

        debug!(
            event_type = "shortcut_registry",
            action = "add",
            slug = %slug,
            replaced,
            collisions = collisions.len(),
            "Shortcut added"
        );
        self.commit();

        Ok(AddReport {
            slug,
            collisions,
            replaced,
        })
    }

    /// Register every declared shortcut, building each action with
    /// `make_action`.
    pub fn register_all<I, F>(
        &mut self,
        shortcuts: I,
        mut make_action: F,
    ) -> Vec<Result<AddReport>>
    where
        I: IntoIterator<Item = ShortcutConfig>,
        F: FnMut(&ShortcutConfig) -> ShortcutAction,
    {
        shortcuts
            .into_iter()
            .map(|config| {
                let action = make_action(&config);
                self.add(config.into_spec(action))
            })
            .collect()
    }

    /// Remove the shortcut at the slug of `keys`, unclaiming all its combos.
    pub fn remove(&mut self, keys: impl Into<KeySpec>) -> Result<Shortcut> {
        let index = self.locate(RegistryOp::Remove, &keys.into())?;
        let removed = self.shortcuts.remove(index);
        self.slug_to_index.remove(&removed.slug);
        for (i, shortcut) in self.shortcuts.iter().enumerate().skip(index) {
            self.slug_to_index.insert(shortcut.slug.clone(), i);
        }
        self.claims.release(&removed.combos, &removed.slug);

        debug!(
            event_type = "shortcut_registry",
            action = "remove",
            slug = %removed.slug,
            "Shortcut removed"
        );
        self.commit();
        Ok(removed)
    }

    /// Flip the enabled flag of the shortcut at the slug of `keys`.
    /// Returns the new state. Listeners and claims are untouched.
    pub fn toggle(&mut self, keys: impl Into<KeySpec>) -> Result<bool> {
        let index = self.locate(RegistryOp::Toggle, &keys.into())?;
        let shortcut = &mut self.shortcuts[index];
        shortcut.enabled = !shortcut.enabled;

        debug!(
            event_type = "shortcut_registry",
            action = "toggle",
            slug = %shortcut.slug,
            enabled = shortcut.enabled,
            "Shortcut toggled"
        );
        Ok(shortcut.enabled)
    }

    /// All shortcuts in registration order. Pure read: never activates
    /// listeners.
    pub fn list(&self) -> &[Shortcut] {
        &self.shortcuts
    }

    pub fn get(&self, slug: &str) -> Option<&Shortcut> {
        self.slug_to_index
            .get(slug)
            .and_then(|&i| self.shortcuts.get(i))
    }

    /// Shortcut registered for `keys`, if any. Silent on a miss.
    pub fn lookup(&self, keys: impl Into<KeySpec>) -> Option<&Shortcut> {
        let slug = keys.into().slug().ok()?;
        self.get(slug.as_str())
    }

    pub fn contains(&self, keys: impl Into<KeySpec>) -> bool {
        self.lookup(keys).is_some()
    }

    /// Enabled state of the shortcut for `keys`; `None` when not registered.
    pub fn is_enabled(&self, keys: impl Into<KeySpec>) -> Option<bool> {
        self.lookup(keys).map(Shortcut::is_enabled)
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }

    /// Canonical form of every claimed combo, sorted.
    pub fn claimed_combos(&self) -> Vec<String> {
        self.claims.canonical_combos()
    }

    pub fn is_claimed(&self, combo: &Combo) -> bool {
        self.claims.is_claimed(combo)
    }

    /// Whether any listener work has happened yet.
    pub fn is_active(&self) -> bool {
        self.listeners.is_some()
    }

    pub fn listeners(&self) -> Option<&ListenerSet> {
        self.listeners.as_ref()
    }

    /// Report every combo of `keys` already claimed by another shortcut.
    /// Advisory only; returns whether anything collided.
    pub fn check_collision(&self, keys: impl Into<KeySpec>, description: Option<&str>) -> bool {
        match ComboSet::normalize(&keys.into()) {
            Ok(combos) => {
                let slug = combos.slug();
                !self.collisions(&combos, &slug, description).is_empty()
            }
            Err(_) => false,
        }
    }

    /// Run the shortcut listening on exactly `combo`, unless it is disabled
    /// or the typing guard applies.
    pub fn dispatch(&self, combo: &Combo, focus: &FocusTarget) -> DispatchOutcome {
        let Some(shortcut) = self
            .listeners
            .as_ref()
            .and_then(|listeners| listeners.handler(combo))
            .and_then(|slug| self.get(slug.as_str()))
        else {
            return DispatchOutcome::NoMatch;
        };
        let slug = shortcut.slug.clone();

        if !shortcut.enabled {
            debug!(slug = %slug, combo = %combo, "Shortcut matched but disabled");
            return DispatchOutcome::Disabled(slug);
        }
        if self.guard.suppresses(focus, combo) {
            debug!(
                slug = %slug,
                combo = %combo,
                focus = %focus,
                "Shortcut suppressed while typing"
            );
            return DispatchOutcome::SuppressedWhileTyping(slug);
        }

        info!(
            event_type = "shortcut_dispatch",
            slug = %slug,
            combo = %combo,
            "Shortcut fired"
        );
        (shortcut.action)();
        DispatchOutcome::Fired(slug)
    }

    /// Dispatch for the keys currently held.
    ///
    /// A live combo matches when all of its keys are held, so a layout that
    /// needs Shift for `?` still reaches the `?` shortcut. When several
    /// combos match, the one with the most keys wins.
    pub fn handle_key_down(&self, pressed: &PressedKeys, focus: &FocusTarget) -> DispatchOutcome {
        let best = self.listeners.as_ref().and_then(|listeners| {
            listeners
                .combos()
                .filter(|combo| combo.keys().iter().all(|key| pressed.has(key)))
                .max_by_key(|combo| combo.len())
        });
        match best {
            Some(combo) => self.dispatch(combo, focus),
            None => DispatchOutcome::NoMatch,
        }
    }

    /// Shortcuts relevant to the held keys, for a "what can I press" legend.
    ///
    /// Ignored keys (`?`, `/`, space, escape by default) are dropped first;
    /// if nothing is left every shortcut is returned. Otherwise a shortcut
    /// matches when any of its keys is held.
    pub fn filter_by_pressed_keys<S: AsRef<str>>(&self, pressed: &[S]) -> Vec<&Shortcut> {
        let pressed: Vec<String> = pressed
            .iter()
            .map(|key| canonicalize_key(key.as_ref()))
            .filter(|key| !key.is_empty() && !self.ignored_filter_keys.contains(key))
            .collect();

        if pressed.is_empty() {
            return self.shortcuts.iter().collect();
        }
        self.shortcuts
            .iter()
            .filter(|shortcut| pressed.iter().any(|key| shortcut.combos.mentions(key)))
            .collect()
    }

    pub fn filter_by_pressed(&self, pressed: &PressedKeys) -> Vec<&Shortcut> {
        self.filter_by_pressed_keys(pressed.keys())
    }

    fn locate(&self, op: RegistryOp, keys: &KeySpec) -> Result<usize> {
        let slug = keys
            .slug()
            .map(|slug| slug.as_str().to_string())
            .unwrap_or_default();
        match self.slug_to_index.get(slug.as_str()) {
            Some(&index) => Ok(index),
            None => {
                self.report(Diagnostic::UnknownSlug {
                    op,
                    slug: slug.clone(),
                });
                Err(ShortcutError::UnknownSlug { op, slug })
            }
        }
    }

    fn collisions(
        &self,
        combos: &ComboSet,
        slug: &Slug,
        description: Option<&str>,
    ) -> Vec<ComboConflict> {
        let conflicts = self.claims.conflicts(combos, slug);
        for conflict in &conflicts {
            self.report(Diagnostic::ComboCollision {
                combo: conflict.combo.clone(),
                held_by: conflict.held_by.clone(),
                description: description.map(str::to_string),
            });
        }
        conflicts
    }

    /// Recompute listeners from the claims and apply the delta.
    fn commit(&mut self) {
        let next = ListenerSet::from_claims(&self.claims);
        let previous = self.listeners.take().unwrap_or_default();
        let delta = previous.diff(&next);

        if let Some(subscriber) = self.subscriber.as_mut() {
            for combo in &delta.unsubscribe {
                subscriber.unsubscribe(combo);
            }
            for combo in &delta.subscribe {
                subscriber.subscribe(combo);
            }
            for (combo, slug) in &delta.rebind {
                subscriber.rebind(combo, slug);
            }
        }
        if !delta.is_empty() {
            debug!(
                subscribed = delta.subscribe.len(),
                unsubscribed = delta.unsubscribe.len(),
                rebound = delta.rebind.len(),
                active = next.len(),
                "Shortcut listeners synced"
            );
        }
        self.listeners = Some(next);
    }

    fn report(&self, diagnostic: Diagnostic) {
        self.sink.report(&diagnostic);
    }
}
