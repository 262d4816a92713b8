//! Cancellable scheduled effects
//!
//! Every delayed gameplay write (swing end, slow reset, invincibility end,
//! channel end) is an entry keyed by effect kind. Scheduling a kind that is
//! already pending replaces it, so a re-triggered effect supersedes its
//! predecessor instead of racing it. Expiry is driven by the owner's tick.

use ahash::AHashMap;

use crate::core::Millis;

/// The delayed effects the player aggregate can have in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    SwingEnd,
    SlowReset,
    InvincibilityEnd,
    LongToneEnd,
}

/// Pending delayed effects, at most one per kind
#[derive(Debug, Clone, Default)]
pub struct EffectScheduler {
    pending: AHashMap<EffectKind, Millis>,
}

impl EffectScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire at `fires_at`, superseding any pending entry
    pub fn schedule(&mut self, kind: EffectKind, fires_at: Millis) {
        self.pending.insert(kind, fires_at);
    }

    /// Cancel a pending effect. Returns true if one was pending.
    pub fn cancel(&mut self, kind: EffectKind) -> bool {
        self.pending.remove(&kind).is_some()
    }

    /// Drop every pending effect (player reset/death/respawn)
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_scheduled(&self, kind: EffectKind) -> bool {
        self.pending.contains_key(&kind)
    }

    pub fn fires_at(&self, kind: EffectKind) -> Option<Millis> {
        self.pending.get(&kind).copied()
    }

    /// Remove and return every effect due at `now`, earliest first
    pub fn fire_due(&mut self, now: Millis) -> Vec<EffectKind> {
        let mut due: Vec<(EffectKind, Millis)> = self
            .pending
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(kind, at)| (*kind, *at))
            .collect();
        due.sort_by_key(|(_, at)| *at);
        for (kind, _) in &due {
            self.pending.remove(kind);
        }
        due.into_iter().map(|(kind, _)| kind).collect()
    }
}
