//! Player stat block and derived-stat recomputation

use serde::{Deserialize, Serialize};

use crate::core::Vec3;
use crate::equipment::{self, ReedTier, MIN_HEALTH_AFTER_SWAP};
use crate::progression::level_curve;

/// Mutable stat block, owned exclusively by the player aggregate.
///
/// `health`, `max_health`, `damage`, `basic_attack_damage`, `speed`,
/// `crit_chance`, `defense`, and `max_xp` are derived from (level, tier)
/// and rewritten wholesale by [`PlayerStats::recompute_derived`]; only
/// `level`, `health`, `xp`, and `position` carry state of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub level: u32,
    pub health: f32,
    pub max_health: f32,
    pub damage: f32,
    pub basic_attack_damage: f32,
    pub speed: f32,
    pub crit_chance: f32,
    pub defense: f32,
    pub xp: f32,
    pub max_xp: f32,
    pub position: Vec3,
}

impl PlayerStats {
    /// Fresh level-1 stat block at full health
    pub fn new_level_one() -> Self {
        let derived = equipment::derived_stats(1, None);
        Self {
            level: 1,
            health: derived.max_health,
            max_health: derived.max_health,
            damage: derived.damage,
            basic_attack_damage: derived.basic_attack_damage,
            speed: derived.speed,
            crit_chance: derived.crit_chance,
            defense: derived.defense,
            xp: 0.0,
            max_xp: level_curve::xp_to_advance(1),
            position: Vec3::default(),
        }
    }

    /// Rewrite every derived field from (level, tier), preserving the current
    /// health percentage. A living player never drops below 1 health from a
    /// stat swap; a dead one stays at zero.
    pub fn recompute_derived(&mut self, tier: Option<ReedTier>) {
        let pct = if self.max_health > 0.0 {
            (self.health / self.max_health).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let derived = equipment::derived_stats(self.level, tier);
        self.max_health = derived.max_health;
        self.damage = derived.damage;
        self.basic_attack_damage = derived.basic_attack_damage;
        self.speed = derived.speed;
        self.crit_chance = derived.crit_chance;
        self.defense = derived.defense;
        self.health = if pct <= 0.0 {
            0.0
        } else {
            (self.max_health * pct)
                .max(MIN_HEALTH_AFTER_SWAP)
                .min(self.max_health)
        };
        self.max_xp = level_curve::xp_to_advance(self.level);
    }

    pub fn full_heal(&mut self) {
        self.health = self.max_health;
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::new_level_one()
    }
}
