//! Damage and reward math
//!
//! Pure functions shared by the player aggregate and any combat collaborator
//! that needs the same arithmetic (damage preview in the HUD, AI threat
//! estimation).

use rand::Rng;

use crate::combat::constants::{CRIT_MULTIPLIER, XP_PER_ENEMY_LEVEL};

/// Outcome of an outgoing attack roll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackRoll {
    pub damage: f32,
    pub crit: bool,
}

/// Roll outgoing damage, doubling on a crit
pub fn roll_attack<R: Rng>(base_damage: f32, crit_chance: f32, rng: &mut R) -> AttackRoll {
    let crit = crit_chance > 0.0 && rng.gen::<f32>() < crit_chance.clamp(0.0, 1.0);
    let damage = if crit {
        base_damage * CRIT_MULTIPLIER
    } else {
        base_damage
    };
    AttackRoll { damage, crit }
}

/// Incoming damage after defense mitigation
pub fn mitigate(amount: f32, defense: f32) -> f32 {
    amount.max(0.0) * (1.0 - defense.clamp(0.0, 1.0))
}

/// XP reward for a kill, scaled by enemy level and the Tempo multiplier
pub fn kill_xp(enemy_level: u32, tempo_multiplier: f32) -> f32 {
    let enemy_level = enemy_level.max(1);
    (1.0 + (enemy_level - 1) as f32 * XP_PER_ENEMY_LEVEL) * tempo_multiplier
}
