//! Reed tiers and derived combat stats
//!
//! Reeds are the equippable tier items. A tier modifies speed, crit chance,
//! and defense; base health and damage always come from the level curve and
//! are never scaled by equipment.

use serde::{Deserialize, Serialize};

use crate::progression::level_curve;

/// Unmodified movement/attack speed with no reed equipped
pub const BASE_SPEED: f32 = 5.0;

/// Basic attack damage as a fraction of the damage stat
pub const BASIC_ATTACK_RATIO: f32 = 0.5;

/// Health never drops below this when a stat swap shrinks max health
pub const MIN_HEALTH_AFTER_SWAP: f32 = 1.0;

/// Equippable reed tiers, ordered weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReedTier {
    Cane,
    Lacquered,
    Brass,
    Silver,
    Resonant,
}

/// Combat modifiers and durability rating for one tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierProfile {
    pub speed_multiplier: f32,
    pub crit_chance: f32,
    pub defense: f32,
    pub durability_secs: f32,
}

impl ReedTier {
    pub const ALL: [ReedTier; 5] = [
        ReedTier::Cane,
        ReedTier::Lacquered,
        ReedTier::Brass,
        ReedTier::Silver,
        ReedTier::Resonant,
    ];

    /// Numeric tier strength, 1-based
    pub fn value(self) -> u32 {
        match self {
            ReedTier::Cane => 1,
            ReedTier::Lacquered => 2,
            ReedTier::Brass => 3,
            ReedTier::Silver => 4,
            ReedTier::Resonant => 5,
        }
    }

    pub fn profile(self) -> TierProfile {
        match self {
            ReedTier::Cane => TierProfile {
                speed_multiplier: 1.00,
                crit_chance: 0.02,
                defense: 0.00,
                durability_secs: 90.0,
            },
            ReedTier::Lacquered => TierProfile {
                speed_multiplier: 1.05,
                crit_chance: 0.05,
                defense: 0.05,
                durability_secs: 120.0,
            },
            ReedTier::Brass => TierProfile {
                speed_multiplier: 1.10,
                crit_chance: 0.10,
                defense: 0.10,
                durability_secs: 150.0,
            },
            ReedTier::Silver => TierProfile {
                speed_multiplier: 1.20,
                crit_chance: 0.15,
                defense: 0.18,
                durability_secs: 180.0,
            },
            ReedTier::Resonant => TierProfile {
                speed_multiplier: 1.35,
                crit_chance: 0.22,
                defense: 0.25,
                durability_secs: 240.0,
            },
        }
    }

    /// Stable identifier used in recipes and save snapshots
    pub fn name(self) -> &'static str {
        match self {
            ReedTier::Cane => "cane",
            ReedTier::Lacquered => "lacquered",
            ReedTier::Brass => "brass",
            ReedTier::Silver => "silver",
            ReedTier::Resonant => "resonant",
        }
    }

    pub fn parse(s: &str) -> Option<ReedTier> {
        match s.to_lowercase().as_str() {
            "cane" => Some(ReedTier::Cane),
            "lacquered" => Some(ReedTier::Lacquered),
            "brass" => Some(ReedTier::Brass),
            "silver" => Some(ReedTier::Silver),
            "resonant" => Some(ReedTier::Resonant),
            _ => None,
        }
    }
}

/// Bonus XP granted when crafting produces this tier
pub fn crafting_bonus_xp(tier: ReedTier) -> f32 {
    (tier.value() * tier.value() * 10) as f32
}

/// Full derived stat block for a level and optional equipped tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedStats {
    pub max_health: f32,
    pub damage: f32,
    pub basic_attack_damage: f32,
    pub speed: f32,
    pub crit_chance: f32,
    pub defense: f32,
}

/// Derive the full stat block. Health and damage come from the level curve
/// only; the tier contributes speed, crit, and defense.
pub fn derived_stats(level: u32, tier: Option<ReedTier>) -> DerivedStats {
    let base = level_curve::base_stats_for_level(level);
    let damage = base.damage;
    match tier {
        None => DerivedStats {
            max_health: base.health,
            damage,
            basic_attack_damage: damage * BASIC_ATTACK_RATIO,
            speed: BASE_SPEED,
            crit_chance: 0.0,
            defense: 0.0,
        },
        Some(tier) => {
            let profile = tier.profile();
            DerivedStats {
                max_health: base.health,
                damage,
                basic_attack_damage: damage * BASIC_ATTACK_RATIO,
                speed: BASE_SPEED * profile.speed_multiplier,
                crit_chance: profile.crit_chance,
                defense: profile.defense,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_stats_have_no_tier_modifiers() {
        let stats = derived_stats(1, None);
        assert_eq!(stats.speed, BASE_SPEED);
        assert_eq!(stats.crit_chance, 0.0);
        assert_eq!(stats.defense, 0.0);
        assert!((stats.max_health - 10.0).abs() < 1e-6);
        assert!((stats.basic_attack_damage - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_tier_never_scales_health_or_damage() {
        let bare = derived_stats(25, None);
        let equipped = derived_stats(25, Some(ReedTier::Resonant));
        assert_eq!(bare.max_health, equipped.max_health);
        assert_eq!(bare.damage, equipped.damage);
        assert_eq!(bare.basic_attack_damage, equipped.basic_attack_damage);
    }

    #[test]
    fn test_tier_modifiers_applied() {
        let stats = derived_stats(10, Some(ReedTier::Silver));
        assert!((stats.speed - BASE_SPEED * 1.20).abs() < 1e-6);
        assert!((stats.crit_chance - 0.15).abs() < 1e-6);
        assert!((stats.defense - 0.18).abs() < 1e-6);
    }

    #[test]
    fn test_tiers_strictly_ordered() {
        for pair in ReedTier::ALL.windows(2) {
            assert!(pair[0].value() < pair[1].value());
            assert!(pair[0].profile().speed_multiplier <= pair[1].profile().speed_multiplier);
            assert!(pair[0].profile().crit_chance < pair[1].profile().crit_chance);
        }
    }

    #[test]
    fn test_crafting_bonus_xp() {
        assert_eq!(crafting_bonus_xp(ReedTier::Cane), 10.0);
        assert_eq!(crafting_bonus_xp(ReedTier::Brass), 90.0);
        assert_eq!(crafting_bonus_xp(ReedTier::Resonant), 250.0);
    }

    #[test]
    fn test_name_parse_round_trip() {
        for tier in ReedTier::ALL {
            assert_eq!(ReedTier::parse(tier.name()), Some(tier));
        }
        assert_eq!(ReedTier::parse("mithril"), None);
    }
}
