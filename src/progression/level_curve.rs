//! Level curve tables - base stats, XP requirements, enemy HP scaling
//!
//! All three lookups replay a band-table accumulation from level 1 up to the
//! requested level. None of them has a closed form; the tables below are the
//! balance reference for a 2000+ level range and must not drift. Accumulation
//! runs in f64 so the returned f32 is stable across the whole range.

/// Base health and damage before equipment is considered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseStats {
    pub health: f32,
    pub damage: f32,
}

/// Stats at level 1
const BASE_HEALTH: f64 = 10.0;
const BASE_DAMAGE: f64 = 1.0;

/// XP required to advance off level 1
const XP_BASE: f64 = 10.0;

struct StatBand {
    /// Highest level (inclusive) this band covers
    until: u32,
    health_per_level: f64,
    damage_per_level: f64,
}

/// Per-level stat increments. The last band extends to all higher levels.
const STAT_BANDS: [StatBand; 6] = [
    StatBand { until: 10, health_per_level: 5.0, damage_per_level: 1.0 },
    StatBand { until: 20, health_per_level: 8.0, damage_per_level: 1.5 },
    StatBand { until: 40, health_per_level: 12.0, damage_per_level: 2.0 },
    StatBand { until: 80, health_per_level: 20.0, damage_per_level: 3.0 },
    StatBand { until: 150, health_per_level: 30.0, damage_per_level: 4.0 },
    StatBand { until: u32::MAX, health_per_level: 45.0, damage_per_level: 6.0 },
];

/// Per-decade XP requirement increments (decade 1 = levels 1-10, and so on).
/// Decades past the end of the table reuse the last entry.
const XP_DECADE_INCREMENTS: [f64; 15] = [
    5.0, 8.0, 12.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0,
];

/// Milestone levels where the requirement is set absolutely instead of
/// accumulated. Accumulation continues from the override value.
const XP_OVERRIDES: [(u32, f64); 2] = [(50, 2500.0), (100, 9000.0)];

struct HpBand {
    until: u32,
    increment_per_level: f64,
}

/// Enemy HP multiplier growth per level. The last band extends indefinitely.
const ENEMY_HP_BANDS: [HpBand; 11] = [
    HpBand { until: 10, increment_per_level: 0.05 },
    HpBand { until: 25, increment_per_level: 0.08 },
    HpBand { until: 50, increment_per_level: 0.10 },
    HpBand { until: 100, increment_per_level: 0.15 },
    HpBand { until: 200, increment_per_level: 0.20 },
    HpBand { until: 400, increment_per_level: 0.25 },
    HpBand { until: 700, increment_per_level: 0.30 },
    HpBand { until: 1000, increment_per_level: 0.40 },
    HpBand { until: 1500, increment_per_level: 0.50 },
    HpBand { until: 2000, increment_per_level: 0.65 },
    HpBand { until: u32::MAX, increment_per_level: 0.80 },
];

fn stat_band_for(level: u32) -> &'static StatBand {
    STAT_BANDS
        .iter()
        .find(|band| level <= band.until)
        .unwrap_or(&STAT_BANDS[STAT_BANDS.len() - 1])
}

/// Base stats for a level, accumulated from level 1
pub fn base_stats_for_level(level: u32) -> BaseStats {
    let level = level.max(1);
    let mut health = BASE_HEALTH;
    let mut damage = BASE_DAMAGE;
    for l in 2..=level {
        let band = stat_band_for(l);
        health += band.health_per_level;
        damage += band.damage_per_level;
    }
    BaseStats {
        health: health as f32,
        damage: damage as f32,
    }
}

/// XP required to advance off the given level.
///
/// Replays the decade-increment sequence from level 1, applying the two
/// milestone overrides where they land. Always positive.
pub fn xp_to_advance(level: u32) -> f32 {
    let level = level.max(1);
    let mut required = XP_BASE;
    for l in 2..=level {
        let decade = ((l - 1) / 10) as usize;
        let idx = decade.min(XP_DECADE_INCREMENTS.len() - 1);
        required += XP_DECADE_INCREMENTS[idx];
        if let Some((_, value)) = XP_OVERRIDES.iter().find(|(at, _)| *at == l) {
            required = *value;
        }
    }
    required as f32
}

/// Enemy HP multiplier for an enemy level, starting at 1.0 for level 1
pub fn enemy_hp_multiplier(level: u32) -> f32 {
    let level = level.max(1);
    let mut multiplier = 1.0f64;
    for l in 2..=level {
        let band = ENEMY_HP_BANDS
            .iter()
            .find(|band| l <= band.until)
            .unwrap_or(&ENEMY_HP_BANDS[ENEMY_HP_BANDS.len() - 1]);
        multiplier += band.increment_per_level;
    }
    multiplier as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_level_one_base_stats() {
        let stats = base_stats_for_level(1);
        assert_close(stats.health, 10.0);
        assert_close(stats.damage, 1.0);
    }

    #[test]
    fn test_stat_band_edges() {
        assert_close(base_stats_for_level(10).health, 55.0);
        assert_close(base_stats_for_level(11).health, 63.0);
        assert_close(base_stats_for_level(20).health, 135.0);
        assert_close(base_stats_for_level(40).health, 375.0);
        assert_close(base_stats_for_level(80).health, 1175.0);
        assert_close(base_stats_for_level(150).health, 3275.0);

        assert_close(base_stats_for_level(10).damage, 10.0);
        assert_close(base_stats_for_level(20).damage, 25.0);
        assert_close(base_stats_for_level(40).damage, 65.0);
        assert_close(base_stats_for_level(80).damage, 185.0);
        assert_close(base_stats_for_level(150).damage, 465.0);
    }

    #[test]
    fn test_last_stat_band_extends() {
        // 50 levels past the table end at +45 health / +6 damage each
        assert_close(base_stats_for_level(200).health, 5525.0);
        assert_close(base_stats_for_level(200).damage, 765.0);
    }

    #[test]
    fn test_health_strictly_increasing() {
        let mut prev = base_stats_for_level(1).health;
        for level in 2..=300 {
            let next = base_stats_for_level(level).health;
            assert!(next > prev, "health not increasing at level {level}");
            prev = next;
        }
    }

    #[test]
    fn test_xp_accumulation_before_first_override() {
        assert_close(xp_to_advance(1), 10.0);
        assert_close(xp_to_advance(2), 15.0);
        assert_close(xp_to_advance(10), 55.0);
        assert_close(xp_to_advance(11), 63.0);
        assert_close(xp_to_advance(20), 135.0);
        assert_close(xp_to_advance(30), 255.0);
        assert_close(xp_to_advance(40), 405.0);
        assert_close(xp_to_advance(49), 585.0);
    }

    #[test]
    fn test_xp_milestone_overrides() {
        assert_close(xp_to_advance(50), 2500.0);
        assert_close(xp_to_advance(100), 9000.0);
        // Accumulation resumes from the override value
        assert_close(xp_to_advance(51), 2525.0);
        assert_close(xp_to_advance(60), 2750.0);
        assert_close(xp_to_advance(99), 4250.0);
        assert_close(xp_to_advance(101), 9060.0);
        assert_close(xp_to_advance(110), 9600.0);
    }

    #[test]
    fn test_xp_past_table_end() {
        assert_close(xp_to_advance(150), 13000.0);
        assert_close(xp_to_advance(300), 28000.0);
    }

    #[test]
    fn test_xp_always_positive() {
        for level in 1..=300 {
            assert!(xp_to_advance(level) > 0.0);
        }
    }

    #[test]
    fn test_enemy_hp_multiplier_band_edges() {
        assert_close(enemy_hp_multiplier(1), 1.0);
        assert_close(enemy_hp_multiplier(2), 1.05);
        assert_close(enemy_hp_multiplier(10), 1.45);
        assert_close(enemy_hp_multiplier(25), 2.65);
        assert_close(enemy_hp_multiplier(50), 5.15);
        assert_close(enemy_hp_multiplier(100), 12.65);
        assert_close(enemy_hp_multiplier(200), 32.65);
        assert_close(enemy_hp_multiplier(1000), 292.65);
        assert_close(enemy_hp_multiplier(2000), 867.65);
    }

    #[test]
    fn test_enemy_hp_multiplier_past_table_end() {
        assert_close(enemy_hp_multiplier(2100), 947.65);
    }

    #[test]
    fn test_zero_level_clamps_to_one() {
        assert_close(base_stats_for_level(0).health, 10.0);
        assert_close(xp_to_advance(0), 10.0);
        assert_close(enemy_hp_multiplier(0), 1.0);
    }
}
