//! Combat and ability timing constants - all tunable values in one place
//!
//! Durations are wall-clock milliseconds; timestamps are supplied by callers.

// Basic attack cycle
pub const ATTACK_COOLDOWN_MS: u64 = 600;
pub const ATTACK_SWING_MS: u64 = 250;
pub const CRIT_MULTIPLIER: f32 = 2.0;

// Tempo (kill-streak) meter
pub const TEMPO_WINDOW_MS: u64 = 7000;
pub const TEMPO_BONUS_PER_STEP: f32 = 0.1;

// Kill XP reward
pub const XP_PER_ENEMY_LEVEL: f32 = 0.2;

// Status effects
pub const SLOW_FLOOR: f32 = 0.1;
pub const RESPAWN_INVINCIBILITY_MS: u64 = 3000;

// Long Tone channel
pub const LONG_TONE_DURATION_MS: u64 = 4000;
pub const LONG_TONE_MS_PER_EMBOUCHURE: u64 = 500;
pub const LONG_TONE_COOLDOWN_MS: u64 = 12000;
