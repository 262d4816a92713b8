//! Tempo - the time-windowed kill-streak meter
//!
//! The window is anchored at the kill that opened the current streak: a
//! streak counts how many kills land inside one window. A kill after the
//! window closes opens a fresh streak of 1; a window that closes with no
//! further kill decays the meter back to zero on the next tick.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{TEMPO_BONUS_PER_STEP, TEMPO_WINDOW_MS};
use crate::core::Millis;

/// Letter rating derived from the current streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TempoRating {
    D,
    C,
    B,
    A,
    S,
    SS,
}

impl TempoRating {
    /// Rating thresholds; the top tier extends to any higher streak
    pub fn for_streak(streak: u32) -> TempoRating {
        match streak {
            0..=1 => TempoRating::D,
            2..=3 => TempoRating::C,
            4..=6 => TempoRating::B,
            7..=9 => TempoRating::A,
            10..=14 => TempoRating::S,
            _ => TempoRating::SS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TempoRating::D => "D",
            TempoRating::C => "C",
            TempoRating::B => "B",
            TempoRating::A => "A",
            TempoRating::S => "S",
            TempoRating::SS => "SS",
        }
    }
}

/// Kill-streak state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TempoMeter {
    streak: u32,
    /// Timestamp of the kill that opened the current window
    window_started_at: Option<Millis>,
}

impl TempoMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn rating(&self) -> TempoRating {
        TempoRating::for_streak(self.streak)
    }

    /// XP bonus multiplier for the current streak
    pub fn xp_multiplier(&self) -> f32 {
        1.0 + (self.streak / 2) as f32 * TEMPO_BONUS_PER_STEP
    }

    /// Record a kill at `now`. Returns the streak after the kill.
    pub fn register_kill(&mut self, now: Millis) -> u32 {
        match self.window_started_at {
            Some(start) if now.saturating_sub(start) <= TEMPO_WINDOW_MS => {
                self.streak += 1;
            }
            _ => {
                self.streak = 1;
                self.window_started_at = Some(now);
            }
        }
        self.streak
    }

    /// Decay check, driven by the game loop. Returns true if the meter
    /// decayed to zero on this call.
    pub fn tick(&mut self, now: Millis) -> bool {
        match self.window_started_at {
            Some(start) if now.saturating_sub(start) > TEMPO_WINDOW_MS => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.streak = 0;
        self.window_started_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streak_sequence_across_window() {
        let mut tempo = TempoMeter::new();
        assert_eq!(tempo.register_kill(0), 1);
        assert_eq!(tempo.register_kill(3_000), 2);
        // 8s is past the window that opened at t=0
        assert_eq!(tempo.register_kill(8_000), 1);
    }

    #[test]
    fn test_kill_on_window_edge_still_counts() {
        let mut tempo = TempoMeter::new();
        tempo.register_kill(0);
        assert_eq!(tempo.register_kill(TEMPO_WINDOW_MS), 2);
        assert_eq!(tempo.register_kill(TEMPO_WINDOW_MS + 1), 1);
    }

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(TempoRating::for_streak(0), TempoRating::D);
        assert_eq!(TempoRating::for_streak(1), TempoRating::D);
        assert_eq!(TempoRating::for_streak(2), TempoRating::C);
        assert_eq!(TempoRating::for_streak(4), TempoRating::B);
        assert_eq!(TempoRating::for_streak(7), TempoRating::A);
        assert_eq!(TempoRating::for_streak(10), TempoRating::S);
        assert_eq!(TempoRating::for_streak(15), TempoRating::SS);
        assert_eq!(TempoRating::for_streak(400), TempoRating::SS);
    }

    #[test]
    fn test_ratings_ordered() {
        assert!(TempoRating::D < TempoRating::C);
        assert!(TempoRating::C < TempoRating::B);
        assert!(TempoRating::B < TempoRating::A);
        assert!(TempoRating::A < TempoRating::S);
        assert!(TempoRating::S < TempoRating::SS);
    }

    #[test]
    fn test_xp_multiplier_steps_every_two_kills() {
        let mut tempo = TempoMeter::new();
        tempo.register_kill(0);
        assert!((tempo.xp_multiplier() - 1.0).abs() < 1e-6);
        tempo.register_kill(100);
        assert!((tempo.xp_multiplier() - 1.1).abs() < 1e-6);
        tempo.register_kill(200);
        assert!((tempo.xp_multiplier() - 1.1).abs() < 1e-6);
        tempo.register_kill(300);
        assert!((tempo.xp_multiplier() - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_tick_decays_after_window() {
        let mut tempo = TempoMeter::new();
        tempo.register_kill(1_000);
        assert!(!tempo.tick(1_000 + TEMPO_WINDOW_MS));
        assert_eq!(tempo.streak(), 1);

        assert!(tempo.tick(1_001 + TEMPO_WINDOW_MS));
        assert_eq!(tempo.streak(), 0);
        assert_eq!(tempo.rating(), TempoRating::D);
    }

    #[test]
    fn test_tick_on_empty_meter_is_noop() {
        let mut tempo = TempoMeter::new();
        assert!(!tempo.tick(999_999));
        assert_eq!(tempo.streak(), 0);
    }
}
