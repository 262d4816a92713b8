pub mod embouchure;
pub mod level_curve;

pub use embouchure::{EmbouchureTrack, EMBOUCHURE_CAP};
pub use level_curve::{base_stats_for_level, enemy_hp_multiplier, xp_to_advance, BaseStats};
