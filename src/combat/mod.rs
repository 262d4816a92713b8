pub mod constants;
pub mod effects;
pub mod resolution;
pub mod tempo;

pub use effects::{EffectKind, EffectScheduler};
pub use resolution::{kill_xp, mitigate, roll_attack, AttackRoll};
pub use tempo::{TempoMeter, TempoRating};
