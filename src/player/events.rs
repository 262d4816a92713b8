//! Events emitted by the player aggregate
//!
//! Collaborators never get callbacks; they drain these after calling in.
//! The persistence layer keys its save triggers off them (kill, level-up,
//! pickup, craft, embouchure gain), the HUD reads the rest.

use crate::combat::TempoRating;
use crate::equipment::ReedTier;
use crate::inventory::Material;

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// Health crossed from above zero to zero. Emitted exactly once per death.
    Died,
    /// Player is back at the spawn point and play may resume
    Respawned,
    LeveledUp {
        level: u32,
    },
    EmbouchureAdvanced {
        level: u32,
    },
    KillRegistered {
        enemy_level: u32,
        xp: f32,
        streak: u32,
    },
    TempoRatingChanged {
        rating: TempoRating,
    },
    ReedEquipped {
        tier: ReedTier,
    },
    /// Durability ran out; one reed was consumed from the stack
    ReedBroke {
        tier: ReedTier,
    },
    Crafted {
        recipe_id: String,
    },
    EchoesCollected {
        amount: u64,
    },
    MaterialCollected {
        material: Material,
        qty: u64,
    },
    ReedCollected {
        tier: ReedTier,
        qty: u64,
    },
    LongToneStarted,
    LongToneComplete,
}
