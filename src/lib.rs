//! Cadenza - progression and combat core for a first-person action RPG
//!
//! Owns the player's derived stats, the leveling/XP curves, reed (equipment)
//! durability, the Tempo kill-streak meter, the crafting economy, and
//! save-snapshot reconciliation. Rendering, input, AI movement, and the
//! persistence transport are external collaborators that call into
//! [`player::PlayerState`] and read its state back out.

pub mod combat;
pub mod core;
pub mod equipment;
pub mod inventory;
pub mod player;
pub mod progression;
pub mod save;
