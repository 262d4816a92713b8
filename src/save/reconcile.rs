//! Merging a persisted snapshot into a live player
//!
//! Every optional field present in the snapshot overwrites its counterpart.
//! Derived stats in old saves are never trusted: whenever the snapshot
//! carries a level or an equipped tier, the whole derived block is recomputed
//! from the current tuning tables. Inventory deep-merges over the default
//! catalog so items introduced after the save was written start at zero and
//! items that no longer exist are dropped with a warning.

use crate::core::Vec3;
use crate::equipment::ReedTier;
use crate::inventory::{InventoryLedger, Material};
use crate::player::PlayerState;
use crate::progression::embouchure::EmbouchureTrack;
use crate::save::snapshot::PlayerSnapshot;

/// Build a player from a snapshot (continue-game path)
pub fn hydrate(snapshot: &PlayerSnapshot, spawn_point: Vec3, seed: u64) -> PlayerState {
    let mut player = PlayerState::new(spawn_point, seed);
    reconcile(&mut player, snapshot);
    player
}

/// Merge `snapshot` into `player`, re-deriving computed fields
pub fn reconcile(player: &mut PlayerState, snapshot: &PlayerSnapshot) {
    if let Some(level) = snapshot.level {
        player.stats.level = level.max(1);
    }

    let mut tier_present = false;
    if let Some(name) = &snapshot.equipped_tier {
        match ReedTier::parse(name) {
            Some(tier) => {
                player.equipped = Some(tier);
                tier_present = true;
            }
            None => {
                tracing::warn!(tier = %name, "dropping unknown equipped tier from save");
                player.equipped = None;
            }
        }
    }

    if snapshot.level.is_some() || tier_present {
        player.stats.recompute_derived(player.equipped);
    }

    if let Some(tier) = player.equipped.filter(|_| tier_present) {
        let full = tier.profile().durability_secs;
        player.reed_durability = snapshot
            .reed_durability
            .unwrap_or(full)
            .clamp(0.0, full);
    }

    if let Some(health) = snapshot.health {
        player.stats.health = health.clamp(0.0, player.stats.max_health);
        player.dead = player.stats.health == 0.0;
    }

    if let Some(xp) = snapshot.xp {
        player.stats.xp = xp.max(0.0);
        // A pool that overflows the current table (older tuning) resolves
        // through the normal level-up cascade
        if player.stats.xp >= player.stats.max_xp {
            player.add_xp(0.0);
        }
    }

    let prior_echoes = player.inventory.echoes();
    if let Some(inv) = &snapshot.inventory {
        let mut ledger = InventoryLedger::new();
        for (key, qty) in &inv.materials {
            match Material::parse(key) {
                // The scalar balance is authoritative; an old save's
                // currency mirror in the materials map is ignored
                Some(Material::Echoes) => {}
                Some(material) => ledger.add_material(material, *qty),
                None => tracing::warn!(item = %key, "dropping unknown material from save"),
            }
        }
        for (key, qty) in &inv.reeds {
            match ReedTier::parse(key) {
                Some(tier) => ledger.add_reed(tier, *qty),
                None => tracing::warn!(item = %key, "dropping unknown reed tier from save"),
            }
        }
        player.inventory = ledger;
        player.inventory.add_echoes(prior_echoes);
    }
    if let Some(echoes) = snapshot.echoes {
        let current = player.inventory.echoes();
        let _ = player.inventory.spend_echoes(current);
        player.inventory.add_echoes(echoes);
    }

    if let Some(position) = snapshot.position {
        player.stats.position = position;
    }

    if snapshot.embouchure_level.is_some() || snapshot.embouchure_xp.is_some() {
        let level = snapshot
            .embouchure_level
            .unwrap_or_else(|| player.embouchure.level());
        let xp = snapshot.embouchure_xp.unwrap_or_else(|| player.embouchure.xp());
        player.embouchure = EmbouchureTrack::restore(level, xp);
    }
}
