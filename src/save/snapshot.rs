//! The persisted snapshot shape
//!
//! One snapshot slot exists per save profile and is overwritten on each
//! save. Every field is optional so older saves keep loading as the shape
//! grows, and inventory keys are strings so unknown items from newer (or
//! retired) builds can be skipped instead of failing the decode. Derived
//! stats are deliberately absent: they are recomputed on load.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Result, Vec3};
use crate::equipment::ReedTier;
use crate::inventory::Material;
use crate::player::PlayerState;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSnapshot {
    pub level: Option<u32>,
    pub health: Option<f32>,
    pub xp: Option<f32>,
    pub echoes: Option<u64>,
    pub position: Option<Vec3>,
    pub inventory: Option<InventorySnapshot>,
    pub equipped_tier: Option<String>,
    pub reed_durability: Option<f32>,
    pub embouchure_level: Option<u32>,
    pub embouchure_xp: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventorySnapshot {
    pub materials: AHashMap<String, u64>,
    pub reeds: AHashMap<String, u64>,
    pub accessories: AHashMap<String, u64>,
}

impl PlayerSnapshot {
    /// Capture the full persistable state of a player
    pub fn capture(player: &PlayerState) -> Self {
        let stats = player.stats();

        let mut materials = AHashMap::new();
        for material in Material::ALL {
            // The currency lives in the scalar `echoes` field, not the map
            if material != Material::Echoes {
                materials.insert(
                    material.name().to_string(),
                    player.inventory().material_count(material),
                );
            }
        }
        let mut reeds = AHashMap::new();
        for tier in ReedTier::ALL {
            reeds.insert(tier.name().to_string(), player.inventory().reed_count(tier));
        }
        let accessories = player
            .inventory()
            .accessories()
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();

        Self {
            level: Some(stats.level),
            health: Some(stats.health),
            xp: Some(stats.xp),
            echoes: Some(player.inventory().echoes()),
            position: Some(stats.position),
            inventory: Some(InventorySnapshot {
                materials,
                reeds,
                accessories,
            }),
            equipped_tier: player.equipped().map(|t| t.name().to_string()),
            reed_durability: player.equipped().map(|_| player.reed_durability()),
            embouchure_level: Some(player.embouchure().level()),
            embouchure_xp: Some(player.embouchure().xp()),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}
