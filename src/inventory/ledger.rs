//! Player inventory - material stacks, reed stacks, and the echoes balance
//!
//! Quantities are unsigned and every removal is checked, so negative stock is
//! unrepresentable. Every key in the fixed catalogs is always present; an
//! absent key is a bug, not an empty stack. The echoes balance is a single
//! scalar; the material view of the currency reads through to it.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::equipment::ReedTier;
use crate::inventory::recipe::Recipe;

/// Fixed material catalog. `Echoes` is the currency's material-view alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Echoes,
    CaneFiber,
    PearlRosin,
    BrassFitting,
    SilverLeaf,
    ResonantShard,
}

impl Material {
    pub const ALL: [Material; 6] = [
        Material::Echoes,
        Material::CaneFiber,
        Material::PearlRosin,
        Material::BrassFitting,
        Material::SilverLeaf,
        Material::ResonantShard,
    ];

    /// Stable identifier used in recipes and save snapshots
    pub fn name(self) -> &'static str {
        match self {
            Material::Echoes => "echoes",
            Material::CaneFiber => "cane_fiber",
            Material::PearlRosin => "pearl_rosin",
            Material::BrassFitting => "brass_fitting",
            Material::SilverLeaf => "silver_leaf",
            Material::ResonantShard => "resonant_shard",
        }
    }

    pub fn parse(s: &str) -> Option<Material> {
        match s.to_lowercase().as_str() {
            "echoes" => Some(Material::Echoes),
            "cane_fiber" => Some(Material::CaneFiber),
            "pearl_rosin" => Some(Material::PearlRosin),
            "brass_fitting" => Some(Material::BrassFitting),
            "silver_leaf" => Some(Material::SilverLeaf),
            "resonant_shard" => Some(Material::ResonantShard),
            _ => None,
        }
    }
}

/// An item identifier as it appears in a recipe, routed to whichever
/// catalog owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingredient {
    Material(Material),
    Reed(ReedTier),
}

impl Ingredient {
    pub fn parse(s: &str) -> Option<Ingredient> {
        if let Some(material) = Material::parse(s) {
            return Some(Ingredient::Material(material));
        }
        ReedTier::parse(s).map(Ingredient::Reed)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ingredient::Material(m) => m.name(),
            Ingredient::Reed(t) => t.name(),
        }
    }
}

/// All owned stacks plus the currency balance
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryLedger {
    materials: AHashMap<Material, u64>,
    reeds: AHashMap<ReedTier, u64>,
    /// Reserved catalog; nothing ships in it yet
    accessories: AHashMap<String, u64>,
    echoes: u64,
}

impl Default for InventoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryLedger {
    /// Empty ledger with every catalog key present at zero
    pub fn new() -> Self {
        let mut materials = AHashMap::new();
        for material in Material::ALL {
            if material != Material::Echoes {
                materials.insert(material, 0);
            }
        }
        let mut reeds = AHashMap::new();
        for tier in ReedTier::ALL {
            reeds.insert(tier, 0);
        }
        Self {
            materials,
            reeds,
            accessories: AHashMap::new(),
            echoes: 0,
        }
    }

    // --- currency ---

    pub fn echoes(&self) -> u64 {
        self.echoes
    }

    pub fn add_echoes(&mut self, amount: u64) {
        self.echoes = self.echoes.saturating_add(amount);
    }

    /// Spend from the balance. Fails without mutation when short.
    pub fn spend_echoes(&mut self, amount: u64) -> bool {
        if self.echoes < amount {
            return false;
        }
        self.echoes -= amount;
        true
    }

    // --- materials ---

    /// Stack count; the currency alias reads the scalar balance
    pub fn material_count(&self, material: Material) -> u64 {
        match material {
            Material::Echoes => self.echoes,
            other => self.materials.get(&other).copied().unwrap_or(0),
        }
    }

    pub fn add_material(&mut self, material: Material, qty: u64) {
        match material {
            Material::Echoes => self.add_echoes(qty),
            other => {
                let entry = self.materials.entry(other).or_insert(0);
                *entry = entry.saturating_add(qty);
            }
        }
    }

    /// Remove from a stack. Fails (no mutation) when the stack is short.
    pub fn remove_material(&mut self, material: Material, qty: u64) -> bool {
        match material {
            Material::Echoes => self.spend_echoes(qty),
            other => {
                let entry = self.materials.entry(other).or_insert(0);
                if *entry < qty {
                    return false;
                }
                *entry -= qty;
                true
            }
        }
    }

    // --- reeds ---

    pub fn reed_count(&self, tier: ReedTier) -> u64 {
        self.reeds.get(&tier).copied().unwrap_or(0)
    }

    pub fn add_reed(&mut self, tier: ReedTier, qty: u64) {
        let entry = self.reeds.entry(tier).or_insert(0);
        *entry = entry.saturating_add(qty);
    }

    /// Remove reeds from a tier stack. Fails (no mutation) when short.
    pub fn remove_reed(&mut self, tier: ReedTier, qty: u64) -> bool {
        let entry = self.reeds.entry(tier).or_insert(0);
        if *entry < qty {
            return false;
        }
        *entry -= qty;
        true
    }

    pub fn accessories(&self) -> &AHashMap<String, u64> {
        &self.accessories
    }

    // --- crafting ---

    fn available(&self, ingredient: Ingredient) -> u64 {
        match ingredient {
            Ingredient::Material(m) => self.material_count(m),
            Ingredient::Reed(t) => self.reed_count(t),
        }
    }

    fn take(&mut self, ingredient: Ingredient, qty: u64) -> bool {
        match ingredient {
            Ingredient::Material(m) => self.remove_material(m, qty),
            Ingredient::Reed(t) => self.remove_reed(t, qty),
        }
    }

    fn credit(&mut self, ingredient: Ingredient, qty: u64) {
        match ingredient {
            Ingredient::Material(m) => self.add_material(m, qty),
            Ingredient::Reed(t) => self.add_reed(t, qty),
        }
    }

    /// Execute a recipe as one transaction: verify every ingredient, then
    /// deduct them all and credit the output. Any shortfall aborts before
    /// anything is touched.
    pub fn craft(&mut self, recipe: &Recipe) -> bool {
        let affordable = recipe
            .ingredients
            .iter()
            .all(|(ingredient, qty)| self.available(*ingredient) >= *qty);
        if !affordable {
            return false;
        }
        for (ingredient, qty) in &recipe.ingredients {
            let removed = self.take(*ingredient, *qty);
            debug_assert!(removed, "verified ingredient vanished mid-craft");
        }
        self.credit(recipe.output, recipe.output_qty);
        true
    }
}
