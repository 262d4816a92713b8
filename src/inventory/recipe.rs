//! Crafting recipes - static configuration, not player state
//!
//! A recipe lists ingredient quantities and one output. Ingredients and
//! outputs are item identifiers routed by catalog (materials, reed tiers,
//! or the echoes balance). The default catalog is hardcoded and mirrored
//! in data/recipes.toml for tuning without a rebuild.

use serde::Deserialize;

use crate::core::error::{CadenzaError, Result};
use crate::equipment::ReedTier;
use crate::inventory::ledger::{Ingredient, Material};

/// A crafting recipe
#[derive(Debug, Clone)]
pub struct Recipe {
    /// Unique identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Ingredients consumed, in catalog order
    pub ingredients: Vec<(Ingredient, u64)>,
    /// Item credited on success
    pub output: Ingredient,
    pub output_qty: u64,
}

impl Recipe {
    /// The reed tier this recipe produces, if any
    pub fn output_tier(&self) -> Option<ReedTier> {
        match self.output {
            Ingredient::Reed(tier) => Some(tier),
            Ingredient::Material(_) => None,
        }
    }
}

/// Catalog of all available recipes
#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shipped recipe set: each reed tier is crafted from the tier
    /// below it (Cane from raw fiber), materials, and echoes.
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        catalog.add(Recipe {
            id: "cane_reed".into(),
            name: "Cut Cane Reed".into(),
            ingredients: vec![
                (Ingredient::Material(Material::CaneFiber), 2),
                (Ingredient::Material(Material::Echoes), 5),
            ],
            output: Ingredient::Reed(ReedTier::Cane),
            output_qty: 1,
        });

        catalog.add(Recipe {
            id: "lacquered_reed".into(),
            name: "Lacquer Reed".into(),
            ingredients: vec![
                (Ingredient::Reed(ReedTier::Cane), 1),
                (Ingredient::Material(Material::PearlRosin), 2),
                (Ingredient::Material(Material::Echoes), 10),
            ],
            output: Ingredient::Reed(ReedTier::Lacquered),
            output_qty: 1,
        });

        catalog.add(Recipe {
            id: "brass_reed".into(),
            name: "Fit Brass Reed".into(),
            ingredients: vec![
                (Ingredient::Reed(ReedTier::Lacquered), 1),
                (Ingredient::Material(Material::BrassFitting), 2),
                (Ingredient::Material(Material::Echoes), 20),
            ],
            output: Ingredient::Reed(ReedTier::Brass),
            output_qty: 1,
        });

        catalog.add(Recipe {
            id: "silver_reed".into(),
            name: "Plate Silver Reed".into(),
            ingredients: vec![
                (Ingredient::Reed(ReedTier::Brass), 1),
                (Ingredient::Material(Material::SilverLeaf), 2),
                (Ingredient::Material(Material::Echoes), 40),
            ],
            output: Ingredient::Reed(ReedTier::Silver),
            output_qty: 1,
        });

        catalog.add(Recipe {
            id: "resonant_reed".into(),
            name: "Tune Resonant Reed".into(),
            ingredients: vec![
                (Ingredient::Reed(ReedTier::Silver), 1),
                (Ingredient::Material(Material::ResonantShard), 3),
                (Ingredient::Material(Material::Echoes), 80),
            ],
            output: Ingredient::Reed(ReedTier::Resonant),
            output_qty: 1,
        });

        catalog
    }

    pub fn add(&mut self, recipe: Recipe) {
        self.recipes.push(recipe);
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn all(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Load a catalog from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a catalog from TOML text
    pub fn parse_toml(content: &str) -> Result<Self> {
        let toml_data: TomlRecipes =
            toml::from_str(content).map_err(|e| CadenzaError::RecipeParse(e.to_string()))?;

        let mut catalog = Self::new();
        for recipe in toml_data.recipes {
            catalog.add(recipe.into_recipe()?);
        }
        Ok(catalog)
    }
}

/// TOML representation of the recipes file
#[derive(Debug, Deserialize)]
struct TomlRecipes {
    recipes: Vec<TomlRecipe>,
}

/// TOML representation of a single recipe
#[derive(Debug, Deserialize)]
struct TomlRecipe {
    id: String,
    name: String,
    #[serde(default)]
    ingredients: Vec<TomlItemAmount>,
    output: String,
    #[serde(default = "default_output_qty")]
    output_qty: u64,
}

fn default_output_qty() -> u64 {
    1
}

/// TOML representation of an item quantity
#[derive(Debug, Deserialize)]
struct TomlItemAmount {
    item: String,
    amount: u64,
}

impl TomlRecipe {
    fn into_recipe(self) -> Result<Recipe> {
        let output = Ingredient::parse(&self.output)
            .ok_or_else(|| CadenzaError::UnknownItem(self.output.clone()))?;

        let ingredients = self
            .ingredients
            .into_iter()
            .map(|ia| match Ingredient::parse(&ia.item) {
                Some(ingredient) => Ok((ingredient, ia.amount)),
                None => Err(CadenzaError::UnknownItem(ia.item)),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Recipe {
            id: self.id,
            name: self.name,
            ingredients,
            output,
            output_qty: self.output_qty,
        })
    }
}
