pub mod ledger;
pub mod recipe;

pub use ledger::{Ingredient, InventoryLedger, Material};
pub use recipe::{Recipe, RecipeCatalog};
