pub mod autosave;
pub mod reconcile;
pub mod snapshot;

pub use autosave::{SaveDispatcher, SaveStore};
pub use reconcile::{hydrate, reconcile};
pub use snapshot::{InventorySnapshot, PlayerSnapshot};
