pub mod events;
pub mod state;
pub mod stats;

pub use events::PlayerEvent;
pub use state::PlayerState;
pub use stats::PlayerStats;
