pub mod error;
pub mod types;

pub use error::{CadenzaError, Result};
pub use types::{Millis, Vec3};
