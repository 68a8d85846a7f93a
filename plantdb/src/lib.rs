pub mod plant;
pub mod error;
pub mod validation;
pub mod codec;
pub mod store;
pub mod view;

pub use error::{PlantDbError, Result};
pub use plant::{Category, IdentityKey, Plant, Status};
pub use store::{AddOutcome, Store};
