//! SurrealDB storage implementations.

mod directory;
mod records;
pub mod rows;

pub use directory::SurrealUserDirectory;
pub use records::{SurrealOwnedRecord, SurrealRecordStore};
