//! Storage abstraction layer for the MedQ queue service.
//!
//! The queue core never talks to a database directly; it goes through the
//! traits defined here. `medq-db-memory` is the reference backend.

pub mod error;
pub mod traits;
pub mod types;

pub use error::StorageError;
pub use traits::{CounterStore, PatientDirectory, TokenStore};
pub use types::NewToken;
