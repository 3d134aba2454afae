//! In-memory storage backend for the MedQ queue service.
//!
//! This backend provides:
//! - Lock-free concurrent reads/writes via `DashMap`
//! - An atomic day-scoped token-number sequence (resets at local midnight)
//! - Duplicate (day, number) detection surfaced as `StorageError::Conflict`
//!
//! It is the backend used by tests and the default server wiring. A
//! relational backend would satisfy the same traits with a database
//! sequence and unique constraint instead.

pub mod storage;

pub use storage::InMemoryStore;
