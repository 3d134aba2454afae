//! Storage traits for the queue storage abstraction layer.
//!
//! This module defines the contracts that all storage backends must
//! implement. Implementations must be thread-safe (`Send + Sync`).

use async_trait::async_trait;
use medq_core::{CategoryId, Counter, CounterId, Patient, PatientId, Token, TokenId};
use time::Date;

use crate::error::StorageError;
use crate::types::NewToken;

/// Persistence contract for queue tokens.
///
/// The "count rows then add one" numbering scheme is deliberately absent:
/// backends expose an atomic day-scoped sequence instead, so concurrent
/// arrivals can never collide on a token number.
///
/// # Example
///
/// ```ignore
/// use medq_storage::{TokenStore, StorageError};
///
/// async fn must_get(store: &dyn TokenStore, id: TokenId) -> Result<Token, StorageError> {
///     store
///         .get_token(id)
///         .await?
///         .ok_or_else(|| StorageError::not_found("token", id))
/// }
/// ```
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Reserves and returns the next token number for `day`.
    ///
    /// Numbers start at 1 each day and are contiguous and strictly
    /// increasing across the whole facility. The reservation is atomic:
    /// two concurrent calls never observe the same number.
    async fn next_token_number(&self, day: Date) -> Result<u32, StorageError>;

    /// Persists a new token in the Waiting state and assigns its id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if a token with the same
    /// (day, number) pair already exists. Callers retry with a fresh number.
    async fn create_token(&self, new_token: NewToken) -> Result<Token, StorageError>;

    /// Reads a token by id. Returns `None` if it does not exist.
    async fn get_token(&self, id: TokenId) -> Result<Option<Token>, StorageError>;

    /// Replaces the stored row for `token.id` with `token`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the token does not exist.
    async fn update_token(&self, token: &Token) -> Result<Token, StorageError>;

    /// All tokens created on `day`, across every counter.
    async fn tokens_for_day(&self, day: Date) -> Result<Vec<Token>, StorageError>;

    /// All tokens created on `day` assigned to `counter_id`.
    async fn counter_tokens_for_day(
        &self,
        counter_id: CounterId,
        day: Date,
    ) -> Result<Vec<Token>, StorageError>;
}

/// Read access to the counter/category configuration.
///
/// Counters are configured by admin tooling outside the queue core; the
/// router only ever reads them.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Active counters of `category_id`, in creation order.
    ///
    /// Creation order is the stable tie-break order for routing, so
    /// implementations must not reorder.
    async fn list_active(&self, category_id: CategoryId) -> Result<Vec<Counter>, StorageError>;

    /// Reads a counter by id. Returns `None` if it does not exist.
    async fn get_counter(&self, id: CounterId) -> Result<Option<Counter>, StorageError>;
}

/// Read access to the external patient directory.
#[async_trait]
pub trait PatientDirectory: Send + Sync {
    /// Resolves a patient by id. Returns `None` if unknown.
    async fn find_patient(&self, id: PatientId) -> Result<Option<Patient>, StorageError>;
}
