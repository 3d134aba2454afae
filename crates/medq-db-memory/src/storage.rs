use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use time::{Date, UtcOffset};
use tokio::sync::Mutex;

use medq_core::{
    CategoryId, Counter, CounterId, Patient, PatientId, Token, TokenId, local_day,
};
use medq_storage::{CounterStore, NewToken, PatientDirectory, StorageError, TokenStore};

/// In-memory queue storage backed by `DashMap`.
///
/// Cloning is cheap; all clones share the same underlying maps.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    tokens: Arc<DashMap<TokenId, Token>>,
    /// Reverse index enforcing the daily numbering uniqueness invariant.
    numbers: Arc<DashMap<(Date, u32), TokenId>>,
    counters: Arc<DashMap<CounterId, Counter>>,
    patients: Arc<DashMap<PatientId, Patient>>,
    /// Day-scoped sequences. Guarded by a single lock so a reservation is
    /// atomic; entries for past days are pruned on rollover.
    sequences: Arc<Mutex<HashMap<Date, u32>>>,
    /// Facility UTC offset used for day scoping.
    offset: UtcOffset,
}

impl InMemoryStore {
    /// Creates an empty store scoped to UTC days.
    pub fn new() -> Self {
        Self::with_offset(UtcOffset::UTC)
    }

    /// Creates an empty store whose calendar days roll over at the local
    /// midnight implied by `offset`.
    pub fn with_offset(offset: UtcOffset) -> Self {
        Self {
            tokens: Arc::new(DashMap::new()),
            numbers: Arc::new(DashMap::new()),
            counters: Arc::new(DashMap::new()),
            patients: Arc::new(DashMap::new()),
            sequences: Arc::new(Mutex::new(HashMap::new())),
            offset,
        }
    }

    /// The facility UTC offset this store scopes days with.
    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// Inserts or replaces a counter. Counter configuration is owned by
    /// admin tooling; this is the seam it writes through.
    pub fn put_counter(&self, counter: Counter) {
        self.counters.insert(counter.id, counter);
    }

    /// Inserts or replaces a patient record.
    pub fn put_patient(&self, patient: Patient) {
        self.patients.insert(patient.id, patient);
    }

    fn token_day(&self, token: &Token) -> Date {
        local_day(token.created_at, self.offset)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStore for InMemoryStore {
    async fn next_token_number(&self, day: Date) -> Result<u32, StorageError> {
        let mut sequences = self.sequences.lock().await;
        // Old days never receive new numbers, so drop their sequences.
        sequences.retain(|d, _| *d >= day);
        let seq = sequences.entry(day).or_insert(0);
        *seq += 1;
        Ok(*seq)
    }

    async fn create_token(&self, new_token: NewToken) -> Result<Token, StorageError> {
        let day = local_day(new_token.created_at, self.offset);
        let id = TokenId::new();
        match self.numbers.entry((day, new_token.number)) {
            Entry::Occupied(_) => Err(StorageError::conflict(format!(
                "duplicate token number {} for {day}",
                new_token.number
            ))),
            Entry::Vacant(vacant) => {
                vacant.insert(id);
                let token = new_token.into_token(id);
                self.tokens.insert(id, token.clone());
                Ok(token)
            }
        }
    }

    async fn get_token(&self, id: TokenId) -> Result<Option<Token>, StorageError> {
        Ok(self.tokens.get(&id).map(|entry| entry.clone()))
    }

    async fn update_token(&self, token: &Token) -> Result<Token, StorageError> {
        match self.tokens.entry(token.id) {
            Entry::Occupied(mut occupied) => {
                occupied.insert(token.clone());
                Ok(token.clone())
            }
            Entry::Vacant(_) => Err(StorageError::not_found("token", token.id)),
        }
    }

    async fn tokens_for_day(&self, day: Date) -> Result<Vec<Token>, StorageError> {
        Ok(self
            .tokens
            .iter()
            .filter(|entry| self.token_day(entry.value()) == day)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn counter_tokens_for_day(
        &self,
        counter_id: CounterId,
        day: Date,
    ) -> Result<Vec<Token>, StorageError> {
        Ok(self
            .tokens
            .iter()
            .filter(|entry| {
                entry.value().counter_id == counter_id && self.token_day(entry.value()) == day
            })
            .map(|entry| entry.value().clone())
            .collect())
    }
}

#[async_trait]
impl CounterStore for InMemoryStore {
    async fn list_active(&self, category_id: CategoryId) -> Result<Vec<Counter>, StorageError> {
        let mut counters: Vec<Counter> = self
            .counters
            .iter()
            .filter(|entry| {
                entry.value().category_id == category_id && entry.value().is_active()
            })
            .map(|entry| entry.value().clone())
            .collect();
        // Creation order is the routing tie-break order.
        counters.sort_by_key(|c| (c.created_at, c.id));
        Ok(counters)
    }

    async fn get_counter(&self, id: CounterId) -> Result<Option<Counter>, StorageError> {
        Ok(self.counters.get(&id).map(|entry| entry.clone()))
    }
}

#[async_trait]
impl PatientDirectory for InMemoryStore {
    async fn find_patient(&self, id: PatientId) -> Result<Option<Patient>, StorageError> {
        Ok(self.patients.get(&id).map(|entry| entry.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medq_core::{CounterStatus, Priority, TokenStatus};
    use time::macros::{date, datetime};

    fn sample_new_token(number: u32, counter_id: CounterId) -> NewToken {
        NewToken {
            number,
            patient_id: PatientId::new(),
            counter_id,
            priority: Priority::Normal,
            estimated_wait_minutes: 15,
            created_at: datetime!(2024-03-10 09:00:00 UTC),
        }
    }

    fn sample_counter(category_id: CategoryId, created_at: time::OffsetDateTime) -> Counter {
        Counter {
            id: CounterId::new(),
            name: "Counter".into(),
            category_id,
            department: None,
            assigned_staff: None,
            status: CounterStatus::Active,
            created_at,
        }
    }

    #[tokio::test]
    async fn test_sequence_starts_at_one_and_increments() {
        let store = InMemoryStore::new();
        let day = date!(2024 - 03 - 10);
        assert_eq!(store.next_token_number(day).await.unwrap(), 1);
        assert_eq!(store.next_token_number(day).await.unwrap(), 2);
        assert_eq!(store.next_token_number(day).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_sequence_resets_on_new_day() {
        let store = InMemoryStore::new();
        assert_eq!(
            store.next_token_number(date!(2024 - 03 - 10)).await.unwrap(),
            1
        );
        assert_eq!(
            store.next_token_number(date!(2024 - 03 - 11)).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_create_token_assigns_id_and_waiting_status() {
        let store = InMemoryStore::new();
        let counter_id = CounterId::new();
        let token = store
            .create_token(sample_new_token(1, counter_id))
            .await
            .unwrap();
        assert_eq!(token.status, TokenStatus::Waiting);

        let read = store.get_token(token.id).await.unwrap().unwrap();
        assert_eq!(read, token);
    }

    #[tokio::test]
    async fn test_duplicate_number_same_day_conflicts() {
        let store = InMemoryStore::new();
        let counter_id = CounterId::new();
        store
            .create_token(sample_new_token(1, counter_id))
            .await
            .unwrap();
        let err = store
            .create_token(sample_new_token(1, counter_id))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update_unknown_token_not_found() {
        let store = InMemoryStore::new();
        let token = sample_new_token(1, CounterId::new()).into_token(TokenId::new());
        let err = store.update_token(&token).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_day_scoping_excludes_other_days() {
        let store = InMemoryStore::new();
        let counter_id = CounterId::new();
        let mut yesterday = sample_new_token(1, counter_id);
        yesterday.created_at = datetime!(2024-03-09 09:00:00 UTC);
        store.create_token(yesterday).await.unwrap();
        store
            .create_token(sample_new_token(1, counter_id))
            .await
            .unwrap();

        let today = store.tokens_for_day(date!(2024 - 03 - 10)).await.unwrap();
        assert_eq!(today.len(), 1);
        let per_counter = store
            .counter_tokens_for_day(counter_id, date!(2024 - 03 - 10))
            .await
            .unwrap();
        assert_eq!(per_counter.len(), 1);
    }

    #[tokio::test]
    async fn test_day_scoping_respects_facility_offset() {
        // 23:30 UTC on Mar 10 belongs to Mar 11 at UTC+2.
        let store = InMemoryStore::with_offset(UtcOffset::from_hms(2, 0, 0).unwrap());
        let counter_id = CounterId::new();
        let mut late_evening = sample_new_token(1, counter_id);
        late_evening.created_at = datetime!(2024-03-10 23:30:00 UTC);
        store.create_token(late_evening).await.unwrap();

        assert!(
            store
                .tokens_for_day(date!(2024 - 03 - 10))
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(
            store
                .tokens_for_day(date!(2024 - 03 - 11))
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_list_active_filters_and_orders_by_creation() {
        let store = InMemoryStore::new();
        let category = CategoryId::new();
        let older = sample_counter(category, datetime!(2024-01-01 08:00:00 UTC));
        let newer = sample_counter(category, datetime!(2024-02-01 08:00:00 UTC));
        let mut inactive = sample_counter(category, datetime!(2024-01-15 08:00:00 UTC));
        inactive.status = CounterStatus::Inactive;
        let other_category = sample_counter(CategoryId::new(), datetime!(2024-01-02 08:00:00 UTC));

        // Insertion order deliberately scrambled.
        store.put_counter(newer.clone());
        store.put_counter(inactive);
        store.put_counter(other_category);
        store.put_counter(older.clone());

        let active = store.list_active(category).await.unwrap();
        assert_eq!(active, vec![older, newer]);
    }

    #[tokio::test]
    async fn test_find_patient() {
        let store = InMemoryStore::new();
        let patient = Patient {
            id: PatientId::new(),
            name: "Asha Rao".into(),
            phone: None,
            push_subscription: None,
        };
        store.put_patient(patient.clone());
        assert_eq!(store.find_patient(patient.id).await.unwrap(), Some(patient));
        assert_eq!(store.find_patient(PatientId::new()).await.unwrap(), None);
    }
}
