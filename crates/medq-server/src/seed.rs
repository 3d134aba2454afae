//! Boot-time seed data for the in-memory store.
//!
//! Counter/category/patient administration is external to the queue core;
//! for dev and demo runs the server materializes them from the `[seed]`
//! config tables instead. Generated ids are logged at info so API calls can
//! reference them.

use std::collections::HashMap;

use medq_core::{
    CategoryId, Counter, CounterId, CounterStatus, Patient, PatientId, PushSubscription, now_utc,
};
use medq_db_memory::InMemoryStore;

use crate::config::SeedConfig;

/// Applies the seed tables to `store`. Returns the category name → id map
/// so callers can cross-reference the generated ids.
pub fn apply(store: &InMemoryStore, seed: &SeedConfig) -> HashMap<String, CategoryId> {
    let mut categories: HashMap<String, CategoryId> = HashMap::new();
    for category in &seed.categories {
        let id = CategoryId::new();
        categories.insert(category.name.clone(), id);
        tracing::info!(category = %category.name, id = %id, "seeded category");
    }

    for counter in &seed.counters {
        // validate() guarantees the category reference resolves.
        let Some(&category_id) = categories.get(counter.category.as_str()) else {
            continue;
        };
        let seeded = Counter {
            id: CounterId::new(),
            name: counter.name.clone(),
            category_id,
            department: counter.department.clone(),
            assigned_staff: None,
            status: CounterStatus::Active,
            created_at: now_utc(),
        };
        tracing::info!(counter = %seeded.name, id = %seeded.id, "seeded counter");
        store.put_counter(seeded);
    }

    for patient in &seed.patients {
        let seeded = Patient {
            id: PatientId::new(),
            name: patient.name.clone(),
            phone: patient.phone.clone(),
            push_subscription: patient
                .push_endpoint
                .clone()
                .map(|endpoint| PushSubscription { endpoint }),
        };
        tracing::info!(patient = %seeded.name, id = %seeded.id, "seeded patient");
        store.put_patient(seeded);
    }

    categories
}
