use std::sync::Arc;

use medq_queue::QueueService;

/// Shared handler state: the queue service facade.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<QueueService>,
}

impl AppState {
    pub fn new(service: Arc<QueueService>) -> Self {
        Self { service }
    }
}
