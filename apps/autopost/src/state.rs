use std::sync::Arc;

use crate::publish::Publisher;
use crate::scheduler::Scheduler;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub publisher: Arc<dyn Publisher>,
    /// Owns the run lock; manual runs go through `Scheduler::run_now`.
    pub scheduler: Arc<Scheduler>,
}
