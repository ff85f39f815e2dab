use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use jobhub::board::{BoardService, Employer, Job, MemoryCollection, User};
use metrics_exporter_prometheus::PrometheusHandle;

pub(crate) type MemoryBoard =
    BoardService<MemoryCollection<Job>, MemoryCollection<Employer>, MemoryCollection<User>>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Board service backed by empty process-local collections.
pub(crate) fn memory_board() -> Arc<MemoryBoard> {
    Arc::new(BoardService::new(
        Arc::new(MemoryCollection::new()),
        Arc::new(MemoryCollection::new()),
        Arc::new(MemoryCollection::new()),
    ))
}
