// Application state for HTTP handlers
use crate::application::snapshot_service::SnapshotService;

#[derive(Clone)]
pub struct AppState {
    pub snapshot_service: SnapshotService,
}
