// Snapshot service - Server use cases for storing and serving dashboards
use crate::application::snapshot_storage::SnapshotStorage;
use crate::domain::dashboard::{DashboardSnapshot, SaveReceipt};
use std::sync::Arc;

pub const SAVED_MESSAGE: &str = "Dashboard state saved successfully";

#[derive(Clone)]
pub struct SnapshotService {
    storage: Arc<dyn SnapshotStorage>,
}

impl SnapshotService {
    pub fn new(storage: Arc<dyn SnapshotStorage>) -> Self {
        Self { storage }
    }

    pub async fn load(&self) -> anyhow::Result<Option<DashboardSnapshot>> {
        self.storage.read().await
    }

    pub async fn save(&self, snapshot: DashboardSnapshot) -> anyhow::Result<SaveReceipt> {
        self.storage.write(&snapshot).await?;
        tracing::info!("Saved dashboard with {} widgets", snapshot.widgets.len());
        Ok(SaveReceipt {
            message: SAVED_MESSAGE.to_string(),
        })
    }
}
