// Storage trait used by the dashboard service to persist snapshots
use crate::domain::dashboard::DashboardSnapshot;
use async_trait::async_trait;

#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    /// Read the persisted snapshot; `None` when nothing has been saved yet
    async fn read(&self) -> anyhow::Result<Option<DashboardSnapshot>>;

    /// Persist `snapshot`, replacing whatever was stored before
    async fn write(&self, snapshot: &DashboardSnapshot) -> anyhow::Result<()>;
}
