// Repository trait for the remote dashboard snapshot
use crate::domain::dashboard::{DashboardSnapshot, SaveReceipt};
use async_trait::async_trait;

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Fetch the stored snapshot, already decoded and validated
    async fn load_snapshot(&self) -> anyhow::Result<DashboardSnapshot>;

    /// Replace the stored snapshot with `snapshot`
    async fn save_snapshot(&self, snapshot: &DashboardSnapshot) -> anyhow::Result<SaveReceipt>;
}
