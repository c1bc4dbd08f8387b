// JSON file storage for the dashboard service
use crate::application::snapshot_storage::SnapshotStorage;
use crate::domain::dashboard::DashboardSnapshot;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    // Serializes writers so concurrent saves never interleave.
    write_lock: Mutex<()>,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStorage for JsonFileStorage {
    async fn read(&self) -> Result<Option<DashboardSnapshot>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        let payload: Value = serde_json::from_slice(&raw)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        let snapshot = DashboardSnapshot::decode(payload)
            .with_context(|| format!("Invalid dashboard state in {}", self.path.display()))?;

        Ok(Some(snapshot))
    }

    async fn write(&self, snapshot: &DashboardSnapshot) -> Result<()> {
        let bytes = serde_json::to_vec(snapshot).context("Failed to serialize dashboard state")?;

        let _guard = self.write_lock.lock().await;
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", staging.display()))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        Ok(())
    }
}
