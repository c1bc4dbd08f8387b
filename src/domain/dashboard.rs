// Dashboard snapshot - the unit of load and save
use super::error::DecodeError;
use super::widget::WidgetRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub widgets: Vec<WidgetRecord>,
}

/// Acknowledgement returned by the dashboard service after a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReceipt {
    pub message: String,
}

impl DashboardSnapshot {
    pub fn new(widgets: Vec<WidgetRecord>) -> Self {
        Self { widgets }
    }

    /// Decode an untrusted payload into a typed snapshot.
    pub fn decode(payload: Value) -> Result<Self, DecodeError> {
        let snapshot: DashboardSnapshot = serde_json::from_value(payload)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Reject snapshots that would break the store's invariants.
    pub fn validate(&self) -> Result<(), DecodeError> {
        let mut seen = HashSet::new();
        for widget in &self.widgets {
            if !seen.insert(widget.id.as_str()) {
                return Err(DecodeError::DuplicateId(widget.id.clone()));
            }
            if widget.x < 0 || widget.y < 0 || widget.w <= 0 || widget.h <= 0 {
                return Err(DecodeError::InvalidGeometry {
                    id: widget.id.clone(),
                    x: widget.x,
                    y: widget.y,
                    w: widget.w,
                    h: widget.h,
                });
            }
        }
        Ok(())
    }
}
