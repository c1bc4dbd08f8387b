// Grid layout projection handed to the grid renderer
use super::widget::WidgetRecord;
use serde::{Deserialize, Serialize};

/// Geometry of one grid cell, keyed by widget id under the grid's `i` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutItem {
    pub i: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl From<&WidgetRecord> for LayoutItem {
    fn from(widget: &WidgetRecord) -> Self {
        Self {
            i: widget.id.clone(),
            x: widget.x,
            y: widget.y,
            w: widget.w,
            h: widget.h,
        }
    }
}

/// One layout item per widget, in store order.
pub fn project(widgets: &[WidgetRecord]) -> Vec<LayoutItem> {
    widgets.iter().map(LayoutItem::from).collect()
}
