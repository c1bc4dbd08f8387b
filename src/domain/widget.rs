// Widget domain model
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_TITLE: &str = "Sample Chart";
pub const DEFAULT_BACKGROUND_COLOR: &str = "rgba(75,192,192,0.4)";
pub const DEFAULT_BORDER_COLOR: &str = "rgba(75,192,192,1)";

/// Span of every newly created widget, in grid columns and rows.
pub const WIDGET_WIDTH: i32 = 4;
pub const WIDGET_HEIGHT: i32 = 4;

const WIDGETS_PER_ROW: usize = 3;
const ROW_STRIDE: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Bar,
    Pie,
}

/// One chart on the dashboard, as stored and as sent over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub title: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub data: Value,
    pub background_color: String,
    pub border_color: String,
    #[serde(default)]
    pub api_endpoint: String,
    /// Wire fields this model does not know about, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The user-editable part of a widget: everything except id, type and geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetContent {
    pub title: String,
    pub data: Value,
    pub background_color: String,
    pub border_color: String,
    pub api_endpoint: String,
}

impl WidgetRecord {
    pub fn new(
        id: String,
        chart_type: ChartType,
        (x, y): (i32, i32),
        content: WidgetContent,
    ) -> Self {
        Self {
            id,
            chart_type,
            title: content.title,
            x,
            y,
            w: WIDGET_WIDTH,
            h: WIDGET_HEIGHT,
            data: content.data,
            background_color: content.background_color,
            border_color: content.border_color,
            api_endpoint: content.api_endpoint,
            extra: Map::new(),
        }
    }

    /// Overwrite the editable fields, leaving id, type and geometry alone.
    pub fn apply_content(&mut self, content: WidgetContent) {
        self.title = content.title;
        self.data = content.data;
        self.background_color = content.background_color;
        self.border_color = content.border_color;
        self.api_endpoint = content.api_endpoint;
    }
}

/// Default placement for the widget appended after `count` existing ones:
/// three widgets per row, wrapping downwards.
pub fn default_position(count: usize) -> (i32, i32) {
    let column = (count % WIDGETS_PER_ROW) as i32;
    let row = (count / WIDGETS_PER_ROW) as i32;
    (column * WIDGET_WIDTH, row * ROW_STRIDE)
}
