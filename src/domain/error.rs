// Domain errors raised while decoding wire payloads
use thiserror::Error;

/// Reasons a snapshot or a chart payload is rejected before it reaches the store.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload did not match the widget record shape.
    #[error("malformed dashboard snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// Two widgets in one snapshot share an id.
    #[error("duplicate widget id {0:?}")]
    DuplicateId(String),

    /// A widget sits at a negative coordinate or spans no cells.
    #[error("widget {id:?} has invalid geometry x={x} y={y} w={w} h={h}")]
    InvalidGeometry {
        id: String,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    },

    /// The chart payload has no `datasets[0]` series to style.
    #[error("chart payload has no datasets[0] series")]
    MissingSeries,

    /// `datasets[0]` exists but is not an object.
    #[error("chart payload series datasets[0] is not an object")]
    MalformedSeries,
}
