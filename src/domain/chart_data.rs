// Chart payload handling - styling fetched series and the built-in sample series
use super::error::DecodeError;
use chrono::{Days, NaiveDate};
use serde_json::{json, Value};

const SAMPLE_VALUES: [i64; 5] = [65, 59, 80, 81, 56];

/// Write the widget colours into the first series of a fetched payload.
///
/// The payload is otherwise kept verbatim. A payload without `datasets[0]`
/// is rejected so undecorated data never reaches the store.
pub fn decorate(
    mut payload: Value,
    background_color: &str,
    border_color: &str,
) -> Result<Value, DecodeError> {
    let series = payload
        .get_mut("datasets")
        .and_then(Value::as_array_mut)
        .and_then(|datasets| datasets.first_mut())
        .ok_or(DecodeError::MissingSeries)?;

    let series = series.as_object_mut().ok_or(DecodeError::MalformedSeries)?;
    series.insert("backgroundColor".to_string(), Value::from(background_color));
    series.insert("borderColor".to_string(), Value::from(border_color));

    Ok(payload)
}

/// Five daily points ending at `today`, newest label first.
pub fn sample_timeseries(today: NaiveDate) -> Value {
    let labels: Vec<String> = (0..SAMPLE_VALUES.len() as u64)
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|day| day.format("%Y-%m-%d").to_string())
        .collect();

    json!({
        "labels": labels,
        "datasets": [
            {
                "label": "Timeseries Data",
                "data": SAMPLE_VALUES,
            },
        ],
    })
}
