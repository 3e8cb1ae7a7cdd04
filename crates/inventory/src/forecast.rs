use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of points in the short-horizon forecast series.
pub const FORECAST_HORIZON: usize = 7;

/// One day of the short-horizon demand forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_actual_is_omitted_on_the_wire() {
        let point = ForecastPoint {
            date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            predicted: 120,
            actual: None,
        };
        let v = serde_json::to_value(&point).unwrap();
        assert_eq!(v, serde_json::json!({ "date": "2026-10-19", "predicted": 120 }));
    }
}
