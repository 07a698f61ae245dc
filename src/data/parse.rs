//! Extraction of observations from INSEE series payloads.
//!
//! The payload nests `series[] -> observations[]`; only the first series is
//! read. Any structural mismatch yields an empty sequence, never an error.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::Observation;

#[derive(Debug, Deserialize)]
struct SeriesResponse {
    #[serde(default)]
    series: Vec<RawSeries>,
}

#[derive(Debug, Deserialize)]
struct RawSeries {
    #[serde(default)]
    observations: Vec<RawObservation>,
}

/// Each key variant is its own field so a payload carrying several of them
/// does not trip serde's duplicate-field check.
#[derive(Debug, Deserialize)]
struct RawObservation {
    periode: Option<String>,
    period: Option<String>,
    #[serde(rename = "TIME_PERIOD")]
    time_period: Option<String>,
    value: Option<RawValue>,
    #[serde(rename = "OBS_VALUE")]
    obs_value: Option<RawValue>,
}

impl RawObservation {
    /// `periode`, then `period`, then `TIME_PERIOD`.
    fn period_label(&self) -> Option<&str> {
        [&self.periode, &self.period, &self.time_period]
            .into_iter()
            .find_map(|p| p.as_deref())
    }

    fn value(&self) -> Option<f64> {
        self.value
            .as_ref()
            .or(self.obs_value.as_ref())
            .and_then(RawValue::to_f64)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    fn to_f64(&self) -> Option<f64> {
        let v = match self {
            RawValue::Number(v) => *v,
            RawValue::Text(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() || trimmed == "." {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
        };
        if v.is_finite() { Some(v) } else { None }
    }
}

/// Parse a raw payload into observations sorted by period ascending.
pub fn parse_observations(raw: Option<&Value>) -> Vec<Observation> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    if raw.is_null() {
        return Vec::new();
    }

    let response = match SeriesResponse::deserialize(raw) {
        Ok(r) => r,
        Err(e) => {
            log::warn!("Unexpected INSEE payload structure: {e}");
            return Vec::new();
        }
    };

    let Some(series) = response.series.into_iter().next() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(series.observations.len());
    for (index, obs) in series.observations.iter().enumerate() {
        let Some(period) = obs.period_label() else {
            log::warn!("INSEE observation #{index} has no period; discarding the series.");
            return Vec::new();
        };
        out.push(Observation::new(period.trim(), obs.value()));
    }

    out.sort_by(|a, b| a.period.cmp(&b.period));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_inputs_give_empty_sequence() {
        assert!(parse_observations(None).is_empty());
        assert!(parse_observations(Some(&Value::Null)).is_empty());
        assert!(parse_observations(Some(&json!({}))).is_empty());
        assert!(parse_observations(Some(&json!({ "series": [] }))).is_empty());
        assert!(parse_observations(Some(&json!({ "series": [{}] }))).is_empty());
        assert!(parse_observations(Some(&json!({ "series": [{ "observations": [] }] }))).is_empty());
    }

    #[test]
    fn structural_mismatch_gives_empty_sequence() {
        assert!(parse_observations(Some(&json!([1, 2, 3]))).is_empty());
        assert!(parse_observations(Some(&json!({ "series": { "observations": [] } }))).is_empty());
        let missing_period = json!({ "series": [{ "observations": [{ "value": "1.0" }] }] });
        assert!(parse_observations(Some(&missing_period)).is_empty());
    }

    #[test]
    fn output_is_sorted_by_period() {
        let raw = json!({
            "series": [{
                "observations": [
                    { "periode": "2024-Q2", "value": "113.2" },
                    { "periode": "2023-Q4", "value": "110.6" },
                    { "periode": "2024-Q1", "value": 112.3 }
                ]
            }]
        });
        let obs = parse_observations(Some(&raw));
        let periods: Vec<&str> = obs.iter().map(|o| o.period.as_str()).collect();
        assert_eq!(periods, vec!["2023-Q4", "2024-Q1", "2024-Q2"]);
        assert_eq!(obs[1].value, Some(112.3));
        assert_eq!(obs[2].year, Some(2024));
        assert_eq!(obs[2].quarter, Some(2));
    }

    #[test]
    fn several_period_keys_prefer_periode() {
        let raw = json!({
            "series": [{
                "observations": [
                    { "periode": "2024-Q1", "period": "ignored", "TIME_PERIOD": "ignored", "value": "112.3" },
                    { "period": "2024-Q2", "TIME_PERIOD": "ignored", "OBS_VALUE": 113.0, "value": "113.2" },
                    { "TIME_PERIOD": "2024-Q3", "OBS_VALUE": "114.1" }
                ]
            }]
        });
        let obs = parse_observations(Some(&raw));
        let periods: Vec<&str> = obs.iter().map(|o| o.period.as_str()).collect();
        assert_eq!(periods, vec!["2024-Q1", "2024-Q2", "2024-Q3"]);
        assert_eq!(obs[1].value, Some(113.2));
        assert_eq!(obs[2].value, Some(114.1));
    }

    #[test]
    fn unusable_values_become_null() {
        let raw = json!({
            "series": [{
                "observations": [
                    { "TIME_PERIOD": "2024-Q1", "OBS_VALUE": "NaN" },
                    { "period": "2024-Q2", "value": "." },
                    { "periode": "2024-Q3", "value": null },
                    { "periode": "2024-Q4" }
                ]
            }]
        });
        let obs = parse_observations(Some(&raw));
        assert_eq!(obs.len(), 4);
        assert!(obs.iter().all(|o| o.value.is_none()));
    }
}
