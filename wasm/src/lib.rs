//! WebAssembly module for the farm telemetry dashboard
//!
//! Provides client-side computation for:
//! - Metric status classification
//! - Overall status aggregation
//! - Alert lists and fleet statistics from received readings

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::classifier::*;
pub use shared::models::*;
pub use shared::stats::*;
pub use shared::types::*;

/// Classify a metric value by its wire name ("soilMoisture", "ph", ...).
/// Unknown names are reported as "normal".
#[wasm_bindgen]
pub fn classify_metric(value: f64, metric: &str) -> String {
    classify_named(value, metric).to_string()
}

/// Aggregate a JSON array of statuses into the worst one
#[wasm_bindgen]
pub fn overall_status(statuses_json: &str) -> Result<String, JsValue> {
    let statuses: Vec<Status> = serde_json::from_str(statuses_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid statuses JSON: {}", e)))?;

    Ok(aggregate_status(&statuses).to_string())
}

/// Alerts for every out-of-range metric of a reading, as JSON
#[wasm_bindgen]
pub fn reading_alerts(reading_json: &str) -> Result<String, JsValue> {
    let reading: Reading = serde_json::from_str(reading_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid reading JSON: {}", e)))?;

    serde_json::to_string(&metric_alerts(&reading))
        .map_err(|e| JsValue::from_str(&format!("Failed to encode alerts: {}", e)))
}

/// Dashboard statistics over a JSON array of readings
#[wasm_bindgen]
pub fn fleet_stats(readings_json: &str) -> Result<String, JsValue> {
    let readings: Vec<Reading> = serde_json::from_str(readings_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid readings JSON: {}", e)))?;

    let mut stats = FleetStats::new();
    for reading in &readings {
        stats.record(reading);
    }

    serde_json::to_string(&stats.summary())
        .map_err(|e| JsValue::from_str(&format!("Failed to encode stats: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const READING: &str = r#"{
        "sensorId": "sensor_001",
        "fieldId": "Field_A",
        "cropType": "Tomatoes",
        "areaHectares": 2.5,
        "temperature": 33.4,
        "humidity": 52.0,
        "soilMoisture": 21.7,
        "phLevel": 6.4,
        "waterLevel": 48.0,
        "lightIntensity": 720.5,
        "timestamp": "2024-06-01T08:30:00.123456",
        "status": "critical",
        "alerts": {
            "soilMoisture": "critical",
            "temperature": "warning",
            "humidity": "normal",
            "ph": "normal",
            "waterLevel": "normal"
        }
    }"#;

    #[test]
    fn test_classify_metric() {
        assert_eq!(classify_metric(20.0, "soilMoisture"), "critical");
        assert_eq!(classify_metric(30.0, "soilMoisture"), "warning");
        assert_eq!(classify_metric(10.0, "temperature"), "warning");
        assert_eq!(classify_metric(38.01, "temperature"), "critical");
        assert_eq!(classify_metric(6.5, "ph"), "normal");
        assert_eq!(classify_metric(1.0, "lightIntensity"), "normal");
        assert_eq!(classify_metric(1.0, "unknown"), "normal");
    }

    #[test]
    fn test_overall_status() {
        assert_eq!(
            overall_status(r#"["normal","warning","normal","normal","normal"]"#).unwrap(),
            "warning"
        );
        assert_eq!(
            overall_status(r#"["warning","critical","normal"]"#).unwrap(),
            "critical"
        );
        assert_eq!(overall_status("[]").unwrap(), "normal");
    }

    #[test]
    fn test_reading_alerts() {
        let alerts: serde_json::Value =
            serde_json::from_str(&reading_alerts(READING).unwrap()).unwrap();
        let alerts = alerts.as_array().unwrap();

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0]["metric"], "soilMoisture");
        assert_eq!(alerts[0]["severity"], "critical");
        assert_eq!(alerts[1]["metric"], "temperature");
        assert_eq!(alerts[1]["threshold"], 32.0);
    }

    #[test]
    fn test_fleet_stats() {
        let stats: serde_json::Value =
            serde_json::from_str(&fleet_stats(&format!("[{}]", READING)).unwrap()).unwrap();

        assert_eq!(stats["totalSensors"], 1);
        assert_eq!(stats["activeAlerts"], 2);
        assert_eq!(stats["avgTemperature"], 33.4);
    }
}
