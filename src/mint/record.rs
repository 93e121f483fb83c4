//! Cylinder record validation and unit normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mint::MintError;

/// Batch number written on-chain when the record carries none.
pub const BATCH_NUMBER_SENTINEL: &str = "N/A";

/// A cylinder document as it arrives from the record store.
///
/// Every field is optional at this layer so that missing data reaches the
/// validator and produces a proper validation error instead of a
/// deserialization failure. Weight and capacity are stated in kilograms and
/// may arrive as JSON numbers or numeric strings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CylinderRecord {
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub manufacturer_id: Option<String>,
    pub cylinder_type: Option<String>,
    pub weight: Option<Value>,
    pub capacity: Option<Value>,
    pub batch_number: Option<String>,
}

/// Validated, unit-normalized projection of a [`CylinderRecord`].
///
/// Weight and capacity are in grams. Construction is only possible through
/// [`CylinderRecord::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    pub cylinder_id: String,
    /// `manufacturerId` when present and non-empty, else `manufacturer`.
    pub manufacturer: String,
    pub cylinder_type: String,
    pub weight_grams: u64,
    pub capacity_grams: u64,
    pub batch_number: String,
}

impl CylinderRecord {
    /// Validate the record and normalize units into a [`MintRequest`].
    ///
    /// Fails with a single validation error naming every missing required
    /// field, and rejects non-numeric, non-finite, or negative weight and
    /// capacity values rather than proceeding with garbage.
    pub fn validate(&self) -> Result<MintRequest, MintError> {
        let serial_number = non_blank(&self.serial_number);
        let manufacturer_name = non_blank(&self.manufacturer);
        let cylinder_type = non_blank(&self.cylinder_type);

        let mut missing = Vec::new();
        if serial_number.is_none() {
            missing.push("serialNumber");
        }
        if manufacturer_name.is_none() {
            missing.push("manufacturer");
        }
        if cylinder_type.is_none() {
            missing.push("cylinderType");
        }

        let (Some(cylinder_id), Some(manufacturer_name), Some(cylinder_type)) =
            (serial_number, manufacturer_name, cylinder_type)
        else {
            return Err(MintError::Validation(format!(
                "missing required cylinder metadata: {}",
                missing.join(", ")
            )));
        };

        let weight_kg = parse_kilograms(self.weight.as_ref(), "weight")?;
        let capacity_kg = parse_kilograms(self.capacity.as_ref(), "capacity")?;

        let manufacturer = non_blank(&self.manufacturer_id).unwrap_or(manufacturer_name);

        Ok(MintRequest {
            cylinder_id,
            manufacturer,
            cylinder_type,
            weight_grams: to_grams(weight_kg),
            capacity_grams: to_grams(capacity_kg),
            batch_number: non_blank(&self.batch_number)
                .unwrap_or_else(|| BATCH_NUMBER_SENTINEL.to_string()),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse a kilogram value from a JSON number or numeric string.
fn parse_kilograms(value: Option<&Value>, field: &str) -> Result<f64, MintError> {
    let value =
        value.ok_or_else(|| MintError::Validation(format!("{} is required", field)))?;

    let kilograms = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| MintError::Validation(format!("{} is not a number", field)))?;

    if !kilograms.is_finite() || kilograms < 0.0 {
        return Err(MintError::Validation(format!(
            "{} must be a finite, non-negative number",
            field
        )));
    }

    Ok(kilograms)
}

/// Convert kilograms to grams, rounding half away from zero.
///
/// Applied identically to weight and capacity.
fn to_grams(kilograms: f64) -> u64 {
    (kilograms * 1000.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> CylinderRecord {
        CylinderRecord {
            serial_number: Some("CYL-2024-001".to_string()),
            manufacturer: Some("Gesi Works".to_string()),
            manufacturer_id: None,
            cylinder_type: Some("LPG-13kg".to_string()),
            weight: Some(json!(12.5)),
            capacity: Some(json!(13.0)),
            batch_number: None,
        }
    }

    fn validation_message(result: Result<MintRequest, MintError>) -> String {
        match result {
            Err(MintError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn converts_kilograms_to_grams() {
        let request = record().validate().unwrap();
        assert_eq!(request.weight_grams, 12_500);
        assert_eq!(request.capacity_grams, 13_000);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        let mut r = record();
        r.weight = Some(json!(0.001));
        r.capacity = Some(json!(0.0004));
        let request = r.validate().unwrap();
        assert_eq!(request.weight_grams, 1);
        assert_eq!(request.capacity_grams, 0);

        r.weight = Some(json!(1.2345));
        let request = r.validate().unwrap();
        assert_eq!(request.weight_grams, 1235);
    }

    #[test]
    fn lists_every_missing_required_field() {
        let mut r = record();
        r.serial_number = None;
        r.cylinder_type = Some("   ".to_string());
        let msg = validation_message(r.validate());
        assert!(msg.contains("serialNumber"));
        assert!(msg.contains("cylinderType"));
        assert!(!msg.contains("manufacturer,"));
    }

    #[test]
    fn accepts_numeric_strings() {
        let mut r = record();
        r.weight = Some(json!(" 12.5 "));
        let request = r.validate().unwrap();
        assert_eq!(request.weight_grams, 12_500);
    }

    #[test]
    fn rejects_non_numeric_weight() {
        let mut r = record();
        r.weight = Some(json!("twelve"));
        let msg = validation_message(r.validate());
        assert!(msg.contains("weight is not a number"));
    }

    #[test]
    fn rejects_missing_capacity() {
        let mut r = record();
        r.capacity = None;
        let msg = validation_message(r.validate());
        assert!(msg.contains("capacity is required"));
    }

    #[test]
    fn rejects_negative_weight() {
        let mut r = record();
        r.weight = Some(json!(-1.0));
        let msg = validation_message(r.validate());
        assert!(msg.contains("weight"));
    }

    #[test]
    fn prefers_manufacturer_id_when_present() {
        let mut r = record();
        r.manufacturer_id = Some("MFG-77".to_string());
        let request = r.validate().unwrap();
        assert_eq!(request.manufacturer, "MFG-77");
    }

    #[test]
    fn blank_manufacturer_id_falls_back() {
        let mut r = record();
        r.manufacturer_id = Some("  ".to_string());
        let request = r.validate().unwrap();
        assert_eq!(request.manufacturer, "Gesi Works");
    }

    #[test]
    fn missing_batch_number_uses_sentinel() {
        let request = record().validate().unwrap();
        assert_eq!(request.batch_number, "N/A");
    }

    #[test]
    fn deserializes_camel_case_documents() {
        let r: CylinderRecord = serde_json::from_value(json!({
            "serialNumber": "CYL-1",
            "manufacturer": "Gesi Works",
            "cylinderType": "LPG-6kg",
            "weight": 6.2,
            "capacity": "6.5",
            "batchNumber": "B-9"
        }))
        .unwrap();
        let request = r.validate().unwrap();
        assert_eq!(request.cylinder_id, "CYL-1");
        assert_eq!(request.capacity_grams, 6_500);
        assert_eq!(request.batch_number, "B-9");
    }
}
