use super::DecodeError;
use common::position::Fix;
use serde_yaml::Value;

/// Decodes a YAML document with numeric top level `latitude` and `longitude` keys.
///
/// This is the shape `rostopic echo` prints for a NavSatFix message, every other
/// key of the document is ignored.
pub fn decode(block: &str) -> Result<Fix, DecodeError> {
    let document: Value = serde_yaml::from_str(block)
        .map_err(|e| DecodeError::MalformedDocument(e.to_string()))?;
    let latitude = number(&document, "latitude")?;
    let longitude = number(&document, "longitude")?;
    Ok(Fix::new(latitude, longitude)?)
}

fn number(document: &Value, key: &'static str) -> Result<f64, DecodeError> {
    document
        .get(key)
        .ok_or(DecodeError::MissingField(key))?
        .as_f64()
        .ok_or(DecodeError::NotNumeric(key))
}
