use super::DecodeError;
use common::position::Fix;

/// Prefix of the GPS fix data sentence, the only sentence carrying a position we use.
pub const GGA_PREFIX: &str = "$GPGGA";

const LATITUDE: usize = 2;
const LATITUDE_HEMISPHERE: usize = 3;
const LONGITUDE: usize = 4;
const LONGITUDE_HEMISPHERE: usize = 5;
const MIN_FIELDS: usize = 6;

/// Decodes a `$GPGGA` sentence.
///
/// Other sentences are not an error and return `Ok(None)`.
pub fn decode(line: &str) -> Result<Option<Fix>, DecodeError> {
    let line = line.trim();
    if !line.starts_with(GGA_PREFIX) {
        return Ok(None);
    }
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < MIN_FIELDS {
        return Err(DecodeError::TooFewFields(fields.len()));
    }
    let latitude = magnitude(fields[LATITUDE], "latitude")?;
    let latitude = match fields[LATITUDE_HEMISPHERE] {
        "N" => latitude,
        "S" => -latitude,
        other => return Err(DecodeError::InvalidHemisphere(other.to_owned())),
    };
    let longitude = magnitude(fields[LONGITUDE], "longitude")?;
    let longitude = match fields[LONGITUDE_HEMISPHERE] {
        "E" => longitude,
        "W" => -longitude,
        other => return Err(DecodeError::InvalidHemisphere(other.to_owned())),
    };
    Ok(Some(Fix::new(latitude, longitude)?))
}

/// Converts an NMEA `DDMM.MMMM` / `DDDMM.MMMM` value into decimal degrees.
pub fn to_decimal_degrees(value: f64) -> f64 {
    let degrees = (value / 100.0).floor();
    let minutes = value - degrees * 100.0;
    degrees + minutes / 60.0
}

/// Parses an unsigned `DDMM.MMMM` field, the hemisphere alone decides the sign.
fn magnitude(field: &str, name: &'static str) -> Result<f64, DecodeError> {
    if field.is_empty() {
        return Err(DecodeError::MissingField(name));
    }
    let value = match field.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => return Err(DecodeError::NotNumeric(name)),
    };
    let minutes = value - (value / 100.0).floor() * 100.0;
    if value.is_sign_negative() || minutes >= 60.0 {
        return Err(DecodeError::InvalidMagnitude {
            field: name,
            value: field.to_owned(),
        });
    }
    Ok(to_decimal_degrees(value))
}
