use serde::Serialize;

/// Mean earth radius in kilometers used for great-circle distances.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A normalized geographic fix in decimal degrees.
///
/// Every position source (rosbridge, NMEA, YAML blocks) produces this value.
/// Latitude is always within -90.0 to 90.0 and longitude within -180.0 to 180.0,
/// the constructor refuses anything else.
///
/// # Example
///
/// ```rust
/// use common::position::Fix;
///
/// let fix = Fix::new(52.5200, 13.4050).unwrap();
/// assert_eq!(fix.latitude(), 52.5200);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Fix {
    latitude: f64,
    longitude: f64,
}

/// Reported when a coordinate pair can't form a [`Fix`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum FixError {
    #[error("latitude {0} is outside of [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} is outside of [-180, 180]")]
    Longitude(f64),
}

impl Fix {
    /// Creates a new [`Fix`] from decimal degrees.
    ///
    /// # Arguments
    ///
    /// * `latitude` - Latitude in decimal degrees, positive for the northern hemisphere.
    /// * `longitude` - Longitude in decimal degrees, positive for the eastern hemisphere.
    ///
    /// # Returns
    ///
    /// * `Ok(Fix)` - If both values are finite and inside their range.
    /// * `Err(FixError)` - Naming the first coordinate that is out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Fix, FixError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(FixError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(FixError::Longitude(longitude));
        }
        Ok(Fix {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude in decimal degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in decimal degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometers (haversine formula).
    pub fn distance_km(&self, other: &Fix) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.latitude.to_radians().cos()
                * other.latitude.to_radians().cos()
                * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}
