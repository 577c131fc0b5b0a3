//! ============================================================================
//! Geo - Points, great-circle distance and coordinate synthesis
//! ============================================================================
//! Backend anomaly records carry no location. The client assigns each one a
//! synthetic point within a fixed radius of the player's origin by drawing a
//! random bearing and a random angular distance, then solving the spherical
//! destination-point formula.
//!
//! Distance is drawn uniformly in *linear* angular distance, not in area, so
//! points cluster toward the origin. This matches the shipped client and is
//! kept as observed.
//! ============================================================================

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SailorsError};

/// Mean Earth radius used for all spherical math
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Radius used by the anomaly screens when scattering records around the player
pub const DEFAULT_ANOMALY_RADIUS_KM: f64 = 20.0;

/// A latitude/longitude pair in degrees.
///
/// Latitude is always within [-90, 90] and longitude within [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = SailorsError;

    fn try_from(raw: RawGeoPoint) -> Result<Self> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    /// Port Melbourne, used whenever the device has no location fix
    pub const PORT_MELBOURNE: GeoPoint = GeoPoint {
        latitude: -37.8399,
        longitude: 144.9310,
    };

    /// Create a point, rejecting non-finite or out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
        if !lat_ok || !lon_ok {
            return Err(SailorsError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lat: {:.5}, Lon: {:.5}", self.latitude, self.longitude)
    }
}

/// Wrap a longitude into [-180, 180)
pub fn normalize_longitude(longitude: f64) -> f64 {
    (longitude + 180.0).rem_euclid(360.0) - 180.0
}

/// Haversine distance between two points, in kilometres
pub fn great_circle_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Synthesize a random point within `max_distance_km` of `origin` using the
/// thread-local RNG
pub fn synthesize(origin: GeoPoint, max_distance_km: f64) -> GeoPoint {
    synthesize_with(&mut rand::thread_rng(), origin, max_distance_km)
}

/// Synthesize a random point within `max_distance_km` of `origin`.
///
/// A radius of zero (or a negative / NaN radius) returns `origin` unchanged.
/// Longitudes that cross the antimeridian are wrapped into [-180, 180).
pub fn synthesize_with<R: Rng + ?Sized>(
    rng: &mut R,
    origin: GeoPoint,
    max_distance_km: f64,
) -> GeoPoint {
    // `!(x > 0)` also catches NaN
    if !(max_distance_km > 0.0) {
        return origin;
    }

    let max_angular = max_distance_km / EARTH_RADIUS_KM;

    let bearing = rng.gen_range(0.0..360.0_f64).to_radians();
    let distance = rng.gen_range(0.0..=max_angular);

    destination(origin, bearing, distance)
}

/// Destination point given a bearing (radians) and angular distance (radians)
fn destination(origin: GeoPoint, bearing: f64, distance: f64) -> GeoPoint {
    let lat1 = origin.latitude.to_radians();
    let lon1 = origin.longitude.to_radians();

    let sin_lat2 = lat1.sin() * distance.cos() + lat1.cos() * distance.sin() * bearing.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();
    let lon2 = lon1
        + (bearing.sin() * distance.sin() * lat1.cos())
            .atan2(distance.cos() - lat1.sin() * lat2.sin());

    GeoPoint {
        latitude: lat2.to_degrees().clamp(-90.0, 90.0),
        longitude: normalize_longitude(lon2.to_degrees()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS_KM: f64 = 1e-6;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(90.1, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -180.5).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: GeoPoint = serde_json::from_str(r#"{"latitude":1.5,"longitude":2.5}"#).unwrap();
        assert_eq!(ok, point(1.5, 2.5));

        let bad = serde_json::from_str::<GeoPoint>(r#"{"latitude":91.0,"longitude":0.0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_zero_radius_returns_origin_exactly() {
        let origin = GeoPoint::PORT_MELBOURNE;
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            assert_eq!(synthesize_with(&mut rng, origin, 0.0), origin);
        }
        assert_eq!(synthesize(origin, 0.0), origin);
    }

    #[test]
    fn test_degenerate_radius_returns_origin() {
        let origin = point(12.0, -45.0);
        assert_eq!(synthesize(origin, -3.0), origin);
        assert_eq!(synthesize(origin, f64::NAN), origin);
    }

    #[test]
    fn test_synthesized_point_within_radius() {
        let mut rng = StdRng::seed_from_u64(42);
        let origins = [
            GeoPoint::PORT_MELBOURNE,
            point(0.0, 0.0),
            point(51.5072, -0.1276),
            point(89.9, 10.0),
            point(-89.9, -120.0),
        ];

        for origin in origins {
            for radius in [0.5, 20.0, 250.0] {
                for _ in 0..500 {
                    let p = synthesize_with(&mut rng, origin, radius);
                    let d = great_circle_distance_km(origin, p);
                    assert!(
                        d <= radius + EPS_KM,
                        "{} is {} km from {}, radius {}",
                        p,
                        d,
                        origin,
                        radius
                    );
                    assert!((-90.0..=90.0).contains(&p.latitude()));
                    assert!((-180.0..=180.0).contains(&p.longitude()));
                }
            }
        }
    }

    #[test]
    fn test_antimeridian_wraps() {
        let origin = point(10.0, 179.99);
        let mut rng = StdRng::seed_from_u64(7);

        let mut crossed = 0;
        for _ in 0..500 {
            let p = synthesize_with(&mut rng, origin, 20.0);
            assert!((-180.0..=180.0).contains(&p.longitude()));
            assert!(great_circle_distance_km(origin, p) <= 20.0 + EPS_KM);
            if p.longitude() < 0.0 {
                crossed += 1;
                // Wrapped points sit just east of -180
                assert!(p.longitude() < -179.5);
            }
        }
        assert!(crossed > 0, "expected some draws to cross the antimeridian");
    }

    #[test]
    fn test_destination_due_north() {
        let origin = point(0.0, 0.0);
        let one_degree = 1.0_f64.to_radians();
        let p = destination(origin, 0.0, one_degree);
        assert!((p.latitude() - 1.0).abs() < 1e-9);
        assert!(p.longitude().abs() < 1e-9);
    }

    #[test]
    fn test_great_circle_distance() {
        let a = point(0.0, 0.0);
        let b = point(1.0, 0.0);
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        assert!((great_circle_distance_km(a, b) - expected).abs() < 1e-9);
        assert_eq!(great_circle_distance_km(a, a), 0.0);

        // Across the antimeridian the short way round
        let east = point(0.0, 179.5);
        let west = point(0.0, -179.5);
        assert!((great_circle_distance_km(east, west) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_longitude() {
        assert_eq!(normalize_longitude(0.0), 0.0);
        assert_eq!(normalize_longitude(190.0), -170.0);
        assert_eq!(normalize_longitude(-190.0), 170.0);
        assert_eq!(normalize_longitude(180.0), -180.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            GeoPoint::PORT_MELBOURNE.to_string(),
            "Lat: -37.83990, Lon: 144.93100"
        );
    }
}
