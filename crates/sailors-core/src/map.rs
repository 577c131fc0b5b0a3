//! ============================================================================
//! Map Focus - Non-rendering logic behind the anomaly map
//! ============================================================================
//! Picks the map centre, the "jump to random anomaly" target and the
//! annotation labels. Tile rendering lives in the UI layer.
//! ============================================================================

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::geo::{great_circle_distance_km, GeoPoint};
use crate::types::LinkedAnomaly;

/// Pin shown for one anomaly
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapAnnotation {
    pub anomaly_id: i64,
    pub coordinate: GeoPoint,
    pub title: String,
    pub subtitle: String,
}

/// Centre on the first anomaly, or on the origin when there are none
pub fn initial_center(anomalies: &[LinkedAnomaly], origin: GeoPoint) -> GeoPoint {
    anomalies
        .first()
        .map(|l| l.anomaly.coordinate)
        .unwrap_or(origin)
}

pub fn random_anomaly<'a, R: Rng + ?Sized>(
    anomalies: &'a [LinkedAnomaly],
    rng: &mut R,
) -> Option<&'a LinkedAnomaly> {
    anomalies.choose(rng)
}

/// One annotation per anomaly, labelled with its distance from `center`
pub fn annotations(center: GeoPoint, anomalies: &[LinkedAnomaly]) -> Vec<MapAnnotation> {
    anomalies
        .iter()
        .map(|l| MapAnnotation {
            anomaly_id: l.anomaly.id,
            coordinate: l.anomaly.coordinate,
            title: l
                .anomaly
                .content
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            subtitle: format!(
                "{:.2} km away",
                great_circle_distance_km(center, l.anomaly.coordinate)
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Anomaly;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn linked(id: i64, lat: f64, lon: f64, content: Option<&str>) -> LinkedAnomaly {
        LinkedAnomaly {
            id,
            anomaly: Anomaly {
                id: id * 10,
                content: content.map(str::to_string),
                coordinate: GeoPoint::new(lat, lon).unwrap(),
            },
        }
    }

    #[test]
    fn test_initial_center() {
        let origin = GeoPoint::PORT_MELBOURNE;
        assert_eq!(initial_center(&[], origin), origin);

        let list = vec![linked(1, -37.8, 144.9, None), linked(2, -37.7, 145.0, None)];
        assert_eq!(initial_center(&list, origin), list[0].anomaly.coordinate);
    }

    #[test]
    fn test_random_anomaly() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(random_anomaly(&[], &mut rng).is_none());

        let list = vec![linked(1, 0.0, 0.0, None), linked(2, 1.0, 1.0, None)];
        let pick = random_anomaly(&list, &mut rng).unwrap();
        assert!(list.iter().any(|l| l.id == pick.id));
    }

    #[test]
    fn test_annotations() {
        let center = GeoPoint::new(0.0, 0.0).unwrap();
        let list = vec![linked(1, 1.0, 0.0, Some("Sunspot")), linked(2, 0.0, 0.0, None)];
        let pins = annotations(center, &list);

        assert_eq!(pins.len(), 2);
        assert_eq!(pins[0].title, "Sunspot");
        assert_eq!(pins[0].subtitle, "111.19 km away");
        assert_eq!(pins[0].anomaly_id, 10);
        assert_eq!(pins[1].title, "Unknown");
        assert_eq!(pins[1].subtitle, "0.00 km away");
    }
}
