//! ============================================================================
//! Anomaly List - Attaching synthetic locations to linked anomalies
//! ============================================================================

use rand::Rng;
use tracing::debug;

use crate::geo::{synthesize_with, GeoPoint};
use crate::types::{Anomaly, LinkedAnomaly, LinkedAnomalyRow};

/// Give every linked anomaly its own random coordinate around `origin`,
/// preserving input order
pub fn build_anomaly_list(
    linked: &[LinkedAnomalyRow],
    origin: GeoPoint,
    radius_km: f64,
) -> Vec<LinkedAnomaly> {
    build_anomaly_list_with(&mut rand::thread_rng(), linked, origin, radius_km)
}

/// Same as [`build_anomaly_list`] with a caller-supplied RNG
pub fn build_anomaly_list_with<R: Rng + ?Sized>(
    rng: &mut R,
    linked: &[LinkedAnomalyRow],
    origin: GeoPoint,
    radius_km: f64,
) -> Vec<LinkedAnomaly> {
    debug!(
        "Placing {} anomalies within {} km of {}",
        linked.len(),
        radius_km,
        origin
    );

    linked
        .iter()
        .map(|row| LinkedAnomaly {
            id: row.id,
            anomaly: Anomaly {
                id: row.anomaly.id,
                content: row.anomaly.content.clone(),
                coordinate: synthesize_with(rng, origin, radius_km),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{great_circle_distance_km, DEFAULT_ANOMALY_RADIUS_KM};
    use crate::types::AnomalyRow;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rows(n: i64) -> Vec<LinkedAnomalyRow> {
        (1..=n)
            .map(|i| LinkedAnomalyRow {
                id: i,
                anomaly: AnomalyRow {
                    id: 100 + i,
                    content: Some(format!("TIC {}", i)),
                },
            })
            .collect()
    }

    #[test]
    fn test_ten_anomalies_around_port_melbourne() {
        let origin = GeoPoint::new(-37.8399, 144.9310).unwrap();
        let linked = rows(10);
        let list = build_anomaly_list(&linked, origin, DEFAULT_ANOMALY_RADIUS_KM);

        assert_eq!(list.len(), 10);
        for (out, input) in list.iter().zip(&linked) {
            assert_eq!(out.id, input.id);
            assert_eq!(out.anomaly.id, input.anomaly.id);
            assert_eq!(out.anomaly.content, input.anomaly.content);
            let d = great_circle_distance_km(origin, out.anomaly.coordinate);
            assert!(d <= DEFAULT_ANOMALY_RADIUS_KM + 1e-6, "{} km", d);
        }

        for i in 0..list.len() {
            for j in (i + 1)..list.len() {
                assert_ne!(list[i].anomaly.coordinate, list[j].anomaly.coordinate);
            }
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let origin = GeoPoint::PORT_MELBOURNE;
        let linked = rows(5);
        let a = build_anomaly_list_with(&mut StdRng::seed_from_u64(9), &linked, origin, 20.0);
        let b = build_anomaly_list_with(&mut StdRng::seed_from_u64(9), &linked, origin, 20.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_radius_pins_to_origin() {
        let origin = GeoPoint::PORT_MELBOURNE;
        let list = build_anomaly_list(&rows(3), origin, 0.0);
        assert!(list.iter().all(|l| l.anomaly.coordinate == origin));
    }

    #[test]
    fn test_empty_input() {
        assert!(build_anomaly_list(&[], GeoPoint::PORT_MELBOURNE, 20.0).is_empty());
    }

    #[test]
    fn test_missing_content_survives() {
        let linked = vec![LinkedAnomalyRow {
            id: 1,
            anomaly: AnomalyRow {
                id: 2,
                content: None,
            },
        }];
        let list = build_anomaly_list(&linked, GeoPoint::PORT_MELBOURNE, 20.0);
        assert!(list[0].anomaly.content.is_none());
    }
}
