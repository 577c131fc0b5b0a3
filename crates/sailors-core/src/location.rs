//! ============================================================================
//! Location - Best-effort device position
//! ============================================================================

use crate::geo::GeoPoint;

/// Supplies the device position when one is known
pub trait LocationProvider: Send + Sync {
    fn current_location(&self) -> Option<GeoPoint>;
}

/// Provider that always reports the same point (or none)
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation(pub Option<GeoPoint>);

impl LocationProvider for FixedLocation {
    fn current_location(&self) -> Option<GeoPoint> {
        self.0
    }
}

/// Provider's location, or Port Melbourne when it has no fix
pub fn best_effort_location(provider: &dyn LocationProvider) -> GeoPoint {
    provider
        .current_location()
        .unwrap_or(GeoPoint::PORT_MELBOURNE)
}
