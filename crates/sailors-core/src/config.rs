//! ============================================================================
//! Configuration - Backend endpoints and screen defaults
//! ============================================================================
//! Populated from environment variables (a `.env` file is loaded by the
//! binary before this runs):
//!
//! | Variable                       | Default                                   |
//! |--------------------------------|-------------------------------------------|
//! | `SUPABASE_URL`                 | none (required for remote queries)        |
//! | `SUPABASE_ANON_KEY`            | none (required for remote queries)        |
//! | `STAR_SAILORS_CATALOG_URL`     | `https://starsailors.space/api/...`       |
//! | `STAR_SAILORS_RADIUS_KM`       | `20`                                      |
//! | `STAR_SAILORS_ANOMALY_LIMIT`   | `10`                                      |
//! | `STAR_SAILORS_INVENTORY_LIMIT` | `100`                                     |
//! | `STAR_SAILORS_ORIGIN`          | none (`"lat,lon"`, else Port Melbourne)   |
//! ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{HttpCatalog, DEFAULT_CATALOG_URL};
use crate::error::{Result, SailorsError};
use crate::geo::{GeoPoint, DEFAULT_ANOMALY_RADIUS_KM};
use crate::query::RestQueryService;

pub const DEFAULT_ANOMALY_LIMIT: usize = 10;
pub const DEFAULT_INVENTORY_LIMIT: usize = 100;

/// Client configuration
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct SailorsConfig {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub catalog_url: String,
    pub radius_km: f64,
    pub anomaly_limit: usize,
    pub inventory_limit: usize,
    /// Origin override used instead of the device location
    pub origin: Option<GeoPoint>,
}

// Anon key is redacted
impl fmt::Debug for SailorsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SailorsConfig")
            .field("supabase_url", &self.supabase_url)
            .field(
                "supabase_anon_key",
                &self.supabase_anon_key.as_ref().map(|_| "<redacted>"),
            )
            .field("catalog_url", &self.catalog_url)
            .field("radius_km", &self.radius_km)
            .field("anomaly_limit", &self.anomaly_limit)
            .field("inventory_limit", &self.inventory_limit)
            .field("origin", &self.origin)
            .finish()
    }
}

impl Default for SailorsConfig {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_anon_key: None,
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            radius_km: DEFAULT_ANOMALY_RADIUS_KM,
            anomaly_limit: DEFAULT_ANOMALY_LIMIT,
            inventory_limit: DEFAULT_INVENTORY_LIMIT,
            origin: None,
        }
    }
}

impl SailorsConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Self {
            supabase_url: non_empty("SUPABASE_URL"),
            supabase_anon_key: non_empty("SUPABASE_ANON_KEY"),
            catalog_url: non_empty("STAR_SAILORS_CATALOG_URL").unwrap_or(defaults.catalog_url),
            radius_km: parse_var(&non_empty, "STAR_SAILORS_RADIUS_KM")?
                .unwrap_or(defaults.radius_km),
            anomaly_limit: parse_var(&non_empty, "STAR_SAILORS_ANOMALY_LIMIT")?
                .unwrap_or(defaults.anomaly_limit),
            inventory_limit: parse_var(&non_empty, "STAR_SAILORS_INVENTORY_LIMIT")?
                .unwrap_or(defaults.inventory_limit),
            origin: non_empty("STAR_SAILORS_ORIGIN")
                .map(|v| parse_origin(&v))
                .transpose()?,
        };

        if !(config.radius_km >= 0.0) {
            return Err(SailorsError::Config(format!(
                "STAR_SAILORS_RADIUS_KM must be non-negative, got {}",
                config.radius_km
            )));
        }

        debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    /// Query service for the configured project
    pub fn query_service(&self) -> Result<RestQueryService> {
        match (&self.supabase_url, &self.supabase_anon_key) {
            (Some(url), Some(key)) => Ok(RestQueryService::new(url.clone(), key.clone())),
            _ => Err(SailorsError::Config(
                "SUPABASE_URL and SUPABASE_ANON_KEY must be set".to_string(),
            )),
        }
    }

    pub fn catalog(&self) -> HttpCatalog {
        HttpCatalog::new(self.catalog_url.clone())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| {
            v.trim()
                .parse::<T>()
                .map_err(|e| SailorsError::Config(format!("{}={:?}: {}", key, v, e)))
        })
        .transpose()
}

/// Parse `"lat,lon"`
pub fn parse_origin(value: &str) -> Result<GeoPoint> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| SailorsError::Config(format!("origin must be \"lat,lon\", got {:?}", value)))?;

    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|e| SailorsError::Config(format!("origin {:?}: {}", value, e)))
    };

    GeoPoint::new(parse(lat)?, parse(lon)?)
}
