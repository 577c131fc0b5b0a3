//! ============================================================================
//! Backend Models - Auxiliary tables read by the client
//! ============================================================================
//! Classifications and player profiles. Free-form configuration
//! columns are kept as `serde_json::Value` rather than being forced into a
//! fixed schema.
//! ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Free-form JSON object column
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// A user's classification of an anomaly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<Uuid>,
    #[serde(default)]
    pub anomaly: Option<i64>,
    #[serde(default)]
    pub media: Option<serde_json::Value>,
    #[serde(rename = "classificationtype", default)]
    pub classification_type: Option<String>,
    #[serde(rename = "classificationConfiguration", default)]
    pub classification_configuration: Option<JsonObject>,
}

/// A player profile row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub location: Option<i64>,
    #[serde(rename = "activemission", default)]
    pub active_mission: Option<i64>,
    #[serde(rename = "classificationPoints", default)]
    pub classification_points: Option<i64>,
    #[serde(default)]
    pub push_subscription: Option<JsonObject>,
    #[serde(default)]
    pub referral_code: Option<String>,
}
