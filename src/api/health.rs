use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use super::helpers;
use crate::core::models::HealthPayload;

#[must_use]
pub fn health_payload() -> HealthPayload {
    HealthPayload {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

/// `GET /api/health`
#[must_use]
pub fn handle_health() -> Value {
    helpers::ok_json(&health_payload())
}
