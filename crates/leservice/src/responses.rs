//! API response types owned by the service layer
//!
//! Ranking and planning responses come straight from `ledecision`; only the health payload is
//! defined here.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SERVICE_NAME;

/// Status reported by a live service
pub const HEALTHY: &str = "healthy";

/// Health check payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process answers
    pub status: String,

    /// Service name
    pub service: String,

    /// Time of the check, RFC 3339
    pub timestamp: String,
}

impl HealthResponse {
    /// Health payload stamped with `now`
    pub fn healthy_at(now: DateTime<Utc>) -> Self {
        Self {
            status: HEALTHY.to_string(),
            service: SERVICE_NAME.to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}
