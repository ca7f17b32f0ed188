//! Reports produced by a CLI invocation

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engine::Actuator;
use crate::error::RemediateError;
use crate::mode::RemediationMode;
use crate::platform::Platform;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum Report {
    Action(ActionReport),
    Status(StatusReport),
}

impl Report {
    pub fn succeeded(&self) -> bool {
        match self {
            Report::Action(action) => action.success,
            Report::Status(_) => true,
        }
    }
}

/// Outcome of one remediation operation
#[derive(Debug, Clone, Serialize)]
pub struct ActionReport {
    pub operation: String,
    pub target: String,
    pub mode: RemediationMode,
    pub platform: Platform,
    pub success: bool,
    pub error_kind: Option<String>,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ActionReport {
    pub fn new(
        actuator: &Actuator,
        operation: &str,
        target: impl ToString,
        outcome: &std::result::Result<(), RemediateError>,
    ) -> Self {
        Self {
            operation: operation.to_string(),
            target: target.to_string(),
            mode: actuator.mode(),
            platform: actuator.platform().clone(),
            success: outcome.is_ok(),
            error_kind: outcome.as_ref().err().map(|e| e.kind().to_string()),
            error: outcome.as_ref().err().map(|e| e.to_string()),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub mode: RemediationMode,
    pub platform: Platform,
    pub firewall_backend: String,
}

impl StatusReport {
    pub fn new(actuator: &Actuator) -> Self {
        Self {
            mode: actuator.mode(),
            platform: actuator.platform().clone(),
            firewall_backend: actuator.firewall_backend().to_string(),
        }
    }
}
