//! Remediation mode (dry-run vs enforce)

use serde::Serialize;

/// Whether mutating actions are actually performed.
///
/// Fixed when an [`Actuator`](crate::Actuator) is built; there is no way to
/// flip it afterwards or override it for a single call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemediationMode {
    DryRun,
    #[default]
    Enforce,
}

impl RemediationMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            RemediationMode::DryRun
        } else {
            RemediationMode::Enforce
        }
    }

    pub fn is_dry_run(self) -> bool {
        self == RemediationMode::DryRun
    }
}

impl std::fmt::Display for RemediationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemediationMode::DryRun => write!(f, "dry-run"),
            RemediationMode::Enforce => write!(f, "enforce"),
        }
    }
}
