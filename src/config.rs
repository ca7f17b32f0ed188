//! Actuator configuration

use std::path::PathBuf;

use crate::engine::actions::firewall::DEFAULT_IPTABLES_BIN;
use crate::mode::RemediationMode;

#[derive(Debug, Clone)]
pub struct ActuatorConfig {
    /// Log intended actions instead of performing them
    pub dry_run: bool,

    /// Packet filter tool used on linux
    pub iptables_bin: PathBuf,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            iptables_bin: PathBuf::from(DEFAULT_IPTABLES_BIN),
        }
    }
}

impl ActuatorConfig {
    pub fn mode(&self) -> RemediationMode {
        RemediationMode::from_dry_run(self.dry_run)
    }
}
