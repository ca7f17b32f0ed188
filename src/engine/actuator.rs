//! Remediation actuator
//!
//! The public façade used by the response layer. Every operation checks the
//! [`RemediationMode`] first: in dry-run it only logs what it would do, in
//! enforce it logs one notice and hands off to the backend chosen when the
//! actuator was built. The outcome is reported only through the return value.

use tracing::info;

use crate::config::ActuatorConfig;
use crate::engine::actions::firewall::{select_backend, FirewallBackend};
use crate::engine::actions::process::{ProcessBackend, SysinfoProcessBackend};
use crate::error::{RemediateError, Result};
use crate::mode::RemediationMode;
use crate::platform::Platform;

/// A mutating action, described for the notice that precedes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent<'a> {
    Kill { pid: i32, name: Option<&'a str> },
    Block { ip: &'a str },
    Unblock { ip: &'a str },
}

impl Intent<'_> {
    pub fn notice(&self, mode: RemediationMode) -> String {
        match (mode, self) {
            (RemediationMode::DryRun, Intent::Kill { pid, .. }) => {
                format!("[DRY-RUN] Would kill process PID: {}", pid)
            }
            (RemediationMode::DryRun, Intent::Block { ip }) => {
                format!("[DRY-RUN] Would block IP: {}", ip)
            }
            (RemediationMode::DryRun, Intent::Unblock { ip }) => {
                format!("[DRY-RUN] Would unblock IP: {}", ip)
            }
            (RemediationMode::Enforce, Intent::Kill { pid, name }) => format!(
                "[REMEDIATE] Killing process: {} (PID: {})",
                name.unwrap_or("<unknown>"),
                pid
            ),
            (RemediationMode::Enforce, Intent::Block { ip }) => {
                format!("[REMEDIATE] Blocking IP: {}", ip)
            }
            (RemediationMode::Enforce, Intent::Unblock { ip }) => {
                format!("[REMEDIATE] Unblocking IP: {}", ip)
            }
        }
    }
}

pub struct Actuator {
    mode: RemediationMode,
    platform: Platform,
    processes: Box<dyn ProcessBackend>,
    firewall: Box<dyn FirewallBackend>,
}

impl std::fmt::Debug for Actuator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actuator")
            .field("mode", &self.mode)
            .field("platform", &self.platform)
            .field("firewall", &self.firewall.name())
            .finish()
    }
}

impl Actuator {
    /// Build an actuator for the current platform.
    pub fn new(dry_run: bool) -> Self {
        Self::from_config(&ActuatorConfig {
            dry_run,
            ..Default::default()
        })
    }

    pub fn with_mode(mode: RemediationMode) -> Self {
        Self::new(mode.is_dry_run())
    }

    pub fn from_config(config: &ActuatorConfig) -> Self {
        let platform = Platform::detect();
        let firewall = select_backend(&platform, &config.iptables_bin);
        Self::with_backends(
            config.mode(),
            platform,
            Box::new(SysinfoProcessBackend),
            firewall,
        )
    }

    /// Build an actuator around explicit backends.
    pub fn with_backends(
        mode: RemediationMode,
        platform: Platform,
        processes: Box<dyn ProcessBackend>,
        firewall: Box<dyn FirewallBackend>,
    ) -> Self {
        Self {
            mode,
            platform,
            processes,
            firewall,
        }
    }

    pub fn mode(&self) -> RemediationMode {
        self.mode
    }

    pub fn is_dry_run(&self) -> bool {
        self.mode.is_dry_run()
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn firewall_backend(&self) -> &'static str {
        self.firewall.name()
    }

    /// Terminate the process with id `pid`.
    pub fn kill_process(&self, pid: i32) -> Result<()> {
        if self.is_dry_run() {
            info!("{}", Intent::Kill { pid, name: None }.notice(self.mode));
            return Ok(());
        }

        let handle = self
            .processes
            .resolve(pid)
            .ok_or(RemediateError::ProcessNotFound { pid })?;

        let intent = Intent::Kill {
            pid,
            name: handle.name.as_deref(),
        };
        info!("{}", intent.notice(self.mode));

        self.processes
            .terminate(&handle)
            .map_err(|source| RemediateError::KillFailed { pid, source })
    }

    /// Drop outbound traffic to `ip`.
    ///
    /// Each call appends a new rule; blocking an address twice needs two
    /// unblocks to clear it.
    pub fn block_ip(&self, ip: &str) -> Result<()> {
        info!("{}", Intent::Block { ip }.notice(self.mode));
        if self.is_dry_run() {
            return Ok(());
        }
        self.firewall.append_drop(ip)
    }

    /// Remove one rule dropping outbound traffic to `ip`.
    pub fn unblock_ip(&self, ip: &str) -> Result<()> {
        info!("{}", Intent::Unblock { ip }.notice(self.mode));
        if self.is_dry_run() {
            return Ok(());
        }
        self.firewall.delete_drop(ip)
    }
}
