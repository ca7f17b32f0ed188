//! Error types for remediate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemediateError {
    #[error("kill_process: failed to find process (PID: {pid})")]
    ProcessNotFound { pid: i32 },

    #[error("kill_process: failed to kill process (PID: {pid}): {source}")]
    KillFailed {
        pid: i32,
        #[source]
        source: std::io::Error,
    },

    #[error("{operation}: unsupported OS: {os} (IP: {ip})")]
    UnsupportedOs {
        operation: &'static str,
        ip: String,
        os: String,
    },

    #[error("{operation}: not implemented for {os} (IP: {ip})")]
    UnsupportedOperation {
        operation: &'static str,
        ip: String,
        os: String,
    },

    #[error("{operation}: firewall command `{command}` failed for IP {ip}: {cause}")]
    FirewallCommandFailed {
        operation: &'static str,
        ip: String,
        command: String,
        cause: String,
    },
}

impl RemediateError {
    /// Stable label used in machine-readable reports.
    pub fn kind(&self) -> &'static str {
        match self {
            RemediateError::ProcessNotFound { .. } => "process_not_found",
            RemediateError::KillFailed { .. } => "kill_failed",
            RemediateError::UnsupportedOs { .. } => "unsupported_os",
            RemediateError::UnsupportedOperation { .. } => "unsupported_operation",
            RemediateError::FirewallCommandFailed { .. } => "firewall_command_failed",
        }
    }
}

pub type Result<T> = std::result::Result<T, RemediateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_operation_and_target() {
        let err = RemediateError::FirewallCommandFailed {
            operation: "unblock_ip",
            ip: "10.0.0.5".to_string(),
            command: "iptables -D OUTPUT -d 10.0.0.5 -j DROP".to_string(),
            cause: "exit status: 1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("unblock_ip:"));
        assert!(msg.contains("10.0.0.5"));
        assert!(msg.contains("exit status: 1"));
        assert_eq!(err.kind(), "firewall_command_failed");
    }

    #[test]
    fn test_kill_failed_keeps_source() {
        use std::error::Error as _;

        let err = RemediateError::KillFailed {
            pid: 42,
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("PID: 42"));
    }

    #[test]
    fn test_kind_labels_cover_every_variant() {
        let ip = || "10.0.0.5".to_string();
        let errors = [
            RemediateError::ProcessNotFound { pid: 1 },
            RemediateError::KillFailed {
                pid: 1,
                source: std::io::Error::from(std::io::ErrorKind::Other),
            },
            RemediateError::UnsupportedOs {
                operation: "block_ip",
                ip: ip(),
                os: "windows".to_string(),
            },
            RemediateError::UnsupportedOperation {
                operation: "unblock_ip",
                ip: ip(),
                os: "darwin".to_string(),
            },
            RemediateError::FirewallCommandFailed {
                operation: "block_ip",
                ip: ip(),
                command: "iptables".to_string(),
                cause: "exit status: 4".to_string(),
            },
        ];
        let kinds: Vec<&str> = errors.iter().map(RemediateError::kind).collect();
        assert_eq!(
            kinds,
            [
                "process_not_found",
                "kill_failed",
                "unsupported_os",
                "unsupported_operation",
                "firewall_command_failed",
            ]
        );
    }
}
