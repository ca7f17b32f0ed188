//! Outbound traffic blocking backends
//!
//! One backend is picked per [`Platform`] when the actuator is built:
//!
//! - linux: [`IptablesBackend`] appends/deletes `OUTPUT -d <ip> -j DROP` rules
//! - darwin: [`PfStubBackend`] logs and does nothing (pf anchors must be set up
//!   outside this crate)
//! - anything else: [`UnsupportedBackend`]
//!
//! None of them keep a record of which rules exist; the OS firewall table is
//! the only state.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::engine::actions::command::{CommandLine, CommandRunner, SystemCommandRunner};
use crate::error::{RemediateError, Result};
use crate::platform::Platform;

pub const DEFAULT_IPTABLES_BIN: &str = "iptables";

const CHAIN: &str = "OUTPUT";
const TARGET: &str = "DROP";

const OP_BLOCK: &str = "block_ip";
const OP_UNBLOCK: &str = "unblock_ip";

pub trait FirewallBackend: Send + Sync {
    /// Short name shown in status output.
    fn name(&self) -> &'static str;

    /// Add a rule dropping outbound traffic to `ip`.
    fn append_drop(&self, ip: &str) -> Result<()>;

    /// Remove one rule dropping outbound traffic to `ip`.
    fn delete_drop(&self, ip: &str) -> Result<()>;
}

/// Pick the backend for `platform`.
pub fn select_backend(platform: &Platform, iptables_bin: &Path) -> Box<dyn FirewallBackend> {
    match platform {
        Platform::Linux => Box::new(IptablesBackend::new(iptables_bin, SystemCommandRunner)),
        Platform::Darwin => Box::new(PfStubBackend),
        Platform::Other(os) => Box::new(UnsupportedBackend::new(os.clone())),
    }
}

pub struct IptablesBackend<R: CommandRunner> {
    program: PathBuf,
    runner: R,
}

impl<R: CommandRunner> IptablesBackend<R> {
    pub fn new(program: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn rule_command(&self, flag: &str, ip: &str) -> CommandLine {
        CommandLine {
            program: self.program.clone(),
            args: vec![
                flag.to_string(),
                CHAIN.to_string(),
                "-d".to_string(),
                ip.to_string(),
                "-j".to_string(),
                TARGET.to_string(),
            ],
        }
    }

    fn execute(&self, operation: &'static str, ip: &str, command: CommandLine) -> Result<()> {
        debug!(command = %command, "running firewall command");

        let failed = |cause: String| RemediateError::FirewallCommandFailed {
            operation,
            ip: ip.to_string(),
            command: command.to_string(),
            cause,
        };

        let output = self
            .runner
            .run(&command.program, &command.args)
            .map_err(|e| failed(format!("failed to spawn: {}", e)))?;

        if output.success {
            Ok(())
        } else {
            Err(failed(output.failure_detail()))
        }
    }
}

impl<R: CommandRunner> FirewallBackend for IptablesBackend<R> {
    fn name(&self) -> &'static str {
        "iptables"
    }

    // No existence check: appending twice leaves two matching rules.
    fn append_drop(&self, ip: &str) -> Result<()> {
        self.execute(OP_BLOCK, ip, self.rule_command("-A", ip))
    }

    fn delete_drop(&self, ip: &str) -> Result<()> {
        self.execute(OP_UNBLOCK, ip, self.rule_command("-D", ip))
    }
}

/// macOS placeholder. Reports success for blocks without touching pf.
#[derive(Debug, Clone, Copy, Default)]
pub struct PfStubBackend;

impl FirewallBackend for PfStubBackend {
    fn name(&self) -> &'static str {
        "pf-stub"
    }

    fn append_drop(&self, ip: &str) -> Result<()> {
        warn!(
            ip,
            "IP blocking on darwin requires pfctl anchor configuration; no rule was added"
        );
        Ok(())
    }

    fn delete_drop(&self, ip: &str) -> Result<()> {
        Err(RemediateError::UnsupportedOperation {
            operation: OP_UNBLOCK,
            ip: ip.to_string(),
            os: Platform::Darwin.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct UnsupportedBackend {
    os: String,
}

impl UnsupportedBackend {
    pub fn new(os: impl Into<String>) -> Self {
        Self { os: os.into() }
    }
}

impl FirewallBackend for UnsupportedBackend {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn append_drop(&self, ip: &str) -> Result<()> {
        Err(RemediateError::UnsupportedOs {
            operation: OP_BLOCK,
            ip: ip.to_string(),
            os: self.os.clone(),
        })
    }

    fn delete_drop(&self, ip: &str) -> Result<()> {
        Err(RemediateError::UnsupportedOperation {
            operation: OP_UNBLOCK,
            ip: ip.to_string(),
            os: self.os.clone(),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::engine::actions::command::CommandOutput;
    use std::sync::Mutex;

    /// Simulates `iptables` against an in-memory OUTPUT chain.
    #[derive(Default)]
    pub(crate) struct FakeIptables {
        pub rules: Mutex<Vec<String>>,
        pub calls: Mutex<Vec<Vec<String>>>,
    }

    impl FakeIptables {
        pub fn matching_rules(&self, ip: &str) -> usize {
            self.rules.lock().unwrap().iter().filter(|r| *r == ip).count()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl CommandRunner for FakeIptables {
        fn run(&self, _program: &Path, args: &[String]) -> std::io::Result<CommandOutput> {
            self.calls.lock().unwrap().push(args.to_vec());

            let mut rules = self.rules.lock().unwrap();
            let ip = args[3].clone();
            match args[0].as_str() {
                "-A" => {
                    rules.push(ip);
                    Ok(CommandOutput {
                        success: true,
                        exit_code: Some(0),
                        ..Default::default()
                    })
                }
                "-D" => match rules.iter().position(|r| *r == ip) {
                    Some(idx) => {
                        rules.remove(idx);
                        Ok(CommandOutput {
                            success: true,
                            exit_code: Some(0),
                            ..Default::default()
                        })
                    }
                    None => Ok(CommandOutput {
                        success: false,
                        exit_code: Some(1),
                        stderr: "iptables: Bad rule (does a matching rule exist in that chain?).\n"
                            .to_string(),
                        ..Default::default()
                    }),
                },
                _ => unreachable!("unexpected iptables flag"),
            }
        }
    }

    struct MissingBinary;

    impl CommandRunner for MissingBinary {
        fn run(&self, _program: &Path, _args: &[String]) -> std::io::Result<CommandOutput> {
            Err(std::io::Error::from(std::io::ErrorKind::NotFound))
        }
    }

    #[test]
    fn test_iptables_argument_shapes() {
        let backend = IptablesBackend::new("iptables", FakeIptables::default());
        backend.append_drop("10.0.0.5").unwrap();
        backend.delete_drop("10.0.0.5").unwrap();

        let calls = backend.runner().calls.lock().unwrap();
        assert_eq!(calls[0], ["-A", "OUTPUT", "-d", "10.0.0.5", "-j", "DROP"]);
        assert_eq!(calls[1], ["-D", "OUTPUT", "-d", "10.0.0.5", "-j", "DROP"]);
    }

    #[test]
    fn test_append_is_not_idempotent() {
        let backend = IptablesBackend::new("iptables", FakeIptables::default());
        backend.append_drop("10.0.0.5").unwrap();
        backend.append_drop("10.0.0.5").unwrap();
        assert_eq!(backend.runner().matching_rules("10.0.0.5"), 2);

        backend.delete_drop("10.0.0.5").unwrap();
        assert_eq!(backend.runner().matching_rules("10.0.0.5"), 1);
    }

    #[test]
    fn test_delete_missing_rule_fails() {
        let backend = IptablesBackend::new("iptables", FakeIptables::default());
        let err = backend.delete_drop("10.0.0.5").unwrap_err();
        match err {
            RemediateError::FirewallCommandFailed {
                operation,
                ip,
                command,
                cause,
            } => {
                assert_eq!(operation, "unblock_ip");
                assert_eq!(ip, "10.0.0.5");
                assert_eq!(command, "iptables -D OUTPUT -d 10.0.0.5 -j DROP");
                assert!(cause.contains("Bad rule"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_binary_is_command_failure() {
        let backend = IptablesBackend::new("/sbin/iptables", MissingBinary);
        let err = backend.append_drop("10.0.0.5").unwrap_err();
        assert!(matches!(err, RemediateError::FirewallCommandFailed { .. }));
        assert!(err.to_string().contains("/sbin/iptables -A OUTPUT"));
    }

    #[test]
    fn test_pf_stub_blocks_without_mutation() {
        let backend = PfStubBackend;
        assert!(backend.append_drop("10.0.0.5").is_ok());
        assert!(matches!(
            backend.delete_drop("10.0.0.5"),
            Err(RemediateError::UnsupportedOperation { .. })
        ));
    }

    #[test]
    fn test_unsupported_backend_errors() {
        let backend = UnsupportedBackend::new("windows");
        assert!(matches!(
            backend.append_drop("10.0.0.5"),
            Err(RemediateError::UnsupportedOs { ref os, .. }) if os == "windows"
        ));
        assert!(matches!(
            backend.delete_drop("10.0.0.5"),
            Err(RemediateError::UnsupportedOperation { .. })
        ));
    }

    #[test]
    fn test_select_backend_by_platform() {
        let bin = Path::new(DEFAULT_IPTABLES_BIN);
        assert_eq!(select_backend(&Platform::Linux, bin).name(), "iptables");
        assert_eq!(select_backend(&Platform::Darwin, bin).name(), "pf-stub");
        assert_eq!(
            select_backend(&Platform::Other("windows".into()), bin).name(),
            "unsupported"
        );
    }
}
