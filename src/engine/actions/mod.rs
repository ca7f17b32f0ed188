//! Action backends (system modifications)

pub mod command;
pub mod firewall;
pub mod process;

pub use command::{CommandLine, CommandOutput, CommandRunner, SystemCommandRunner};
pub use firewall::{
    select_backend, FirewallBackend, IptablesBackend, PfStubBackend, UnsupportedBackend,
};
pub use process::{ProcessBackend, ProcessHandle, SysinfoProcessBackend};
