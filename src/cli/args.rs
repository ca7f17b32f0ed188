//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ActuatorConfig;
use crate::engine::actions::firewall::DEFAULT_IPTABLES_BIN;

#[derive(Parser)]
#[command(name = "remediate")]
#[command(author, version, about = "Terminate processes and block outbound traffic on this host", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: SubCommand,

    /// Enable dry-run mode (log what would happen without executing)
    #[arg(long, global = true, env = "REMEDIATE_DRY_RUN")]
    pub dry_run: bool,

    /// Packet filter tool used to block traffic on linux
    #[arg(long, global = true, env = "REMEDIATE_IPTABLES_BIN", default_value = DEFAULT_IPTABLES_BIN)]
    pub iptables_bin: PathBuf,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Args {
    pub fn config(&self) -> ActuatorConfig {
        ActuatorConfig {
            dry_run: self.dry_run,
            iptables_bin: self.iptables_bin.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum SubCommand {
    /// Terminate a process
    Kill {
        /// Process identifier
        #[arg(allow_hyphen_values = true)]
        pid: i32,
    },

    /// Drop outbound traffic to an address
    Block {
        /// Destination address (passed to the firewall as-is)
        ip: String,
    },

    /// Remove one outbound drop rule for an address
    Unblock {
        /// Destination address (passed to the firewall as-is)
        ip: String,
    },

    /// Show mode, platform and firewall backend
    Status,
}
