//! Remediate CLI - run one remediation action against this host

use std::io::{IsTerminal, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use remediate::cli::{Args, SubCommand};
use remediate::output::{ActionReport, Report, StatusReport};
use remediate::{format_output, Actuator, OutputFormat};

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

/// Returns whether the requested action succeeded.
fn run(args: Args) -> Result<bool> {
    let actuator = Actuator::from_config(&args.config());
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    let report = match &args.command {
        SubCommand::Kill { pid } => {
            let outcome = actuator.kill_process(*pid);
            Report::Action(ActionReport::new(&actuator, "kill_process", pid, &outcome))
        }
        SubCommand::Block { ip } => {
            let outcome = actuator.block_ip(ip);
            Report::Action(ActionReport::new(&actuator, "block_ip", ip, &outcome))
        }
        SubCommand::Unblock { ip } => {
            let outcome = actuator.unblock_ip(ip);
            Report::Action(ActionReport::new(&actuator, "unblock_ip", ip, &outcome))
        }
        SubCommand::Status => Report::Status(StatusReport::new(&actuator)),
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", format_output(&report, &format)).context("failed to write report")?;
    Ok(report.succeeded())
}
