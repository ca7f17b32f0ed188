//! Remediate - host-side remediation actuator
//!
//! The response layer of a detection platform decides *when* to act; this
//! crate performs the action on the local host: terminating a process, or
//! blocking and unblocking outbound traffic to an address.
//!
//! # Example
//!
//! ```no_run
//! use remediate::Actuator;
//!
//! let actuator = Actuator::new(true);
//! actuator.kill_process(4242).unwrap();
//! actuator.block_ip("10.0.0.5").unwrap();
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod mode;
pub mod output;
pub mod platform;

pub use config::ActuatorConfig;
pub use engine::{Actuator, Intent};
pub use error::{RemediateError, Result};
pub use mode::RemediationMode;
pub use output::{format_output, OutputFormat};
pub use platform::Platform;
