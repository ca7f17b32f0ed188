//! Remediation engine: the actuator and the OS backends it drives

pub mod actions;
pub mod actuator;

pub use actuator::{Actuator, Intent};
