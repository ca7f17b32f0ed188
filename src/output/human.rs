//! Human-readable output formatting

use crate::output::report::Report;

pub fn format_human(report: &Report) -> String {
    match report {
        Report::Action(action) => {
            let outcome = match &action.error {
                None => "ok".to_string(),
                Some(err) => format!("FAILED ({})", err),
            };
            format!(
                "Remediation\n\
                 -----------\n\
                 Operation: {}\n\
                 Target:    {}\n\
                 Mode:      {}\n\
                 Platform:  {}\n\
                 Result:    {}",
                action.operation, action.target, action.mode, action.platform, outcome
            )
        }
        Report::Status(status) => {
            format!(
                "Actuator Status\n\
                 ---------------\n\
                 Mode:     {}\n\
                 Platform: {}\n\
                 Firewall: {}",
                status.mode, status.platform, status.firewall_backend
            )
        }
    }
}
