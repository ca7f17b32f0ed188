//! Process lookup and termination

#[cfg(unix)]
use nix::sys::signal::{kill, Signal};
#[cfg(unix)]
use nix::unistd::Pid as NixPid;
use sysinfo::{Pid, System};

/// A pid resolved against the live process table at call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessHandle {
    pub pid: i32,
    /// Display name, if the OS reported one.
    pub name: Option<String>,
}

pub trait ProcessBackend: Send + Sync {
    /// Look up `pid`. `None` when no live process has that id.
    fn resolve(&self, pid: i32) -> Option<ProcessHandle>;

    /// Deliver a kill signal to the process.
    fn terminate(&self, handle: &ProcessHandle) -> std::io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SysinfoProcessBackend;

impl ProcessBackend for SysinfoProcessBackend {
    fn resolve(&self, pid: i32) -> Option<ProcessHandle> {
        // Zero and negative ids address process groups, never a single process.
        if pid <= 0 {
            return None;
        }

        let sys_pid = Pid::from_u32(pid as u32);
        let mut sys = System::new();
        if !sys.refresh_process(sys_pid) {
            return None;
        }

        let process = sys.process(sys_pid)?;
        let name = process.name().trim();
        Some(ProcessHandle {
            pid,
            name: if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            },
        })
    }

    #[cfg(unix)]
    fn terminate(&self, handle: &ProcessHandle) -> std::io::Result<()> {
        check_signalable(handle.pid)?;
        kill(NixPid::from_raw(handle.pid), Signal::SIGKILL).map_err(std::io::Error::from)
    }

    #[cfg(not(unix))]
    fn terminate(&self, handle: &ProcessHandle) -> std::io::Result<()> {
        check_signalable(handle.pid)?;
        let sys_pid = Pid::from_u32(handle.pid as u32);
        let mut sys = System::new();
        if !sys.refresh_process(sys_pid) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "process exited before it could be signaled",
            ));
        }

        match sys.process(sys_pid) {
            Some(process) if process.kill() => Ok(()),
            _ => Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "termination request was rejected",
            )),
        }
    }
}

/// Zero and negative ids address process groups (or every process), never one process.
fn check_signalable(pid: i32) -> std::io::Result<()> {
    if pid <= 0 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("refusing to signal non-positive pid {}", pid),
        ));
    }
    Ok(())
}
