//! Portable process source using the `sysinfo` crate.
//!
//! Used on every non-Windows target. The executable image path stands in for
//! the first loaded module; its file name is the module base name. Processes
//! whose executable path is unreadable (other users' processes, kernel
//! threads) yield `None`, the same as an access-denied `OpenProcess`.

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};

use crate::core::ProcessSnapshot;

use super::ProcessSource;

pub struct SysinfoSource {
    system: System,
}

impl SysinfoSource {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSource for SysinfoSource {
    fn snapshot(&mut self) -> anyhow::Result<ProcessSnapshot> {
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::new().with_exe(UpdateKind::OnlyIfNotSet),
        );

        // On Linux the table also lists every thread as its own entry.
        let mut pids: Vec<u32> = self
            .system
            .processes()
            .iter()
            .filter(|(_, process)| process.thread_kind().is_none())
            .map(|(pid, _)| pid.as_u32())
            .collect();
        if pids.is_empty() {
            anyhow::bail!("process table is empty or unreadable");
        }
        pids.sort_unstable();
        Ok(ProcessSnapshot::from_ids(pids))
    }

    fn module_base_name(&self, pid: u32) -> Option<String> {
        let Some(process) = self.system.process(Pid::from_u32(pid)) else {
            tracing::trace!("PID {pid} exited before inspection");
            return None;
        };
        let Some(exe) = process.exe() else {
            tracing::trace!("Executable path of PID {pid} is not readable");
            return None;
        };
        exe.file_name().map(|name| name.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_lists_processes() {
        let mut source = SysinfoSource::new();
        let snapshot = source.snapshot().unwrap();
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_own_module_base_name_is_test_binary() {
        let mut source = SysinfoSource::new();
        source.snapshot().unwrap();

        let own = std::env::current_exe().unwrap();
        let expected = own.file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(source.module_base_name(std::process::id()), Some(expected));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_snapshot_excludes_threads() {
        let (release, wait) = std::sync::mpsc::channel::<()>();
        let worker = std::thread::spawn(move || {
            let _ = wait.recv();
        });

        let own = std::process::id();
        let tids: Vec<u32> = std::fs::read_dir("/proc/self/task")
            .unwrap()
            .filter_map(|entry| entry.ok()?.file_name().to_str()?.parse().ok())
            .filter(|&tid| tid != own)
            .collect();
        assert!(!tids.is_empty());

        let snapshot = SysinfoSource::new().snapshot().unwrap();
        let listed: Vec<u32> = tids
            .iter()
            .copied()
            .filter(|tid| snapshot.iter().any(|pid| pid == *tid))
            .collect();

        drop(release);
        worker.join().unwrap();

        assert!(listed.is_empty(), "thread IDs {listed:?} listed as processes");
    }

    #[test]
    fn test_unknown_pid_yields_none() {
        let mut source = SysinfoSource::new();
        source.snapshot().unwrap();
        assert_eq!(source.module_base_name(u32::MAX), None);
    }

    #[test]
    fn test_name_lookup_before_snapshot_yields_none() {
        let source = SysinfoSource::new();
        assert_eq!(source.module_base_name(std::process::id()), None);
    }
}
