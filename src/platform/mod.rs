//! Platform-specific process table access.
//!
//! Each platform implements [`ProcessSource`]:
//! - Windows: psapi `EnumProcesses` + first-module base name (`win_psapi`)
//! - Everything else: the `sysinfo` process table (`sysinfo_backend`)

#[cfg(target_os = "windows")]
pub mod win_psapi;

pub mod sysinfo_backend;

#[cfg(test)]
pub(crate) mod fake;

use crate::core::ProcessSnapshot;

/// Read-only view of the OS process table.
pub trait ProcessSource {
    /// List the identifiers of running processes, bounded to
    /// [`MAX_PROCESS_IDS`](crate::config::MAX_PROCESS_IDS).
    fn snapshot(&mut self) -> anyhow::Result<ProcessSnapshot>;

    /// Base file name of the first module loaded in `pid`, or `None` when the
    /// process cannot be opened or its modules cannot be read.
    ///
    /// Any OS handle opened for the lookup is closed before returning.
    fn module_base_name(&self, pid: u32) -> Option<String>;
}

impl<S: ProcessSource + ?Sized> ProcessSource for Box<S> {
    fn snapshot(&mut self) -> anyhow::Result<ProcessSnapshot> {
        (**self).snapshot()
    }

    fn module_base_name(&self, pid: u32) -> Option<String> {
        (**self).module_base_name(pid)
    }
}

/// The native source for the platform this binary was built for.
pub fn default_source() -> Box<dyn ProcessSource> {
    #[cfg(target_os = "windows")]
    {
        Box::new(win_psapi::PsapiSource::new())
    }

    #[cfg(not(target_os = "windows"))]
    {
        Box::new(sysinfo_backend::SysinfoSource::new())
    }
}
