//! Windows process enumeration through the Process Status API.
//!
//! Wraps `EnumProcesses`, `OpenProcess`, `EnumProcessModules` and
//! `GetModuleBaseNameW`. The module base name of a process's first module is
//! the file name of its executable image.

use crate::config::MAX_PROCESS_IDS;
use crate::core::ProcessSnapshot;

use super::ProcessSource;

pub const PROCESS_QUERY_INFORMATION: u32 = 0x0400;
pub const PROCESS_VM_READ: u32 = 0x0010;
pub const MAX_PATH: usize = 260;

/// Process source backed by psapi. Stateless; every call hits the OS.
#[derive(Debug, Default)]
pub struct PsapiSource;

impl PsapiSource {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessSource for PsapiSource {
    fn snapshot(&mut self) -> anyhow::Result<ProcessSnapshot> {
        let mut pids = [0u32; MAX_PROCESS_IDS];
        let mut bytes_returned: u32 = 0;
        let ok = unsafe {
            win_psapi_api::EnumProcesses(
                pids.as_mut_ptr(),
                std::mem::size_of_val(&pids) as u32,
                &mut bytes_returned,
            )
        };
        if ok == 0 {
            anyhow::bail!(
                "EnumProcesses failed: {}",
                std::io::Error::last_os_error()
            );
        }

        let count = (bytes_returned as usize / std::mem::size_of::<u32>()).min(MAX_PROCESS_IDS);
        let mut snapshot = ProcessSnapshot::from_ids(pids[..count].iter().copied());
        // EnumProcesses cannot report how many entries did not fit; a full
        // buffer is the only hint.
        if count == MAX_PROCESS_IDS {
            snapshot.mark_truncated();
        }
        Ok(snapshot)
    }

    fn module_base_name(&self, pid: u32) -> Option<String> {
        let process = ProcessHandle::open(pid)?;

        let mut module: usize = 0;
        let mut needed: u32 = 0;
        let ok = unsafe {
            win_psapi_api::EnumProcessModules(
                process.raw(),
                &mut module,
                std::mem::size_of::<usize>() as u32,
                &mut needed,
            )
        };
        if ok == 0 {
            tracing::trace!("EnumProcessModules failed for PID {pid}");
            return None;
        }

        let mut name = [0u16; MAX_PATH];
        let len = unsafe {
            win_psapi_api::GetModuleBaseNameW(
                process.raw(),
                module,
                name.as_mut_ptr(),
                MAX_PATH as u32,
            )
        } as usize;
        if len == 0 {
            tracing::trace!("GetModuleBaseNameW failed for PID {pid}");
            return None;
        }

        Some(String::from_utf16_lossy(&name[..len.min(MAX_PATH)]))
    }
}

/// Owned process handle, closed on drop.
struct ProcessHandle(usize);

impl ProcessHandle {
    /// Open `pid` for query + read access. `None` when access is denied or the
    /// process has already exited.
    fn open(pid: u32) -> Option<Self> {
        let handle = unsafe {
            win_psapi_api::OpenProcess(PROCESS_QUERY_INFORMATION | PROCESS_VM_READ, 0, pid)
        };
        if handle == 0 {
            tracing::trace!("OpenProcess failed for PID {pid}");
            return None;
        }
        Some(Self(handle))
    }

    fn raw(&self) -> usize {
        self.0
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        unsafe {
            win_psapi_api::CloseHandle(self.0);
        }
    }
}

// ---------------------------------------------------------------------------
// Windows FFI for psapi / kernel32
// ---------------------------------------------------------------------------

#[allow(non_snake_case)]
mod win_psapi_api {
    #[link(name = "psapi")]
    extern "system" {
        pub fn EnumProcesses(lpidProcess: *mut u32, cb: u32, lpcbNeeded: *mut u32) -> i32;
        pub fn EnumProcessModules(
            hProcess: usize,
            lphModule: *mut usize,
            cb: u32,
            lpcbNeeded: *mut u32,
        ) -> i32;
        pub fn GetModuleBaseNameW(
            hProcess: usize,
            hModule: usize,
            lpBaseName: *mut u16,
            nSize: u32,
        ) -> u32;
    }

    #[link(name = "kernel32")]
    extern "system" {
        pub fn OpenProcess(dwDesiredAccess: u32, bInheritHandle: i32, dwProcessId: u32) -> usize;
        pub fn CloseHandle(hObject: usize) -> i32;
    }
}
