//! In-memory process table for unit tests.

use std::cell::Cell;
use std::collections::HashSet;

use crate::core::ProcessSnapshot;

use super::ProcessSource;

#[derive(Debug, Default)]
pub struct FakeProcessSource {
    /// `(pid, module base name)` in the order the "OS" reports them.
    pub processes: Vec<(u32, String)>,
    /// PIDs whose open fails (access denied / exited mid-scan).
    pub unopenable: HashSet<u32>,
    /// When set, `snapshot` fails as if the process list were unavailable.
    pub enumeration_fails: bool,
    pub snapshot_calls: usize,
    pub lookups: Cell<usize>,
}

impl FakeProcessSource {
    pub fn with(processes: &[(u32, &str)]) -> Self {
        Self {
            processes: processes
                .iter()
                .map(|(pid, name)| (*pid, name.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            enumeration_fails: true,
            ..Self::default()
        }
    }
}

impl ProcessSource for FakeProcessSource {
    fn snapshot(&mut self) -> anyhow::Result<ProcessSnapshot> {
        self.snapshot_calls += 1;
        if self.enumeration_fails {
            anyhow::bail!("EnumProcesses failed: access denied");
        }
        Ok(ProcessSnapshot::from_ids(
            self.processes.iter().map(|(pid, _)| *pid),
        ))
    }

    fn module_base_name(&self, pid: u32) -> Option<String> {
        self.lookups.set(self.lookups.get() + 1);
        if self.unopenable.contains(&pid) {
            return None;
        }
        self.processes
            .iter()
            .find(|(p, _)| *p == pid)
            .map(|(_, name)| name.clone())
    }
}
