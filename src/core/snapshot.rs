//! Bounded, point-in-time list of process identifiers.

use crate::config::MAX_PROCESS_IDS;

/// Process identifiers reported by the OS at one instant.
///
/// Holds at most [`MAX_PROCESS_IDS`] entries. Identifiers beyond that are
/// dropped and [`is_truncated`](Self::is_truncated) reports it; the scan
/// then only covers the first `MAX_PROCESS_IDS` processes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessSnapshot {
    pids: Vec<u32>,
    truncated: bool,
}

impl ProcessSnapshot {
    /// Collect identifiers in the order the OS reported them.
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let mut ids = ids.into_iter();
        let pids: Vec<u32> = ids.by_ref().take(MAX_PROCESS_IDS).collect();
        let truncated = ids.next().is_some();
        Self { pids, truncated }
    }

    /// Mark the snapshot as possibly incomplete. Used by backends whose OS
    /// call fills a fixed buffer and cannot say how much did not fit.
    pub fn mark_truncated(&mut self) {
        self.truncated = true;
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn len(&self) -> usize {
        self.pids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.pids.iter().copied()
    }
}
