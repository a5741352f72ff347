//! Scan of the process table for the system shell.

use crate::core::ShellTarget;
use crate::platform::ProcessSource;

/// Whether a process whose module base name matches `target` is running and
/// readable at the caller's privilege level.
///
/// Fails closed: if the process list cannot be obtained the answer is
/// `false`. Processes that cannot be opened or whose module name cannot be
/// read are skipped. Returns on the first match.
pub fn detect_running_shell<S>(source: &mut S, target: &ShellTarget) -> bool
where
    S: ProcessSource + ?Sized,
{
    let snapshot = match source.snapshot() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::debug!("Process enumeration failed, assuming shell not running: {e:#}");
            return false;
        }
    };
    if snapshot.is_truncated() {
        tracing::debug!(
            "Process list truncated to {} entries; later processes are not inspected",
            snapshot.len()
        );
    }

    for pid in snapshot.iter().filter(|&pid| pid != 0) {
        let Some(name) = source.module_base_name(pid) else {
            continue;
        };
        if target.matches(&name) {
            tracing::debug!("Found {} as PID {pid}", target.name());
            return true;
        }
    }

    tracing::debug!(
        "{} not found among {} processes",
        target.name(),
        snapshot.len()
    );
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_PROCESS_IDS;
    use crate::platform::fake::FakeProcessSource;

    #[test]
    fn test_detects_explorer() {
        let mut source = FakeProcessSource::with(&[
            (4, "System"),
            (612, "svchost.exe"),
            (2280, "explorer.exe"),
        ]);
        assert!(detect_running_shell(&mut source, &ShellTarget::default()));
    }

    #[test]
    fn test_detects_any_case_variant() {
        for name in ["explorer.exe", "Explorer.Exe", "EXPLORER.EXE"] {
            let mut source = FakeProcessSource::with(&[(4, name)]);
            assert!(
                detect_running_shell(&mut source, &ShellTarget::default()),
                "{name} should match"
            );
        }
    }

    #[test]
    fn test_wrong_length_names_do_not_match() {
        let mut source = FakeProcessSource::with(&[(10, "explorer.ex"), (11, "explorerr.exe")]);
        assert!(!detect_running_shell(&mut source, &ShellTarget::default()));
    }

    #[test]
    fn test_empty_process_list() {
        let mut source = FakeProcessSource::with(&[]);
        assert!(!detect_running_shell(&mut source, &ShellTarget::default()));
    }

    #[test]
    fn test_enumeration_failure_fails_closed() {
        let mut source = FakeProcessSource::failing();
        assert!(!detect_running_shell(&mut source, &ShellTarget::default()));
        assert_eq!(source.snapshot_calls, 1);
    }

    #[test]
    fn test_unopenable_processes_are_skipped() {
        let mut source = FakeProcessSource::with(&[
            (500, "explorer.exe"),
            (600, "notepad.exe"),
            (700, "EXPLORER.EXE"),
        ]);
        source.unopenable.insert(500);
        assert!(detect_running_shell(&mut source, &ShellTarget::default()));

        source.unopenable.insert(700);
        assert!(!detect_running_shell(&mut source, &ShellTarget::default()));
    }

    #[test]
    fn test_pid_zero_is_never_inspected() {
        let mut source = FakeProcessSource::with(&[(0, "explorer.exe")]);
        assert!(!detect_running_shell(&mut source, &ShellTarget::default()));
        assert_eq!(source.lookups.get(), 0);
    }

    #[test]
    fn test_stops_at_first_match() {
        let mut source = FakeProcessSource::with(&[
            (4, "System"),
            (8, "explorer.exe"),
            (12, "notepad.exe"),
            (16, "explorer.exe"),
        ]);
        assert!(detect_running_shell(&mut source, &ShellTarget::default()));
        assert_eq!(source.lookups.get(), 2);
    }

    #[test]
    fn test_processes_beyond_capacity_are_not_inspected() {
        let mut processes: Vec<(u32, String)> = (1..=MAX_PROCESS_IDS as u32)
            .map(|pid| (pid, "svchost.exe".to_string()))
            .collect();
        processes.push((99_999, "explorer.exe".to_string()));
        let mut source = FakeProcessSource {
            processes,
            ..FakeProcessSource::default()
        };

        assert!(!detect_running_shell(&mut source, &ShellTarget::default()));
        assert_eq!(source.lookups.get(), MAX_PROCESS_IDS);
    }

    #[test]
    fn test_custom_target() {
        let mut source = FakeProcessSource::with(&[(4, "explorer.exe"), (9, "Desktop.exe")]);
        assert!(detect_running_shell(&mut source, &ShellTarget::new("desktop.exe")));
    }

    #[test]
    fn test_works_through_boxed_source() {
        let mut source: Box<dyn ProcessSource> =
            Box::new(FakeProcessSource::with(&[(4, "explorer.exe")]));
        assert!(detect_running_shell(&mut source, &ShellTarget::default()));
    }
}
