//! Core logic: shell identification and the process scan.
//!
//! - [`ShellTarget`] — module base name matching
//! - [`ProcessSnapshot`] — bounded PID list taken from the OS
//! - [`detect_running_shell`] — the fail-closed scan over a
//!   [`ProcessSource`](crate::platform::ProcessSource)

pub mod detector;
pub mod snapshot;
pub mod target;

pub use detector::detect_running_shell;
pub use snapshot::ProcessSnapshot;
pub use target::ShellTarget;
