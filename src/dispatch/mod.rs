//! The shell dispatcher: decide once, launch once.
//!
//! - `logic`: pure argument classification and branch selection
//! - [`ShellDispatcher`]: ties configuration, process source and launcher together

mod logic;

use std::path::Path;

pub use logic::{choose_shell, parse_invocation, Invocation, ShellChoice};

use crate::config::DispatchConfig;
use crate::core::{detect_running_shell, ShellTarget};
use crate::error::AppError;
use crate::launch::Launcher;
use crate::platform::ProcessSource;

/// Chooses between the replacement and the original shell and starts it.
pub struct ShellDispatcher<S, L> {
    config: DispatchConfig,
    target: ShellTarget,
    source: S,
    launcher: L,
}

impl<S: ProcessSource, L: Launcher> ShellDispatcher<S, L> {
    pub fn new(config: DispatchConfig, source: S, launcher: L) -> Self {
        let target = ShellTarget::new(config.target_process.clone());
        Self {
            config,
            target,
            source,
            launcher,
        }
    }

    /// Whether the configured system shell is currently running.
    pub fn detect_running_shell(&mut self) -> bool {
        detect_running_shell(&mut self.source, &self.target)
    }

    /// Handle one invocation. `args` excludes the program name.
    ///
    /// Returns the branch taken. The choice is made even when the launch
    /// fails; the error then carries the path that could not be started.
    pub fn dispatch<A: AsRef<str>>(&mut self, args: &[A]) -> Result<ShellChoice, AppError> {
        let invocation = parse_invocation(args);
        let choice = choose_shell(invocation, || self.detect_running_shell());
        tracing::info!("{invocation:?} -> {choice:?}");

        self.launcher.launch(self.shell_path(choice))?;
        Ok(choice)
    }

    fn shell_path(&self, choice: ShellChoice) -> &Path {
        match choice {
            ShellChoice::Replacement => &self.config.replacement_shell,
            ShellChoice::Original => &self.config.original_shell,
        }
    }
}
