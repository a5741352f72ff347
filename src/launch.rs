//! Fire-and-forget process launch.
//!
//! The dispatcher's job ends once the chosen shell has been started: the
//! child is never waited on and its exit status is never read.

use std::path::Path;
use std::process::Command;

use crate::error::AppError;

/// Starts an executable without waiting for it.
pub trait Launcher {
    fn launch(&self, program: &Path) -> Result<(), AppError>;
}

/// Launcher backed by `std::process::Command::spawn`.
#[derive(Debug, Default)]
pub struct SpawnLauncher;

impl Launcher for SpawnLauncher {
    fn launch(&self, program: &Path) -> Result<(), AppError> {
        let child = Command::new(program).spawn().map_err(|e| {
            AppError::Launch(format!("Failed to start {}: {e}", program.display()))
        })?;
        tracing::info!("Started {} (PID {})", program.display(), child.id());
        // Dropping `Child` neither waits for nor kills the process.
        Ok(())
    }
}
