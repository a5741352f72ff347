//! Runtime constants and the dispatcher configuration.
//!
//! Fixed limits live here as constants so they can be found in a single
//! place. The three values an installation may want to change (both shell
//! paths and the detected process name) are carried by [`DispatchConfig`],
//! which is resolved once at startup from built-in defaults, an optional
//! JSON file and environment variables, in that order.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AppError;

/// Maximum number of process identifiers inspected per scan.
/// Anything the OS reports beyond this is ignored.
pub const MAX_PROCESS_IDS: usize = 1024;

/// Argument prefix that forces the original shell.
pub const FACTORY_FLAG: &str = "/factory";

/// Module base name of the system shell.
pub const DEFAULT_TARGET_PROCESS: &str = "EXPLORER.EXE";

/// File name of the replacement shell, resolved next to our own executable.
pub const DEFAULT_REPLACEMENT_SHELL: &str = "ExplorerEx.exe";

/// Used when `%SystemRoot%` is not set.
pub const FALLBACK_ORIGINAL_SHELL: &str = r"C:\Windows\EXPLORER.EXE";

/// Config file looked up next to the running executable.
pub const CONFIG_FILE_NAME: &str = "shellhook.json";

pub const CONFIG_PATH_ENV: &str = "SHELLHOOK_CONFIG";
pub const REPLACEMENT_SHELL_ENV: &str = "SHELLHOOK_REPLACEMENT_SHELL";
pub const ORIGINAL_SHELL_ENV: &str = "SHELLHOOK_ORIGINAL_SHELL";
pub const TARGET_PROCESS_ENV: &str = "SHELLHOOK_TARGET_PROCESS";

/// Paths and names the dispatcher works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Executable launched when the system shell is already running.
    pub replacement_shell: PathBuf,
    /// Executable launched on first start or with `/factory`.
    pub original_shell: PathBuf,
    /// Module base name identifying the system shell process.
    pub target_process: String,
}

/// On-disk overlay. Every field is optional; missing keys keep the default.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    replacement_shell: Option<PathBuf>,
    original_shell: Option<PathBuf>,
    target_process: Option<String>,
}

impl DispatchConfig {
    /// Resolve the configuration for the current process.
    pub fn load() -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        Self::load_with(exe_dir.as_deref(), |key| std::env::var(key).ok())
    }

    /// Resolve the configuration against an explicit executable directory and
    /// environment lookup.
    ///
    /// A broken config file never prevents a launch: it is logged and the
    /// defaults (plus environment overrides) are used instead.
    pub fn load_with<F>(exe_dir: Option<&Path>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::defaults(exe_dir, env("SystemRoot").as_deref());

        let file = match env(CONFIG_PATH_ENV) {
            Some(path) => Some(PathBuf::from(path)),
            None => exe_dir
                .map(|dir| dir.join(CONFIG_FILE_NAME))
                .filter(|path| path.is_file()),
        };
        if let Some(path) = file {
            match read_config_file(&path) {
                Ok(overlay) => {
                    tracing::debug!("Loaded config from {}", path.display());
                    config.apply(overlay);
                }
                Err(e) => {
                    tracing::warn!("Ignoring config file {}: {e}", path.display());
                }
            }
        }

        if let Some(path) = env(REPLACEMENT_SHELL_ENV) {
            config.replacement_shell = PathBuf::from(path);
        }
        if let Some(path) = env(ORIGINAL_SHELL_ENV) {
            config.original_shell = PathBuf::from(path);
        }
        if let Some(name) = env(TARGET_PROCESS_ENV) {
            config.target_process = name;
        }

        config
    }

    /// Built-in defaults. `system_root` is the value of `%SystemRoot%`.
    pub fn defaults(exe_dir: Option<&Path>, system_root: Option<&str>) -> Self {
        let replacement_shell = match exe_dir {
            Some(dir) => dir.join(DEFAULT_REPLACEMENT_SHELL),
            None => PathBuf::from(DEFAULT_REPLACEMENT_SHELL),
        };
        let original_shell = match system_root {
            Some(root) => PathBuf::from(root).join(DEFAULT_TARGET_PROCESS),
            None => PathBuf::from(FALLBACK_ORIGINAL_SHELL),
        };
        Self {
            replacement_shell,
            original_shell,
            target_process: DEFAULT_TARGET_PROCESS.to_string(),
        }
    }

    fn apply(&mut self, overlay: ConfigFile) {
        if let Some(path) = overlay.replacement_shell {
            self.replacement_shell = path;
        }
        if let Some(path) = overlay.original_shell {
            self.original_shell = path;
        }
        if let Some(name) = overlay.target_process.filter(|n| !n.is_empty()) {
            self.target_process = name;
        }
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, AppError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
