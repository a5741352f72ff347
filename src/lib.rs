pub mod config;
pub mod core;
pub mod dispatch;
pub mod error;
pub mod launch;
pub mod platform;

pub use config::DispatchConfig;
pub use dispatch::{ShellChoice, ShellDispatcher};
pub use error::AppError;

use launch::SpawnLauncher;

/// Entry point used by the `shellhook` binary.
///
/// Resolves the configuration, starts exactly one shell and returns. Failures
/// are logged; the process exit code is not affected.
pub fn run() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("PANIC in shellhook: {info}");
        default_hook(info);
    }));

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shellhook_lib=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let config = DispatchConfig::load();
    tracing::debug!("Using {config:?}");

    let mut dispatcher = ShellDispatcher::new(config, platform::default_source(), SpawnLauncher);
    if let Err(e) = dispatcher.dispatch(&args) {
        tracing::error!("{e}");
    }
}
