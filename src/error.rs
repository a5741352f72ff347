//! Unified error type for the dispatcher.
//!
//! `AppError` is returned by configuration loading and shell launching.
//! Process enumeration never produces one: backends report `anyhow::Error`,
//! which the detector folds into "shell not detected".

/// Application-level error.
///
/// Each variant maps to a distinct failure domain and carries a
/// human-readable description.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The selected shell executable could not be started.
    #[error("{0}")]
    Launch(String),

    /// The configuration file exists but could not be parsed.
    #[error("{0}")]
    Config(String),

    /// I/O and OS-level errors (filesystem, environment).
    #[error("{0}")]
    Io(String),
}

impl AppError {
    /// Returns the error kind as a string matching the variant name.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Launch(_) => "Launch",
            AppError::Config(_) => "Config",
            AppError::Io(_) => "Io",
        }
    }
}

// ---- From implementations for ergonomic error conversion ----

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
