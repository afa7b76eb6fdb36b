use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures from the I/O edges of the crate (config files and exports).
///
/// The simulation itself cannot fail; nothing here is retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("chart rendering failed: {0}")]
    Chart(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_read_error_names_path() {
        let err = Error::ConfigRead {
            path: PathBuf::from("missing.toml"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("missing.toml"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn chart_error_message() {
        let err = Error::Chart("backend closed".to_string());
        assert_eq!(err.to_string(), "chart rendering failed: backend closed");
    }
}
