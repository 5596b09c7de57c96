use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum VitalsError {
    #[error("config error: {0}")]
    Config(String),

    #[error("buzzer error: {0}")]
    Buzzer(String),

    #[error("frame encoding error: {0}")]
    Encode(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = VitalsError> = std::result::Result<T, E>;
