use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid callsign: {0}")]
    InvalidCallsign(String),

    #[error("GPS source error: {0}")]
    GpsSource(String),

    #[error("Modem error: {0}")]
    Modem(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    TomlParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
