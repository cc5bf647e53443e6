// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Engine(EngineError),
}

/// Failures raised while building or driving a playback engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The media source has no usable duration.
    InvalidSource(String),

    /// The engine could not be constructed with the requested options.
    CreationFailed(String),
}

impl EngineError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            EngineError::InvalidSource(_) => "error-engine-invalid-source",
            EngineError::CreationFailed(_) => "error-engine-creation-failed",
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidSource(msg) => write!(f, "Invalid media source: {}", msg),
            EngineError::CreationFailed(msg) => write!(f, "Engine creation failed: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Engine(e) => write!(f, "Engine Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<EngineError> for Error {
    fn from(err: EngineError) -> Self {
        Error::Engine(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
