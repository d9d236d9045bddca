#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] IOError),

    #[error("JSON serialization error: {0}")]
    JSON(#[from] JSONError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure to fetch one identifier. Never fatal to the run.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("team {id} request failed: {source}")]
    Transport {
        id: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("team {id} returned a malformed body: {source}")]
    Decode {
        id: u32,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn id(&self) -> u32 {
        match self {
            FetchError::Transport { id, .. } | FetchError::Decode { id, .. } => *id,
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("{source} ({})", .file.display())]
pub struct IOError {
    file: std::path::PathBuf,
    #[source]
    source: std::io::Error,
}

impl IOError {
    pub fn new(file: std::path::PathBuf, source: std::io::Error) -> Self {
        Self { file, source }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("{source}{}", .file.as_ref().map(|f| format!(" ({})", f.display())).unwrap_or_default())]
pub struct JSONError {
    file: Option<std::path::PathBuf>,
    #[source]
    source: serde_json::Error,
}

impl JSONError {
    pub fn new(file: Option<std::path::PathBuf>, source: serde_json::Error) -> Self {
        Self { file, source }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("invalid {field}: {reason}")]
pub struct ConfigError {
    field: &'static str,
    reason: String,
}

impl ConfigError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}
