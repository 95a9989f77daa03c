use std::fmt;

#[derive(Debug)]
pub enum HostError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Json {
        line: usize,
        source: serde_json::Error,
    },
    InvalidData(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Io(e) => write!(f, "I/O error: {e}"),
            HostError::Toml(e) => write!(f, "config error: {e}"),
            HostError::Json { line, source } => write!(f, "feed line {line}: {source}"),
            HostError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostError::Io(e) => Some(e),
            HostError::Toml(e) => Some(e),
            HostError::Json { source, .. } => Some(source),
            HostError::InvalidData(_) => None,
        }
    }
}

impl From<std::io::Error> for HostError {
    fn from(e: std::io::Error) -> Self {
        HostError::Io(e)
    }
}

impl From<toml::de::Error> for HostError {
    fn from(e: toml::de::Error) -> Self {
        HostError::Toml(e)
    }
}

pub type Result<T> = std::result::Result<T, HostError>;
