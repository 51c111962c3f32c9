use std::path::PathBuf;

use thiserror::Error;

/// Failure to load [`EllipsisOptions`](crate::EllipsisOptions) from TOML.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read options from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid options: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A resize-detection strategy name that is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no such resize detection strategy: `{0}`")]
pub struct UnknownStrategy(pub String);
