use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
