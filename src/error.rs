use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StageError {
    #[error("{0}")]
    Message(String),
    #[error("{0}")]
    Inventory(InventoryError),
    #[error("{0}")]
    Mount(MountError),
    #[error("{0}")]
    Config(ConfigError),
    #[error("{0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("inventory file {} not found", .0.display())]
    Missing(PathBuf),
    #[error("inventory line {line}: expected 3 fields (pattern;mask;targetDir), got {fields}")]
    Malformed { line: usize, fields: usize },
}

#[derive(Debug, Error)]
pub enum MountError {
    #[error("mount remote share {share} at {}: {reason}", .mountpoint.display())]
    RemoteShare {
        share: String,
        mountpoint: PathBuf,
        reason: String,
    },
    #[error("{0}")]
    Command(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parse config: {0}")]
    Parse(String),
    #[error("{0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, StageError>;

impl StageError {
    pub fn message(msg: impl Into<String>) -> Self {
        StageError::Message(msg.into())
    }
}

impl From<InventoryError> for StageError {
    fn from(err: InventoryError) -> Self {
        StageError::Inventory(err)
    }
}

impl From<MountError> for StageError {
    fn from(err: MountError) -> Self {
        StageError::Mount(err)
    }
}

impl From<ConfigError> for StageError {
    fn from(err: ConfigError) -> Self {
        StageError::Config(err)
    }
}
