use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum KvError {
    #[error("sled error: {0}")]
    Sled(String),

    #[error("IO Error: {0}")]
    IoError(String),
}

impl From<sled::Error> for KvError {
    fn from(value: sled::Error) -> Self {
        match value {
            sled::Error::Io(e) => Self::IoError(e.to_string()),
            other => Self::Sled(format!("{other:?}")),
        }
    }
}

pub type KvResult<T> = Result<T, KvError>;
