use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown entity kind: {0}")]
    UnknownKind(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
