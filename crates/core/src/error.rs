use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Archive error: {0}")]
    Archive(String),
    #[error("Registry error: {0}")]
    Registry(String),
}

impl From<cljscope_plugin::BoxError> for ScopeError {
    fn from(err: cljscope_plugin::BoxError) -> Self {
        ScopeError::Archive(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScopeError>;
