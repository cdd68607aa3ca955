use thiserror::Error;

pub type Result<T> = std::result::Result<T, GitrespectError>;

#[derive(Error, Debug)]
pub enum GitrespectError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{command} failed: {message}")]
    Subprocess { command: String, message: String },
    #[error("No data: {0}")]
    NoData(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Git error: {0}")]
    GitOpen(#[from] Box<gix::open::Error>),
}

impl GitrespectError {
    /// Errors that only affect one repository/author pair and can be skipped.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GitrespectError::InvalidInput(_)
                | GitrespectError::InvalidDate(_)
                | GitrespectError::Subprocess { .. }
                | GitrespectError::GitOpen(_)
        )
    }
}

impl From<gix::open::Error> for GitrespectError {
    fn from(err: gix::open::Error) -> Self {
        GitrespectError::GitOpen(Box::new(err))
    }
}
