use thiserror::Error;

/// Failure talking to the task store. Nothing here is retried; callers decide
/// how to surface it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not reach the task store: {0}")]
    Network(String),
    #[error("task store responded with HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("task store sent an unexpected payload: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, StoreError::Network(_))
    }
}

/// Outcome of a board operation that did not go through.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("task title must not be empty")]
    EmptyTitle,
    #[error(transparent)]
    Store(#[from] StoreError),
}
