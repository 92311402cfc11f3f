use thiserror::Error;

use crate::orbit::PropagationError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackError {
    #[error(transparent)]
    Propagation(#[from] PropagationError),
    #[error("invalid request range: {0}")]
    InvalidRequestRange(String),
}
