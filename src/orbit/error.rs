use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropagationError {
    #[error("malformed element set: {0}")]
    MalformedElementSet(String),
    #[error("orbit decayed {minutes_since_epoch:.1} min from epoch: {reason}")]
    OrbitDecayed {
        minutes_since_epoch: f64,
        reason: String,
    },
}
