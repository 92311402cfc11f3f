pub mod error;
pub mod health;
pub mod observation;
pub mod passes;
pub mod satellites;

use chrono::{DateTime, Utc};

use error::{ApiError, ApiResult};

pub(crate) fn parse_timestamp(field: &str, value: Option<&str>) -> ApiResult<DateTime<Utc>> {
    match value {
        None => Ok(Utc::now()),
        Some(s) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| ApiError::Validation(format!("{field}: {e}"))),
    }
}
