use axum::http::StatusCode;
use thiserror::Error;

/// Reasons a mutator refuses an entry. Nothing is written when one is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Blank(&'static str),

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("id '{0}' is already in use")]
    DuplicateId(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mood '{0}'")]
pub struct UnknownMood(pub String);

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on slot {slot}: {source}")]
    Io {
        slot: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error on slot {slot}: {source}")]
    Serialization {
        slot: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid entry: {0}")]
    Validation(#[from] ValidationError),

    /// The in-memory change stands; only the write-through failed.
    #[error("failed to persist: {0}")]
    Storage(#[from] StorageError),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(err) => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            StoreError::Storage(err) => Self::internal(err),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_unprocessable() {
        let err: AppError = StoreError::from(ValidationError::Blank("meal name")).into();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.message, "meal name must not be empty");
    }

    #[test]
    fn storage_failure_maps_to_internal_error() {
        let err: AppError = StoreError::from(StorageError::Io {
            slot: "healthApp.moodEntries".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
        .into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_positive_message_names_field() {
        let err = ValidationError::NotPositive {
            field: "calories",
            value: 0.0,
        };
        assert_eq!(err.to_string(), "calories must be positive, got 0");
    }
}
