use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use smsledger_core::errors::{DatabaseError, Error as CoreError};
use smsledger_core::extraction::ExtractionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => match e {
                CoreError::Validation(_) => StatusCode::BAD_REQUEST,
                CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
                CoreError::Database(DatabaseError::UniqueViolation(_)) => StatusCode::CONFLICT,
                CoreError::Extraction(ExtractionError::Timeout { .. }) => {
                    StatusCode::GATEWAY_TIMEOUT
                }
                CoreError::Extraction(_) => StatusCode::BAD_GATEWAY,
                CoreError::Sanitization(_) | CoreError::Assembly(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use smsledger_core::errors::ValidationError;
    use smsledger_core::transactions::{AssemblyError, SanitizationError};

    #[test]
    fn test_status_mapping() {
        let cases: Vec<(CoreError, StatusCode)> = vec![
            (
                ValidationError::MissingField("message".into()).into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                DatabaseError::NotFound("user".into()).into(),
                StatusCode::NOT_FOUND,
            ),
            (
                ExtractionError::Timeout { millis: 30_000 }.into(),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                ExtractionError::transport("refused").into(),
                StatusCode::BAD_GATEWAY,
            ),
            (
                SanitizationError {
                    message: "eof".into(),
                    cleaned: "{".into(),
                }
                .into(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AssemblyError::Missing { field: "amount" }.into(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                CoreError::Unexpected("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }
}
