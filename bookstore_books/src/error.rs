use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::api::{ErrorBody, ErrorPayload, ErrorResponse};
use crate::books_repository::BooksRepositoryError;

#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    /// Client-facing failure which knows the status it should be rendered with
    #[error("{status}: {payload}")]
    Expected {
        payload: ErrorPayload,
        status: StatusCode,
    },

    #[error("Unexpected error {0:#}")]
    Unexpected(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn new(payload: impl Into<ErrorPayload>, status: StatusCode) -> Self {
        Self::Expected {
            payload: payload.into(),
            status,
        }
    }

    pub fn validation(violations: Vec<String>) -> Self {
        Self::new(violations, StatusCode::BAD_REQUEST)
    }

    pub fn not_found(isbn: &str) -> Self {
        Self::new(
            format!("There is no book with an isbn '{}'", isbn),
            StatusCode::NOT_FOUND,
        )
    }

    pub fn conflict(isbn: &str) -> Self {
        Self::new(
            format!("Book with an isbn '{}' already exists", isbn),
            StatusCode::CONFLICT,
        )
    }

    /// Status carried by the error, None for unexpected failures
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ServiceError::Expected { status, .. } => Some(*status),
            ServiceError::Unexpected(_) => None,
        }
    }
}

impl From<BooksRepositoryError> for ServiceError {
    fn from(err: BooksRepositoryError) -> Self {
        match err {
            BooksRepositoryError::NotFound(isbn) => ServiceError::not_found(&isbn),
            BooksRepositoryError::AlreadyExists(isbn) => ServiceError::conflict(&isbn),
            err => ServiceError::Unexpected(err.into()),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        self.status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = match self {
            ServiceError::Expected { payload, .. } => payload.clone(),
            ServiceError::Unexpected(err) => {
                tracing::error!("Request failed {:#}", err);
                ErrorPayload::from("Internal Server Error")
            }
        };
        HttpResponse::build(status).json(ErrorResponse {
            error: ErrorBody {
                message,
                status: status.as_u16(),
            },
        })
    }
}

#[cfg(test)]
mod service_error_tests {
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    use crate::api::{ErrorPayload, ErrorResponse};
    use crate::books_repository::BooksRepositoryError;
    use crate::error::ServiceError;

    async fn render(err: ServiceError) -> (StatusCode, ErrorResponse) {
        let response = err.error_response();
        let status = response.status();
        let body = to_bytes(response.into_body())
            .await
            .expect("Failed to read body");
        (
            status,
            serde_json::from_slice(&body).expect("Body is not an error envelope"),
        )
    }

    #[actix_web::test]
    async fn test_validation_error_renders_every_violation() {
        let violations = vec![
            "instance requires property \"title\"".to_string(),
            "instance.pages is not of a type(s) integer".to_string(),
        ];
        let (status, body) = render(ServiceError::validation(violations.clone())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error.status, 400);
        assert_eq!(body.error.message, ErrorPayload::Violations(violations));
    }

    #[actix_web::test]
    async fn test_unexpected_error_defaults_to_500_without_details() {
        let err = ServiceError::from(anyhow::anyhow!("connection reset by peer"));
        assert_eq!(err.status(), None);

        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.status, 500);
        assert_eq!(
            body.error.message,
            ErrorPayload::Message("Internal Server Error".to_string())
        );
    }

    #[test]
    fn test_repository_errors_keep_their_status() {
        let not_found = ServiceError::from(BooksRepositoryError::NotFound("1".to_string()));
        assert_eq!(not_found.status(), Some(StatusCode::NOT_FOUND));

        let conflict = ServiceError::from(BooksRepositoryError::AlreadyExists("1".to_string()));
        assert_eq!(conflict.status(), Some(StatusCode::CONFLICT));
    }
}
