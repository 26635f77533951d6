use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;

/// Every failure a product request can end in.
///
/// Errors are raised where they are detected and travel up with `?`; the
/// actix boundary turns them into a status code and a JSON body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Invalid sortBy: {0}")]
    InvalidSortSpec(String),

    #[error("Invalid paging parameters: {0}")]
    InvalidPageParams(String),

    #[error("Database error: {0}")]
    Store(#[from] DbErr),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::InvalidSortSpec(_)
            | Self::InvalidPageParams(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Self::Store(_) | Self::Internal(_) = self {
            tracing::error!("{self}");
        }

        let body = match self {
            Self::Validation(details) => serde_json::json!({
                "error": "Validation failed",
                "details": details,
            }),
            other => serde_json::json!({
                "error": other.to_string(),
            }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        assert_eq!(
            ApiError::validation("price: must be greater than 0").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidSortSpec("missing field".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidPageParams("page".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn store_errors_map_to_500() {
        let err = ApiError::from(DbErr::Custom("connection reset".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn validation_message_joins_details() {
        let err = ApiError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "Validation failed: a; b");
    }
}
