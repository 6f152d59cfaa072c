use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    #[error("Recipe detail credential is not configured")]
    MissingCredential,

    #[error("Failed to fetch recipes: {0}")]
    Recipes(catalog::Error),

    #[error("Failed to fetch recipe detail: {0}")]
    Detail(catalog::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MalformedQuery(_) => StatusCode::BAD_REQUEST,
            AppError::Detail(e) => e
                .status()
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            AppError::MissingCredential | AppError::Recipes(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::AppError;

    fn upstream(status: u16) -> catalog::Error {
        catalog::Error::Status {
            status,
            message: "nope".to_string(),
        }
    }

    #[test]
    fn test_recipes_failure_is_internal() {
        let err = AppError::Recipes(upstream(503));
        assert_eq!(
            err.to_string(),
            "Failed to fetch recipes: upstream responded with 503: nope"
        );
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_detail_mirrors_status() {
        let response = AppError::Detail(upstream(404)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::Detail(catalog::Error::Url("x".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_malformed_query_is_bad_request() {
        let response = AppError::MalformedQuery("page".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
