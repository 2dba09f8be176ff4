//! Handler errors and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use folio_common::FolioError;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error(transparent)]
    Folio(#[from] FolioError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebError::UnknownSection(_) => StatusCode::NOT_FOUND,
            WebError::Folio(FolioError::NotFound(_)) => StatusCode::NOT_FOUND,
            WebError::Folio(FolioError::Security(_)) => StatusCode::FORBIDDEN,
            WebError::Template(_) | WebError::Folio(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = Json(serde_json::json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (WebError::UnknownSection("blog".into()), StatusCode::NOT_FOUND),
            (WebError::Folio(FolioError::NotFound("x".into())), StatusCode::NOT_FOUND),
            (WebError::Folio(FolioError::Security("x".into())), StatusCode::FORBIDDEN),
            (WebError::Folio(FolioError::Config("x".into())), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
