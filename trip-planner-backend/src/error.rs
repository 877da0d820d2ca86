//! Errors surfaced to HTTP clients.

use crate::catalog::CatalogError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("City '{name}' has invalid coordinates ({latitude}, {longitude}).")]
    InvalidCoordinates {
        name: String,
        latitude: f64,
        longitude: f64,
    },
    #[error("{0}")]
    NotFound(String),
    #[error("Internal server error.")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CityNotFound(_) | CatalogError::CityNameNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            CatalogError::Csv(_) | CatalogError::InvalidRow { .. } => ApiError::Internal(err.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::InvalidCoordinates { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(detail) = self {
            error!(%detail, "Request failed");
        }

        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
mod error_tests {
    use super::ApiError;
    use crate::catalog::CatalogError;
    use actix_web::{body::to_bytes, http::StatusCode, ResponseError};

    #[test]
    fn test_catalog_errors_map_to_status() {
        let err: ApiError = CatalogError::CityNotFound(7).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err: ApiError = CatalogError::CityNameNotFound("Oz".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "City 'Oz' not found.");

        let err: ApiError = CatalogError::InvalidRow {
            file: "cities.csv".into(),
            line: 3,
            reason: "bad".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_error_body_is_json() {
        let err = ApiError::InvalidCoordinates {
            name: "Nowhere".to_string(),
            latitude: 95.0,
            longitude: 0.0,
        };
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "City 'Nowhere' has invalid coordinates (95, 0).");
    }

    #[actix_web::test]
    async fn test_internal_error_hides_detail() {
        let resp = ApiError::Internal("disk on fire".to_string()).error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Internal server error.");
    }
}
