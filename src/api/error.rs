use crate::api::query::{ValidationErrors, ValidationIssue};
use crate::error::RainfallError;
use crate::types::lat_lon::CoordinateError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

const UPSTREAM_MESSAGE: &str = "Weather archive is unavailable, please try again later";
const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// Everything a handler can fail with, already classified by HTTP status.
///
/// This is the only place library errors are turned into responses. Bodies never
/// carry internal error text; that goes to the log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid query parameters: {0}")]
    Validation(ValidationErrors),

    #[error("Malformed query string: {0}")]
    MalformedQuery(String),

    #[error("Upstream failure: {0}")]
    Upstream(#[source] RainfallError),

    #[error("Internal failure: {0}")]
    Internal(#[source] RainfallError),

    #[error("Not found")]
    NotFound,
}

#[derive(Serialize)]
struct MessageBody {
    detail: &'static str,
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<RainfallError> for ApiError {
    fn from(error: RainfallError) -> Self {
        if let RainfallError::InvalidCoordinate(e) = &error {
            let field = match e {
                CoordinateError::LatitudeOutOfRange(_) => "lat",
                CoordinateError::LongitudeOutOfRange(_) => "lon",
            };
            return ApiError::Validation(ValidationErrors {
                detail: vec![ValidationIssue {
                    kind: "value_error",
                    loc: ["query", field],
                    msg: e.to_string(),
                    input: None,
                }],
            });
        }
        if matches!(&error, RainfallError::Archive(e) if e.is_upstream()) {
            ApiError::Upstream(error)
        } else {
            ApiError::Internal(error)
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedQuery(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            ApiError::Validation(errors) => response.json(errors),
            ApiError::MalformedQuery(message) => response.json(ValidationErrors {
                detail: vec![ValidationIssue {
                    kind: "query_parsing",
                    loc: ["query", ""],
                    msg: message.clone(),
                    input: None,
                }],
            }),
            ApiError::Upstream(_) => response.json(MessageBody {
                detail: UPSTREAM_MESSAGE,
            }),
            ApiError::Internal(_) => response.json(MessageBody {
                detail: INTERNAL_MESSAGE,
            }),
            ApiError::NotFound => response.json(MessageBody {
                detail: "Not Found",
            }),
        }
    }
}
