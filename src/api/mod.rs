//! HTTP surface of the service.

pub mod error;
pub mod handlers;
pub mod query;

use crate::api::error::ApiError;
use actix_web::web;

/// Registers the rainfall routes and the query error handler.
///
/// The caller provides the shared `web::Data<RainfallService>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::MalformedQuery(err.to_string()).into()
    }))
    .route(
        "/annual-rainfall",
        web::get().to(handlers::annual_rainfall),
    );
}
