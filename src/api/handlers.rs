use crate::api::error::ApiError;
use crate::api::query::RainfallQuery;
use crate::rainfall::RainfallService;
use actix_web::{web, HttpResponse};
use log::{error, info, warn};

/// `GET /annual-rainfall?lat=<float>&lon=<float>`
///
/// Validates the coordinates, fetches the year of daily precipitation and
/// answers with the rounded total. Invalid input is rejected before any
/// upstream request is made.
pub async fn annual_rainfall(
    service: web::Data<RainfallService>,
    query: web::Query<RainfallQuery>,
) -> Result<HttpResponse, ApiError> {
    let location = query.location().map_err(|errors| {
        warn!("Rejected rainfall query: {}", errors);
        ApiError::from(errors)
    })?;

    info!(
        "Annual rainfall requested for ({}, {})",
        location.latitude(),
        location.longitude()
    );
    let result = service.annual_rainfall(location).await.map_err(|e| {
        error!(
            "Annual rainfall for ({}, {}) failed: {}",
            location.latitude(),
            location.longitude(),
            e
        );
        ApiError::from(e)
    })?;

    Ok(HttpResponse::Ok().json(result))
}

pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}
