use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use annual_rainfall::api::{self, handlers};
use annual_rainfall::{RainfallService, ServerConfig};
use anyhow::Context;
use log::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = ServerConfig::from_env().context("Invalid configuration")?;

    let service = RainfallService::builder()
        .maybe_cache_dir(config.cache_dir.clone())
        .archive_url(config.archive_url.clone())
        .retry_policy(config.retry_policy)
        .request_timeout(config.request_timeout)
        .build()
        .await
        .context("Failed to set up rainfall service")?;
    let service = web::Data::new(service);

    let bind_address = config.bind_address();
    info!("Starting annual rainfall API on http://{}", bind_address);
    info!("Workers: {}", config.workers);
    info!("   GET  /annual-rainfall?lat=<float>&lon=<float>");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(service.clone())
            .configure(api::configure)
            .default_service(web::route().to(handlers::not_found))
    })
    .workers(config.workers.get())
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await?;

    Ok(())
}
