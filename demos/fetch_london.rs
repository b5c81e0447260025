// demos/fetch_london.rs
use annual_rainfall::{LatLon, RainfallError, RainfallService};

#[tokio::main]
async fn main() -> Result<(), RainfallError> {
    // Set RUST_LOG=info (or debug) to see cache hits and retries
    env_logger::init();

    let london = LatLon(51.5074, -0.1278);
    println!(
        "Fetching annual rainfall for Lat: {}, Lon: {}",
        london.latitude(),
        london.longitude()
    );

    let service = RainfallService::builder().build().await?;
    match service.annual_rainfall(london).await {
        Ok(result) => {
            println!(
                "{} mm of rain between {} and {}",
                result.rainfall_mm, result.start_date, result.end_date
            );
            // Run again: this one is answered from the on-disk cache
            let again = service.annual_rainfall(london).await?;
            assert_eq!(again.rainfall_mm, result.rainfall_mm);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
