#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use seminarplan::logging::init_tracing;
    use seminarplan::{GermanHolidays, JsonSemesterStore, Settings, http_api};

    let settings = Settings::load(None)?;
    init_tracing(&settings.log_level);

    let addr: SocketAddr = settings.http_addr.parse()?;
    let store = JsonSemesterStore::new(&settings.semester_file);

    tracing::info!(%addr, region = %settings.region, "seminarplan HTTP API listening");
    let state = http_api::AppState::new(settings, store, GermanHolidays);
    http_api::serve(addr, state).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
