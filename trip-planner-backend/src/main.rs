//! Backend crate for the trip planner web app.
//!
//! Uses actix to serve the city catalog and, importantly, to take a set of cities and order them into a route.

pub mod catalog;
pub mod distance;
pub mod error;
pub mod router;
pub mod settings;
pub mod trips;
pub mod web_app;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use catalog::{CatalogProvider, StaticCatalog};
use settings::Settings;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use web_app::AppState;

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log.filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn load_catalog(settings: &Settings) -> anyhow::Result<Arc<dyn CatalogProvider>> {
    match (&settings.catalog.cities_csv, &settings.catalog.foods_csv) {
        (Some(cities), Some(foods)) => {
            let catalog = StaticCatalog::from_csv(cities, foods)
                .with_context(|| format!("loading catalog from {}", cities.display()))?;
            Ok(Arc::new(catalog))
        }
        _ => {
            info!("No catalog CSV configured, serving the example cities");
            Ok(Arc::new(StaticCatalog::example()))
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    init_tracing(&settings);

    let state = web::Data::new(AppState {
        catalog: load_catalog(&settings)?,
        reference_city: settings.trips.reference_city.clone(),
    });

    info!(host = %settings.server.host, port = settings.server.port, "Trip planner backend listening");

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(web_app::configure)
    })
    .bind((settings.server.host.as_str(), settings.server.port))?;

    if let Some(workers) = settings.server.workers {
        server = server.workers(workers);
    }

    server.run().await?;

    Ok(())
}
