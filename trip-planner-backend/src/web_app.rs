//! Main web app module containing web routings to the catalog, route optimizer and trip planner.

use crate::{
    catalog::{find_by_name, CatalogProvider},
    distance::haversine_km,
    error::ApiError,
    router::{leg_distances, optimize_route},
    trips::{plan_custom, plan_tour, TripError},
};
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};
use trip_planner_shared::models::{
    CitiesResponse, CitiesWithDistancesResponse, City, CityDistance, CustomTripRequest, Food,
    OptimizeRouteRequest, OptimizedRouteResponse, RouteDistancesRequest, RouteDistancesResponse,
    TripPlan, TripType, UnknownTripType,
};

/// Label reported alongside every optimized route.
pub const OPTIMIZER_METHOD: &str = "backend-nearest-neighbor";

pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
    pub reference_city: String,
}

#[derive(Deserialize)]
pub struct TourQuery {
    cities: Option<usize>,
}

impl From<TripError> for ApiError {
    fn from(err: TripError) -> Self {
        match err {
            TripError::Catalog(e) => e.into(),
            TripError::NotAPreset(_) => ApiError::NotFound(err.to_string()),
        }
    }
}

/// Coordinates are only checked here, at the edge. The optimizer trusts what it's given.
fn ensure_valid_locations<'a>(cities: impl IntoIterator<Item = &'a City>) -> Result<(), ApiError> {
    for city in cities {
        if !city.location.is_valid() {
            return Err(ApiError::InvalidCoordinates {
                name: city.name.clone(),
                latitude: city.location.latitude,
                longitude: city.location.longitude,
            });
        }
    }

    Ok(())
}

fn bad_request<E: std::fmt::Display>(err: E, req: &HttpRequest) -> actix_web::Error {
    warn!(path = %req.path(), %err, "Rejected request");
    ApiError::BadRequest(err.to_string()).into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, req| bad_request(err, req)))
        .app_data(web::QueryConfig::default().error_handler(|err, req| bad_request(err, req)))
        .service(health)
        .service(list_cities)
        .service(cities_with_distances)
        .service(city_foods)
        .service(optimize)
        .service(route_distances)
        .service(custom_trip)
        .service(preset_trip);
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

#[get("/api/cities")]
pub async fn list_cities(state: web::Data<AppState>) -> Result<web::Json<CitiesResponse>, ApiError> {
    let cities = state.catalog.list_cities().await?;
    Ok(web::Json(CitiesResponse { cities }))
}

/// Every catalog city with its distance from the configured reference city.
#[get("/api/cities/distances")]
pub async fn cities_with_distances(
    state: web::Data<AppState>,
) -> Result<web::Json<CitiesWithDistancesResponse>, ApiError> {
    let cities = state.catalog.list_cities().await?;
    let reference = find_by_name(&cities, &state.reference_city)?.city.clone();

    let cities = cities
        .into_iter()
        .map(|c| CityDistance {
            distance_km: haversine_km(reference.location, c.city.location),
            city: c.city,
        })
        .collect();

    Ok(web::Json(CitiesWithDistancesResponse {
        reference_city: reference.name,
        cities,
    }))
}

#[get("/api/cities/{id}/foods")]
pub async fn city_foods(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<web::Json<Vec<Food>>, ApiError> {
    let foods = state.catalog.list_foods_for_city(path.into_inner()).await?;
    Ok(web::Json(foods))
}

/// Endpoint for running route computation
#[post("/api/routes/optimize")]
pub async fn optimize(
    json: web::Json<OptimizeRouteRequest>,
) -> Result<web::Json<OptimizedRouteResponse>, ApiError> {
    let req = json.into_inner();
    ensure_valid_locations(std::iter::once(&req.starting_city).chain(req.cities.iter()))?;

    let plan = optimize_route(&req.starting_city, &req.cities);
    debug!(
        start = %req.starting_city.name,
        stops = plan.stops.len(),
        total_km = plan.total_km,
        "Optimized route"
    );

    Ok(web::Json(OptimizedRouteResponse {
        route: plan.names(),
        distances: plan.legs,
        total_distance: plan.total_km,
        optimized: true,
        method: OPTIMIZER_METHOD.to_string(),
    }))
}

/// Measure the legs of a route the client already ordered.
#[post("/api/routes/distances")]
pub async fn route_distances(
    json: web::Json<RouteDistancesRequest>,
) -> Result<web::Json<RouteDistancesResponse>, ApiError> {
    ensure_valid_locations(&json.cities)?;

    let (distances, total_distance) = leg_distances(&json.cities);
    Ok(web::Json(RouteDistancesResponse {
        distances,
        total_distance,
    }))
}

#[post("/api/trips/custom")]
pub async fn custom_trip(
    state: web::Data<AppState>,
    json: web::Json<CustomTripRequest>,
) -> Result<web::Json<TripPlan>, ApiError> {
    let plan = plan_custom(state.catalog.as_ref(), &json).await?;
    Ok(web::Json(plan))
}

#[get("/api/trips/{tour}")]
pub async fn preset_trip(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<TourQuery>,
) -> Result<web::Json<TripPlan>, ApiError> {
    let trip_type: TripType = path
        .parse()
        .map_err(|e: UnknownTripType| ApiError::NotFound(e.to_string()))?;

    let plan = plan_tour(state.catalog.as_ref(), trip_type, query.cities).await?;
    Ok(web::Json(plan))
}
