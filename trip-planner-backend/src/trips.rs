//! Preset and custom tours over the catalog.

use crate::{
    catalog::{find_by_name, CatalogError, CatalogProvider},
    router::optimize_route,
};
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::info;
use trip_planner_shared::models::{City, CityWithFood, CustomTripRequest, Food, TripPlan, TripType};

#[derive(Debug, Error)]
pub enum TripError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("'{0}' is not a preset tour.")]
    NotAPreset(TripType),
}

/// Optimize a tour starting at `starting` over `candidates` and attach each stop's food list.
fn build_plan(
    trip_type: TripType,
    starting: &CityWithFood,
    candidates: &[CityWithFood],
    max_stops: Option<usize>,
) -> TripPlan {
    let mut foods: HashMap<i64, &Vec<Food>> = HashMap::new();
    foods.insert(starting.city.id, &starting.food);
    for c in candidates {
        foods.entry(c.city.id).or_insert(&c.food);
    }

    let cities: Vec<City> = candidates.iter().map(|c| c.city.clone()).collect();
    let mut plan = optimize_route(&starting.city, &cities);
    if let Some(n) = max_stops {
        plan.truncate(n);
    }

    let ordered = plan
        .stops
        .iter()
        .map(|stop| CityWithFood {
            city: (*stop).clone(),
            food: foods.get(&stop.id).map(|f| (*f).clone()).unwrap_or_default(),
        })
        .collect();

    info!(
        %trip_type,
        stops = plan.stops.len(),
        total_km = plan.total_km,
        "Planned trip"
    );

    TripPlan {
        trip_type,
        route: plan.names(),
        cities: ordered,
        distances: plan.legs,
        total_distance: plan.total_km,
        planned_at: Utc::now(),
    }
}

/// Plan one of the preset tours over every catalog city.
///
/// `max_stops` overrides the preset's own stop count, e.g. the London tour visits 5 cities by default.
pub async fn plan_tour(
    catalog: &dyn CatalogProvider,
    trip_type: TripType,
    max_stops: Option<usize>,
) -> Result<TripPlan, TripError> {
    let Some(start_name) = trip_type.starting_city() else {
        return Err(TripError::NotAPreset(trip_type));
    };

    let cities = catalog.list_cities().await?;
    let starting = find_by_name(&cities, start_name)?;

    Ok(build_plan(
        trip_type,
        starting,
        &cities,
        max_stops.or(trip_type.default_stops()),
    ))
}

/// Plan a tour over the cities the user picked, referenced by name.
///
/// Selected names that resolve to the same catalog city are only visited once.
pub async fn plan_custom(
    catalog: &dyn CatalogProvider,
    request: &CustomTripRequest,
) -> Result<TripPlan, TripError> {
    let cities = catalog.list_cities().await?;
    let starting = find_by_name(&cities, &request.starting_city)?;

    let mut seen = HashSet::new();
    let mut selected = Vec::with_capacity(request.cities.len());
    for name in &request.cities {
        let city = find_by_name(&cities, name)?;
        if seen.insert(city.city.id) {
            selected.push(city.clone());
        }
    }

    Ok(build_plan(
        request.trip_type.unwrap_or(TripType::CustomTour),
        starting,
        &selected,
        None,
    ))
}

#[cfg(test)]
mod trips_tests {
    use super::{plan_custom, plan_tour, TripError};
    use crate::catalog::{CatalogError, StaticCatalog};
    use trip_planner_shared::models::{CustomTripRequest, TripType};

    fn custom(start: &str, cities: &[&str]) -> CustomTripRequest {
        CustomTripRequest {
            starting_city: start.to_string(),
            cities: cities.iter().map(|c| c.to_string()).collect(),
            trip_type: None,
        }
    }

    #[tokio::test]
    async fn test_paris_tour_visits_everything() {
        let catalog = StaticCatalog::example();
        let plan = plan_tour(&catalog, TripType::ParisTour, None).await.unwrap();

        assert_eq!(
            plan.route,
            vec!["Paris", "Brussels", "Amsterdam", "London", "Berlin", "Vienna", "Rome", "Madrid"]
        );
        assert_eq!(plan.trip_type, TripType::ParisTour);
        assert_eq!(plan.distances.len(), 7);
        assert_eq!(plan.total_distance, plan.distances.iter().sum::<f64>());
        assert_eq!(plan.cities[0].food[0].name, "Croissant");
        assert_eq!(plan.cities[1].city.name, "Brussels");
        assert_eq!(plan.cities[1].food[0].name, "Belgian Waffle");
    }

    #[tokio::test]
    async fn test_london_tour_defaults_to_five_stops() {
        let catalog = StaticCatalog::example();

        let plan = plan_tour(&catalog, TripType::LondonTour, None).await.unwrap();
        assert_eq!(plan.route, vec!["London", "Brussels", "Amsterdam", "Paris", "Berlin"]);
        assert_eq!(plan.distances.len(), 4);

        let plan = plan_tour(&catalog, TripType::LondonTour, Some(2)).await.unwrap();
        assert_eq!(plan.route, vec!["London", "Brussels"]);
        assert_eq!(plan.total_distance, plan.distances[0]);
    }

    #[tokio::test]
    async fn test_berlin_tour() {
        let catalog = StaticCatalog::example();
        let plan = plan_tour(&catalog, TripType::BerlinTour, None).await.unwrap();

        assert_eq!(plan.route[0], "Berlin");
        assert_eq!(plan.route[1], "Vienna");
        assert_eq!(plan.route.len(), 8);
    }

    #[tokio::test]
    async fn test_custom_is_not_a_preset() {
        let catalog = StaticCatalog::example();
        let err = plan_tour(&catalog, TripType::CustomTour, None).await.unwrap_err();
        assert!(matches!(err, TripError::NotAPreset(TripType::CustomTour)));
    }

    #[tokio::test]
    async fn test_preset_missing_from_catalog() {
        let catalog = StaticCatalog::new(vec![]);
        let err = plan_tour(&catalog, TripType::ParisTour, None).await.unwrap_err();
        assert!(matches!(err, TripError::Catalog(CatalogError::CityNameNotFound(_))));
    }

    #[tokio::test]
    async fn test_custom_tour_resolves_names() {
        let catalog = StaticCatalog::example();
        let plan = plan_custom(&catalog, &custom("paris", &["Rome", "brussels", "Berlin"]))
            .await
            .unwrap();

        assert_eq!(plan.trip_type, TripType::CustomTour);
        assert_eq!(plan.route, vec!["Paris", "Brussels", "Berlin", "Rome"]);
        assert_eq!(plan.cities.len(), 4);
        assert_eq!(plan.cities[3].food[0].name, "Pizza Margherita");
    }

    #[tokio::test]
    async fn test_custom_tour_with_start_in_selection_and_duplicates() {
        let catalog = StaticCatalog::example();
        let plan = plan_custom(&catalog, &custom("Madrid", &["Madrid", "Paris", "PARIS"]))
            .await
            .unwrap();

        assert_eq!(plan.route, vec!["Madrid", "Paris"]);
        assert_eq!(plan.distances.len(), 1);
    }

    #[tokio::test]
    async fn test_custom_tour_with_no_selection() {
        let catalog = StaticCatalog::example();
        let plan = plan_custom(&catalog, &custom("Vienna", &[])).await.unwrap();

        assert_eq!(plan.route, vec!["Vienna"]);
        assert!(plan.distances.is_empty());
        assert_eq!(plan.total_distance, 0.0);
    }

    #[tokio::test]
    async fn test_custom_tour_unknown_city() {
        let catalog = StaticCatalog::example();
        let err = plan_custom(&catalog, &custom("Paris", &["Gotham"])).await.unwrap_err();
        assert!(matches!(
            err,
            TripError::Catalog(CatalogError::CityNameNotFound(name)) if name == "Gotham"
        ));
    }
}
