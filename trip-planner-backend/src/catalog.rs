//! City and food catalog module.
//!
//! The rest of the backend only talks to a [`CatalogProvider`]. Right now there is a built-in example
//! data set and a CSV backed catalog loaded once at startup.

use serde::Deserialize;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, info};
use trip_planner_shared::models::{City, CityWithFood, Food};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("City with id {0} not found.")]
    CityNotFound(i64),
    #[error("City '{0}' not found.")]
    CityNameNotFound(String),
    #[error("Error reading catalog CSV.")]
    Csv(#[from] csv::Error),
    #[error("Invalid row {line} in {}: {reason}", .file.display())]
    InvalidRow {
        file: PathBuf,
        line: u64,
        reason: String,
    },
}

#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn list_cities(&self) -> Result<Vec<CityWithFood>, CatalogError>;
    async fn list_foods_for_city(&self, id: i64) -> Result<Vec<Food>, CatalogError>;
}

/// Case-insensitive lookup by city name, first match wins.
pub fn find_by_name<'a>(cities: &'a [CityWithFood], name: &str) -> Result<&'a CityWithFood, CatalogError> {
    let wanted = name.trim();
    cities
        .iter()
        .find(|c| c.city.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| CatalogError::CityNameNotFound(wanted.to_string()))
}

/// In-memory catalog, either the built-in example cities or whatever was loaded from disk.
pub struct StaticCatalog {
    cities: Vec<CityWithFood>,
}

#[derive(Deserialize)]
struct CityRow {
    id: i64,
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct FoodRow {
    city_id: i64,
    name: String,
    price: f64,
}

fn entry(id: i64, name: &str, latitude: f64, longitude: f64, food: &[(&str, f64)]) -> CityWithFood {
    CityWithFood {
        city: City::new(id, name, latitude, longitude),
        food: food.iter().map(|(n, p)| Food::new(*n, *p)).collect(),
    }
}

impl StaticCatalog {
    pub fn new(cities: Vec<CityWithFood>) -> Self {
        StaticCatalog { cities }
    }

    /// The example data set the frontend was developed against.
    pub fn example() -> Self {
        StaticCatalog::new(vec![
            entry(1, "Paris", 48.8566, 2.3522, &[("Croissant", 3.50), ("Baguette", 2.00), ("Macaron", 2.50)]),
            entry(
                2,
                "London",
                51.5074,
                -0.1278,
                &[("Fish and Chips", 8.50), ("Bangers and Mash", 7.00), ("Shepherd's Pie", 9.00)],
            ),
            entry(3, "Berlin", 52.5200, 13.4050, &[("Bratwurst", 4.50), ("Sauerkraut", 3.00), ("Pretzel", 2.50)]),
            entry(
                4,
                "Rome",
                41.9028,
                12.4964,
                &[("Pizza Margherita", 12.00), ("Pasta Carbonara", 14.00), ("Gelato", 4.50)],
            ),
            entry(5, "Madrid", 40.4168, -3.7038, &[("Paella", 16.00), ("Tapas", 6.00), ("Churros", 3.50)]),
            entry(
                6,
                "Amsterdam",
                52.3676,
                4.9041,
                &[("Stroopwafel", 2.50), ("Dutch Cheese", 8.00), ("Herring", 5.50)],
            ),
            entry(
                7,
                "Brussels",
                50.8503,
                4.3517,
                &[("Belgian Waffle", 4.00), ("Chocolate", 6.00), ("Frites", 3.50)],
            ),
            entry(
                8,
                "Vienna",
                48.2082,
                16.3738,
                &[("Schnitzel", 12.00), ("Sachertorte", 5.50), ("Apfelstrudel", 4.50)],
            ),
        ])
    }

    /// Load a catalog from a cities CSV (`id,name,latitude,longitude`) and a foods CSV
    /// (`city_id,name,price`), both with header rows.
    pub fn from_csv(cities_path: &Path, foods_path: &Path) -> Result<Self, CatalogError> {
        let mut rdr = csv::Reader::from_path(cities_path)?;
        let mut cities: Vec<CityWithFood> = Vec::new();
        let mut index: HashMap<i64, usize> = HashMap::new();

        for row in rdr.deserialize() {
            let row: CityRow = row?;
            let city = City::new(row.id, row.name, row.latitude, row.longitude);
            if !city.location.is_valid() {
                return Err(CatalogError::InvalidRow {
                    file: cities_path.to_path_buf(),
                    line: cities.len() as u64 + 2,
                    reason: format!("coordinates out of range for '{}'", city.name),
                });
            }

            index.entry(city.id).or_insert(cities.len());
            cities.push(CityWithFood {
                city,
                food: Vec::new(),
            });
        }

        let mut rdr = csv::Reader::from_path(foods_path)?;
        for (line, row) in rdr.deserialize().enumerate() {
            let row: FoodRow = row?;
            let Some(&idx) = index.get(&row.city_id) else {
                return Err(CatalogError::InvalidRow {
                    file: foods_path.to_path_buf(),
                    line: line as u64 + 2,
                    reason: format!("unknown city id {}", row.city_id),
                });
            };
            cities[idx].food.push(Food::new(row.name, row.price));
        }

        info!(
            cities = cities.len(),
            path = %cities_path.display(),
            "Loaded catalog from CSV"
        );

        Ok(StaticCatalog::new(cities))
    }
}

#[async_trait::async_trait]
impl CatalogProvider for StaticCatalog {
    async fn list_cities(&self) -> Result<Vec<CityWithFood>, CatalogError> {
        Ok(self.cities.clone())
    }

    async fn list_foods_for_city(&self, id: i64) -> Result<Vec<Food>, CatalogError> {
        debug!(city_id = id, "Looking up foods");
        self.cities
            .iter()
            .find(|c| c.city.id == id)
            .map(|c| c.food.clone())
            .ok_or(CatalogError::CityNotFound(id))
    }
}
