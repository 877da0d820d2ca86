pub mod models {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use std::{fmt, str::FromStr};

    /// A position on the globe in decimal degrees.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct GeoPoint {
        pub latitude: f64,
        pub longitude: f64,
    }

    impl GeoPoint {
        pub fn new(latitude: f64, longitude: f64) -> Self {
            GeoPoint {
                latitude,
                longitude,
            }
        }

        /// True when both coordinates are finite and inside the usual lat/lon bounds.
        pub fn is_valid(&self) -> bool {
            self.latitude.is_finite()
                && self.longitude.is_finite()
                && (-90.0..=90.0).contains(&self.latitude)
                && (-180.0..=180.0).contains(&self.longitude)
        }
    }

    /// Flat JSON form of a city, the frontend sends and expects coordinates at the top level
    /// and sometimes uses the short names.
    #[derive(Clone, Serialize, Deserialize)]
    pub struct CityRecord {
        id: i64,
        name: String,
        #[serde(alias = "lat")]
        latitude: f64,
        #[serde(alias = "lng", alias = "lon")]
        longitude: f64,
    }

    /// A city on a trip. Identity is `id`, it is not checked for uniqueness.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(from = "CityRecord", into = "CityRecord")]
    pub struct City {
        pub id: i64,
        pub name: String,
        pub location: GeoPoint,
    }

    impl City {
        pub fn new(id: i64, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
            City {
                id,
                name: name.into(),
                location: GeoPoint::new(latitude, longitude),
            }
        }
    }

    impl From<CityRecord> for City {
        fn from(record: CityRecord) -> Self {
            City::new(record.id, record.name, record.latitude, record.longitude)
        }
    }

    impl From<City> for CityRecord {
        fn from(city: City) -> Self {
            CityRecord {
                id: city.id,
                name: city.name,
                latitude: city.location.latitude,
                longitude: city.location.longitude,
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Food {
        pub name: String,
        pub price: f64,
    }

    impl Food {
        pub fn new(name: impl Into<String>, price: f64) -> Self {
            Food {
                name: name.into(),
                price,
            }
        }
    }

    /// Catalog entry, a city together with the local dishes listed for it.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct CityWithFood {
        #[serde(flatten)]
        pub city: City,
        pub food: Vec<Food>,
    }

    #[derive(Debug, Serialize)]
    pub struct CitiesResponse {
        pub cities: Vec<CityWithFood>,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CityDistance {
        #[serde(flatten)]
        pub city: City,
        pub distance_km: f64,
    }

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CitiesWithDistancesResponse {
        pub reference_city: String,
        pub cities: Vec<CityDistance>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct OptimizeRouteRequest {
        pub cities: Vec<City>,
        pub starting_city: City,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct OptimizedRouteResponse {
        pub route: Vec<String>,
        pub distances: Vec<f64>,
        pub total_distance: f64,
        pub optimized: bool,
        pub method: String,
    }

    /// An already ordered route whose legs should be measured.
    #[derive(Debug, Clone, Deserialize)]
    pub struct RouteDistancesRequest {
        pub cities: Vec<City>,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RouteDistancesResponse {
        pub distances: Vec<f64>,
        pub total_distance: f64,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TripType {
        ParisTour,
        LondonTour,
        BerlinTour,
        CustomTour,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct UnknownTripType(pub String);

    impl fmt::Display for UnknownTripType {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "unknown trip type '{}'", self.0)
        }
    }

    impl std::error::Error for UnknownTripType {}

    impl TripType {
        /// Name of the city a preset tour departs from, `None` for custom tours.
        pub fn starting_city(&self) -> Option<&'static str> {
            match self {
                TripType::ParisTour => Some("Paris"),
                TripType::LondonTour => Some("London"),
                TripType::BerlinTour => Some("Berlin"),
                TripType::CustomTour => None,
            }
        }

        /// Number of stops a preset visits when the caller doesn't ask for a specific count.
        /// `None` means every catalog city.
        pub fn default_stops(&self) -> Option<usize> {
            match self {
                TripType::LondonTour => Some(5),
                _ => None,
            }
        }

        pub fn as_str(&self) -> &'static str {
            match self {
                TripType::ParisTour => "paris_tour",
                TripType::LondonTour => "london_tour",
                TripType::BerlinTour => "berlin_tour",
                TripType::CustomTour => "custom_tour",
            }
        }
    }

    impl fmt::Display for TripType {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    /// Accepts both the path form (`paris`) and the wire form (`paris_tour`), case-insensitively.
    impl FromStr for TripType {
        type Err = UnknownTripType;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let lowered = s.trim().to_ascii_lowercase();
            let short = lowered.strip_suffix("_tour").unwrap_or(&lowered);
            match short {
                "paris" => Ok(TripType::ParisTour),
                "london" => Ok(TripType::LondonTour),
                "berlin" => Ok(TripType::BerlinTour),
                "custom" => Ok(TripType::CustomTour),
                _ => Err(UnknownTripType(s.to_string())),
            }
        }
    }

    /// Custom tour request, cities are referenced by name.
    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CustomTripRequest {
        pub starting_city: String,
        #[serde(default)]
        pub cities: Vec<String>,
        #[serde(default)]
        pub trip_type: Option<TripType>,
    }

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TripPlan {
        pub trip_type: TripType,
        pub route: Vec<String>,
        pub cities: Vec<CityWithFood>,
        pub distances: Vec<f64>,
        pub total_distance: f64,
        pub planned_at: DateTime<Utc>,
    }
}
