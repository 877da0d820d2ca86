//! Route optimizer, builds a visiting order with the nearest-neighbour heuristic.
//!
//! Starting from the given city we always hop to the closest city not yet visited. This is a greedy
//! approximation, it does not try to improve the tour afterwards.

use crate::distance::haversine_km;
use trip_planner_shared::models::City;

/// Ordered result of a route computation, borrowing the cities it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan<'a> {
    pub stops: Vec<&'a City>,
    /// `legs[i]` is the distance from `stops[i]` to `stops[i + 1]`, in kilometers.
    pub legs: Vec<f64>,
    pub total_km: f64,
}

impl<'a> RoutePlan<'a> {
    pub fn names(&self) -> Vec<String> {
        self.stops.iter().map(|c| c.name.clone()).collect()
    }

    /// Keep only the first `max_stops` stops (at least the starting city) and the legs between them.
    pub fn truncate(&mut self, max_stops: usize) {
        let max_stops = max_stops.max(1);
        if self.stops.len() <= max_stops {
            return;
        }

        self.stops.truncate(max_stops);
        self.legs.truncate(max_stops - 1);
        self.total_km = self.legs.iter().sum();
    }
}

/// Greedy nearest-neighbour route from `starting` over `cities`.
///
/// The first entry of `cities` with the same id as `starting` is dropped from the candidates. If there
/// is none, nothing is dropped and the starting city may get visited twice, callers are expected to
/// pass the starting city in the list or exclude it themselves. Ties go to the city that comes first
/// in `cities`.
pub fn optimize_route<'a>(starting: &'a City, cities: &'a [City]) -> RoutePlan<'a> {
    let mut remaining: Vec<&City> = cities.iter().collect();
    if let Some(pos) = remaining.iter().position(|c| c.id == starting.id) {
        remaining.remove(pos);
    }

    let mut stops = Vec::with_capacity(remaining.len() + 1);
    let mut legs = Vec::with_capacity(remaining.len());
    let mut total_km = 0.0;

    stops.push(starting);
    let mut current = starting;

    while !remaining.is_empty() {
        let mut nearest_idx = 0;
        let mut min_distance = haversine_km(current.location, remaining[0].location);

        for (i, candidate) in remaining.iter().enumerate().skip(1) {
            let dist = haversine_km(current.location, candidate.location);
            if dist < min_distance {
                min_distance = dist;
                nearest_idx = i;
            }
        }

        let next = remaining.remove(nearest_idx);
        stops.push(next);
        legs.push(min_distance);
        total_km += min_distance;
        current = next;
    }

    RoutePlan {
        stops,
        legs,
        total_km,
    }
}

/// Distances between consecutive cities of an already ordered route and their sum.
pub fn leg_distances(cities: &[City]) -> (Vec<f64>, f64) {
    let legs: Vec<f64> = cities
        .windows(2)
        .map(|pair| haversine_km(pair[0].location, pair[1].location))
        .collect();
    let total = legs.iter().sum();

    (legs, total)
}
