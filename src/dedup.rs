//! Coordinate deduplication for a page of flights.
//!
//! Every flight references two locations. Many flights in a page share
//! airports, so weather is resolved once per distinct `(latitude, longitude)`
//! pair rather than once per flight end.

use std::collections::HashSet;

use crate::models::{Coordinate, CoordinateKey, FlightRecord};

/// Coordinate keys for both ends of one flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightLegs {
    pub origin: CoordinateKey,
    pub destination: CoordinateKey,
}

#[derive(Debug, Clone, Default)]
pub struct DedupedPage {
    /// Distinct coordinates in first-seen order.
    pub coordinates: Vec<Coordinate>,
    /// One entry per input flight, same order as the input.
    pub legs: Vec<FlightLegs>,
}

/// Collects the distinct coordinates referenced by `flights`.
///
/// The origin of a flight is visited before its destination. When two
/// locations share a coordinate pair but differ in code or name, the first
/// one seen is kept. Non-finite coordinates are kept as well; they fail
/// later when weather is fetched for them.
pub fn dedup_coordinates(flights: &[FlightRecord]) -> DedupedPage {
    let mut seen = HashSet::with_capacity(flights.len() * 2);
    let mut coordinates = Vec::new();
    let mut legs = Vec::with_capacity(flights.len());

    for flight in flights {
        let origin = flight.origin_key();
        if seen.insert(origin.clone()) {
            coordinates.push(flight.origin_coordinate());
        }

        let destination = flight.destination_key();
        if seen.insert(destination.clone()) {
            coordinates.push(flight.destination_coordinate());
        }

        legs.push(FlightLegs {
            origin,
            destination,
        });
    }

    DedupedPage { coordinates, legs }
}
