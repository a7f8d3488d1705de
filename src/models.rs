use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Identity of a location for deduplication and caching: `"{latitude}_{longitude}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordinateKey(String);

impl CoordinateKey {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        // Adding positive zero turns -0.0 into 0.0 so both share one key.
        let (latitude, longitude) = (latitude + 0.0, longitude + 0.0);
        Self(format!("{latitude}_{longitude}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CoordinateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
    pub location_code: String,
    pub location_name: String,
}

impl Coordinate {
    pub fn key(&self) -> CoordinateKey {
        CoordinateKey::new(self.latitude, self.longitude)
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// A flight row as read from the `flights` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightRecord {
    pub id: i64,
    pub origin: String,
    pub destination: String,
    pub airline: String,
    pub flight_num: i32,
    pub origin_iata_code: String,
    pub origin_name: String,
    pub origin_latitude: f64,
    pub origin_longitude: f64,
    pub destination_iata_code: String,
    pub destination_name: String,
    pub destination_latitude: f64,
    pub destination_longitude: f64,
}

impl FlightRecord {
    pub fn origin_coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.origin_latitude,
            longitude: self.origin_longitude,
            location_code: self.origin_iata_code.clone(),
            location_name: self.origin_name.clone(),
        }
    }

    pub fn destination_coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.destination_latitude,
            longitude: self.destination_longitude,
            location_code: self.destination_iata_code.clone(),
            location_name: self.destination_name.clone(),
        }
    }

    pub fn origin_key(&self) -> CoordinateKey {
        CoordinateKey::new(self.origin_latitude, self.origin_longitude)
    }

    pub fn destination_key(&self) -> CoordinateKey {
        CoordinateKey::new(self.destination_latitude, self.destination_longitude)
    }
}

/// Provider payload, forwarded as-is. Cloning shares the underlying JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    payload: Arc<Value>,
}

impl WeatherSnapshot {
    pub fn new(payload: Value) -> Self {
        Self {
            payload: Arc::new(payload),
        }
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }
}

impl From<Value> for WeatherSnapshot {
    fn from(payload: Value) -> Self {
        Self::new(payload)
    }
}

impl Serialize for WeatherSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.payload.serialize(serializer)
    }
}

/// Weather attached to one end of a flight. `Unresolved` serialises as `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherField {
    Resolved(WeatherSnapshot),
    Unresolved,
}

impl WeatherField {
    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            WeatherField::Resolved(snapshot) => Some(snapshot),
            WeatherField::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, WeatherField::Resolved(_))
    }
}

impl Serialize for WeatherField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WeatherField::Resolved(snapshot) => snapshot.serialize(serializer),
            WeatherField::Unresolved => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedFlight {
    #[serde(flatten)]
    pub flight: FlightRecord,
    #[serde(rename = "originWeather")]
    pub origin_weather: WeatherField,
    #[serde(rename = "destinationWeather")]
    pub destination_weather: WeatherField,
}

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub items: Vec<T>,
}
