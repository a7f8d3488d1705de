//! Current-weather provider client.
//!
//! The provider is queried with `lat`, `lon`, `appid`, `units` and `lang`
//! parameters and answers with a JSON document describing conditions at that
//! point. The document is not interpreted here; it is forwarded as a
//! [`WeatherSnapshot`].

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::error::UpstreamError;
use crate::models::{Coordinate, WeatherSnapshot};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, coordinate: &Coordinate)
        -> Result<WeatherSnapshot, UpstreamError>;
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
    units: String,
    lang: String,
    timeout: Duration,
}

impl OpenWeatherClient {
    pub fn new(
        base_url: Url,
        api_key: String,
        units: String,
        lang: String,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("flight-weather-api/", env!("CARGO_PKG_VERSION")))
            .pool_max_idle_per_host(8)
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_key,
            units,
            lang,
            timeout,
        })
    }

    pub fn request_url(&self, coordinate: &Coordinate) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("lat", &coordinate.latitude.to_string())
            .append_pair("lon", &coordinate.longitude.to_string())
            .append_pair("appid", &self.api_key)
            .append_pair("units", &self.units)
            .append_pair("lang", &self.lang);
        url
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(
        &self,
        coordinate: &Coordinate,
    ) -> Result<WeatherSnapshot, UpstreamError> {
        if !coordinate.is_finite() {
            return Err(UpstreamError::InvalidCoordinate(coordinate.key().to_string()));
        }

        log::debug!(
            "Fetching weather for {} ({})",
            coordinate.location_code,
            coordinate.key()
        );

        let response = self
            .client
            .get(self.request_url(coordinate))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::Timeout {
                        timeout_ms: self.timeout.as_millis() as u64,
                    }
                } else {
                    UpstreamError::Request(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.without_url().to_string()))?;

        Ok(WeatherSnapshot::new(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenWeatherClient {
        OpenWeatherClient::new(
            Url::parse("https://api.example.com/data/2.5/weather").unwrap(),
            "secret".to_string(),
            "metric".to_string(),
            "es".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn coordinate(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate {
            latitude,
            longitude,
            location_code: "BOG".to_string(),
            location_name: "El Dorado".to_string(),
        }
    }

    #[test]
    fn test_request_url_parameters() {
        let url = client().request_url(&coordinate(4.70159, -74.1469));
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(url.path(), "/data/2.5/weather");
        assert_eq!(
            pairs,
            vec![
                ("lat".to_string(), "4.70159".to_string()),
                ("lon".to_string(), "-74.1469".to_string()),
                ("appid".to_string(), "secret".to_string()),
                ("units".to_string(), "metric".to_string()),
                ("lang".to_string(), "es".to_string()),
            ]
        );
    }

    #[test]
    fn test_request_url_keeps_existing_query() {
        let mut client = client();
        client.base_url = Url::parse("https://api.example.com/weather?mode=json").unwrap();
        let url = client.request_url(&coordinate(1.0, 2.0));
        assert_eq!(
            url.query(),
            Some("mode=json&lat=1&lon=2&appid=secret&units=metric&lang=es")
        );
    }

    #[tokio::test]
    async fn test_non_finite_coordinate_is_rejected() {
        let result = client()
            .current_weather(&coordinate(f64::NAN, -74.1469))
            .await;
        assert_eq!(
            result,
            Err(UpstreamError::InvalidCoordinate("NaN_-74.1469".to_string()))
        );
    }
}
