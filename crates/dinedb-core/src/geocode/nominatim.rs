// crates/dinedb-core/src/geocode/nominatim.rs
//! Secondary provider: OpenStreetMap Nominatim free-text search.

use super::GeocodeResult;
use crate::error::{GeocodeError, Provider};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Decode a search response; only the first candidate is used.
pub fn decode_search(body: &str, query: &str) -> Result<GeocodeResult, GeocodeError> {
    let malformed = |detail: String| GeocodeError::Malformed {
        provider: Provider::Nominatim,
        detail,
    };

    let places: Vec<Place> = serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;
    let first = places.into_iter().next().ok_or(GeocodeError::NotFound {
        provider: Provider::Nominatim,
    })?;

    let lat: f64 = first
        .lat
        .trim()
        .parse()
        .map_err(|_| malformed(format!("lat '{}' is not a number", first.lat)))?;
    let lng: f64 = first
        .lon
        .trim()
        .parse()
        .map_err(|_| malformed(format!("lon '{}' is not a number", first.lon)))?;

    Ok(GeocodeResult {
        lat,
        lng,
        display_name: first.display_name.unwrap_or_else(|| query.to_string()),
        kind: first.kind,
        source: Provider::Nominatim,
    })
}

#[cfg(feature = "net")]
pub use http::NominatimGeocoder;

#[cfg(feature = "net")]
mod http {
    use super::decode_search;
    use crate::error::{GeocodeError, Provider};
    use crate::geocode::provider::GeocodeProvider;
    use crate::geocode::GeocodeResult;
    use async_trait::async_trait;
    use reqwest::header::ACCEPT_LANGUAGE;

    /// Nominatim `/search` client. Needs no credentials.
    pub struct NominatimGeocoder {
        client: reqwest::Client,
        endpoint: String,
        accept_language: String,
    }

    impl NominatimGeocoder {
        pub fn new(client: reqwest::Client, endpoint: impl Into<String>, accept_language: impl Into<String>) -> Self {
            Self {
                client,
                endpoint: endpoint.into(),
                accept_language: accept_language.into(),
            }
        }
    }

    #[async_trait]
    impl GeocodeProvider for NominatimGeocoder {
        async fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
            let transport = |e: reqwest::Error| GeocodeError::Transport {
                provider: Provider::Nominatim,
                detail: e.to_string(),
            };

            let response = self
                .client
                .get(&self.endpoint)
                .query(&[
                    ("format", "json"),
                    ("q", address),
                    ("limit", "1"),
                    ("addressdetails", "1"),
                ])
                .header(ACCEPT_LANGUAGE, &self.accept_language)
                .send()
                .await
                .map_err(transport)?;

            let status = response.status();
            if !status.is_success() {
                return Err(GeocodeError::Status {
                    provider: Provider::Nominatim,
                    status: status.as_u16(),
                });
            }

            let body = response.text().await.map_err(transport)?;
            decode_search(&body, address)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_candidate_is_used() {
        let body = r#"[
            {"lat":"25.0478","lon":"121.5170","display_name":"臺北車站, 中正區, 臺北市","type":"station"},
            {"lat":"0","lon":"0","display_name":"elsewhere"}
        ]"#;
        let r = decode_search(body, "台北車站").unwrap();
        assert_eq!(r.source, Provider::Nominatim);
        assert_eq!(r.kind.as_deref(), Some("station"));
        assert!((r.lat - 25.0478).abs() < 1e-9);
        assert!((r.lng - 121.5170).abs() < 1e-9);
    }

    #[test]
    fn display_name_falls_back_to_query() {
        let r = decode_search(r#"[{"lat":"1.5","lon":"2.5"}]"#, "query text").unwrap();
        assert_eq!(r.display_name, "query text");
        assert_eq!(r.kind, None);
    }

    #[test]
    fn empty_list_is_not_found() {
        let err = decode_search("[]", "x").unwrap_err();
        assert!(matches!(err, GeocodeError::NotFound { provider: Provider::Nominatim }));
    }

    #[test]
    fn bad_payloads_are_malformed() {
        for body in [r#"{"error":"Unable to geocode"}"#, r#"[{"lat":"north","lon":"1"}]"#, "<html>"] {
            let err = decode_search(body, "x").unwrap_err();
            assert!(matches!(err, GeocodeError::Malformed { .. }), "{body}");
        }
    }
}
