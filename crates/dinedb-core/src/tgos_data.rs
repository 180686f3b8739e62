// crates/dinedb-core/src/tgos_data.rs
//! TGOS open-data theme API: administrative town lookup and nearby
//! restaurants by town.
//!
//! Decoding is separate from transport so responses can be checked without
//! a network.

use crate::error::{GeocodeError, Provider};
use serde::{Deserialize, Serialize};

/// Theme holding restaurant points of interest.
pub const RESTAURANT_THEME_ID: &str = "amk94aCG";
/// Keyword filter sent with theme queries.
pub const RESTAURANT_KEYWORD: &str = "餐";
/// Name used for features whose category is blank.
pub const UNNAMED_RESTAURANT: &str = "未命名餐廳";

/// County and town containing a coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdministrativeTown {
    pub county: String,
    pub town: String,
}

/// A restaurant point from the TGOS theme layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyRestaurant {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

/// Either a plain status string or a list of per-parameter complaints.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResponseMessage {
    Text(String),
    Problems(Vec<ParameterProblem>),
}

#[derive(Debug, Deserialize)]
struct ParameterProblem {
    #[serde(default)]
    parameter: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RangeResponse {
    response_message: Option<ResponseMessage>,
    #[serde(default)]
    response_count: u64,
    #[serde(default)]
    response_data: Vec<RangeUnit>,
}

#[derive(Debug, Deserialize)]
struct RangeUnit {
    countyname: String,
    townname: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeResponse {
    response_message: Option<ResponseMessage>,
    #[serde(default)]
    response_count: u64,
    #[serde(default)]
    features: Option<Vec<Feature>>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(default)]
    coordinates: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    category: Option<String>,
    address: Option<String>,
    villname: Option<String>,
    lng: Option<f64>,
    lat: Option<f64>,
}

fn malformed(e: serde_json::Error) -> GeocodeError {
    GeocodeError::Malformed {
        provider: Provider::Tgos,
        detail: e.to_string(),
    }
}

fn check_message(message: Option<ResponseMessage>) -> Result<(), GeocodeError> {
    match message {
        Some(ResponseMessage::Problems(list)) => {
            let detail = list
                .iter()
                .map(|p| format!("{}: {}", p.parameter, p.message))
                .collect::<Vec<_>>()
                .join(", ");
            Err(GeocodeError::Upstream {
                provider: Provider::Tgos,
                detail,
            })
        }
        Some(ResponseMessage::Text(status)) => {
            tracing::debug!(%status, "TGOS data response");
            Ok(())
        }
        None => Ok(()),
    }
}

/// Decode a `/Range/Administrative` body. No matching unit is `NotFound`.
pub fn decode_range(body: &str) -> Result<AdministrativeTown, GeocodeError> {
    let resp: RangeResponse = serde_json::from_str(body).map_err(malformed)?;
    check_message(resp.response_message)?;

    if resp.response_count == 0 {
        return Err(GeocodeError::NotFound { provider: Provider::Tgos });
    }
    let unit = resp
        .response_data
        .into_iter()
        .next()
        .ok_or(GeocodeError::NotFound { provider: Provider::Tgos })?;

    Ok(AdministrativeTown {
        county: unit.countyname,
        town: unit.townname,
    })
}

/// Decode a `/Theme/Query` body. Features without usable coordinates are
/// skipped; an empty result is an empty list.
pub fn decode_theme(body: &str) -> Result<Vec<NearbyRestaurant>, GeocodeError> {
    let resp: ThemeResponse = serde_json::from_str(body).map_err(malformed)?;
    check_message(resp.response_message)?;

    if resp.response_count == 0 {
        return Ok(Vec::new());
    }
    let Some(features) = resp.features else {
        return Ok(Vec::new());
    };

    Ok(features.into_iter().filter_map(into_restaurant).collect())
}

fn into_restaurant(feature: Feature) -> Option<NearbyRestaurant> {
    let coord = |i: usize| {
        feature
            .geometry
            .as_ref()
            .and_then(|g| g.coordinates.get(i).copied().flatten())
    };
    let lng = feature.properties.lng.or_else(|| coord(0))?;
    let lat = feature.properties.lat.or_else(|| coord(1))?;
    if !lng.is_finite() || !lat.is_finite() {
        return None;
    }

    let props = feature.properties;
    let name = props
        .category
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNNAMED_RESTAURANT)
        .to_string();

    Some(NearbyRestaurant {
        name,
        address: props.address,
        village: props.villname,
        lat,
        lng,
    })
}

#[cfg(feature = "net")]
pub use http::TgosDataClient;

#[cfg(feature = "net")]
mod http {
    use super::{decode_range, decode_theme, AdministrativeTown, NearbyRestaurant, RESTAURANT_KEYWORD, RESTAURANT_THEME_ID};
    use crate::error::{GeocodeError, Provider};

    /// Client for the TGOS data theme API. Every request carries `Apikey`.
    pub struct TgosDataClient {
        client: reqwest::Client,
        endpoint: String,
        api_key: String,
    }

    impl TgosDataClient {
        pub fn new(client: reqwest::Client, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
            Self {
                client,
                endpoint: endpoint.into().trim_end_matches('/').to_string(),
                api_key: api_key.into(),
            }
        }

        async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<String, GeocodeError> {
            let transport = |e: reqwest::Error| GeocodeError::Transport {
                provider: Provider::Tgos,
                detail: e.to_string(),
            };

            tracing::debug!(path, "TGOS data request");
            let response = self
                .client
                .get(format!("{}{}", self.endpoint, path))
                .query(&[("Apikey", self.api_key.as_str())])
                .query(params)
                .send()
                .await
                .map_err(transport)?;

            let status = response.status();
            if !status.is_success() {
                return Err(GeocodeError::Status {
                    provider: Provider::Tgos,
                    status: status.as_u16(),
                });
            }
            response.text().await.map_err(transport)
        }

        /// Town containing `(lat, lng)`.
        pub async fn administrative_town(&self, lat: f64, lng: f64) -> Result<AdministrativeTown, GeocodeError> {
            let body = self
                .get(
                    "/Range/Administrative",
                    &[("Unit", "town".to_string()), ("Lng", lng.to_string()), ("Lat", lat.to_string())],
                )
                .await?;
            decode_range(&body)
        }

        /// Restaurant points registered in `county`/`town`.
        pub async fn restaurants_by_town(&self, county: &str, town: &str) -> Result<Vec<NearbyRestaurant>, GeocodeError> {
            let body = self
                .get(
                    "/Theme/Query",
                    &[
                        ("Theme_Id", RESTAURANT_THEME_ID.to_string()),
                        ("County", county.to_string()),
                        ("Town", town.to_string()),
                        ("Keywords", RESTAURANT_KEYWORD.to_string()),
                    ],
                )
                .await?;
            decode_theme(&body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn range_first_unit_wins() {
        let body = r#"{"responseMessage":"Success","responseCount":1,
            "responseData":[{"countyname":"臺北市","townname":"大安區"},{"countyname":"x","townname":"y"}]}"#;
        let t = decode_range(body).unwrap();
        assert_eq!(t, AdministrativeTown { county: "臺北市".into(), town: "大安區".into() });
    }

    #[test]
    fn range_without_data_is_not_found() {
        for body in [
            r#"{"responseMessage":"Success","responseCount":0}"#,
            r#"{"responseMessage":"Success","responseCount":1,"responseData":[]}"#,
        ] {
            let err = decode_range(body).unwrap_err();
            assert_eq!(err.kind(), FailureKind::NotFound, "{body}");
        }
    }

    #[test]
    fn parameter_problems_become_upstream_errors() {
        let body = r#"{"responseMessage":[{"parameter":"Lng","message":"out of range"},{"parameter":"Lat","message":"required"}],"responseCount":0}"#;
        let err = decode_range(body).unwrap_err();
        assert_eq!(
            err.to_string(),
            "tgos: service reported an error: Lng: out of range, Lat: required"
        );
        assert!(matches!(decode_theme(body), Err(GeocodeError::Upstream { .. })));
    }

    #[test]
    fn theme_prefers_properties_and_skips_unusable() {
        let body = r#"{"responseMessage":"Success","responseCount":4,"features":[
            {"geometry":{"type":"Point","coordinates":[121.0,25.0]},
             "properties":{"category":" 小吃店 ","address":"大安路1號","villname":"錦安里","lng":121.5,"lat":25.03}},
            {"geometry":{"type":"Point","coordinates":[121.6,25.1]},"properties":{"category":"  "}},
            {"geometry":{"type":"Point","coordinates":[]},"properties":{"category":"no coords"}},
            {"properties":{"category":"half","lng":121.4}}
        ]}"#;
        let list = decode_theme(body).unwrap();
        assert_eq!(list.len(), 2);

        assert_eq!(list[0].name, "小吃店");
        assert_eq!(list[0].lng, 121.5);
        assert_eq!(list[0].lat, 25.03);
        assert_eq!(list[0].village.as_deref(), Some("錦安里"));

        assert_eq!(list[1].name, UNNAMED_RESTAURANT);
        assert_eq!((list[1].lng, list[1].lat), (121.6, 25.1));
        assert_eq!(list[1].address, None);
    }

    #[test]
    fn empty_theme_is_an_empty_list() {
        assert!(decode_theme(r#"{"responseMessage":"Success","responseCount":0}"#).unwrap().is_empty());
        assert!(decode_theme(r#"{"responseMessage":"Success","responseCount":3}"#).unwrap().is_empty());
    }

    #[test]
    fn plain_or_missing_message_is_not_an_error() {
        let body = r#"{"responseMessage":"查詢成功","responseCount":1,"responseData":[{"countyname":"臺中市","townname":"西屯區"}]}"#;
        assert_eq!(decode_range(body).unwrap().town, "西屯區");

        let body = r#"{"responseCount":1,"responseData":[{"countyname":"臺中市","townname":"西區"}]}"#;
        assert_eq!(decode_range(body).unwrap().town, "西區");
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(decode_theme("<html>"), Err(GeocodeError::Malformed { .. })));
    }
}
