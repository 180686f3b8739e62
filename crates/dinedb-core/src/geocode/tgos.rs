// crates/dinedb-core/src/geocode/tgos.rs
//! Primary provider: TGOS address locator plus TWD97 reprojection.

use super::provider::{Capabilities, CapabilityLoader, GeocodeProvider, LocatedAddress, ProjectedPoint};
use super::GeocodeResult;
use crate::error::{GeocodeError, Provider};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Geocoder backed by a lazily acquired locator and reprojector.
///
/// The capabilities are loaded on first use. Concurrent first callers share
/// one in-flight load; a successful load is kept for the life of this value
/// and a failed one is retried by the next caller.
pub struct TgosGeocoder {
    loader: Arc<dyn CapabilityLoader>,
    capabilities: OnceCell<Capabilities>,
}

impl TgosGeocoder {
    pub fn new(loader: Arc<dyn CapabilityLoader>) -> Self {
        Self {
            loader,
            capabilities: OnceCell::new(),
        }
    }

    async fn capabilities(&self) -> Result<&Capabilities, GeocodeError> {
        self.capabilities
            .get_or_try_init(|| async {
                tracing::debug!("loading TGOS locator capabilities");
                self.loader.load().await
            })
            .await
    }
}

#[async_trait]
impl GeocodeProvider for TgosGeocoder {
    async fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        let caps = self.capabilities().await?;
        let located = caps.locator.locate(address).await?;
        let (lat, lng) = caps.reprojector.to_wgs84(located.point)?;

        Ok(GeocodeResult {
            lat,
            lng,
            display_name: located.display_name.unwrap_or_else(|| address.to_string()),
            kind: located.kind,
            source: Provider::Tgos,
        })
    }
}

// ---------------------------------------------------------------------------
// QueryAddr payload
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct QueryAddrResponse {
    #[serde(rename = "Info", default)]
    info: Vec<QueryAddrInfo>,
    #[serde(rename = "AddressList", default)]
    addresses: Vec<QueryAddrCandidate>,
}

#[derive(Debug, Deserialize)]
struct QueryAddrInfo {
    #[serde(rename = "IsSuccess", default)]
    is_success: Option<String>,
    #[serde(rename = "OutMatchType", default)]
    match_type: Option<String>,
    #[serde(rename = "OutTraceInfo", default)]
    trace: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryAddrCandidate {
    #[serde(rename = "FULL_ADDR", default)]
    full_addr: Option<String>,
    #[serde(rename = "X")]
    x: Coord,
    #[serde(rename = "Y")]
    y: Coord,
}

/// TGOS emits grid coordinates either as JSON numbers or as strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Coord {
    Num(f64),
    Text(String),
}

impl Coord {
    fn value(&self) -> Option<f64> {
        match self {
            Coord::Num(v) => Some(*v),
            Coord::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// The ASMX endpoint may wrap its JSON in `<string xmlns=...>...</string>`.
fn unwrap_asmx(body: &str) -> &str {
    let body = body.trim();
    if !body.starts_with('<') {
        return body;
    }
    let start = body
        .find("<string")
        .and_then(|i| body[i..].find('>').map(|j| i + j + 1));
    let end = body.rfind("</string>");
    match (start, end) {
        (Some(s), Some(e)) if s <= e => body[s..e].trim(),
        _ => body,
    }
}

/// Decode a QueryAddr body into the best candidate.
pub fn decode_locate(body: &str) -> Result<LocatedAddress, GeocodeError> {
    let malformed = |detail: String| GeocodeError::Malformed {
        provider: Provider::Tgos,
        detail,
    };

    let json = unwrap_asmx(body).replace("&quot;", "\"").replace("&amp;", "&");
    let resp: QueryAddrResponse = serde_json::from_str(&json).map_err(|e| malformed(e.to_string()))?;

    let info = resp.info.first();
    if let Some(i) = info {
        let ok = i.is_success.as_deref().map(|s| s.eq_ignore_ascii_case("true")).unwrap_or(true);
        if !ok {
            return Err(GeocodeError::Upstream {
                provider: Provider::Tgos,
                detail: i.trace.clone().unwrap_or_else(|| "locate failed".to_string()),
            });
        }
    }

    let candidate = resp.addresses.into_iter().next().ok_or(GeocodeError::NotFound {
        provider: Provider::Tgos,
    })?;

    let (Some(x), Some(y)) = (candidate.x.value(), candidate.y.value()) else {
        return Err(malformed("candidate coordinates are not numeric".to_string()));
    };

    Ok(LocatedAddress {
        point: ProjectedPoint { x, y },
        display_name: candidate.full_addr.filter(|s| !s.trim().is_empty()),
        kind: info.and_then(|i| i.match_type.clone()),
    })
}

#[cfg(feature = "net")]
pub use http::{HttpCapabilityLoader, TgosLocator};

#[cfg(feature = "net")]
mod http {
    use super::decode_locate;
    use crate::error::{GeocodeError, Provider};
    use crate::geocode::provider::{Capabilities, CapabilityLoader, LocatedAddress, Locator};
    use crate::geocode::reproject::Twd97Reprojector;
    use async_trait::async_trait;
    use std::sync::Arc;

    /// HTTP client for the TGOS `QueryAddr` locate service (EPSG:3826 output).
    pub struct TgosLocator {
        client: reqwest::Client,
        endpoint: String,
        app_id: String,
        api_key: String,
    }

    impl TgosLocator {
        pub fn new(client: reqwest::Client, endpoint: impl Into<String>, app_id: impl Into<String>, api_key: impl Into<String>) -> Self {
            Self {
                client,
                endpoint: endpoint.into(),
                app_id: app_id.into(),
                api_key: api_key.into(),
            }
        }
    }

    #[async_trait]
    impl Locator for TgosLocator {
        async fn locate(&self, address: &str) -> Result<LocatedAddress, GeocodeError> {
            let transport = |e: reqwest::Error| GeocodeError::Transport {
                provider: Provider::Tgos,
                detail: e.to_string(),
            };

            let response = self
                .client
                .get(&self.endpoint)
                .query(&[
                    ("oAPPId", self.app_id.as_str()),
                    ("oAPIKey", self.api_key.as_str()),
                    ("oAddress", address),
                    ("oSRS", "EPSG:3826"),
                    ("oFuzzyType", "2"),
                    ("oResultDataType", "JSON"),
                    ("oFuzzyBuffer", "0"),
                    ("oIsOnlyFullMatch", "false"),
                    ("oIsSupportPast", "true"),
                    ("oIsShowCodeBase", "false"),
                    ("oReturnMaxCount", "1"),
                ])
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

            let body = response.text().await.map_err(transport)?;
            decode_locate(&body)
        }
    }

    /// Builds the HTTP locator and the static TWD97 reprojector.
    pub struct HttpCapabilityLoader {
        client: reqwest::Client,
        endpoint: String,
        app_id: String,
        api_key: String,
    }

    impl HttpCapabilityLoader {
        pub fn new(client: reqwest::Client, endpoint: impl Into<String>, app_id: impl Into<String>, api_key: impl Into<String>) -> Self {
            Self {
                client,
                endpoint: endpoint.into(),
                app_id: app_id.into(),
                api_key: api_key.into(),
            }
        }
    }

    #[async_trait]
    impl CapabilityLoader for HttpCapabilityLoader {
        async fn load(&self) -> Result<Capabilities, GeocodeError> {
            if self.app_id.trim().is_empty() || self.api_key.trim().is_empty() {
                return Err(GeocodeError::MissingCredentials);
            }
            reqwest::Url::parse(&self.endpoint)
                .map_err(|e| GeocodeError::Capability(format!("invalid locate endpoint: {e}")))?;

            Ok(Capabilities {
                locator: Arc::new(TgosLocator::new(
                    self.client.clone(),
                    self.endpoint.clone(),
                    self.app_id.clone(),
                    self.api_key.clone(),
                )),
                reprojector: Arc::new(Twd97Reprojector),
            })
        }
    }
}
