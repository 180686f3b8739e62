// crates/dinedb-core/src/geocode/mod.rs

//! # Geocode Resolver
//!
//! Resolves a free-text address to coordinates through a two-step fallback
//! chain:
//!
//! 1. the primary provider (TGOS), only when credentials are configured;
//!    any failure is logged and swallowed;
//! 2. the secondary provider (Nominatim); its failure is returned.
//!
//! The first success per trimmed address is memoized in a [`GeocodeCache`]
//! owned by the resolver.

use crate::error::{GeocodeError, Provider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

mod cache;
pub mod nominatim;
pub mod provider;
pub mod reproject;
pub mod tgos;

pub use cache::GeocodeCache;
pub use provider::{Capabilities, CapabilityLoader, GeocodeProvider, LocatedAddress, Locator, ProjectedPoint, Reprojector};
pub use reproject::Twd97Reprojector;
pub use tgos::TgosGeocoder;

/// A resolved location in WGS84 degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResult {
    pub lat: f64,
    pub lng: f64,
    pub display_name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Which provider answered.
    pub source: Provider,
}

/// Primary-then-secondary geocoder with a per-address memo.
pub struct GeocodeResolver {
    primary: Option<Arc<dyn GeocodeProvider>>,
    secondary: Arc<dyn GeocodeProvider>,
    cache: GeocodeCache,
}

impl GeocodeResolver {
    pub fn new(primary: Option<Arc<dyn GeocodeProvider>>, secondary: Arc<dyn GeocodeProvider>) -> Self {
        Self {
            primary,
            secondary,
            cache: GeocodeCache::unbounded(),
        }
    }

    pub fn with_cache(mut self, cache: GeocodeCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &GeocodeCache {
        &self.cache
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Resolve `address`, consulting the cache first.
    ///
    /// Returns [`GeocodeError::EmptyAddress`] without any network activity
    /// when the trimmed input is empty. Repeated calls for the same trimmed
    /// address return the same shared result.
    pub async fn resolve(&self, address: &str) -> Result<Arc<GeocodeResult>, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }

        if let Some(hit) = self.cache.get(address) {
            tracing::debug!(address, source = %hit.source, "geocode cache hit");
            return Ok(hit);
        }

        let result = match self.try_primary(address).await {
            Some(r) => r,
            None => self.secondary.geocode(address).await?,
        };

        Ok(self.cache.insert(address.to_string(), result))
    }

    async fn try_primary(&self, address: &str) -> Option<GeocodeResult> {
        let primary = self.primary.as_ref()?;
        match primary.geocode(address).await {
            Ok(r) => Some(r),
            Err(error) => {
                tracing::warn!(
                    provider = %Provider::Tgos,
                    address,
                    %error,
                    "primary geocoder failed, falling back to nominatim"
                );
                None
            }
        }
    }
}

#[cfg(feature = "net")]
mod build {
    use super::nominatim::NominatimGeocoder;
    use super::tgos::HttpCapabilityLoader;
    use super::{GeocodeCache, GeocodeProvider, GeocodeResolver, TgosGeocoder};
    use crate::config::GeocodeSettings;
    use crate::error::GeocodeError;
    use std::sync::Arc;
    use std::time::Duration;

    /// Shared HTTP client with the configured timeout and user agent.
    pub fn http_client(settings: &GeocodeSettings) -> Result<reqwest::Client, GeocodeError> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs.max(1)))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| GeocodeError::Capability(format!("failed to build HTTP client: {e}")))
    }

    impl GeocodeResolver {
        /// Wire the HTTP providers from settings. TGOS joins the chain only
        /// when both credentials are present.
        pub fn from_settings(settings: &GeocodeSettings) -> Result<Self, GeocodeError> {
            let client = http_client(settings)?;

            let primary = settings.tgos_credentials().map(|(app_id, api_key)| {
                let loader = HttpCapabilityLoader::new(
                    client.clone(),
                    settings.tgos_locate_endpoint.clone(),
                    app_id,
                    api_key,
                );
                Arc::new(TgosGeocoder::new(Arc::new(loader))) as Arc<dyn GeocodeProvider>
            });

            let secondary = Arc::new(NominatimGeocoder::new(
                client,
                settings.nominatim_endpoint.clone(),
                settings.accept_language.clone(),
            ));

            Ok(Self::new(primary, secondary).with_cache(GeocodeCache::with_limit(settings.cache_max_entries)))
        }
    }
}

#[cfg(feature = "net")]
pub use build::http_client;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted provider that records every address it is asked about.
    struct Scripted {
        source: Provider,
        fail_with: Option<fn() -> GeocodeError>,
        calls: AtomicUsize,
        seen: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn ok(source: Provider) -> Arc<Self> {
            Arc::new(Self {
                source,
                fail_with: None,
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(source: Provider, err: fn() -> GeocodeError) -> Arc<Self> {
            Arc::new(Self {
                source,
                fail_with: Some(err),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GeocodeProvider for Scripted {
        async fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(address.to_string());
            if let Some(err) = self.fail_with {
                return Err(err());
            }
            Ok(GeocodeResult {
                lat: 25.03,
                lng: 121.56,
                display_name: format!("{} via {}", address, self.source),
                kind: None,
                source: self.source,
            })
        }
    }

    fn unavailable() -> GeocodeError {
        GeocodeError::Status { provider: Provider::Tgos, status: 502 }
    }

    fn nothing() -> GeocodeError {
        GeocodeError::NotFound { provider: Provider::Nominatim }
    }

    #[tokio::test]
    async fn empty_address_is_rejected_before_any_call() {
        let secondary = Scripted::ok(Provider::Nominatim);
        let resolver = GeocodeResolver::new(None, secondary.clone());
        let err = resolver.resolve("  \t ").await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::BadInput);
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn second_lookup_is_served_from_cache() {
        let secondary = Scripted::ok(Provider::Nominatim);
        let resolver = GeocodeResolver::new(None, secondary.clone());

        let a = resolver.resolve("臺北市中正區").await.unwrap();
        let b = resolver.resolve("  臺北市中正區 ").await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(secondary.calls(), 1);
        assert_eq!(secondary.seen.lock().unwrap().as_slice(), ["臺北市中正區"]);
    }

    #[tokio::test]
    async fn primary_answers_when_healthy() {
        let primary = Scripted::ok(Provider::Tgos);
        let secondary = Scripted::ok(Provider::Nominatim);
        let resolver = GeocodeResolver::new(Some(primary.clone()), secondary.clone());

        let r = resolver.resolve("addr").await.unwrap();
        assert_eq!(r.source, Provider::Tgos);
        assert_eq!(secondary.calls(), 0);
    }

    #[tokio::test]
    async fn primary_failure_falls_back_and_tags_source() {
        let primary = Scripted::failing(Provider::Tgos, unavailable);
        let secondary = Scripted::ok(Provider::Nominatim);
        let resolver = GeocodeResolver::new(Some(primary.clone()), secondary.clone());

        let r = resolver.resolve("addr").await.unwrap();
        assert_eq!(r.source, Provider::Nominatim);
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);

        // Cached: neither provider is asked again.
        resolver.resolve("addr").await.unwrap();
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
    }

    #[tokio::test]
    async fn secondary_failure_is_terminal_and_not_cached() {
        let primary = Scripted::failing(Provider::Tgos, unavailable);
        let secondary = Scripted::failing(Provider::Nominatim, nothing);
        let resolver = GeocodeResolver::new(Some(primary), secondary.clone());

        let err = resolver.resolve("nowhere").await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::NotFound);
        assert_eq!(err.provider(), Some(Provider::Nominatim));
        assert!(resolver.cache().is_empty());

        resolver.resolve("nowhere").await.unwrap_err();
        assert_eq!(secondary.calls(), 2);
    }

    #[tokio::test]
    async fn without_primary_only_secondary_is_used() {
        let secondary = Scripted::ok(Provider::Nominatim);
        let resolver = GeocodeResolver::new(None, secondary.clone());
        assert!(!resolver.has_primary());
        assert_eq!(resolver.resolve("x").await.unwrap().source, Provider::Nominatim);
    }

    #[tokio::test]
    async fn concurrent_distinct_addresses_all_cached() {
        let secondary = Scripted::ok(Provider::Nominatim);
        let resolver = Arc::new(GeocodeResolver::new(None, secondary.clone()));

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let r = Arc::clone(&resolver);
                tokio::spawn(async move { r.resolve(&format!("addr-{}", i % 8)).await })
            })
            .collect();
        for t in tasks {
            t.await.unwrap().unwrap();
        }
        assert_eq!(resolver.cache().len(), 8);
        assert!(secondary.calls() >= 8);
    }

    #[test]
    fn result_serializes_with_type_and_source() {
        let r = GeocodeResult {
            lat: 1.0,
            lng: 2.0,
            display_name: "n".into(),
            kind: Some("house".into()),
            source: Provider::Tgos,
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["type"], "house");
        assert_eq!(v["source"], "tgos");
        assert_eq!(v["displayName"], "n");
    }
}
