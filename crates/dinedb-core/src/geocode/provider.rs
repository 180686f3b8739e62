// crates/dinedb-core/src/geocode/provider.rs
use super::GeocodeResult;
use crate::error::GeocodeError;
use async_trait::async_trait;
use std::sync::Arc;

/// One link of the fallback chain.
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// `address` is already trimmed and non-empty.
    async fn geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError>;
}

/// A projected grid coordinate (metres) as returned by the primary locator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

/// Best candidate from an address locator, still in projected coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedAddress {
    pub point: ProjectedPoint,
    pub display_name: Option<String>,
    pub kind: Option<String>,
}

/// Resolves a free-text address to a projected point.
#[async_trait]
pub trait Locator: Send + Sync {
    async fn locate(&self, address: &str) -> Result<LocatedAddress, GeocodeError>;
}

/// Converts projected coordinates to `(lat, lng)` in WGS84 degrees.
pub trait Reprojector: Send + Sync {
    fn to_wgs84(&self, p: ProjectedPoint) -> Result<(f64, f64), GeocodeError>;
}

/// The two client-side dependencies the primary provider needs.
#[derive(Clone)]
pub struct Capabilities {
    pub locator: Arc<dyn Locator>,
    pub reprojector: Arc<dyn Reprojector>,
}

/// Acquires [`Capabilities`]. Called at most once per successful load.
#[async_trait]
pub trait CapabilityLoader: Send + Sync {
    async fn load(&self) -> Result<Capabilities, GeocodeError>;
}
