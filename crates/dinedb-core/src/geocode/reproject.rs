// crates/dinedb-core/src/geocode/reproject.rs
//! TWD97 / TM2 zone 121 (EPSG:3826) to geographic WGS84 (EPSG:4326).
//!
//! GRS80 and WGS84 differ by well under a millimetre at these latitudes, so
//! the datum shift is ignored and only the inverse transverse Mercator is
//! applied (Snyder, "Map Projections: A Working Manual", eq. 8-18 to 8-25).

use super::provider::{ProjectedPoint, Reprojector};
use crate::error::GeocodeError;

const A: f64 = 6_378_137.0;
const F: f64 = 1.0 / 298.257_222_101;
const K0: f64 = 0.9999;
const FALSE_EASTING: f64 = 250_000.0;
const LON0_DEG: f64 = 121.0;

/// Inverse transverse Mercator for the TWD97 TM2 grid used by TGOS.
#[derive(Debug, Clone, Copy, Default)]
pub struct Twd97Reprojector;

impl Reprojector for Twd97Reprojector {
    fn to_wgs84(&self, p: ProjectedPoint) -> Result<(f64, f64), GeocodeError> {
        if !p.x.is_finite() || !p.y.is_finite() {
            return Err(GeocodeError::Capability(format!(
                "non-finite TWD97 coordinate ({}, {})",
                p.x, p.y
            )));
        }
        Ok(inverse_tm(p.x, p.y))
    }
}

/// Returns `(lat, lng)` in decimal degrees.
fn inverse_tm(easting: f64, northing: f64) -> (f64, f64) {
    let e2 = F * (2.0 - F);
    let ep2 = e2 / (1.0 - e2);
    let x = easting - FALSE_EASTING;

    let m = northing / K0;
    let mu = m / (A * (1.0 - e2 / 4.0 - 3.0 * e2.powi(2) / 64.0 - 5.0 * e2.powi(3) / 256.0));

    let sq = (1.0 - e2).sqrt();
    let e1 = (1.0 - sq) / (1.0 + sq);
    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1.powi(2) / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

    let (sin1, cos1) = phi1.sin_cos();
    let tan1 = phi1.tan();
    let c1 = ep2 * cos1.powi(2);
    let t1 = tan1.powi(2);
    let w = 1.0 - e2 * sin1.powi(2);
    let n1 = A / w.sqrt();
    let r1 = A * (1.0 - e2) / w.powf(1.5);
    let d = x / (n1 * K0);

    let lat = phi1
        - (n1 * tan1 / r1)
            * (d.powi(2) / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1.powi(2) - 9.0 * ep2) * d.powi(4) / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1.powi(2) - 252.0 * ep2 - 3.0 * c1.powi(2))
                    * d.powi(6)
                    / 720.0);

    let lng = LON0_DEG.to_radians()
        + (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1.powi(2) + 8.0 * ep2 + 24.0 * t1.powi(2)) * d.powi(5)
                / 120.0)
            / cos1;

    (lat.to_degrees(), lng.to_degrees())
}
