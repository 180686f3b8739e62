//! Geocode fallback example for dinedb-rs
//!
//! Wires the resolver with a primary provider that always fails, so every
//! lookup falls through to the secondary. Run with `RUST_LOG=warn` to see the
//! swallowed primary failure. Set `DINEDB_LIVE=1` to also query the real
//! services configured by `dinedb.toml` / `DINEDB_*`.

use async_trait::async_trait;
use dinedb_rs::geocode::GeocodeProvider;
use dinedb_rs::prelude::*;
use std::sync::Arc;

struct Offline;

#[async_trait]
impl GeocodeProvider for Offline {
    async fn geocode(&self, _address: &str) -> std::result::Result<GeocodeResult, GeocodeError> {
        Err(GeocodeError::Transport {
            provider: Provider::Tgos,
            detail: "offline".into(),
        })
    }
}

struct Fixed;

#[async_trait]
impl GeocodeProvider for Fixed {
    async fn geocode(&self, address: &str) -> std::result::Result<GeocodeResult, GeocodeError> {
        Ok(GeocodeResult {
            lat: 25.0330,
            lng: 121.5654,
            display_name: format!("{address} (fixture)"),
            kind: None,
            source: Provider::Nominatim,
        })
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber_init();
    println!("=== DineDB-RS Geocode Fallback Example ===\n");

    let resolver = GeocodeResolver::new(Some(Arc::new(Offline)), Arc::new(Fixed));
    let first = resolver.resolve("臺北市信義區市府路1號").await?;
    let again = resolver.resolve(" 臺北市信義區市府路1號 ").await?;
    println!("  {} -> ({}, {}) via {}", first.display_name, first.lat, first.lng, first.source);
    println!("  second lookup shared the cached result: {}", Arc::ptr_eq(&first, &again));

    if std::env::var("DINEDB_LIVE").is_ok() {
        println!("\n--- Live lookup ---");
        let settings = Settings::load()?;
        let live = GeocodeResolver::from_settings(&settings.geocode)?;
        match live.resolve("臺北市中正區重慶南路一段122號").await {
            Ok(r) => println!("  ({:.6}, {:.6}) {} [{}]", r.lat, r.lng, r.display_name, r.source),
            Err(e) => println!("  ✗ {e}"),
        }
    }

    Ok(())
}

fn tracing_subscriber_init() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
