//! Error handling example for dinedb-rs
//!
//! This example demonstrates how load errors and geocode failures surface,
//! and how queries behave on degenerate input.

use dinedb_rs::prelude::*;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== DineDB-RS Error Handling Example ===\n");

    // Example 1: a configured file that does not exist
    println!("--- Example 1: Missing dataset file ---");
    let paths = DataPaths {
        eco_friendly: Some(PathBuf::from("/no/such/eco.csv")),
        ..Default::default()
    };
    match Catalog::load(&paths) {
        Ok(_) => println!("  unexpectedly loaded"),
        Err(DineError::NotFound(msg)) => println!("  ✗ {msg}"),
        Err(e) => return Err(e),
    }
    println!();

    // Example 2: absent paths are not errors
    println!("--- Example 2: Nothing configured ---");
    let empty = Catalog::load(&DataPaths::default())?;
    println!("  eco records: {}", empty.eco_friendly.len());
    println!();

    // Example 3: degenerate queries never match
    println!("--- Example 3: Blank and unmatched queries ---");
    let idx = RestaurantIndex::from_csv("name,address\nA,X\n", Dataset::EcoFriendly, None);
    for q in ["", "   ", "\u{3000}", "zzz"] {
        println!("  search({q:?}) -> {} hit(s)", idx.search(q).len());
    }
    println!("  find_by_exact_name(\"\") -> {:?}", idx.find_by_exact_name("").map(|r| r.name()));
    println!();

    // Example 4: geocode failures collapse to three kinds
    println!("--- Example 4: Geocode failure kinds ---");
    let resolver = GeocodeResolver::from_settings(&Settings::default().geocode)
        .map_err(|e| DineError::InvalidData(e.to_string()))?;
    match resolver.resolve("   ").await {
        Ok(r) => println!("  resolved: {}", r.display_name),
        Err(e) => match e.kind() {
            FailureKind::BadInput => println!("  ✗ bad input: {e}"),
            FailureKind::NotFound => println!("  ✗ no match: {e}"),
            FailureKind::Unavailable => println!("  ✗ unavailable: {e}"),
        },
    }

    Ok(())
}
