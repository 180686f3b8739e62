//! dinedb-cli: command-line interface for dinedb-core
//!
//! Loads the configured restaurant and ingredient datasets and answers
//! queries against them from the terminal. It can also resolve addresses
//! through the geocode fallback chain and query the TGOS data API.
//!
//! Usage examples
//! --------------
//!
//! - Show record counts
//!   $ dinedb --eco eco.csv --safety safety.csv stats
//!
//! - Search the safety list by keyword
//!   $ dinedb --dataset safety --safety safety.csv search 大安
//!
//! - Browse ingredient brands and one brand's products
//!   $ dinedb --ingredients ingredients.csv brands 漢堡
//!   $ dinedb --ingredients ingredients.csv brand "好味 Burger"
//!
//! - Geocode an address (TGOS when credentials are configured, else OSM)
//!   $ dinedb geocode 臺北市中正區重慶南路一段122號
//!
//! Logging goes to stderr and follows `RUST_LOG` (default `warn`).
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use dinedb_core::{Catalog, DataPaths, Restaurant, RestaurantSearch, Settings};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let mut settings = Settings::load_from(&args.config)
        .with_context(|| format!("failed to read settings from {}", args.config.display()))?;
    apply_overrides(&mut settings.data, &args);

    match &args.command {
        Commands::Geocode { address } => return geocode(&settings, address, args.json).await,
        Commands::Town { lat, lng } => return town(&settings, *lat, *lng, args.json).await,
        Commands::Nearby { county, town } => return nearby(&settings, county, town, args.json).await,
        _ => {}
    }

    let catalog = Catalog::load(&settings.data).context("failed to load datasets")?;
    let index = catalog.restaurants(args.dataset);

    match args.command {
        Commands::Stats => {
            let eco = catalog.eco_friendly.stats();
            let safety = catalog.safety.stats();
            if args.json {
                print_json(&serde_json::json!({
                    "ecoFriendly": eco,
                    "safety": safety,
                    "ingredients": catalog.ingredients.len(),
                    "brands": catalog.ingredients.brand_count(),
                    "divisions": catalog.gazetteer.len(),
                }))?;
            } else {
                println!("Catalog statistics:");
                println!("  Eco-friendly restaurants: {} ({} action labels)", eco.records, eco.action_labels);
                println!("  Safety-graded restaurants: {} ({} region-tagged)", safety.records, safety.with_region);
                println!("  Ingredient rows: {} ({} brands)", catalog.ingredients.len(), catalog.ingredients.brand_count());
                println!("  Administrative divisions: {}", catalog.gazetteer.len());
            }
        }

        Commands::List => print_restaurants(index.list_all().iter(), args.json)?,

        Commands::Search { keyword } => {
            let hits = index.search(&keyword);
            if hits.is_empty() && !args.json {
                println!("No restaurants found matching: {keyword}");
            } else {
                print_restaurants(hits.into_iter(), args.json)?;
            }
        }

        Commands::Suggest { keyword, limit } => print_restaurants(index.suggest(&keyword, limit).into_iter(), args.json)?,

        Commands::Find { name } => match index.find_by_exact_name(&name) {
            Some(r) if args.json => print_json(r)?,
            Some(r) => {
                println!("Name: {}", r.name);
                println!("Address: {}", r.address.as_deref().unwrap_or("-"));
                println!("Phone: {}", r.phone.as_deref().unwrap_or("-"));
                println!("Rating: {}", r.rating.as_deref().unwrap_or("-"));
                if !r.eco_actions.is_empty() {
                    println!("Eco actions: {}", r.eco_actions.join(", "));
                }
                if let Some(county) = &r.county {
                    println!("Region: {} {}", county, r.town.as_deref().unwrap_or(""));
                }
            }
            None => eprintln!("No restaurant named: {name}"),
        },

        Commands::Actions => {
            let labels = index.distinct_action_labels();
            if args.json {
                print_json(&labels)?;
            } else {
                for label in labels {
                    println!("{label}");
                }
            }
        }

        Commands::Brands { keyword } => {
            let brands = catalog.ingredients.suggest_brands(&keyword);
            if args.json {
                print_json(&brands)?;
            } else {
                for b in brands {
                    match &b.company_name {
                        Some(company) => println!("{} ({})", b.brand_name, company),
                        None => println!("{}", b.brand_name),
                    }
                }
            }
        }

        Commands::Brand { name } => {
            let details = catalog.ingredients.brand_ingredients(&name);
            if args.json {
                print_json(&details)?;
            } else if details.is_empty() {
                println!("No ingredient data for brand: {name}");
            } else {
                for d in details {
                    println!(
                        "- {}: {}",
                        d.product_name.as_deref().unwrap_or(&d.brand_name),
                        d.ingredient_name.as_deref().unwrap_or("-")
                    );
                    if let Some(origin) = &d.ingredient_brand {
                        println!("    origin: {origin}");
                    }
                }
            }
        }

        Commands::Geocode { .. } | Commands::Town { .. } | Commands::Nearby { .. } => {}
    }

    Ok(())
}

fn apply_overrides(data: &mut DataPaths, args: &CliArgs) {
    let pick = |flag: &Option<std::path::PathBuf>, slot: &mut Option<std::path::PathBuf>| {
        if flag.is_some() {
            slot.clone_from(flag);
        }
    };
    pick(&args.eco, &mut data.eco_friendly);
    pick(&args.safety, &mut data.safety);
    pick(&args.ingredients, &mut data.ingredients);
    pick(&args.gazetteer, &mut data.gazetteer);
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_restaurants<'a>(items: impl Iterator<Item = &'a Restaurant>, json: bool) -> anyhow::Result<()> {
    if json {
        let list: Vec<&Restaurant> = items.collect();
        return print_json(&list);
    }
    for r in items {
        match r.address() {
            Some(addr) => println!("{} | {}", r.name(), addr),
            None => println!("{}", r.name()),
        }
    }
    Ok(())
}

#[cfg(feature = "net")]
async fn geocode(settings: &Settings, address: &str, json: bool) -> anyhow::Result<()> {
    let resolver = dinedb_core::GeocodeResolver::from_settings(&settings.geocode)?;
    if !resolver.has_primary() {
        tracing::info!("TGOS credentials not configured, using nominatim only");
    }

    match resolver.resolve(address).await {
        Ok(r) if json => print_json(&*r),
        Ok(r) => {
            println!("{:.6}, {:.6}", r.lat, r.lng);
            println!("{} [{}]", r.display_name, r.source);
            Ok(())
        }
        Err(e) => {
            let hint = match e.kind() {
                dinedb_core::FailureKind::BadInput => "please enter an address",
                dinedb_core::FailureKind::NotFound => "no location matched this address",
                dinedb_core::FailureKind::Unavailable => "geocoding service unavailable, try again later",
            };
            Err(anyhow::Error::new(e).context(hint))
        }
    }
}

#[cfg(feature = "net")]
fn data_client(settings: &Settings) -> anyhow::Result<dinedb_core::TgosDataClient> {
    let key = settings
        .geocode
        .tgos_data_api_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .context("DINEDB_GEOCODE__TGOS_DATA_API_KEY is not set")?;
    let client = dinedb_core::geocode::http_client(&settings.geocode)?;
    Ok(dinedb_core::TgosDataClient::new(client, settings.geocode.tgos_data_endpoint.clone(), key))
}

#[cfg(feature = "net")]
async fn town(settings: &Settings, lat: f64, lng: f64, json: bool) -> anyhow::Result<()> {
    let t = data_client(settings)?.administrative_town(lat, lng).await?;
    if json {
        print_json(&t)
    } else {
        println!("{} {}", t.county, t.town);
        Ok(())
    }
}

#[cfg(feature = "net")]
async fn nearby(settings: &Settings, county: &str, town: &str, json: bool) -> anyhow::Result<()> {
    let list = data_client(settings)?.restaurants_by_town(county, town).await?;
    if json {
        return print_json(&list);
    }
    if list.is_empty() {
        println!("No restaurants registered in {county}{town}");
    }
    for r in list {
        println!("{} ({:.5}, {:.5}) {}", r.name, r.lat, r.lng, r.address.as_deref().unwrap_or(""));
    }
    Ok(())
}

#[cfg(not(feature = "net"))]
async fn geocode(_: &Settings, _: &str, _: bool) -> anyhow::Result<()> {
    anyhow::bail!("built without the 'net' feature")
}

#[cfg(not(feature = "net"))]
async fn town(_: &Settings, _: f64, _: f64, _: bool) -> anyhow::Result<()> {
    anyhow::bail!("built without the 'net' feature")
}

#[cfg(not(feature = "net"))]
async fn nearby(_: &Settings, _: &str, _: &str, _: bool) -> anyhow::Result<()> {
    anyhow::bail!("built without the 'net' feature")
}
