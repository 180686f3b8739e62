use clap::{Parser, Subcommand};
use dinedb_core::Dataset;
use std::path::PathBuf;

/// CLI arguments for dinedb-cli
#[derive(Debug, Parser)]
#[command(
    name = "dinedb",
    version,
    about = "CLI for searching restaurant open data and geocoding addresses"
)]
pub struct CliArgs {
    /// Settings file (TOML). Missing files are ignored.
    #[arg(short = 'c', long = "config", global = true, default_value = dinedb_core::config::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Eco-friendly restaurant CSV (overrides the settings file)
    #[arg(long = "eco", global = true, env = "DINEDB_ECO_CSV")]
    pub eco: Option<PathBuf>,

    /// Food-safety graded restaurant CSV
    #[arg(long = "safety", global = true, env = "DINEDB_SAFETY_CSV")]
    pub safety: Option<PathBuf>,

    /// Ingredient-origin CSV
    #[arg(long = "ingredients", global = true, env = "DINEDB_INGREDIENTS_CSV")]
    pub ingredients: Option<PathBuf>,

    /// County/town list used to tag safety records
    #[arg(long = "gazetteer", global = true, env = "DINEDB_GAZETTEER_CSV")]
    pub gazetteer: Option<PathBuf>,

    /// Which restaurant dataset the query commands use (eco or safety)
    #[arg(short = 'd', long = "dataset", global = true, default_value = "eco")]
    pub dataset: Dataset,

    /// Print results as JSON
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show record counts for every loaded dataset
    Stats,

    /// List every restaurant of the selected dataset
    List,

    /// Search names and addresses for a keyword
    Search {
        /// Keyword (case and whitespace insensitive)
        keyword: String,
    },

    /// Suggest restaurants whose name contains a keyword
    Suggest {
        keyword: String,
        /// Maximum number of suggestions
        #[arg(short = 'n', long = "limit", default_value_t = dinedb_core::DEFAULT_SUGGEST_LIMIT)]
        limit: usize,
    },

    /// Look up a restaurant by its exact name
    Find {
        name: String,
    },

    /// List the distinct eco action labels
    Actions,

    /// List ingredient brands, optionally filtered by keyword
    Brands {
        #[arg(default_value = "")]
        keyword: String,
    },

    /// Show the products and ingredient origins of one brand
    Brand {
        name: String,
    },

    /// Resolve an address to coordinates
    Geocode {
        address: String,
    },

    /// Find the county and town containing a coordinate
    Town {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },

    /// List TGOS restaurant points registered in a town
    Nearby {
        #[arg(long)]
        county: String,
        #[arg(long)]
        town: String,
    },
}
