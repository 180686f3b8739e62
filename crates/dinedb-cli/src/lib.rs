//! dinedb-cli
//! ==========
//!
//! Command-line interface for the `dinedb-core` restaurant catalog.
//!
//! This crate primarily provides a binary (`dinedb-cli`). The library target
//! only exists so that docs.rs renders this overview.
//!
//! Basic usage:
//!
//! ```text
//! dinedb-cli --eco data/eco.csv search 素食
//! dinedb-cli --dataset safety --safety data/safety.csv --gazetteer data/towns.csv list
//! dinedb-cli --ingredients data/ingredients.csv brand 好味
//! dinedb-cli --json geocode 臺北市中正區重慶南路一段122號
//! ```
//!
//! Data paths and provider credentials can also come from `dinedb.toml` or
//! `DINEDB_*` environment variables; flags win over both.
//!
//! For programmatic access use the [`dinedb-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
