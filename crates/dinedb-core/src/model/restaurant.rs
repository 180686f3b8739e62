// crates/dinedb-core/src/model/restaurant.rs
use crate::alias::{self, RestaurantAliases, ECO_FRIENDLY, SAFETY};
use crate::gazetteer::Gazetteer;
use crate::loader::RawRow;
use crate::text::fold_key;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which source family a restaurant file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    /// Eco-friendly restaurant list; carries the "extra actions" column.
    EcoFriendly,
    /// Food-safety graded list; records are tagged with county/town.
    Safety,
}

impl Dataset {
    pub fn aliases(self) -> &'static RestaurantAliases {
        match self {
            Dataset::EcoFriendly => &ECO_FRIENDLY,
            Dataset::Safety => &SAFETY,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dataset::EcoFriendly => f.write_str("eco"),
            Dataset::Safety => f.write_str("safety"),
        }
    }
}

impl FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eco" | "eco_friendly" | "green" => Ok(Dataset::EcoFriendly),
            "safety" | "grade" => Ok(Dataset::Safety),
            other => Err(format!("unknown dataset '{other}' (expected eco|safety)")),
        }
    }
}

/// A normalized, query-ready restaurant entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// Eco level text or inspection grade, depending on the dataset.
    pub rating: Option<String>,
    /// Always present; only the eco-friendly dataset fills it.
    pub eco_actions: Vec<String>,
    pub county: Option<String>,
    pub town: Option<String>,
}

impl Restaurant {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

/// Folded name/address pair used only for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchKey {
    pub name: String,
    pub address: String,
}

impl SearchKey {
    pub(crate) fn of(r: &Restaurant) -> Self {
        Self {
            name: fold_key(&r.name),
            address: r.address.as_deref().map(fold_key).unwrap_or_default(),
        }
    }
}

/// Split the free-text "extra actions" field into labels.
///
/// Splits on `,`, `，` and `、`, trims quotes and whitespace from every
/// token, and drops empty or purely numeric tokens (stray row indices).
pub fn parse_eco_actions(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    raw.split([',', '，', '、'])
        .map(|t| t.trim_matches(|c: char| c == '"' || c == '\'' || c.is_whitespace()))
        .filter(|t| !t.is_empty() && !t.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

/// Map one decoded row to a restaurant, or `None` when the name is missing.
pub fn normalize_row(row: &RawRow, dataset: Dataset, gazetteer: Option<&Gazetteer>) -> Option<Restaurant> {
    let aliases = dataset.aliases();
    let name = alias::resolve(row, aliases.name)?;
    let address = alias::resolve(row, aliases.address);
    let rating = alias::resolve(row, aliases.rating);

    let eco_actions = match dataset {
        Dataset::EcoFriendly => parse_eco_actions(rating.as_deref()),
        Dataset::Safety => Vec::new(),
    };

    let region = match (dataset, gazetteer, address.as_deref()) {
        (Dataset::Safety, Some(g), Some(addr)) => g.locate(addr),
        _ => Default::default(),
    };

    Some(Restaurant {
        name,
        address,
        phone: alias::resolve(row, aliases.phone),
        rating,
        eco_actions,
        county: region.county,
        town: region.town,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs.iter().copied().collect()
    }

    #[test]
    fn eco_actions_split_on_all_three_delimiters() {
        let got = parse_eco_actions(Some("自備餐具,減塑，蔬食、 \"在地食材\" "));
        assert_eq!(got, vec!["自備餐具", "減塑", "蔬食", "在地食材"]);
    }

    #[test]
    fn eco_actions_drop_numeric_and_empty_tokens() {
        let got = parse_eco_actions(Some("12,減塑,,'  ', 3 ,不提供吸管,007"));
        assert_eq!(got, vec!["減塑", "不提供吸管"]);
        assert!(got.iter().all(|t| !t.chars().all(|c| c.is_ascii_digit())));
        assert!(parse_eco_actions(None).is_empty());
    }

    #[test]
    fn nameless_row_is_dropped() {
        let r = row(&[("地址", "臺北市"), ("餐廳名稱", "  ")]);
        assert_eq!(normalize_row(&r, Dataset::EcoFriendly, None), None);
    }

    #[test]
    fn eco_row_normalized() {
        let r = row(&[
            ("餐廳名稱", " 綠食堂 "),
            ("餐廳地址", "臺北市中正區"),
            ("tel", "02-1234"),
            ("額外環保作為", "自備餐具、減塑"),
        ]);
        let rec = normalize_row(&r, Dataset::EcoFriendly, None).unwrap();
        assert_eq!(rec.name, "綠食堂");
        assert_eq!(rec.phone.as_deref(), Some("02-1234"));
        assert_eq!(rec.rating.as_deref(), Some("自備餐具、減塑"));
        assert_eq!(rec.eco_actions, vec!["自備餐具", "減塑"]);
        assert_eq!(rec.county, None);
    }

    #[test]
    fn safety_row_gets_region_and_no_actions() {
        let g: Gazetteer = [("臺北市".to_string(), "中正區".to_string())].into_iter().collect();
        let r = row(&[("業者名稱", "安心小館"), ("地址", "台北市中正區"), ("評核結果", "優")]);
        let rec = normalize_row(&r, Dataset::Safety, Some(&g)).unwrap();
        assert_eq!(rec.county.as_deref(), Some("臺北市"));
        assert_eq!(rec.town.as_deref(), Some("中正區"));
        assert_eq!(rec.rating.as_deref(), Some("優"));
        assert!(rec.eco_actions.is_empty());
    }

    #[test]
    fn dataset_from_str() {
        assert_eq!("eco".parse::<Dataset>(), Ok(Dataset::EcoFriendly));
        assert_eq!("Safety".parse::<Dataset>(), Ok(Dataset::Safety));
        assert!("other".parse::<Dataset>().is_err());
    }
}
