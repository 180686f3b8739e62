// crates/dinedb-core/src/gazetteer.rs
use crate::alias::{self, GAZETTEER_COUNTY, GAZETTEER_TOWN};
use crate::loader::decode_table;
use crate::text::normalize_place;
use serde::{Deserialize, Serialize};

/// One administrative division: a county/city and a town/district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    pub county: String,
    pub town: String,
}

/// Result of tagging an address with its region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub county: Option<String>,
    pub town: Option<String>,
}

/// Ordered list of administrative divisions.
///
/// The list is supplied by the caller already sorted by specificity; lookups
/// are prefix-based and the first hit in list order wins.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    divisions: Vec<Division>,
    /// `(county, county + town)` with place-name variants normalized.
    keys: Vec<(String, String)>,
}

impl Gazetteer {
    pub fn new(divisions: Vec<Division>) -> Self {
        let keys = divisions
            .iter()
            .map(|d| {
                let county = normalize_place(&d.county);
                let full = format!("{county}{}", normalize_place(&d.town));
                (county, full)
            })
            .collect();
        Self { divisions, keys }
    }

    /// Build from a two-column CSV (`county,town` or the Chinese headers).
    /// Rows lacking either column are skipped.
    pub fn from_csv(content: &str) -> Self {
        let divisions = decode_table(content)
            .iter()
            .filter_map(|row| {
                Some(Division {
                    county: alias::resolve(row, GAZETTEER_COUNTY)?,
                    town: alias::resolve(row, GAZETTEER_TOWN)?,
                })
            })
            .collect();
        Self::new(divisions)
    }

    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }

    pub fn len(&self) -> usize {
        self.divisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.divisions.is_empty()
    }

    /// Tag an address with county and town.
    ///
    /// Tries a full `county + town` prefix first, then a county-only prefix
    /// (town stays `None`). Both fields are `None` when nothing matches.
    pub fn locate(&self, address: &str) -> Region {
        let addr = normalize_place(address.trim());
        if addr.is_empty() {
            return Region::default();
        }

        if let Some(i) = self.keys.iter().position(|(_, full)| addr.starts_with(full.as_str())) {
            let d = &self.divisions[i];
            return Region {
                county: Some(d.county.clone()),
                town: Some(d.town.clone()),
            };
        }

        self.keys
            .iter()
            .position(|(county, _)| addr.starts_with(county.as_str()))
            .map(|i| Region {
                county: Some(self.divisions[i].county.clone()),
                town: None,
            })
            .unwrap_or_default()
    }
}

impl FromIterator<(String, String)> for Gazetteer {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(county, town)| Division { county, town })
                .collect(),
        )
    }
}
