// crates/dinedb-core/src/model/ingredient.rs
use crate::alias::{self, INGREDIENTS};
use crate::loader::{decode_table, RawRow};
use crate::text::fold_key;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Separator used when several ingredient names are merged into one detail.
pub const INGREDIENT_SEPARATOR: &str = "、";

/// One product (or ingredient) line of a brand's origin disclosure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRecord {
    pub company_name: Option<String>,
    pub brand_name: String,
    pub product_name: Option<String>,
    pub ingredient_name: Option<String>,
    pub ingredient_brand: Option<String>,
    pub serving_size: Option<String>,
    pub calories: Option<String>,
    pub info_url: Option<String>,
}

/// Brand entry returned by [`IngredientIndex::suggest_brands`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandSummary {
    pub brand_name: String,
    pub company_name: Option<String>,
}

/// Map one decoded row to an ingredient record; rows without a brand are dropped.
pub fn normalize_ingredient(row: &RawRow) -> Option<IngredientRecord> {
    let a = &INGREDIENTS;
    Some(IngredientRecord {
        brand_name: alias::resolve(row, a.brand)?,
        company_name: alias::resolve(row, a.company),
        product_name: alias::resolve(row, a.product),
        ingredient_name: alias::resolve(row, a.ingredient),
        ingredient_brand: alias::resolve(row, a.ingredient_brand),
        serving_size: alias::resolve(row, a.serving_size),
        calories: alias::resolve(row, a.calories),
        info_url: alias::resolve(row, a.info_url),
    })
}

/// Ingredient rows plus a brand directory, both in ingestion order.
#[derive(Debug, Clone, Default)]
pub struct IngredientIndex {
    rows: Vec<IngredientRecord>,
    /// Folded brand per row, parallel to `rows`.
    brand_keys: Vec<String>,
    /// One entry per distinct folded brand, first occurrence wins.
    brands: Vec<(String, BrandSummary)>,
}

impl IngredientIndex {
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a RawRow>,
    {
        let rows: Vec<IngredientRecord> = rows.into_iter().filter_map(normalize_ingredient).collect();
        let brand_keys: Vec<String> = rows.iter().map(|r| fold_key(&r.brand_name)).collect();

        let mut brands: Vec<(String, BrandSummary)> = Vec::new();
        for (row, key) in rows.iter().zip(&brand_keys) {
            if !brands.iter().any(|(k, _)| k == key) {
                brands.push((
                    key.clone(),
                    BrandSummary {
                        brand_name: row.brand_name.clone(),
                        company_name: row.company_name.clone(),
                    },
                ));
            }
        }

        Self {
            rows,
            brand_keys,
            brands,
        }
    }

    pub fn from_csv(content: &str) -> Self {
        let decoded = decode_table(content);
        let index = Self::from_rows(&decoded);
        tracing::debug!(
            rows = decoded.len(),
            kept = index.rows.len(),
            brands = index.brands.len(),
            "ingredient index built"
        );
        index
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn brand_count(&self) -> usize {
        self.brands.len()
    }

    /// Brands whose folded name contains the folded keyword.
    ///
    /// An empty keyword lists every brand so the caller can browse.
    pub fn suggest_brands(&self, keyword: &str) -> Vec<&BrandSummary> {
        let q = fold_key(keyword);
        self.brands
            .iter()
            .filter(|(key, _)| q.is_empty() || key.contains(&q))
            .map(|(_, summary)| summary)
            .collect()
    }

    /// Details for one brand, one entry per distinct product.
    ///
    /// Rows are grouped by product name, else ingredient name, else brand.
    /// Optional fields are filled from the first row that supplies them and
    /// never overwritten; ingredient names are unioned in first-seen order
    /// and joined with [`INGREDIENT_SEPARATOR`].
    pub fn brand_ingredients(&self, brand: &str) -> Vec<IngredientRecord> {
        let q = fold_key(brand);
        if q.is_empty() {
            return Vec::new();
        }

        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, (IngredientRecord, Vec<String>)> = HashMap::new();

        let matched = self.rows.iter().zip(&self.brand_keys).filter(|(_, k)| **k == q);
        for (row, _) in matched {
            let key = row
                .product_name
                .as_ref()
                .or(row.ingredient_name.as_ref())
                .unwrap_or(&row.brand_name)
                .clone();

            let (detail, names) = groups.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                let detail = IngredientRecord {
                    ingredient_name: None,
                    ..row.clone()
                };
                (detail, Vec::new())
            });

            fill(&mut detail.ingredient_brand, &row.ingredient_brand);
            fill(&mut detail.serving_size, &row.serving_size);
            fill(&mut detail.calories, &row.calories);
            fill(&mut detail.info_url, &row.info_url);

            if let Some(name) = &row.ingredient_name {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        }

        order
            .into_iter()
            .filter_map(|key| groups.remove(&key))
            .map(|(mut detail, names)| {
                if !names.is_empty() {
                    detail.ingredient_name = Some(names.join(INGREDIENT_SEPARATOR));
                }
                detail
            })
            .collect()
    }
}

fn fill(slot: &mut Option<String>, value: &Option<String>) {
    if slot.is_none() {
        slot.clone_from(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "公司名稱,品牌名稱,產品名稱,原料名稱,原料品牌,每一份量,熱量大卡,相關資訊連結\n\
        甲公司,好味 Burger,經典堡,牛肉,,200g,,\n\
        甲公司,好味 Burger,經典堡,生菜,農場A,,550,https://a.example\n\
        甲公司,好味 Burger,薯條,馬鈴薯,,,320,\n\
        乙公司,茶飲小舖,,紅茶,,,,\n\
        ,,無品牌,鹽,,,,\n";

    fn index() -> IngredientIndex {
        IngredientIndex::from_csv(CSV)
    }

    #[test]
    fn brandless_rows_dropped() {
        assert_eq!(index().len(), 4);
        assert_eq!(index().brand_count(), 2);
    }

    #[test]
    fn empty_keyword_lists_every_brand() {
        let idx = index();
        let all: Vec<_> = idx.suggest_brands(" ").iter().map(|b| b.brand_name.as_str()).collect();
        assert_eq!(all, ["好味 Burger", "茶飲小舖"]);
    }

    #[test]
    fn brand_suggestion_is_folded_substring() {
        let idx = index();
        let hits = idx.suggest_brands("味burger");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].company_name.as_deref(), Some("甲公司"));
        assert!(idx.suggest_brands("咖啡").is_empty());
    }

    #[test]
    fn same_product_rows_merge_into_one_detail() {
        let details = index().brand_ingredients("好味burger");
        assert_eq!(details.len(), 2);

        let burger = &details[0];
        assert_eq!(burger.product_name.as_deref(), Some("經典堡"));
        assert_eq!(burger.ingredient_name.as_deref(), Some("牛肉、生菜"));
        assert_eq!(burger.serving_size.as_deref(), Some("200g"));
        assert_eq!(burger.ingredient_brand.as_deref(), Some("農場A"));
        assert_eq!(burger.calories.as_deref(), Some("550"));
        assert_eq!(burger.info_url.as_deref(), Some("https://a.example"));

        assert_eq!(details[1].product_name.as_deref(), Some("薯條"));
        assert_eq!(details[1].ingredient_name.as_deref(), Some("馬鈴薯"));
    }

    #[test]
    fn first_value_is_never_overwritten() {
        let csv = "品牌名稱,產品名稱,原料名稱,每一份量\nB,P,x,100g\nB,P,y,999g\nB,P,x,\n";
        let details = IngredientIndex::from_csv(csv).brand_ingredients("b");
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].serving_size.as_deref(), Some("100g"));
        assert_eq!(details[0].ingredient_name.as_deref(), Some("x、y"));
    }

    #[test]
    fn grouping_falls_back_to_ingredient_then_brand() {
        let details = index().brand_ingredients("茶飲小舖");
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].product_name, None);
        assert_eq!(details[0].ingredient_name.as_deref(), Some("紅茶"));

        let csv = "品牌名稱,公司名稱\nSolo,C1\nSolo,C2\n";
        let details = IngredientIndex::from_csv(csv).brand_ingredients("solo");
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].company_name.as_deref(), Some("C1"));
        assert_eq!(details[0].ingredient_name, None);
    }

    #[test]
    fn unknown_or_empty_brand_yields_nothing() {
        assert!(index().brand_ingredients("").is_empty());
        assert!(index().brand_ingredients("好味").is_empty());
    }
}
