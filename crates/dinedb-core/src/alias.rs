// crates/dinedb-core/src/alias.rs
//! Header alias tables.
//!
//! Source files for the same dataset ship with different column spellings
//! (Chinese, snake_case English, short forms). Each logical field lists the
//! spellings it accepts in priority order; the tables are static and never
//! inferred from data.

use crate::loader::RawRow;

/// Ordered header spellings for one logical field.
pub type FieldAliases = &'static [&'static str];

/// Returns the first alias whose trimmed value is non-empty.
///
/// Aliases are tried in declared order, so the most preferred spelling wins
/// when a file happens to contain more than one matching column.
pub fn resolve(row: &RawRow, aliases: FieldAliases) -> Option<String> {
    aliases
        .iter()
        .filter_map(|key| row.get(key))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

/// Alias table for restaurant datasets.
#[derive(Debug, Clone, Copy)]
pub struct RestaurantAliases {
    pub name: FieldAliases,
    pub address: FieldAliases,
    pub phone: FieldAliases,
    /// Eco level for the eco-friendly list, inspection grade for the safety list.
    pub rating: FieldAliases,
}

pub const ECO_FRIENDLY: RestaurantAliases = RestaurantAliases {
    name: &["餐廳名稱", "restaurant_name", "name"],
    address: &["餐廳地址", "地址", "address"],
    phone: &["餐廳電話", "電話", "tel", "phone"],
    rating: &["額外環保作為", "環保等級", "eco_level"],
};

pub const SAFETY: RestaurantAliases = RestaurantAliases {
    name: &["餐廳名稱", "業者名稱", "店名", "restaurant_name", "name"],
    address: &["餐廳地址", "地址", "營業地址", "address"],
    phone: &["餐廳電話", "電話", "tel", "phone"],
    rating: &["評核結果", "評核等級", "分級評核", "grade", "rating"],
};

/// Alias table for the ingredient-origin dataset.
#[derive(Debug, Clone, Copy)]
pub struct IngredientAliases {
    pub company: FieldAliases,
    pub brand: FieldAliases,
    pub product: FieldAliases,
    pub ingredient: FieldAliases,
    pub ingredient_brand: FieldAliases,
    pub serving_size: FieldAliases,
    pub calories: FieldAliases,
    pub info_url: FieldAliases,
}

pub const INGREDIENTS: IngredientAliases = IngredientAliases {
    company: &["公司名稱", "company_name"],
    brand: &["品牌名稱", "brand_name"],
    product: &["產品名稱", "product_name"],
    ingredient: &["原料名稱", "ingredient_name"],
    ingredient_brand: &["原料品牌", "ingredient_brand"],
    serving_size: &["每一份量", "serving_size"],
    calories: &["熱量大卡", "calories"],
    info_url: &["相關資訊連結", "info_link", "link"],
};

/// Columns of the gazetteer file.
pub const GAZETTEER_COUNTY: FieldAliases = &["county", "縣市", "countyname", "縣市名稱"];
pub const GAZETTEER_TOWN: FieldAliases = &["town", "鄉鎮市區", "townname", "鄉鎮市區名稱"];
