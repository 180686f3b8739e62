//! Basic usage example for dinedb-rs
//!
//! This example demonstrates how to:
//! - Build restaurant indexes from CSV text
//! - Search, suggest and look up restaurants
//! - Tag safety records with their county and town
//! - Browse ingredient brands

use dinedb_rs::prelude::*;
use dinedb_rs::Gazetteer;

const ECO: &str = "\u{feff}餐廳名稱,餐廳地址,額外環保作為\n\
\"Green Bowl 蔬食\",臺北市大安區復興南路一段1號,\"自備餐具、惜食\"\n\
小樹咖啡,新北市板橋區文化路2號,不主動提供一次性餐具\n\
大樹便當,臺北市信義區松仁路3號,\"源頭減量,1\"\n";

const SAFETY: &str = "業者名稱,營業地址,評核結果\n\
老街麵店,台中市西屯區台灣大道三段99號,優\n\
海港小吃,高雄市前鎮區中山二路5號,良\n";

const INGREDIENTS: &str = "公司名稱,品牌名稱,產品名稱,原料名稱,原料品牌\n\
好食公司,好食堂,牛肉麵,牛肉,澳洲\n\
好食公司,好食堂,牛肉麵,麵條,\n\
好食公司,好食堂,滷肉飯,豬肉,臺灣\n";

fn main() -> Result<()> {
    println!("=== DineDB-RS Basic Usage Example ===\n");

    let eco = RestaurantIndex::from_csv(ECO, Dataset::EcoFriendly, None);
    println!("Loaded {} eco-friendly restaurants\n", eco.len());

    // Example 1: keyword search over names and addresses
    println!("--- Example 1: Search ---");
    for keyword in ["green bowl", "大安", "樹"] {
        let hits = eco.search(keyword);
        println!("'{keyword}': {} hit(s)", hits.len());
        for r in hits {
            println!("  {} | {}", r.name(), r.address().unwrap_or("-"));
        }
    }
    println!();

    // Example 2: autocomplete on names only
    println!("--- Example 2: Suggest ---");
    for r in eco.suggest("樹", DEFAULT_SUGGEST_LIMIT) {
        println!("  {}", r.name());
    }
    println!();

    // Example 3: exact name and action labels
    println!("--- Example 3: Exact lookup and action labels ---");
    if let Some(r) = eco.find_by_exact_name("GREEN BOWL蔬食") {
        println!("  Found: {} -> actions {:?}", r.name(), r.eco_actions);
    }
    println!("  Labels: {}", eco.distinct_action_labels().join(" / "));
    println!();

    // Example 4: region tagging for the safety list
    println!("--- Example 4: Region tagging ---");
    let gazetteer: Gazetteer = [("臺中市", "西屯區"), ("高雄市", "前鎮區")]
        .into_iter()
        .map(|(c, t)| (c.to_string(), t.to_string()))
        .collect();
    let safety = RestaurantIndex::from_csv(SAFETY, Dataset::Safety, Some(&gazetteer));
    for r in safety.list_all() {
        println!(
            "  {} [{}] {} {}",
            r.name(),
            r.rating.as_deref().unwrap_or("-"),
            r.county.as_deref().unwrap_or("?"),
            r.town.as_deref().unwrap_or("?")
        );
    }
    println!();

    // Example 5: ingredient brands
    println!("--- Example 5: Ingredient origins ---");
    let ingredients = IngredientIndex::from_csv(INGREDIENTS);
    for brand in ingredients.suggest_brands("好食") {
        println!("  Brand: {}", brand.brand_name);
        for d in ingredients.brand_ingredients(&brand.brand_name) {
            println!(
                "    {}: {}",
                d.product_name.as_deref().unwrap_or("-"),
                d.ingredient_name.as_deref().unwrap_or("-")
            );
        }
    }

    Ok(())
}
