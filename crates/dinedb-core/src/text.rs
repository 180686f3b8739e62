// crates/dinedb-core/src/text.rs
//! Text folding shared by ingestion and querying.

use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;

const FULLWIDTH_SPACE: char = '\u{3000}';
const BOM: char = '\u{FEFF}';
/// Traditional Chinese with stroke-count collation. Plain `zh-Hant` resolves
/// to pinyin order in the compiled ICU data.
const STROKE_ORDER_LOCALE: &str = "zh-Hant-u-co-stroke";

/// Convert a string into the folded key used for matching.
///
/// This performs:
/// 1) Removal of every whitespace character, including the full-width
///    ideographic space (U+3000)
/// 2) Unicode lowercasing
///
/// Han characters pass through untouched, so `"鼎泰豐 信義店"` folds to
/// `"鼎泰豐信義店"`. The same function runs on stored names at load time and
/// on user queries, which keeps the two comparable with plain `==` and
/// `contains`. Folding is idempotent.
///
/// # Examples
///
/// ```rust
/// use dinedb_core::text::fold_key;
///
/// assert_eq!(fold_key(" ABC Café "), "abccafé");
/// assert_eq!(fold_key("台北\u{3000}101"), "台北101");
/// assert_eq!(fold_key(&fold_key("Mixed Case")), fold_key("Mixed Case"));
/// ```
pub fn fold_key(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != FULLWIDTH_SPACE)
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalizes the `台` variant to `臺`, the form used in official
/// administrative-division names (`臺北市`, `臺中市`, `臺東縣`, ...).
pub fn normalize_place(s: &str) -> String {
    s.replace('台', "臺")
}

/// Strips every leading byte-order mark.
pub fn strip_bom(s: &str) -> &str {
    s.trim_start_matches(BOM)
}

/// Sorts labels in Traditional Chinese stroke order (`zh-Hant-u-co-stroke`),
/// falling back to code-point order when the collator cannot be built.
pub fn sort_han(labels: &mut [String]) {
    match stroke_collator() {
        Ok(collator) => labels.sort_by(|a, b| collator.compare(a, b)),
        Err(error) => {
            tracing::warn!(%error, "stroke-order collator unavailable, using code-point order");
            labels.sort();
        }
    }
}

fn stroke_collator() -> Result<Collator, String> {
    let locale: Locale = STROKE_ORDER_LOCALE.parse().map_err(|e| format!("{e:?}"))?;
    Collator::try_new(&(&locale).into(), CollatorOptions::new()).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_removes_ascii_and_fullwidth_space() {
        assert_eq!(fold_key("  a b\tc\u{3000}d "), "abcd");
    }

    #[test]
    fn fold_is_idempotent() {
        for s in ["ABC Café", "綠色 餐廳\u{3000}一號", "", "   "] {
            let once = fold_key(s);
            assert_eq!(fold_key(&once), once);
        }
    }

    #[test]
    fn fold_is_case_and_space_insensitive_for_lookup() {
        assert_eq!(fold_key("ABC Café"), fold_key(" abc café "));
    }

    #[test]
    fn place_variant_normalized() {
        assert_eq!(normalize_place("台北市中正區"), "臺北市中正區");
        assert_eq!(normalize_place("臺東縣"), "臺東縣");
    }

    #[test]
    fn bom_stripped_repeatedly() {
        assert_eq!(strip_bom("\u{FEFF}\u{FEFF}name"), "name");
        assert_eq!(strip_bom("name"), "name");
    }

    #[test]
    fn han_sort_follows_stroke_count() {
        let mut labels: Vec<String> = ["大", "人", "一", "丁"].into_iter().map(String::from).collect();
        sort_han(&mut labels);
        assert_eq!(labels, ["一", "丁", "人", "大"]);
    }

    #[test]
    fn han_sort_orders_action_labels_by_first_stroke_count() {
        // 不 (4) < 自 (6) < 減 (12)
        let mut labels = vec!["自備餐具".to_string(), "減塑".to_string(), "不主動提供一次性餐具".to_string()];
        sort_han(&mut labels);
        assert_eq!(labels, ["不主動提供一次性餐具", "自備餐具", "減塑"]);
    }
}
