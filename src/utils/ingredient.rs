//! 配方原料字符串解析
//!
//! 配方导入时把人写的原料行拆成结构化数据：
//! - `2oz Ponce Rum` → amount=2, unit="oz", item="Ponce Rum"
//! - `0.75 oz Lime Juice` → amount=0.75, unit="oz", item="Lime Juice"
//! - `Dash Angostura` → amount=None, unit="dash", item="Angostura"
//! - `Splash of Cream` → amount=None, unit="splash", item="Cream"
//! - `Fresh Mint` → amount=None, unit=None, item="Fresh Mint"

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 解析后的单条原料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/api.generated.ts")]
pub struct Ingredient {
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub item: String,
}

/// 无数量的计量词（本身就是 unit，不属于 item）
const UNIT_WORDS: [&str; 3] = ["dash", "dashes", "splash"];

/// 修饰词：出现在开头时整串都是 item，没有 unit
const MODIFIER_WORDS: [&str; 25] = [
    "fresh",
    "crushed",
    "hot",
    "heavy",
    "egg",
    "salt",
    "cinnamon",
    "mint",
    "rose",
    "betel",
    "graham",
    "coffee",
    "pineapple",
    "grapefruit",
    "jalapeño",
    "cucumber",
    "candied",
    "orange",
    "lime",
    "ginger",
    "sparkling",
    "tonic",
    "soda",
    "prosecco",
    "club",
];

/// 解析原料字符串
pub fn parse_ingredient(raw: &str) -> Ingredient {
    let trimmed = raw.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    // 模式 1：数字 + 空格 + 单位 + 原料（"0.75 oz Lime Juice"）
    if tokens.len() >= 3
        && let Some(amount) = parse_amount(tokens[0])
        && tokens[1].chars().all(|c| c.is_ascii_alphabetic())
    {
        return Ingredient {
            amount: Some(amount),
            unit: Some(tokens[1].to_lowercase()),
            item: tokens[2..].join(" "),
        };
    }

    // 模式 2：数字和单位连写 + 原料（"2oz Ponce Rum"）
    if tokens.len() >= 2
        && let Some((amount, unit)) = split_concatenated(tokens[0])
    {
        return Ingredient {
            amount: Some(amount),
            unit: Some(unit),
            item: tokens[1..].join(" "),
        };
    }

    // 模式 3："Splash of X"
    if tokens.len() >= 3
        && tokens[0].eq_ignore_ascii_case("splash")
        && tokens[1].eq_ignore_ascii_case("of")
    {
        return Ingredient {
            amount: None,
            unit: Some("splash".to_string()),
            item: tokens[2..].join(" "),
        };
    }

    // 模式 4：裸计量词 + 原料（"Dash Angostura"）
    if tokens.len() >= 2 {
        let first_lower = tokens[0].to_lowercase();
        if UNIT_WORDS.contains(&first_lower.as_str()) {
            return Ingredient {
                amount: None,
                unit: Some(first_lower),
                item: tokens[1..].join(" "),
            };
        }
    }

    // 模式 5：修饰词开头 → 整串就是 item（"Fresh Mint", "Crushed Ice"）
    let trimmed_lower = trimmed.to_lowercase();
    for modifier in MODIFIER_WORDS {
        if trimmed_lower.starts_with(modifier) {
            return Ingredient {
                amount: None,
                unit: None,
                item: trimmed.to_string(),
            };
        }
    }

    // 兜底：整串作为 item（"Ginger Beer"）
    Ingredient {
        amount: None,
        unit: None,
        item: trimmed.to_string(),
    }
}

/// 解析 `\d+(\.\d+)?` 形式的数量，拒绝 f64::from_str 额外接受的写法（1e5 / inf）
fn parse_amount(token: &str) -> Option<f64> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    token.parse::<f64>().ok()
}

/// 拆 "2oz" / "0.75oz" 这类连写 token
fn split_concatenated(token: &str) -> Option<(f64, String)> {
    let split_at = token.find(|c: char| c.is_ascii_alphabetic())?;
    let (number_part, unit_part) = token.split_at(split_at);

    if unit_part.is_empty() || !unit_part.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let amount = parse_amount(number_part)?;
    Some((amount, unit_part.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ing(amount: Option<f64>, unit: Option<&str>, item: &str) -> Ingredient {
        Ingredient {
            amount,
            unit: unit.map(String::from),
            item: item.to_string(),
        }
    }

    #[test]
    fn test_concatenated_number_and_unit() {
        assert_eq!(
            parse_ingredient("2oz Ponce Rum"),
            ing(Some(2.0), Some("oz"), "Ponce Rum")
        );
        assert_eq!(
            parse_ingredient("0.75oz Lime Juice"),
            ing(Some(0.75), Some("oz"), "Lime Juice")
        );
    }

    #[test]
    fn test_spaced_number_and_unit() {
        assert_eq!(
            parse_ingredient("2 Dashes Angostura Bitters"),
            ing(Some(2.0), Some("dashes"), "Angostura Bitters")
        );
        assert_eq!(
            parse_ingredient("1.5 oz Florida Bourbon"),
            ing(Some(1.5), Some("oz"), "Florida Bourbon")
        );
    }

    #[test]
    fn test_bare_unit_word() {
        assert_eq!(
            parse_ingredient("Dash Angostura"),
            ing(None, Some("dash"), "Angostura")
        );
    }

    #[test]
    fn test_splash_of() {
        assert_eq!(
            parse_ingredient("Splash of Cream"),
            ing(None, Some("splash"), "Cream")
        );
    }

    #[test]
    fn test_modifier_word_keeps_whole_item() {
        assert_eq!(parse_ingredient("Fresh Mint"), ing(None, None, "Fresh Mint"));
        assert_eq!(
            parse_ingredient("Crushed Ice"),
            ing(None, None, "Crushed Ice")
        );
    }

    #[test]
    fn test_fallback_whole_string() {
        assert_eq!(
            parse_ingredient("Angostura Bitters"),
            ing(None, None, "Angostura Bitters")
        );
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(
            parse_ingredient("  2oz Ponce Rum  "),
            ing(Some(2.0), Some("oz"), "Ponce Rum")
        );
    }

    #[test]
    fn test_rejects_scientific_notation_as_amount() {
        // "1e5 oz X" 不应被当成数量
        let parsed = parse_ingredient("1e5 oz Something");
        assert_eq!(parsed.amount, None);
    }
}
