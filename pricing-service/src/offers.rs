//! Top-offer extraction and answer formatting.
//!
//! The marketplace search APIs return an undocumented, unstable JSON shape,
//! so extraction is a best-effort walk over fallback key chains rather than
//! a typed deserialization.

use serde::Serialize;
use serde_json::Value;

/// A single extracted offer.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Offer {
    pub source: String,
    pub title: String,
    /// Display form of the price; upstream sends numbers or strings.
    pub price: Option<String>,
    pub currency: String,
}

/// Offers found for one requested item.
#[derive(Debug, Clone, Serialize)]
pub struct ItemOffers {
    pub item: String,
    pub offers: Vec<Offer>,
}

fn first_string(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| value.get(*k))
        .find_map(|v| v.as_str().map(|s| s.to_string()))
}

fn first_price(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().filter_map(|k| value.get(*k)).find_map(|v| {
        if let Some(n) = v.as_f64() {
            // Render integral prices without a trailing ".0".
            if n.fract() == 0.0 {
                Some(format!("{}", n as i64))
            } else {
                Some(n.to_string())
            }
        } else {
            v.as_str().map(|s| s.trim_start_matches('$').to_string())
        }
    })
}

/// Extract the top offer from a raw marketplace search response.
///
/// Takes the first element of `items` and walks the fallback key chains
/// observed across upstream responses. Returns `None` when the result
/// list is missing or empty.
pub fn top_offer_from(source: &str, data: &Value) -> Option<Offer> {
    let first = data.get("items").and_then(|v| v.as_array())?.first()?;

    let title = first_string(first, &["title", "name", "product_name"])
        .unwrap_or_else(|| "Unknown item".to_string());

    let price = first_price(first, &["price", "current_price", "price_value"]);

    let currency =
        first_string(first, &["currency", "currency_code"]).unwrap_or_else(|| "USD".to_string());

    Some(Offer {
        source: source.to_string(),
        title,
        price,
        currency,
    })
}

/// Format the per-item offer lists into the bullet-list answer text.
pub fn format_answer(results: &[ItemOffers]) -> String {
    let lines: Vec<String> = results
        .iter()
        .map(|r| {
            if r.offers.is_empty() {
                return format!("• {}: no offers found", r.item);
            }

            let parts: Vec<String> = r
                .offers
                .iter()
                .map(|o| {
                    format!(
                        "{} ~ {} {} ({})",
                        o.source,
                        o.price.as_deref().unwrap_or("?"),
                        o.currency,
                        o.title
                    )
                })
                .collect();

            format!("• {}: {}", r.item, parts.join(" | "))
        })
        .collect();

    format!("Here are some example prices:\n{}", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_primary_keys() {
        let data = json!({
            "items": [{ "title": "Ground Coffee 12oz", "price": 9.99, "currency": "USD" }]
        });
        let offer = top_offer_from("Walmart", &data).unwrap();
        assert_eq!(offer.title, "Ground Coffee 12oz");
        assert_eq!(offer.price.as_deref(), Some("9.99"));
        assert_eq!(offer.currency, "USD");
    }

    #[test]
    fn falls_back_through_key_chains() {
        let data = json!({
            "items": [{ "product_name": "Cane Sugar", "price_value": "3.49", "currency_code": "CAD" }]
        });
        let offer = top_offer_from("Amazon", &data).unwrap();
        assert_eq!(offer.title, "Cane Sugar");
        assert_eq!(offer.price.as_deref(), Some("3.49"));
        assert_eq!(offer.currency, "CAD");
    }

    #[test]
    fn name_beats_product_name() {
        let data = json!({
            "items": [{ "name": "Espresso", "product_name": "ignored" }]
        });
        let offer = top_offer_from("Amazon", &data).unwrap();
        assert_eq!(offer.title, "Espresso");
    }

    #[test]
    fn unknown_fields_get_defaults() {
        let data = json!({ "items": [{ "sku": "X1" }] });
        let offer = top_offer_from("Walmart", &data).unwrap();
        assert_eq!(offer.title, "Unknown item");
        assert_eq!(offer.price, None);
        assert_eq!(offer.currency, "USD");
    }

    #[test]
    fn dollar_prefixed_string_price_is_stripped() {
        let data = json!({ "items": [{ "title": "Flour", "price": "$2.99" }] });
        let offer = top_offer_from("Walmart", &data).unwrap();
        assert_eq!(offer.price.as_deref(), Some("2.99"));
    }

    #[test]
    fn integral_price_has_no_trailing_zero() {
        let data = json!({ "items": [{ "title": "Flour", "price": 3.0 }] });
        let offer = top_offer_from("Walmart", &data).unwrap();
        assert_eq!(offer.price.as_deref(), Some("3"));
    }

    #[test]
    fn missing_or_empty_items_yield_no_offer() {
        assert!(top_offer_from("Walmart", &json!({})).is_none());
        assert!(top_offer_from("Walmart", &json!({ "items": [] })).is_none());
        assert!(top_offer_from("Walmart", &json!({ "items": "oops" })).is_none());
    }

    #[test]
    fn formats_offers_and_missing_prices() {
        let results = vec![
            ItemOffers {
                item: "Coffee".to_string(),
                offers: vec![
                    Offer {
                        source: "Walmart".to_string(),
                        title: "Ground Coffee".to_string(),
                        price: Some("9.99".to_string()),
                        currency: "USD".to_string(),
                    },
                    Offer {
                        source: "Amazon".to_string(),
                        title: "Coffee Beans".to_string(),
                        price: None,
                        currency: "USD".to_string(),
                    },
                ],
            },
            ItemOffers {
                item: "Unobtainium".to_string(),
                offers: vec![],
            },
        ];

        let answer = format_answer(&results);
        assert_eq!(
            answer,
            "Here are some example prices:\n\
             • Coffee: Walmart ~ 9.99 USD (Ground Coffee) | Amazon ~ ? USD (Coffee Beans)\n\
             • Unobtainium: no offers found"
        );
    }

    #[test]
    fn empty_results_still_carry_the_preamble() {
        assert_eq!(format_answer(&[]), "Here are some example prices:\n");
    }
}
