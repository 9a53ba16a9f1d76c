//! Place cards and client-side price filtering.
//!
//! Filtering only toggles visibility; the listing itself is never changed.

use serde::{Deserialize, Serialize};

/// A rendered listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct PlaceCard {
    pub name: String,
    pub price_value: u64,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

fn visible_by_default() -> bool {
    true
}

impl PlaceCard {
    pub fn new(name: impl Into<String>, price_value: u64) -> Self {
        Self {
            name: name.into(),
            price_value,
            visible: true,
        }
    }

    /// Build a card from its displayed price, e.g. `"$120"` or `"$ 1,200 / night"`
    pub fn from_price_text(name: impl Into<String>, price_text: &str) -> Option<Self> {
        parse_price_text(price_text).map(|price| Self::new(name, price))
    }
}

/// Leading integer of a displayed price, ignoring the currency sign and
/// thousands separators. Returns `None` when no digits lead the text.
pub fn parse_price_text(text: &str) -> Option<u64> {
    let digits: String = text
        .trim()
        .trim_start_matches('$')
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Parse the price filter select value. Empty means no bound.
pub fn parse_price_filter(value: &str) -> Option<u64> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        parse_price_text(value)
    }
}

/// Show cards priced at or below `max_price`, or every card without a bound.
pub fn filter_by_max_price(cards: &mut [PlaceCard], max_price: Option<u64>) {
    for card in cards.iter_mut() {
        card.visible = match max_price {
            Some(max) => card.price_value <= max,
            None => true,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visibility(cards: &[PlaceCard]) -> Vec<bool> {
        cards.iter().map(|c| c.visible).collect()
    }

    #[test]
    fn test_filter_by_max_price() {
        let mut cards = vec![
            PlaceCard::new("Loft", 50),
            PlaceCard::new("Villa", 150),
            PlaceCard::new("Cabin", 100),
        ];
        filter_by_max_price(&mut cards, Some(100));
        assert_eq!(visibility(&cards), vec![true, false, true]);

        // Removing the bound shows everything again
        filter_by_max_price(&mut cards, None);
        assert_eq!(visibility(&cards), vec![true, true, true]);

        // Prices are untouched
        let prices: Vec<u64> = cards.iter().map(|c| c.price_value).collect();
        assert_eq!(prices, vec![50, 150, 100]);
    }

    #[test]
    fn test_filter_empty_listing() {
        let mut cards: Vec<PlaceCard> = Vec::new();
        filter_by_max_price(&mut cards, Some(10));
        assert!(cards.is_empty());
    }

    #[test]
    fn test_parse_price_text() {
        assert_eq!(parse_price_text("$120"), Some(120));
        assert_eq!(parse_price_text("120"), Some(120));
        assert_eq!(parse_price_text("$ 1,200 / night"), Some(1200));
        assert_eq!(parse_price_text("free"), None);
        assert_eq!(parse_price_text(""), None);
    }

    #[test]
    fn test_parse_price_filter() {
        assert_eq!(parse_price_filter(""), None);
        assert_eq!(parse_price_filter("  "), None);
        assert_eq!(parse_price_filter("100"), Some(100));
        assert_eq!(parse_price_filter("All"), None);
    }

    #[test]
    fn test_card_from_json_defaults_visible() {
        let card: PlaceCard =
            serde_json::from_str(r#"{"name":"Loft","price_value":80}"#).unwrap();
        assert!(card.visible);

        let card = PlaceCard::from_price_text("Villa", "$300").unwrap();
        assert_eq!(card.price_value, 300);
    }
}
