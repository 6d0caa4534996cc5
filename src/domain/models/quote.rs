use serde::{Deserialize, Serialize};

use super::Product;

/// An item the model chose, before validation against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedItem {
    pub id: i64,
    pub quantity: i64,
}

/// The structured answer of the second generation stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub found_items: Vec<SelectedItem>,
}

/// A priced line of the bill of materials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: i64,
    #[serde(rename = "price")]
    pub unit_price: i64,
    pub subtotal: i64,
}

impl LineItem {
    /// Price `quantity` units of `product`. `None` when the subtotal does not
    /// fit in an `i64`.
    pub fn new(product: &Product, quantity: i64) -> Option<Self> {
        let subtotal = product.price.checked_mul(quantity)?;
        Some(Self {
            name: product.name.clone(),
            quantity,
            unit_price: product.price,
            subtotal,
        })
    }
}

/// The priced result of one assembly request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    query: String,
    items: Vec<LineItem>,
    total_cost: i64,
}

impl Quote {
    /// Build a quote; the total is always the sum of the line subtotals.
    /// `None` when that sum overflows.
    pub fn new(query: impl Into<String>, items: Vec<LineItem>) -> Option<Self> {
        let total_cost = items
            .iter()
            .try_fold(0i64, |total, item| total.checked_add(item.subtotal))?;
        Some(Self {
            query: query.into(),
            items,
            total_cost,
        })
    }

    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            items: Vec::new(),
            total_cost: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn total_cost(&self) -> i64 {
        self.total_cost
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn log_record(&self) -> QuoteLogRecord {
        QuoteLogRecord {
            query: self.query.clone(),
            response: QuoteLogResponse {
                found_items: self.items.clone(),
                total_cost: self.total_cost,
            },
        }
    }
}

/// On-disk shape of a per-request log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteLogRecord {
    pub query: String,
    pub response: QuoteLogResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteLogResponse {
    pub found_items: Vec<LineItem>,
    pub total_cost: i64,
}

/// A quote together with its rendered document.
#[derive(Debug, Clone)]
pub struct RenderedQuote {
    pub quote: Quote,
    pub document: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_sum_of_subtotals() {
        let cover = Product::new(7, "Крышка 200х200", 50);
        let screw = Product::new(3, "Винт М6", 2);
        let quote = Quote::new(
            "комплект",
            vec![
                LineItem::new(&cover, 2).unwrap(),
                LineItem::new(&screw, 8).unwrap(),
            ],
        )
        .unwrap();

        assert_eq!(quote.items()[0].subtotal, 100);
        assert_eq!(quote.items()[1].subtotal, 16);
        assert_eq!(quote.total_cost(), 116);
    }

    #[test]
    fn log_record_uses_wire_field_names() {
        let cover = Product::new(7, "Крышка 200х200", 50);
        let quote = Quote::new("крышка", vec![LineItem::new(&cover, 2).unwrap()]).unwrap();

        let json = serde_json::to_value(quote.log_record()).unwrap();
        assert_eq!(json["query"], "крышка");
        assert_eq!(json["response"]["total_cost"], 100);
        let item = &json["response"]["found_items"][0];
        assert_eq!(item["name"], "Крышка 200х200");
        assert_eq!(item["quantity"], 2);
        assert_eq!(item["price"], 50);
        assert_eq!(item["subtotal"], 100);
    }

    #[test]
    fn line_subtotal_overflow_is_rejected() {
        let cover = Product::new(7, "Крышка 200х200", 50);
        assert!(LineItem::new(&cover, i64::MAX).is_none());
        let largest = LineItem::new(&cover, i64::MAX / 50).unwrap();
        assert_eq!(largest.subtotal, i64::MAX / 50 * 50);
    }

    #[test]
    fn total_overflow_is_rejected() {
        let cover = Product::new(7, "Крышка 200х200", 50);
        let line = LineItem::new(&cover, i64::MAX / 50).unwrap();
        assert!(Quote::new("x", vec![line.clone(), line]).is_none());
        assert_eq!(Quote::empty("x").total_cost(), 0);
    }

    #[test]
    fn selection_tolerates_missing_items_field() {
        let selection: Selection = serde_json::from_str("{}").unwrap();
        assert!(selection.found_items.is_empty());
    }
}
