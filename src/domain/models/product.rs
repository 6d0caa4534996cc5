use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A catalog entry. Prices are in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: i64,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>, price: i64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }

    /// Name length in characters, used as the specificity tie-break when ranking.
    pub fn name_len(&self) -> usize {
        self.name.chars().count()
    }
}

/// A `{name, price}` record as the model extracts it from the raw source,
/// before identifiers are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedProduct {
    pub name: String,
    pub price: i64,
}

/// An immutable product list together with its id index.
///
/// Built in one piece from a product list; never updated in place.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<i64, usize>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id, position))
            .collect();
        Self { products, index }
    }

    /// Assign sequential identifiers starting at 1, in source order.
    pub fn from_parsed(parsed: Vec<ParsedProduct>) -> Self {
        let products = parsed
            .into_iter()
            .zip(1..)
            .map(|(p, id)| Product::new(id, p.name, p.price))
            .collect();
        Self::new(products)
    }

    pub fn lookup(&self, id: i64) -> Option<&Product> {
        self.index.get(&id).map(|&position| &self.products[position])
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(name: &str, price: i64) -> ParsedProduct {
        ParsedProduct {
            name: name.to_string(),
            price,
        }
    }

    #[test]
    fn from_parsed_assigns_sequential_ids_in_order() {
        let catalog = Catalog::from_parsed(vec![
            parsed("Короб 200х200", 300),
            parsed("Крышка 200х200", 50),
            parsed("Винт М6", 2),
        ]);

        let ids: Vec<i64> = catalog.products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(catalog.products()[1].name, "Крышка 200х200");
    }

    #[test]
    fn lookup_finds_only_listed_ids() {
        let catalog = Catalog::new(vec![
            Product::new(7, "Крышка 200х200", 50),
            Product::new(9, "Гайка М10", 3),
        ]);

        assert_eq!(catalog.lookup(7).map(|p| p.price), Some(50));
        assert_eq!(catalog.lookup(9).map(|p| p.name.as_str()), Some("Гайка М10"));
        assert!(catalog.lookup(8).is_none());
        assert!(catalog.lookup(0).is_none());
    }

    #[test]
    fn name_len_counts_characters_not_bytes() {
        let product = Product::new(1, "Гайка", 1);
        assert_eq!(product.name_len(), 5);
    }

    #[test]
    fn empty_catalog() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.lookup(1).is_none());
    }
}
