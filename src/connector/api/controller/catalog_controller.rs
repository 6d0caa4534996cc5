use anyhow::Result;

use crate::domain::Product;

use super::super::Container;

pub struct CatalogController<'a> {
    container: &'a Container,
}

impl<'a> CatalogController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Load the catalog (parsing the raw source if there is no cache) and list it.
    pub async fn list(&self, limit: Option<usize>) -> Result<String> {
        let catalog = self.container.catalog_store().ensure_loaded().await?;
        let shown = limit.unwrap_or(catalog.len()).min(catalog.len());

        Ok(self.format_products(&catalog.products()[..shown], catalog.len()))
    }

    fn format_products(&self, products: &[Product], total: usize) -> String {
        let mut output = format!("Catalog: {total} products\n\n");

        for product in products {
            output.push_str(&format!(
                "{:>5}  {:<50} {:>10}\n",
                product.id, product.name, product.price
            ));
        }

        if products.len() < total {
            output.push_str(&format!("... and {} more\n", total - products.len()));
        }
        output
    }
}
