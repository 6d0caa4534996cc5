use anyhow::Result;

use crate::application::rank_products;

use super::super::Container;

pub struct SearchController<'a> {
    container: &'a Container,
}

impl<'a> SearchController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Run retrieval only and show the scored candidates, without planning.
    pub async fn search(&self, query: String, num: usize) -> Result<String> {
        let catalog = self.container.catalog_store().ensure_loaded().await?;
        let keywords = self.container.retriever().keywords(&query).await;

        if keywords.is_empty() {
            return Ok("No keywords could be extracted from the query.".to_string());
        }

        let ranked = rank_products(catalog.products(), &keywords, num);
        let mut output = format!("Keywords: {}\n\n", keywords.join(", "));

        if ranked.is_empty() {
            output.push_str("No results found.\n");
            return Ok(output);
        }

        let currency = &self.container.config().output.currency;
        output.push_str(&format!("Found {} results:\n\n", ranked.len()));
        for (i, candidate) in ranked.iter().enumerate() {
            output.push_str(&format!(
                "{}. [{}] {} ({} {currency}, score: {})\n",
                i + 1,
                candidate.product.id,
                candidate.product.name,
                candidate.product.price,
                candidate.score
            ));
        }
        Ok(output)
    }
}
