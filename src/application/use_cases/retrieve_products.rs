use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::use_cases::CatalogStore;
use crate::application::KeywordExtractor;
use crate::domain::{tokenize, Product};

/// Number of candidates handed to the generation stages.
pub const DEFAULT_TOP_K: usize = 50;

/// A product with the number of keywords its name matched.
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub product: &'a Product,
    pub score: usize,
}

/// Narrows the catalog down to the products relevant to a customer request.
///
/// Keywords come from the model when an extractor is configured; if it is
/// absent or fails, the request is tokenized locally instead.
pub struct RelevanceRetriever {
    catalog_store: Arc<CatalogStore>,
    keyword_extractor: Option<Arc<dyn KeywordExtractor>>,
}

impl RelevanceRetriever {
    pub fn new(catalog_store: Arc<CatalogStore>) -> Self {
        Self {
            catalog_store,
            keyword_extractor: None,
        }
    }

    pub fn with_keyword_extractor(mut self, extractor: Arc<dyn KeywordExtractor>) -> Self {
        self.keyword_extractor = Some(extractor);
        self
    }

    /// Return at most `top_k` relevant products, best first.
    ///
    /// An empty result means nothing matched; it is not an error. Products are
    /// read from the currently loaded catalog, so callers load it first.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Vec<Product> {
        let Some(catalog) = self.catalog_store.catalog() else {
            warn!("Retrieval requested before the catalog was loaded");
            return Vec::new();
        };

        let keywords = self.keywords(query).await;
        if keywords.is_empty() {
            info!("No keywords extracted from query: {query}");
            return Vec::new();
        }

        let ranked: Vec<Product> = rank_products(catalog.products(), &keywords, top_k)
            .into_iter()
            .map(|candidate| candidate.product.clone())
            .collect();

        info!(
            "Retrieved {} candidate products for {} keywords",
            ranked.len(),
            keywords.len()
        );
        ranked
    }

    /// Keywords for `query`, normalized to trimmed lowercase and de-duplicated.
    pub async fn keywords(&self, query: &str) -> Vec<String> {
        let raw = match self.keyword_extractor {
            Some(ref extractor) => match extractor.extract(query).await {
                Ok(keywords) => {
                    debug!("Model keywords: {keywords:?}");
                    keywords
                }
                Err(e) => {
                    warn!("Keyword extraction failed: {e}. Falling back to local tokenization.");
                    tokenize(query)
                }
            },
            None => tokenize(query),
        };

        normalize_keywords(raw)
    }
}

fn normalize_keywords(raw: Vec<String>) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::with_capacity(raw.len());
    for keyword in raw {
        let keyword = keyword.trim().to_lowercase();
        if !keyword.is_empty() && !keywords.contains(&keyword) {
            keywords.push(keyword);
        }
    }
    keywords
}

/// Score every product by the number of keywords contained in its lowercased
/// name, drop the zero scores, and keep the best `top_k`.
///
/// Higher scores come first; equal scores prefer the shorter, more specific
/// name. The sort is stable, so complete ties keep catalog order.
pub fn rank_products<'a>(
    products: &'a [Product],
    keywords: &[String],
    top_k: usize,
) -> Vec<ScoredCandidate<'a>> {
    let mut scored: Vec<ScoredCandidate<'a>> = products
        .iter()
        .filter_map(|product| {
            let name = product.name.to_lowercase();
            let score = keywords
                .iter()
                .filter(|keyword| name.contains(keyword.as_str()))
                .count();
            (score > 0).then_some(ScoredCandidate { product, score })
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.product.name_len().cmp(&b.product.name_len()))
    });
    scored.truncate(top_k);
    scored
}
