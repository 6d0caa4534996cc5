use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::use_cases::prompts::{planning_prompt, structuring_prompt};
use crate::application::use_cases::{CatalogStore, RelevanceRetriever, DEFAULT_TOP_K};
use crate::application::{DocumentRenderer, GenerationClient, QuoteLog};
use crate::domain::{
    parse_structured, AssemblyStage, Catalog, DomainError, LineItem, Quote, RenderedQuote,
    SelectedItem, Selection,
};

/// Turns a customer request into a priced, rendered bill of materials.
///
/// Runs `Loading → Retrieving → Planning → Structuring → Reconciling → Done`.
/// Any failure stops the run and is returned wrapped with the stage it
/// happened in. The only recoveries are the retriever's keyword fallback and
/// skipping selected ids that are not in the catalog.
pub struct AssembleQuoteUseCase {
    catalog_store: Arc<CatalogStore>,
    retriever: Arc<RelevanceRetriever>,
    generation_client: Arc<dyn GenerationClient>,
    renderer: Arc<dyn DocumentRenderer>,
    quote_log: Option<Arc<dyn QuoteLog>>,
    top_k: usize,
}

impl AssembleQuoteUseCase {
    pub fn new(
        catalog_store: Arc<CatalogStore>,
        retriever: Arc<RelevanceRetriever>,
        generation_client: Arc<dyn GenerationClient>,
        renderer: Arc<dyn DocumentRenderer>,
    ) -> Self {
        Self {
            catalog_store,
            retriever,
            generation_client,
            renderer,
            quote_log: None,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_quote_log(mut self, quote_log: Arc<dyn QuoteLog>) -> Self {
        self.quote_log = Some(quote_log);
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub async fn execute(&self, query: &str) -> Result<RenderedQuote, DomainError> {
        info!("Assembling quote for: {query}");
        let start_time = Instant::now();

        enter(AssemblyStage::Loading);
        let catalog = self
            .catalog_store
            .ensure_loaded()
            .await
            .map_err(|e| e.at_stage(AssemblyStage::Loading))?;

        enter(AssemblyStage::Retrieving);
        let candidates = self.retriever.retrieve(query, self.top_k).await;
        if candidates.is_empty() {
            return Err(DomainError::not_found(format!(
                "no relevant items found for request '{query}'; try rephrasing it"
            ))
            .at_stage(AssemblyStage::Retrieving));
        }
        let candidates_json = serde_json::to_string(&candidates)
            .map_err(|e| DomainError::internal(e.to_string()).at_stage(AssemblyStage::Retrieving))?;

        enter(AssemblyStage::Planning);
        let plan = self
            .plan(&candidates_json, query)
            .await
            .map_err(|e| e.at_stage(AssemblyStage::Planning))?;

        enter(AssemblyStage::Structuring);
        let selection = self
            .structure(&plan, &candidates_json)
            .await
            .map_err(|e| e.at_stage(AssemblyStage::Structuring))?;

        enter(AssemblyStage::Reconciling);
        let quote = reconcile(query, &selection.found_items, &catalog);
        info!(
            "Reconciled {} of {} selected items, total {}",
            quote.items().len(),
            selection.found_items.len(),
            quote.total_cost()
        );

        enter(AssemblyStage::Done);
        if let Some(ref quote_log) = self.quote_log {
            match quote_log.record(&quote).await {
                Ok(path) => debug!("Quote log written to {}", path.display()),
                Err(e) => warn!("Failed to write quote log: {e}"),
            }
        }

        let document = self
            .renderer
            .render(quote.items(), quote.total_cost())
            .map_err(|e| e.at_stage(AssemblyStage::Done))?;

        info!(
            "Quote assembled in {:.2}s ({} bytes rendered)",
            start_time.elapsed().as_secs_f64(),
            document.len()
        );
        Ok(RenderedQuote { quote, document })
    }

    async fn plan(&self, candidates_json: &str, query: &str) -> Result<String, DomainError> {
        info!("Requesting assembly plan from {}", self.generation_client.provider_name());
        let plan = self
            .generation_client
            .generate_text(&planning_prompt(candidates_json, query))
            .await?;
        info!("Assembly plan:\n---\n{}\n---", plan.trim());
        Ok(plan)
    }

    async fn structure(&self, plan: &str, candidates_json: &str) -> Result<Selection, DomainError> {
        info!("Requesting structured selection");
        let response = self
            .generation_client
            .generate_text(&structuring_prompt(plan, candidates_json))
            .await?;
        parse_structured(&response)
    }
}

fn enter(stage: AssemblyStage) {
    debug!("Entering {stage} stage");
}

/// Price the model's selection against the catalog.
///
/// Ids missing from the catalog, non-positive quantities and lines whose
/// price would overflow the subtotal or the running total are skipped with a
/// warning; they never fail the run or affect the other lines. Line order
/// follows the model's order.
pub fn reconcile(query: &str, selected: &[SelectedItem], catalog: &Catalog) -> Quote {
    let mut items = Vec::with_capacity(selected.len());
    let mut total: i64 = 0;

    for item in selected {
        let Some(product) = catalog.lookup(item.id) else {
            warn!("Model selected unknown product id {}; skipping", item.id);
            continue;
        };
        if item.quantity <= 0 {
            warn!(
                "Model selected '{}' with non-positive quantity {}; skipping",
                product.name, item.quantity
            );
            continue;
        }
        let priced = LineItem::new(product, item.quantity)
            .and_then(|line| total.checked_add(line.subtotal).map(|sum| (line, sum)));
        match priced {
            Some((line, sum)) => {
                total = sum;
                items.push(line);
            }
            None => warn!(
                "Model selected '{}' with quantity {} which overflows the quote total; skipping",
                product.name, item.quantity
            ),
        }
    }

    Quote::new(query, items).unwrap_or_else(|| Quote::empty(query))
}
