use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{CatalogController, QuoteController, SearchController};

pub struct Router<'a> {
    quote_controller: QuoteController<'a>,
    catalog_controller: CatalogController<'a>,
    search_controller: SearchController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            quote_controller: QuoteController::new(container),
            catalog_controller: CatalogController::new(container),
            search_controller: SearchController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Quote { query, output } => self.quote_controller.quote(query, output).await,
            Commands::Catalog { limit } => self.catalog_controller.list(limit).await,
            Commands::Search { query, num } => self.search_controller.search(query, num).await,
            Commands::Serve { .. } => unreachable!("serve command is handled separately in main"),
        }
    }
}
