use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::Quote;

use super::super::Container;

pub struct QuoteController<'a> {
    container: &'a Container,
}

impl<'a> QuoteController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn quote(&self, query: String, output: Option<PathBuf>) -> Result<String> {
        let query = query.trim();
        if query.is_empty() {
            bail!("query must not be empty");
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
        );
        spinner.set_message("Assembling quote...");
        spinner.enable_steady_tick(Duration::from_millis(120));

        let result = self.container.assemble_use_case().execute(query).await;
        spinner.finish_and_clear();
        let rendered = result?;

        let path = match output {
            Some(path) => path,
            None => self.default_output_path(),
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &rendered.document).await?;

        let mut summary = self.format_quote(&rendered.quote);
        summary.push_str(&format!("\nProposal written to {}\n", path.display()));
        Ok(summary)
    }

    fn default_output_path(&self) -> PathBuf {
        let extension = self.container.renderer().file_extension();
        self.container.config().output.output_dir.join(format!(
            "proposal_{}.{extension}",
            Utc::now().format("%Y%m%d_%H%M%S")
        ))
    }

    fn format_quote(&self, quote: &Quote) -> String {
        let currency = &self.container.config().output.currency;
        let mut output = format!("Quote for \"{}\":\n\n", quote.query());

        if quote.is_empty() {
            output.push_str("No catalog items were selected.\n");
        } else {
            output.push_str(&format!(
                "{:>3}  {:<40} {:>6} {:>10} {:>12}\n",
                "#", "Item", "Qty", "Price", "Subtotal"
            ));
            for (i, item) in quote.items().iter().enumerate() {
                output.push_str(&format!(
                    "{:>3}  {:<40} {:>6} {:>10} {:>12}\n",
                    i + 1,
                    item.name,
                    item.quantity,
                    item.unit_price,
                    item.subtotal
                ));
            }
        }

        output.push_str(&format!("\nTotal: {} {currency}\n", quote.total_cost()));
        output
    }
}
