use std::collections::HashMap;
use std::path::Path;

use chrono::Utc;
use rand::Rng;
use tera::{Context, Tera};
use tracing::debug;

use crate::application::DocumentRenderer;
use crate::domain::{DomainError, LineItem};

pub const DEFAULT_TITLE: &str = "Технико-коммерческое предложение";
pub const DEFAULT_CURRENCY: &str = "руб.";

// The `.html` suffix turns on tera's autoescaping for product names.
const TEMPLATE_NAME: &str = "proposal.html";
const EMBEDDED_TEMPLATE: &str = include_str!("../../../templates/proposal.html.tera");

/// Formats an integer amount in space-separated groups of three digits: `12300` → `12 300`.
/// Usage: `amount | grouped`
fn tera_grouped_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let amount = value.as_i64().unwrap_or(0);
    Ok(tera::Value::String(group_digits(amount)))
}

fn group_digits(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

/// Renders the priced bill of materials as an HTML commercial proposal.
pub struct TeraDocumentRenderer {
    tera: Tera,
    title: String,
    currency: String,
}

impl TeraDocumentRenderer {
    /// Use the template compiled into the binary.
    pub fn new() -> Result<Self, DomainError> {
        Self::from_source(EMBEDDED_TEMPLATE)
    }

    /// Use a template file from disk instead of the built-in one.
    pub fn from_template_file(path: &Path) -> Result<Self, DomainError> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            DomainError::render(format!("failed to read template {}: {e}", path.display()))
        })?;
        debug!("Loaded proposal template from {}", path.display());
        Self::from_source(&source)
    }

    fn from_source(source: &str) -> Result<Self, DomainError> {
        let mut tera = Tera::default();
        tera.register_filter("grouped", tera_grouped_filter);
        tera.add_raw_template(TEMPLATE_NAME, source)
            .map_err(|e| DomainError::render(format!("invalid proposal template: {e}")))?;

        Ok(Self {
            tera,
            title: DEFAULT_TITLE.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    fn order_id() -> String {
        let suffix: u32 = rand::thread_rng().gen_range(0..1000);
        format!("{}-{suffix}", Utc::now().timestamp())
    }
}

impl DocumentRenderer for TeraDocumentRenderer {
    fn render(&self, items: &[LineItem], total_cost: i64) -> Result<Vec<u8>, DomainError> {
        let mut context = Context::new();
        context.insert("title", &self.title);
        context.insert("order_id", &Self::order_id());
        context.insert("issued_on", &Utc::now().format("%d.%m.%Y").to_string());
        context.insert("currency", &self.currency);
        context.insert("items", items);
        context.insert("total_cost", &total_cost);

        let html = self
            .tera
            .render(TEMPLATE_NAME, &context)
            .map_err(|e| DomainError::render(format!("failed to render proposal: {e}")))?;
        Ok(html.into_bytes())
    }

    fn content_type(&self) -> &'static str {
        "text/html; charset=utf-8"
    }

    fn file_extension(&self) -> &'static str {
        "html"
    }
}
