use crate::domain::{DomainError, LineItem};

/// Turns priced line items into a document. The encoding is the renderer's
/// business; callers treat the bytes as opaque.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, items: &[LineItem], total_cost: i64) -> Result<Vec<u8>, DomainError>;

    /// MIME type of the rendered bytes.
    fn content_type(&self) -> &'static str;

    /// File extension (without dot) for saving the rendered bytes.
    fn file_extension(&self) -> &'static str;
}
