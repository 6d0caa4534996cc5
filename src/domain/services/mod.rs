//! Pure text services used by the pipeline.

mod structured_output;
mod tokenizer;

pub use structured_output::*;
pub use tokenizer::*;
