use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Assemble a priced proposal for a free-text request
    Quote {
        query: String,

        /// Where to write the rendered proposal (defaults to the configured output directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load the product catalog, parsing the raw price list if there is no cache
    Catalog {
        /// Show at most this many products
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the catalog products retrieved for a request, without planning
    Search {
        query: String,

        #[arg(long, default_value = "10")]
        num: usize,
    },

    /// Start the HTTP API
    Serve {
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },
}
