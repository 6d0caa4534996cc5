#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use kitquote::config::{CatalogConfig, OutputConfig};
use kitquote::{AppConfig, Container, MockGenerationClient, Product};

pub const PLAN: &str = "- Крышка 200х200, 2";
pub const SELECTION: &str = r#"Вот результат:
```json
{"found_items": [{"id": 7, "quantity": 2}]}
```"#;

pub fn config_in(dir: &Path) -> AppConfig {
    AppConfig {
        use_alternate_provider: true,
        model_keywords: false,
        catalog: CatalogConfig {
            source_path: dir.join("materials.csv"),
            cache_path: dir.join("products.json"),
        },
        output: OutputConfig {
            log_dir: dir.join("logs"),
            output_dir: dir.join("out"),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn write_cache(dir: &Path, products: &[Product]) {
    let json = serde_json::to_string_pretty(products).expect("serialize products");
    std::fs::write(dir.join("products.json"), json).expect("write cache");
}

pub fn sample_products() -> Vec<Product> {
    vec![
        Product::new(3, "Винт М6х20", 2),
        Product::new(7, "Крышка 200х200", 50),
        Product::new(9, "Короб 200х200 оцинкованный", 300),
    ]
}

pub async fn container_with(
    config: AppConfig,
    client: Arc<MockGenerationClient>,
) -> Container {
    Container::with_generation_client(config, client)
        .await
        .expect("container")
}
