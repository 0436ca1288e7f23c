use aws_config::SdkConfig;
use aws_sdk_dynamodb::Client as DynamoClient;
use rust_decimal::Decimal;

use crate::{
    config::CatalogSource,
    error::Result,
    models::{Product, ProductSummary},
    queries::product_queries,
};

/// Read-only product snapshot taken once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    summaries: Vec<ProductSummary>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            summaries: demo_summaries(),
        }
    }

    pub fn demo() -> Self {
        Self::new(demo_products())
    }

    pub async fn load(source: &CatalogSource, sdk_config: &SdkConfig) -> Result<Self> {
        let catalog = match source {
            CatalogSource::Static => Self::demo(),
            CatalogSource::DynamoDb { table } => {
                let client = DynamoClient::new(sdk_config);
                Self::new(product_queries::scan_products(&client, table).await?)
            }
        };

        tracing::info!(
            "Product catalog loaded from {:?} with {} products",
            source,
            catalog.products.len()
        );

        Ok(catalog)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn summaries(&self) -> &[ProductSummary] {
        &self.summaries
    }
}

fn demo_summaries() -> Vec<ProductSummary> {
    vec![
        ProductSummary {
            id: "1".to_string(),
            name: "Laptop X".to_string(),
            price: Decimal::new(99999, 2),
        },
        ProductSummary {
            id: "2".to_string(),
            name: "Smartphone Y".to_string(),
            price: Decimal::new(49950, 2),
        },
        ProductSummary {
            id: "3".to_string(),
            name: "Headphones Z".to_string(),
            price: Decimal::new(8990, 2),
        },
    ]
}

fn demo_product(id: &str, title: &str, price: &str, store: &str, description: &str) -> Product {
    Product {
        id: id.to_string(),
        title: title.to_string(),
        price: price.to_string(),
        store: store.to_string(),
        image: format!("https://images.example.com/deals/{}.jpg", id),
        category: "Phones".to_string(),
        description: description.to_string(),
        special: None,
        color: None,
        rating: None,
        link: None,
        carousel: Vec::new(),
    }
}

fn demo_products() -> Vec<Product> {
    vec![
        Product {
            special: Some("-20%".to_string()),
            color: Some("Black".to_string()),
            rating: Some("4.6".to_string()),
            link: Some("https://elisa.fi/kauppa/puhelimet".to_string()),
            ..demo_product(
                "elisa-1",
                "Samsung Galaxy S24 128GB",
                "699,00 €",
                "Elisa",
                "6.2\" display, 50 MP camera, includes 5G subscription offer.",
            )
        },
        Product {
            color: Some("Blue".to_string()),
            rating: Some("4.4".to_string()),
            ..demo_product(
                "dna-1",
                "Apple iPhone 15 128GB",
                "829,00 €",
                "DNA",
                "A16 Bionic, USB-C, dual camera system.",
            )
        },
        Product {
            special: Some("Bundle".to_string()),
            ..demo_product(
                "telia-1",
                "Google Pixel 8a",
                "449,00 €",
                "Telia",
                "Tensor G3, seven years of updates, bundled earbuds.",
            )
        },
        demo_product(
            "elisa-2",
            "Nokia G42 5G",
            "199,00 €",
            "Elisa",
            "Repairable design, 50 MP triple camera.",
        ),
    ]
}
