use std::collections::HashMap;

use aws_sdk_dynamodb::{Client as DynamoClient, error::DisplayErrorContext, types::AttributeValue};

use crate::{
    error::{AppError, Result},
    models::Product,
};

pub async fn scan_products(client: &DynamoClient, table: &str) -> Result<Vec<Product>> {
    let mut products = Vec::new();
    let mut start_key: Option<HashMap<String, AttributeValue>> = None;

    loop {
        let response = client
            .scan()
            .table_name(table)
            .set_exclusive_start_key(start_key.take())
            .send()
            .await
            .map_err(|e| {
                AppError::StorageError(format!(
                    "Failed to scan {}: {}",
                    table,
                    DisplayErrorContext(&e)
                ))
            })?;

        for item in response.items.unwrap_or_default() {
            match product_from_item(&item) {
                Some(product) => products.push(product),
                None => tracing::warn!("Skipping product item without id or title in {}", table),
            }
        }

        match response.last_evaluated_key {
            Some(key) if !key.is_empty() => start_key = Some(key),
            _ => break,
        }
    }

    Ok(products)
}

fn text(item: &HashMap<String, AttributeValue>, name: &str) -> Option<String> {
    match item.get(name)? {
        AttributeValue::S(value) => Some(value.clone()),
        AttributeValue::N(value) => Some(value.clone()),
        _ => None,
    }
}

fn text_list(item: &HashMap<String, AttributeValue>, name: &str) -> Vec<String> {
    match item.get(name) {
        Some(AttributeValue::L(values)) => values
            .iter()
            .filter_map(|value| value.as_s().ok().cloned())
            .collect(),
        Some(AttributeValue::Ss(values)) => values.clone(),
        _ => Vec::new(),
    }
}

pub fn product_from_item(item: &HashMap<String, AttributeValue>) -> Option<Product> {
    Some(Product {
        id: text(item, "id")?,
        title: text(item, "title")?,
        price: text(item, "price").unwrap_or_default(),
        store: text(item, "store").unwrap_or_default(),
        image: text(item, "image")
            .or_else(|| text(item, "image_url"))
            .unwrap_or_default(),
        category: text(item, "category").unwrap_or_default(),
        description: text(item, "description").unwrap_or_default(),
        special: text(item, "special"),
        color: text(item, "color"),
        rating: text(item, "rating"),
        link: text(item, "link"),
        carousel: text_list(item, "carousel"),
    })
}
