use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client as DynamoClient, error::DisplayErrorContext, types::AttributeValue};

use crate::{
    error::{AppError, Result},
    models::FavouritesRecord,
    services::favourites_service::FavouritesRepository,
};

const USER_ID: &str = "userId";
const FAVOURITES: &str = "favouriteProducts";
const VERSION: &str = "version";

pub struct DynamoFavouritesStore {
    client: DynamoClient,
    table: String,
}

impl DynamoFavouritesStore {
    pub fn new(client: DynamoClient, table: String) -> Self {
        tracing::info!("Favourites stored in DynamoDB table {}", table);
        Self { client, table }
    }
}

pub fn record_from_item(
    user_id: &str,
    item: &HashMap<String, AttributeValue>,
) -> Result<FavouritesRecord> {
    let product_ids = match item.get(FAVOURITES) {
        None => Vec::new(),
        Some(AttributeValue::L(values)) => values
            .iter()
            .map(|value| {
                value.as_s().cloned().map_err(|_| {
                    AppError::StorageError(format!("Non-string favourite for user {}", user_id))
                })
            })
            .collect::<Result<Vec<_>>>()?,
        Some(AttributeValue::Ss(values)) => values.clone(),
        Some(_) => {
            return Err(AppError::StorageError(format!(
                "Unexpected favourites attribute type for user {}",
                user_id
            )));
        }
    };

    let version = match item.get(VERSION) {
        None => 0,
        Some(value) => value
            .as_n()
            .ok()
            .and_then(|n| n.parse::<u64>().ok())
            .ok_or_else(|| {
                AppError::StorageError(format!("Invalid favourites version for user {}", user_id))
            })?,
    };

    Ok(FavouritesRecord {
        user_id: user_id.to_string(),
        product_ids,
        version,
    })
}

#[async_trait]
impl FavouritesRepository for DynamoFavouritesStore {
    async fn load(&self, user_id: &str) -> Result<Option<FavouritesRecord>> {
        let response = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(USER_ID, AttributeValue::S(user_id.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| {
                AppError::StorageError(format!(
                    "Failed to read favourites: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        response
            .item()
            .map(|item| record_from_item(user_id, item))
            .transpose()
    }

    async fn save(&self, record: &FavouritesRecord, expected_version: u64) -> Result<bool> {
        let ids = record
            .product_ids
            .iter()
            .map(|id| AttributeValue::S(id.clone()))
            .collect();

        let mut request = self
            .client
            .put_item()
            .table_name(&self.table)
            .item(USER_ID, AttributeValue::S(record.user_id.clone()))
            .item(FAVOURITES, AttributeValue::L(ids))
            .item(VERSION, AttributeValue::N(record.version.to_string()))
            .expression_attribute_names("#version", VERSION);

        // Records written before versioning have no version attribute.
        request = if expected_version == 0 {
            request.condition_expression("attribute_not_exists(#version)")
        } else {
            request
                .condition_expression("#version = :expected")
                .expression_attribute_values(
                    ":expected",
                    AttributeValue::N(expected_version.to_string()),
                )
        };

        match request.send().await {
            Ok(_) => Ok(true),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_conditional_check_failed_exception()) =>
            {
                Ok(false)
            }
            Err(err) => Err(AppError::StorageError(format!(
                "Failed to write favourites: {}",
                DisplayErrorContext(&err)
            ))),
        }
    }
}
