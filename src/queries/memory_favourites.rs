use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::Result, models::FavouritesRecord, services::favourites_service::FavouritesRepository,
};

/// Process-local favourites, for development without DynamoDB.
#[derive(Debug, Default)]
pub struct MemoryFavouritesStore {
    records: RwLock<HashMap<String, FavouritesRecord>>,
}

#[async_trait]
impl FavouritesRepository for MemoryFavouritesStore {
    async fn load(&self, user_id: &str) -> Result<Option<FavouritesRecord>> {
        Ok(self.records.read().await.get(user_id).cloned())
    }

    async fn save(&self, record: &FavouritesRecord, expected_version: u64) -> Result<bool> {
        let mut records = self.records.write().await;
        let stored_version = records.get(&record.user_id).map_or(0, |r| r.version);

        if stored_version != expected_version {
            return Ok(false);
        }

        records.insert(record.user_id.clone(), record.clone());
        Ok(true)
    }
}
