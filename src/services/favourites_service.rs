use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::{AppError, Result},
    models::{FavouriteStatus, FavouritesRecord},
};

const MAX_WRITE_ATTEMPTS: usize = 3;

#[async_trait]
pub trait FavouritesRepository: Send + Sync {
    async fn load(&self, user_id: &str) -> Result<Option<FavouritesRecord>>;

    /// Overwrites the whole record if the stored version still equals
    /// `expected_version` (0 means no record yet). Returns `false` when
    /// another writer got there first.
    async fn save(&self, record: &FavouritesRecord, expected_version: u64) -> Result<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavouriteOp {
    Add,
    Remove,
}

impl FavouriteOp {
    /// Applies the op in place; the flag is false when the list is unchanged.
    fn apply(self, ids: &mut Vec<String>, deal_id: &str) -> (FavouriteStatus, bool) {
        let present = ids.iter().any(|id| id == deal_id);

        match (self, present) {
            (FavouriteOp::Add, true) => (FavouriteStatus::AlreadyInFavourites, false),
            (FavouriteOp::Add, false) => {
                ids.push(deal_id.to_string());
                (FavouriteStatus::Added, true)
            }
            (FavouriteOp::Remove, true) => {
                ids.retain(|id| id != deal_id);
                (FavouriteStatus::Removed, true)
            }
            (FavouriteOp::Remove, false) => (FavouriteStatus::NotInFavourites, false),
        }
    }
}

pub struct FavouritesService {
    repository: Arc<dyn FavouritesRepository>,
}

impl FavouritesService {
    pub fn new(repository: Arc<dyn FavouritesRepository>) -> Self {
        Self { repository }
    }

    pub async fn get(&self, user_id: &str) -> Result<Vec<String>> {
        Ok(self
            .repository
            .load(user_id)
            .await?
            .map(|record| record.product_ids)
            .unwrap_or_default())
    }

    pub async fn mutate(
        &self,
        user_id: &str,
        deal_id: &str,
        op: FavouriteOp,
    ) -> Result<(FavouriteStatus, Vec<String>)> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let current = self
                .repository
                .load(user_id)
                .await?
                .unwrap_or_else(|| FavouritesRecord {
                    user_id: user_id.to_string(),
                    ..Default::default()
                });

            let mut product_ids = current.product_ids;
            let (status, changed) = op.apply(&mut product_ids, deal_id);
            if !changed {
                return Ok((status, product_ids));
            }

            let updated = FavouritesRecord {
                user_id: user_id.to_string(),
                product_ids,
                version: current.version + 1,
            };

            if self.repository.save(&updated, current.version).await? {
                tracing::info!("Favourites {:?} {} for user {}", status, deal_id, user_id);
                return Ok((status, updated.product_ids));
            }

            tracing::warn!(
                "Concurrent favourites update for user {} (attempt {})",
                user_id,
                attempt
            );
        }

        Err(AppError::Conflict(
            "favourites were modified concurrently, try again".to_string(),
        ))
    }
}
