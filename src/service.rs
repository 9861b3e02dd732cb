use crate::deal::{Deal, UpdateEnvelope};
use crate::error::AppError;
use crate::projector::project;
use crate::query::{build_free_text_query, build_range_query};
use crate::search::DealIndex;
use std::sync::Arc;

/// Deal operations on top of an injected [`DealIndex`].
#[derive(Clone)]
pub struct DealService {
    index: Arc<dyn DealIndex>,
}

impl DealService {
    pub fn new(index: Arc<dyn DealIndex>) -> Self {
        Self { index }
    }

    pub async fn ensure_index_exists(&self) -> Result<(), AppError> {
        self.index.ensure_index_exists().await
    }

    pub async fn search_by_minimum_value(&self, threshold: i64) -> Result<Vec<Deal>, AppError> {
        log::debug!("Searching deals with value >= {}", threshold);
        let envelope = self.index.search(&build_range_query(threshold)).await?;
        let deals = project(envelope);
        log::debug!("Found {} deals with value >= {}", deals.len(), threshold);
        Ok(deals)
    }

    pub async fn search_by_free_text(&self, text: &str) -> Result<Vec<Deal>, AppError> {
        log::debug!("Searching deals matching '{}'", text);
        let envelope = self.index.search(&build_free_text_query(text)).await?;
        let deals = project(envelope);
        log::debug!("Found {} deals matching '{}'", deals.len(), text);
        Ok(deals)
    }

    pub async fn create(&self, deal: &Deal) -> Result<(), AppError> {
        self.index.index_deal(deal).await
    }

    pub async fn update(&self, deal: &Deal) -> Result<(), AppError> {
        self.index.update_deal(deal.id(), UpdateEnvelope::new(deal)).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Deal>, AppError> {
        self.index.get_deal(id).await
    }
}
