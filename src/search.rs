use crate::deal::{Deal, UpdateEnvelope};
use crate::error::AppError;
use crate::projector::SearchResultEnvelope;
use crate::query::QueryDocument;
use async_trait::async_trait;

/// The search engine as seen by the deal service: accepts query documents and
/// returns hit envelopes, accepts document bodies and stores them.
#[async_trait]
pub trait DealIndex: Send + Sync {
    async fn ensure_index_exists(&self) -> Result<(), AppError>;
    /// Indexes `deal` under its id with an immediate refresh.
    async fn index_deal(&self, deal: &Deal) -> Result<(), AppError>;
    async fn update_deal(&self, id: &str, update: UpdateEnvelope<'_>) -> Result<(), AppError>;
    async fn get_deal(&self, id: &str) -> Result<Option<Deal>, AppError>;
    async fn search(&self, query: &QueryDocument) -> Result<SearchResultEnvelope, AppError>;
}
