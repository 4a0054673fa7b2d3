use crate::error::PipelineError;
use crate::services::ItemStore;
use crate::types::{BatchWriteRequest, BatchWriteResponse, Post, StorageRecord, WriteRequest};

/// Persist analysed tweets with one batch write.
pub struct SaveTweets<W> {
    store: W,
    table_name: String,
}

impl<W: ItemStore> SaveTweets<W> {
    #[must_use]
    pub fn new(store: W, table_name: impl Into<String>) -> Self {
        Self {
            store,
            table_name: table_name.into(),
        }
    }

    /// Build one put operation per tweet, in order, for the configured table.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidTimestamp`] if any tweet's
    /// `created_at` cannot be parsed.
    pub fn build_request(&self, posts: &[Post]) -> Result<BatchWriteRequest, PipelineError> {
        let requests = posts
            .iter()
            .map(|post| StorageRecord::from_post(post).map(|r| WriteRequest::put(r.into_item())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(BatchWriteRequest::for_table(&self.table_name, requests))
    }

    /// Write every tweet in a single `BatchWriteItem` call.
    ///
    /// The batch is not split at the store's per-call item limit; an
    /// oversized batch is rejected by the store and that error is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp cannot be parsed (before any store
    /// call) or if the store call fails.
    pub async fn execute(&self, posts: &[Post]) -> Result<BatchWriteResponse, PipelineError> {
        tracing::info!(count = posts.len(), "saving tweets");
        let request = self.build_request(posts)?;

        tracing::info!(table = %self.table_name, items = request.len(), "sending request to DynamoDB");
        let response = self.store.batch_write_item(request).await?;

        let unprocessed: usize = response.unprocessed_items.values().map(Vec::len).sum();
        if unprocessed > 0 {
            tracing::warn!(unprocessed, "DynamoDB left items unprocessed");
        }
        tracing::info!("data stored in DynamoDB");
        Ok(response)
    }
}
