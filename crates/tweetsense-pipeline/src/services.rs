//! Seams between the pipeline stages and the external services they call.
//!
//! Each stage is generic over one of these traits. Production code plugs in
//! [`crate::TwitterClient`], [`crate::ComprehendDetector`] and
//! [`crate::DynamoDbStore`]; tests plug in in-memory fakes.

use std::future::Future;

use crate::error::PipelineError;
use crate::types::{BatchWriteRequest, BatchWriteResponse, Post, SentimentResult};

/// Social-media search. Returns the first page of matches only.
pub trait TweetSearch {
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<Post>, PipelineError>> + Send;
}

/// Batch sentiment classification.
///
/// Implementations must return results in the order the texts were
/// submitted; callers merge by position.
pub trait SentimentDetector {
    fn batch_detect_sentiment(
        &self,
        language_code: &str,
        texts: Vec<String>,
    ) -> impl Future<Output = Result<Vec<SentimentResult>, PipelineError>> + Send;
}

/// Key-value store accepting one batch of put operations per call.
pub trait ItemStore {
    fn batch_write_item(
        &self,
        request: BatchWriteRequest,
    ) -> impl Future<Output = Result<BatchWriteResponse, PipelineError>> + Send;
}
