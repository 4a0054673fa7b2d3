//! Entry point: fetch, analyse, save, then fold the outcome into one response.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::services::{ItemStore, SentimentDetector, TweetSearch};
use crate::stages::{AnalyseTweets, FetchTweets, SaveTweets};
use crate::types::BatchWriteResponse;

/// Error slot of the invocation callback. Always `None` in practice: stage
/// failures are reported through a `400` [`HandlerResponse`] instead.
pub type HandlerError = PipelineError;

/// Trigger metadata. Logged, otherwise ignored by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerEvent {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,
    #[serde(default)]
    pub detail: serde_json::Value,
}

/// Per-invocation metadata supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationContext {
    pub request_id: String,
    pub function_name: String,
}

/// The uniform envelope returned for every invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: String,
    pub headers: BTreeMap<String, String>,
}

impl HandlerResponse {
    /// `200` with the serialized store response as body.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Serialize`] if the response cannot be
    /// rendered as JSON.
    pub fn success(response: &BatchWriteResponse) -> Result<Self, PipelineError> {
        let body = serde_json::to_string(response).map_err(PipelineError::Serialize)?;
        Ok(Self::with_status(200, body))
    }

    /// `400` with the underlying error message as body. The failing stage
    /// is not named.
    #[must_use]
    pub fn failure(error: &PipelineError) -> Self {
        Self::with_status(400, error.message())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    fn with_status(status_code: u16, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            body,
            headers,
        }
    }
}

/// Sequences [`FetchTweets`], [`AnalyseTweets`] and [`SaveTweets`].
pub struct TweetHandler<S, D, W> {
    fetch: FetchTweets<S>,
    analyse: AnalyseTweets<D>,
    save: SaveTweets<W>,
    query: String,
}

impl<S, D, W> TweetHandler<S, D, W>
where
    S: TweetSearch,
    D: SentimentDetector,
    W: ItemStore,
{
    #[must_use]
    pub fn new(
        fetch: FetchTweets<S>,
        analyse: AnalyseTweets<D>,
        save: SaveTweets<W>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            fetch,
            analyse,
            save,
            query: query.into(),
        }
    }

    /// Run the three stages in order, each consuming the previous output.
    ///
    /// # Errors
    ///
    /// Returns the first stage error; later stages are not started.
    pub async fn run(&self) -> Result<BatchWriteResponse, PipelineError> {
        let tweets = self.fetch.execute(&self.query).await?;
        let tweets = self.analyse.execute(tweets).await?;
        self.save.execute(&tweets).await
    }

    /// Run the pipeline once and shape the outcome into a [`HandlerResponse`].
    pub async fn handle(
        &self,
        event: &TriggerEvent,
        context: &InvocationContext,
    ) -> HandlerResponse {
        tracing::info!(
            request_id = %context.request_id,
            source = %event.source,
            "handler invoked"
        );

        let outcome = self
            .run()
            .await
            .and_then(|response| HandlerResponse::success(&response));
        match outcome {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(request_id = %context.request_id, error = %e, "pipeline failed");
                HandlerResponse::failure(&e)
            }
        }
    }

    /// Callback form of [`Self::handle`]: `callback` is called exactly once
    /// with `(None, response)`.
    pub async fn invoke<F>(&self, event: &TriggerEvent, context: &InvocationContext, callback: F)
    where
        F: FnOnce(Option<HandlerError>, HandlerResponse),
    {
        let response = self.handle(event, context).await;
        callback(None, response);
    }
}
