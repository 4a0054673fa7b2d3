//! Fixtures and in-memory fakes shared by the integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tweetsense_core::TwitterCredentials;
use tweetsense_pipeline::{
    BatchWriteRequest, BatchWriteResponse, ItemStore, PipelineError, Post, SentimentDetector,
    SentimentResult,
};

pub const SEARCH_TWEETS: &str = include_str!("../fixtures/search_tweets.json");
pub const BATCH_DETECT_SENTIMENT: &str = include_str!("../fixtures/batch_detect_sentiment.json");
pub const BATCH_WRITE_ITEM: &str = include_str!("../fixtures/batch_write_item.json");

pub fn search_body() -> serde_json::Value {
    serde_json::from_str(SEARCH_TWEETS).expect("search fixture is valid JSON")
}

pub fn fixture_posts() -> Vec<Post> {
    let body = search_body();
    serde_json::from_value(body["statuses"].clone()).expect("statuses deserialize into posts")
}

pub fn fixture_results() -> Vec<SentimentResult> {
    let body: serde_json::Value =
        serde_json::from_str(BATCH_DETECT_SENTIMENT).expect("sentiment fixture is valid JSON");
    serde_json::from_value(body["ResultList"].clone()).expect("results deserialize")
}

pub fn fixture_store_response() -> BatchWriteResponse {
    serde_json::from_str(BATCH_WRITE_ITEM).expect("store fixture deserializes")
}

pub fn test_credentials() -> TwitterCredentials {
    TwitterCredentials {
        consumer_key: "test-consumer-key".to_string(),
        consumer_secret: "test-consumer-secret".to_string(),
        access_token: "test-access-token".to_string(),
        access_token_secret: "test-access-token-secret".to_string(),
    }
}

/// Recorded `(language_code, texts)` pairs.
pub type DetectorCalls = Arc<Mutex<Vec<(String, Vec<String>)>>>;

/// Sentiment detector returning canned results, or failing with a message.
pub struct FakeDetector {
    outcome: Result<Vec<SentimentResult>, String>,
    pub calls: DetectorCalls,
}

impl FakeDetector {
    pub fn returning(results: Vec<SentimentResult>) -> Self {
        Self {
            outcome: Ok(results),
            calls: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: Arc::default(),
        }
    }
}

impl SentimentDetector for FakeDetector {
    async fn batch_detect_sentiment(
        &self,
        language_code: &str,
        texts: Vec<String>,
    ) -> Result<Vec<SentimentResult>, PipelineError> {
        self.calls
            .lock()
            .unwrap()
            .push((language_code.to_string(), texts));
        match &self.outcome {
            Ok(results) => Ok(results.clone()),
            Err(message) => Err(PipelineError::Comprehend(message.clone())),
        }
    }
}

/// Item store recording every request it receives.
pub struct FakeStore {
    outcome: Result<BatchWriteResponse, String>,
    pub requests: Arc<Mutex<Vec<BatchWriteRequest>>>,
}

impl FakeStore {
    pub fn returning(response: BatchWriteResponse) -> Self {
        Self {
            outcome: Ok(response),
            requests: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            requests: Arc::default(),
        }
    }
}

impl ItemStore for FakeStore {
    async fn batch_write_item(
        &self,
        request: BatchWriteRequest,
    ) -> Result<BatchWriteResponse, PipelineError> {
        self.requests.lock().unwrap().push(request);
        match &self.outcome {
            Ok(response) => Ok(response.clone()),
            Err(message) => Err(PipelineError::DynamoDb(message.clone())),
        }
    }
}
