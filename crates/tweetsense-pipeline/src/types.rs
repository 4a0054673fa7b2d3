//! Tweets, sentiment results, and the typed-attribute items written to DynamoDB.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// One tweet from the search API.
///
/// Only the fields the pipeline reads are typed; everything else the API
/// returned is kept in `extra` and serialized back unchanged. `sentiment`
/// and `sentiment_score` are absent until [`crate::AnalyseTweets`] runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "id_str")]
    pub id: String,
    pub text: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<SentimentScore>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Post {
    /// Attach a sentiment result to this tweet.
    pub fn annotate(&mut self, result: &SentimentResult) {
        self.sentiment = Some(result.sentiment);
        self.sentiment_score = Some(result.sentiment_score.clone());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl SentimentLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
            Self::Mixed => "MIXED",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POSITIVE" => Ok(Self::Positive),
            "NEGATIVE" => Ok(Self::Negative),
            "NEUTRAL" => Ok(Self::Neutral),
            "MIXED" => Ok(Self::Mixed),
            other => Err(format!("unrecognised sentiment label: {other}")),
        }
    }
}

/// Per-label confidence, in the shape Comprehend returns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SentimentScore {
    #[serde(default)]
    pub positive: f32,
    #[serde(default)]
    pub negative: f32,
    #[serde(default)]
    pub neutral: f32,
    #[serde(default)]
    pub mixed: f32,
}

/// One entry of a batch sentiment response.
///
/// Results are merged onto tweets by position in the response list, not by
/// `index`. The sentiment service is assumed to answer in submission order;
/// nothing here verifies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SentimentResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
    pub sentiment: SentimentLabel,
    #[serde(default)]
    pub sentiment_score: SentimentScore,
}

/// A DynamoDB scalar, serialized as `{"S": ".."}` or `{"N": ".."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    S(String),
    N(String),
}

/// The projection of a [`Post`] that is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRecord {
    pub id: String,
    pub text: String,
    /// Epoch milliseconds parsed from `created_at`.
    pub timestamp: i64,
    pub sentiment: Option<SentimentLabel>,
}

impl StorageRecord {
    /// Project a tweet into a storage record.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidTimestamp`] if `created_at` cannot be
    /// parsed.
    pub fn from_post(post: &Post) -> Result<Self, PipelineError> {
        let timestamp =
            created_at_millis(&post.created_at).ok_or_else(|| PipelineError::InvalidTimestamp {
                id: post.id.clone(),
                value: post.created_at.clone(),
            })?;

        Ok(Self {
            id: post.id.clone(),
            text: post.text.clone(),
            timestamp,
            sentiment: post.sentiment,
        })
    }

    /// Typed-attribute item. `sentiment` is left out entirely when unset.
    #[must_use]
    pub fn into_item(self) -> BTreeMap<String, AttributeValue> {
        let mut item = BTreeMap::new();
        item.insert("id".to_string(), AttributeValue::S(self.id));
        item.insert("text".to_string(), AttributeValue::S(self.text));
        item.insert(
            "timestamp".to_string(),
            AttributeValue::N(self.timestamp.to_string()),
        );
        if let Some(sentiment) = self.sentiment {
            item.insert(
                "sentiment".to_string(),
                AttributeValue::S(sentiment.as_str().to_string()),
            );
        }
        item
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutRequest {
    pub item: BTreeMap<String, AttributeValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WriteRequest {
    pub put_request: PutRequest,
}

impl WriteRequest {
    #[must_use]
    pub fn put(item: BTreeMap<String, AttributeValue>) -> Self {
        Self {
            put_request: PutRequest { item },
        }
    }
}

/// A `BatchWriteItem` request: table name to put operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchWriteRequest {
    pub request_items: BTreeMap<String, Vec<WriteRequest>>,
}

impl BatchWriteRequest {
    #[must_use]
    pub fn for_table(table: &str, requests: Vec<WriteRequest>) -> Self {
        let mut request_items = BTreeMap::new();
        request_items.insert(table.to_string(), requests);
        Self { request_items }
    }

    /// Total number of write operations across all tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.request_items.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The store's answer to a batch write. Serialized as the success body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchWriteResponse {
    #[serde(default)]
    pub unprocessed_items: BTreeMap<String, Vec<WriteRequest>>,
}

/// Parse a Twitter `created_at` (`"Mon Jan 01 00:00:00 +0000 2024"`) into
/// epoch milliseconds.
///
/// The leading weekday is dropped unchecked, so a weekday that disagrees
/// with the date does not change the result. A `UTC` marker is inserted
/// before a ` +` offset, matching the normalisation the stored timestamps
/// have always gone through. Negative offsets are parsed as-is.
#[must_use]
pub fn created_at_millis(created_at: &str) -> Option<i64> {
    let without_weekday = created_at.split_once(' ').map_or(created_at, |(_, rest)| rest);
    let normalised = without_weekday.replacen(" +", " UTC +", 1);
    DateTime::parse_from_str(&normalised, "%b %d %H:%M:%S UTC %z %Y")
        .or_else(|_| DateTime::parse_from_str(without_weekday, "%b %d %H:%M:%S %z %Y"))
        .ok()
        .map(|dt| dt.timestamp_millis())
}
