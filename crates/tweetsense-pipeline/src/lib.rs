//! Tweet sentiment pipeline.
//!
//! Fetches tweets matching a search query from the Twitter search API, scores
//! them with AWS Comprehend's batch sentiment detection, and writes the
//! annotated tweets to DynamoDB in a single batch write. [`TweetHandler`]
//! sequences the three stages and folds the outcome into one
//! [`HandlerResponse`].

mod aws;
pub mod comprehend;
pub mod dynamodb;
pub mod error;
pub mod handler;
pub mod services;
pub mod stages;
pub mod twitter;
pub mod types;

pub use comprehend::ComprehendDetector;
pub use dynamodb::DynamoDbStore;
pub use error::PipelineError;
pub use handler::{HandlerError, HandlerResponse, InvocationContext, TriggerEvent, TweetHandler};
pub use services::{ItemStore, SentimentDetector, TweetSearch};
pub use stages::{AnalyseTweets, FetchTweets, SaveTweets};
pub use twitter::TwitterClient;
pub use types::{
    AttributeValue, BatchWriteRequest, BatchWriteResponse, Post, PutRequest, SentimentLabel,
    SentimentResult, SentimentScore, StorageRecord, WriteRequest,
};
