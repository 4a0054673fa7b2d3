//! AWS Comprehend adapter for [`SentimentDetector`].

use aws_sdk_comprehend::error::DisplayErrorContext;
use aws_sdk_comprehend::types::{BatchDetectSentimentItemResult, LanguageCode};
use aws_sdk_comprehend::Client;

use crate::aws::load_sdk_config;
use crate::error::PipelineError;
use crate::services::SentimentDetector;
use crate::types::{SentimentLabel, SentimentResult, SentimentScore};

pub struct ComprehendDetector {
    client: Client,
}

impl ComprehendDetector {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client for `region` (or the default chain when `None`).
    pub async fn from_region(region: Option<&str>, endpoint_url: Option<&str>) -> Self {
        let config = load_sdk_config(region, endpoint_url).await;
        Self::new(Client::new(&config))
    }
}

impl SentimentDetector for ComprehendDetector {
    async fn batch_detect_sentiment(
        &self,
        language_code: &str,
        texts: Vec<String>,
    ) -> Result<Vec<SentimentResult>, PipelineError> {
        let output = self
            .client
            .batch_detect_sentiment()
            .language_code(LanguageCode::from(language_code))
            .set_text_list(Some(texts))
            .send()
            .await
            .map_err(|e| PipelineError::Comprehend(DisplayErrorContext(&e).to_string()))?;

        let failed = output.error_list();
        if !failed.is_empty() {
            tracing::warn!(
                failed = failed.len(),
                "Comprehend could not score some texts; results will shift positionally"
            );
        }

        output.result_list().iter().map(to_sentiment_result).collect()
    }
}

fn to_sentiment_result(
    item: &BatchDetectSentimentItemResult,
) -> Result<SentimentResult, PipelineError> {
    let sentiment = item
        .sentiment()
        .ok_or_else(|| PipelineError::Comprehend("result without sentiment".to_string()))?
        .as_str()
        .parse::<SentimentLabel>()
        .map_err(PipelineError::Comprehend)?;

    let sentiment_score = item
        .sentiment_score()
        .map(|s| SentimentScore {
            positive: s.positive().unwrap_or_default(),
            negative: s.negative().unwrap_or_default(),
            neutral: s.neutral().unwrap_or_default(),
            mixed: s.mixed().unwrap_or_default(),
        })
        .unwrap_or_default();

    Ok(SentimentResult {
        index: item.index(),
        sentiment,
        sentiment_score,
    })
}
