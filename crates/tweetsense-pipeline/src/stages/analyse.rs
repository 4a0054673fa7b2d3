use crate::error::PipelineError;
use crate::services::SentimentDetector;
use crate::types::Post;

/// Language code sent with every sentiment batch.
pub const LANGUAGE_CODE: &str = "en";

/// Score tweets with a batch sentiment detector.
pub struct AnalyseTweets<D> {
    detector: D,
}

impl<D: SentimentDetector> AnalyseTweets<D> {
    #[must_use]
    pub fn new(detector: D) -> Self {
        Self { detector }
    }

    /// Submit every tweet's text in one batch and merge the results back.
    ///
    /// Result `i` is attached to tweet `i`. When the detector returns fewer
    /// results than tweets, only the covered prefix is annotated and the rest
    /// are returned without sentiment. Surplus results are ignored.
    ///
    /// # Errors
    ///
    /// Propagates the detector's error unchanged.
    pub async fn execute(&self, mut posts: Vec<Post>) -> Result<Vec<Post>, PipelineError> {
        tracing::info!(count = posts.len(), "processing tweets");

        let texts: Vec<String> = posts.iter().map(|p| p.text.clone()).collect();
        let results = self
            .detector
            .batch_detect_sentiment(LANGUAGE_CODE, texts)
            .await?;

        tracing::info!(count = results.len(), "processing analysed tweets");
        if results.len() < posts.len() {
            tracing::warn!(
                expected = posts.len(),
                got = results.len(),
                "sentiment service returned fewer results than tweets; tail left unannotated"
            );
        }

        for (post, result) in posts.iter_mut().zip(&results) {
            post.annotate(result);
        }

        Ok(posts)
    }
}
