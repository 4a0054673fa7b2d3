use crate::error::PipelineError;
use crate::services::TweetSearch;
use crate::types::Post;

/// Fetch tweets matching a search expression.
pub struct FetchTweets<S> {
    search: S,
}

impl<S: TweetSearch> FetchTweets<S> {
    #[must_use]
    pub fn new(search: S) -> Self {
        Self { search }
    }

    /// Run one search and return the statuses from the first result page.
    ///
    /// # Errors
    ///
    /// Propagates the search client's error unchanged. No retry.
    pub async fn execute(&self, query: &str) -> Result<Vec<Post>, PipelineError> {
        tracing::info!(query, "fetching tweets");
        let posts = self.search.search(query).await?;
        tracing::info!(count = posts.len(), "tweets fetched");
        Ok(posts)
    }
}
