/// OAuth 1.0a user-context credentials for the Twitter search API.
#[derive(Clone)]
pub struct TwitterCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl std::fmt::Debug for TwitterCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterCredentials")
            .field("consumer_key", &"[redacted]")
            .field("consumer_secret", &"[redacted]")
            .field("access_token", &"[redacted]")
            .field("access_token_secret", &"[redacted]")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub twitter: TwitterCredentials,
    pub twitter_api_base_url: String,
    /// Search expression sent to the Twitter search API on every run.
    pub search_query: String,
    /// DynamoDB table receiving the analysed tweets.
    pub table_name: String,
    /// `None` falls back to the AWS SDK default region chain.
    pub comprehend_region: Option<String>,
    pub dynamodb_region: Option<String>,
    /// Endpoint override for both AWS clients (e.g. a local stack).
    pub aws_endpoint_url: Option<String>,
    pub request_timeout_secs: u64,
    /// Six-field cron expression (seconds first) driving the scheduled run.
    pub schedule: String,
    pub run_on_start: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("twitter", &self.twitter)
            .field("twitter_api_base_url", &self.twitter_api_base_url)
            .field("search_query", &self.search_query)
            .field("table_name", &self.table_name)
            .field("comprehend_region", &self.comprehend_region)
            .field("dynamodb_region", &self.dynamodb_region)
            .field("aws_endpoint_url", &self.aws_endpoint_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("schedule", &self.schedule)
            .field("run_on_start", &self.run_on_start)
            .finish()
    }
}
