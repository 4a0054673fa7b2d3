use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The search API answered with a non-2xx status.
    #[error("Twitter API error ({status}): {body}")]
    TwitterApi { status: u16, body: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("OAuth signing error: {0}")]
    OAuth(String),

    #[error("Comprehend error: {0}")]
    Comprehend(String),

    #[error("DynamoDB error: {0}")]
    DynamoDb(String),

    #[error("invalid created_at for tweet {id}: {value}")]
    InvalidTimestamp { id: String, value: String },

    #[error("JSON serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl PipelineError {
    /// The underlying failure's message, without the variant prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Http(e) => e.to_string(),
            Self::TwitterApi { body, .. } => body.clone(),
            Self::Deserialize { source, .. } | Self::Serialize(source) => source.to_string(),
            Self::InvalidUrl(msg)
            | Self::OAuth(msg)
            | Self::Comprehend(msg)
            | Self::DynamoDb(msg) => msg.clone(),
            Self::InvalidTimestamp { .. } => self.to_string(),
        }
    }
}
