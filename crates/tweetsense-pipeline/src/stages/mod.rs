//! The three pipeline stages, run in order by [`crate::TweetHandler`].

mod analyse;
mod fetch;
mod save;

pub use analyse::{AnalyseTweets, LANGUAGE_CODE};
pub use fetch::FetchTweets;
pub use save::SaveTweets;
