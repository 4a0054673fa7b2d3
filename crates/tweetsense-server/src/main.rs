mod scheduler;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use tweetsense_pipeline::{
    AnalyseTweets, ComprehendDetector, DynamoDbStore, FetchTweets, SaveTweets, TweetHandler,
    TwitterClient,
};

use crate::scheduler::ProductionHandler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = tweetsense_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(?config, "loading function");

    let twitter = TwitterClient::with_base_url(
        config.twitter.clone(),
        config.request_timeout_secs,
        &config.twitter_api_base_url,
    )?;
    let endpoint = config.aws_endpoint_url.as_deref();
    let comprehend =
        ComprehendDetector::from_region(config.comprehend_region.as_deref(), endpoint).await;
    let dynamodb = DynamoDbStore::from_region(config.dynamodb_region.as_deref(), endpoint).await;

    let handler: Arc<ProductionHandler> = Arc::new(TweetHandler::new(
        FetchTweets::new(twitter),
        AnalyseTweets::new(comprehend),
        SaveTweets::new(dynamodb, config.table_name.clone()),
        config.search_query.clone(),
    ));

    let mut scheduler = scheduler::build_scheduler(Arc::clone(&handler), &config.schedule).await?;

    if config.run_on_start {
        scheduler::run_once(&handler, "startup").await;
    }

    shutdown_signal().await;
    scheduler.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, stopping scheduler");
}
