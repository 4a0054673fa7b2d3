//! Cron trigger for the tweet pipeline.
//!
//! Each tick is one invocation: a fresh [`TriggerEvent`] and
//! [`InvocationContext`] are built and handed to the shared handler.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tweetsense_pipeline::{
    ComprehendDetector, DynamoDbStore, InvocationContext, TriggerEvent, TweetHandler,
    TwitterClient,
};

pub type ProductionHandler = TweetHandler<TwitterClient, ComprehendDetector, DynamoDbStore>;

const FUNCTION_NAME: &str = "tweetsense";

/// Builds and starts the scheduler with the pipeline job registered.
///
/// The returned [`JobScheduler`] must be kept alive for the lifetime of the
/// process.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if `schedule` is not a valid cron
/// expression or the scheduler fails to start.
pub async fn build_scheduler(
    handler: Arc<ProductionHandler>,
    schedule: &str,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let handler = Arc::clone(&handler);
        Box::pin(async move {
            run_once(&handler, "scheduler").await;
        })
    })?;
    scheduler.add(job).await?;

    tracing::info!(schedule, "scheduler: tweet pipeline job registered");
    scheduler.start().await?;
    Ok(scheduler)
}

/// Invoke the handler once and log the outcome.
pub async fn run_once(handler: &ProductionHandler, source: &str) {
    let event = trigger_event(source);
    let context = invocation_context();

    handler
        .invoke(&event, &context, |_err, response| {
            if response.is_success() {
                tracing::info!(
                    request_id = %context.request_id,
                    status = response.status_code,
                    "scheduler: pipeline run complete"
                );
            } else {
                tracing::error!(
                    request_id = %context.request_id,
                    status = response.status_code,
                    body = %response.body,
                    "scheduler: pipeline run failed"
                );
            }
        })
        .await;
}

fn trigger_event(source: &str) -> TriggerEvent {
    TriggerEvent {
        source: source.to_string(),
        scheduled_at: Some(chrono::Utc::now().to_rfc3339()),
        detail: serde_json::Value::Null,
    }
}

fn invocation_context() -> InvocationContext {
    InvocationContext {
        request_id: uuid::Uuid::new_v4().to_string(),
        function_name: FUNCTION_NAME.to_string(),
    }
}
