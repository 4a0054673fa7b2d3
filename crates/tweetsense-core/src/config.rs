use crate::app_config::{AppConfig, TwitterCredentials};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it from a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // Empty strings are treated the same as unset variables.
    let get = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let require = |var: &str| -> Result<String, ConfigError> {
        get(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default =
        |var: &str, default: &str| -> String { get(var).unwrap_or_else(|| default.to_string()) };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match get(var) {
            None => Ok(default),
            Some(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false/1/0, got '{raw}'"),
            }),
        }
    };

    let twitter = TwitterCredentials {
        consumer_key: require("TWITTER_CONSUMER_KEY")?,
        consumer_secret: require("TWITTER_CONSUMER_SECRET")?,
        access_token: require("TWITTER_ACCESS_TOKEN")?,
        access_token_secret: require("TWITTER_ACCESS_TOKEN_SECRET")?,
    };

    let twitter_api_base_url = or_default("TWITTER_API_BASE_URL", "https://api.twitter.com/1.1/");
    let search_query = or_default("TWEETSENSE_SEARCH_QUERY", "#banana");
    let table_name = or_default("TWEETSENSE_TABLE_NAME", "MKPTweets");
    let comprehend_region = get("AWS_REGION_COMPREHEND");
    let dynamodb_region = get("AWS_REGION_DYNAMODB");
    let aws_endpoint_url = get("TWEETSENSE_AWS_ENDPOINT_URL");
    let request_timeout_secs = parse_u64("TWEETSENSE_REQUEST_TIMEOUT_SECS", "30")?;
    let schedule = or_default("TWEETSENSE_SCHEDULE", "0 */20 * * * *");
    let run_on_start = parse_bool("TWEETSENSE_RUN_ON_START", false)?;
    let log_level = or_default("TWEETSENSE_LOG_LEVEL", "info");

    Ok(AppConfig {
        log_level,
        twitter,
        twitter_api_base_url,
        search_query,
        table_name,
        comprehend_region,
        dynamodb_region,
        aws_endpoint_url,
        request_timeout_secs,
        schedule,
        run_on_start,
    })
}

/// Parse a boolean flag. Accepts `true`/`false`/`1`/`0`, case-insensitive.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
