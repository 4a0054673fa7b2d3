//! OAuth 1.0a request signing (HMAC-SHA1, user context).

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distr::Alphanumeric;
use rand::Rng;
use sha1::Sha1;
use tweetsense_core::TwitterCredentials;

use crate::error::PipelineError;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 unreserved characters stay literal; everything else is encoded.
const RFC3986: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub(crate) fn encode(value: &str) -> String {
    utf8_percent_encode(value, RFC3986).to_string()
}

/// Per-request OAuth values that are not derived from credentials.
pub(crate) struct OAuthParams {
    pub nonce: String,
    pub timestamp: u64,
}

impl OAuthParams {
    pub(crate) fn generate() -> Self {
        let nonce = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        Self { nonce, timestamp }
    }
}

fn oauth_pairs(creds: &TwitterCredentials, params: &OAuthParams) -> Vec<(String, String)> {
    vec![
        ("oauth_consumer_key".to_string(), creds.consumer_key.clone()),
        ("oauth_nonce".to_string(), params.nonce.clone()),
        ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
        ("oauth_timestamp".to_string(), params.timestamp.to_string()),
        ("oauth_token".to_string(), creds.access_token.clone()),
        ("oauth_version".to_string(), "1.0".to_string()),
    ]
}

/// Build the signature base string from the method, the URL without query,
/// and every request parameter (query + oauth).
pub(crate) fn signature_base_string(
    method: &str,
    base_url: &str,
    params: &[(String, String)],
) -> String {
    let mut encoded: Vec<(String, String)> =
        params.iter().map(|(k, v)| (encode(k), encode(v))).collect();
    encoded.sort();
    let joined = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(base_url),
        encode(&joined)
    )
}

pub(crate) fn sign(
    base_string: &str,
    consumer_secret: &str,
    token_secret: &str,
) -> Result<String, PipelineError> {
    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| PipelineError::OAuth(e.to_string()))?;
    mac.update(base_string.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Build the `Authorization` header value for one request.
///
/// # Errors
///
/// Returns [`PipelineError::OAuth`] if the HMAC key is rejected.
pub(crate) fn authorization_header(
    creds: &TwitterCredentials,
    method: &str,
    base_url: &str,
    query: &[(String, String)],
    params: &OAuthParams,
) -> Result<String, PipelineError> {
    let mut oauth = oauth_pairs(creds, params);

    let mut all = query.to_vec();
    all.extend(oauth.iter().cloned());
    let base = signature_base_string(method, base_url, &all);
    let signature = sign(&base, &creds.consumer_secret, &creds.access_token_secret)?;
    oauth.push(("oauth_signature".to_string(), signature));
    oauth.sort();

    let fields = oauth
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!("OAuth {fields}"))
}
