use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Load shared AWS configuration for one service client.
///
/// `region` overrides the default region chain; `endpoint_url` points the
/// client at a non-AWS endpoint such as a local stack.
pub(crate) async fn load_sdk_config(
    region: Option<&str>,
    endpoint_url: Option<&str>,
) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_owned()));
    }
    if let Some(url) = endpoint_url {
        loader = loader.endpoint_url(url);
    }
    loader.load().await
}
