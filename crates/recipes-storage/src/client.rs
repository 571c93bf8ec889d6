use aws_config::BehaviorVersion;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_s3::Client;

/// Region used when neither the caller nor the environment names one.
/// Emulators accept any region.
pub const FALLBACK_REGION: &str = "us-east-1";

/// Build an S3 client from the default AWS config chain.
///
/// `endpoint` points the client at an emulator. Emulators serve buckets by
/// path rather than by virtual host, so path-style addressing is forced.
pub async fn build_client(region: Option<&str>, endpoint: Option<&str>) -> Client {
    let region =
        RegionProviderChain::first_try(region.map(|r| aws_config::Region::new(r.to_string())))
            .or_default_provider()
            .or_else(FALLBACK_REGION);

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(region)
        .load()
        .await;

    let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
    if let Some(endpoint) = endpoint {
        builder = builder
            .endpoint_url(endpoint_url(endpoint))
            .force_path_style(true);
    }

    Client::from_conf(builder.build())
}

/// Emulator hosts are often given as bare `host:port`.
pub fn endpoint_url(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}
