use recipes_storage::client::endpoint_url;

#[test]
fn bare_emulator_hosts_get_a_scheme() {
    assert_eq!(endpoint_url("localhost:4443"), "http://localhost:4443");
    assert_eq!(endpoint_url("http://minio:9000"), "http://minio:9000");
    assert_eq!(endpoint_url("https://s3.local"), "https://s3.local");
}
