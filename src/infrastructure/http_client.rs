use once_cell::sync::Lazy;
use serde::Serialize;

// No request timeout: a pending notification is awaited until it resolves.
static CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .pool_max_idle_per_host(8)
        .build()
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default http client");
            reqwest::Client::new()
        })
});

pub async fn post_json<T: Serialize>(
    url: &str,
    payload: &T,
) -> Result<reqwest::Response, reqwest::Error> {
    CLIENT.post(url).json(payload).send().await
}
