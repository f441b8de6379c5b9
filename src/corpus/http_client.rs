//! Shared HTTP client pool for the corpus fetcher, grounded on the
//! teacher's connection-pooling settings.

use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::Duration;

struct HttpClientPool {
    client: Client,
}

impl HttpClientPool {
    fn new() -> Self {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .http2_prior_knowledge()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

static HTTP_CLIENT_POOL: Lazy<Arc<HttpClientPool>> = Lazy::new(|| Arc::new(HttpClientPool::new()));

/// Get the shared default-timeout HTTP client.
pub fn get_http_client() -> &'static Client {
    &HTTP_CLIENT_POOL.client
}

/// Build a client with a caller-specified timeout, reusing the same
/// pooling/keepalive/TLS settings as the shared default client.
pub fn create_http_client(timeout: Duration) -> Client {
    ClientBuilder::new()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(timeout)
        .tcp_keepalive(Duration::from_secs(60))
        .tcp_nodelay(true)
        .http2_prior_knowledge()
        .use_rustls_tls()
        .build()
        .expect("Failed to create HTTP client with custom timeout")
}
