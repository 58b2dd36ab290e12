use reqwest::Client;
use std::time::Duration;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates a new HTTP client for store requests.
    ///
    /// Retries are not configured here: a failed request surfaces as a
    /// store error and the scheduler decides whether to rerun the job.
    pub fn create_client(timeout_secs: u64) -> Client {
        Client::builder()
            .pool_max_idle_per_host(2)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("driftwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    }
}
