//! Outbound HTTP client for the Burrow lag-reporting API.
//!
//! The `LagReporter` trait is the seam between the orchestrator and the
//! network: production uses `BurrowClient` over reqwest, tests script
//! responses in memory.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use lagcheck_core::CheckError;

/// Raw access to Burrow's two consumer endpoints.
///
/// Implementations return the response body bytes; decoding is the
/// caller's job so that parse failures stay distinguishable from
/// transport failures.
#[async_trait]
pub trait LagReporter: Send + Sync {
    /// Fetch the body of the "list consumer groups" endpoint.
    async fn fetch_consumer_list(&self) -> Result<Vec<u8>, CheckError>;

    /// Fetch the body of the "consumer group status" endpoint for `group`.
    async fn fetch_consumer_status(&self, group: &str) -> Result<Vec<u8>, CheckError>;
}

/// Burrow client over a shared reqwest connection pool.
#[derive(Clone)]
pub struct BurrowClient {
    client: reqwest::Client,
    base_url: String,
    cluster: String,
}

impl BurrowClient {
    /// Build a client for the given Burrow base URL and cluster.
    ///
    /// The timeout bounds every individual fetch, so one slow group
    /// cannot stall the whole health check indefinitely.
    pub fn new(base_url: String, cluster: String, timeout: Duration) -> Result<Self, CheckError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CheckError::Transport(format!("Couldn't create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            cluster,
        })
    }

    fn consumer_list_url(&self) -> String {
        format!("{}/v2/kafka/{}/consumer", self.base_url, self.cluster)
    }

    fn consumer_status_url(&self, group: &str) -> String {
        format!(
            "{}/v2/kafka/{}/consumer/{}/status",
            self.base_url, self.cluster, group
        )
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, CheckError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CheckError::Transport(format!(
                "Burrow returned {status} for {url}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(url, &e))?;

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}

#[async_trait]
impl LagReporter for BurrowClient {
    async fn fetch_consumer_list(&self) -> Result<Vec<u8>, CheckError> {
        self.fetch(&self.consumer_list_url()).await
    }

    async fn fetch_consumer_status(&self, group: &str) -> Result<Vec<u8>, CheckError> {
        self.fetch(&self.consumer_status_url(group)).await
    }
}

fn transport_error(url: &str, err: &reqwest::Error) -> CheckError {
    if err.is_timeout() {
        CheckError::Transport(format!("Timed out reaching Burrow at {url}"))
    } else {
        CheckError::Transport(format!("Couldn't reach Burrow at {url}: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let client = BurrowClient::new(
            "http://burrow:8080".to_string(),
            "local".to_string(),
            Duration::from_secs(10),
        )
        .unwrap();

        assert_eq!(
            client.consumer_list_url(),
            "http://burrow:8080/v2/kafka/local/consumer"
        );
        assert_eq!(
            client.consumer_status_url("xp-notifications-push-2"),
            "http://burrow:8080/v2/kafka/local/consumer/xp-notifications-push-2/status"
        );
    }
}
