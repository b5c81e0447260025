use crate::transport::cache::ResponseCache;
use crate::transport::error::TransportError;
use crate::transport::retry::RetryPolicy;
use log::{debug, info, warn};
use reqwest::{Client, Request, StatusCode};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A finished upstream exchange, either replayed from disk or fetched live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub url: String,
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub from_cache: bool,
}

/// HTTP client that answers repeated GETs from an on-disk cache and retries
/// transient failures.
///
/// Only 2xx responses are cached. Network errors and 5xx responses are retried
/// according to the [`RetryPolicy`]; any other status is handed back untouched.
#[derive(Debug, Clone)]
pub struct CachedHttpClient {
    client: Client,
    cache: ResponseCache,
    retry: RetryPolicy,
}

impl CachedHttpClient {
    pub fn new(cache: ResponseCache, retry: RetryPolicy) -> Result<Self, TransportError> {
        Self::with_timeout(cache, retry, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        cache: ResponseCache,
        retry: RetryPolicy,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::ClientBuild)?;
        Ok(Self {
            client,
            cache,
            retry,
        })
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Sends a GET for `url` with `query` appended, going through the cache.
    pub async fn get<Q>(&self, url: &str, query: &Q) -> Result<TransportResponse, TransportError>
    where
        Q: serde::Serialize + ?Sized,
    {
        let request = self
            .client
            .get(url)
            .query(query)
            .build()
            .map_err(|e| TransportError::InvalidUrl(url.to_string(), e))?;
        let full_url = request.url().to_string();
        let key = ResponseCache::key_for(&full_url);

        if let Some(body) = self.cache.get(&key).await? {
            info!("Cache hit for {}", full_url);
            return Ok(TransportResponse {
                url: full_url,
                status: StatusCode::OK,
                body,
                from_cache: true,
            });
        }

        debug!("Cache miss for {}, fetching", full_url);
        let response = self.send_with_retry(request, &full_url).await?;
        if response.status.is_success() {
            self.cache.put(&key, &response.body).await?;
        }
        Ok(response)
    }

    async fn send_with_retry(
        &self,
        request: Request,
        full_url: &str,
    ) -> Result<TransportResponse, TransportError> {
        let mut retry = 0;
        loop {
            // GET requests have no body, so cloning always succeeds.
            let attempt = match request.try_clone() {
                Some(attempt) => attempt,
                None => return self.send_once(request, full_url).await,
            };
            let exhausted = retry >= self.retry.max_retries;

            match self.send_once(attempt, full_url).await {
                Ok(response) if RetryPolicy::is_retryable_status(response.status) => {
                    if exhausted {
                        warn!(
                            "Giving up on {} after {} of {} attempts, last status {}",
                            full_url,
                            retry + 1,
                            self.retry.max_attempts(),
                            response.status
                        );
                        return Err(TransportError::RetriesExhausted {
                            url: full_url.to_string(),
                            status: response.status,
                            attempts: retry + 1,
                        });
                    }
                    warn!("Status {} from {}, will retry", response.status, full_url);
                }
                Ok(response) => return Ok(response),
                Err(e) => {
                    if exhausted {
                        warn!(
                            "Giving up on {} after {} of {} attempts: {}",
                            full_url,
                            retry + 1,
                            self.retry.max_attempts(),
                            e
                        );
                        return Err(e);
                    }
                    warn!("Request to {} failed: {}, will retry", full_url, e);
                }
            }

            retry += 1;
            let delay = self.retry.delay_for_retry(retry);
            debug!("Retry {} for {} in {:?}", retry, full_url, delay);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    async fn send_once(
        &self,
        request: Request,
        full_url: &str,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| TransportError::NetworkRequest(full_url.to_string(), e))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::BodyRead(full_url.to_string(), e))?;
        Ok(TransportResponse {
            url: full_url.to_string(),
            status,
            body: body.to_vec(),
            from_cache: false,
        })
    }
}
