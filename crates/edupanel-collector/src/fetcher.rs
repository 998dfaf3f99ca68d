//! 요청 한도와 재시도가 적용된 원격 조회.
//!
//! 모든 시도(재시도 포함)는 [`RateLimiter`]를 먼저 통과합니다. 실패한 시도는
//! 지수 백오프(`base`, `2·base`, `4·base`, ...) 후 재시도하며, 마지막 시도 후에는
//! 대기하지 않습니다.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::rate_limiter::RateLimiter;

/// 원격 조회 오류.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// 연결 실패 등 네트워크 오류
    #[error("network error: {0}")]
    Network(String),

    /// 요청 시간 초과
    #[error("request timed out: {0}")]
    Timeout(String),

    /// 2xx가 아닌 응답
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// 모든 시도 실패
    #[error("retries exhausted after {attempts} attempts for {url}: {last_error}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last_error: String,
    },
}

/// 쿼리 파라미터.
pub type QueryParams = [(&'static str, String)];

/// HTTP GET 전송 계층.
///
/// 테스트에서는 가짜 구현으로 대체합니다.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// `url`에 GET 요청을 보내고 응답 본문을 반환합니다.
    async fn get(&self, url: &str, params: &QueryParams) -> Result<String, FetchError>;
}

/// reqwest 기반 전송 계층.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// 요청당 `timeout`을 적용한 클라이언트를 생성합니다.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, params: &QueryParams) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().await.map_err(classify)
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(err.to_string())
    } else if let Some(status) = err.status() {
        FetchError::Status {
            status: status.as_u16(),
            url: err.url().map(|u| u.to_string()).unwrap_or_default(),
        }
    } else {
        FetchError::Network(err.to_string())
    }
}

/// 재시도 정책.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 총 시도 횟수 (최소 1)
    pub max_attempts: u32,
    /// 첫 재시도 전 대기 시간
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_base: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base,
        }
    }

    /// `attempt`번째(1부터) 시도가 실패한 뒤의 대기 시간.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.backoff_base * 2u32.pow(exponent)
    }
}

/// 요청 한도, 동시 실행 제한, 재시도가 적용된 조회기.
#[derive(Clone)]
pub struct RateLimitedFetcher {
    transport: Arc<dyn HttpTransport>,
    limiter: Arc<RateLimiter>,
    concurrency: Arc<Semaphore>,
    policy: RetryPolicy,
}

impl std::fmt::Debug for RateLimitedFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimitedFetcher")
            .field("limiter", &self.limiter)
            .field("available_permits", &self.concurrency.available_permits())
            .field("policy", &self.policy)
            .finish()
    }
}

impl RateLimitedFetcher {
    /// 조회기를 생성합니다. `max_concurrency`가 0이면 1로 취급합니다.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        limiter: Arc<RateLimiter>,
        max_concurrency: usize,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            limiter,
            concurrency: Arc::new(Semaphore::new(max_concurrency.max(1))),
            policy,
        }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// 공유 중인 요청 한도.
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// 응답 본문을 조회합니다.
    ///
    /// 모든 시도가 실패하면 [`FetchError::RetriesExhausted`]를 반환합니다.
    pub async fn fetch(&self, url: &str, params: &QueryParams) -> Result<String, FetchError> {
        let _permit = self
            .concurrency
            .acquire()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let max_attempts = self.policy.max_attempts;
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            self.limiter.acquire().await;

            match self.transport.get(url, params).await {
                Ok(body) => {
                    if attempt > 1 {
                        debug!(url, attempt, "재시도 성공");
                    }
                    return Ok(body);
                }
                Err(e) => {
                    if attempt < max_attempts {
                        let delay = self.policy.delay_after(attempt);
                        debug!(
                            url,
                            attempt,
                            max_attempts,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "요청 실패, 재시도 예정"
                        );
                        tokio::time::sleep(delay).await;
                    } else {
                        warn!(url, attempts = max_attempts, error = %e, "요청 최종 실패");
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(FetchError::RetriesExhausted {
            url: url.to_string(),
            attempts: max_attempts,
            last_error: last_error.map(|e| e.to_string()).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    /// 처음 `failures`번 실패한 뒤 성공하는 전송 계층.
    struct FlakyTransport {
        failures: u32,
        calls: AtomicU32,
    }

    impl FlakyTransport {
        fn new(failures: u32) -> Arc<Self> {
            Arc::new(Self {
                failures,
                calls: AtomicU32::new(0),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HttpTransport for FlakyTransport {
        async fn get(&self, url: &str, _params: &QueryParams) -> Result<String, FetchError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.failures {
                Err(FetchError::Status {
                    status: 503,
                    url: url.to_string(),
                })
            } else {
                Ok("ok".to_string())
            }
        }
    }

    fn fetcher(transport: Arc<FlakyTransport>, attempts: u32) -> RateLimitedFetcher {
        RateLimitedFetcher::new(
            transport,
            Arc::new(RateLimiter::per_second(100)),
            1,
            RetryPolicy::new(attempts, Duration::from_secs(1)),
        )
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::new(3, Duration::from_millis(500));
        assert_eq!(policy.delay_after(1), Duration::from_millis(500));
        assert_eq!(policy.delay_after(2), Duration::from_millis(1000));
        assert_eq!(policy.delay_after(3), Duration::from_millis(2000));
    }

    #[test]
    fn test_zero_attempts_treated_as_one() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_after_transient_failures() {
        let transport = FlakyTransport::new(2);
        let fetcher = fetcher(transport.clone(), 3);
        let start = Instant::now();

        let body = fetcher.fetch("http://test/a", &[]).await.unwrap();

        assert_eq!(body, "ok");
        assert_eq!(transport.calls(), 3);
        // 1초 + 2초 백오프
        assert!(start.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_after_max_attempts() {
        let transport = FlakyTransport::new(u32::MAX);
        let fetcher = fetcher(transport.clone(), 3);
        let start = Instant::now();

        let err = fetcher.fetch("http://test/b", &[]).await.unwrap_err();

        assert_eq!(transport.calls(), 3);
        match err {
            FetchError::RetriesExhausted { attempts, last_error, .. } => {
                assert_eq!(attempts, 3);
                assert!(last_error.contains("503"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // 마지막 시도 후에는 대기하지 않음
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(3));
        assert!(elapsed < Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_pass_through_rate_limiter() {
        let transport = FlakyTransport::new(u32::MAX);
        let fetcher = RateLimitedFetcher::new(
            transport.clone(),
            Arc::new(RateLimiter::per_second(1)),
            1,
            RetryPolicy::new(4, Duration::ZERO),
        );
        let start = Instant::now();

        let _ = fetcher.fetch("http://test/c", &[]).await;

        // 백오프 없이도 초당 1건 제한으로 3초 이상 소요
        assert_eq!(transport.calls(), 4);
        assert!(start.elapsed() >= Duration::from_secs(3));
    }
}
