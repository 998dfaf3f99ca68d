//! 프로세스 전역 요청 한도.
//!
//! 고정 1초 윈도우 방식입니다. 윈도우 안에서 `R`건을 넘는 요청은 다음 윈도우가
//! 열릴 때까지 대기합니다. 모든 요청 경로가 같은 [`RateLimiter`]를 `Arc`로
//! 공유하므로, 동시 실행 중에도 한도가 프로세스 전체에 적용됩니다.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::trace;

/// 윈도우 상태.
#[derive(Debug, Default)]
struct Window {
    /// 현재 윈도우 시작 시각 (첫 요청 전에는 없음)
    started: Option<Instant>,
    /// 현재 윈도우에서 허용된 요청 수
    admitted: u32,
}

/// 고정 윈도우 요청 한도.
#[derive(Debug)]
pub struct RateLimiter {
    max_per_window: u32,
    window: Duration,
    state: Mutex<Window>,
}

impl RateLimiter {
    /// 초당 `requests_per_second`건으로 제한합니다 (0은 1로 취급).
    pub fn per_second(requests_per_second: u32) -> Self {
        Self::with_window(requests_per_second, Duration::from_secs(1))
    }

    /// 임의의 윈도우 길이로 생성합니다.
    pub fn with_window(max_per_window: u32, window: Duration) -> Self {
        Self {
            max_per_window: max_per_window.max(1),
            window,
            state: Mutex::new(Window::default()),
        }
    }

    /// 윈도우당 허용 요청 수.
    pub fn max_per_window(&self) -> u32 {
        self.max_per_window
    }

    /// 요청 슬롯을 얻을 때까지 대기합니다.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut state = self.state.lock().await;
                let now = Instant::now();

                match state.started {
                    Some(started) if now.duration_since(started) < self.window => {
                        if state.admitted < self.max_per_window {
                            state.admitted += 1;
                            return;
                        }
                        (started + self.window).saturating_duration_since(now)
                    }
                    _ => {
                        state.started = Some(now);
                        state.admitted = 1;
                        return;
                    }
                }
            };

            trace!(wait_ms = wait.as_millis() as u64, "요청 한도 도달, 다음 윈도우 대기");
            sleep(wait).await;
        }
    }
}
