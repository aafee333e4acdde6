use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use tracing::info;

use crate::errors::CoreError;

/// Fixed-window call counter guarding outbound quote requests.
///
/// At most `max_calls` permits are granted per window. Once the ceiling
/// is hit, every request fails until the window elapses; bursts are
/// blocked wholesale, not smoothed. Windows follow a fixed schedule of
/// back-to-back intervals; the counter is cleared lazily on the first
/// request in a new interval.
///
/// Uses tokio's clock, so tests can drive it with a paused runtime.
#[derive(Debug)]
pub struct RateLimiter {
    max_calls: u32,
    window: Duration,
    state: Mutex<WindowState>,
}

#[derive(Debug)]
struct WindowState {
    started_at: Instant,
    calls: u32,
}

impl RateLimiter {
    pub fn new(max_calls: u32, window: Duration) -> Self {
        Self {
            max_calls,
            window,
            state: Mutex::new(WindowState {
                started_at: Instant::now(),
                calls: 0,
            }),
        }
    }

    /// Take one permit from the current window.
    ///
    /// Check and increment happen under one lock, so concurrent callers
    /// can never exceed the ceiling.
    pub fn try_acquire(&self) -> Result<(), CoreError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        self.roll_window(&mut state);

        if state.calls >= self.max_calls {
            return Err(CoreError::RateLimited {
                max_calls: self.max_calls,
                window_secs: self.window.as_secs(),
            });
        }
        state.calls += 1;
        Ok(())
    }

    /// Permits left in the current window.
    pub fn remaining(&self) -> u32 {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        self.roll_window(&mut state);
        self.max_calls.saturating_sub(state.calls)
    }

    /// Start a fresh window immediately.
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.started_at = Instant::now();
        state.calls = 0;
    }

    pub fn max_calls(&self) -> u32 {
        self.max_calls
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Windows stay on a fixed grid anchored at construction (or the last
    /// `reset`), so an idle gap never shifts later reset points.
    fn roll_window(&self, state: &mut WindowState) {
        let now = Instant::now();
        let elapsed = now.duration_since(state.started_at);
        if elapsed < self.window {
            return;
        }

        if state.calls > 0 {
            info!(calls = state.calls, "rate-limit window reset");
        }
        state.started_at = if self.window.is_zero() {
            now
        } else {
            let into_window = elapsed.as_nanos() % self.window.as_nanos();
            now - Duration::from_nanos(u64::try_from(into_window).unwrap_or(0))
        };
        state.calls = 0;
    }
}
