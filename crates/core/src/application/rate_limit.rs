// Rate-Limit Middleware Factory (fixed window)
//
// Coarse abuse prevention, not precise quota enforcement: windows do not
// slide, so up to `points` extra requests can land around a window
// boundary.

use crate::application::markers::{middleware, MiddlewareMarker};
use crate::domain::{Invocation, RpcContext};
use crate::error::RpcError;
use crate::port::middleware::{Middleware, MiddlewareRef, Next};
use crate::port::time_provider::{SystemTimeProvider, TimeProvider};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

const DEFAULT_POINTS: u32 = 100;
const DEFAULT_WINDOW_SECS: u64 = 60;
/// Windows shorter than this are widened
const MIN_WINDOW_SECS: u64 = 1;

/// Maps a request to a limiter key (e.g. a user id). `None` falls back to
/// the shared "global" bucket.
pub type KeyFn = Arc<dyn Fn(&RpcContext, &Value) -> Option<String> + Send + Sync>;

/// Fixed-window limiter settings
#[derive(Clone)]
pub struct RateLimitOptions {
    /// Admitted requests per window
    pub points: u32,
    /// Window length in seconds (clamped to >= 1)
    pub window_secs: u64,
    pub key_fn: Option<KeyFn>,
}

impl RateLimitOptions {
    pub fn new(points: u32, window_secs: u64) -> Self {
        Self {
            points,
            window_secs,
            key_fn: None,
        }
    }

    /// Derive the limiter key per request instead of sharing one bucket
    pub fn key_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&RpcContext, &Value) -> Option<String> + Send + Sync + 'static,
    {
        self.key_fn = Some(Arc::new(f));
        self
    }

    /// Defaults, overridable via TRELLIS_RATE_LIMIT_POINTS and
    /// TRELLIS_RATE_LIMIT_WINDOW_SECS
    pub fn from_env() -> Self {
        let points = std::env::var("TRELLIS_RATE_LIMIT_POINTS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_POINTS);
        let window_secs = std::env::var("TRELLIS_RATE_LIMIT_WINDOW_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_WINDOW_SECS);
        Self::new(points, window_secs)
    }
}

/// One fixed-window counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowEntry {
    pub count: u32,
    pub reset_at_ms: i64,
}

/// Shared counter storage, keyed by `"{route path}:{limiter key}"`.
///
/// Entries are never evicted; a dormant key's window is reset on its next
/// request. Injected into the middleware so tests can pair an isolated
/// store with a fake clock.
#[derive(Default)]
pub struct CounterStore {
    entries: Mutex<HashMap<String, WindowEntry>>,
}

impl CounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current entry for a window key (monitoring and tests)
    pub fn entry(&self, window_key: &str) -> Option<WindowEntry> {
        self.entries.lock().unwrap().get(window_key).copied()
    }

    /// Admit or reject one request against the window for `window_key`
    fn check(&self, window_key: &str, points: u32, window_ms: i64, now_ms: i64) -> bool {
        let mut entries = self.entries.lock().unwrap();
        match entries.get_mut(window_key) {
            Some(entry) if now_ms < entry.reset_at_ms => {
                entry.count += 1;
                entry.count <= points
            }
            _ => {
                // No window yet, or the previous one elapsed
                entries.insert(
                    window_key.to_string(),
                    WindowEntry {
                        count: 1,
                        reset_at_ms: now_ms + window_ms,
                    },
                );
                debug!(window_key = %window_key, "rate-limit window reset");
                true
            }
        }
    }
}

/// Fixed-window rate limiter middleware
pub struct RateLimitMiddleware {
    points: u32,
    window_ms: i64,
    key_fn: Option<KeyFn>,
    store: Arc<CounterStore>,
    clock: Arc<dyn TimeProvider>,
}

#[async_trait]
impl Middleware for RateLimitMiddleware {
    fn name(&self) -> &'static str {
        "rate_limit"
    }

    async fn handle(&self, inv: Invocation, next: Next<'_>) -> Result<Value, RpcError> {
        let key = self
            .key_fn
            .as_ref()
            .and_then(|f| f(&inv.ctx, &inv.input))
            .unwrap_or_else(|| "global".to_string());
        let window_key = format!("{}:{}", inv.path, key);
        let now_ms = self.clock.now_millis();

        if !self
            .store
            .check(&window_key, self.points, self.window_ms, now_ms)
        {
            warn!(
                window_key = %window_key,
                points = self.points,
                "rate limit exceeded"
            );
            return Err(RpcError::TooManyRequests(format!(
                "rate limit of {} requests per window exceeded",
                self.points
            )));
        }

        next.run(inv).await
    }
}

/// Fixed-window limiter with a private counter store and the system clock
pub fn rate_limit(options: RateLimitOptions) -> MiddlewareMarker {
    rate_limit_with(options, Arc::new(CounterStore::new()), Arc::new(SystemTimeProvider))
}

/// Fixed-window limiter over an injected counter store and clock
pub fn rate_limit_with(
    options: RateLimitOptions,
    store: Arc<CounterStore>,
    clock: Arc<dyn TimeProvider>,
) -> MiddlewareMarker {
    let window_secs = options.window_secs.max(MIN_WINDOW_SECS);
    let unit = RateLimitMiddleware {
        points: options.points,
        window_ms: (window_secs * 1000) as i64,
        key_fn: options.key_fn,
        store,
        clock,
    };
    middleware([Arc::new(unit) as MiddlewareRef])
}
