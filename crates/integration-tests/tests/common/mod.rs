// Shared fixtures for integration scenarios
#![allow(dead_code)] // each test binary uses its own subset

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicI64, Ordering};
use trellis_core::domain::{ClassKey, Invocation, MethodCall, ProcArg};
use trellis_core::error::RpcError;
use trellis_core::port::controller::{handler, Controller, HandlerRef};
use trellis_core::port::middleware::{Middleware, Next};
use trellis_core::port::time_provider::TimeProvider;

/// Opt-in log capture for scenarios (RUST_LOG-driven); safe to call repeatedly
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Manually advanced clock shared across a test
pub struct FakeClock(AtomicI64);

impl FakeClock {
    pub fn new() -> Self {
        Self(AtomicI64::new(0))
    }

    pub fn advance_secs(&self, secs: i64) {
        self.0.fetch_add(secs * 1000, Ordering::SeqCst);
    }
}

impl TimeProvider for FakeClock {
    fn now_millis(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Middleware appending its label to the context's "seen" entry
pub struct Tag(pub &'static str);

#[async_trait]
impl Middleware for Tag {
    fn name(&self) -> &'static str {
        self.0
    }

    async fn handle(&self, mut inv: Invocation, next: Next<'_>) -> Result<Value, RpcError> {
        let seen = match inv.ctx.get("seen") {
            Some(Value::String(s)) => format!("{},{}", s, self.0),
            _ => self.0.to_string(),
        };
        inv.ctx.insert("seen", json!(seen));
        next.run(inv).await
    }
}

/// JSON description of the call shape a handler received
pub fn describe(call: &MethodCall) -> Value {
    match call {
        MethodCall::Native { input, .. } => json!({"shape": "native", "input": input}),
        MethodCall::Positional(args) => json!({
            "shape": "positional",
            "args": args
                .iter()
                .map(|arg| match arg {
                    ProcArg::Context(ctx) => json!({"ctx": ctx.get("user").cloned()}),
                    ProcArg::Input(value) => json!({"input": value}),
                    ProcArg::Unset => json!("unset"),
                })
                .collect::<Vec<_>>(),
        }),
    }
}

/// Controller with arithmetic members plus shape/trace probes
pub struct MathController;

impl Controller for MathController {
    fn class_key(&self) -> ClassKey {
        ClassKey::of::<Self>()
    }

    fn method(&self, name: &str) -> Option<HandlerRef> {
        match name {
            "add" => Some(handler(|call| async move {
                let input = call.input().cloned().unwrap_or(Value::Null);
                let a = input.get("a").and_then(Value::as_i64).unwrap_or(0);
                let b = input.get("b").and_then(Value::as_i64).unwrap_or(0);
                Ok(json!(a + b))
            })),
            "sub" => Some(handler(|call| async move {
                let input = call.input().cloned().unwrap_or(Value::Null);
                let a = input.get("a").and_then(Value::as_i64).unwrap_or(0);
                let b = input.get("b").and_then(Value::as_i64).unwrap_or(0);
                Ok(json!(a - b))
            })),
            "shape" => Some(handler(|call| async move { Ok(describe(&call)) })),
            "trace" => Some(handler(|call| async move {
                let seen = call
                    .ctx()
                    .and_then(|ctx| ctx.get("seen"))
                    .cloned()
                    .unwrap_or(Value::Null);
                Ok(seen)
            })),
            _ => None,
        }
    }
}

/// Controller guarding account data behind a role check in its tests
pub struct AccountController;

impl Controller for AccountController {
    fn class_key(&self) -> ClassKey {
        ClassKey::of::<Self>()
    }

    fn method(&self, name: &str) -> Option<HandlerRef> {
        match name {
            "profile" => Some(handler(|call| async move {
                let user = call
                    .ctx()
                    .and_then(|ctx| ctx.get("user"))
                    .cloned()
                    .unwrap_or(Value::Null);
                Ok(json!({"user": user}))
            })),
            "update" => Some(handler(|call| async move {
                Ok(call.input().cloned().unwrap_or(Value::Null))
            })),
            _ => None,
        }
    }
}
