// Controller Port - live instance contract

use crate::domain::{ClassKey, MethodCall};
use crate::error::RpcError;
use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;
use std::sync::Arc;

/// Callable member bound to a live controller instance
#[async_trait]
pub trait MethodHandler: Send + Sync {
    async fn invoke(&self, call: MethodCall) -> Result<Value, RpcError>;
}

pub type HandlerRef = Arc<dyn MethodHandler>;

/// A live controller instance exposing its declared members by name.
///
/// `class_key` ties the instance back to the metadata recorded for its
/// type; implement it as `ClassKey::of::<Self>()`. A declared member for
/// which `method` returns `None` is a registration error at build time.
pub trait Controller: Send + Sync + 'static {
    fn class_key(&self) -> ClassKey;

    fn method(&self, name: &str) -> Option<HandlerRef>;
}

/// Wrap an async closure as a method handler
pub fn handler<F, Fut>(f: F) -> HandlerRef
where
    F: Fn(MethodCall) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = Result<Value, RpcError>> + Send + 'static,
{
    Arc::new(FnHandler {
        f: Box::new(move |call| Box::pin(f(call))),
    })
}

struct FnHandler {
    f: Box<dyn Fn(MethodCall) -> BoxFuture<'static, Result<Value, RpcError>> + Send + Sync>,
}

#[async_trait]
impl MethodHandler for FnHandler {
    async fn invoke(&self, call: MethodCall) -> Result<Value, RpcError> {
        (self.f)(call).await
    }
}
