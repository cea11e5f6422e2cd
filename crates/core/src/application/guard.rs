// Guard Middleware Factory - authorization predicate as a middleware unit

use crate::application::markers::{middleware, MiddlewareMarker};
use crate::domain::{Invocation, RpcContext};
use crate::error::RpcError;
use crate::port::middleware::{Middleware, MiddlewareRef, Next};
use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Outcome of an authorization predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Proceed with the request
    Allow,
    /// Reject; surfaced as UNAUTHORIZED
    Deny,
    /// Reject with the UNAUTHORIZED classification
    Unauthorized,
    /// Reject with the FORBIDDEN classification
    Forbidden,
}

type Predicate = Arc<dyn Fn(RpcContext, Value) -> BoxFuture<'static, GuardDecision> + Send + Sync>;

/// Middleware that short-circuits on a failed authorization predicate
pub struct GuardMiddleware {
    predicate: Predicate,
}

#[async_trait]
impl Middleware for GuardMiddleware {
    fn name(&self) -> &'static str {
        "guard"
    }

    async fn handle(&self, inv: Invocation, next: Next<'_>) -> Result<Value, RpcError> {
        let decision = (self.predicate)(inv.ctx.clone(), inv.input.clone()).await;
        match decision {
            GuardDecision::Allow => next.run(inv).await,
            GuardDecision::Forbidden => {
                debug!(path = %inv.path, "guard rejected request as forbidden");
                Err(RpcError::Forbidden("guard rejected the request".to_string()))
            }
            GuardDecision::Unauthorized | GuardDecision::Deny => {
                debug!(path = %inv.path, "guard rejected request as unauthorized");
                Err(RpcError::Unauthorized(
                    "guard rejected the request".to_string(),
                ))
            }
        }
    }
}

/// Wrap an async authorization predicate into a middleware marker
pub fn guard<F, Fut>(predicate: F) -> MiddlewareMarker
where
    F: Fn(RpcContext, Value) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = GuardDecision> + Send + 'static,
{
    let predicate: Predicate = Arc::new(move |ctx, input| Box::pin(predicate(ctx, input)));
    middleware([Arc::new(GuardMiddleware { predicate }) as MiddlewareRef])
}
