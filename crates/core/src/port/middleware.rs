// Middleware Port - request interception contract
//
// Units are composed by the router builder and executed by the external
// runtime. A unit must explicitly continue the chain via `Next::run`;
// returning without doing so short-circuits the request.

use crate::domain::Invocation;
use crate::error::RpcError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Composable request-interception unit
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Label used in traces and diagnostics
    fn name(&self) -> &'static str {
        "middleware"
    }

    async fn handle(&self, inv: Invocation, next: Next<'_>) -> Result<Value, RpcError>;
}

pub type MiddlewareRef = Arc<dyn Middleware>;

/// Terminal of a middleware chain
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, inv: Invocation) -> Result<Value, RpcError>;
}

pub type ResolverRef = Arc<dyn Resolver>;

/// Remaining middleware chain plus the terminal resolver
pub struct Next<'a> {
    chain: &'a [MiddlewareRef],
    resolver: &'a ResolverRef,
}

impl<'a> Next<'a> {
    pub fn new(chain: &'a [MiddlewareRef], resolver: &'a ResolverRef) -> Self {
        Self { chain, resolver }
    }

    /// Continue with the next unit, or resolve when the chain is exhausted
    pub async fn run(self, inv: Invocation) -> Result<Value, RpcError> {
        match self.chain.split_first() {
            Some((head, rest)) => {
                head.handle(
                    inv,
                    Next {
                        chain: rest,
                        resolver: self.resolver,
                    },
                )
                .await
            }
            None => self.resolver.resolve(inv).await,
        }
    }
}
