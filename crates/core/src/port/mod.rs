// Port Layer - Interfaces for external collaborators

pub mod controller;
pub mod middleware;
pub mod rpc;
pub mod schema;
pub mod time_provider; // For deterministic rate-limit tests

// Re-exports
pub use controller::{handler, Controller, HandlerRef, MethodHandler};
pub use middleware::{Middleware, MiddlewareRef, Next, Resolver, ResolverRef};
pub use rpc::{ProcedureBuilder, RouteEntry, RpcRoot};
pub use schema::{SchemaError, SchemaRef, SchemaValidator};
pub use time_provider::{SystemTimeProvider, TimeProvider};
