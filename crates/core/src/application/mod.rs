// Application Layer - annotation, reconciliation, and router construction

pub mod annotate;
pub mod assemble;
pub mod factory;
pub mod guard;
pub mod markers;
pub mod merge;
pub mod rate_limit;
pub mod router;
pub mod scope;

// Re-exports
pub use annotate::{apply, ApplySite, ClassDecl, DeclContext, DeclKind, Marker, Mechanism};
pub use assemble::{assemble_routers, AppRouter, ControllerSet};
pub use factory::RpcFactory;
pub use guard::{guard, GuardDecision};
pub use markers::{
    ctx_param, input, input_param, meta, middleware, mutation, namespace, output, query,
    subscription,
};
pub use merge::merge_stores;
pub use rate_limit::{rate_limit, rate_limit_with, CounterStore, RateLimitOptions};
pub use router::{build_controller_router, ControllerRouter};
pub use scope::MetadataScope;
