// Router Builder - reconciled metadata + live instance -> procedures

use crate::application::markers::merge_bag;
use crate::application::merge::merge_stores;
use crate::application::scope::MetadataScope;
use crate::domain::{
    AnnotationBag, ClassKey, Invocation, MethodCall, ParamMeta, ProcArg, ProcedureKind,
    RpcContext,
};
use crate::error::{RegistryError, RegistryResult, RpcError};
use crate::port::controller::{Controller, HandlerRef};
use crate::port::middleware::{Resolver, ResolverRef};
use crate::port::rpc::{ProcedureBuilder, RouteEntry, RpcRoot};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// One controller's routes plus its namespace hint
pub struct ControllerRouter<R: RpcRoot> {
    pub class: ClassKey,
    /// Explicit namespace from class metadata, when declared
    pub namespace: Option<String>,
    pub router: R::Router,
}

impl<R: RpcRoot> std::fmt::Debug for ControllerRouter<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerRouter")
            .field("class", &self.class)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

/// Build one controller's router from its reconciled metadata and live
/// instance.
///
/// Registration errors (duplicate route name, member that is not callable)
/// are raised here, synchronously, before any request is served.
pub fn build_controller_router<R: RpcRoot>(
    root: &R,
    scope: &MetadataScope,
    instance: Arc<dyn Controller>,
) -> RegistryResult<ControllerRouter<R>> {
    let class = instance.class_key();
    let legacy = scope.legacy_snapshot(class);
    let modern = scope.modern_snapshot(class);
    let store = merge_stores(legacy.as_ref(), modern.as_ref());

    let class_meta = store.class.clone().unwrap_or_default();
    let mut seen_routes: HashSet<String> = HashSet::new();
    let mut entries = Vec::new();

    for (member, method_meta) in &store.methods {
        let route = method_meta
            .route_name
            .clone()
            .unwrap_or_else(|| member.clone());
        if !seen_routes.insert(route.clone()) {
            return Err(RegistryError::DuplicateRoute {
                class: class.class_name().to_string(),
                route,
            });
        }

        let handler = instance
            .method(member)
            .ok_or_else(|| RegistryError::NotCallable {
                class: class.class_name().to_string(),
                method: member.clone(),
            })?;

        let mut builder = root.procedure();

        // Class-level units first, then method-level, declaration order within each
        for unit in class_meta.middlewares.iter().chain(&method_meta.middlewares) {
            builder = builder.use_middleware(unit.clone());
        }

        let annotations = merged_annotations(&class_meta.annotations, &method_meta.annotations);
        if !annotations.is_empty() {
            builder = builder.meta(annotations);
        }

        if let Some(schema) = &method_meta.input {
            builder = builder.input(schema.clone());
        }
        if let Some(schema) = &method_meta.output {
            builder = builder.output(schema.clone());
        }

        let params = store.params.get(member).copied().unwrap_or_default();
        let resolver: ResolverRef = Arc::new(MethodResolver { handler, params });

        let kind = method_meta.kind.unwrap_or_default();
        let procedure = match kind {
            ProcedureKind::Mutation => builder.mutation(resolver),
            ProcedureKind::Subscription => builder.subscription(resolver),
            ProcedureKind::Query => builder.query(resolver),
        };

        debug!(
            class = class.class_name(),
            member = %member,
            route = %route,
            kind = %kind,
            "registered procedure"
        );
        entries.push((route, RouteEntry::Procedure(procedure)));
    }

    let router = root.router(entries);
    info!(class = class.class_name(), "controller router built");
    Ok(ControllerRouter {
        class,
        namespace: class_meta.name,
        router,
    })
}

/// Class entries with method entries overwriting on key collision
fn merged_annotations(class: &AnnotationBag, method: &AnnotationBag) -> AnnotationBag {
    let mut merged = class.clone();
    merge_bag(&mut merged, method);
    merged
}

/// Adapts the runtime's `(context, input)` call to the declared signature
struct MethodResolver {
    handler: HandlerRef,
    params: ParamMeta,
}

#[async_trait]
impl Resolver for MethodResolver {
    async fn resolve(&self, inv: Invocation) -> Result<Value, RpcError> {
        let call = if self.params.is_empty() {
            MethodCall::Native {
                ctx: inv.ctx,
                input: inv.input,
            }
        } else {
            MethodCall::Positional(positional_args(&self.params, inv.ctx, inv.input))
        };
        self.handler.invoke(call).await
    }
}

/// Place context and input at their declared indices; unmarked positions
/// stay unset
fn positional_args(params: &ParamMeta, ctx: RpcContext, input: Value) -> Vec<ProcArg> {
    let len = params
        .ctx_index
        .map(|i| i + 1)
        .unwrap_or(0)
        .max(params.input_index.map(|i| i + 1).unwrap_or(0));
    let mut args = vec![ProcArg::Unset; len];
    if let Some(i) = params.ctx_index {
        args[i] = ProcArg::Context(ctx);
    }
    if let Some(i) = params.input_index {
        args[i] = ProcArg::Input(input);
    }
    args
}
