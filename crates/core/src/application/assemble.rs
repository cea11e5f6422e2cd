// Aggregate Router Assembly - compose per-class routers into one tree

use crate::application::router::build_controller_router;
use crate::application::scope::MetadataScope;
use crate::error::{RegistryError, RegistryResult};
use crate::port::controller::Controller;
use crate::port::rpc::{RouteEntry, RpcRoot};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::info;

/// Controllers supplied either as an ordered list (namespaces derived from
/// class metadata or the type name) or a named map (caller keys are the
/// namespaces verbatim; map keys are already unique, so no collision check)
pub enum ControllerSet {
    List(Vec<Arc<dyn Controller>>),
    Map(Vec<(String, Arc<dyn Controller>)>),
}

impl From<Vec<Arc<dyn Controller>>> for ControllerSet {
    fn from(list: Vec<Arc<dyn Controller>>) -> Self {
        ControllerSet::List(list)
    }
}

impl From<Vec<(String, Arc<dyn Controller>)>> for ControllerSet {
    fn from(named: Vec<(String, Arc<dyn Controller>)>) -> Self {
        ControllerSet::Map(named)
    }
}

/// The composed router plus each per-namespace router
pub struct AppRouter<R: RpcRoot> {
    pub router: R::Router,
    pub namespaces: HashMap<String, R::Router>,
}

impl<R: RpcRoot> std::fmt::Debug for AppRouter<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppRouter")
            .field("namespaces", &self.namespaces.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Build every controller's router and compose the namespaced tree
pub fn assemble_routers<R: RpcRoot>(
    root: &R,
    scope: &MetadataScope,
    controllers: ControllerSet,
) -> RegistryResult<AppRouter<R>> {
    let mut named = Vec::new();
    match controllers {
        ControllerSet::List(list) => {
            let mut seen: HashSet<String> = HashSet::new();
            for instance in list {
                let built = build_controller_router(root, scope, instance)?;
                let namespace = built
                    .namespace
                    .clone()
                    .unwrap_or_else(|| built.class.default_namespace());
                if !seen.insert(namespace.clone()) {
                    return Err(RegistryError::DuplicateNamespace(namespace));
                }
                named.push((namespace, built.router));
            }
        }
        ControllerSet::Map(pairs) => {
            for (namespace, instance) in pairs {
                let built = build_controller_router(root, scope, instance)?;
                named.push((namespace, built.router));
            }
        }
    }

    let mut namespaces = HashMap::new();
    let mut entries = Vec::new();
    for (namespace, router) in named {
        namespaces.insert(namespace.clone(), router.clone());
        entries.push((namespace, RouteEntry::Router(router)));
    }

    let router = root.router(entries);
    info!(namespaces = namespaces.len(), "aggregate router assembled");
    Ok(AppRouter { router, namespaces })
}
