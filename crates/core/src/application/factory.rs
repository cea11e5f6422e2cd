// Root-Bound Factory - programmatic surface scoped to one RPC root

use crate::application::annotate::{ClassDecl, Mechanism};
use crate::application::assemble::{assemble_routers, AppRouter, ControllerSet};
use crate::application::router::{build_controller_router, ControllerRouter};
use crate::application::scope::MetadataScope;
use crate::error::RegistryResult;
use crate::port::controller::Controller;
use crate::port::rpc::RpcRoot;
use std::sync::Arc;

/// Factory bound to one RPC root.
///
/// Each factory owns a private metadata scope, so declarations made under
/// one root are invisible to routers built from another.
pub struct RpcFactory<R: RpcRoot> {
    root: Arc<R>,
    scope: Arc<MetadataScope>,
}

impl<R: RpcRoot> RpcFactory<R> {
    pub fn new(root: Arc<R>) -> Self {
        Self {
            root,
            scope: Arc::new(MetadataScope::new()),
        }
    }

    pub fn root(&self) -> &Arc<R> {
        &self.root
    }

    pub fn scope(&self) -> &MetadataScope {
        &self.scope
    }

    /// Start annotating `C` through the given mechanism
    pub fn declare<C: Controller>(&self, mechanism: Mechanism) -> ClassDecl<'_, C> {
        ClassDecl::new(&self.scope, mechanism)
    }

    /// Convert one annotated controller into a router
    pub fn router_for(
        &self,
        instance: Arc<dyn Controller>,
    ) -> RegistryResult<ControllerRouter<R>> {
        build_controller_router(self.root.as_ref(), &self.scope, instance)
    }

    /// Compose controllers into the aggregate namespaced router
    pub fn assemble(
        &self,
        controllers: impl Into<ControllerSet>,
    ) -> RegistryResult<AppRouter<R>> {
        assemble_routers(self.root.as_ref(), &self.scope, controllers.into())
    }
}
