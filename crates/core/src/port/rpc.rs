// RPC Root Port - the consumed procedure-construction contract
//
// The underlying procedure builder and its request pipeline belong to the
// external runtime; this library only drives the builder calls.

use crate::domain::AnnotationBag;
use crate::port::middleware::{MiddlewareRef, ResolverRef};
use crate::port::schema::SchemaRef;

/// Procedure builder contract.
///
/// Calls are applied in the order the router builder emits them:
/// middleware, metadata, input validator, output validator, then exactly
/// one terminal kind call.
pub trait ProcedureBuilder: Sized {
    type Procedure;

    fn use_middleware(self, mw: MiddlewareRef) -> Self;
    fn input(self, schema: SchemaRef) -> Self;
    fn output(self, schema: SchemaRef) -> Self;
    fn meta(self, meta: AnnotationBag) -> Self;

    fn query(self, resolver: ResolverRef) -> Self::Procedure;
    fn mutation(self, resolver: ResolverRef) -> Self::Procedure;
    fn subscription(self, resolver: ResolverRef) -> Self::Procedure;
}

/// One entry in a composed router
pub enum RouteEntry<P, R> {
    Procedure(P),
    Router(R),
}

/// RPC root contract: yields procedure builders and composes routers
pub trait RpcRoot: Send + Sync {
    type Builder: ProcedureBuilder<Procedure = Self::Procedure>;
    type Procedure;
    type Router: Clone;

    fn procedure(&self) -> Self::Builder;

    fn router(
        &self,
        entries: Vec<(String, RouteEntry<Self::Procedure, Self::Router>)>,
    ) -> Self::Router;
}
