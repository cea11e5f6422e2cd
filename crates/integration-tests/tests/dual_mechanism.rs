//! Dual-Mechanism Scenarios
//!
//! A class may be annotated through the legacy mechanism, the modern
//! mechanism, or both; routers built from the reconciled view must not
//! depend on which mechanism recorded a declaration.

mod common;

use common::{MathController, Tag};
use serde_json::{json, Value};
use std::sync::Arc;
use trellis_core::application::annotate::Mechanism;
use trellis_core::application::factory::RpcFactory;
use trellis_core::application::markers::{meta, middleware, mutation, query};
use trellis_core::domain::{AnnotationBag, ProcedureKind, RpcContext};
use trellis_infra_memory::MemoryRpcRoot;

fn bag(entries: &[(&str, Value)]) -> AnnotationBag {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[tokio::test]
async fn test_single_mechanism_reads_back_as_declared() {
    common::init_test_logging();
    for mechanism in [Mechanism::Legacy, Mechanism::Modern] {
        let factory = RpcFactory::new(Arc::new(MemoryRpcRoot::new()));
        factory
            .declare::<MathController>(mechanism)
            .method("add", &mutation())
            .method("sub", &query());

        let built = factory.router_for(Arc::new(MathController)).unwrap();
        assert_eq!(built.router.route_names(), vec!["add", "sub"]);
        assert_eq!(
            built.router.procedure("add").unwrap().kind(),
            ProcedureKind::Mutation
        );
        assert_eq!(
            built.router.procedure("sub").unwrap().kind(),
            ProcedureKind::Query
        );
    }
}

#[tokio::test]
async fn test_disjoint_methods_union_across_mechanisms() {
    let factory = RpcFactory::new(Arc::new(MemoryRpcRoot::new()));
    factory
        .declare::<MathController>(Mechanism::Legacy)
        .method("add", &query());
    factory
        .declare::<MathController>(Mechanism::Modern)
        .method("sub", &mutation());

    let built = factory.router_for(Arc::new(MathController)).unwrap();
    assert_eq!(built.router.route_names(), vec!["add", "sub"]);

    let out = built
        .router
        .call("add", RpcContext::new(), json!({"a": 2, "b": 3}))
        .await
        .unwrap();
    assert_eq!(out, json!(5));
}

#[tokio::test]
async fn test_conflicting_kind_modern_wins() {
    let factory = RpcFactory::new(Arc::new(MemoryRpcRoot::new()));
    factory
        .declare::<MathController>(Mechanism::Legacy)
        .method("add", &query());
    factory
        .declare::<MathController>(Mechanism::Modern)
        .method("add", &mutation());

    let built = factory.router_for(Arc::new(MathController)).unwrap();
    assert_eq!(
        built.router.procedure("add").unwrap().kind(),
        ProcedureKind::Mutation
    );
}

#[tokio::test]
async fn test_middleware_concatenates_legacy_before_modern() {
    let factory = RpcFactory::new(Arc::new(MemoryRpcRoot::new()));
    factory
        .declare::<MathController>(Mechanism::Legacy)
        .method("trace", &query())
        .method("trace", &middleware([Arc::new(Tag("legacy")) as _]));
    factory
        .declare::<MathController>(Mechanism::Modern)
        .method("trace", &middleware([Arc::new(Tag("modern")) as _]));

    let built = factory.router_for(Arc::new(MathController)).unwrap();
    let out = built
        .router
        .call("trace", RpcContext::new(), Value::Null)
        .await
        .unwrap();
    assert_eq!(out, json!("legacy,modern"));
}

#[tokio::test]
async fn test_annotation_bags_shallow_merge_modern_wins() {
    let factory = RpcFactory::new(Arc::new(MemoryRpcRoot::new()));
    factory
        .declare::<MathController>(Mechanism::Legacy)
        .method("add", &query())
        .method("add", &meta(bag(&[("tier", json!("legacy")), ("audit", json!(true))])));
    factory
        .declare::<MathController>(Mechanism::Modern)
        .method("add", &meta(bag(&[("tier", json!("modern"))])));

    let built = factory.router_for(Arc::new(MathController)).unwrap();
    let procedure = built.router.procedure("add").unwrap();
    assert_eq!(procedure.meta().get("tier"), Some(&json!("modern")));
    assert_eq!(procedure.meta().get("audit"), Some(&json!(true)));
}
