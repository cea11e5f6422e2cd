// Nested in-memory router with dotted-path lookup

use crate::procedure::MemoryProcedure;
use serde_json::Value;
use std::collections::BTreeMap;
use trellis_core::domain::RpcContext;
use trellis_core::error::RpcError;
use trellis_core::port::rpc::RouteEntry;

#[derive(Clone)]
pub enum MemoryEntry {
    Procedure(MemoryProcedure),
    Router(MemoryRouter),
}

/// Router keyed by route name; nests for namespaced trees
#[derive(Clone, Default)]
pub struct MemoryRouter {
    entries: BTreeMap<String, MemoryEntry>,
}

impl MemoryRouter {
    pub fn from_entries(entries: Vec<(String, RouteEntry<MemoryProcedure, MemoryRouter>)>) -> Self {
        let mut map = BTreeMap::new();
        for (name, entry) in entries {
            let entry = match entry {
                RouteEntry::Procedure(procedure) => MemoryEntry::Procedure(procedure),
                RouteEntry::Router(router) => MemoryEntry::Router(router),
            };
            map.insert(name, entry);
        }
        Self { entries: map }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Route names at this level, sorted
    pub fn route_names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Look up a procedure by dotted path (e.g. "math.add")
    pub fn procedure(&self, path: &str) -> Option<&MemoryProcedure> {
        match path.split_once('.') {
            Some((head, rest)) => match self.entries.get(head)? {
                MemoryEntry::Router(router) => router.procedure(rest),
                MemoryEntry::Procedure(_) => None,
            },
            None => match self.entries.get(path)? {
                MemoryEntry::Procedure(procedure) => Some(procedure),
                MemoryEntry::Router(_) => None,
            },
        }
    }

    /// Invoke the procedure at `path`
    pub async fn call(&self, path: &str, ctx: RpcContext, input: Value) -> Result<Value, RpcError> {
        let procedure = self
            .procedure(path)
            .ok_or_else(|| RpcError::NotFound(format!("no procedure at path '{}'", path)))?;
        procedure.call(path, ctx, input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedure::MemoryProcedureBuilder;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;
    use trellis_core::domain::Invocation;
    use trellis_core::port::middleware::Resolver;
    use trellis_core::port::rpc::ProcedureBuilder;

    struct EchoPath;

    #[async_trait]
    impl Resolver for EchoPath {
        async fn resolve(&self, inv: Invocation) -> Result<Value, RpcError> {
            Ok(json!(inv.path))
        }
    }

    fn leaf() -> MemoryProcedure {
        MemoryProcedureBuilder::default().query(Arc::new(EchoPath))
    }

    #[tokio::test]
    async fn test_nested_lookup_and_call() {
        let math = MemoryRouter::from_entries(vec![
            ("add".to_string(), RouteEntry::Procedure(leaf())),
            ("sub".to_string(), RouteEntry::Procedure(leaf())),
        ]);
        let app = MemoryRouter::from_entries(vec![(
            "math".to_string(),
            RouteEntry::Router(math),
        )]);

        assert!(app.procedure("math.add").is_some());
        assert!(app.procedure("math.missing").is_none());
        assert!(app.procedure("math").is_none());

        let out = app
            .call("math.add", RpcContext::new(), Value::Null)
            .await
            .unwrap();
        assert_eq!(out, json!("math.add"));

        let err = app
            .call("other.add", RpcContext::new(), Value::Null)
            .await
            .unwrap_err();
        assert_eq!(err.code_str(), "NOT_FOUND");
    }

    #[test]
    fn test_route_names_are_sorted() {
        let router = MemoryRouter::from_entries(vec![
            ("b".to_string(), RouteEntry::Procedure(leaf())),
            ("a".to_string(), RouteEntry::Procedure(leaf())),
        ]);
        assert_eq!(router.route_names(), vec!["a", "b"]);
    }
}
