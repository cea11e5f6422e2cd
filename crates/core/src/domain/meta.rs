// Declaration Metadata Records
//
// One AnnotationStore per class per physical location (legacy or modern);
// the merge engine folds the pair into one logical view.

use crate::domain::ProcedureKind;
use crate::port::middleware::MiddlewareRef;
use crate::port::schema::SchemaRef;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Free-form annotation entries attached to a class or method
pub type AnnotationBag = Map<String, Value>;

/// Class-level metadata
#[derive(Clone, Default)]
pub struct ClassMeta {
    /// Route namespace; falls back to the lower-camel-cased class name
    pub name: Option<String>,
    /// Class-level middleware units, in declaration order
    pub middlewares: Vec<MiddlewareRef>,
    pub annotations: AnnotationBag,
}

/// Method-level metadata
#[derive(Clone, Default)]
pub struct MethodMeta {
    /// Unset defaults to a read procedure at build time
    pub kind: Option<ProcedureKind>,
    /// Explicit route name; falls back to the member name
    pub route_name: Option<String>,
    pub input: Option<SchemaRef>,
    pub output: Option<SchemaRef>,
    /// Method-level middleware units, in declaration order
    pub middlewares: Vec<MiddlewareRef>,
    pub annotations: AnnotationBag,
}

/// Parameter-position metadata.
///
/// At most one context index and one input index per method; the indices
/// are independent and either may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamMeta {
    pub ctx_index: Option<usize>,
    pub input_index: Option<usize>,
}

impl ParamMeta {
    pub fn is_empty(&self) -> bool {
        self.ctx_index.is_none() && self.input_index.is_none()
    }
}

/// Per-class metadata container for one physical location
#[derive(Clone, Default)]
pub struct AnnotationStore {
    pub class: Option<ClassMeta>,
    /// Keyed by declared member name, never renamed
    pub methods: BTreeMap<String, MethodMeta>,
    pub params: BTreeMap<String, ParamMeta>,
}

impl AnnotationStore {
    /// Existing class record, or a fresh empty one. Never overwrites.
    pub fn ensure_class(&mut self) -> &mut ClassMeta {
        self.class.get_or_insert_with(ClassMeta::default)
    }

    /// Existing method record for `name`, or a fresh empty one
    pub fn ensure_method(&mut self, name: &str) -> &mut MethodMeta {
        self.methods.entry(name.to_string()).or_default()
    }

    /// Existing parameter record for method `name`, or a fresh empty one
    pub fn ensure_param(&mut self, name: &str) -> &mut ParamMeta {
        self.params.entry(name.to_string()).or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.class.is_none() && self.methods.is_empty() && self.params.is_empty()
    }
}

impl std::fmt::Debug for ClassMeta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassMeta")
            .field("name", &self.name)
            .field("middlewares", &self.middlewares.len())
            .field("annotations", &self.annotations)
            .finish()
    }
}

impl std::fmt::Debug for MethodMeta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodMeta")
            .field("kind", &self.kind)
            .field("route_name", &self.route_name)
            .field("input", &self.input.is_some())
            .field("output", &self.output.is_some())
            .field("middlewares", &self.middlewares.len())
            .field("annotations", &self.annotations)
            .finish()
    }
}

impl std::fmt::Debug for AnnotationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationStore")
            .field("class", &self.class)
            .field("methods", &self.methods)
            .field("params", &self.params)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ensure_class_is_lazy_and_stable() {
        let mut store = AnnotationStore::default();
        assert!(store.class.is_none());

        store.ensure_class().name = Some("math".to_string());
        // Second access must not reset prior data
        store.ensure_class().annotations.insert("a".to_string(), json!(1));

        let class = store.class.as_ref().unwrap();
        assert_eq!(class.name.as_deref(), Some("math"));
        assert_eq!(class.annotations.get("a"), Some(&json!(1)));
    }

    #[test]
    fn test_ensure_method_keyed_by_member_name() {
        let mut store = AnnotationStore::default();
        store.ensure_method("add").kind = Some(ProcedureKind::Mutation);
        store.ensure_method("add").route_name = Some("sum".to_string());

        assert_eq!(store.methods.len(), 1);
        let meta = &store.methods["add"];
        assert_eq!(meta.kind, Some(ProcedureKind::Mutation));
        assert_eq!(meta.route_name.as_deref(), Some("sum"));
    }

    #[test]
    fn test_ensure_param_indices_are_independent() {
        let mut store = AnnotationStore::default();
        store.ensure_param("add").ctx_index = Some(0);
        store.ensure_param("add").input_index = Some(1);

        assert_eq!(
            store.params["add"],
            ParamMeta {
                ctx_index: Some(0),
                input_index: Some(1)
            }
        );
    }
}
