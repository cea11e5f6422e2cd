// Declarative Markers
//
// Constructors for the marker values applied through the annotation layer.
// Guard and rate-limit constructors live in their own modules and produce
// MiddlewareMarker values.

use crate::application::annotate::{Marker, TargetScope};
use crate::domain::{AnnotationBag, AnnotationStore, ProcedureKind};
use crate::port::middleware::MiddlewareRef;
use crate::port::schema::SchemaRef;
use tracing::debug;

/// Shallow merge: entries from `from` overwrite on key collision
pub(crate) fn merge_bag(into: &mut AnnotationBag, from: &AnnotationBag) {
    for (key, value) in from {
        into.insert(key.clone(), value.clone());
    }
}

fn ignored(marker: &dyn Marker, target: &TargetScope) {
    debug!(
        marker = marker.name(),
        target = target.kind_name(),
        "marker does not support this target; skipping"
    );
}

/// Class-only: assigns or overwrites the route namespace name
pub struct NamespaceMarker {
    name: String,
}

pub fn namespace(name: impl Into<String>) -> NamespaceMarker {
    NamespaceMarker { name: name.into() }
}

impl Marker for NamespaceMarker {
    fn name(&self) -> &'static str {
        "namespace"
    }

    fn annotate(&self, store: &mut AnnotationStore, target: &TargetScope) {
        match target {
            TargetScope::Class => {
                store.ensure_class().name = Some(self.name.clone());
            }
            _ => ignored(self, target),
        }
    }
}

/// Method-only: sets the procedure kind and optional explicit route name
pub struct KindMarker {
    kind: ProcedureKind,
    route: Option<String>,
}

pub fn query() -> KindMarker {
    KindMarker {
        kind: ProcedureKind::Query,
        route: None,
    }
}

pub fn mutation() -> KindMarker {
    KindMarker {
        kind: ProcedureKind::Mutation,
        route: None,
    }
}

pub fn subscription() -> KindMarker {
    KindMarker {
        kind: ProcedureKind::Subscription,
        route: None,
    }
}

impl KindMarker {
    /// Explicit route name (defaults to the member name)
    pub fn route(mut self, name: impl Into<String>) -> Self {
        self.route = Some(name.into());
        self
    }
}

impl Marker for KindMarker {
    fn name(&self) -> &'static str {
        "kind"
    }

    fn annotate(&self, store: &mut AnnotationStore, target: &TargetScope) {
        match target {
            TargetScope::Method { name } => {
                let meta = store.ensure_method(name);
                meta.kind = Some(self.kind);
                if let Some(route) = &self.route {
                    meta.route_name = Some(route.clone());
                }
            }
            _ => ignored(self, target),
        }
    }
}

/// Method-only: attaches the input validator
pub struct InputMarker {
    schema: SchemaRef,
}

pub fn input(schema: SchemaRef) -> InputMarker {
    InputMarker { schema }
}

impl Marker for InputMarker {
    fn name(&self) -> &'static str {
        "input"
    }

    fn annotate(&self, store: &mut AnnotationStore, target: &TargetScope) {
        match target {
            TargetScope::Method { name } => {
                store.ensure_method(name).input = Some(self.schema.clone());
            }
            _ => ignored(self, target),
        }
    }
}

/// Method-only: attaches the output validator
pub struct OutputMarker {
    schema: SchemaRef,
}

pub fn output(schema: SchemaRef) -> OutputMarker {
    OutputMarker { schema }
}

impl Marker for OutputMarker {
    fn name(&self) -> &'static str {
        "output"
    }

    fn annotate(&self, store: &mut AnnotationStore, target: &TargetScope) {
        match target {
            TargetScope::Method { name } => {
                store.ensure_method(name).output = Some(self.schema.clone());
            }
            _ => ignored(self, target),
        }
    }
}

/// Class-or-method: appends middleware units in declaration order
pub struct MiddlewareMarker {
    units: Vec<MiddlewareRef>,
}

pub fn middleware(units: impl IntoIterator<Item = MiddlewareRef>) -> MiddlewareMarker {
    MiddlewareMarker {
        units: units.into_iter().collect(),
    }
}

impl Marker for MiddlewareMarker {
    fn name(&self) -> &'static str {
        "middleware"
    }

    fn annotate(&self, store: &mut AnnotationStore, target: &TargetScope) {
        match target {
            TargetScope::Class => store
                .ensure_class()
                .middlewares
                .extend(self.units.iter().cloned()),
            TargetScope::Method { name } => store
                .ensure_method(name)
                .middlewares
                .extend(self.units.iter().cloned()),
            TargetScope::Parameter { .. } => ignored(self, target),
        }
    }
}

/// Class-or-method: shallow-merges free-form annotation entries
pub struct MetaMarker {
    entries: AnnotationBag,
}

pub fn meta(entries: AnnotationBag) -> MetaMarker {
    MetaMarker { entries }
}

impl Marker for MetaMarker {
    fn name(&self) -> &'static str {
        "meta"
    }

    fn annotate(&self, store: &mut AnnotationStore, target: &TargetScope) {
        match target {
            TargetScope::Class => merge_bag(&mut store.ensure_class().annotations, &self.entries),
            TargetScope::Method { name } => {
                merge_bag(&mut store.ensure_method(name).annotations, &self.entries)
            }
            TargetScope::Parameter { .. } => ignored(self, target),
        }
    }
}

/// Parameter-only: marks the position receiving the request context
pub struct CtxParamMarker;

pub fn ctx_param() -> CtxParamMarker {
    CtxParamMarker
}

impl Marker for CtxParamMarker {
    fn name(&self) -> &'static str {
        "ctx_param"
    }

    fn annotate(&self, store: &mut AnnotationStore, target: &TargetScope) {
        match target {
            TargetScope::Parameter { method, index } => {
                store.ensure_param(method).ctx_index = Some(*index);
                // A method with only parameter markers still registers
                store.ensure_method(method);
            }
            _ => ignored(self, target),
        }
    }
}

/// Parameter-only: marks the position receiving the validated input
pub struct InputParamMarker;

pub fn input_param() -> InputParamMarker {
    InputParamMarker
}

impl Marker for InputParamMarker {
    fn name(&self) -> &'static str {
        "input_param"
    }

    fn annotate(&self, store: &mut AnnotationStore, target: &TargetScope) {
        match target {
            TargetScope::Parameter { method, index } => {
                store.ensure_param(method).input_index = Some(*index);
                store.ensure_method(method);
            }
            _ => ignored(self, target),
        }
    }
}
