// Annotation Layer - tagged application sites and classification
//
// A marker application arrives through one of two mechanisms with
// different call shapes. Classification happens exactly once per
// application; markers never sniff argument shapes themselves.

use crate::application::scope::{with_bag_store, MetadataScope, SharedBag};
use crate::domain::{AnnotationStore, ClassKey};
use std::marker::PhantomData;
use tracing::debug;

/// Which annotation mechanism records a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mechanism {
    Legacy,
    Modern,
}

/// Declaration kind reported by the modern mechanism's context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Class,
    Method,
    Parameter,
}

/// Per-declaration context surfaced by the modern mechanism.
///
/// Carries the declaration kind and name plus the class's shared metadata
/// bag, through which the store is resolved.
#[derive(Clone)]
pub struct DeclContext {
    pub kind: DeclKind,
    pub name: Option<String>,
    pub index: Option<usize>,
    pub metadata: SharedBag,
}

/// One marker application site
pub enum ApplySite {
    /// Modern mechanism: a kind-bearing declaration context
    Modern { class: ClassKey, context: DeclContext },
    /// Legacy mechanism: class target plus optional member name / index
    Legacy {
        class: ClassKey,
        member: Option<String>,
        index: Option<usize>,
    },
}

impl ApplySite {
    fn class_name(&self) -> &'static str {
        match self {
            ApplySite::Modern { class, .. } | ApplySite::Legacy { class, .. } => {
                class.class_name()
            }
        }
    }
}

/// Where a classified marker application lands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetScope {
    Class,
    Method { name: String },
    Parameter { method: String, index: usize },
}

impl TargetScope {
    /// Label for traces
    pub fn kind_name(&self) -> &'static str {
        match self {
            TargetScope::Class => "class",
            TargetScope::Method { .. } => "method",
            TargetScope::Parameter { .. } => "parameter",
        }
    }
}

/// A declarative marker: mutates the resolved store entry for its target.
///
/// Markers ignore target kinds they do not support; misapplication is a
/// silent no-op, never an error.
pub trait Marker {
    /// Label used in traces
    fn name(&self) -> &'static str;

    fn annotate(&self, store: &mut AnnotationStore, target: &TargetScope);
}

/// Classify a site into a target scope, or `None` when no target resolves
fn classify(site: &ApplySite) -> Option<TargetScope> {
    match site {
        ApplySite::Modern { context, .. } => match context.kind {
            DeclKind::Class => Some(TargetScope::Class),
            DeclKind::Method => context
                .name
                .clone()
                .map(|name| TargetScope::Method { name }),
            DeclKind::Parameter => match (context.name.clone(), context.index) {
                (Some(method), Some(index)) => Some(TargetScope::Parameter { method, index }),
                _ => None,
            },
        },
        ApplySite::Legacy { member, index, .. } => match (member, index) {
            (None, None) => Some(TargetScope::Class),
            (Some(name), None) => Some(TargetScope::Method { name: name.clone() }),
            (Some(name), Some(index)) => Some(TargetScope::Parameter {
                method: name.clone(),
                index: *index,
            }),
            // An index without a member name resolves nothing
            (None, Some(_)) => None,
        },
    }
}

/// Apply `marker` at `site` within `scope`.
///
/// An unresolvable target performs no mutation and raises nothing.
pub fn apply(scope: &MetadataScope, marker: &dyn Marker, site: &ApplySite) {
    let Some(target) = classify(site) else {
        debug!(
            marker = marker.name(),
            class = site.class_name(),
            "marker target unresolved; skipping"
        );
        return;
    };

    match site {
        ApplySite::Legacy { class, .. } => {
            scope.with_legacy_store(*class, |store| marker.annotate(store, &target));
        }
        ApplySite::Modern { context, .. } => {
            with_bag_store(&context.metadata, |store| marker.annotate(store, &target));
        }
    }
}

/// Drives marker application for one class through one mechanism, standing
/// in for the runtime's annotation machinery.
pub struct ClassDecl<'s, C: 'static> {
    scope: &'s MetadataScope,
    mechanism: Mechanism,
    class: ClassKey,
    _controller: PhantomData<fn() -> C>,
}

impl<'s, C: 'static> ClassDecl<'s, C> {
    pub fn new(scope: &'s MetadataScope, mechanism: Mechanism) -> Self {
        Self {
            scope,
            mechanism,
            class: ClassKey::of::<C>(),
            _controller: PhantomData,
        }
    }

    pub fn class(&mut self, marker: &dyn Marker) -> &mut Self {
        let site = self.site(DeclKind::Class, None, None);
        apply(self.scope, marker, &site);
        self
    }

    pub fn method(&mut self, name: &str, marker: &dyn Marker) -> &mut Self {
        let site = self.site(DeclKind::Method, Some(name), None);
        apply(self.scope, marker, &site);
        self
    }

    pub fn param(&mut self, method: &str, index: usize, marker: &dyn Marker) -> &mut Self {
        let site = self.site(DeclKind::Parameter, Some(method), Some(index));
        apply(self.scope, marker, &site);
        self
    }

    fn site(&self, kind: DeclKind, name: Option<&str>, index: Option<usize>) -> ApplySite {
        match self.mechanism {
            Mechanism::Legacy => ApplySite::Legacy {
                class: self.class,
                member: name.map(str::to_string),
                index,
            },
            Mechanism::Modern => ApplySite::Modern {
                class: self.class,
                context: DeclContext {
                    kind,
                    name: name.map(str::to_string),
                    index,
                    metadata: self.scope.bag_for(self.class),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MathController;

    #[test]
    fn test_classify_legacy_shapes() {
        let class = ClassKey::of::<MathController>();

        let site = ApplySite::Legacy {
            class,
            member: None,
            index: None,
        };
        assert_eq!(classify(&site), Some(TargetScope::Class));

        let site = ApplySite::Legacy {
            class,
            member: Some("add".to_string()),
            index: None,
        };
        assert_eq!(
            classify(&site),
            Some(TargetScope::Method {
                name: "add".to_string()
            })
        );

        let site = ApplySite::Legacy {
            class,
            member: Some("add".to_string()),
            index: Some(1),
        };
        assert_eq!(
            classify(&site),
            Some(TargetScope::Parameter {
                method: "add".to_string(),
                index: 1
            })
        );

        // Index without a member name resolves nothing
        let site = ApplySite::Legacy {
            class,
            member: None,
            index: Some(0),
        };
        assert_eq!(classify(&site), None);
    }

    #[test]
    fn test_classify_modern_requires_names() {
        let scope = MetadataScope::new();
        let class = ClassKey::of::<MathController>();
        let bag = scope.bag_for(class);

        let site = ApplySite::Modern {
            class,
            context: DeclContext {
                kind: DeclKind::Method,
                name: None,
                index: None,
                metadata: bag.clone(),
            },
        };
        assert_eq!(classify(&site), None);

        let site = ApplySite::Modern {
            class,
            context: DeclContext {
                kind: DeclKind::Parameter,
                name: Some("add".to_string()),
                index: None,
                metadata: bag,
            },
        };
        assert_eq!(classify(&site), None);
    }

    #[test]
    fn test_unresolved_site_mutates_nothing() {
        struct Touch;
        impl Marker for Touch {
            fn name(&self) -> &'static str {
                "touch"
            }
            fn annotate(&self, store: &mut AnnotationStore, _target: &TargetScope) {
                store.ensure_class();
            }
        }

        let scope = MetadataScope::new();
        let class = ClassKey::of::<MathController>();
        let site = ApplySite::Legacy {
            class,
            member: None,
            index: Some(2),
        };

        apply(&scope, &Touch, &site);
        assert!(scope.legacy_snapshot(class).is_none());
    }
}
