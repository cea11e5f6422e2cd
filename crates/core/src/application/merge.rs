// Merge Engine - reconciles the two physical stores into one logical view
//
// Scalar fields: modern wins when set. Ordered lists: legacy first, then
// modern. Bags: shallow merge, modern overwrites on key collision.
// Merging with an empty side is the identity, so a class annotated through
// a single mechanism reads back exactly as declared.

use crate::application::markers::merge_bag;
use crate::domain::{AnnotationStore, ClassMeta, MethodMeta, ParamMeta};
use std::collections::BTreeSet;

/// Fold the legacy-mode and modern-mode stores for one class
pub fn merge_stores(
    legacy: Option<&AnnotationStore>,
    modern: Option<&AnnotationStore>,
) -> AnnotationStore {
    match (legacy, modern) {
        (None, None) => AnnotationStore::default(),
        (Some(l), None) => l.clone(),
        (None, Some(m)) => m.clone(),
        (Some(l), Some(m)) => {
            let mut merged = AnnotationStore {
                class: merge_class(l.class.as_ref(), m.class.as_ref()),
                ..AnnotationStore::default()
            };

            let method_names: BTreeSet<&String> = l.methods.keys().chain(m.methods.keys()).collect();
            for name in method_names {
                merged.methods.insert(
                    name.clone(),
                    merge_method(l.methods.get(name), m.methods.get(name)),
                );
            }

            let param_names: BTreeSet<&String> = l.params.keys().chain(m.params.keys()).collect();
            for name in param_names {
                merged.params.insert(
                    name.clone(),
                    merge_param(l.params.get(name), m.params.get(name)),
                );
            }

            merged
        }
    }
}

fn merge_class(legacy: Option<&ClassMeta>, modern: Option<&ClassMeta>) -> Option<ClassMeta> {
    match (legacy, modern) {
        (None, None) => None,
        (Some(l), None) => Some(l.clone()),
        (None, Some(m)) => Some(m.clone()),
        (Some(l), Some(m)) => {
            let mut annotations = l.annotations.clone();
            merge_bag(&mut annotations, &m.annotations);
            Some(ClassMeta {
                name: m.name.clone().or_else(|| l.name.clone()),
                middlewares: l
                    .middlewares
                    .iter()
                    .chain(&m.middlewares)
                    .cloned()
                    .collect(),
                annotations,
            })
        }
    }
}

fn merge_method(legacy: Option<&MethodMeta>, modern: Option<&MethodMeta>) -> MethodMeta {
    let l = legacy.cloned().unwrap_or_default();
    let Some(m) = modern else {
        return l;
    };

    let mut annotations = l.annotations;
    merge_bag(&mut annotations, &m.annotations);
    MethodMeta {
        kind: m.kind.or(l.kind),
        route_name: m.route_name.clone().or(l.route_name),
        input: m.input.clone().or(l.input),
        output: m.output.clone().or(l.output),
        middlewares: l
            .middlewares
            .into_iter()
            .chain(m.middlewares.iter().cloned())
            .collect(),
        annotations,
    }
}

fn merge_param(legacy: Option<&ParamMeta>, modern: Option<&ParamMeta>) -> ParamMeta {
    let l = legacy.copied().unwrap_or_default();
    let Some(m) = modern else {
        return l;
    };

    ParamMeta {
        ctx_index: m.ctx_index.or(l.ctx_index),
        input_index: m.input_index.or(l.input_index),
    }
}
