// Metadata Scope - the two physical stores per class
//
// Legacy mechanism: the store hangs off the class key directly.
// Modern mechanism: the store lives inside a shared per-class metadata bag,
// under a library-private token. Other libraries may keep their own tokens
// in the same bag; only this token's slot is ours.

use crate::domain::{AnnotationStore, ClassKey};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

/// Private token type; its TypeId keys this library's bag slot
struct AnnotationStoreToken;

fn private_token() -> TypeId {
    TypeId::of::<AnnotationStoreToken>()
}

/// Shared per-class metadata bag (modern mechanism)
#[derive(Default)]
pub struct MetadataBag {
    slots: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl MetadataBag {
    /// This library's slot, created on first access. Never overwrites.
    pub(crate) fn store_mut(&mut self) -> &mut AnnotationStore {
        let slot = self
            .slots
            .entry(private_token())
            .or_insert_with(|| Box::new(AnnotationStore::default()));
        slot.downcast_mut::<AnnotationStore>()
            .expect("private token slot holds an AnnotationStore")
    }

    /// Read-only view of this library's slot, if populated
    pub(crate) fn store(&self) -> Option<&AnnotationStore> {
        self.slots
            .get(&private_token())
            .and_then(|slot| slot.downcast_ref::<AnnotationStore>())
    }
}

pub type SharedBag = Arc<Mutex<MetadataBag>>;

/// Mutate the store inside a shared bag (modern-mode physical accessor)
pub fn with_bag_store<R>(bag: &SharedBag, f: impl FnOnce(&mut AnnotationStore) -> R) -> R {
    let mut bag = bag.lock().unwrap();
    f(bag.store_mut())
}

/// One metadata universe.
///
/// Scopes never share data; each RPC root binding allocates its own, which
/// is what keeps declarations under one root invisible to routers built
/// from another. Stores are allocated on first access and live as long as
/// the scope (no deallocation path).
pub struct MetadataScope {
    id: Uuid,
    legacy: Mutex<HashMap<ClassKey, AnnotationStore>>,
    modern: Mutex<HashMap<ClassKey, SharedBag>>,
}

impl MetadataScope {
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        debug!(scope_id = %id, "allocated metadata scope");
        Self {
            id,
            legacy: Mutex::new(HashMap::new()),
            modern: Mutex::new(HashMap::new()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Mutate the legacy-mode store for `class` (legacy physical accessor)
    pub fn with_legacy_store<R>(
        &self,
        class: ClassKey,
        f: impl FnOnce(&mut AnnotationStore) -> R,
    ) -> R {
        let mut stores = self.legacy.lock().unwrap();
        f(stores.entry(class).or_default())
    }

    /// Shared metadata bag for `class`, allocated on first access
    pub fn bag_for(&self, class: ClassKey) -> SharedBag {
        let mut bags = self.modern.lock().unwrap();
        bags.entry(class).or_default().clone()
    }

    /// Snapshot of the legacy-mode store for `class`, if any
    pub fn legacy_snapshot(&self, class: ClassKey) -> Option<AnnotationStore> {
        self.legacy.lock().unwrap().get(&class).cloned()
    }

    /// Snapshot of the modern-mode store for `class`, if any
    pub fn modern_snapshot(&self, class: ClassKey) -> Option<AnnotationStore> {
        let bag = self.modern.lock().unwrap().get(&class).cloned()?;
        let bag = bag.lock().unwrap();
        bag.store().cloned()
    }
}

impl Default for MetadataScope {
    fn default() -> Self {
        Self::new()
    }
}
