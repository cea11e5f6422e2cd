// Class Identity - metadata lookup key for a controller type

use std::any::TypeId;

/// Identifies a controller class inside a metadata scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassKey {
    type_id: TypeId,
    type_name: &'static str,
}

impl ClassKey {
    pub fn of<T: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Class name without its module path
    pub fn class_name(&self) -> &'static str {
        self.type_name.rsplit("::").next().unwrap_or(self.type_name)
    }

    /// Namespace fallback when no explicit name was declared
    pub fn default_namespace(&self) -> String {
        lower_camel_case(self.class_name())
    }
}

/// "MathController" -> "mathController"
pub(crate) fn lower_camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
