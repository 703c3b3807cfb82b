//! AttackType - Named damage category with strong/weak relations

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the attack type used when none is specified
pub const BASIC_ATTACK_TYPE: &str = "basic";

/// A category of damage
///
/// Relations reference other types by name, so two separately constructed
/// types with the same name compare as the same type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackType {
    pub name: String,
    /// Names of the types this one is strong against
    #[serde(default)]
    pub strong_against: Vec<String>,
    /// Names of the types this one is weak against
    #[serde(default)]
    pub weak_against: Vec<String>,
}

impl Default for AttackType {
    fn default() -> Self {
        AttackType::basic()
    }
}

impl AttackType {
    /// Create a type with no relations
    pub fn new(name: impl Into<String>) -> Self {
        AttackType {
            name: name.into(),
            strong_against: Vec::new(),
            weak_against: Vec::new(),
        }
    }

    /// The stock `basic` type
    pub fn basic() -> Self {
        AttackType::new(BASIC_ATTACK_TYPE)
    }

    /// Builder-style: add a type this one is strong against
    pub fn strong_against(mut self, other: impl Into<String>) -> Self {
        self.strong_against.push(other.into());
        self
    }

    /// Builder-style: add a type this one is weak against
    pub fn weak_against(mut self, other: impl Into<String>) -> Self {
        self.weak_against.push(other.into());
        self
    }

    pub fn is_strong_against(&self, other: &AttackType) -> bool {
        self.strong_against.iter().any(|name| *name == other.name)
    }

    pub fn is_weak_against(&self, other: &AttackType) -> bool {
        self.weak_against.iter().any(|name| *name == other.name)
    }
}

/// Attack types by name
#[derive(Debug, Clone, Default)]
pub struct AttackTypeRegistry {
    types: HashMap<String, AttackType>,
}

impl AttackTypeRegistry {
    pub fn new() -> Self {
        AttackTypeRegistry {
            types: HashMap::new(),
        }
    }

    /// Registry holding only the `basic` type
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(AttackType::basic());
        registry
    }

    /// Register a type, replacing any previous type of the same name
    pub fn register(&mut self, attack_type: AttackType) -> Option<AttackType> {
        self.types.insert(attack_type.name.clone(), attack_type)
    }

    pub fn get(&self, name: &str) -> Option<&AttackType> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
