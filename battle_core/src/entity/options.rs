//! Entity creation options

use super::EntityId;
use serde::{Deserialize, Serialize};

/// Settings applied when an entity is created
///
/// Every field has a default, so config files only need the ones they change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityOptions {
    /// Must be greater than zero. Current health starts here.
    pub max_health: f64,
    /// Block every health change while set
    pub immortal: bool,
    /// Destroy the entity automatically when health reaches zero
    pub destroy_on_zero_hit_points: bool,
    /// Explicit identity; a fresh one is generated when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<EntityId>,
}

impl Default for EntityOptions {
    fn default() -> Self {
        EntityOptions {
            max_health: 1.0,
            immortal: false,
            destroy_on_zero_hit_points: true,
            identifier: None,
        }
    }
}

impl EntityOptions {
    pub fn with_max_health(max_health: f64) -> Self {
        EntityOptions {
            max_health,
            ..Default::default()
        }
    }
}
