//! Roster configuration - Attack types and entity templates

use super::ConfigError;
use crate::damage::{AttackType, AttackTypeRegistry};
use crate::entity::{Entity, EntityOptions};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Raw roster file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub attack_types: Vec<AttackType>,
    #[serde(default)]
    pub entities: Vec<EntityTemplate>,
}

/// A named set of creation options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityTemplate {
    pub name: String,
    #[serde(flatten)]
    pub options: EntityOptions,
}

/// Validated roster: attack types by name plus entity templates
#[derive(Debug, Clone)]
pub struct Roster {
    pub attack_types: AttackTypeRegistry,
    templates: Vec<EntityTemplate>,
}

impl Roster {
    /// Validate raw config into a roster
    pub fn from_config(config: RosterConfig) -> Result<Self, ConfigError> {
        let mut attack_types = AttackTypeRegistry::new();
        for attack_type in &config.attack_types {
            if attack_types.register(attack_type.clone()).is_some() {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate attack type '{}'",
                    attack_type.name
                )));
            }
        }

        for attack_type in &config.attack_types {
            let related = attack_type
                .strong_against
                .iter()
                .chain(attack_type.weak_against.iter());
            for name in related {
                if !attack_types.contains(name) {
                    return Err(ConfigError::ValidationError(format!(
                        "attack type '{}' references unknown type '{}'",
                        attack_type.name, name
                    )));
                }
            }
        }

        let mut seen = HashSet::new();
        for template in &config.entities {
            if template.name.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "entity template with empty name".to_string(),
                ));
            }
            if !seen.insert(template.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate entity template '{}'",
                    template.name
                )));
            }
            // Templates spawn many entities, so they cannot carry a fixed id
            if template.options.identifier.is_some() {
                return Err(ConfigError::ValidationError(format!(
                    "entity template '{}' sets an identifier",
                    template.name
                )));
            }
            if !(template.options.max_health > 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "entity '{}' has non-positive max_health {}",
                    template.name, template.options.max_health
                )));
            }
        }

        debug!(
            attack_types = attack_types.len(),
            entities = config.entities.len(),
            "roster loaded"
        );

        Ok(Roster {
            attack_types,
            templates: config.entities,
        })
    }

    pub fn templates(&self) -> &[EntityTemplate] {
        &self.templates
    }

    pub fn template(&self, name: &str) -> Option<&EntityTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Create a fresh entity from the named template
    ///
    /// Returns `Ok(None)` when no template has that name.
    pub fn spawn(&self, name: &str) -> Result<Option<Entity>, ConfigError> {
        match self.template(name) {
            Some(template) => Ok(Some(Entity::with_options(
                template.name.clone(),
                template.options.clone(),
            )?)),
            None => Ok(None),
        }
    }
}

/// Load and validate a roster from a TOML file
pub fn load_roster(path: &Path) -> Result<Roster, ConfigError> {
    let config: RosterConfig = super::load_toml(path)?;
    Roster::from_config(config)
}

/// Parse and validate a roster from a TOML string
pub fn parse_roster(content: &str) -> Result<Roster, ConfigError> {
    let config: RosterConfig = super::parse_toml(content)?;
    Roster::from_config(config)
}
