use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// Property switching column predicate pushdown on or off.
pub const ITERATOR_PUSHDOWN_PROPERTY: &str = "kvsieve.iterator.pushdown";
/// Property holding the prefix of installed stage names.
pub const STAGE_PREFIX_PROPERTY: &str = "kvsieve.stage.prefix";

const DEFAULT_STAGE_PREFIX: &str = "sieve_";

/// `PushdownConfig` holds the host-level switches of predicate pushdown.
///
/// When `iterator_pushdown` is off, no column predicate becomes a stage and the
/// caller evaluates every one of them; row identifier predicates still bound
/// the scan.
#[derive(Debug, Clone, PartialEq)]
pub struct PushdownConfig {
    iterator_pushdown: bool,
    stage_prefix: String,
}

/// Represents errors that can occur while reading a `PushdownConfig`.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// A property is present but its value is not acceptable.
    InvalidProperty { name: String, value: String },
}

impl PushdownConfig {
    /// Reads the config from host properties. Absent properties take their defaults.
    ///
    /// # Returns
    ///
    /// * `Ok(PushdownConfig)` - The config.
    /// * `Err(ConfigError::InvalidProperty)` - If the pushdown switch is not `true` or `false`,
    ///   or the stage prefix is empty.
    pub fn from_properties(properties: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = PushdownConfig::default();

        if let Some(value) = properties.get(ITERATOR_PUSHDOWN_PROPERTY) {
            config.iterator_pushdown = match value.trim().to_ascii_lowercase().as_str() {
                "true" => true,
                "false" => false,
                _ => return Err(invalid_property(ITERATOR_PUSHDOWN_PROPERTY, value)),
            };
        }
        if let Some(value) = properties.get(STAGE_PREFIX_PROPERTY) {
            if value.trim().is_empty() {
                return Err(invalid_property(STAGE_PREFIX_PROPERTY, value));
            }
            config.stage_prefix = value.trim().to_string();
        }
        Ok(config)
    }

    pub fn with_iterator_pushdown(mut self, iterator_pushdown: bool) -> Self {
        self.iterator_pushdown = iterator_pushdown;
        self
    }

    pub fn with_stage_prefix(mut self, stage_prefix: &str) -> Self {
        self.stage_prefix = stage_prefix.to_string();
        self
    }

    pub fn iterator_pushdown(&self) -> bool {
        self.iterator_pushdown
    }

    pub fn stage_prefix(&self) -> &str {
        &self.stage_prefix
    }
}

impl Default for PushdownConfig {
    fn default() -> Self {
        Self {
            iterator_pushdown: true,
            stage_prefix: DEFAULT_STAGE_PREFIX.to_string(),
        }
    }
}

fn invalid_property(name: &str, value: &str) -> ConfigError {
    ConfigError::InvalidProperty {
        name: name.to_string(),
        value: value.to_string(),
    }
}

impl Display for ConfigError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidProperty { name, value } => {
                write!(formatter, "invalid value '{}' for property '{}'", value, name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn properties(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn default_config() {
        let config = PushdownConfig::default();

        assert!(config.iterator_pushdown());
        assert_eq!("sieve_", config.stage_prefix());
    }

    #[test]
    fn config_from_empty_properties() {
        let config = PushdownConfig::from_properties(&HashMap::new()).unwrap();
        assert_eq!(PushdownConfig::default(), config);
    }

    #[test]
    fn config_from_properties() {
        let config = PushdownConfig::from_properties(&properties(&[
            (ITERATOR_PUSHDOWN_PROPERTY, "FALSE"),
            (STAGE_PREFIX_PROPERTY, "students_"),
        ]))
        .unwrap();

        assert!(!config.iterator_pushdown());
        assert_eq!("students_", config.stage_prefix());
    }

    #[test]
    fn config_with_builders() {
        let config = PushdownConfig::default()
            .with_iterator_pushdown(false)
            .with_stage_prefix("f_");

        assert!(!config.iterator_pushdown());
        assert_eq!("f_", config.stage_prefix());
    }

    #[test]
    fn attempt_to_read_a_non_boolean_pushdown_switch() {
        let result =
            PushdownConfig::from_properties(&properties(&[(ITERATOR_PUSHDOWN_PROPERTY, "yes")]));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidProperty { name, value })
                if name == ITERATOR_PUSHDOWN_PROPERTY && value == "yes"
        ));
    }

    #[test]
    fn attempt_to_read_an_empty_stage_prefix() {
        let result = PushdownConfig::from_properties(&properties(&[(STAGE_PREFIX_PROPERTY, " ")]));

        assert!(matches!(result, Err(ConfigError::InvalidProperty { .. })));
    }
}
