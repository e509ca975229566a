//! Registry pattern for dynamic integrator management

use super::{Composition, Integrator, Janus, Leapfrog};
use crate::config::IntegratorConfig;
use std::collections::HashMap;

/// Resolves integrator names and aliases and builds configured instances
pub struct IntegratorRegistry {
    aliases: HashMap<String, String>,
}

impl IntegratorRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            aliases: HashMap::new(),
        };

        for integrator in [
            Box::new(Janus::default()) as Box<dyn Integrator>,
            Box::new(Leapfrog),
        ] {
            for alias in integrator.aliases() {
                registry.add_alias(alias, integrator.name());
            }
        }

        registry
    }

    pub fn add_alias(&mut self, alias: &str, target: &str) {
        self.aliases.insert(alias.to_string(), target.to_string());
    }

    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(|s| s.as_str()).unwrap_or(name)
    }

    pub fn create(&self, config: &IntegratorConfig) -> Result<Box<dyn Integrator>, String> {
        match self.resolve(&config.scheme) {
            "janus" => {
                let composition = Composition::for_order(config.order).ok_or_else(|| {
                    format!(
                        "Unsupported composition order {} for janus. Supported orders: {:?}",
                        config.order,
                        Composition::supported_orders()
                    )
                })?;
                Ok(Box::new(
                    Janus::new(config.scale).with_composition(composition),
                ))
            }
            "leapfrog" => Ok(Box::new(Leapfrog)),
            _ => {
                let available = self.list_available();
                let aliases: Vec<String> =
                    self.list_aliases().into_iter().map(|(alias, _)| alias).collect();
                Err(format!(
                    "Unknown integrator: '{}'. Available integrators: {}. Aliases: {}",
                    config.scheme,
                    available.join(", "),
                    aliases.join(", ")
                ))
            }
        }
    }

    pub fn list_available(&self) -> Vec<String> {
        vec!["janus".to_string(), "leapfrog".to_string()]
    }

    pub fn list_aliases(&self) -> Vec<(String, String)> {
        let mut aliases: Vec<(String, String)> = self
            .aliases
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        aliases.sort_by(|a, b| a.0.cmp(&b.0));
        aliases
    }
}

impl Default for IntegratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(scheme: &str) -> IntegratorConfig {
        IntegratorConfig {
            scheme: scheme.to_string(),
            ..IntegratorConfig::default()
        }
    }

    #[test]
    fn test_integrator_registry() {
        let registry = IntegratorRegistry::new();

        let available = registry.list_available();
        assert!(available.contains(&"janus".to_string()));
        assert!(available.contains(&"leapfrog".to_string()));

        assert_eq!(registry.create(&config("janus")).unwrap().name(), "janus");
        assert_eq!(registry.create(&config("leapfrog")).unwrap().name(), "leapfrog");

        // Aliases
        assert_eq!(registry.create(&config("fixed_point")).unwrap().name(), "janus");
        assert_eq!(registry.create(&config("reversible")).unwrap().name(), "janus");
        assert_eq!(
            registry.create(&config("drift_kick_drift")).unwrap().name(),
            "leapfrog"
        );

        match registry.create(&config("unknown_integrator")) {
            Ok(integrator) => panic!("unexpectedly created {}", integrator.name()),
            Err(message) => assert!(message.contains("unknown_integrator"), "{message}"),
        }
    }

    #[test]
    fn test_janus_order_comes_from_config() {
        let registry = IntegratorRegistry::new();
        let mut config = config("janus");

        config.order = 2;
        assert_eq!(registry.create(&config).unwrap().order(), 2);

        config.order = 4;
        assert_eq!(registry.create(&config).unwrap().order(), 4);

        config.order = 5;
        assert!(registry.create(&config).is_err());
    }

    #[test]
    fn test_list_aliases_is_sorted() {
        let aliases = IntegratorRegistry::new().list_aliases();
        assert_eq!(
            aliases,
            vec![
                ("drift_kick_drift".to_string(), "leapfrog".to_string()),
                ("fixed_point".to_string(), "janus".to_string()),
                ("reversible".to_string(), "janus".to_string()),
            ]
        );
    }
}
