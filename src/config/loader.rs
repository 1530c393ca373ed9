//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading benefit
//! program configuration from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::calculation::CurrencyNames;
use crate::error::{EngineError, EngineResult};
use crate::models::{DistributionType, RoleProfile};

use super::types::{ProgramConfig, ProgramMetadata, TemplateSet, TemplateSetFile};

/// Loads and provides access to benefit program configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── program.yaml          # Program metadata and currency names
/// └── templates/
///     └── 2025-01-01.yaml   # Role templates effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use benefits_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// let profile = loader.role_profile_for(date).unwrap();
/// println!("{} roles configured", profile.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ProgramConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails with `ConfigNotFound` when a required file or the templates
    /// directory is missing, and with `ConfigParseError` when a file holds
    /// invalid YAML or an amount that is negative or has fractional cents.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<ProgramMetadata>(&path.join("program.yaml"))?;
        let template_sets = Self::load_template_sets(&path.join("templates"))?;

        Ok(Self {
            config: ProgramConfig::new(metadata, template_sets),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every template file and converts its amounts to minor units.
    fn load_template_sets(templates_dir: &Path) -> EngineResult<Vec<TemplateSet>> {
        let dir_str = templates_dir.display().to_string();

        let entries = fs::read_dir(templates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut sets = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "yaml") {
                continue;
            }

            let file = Self::load_yaml::<TemplateSetFile>(&path)?;
            let mut profile = RoleProfile::new();
            for (role, amounts) in &file.roles {
                let breakdown =
                    amounts
                        .to_breakdown()
                        .map_err(|e| EngineError::ConfigParseError {
                            path: path.display().to_string(),
                            message: format!("role '{}': {}", role, e),
                        })?;
                if profile.insert(role, breakdown).is_some() {
                    return Err(EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message: format!("role '{}' is defined more than once", role.trim()),
                    });
                }
            }

            sets.push(TemplateSet {
                effective_date: file.effective_date,
                profile,
            });
        }

        if sets.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no template files found)", dir_str),
            });
        }

        Ok(sets)
    }

    /// Returns the underlying program configuration.
    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    /// Returns the program metadata.
    pub fn program(&self) -> &ProgramMetadata {
        self.config.program()
    }

    /// Currency names used by the verbalizer.
    pub fn currency(&self) -> &CurrencyNames {
        &self.config.program().currency
    }

    /// Distribution type for newly registered clients.
    pub fn default_distribution(&self) -> DistributionType {
        self.config.program().default_distribution
    }

    /// Gets the role templates in force on a given date.
    ///
    /// Picks the most recent template set effective on or before `date`.
    pub fn role_profile_for(&self, date: NaiveDate) -> EngineResult<RoleProfile> {
        self.config
            .template_sets()
            .iter()
            .rev()
            .find(|set| set.effective_date <= date)
            .map(|set| set.profile.clone())
            .ok_or_else(|| EngineError::not_found("role template set", date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.program().name, "Programa de Benefícios Flexíveis");
        assert_eq!(loader.currency().code, "BRL");
        assert_eq!(loader.default_distribution(), DistributionType::Role);
    }

    #[test]
    fn test_role_profile_for_date() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let profile = loader.role_profile_for(date(2025, 8, 1)).unwrap();
        let junior = profile.template_for("junior").unwrap();
        assert_eq!(junior.food, Money::from_minor_units(80_000));
        assert_eq!(junior.total().unwrap(), Money::from_minor_units(300_000));

        let senior = profile.template_for("Senior").unwrap();
        assert_eq!(senior.total().unwrap(), Money::from_minor_units(350_000));
    }

    #[test]
    fn test_later_template_set_supersedes_earlier() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let before = loader.role_profile_for(date(2025, 12, 31)).unwrap();
        let after = loader.role_profile_for(date(2026, 1, 1)).unwrap();
        assert!(before.template_for("lead").is_none());
        assert!(after.template_for("lead").is_some());
    }

    #[test]
    fn test_no_template_set_before_first_effective_date() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let result = loader.role_profile_for(date(2020, 1, 1));
        match result {
            Err(EngineError::NotFound { entity, id }) => {
                assert_eq!(entity, "role template set");
                assert_eq!(id, "2020-01-01");
            }
            other => panic!("Expected NotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("program.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_roles_differing_only_in_case_are_rejected() {
        let dir = std::env::temp_dir().join(format!("benefits-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(dir.join("templates")).unwrap();
        fs::copy(
            Path::new(config_path()).join("program.yaml"),
            dir.join("program.yaml"),
        )
        .unwrap();
        let templates = [
            "effective_date: 2025-01-01",
            "roles:",
            "  Junior:",
            "    meal: \"1.00\"",
            "  junior:",
            "    meal: \"2.00\"",
            "  \" JUNIOR\":",
            "    meal: \"3.00\"",
        ]
        .join("\n");
        fs::write(dir.join("templates").join("2025-01-01.yaml"), templates).unwrap();

        let result = ConfigLoader::load(&dir);
        fs::remove_dir_all(&dir).unwrap();

        match result {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("more than once"), "unexpected message: {}", message);
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }
}
