//! Configuration loading and management
//!
//! Lets deployments adjust presenters without recompiling: hide or expose
//! fields and pick the output casing per presenter.
//!
//! ```yaml
//! default_casing: snake
//! presenters:
//!   user_profile_presenter:
//!     hidden: [password]
//!     casing: camel
//! ```

use crate::core::casing::{Casing, snake_case};
use crate::core::definition::validate_attribute_name;
use crate::core::error::{PresenterError, Result as PresenterResult};
use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Overrides for a single presenter; unset fields keep the presenter's own value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresenterOverrides {
    /// Replacement deny-list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<Vec<String>>,

    /// Replacement allow-list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<Vec<String>>,

    /// Replacement casing mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub casing: Option<Casing>,
}

impl PresenterOverrides {
    /// Overlay `other` on top of `self`; fields set in `other` win
    fn merge(&mut self, other: PresenterOverrides) {
        if other.hidden.is_some() {
            self.hidden = other.hidden;
        }
        if other.visible.is_some() {
            self.visible = other.visible;
        }
        if other.casing.is_some() {
            self.casing = other.casing;
        }
    }
}

/// Complete configuration for presenters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Casing applied to every configured presenter unless overridden
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_casing: Option<Casing>,

    /// Overrides keyed by presenter name
    #[serde(default)]
    pub presenters: IndexMap<String, PresenterOverrides>,
}

impl PresentationConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        tracing::info!(
            path = %path,
            presenters = config.presenters.len(),
            "Loaded presenter configuration"
        );
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Merge several configurations; later ones win per presenter and per field
    pub fn merge(configs: Vec<PresentationConfig>) -> Self {
        let mut merged = PresentationConfig::default();

        for config in configs {
            if config.default_casing.is_some() {
                merged.default_casing = config.default_casing;
            }
            for (name, overrides) in config.presenters {
                merged
                    .presenters
                    .entry(snake_case(&name))
                    .or_default()
                    .merge(overrides);
            }
        }

        merged
    }

    /// Overrides for a presenter.
    ///
    /// Names are compared in snake_case, so `UserProfilePresenter` matches a
    /// `user_profile_presenter` entry.
    pub fn overrides_for(&self, presenter: &str) -> Option<&PresenterOverrides> {
        let wanted = snake_case(presenter);
        self.presenters
            .iter()
            .find(|(name, _)| snake_case(name) == wanted)
            .map(|(_, overrides)| overrides)
    }

    /// Check that every configured field name is a plain identifier
    pub fn validate(&self) -> PresenterResult<()> {
        for (presenter, overrides) in &self.presenters {
            let fields = overrides
                .hidden
                .iter()
                .flatten()
                .chain(overrides.visible.iter().flatten());

            for field in fields {
                validate_attribute_name(field).map_err(|_| {
                    PresenterError::Config(format!(
                        "presenter '{}' lists invalid field name '{}'",
                        presenter, field
                    ))
                })?;
            }
        }
        Ok(())
    }
}
