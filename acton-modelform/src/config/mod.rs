//! Configuration for rendered form markup
//!
//! The class names and separators written into form markup are
//! configurable. Configuration is loaded from multiple sources with clear
//! precedence:
//!
//! 1. Environment variables (highest priority, `MODELFORM_` prefix)
//! 2. `./modelform.toml`
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # modelform.toml
//! [form]
//! class = "forme"
//! method = "post"
//!
//! [errors]
//! input_class = "error"
//! message_class = "error_message"
//! message_separator = ", "
//!
//! [inputs]
//! fieldset_class = "inputs"
//! hidden_suffix = "_hidden"
//! label_separator = ": "
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use acton_modelform::config::ModelFormConfig;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = ModelFormConfig::load()?;
//! assert!(!config.form.class.is_empty());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Settings of the `<form>` tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
    /// Class always present on the form; the model's param key follows it
    pub class: String,

    /// Method used when none is given
    pub method: String,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            class: "forme".into(),
            method: "post".into(),
        }
    }
}

/// Settings for validation error display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorSettings {
    /// Class added to a control whose field has errors
    pub input_class: String,

    /// Class of the `<span>` holding the messages
    pub message_class: String,

    /// Joins several messages for one field
    pub message_separator: String,
}

impl Default for ErrorSettings {
    fn default() -> Self {
        Self {
            input_class: "error".into(),
            message_class: "error_message".into(),
            message_separator: ", ".into(),
        }
    }
}

/// Settings for labels, hidden fallbacks, and subform fieldsets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Class of the `<fieldset>` emitted by subform `inputs`
    pub fieldset_class: String,

    /// Suffix of the id of a boolean checkbox's hidden fallback
    pub hidden_suffix: String,

    /// Placed between a label's text and its control
    pub label_separator: String,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            fieldset_class: "inputs".into(),
            hidden_suffix: "_hidden".into(),
            label_separator: ": ".into(),
        }
    }
}

/// Complete acton-modelform configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelFormConfig {
    /// `<form>` tag settings
    #[serde(default)]
    pub form: FormSettings,

    /// Validation error display
    #[serde(default)]
    pub errors: ErrorSettings,

    /// Input and fieldset settings
    #[serde(default)]
    pub inputs: InputSettings,
}

impl ModelFormConfig {
    /// Load configuration from `./modelform.toml` and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - `./modelform.toml` exists but cannot be parsed
    /// - Values fail type conversion
    pub fn load() -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?));

        let local_config = Self::recommended_path();
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        let config = figment
            .merge(Env::prefixed("MODELFORM_").split("__").lowercase(true))
            .extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file and the environment
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - The file contains invalid TOML syntax
    /// - Values fail type conversion
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use acton_modelform::config::ModelFormConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = ModelFormConfig::load_from("./config/forms.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("MODELFORM_").split("__").lowercase(true))
            .extract()?;

        Ok(config)
    }

    /// Path of the local configuration file
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        PathBuf::from("./modelform.toml")
    }
}
