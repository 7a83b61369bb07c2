use crate::core::session::{DEFAULT_ABORT_TOKEN, DEFAULT_CONFIRM_TOKEN};
use crate::core::ConfigProvider;
use crate::utils::error::{FarmError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Every key is optional; missing sections fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmConfig {
    pub storage: StorageConfig,
    pub interface: InterfaceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub cultures_file: String,
    pub inputs_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "dados".to_string(),
            cultures_file: "culturas.csv".to_string(),
            inputs_file: "insumos.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceConfig {
    pub abort_token: String,
    pub confirm_token: String,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            abort_token: DEFAULT_ABORT_TOKEN.to_string(),
            confirm_token: DEFAULT_CONFIRM_TOKEN.to_string(),
        }
    }
}

impl FarmConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FarmError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FarmError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}` from the environment; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FarmError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("storage.data_dir", &self.storage.data_dir)?;
        validate_path("storage.cultures_file", &self.storage.cultures_file)?;
        validate_path("storage.inputs_file", &self.storage.inputs_file)?;

        if self.storage.cultures_file == self.storage.inputs_file {
            return Err(FarmError::ConfigValidationError {
                field: "storage.inputs_file".to_string(),
                message: "Cultures and inputs must be stored in different files".to_string(),
            });
        }

        validate_non_empty_string("interface.abort_token", &self.interface.abort_token)?;
        validate_non_empty_string("interface.confirm_token", &self.interface.confirm_token)?;

        if self
            .interface
            .abort_token
            .trim()
            .eq_ignore_ascii_case(self.interface.confirm_token.trim())
        {
            return Err(FarmError::ConfigValidationError {
                field: "interface.confirm_token".to_string(),
                message: "Confirmation token must differ from the abort token".to_string(),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for FarmConfig {
    fn data_dir(&self) -> &str {
        &self.storage.data_dir
    }

    fn cultures_file(&self) -> &str {
        &self.storage.cultures_file
    }

    fn inputs_file(&self) -> &str {
        &self.storage.inputs_file
    }

    fn abort_token(&self) -> &str {
        &self.interface.abort_token
    }

    fn confirm_token(&self) -> &str {
        &self.interface.confirm_token
    }
}

impl Validate for FarmConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
