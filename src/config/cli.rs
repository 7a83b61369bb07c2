use crate::config::FarmConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "farmtech")]
#[command(about = "FarmTech - gestão de culturas e insumos agrícolas")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding culturas.csv and insumos.csv (overrides the config file)
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliConfig {
    /// Loads the TOML file when given, applies command-line overrides and
    /// validates the result.
    pub fn resolve(&self) -> Result<FarmConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path);
                FarmConfig::from_file(path)?
            }
            None => FarmConfig::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            tracing::debug!("Data directory overridden to {}", data_dir);
            config.storage.data_dir = data_dir.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_flags() {
        let cli = CliConfig::parse_from(["farmtech", "--data-dir", "/tmp/x", "-v"]);
        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/x"));
        assert!(cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_resolve_without_flags_uses_defaults() {
        let config = CliConfig::default().resolve().unwrap();
        assert_eq!(config, FarmConfig::default());
    }

    #[test]
    fn test_data_dir_flag_overrides_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\ndata_dir = \"from-file\"\n")
            .unwrap();

        let cli = CliConfig {
            config: Some(temp_file.path().to_string_lossy().into_owned()),
            data_dir: Some("from-flag".to_string()),
            verbose: false,
        };
        assert_eq!(cli.resolve().unwrap().storage.data_dir, "from-flag");
    }

    #[test]
    fn test_missing_config_file_fails() {
        let cli = CliConfig {
            config: Some("/nonexistent/farmtech.toml".to_string()),
            ..Default::default()
        };
        assert!(cli.resolve().is_err());
    }
}
