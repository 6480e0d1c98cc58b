use std::path::Path;

use secrecy::ExposeSecret;

use crate::{Config, StorageBackendConfig};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_openai_config()?;
        self.validate_llm_config()?;
        self.validate_storage_config()?;
        Ok(())
    }

    fn validate_openai_config(&self) -> anyhow::Result<()> {
        if self.openai.api_key.expose_secret().trim().is_empty() {
            anyhow::bail!("openai.api_key must not be empty");
        }

        Ok(())
    }

    fn validate_llm_config(&self) -> anyhow::Result<()> {
        if self.llm.model.trim().is_empty() {
            anyhow::bail!("llm.model must not be empty");
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            anyhow::bail!("llm.temperature must be between 0.0 and 2.0");
        }

        if self.llm.max_tokens == 0 {
            anyhow::bail!("llm.max_tokens must be greater than 0");
        }

        if self.tts.model.trim().is_empty() {
            anyhow::bail!("tts.model must not be empty");
        }

        Ok(())
    }

    fn validate_storage_config(&self) -> anyhow::Result<()> {
        let storage = &self.storage;

        if storage.object_name.trim().is_empty() {
            anyhow::bail!("storage.object_name must not be empty");
        }

        if storage.upload_timeout()?.is_zero() {
            anyhow::bail!("storage.upload_timeout must be greater than 0");
        }

        if let StorageBackendConfig::Gcs(ref gcs) = storage.backend
            && gcs.bucket.trim().is_empty()
        {
            anyhow::bail!("storage.backend.bucket must not be empty");
        }

        Ok(())
    }
}
