use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use allergen_core::catalogs::OPEN_FOOD_FACTS_URL;
use allergen_core::{ReferenceData, DEFAULT_REFERENCE_PATH, DEFAULT_THRESHOLD};
use serde::Deserialize;
use tracing::debug;

pub const CONFIG_FILE: &str = "allergen.config.yaml";

/// Optional project configuration from allergen.config.yaml.
#[derive(Debug, Default, Deserialize)]
pub struct AllergenConfig {
    pub allergens: Option<PathBuf>,
    pub threshold: Option<u8>,
    pub api_base_url: Option<String>,
    pub user_agent: Option<String>,
}

/// Effective settings after layering command-line flags over the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub reference_path: PathBuf,
    pub threshold: u8,
    pub api_base_url: String,
    pub user_agent: String,
}

impl Settings {
    pub fn resolve(
        config: AllergenConfig,
        reference_path: Option<PathBuf>,
        threshold: Option<u8>,
    ) -> Result<Self, String> {
        let threshold = match (threshold, config.threshold) {
            (Some(t), _) => check_threshold(t, "--threshold")?,
            (None, Some(t)) => check_threshold(t, CONFIG_FILE)?,
            (None, None) => DEFAULT_THRESHOLD,
        };

        Ok(Self {
            reference_path: reference_path
                .or(config.allergens)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REFERENCE_PATH)),
            threshold,
            api_base_url: config
                .api_base_url
                .unwrap_or_else(|| OPEN_FOOD_FACTS_URL.to_string()),
            user_agent: config
                .user_agent
                .unwrap_or_else(|| format!("allergen-cli/{}", env!("CARGO_PKG_VERSION"))),
        })
    }

    pub fn load_reference(&self) -> Result<ReferenceData, String> {
        ReferenceData::load(&self.reference_path).map_err(|e| e.to_string())
    }
}

fn check_threshold(threshold: u8, origin: &str) -> Result<u8, String> {
    if threshold > 100 {
        return Err(format!(
            "Invalid threshold {threshold} from {origin}: expected 0-100"
        ));
    }
    Ok(threshold)
}

/// Read allergen.config.yaml from `dir` if it exists.
pub fn read_config(dir: &Path) -> Result<AllergenConfig, String> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(AllergenConfig::default());
    }

    let content = fs::read_to_string(&config_path)
        .map_err(|e| format!("Failed to read {}: {e}", config_path.display()))?;
    let config: AllergenConfig = serde_yaml::from_str(&content)
        .map_err(|e| format!("Invalid YAML config {}: {e}", config_path.display()))?;
    debug!(path = %config_path.display(), "loaded configuration");
    Ok(config)
}

/// Ingredient text from the command line, a file, or stdin, in that order.
pub fn read_ingredient_text(text: Option<String>, file: Option<&Path>) -> Result<String, String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if let Some(path) = file {
        return fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()));
    }

    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("Failed to read stdin: {e}"))?;
    Ok(buf)
}
