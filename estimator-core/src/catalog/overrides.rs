use std::collections::HashMap;
use std::path::Path;
use serde::Deserialize;
use tokio::fs;

use crate::error::{EstimatorError, Result};

/// Price overrides loaded from a TOML file.
///
/// ```toml
/// [materials.cement]
/// "OPC 53 Grade" = 415.0
///
/// [materials.electrical."PVC Conduits"]
/// "Standard Wiring" = 14000.0
///
/// [labor]
/// masons = 850.0
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct CatalogOverrides {
    #[serde(default)]
    pub materials: HashMap<String, PriceTableOverride>,
    #[serde(default)]
    pub labor: HashMap<String, f64>,
    #[serde(default)]
    pub overhead: HashMap<String, PriceTableOverride>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceTableOverride {
    Flat(HashMap<String, f64>),
    TwoLevel(HashMap<String, HashMap<String, f64>>),
}

impl CatalogOverrides {
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        toml::from_str(&content)
            .map_err(|e| EstimatorError::InvalidConfig(format!("bad catalog overrides: {}", e)))
    }
}
