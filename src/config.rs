use std::{fs, path::Path};

use serde::Deserialize;

use crate::{prelude::*, tariff::plan::RateTable};

/// Deployment-time plan catalog: the single source of truth for which
/// plans take part in a comparison.
#[derive(Debug, Deserialize)]
pub struct Catalog {
    #[serde(default, rename = "plan")]
    pub plans: Vec<PlanConfig>,
}

#[derive(Debug, Deserialize)]
pub struct PlanConfig {
    pub name: String,

    #[serde(flatten)]
    pub rates: RateTable,
}

impl Catalog {
    pub fn read_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read the plan catalog from `{}`", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse the plan catalog in `{}`", path.display()))
    }
}
