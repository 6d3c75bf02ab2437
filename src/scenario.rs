use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::city::{City, Difficulty};

fn default_autosave_interval_ticks() -> u64 {
    30
}

fn default_save_dir() -> PathBuf {
    PathBuf::from("saves")
}

/// Game-setup file consumed by the runner: which city to found, on which
/// difficulty, with which seed, and how the run is driven.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub city: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub seed: u64,
    #[serde(default)]
    pub ticks: Option<u64>,
    #[serde(default = "default_autosave_interval_ticks")]
    pub autosave_interval_ticks: u64,
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    pub fn build_city(&self) -> City {
        City::new(self.city.clone(), self.difficulty)
    }

    pub fn ticks(&self, override_ticks: Option<u64>) -> u64 {
        override_ticks.or(self.ticks).unwrap_or(120)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_defaults() {
        let scenario: Scenario = serde_yaml::from_str(
            "name: smoke\ncity: EcoVille\nseed: 9\n",
        )
        .unwrap();
        assert_eq!(scenario.difficulty, Difficulty::Normal);
        assert_eq!(scenario.autosave_interval_ticks, 30);
        assert_eq!(scenario.save_dir, PathBuf::from("saves"));
        assert_eq!(scenario.ticks(None), 120);
        assert_eq!(scenario.ticks(Some(7)), 7);
    }

    #[test]
    fn build_city_applies_difficulty() {
        let scenario: Scenario = serde_yaml::from_str(
            "name: smoke\ncity: Vila Cinza\ndifficulty: hard\nseed: 9\n",
        )
        .unwrap();
        let city = scenario.build_city();
        assert_eq!(city.name(), "Vila Cinza");
        assert_eq!(city.resources().money(), 700.0);
        assert_eq!(city.resources().carbon_emission(), 60.0);
    }
}
