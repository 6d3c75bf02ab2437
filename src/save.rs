//! The save/load collaborator. The core never touches the filesystem on its
//! own; the engine and the presentation layer go through [`SaveManager`],
//! and [`SaveRecord`] is the round-trip contract they must honor.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    catalog::Construction,
    city::{City, Difficulty},
    resources::ResourceSnapshot,
};

pub const SAVE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRecord {
    pub city: CityRecord,
    pub resources: ResourceSnapshot,
    pub metadata: SaveMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityRecord {
    pub name: String,
    pub difficulty: Difficulty,
    pub population: u64,
    pub elapsed_cycles: u64,
    pub constructions: Vec<Construction>,
    pub unlocked_technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub saved_at: String,
    pub format_version: u32,
}

impl SaveMetadata {
    pub fn now() -> Self {
        Self {
            saved_at: Utc::now().to_rfc3339(),
            format_version: SAVE_FORMAT_VERSION,
        }
    }
}

/// A corrupted or inconsistent record fails explicitly; no half-restored
/// city is ever handed back.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save io error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed save record: {0}")]
    Format(#[from] serde_json::Error),
    #[error("save references unknown technology '{0}'")]
    UnknownTechnology(String),
    #[error("unsupported save format version {0}")]
    UnsupportedVersion(u32),
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveSummary {
    pub file: String,
    pub city: String,
    pub difficulty: Difficulty,
    pub population: u64,
    pub elapsed_cycles: u64,
    pub saved_at: String,
}

pub struct SaveManager {
    dir: PathBuf,
}

impl SaveManager {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Write a timestamped save and return its path.
    pub fn save_game(&self, city: &City) -> Result<PathBuf, SaveError> {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let file = format!("{}_{}.json", sanitize(city.name()), timestamp);
        self.write_record(&city.to_record(), &file)
    }

    /// Engine-driven periodic save; one stable file per city.
    pub fn write_autosave(&self, city: &City) -> Result<PathBuf, SaveError> {
        let file = format!("autosave_{}.json", sanitize(city.name()));
        self.write_record(&city.to_record(), &file)
    }

    fn write_record(&self, record: &SaveRecord, file: &str) -> Result<PathBuf, SaveError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file);
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json)?;
        Ok(path)
    }

    pub fn load_game(&self, file: &str) -> Result<City, SaveError> {
        let data = fs::read_to_string(self.dir.join(file))?;
        let record: SaveRecord = serde_json::from_str(&data)?;
        City::from_record(record)
    }

    /// Summaries of every readable save, newest first. Unreadable files are
    /// skipped rather than failing the whole listing.
    pub fn list_saves(&self) -> Result<Vec<SaveSummary>, SaveError> {
        let mut saves = Vec::new();
        if !self.dir.exists() {
            return Ok(saves);
        }
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Ok(data) = fs::read_to_string(&path) else {
                continue;
            };
            let Ok(record) = serde_json::from_str::<SaveRecord>(&data) else {
                continue;
            };
            saves.push(SaveSummary {
                file: entry.file_name().to_string_lossy().into_owned(),
                city: record.city.name,
                difficulty: record.city.difficulty,
                population: record.city.population,
                elapsed_cycles: record.city.elapsed_cycles,
                saved_at: record.metadata.saved_at,
            });
        }
        saves.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(saves)
    }

    pub fn delete_save(&self, file: &str) -> Result<(), SaveError> {
        fs::remove_file(self.dir.join(file))?;
        Ok(())
    }
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
