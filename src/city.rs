//! The city aggregate: one ledger, the built constructions, the per-city
//! technology tree, and the per-cycle update rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{self, Construction},
    error::CommandError,
    resources::{ResourceLedger, ResourceSnapshot},
    save::{CityRecord, SaveError, SaveMetadata, SaveRecord, SAVE_FORMAT_VERSION},
    technology::{TechTemplate, Technology},
};

pub const STARTING_POPULATION: u64 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn starting_ledger(self) -> ResourceLedger {
        match self {
            Difficulty::Easy => ResourceLedger::new(1500.0, 50.0, 80.0),
            Difficulty::Normal => ResourceLedger::default(),
            Difficulty::Hard => ResourceLedger::new(700.0, 60.0, 60.0),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        })
    }
}

#[derive(Debug, Clone)]
pub struct City {
    name: String,
    difficulty: Difficulty,
    population: u64,
    resources: ResourceLedger,
    constructions: Vec<Construction>,
    technologies: Vec<Technology>,
    unlocked_technologies: Vec<String>,
    elapsed_cycles: u64,
}

impl City {
    pub fn new(name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            difficulty,
            population: STARTING_POPULATION,
            resources: difficulty.starting_ledger(),
            constructions: Vec::new(),
            technologies: Technology::tree(),
            unlocked_technologies: Vec::new(),
            elapsed_cycles: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    pub fn resources(&self) -> &ResourceLedger {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceLedger {
        &mut self.resources
    }

    pub fn constructions(&self) -> &[Construction] {
        &self.constructions
    }

    /// Built instances are mutable so the player can upgrade them in place.
    pub fn constructions_mut(&mut self) -> &mut [Construction] {
        &mut self.constructions
    }

    pub fn technologies(&self) -> &[Technology] {
        &self.technologies
    }

    pub fn technology(&self, name: &str) -> Option<&Technology> {
        self.technologies.iter().find(|tech| tech.name() == name)
    }

    pub fn unlocked_technologies(&self) -> &[String] {
        &self.unlocked_technologies
    }

    pub fn elapsed_cycles(&self) -> u64 {
        self.elapsed_cycles
    }

    /// Build a catalog structure by name: check affordability and
    /// prerequisites, clone the template, charge the cost, and apply its
    /// emission/satisfaction impacts in one ledger delta.
    pub fn build(&mut self, name: &str) -> Result<(), CommandError> {
        let template = catalog::template(name)
            .ok_or_else(|| CommandError::UnknownConstruction(name.to_string()))?;
        template.check_buildable(&self.resources, &self.unlocked_technologies)?;

        let built = template.instantiate();
        self.resources.apply_delta(
            -built.cost,
            built.emission_impact,
            built.satisfaction_impact,
        );
        self.constructions.push(built);
        Ok(())
    }

    /// Start researching a technology. The cost is charged up front; the
    /// countdown then runs once per cycle via [`City::tick_research`].
    pub fn start_research(&mut self, name: &str) -> Result<(), CommandError> {
        let index = self
            .technologies
            .iter()
            .position(|tech| tech.name() == name)
            .ok_or_else(|| CommandError::UnknownTechnology(name.to_string()))?;

        let tech = &self.technologies[index];
        if tech.is_unlocked() {
            return Err(CommandError::AlreadyUnlocked);
        }
        if tech.is_researching() {
            return Err(CommandError::AlreadyResearching);
        }
        for requirement in tech.template().prerequisites {
            if !self.unlocked_technologies.iter().any(|u| u == requirement) {
                return Err(CommandError::UnmetPrerequisite((*requirement).to_string()));
            }
        }
        let cost = tech.template().cost;
        if !self.resources.verify_sufficient(cost) {
            return Err(CommandError::InsufficientFunds);
        }

        self.resources.apply_delta(-cost, 0.0, 0.0);
        self.technologies[index].begin_research();
        Ok(())
    }

    /// Advance every in-flight research project by one cycle. Completed
    /// technologies join the unlocked set and their one-time benefits land
    /// on the ledger; the completed templates are returned for reporting.
    pub fn tick_research(&mut self) -> Vec<&'static TechTemplate> {
        let mut completed = Vec::new();
        for tech in &mut self.technologies {
            if tech.tick() {
                completed.push(tech.template());
            }
        }
        for template in &completed {
            self.unlocked_technologies.push(template.name.to_string());
            self.resources.apply_delta(
                0.0,
                template.benefits.emission_delta,
                template.benefits.satisfaction_delta,
            );
        }
        completed
    }

    /// One simulation cycle: income and passive emission accrue from the
    /// cycle's starting population and construction count, then population
    /// reacts to satisfaction (growth above 70, decline below 40, a dead
    /// zone in between).
    pub fn advance_cycle(&mut self) {
        self.elapsed_cycles += 1;

        let income =
            self.population as f64 * 0.5 + self.constructions.len() as f64 * 25.0;
        let emission_growth = self.population as f64 * 0.01;
        self.resources.apply_delta(income, emission_growth, 0.0);

        let satisfaction = self.resources.satisfaction();
        if satisfaction > 70.0 {
            self.population = (self.population as f64 * 1.01) as u64;
        } else if satisfaction < 40.0 {
            self.population = (self.population as f64 * 0.99) as u64;
        }
    }

    pub fn statistics(&self) -> CityStats {
        CityStats {
            name: self.name.clone(),
            difficulty: self.difficulty,
            population: self.population,
            elapsed_cycles: self.elapsed_cycles,
            constructions: self.constructions.len(),
            unlocked_technologies: self.unlocked_technologies.len(),
            resources: self.resources.snapshot(),
        }
    }

    pub fn to_record(&self) -> SaveRecord {
        SaveRecord {
            city: CityRecord {
                name: self.name.clone(),
                difficulty: self.difficulty,
                population: self.population,
                elapsed_cycles: self.elapsed_cycles,
                constructions: self.constructions.clone(),
                unlocked_technologies: self.unlocked_technologies.clone(),
            },
            resources: self.resources.snapshot(),
            metadata: SaveMetadata::now(),
        }
    }

    /// Rebuild a city from a persisted record. Constructions restore with
    /// full state (level included); unlocked technologies are re-marked
    /// without re-applying their one-time benefits, which the recorded
    /// resource snapshot already reflects.
    pub fn from_record(record: SaveRecord) -> Result<Self, SaveError> {
        if record.metadata.format_version != SAVE_FORMAT_VERSION {
            return Err(SaveError::UnsupportedVersion(record.metadata.format_version));
        }

        let mut city = City::new(record.city.name, record.city.difficulty);
        city.population = record.city.population;
        city.elapsed_cycles = record.city.elapsed_cycles;
        city.resources = ResourceLedger::from(record.resources);
        city.constructions = record.city.constructions;
        for name in &record.city.unlocked_technologies {
            let tech = city
                .technologies
                .iter_mut()
                .find(|tech| tech.name() == name.as_str())
                .ok_or_else(|| SaveError::UnknownTechnology(name.clone()))?;
            tech.force_unlocked();
        }
        city.unlocked_technologies = record.city.unlocked_technologies;
        Ok(city)
    }
}

/// Snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityStats {
    pub name: String,
    pub difficulty: Difficulty,
    pub population: u64,
    pub elapsed_cycles: u64,
    pub constructions: usize,
    pub unlocked_technologies: usize,
    pub resources: ResourceSnapshot,
}
