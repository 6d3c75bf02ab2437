//! The external driver: runs the registered systems over a city once per
//! tick and autosaves between ticks. One tick is one simulation cycle and
//! one simulated second.

use std::path::PathBuf;

use anyhow::Result;

use crate::{
    city::City,
    rng::{RngManager, SystemRng},
    save::SaveManager,
};

pub const TICK_SECS: f64 = 1.0;

pub struct EngineSettings {
    pub scenario_name: String,
    pub seed: u64,
    /// Zero disables autosave.
    pub autosave_interval_ticks: u64,
    pub save_dir: PathBuf,
}

pub struct EngineBuilder {
    settings: EngineSettings,
    systems: Vec<Box<dyn System>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            systems: Vec::new(),
        }
    }

    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    pub fn push_system(&mut self, system: impl System + 'static) {
        self.systems.push(Box::new(system));
    }

    pub fn build(self) -> Engine {
        Engine {
            rng: RngManager::new(self.settings.seed),
            systems: self.systems,
            saves: SaveManager::new(&self.settings.save_dir),
            settings: self.settings,
        }
    }
}

pub struct Engine {
    rng: RngManager,
    systems: Vec<Box<dyn System>>,
    saves: SaveManager,
    settings: EngineSettings,
}

impl Engine {
    pub fn run(&mut self, city: &mut City, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            let current_tick = city.elapsed_cycles();
            for system in &mut self.systems {
                let mut rng_stream = self.rng.stream(system.name());
                let ctx = SystemContext {
                    tick: current_tick,
                    dt_secs: TICK_SECS,
                    scenario_name: &self.settings.scenario_name,
                };
                system.run(&ctx, city, &mut rng_stream)?;
            }
            self.maybe_autosave(city)?;
        }
        Ok(())
    }

    fn maybe_autosave(&self, city: &City) -> Result<()> {
        let interval = self.settings.autosave_interval_ticks;
        if interval == 0 || city.elapsed_cycles() % interval != 0 {
            return Ok(());
        }
        let path = self.saves.write_autosave(city)?;
        tracing::debug!(path = %path.display(), "autosave written");
        Ok(())
    }
}

pub struct SystemContext<'a> {
    /// Elapsed simulated seconds at the start of the tick.
    pub tick: u64,
    pub dt_secs: f64,
    pub scenario_name: &'a str,
}

pub trait System {
    fn name(&self) -> &str;
    fn run(
        &mut self,
        ctx: &SystemContext,
        city: &mut City,
        rng: &mut SystemRng<'_>,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::city::Difficulty;

    struct CountingSystem {
        calls: Rc<Cell<u64>>,
    }

    impl System for CountingSystem {
        fn name(&self) -> &str {
            "counting"
        }

        fn run(
            &mut self,
            _ctx: &SystemContext,
            _city: &mut City,
            _rng: &mut SystemRng<'_>,
        ) -> Result<()> {
            self.calls.set(self.calls.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn engine_runs_each_system_once_per_tick() {
        let settings = EngineSettings {
            scenario_name: "test".into(),
            seed: 1,
            autosave_interval_ticks: 0,
            save_dir: PathBuf::from("saves_engine_test"),
        };
        let calls = Rc::new(Cell::new(0));
        let mut engine = EngineBuilder::new(settings)
            .with_system(CountingSystem {
                calls: Rc::clone(&calls),
            })
            .build();
        let mut city = City::new("EcoVille", Difficulty::Normal);

        engine.run(&mut city, 5).unwrap();
        assert_eq!(calls.get(), 5);
    }
}
