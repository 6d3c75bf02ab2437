use anyhow::Result;

use crate::{
    city::City,
    engine::{System, SystemContext},
    rng::SystemRng,
};

/// End-of-tick pass: re-assert ledger bounds and log the city's vitals.
pub struct BookkeepingSystem;

impl BookkeepingSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BookkeepingSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for BookkeepingSystem {
    fn name(&self) -> &str {
        "bookkeeping"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        city: &mut City,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        city.resources_mut().enforce_bounds();
        let snapshot = city.resources().snapshot();
        tracing::debug!(
            tick = ctx.tick,
            population = city.population(),
            money = snapshot.money,
            emission = snapshot.carbon_emission,
            satisfaction = snapshot.satisfaction,
            "city vitals"
        );
        Ok(())
    }
}
