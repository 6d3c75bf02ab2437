use anyhow::Result;

use crate::{
    city::City,
    engine::{System, SystemContext},
    rng::SystemRng,
};

/// Drives every in-flight research project forward once per cycle.
pub struct ResearchSystem;

impl ResearchSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ResearchSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for ResearchSystem {
    fn name(&self) -> &str {
        "research"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        city: &mut City,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        for template in city.tick_research() {
            tracing::info!(technology = template.name, "research completed");
        }
        Ok(())
    }
}
