use anyhow::Result;

use crate::{
    city::City,
    engine::{System, SystemContext},
    rng::SystemRng,
};

pub struct CycleSystem;

impl CycleSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CycleSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for CycleSystem {
    fn name(&self) -> &str {
        "cycle"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        city: &mut City,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        city.advance_cycle();
        Ok(())
    }
}
