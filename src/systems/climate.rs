use anyhow::Result;

use crate::{
    city::City,
    engine::{System, SystemContext},
    events::ClimateEventManager,
    rng::SystemRng,
};

pub struct ClimateSystem {
    manager: ClimateEventManager,
}

impl ClimateSystem {
    pub fn new() -> Self {
        Self {
            manager: ClimateEventManager::new(),
        }
    }

    pub fn manager(&self) -> &ClimateEventManager {
        &self.manager
    }
}

impl Default for ClimateSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for ClimateSystem {
    fn name(&self) -> &str {
        "climate"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        city: &mut City,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        if let Some(kind) = self.manager.tick_active(ctx.dt_secs) {
            tracing::info!(event = ?kind, "climate event subsided");
        }
        if let Some(event) = self.manager.check_for_event(city, ctx.tick, rng) {
            tracing::warn!(
                event = ?event.kind(),
                intensity = event.intensity(),
                description = event.kind().description(),
                "climate event struck"
            );
        }
        Ok(())
    }
}
