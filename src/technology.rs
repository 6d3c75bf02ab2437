//! The research tree: immutable templates plus the per-city instances that
//! carry research state. Unlock benefits land on the ledger exactly once.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TechCategory {
    Energy,
    Transport,
    Agriculture,
    Construction,
    Technology,
}

/// One-time ledger effects applied when the technology unlocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TechBenefits {
    pub emission_delta: f64,
    pub satisfaction_delta: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct TechTemplate {
    pub name: &'static str,
    pub category: TechCategory,
    pub cost: f64,
    /// Research duration in simulation cycles.
    pub duration_cycles: u32,
    pub prerequisites: &'static [&'static str],
    pub benefits: TechBenefits,
}

pub const TECH_TREE: &[TechTemplate] = &[
    TechTemplate {
        name: "Energia Solar Avançada",
        category: TechCategory::Energy,
        cost: 800.0,
        duration_cycles: 10,
        prerequisites: &[],
        benefits: TechBenefits {
            emission_delta: -10.0,
            satisfaction_delta: 5.0,
        },
    },
    TechTemplate {
        name: "Veículos Elétricos",
        category: TechCategory::Transport,
        cost: 1200.0,
        duration_cycles: 15,
        prerequisites: &["Energia Solar Avançada"],
        benefits: TechBenefits {
            emission_delta: -15.0,
            satisfaction_delta: 0.0,
        },
    },
    TechTemplate {
        name: "Agricultura Vertical",
        category: TechCategory::Agriculture,
        cost: 600.0,
        duration_cycles: 8,
        prerequisites: &[],
        benefits: TechBenefits {
            emission_delta: 0.0,
            satisfaction_delta: 8.0,
        },
    },
    TechTemplate {
        name: "Materiais Sustentáveis",
        category: TechCategory::Construction,
        cost: 900.0,
        duration_cycles: 12,
        prerequisites: &[],
        benefits: TechBenefits {
            emission_delta: -8.0,
            satisfaction_delta: 3.0,
        },
    },
    TechTemplate {
        name: "Smart Grid",
        category: TechCategory::Technology,
        cost: 1500.0,
        duration_cycles: 20,
        prerequisites: &["Energia Solar Avançada", "Materiais Sustentáveis"],
        benefits: TechBenefits {
            emission_delta: -20.0,
            satisfaction_delta: 10.0,
        },
    },
    TechTemplate {
        name: "Captura de Carbono",
        category: TechCategory::Technology,
        cost: 2000.0,
        duration_cycles: 25,
        prerequisites: &["Smart Grid"],
        benefits: TechBenefits {
            emission_delta: -30.0,
            satisfaction_delta: 0.0,
        },
    },
];

pub fn template(name: &str) -> Option<&'static TechTemplate> {
    TECH_TREE.iter().find(|template| template.name == name)
}

/// A technology as one city sees it. Each city owns its own instances, so
/// unlocking in one run never leaks into another.
#[derive(Debug, Clone)]
pub struct Technology {
    template: &'static TechTemplate,
    remaining_cycles: u32,
    researching: bool,
    unlocked: bool,
}

impl Technology {
    pub fn from_template(template: &'static TechTemplate) -> Self {
        Self {
            template,
            remaining_cycles: template.duration_cycles,
            researching: false,
            unlocked: false,
        }
    }

    /// Fresh instances of the whole tree, for a newly created city.
    pub fn tree() -> Vec<Technology> {
        TECH_TREE.iter().map(Technology::from_template).collect()
    }

    pub fn name(&self) -> &'static str {
        self.template.name
    }

    pub fn template(&self) -> &'static TechTemplate {
        self.template
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn is_researching(&self) -> bool {
        self.researching
    }

    pub fn remaining_cycles(&self) -> u32 {
        self.remaining_cycles
    }

    pub(crate) fn begin_research(&mut self) {
        self.researching = true;
        self.remaining_cycles = self.template.duration_cycles;
    }

    /// One research step. Returns true exactly once, on the tick the
    /// countdown reaches zero; every later call is a no-op.
    pub fn tick(&mut self) -> bool {
        if !self.researching || self.unlocked {
            return false;
        }
        self.remaining_cycles = self.remaining_cycles.saturating_sub(1);
        if self.remaining_cycles == 0 {
            self.unlocked = true;
            self.researching = false;
            return true;
        }
        false
    }

    pub fn progress_percent(&self) -> f64 {
        if self.unlocked {
            return 100.0;
        }
        if !self.researching {
            return 0.0;
        }
        let total = f64::from(self.template.duration_cycles);
        (total - f64::from(self.remaining_cycles)) / total * 100.0
    }

    /// Restore path for loaded saves: mark unlocked without running the
    /// countdown (and without re-applying benefits, which the caller owns).
    pub(crate) fn force_unlocked(&mut self) {
        self.unlocked = true;
        self.researching = false;
        self.remaining_cycles = 0;
    }
}
