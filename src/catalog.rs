//! Buildable structures: the immutable template catalog and the mutable
//! instances a city owns once something is built.

use serde::{Deserialize, Serialize};

use crate::{error::CommandError, resources::ResourceLedger};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstructionCategory {
    Energy,
    Transport,
    Environment,
    Social,
}

impl ConstructionCategory {
    pub fn label(self) -> &'static str {
        match self {
            ConstructionCategory::Energy => "Energia Limpa",
            ConstructionCategory::Transport => "Transporte Sustentável",
            ConstructionCategory::Environment => "Proteção Ambiental",
            ConstructionCategory::Social => "Infraestrutura Social",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConstructionTemplate {
    pub name: &'static str,
    pub category: ConstructionCategory,
    pub cost: f64,
    /// Signed; negative reduces the city's emission level.
    pub emission_impact: f64,
    pub satisfaction_impact: f64,
    pub prerequisites: &'static [&'static str],
}

pub const CATALOG: &[ConstructionTemplate] = &[
    ConstructionTemplate {
        name: "Painel Solar",
        category: ConstructionCategory::Energy,
        cost: 300.0,
        emission_impact: -8.0,
        satisfaction_impact: 2.0,
        prerequisites: &[],
    },
    ConstructionTemplate {
        name: "Parque Eólico",
        category: ConstructionCategory::Energy,
        cost: 500.0,
        emission_impact: -12.0,
        satisfaction_impact: 3.0,
        prerequisites: &[],
    },
    ConstructionTemplate {
        name: "Usina Reciclagem",
        category: ConstructionCategory::Environment,
        cost: 400.0,
        emission_impact: -6.0,
        satisfaction_impact: 5.0,
        prerequisites: &[],
    },
    ConstructionTemplate {
        name: "Parque Público",
        category: ConstructionCategory::Social,
        cost: 200.0,
        emission_impact: -3.0,
        satisfaction_impact: 8.0,
        prerequisites: &[],
    },
    ConstructionTemplate {
        name: "Ciclovia",
        category: ConstructionCategory::Transport,
        cost: 150.0,
        emission_impact: -4.0,
        satisfaction_impact: 4.0,
        prerequisites: &[],
    },
    ConstructionTemplate {
        name: "Transporte Elétrico",
        category: ConstructionCategory::Transport,
        cost: 600.0,
        emission_impact: -15.0,
        satisfaction_impact: 6.0,
        prerequisites: &["Veículos Elétricos"],
    },
];

pub fn template(name: &str) -> Option<&'static ConstructionTemplate> {
    CATALOG.iter().find(|template| template.name == name)
}

impl ConstructionTemplate {
    /// Affordability first, then prerequisites in declaration order.
    pub fn check_buildable(
        &self,
        ledger: &ResourceLedger,
        unlocked: &[String],
    ) -> Result<(), CommandError> {
        if !ledger.verify_sufficient(self.cost) {
            return Err(CommandError::InsufficientFunds);
        }
        for requirement in self.prerequisites {
            if !unlocked.iter().any(|name| name == requirement) {
                return Err(CommandError::MissingTechnology((*requirement).to_string()));
            }
        }
        Ok(())
    }

    /// Independent instance; later upgrades never touch the template.
    pub fn instantiate(&self) -> Construction {
        Construction {
            name: self.name.to_string(),
            category: self.category,
            cost: self.cost,
            emission_impact: self.emission_impact,
            satisfaction_impact: self.satisfaction_impact,
            level: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Construction {
    pub name: String,
    pub category: ConstructionCategory,
    pub cost: f64,
    pub emission_impact: f64,
    pub satisfaction_impact: f64,
    pub level: u8,
}

impl Construction {
    pub const MAX_LEVEL: u8 = 3;

    /// Irreversible level-up, capped at [`Self::MAX_LEVEL`]. Returns false
    /// once the cap is reached, leaving the instance untouched.
    pub fn upgrade(&mut self) -> bool {
        if self.level >= Self::MAX_LEVEL {
            return false;
        }
        self.level += 1;
        self.cost = (self.cost * 1.5).round();
        self.emission_impact *= 1.3;
        self.satisfaction_impact *= 1.2;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        assert!(template("Painel Solar").is_some());
        assert!(template("Arranha-Céu").is_none());
    }

    #[test]
    fn insufficient_funds_reported_before_missing_technology() {
        let ledger = ResourceLedger::new(100.0, 50.0, 70.0);
        let electric = template("Transporte Elétrico").unwrap();
        assert_eq!(
            electric.check_buildable(&ledger, &[]),
            Err(CommandError::InsufficientFunds)
        );
    }

    #[test]
    fn missing_technology_names_first_unmet_prerequisite() {
        let ledger = ResourceLedger::new(1000.0, 50.0, 70.0);
        let electric = template("Transporte Elétrico").unwrap();
        assert_eq!(
            electric.check_buildable(&ledger, &[]),
            Err(CommandError::MissingTechnology("Veículos Elétricos".into()))
        );
        assert!(electric
            .check_buildable(&ledger, &["Veículos Elétricos".to_string()])
            .is_ok());
    }

    #[test]
    fn upgrade_caps_at_level_three() {
        let mut solar = template("Painel Solar").unwrap().instantiate();
        assert_eq!(solar.level, 1);

        assert!(solar.upgrade());
        assert_eq!(solar.level, 2);
        assert_eq!(solar.cost, 450.0);

        assert!(solar.upgrade());
        assert_eq!(solar.level, 3);
        assert_eq!(solar.cost, 675.0);

        let before = solar.clone();
        assert!(!solar.upgrade());
        assert_eq!(solar, before);
    }

    #[test]
    fn upgrade_scales_impacts() {
        let mut solar = template("Painel Solar").unwrap().instantiate();
        solar.upgrade();
        assert!((solar.emission_impact - -10.4).abs() < 1e-9);
        assert!((solar.satisfaction_impact - 2.4).abs() < 1e-9);
    }
}
