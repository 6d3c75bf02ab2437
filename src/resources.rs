use serde::{Deserialize, Serialize};

pub const SATISFACTION_MAX: f64 = 100.0;

/// The city's three balancing quantities. Bounds are enforced after every
/// delta: money and emission never drop below zero, satisfaction stays in
/// [0, 100] regardless of which code path mutated it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceLedger {
    money: f64,
    carbon_emission: f64,
    satisfaction: f64,
}

impl ResourceLedger {
    pub fn new(money: f64, carbon_emission: f64, satisfaction: f64) -> Self {
        let mut ledger = Self {
            money,
            carbon_emission,
            satisfaction,
        };
        ledger.enforce_bounds();
        ledger
    }

    pub fn money(&self) -> f64 {
        self.money
    }

    pub fn carbon_emission(&self) -> f64 {
        self.carbon_emission
    }

    pub fn satisfaction(&self) -> f64 {
        self.satisfaction
    }

    /// Affordability check. No side effect; callers charge separately.
    pub fn verify_sufficient(&self, cost: f64) -> bool {
        self.money >= cost
    }

    pub fn apply_delta(&mut self, money_delta: f64, emission_delta: f64, satisfaction_delta: f64) {
        self.money += money_delta;
        self.carbon_emission += emission_delta;
        self.satisfaction += satisfaction_delta;
        self.enforce_bounds();
    }

    pub fn enforce_bounds(&mut self) {
        self.money = self.money.max(0.0);
        self.carbon_emission = self.carbon_emission.max(0.0);
        self.satisfaction = self.satisfaction.clamp(0.0, SATISFACTION_MAX);
    }

    pub fn snapshot(&self) -> ResourceSnapshot {
        ResourceSnapshot {
            money: self.money,
            carbon_emission: self.carbon_emission,
            satisfaction: self.satisfaction,
        }
    }
}

impl Default for ResourceLedger {
    fn default() -> Self {
        Self::new(1000.0, 50.0, 70.0)
    }
}

/// Plain serializable view of the ledger; the contract shared with the save
/// collaborator and the statistics surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub money: f64,
    pub carbon_emission: f64,
    pub satisfaction: f64,
}

impl From<ResourceSnapshot> for ResourceLedger {
    fn from(snapshot: ResourceSnapshot) -> Self {
        Self::new(
            snapshot.money,
            snapshot.carbon_emission,
            snapshot.satisfaction,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_normal_start() {
        let ledger = ResourceLedger::default();
        assert_eq!(ledger.money(), 1000.0);
        assert_eq!(ledger.carbon_emission(), 50.0);
        assert_eq!(ledger.satisfaction(), 70.0);
    }

    #[test]
    fn verify_sufficient_boundary() {
        let ledger = ResourceLedger::new(500.0, 50.0, 70.0);
        assert!(ledger.verify_sufficient(400.0));
        assert!(ledger.verify_sufficient(500.0));
        assert!(!ledger.verify_sufficient(500.01));
        assert!(!ledger.verify_sufficient(600.0));
    }

    #[test]
    fn satisfaction_stays_in_bounds() {
        let mut ledger = ResourceLedger::new(100.0, 10.0, 90.0);
        ledger.apply_delta(0.0, 0.0, 50.0);
        assert_eq!(ledger.satisfaction(), 100.0);
        ledger.apply_delta(0.0, 0.0, -250.0);
        assert_eq!(ledger.satisfaction(), 0.0);
    }

    #[test]
    fn money_and_emission_never_go_negative() {
        let mut ledger = ResourceLedger::new(100.0, 10.0, 50.0);
        ledger.apply_delta(-450.0, -75.0, 0.0);
        assert_eq!(ledger.money(), 0.0);
        assert_eq!(ledger.carbon_emission(), 0.0);
    }

    #[test]
    fn snapshot_round_trips() {
        let ledger = ResourceLedger::new(731.5, 42.25, 68.0);
        let restored = ResourceLedger::from(ledger.snapshot());
        assert_eq!(restored, ledger);
    }
}
