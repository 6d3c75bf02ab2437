//! Random climate events. Trigger probability, severity pool, and intensity
//! all rise with the city's emission level; a triggered event shocks the
//! ledger once and then lives only as a countdown until it subsides.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::city::City;

pub const BASE_TRIGGER_PROBABILITY: f64 = 0.01;
pub const EVENT_COOLDOWN_SECS: u64 = 120;
const MIN_DURATION_SECS: f64 = 20.0;
const MAX_DURATION_SECS: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Drought,
    Flood,
    Storm,
    Heatwave,
    Frost,
    Wildfire,
}

pub const ALL_EVENTS: [EventKind; 6] = [
    EventKind::Drought,
    EventKind::Flood,
    EventKind::Storm,
    EventKind::Heatwave,
    EventKind::Frost,
    EventKind::Wildfire,
];

/// Drawn from instead of [`ALL_EVENTS`] once emission passes 80.
pub const SEVERE_EVENTS: [EventKind; 4] = [
    EventKind::Drought,
    EventKind::Heatwave,
    EventKind::Wildfire,
    EventKind::Storm,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventEffects {
    pub money: f64,
    pub satisfaction: f64,
    pub emission: f64,
}

impl EventKind {
    pub fn base_effects(self) -> EventEffects {
        match self {
            EventKind::Drought => EventEffects {
                money: -100.0,
                satisfaction: -15.0,
                emission: 5.0,
            },
            EventKind::Flood => EventEffects {
                money: -200.0,
                satisfaction: -20.0,
                emission: 10.0,
            },
            EventKind::Storm => EventEffects {
                money: -150.0,
                satisfaction: -10.0,
                emission: 8.0,
            },
            EventKind::Heatwave => EventEffects {
                money: -80.0,
                satisfaction: -12.0,
                emission: 15.0,
            },
            EventKind::Frost => EventEffects {
                money: -120.0,
                satisfaction: -8.0,
                emission: 3.0,
            },
            EventKind::Wildfire => EventEffects {
                money: -300.0,
                satisfaction: -25.0,
                emission: 50.0,
            },
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            EventKind::Drought => "Baixa umidade e falta de água afetam a população",
            EventKind::Flood => "Chuvas intensas causam inundações",
            EventKind::Storm => "Tempestade com ventos fortes e raios",
            EventKind::Heatwave => "Temperaturas extremamente altas",
            EventKind::Frost => "Temperaturas congelantes afetam a cidade",
            EventKind::Wildfire => "Incêndio florestal se aproxima da cidade",
        }
    }
}

pub fn event_pool(emission: f64) -> &'static [EventKind] {
    if emission > 80.0 {
        &SEVERE_EVENTS
    } else {
        &ALL_EVENTS
    }
}

pub fn intensity_for(emission: f64) -> f64 {
    if emission > 90.0 {
        1.5
    } else if emission > 60.0 {
        1.2
    } else {
        1.0
    }
}

#[derive(Debug, Clone)]
pub struct ClimateEvent {
    kind: EventKind,
    intensity: f64,
    effects: EventEffects,
    duration_secs: f64,
    remaining_secs: f64,
    active: bool,
    resolved: bool,
}

impl ClimateEvent {
    fn spawn(kind: EventKind, intensity: f64, rng: &mut impl Rng) -> Self {
        let base = kind.base_effects();
        let duration = rng.gen_range(MIN_DURATION_SECS..=MAX_DURATION_SECS);
        Self {
            kind,
            intensity,
            effects: EventEffects {
                money: base.money * intensity,
                satisfaction: base.satisfaction * intensity,
                emission: base.emission * intensity,
            },
            duration_secs: duration,
            remaining_secs: duration,
            active: true,
            resolved: false,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Effect magnitudes after intensity scaling.
    pub fn effects(&self) -> EventEffects {
        self.effects
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn remaining_secs(&self) -> f64 {
        self.remaining_secs
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Count down; the shock was applied at trigger time and is never
    /// re-applied here. Returns true on the step the event expires.
    pub fn tick(&mut self, dt_secs: f64) -> bool {
        if !self.active || self.resolved {
            return false;
        }
        self.remaining_secs -= dt_secs;
        if self.remaining_secs <= 0.0 {
            self.remaining_secs = 0.0;
            self.resolved = true;
            self.active = false;
            return true;
        }
        false
    }
}

/// Per-city event state machine: idle → one active event → idle, with a
/// cooldown window between triggers.
#[derive(Debug)]
pub struct ClimateEventManager {
    current: Option<ClimateEvent>,
    last_event_time: u64,
    cooldown_secs: u64,
    base_probability: f64,
}

impl ClimateEventManager {
    pub fn new() -> Self {
        Self {
            current: None,
            last_event_time: 0,
            cooldown_secs: EVENT_COOLDOWN_SECS,
            base_probability: BASE_TRIGGER_PROBABILITY,
        }
    }

    pub fn active_event(&self) -> Option<&ClimateEvent> {
        self.current.as_ref()
    }

    /// Per-update trigger chance. The higher emission threshold replaces the
    /// lower one; the multipliers do not stack.
    pub fn trigger_probability(&self, emission: f64) -> f64 {
        if emission > 100.0 {
            self.base_probability * 3.0
        } else if emission > 70.0 {
            self.base_probability * 2.0
        } else {
            self.base_probability
        }
    }

    /// Roll for a new event. Returns None while an event is active or the
    /// cooldown window is open; on a successful roll the event's shock is
    /// applied to the city's ledger immediately and the trigger time is
    /// recorded.
    pub fn check_for_event(
        &mut self,
        city: &mut City,
        elapsed_secs: u64,
        rng: &mut impl Rng,
    ) -> Option<&ClimateEvent> {
        if self.current.is_some() {
            return None;
        }
        if elapsed_secs.saturating_sub(self.last_event_time) < self.cooldown_secs {
            return None;
        }

        let emission = city.resources().carbon_emission();
        if rng.gen::<f64>() >= self.trigger_probability(emission) {
            return None;
        }

        self.last_event_time = elapsed_secs;
        let pool = event_pool(emission);
        let kind = pool[rng.gen_range(0..pool.len())];
        let event = ClimateEvent::spawn(kind, intensity_for(emission), rng);
        city.resources_mut().apply_delta(
            event.effects.money,
            event.effects.emission,
            event.effects.satisfaction,
        );
        tracing::debug!(
            kind = ?event.kind,
            intensity = event.intensity,
            description = event.kind.description(),
            "climate event triggered"
        );
        self.current = Some(event);
        self.current.as_ref()
    }

    /// Count the active event down; on expiry it is dropped and its kind is
    /// returned so the caller can report it.
    pub fn tick_active(&mut self, dt_secs: f64) -> Option<EventKind> {
        let expired = match self.current.as_mut() {
            Some(event) => {
                if event.tick(dt_secs) {
                    Some(event.kind)
                } else {
                    None
                }
            }
            None => None,
        };
        if expired.is_some() {
            self.current = None;
        }
        expired
    }
}

impl Default for ClimateEventManager {
    fn default() -> Self {
        Self::new()
    }
}
