pub mod catalog;
pub mod city;
pub mod engine;
pub mod error;
pub mod events;
pub mod resources;
pub mod rng;
pub mod save;
pub mod scenario;
pub mod systems;
pub mod technology;

pub use city::{City, Difficulty};
pub use engine::{Engine, EngineBuilder, EngineSettings};
pub use error::CommandError;
pub use scenario::Scenario;
