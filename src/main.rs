use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ecocity::{
    engine::{EngineBuilder, EngineSettings},
    scenario::ScenarioLoader,
    systems::{BookkeepingSystem, ClimateSystem, CycleSystem, ResearchSystem},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "EcoCity headless simulation runner")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/new_game.yaml")]
    scenario: PathBuf,

    /// Override tick count (uses scenario default when omitted)
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override autosave interval in ticks (0 disables autosave)
    #[arg(long)]
    autosave_interval: Option<u64>,

    /// Directory for save files
    #[arg(long)]
    save_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let scenario = loader.load(&cli.scenario)?;
    let mut city = scenario.build_city();
    let ticks = scenario.ticks(cli.ticks);

    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        seed: cli.seed.unwrap_or(scenario.seed),
        autosave_interval_ticks: cli
            .autosave_interval
            .unwrap_or(scenario.autosave_interval_ticks),
        save_dir: cli.save_dir.unwrap_or_else(|| scenario.save_dir.clone()),
    };

    let mut engine = EngineBuilder::new(settings)
        .with_system(CycleSystem::new())
        .with_system(ResearchSystem::new())
        .with_system(ClimateSystem::new())
        .with_system(BookkeepingSystem::new())
        .build();

    engine.run(&mut city, ticks)?;

    let stats = city.statistics();
    println!(
        "Scenario '{}' completed after {} cycles. {} ({}): population {}, money {:.0}, emission {:.1}, satisfaction {:.0}%",
        scenario.name,
        stats.elapsed_cycles,
        stats.name,
        stats.difficulty,
        stats.population,
        stats.resources.money,
        stats.resources.carbon_emission,
        stats.resources.satisfaction,
    );
    Ok(())
}
