use std::{fs, path::PathBuf};

use tempfile::TempDir;

use ecocity::{
    engine::{EngineBuilder, EngineSettings},
    save::{SaveError, SaveManager},
    systems::{BookkeepingSystem, ClimateSystem, CycleSystem, ResearchSystem},
    City, Difficulty,
};

fn played_city() -> City {
    let mut city = City::new("EcoVille", Difficulty::Easy);
    city.build("Painel Solar").unwrap();
    city.build("Parque Público").unwrap();
    assert!(city.constructions_mut()[0].upgrade());
    city.start_research("Agricultura Vertical").unwrap();
    for _ in 0..8 {
        city.tick_research();
    }
    for _ in 0..3 {
        city.advance_cycle();
    }
    city
}

#[test]
fn save_and_load_reproduce_city_state() {
    let dir = TempDir::new().unwrap();
    let saves = SaveManager::new(dir.path());
    let city = played_city();

    let path = saves.save_game(&city).unwrap();
    let file = path.file_name().unwrap().to_string_lossy().into_owned();
    let loaded = saves.load_game(&file).unwrap();

    assert_eq!(loaded.name(), city.name());
    assert_eq!(loaded.difficulty(), city.difficulty());
    assert_eq!(loaded.population(), city.population());
    assert_eq!(loaded.elapsed_cycles(), city.elapsed_cycles());
    assert_eq!(loaded.resources().snapshot(), city.resources().snapshot());
    assert_eq!(loaded.constructions(), city.constructions());
    assert_eq!(loaded.constructions()[0].level, 2);
    assert_eq!(
        loaded.unlocked_technologies(),
        city.unlocked_technologies()
    );
    assert!(loaded
        .technology("Agricultura Vertical")
        .unwrap()
        .is_unlocked());
}

#[test]
fn listing_and_deleting_saves() {
    let dir = TempDir::new().unwrap();
    let saves = SaveManager::new(dir.path());
    let city = played_city();

    let path = saves.save_game(&city).unwrap();
    let file = path.file_name().unwrap().to_string_lossy().into_owned();

    let listed = saves.list_saves().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].file, file);
    assert_eq!(listed[0].city, "EcoVille");
    assert_eq!(listed[0].difficulty, Difficulty::Easy);
    assert_eq!(listed[0].population, city.population());
    assert_eq!(listed[0].elapsed_cycles, 3);

    saves.delete_save(&file).unwrap();
    assert!(saves.list_saves().unwrap().is_empty());
    assert!(matches!(
        saves.load_game(&file),
        Err(SaveError::Io(_))
    ));
}

#[test]
fn unknown_technology_in_record_fails_loading() {
    let dir = TempDir::new().unwrap();
    let saves = SaveManager::new(dir.path());

    let mut record = played_city().to_record();
    record
        .city
        .unlocked_technologies
        .push("Fusão Fria".to_string());
    let path = dir.path().join("tampered.json");
    fs::write(&path, serde_json::to_string_pretty(&record).unwrap()).unwrap();

    assert!(matches!(
        saves.load_game("tampered.json"),
        Err(SaveError::UnknownTechnology(name)) if name == "Fusão Fria"
    ));
}

#[test]
fn unsupported_format_version_fails_loading() {
    let dir = TempDir::new().unwrap();
    let saves = SaveManager::new(dir.path());

    let mut record = played_city().to_record();
    record.metadata.format_version = 99;
    let path = dir.path().join("future.json");
    fs::write(&path, serde_json::to_string_pretty(&record).unwrap()).unwrap();

    assert!(matches!(
        saves.load_game("future.json"),
        Err(SaveError::UnsupportedVersion(99))
    ));
}

#[test]
fn corrupted_json_fails_loading_and_is_skipped_by_listing() {
    let dir = TempDir::new().unwrap();
    let saves = SaveManager::new(dir.path());
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

    assert!(matches!(
        saves.load_game("broken.json"),
        Err(SaveError::Format(_))
    ));
    assert!(saves.list_saves().unwrap().is_empty());
}

#[test]
fn engine_writes_autosaves_on_its_interval() {
    let dir = TempDir::new().unwrap();
    let settings = EngineSettings {
        scenario_name: "autosave".into(),
        seed: 42,
        autosave_interval_ticks: 5,
        save_dir: PathBuf::from(dir.path()),
    };
    let mut engine = EngineBuilder::new(settings)
        .with_system(CycleSystem::new())
        .with_system(ResearchSystem::new())
        .with_system(ClimateSystem::new())
        .with_system(BookkeepingSystem::new())
        .build();
    let mut city = City::new("EcoVille", Difficulty::Normal);

    engine.run(&mut city, 5).unwrap();

    let saves = SaveManager::new(dir.path());
    let loaded = saves.load_game("autosave_EcoVille.json").unwrap();
    assert_eq!(loaded.elapsed_cycles(), 5);
    assert_eq!(loaded.resources().snapshot(), city.resources().snapshot());
}
