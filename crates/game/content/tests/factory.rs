use std::fs;
use std::path::Path;

use swnr_content::ContentFactory;
use swnr_core::{ActorKind, EngineConfig, PoolKey, PowerSubType, ResourceName};
use tempfile::TempDir;

fn bundled() -> ContentFactory {
    ContentFactory::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
}

#[test]
fn bundled_data_loads_and_validates() {
    let factory = bundled();
    let config = factory.load_config().unwrap();
    assert_eq!(config, EngineConfig::default());

    let presets = factory.load_presets().unwrap();
    assert!(presets.get(PowerSubType::Spell).leveled_resource);

    let actors = factory.load_actors().unwrap();
    assert_eq!(actors.len(), 4);
    assert!(actors.iter().any(|a| a.kind == ActorKind::Faction));
}

#[test]
fn bundled_psychic_derives_effort_net_of_commitments() {
    let actors = bundled().load_actors().unwrap();
    let mira = actors.iter().find(|a| a.id.as_str() == "mira-vance").unwrap();

    let pools = mira.derive_pools(&EngineConfig::default());
    let effort = pools
        .get(&PoolKey::new(ResourceName::Effort, "Psychic"))
        .unwrap();
    assert_eq!(effort.max, 3);
    assert_eq!(effort.committed, Some(2));
    assert_eq!(effort.value, 1);
}

#[test]
fn missing_optional_files_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let factory = ContentFactory::new(dir.path());

    assert_eq!(factory.load_config().unwrap(), EngineConfig::default());
    assert_eq!(
        factory.load_presets().unwrap(),
        swnr_content::PresetTable::builtin()
    );
    assert!(factory.load_actors().is_err());
}

#[test]
fn malformed_catalog_reports_path() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(ContentFactory::ACTORS_FILE), "[ (id: ").unwrap();

    let err = ContentFactory::new(dir.path()).load_actors().unwrap_err();
    assert!(err.to_string().contains("actors.ron"));
}
