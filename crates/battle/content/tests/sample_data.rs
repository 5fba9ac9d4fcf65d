//! The data directory shipped with the crate must load, pass the audit, and
//! start a battle.

use std::path::PathBuf;

use battle_content::{ContentFactory, audit_content};
use battle_core::{BattleEngine, BattlePhase, UnitKey};

fn factory() -> ContentFactory {
    ContentFactory::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"))
}

#[test]
fn shipped_content_is_clean() {
    let factory = factory();
    let heroes = factory.load_heroes().unwrap();
    let enemies = factory.load_enemies().unwrap();

    let issues = audit_content(&heroes, &enemies);
    assert!(issues.is_empty(), "unexpected issues: {issues:?}");
}

#[test]
fn shipped_content_starts_a_battle() {
    let factory = factory();
    let roster = factory.roster(["goblin", "slime", "slime"]).unwrap();
    let enemies = factory.load_enemies().unwrap();
    let config = factory.load_config().unwrap();

    let engine = BattleEngine::start(&roster, &enemies, config, 42).unwrap();

    assert_eq!(
        engine.phase(),
        BattlePhase::AwaitingHeroAction {
            hero: UnitKey::hero(0)
        }
    );
    let ids: Vec<_> = engine
        .state()
        .enemies
        .iter()
        .map(|enemy| enemy.id.as_str())
        .collect();
    assert_eq!(ids, ["goblin", "slime", "slime#2"]);
}
