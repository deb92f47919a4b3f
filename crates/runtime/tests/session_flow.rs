use std::fs;
use std::path::PathBuf;

use combat_core::{
    ActionBlock, CombatEvent, DebuffKind, EncounterOutcome, EnemyTemplate, ErrorSeverity,
    PlayerRecord, ReactionKind, Side, TurnPhase,
};
use combat_runtime::{AttackInput, RuntimeConfig, RuntimeError, Session};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn shipped_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

/// Ayla (initiative 20) against one Slime (500 HP, defense 20, initiative 10).
fn slime_duel() -> Session {
    Session::builder(RuntimeConfig::default().with_seed(11))
        .players([PlayerRecord::new("Ayla", 100.0, 20)])
        .enemies([EnemyTemplate::new("Slime", 500.0)
            .with_defense(20.0)
            .with_initiative(10)])
        .build()
        .unwrap()
}

fn hit<'a>(element: &'a str, damage: &'a str) -> AttackInput<'a> {
    AttackInput {
        element,
        damage_override: damage,
        ..AttackInput::default()
    }
}

#[test]
fn shipped_content_starts_on_a_player_turn() {
    init_tracing();
    let config = RuntimeConfig::from_data_dir(shipped_data(), 2024).unwrap();
    let session = Session::load(config).unwrap();

    let encounter = session.encounter();
    assert_eq!(encounter.players().len(), 4);
    assert_eq!(encounter.enemies().len(), 3);
    assert_eq!(encounter.reactions().len(), 24);
    assert!(matches!(
        encounter.phase(),
        TurnPhase::AwaitingPlayerAction(_)
    ));

    let current = session.current_actor().unwrap();
    assert_eq!(encounter.entity(current).unwrap().side, Side::Player);
}

#[test]
fn vaporize_then_victory() {
    init_tracing();
    let mut session = slime_duel();
    let ayla = session.find("Ayla").unwrap();
    let slime = session.find("Slime").unwrap();

    session.attack(ayla, slime, &hit("Hydro", "0"));
    session.advance();
    let events = session.attack(ayla, slime, &hit("Pyro", "100"));

    assert!(events.iter().any(|event| matches!(
        event,
        CombatEvent::ReactionTriggered {
            reaction: ReactionKind::Vaporize,
            ..
        }
    )));
    let remaining = session.encounter().entity(slime).unwrap();
    assert_eq!(remaining.current_hp(), 370.0);
    assert!(remaining.applied_elements().is_empty());

    session.advance();
    let events = session.attack(ayla, slime, &hit("", "1000"));
    assert_eq!(
        events.last(),
        Some(&CombatEvent::EncounterEnded(
            EncounterOutcome::AllEnemiesDefeated
        ))
    );
    assert_eq!(
        session.outcome(),
        Some(EncounterOutcome::AllEnemiesDefeated)
    );

    let after = session.advance();
    assert_eq!(
        after,
        vec![CombatEvent::Notice(
            "the encounter has already ended".to_string()
        )]
    );
}

#[test]
fn frozen_enemy_skips_a_turn_and_thaws() {
    init_tracing();
    let mut session = slime_duel();
    let ayla = session.find("Ayla").unwrap();
    let slime = session.find("Slime").unwrap();

    session.attack(ayla, slime, &hit("Cryo", "0"));
    session.advance();
    assert_eq!(session.encounter().entity(ayla).unwrap().current_hp(), 90.0);

    session.attack(ayla, slime, &hit("Hydro", "0"));
    assert!(session.encounter().entity(slime).unwrap().is_frozen());

    let events = session.advance();
    assert!(events.contains(&CombatEvent::ActionRejected {
        actor: "Slime".into(),
        reason: ActionBlock::Frozen,
    }));
    assert!(events.contains(&CombatEvent::DebuffEnded {
        target: "Slime".into(),
        debuff: DebuffKind::Freeze,
    }));
    assert!(!session.encounter().entity(slime).unwrap().is_frozen());
    assert_eq!(session.encounter().entity(ayla).unwrap().current_hp(), 90.0);
}

#[test]
fn attacking_twice_in_one_turn_is_refused() {
    init_tracing();
    let mut session = slime_duel();
    let ayla = session.find("Ayla").unwrap();
    let slime = session.find("Slime").unwrap();

    session.attack(ayla, slime, &hit("Geo", "10"));
    let hp = session.encounter().entity(slime).unwrap().current_hp();

    let events = session.attack(ayla, slime, &hit("Geo", "10"));
    assert!(matches!(events.as_slice(), [CombatEvent::Notice(_)]));
    assert_eq!(session.encounter().entity(slime).unwrap().current_hp(), hp);
}

#[test]
fn same_seed_same_log() {
    init_tracing();
    let play = || {
        let mut session = slime_duel();
        let ayla = session.find("Ayla").unwrap();
        let slime = session.find("Slime").unwrap();
        let dice = AttackInput {
            element: "Electro",
            dice_faces: "20",
            dice_count: "3",
            ..AttackInput::default()
        };
        for _ in 0..3 {
            session.attack(ayla, slime, &dice);
            session.advance();
        }
        session.recent_lines()
    };

    assert_eq!(play(), play());
}

#[test]
fn loads_content_from_a_custom_dir() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    fs::copy(
        shipped_data().join("reactions.ron"),
        dir.path().join("reactions.ron"),
    )
    .unwrap();
    fs::write(dir.path().join("config.toml"), "enemy_attack_damage = 3.0\n").unwrap();
    fs::write(
        dir.path().join("roster.ron"),
        r#"(players: [(name: "Solo", max_hp: 50.0, armor_class: 10, movement: 30, initiative: 1)])"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("enemies.ron"),
        r#"(enemies: [(name: "Rat", max_hp: 10.0, initiative: Some(5))])"#,
    )
    .unwrap();

    let config = RuntimeConfig::from_data_dir(dir.path(), 1).unwrap();
    let session = Session::load(config).unwrap();

    // The rat moves first and bites once before Solo's turn.
    let solo = session.find("Solo").unwrap();
    assert_eq!(session.encounter().entity(solo).unwrap().current_hp(), 47.0);
    assert_eq!(session.current_actor(), Some(solo));
}

#[test]
fn missing_content_is_a_load_error() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let config = RuntimeConfig::default().with_seed(1);
    let config = RuntimeConfig {
        data_dir: dir.path().to_path_buf(),
        ..config
    };

    let err = Session::load(config).err().unwrap();
    assert!(matches!(err, RuntimeError::Content(_)));
    assert_eq!(err.severity(), ErrorSeverity::Fatal);
    assert_eq!(err.error_code(), "content");
}
