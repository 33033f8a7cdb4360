use serde_json::json;
use shadow_core::{
    BuffCategory, BuffDefinition, BuffId, CalculatorConfig, CatalogMerge, Effect, ScoreInput,
    ShadowSelection, SystemState, TargetKind,
};
use shadow_runtime::{
    DocumentRepository, FileDocumentRepository, InMemoryDocumentRepo, Session, load_with_defaults,
};

fn config() -> CalculatorConfig {
    CalculatorConfig::default()
}

#[test]
fn missing_document_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileDocumentRepository::new(dir.path(), "shadowFruitSystem_v2").unwrap();

    assert!(!repo.exists());
    let state = load_with_defaults(&repo, &config());
    assert_eq!(state, SystemState::new(&config()));
}

#[test]
fn saved_document_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileDocumentRepository::new(dir.path(), "doc").unwrap();
    let mut session = Session::open(repo, config());

    let shadow = session
        .apply(|fruit| fruit.commit_shadow("Oars", ScoreInput::clamped(20, 9, 9)))
        .unwrap();
    let corpse = session
        .apply(|fruit| fruit.generate_corpse("Giant", 3, &ShadowSelection::All))
        .unwrap();
    session
        .try_apply(|fruit| fruit.adjust_stack_on(corpse.as_str(), "temp20", 2))
        .unwrap();

    assert!(dir.path().join("doc.json").exists());
    assert!(!dir.path().join("doc.json.tmp").exists());

    let reopened = Session::open(
        FileDocumentRepository::new(dir.path(), "doc").unwrap(),
        config(),
    );
    assert_eq!(reopened.state(), session.state());
    let corpse = reopened.state().corpse(corpse.as_str()).unwrap();
    assert_eq!(corpse.shadow_ids, vec![shadow]);
    let target = reopened.state().targets.get(corpse.id.as_str()).unwrap();
    assert_eq!(target.kind, TargetKind::Corpse);
    assert_eq!(target.stacks.get("temp20"), 2);
}

#[test]
fn corrupt_document_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("doc.json"), "{ not json").unwrap();
    let repo = FileDocumentRepository::new(dir.path(), "doc").unwrap();

    assert!(repo.load().is_err());
    let state = load_with_defaults(&repo, &config());
    assert_eq!(state, SystemState::new(&config()));
}

#[test]
fn partial_ui_is_merged_over_defaults() {
    let repo = InMemoryDocumentRepo::with_document(json!({
        "ui": { "lastDc": 16, "buffToolsView": "both" }
    }));
    let state = load_with_defaults(&repo, &config());

    assert_eq!(state.ui.shadow_dc(), Some(16));
    assert!(state.ui.buff_tools_view.shows_custom());
    assert_eq!(state.ui.current_target, "self");
    assert!(!state.catalog.is_empty());
    assert!(state.current_target().is_some());
}

#[test]
fn rejected_operation_is_not_saved() {
    let mut session = Session::open(InMemoryDocumentRepo::new(), config());
    assert!(session.try_apply(|fruit| fruit.add_ally("   ")).is_err());
    assert!(!session.repository().exists());

    session.try_apply(|fruit| fruit.add_ally("Robin")).unwrap();
    assert!(session.repository().exists());
}

#[test]
fn reset_clears_document() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileDocumentRepository::new(dir.path(), "doc").unwrap();
    let mut session = Session::open(repo, config());
    session
        .apply(|fruit| fruit.commit_shadow("Hogback", ScoreInput::clamped(8, 2, 3)))
        .unwrap();
    assert!(session.repository().exists());

    session.reset().unwrap();
    assert!(!session.repository().exists());
    assert!(session.state().shadows.is_empty());
    assert_eq!(session.state(), &SystemState::new(&config()));
}

#[test]
fn repeated_catalog_merge_does_not_rewrite_document() {
    let definition = BuffDefinition::new(
        BuffId::from("graveGrip"),
        "Grave Grip",
        BuffCategory::Control,
        9,
        "",
        Effect::Tagged {
            tag: "grave_grip".to_string(),
        },
    );
    let builtin = BuffDefinition::new(
        BuffId::from("temp20"),
        "+20 Temp HP",
        BuffCategory::Defense,
        1,
        "",
        Effect::TempHp { amount: 99 },
    );

    let mut session = Session::open(InMemoryDocumentRepo::new(), config());
    let merged = session
        .apply_if(
            |fruit| fruit.merge_catalog([builtin.clone()]),
            CatalogMerge::changed,
        )
        .unwrap();
    assert_eq!(merged.skipped, vec![BuffId::from("temp20")]);
    assert!(!session.repository().exists());

    session
        .apply_if(
            |fruit| fruit.merge_catalog([definition.clone()]),
            CatalogMerge::changed,
        )
        .unwrap();
    assert!(session.repository().exists());

    session.repository().clear().unwrap();
    let merged = session
        .apply_if(|fruit| fruit.merge_catalog([definition]), CatalogMerge::changed)
        .unwrap();
    assert!(!merged.changed());
    assert!(!session.repository().exists());
}
