use std::sync::Arc;

use chemassist_core::agents::{AiOrchestrator, AiSettings, MockProvider, ProviderKind};
use chemassist_core::model_manager::{FAILURE_MESSAGE, FAILURE_SUGGESTIONS};
use chemassist_core::{ModelManager, StructureAction, StructureFormat};

fn mock_manager() -> Arc<ModelManager> {
    ModelManager::live(Arc::new(AiSettings::mock())).expect("manager should build")
}

#[tokio::test]
async fn aspirin_prompt_yields_canned_structure() {
    let manager = mock_manager();
    let session = manager.session();

    let response = manager
        .generate_structure(&session, "アスピリンの構造を描いてください")
        .await;

    assert!(response.success, "{response:?}");
    assert_eq!(response.error, None);
    let first = &response.structures[0];
    assert_eq!(first.data, "CC(=O)OC1=CC=CC=C1C(=O)O");
    assert_eq!(first.label.as_deref(), Some("アスピリン"));
    assert_eq!(first.format, StructureFormat::Smiles);
    assert_eq!(first.action, StructureAction::Add);
    assert!(!response.message.contains("```"));
    assert!(response.message.contains("アセチルサリチル酸"));
    assert_eq!(response.suggestions[0], "アスピリンの反応性について教えて");
    assert_eq!(response.suggestions.len(), 4);
}

#[tokio::test]
async fn mock_dispatch_is_deterministic() {
    let manager = mock_manager();
    let session = manager.session();
    let a = manager.generate_structure(&session, "カフェイン").await;
    let b = manager.generate_structure(&session, "カフェイン").await;
    assert_eq!(a, b);
    assert_eq!(a.structures[0].data, "CN1C=NC2=C1C(=O)N(C(=O)N2C)C");
}

#[tokio::test]
async fn unknown_compound_asks_for_more_detail() {
    let manager = mock_manager();
    let session = manager.session();
    let response = manager.generate_structure(&session, "謎の物質X").await;
    assert!(response.success);
    assert!(response.structures.is_empty());
    assert!(response.message.contains("「謎の物質X」"));
    assert_eq!(response.suggestions.len(), 3);
}

#[tokio::test]
async fn every_intent_succeeds_in_mock_mode() {
    let manager = mock_manager();
    let session = manager.session();

    let analysis = manager
        .analyze_structure(&session, "CC(=O)OC1=CC=CC=C1C(=O)O", None)
        .await;
    assert!(analysis.success);
    assert!(analysis.structures.is_empty());
    assert_eq!(analysis.suggestions[0], "類似構造の化合物は？");
    assert_eq!(analysis.suggestions[3], "ベンゼン環について詳しく");

    let answer = manager
        .ask_question(&session, "求核置換反応とは？", Some("有機化学"))
        .await;
    assert!(answer.success);
    assert!(answer.message.contains("「求核置換反応とは？」"));

    let reaction = manager
        .predict_reaction(&session, &["CCO".to_string(), "CC(=O)O".to_string()], Some("H2SO4"))
        .await;
    assert!(reaction.success);
    assert!(reaction.structures.is_empty());
    for response in [&analysis, &answer, &reaction] {
        assert!((3..=4).contains(&response.suggestions.len()));
    }
}

#[tokio::test]
async fn mock_mode_needs_no_credentials() {
    let settings = AiSettings::mock().with_model("claude-3-opus-20240229");
    assert!(!settings.has_credentials(ProviderKind::Anthropic));
    let manager = ModelManager::live(Arc::new(settings)).unwrap();
    let session = manager.session();
    assert_eq!(session.current_model(), "claude-3-opus-20240229");
    assert!(manager.ask_question(&session, "hi", None).await.success);
}

#[tokio::test]
async fn malformed_mock_catalogue_becomes_a_failure_response() {
    let manager = ModelManager::with_mock(
        Arc::new(AiSettings::mock()),
        Arc::new(AiOrchestrator::new().unwrap()),
        MockProvider::from_json("not json"),
    );
    let session = manager.session();
    let response = manager.generate_structure(&session, "アスピリン").await;
    assert!(!response.success);
    assert_eq!(response.message, FAILURE_MESSAGE);
    assert_eq!(response.suggestions, FAILURE_SUGGESTIONS.to_vec());
    assert!(response.structures.is_empty());
    assert!(response
        .error
        .unwrap()
        .starts_with("Mock response catalogue is malformed"));
}

#[tokio::test]
async fn concurrent_calls_resolve_independently() {
    let manager = ModelManager::live(Arc::new(AiSettings {
        mock_delay_ms: 10,
        ..AiSettings::mock()
    }))
    .unwrap();
    let session = manager.session();
    let (aspirin, caffeine) = tokio::join!(
        manager.generate_structure(&session, "アスピリン"),
        manager.generate_structure(&session, "カフェイン"),
    );
    assert_eq!(aspirin.structures[0].label.as_deref(), Some("アスピリン"));
    assert_eq!(caffeine.structures[0].label.as_deref(), Some("カフェイン"));
}
