//! Stage controller tests against a scripted service.

mod test_utils;

use cuentos_core::{CandidateKind, Endpoint, FailureOrigin, Stage};
use cuentos_error::{CuentosErrorKind, ProtocolErrorKind};
use cuentos_workflow::{
    GENERATING_SUMMARY, ModalController, StageController, UserAction, WorkflowConfig,
    empty_list_status_text,
};
use serde_json::json;
use std::time::Duration;
use test_utils::{MockReply, MockStoryService, PresenterEvent, RecordingPresenter};
use tokio::sync::mpsc;

type Controller = StageController<MockStoryService, RecordingPresenter, ModalController>;

fn controller(service: MockStoryService) -> Controller {
    StageController::new(
        service,
        RecordingPresenter::default(),
        ModalController::default(),
        WorkflowConfig::default().with_summary_delay_ms(0),
    )
}

fn current_cycle(controller: &Controller) -> u64 {
    *controller.pending().unwrap().cycle()
}

fn protocol_kind(err: &cuentos_error::CuentosError) -> ProtocolErrorKind {
    match err.kind() {
        CuentosErrorKind::Protocol(e) => e.kind.clone(),
        other => panic!("expected a protocol violation, got {other}"),
    }
}

#[tokio::test]
async fn test_full_run_reaches_story_ready() {
    let mut controller = controller(MockStoryService::happy_path());

    assert_eq!(controller.start().await.unwrap(), Stage::VillainSelectionPending);
    let cycle = current_cycle(&controller);
    assert_eq!(
        controller.pick(cycle, 1).await.unwrap(),
        Stage::HeroSelectionPending
    );
    let cycle = current_cycle(&controller);
    assert_eq!(controller.pick(cycle, 0).await.unwrap(), Stage::StoryReady);

    let session = controller.session();
    assert_eq!(session.summary(), Some("S"));
    assert_eq!(session.selected_villain(), Some("B"));
    assert_eq!(session.selected_hero(), Some("X"));
    assert_eq!(session.story(), Some("The End"));
    assert_eq!(session.history(), &Stage::ORDER[..]);
    assert!(controller.pending().is_none());

    assert_eq!(
        controller.service().endpoints(),
        vec![
            Endpoint::Summary,
            Endpoint::Villains,
            Endpoint::Heroes,
            Endpoint::Story
        ]
    );
}

#[tokio::test]
async fn test_request_bodies() {
    let mut controller = controller(MockStoryService::happy_path());
    controller.start().await.unwrap();
    controller.pick(current_cycle(&controller), 1).await.unwrap();
    controller.pick(current_cycle(&controller), 1).await.unwrap();

    let service = controller.service();
    assert_eq!(service.body(Endpoint::Summary), Some(json!({})));
    assert_eq!(service.body(Endpoint::Villains), Some(json!({ "resumen": "S" })));
    assert_eq!(
        service.body(Endpoint::Heroes),
        Some(json!({ "resumen": "S", "villano": "B" }))
    );
    assert_eq!(
        service.body(Endpoint::Story),
        Some(json!({ "resumen": "S", "villano": "B", "heroe": "Y" }))
    );
}

#[tokio::test]
async fn test_story_is_presented_with_audio() {
    let mut controller = controller(MockStoryService::happy_path());
    controller.start().await.unwrap();
    controller.pick(current_cycle(&controller), 0).await.unwrap();
    controller.pick(current_cycle(&controller), 0).await.unwrap();

    let modal = controller.modal();
    assert!(modal.is_visible());
    assert_eq!(modal.surface().text(), "The End");
    assert_eq!(
        modal.audio().loaded_source().map(|a| a.as_str()),
        Some("output (3).wav")
    );
    assert_eq!(modal.audio().load_count(), 1);
}

#[tokio::test]
async fn test_status_sequence_before_villains() {
    let mut controller = controller(MockStoryService::happy_path());
    controller.start().await.unwrap();

    assert_eq!(
        controller.presenter().statuses(),
        vec![GENERATING_SUMMARY, "S", ""]
    );
    assert_eq!(
        controller.presenter().renders(),
        vec![(
            CandidateKind::Villain,
            vec!["A".to_string(), "B".to_string(), "C".to_string()]
        )]
    );
}

#[tokio::test(start_paused = true)]
async fn test_summary_stays_up_for_the_configured_delay() {
    let mut controller = StageController::new(
        MockStoryService::happy_path(),
        RecordingPresenter::default(),
        ModalController::default(),
        WorkflowConfig::default(),
    );

    let before = tokio::time::Instant::now();
    controller.start().await.unwrap();
    assert!(before.elapsed() >= Duration::from_millis(5000));
}

#[tokio::test]
async fn test_trailing_newline_yields_empty_candidate() {
    let service = MockStoryService::happy_path()
        .with(Endpoint::Villains, MockReply::Success("A\nB\n".into()));
    let mut controller = controller(service);
    controller.start().await.unwrap();

    let texts: Vec<&str> = controller.pending().unwrap().texts().collect();
    assert_eq!(texts, vec!["A", "B", ""]);

    // The blank candidate is selectable like any other.
    controller.pick(current_cycle(&controller), 2).await.unwrap();
    assert_eq!(controller.session().selected_villain(), Some(""));
}

#[tokio::test]
async fn test_drop_blank_candidates() {
    let service = MockStoryService::happy_path()
        .with(Endpoint::Villains, MockReply::Success("A\n\nB\n".into()));
    let config = WorkflowConfig::builder()
        .summary_delay_ms(0)
        .drop_blank_candidates(true)
        .build()
        .unwrap();
    let mut controller = StageController::new(
        service,
        RecordingPresenter::default(),
        ModalController::default(),
        config,
    );
    controller.start().await.unwrap();

    let texts: Vec<&str> = controller.pending().unwrap().texts().collect();
    assert_eq!(texts, vec!["A", "B"]);
}

fn drop_blank_controller(service: MockStoryService) -> Controller {
    let config = WorkflowConfig::builder()
        .summary_delay_ms(0)
        .drop_blank_candidates(true)
        .build()
        .unwrap();
    StageController::new(
        service,
        RecordingPresenter::default(),
        ModalController::default(),
        config,
    )
}

#[tokio::test]
async fn test_all_blank_villains_fail_the_stage() {
    let service = MockStoryService::happy_path()
        .with(Endpoint::Villains, MockReply::Success("\n \n".into()));
    let mut controller = drop_blank_controller(service);

    assert_eq!(controller.start().await.unwrap(), Stage::Failed);
    let session = controller.session();
    assert_eq!(session.failed_at(), Some(Stage::AwaitingVillains));
    assert_eq!(
        session.last_error().unwrap().message(),
        empty_list_status_text(CandidateKind::Villain)
    );
    assert!(controller.pending().is_none());
    assert!(controller.presenter().renders().is_empty());
    assert_eq!(
        controller.presenter().last_status(),
        Some("There were no villains to choose from.")
    );
    assert_eq!(
        controller.service().endpoints(),
        vec![Endpoint::Summary, Endpoint::Villains]
    );
}

#[tokio::test]
async fn test_all_blank_heroes_end_drive_as_failed() {
    let service = MockStoryService::happy_path()
        .with(Endpoint::Heroes, MockReply::Success(" \n\n".into()));
    let mut controller = drop_blank_controller(service);
    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(UserAction::Pick { cycle: 1, index: 0 }).unwrap();

    assert_eq!(controller.drive(rx).await.unwrap(), Stage::Failed);
    let session = controller.session();
    assert_eq!(session.failed_at(), Some(Stage::AwaitingHeroes));
    assert_eq!(session.selected_villain(), Some("A"));
    assert!(controller.pending().is_none());
    assert_eq!(
        controller.presenter().last_status(),
        Some("There were no heroes to choose from.")
    );
    assert!(!controller.service().endpoints().contains(&Endpoint::Story));
    drop(tx);
}

#[tokio::test]
async fn test_heroes_business_error_fails_without_story_request() {
    let service = MockStoryService::happy_path().with(
        Endpoint::Heroes,
        MockReply::Business("Resumen o villano no proporcionado".into()),
    );
    let mut controller = controller(service);
    controller.start().await.unwrap();
    let stage = controller
        .pick(current_cycle(&controller), 0)
        .await
        .unwrap();

    assert_eq!(stage, Stage::Failed);
    let session = controller.session();
    assert_eq!(session.stage(), Stage::Failed);
    assert_eq!(session.failed_at(), Some(Stage::AwaitingHeroes));
    assert_eq!(session.selected_villain(), Some("A"));
    assert_eq!(session.selected_hero(), None);

    let failure = session.last_error().unwrap();
    assert_eq!(failure.origin(), FailureOrigin::Business);
    assert_eq!(failure.message(), "Resumen o villano no proporcionado");
    assert_eq!(
        controller.presenter().last_status(),
        Some("Resumen o villano no proporcionado")
    );
    assert!(!controller.service().endpoints().contains(&Endpoint::Story));
    assert!(!controller.modal().is_visible());
}

#[tokio::test]
async fn test_summary_transport_failure_shows_generic_message() {
    let service = MockStoryService::new().with(Endpoint::Summary, MockReply::Transport);
    let mut controller = controller(service);

    assert_eq!(controller.start().await.unwrap(), Stage::Failed);
    assert_eq!(
        controller.presenter().last_status(),
        Some("There was an error generating the summary.")
    );
    assert_eq!(
        controller.session().last_error().unwrap().origin(),
        FailureOrigin::Transport
    );
    assert_eq!(controller.session().summary(), None);
    assert_eq!(controller.service().endpoints(), vec![Endpoint::Summary]);
}

#[tokio::test]
async fn test_villains_transport_failure_keeps_summary() {
    let service = MockStoryService::happy_path().with(Endpoint::Villains, MockReply::Transport);
    let mut controller = controller(service);

    assert_eq!(controller.start().await.unwrap(), Stage::Failed);
    assert_eq!(controller.session().summary(), Some("S"));
    assert_eq!(
        controller.session().failed_at(),
        Some(Stage::AwaitingVillains)
    );
    assert_eq!(
        controller.presenter().last_status(),
        Some("There was an error generating the villains.")
    );
    assert!(controller.pending().is_none());
}

#[tokio::test]
async fn test_story_business_error() {
    let service = MockStoryService::happy_path()
        .with(Endpoint::Story, MockReply::Business("Datos incompletos".into()));
    let mut controller = controller(service);
    controller.start().await.unwrap();
    controller.pick(current_cycle(&controller), 0).await.unwrap();
    let stage = controller
        .pick(current_cycle(&controller), 1)
        .await
        .unwrap();

    assert_eq!(stage, Stage::Failed);
    assert_eq!(controller.session().selected_hero(), Some("Y"));
    assert_eq!(controller.session().story(), None);
    assert!(!controller.modal().is_visible());
}

#[tokio::test]
async fn test_handlers_out_of_order_are_rejected() {
    let mut controller = controller(MockStoryService::happy_path());

    let err = controller.on_villain_selected("A").await.unwrap_err();
    assert!(err.is_protocol_violation());
    assert!(matches!(
        protocol_kind(&err),
        ProtocolErrorKind::StageMismatch { .. }
    ));

    assert!(controller.on_heroes_received("X").unwrap_err().is_protocol_violation());
    assert!(controller.on_story_received("The End").unwrap_err().is_protocol_violation());

    assert_eq!(controller.session().stage(), Stage::Idle);
    assert!(controller.service().calls().is_empty());
    assert!(controller.presenter().events.is_empty());
}

#[tokio::test]
async fn test_start_twice_is_rejected() {
    let mut controller = controller(MockStoryService::happy_path());
    controller.start().await.unwrap();

    let err = controller.start().await.unwrap_err();
    assert!(err.is_protocol_violation());
    assert_eq!(controller.session().stage(), Stage::VillainSelectionPending);
    assert_eq!(controller.service().calls().len(), 2);
}

#[tokio::test]
async fn test_stale_pick_is_rejected() {
    let mut controller = controller(MockStoryService::happy_path());
    controller.start().await.unwrap();
    let villain_cycle = current_cycle(&controller);
    controller.pick(villain_cycle, 2).await.unwrap();

    let err = controller.pick(villain_cycle, 0).await.unwrap_err();
    assert!(matches!(
        protocol_kind(&err),
        ProtocolErrorKind::StaleCycle { got, .. } if got == villain_cycle
    ));
    assert_eq!(controller.session().selected_villain(), Some("C"));
    assert_eq!(controller.session().stage(), Stage::HeroSelectionPending);
}

#[tokio::test]
async fn test_pick_outside_list_is_rejected() {
    let mut controller = controller(MockStoryService::happy_path());
    controller.start().await.unwrap();

    let err = controller
        .pick(current_cycle(&controller), 3)
        .await
        .unwrap_err();
    assert_eq!(protocol_kind(&err), ProtocolErrorKind::UnknownCandidate(3));
    assert_eq!(
        controller.session().stage(),
        Stage::VillainSelectionPending
    );
    assert_eq!(controller.session().selected_villain(), None);
}

#[tokio::test]
async fn test_pick_after_story_is_rejected() {
    let mut controller = controller(MockStoryService::happy_path());
    controller.start().await.unwrap();
    controller.pick(current_cycle(&controller), 0).await.unwrap();
    let hero_cycle = current_cycle(&controller);
    controller.pick(hero_cycle, 0).await.unwrap();

    let err = controller.pick(hero_cycle, 1).await.unwrap_err();
    assert!(err.is_protocol_violation());
    assert_eq!(controller.session().selected_hero(), Some("X"));
    assert_eq!(controller.service().calls().len(), 4);
}

#[tokio::test]
async fn test_selection_is_announced() {
    let mut controller = controller(MockStoryService::happy_path());
    controller.start().await.unwrap();
    controller.pick(current_cycle(&controller), 1).await.unwrap();

    assert!(controller
        .presenter()
        .events
        .contains(&PresenterEvent::Announce(CandidateKind::Villain, "B".into())));
    let renders = controller.presenter().renders();
    assert_eq!(renders.len(), 2);
    assert_eq!(renders[1].0, CandidateKind::Hero);
}

#[tokio::test]
async fn test_drive_consumes_picks() {
    let mut controller = controller(MockStoryService::happy_path());
    let (tx, rx) = mpsc::unbounded_channel();
    // Cycles are assigned 1, 2 in render order.
    tx.send(UserAction::Pick { cycle: 1, index: 2 }).unwrap();
    tx.send(UserAction::Pick { cycle: 2, index: 1 }).unwrap();

    assert_eq!(controller.drive(rx).await.unwrap(), Stage::StoryReady);
    assert_eq!(controller.session().selected_villain(), Some("C"));
    assert_eq!(controller.session().selected_hero(), Some("Y"));
}

#[tokio::test]
async fn test_drive_stops_when_channel_closes() {
    let mut controller = controller(MockStoryService::happy_path());
    let (tx, rx) = mpsc::unbounded_channel::<UserAction>();
    drop(tx);

    assert_eq!(
        controller.drive(rx).await.unwrap(),
        Stage::VillainSelectionPending
    );
}

#[tokio::test]
async fn test_drive_surfaces_stale_pick() {
    let mut controller = controller(MockStoryService::happy_path());
    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(UserAction::Pick { cycle: 7, index: 0 }).unwrap();

    let err = controller.drive(rx).await.unwrap_err();
    assert!(err.is_protocol_violation());
}

#[tokio::test]
async fn test_drive_ends_on_failure() {
    let service = MockStoryService::happy_path().with(Endpoint::Heroes, MockReply::Transport);
    let mut controller = controller(service);
    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(UserAction::Pick { cycle: 1, index: 0 }).unwrap();

    assert_eq!(controller.drive(rx).await.unwrap(), Stage::Failed);
    assert_eq!(
        controller.presenter().last_status(),
        Some("There was an error generating the heroes.")
    );
    drop(tx);
}
