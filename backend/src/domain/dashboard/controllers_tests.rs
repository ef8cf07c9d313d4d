//! Dialog controller state machines, including teardown mid-request.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::dashboard::{DashboardState, reduce};
use crate::domain::ports::MockGuestCommand;
use crate::domain::{Error, GuestRecordPayload};

fn record(id: &str, name: &str) -> GuestRecord {
    GuestRecord::new(GuestRecordPayload {
        id: GuestId::new(id).expect("valid id"),
        full_name: name.to_owned(),
        address: "Jl. Merdeka No. 1".to_owned(),
        phone: None,
        purpose: "Mengurus surat".to_owned(),
        visit_date: "2025-03-12".to_owned(),
        created_at: Utc
            .with_ymd_and_hms(2025, 3, 12, 2, 0, 0)
            .single()
            .expect("valid timestamp"),
    })
}

fn form(name: &str) -> GuestForm {
    GuestForm {
        full_name: name.to_owned(),
        address: "Jl. Merdeka No. 1".to_owned(),
        phone: Some(String::new()),
        purpose: "Mengurus surat".to_owned(),
        visit_date: "2025-03-12".to_owned(),
    }
}

#[fixture]
fn teardown() -> Teardown {
    Teardown::new()
}

/// Command that never answers within a test's lifetime.
struct StalledCommand;

#[async_trait]
impl GuestCommand for StalledCommand {
    async fn create_guest(&self, _form: GuestForm) -> Result<GuestRecord, Error> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(Error::internal("stalled"))
    }

    async fn update_guest(&self, _id: GuestId, _form: GuestForm) -> Result<GuestRecord, Error> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(Error::internal("stalled"))
    }

    async fn delete_guest(&self, _id: GuestId) -> Result<(), Error> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(Error::internal("stalled"))
    }
}

#[rstest]
#[tokio::test]
async fn create_rejects_invalid_form_without_calling_store(teardown: Teardown) {
    let mut command = MockGuestCommand::new();
    command.expect_create_guest().times(0);
    let mut controller = CreateController::new(Arc::new(command), teardown.signal());

    let outcome = controller
        .submit(GuestForm {
            phone: Some("12345".into()),
            ..form("Budi Santoso")
        })
        .await;

    assert!(matches!(outcome, CreateOutcome::Invalid(_)));
    assert!(controller.field_errors().is_some());
    assert_eq!(controller.phase(), CreatePhase::Idle);
}

#[rstest]
#[tokio::test]
async fn create_success_appends_stored_record(teardown: Teardown) {
    let mut command = MockGuestCommand::new();
    command
        .expect_create_guest()
        .times(1)
        .return_once(|_| Ok(record("42", "Budi Santoso")));
    let mut controller = CreateController::new(Arc::new(command), teardown.signal());

    let outcome = controller.submit(form("Budi Santoso")).await;
    let state = outcome
        .into_action()
        .map(|action| reduce(DashboardState::default(), action))
        .expect("list changes");

    assert_eq!(
        state.records().last().map(|r| r.id().as_ref()),
        Some("42")
    );
    assert_eq!(controller.phase(), CreatePhase::Idle);
}

#[rstest]
#[tokio::test]
async fn create_failure_surfaces_error(teardown: Teardown) {
    let mut command = MockGuestCommand::new();
    command
        .expect_create_guest()
        .return_once(|_| Err(Error::service_unavailable("Gagal menyimpan data")));
    let mut controller = CreateController::new(Arc::new(command), teardown.signal());

    let outcome = controller.submit(form("Budi Santoso")).await;

    assert_eq!(outcome, CreateOutcome::Failed("Gagal menyimpan data".into()));
    assert_eq!(controller.error(), Some("Gagal menyimpan data"));
}

#[rstest]
fn edit_save_is_disabled_until_dirty(teardown: Teardown) {
    let mut controller = EditController::new(
        Arc::new(MockGuestCommand::new()),
        teardown.signal(),
        record("7", "Budi Santoso"),
    );
    assert!(!controller.can_save());

    controller.begin_edit();
    assert_eq!(controller.phase(), EditPhase::Editing);
    assert!(!controller.can_save(), "empty phone equals absent phone");

    controller.set_form(form("Budi S."));
    assert!(controller.can_save());

    controller.cancel_edit();
    assert_eq!(controller.phase(), EditPhase::Viewing);
    assert!(!controller.is_dirty());
}

#[rstest]
#[tokio::test]
async fn edit_success_returns_to_viewing_and_patches_list(teardown: Teardown) {
    let mut command = MockGuestCommand::new();
    command
        .expect_update_guest()
        .withf(|id, form| id.as_ref() == "7" && form.full_name == "Siti Aminah")
        .times(1)
        .return_once(|_, _| Ok(record("7", "Siti Aminah")));
    let mut controller = EditController::new(
        Arc::new(command),
        teardown.signal(),
        record("7", "Budi Santoso"),
    );
    controller.begin_edit();
    controller.set_form(form("Siti Aminah"));

    let outcome = controller.save().await;

    assert_eq!(controller.phase(), EditPhase::Viewing);
    assert_eq!(controller.record().full_name(), "Siti Aminah");
    let loaded = reduce(
        DashboardState::default(),
        DashboardAction::RecordsLoaded(vec![record("7", "Budi Santoso")]),
    );
    let state = reduce(loaded, outcome.into_action().expect("list changes"));
    assert_eq!(
        state.records().first().map(GuestRecord::full_name),
        Some("Siti Aminah")
    );
}

#[rstest]
#[tokio::test]
async fn edit_failure_stays_in_editing(teardown: Teardown) {
    let mut command = MockGuestCommand::new();
    command
        .expect_update_guest()
        .return_once(|_, _| Err(Error::internal("Gagal memperbarui data")));
    let mut controller = EditController::new(
        Arc::new(command),
        teardown.signal(),
        record("7", "Budi Santoso"),
    );
    controller.begin_edit();
    controller.set_form(form("Siti Aminah"));

    let outcome = controller.save().await;

    assert!(matches!(outcome, EditOutcome::Failed(_)));
    assert_eq!(controller.phase(), EditPhase::Editing);
    assert_eq!(controller.record().full_name(), "Budi Santoso");
    assert_eq!(controller.error(), Some("Gagal memperbarui data"));
}

#[rstest]
#[tokio::test]
async fn delete_requires_confirmation(teardown: Teardown) {
    let mut command = MockGuestCommand::new();
    command.expect_delete_guest().times(0);
    let mut controller = DeleteController::new(Arc::new(command), teardown.signal());

    assert_eq!(controller.confirm().await, DeleteOutcome::NotRequested);

    controller.request(GuestId::new("7").expect("valid id"));
    controller.cancel();
    assert_eq!(controller.phase(), &DeletePhase::Idle);
    assert_eq!(controller.confirm().await, DeleteOutcome::NotRequested);
}

#[rstest]
#[tokio::test]
async fn failed_delete_keeps_record_and_shows_error(teardown: Teardown) {
    let mut command = MockGuestCommand::new();
    command
        .expect_delete_guest()
        .withf(|id| id.as_ref() == "7")
        .times(1)
        .return_once(|_| Err(Error::service_unavailable("Gagal menghapus data")));
    let mut controller = DeleteController::new(Arc::new(command), teardown.signal());
    let loaded = reduce(
        DashboardState::default(),
        DashboardAction::RecordsLoaded(vec![record("6", "Agus"), record("7", "Budi")]),
    );

    controller.request(GuestId::new("7").expect("valid id"));
    let outcome = controller.confirm().await;
    let state = reduce(loaded, outcome.into_action().expect("error notice"));

    assert!(state.find(&GuestId::new("7").expect("valid id")).is_some());
    assert_eq!(
        state.notice().map(|n| n.message.as_str()),
        Some("Gagal menghapus data")
    );
    assert_eq!(controller.phase(), &DeletePhase::Idle);
}

#[rstest]
#[tokio::test]
async fn successful_delete_removes_record(teardown: Teardown) {
    let mut command = MockGuestCommand::new();
    command.expect_delete_guest().return_once(|_| Ok(()));
    let mut controller = DeleteController::new(Arc::new(command), teardown.signal());
    let loaded = reduce(
        DashboardState::default(),
        DashboardAction::RecordsLoaded(vec![record("7", "Budi")]),
    );

    controller.request(GuestId::new("7").expect("valid id"));
    let outcome = controller.confirm().await;
    let state = reduce(loaded, outcome.into_action().expect("list changes"));

    assert!(state.records().is_empty());
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn teardown_cancels_in_flight_delete(teardown: Teardown) {
    let mut controller = DeleteController::new(Arc::new(StalledCommand), teardown.signal());
    controller.request(GuestId::new("7").expect("valid id"));

    let (outcome, ()) = tokio::join!(controller.confirm(), async {
        tokio::task::yield_now().await;
        teardown.fire();
    });

    assert_eq!(outcome, DeleteOutcome::Cancelled);
    assert!(outcome.into_action().is_none());
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn dropped_teardown_cancels_in_flight_edit() {
    let teardown = Teardown::new();
    let mut controller = EditController::new(
        Arc::new(StalledCommand),
        teardown.signal(),
        record("7", "Budi Santoso"),
    );
    controller.begin_edit();
    controller.set_form(form("Siti Aminah"));

    let (outcome, ()) = tokio::join!(controller.save(), async move {
        tokio::task::yield_now().await;
        drop(teardown);
    });

    assert_eq!(outcome, EditOutcome::Cancelled);
    assert_eq!(controller.record().full_name(), "Budi Santoso");
    assert_eq!(controller.phase(), EditPhase::Editing);
}

#[rstest]
#[tokio::test]
async fn already_fired_teardown_skips_the_request(teardown: Teardown) {
    let signal = teardown.signal();
    teardown.fire();
    assert!(signal.is_torn_down());

    let mut controller = CreateController::new(Arc::new(StalledCommand), signal);
    assert_eq!(
        controller.submit(form("Budi Santoso")).await,
        CreateOutcome::Cancelled
    );
}
